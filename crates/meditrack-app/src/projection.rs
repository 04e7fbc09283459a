//! Upcoming-schedule projection for a batch of stored anchors.

use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use meditrack_core::error::CoreError;
use meditrack_schedule::{
    AppointmentOccurrence, AppointmentSeries, ExpansionWindow, PrescriptionSeries,
    RefillOccurrence, expand_appointments, expand_refills,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Anchors as exported by the portal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectionInput {
    #[serde(default)]
    pub appointments: Vec<AppointmentSeries>,
    #[serde(default)]
    pub prescriptions: Vec<PrescriptionSeries>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionOutput {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub next_appointment: Option<AppointmentOccurrence>,
    pub appointments: Vec<AppointmentOccurrence>,
    pub refills: Vec<RefillOccurrence>,
}

/// ## Summary
/// Expands appointments and refills over the `window_days` days following `now`.
///
/// Refills use the UTC calendar date of `now` as the first day of the window.
///
/// ## Errors
/// Returns an error if either expansion reports a broken invariant.
pub fn project(
    input: &ProjectionInput,
    now: DateTime<Utc>,
    window_days: u32,
) -> AppResult<ProjectionOutput> {
    let appointment_window = ExpansionWindow::upcoming(now, window_days);
    let refill_window: ExpansionWindow<NaiveDate> =
        ExpansionWindow::upcoming(now.date_naive(), window_days);

    let appointments = expand_appointments(&input.appointments, &appointment_window)?;
    let refills = expand_refills(&input.prescriptions, &refill_window)?;

    tracing::info!(
        appointments = appointments.len(),
        refills = refills.len(),
        window_days,
        "Projected upcoming schedule"
    );

    Ok(ProjectionOutput {
        from: appointment_window.from,
        to: appointment_window.to,
        next_appointment: appointments.first().cloned(),
        appointments,
        refills,
    })
}

/// ## Summary
/// Reads a projection input document from a JSON file.
///
/// ## Errors
/// Returns an error if the file cannot be opened or is not valid input JSON.
pub fn read_input(path: &Path) -> AppResult<ProjectionInput> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// ## Summary
/// Parses an RFC 3339 timestamp, defaulting to the current time when absent.
///
/// ## Errors
/// Returns `CoreError::ParseError` if the value is not a valid timestamp.
pub fn parse_now(value: Option<&str>) -> AppResult<DateTime<Utc>> {
    let Some(value) = value else {
        return Ok(Utc::now());
    };
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|err| CoreError::ParseError(format!("invalid timestamp {value:?}: {err}")))?;
    Ok(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_input() -> ProjectionInput {
        serde_json::from_str(
            r#"{
                "appointments": [
                    {"id": "appt-2", "provider": "GP", "datetime": "2024-03-04T09:00:00Z", "repeat": "none"},
                    {"id": "appt-1", "provider": "Physio", "datetime": "2024-01-03T14:00:00Z", "repeat": "weekly", "endDate": "2024-02-28"}
                ],
                "prescriptions": [
                    {"id": "rx-1", "medication": "Lisinopril", "dosage": "10mg", "quantity": 30,
                     "refillOn": "2024-01-01", "refillSchedule": "every_30_days"}
                ]
            }"#,
        )
        .expect("sample input should parse")
    }

    #[test_log::test]
    fn test_project_upcoming_window() {
        let now = Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap();
        let output = project(&sample_input(), now, 30).unwrap();

        assert_eq!(output.from, now);
        assert_eq!(output.to, Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap());

        let appointments: Vec<_> = output
            .appointments
            .iter()
            .map(|occ| (occ.appointment_id.as_str(), occ.datetime))
            .collect();
        assert_eq!(
            appointments,
            vec![
                ("appt-1", Utc.with_ymd_and_hms(2024, 2, 21, 14, 0, 0).unwrap()),
                ("appt-1", Utc.with_ymd_and_hms(2024, 2, 28, 14, 0, 0).unwrap()),
                ("appt-2", Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()),
            ]
        );
        assert_eq!(
            output.next_appointment.map(|occ| occ.datetime),
            Some(Utc.with_ymd_and_hms(2024, 2, 21, 14, 0, 0).unwrap())
        );

        let refills: Vec<_> = output.refills.iter().map(|refill| refill.refill_date).collect();
        assert_eq!(refills, vec![NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()]);
    }

    #[test]
    fn test_project_empty_input() {
        let now = Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap();
        let output = project(&ProjectionInput::default(), now, 90).unwrap();
        assert!(output.appointments.is_empty());
        assert!(output.refills.is_empty());
        assert!(output.next_appointment.is_none());
    }

    #[test]
    fn test_output_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap();
        let output = project(&sample_input(), now, 30).unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert!(json.get("nextAppointment").is_some());
        assert_eq!(json["refills"][0]["prescriptionId"], "rx-1");
        assert_eq!(json["refills"][0]["refillDate"], "2024-03-01");
        assert_eq!(json["refills"][0]["refillSchedule"], "every_30_days");
        assert_eq!(json["appointments"][0]["appointmentId"], "appt-1");
    }

    #[test]
    fn test_parse_now() {
        let parsed = parse_now(Some("2024-02-15T13:00:00+01:00")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap());

        assert!(parse_now(None).is_ok());
        assert!(matches!(
            parse_now(Some("yesterday")),
            Err(crate::error::AppError::CoreError(CoreError::ParseError(_)))
        ));
    }

    #[test]
    fn test_read_input_missing_file() {
        let result = read_input(Path::new("/nonexistent/anchors.json"));
        assert!(matches!(result, Err(crate::error::AppError::IoError(_))));
    }
}
