//! Appointment occurrence expansion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleResult;
use crate::expand::{ExpansionWindow, Series, expand_merged};
use crate::recurrence::{RepeatRule, Step};

/// A stored appointment and its repeat rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSeries {
    pub id: String,
    pub provider: String,
    /// First appointment; occurrence zero.
    pub datetime: DateTime<Utc>,
    #[serde(default)]
    pub repeat: RepeatRule,
    /// Last day an occurrence may fall on (inclusive).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl AppointmentSeries {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        provider: impl Into<String>,
        datetime: DateTime<Utc>,
        repeat: impl Into<RepeatRule>,
    ) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            datetime,
            repeat: repeat.into(),
            end_date: None,
        }
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

impl Series for AppointmentSeries {
    type Instant = DateTime<Utc>;

    fn series_id(&self) -> &str {
        &self.id
    }

    fn anchor(&self) -> DateTime<Utc> {
        self.datetime
    }

    fn step(&self) -> Option<Step> {
        self.repeat.step()
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// One concrete appointment produced by expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentOccurrence {
    /// Id of the series this occurrence belongs to.
    pub appointment_id: String,
    pub provider: String,
    pub datetime: DateTime<Utc>,
    pub repeat: RepeatRule,
}

impl AppointmentOccurrence {
    fn from_series(series: &AppointmentSeries, datetime: DateTime<Utc>) -> Self {
        Self {
            appointment_id: series.id.clone(),
            provider: series.provider.clone(),
            datetime,
            repeat: series.repeat.clone(),
        }
    }
}

/// ## Summary
/// Expands appointment series into concrete appointments inside `window`.
///
/// The result is ordered by date-time, then by appointment id.
///
/// ## Errors
/// Returns `ScheduleError::InvariantViolation` only if a repeat rule maps to
/// a zero-length step.
pub fn expand_appointments(
    series: &[AppointmentSeries],
    window: &ExpansionWindow<DateTime<Utc>>,
) -> ScheduleResult<Vec<AppointmentOccurrence>> {
    let occurrences: Vec<_> = expand_merged(series, window)?
        .into_iter()
        .map(|(item, datetime)| AppointmentOccurrence::from_series(item, datetime))
        .collect();

    tracing::debug!(
        series = series.len(),
        occurrences = occurrences.len(),
        from = %window.from,
        to = %window.to,
        "Expanded appointment series"
    );

    Ok(occurrences)
}

/// ## Summary
/// Earliest appointment inside `window`, if any.
///
/// ## Errors
/// Same as [`expand_appointments`].
pub fn next_appointment(
    series: &[AppointmentSeries],
    window: &ExpansionWindow<DateTime<Utc>>,
) -> ScheduleResult<Option<AppointmentOccurrence>> {
    Ok(expand_appointments(series, window)?.into_iter().next())
}
