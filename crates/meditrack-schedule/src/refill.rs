//! Prescription refill projection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleResult;
use crate::expand::{ExpansionWindow, Series, expand_merged};
use crate::recurrence::{RefillSchedule, Step};

/// A stored prescription with its first refill date and schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionSeries {
    pub id: String,
    pub medication: String,
    pub dosage: String,
    pub quantity: u32,
    /// First refill; occurrence zero.
    pub refill_on: NaiveDate,
    pub refill_schedule: RefillSchedule,
    /// Last day a refill may fall on (inclusive).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl PrescriptionSeries {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        medication: impl Into<String>,
        refill_on: NaiveDate,
        refill_schedule: impl Into<RefillSchedule>,
    ) -> Self {
        Self {
            id: id.into(),
            medication: medication.into(),
            dosage: String::new(),
            quantity: 0,
            refill_on,
            refill_schedule: refill_schedule.into(),
            end_date: None,
        }
    }

    #[must_use]
    pub fn with_dosage(mut self, dosage: impl Into<String>, quantity: u32) -> Self {
        self.dosage = dosage.into();
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

impl Series for PrescriptionSeries {
    type Instant = NaiveDate;

    fn series_id(&self) -> &str {
        &self.id
    }

    fn anchor(&self) -> NaiveDate {
        self.refill_on
    }

    fn step(&self) -> Option<Step> {
        self.refill_schedule.step()
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// One projected refill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefillOccurrence {
    /// Id of the prescription this refill belongs to.
    pub prescription_id: String,
    pub medication: String,
    pub dosage: String,
    pub quantity: u32,
    pub refill_date: NaiveDate,
    pub refill_schedule: RefillSchedule,
}

impl RefillOccurrence {
    fn from_series(series: &PrescriptionSeries, refill_date: NaiveDate) -> Self {
        Self {
            prescription_id: series.id.clone(),
            medication: series.medication.clone(),
            dosage: series.dosage.clone(),
            quantity: series.quantity,
            refill_date,
            refill_schedule: series.refill_schedule.clone(),
        }
    }

    /// Display label for this refill's schedule.
    #[must_use]
    pub fn schedule_label(&self) -> &str {
        self.refill_schedule.label()
    }
}

/// ## Summary
/// Projects refill dates for each prescription inside `window`.
///
/// The result is ordered by refill date, then by prescription id.
///
/// ## Errors
/// Returns `ScheduleError::InvariantViolation` only if a schedule maps to a
/// zero-length step.
pub fn expand_refills(
    series: &[PrescriptionSeries],
    window: &ExpansionWindow<NaiveDate>,
) -> ScheduleResult<Vec<RefillOccurrence>> {
    let refills: Vec<_> = expand_merged(series, window)?
        .into_iter()
        .map(|(item, refill_date)| RefillOccurrence::from_series(item, refill_date))
        .collect();

    tracing::debug!(
        series = series.len(),
        refills = refills.len(),
        from = %window.from,
        to = %window.to,
        "Expanded prescription refills"
    );

    Ok(refills)
}
