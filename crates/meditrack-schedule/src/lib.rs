//! Projection of recurring appointments and prescription refills onto a
//! query window.
//!
//! Anchors are read-only snapshots; every expansion allocates a fresh,
//! globally ordered list of occurrences and holds no state between calls.

pub mod appointment;
pub mod error;
pub mod expand;
pub mod recurrence;
pub mod refill;

pub use appointment::{
    AppointmentOccurrence, AppointmentSeries, expand_appointments, next_appointment,
};
pub use error::{ScheduleError, ScheduleResult};
pub use expand::{ExpansionWindow, Series, expand_merged, expand_series};
pub use recurrence::{CalendarInstant, RefillSchedule, RepeatRule, Step};
pub use refill::{PrescriptionSeries, RefillOccurrence, expand_refills};
