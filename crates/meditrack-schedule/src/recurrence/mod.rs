//! Recurrence rule engine.
//!
//! Rule tokens are parsed into closed enums with an explicit fallback
//! variant, each known rule maps to a [`Step`], and [`CalendarInstant`]
//! applies steps to either calendar dates or UTC date-times.

mod instant;
mod rule;
mod step;

pub use instant::CalendarInstant;
pub use rule::{RefillSchedule, RepeatRule, normalize_token};
pub use step::{Step, add_months_clamped, days_in_month};
