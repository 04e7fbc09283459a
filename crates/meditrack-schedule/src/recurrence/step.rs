use chrono::{Datelike, NaiveDate};

use crate::error::{ScheduleError, ScheduleResult};

/// Distance between two consecutive occurrences of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// A fixed number of days.
    Days(u32),
    /// A number of calendar months, clamped to the end of shorter months.
    Months(u32),
}

impl Step {
    pub const DAILY: Self = Self::Days(1);
    pub const WEEKLY: Self = Self::Days(7);
    pub const BIWEEKLY: Self = Self::Days(14);
    pub const EVERY_30_DAYS: Self = Self::Days(30);
    pub const MONTHLY: Self = Self::Months(1);
    pub const QUARTERLY: Self = Self::Months(3);

    /// ## Summary
    /// Rejects a step that would never move the cursor forward.
    ///
    /// ## Errors
    /// Returns `ScheduleError::InvariantViolation` for a zero-length step.
    pub fn ensure_positive(self) -> ScheduleResult<Self> {
        match self {
            Self::Days(0) | Self::Months(0) => Err(ScheduleError::InvariantViolation(
                "recurrence step must be strictly positive",
            )),
            Self::Days(_) | Self::Months(_) => Ok(self),
        }
    }

    /// Scales the step by `count`, returning `None` on overflow.
    #[must_use]
    pub fn times(self, count: u32) -> Option<Self> {
        match self {
            Self::Days(days) => days.checked_mul(count).map(Self::Days),
            Self::Months(months) => months.checked_mul(count).map(Self::Months),
        }
    }

    /// ## Summary
    /// Lower bound on the index of the first occurrence dated on or after `from`.
    ///
    /// Every index below the returned value lands on a calendar date strictly
    /// before `from`, so an expansion can start walking there instead of at
    /// the anchor.
    #[must_use]
    pub fn skip_count(self, anchor: NaiveDate, from: NaiveDate) -> u32 {
        let (elapsed, length) = match self {
            Self::Days(days) => (from.signed_duration_since(anchor).num_days(), days),
            Self::Months(months) => (months_between(anchor, from) - 1, months),
        };
        if elapsed <= 0 || length == 0 {
            return 0;
        }
        u32::try_from(elapsed / i64::from(length)).unwrap_or(u32::MAX)
    }
}

/// Whole calendar months from `start`'s month to `end`'s month, ignoring the day.
fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (i64::from(end.year()) - i64::from(start.year())) * 12 + i64::from(end.month0())
        - i64::from(start.month0())
}

/// ## Summary
/// Number of days in `month` (1-based) of `year`.
///
/// Returns `None` if the month is out of range.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month.checked_add(1)?)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

/// ## Summary
/// Adds `months` calendar months to `date`, keeping the day of month.
///
/// If that day does not exist in the target month the result is clamped to
/// the month's last day (Jan 31 + 1 month is Feb 28, or Feb 29 in a leap year).
/// Returns `None` if the result is outside the representable date range.
#[must_use]
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}
