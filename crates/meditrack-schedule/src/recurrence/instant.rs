use chrono::{DateTime, Days, NaiveDate, Utc};

use super::step::{Step, add_months_clamped};

/// A point in time that recurrence steps can be applied to.
///
/// Implemented for calendar dates (refills) and UTC date-times
/// (appointments). Date-times keep their time of day; month steps clamp the
/// date part only.
pub trait CalendarInstant: Copy + Ord + std::fmt::Debug {
    /// Calendar date compared against a series' end date.
    fn calendar_date(self) -> NaiveDate;

    /// Moves the instant forward by `step`, or `None` if the result is not
    /// representable.
    fn advance(self, step: Step) -> Option<Self>;
}

impl CalendarInstant for NaiveDate {
    fn calendar_date(self) -> NaiveDate {
        self
    }

    fn advance(self, step: Step) -> Option<Self> {
        match step {
            Step::Days(days) => self.checked_add_days(Days::new(u64::from(days))),
            Step::Months(months) => add_months_clamped(self, months),
        }
    }
}

impl CalendarInstant for DateTime<Utc> {
    fn calendar_date(self) -> NaiveDate {
        self.date_naive()
    }

    fn advance(self, step: Step) -> Option<Self> {
        let naive = self.naive_utc();
        let date = naive.date().advance(step)?;
        Some(date.and_time(naive.time()).and_utc())
    }
}
