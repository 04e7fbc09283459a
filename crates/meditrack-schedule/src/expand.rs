//! Window-bounded expansion shared by the appointment and refill expanders.

use chrono::NaiveDate;

use crate::error::ScheduleResult;
use crate::recurrence::{CalendarInstant, Step};

/// A stored anchor event that repeats on a fixed step.
pub trait Series {
    type Instant: CalendarInstant;

    /// Identity of the anchor; breaks ties between same-instant occurrences.
    fn series_id(&self) -> &str;

    /// Occurrence zero.
    fn anchor(&self) -> Self::Instant;

    /// Step between occurrences, `None` when the series does not repeat.
    fn step(&self) -> Option<Step>;

    /// Last calendar date an occurrence may fall on (inclusive).
    fn end_date(&self) -> Option<NaiveDate>;
}

/// Half-open query window `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionWindow<I> {
    pub from: I,
    pub to: I,
}

impl<I: CalendarInstant> ExpansionWindow<I> {
    #[must_use]
    pub const fn new(from: I, to: I) -> Self {
        Self { from, to }
    }

    /// ## Summary
    /// Window covering `days` days starting at `now`.
    ///
    /// Collapses to an empty window if the end is not representable.
    #[must_use]
    pub fn upcoming(now: I, days: u32) -> Self {
        let to = now.advance(Step::Days(days)).unwrap_or(now);
        Self::new(now, to)
    }

    /// True when no instant can fall inside, including inverted windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to <= self.from
    }

    #[must_use]
    pub fn contains(&self, instant: I) -> bool {
        self.from <= instant && instant < self.to
    }
}

/// ## Summary
/// Expands one series into its occurrences inside `window`, in ascending order.
///
/// Occurrence `n` is `anchor + n * step`, computed from the anchor each time
/// so month clamping never accumulates. Occurrences dated after the series'
/// end date are dropped. A series without a step yields at most its anchor.
///
/// ## Errors
/// Returns `ScheduleError::InvariantViolation` if the series reports a
/// zero-length step.
///
/// ## Side Effects
/// None - this is a pure function that performs expansion in memory.
pub fn expand_series<S: Series>(
    series: &S,
    window: &ExpansionWindow<S::Instant>,
) -> ScheduleResult<Vec<S::Instant>> {
    let mut occurrences = Vec::new();
    if window.is_empty() {
        return Ok(occurrences);
    }

    let anchor = series.anchor();
    let end_date = series.end_date();
    let within_end =
        |instant: S::Instant| end_date.is_none_or(|end| instant.calendar_date() <= end);

    let Some(step) = series.step() else {
        if window.contains(anchor) && within_end(anchor) {
            occurrences.push(anchor);
        }
        return Ok(occurrences);
    };
    let step = step.ensure_positive()?;

    let mut index = step.skip_count(anchor.calendar_date(), window.from.calendar_date());
    loop {
        let Some(current) = step.times(index).and_then(|offset| anchor.advance(offset)) else {
            break;
        };
        if current >= window.to || !within_end(current) {
            break;
        }
        if current >= window.from {
            occurrences.push(current);
        }
        let Some(next) = index.checked_add(1) else {
            break;
        };
        index = next;
    }

    Ok(occurrences)
}

/// ## Summary
/// Expands every series and merges the results, ordered by instant and then
/// by series id.
///
/// ## Errors
/// Propagates the first error from [`expand_series`].
pub fn expand_merged<'a, S: Series>(
    series: &'a [S],
    window: &ExpansionWindow<S::Instant>,
) -> ScheduleResult<Vec<(&'a S, S::Instant)>> {
    let mut merged = Vec::new();
    for item in series {
        merged.extend(
            expand_series(item, window)?
                .into_iter()
                .map(|instant| (item, instant)),
        );
    }

    merged.sort_by(|(a, a_at), (b, b_at)| {
        a_at.cmp(b_at)
            .then_with(|| a.series_id().cmp(b.series_id()))
    });

    Ok(merged)
}
