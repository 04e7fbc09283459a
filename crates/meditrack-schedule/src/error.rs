use thiserror::Error;

/// Schedule expansion errors.
///
/// Malformed rule tokens and empty windows are not errors; they yield fewer
/// occurrences. Only broken internal invariants surface here.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
