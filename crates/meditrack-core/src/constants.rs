/// Length of the "upcoming" window shown on the portal pages, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 90;

/// Prefix for environment variables read by [`crate::config::Settings::load`].
pub const ENV_PREFIX: &str = "MEDITRACK";

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Placeholder rendered when a schedule token is empty.
pub const EMPTY_LABEL: &str = "—";
