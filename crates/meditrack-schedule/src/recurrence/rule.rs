use serde::{Deserialize, Serialize};

use meditrack_core::constants::EMPTY_LABEL;

use super::step::Step;

/// ## Summary
/// Canonical form of a rule token: trimmed, lowercase, with runs of spaces
/// and underscores collapsed to a single `_`.
///
/// `"Every 30 days"`, `"EVERY_30_DAYS"` and `" every  30_days "` all
/// normalize to `"every_30_days"`.
#[must_use]
pub fn normalize_token(token: &str) -> String {
    token
        .to_lowercase()
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Repeat cadence of an appointment series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepeatRule {
    /// Explicit `none`: only the anchor itself.
    #[default]
    Never,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    /// Any other token, kept verbatim. Behaves like [`RepeatRule::Never`].
    Unrecognized(String),
}

impl RepeatRule {
    /// Parses a stored token. Never fails; unknown tokens become `Unrecognized`.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match normalize_token(token).as_str() {
            "none" => Self::Never,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "biweekly" => Self::Biweekly,
            "monthly" => Self::Monthly,
            _ => {
                tracing::trace!(token, "Unrecognized repeat rule, treating as non-repeating");
                Self::Unrecognized(token.to_string())
            }
        }
    }

    /// Step between occurrences, or `None` for a non-repeating rule.
    #[must_use]
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::Daily => Some(Step::DAILY),
            Self::Weekly => Some(Step::WEEKLY),
            Self::Biweekly => Some(Step::BIWEEKLY),
            Self::Monthly => Some(Step::MONTHLY),
            Self::Never | Self::Unrecognized(_) => None,
        }
    }

    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::Never => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Human-readable cadence for display.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Never => "Does not repeat",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Biweekly => "Every 2 weeks",
            Self::Monthly => "Monthly",
            Self::Unrecognized(raw) if raw.is_empty() => EMPTY_LABEL,
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for RepeatRule {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl From<String> for RepeatRule {
    fn from(token: String) -> Self {
        Self::parse(&token)
    }
}

impl From<RepeatRule> for String {
    fn from(rule: RepeatRule) -> Self {
        match rule {
            RepeatRule::Unrecognized(raw) => raw,
            known => known.as_token().to_string(),
        }
    }
}

impl std::fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Refill cadence of a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RefillSchedule {
    Weekly,
    Every30Days,
    Monthly,
    Quarterly,
    /// Any other token, kept verbatim. Yields the first refill only.
    Unrecognized(String),
}

impl RefillSchedule {
    /// Parses a stored token. Never fails; unknown tokens become `Unrecognized`.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match normalize_token(token).as_str() {
            "weekly" => Self::Weekly,
            "every_30_days" => Self::Every30Days,
            "monthly" => Self::Monthly,
            "quarterly" => Self::Quarterly,
            _ => {
                tracing::trace!(token, "Unrecognized refill schedule, treating as single refill");
                Self::Unrecognized(token.to_string())
            }
        }
    }

    /// Step between refills, or `None` for an unrecognized schedule.
    #[must_use]
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::Weekly => Some(Step::WEEKLY),
            Self::Every30Days => Some(Step::EVERY_30_DAYS),
            Self::Monthly => Some(Step::MONTHLY),
            Self::Quarterly => Some(Step::QUARTERLY),
            Self::Unrecognized(_) => None,
        }
    }

    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::Weekly => "weekly",
            Self::Every30Days => "every_30_days",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// ## Summary
    /// Human-readable schedule for display.
    ///
    /// Unrecognized tokens are returned unchanged; an empty token renders as
    /// a dash.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Weekly => "Weekly",
            Self::Every30Days => "Every 30 days",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Unrecognized(raw) if raw.is_empty() => EMPTY_LABEL,
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for RefillSchedule {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl From<String> for RefillSchedule {
    fn from(token: String) -> Self {
        Self::parse(&token)
    }
}

impl From<RefillSchedule> for String {
    fn from(schedule: RefillSchedule) -> Self {
        match schedule {
            RefillSchedule::Unrecognized(raw) => raw,
            known => known.as_token().to_string(),
        }
    }
}

impl std::fmt::Display for RefillSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}
