use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_WINDOW_DAYS, ENV_PREFIX, ENV_SEPARATOR};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Number of days covered by the upcoming window.
    pub window_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `config.toml` and `MEDITRACK__*` environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("schedule.window_days", i64::from(DEFAULT_WINDOW_DAYS))?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but cannot drive an expansion.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the upcoming window is zero days long.
    pub fn validate(&self) -> CoreResult<()> {
        if self.schedule.window_days == 0 {
            return Err(CoreError::InvalidConfiguration(
                "schedule.window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(err) = dotenvy::dotenv() {
        tracing::trace!(error = %err, "No .env file loaded");
    }

    Settings::load()
}
