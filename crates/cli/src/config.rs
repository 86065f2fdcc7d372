//! Environment-driven configuration for the interactive shell.

use thiserror::Error;

use foodwaste_inventory::TrackerConfig;
use foodwaste_observability::LogFormat;

pub const WARNING_DAYS_VAR: &str = "FOODWASTE_WARNING_DAYS";
pub const LOG_FORMAT_VAR: &str = "FOODWASTE_LOG_FORMAT";

/// Window the shell uses when none is configured.
pub const DEFAULT_WARNING_DAYS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative whole number of days, got {value:?}")]
    WarningDays { var: &'static str, value: String },

    #[error("{var}: {source}")]
    LogFormat {
        var: &'static str,
        #[source]
        source: foodwaste_observability::ParseLogFormatError,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub warning_days: u32,
    pub log_format: LogFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            warning_days: DEFAULT_WARNING_DAYS,
            log_format: LogFormat::default(),
        }
    }
}

impl CliConfig {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read through `lookup`; unset variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(WARNING_DAYS_VAR) {
            config.warning_days = value.trim().parse().map_err(|_| ConfigError::WarningDays {
                var: WARNING_DAYS_VAR,
                value,
            })?;
        }

        if let Some(value) = lookup(LOG_FORMAT_VAR) {
            config.log_format = value.parse().map_err(|source| ConfigError::LogFormat {
                var: LOG_FORMAT_VAR,
                source,
            })?;
        }

        Ok(config)
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::default().with_warning_days(self.warning_days)
    }
}
