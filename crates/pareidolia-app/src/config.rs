//! # Configuration
//!
//! Read from environment variables at startup:
//!
//! | Variable                | Values             | Default  |
//! |-------------------------|--------------------|----------|
//! | `PAREIDOLIA_LOG_FORMAT` | `pretty` \| `json` | `pretty` |
//! | `RUST_LOG`              | `EnvFilter` syntax | `info`   |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for terminals.
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                var: AppConfig::LOG_FORMAT_VAR,
                value: s.to_string(),
                expected: "pretty or json",
            }),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub log_format: LogFormat,
    /// Directive string for `tracing_subscriber::EnvFilter`.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub const LOG_FORMAT_VAR: &'static str = "PAREIDOLIA_LOG_FORMAT";
    pub const LOG_FILTER_VAR: &'static str = "RUST_LOG";
    pub const DEFAULT_LOG_FILTER: &'static str = "info";

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unset or blank variables take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_format = match present(Self::LOG_FORMAT_VAR) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        let log_filter =
            present(Self::LOG_FILTER_VAR).unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            log_format,
            log_filter,
        })
    }
}
