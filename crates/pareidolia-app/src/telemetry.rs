//! # Tracing Setup
//!
//! Installs the process-wide `tracing` subscriber. Hosts call
//! [`init_tracing`] once at startup, before building services.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat};

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log filter {filter:?}: {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Install the global subscriber described by `config`.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_new(&config.log_filter).map_err(|source| TelemetryError::InvalidFilter {
            filter: config.log_filter.clone(),
            source,
        })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|_| TelemetryError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_filter_rejected_before_install() {
        let config = AppConfig {
            log_filter: "pareidolia_app=loudest".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            init_tracing(&config),
            Err(TelemetryError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn second_install_reports_error() {
        let config = AppConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(TelemetryError::AlreadyInitialized)
        ));
    }
}
