//! Logging bootstrap.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::HostConfig;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins when set and valid; otherwise `config.log_filter` is used.
///
/// # Errors
///
/// Fails if the configured filter does not parse or a global subscriber is
/// already installed.
pub fn init_tracing(config: &HostConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&config.log_filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| TelemetryError::Install(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        "tracing initialized"
    );
    Ok(())
}

fn configured_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    Ok(EnvFilter::try_new(directives)?)
}
