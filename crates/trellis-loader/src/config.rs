use std::env::VarError;

use trellis_core::ManagedError;

/// Settings every Trellis service host reads at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Name the service reports in logs.
    pub service_name: String,

    /// Deployment environment, e.g. `development` or `production`.
    pub environment: String,

    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Whether internal error text may be passed to callers.
    /// Only meant for development; defaults to false.
    pub expose_error_details: bool,
}

impl HostConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// This allows tests to supply variables without mutating process-global
    /// environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let service_name = reader("TRELLIS_SERVICE_NAME")
            .map_err(|_| ConfigError::MissingVar("TRELLIS_SERVICE_NAME".into()))?;
        if service_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "TRELLIS_SERVICE_NAME".into(),
                "must not be empty".into(),
            ));
        }

        let environment =
            reader("TRELLIS_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let log_filter = reader("TRELLIS_LOG_FILTER").unwrap_or_else(|_| "info".to_string());

        let expose_error_details = reader("TRELLIS_EXPOSE_ERROR_DETAILS")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidValue("TRELLIS_EXPOSE_ERROR_DETAILS".into(), e.to_string())
            })?;

        Ok(Self {
            service_name,
            environment,
            log_filter,
            expose_error_details,
        })
    }

    /// Message a caller sees for an internal error.
    ///
    /// The internal display text when details are exposed, `fallback`
    /// otherwise.
    pub fn public_message_for(&self, err: &dyn std::error::Error, fallback: &str) -> String {
        if self.expose_error_details {
            err.to_string()
        } else {
            fallback.to_string()
        }
    }

    /// Wraps an internal error as Unhandled using [`Self::public_message_for`].
    pub fn wrap_unhandled(
        &self,
        err: &(dyn std::error::Error + 'static),
        fallback: &str,
    ) -> ManagedError {
        ManagedError::unhandled_from(err, self.public_message_for(err, fallback))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
