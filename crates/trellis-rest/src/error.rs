//! Error types for consuming REST result envelopes.

use trellis_core::{CallError, ManagedError};

/// Errors that can occur while consuming a REST result envelope.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The response body was not a valid envelope.
    #[error("invalid result envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope decoded and reported a failure.
    #[error(transparent)]
    Call(#[from] CallError),
}

impl RestError {
    /// Returns the managed error this failure represents.
    ///
    /// An unreadable body is a Communication failure.
    pub fn into_managed(self) -> ManagedError {
        match self {
            Self::Json(e) => {
                tracing::warn!(error = %e, "malformed REST result envelope");
                ManagedError::communication("malformed result envelope")
            }
            Self::Call(e) => e.into_managed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::ErrorKind;

    #[test]
    fn test_json_error_display_and_kind() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RestError::from(json_err);
        assert!(err.to_string().starts_with("invalid result envelope"));
        assert_eq!(err.into_managed().kind(), ErrorKind::Communication);
    }

    #[test]
    fn test_call_error_passes_through() {
        let err = RestError::from(CallError::from(ManagedError::authentication("expired")));
        assert_eq!(err.to_string(), "authentication failed: expired");
        assert_eq!(err.into_managed(), ManagedError::authentication("expired"));
    }
}
