//! Error Types
//!
//! The managed error taxonomy and the caller-side error returned when a
//! result envelope is consumed.
//!
//! # Example
//!
//! ```
//! use trellis_core::{ErrorKind, ManagedError};
//!
//! fn check_last_name(last_name: &str) -> Result<(), ManagedError> {
//!     if last_name.is_empty() {
//!         return Err(ManagedError::validation("Last name is required", "lastName"));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_last_name("").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert_eq!(err.data_field(), Some("lastName"));
//! ```

use thiserror::Error;

use crate::kind::ErrorKind;

/// Application-classified failure, safe to describe to external callers.
///
/// The set of variants is closed. Every variant carries a human readable
/// `message`; Validation additionally names the offending field.
///
/// Internal failures that fit no kind must be wrapped with
/// [`ManagedError::unhandled_from`] before they leave a service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagedError {
    /// Identity could not be established.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Identity established but the action is forbidden.
    #[error("authorization failed: {message}")]
    Authorization { message: String },

    /// General security violation.
    #[error("security violation: {message}")]
    Security { message: String },

    /// Access denied to an external resource.
    #[error("external access denied: {message}")]
    ExternalAccess { message: String },

    /// Operation exceeded its allotted time.
    #[error("timeout: {message}")]
    Timeout { message: String },

    /// Transport or connectivity failure.
    #[error("communication failure: {message}")]
    Communication { message: String },

    /// Missing or invalid configuration.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Input data failed a business rule.
    #[error(
        "validation failed{}: {message}",
        data_field.as_ref().map(|f| format!(" on field '{f}'")).unwrap_or_default()
    )]
    Validation {
        message: String,
        /// Name of the field that failed validation, if known
        data_field: Option<String>,
    },

    /// Persistence or data-layer failure.
    #[error("data error: {message}")]
    Data { message: String },

    /// Uniqueness constraint violated.
    #[error("duplicate: {message}")]
    Duplicate { message: String },

    /// Internal invariant violated.
    #[error("logic error: {message}")]
    Logic { message: String },

    /// Catch-all for anything not otherwise classified.
    #[error("unhandled error: {message}")]
    Unhandled { message: String },
}

impl ManagedError {
    /// Creates an error of the given kind.
    ///
    /// A Validation error created this way has no data field; use
    /// [`ManagedError::validation`] to name one.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Authentication => Self::Authentication { message },
            ErrorKind::Authorization => Self::Authorization { message },
            ErrorKind::Security => Self::Security { message },
            ErrorKind::ExternalAccess => Self::ExternalAccess { message },
            ErrorKind::Timeout => Self::Timeout { message },
            ErrorKind::Communication => Self::Communication { message },
            ErrorKind::Configuration => Self::Configuration { message },
            ErrorKind::Validation => Self::Validation {
                message,
                data_field: None,
            },
            ErrorKind::Data => Self::Data { message },
            ErrorKind::Duplicate => Self::Duplicate { message },
            ErrorKind::Logic => Self::Logic { message },
            ErrorKind::Unhandled => Self::Unhandled { message },
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    pub fn security(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Security, message)
    }

    pub fn external_access(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalAccess, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn communication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Communication, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a Validation error naming the offending field.
    pub fn validation(message: impl Into<String>, data_field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            data_field: Some(data_field.into()),
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Data, message)
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Duplicate, message)
    }

    pub fn logic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Logic, message)
    }

    pub fn unhandled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unhandled, message)
    }

    /// Wraps an internal error as Unhandled.
    ///
    /// The internal error and its source chain are logged here and dropped;
    /// only `public_message` survives into the managed error.
    pub fn unhandled_from(
        err: &(dyn std::error::Error + 'static),
        public_message: impl Into<String>,
    ) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        tracing::error!(error = %err, causes = ?chain, "wrapping internal error as unhandled");
        Self::unhandled(public_message)
    }

    /// Kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Authorization { .. } => ErrorKind::Authorization,
            Self::Security { .. } => ErrorKind::Security,
            Self::ExternalAccess { .. } => ErrorKind::ExternalAccess,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Communication { .. } => ErrorKind::Communication,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Data { .. } => ErrorKind::Data,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::Logic { .. } => ErrorKind::Logic,
            Self::Unhandled { .. } => ErrorKind::Unhandled,
        }
    }

    /// Human readable message, safe to expose externally.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message }
            | Self::Authorization { message }
            | Self::Security { message }
            | Self::ExternalAccess { message }
            | Self::Timeout { message }
            | Self::Communication { message }
            | Self::Configuration { message }
            | Self::Validation { message, .. }
            | Self::Data { message }
            | Self::Duplicate { message }
            | Self::Logic { message }
            | Self::Unhandled { message } => message,
        }
    }

    /// Offending field of a Validation error.
    #[must_use]
    pub fn data_field(&self) -> Option<&str> {
        match self {
            Self::Validation { data_field, .. } => data_field.as_deref(),
            _ => None,
        }
    }
}

/// A failed result envelope that broke the envelope protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// `succeeded` was false but no error descriptor was carried.
    #[error("failed result carried no error descriptors")]
    MissingErrors,

    /// `succeeded` was true on a payload-bearing result without a payload.
    #[error("successful result carried no payload")]
    MissingPayload,
}

/// Error surfaced to a caller by `raise_or_return`.
///
/// `Managed` is the reconstructed error the service raised. `Protocol` is kept
/// apart so a malformed envelope is never mistaken for a business failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error(transparent)]
    Managed(#[from] ManagedError),

    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
}

impl CallError {
    /// Kind of the surfaced error. Protocol violations report Unhandled.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Managed(err) => err.kind(),
            Self::Protocol(_) => ErrorKind::Unhandled,
        }
    }

    #[must_use]
    pub fn managed(&self) -> Option<&ManagedError> {
        match self {
            Self::Managed(err) => Some(err),
            Self::Protocol(_) => None,
        }
    }

    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Folds a protocol violation into an Unhandled error.
    #[must_use]
    pub fn into_managed(self) -> ManagedError {
        match self {
            Self::Managed(err) => err,
            Self::Protocol(violation) => {
                ManagedError::unhandled(format!("protocol violation: {violation}"))
            }
        }
    }
}
