//! Descriptor Codec
//!
//! Flat, transport-neutral encoding of a managed error: kind tag, message and
//! the optional data field of a Validation error.
//!
//! Encoding never carries causes or internal detail. Decoding is total: an
//! unknown tag becomes Unhandled so an older consumer survives kinds added on
//! the producing side.

use thiserror::Error;

use crate::error::ManagedError;
use crate::kind::ErrorKind;

/// Errors raised while building descriptors or envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Asked to encode an error that is not there.
    #[error("cannot encode an absent error")]
    MissingError,

    /// A failed result needs at least one error.
    #[error("a failed result requires at least one error")]
    EmptyErrorList,
}

/// Wire form of a managed error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Wire tag, see [`ErrorKind::tag`]
    pub kind: String,
    pub message: String,
    /// Populated only for Validation
    pub data_field: Option<String>,
}

impl ErrorDescriptor {
    pub fn new(
        kind: impl Into<String>,
        message: impl Into<String>,
        data_field: Option<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            data_field,
        }
    }

    /// Encodes a managed error.
    #[must_use]
    pub fn encode(error: &ManagedError) -> Self {
        Self {
            kind: error.kind().tag().to_string(),
            message: error.message().to_string(),
            data_field: error.data_field().map(str::to_string),
        }
    }

    /// Encodes an error that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingError`] when `error` is `None`.
    pub fn try_encode(error: Option<&ManagedError>) -> Result<Self, CodecError> {
        error.map(Self::encode).ok_or(CodecError::MissingError)
    }

    /// Reconstructs the managed error. Never fails.
    #[must_use]
    pub fn decode(&self) -> ManagedError {
        let Some(kind) = self.known_kind() else {
            tracing::debug!(kind = %self.kind, "unknown error kind tag, decoding as unhandled");
            return ManagedError::unhandled(self.message.clone());
        };

        match kind {
            ErrorKind::Validation => ManagedError::Validation {
                message: self.message.clone(),
                data_field: self.data_field.clone(),
            },
            other => ManagedError::new(other, self.message.clone()),
        }
    }

    /// Kind named by the tag, if the tag is known.
    #[must_use]
    pub fn known_kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_tag(&self.kind)
    }
}

impl From<&ManagedError> for ErrorDescriptor {
    fn from(error: &ManagedError) -> Self {
        Self::encode(error)
    }
}

impl From<ManagedError> for ErrorDescriptor {
    fn from(error: ManagedError) -> Self {
        Self::encode(&error)
    }
}

impl From<&ErrorDescriptor> for ManagedError {
    fn from(descriptor: &ErrorDescriptor) -> Self {
        descriptor.decode()
    }
}

impl From<ErrorDescriptor> for ManagedError {
    fn from(descriptor: ErrorDescriptor) -> Self {
        descriptor.decode()
    }
}
