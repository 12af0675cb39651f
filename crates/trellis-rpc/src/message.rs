//! Protobuf messages for result envelopes.
//!
//! Field order and tags are part of the wire contract and must not change:
//!
//! ```text
//! message ErrorDescriptor { string kind = 1; string message = 2; optional string data_field = 3; }
//! message NoDataResult    { bool succeeded = 1; repeated ErrorDescriptor errors = 2; }
//! message ServiceResult   { optional bytes payload = 1; bool succeeded = 2; repeated ErrorDescriptor errors = 3; }
//! ```

use prost::Message;
use trellis_core::{CallError, ErrorDescriptor, ManagedError, NoDataResult, ServiceResult};

use crate::error::RpcError;

/// Wire form of a managed error.
#[derive(Clone, PartialEq, Message)]
pub struct ErrorDescriptorMessage {
    #[prost(string, tag = "1")]
    pub kind: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(string, optional, tag = "3")]
    pub data_field: Option<String>,
}

/// Wire form of a result without payload.
#[derive(Clone, PartialEq, Message)]
pub struct NoDataResultMessage {
    #[prost(bool, tag = "1")]
    pub succeeded: bool,
    #[prost(message, repeated, tag = "2")]
    pub errors: Vec<ErrorDescriptorMessage>,
}

/// Wire form of a payload-bearing result.
///
/// `payload` holds the encoded payload message and is set only on success.
#[derive(Clone, PartialEq, Message)]
pub struct ServiceResultMessage {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub payload: Option<Vec<u8>>,
    #[prost(bool, tag = "2")]
    pub succeeded: bool,
    #[prost(message, repeated, tag = "3")]
    pub errors: Vec<ErrorDescriptorMessage>,
}

// --- Descriptor conversions ---

impl From<&ErrorDescriptor> for ErrorDescriptorMessage {
    fn from(descriptor: &ErrorDescriptor) -> Self {
        Self {
            kind: descriptor.kind.clone(),
            message: descriptor.message.clone(),
            data_field: descriptor.data_field.clone(),
        }
    }
}

impl From<ErrorDescriptor> for ErrorDescriptorMessage {
    fn from(descriptor: ErrorDescriptor) -> Self {
        Self {
            kind: descriptor.kind,
            message: descriptor.message,
            data_field: descriptor.data_field,
        }
    }
}

impl From<ErrorDescriptorMessage> for ErrorDescriptor {
    fn from(message: ErrorDescriptorMessage) -> Self {
        ErrorDescriptor::new(message.kind, message.message, message.data_field)
    }
}

impl From<&ManagedError> for ErrorDescriptorMessage {
    fn from(error: &ManagedError) -> Self {
        ErrorDescriptor::encode(error).into()
    }
}

impl ErrorDescriptorMessage {
    /// Reconstructs the managed error. Never fails.
    pub fn decode_error(&self) -> ManagedError {
        ErrorDescriptor::from(self.clone()).decode()
    }
}

fn descriptors_to_wire(errors: &[ErrorDescriptor]) -> Vec<ErrorDescriptorMessage> {
    errors.iter().map(ErrorDescriptorMessage::from).collect()
}

fn descriptors_from_wire(errors: Vec<ErrorDescriptorMessage>) -> Vec<ErrorDescriptor> {
    errors.into_iter().map(ErrorDescriptor::from).collect()
}

// --- NoDataResult ---

impl From<&NoDataResult> for NoDataResultMessage {
    fn from(result: &NoDataResult) -> Self {
        Self {
            succeeded: result.succeeded(),
            errors: descriptors_to_wire(result.errors()),
        }
    }
}

impl From<NoDataResult> for NoDataResultMessage {
    fn from(result: NoDataResult) -> Self {
        Self::from(&result)
    }
}

impl From<NoDataResultMessage> for NoDataResult {
    fn from(message: NoDataResultMessage) -> Self {
        NoDataResult::from_parts(message.succeeded, descriptors_from_wire(message.errors))
    }
}

impl NoDataResultMessage {
    /// Returns normally on success, otherwise surfaces the first error.
    ///
    /// # Errors
    ///
    /// See [`NoDataResult::raise_or_return`].
    pub fn raise_or_return(self) -> Result<(), CallError> {
        NoDataResult::from(self).raise_or_return()
    }
}

// --- ServiceResult ---

impl ServiceResultMessage {
    /// Encodes a logical result, payload included.
    pub fn from_result<T: Message>(result: &ServiceResult<T>) -> Self {
        Self {
            payload: result.payload().map(|p| p.encode_to_vec()),
            succeeded: result.succeeded(),
            errors: descriptors_to_wire(result.errors()),
        }
    }

    /// Decodes into a logical result.
    ///
    /// The payload is decoded only when the result succeeded; a failed
    /// result's payload bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Payload`] when the payload bytes are not a valid `T`.
    pub fn into_result<T: Message + Default>(self) -> Result<ServiceResult<T>, RpcError> {
        let payload = match (self.succeeded, self.payload) {
            (true, Some(bytes)) => Some(T::decode(bytes.as_slice())?),
            _ => None,
        };
        Ok(ServiceResult::from_parts(
            self.succeeded,
            payload,
            descriptors_from_wire(self.errors),
        ))
    }

    /// Returns the payload on success, otherwise surfaces the first error.
    ///
    /// # Errors
    ///
    /// [`RpcError::Payload`] for an unreadable payload, otherwise
    /// [`RpcError::Call`] as in [`ServiceResult::raise_or_return`].
    pub fn raise_or_return<T: Message + Default>(self) -> Result<T, RpcError> {
        Ok(self.into_result::<T>()?.raise_or_return()?)
    }
}

impl<T: Message> From<&ServiceResult<T>> for ServiceResultMessage {
    fn from(result: &ServiceResult<T>) -> Self {
        Self::from_result(result)
    }
}
