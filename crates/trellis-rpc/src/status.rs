//! gRPC status mapping.
//!
//! When a failure is reported as a gRPC status instead of a result envelope
//! (a handler bailing out early, or the transport itself failing), the status
//! still speaks the managed error taxonomy. Statuses built here carry the
//! encoded descriptor in their details so the exact error survives; statuses
//! built elsewhere are classified by code.

use bytes::Bytes;
use prost::Message;
use tonic::{Code, Status};
use trellis_core::{ErrorKind, ManagedError};

use crate::message::ErrorDescriptorMessage;

/// gRPC code used for a kind.
pub fn code_for(kind: ErrorKind) -> Code {
    match kind {
        ErrorKind::Authentication => Code::Unauthenticated,
        ErrorKind::Authorization | ErrorKind::Security | ErrorKind::ExternalAccess => {
            Code::PermissionDenied
        }
        ErrorKind::Timeout => Code::DeadlineExceeded,
        ErrorKind::Communication => Code::Unavailable,
        ErrorKind::Configuration => Code::FailedPrecondition,
        ErrorKind::Validation => Code::InvalidArgument,
        ErrorKind::Duplicate => Code::AlreadyExists,
        ErrorKind::Data | ErrorKind::Logic => Code::Internal,
        ErrorKind::Unhandled => Code::Unknown,
    }
}

/// Kind inferred from a bare gRPC code.
fn kind_for(code: Code) -> ErrorKind {
    match code {
        Code::Unauthenticated => ErrorKind::Authentication,
        Code::PermissionDenied => ErrorKind::Authorization,
        Code::DeadlineExceeded => ErrorKind::Timeout,
        Code::Unavailable => ErrorKind::Communication,
        Code::FailedPrecondition => ErrorKind::Configuration,
        Code::InvalidArgument => ErrorKind::Validation,
        Code::AlreadyExists => ErrorKind::Duplicate,
        Code::DataLoss => ErrorKind::Data,
        _ => ErrorKind::Unhandled,
    }
}

/// Builds a status for a managed error, descriptor attached as details.
pub fn status_from_error(err: &ManagedError) -> Status {
    let details = ErrorDescriptorMessage::from(err).encode_to_vec();
    Status::with_details(code_for(err.kind()), err.message(), Bytes::from(details))
}

/// Reconstructs a managed error from a status. Never fails.
///
/// Attached descriptor details win when they name a known kind. Otherwise
/// the code picks the kind and the status message becomes the error message.
pub fn error_from_status(status: &Status) -> ManagedError {
    if !status.details().is_empty() {
        match ErrorDescriptorMessage::decode(status.details()) {
            Ok(descriptor) if ErrorKind::from_tag(&descriptor.kind).is_some() => {
                return descriptor.decode_error();
            }
            Ok(descriptor) => {
                tracing::debug!(kind = %descriptor.kind, "status details carry no known error kind");
            }
            Err(e) => {
                tracing::debug!(error = %e, "status details are not an error descriptor");
            }
        }
    }
    ManagedError::new(kind_for(status.code()), status.message())
}
