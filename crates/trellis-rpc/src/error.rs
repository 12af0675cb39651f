use trellis_core::{CallError, ManagedError};

/// Errors that can occur while consuming an RPC result envelope.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The payload bytes did not decode into the expected message type.
    #[error("failed to decode result payload: {0}")]
    Payload(#[from] prost::DecodeError),

    /// The envelope decoded and reported a failure.
    #[error(transparent)]
    Call(#[from] CallError),
}

impl RpcError {
    /// Returns the managed error this failure represents.
    ///
    /// A malformed payload is a Communication failure: the call happened but
    /// its answer could not be read.
    pub fn into_managed(self) -> ManagedError {
        match self {
            Self::Payload(e) => {
                tracing::warn!(error = %e, "malformed RPC result payload");
                ManagedError::communication("malformed result payload")
            }
            Self::Call(e) => e.into_managed(),
        }
    }
}
