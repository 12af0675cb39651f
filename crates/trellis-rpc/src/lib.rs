//! Binary RPC encoding of Trellis result envelopes.
//!
//! Envelopes and error descriptors become prost messages with stable field
//! tags. Payloads travel as the prost encoding of their own type, since
//! generics do not cross the wire. Transport-level gRPC statuses map onto the
//! managed error taxonomy in both directions.

pub mod error;
pub mod message;
pub mod status;

pub use error::RpcError;
pub use message::{ErrorDescriptorMessage, NoDataResultMessage, ServiceResultMessage};
pub use status::{code_for, error_from_status, status_from_error};
