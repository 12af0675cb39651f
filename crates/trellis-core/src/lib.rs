//! Trellis Core Library
//!
//! Managed errors and the result envelopes that carry them across service
//! boundaries.
//!
//! # Modules
//!
//! - [`kind`] - Closed set of error kinds and their wire tags (ErrorKind)
//! - [`error`] - The managed error taxonomy (ManagedError, CallError)
//! - [`descriptor`] - Flat wire form of a managed error (ErrorDescriptor)
//! - [`envelope`] - Call-result containers (NoDataResult, ServiceResult)
//!
//! Transport encodings live in `trellis-rpc` and `trellis-rest`.
//!
//! # Example
//!
//! ```
//! use trellis_core::{ErrorKind, ManagedError, NoDataResult};
//!
//! // Service side
//! let result = NoDataResult::create_error(ManagedError::duplicate("Email already exists"));
//!
//! // Caller side, after the envelope crossed the wire
//! let err = result.raise_or_return().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Duplicate);
//! ```
//!
//! Service code can stay in `Result` form and convert at the boundary:
//!
//! ```
//! use trellis_core::{ManagedError, ServiceResult};
//!
//! fn find_customer(id: u32) -> trellis_core::Result<String> {
//!     if id == 0 {
//!         return Err(ManagedError::validation("id must be positive", "id"));
//!     }
//!     Ok(format!("customer-{id}"))
//! }
//!
//! let result = ServiceResult::from(find_customer(0));
//! assert!(!result.succeeded());
//! ```

pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod kind;

// Re-export main types for convenient access
pub use descriptor::{CodecError, ErrorDescriptor};
pub use envelope::{NoDataResult, ServiceResult};
pub use error::{CallError, ManagedError, ProtocolViolation};
pub use kind::{ErrorKind, ParseKindError};

/// Type alias for Results using `ManagedError`.
pub type Result<T> = std::result::Result<T, ManagedError>;
