//! REST/JSON encoding of Trellis result envelopes.
//!
//! - [`dto`] - JSON shapes of descriptors and envelopes
//! - [`post_value`] - Placeholder rule for null strings on form-encoded bodies
//! - [`response`] - axum responses and HTTP status mapping
//! - [`error`] - Client-side decoding errors

pub mod dto;
pub mod error;
pub mod post_value;
pub mod response;

pub use dto::{ErrorDescriptorDto, NoDataResultDto, ServiceResultDto};
pub use error::RestError;
pub use post_value::{get_post_value, set_post_value, NULL_PLACEHOLDER};
pub use response::status_for;
