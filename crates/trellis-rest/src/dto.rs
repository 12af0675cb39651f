//! JSON shapes of error descriptors and result envelopes.
//!
//! ```json
//! { "succeeded": false,
//!   "errors": [ { "kind": "ValidationException",
//!                 "message": "Last name is required",
//!                 "dataField": "lastName" } ] }
//! ```
//!
//! `dataField` is omitted when absent; `payload` is omitted unless the call
//! succeeded. Error descriptors carry optional fields natively, so the
//! placeholder rule of [`crate::post_value`] never applies to them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use trellis_core::{CallError, ErrorDescriptor, ManagedError, NoDataResult, ServiceResult};
use utoipa::ToSchema;

use crate::error::RestError;

/// A single error descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptorDto {
    /// Error kind tag.
    #[schema(example = "ValidationException")]
    pub kind: String,
    /// Human-readable message.
    #[schema(example = "Last name is required")]
    pub message: String,
    /// Offending field, present only for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "lastName")]
    pub data_field: Option<String>,
}

impl From<&ErrorDescriptor> for ErrorDescriptorDto {
    fn from(descriptor: &ErrorDescriptor) -> Self {
        Self {
            kind: descriptor.kind.clone(),
            message: descriptor.message.clone(),
            data_field: descriptor.data_field.clone(),
        }
    }
}

impl From<ErrorDescriptorDto> for ErrorDescriptor {
    fn from(dto: ErrorDescriptorDto) -> Self {
        ErrorDescriptor::new(dto.kind, dto.message, dto.data_field)
    }
}

impl From<&ManagedError> for ErrorDescriptorDto {
    fn from(error: &ManagedError) -> Self {
        Self::from(&ErrorDescriptor::encode(error))
    }
}

fn descriptors_to_dto(errors: &[ErrorDescriptor]) -> Vec<ErrorDescriptorDto> {
    errors.iter().map(ErrorDescriptorDto::from).collect()
}

fn descriptors_from_dto(errors: Vec<ErrorDescriptorDto>) -> Vec<ErrorDescriptor> {
    errors.into_iter().map(ErrorDescriptor::from).collect()
}

/// Result of an operation without a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoDataResultDto {
    pub succeeded: bool,
    /// Errors in the order they were raised. Empty on success.
    #[serde(default)]
    pub errors: Vec<ErrorDescriptorDto>,
}

impl From<&NoDataResult> for NoDataResultDto {
    fn from(result: &NoDataResult) -> Self {
        Self {
            succeeded: result.succeeded(),
            errors: descriptors_to_dto(result.errors()),
        }
    }
}

impl From<NoDataResult> for NoDataResultDto {
    fn from(result: NoDataResult) -> Self {
        Self::from(&result)
    }
}

impl From<NoDataResultDto> for NoDataResult {
    fn from(dto: NoDataResultDto) -> Self {
        NoDataResult::from_parts(dto.succeeded, descriptors_from_dto(dto.errors))
    }
}

impl NoDataResultDto {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Json`] if the body is not an envelope.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, RestError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Returns normally on success, otherwise surfaces the first error.
    ///
    /// # Errors
    ///
    /// See [`NoDataResult::raise_or_return`].
    pub fn raise_or_return(self) -> Result<(), CallError> {
        NoDataResult::from(self).raise_or_return()
    }
}

/// Result of an operation that returns a payload.
///
/// A `payload` key that is present always means a payload was sent, even
/// when its value is `null` (a `()` or `None` payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ServiceResultDto<T> {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_payload"
    )]
    pub payload: Option<T>,
    pub succeeded: bool,
    #[serde(default)]
    pub errors: Vec<ErrorDescriptorDto>,
}

/// Only called when the key exists; a missing key falls back to `None`.
fn present_payload<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl<T> From<ServiceResult<T>> for ServiceResultDto<T> {
    fn from(result: ServiceResult<T>) -> Self {
        let (succeeded, payload, errors) = result.into_parts();
        Self {
            payload,
            succeeded,
            errors: descriptors_to_dto(&errors),
        }
    }
}

impl<T> From<ServiceResultDto<T>> for ServiceResult<T> {
    fn from(dto: ServiceResultDto<T>) -> Self {
        ServiceResult::from_parts(dto.succeeded, dto.payload, descriptors_from_dto(dto.errors))
    }
}

impl<T: DeserializeOwned> ServiceResultDto<T> {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Json`] if the body is not an envelope of `T`.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, RestError> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl<T> ServiceResultDto<T> {
    /// Returns the payload on success, otherwise surfaces the first error.
    ///
    /// # Errors
    ///
    /// See [`ServiceResult::raise_or_return`].
    pub fn raise_or_return(self) -> Result<T, CallError> {
        ServiceResult::from(self).raise_or_return()
    }
}
