//! Result Envelopes
//!
//! Call-result containers carried across a service boundary:
//!
//! - [`NoDataResult`] - success flag and error descriptors
//! - [`ServiceResult`] - the same, plus a payload on success
//!
//! Envelopes are built once through their factories and are read-only
//! afterwards. Transport decoders rebuild them with `from_parts`, which keeps
//! whatever arrived on the wire so that a malformed envelope is reported by
//! `raise_or_return` instead of being silently repaired.
//!
//! # Example
//!
//! ```
//! use trellis_core::{ErrorKind, ManagedError, ServiceResult};
//!
//! let ok = ServiceResult::create_result(42);
//! assert_eq!(ok.raise_or_return().unwrap(), 42);
//!
//! let failed: ServiceResult<i32> =
//!     ServiceResult::create_error(ManagedError::validation("Last name is required", "lastName"));
//! let err = failed.raise_or_return().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! ```

use std::borrow::Borrow;

use crate::descriptor::{CodecError, ErrorDescriptor};
use crate::error::{CallError, ManagedError, ProtocolViolation};

/// Encodes a non-empty sequence of errors, order preserved.
fn encode_all<I>(errs: I) -> Result<Vec<ErrorDescriptor>, CodecError>
where
    I: IntoIterator,
    I::Item: Borrow<ManagedError>,
{
    let errors: Vec<ErrorDescriptor> = errs
        .into_iter()
        .map(|err| ErrorDescriptor::encode(err.borrow()))
        .collect();
    if errors.is_empty() {
        return Err(CodecError::EmptyErrorList);
    }
    Ok(errors)
}

/// Surfaces the first descriptor of a failed envelope.
fn raise_first(errors: Vec<ErrorDescriptor>) -> CallError {
    let total = errors.len();
    let Some(first) = errors.into_iter().next() else {
        tracing::warn!("failed result carried no error descriptors");
        return ProtocolViolation::MissingErrors.into();
    };
    if total > 1 {
        tracing::debug!(
            surfaced = %first.kind,
            discarded = total - 1,
            "surfacing first error of a multi-error result"
        );
    }
    CallError::Managed(first.decode())
}

fn warn_if_stray_errors(errors: &[ErrorDescriptor]) {
    if !errors.is_empty() {
        tracing::warn!(
            count = errors.len(),
            "successful result carried error descriptors, ignoring them"
        );
    }
}

/// Result of an operation without a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoDataResult {
    succeeded: bool,
    errors: Vec<ErrorDescriptor>,
}

impl NoDataResult {
    #[must_use]
    pub fn create_success() -> Self {
        Self {
            succeeded: true,
            errors: Vec::new(),
        }
    }

    /// Failed result carrying one error.
    pub fn create_error(err: impl Borrow<ManagedError>) -> Self {
        Self {
            succeeded: false,
            errors: vec![ErrorDescriptor::encode(err.borrow())],
        }
    }

    /// Failed result for an error that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingError`] when `err` is `None`.
    pub fn try_create_error(err: Option<&ManagedError>) -> Result<Self, CodecError> {
        let descriptor = ErrorDescriptor::try_encode(err)?;
        Ok(Self {
            succeeded: false,
            errors: vec![descriptor],
        })
    }

    /// Failed result carrying every error, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyErrorList`] when `errs` yields nothing.
    pub fn create_errors<I>(errs: I) -> Result<Self, CodecError>
    where
        I: IntoIterator,
        I::Item: Borrow<ManagedError>,
    {
        Ok(Self {
            succeeded: false,
            errors: encode_all(errs)?,
        })
    }

    /// Rebuilds an envelope from decoded wire fields without validating it.
    #[must_use]
    pub fn from_parts(succeeded: bool, errors: Vec<ErrorDescriptor>) -> Self {
        Self { succeeded, errors }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Every error descriptor, in order.
    #[must_use]
    pub fn errors(&self) -> &[ErrorDescriptor] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<ErrorDescriptor> {
        self.errors
    }

    /// Every error, decoded, in order.
    #[must_use]
    pub fn decoded_errors(&self) -> Vec<ManagedError> {
        self.errors.iter().map(ErrorDescriptor::decode).collect()
    }

    /// Returns normally on success, otherwise surfaces the first error.
    ///
    /// # Errors
    ///
    /// The decoded first error, or a [`ProtocolViolation`] when a failed
    /// result carries no errors.
    pub fn raise_or_return(self) -> Result<(), CallError> {
        if self.succeeded {
            warn_if_stray_errors(&self.errors);
            return Ok(());
        }
        Err(raise_first(self.errors))
    }
}

impl From<crate::Result<()>> for NoDataResult {
    fn from(result: crate::Result<()>) -> Self {
        match result {
            Ok(()) => Self::create_success(),
            Err(err) => Self::create_error(err),
        }
    }
}

/// Result of an operation that returns a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResult<T> {
    succeeded: bool,
    payload: Option<T>,
    errors: Vec<ErrorDescriptor>,
}

impl<T> ServiceResult<T> {
    pub fn create_result(value: T) -> Self {
        Self {
            succeeded: true,
            payload: Some(value),
            errors: Vec::new(),
        }
    }

    /// Failed result carrying one error.
    pub fn create_error(err: impl Borrow<ManagedError>) -> Self {
        Self {
            succeeded: false,
            payload: None,
            errors: vec![ErrorDescriptor::encode(err.borrow())],
        }
    }

    /// Failed result for an error that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MissingError`] when `err` is `None`.
    pub fn try_create_error(err: Option<&ManagedError>) -> Result<Self, CodecError> {
        let descriptor = ErrorDescriptor::try_encode(err)?;
        Ok(Self {
            succeeded: false,
            payload: None,
            errors: vec![descriptor],
        })
    }

    /// Failed result carrying every error, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyErrorList`] when `errs` yields nothing.
    pub fn create_errors<I>(errs: I) -> Result<Self, CodecError>
    where
        I: IntoIterator,
        I::Item: Borrow<ManagedError>,
    {
        Ok(Self {
            succeeded: false,
            payload: None,
            errors: encode_all(errs)?,
        })
    }

    /// Rebuilds an envelope from decoded wire fields without validating it.
    ///
    /// A payload on a failed result is dropped.
    pub fn from_parts(succeeded: bool, payload: Option<T>, errors: Vec<ErrorDescriptor>) -> Self {
        Self {
            succeeded,
            payload: if succeeded { payload } else { None },
            errors,
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Every error descriptor, in order.
    #[must_use]
    pub fn errors(&self) -> &[ErrorDescriptor] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<ErrorDescriptor> {
        self.errors
    }

    /// Every error, decoded, in order.
    #[must_use]
    pub fn decoded_errors(&self) -> Vec<ManagedError> {
        self.errors.iter().map(ErrorDescriptor::decode).collect()
    }

    /// Splits the envelope into its fields.
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<T>, Vec<ErrorDescriptor>) {
        (self.succeeded, self.payload, self.errors)
    }

    /// Maps the payload, keeping flag and errors.
    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResult {
            succeeded: self.succeeded,
            payload: self.payload.map(f),
            errors: self.errors,
        }
    }

    /// Drops the payload.
    #[must_use]
    pub fn without_payload(self) -> NoDataResult {
        NoDataResult::from_parts(self.succeeded, self.errors)
    }

    /// Returns the payload on success, otherwise surfaces the first error.
    ///
    /// # Errors
    ///
    /// The decoded first error, or a [`ProtocolViolation`] when a failed
    /// result carries no errors or a successful one carries no payload.
    pub fn raise_or_return(self) -> Result<T, CallError> {
        if self.succeeded {
            warn_if_stray_errors(&self.errors);
            return self
                .payload
                .ok_or(CallError::Protocol(ProtocolViolation::MissingPayload));
        }
        Err(raise_first(self.errors))
    }
}

impl<T> From<crate::Result<T>> for ServiceResult<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => Self::create_result(value),
            Err(err) => Self::create_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ErrorKind;

    fn sample_errors() -> Vec<ManagedError> {
        vec![
            ManagedError::validation("first name missing", "firstName"),
            ManagedError::duplicate("email already used"),
            ManagedError::validation("first name missing", "firstName"),
        ]
    }

    mod invariant_tests {
        use super::*;

        #[test]
        fn test_success_has_no_errors() {
            let result = NoDataResult::create_success();
            assert!(result.succeeded());
            assert!(result.errors().is_empty());
        }

        #[test]
        fn test_create_result_succeeds_with_payload() {
            let result = ServiceResult::create_result("done".to_string());
            assert!(result.succeeded());
            assert_eq!(result.payload().map(String::as_str), Some("done"));
            assert!(result.errors().is_empty());
        }

        #[test]
        fn test_create_error_fails_with_one_descriptor() {
            let result: ServiceResult<u8> = ServiceResult::create_error(ManagedError::data("x"));
            assert!(!result.succeeded());
            assert!(result.payload().is_none());
            assert_eq!(result.errors().len(), 1);

            let result = NoDataResult::create_error(&ManagedError::data("x"));
            assert!(!result.succeeded());
            assert_eq!(result.errors().len(), 1);
        }

        #[test]
        fn test_flag_matches_error_list_for_all_factories() {
            let envelopes = [
                NoDataResult::create_success(),
                NoDataResult::create_error(ManagedError::logic("x")),
                NoDataResult::create_errors(sample_errors()).unwrap(),
            ];
            for envelope in envelopes {
                assert_eq!(envelope.succeeded(), envelope.errors().is_empty());
            }

            let logic = ManagedError::logic("x");
            let results = [
                ServiceResult::create_result(7),
                ServiceResult::create_error(&logic),
                ServiceResult::create_errors(sample_errors()).unwrap(),
                ServiceResult::try_create_error(Some(&logic)).unwrap(),
            ];
            for result in results {
                assert_eq!(result.succeeded(), result.errors().is_empty());
                assert_eq!(result.payload().is_some(), result.succeeded());
            }
        }

        #[test]
        fn test_create_errors_rejects_empty_list() {
            let empty: Vec<ManagedError> = Vec::new();
            assert_eq!(
                NoDataResult::create_errors(&empty),
                Err(CodecError::EmptyErrorList)
            );
            assert_eq!(
                ServiceResult::<i32>::create_errors(empty),
                Err(CodecError::EmptyErrorList)
            );
        }

        #[test]
        fn test_try_create_error_rejects_absent_error() {
            assert_eq!(
                NoDataResult::try_create_error(None),
                Err(CodecError::MissingError)
            );
            assert_eq!(
                ServiceResult::<i32>::try_create_error(None),
                Err(CodecError::MissingError)
            );
        }

        #[test]
        fn test_from_parts_drops_payload_of_failed_result() {
            let descriptor = ErrorDescriptor::encode(&ManagedError::data("x"));
            let result = ServiceResult::from_parts(false, Some(7), vec![descriptor]);
            assert!(result.payload().is_none());
        }
    }

    mod order_tests {
        use super::*;

        #[test]
        fn test_create_errors_preserves_order_and_duplicates() {
            let errs = sample_errors();
            let result = NoDataResult::create_errors(&errs).unwrap();
            assert_eq!(result.decoded_errors(), errs);
        }

        #[test]
        fn test_create_errors_accepts_references() {
            let e1 = ManagedError::timeout("a");
            let e2 = ManagedError::communication("b");
            let e3 = ManagedError::configuration("c");
            let result = ServiceResult::<()>::create_errors([&e1, &e2, &e3]).unwrap();
            let kinds: Vec<ErrorKind> = result.decoded_errors().iter().map(|e| e.kind()).collect();
            assert_eq!(
                kinds,
                vec![
                    ErrorKind::Timeout,
                    ErrorKind::Communication,
                    ErrorKind::Configuration
                ]
            );
        }
    }

    mod raise_tests {
        use super::*;

        #[test]
        fn test_success_returns_payload() {
            assert_eq!(ServiceResult::create_result(42).raise_or_return(), Ok(42));
            assert_eq!(NoDataResult::create_success().raise_or_return(), Ok(()));
        }

        #[test]
        fn test_first_error_is_surfaced() {
            let result = NoDataResult::create_errors([
                ManagedError::validation("invalid", "a"),
                ManagedError::validation("invalid", "b"),
            ])
            .unwrap();
            let err = result.raise_or_return().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.managed().and_then(ManagedError::data_field), Some("a"));
        }

        #[test]
        fn test_validation_scenario() {
            let result: ServiceResult<String> = ServiceResult::create_error(
                ManagedError::validation("Last name is required", "lastName"),
            );
            match result.raise_or_return() {
                Err(CallError::Managed(ManagedError::Validation {
                    message,
                    data_field,
                })) => {
                    assert_eq!(message, "Last name is required");
                    assert_eq!(data_field.as_deref(), Some("lastName"));
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }

        #[test]
        fn test_failed_without_errors_is_protocol_violation() {
            let err = NoDataResult::from_parts(false, Vec::new())
                .raise_or_return()
                .unwrap_err();
            assert_eq!(err, CallError::Protocol(ProtocolViolation::MissingErrors));

            let err = ServiceResult::<i32>::from_parts(false, None, Vec::new())
                .raise_or_return()
                .unwrap_err();
            assert_eq!(err, CallError::Protocol(ProtocolViolation::MissingErrors));
        }

        #[test]
        fn test_success_without_payload_is_protocol_violation() {
            let err = ServiceResult::<i32>::from_parts(true, None, Vec::new())
                .raise_or_return()
                .unwrap_err();
            assert_eq!(err, CallError::Protocol(ProtocolViolation::MissingPayload));
        }

        #[test]
        fn test_success_with_stray_errors_returns_normally() {
            let stray = vec![ErrorDescriptor::encode(&ManagedError::logic("stale"))];
            assert_eq!(
                NoDataResult::from_parts(true, stray).raise_or_return(),
                Ok(())
            );
        }

        #[test]
        fn test_unknown_first_tag_surfaces_unhandled() {
            let result = NoDataResult::from_parts(
                false,
                vec![ErrorDescriptor::new("QuotaException", "over quota", None)],
            );
            let err = result.raise_or_return().unwrap_err();
            assert_eq!(
                err,
                CallError::Managed(ManagedError::unhandled("over quota"))
            );
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_from_std_result() {
            let ok: ServiceResult<u32> = Ok(5).into();
            assert_eq!(ok.raise_or_return(), Ok(5));

            let failed: NoDataResult = Err(ManagedError::authorization("no")).into();
            assert!(!failed.succeeded());
            assert_eq!(failed.errors()[0].kind, "AuthorizationException");
        }

        #[test]
        fn test_map_keeps_errors() {
            let failed: ServiceResult<u32> = ServiceResult::create_error(ManagedError::data("x"));
            let mapped = failed.map(|n| n.to_string());
            assert!(!mapped.succeeded());
            assert_eq!(mapped.errors().len(), 1);

            let ok = ServiceResult::create_result(2).map(|n| n * 21);
            assert_eq!(ok.raise_or_return(), Ok(42));
        }

        #[test]
        fn test_without_payload() {
            let result = ServiceResult::create_result(1).without_payload();
            assert!(result.succeeded());
        }
    }
}
