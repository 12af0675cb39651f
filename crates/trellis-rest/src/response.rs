//! axum responses for result envelopes.
//!
//! The body is always the full envelope, so a client reads every error no
//! matter the status. The HTTP status follows the first error, the same one
//! `raise_or_return` surfaces.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use trellis_core::ErrorKind;

use crate::dto::{ErrorDescriptorDto, NoDataResultDto, ServiceResultDto};

/// HTTP status used for a failure of the given kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization | ErrorKind::Security | ErrorKind::ExternalAccess => {
            StatusCode::FORBIDDEN
        }
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Duplicate => StatusCode::CONFLICT,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Communication => StatusCode::BAD_GATEWAY,
        ErrorKind::Configuration | ErrorKind::Data | ErrorKind::Logic | ErrorKind::Unhandled => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn envelope_status(succeeded: bool, errors: &[ErrorDescriptorDto]) -> StatusCode {
    if succeeded {
        return StatusCode::OK;
    }
    match errors.first() {
        Some(first) => match ErrorKind::from_tag(&first.kind) {
            Some(kind) => status_for(kind),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        },
        None => {
            tracing::error!("responding with a failed result that carries no errors");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for NoDataResultDto {
    fn into_response(self) -> Response {
        let status = envelope_status(self.succeeded, &self.errors);
        (status, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for ServiceResultDto<T> {
    fn into_response(self) -> Response {
        let status = envelope_status(self.succeeded, &self.errors);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{ManagedError, NoDataResult, ServiceResult};

    #[test]
    fn test_status_for_security_family() {
        assert_eq!(status_for(ErrorKind::Authentication), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Authorization), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::Security), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::ExternalAccess), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_status_for_other_kinds() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Duplicate), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(status_for(ErrorKind::Communication), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(ErrorKind::Unhandled),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_success_response_is_ok() {
        let response = NoDataResultDto::from(NoDataResult::create_success()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_status_follows_first_error() {
        let result = NoDataResult::create_errors([
            ManagedError::duplicate("exists"),
            ManagedError::authentication("expired"),
        ])
        .unwrap();
        let response = NoDataResultDto::from(result).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unknown_kind_is_internal_error() {
        let dto = NoDataResultDto {
            succeeded: false,
            errors: vec![ErrorDescriptorDto {
                kind: "QuotaException".to_string(),
                message: "over quota".to_string(),
                data_field: None,
            }],
        };
        assert_eq!(
            dto.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_empty_failure_is_internal_error() {
        let dto = NoDataResultDto {
            succeeded: false,
            errors: vec![],
        };
        assert_eq!(
            dto.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_service_result_validation_is_bad_request() {
        let dto: ServiceResultDto<u32> =
            ServiceResult::create_error(ManagedError::validation("required", "lastName")).into();
        assert_eq!(dto.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
