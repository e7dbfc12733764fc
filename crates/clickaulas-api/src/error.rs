//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use clickaulas_core::error::{AppError, ErrorKind, FieldErrors};

const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Per-field messages for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status and error code for `kind`.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::InUse => (StatusCode::CONFLICT, "IN_USE"),
        ErrorKind::Domain => (StatusCode::UNPROCESSABLE_ENTITY, "DOMAIN_ERROR"),
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = status_for(err.kind);

        let message = if err.kind.is_client_facing() {
            err.message
        } else {
            match &err.source {
                Some(source) => tracing::error!(
                    kind = %err.kind,
                    error = %err.message,
                    cause = %source,
                    "Request failed"
                ),
                None => tracing::error!(kind = %err.kind, error = %err.message, "Request failed"),
            }
            GENERIC_FAILURE.to_string()
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            fields: err.fields,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_use_is_conflict_with_own_code() {
        assert_eq!(status_for(ErrorKind::InUse), (StatusCode::CONFLICT, "IN_USE"));
        assert_eq!(status_for(ErrorKind::Domain).0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let response = ApiError(AppError::database("connection reset by peer")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
