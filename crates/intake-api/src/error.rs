//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; any `AppError` converts into it
//! with `?` and is rendered as an [`ErrorResponse`] with the status, code and
//! log level the error declares through `ErrorMetadata`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::{AppError, ErrorMetadata, LogLevel};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether retrying the whole request may succeed
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from intake-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl ErrorResponse {
    fn from_app_error(app_error: &AppError, with_details: bool) -> Self {
        Self {
            error: app_error.client_message(),
            details: with_details.then(|| app_error.detailed_message()),
            error_type: with_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Details never leave the process for sensitive errors or in production.
        let with_details = !(is_production_env() || app_error.is_sensitive());
        let body = ErrorResponse::from_app_error(app_error, with_details);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_errors_hide_details() {
        let err = AppError::IdempotencyLookupFailed {
            submitter_id: "u1".to_string(),
            fingerprint: "0".repeat(64),
        };
        let body = ErrorResponse::from_app_error(&err, false);
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.code, "IDEMPOTENCY_LOOKUP_FAILED");
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());
    }

    #[test]
    fn client_errors_carry_details_outside_production() {
        let err = AppError::PayloadTooLarge { limit: 10 };
        let body = ErrorResponse::from_app_error(&err, true);
        assert_eq!(body.error, "file too large (>10 bytes)");
        assert_eq!(body.error_type.as_deref(), Some("PayloadTooLarge"));
        assert!(body.details.is_some());
    }

    #[test]
    fn response_status_follows_metadata() {
        let response = HttpAppError(AppError::NotFound("not found".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = HttpAppError(AppError::PayloadTooLarge { limit: 1 }).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
