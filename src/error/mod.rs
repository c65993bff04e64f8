//! Error handling for the dealership API
//!
//! One taxonomy covers the whole request path: malformed input, validation
//! failures, auth, service-reported conditions and internal faults. Every
//! error renders as the `{success: false, error, details?}` JSON envelope.
//! NotFound and Conflict messages pass through verbatim (they are not
//! security-sensitive and callers rely on the exact text); Internal
//! messages are sanitized unconditionally before leaving the process.

pub mod sanitize;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::service::ServiceError;

pub use sanitize::sanitize;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing request body
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Payload failed validation; carries every collected violation
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Missing or failed authentication
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not permitted
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate key or delete-protection conflict
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Anything else; message is sanitized before rendering
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    /// Human-readable error message
    pub error: String,
    /// Joined validation details, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new(message))
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    success: false,
                    error: "Validation failed".to_string(),
                    details: Some(errors.join(", ")),
                },
            ),
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, ErrorBody::new(message)),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, ErrorBody::new(message)),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorBody::new(message)),
            AppError::Conflict(message) => (StatusCode::CONFLICT, ErrorBody::new(message)),
            AppError::Internal(message) => {
                // Log the raw message; the client only ever sees the
                // sanitized form.
                error!(error = %message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(sanitize(&message)),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Conflict(message) => AppError::Conflict(message),
            ServiceError::Internal(message) => AppError::Internal(message),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (AppError::BadRequest("bad".to_string()), 400),
            (AppError::Validation(vec!["vin is required".to_string()]), 400),
            (AppError::Unauthorized("no token".to_string()), 401),
            (AppError::Forbidden("no permission".to_string()), 403),
            (AppError::NotFound("gone".to_string()), 404),
            (AppError::Conflict("duplicate".to_string()), 409),
            (AppError::Internal("boom".to_string()), 500),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(
                response.status().as_u16(),
                expected_status,
                "expected status {}",
                expected_status
            );
        }
    }

    #[tokio::test]
    async fn test_validation_body_joins_details() {
        let error = AppError::Validation(vec![
            "vin is required".to_string(),
            "model is required".to_string(),
        ]);
        let body = body_json(error.into_response()).await;

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"], "vin is required, model is required");
    }

    #[tokio::test]
    async fn test_not_found_and_conflict_pass_through() {
        let message = "A vehicle with VIN 1HGBH41JXMN109186 already exists";
        let body = body_json(AppError::Conflict(message.to_string()).into_response()).await;
        assert_eq!(body["error"], message);

        let message = "Vehicle v-9 not found";
        let body = body_json(AppError::NotFound(message.to_string()).into_response()).await;
        assert_eq!(body["error"], message);
    }

    #[tokio::test]
    async fn test_internal_is_sanitized() {
        let raw = r#"Database error: connection string "user:password@host" failed"#;
        let body = body_json(AppError::Internal(raw.to_string()).into_response()).await;

        let rendered = body["error"].as_str().unwrap().to_lowercase();
        assert!(!rendered.contains("password"));
        assert!(!rendered.contains("connection string"));
    }

    #[tokio::test]
    async fn test_details_omitted_for_non_validation_errors() {
        let body = body_json(AppError::NotFound("x not found".to_string()).into_response()).await;
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_service_error_conversion() {
        let app: AppError = ServiceError::NotFound("Vehicle v-1 not found".to_string()).into();
        assert!(matches!(app, AppError::NotFound(_)));

        let app: AppError = ServiceError::Conflict("already exists".to_string()).into();
        assert!(matches!(app, AppError::Conflict(_)));

        let app: AppError = ServiceError::Internal("boom".to_string()).into();
        assert!(matches!(app, AppError::Internal(_)));
    }
}
