//! Service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl.
//! Authentication failures (401) and authorization failures (403) are two
//! distinct layers: 401 responses carry a `WWW-Authenticate` header and the
//! authentication failure reason; 403 responses are deliberately opaque so
//! claim-validation logic does not leak to clients. Internal errors are
//! logged server-side and returned as generic messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Internationalization Service error type.
///
/// Maps to HTTP status codes:
/// - Database, Internal: 500 Internal Server Error
/// - Unauthenticated: 401 Unauthorized
/// - Forbidden: 403 Forbidden
/// - BadRequest: 400 Bad Request
/// - ServiceUnavailable: 503 Service Unavailable
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    Internal,
}

impl I18nError {
    /// HTTP status code for this error (used for metrics recording).
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            I18nError::Database(_) | I18nError::Internal => 500,
            I18nError::Unauthenticated(_) => 401,
            I18nError::Forbidden => 403,
            I18nError::BadRequest(_) => 400,
            I18nError::ServiceUnavailable(_) => 503,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for I18nError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            I18nError::Database(err) => {
                // Log actual error server-side, return generic message
                tracing::error!(target: "i18n.database", error = %err, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
            I18nError::Unauthenticated(reason) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", reason.clone())
            }
            // Opaque by design: no detail about the failed requirement
            I18nError::Forbidden => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", "Forbidden".to_string())
            }
            I18nError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
            I18nError::ServiceUnavailable(reason) => {
                tracing::warn!(target: "i18n.availability", reason = %reason, "Service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Service temporarily unavailable".to_string(),
                )
            }
            I18nError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(error_response)).into_response();

        // Add WWW-Authenticate header for 401 responses
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) =
                "Bearer realm=\"internationalization-api\", error=\"invalid_token\"".parse()
            {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}

/// Convert sqlx errors to I18nError
impl From<sqlx::Error> for I18nError {
    fn from(err: sqlx::Error) -> Self {
        I18nError::Database(err.to_string())
    }
}
