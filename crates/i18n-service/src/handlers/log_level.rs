//! Runtime log-level endpoints.
//!
//! Operational tooling for adjusting the process-wide minimum log severity
//! without a restart. Both endpoints sit behind the employee-login policy.
//!
//! Severity codes: 1 Debug, 2 Information, 3 Warning, 4 Error. Codes
//! outside that range are rejected with 400 Bad Request.

use crate::errors::I18nError;
use crate::models::{LogLevelResponse, SetLogLevelRequest};
use crate::observability::LogLevelError;
use crate::routes::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /api/v1/admin/log-level
///
/// Returns the current minimum severity code.
#[instrument(skip_all, name = "i18n.admin.log_level.get")]
pub async fn get_log_level(State(state): State<Arc<AppState>>) -> Json<LogLevelResponse> {
    Json(LogLevelResponse {
        level: state.log_level.get(),
    })
}

/// Handler for PUT /api/v1/admin/log-level
///
/// Applies a new minimum severity. Out-of-range codes are a client error;
/// a subscriber refusing the change is an internal error.
#[instrument(skip_all, name = "i18n.admin.log_level.set")]
pub async fn set_log_level(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetLogLevelRequest>,
) -> Result<Json<LogLevelResponse>, I18nError> {
    state.log_level.set(payload.level).map_err(|e| match e {
        LogLevelError::OutOfRange(_) => I18nError::BadRequest(e.to_string()),
        LogLevelError::Reload(reason) => {
            tracing::error!(
                target: "i18n.admin.log_level",
                error = %reason,
                requested_level = payload.level,
                "Failed to apply log level"
            );
            I18nError::Internal
        }
    })?;

    tracing::warn!(
        target: "i18n.admin.log_level",
        level = payload.level,
        "Minimum log level changed"
    );

    Ok(Json(LogLevelResponse {
        level: payload.level,
    }))
}
