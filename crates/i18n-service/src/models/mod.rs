//! Data models shared by HTTP handlers.

use serde::{Deserialize, Serialize};

/// Response for the `/health` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall service status: "healthy" or "unhealthy".
    pub status: String,

    /// Application name from configuration.
    pub application: String,

    /// Deployment mode tag from configuration.
    pub deployment_mode: String,

    /// Database connectivity: "healthy" or "unhealthy".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// Request body for setting the runtime log level.
#[derive(Debug, Clone, Deserialize)]
pub struct SetLogLevelRequest {
    /// Numeric severity code: 1 Debug, 2 Information, 3 Warning, 4 Error.
    pub level: u8,
}

/// Response body for the log-level endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct LogLevelResponse {
    /// Current numeric severity code.
    pub level: u8,
}
