//! Health check handler.
//!
//! Provides the health endpoint for liveness and readiness probes.

use crate::errors::I18nError;
use crate::models::HealthResponse;
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /health
///
/// Pings the database to verify connectivity and reports the service
/// status. An unhealthy database is reported in the body rather than as an
/// error status so orchestrators always see the response.
#[instrument(skip_all, name = "i18n.health.check")]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, I18nError> {
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok();

    let component = |healthy: bool| {
        if healthy { "healthy" } else { "unhealthy" }.to_string()
    };

    Ok(Json(HealthResponse {
        status: component(db_healthy),
        application: state.config.application_name.clone(),
        deployment_mode: state.config.deployment_mode.to_string(),
        database: Some(component(db_healthy)),
    }))
}
