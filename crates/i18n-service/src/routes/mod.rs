//! HTTP routes for the Internationalization Service.
//!
//! Defines the Axum router and application state. Admin routes are wrapped
//! in two route layers: bearer authentication (outer) and the
//! employee-login authorization policy (inner). Health and metrics stay
//! public for orchestrators and scrapers.

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::handlers;
use crate::middleware::auth;
use crate::observability::LogLevelHandle;
use crate::services::AuthorizationEngine;
use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,

    /// Service configuration.
    pub config: Config,

    /// Bearer token verifier.
    pub verifier: TokenVerifier,

    /// Authorization decision engine for the employee-login policy.
    pub engine: AuthorizationEngine,

    /// Runtime log-level switch.
    pub log_level: LogLevelHandle,
}

/// Build the application routes.
///
/// - `/api/v1/admin/log-level` (GET/PUT) - protected by the employee-login
///   policy
/// - `/health` (GET) - public liveness/readiness probe
/// - `/metrics` (GET) - public Prometheus scrape endpoint
///
/// Global layers: request tracing and a 30 second request timeout.
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    // Admin routes behind authentication (outer) then authorization (inner)
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/log-level",
            get(handlers::get_log_level).put(handlers::set_log_level),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_employee_login,
        ))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_bearer,
        ))
        .with_state(Arc::clone(&state));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    admin_routes
        .merge(public_routes)
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
