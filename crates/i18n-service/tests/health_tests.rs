//! Health and metrics endpoint integration tests.
//!
//! Both endpoints are public: no Authorization header is required.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use i18n_service::auth::{LoginSystem, TokenVerifier};
use i18n_service::cache::{CacheError, SessionTokenCache};
use i18n_service::config::Config;
use i18n_service::observability::LogLevelHandle;
use i18n_service::routes::{build_routes, AppState};
use i18n_service::services::{AccountsClient, AuthorizationEngine, EmployeeLoginRequirement};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tracing_subscriber::{reload, EnvFilter};

/// Cache stub that always misses; the public endpoints never consult it.
struct NoopCache;

#[async_trait]
impl SessionTokenCache for NoopCache {
    async fn session_token(&self, _external_id: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }
}

struct TestHarness {
    app: Router,
    _reload_layer: reload::Layer<EnvFilter, tracing_subscriber::Registry>,
}

fn test_config() -> Result<Config> {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let vars = HashMap::from([
        (
            "DATABASE_URL".to_string(),
            // Unreachable on purpose: health must still answer
            "postgresql://127.0.0.1:1/i18n_unreachable".to_string(),
        ),
        ("REDIS_URL".to_string(), "redis://127.0.0.1:1".to_string()),
        ("LOG_PATH".to_string(), "/tmp".to_string()),
        ("DEPLOYMENT_MODE".to_string(), "test".to_string()),
        (
            "APPLICATION_NAME".to_string(),
            "internationalization-service".to_string(),
        ),
        ("MONITORING_API_KEY".to_string(), "test-key".to_string()),
        (
            "ACCOUNTS_API_BASE_URL".to_string(),
            "http://127.0.0.1:1".to_string(),
        ),
        ("SERVICE_AUTH_USERNAME".to_string(), "svc-i18n".to_string()),
        ("SERVICE_AUTH_PASSWORD".to_string(), "svc-password".to_string()),
        (
            "TOKEN_SIGNING_SECRET".to_string(),
            STANDARD.encode(b"integration-test-secret-32-bytes"),
        ),
    ]);

    Ok(Config::from_vars(&vars)?)
}

fn spawn_harness() -> Result<TestHarness> {
    let config = test_config()?;

    let accounts = AccountsClient::new(
        config.accounts_api_base_url.clone(),
        config.service_auth_username.clone(),
        config.service_auth_password.clone(),
        Duration::from_secs(config.accounts_api_timeout_seconds),
    )?;

    let engine = AuthorizationEngine::new(
        Arc::new(NoopCache),
        Arc::new(accounts),
        EmployeeLoginRequirement {
            login_system: LoginSystem::EmployeeLogin,
        },
    );

    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy(&config.database_url)?;

    let (reload_layer, reload_handle) = reload::Layer::new(EnvFilter::new("warn"));
    let log_level = LogLevelHandle::new(reload_handle, 3);

    let verifier = TokenVerifier::new(b"integration-test-secret-32-bytes");

    let state = Arc::new(AppState {
        pool,
        config,
        verifier,
        engine,
        log_level,
    });

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .build_recorder()
        .handle();

    Ok(TestHarness {
        app: build_routes(state, metrics_handle),
        _reload_layer: reload_layer,
    })
}

#[tokio::test]
async fn test_health_is_public_and_always_answers() -> Result<()> {
    let harness = spawn_harness()?;

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = harness.app.clone().oneshot(request).await.unwrap();

    // The database is unreachable, but orchestrators still get a response
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await?.to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;

    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["application"], "internationalization-service");
    assert_eq!(body["deployment_mode"], "test");
    assert_eq!(body["database"], "unhealthy");
    Ok(())
}

#[tokio::test]
async fn test_metrics_is_public() -> Result<()> {
    let harness = spawn_harness()?;

    let request = Request::builder()
        .method("GET")
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = harness.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_not_found() -> Result<()> {
    let harness = spawn_harness()?;

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/unknown")
        .body(Body::empty())
        .unwrap();
    let response = harness.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
