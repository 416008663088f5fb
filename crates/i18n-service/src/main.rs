//! Internationalization Service
//!
//! Entry point: loads configuration (fail-fast), installs logging for the
//! deployment mode, connects the database pool and session cache, and
//! serves the HTTP API with graceful shutdown.

use i18n_service::auth::{LoginSystem, TokenVerifier};
use i18n_service::cache::RedisSessionCache;
use i18n_service::config::Config;
use i18n_service::observability::{logging, metrics};
use i18n_service::routes::{self, AppState};
use i18n_service::services::{AccountsClient, AuthorizationEngine, EmployeeLoginRequirement};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration first: the logging shape depends on the deployment mode
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    let log_level = logging::init(&config)?;

    info!("Starting Internationalization Service");
    info!(
        application = %config.application_name,
        deployment_mode = %config.deployment_mode,
        bind_address = %config.bind_address,
        accounts_api_timeout_seconds = config.accounts_api_timeout_seconds,
        "Configuration loaded successfully"
    );

    // Install the Prometheus recorder before any metric is emitted
    let metrics_handle = metrics::init_metrics_recorder().map_err(|e| {
        error!("Failed to install metrics recorder: {}", e);
        e
    })?;

    // Initialize database connection pool
    info!("Connecting to database...");
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            e
        })?;

    info!("Database connection established");

    // Connect the session token cache
    info!("Connecting to session cache...");
    let session_cache = RedisSessionCache::connect(&config.redis_url)
        .await
        .map_err(|e| {
            error!("Failed to connect to session cache: {}", e);
            e
        })?;

    info!("Session cache connection established");

    // Build the accounts API fallback client
    let accounts_client = AccountsClient::new(
        config.accounts_api_base_url.clone(),
        config.service_auth_username.clone(),
        config.service_auth_password.clone(),
        Duration::from_secs(config.accounts_api_timeout_seconds),
    )
    .map_err(|e| {
        error!("Failed to build accounts API client: {}", e);
        e
    })?;

    // Assemble the authorization pipeline
    let verifier = TokenVerifier::new(&config.token_signing_secret);
    let engine = AuthorizationEngine::new(
        Arc::new(session_cache),
        Arc::new(accounts_client),
        EmployeeLoginRequirement {
            login_system: LoginSystem::EmployeeLogin,
        },
    );

    // Parse bind address before moving config
    let bind_address = config.bind_address.clone();

    let state = Arc::new(AppState {
        pool: db_pool,
        config,
        verifier,
        engine,
        log_level,
    });

    let app = routes::build_routes(state, metrics_handle);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Internationalization Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Internationalization Service shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
