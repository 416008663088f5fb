//! Internationalization Service Library
//!
//! A thin web API microservice shell: startup, configuration, logging, and
//! an authentication/authorization pipeline that validates bearer tokens
//! against a shared session cache with fallback to the remote accounts API.
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> middleware/*.rs -> services/*.rs -> cache / accounts API
//! ```
//!
//! # Modules
//!
//! - `auth` - claims structures and bearer token verification
//! - `cache` - session token cache (Redis read path)
//! - `config` - service configuration from environment
//! - `errors` - error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - authentication and authorization layers
//! - `models` - data models
//! - `observability` - logging, runtime level switch, metrics
//! - `routes` - Axum router setup
//! - `services` - authorization engine and accounts API client

pub mod auth;
pub mod cache;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
