//! Metrics definitions for the Internationalization Service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `i18n_` prefix for this service
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `result`: accepted/rejected (token validation), hit/stale/miss/error
//!   (cache lookups)
//! - `outcome`: granted/denied
//! - `source`: claims/cache/remote/remote_error

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder and return the render handle for the
/// `/metrics` endpoint.
///
/// # Errors
///
/// Returns [`BuildError`] if a global recorder is already installed.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record a bearer token validation attempt.
///
/// Metric: `i18n_token_validations_total`
/// Labels: `result` (accepted, rejected)
pub fn record_token_validation(result: &str) {
    counter!("i18n_token_validations_total", "result" => result.to_string()).increment(1);
}

/// Record a session token cache lookup.
///
/// Metric: `i18n_session_cache_lookups_total`
/// Labels: `result` (hit, stale, miss, error)
pub fn record_cache_lookup(result: &str) {
    counter!("i18n_session_cache_lookups_total", "result" => result.to_string()).increment(1);
}

/// Record an authorization decision and the path that produced it.
///
/// Metric: `i18n_authorization_decisions_total`
/// Labels: `outcome` (granted, denied), `source` (claims, cache, remote,
/// remote_error)
pub fn record_authorization_decision(outcome: &str, source: &str) {
    counter!("i18n_authorization_decisions_total",
        "outcome" => outcome.to_string(),
        "source" => source.to_string()
    )
    .increment(1);
}

/// Record an accounts API fallback call.
///
/// Metrics: `i18n_accounts_fallback_total`,
/// `i18n_accounts_fallback_duration_seconds`
/// Labels: `outcome` (valid, invalid, error)
pub fn record_accounts_fallback(outcome: &str, duration: Duration) {
    histogram!("i18n_accounts_fallback_duration_seconds",
        "outcome" => outcome.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("i18n_accounts_fallback_total", "outcome" => outcome.to_string()).increment(1);
}
