//! Logging initialization and the runtime log-level switch.
//!
//! The logging shape follows the deployment mode:
//!
//! - `local`: human-readable console output plus a daily-rolling file under
//!   the configured log directory, starting at Debug severity.
//! - every other mode: JSON to stdout for the platform log forwarder,
//!   starting at Warning severity.
//!
//! The minimum severity can be changed at runtime through
//! [`LogLevelHandle`], an explicit shared handle injected into the admin
//! handlers. No ambient global state: the handle owns an atomic level code
//! plus a `tracing_subscriber::reload` handle, and is only written via the
//! dedicated admin endpoint.

use crate::config::Config;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Numeric severity codes accepted by the log-level endpoint.
///
/// 1 = Debug, 2 = Information, 3 = Warning, 4 = Error.
pub const MIN_LEVEL_CODE: u8 = 1;
pub const MAX_LEVEL_CODE: u8 = 4;

#[derive(Debug, Error)]
pub enum LogLevelError {
    /// The requested code is outside the accepted 1-4 range.
    #[error("log level must be between {MIN_LEVEL_CODE} and {MAX_LEVEL_CODE}, got {0}")]
    OutOfRange(u8),

    /// The subscriber rejected the new filter.
    #[error("failed to apply log level: {0}")]
    Reload(String),
}

#[derive(Debug, Error)]
pub enum LoggingInitError {
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    AlreadyInitialized(String),
}

/// Map a numeric severity code to a filter directive.
fn directive_for(code: u8) -> Option<&'static str> {
    match code {
        1 => Some("debug"),
        2 => Some("info"),
        3 => Some("warn"),
        4 => Some("error"),
        _ => None,
    }
}

/// Shared handle for reading and changing the process-wide minimum
/// severity at runtime.
///
/// Cheaply cloneable; writes go through the subscriber's reload handle so
/// the new level takes effect on the next emitted event.
#[derive(Clone)]
pub struct LogLevelHandle {
    /// Last applied numeric code, readable without touching the subscriber.
    level: Arc<AtomicU8>,

    /// Reload handle into the installed filter layer.
    reload: reload::Handle<EnvFilter, Registry>,
}

impl LogLevelHandle {
    /// Wrap a reload handle with the initially applied code.
    #[must_use]
    pub fn new(reload: reload::Handle<EnvFilter, Registry>, initial_code: u8) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(initial_code)),
            reload,
        }
    }

    /// Current numeric severity code.
    #[must_use]
    pub fn get(&self) -> u8 {
        self.level.load(Ordering::SeqCst)
    }

    /// Apply a new minimum severity.
    ///
    /// # Errors
    ///
    /// - [`LogLevelError::OutOfRange`] for codes outside 1-4
    /// - [`LogLevelError::Reload`] if the subscriber rejected the filter
    pub fn set(&self, code: u8) -> Result<(), LogLevelError> {
        let directive = directive_for(code).ok_or(LogLevelError::OutOfRange(code))?;

        self.reload
            .reload(EnvFilter::new(directive))
            .map_err(|e| LogLevelError::Reload(e.to_string()))?;

        self.level.store(code, Ordering::SeqCst);
        Ok(())
    }
}

/// Install the global tracing subscriber for the given configuration and
/// return the runtime level switch.
///
/// `RUST_LOG` overrides the initial filter when set; the reported initial
/// code still follows the deployment mode until the admin endpoint applies
/// an explicit level.
///
/// # Errors
///
/// Returns [`LoggingInitError`] if a subscriber is already installed.
pub fn init(config: &Config) -> Result<LogLevelHandle, LoggingInitError> {
    let initial_code: u8 = if config.deployment_mode.is_local() { 1 } else { 3 };

    let initial_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // directive_for covers every initial_code value used above
        EnvFilter::new(directive_for(initial_code).unwrap_or("info"))
    });

    let (filter_layer, reload_handle) = reload::Layer::new(initial_filter);

    if config.deployment_mode.is_local() {
        let log_file_prefix = format!(
            "{}-{}.log",
            config.application_name, config.deployment_mode
        );
        let file_appender = tracing_appender::rolling::daily(&config.log_path, log_file_prefix);

        Registry::default()
            .with(filter_layer)
            .with(fmt::layer())
            .with(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true),
            )
            .try_init()
            .map_err(|e| LoggingInitError::AlreadyInitialized(e.to_string()))?;
    } else {
        Registry::default()
            .with(filter_layer)
            .with(fmt::layer().json().with_target(true))
            .try_init()
            .map_err(|e| LoggingInitError::AlreadyInitialized(e.to_string()))?;
    }

    Ok(LogLevelHandle::new(reload_handle, initial_code))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    /// Build a handle over a live reload layer without installing a global
    /// subscriber. The layer must stay alive for reloads to succeed.
    fn detached_handle() -> (reload::Layer<EnvFilter, Registry>, LogLevelHandle) {
        let (layer, handle) = reload::Layer::new(EnvFilter::new("warn"));
        (layer, LogLevelHandle::new(handle, 3))
    }

    #[test]
    fn test_directive_mapping() {
        assert_eq!(directive_for(1), Some("debug"));
        assert_eq!(directive_for(2), Some("info"));
        assert_eq!(directive_for(3), Some("warn"));
        assert_eq!(directive_for(4), Some("error"));
        assert_eq!(directive_for(0), None);
        assert_eq!(directive_for(5), None);
    }

    #[test]
    fn test_get_returns_initial_code() {
        let (_layer, handle) = detached_handle();
        assert_eq!(handle.get(), 3);
    }

    #[test]
    fn test_set_applies_and_reports_new_code() {
        let (_layer, handle) = detached_handle();

        handle.set(1).unwrap();
        assert_eq!(handle.get(), 1);

        handle.set(4).unwrap();
        assert_eq!(handle.get(), 4);
    }

    #[test]
    fn test_set_rejects_out_of_range_codes() {
        let (_layer, handle) = detached_handle();

        assert!(matches!(handle.set(0), Err(LogLevelError::OutOfRange(0))));
        assert!(matches!(handle.set(5), Err(LogLevelError::OutOfRange(5))));

        // The reported level is unchanged after a rejected set
        assert_eq!(handle.get(), 3);
    }

    #[test]
    fn test_handle_is_clone_and_shares_state() {
        let (_layer, handle) = detached_handle();
        let clone = handle.clone();

        handle.set(2).unwrap();
        assert_eq!(clone.get(), 2);
    }
}
