//! Observability: logging initialization, the runtime log-level switch,
//! and Prometheus metrics.

pub mod logging;
pub mod metrics;

pub use logging::{LogLevelError, LogLevelHandle};
