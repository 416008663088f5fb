//! HTTP request handlers.

pub mod health;
pub mod log_level;
pub mod metrics;

pub use health::health_check;
pub use log_level::{get_log_level, set_log_level};
pub use metrics::metrics_handler;
