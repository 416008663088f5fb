//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports from the [`secrecy`] crate. Use these types for every
//! sensitive value the service holds: service-to-service passwords,
//! monitoring keys, and signing secrets.
//!
//! `SecretString` implements `Debug` with redaction, so any struct that
//! derives `Debug` and contains one cannot leak the value via `{:?}` or
//! tracing. Secrets are zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct ServiceCredentials {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let creds = ServiceCredentials {
//!     username: "svc-i18n".to_string(),
//!     password: SecretString::from("hunter2"),
//! };
//!
//! // Debug output redacts the password
//! let rendered = format!("{creds:?}");
//! assert!(!rendered.contains("hunter2"));
//!
//! // Access requires an explicit call
//! let password: &str = creds.password.expose_secret();
//! assert_eq!(password, "hunter2");
//! ```

// Re-export the main types from secrecy
pub use secrecy::{ExposeSecret, SecretBox, SecretString};
