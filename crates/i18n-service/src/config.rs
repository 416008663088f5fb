//! Service configuration.
//!
//! Configuration is loaded from environment variables once at startup.
//! Required settings are fail-fast: the process aborts before serving
//! traffic when any of them is missing or invalid. Sensitive fields are
//! redacted in Debug output.

use base64::{engine::general_purpose, Engine as _};
use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default accounts API request timeout in seconds.
pub const DEFAULT_ACCOUNTS_API_TIMEOUT_SECONDS: u64 = 10;

/// Maximum allowed accounts API request timeout in seconds.
pub const MAX_ACCOUNTS_API_TIMEOUT_SECONDS: u64 = 60;

/// Minimum decoded length of the token signing secret in bytes.
pub const MIN_SIGNING_SECRET_BYTES: usize = 32;

/// Deployment environments the service recognizes.
///
/// The mode selects the logging shape (local gets console + file output,
/// everything else ships JSON to stdout) and the initial minimum severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Local,
    Dev,
    Qa,
    Stage,
    Test,
    Demo,
    Training,
    Prod,
}

impl DeploymentMode {
    /// Whether this is a developer's local machine.
    #[must_use]
    pub fn is_local(self) -> bool {
        matches!(self, DeploymentMode::Local)
    }

    /// Lowercase tag used in log file names and log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeploymentMode::Local => "local",
            DeploymentMode::Dev => "dev",
            DeploymentMode::Qa => "qa",
            DeploymentMode::Stage => "stage",
            DeploymentMode::Test => "test",
            DeploymentMode::Demo => "demo",
            DeploymentMode::Training => "training",
            DeploymentMode::Prod => "prod",
        }
    }
}

impl FromStr for DeploymentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(DeploymentMode::Local),
            "dev" => Ok(DeploymentMode::Dev),
            "qa" => Ok(DeploymentMode::Qa),
            "stage" => Ok(DeploymentMode::Stage),
            "test" => Ok(DeploymentMode::Test),
            "demo" => Ok(DeploymentMode::Demo),
            "training" => Ok(DeploymentMode::Training),
            "prod" => Ok(DeploymentMode::Prod),
            other => Err(ConfigError::UnknownDeploymentMode(other.to_string())),
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unknown deployment mode: {0}")]
    UnknownDeploymentMode(String),

    #[error("Invalid token signing secret: {0}")]
    InvalidSigningSecret(String),

    #[error("Invalid accounts API timeout configuration: {0}")]
    InvalidAccountsApiTimeout(String),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),
}

/// Service configuration.
///
/// Loaded once at startup and shared read-only for the process lifetime.
/// Connection strings and secrets are redacted in Debug output.
#[derive(Clone)]
pub struct Config {
    /// Primary datastore connection URL.
    pub database_url: String,

    /// Cache connection URL.
    pub redis_url: String,

    /// HTTP bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Base directory for local log files.
    pub log_path: String,

    /// Deployment environment tag.
    pub deployment_mode: DeploymentMode,

    /// Application name used in log file names and log fields.
    pub application_name: String,

    /// Monitoring pipeline key. Presence is asserted at startup; the value
    /// is consumed by the platform log forwarder, not by this process.
    pub monitoring_api_key: SecretString,

    /// Accounts API base URL for the remote validation fallback.
    pub accounts_api_base_url: String,

    /// Service-to-service basic auth username.
    pub service_auth_username: String,

    /// Service-to-service basic auth password.
    pub service_auth_password: SecretString,

    /// Pre-shared HS256 signing secret, decoded from base64.
    pub token_signing_secret: Vec<u8>,

    /// Total timeout for accounts API requests in seconds.
    pub accounts_api_timeout_seconds: u64,
}

/// Custom Debug implementation that redacts sensitive fields.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("bind_address", &self.bind_address)
            .field("log_path", &self.log_path)
            .field("deployment_mode", &self.deployment_mode)
            .field("application_name", &self.application_name)
            .field("monitoring_api_key", &"[REDACTED]")
            .field("accounts_api_base_url", &self.accounts_api_base_url)
            .field("service_auth_username", &self.service_auth_username)
            .field("service_auth_password", &"[REDACTED]")
            .field("token_signing_secret", &"[REDACTED]")
            .field(
                "accounts_api_timeout_seconds",
                &self.accounts_api_timeout_seconds,
            )
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any required variable is missing or
    /// invalid. Callers must treat this as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any required variable is missing or
    /// invalid.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = require(vars, "DATABASE_URL")?;
        let redis_url = require(vars, "REDIS_URL")?;

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let log_path = require(vars, "LOG_PATH")?;
        let deployment_mode = require(vars, "DEPLOYMENT_MODE")?.parse::<DeploymentMode>()?;
        let application_name = require(vars, "APPLICATION_NAME")?;
        let monitoring_api_key = SecretString::from(require(vars, "MONITORING_API_KEY")?);
        let accounts_api_base_url = require(vars, "ACCOUNTS_API_BASE_URL")?;
        let service_auth_username = require(vars, "SERVICE_AUTH_USERNAME")?;
        let service_auth_password = SecretString::from(require(vars, "SERVICE_AUTH_PASSWORD")?);

        let signing_secret_base64 = require(vars, "TOKEN_SIGNING_SECRET")?;
        let token_signing_secret = general_purpose::STANDARD
            .decode(signing_secret_base64)
            .map_err(ConfigError::Base64Error)?;

        if token_signing_secret.len() < MIN_SIGNING_SECRET_BYTES {
            return Err(ConfigError::InvalidSigningSecret(format!(
                "Expected at least {} bytes, got {}",
                MIN_SIGNING_SECRET_BYTES,
                token_signing_secret.len()
            )));
        }

        // Parse accounts API timeout with validation
        let accounts_api_timeout_seconds =
            if let Some(value_str) = vars.get("ACCOUNTS_API_TIMEOUT_SECONDS") {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidAccountsApiTimeout(format!(
                        "ACCOUNTS_API_TIMEOUT_SECONDS must be a valid positive integer, got '{value_str}': {e}"
                    ))
                })?;

                if value == 0 {
                    return Err(ConfigError::InvalidAccountsApiTimeout(
                        "ACCOUNTS_API_TIMEOUT_SECONDS must be greater than 0".to_string(),
                    ));
                }

                if value > MAX_ACCOUNTS_API_TIMEOUT_SECONDS {
                    return Err(ConfigError::InvalidAccountsApiTimeout(format!(
                        "ACCOUNTS_API_TIMEOUT_SECONDS must not exceed {MAX_ACCOUNTS_API_TIMEOUT_SECONDS} seconds, got {value}"
                    )));
                }

                value
            } else {
                DEFAULT_ACCOUNTS_API_TIMEOUT_SECONDS
            };

        Ok(Config {
            database_url,
            redis_url,
            bind_address,
            log_path,
            deployment_mode,
            application_name,
            monitoring_api_key,
            accounts_api_base_url,
            service_auth_username,
            service_auth_password,
            token_signing_secret,
            accounts_api_timeout_seconds,
        })
    }
}

fn require(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigError> {
    vars.get(name)
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn test_signing_secret_base64() -> String {
        general_purpose::STANDARD.encode([7u8; 32])
    }

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([
            (
                "DATABASE_URL".to_string(),
                "postgresql://localhost/i18n_test".to_string(),
            ),
            ("REDIS_URL".to_string(), "redis://localhost:6379".to_string()),
            ("LOG_PATH".to_string(), "/var/log/i18n".to_string()),
            ("DEPLOYMENT_MODE".to_string(), "local".to_string()),
            (
                "APPLICATION_NAME".to_string(),
                "internationalization-service".to_string(),
            ),
            ("MONITORING_API_KEY".to_string(), "mon-key-123".to_string()),
            (
                "ACCOUNTS_API_BASE_URL".to_string(),
                "http://localhost:9090".to_string(),
            ),
            ("SERVICE_AUTH_USERNAME".to_string(), "svc-i18n".to_string()),
            (
                "SERVICE_AUTH_PASSWORD".to_string(),
                "svc-password".to_string(),
            ),
            (
                "TOKEN_SIGNING_SECRET".to_string(),
                test_signing_secret_base64(),
            ),
        ])
    }

    #[test]
    fn test_from_vars_success_with_defaults() {
        let config = Config::from_vars(&base_vars()).expect("Config should load successfully");

        assert_eq!(config.database_url, "postgresql://localhost/i18n_test");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.log_path, "/var/log/i18n");
        assert_eq!(config.deployment_mode, DeploymentMode::Local);
        assert_eq!(config.application_name, "internationalization-service");
        assert_eq!(config.accounts_api_base_url, "http://localhost:9090");
        assert_eq!(config.service_auth_username, "svc-i18n");
        assert_eq!(config.token_signing_secret, vec![7u8; 32]);
        assert_eq!(
            config.accounts_api_timeout_seconds,
            DEFAULT_ACCOUNTS_API_TIMEOUT_SECONDS
        );
    }

    #[test]
    fn test_from_vars_custom_bind_address_and_timeout() {
        let mut vars = base_vars();
        vars.insert("BIND_ADDRESS".to_string(), "127.0.0.1:9000".to_string());
        vars.insert("ACCOUNTS_API_TIMEOUT_SECONDS".to_string(), "5".to_string());

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.accounts_api_timeout_seconds, 5);
    }

    #[test]
    fn test_from_vars_each_required_var_is_fail_fast() {
        let required = [
            "DATABASE_URL",
            "REDIS_URL",
            "LOG_PATH",
            "DEPLOYMENT_MODE",
            "APPLICATION_NAME",
            "MONITORING_API_KEY",
            "ACCOUNTS_API_BASE_URL",
            "SERVICE_AUTH_USERNAME",
            "SERVICE_AUTH_PASSWORD",
            "TOKEN_SIGNING_SECRET",
        ];

        for name in required {
            let mut vars = base_vars();
            vars.remove(name);

            let result = Config::from_vars(&vars);
            assert!(
                matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == name),
                "missing {name} should fail configuration loading"
            );
        }
    }

    #[test]
    fn test_from_vars_empty_required_var_is_missing() {
        let mut vars = base_vars();
        vars.insert("DATABASE_URL".to_string(), String::new());

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(v)) if v == "DATABASE_URL"));
    }

    #[test]
    fn test_deployment_mode_parsing_is_case_insensitive() {
        for (input, expected) in [
            ("LOCAL", DeploymentMode::Local),
            ("Dev", DeploymentMode::Dev),
            ("qa", DeploymentMode::Qa),
            ("STAGE", DeploymentMode::Stage),
            ("test", DeploymentMode::Test),
            ("Demo", DeploymentMode::Demo),
            ("TRAINING", DeploymentMode::Training),
            ("prod", DeploymentMode::Prod),
        ] {
            assert_eq!(input.parse::<DeploymentMode>().unwrap(), expected);
        }
    }

    #[test]
    fn test_unknown_deployment_mode_is_rejected() {
        let mut vars = base_vars();
        vars.insert("DEPLOYMENT_MODE".to_string(), "staging-2".to_string());

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::UnknownDeploymentMode(v)) if v == "staging-2")
        );
    }

    #[test]
    fn test_signing_secret_invalid_base64_rejected() {
        let mut vars = base_vars();
        vars.insert(
            "TOKEN_SIGNING_SECRET".to_string(),
            "not-valid-base64!@#$".to_string(),
        );

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::Base64Error(_))));
    }

    #[test]
    fn test_signing_secret_too_short_rejected() {
        let mut vars = base_vars();
        vars.insert(
            "TOKEN_SIGNING_SECRET".to_string(),
            general_purpose::STANDARD.encode([7u8; 16]),
        );

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidSigningSecret(msg)) if msg.contains("at least 32 bytes"))
        );
    }

    #[test]
    fn test_accounts_api_timeout_rejects_zero() {
        let mut vars = base_vars();
        vars.insert("ACCOUNTS_API_TIMEOUT_SECONDS".to_string(), "0".to_string());

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidAccountsApiTimeout(msg)) if msg.contains("greater than 0"))
        );
    }

    #[test]
    fn test_accounts_api_timeout_rejects_too_large() {
        let mut vars = base_vars();
        vars.insert("ACCOUNTS_API_TIMEOUT_SECONDS".to_string(), "61".to_string());

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidAccountsApiTimeout(msg)) if msg.contains("must not exceed 60"))
        );
    }

    #[test]
    fn test_accounts_api_timeout_rejects_non_numeric() {
        let mut vars = base_vars();
        vars.insert(
            "ACCOUNTS_API_TIMEOUT_SECONDS".to_string(),
            "ten".to_string(),
        );

        let result = Config::from_vars(&vars);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidAccountsApiTimeout(_))
        ));
    }

    #[test]
    fn test_debug_redacts_sensitive_fields() {
        let config = Config::from_vars(&base_vars()).expect("Config should load successfully");

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("postgresql://"));
        assert!(!debug_output.contains("redis://"));
        assert!(!debug_output.contains("mon-key-123"));
        assert!(!debug_output.contains("svc-password"));
        assert!(!debug_output.contains(&test_signing_secret_base64()));
        // Non-sensitive fields stay visible
        assert!(debug_output.contains("internationalization-service"));
    }
}
