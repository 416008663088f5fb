//! Accounts API HTTP client for remote session token validation.
//!
//! When the cache does not confirm a session token, the authorization flow
//! falls back to the accounts API, which owns credential verification.
//!
//! # Security
//!
//! - Requests authenticate with service-to-service basic credentials,
//!   distinct from end-user credentials
//! - Timeouts bound every call so a slow accounts API cannot hold requests
//!   open indefinitely
//! - Errors are logged server-side; the caller decides the outcome

use async_trait::async_trait;
use common::secret::{ExposeSecret, SecretString};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, instrument, warn};

/// Connect timeout for accounts API requests in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Accounts API call failure.
#[derive(Debug, Error)]
pub enum AccountsApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build accounts API client: {0}")]
    ClientBuild(String),

    /// The request failed at the transport level (timeout, DNS, refused).
    #[error("Accounts API transport error: {0}")]
    Transport(String),

    /// The accounts API answered with a non-success status.
    #[error("Accounts API returned status {0}")]
    Status(u16),

    /// The response body could not be parsed.
    #[error("Failed to parse accounts API response: {0}")]
    Decode(String),
}

/// Request body for the token validation endpoint.
#[derive(Debug, Serialize)]
struct ValidateTokenRequest<'a> {
    auth_token: &'a str,
}

/// Response body from the token validation endpoint.
#[derive(Debug, Deserialize)]
struct ValidateTokenResponse {
    valid: bool,
}

/// Remote session token validation interface.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Ask the accounts API whether `auth_token` is the live session token
    /// for the user identified by `external_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsApiError`] on transport failures, non-success
    /// statuses, and undecodable responses. Callers treat errors as a
    /// denial (fail-closed).
    async fn validate_employee_token(
        &self,
        external_id: &str,
        auth_token: &str,
    ) -> Result<bool, AccountsApiError>;
}

/// HTTP client for the accounts API validation endpoint.
#[derive(Clone)]
pub struct AccountsClient {
    /// HTTP client with configured timeouts.
    client: Client,

    /// Base URL of the accounts API.
    base_url: String,

    /// Service-to-service basic auth username.
    username: String,

    /// Service-to-service basic auth password.
    password: SecretString,
}

impl AccountsClient {
    /// Create a new accounts API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Accounts API base URL (e.g. "https://accounts.internal")
    /// * `username` / `password` - service-to-service credentials
    /// * `timeout` - total request timeout
    ///
    /// # Errors
    ///
    /// Returns [`AccountsApiError::ClientBuild`] if the HTTP client cannot
    /// be constructed.
    pub fn new(
        base_url: String,
        username: String,
        password: SecretString,
        timeout: Duration,
    ) -> Result<Self, AccountsApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                error!(target: "i18n.services.accounts", error = %e, "Failed to build HTTP client");
                AccountsApiError::ClientBuild(e.to_string())
            })?;

        Ok(Self {
            client,
            base_url,
            username,
            password,
        })
    }
}

#[async_trait]
impl AccountsApi for AccountsClient {
    #[instrument(skip_all, fields(external_id = %external_id))]
    async fn validate_employee_token(
        &self,
        external_id: &str,
        auth_token: &str,
    ) -> Result<bool, AccountsApiError> {
        let url = format!(
            "{}/api/v1/employees/{}/authentication-token/validate",
            self.base_url, external_id
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(&ValidateTokenRequest { auth_token })
            .send()
            .await
            .map_err(|e| {
                warn!(target: "i18n.services.accounts", error = %e, "Accounts API request failed");
                AccountsApiError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                target: "i18n.services.accounts",
                status = %status,
                "Accounts API returned non-success status"
            );
            return Err(AccountsApiError::Status(status.as_u16()));
        }

        let body: ValidateTokenResponse = response.json().await.map_err(|e| {
            error!(target: "i18n.services.accounts", error = %e, "Failed to parse accounts API response");
            AccountsApiError::Decode(e.to_string())
        })?;

        Ok(body.valid)
    }
}
