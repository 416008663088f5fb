//! Bearer token verification.
//!
//! Verifies HS256-signed JWTs issued by the shared identity subsystem.
//!
//! # Security
//!
//! - Tokens are size- and shape-checked BEFORE parsing (DoS prevention)
//! - The `exp` claim is mandatory and checked with zero clock-skew tolerance
//! - Issuer and audience validation are explicitly disabled: this service
//!   trusts tokens from the shared identity subsystem without pinning
//! - All failures collapse to one generic error; details are logged at
//!   debug level without the token itself

use crate::auth::claims::Claims;
use common::jwt::check_token_shape;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;

/// Token verification failure.
///
/// A single opaque variant: callers must treat any failure as "cannot
/// authenticate" and nothing about the cause may reach the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token failed size, shape, signature, or expiry checks.
    #[error("The access token is invalid or expired")]
    Invalid,
}

/// Verifier for bearer tokens signed with the pre-shared symmetric secret.
///
/// The secret is loaded once at startup and never rotated at runtime.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from the raw signing secret bytes.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Zero clock-skew tolerance on expiry
        validation.leeway = 0;
        validation.validate_exp = true;
        // Issuer/audience pinning is deliberately disabled
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for every failure mode: oversized or
    /// malformed tokens, bad signatures, missing `exp`, and expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        check_token_shape(token).map_err(|e| {
            tracing::debug!(target: "i18n.auth.token", error = ?e, "Token rejected by pre-parse guard");
            crate::observability::metrics::record_token_validation("rejected");
            TokenError::Invalid
        })?;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(target: "i18n.auth.token", error = %e, "Token verification failed");
                crate::observability::metrics::record_token_validation("rejected");
                TokenError::Invalid
            })?;

        crate::observability::metrics::record_token_validation("accepted");
        Ok(token_data.claims)
    }
}
