//! JWT pre-parse guards shared across Internationalization Service crates.
//!
//! Bearer tokens are size- and shape-checked BEFORE any base64 decoding or
//! signature verification. Oversized or structurally invalid tokens are
//! rejected with minimal resource usage, and the error messages are generic
//! so nothing about the validation internals leaks to clients.

use thiserror::Error;

/// Maximum allowed JWT size in bytes (8KB).
///
/// Typical tokens in this system are 300-600 bytes (header + claims +
/// HMAC signature). The 8KB ceiling leaves room for claim growth while
/// rejecting oversized tokens before any allocation-heavy decoding.
///
/// Per OWASP API Security Top 10 - API4:2023 (Unrestricted Resource
/// Consumption).
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Errors raised by the pre-parse token guards.
///
/// Messages are intentionally generic to prevent information leakage;
/// details are logged at debug level by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtGuardError {
    /// Token size exceeds [`MAX_JWT_SIZE_BYTES`].
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token is not a three-segment JWT.
    #[error("The access token is invalid or expired")]
    MalformedToken,
}

/// Check token size and structural shape before cryptographic validation.
///
/// # Errors
///
/// - `TokenTooLarge` - token exceeds the size limit
/// - `MalformedToken` - token is empty or not `header.payload.signature`
pub fn check_token_shape(token: &str) -> Result<(), JwtGuardError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtGuardError::TokenTooLarge);
    }

    let segments = token.split('.').count();
    if token.is_empty() || segments != 3 {
        tracing::debug!(
            target: "common.jwt",
            segments,
            "Token rejected: invalid JWT shape"
        );
        return Err(JwtGuardError::MalformedToken);
    }

    Ok(())
}
