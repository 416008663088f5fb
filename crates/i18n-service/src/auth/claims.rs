//! JWT claims structures.
//!
//! [`Claims`] is the raw payload deserialized from a verified token. The
//! authorization flow consumes a strongly-typed [`EmployeeClaims`] view,
//! extracted and validated once at the authorization boundary instead of
//! probing a loosely-typed claims bag per field.
//!
//! The `auth_token` claim is a live session credential and is redacted in
//! Debug output to prevent exposure in logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Login systems recognized by the accounts subsystem.
///
/// The numeric codes are wire-level values carried in the `login_system`
/// claim and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LoginSystem {
    /// Customer-facing login origin.
    CustomerLogin = 1,
    /// Employee login origin.
    EmployeeLogin = 2,
}

impl LoginSystem {
    /// Numeric code carried in the `login_system` claim.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Raw JWT claims payload for tokens issued by the shared identity subsystem.
///
/// Claim values are strings on the wire; only `exp` (and the optional `iat`)
/// are numeric. The three authorization claims are optional at this layer -
/// their presence is enforced by [`EmployeeClaims::from_claims`].
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration timestamp (Unix epoch seconds). Mandatory.
    pub exp: i64,

    /// Issued-at timestamp (Unix epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Subject identifier - redacted in Debug output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Login system code as an integer-valued string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_system: Option<String>,

    /// Session token issued by the accounts subsystem - redacted in Debug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// External identity key of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_external_id: Option<String>,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("exp", &self.exp)
            .field("iat", &self.iat)
            .field("sub", &self.sub.as_ref().map(|_| "[REDACTED]"))
            .field("login_system", &self.login_system)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("user_external_id", &self.user_external_id)
            .finish()
    }
}

/// Strongly-typed claims view required by the employee-login policy.
///
/// Built from [`Claims`] exactly once at the authorization boundary. A
/// missing or unparseable claim yields `None`, which the decision engine
/// treats as an immediate denial.
#[derive(Clone, PartialEq, Eq)]
pub struct EmployeeClaims {
    /// Numeric login system code from the `login_system` claim.
    pub login_system: i32,

    /// Session token to verify against the cache or accounts API.
    pub auth_token: String,

    /// External identity key used for cache and remote lookups.
    pub user_external_id: String,
}

impl fmt::Debug for EmployeeClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeClaims")
            .field("login_system", &self.login_system)
            .field("auth_token", &"[REDACTED]")
            .field("user_external_id", &self.user_external_id)
            .finish()
    }
}

impl EmployeeClaims {
    /// Extract the typed view from a raw claims payload.
    ///
    /// Returns `None` if any of `login_system`, `auth_token`, or
    /// `user_external_id` is absent, blank, or (for `login_system`) not an
    /// integer.
    #[must_use]
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        let login_system = claims.login_system.as_deref()?.trim().parse::<i32>().ok()?;

        let auth_token = claims.auth_token.as_deref()?;
        if auth_token.is_empty() {
            return None;
        }

        let user_external_id = claims.user_external_id.as_deref()?;
        if user_external_id.is_empty() {
            return None;
        }

        Some(Self {
            login_system,
            auth_token: auth_token.to_string(),
            user_external_id: user_external_id.to_string(),
        })
    }
}
