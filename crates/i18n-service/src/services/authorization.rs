//! Authorization decision engine for the employee-login policy.
//!
//! Runs once per request after authentication has produced a verified
//! claims set. Single pass, no persisted state:
//!
//! 1. Extract the typed employee claims; any missing claim denies.
//! 2. Compare the claimed login system against the configured requirement;
//!    mismatch denies with no cache or remote I/O.
//! 3. Consult the session token cache; an exact match grants.
//! 4. Otherwise fall back to the accounts API; only an explicit success
//!    grants.
//!
//! The cache-first ordering keeps load off the accounts API; the fallback
//! is never attempted in parallel with the cache read. Cache failures are
//! logged and degraded to a miss. Fallback failures deny (fail-closed).

use crate::auth::claims::{Claims, EmployeeClaims, LoginSystem};
use crate::cache::SessionTokenCache;
use crate::observability::metrics::{
    record_accounts_fallback, record_authorization_decision, record_cache_lookup,
};
use crate::services::accounts_client::AccountsApi;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Configured expectation of the employee-login policy.
///
/// Set at router construction, immutable for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeLoginRequirement {
    /// The login system a token must originate from.
    pub login_system: LoginSystem,
}

/// Terminal outcome of an authorization evaluation.
///
/// Denials carry no reason: absence of success is the only signal visible
/// to the caller, and the client sees an opaque 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The requirement is satisfied.
    Granted,
    /// The requirement is not satisfied.
    Denied,
}

/// Orchestrates claim inspection, cache lookup, and remote fallback.
#[derive(Clone)]
pub struct AuthorizationEngine {
    cache: Arc<dyn SessionTokenCache>,
    accounts: Arc<dyn AccountsApi>,
    requirement: EmployeeLoginRequirement,
}

impl AuthorizationEngine {
    /// Create an engine over the given collaborators.
    #[must_use]
    pub fn new(
        cache: Arc<dyn SessionTokenCache>,
        accounts: Arc<dyn AccountsApi>,
        requirement: EmployeeLoginRequirement,
    ) -> Self {
        Self {
            cache,
            accounts,
            requirement,
        }
    }

    /// Evaluate the employee-login requirement for a verified claims set.
    #[instrument(skip_all, name = "i18n.authz.evaluate")]
    pub async fn authorize(&self, claims: &Claims) -> Decision {
        let Some(employee) = EmployeeClaims::from_claims(claims) else {
            debug!(target: "i18n.authz", "Required claims missing; denying");
            record_authorization_decision("denied", "claims");
            return Decision::Denied;
        };

        if employee.login_system != self.requirement.login_system.code() {
            debug!(
                target: "i18n.authz",
                login_system = employee.login_system,
                "Login system does not match requirement; denying"
            );
            record_authorization_decision("denied", "claims");
            return Decision::Denied;
        }

        // Cache first: the fast path that keeps load off the accounts API
        match self.cache.session_token(&employee.user_external_id).await {
            Ok(Some(cached)) if cached == employee.auth_token => {
                record_cache_lookup("hit");
                record_authorization_decision("granted", "cache");
                return Decision::Granted;
            }
            Ok(Some(_)) => {
                debug!(
                    target: "i18n.authz",
                    external_id = %employee.user_external_id,
                    "Cached session token does not match"
                );
                record_cache_lookup("stale");
            }
            Ok(None) => {
                record_cache_lookup("miss");
            }
            Err(e) => {
                // Never fatal: degrade to a miss and let the fallback decide
                error!(
                    target: "i18n.authz",
                    error = %e,
                    external_id = %employee.user_external_id,
                    "Error retrieving authentication token from the cache"
                );
                record_cache_lookup("error");
            }
        }

        // Remote fallback, only after the cache did not confirm
        let fallback_started = std::time::Instant::now();
        let fallback = self
            .accounts
            .validate_employee_token(&employee.user_external_id, &employee.auth_token)
            .await;

        match fallback {
            Ok(true) => {
                record_accounts_fallback("valid", fallback_started.elapsed());
                record_authorization_decision("granted", "remote");
                Decision::Granted
            }
            Ok(false) => {
                debug!(
                    target: "i18n.authz",
                    external_id = %employee.user_external_id,
                    "Accounts API rejected the session token"
                );
                record_accounts_fallback("invalid", fallback_started.elapsed());
                record_authorization_decision("denied", "remote");
                Decision::Denied
            }
            Err(e) => {
                // Fail closed: an unreachable accounts API must not grant
                warn!(
                    target: "i18n.authz",
                    error = %e,
                    external_id = %employee.user_external_id,
                    "Accounts API fallback failed; denying"
                );
                record_accounts_fallback("error", fallback_started.elapsed());
                record_authorization_decision("denied", "remote_error");
                Decision::Denied
            }
        }
    }
}
