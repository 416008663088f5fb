//! Authentication and authorization middleware for protected routes.
//!
//! Two distinct layers:
//!
//! - [`require_bearer`] authenticates the request: it extracts the bearer
//!   token from the `Authorization` header, verifies it, and injects the
//!   validated claims into request extensions. Failures are 401.
//! - [`require_employee_login`] authorizes the request: it runs the
//!   decision engine over the claims placed by authentication. Denials are
//!   an opaque 403.

use crate::auth::Claims;
use crate::errors::I18nError;
use crate::routes::AppState;
use crate::services::Decision;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// Authentication middleware that validates bearer tokens.
///
/// # Authorization Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The scheme comparison is case-insensitive. Failure responses:
///
/// - header absent: 401 "Missing Authorization Header"
/// - scheme is not `Bearer`: 401 "Invalid Authentication Scheme"
/// - header malformed or token fails verification: 401 "Invalid
///   Authorization Header"
#[instrument(skip_all, name = "i18n.middleware.authn")]
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, I18nError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!(target: "i18n.middleware.authn", "Missing Authorization header");
            I18nError::Unauthenticated("Missing Authorization Header".to_string())
        })?;

    let (scheme, token) = auth_header.split_once(' ').ok_or_else(|| {
        tracing::debug!(target: "i18n.middleware.authn", "Authorization header has no parameter");
        I18nError::Unauthenticated("Invalid Authorization Header".to_string())
    })?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        tracing::debug!(target: "i18n.middleware.authn", "Unsupported authentication scheme");
        return Err(I18nError::Unauthenticated(
            "Invalid Authentication Scheme".to_string(),
        ));
    }

    let claims = state.verifier.verify(token.trim()).map_err(|_| {
        I18nError::Unauthenticated("Invalid Authorization Header".to_string())
    })?;

    // Store claims in request extensions for downstream layers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Authorization middleware enforcing the employee-login policy.
///
/// Requires [`require_bearer`] to have run first; a missing claims
/// extension means the route was wired without authentication and is
/// treated as an internal error rather than an open door.
#[instrument(skip_all, name = "i18n.middleware.authz")]
pub async fn require_employee_login(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, I18nError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(I18nError::Internal)?;

    match state.engine.authorize(&claims).await {
        Decision::Granted => Ok(next.run(req).await),
        Decision::Denied => Err(I18nError::Forbidden),
    }
}
