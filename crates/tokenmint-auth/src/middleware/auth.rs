//! Bearer token authentication extractor.
//!
//! This module provides the Axum extractor that validates Bearer tokens
//! and injects an [`AuthContext`] into protected handlers.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use tokenmint_auth::middleware::{AuthState, BearerAuth};
//!
//! async fn protected_handler(BearerAuth(auth): BearerAuth) -> String {
//!     format!("Hello, {}!", auth.client_id())
//! }
//!
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .with_state(auth_state);
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::token::validator::TokenValidator;

use super::types::AuthContext;

// =============================================================================
// Auth State
// =============================================================================

/// State required for bearer token authentication.
///
/// Include this in your application state and make it available to the
/// `BearerAuth` extractor via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// Validator for incoming tokens.
    pub validator: Arc<TokenValidator>,
}

impl AuthState {
    /// Creates a new auth state.
    #[must_use]
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }
}

// =============================================================================
// Bearer Auth Extractor
// =============================================================================

/// Axum extractor that validates Bearer tokens.
///
/// This extractor:
/// 1. Extracts the `Authorization: Bearer <token>` header
/// 2. Runs full token validation (structure, algorithm, signature,
///    issuer, audience, lifetime)
/// 3. Builds an [`AuthContext`] from the validated claims
///
/// Scope checks are left to the handler via
/// [`AuthContext::require_scope`], so a valid token that lacks a scope
/// fails with 403 rather than 401.
///
/// # Errors
///
/// Returns `AuthError` (which implements `IntoResponse`) if the
/// Authorization header is missing or malformed, or the token fails any
/// validation check.
#[derive(Debug)]
pub struct BearerAuth(pub AuthContext);

impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AuthError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::unauthorized("Malformed Authorization header"))?;

        // The precise failure reason stays in the logs. Callers get a
        // constant description so the response is not a validation oracle.
        let claims = auth_state.validator.validate(token).map_err(|reason| {
            tracing::debug!(reason = reason.as_str(), "Rejected bearer token");
            AuthError::unauthorized("Invalid or expired access token")
        })?;

        tracing::debug!(
            client_id = %claims.client_id,
            jti = %claims.jti,
            "Token validated successfully"
        );

        Ok(BearerAuth(AuthContext::new(claims)))
    }
}
