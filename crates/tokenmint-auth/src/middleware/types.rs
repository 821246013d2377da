//! Authentication context types.
//!
//! The context is built by the `BearerAuth` extractor from validated
//! token claims and handed to handlers.

use std::sync::Arc;

use crate::error::AuthError;
use crate::token::jwt::AccessTokenClaims;

/// Authenticated request context.
///
/// The claims are wrapped in `Arc` so the context clones cheaply when
/// passed across async boundaries.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Validated access token claims.
    pub token_claims: Arc<AccessTokenClaims>,
}

impl AuthContext {
    /// Creates a context from validated claims.
    #[must_use]
    pub fn new(claims: AccessTokenClaims) -> Self {
        Self {
            token_claims: Arc::new(claims),
        }
    }

    /// Checks if the token carries a specific scope.
    ///
    /// Performs exact matching on space-separated scopes.
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.token_claims
            .scope
            .split_whitespace()
            .any(|s| s == scope)
    }

    /// Requires a scope, failing with `Forbidden` when it is absent.
    ///
    /// # Errors
    /// Returns [`AuthError::Forbidden`] if the scope is missing.
    pub fn require_scope(&self, scope: &str) -> Result<(), AuthError> {
        if self.has_scope(scope) {
            Ok(())
        } else {
            Err(AuthError::forbidden(format!(
                "Token lacks required scope '{scope}'"
            )))
        }
    }

    /// Returns all scopes as an iterator.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.token_claims.scope.split_whitespace()
    }

    /// Gets the subject identifier from the token.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.token_claims.sub
    }

    /// Gets the client ID from the token.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.token_claims.client_id
    }

    /// Gets the JWT ID (unique token identifier).
    #[must_use]
    pub fn jti(&self) -> &str {
        &self.token_claims.jti
    }

    /// Gets the token issuer.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.token_claims.iss
    }

    /// Gets the token audiences.
    #[must_use]
    pub fn audiences(&self) -> &[String] {
        &self.token_claims.aud
    }
}
