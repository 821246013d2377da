//! Application state.
//!
//! Builds the auth components once at startup and shares them across
//! handlers. Substates are exposed through `FromRef` so the auth
//! crate's extractors and handlers can pull exactly what they need.

use std::sync::Arc;

use axum::extract::FromRef;

use tokenmint_auth::config::AuthConfig;
use tokenmint_auth::http::{IntrospectionState, TokenState};
use tokenmint_auth::middleware::AuthState;
use tokenmint_auth::token::introspection::Introspector;
use tokenmint_auth::token::issuer::{IssuerConfig, TokenIssuer};
use tokenmint_auth::token::jwt::JwtService;
use tokenmint_auth::token::validator::TokenValidator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Token endpoint state.
    pub token: TokenState,
    /// Introspection endpoint state.
    pub introspection: IntrospectionState,
    /// Bearer auth state for protected routes.
    pub auth: AuthState,
}

impl AppState {
    /// Builds the full auth pipeline from configuration.
    ///
    /// # Errors
    /// Returns an error when the signing key cannot be constructed from
    /// the configured material.
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let signing_key = config.build_signing_key()?;
        let verification_key = signing_key.verification_key();
        let jwt = Arc::new(JwtService::new(signing_key));
        let registry = Arc::new(config.build_registry());

        if registry.is_empty() {
            tracing::warn!("No clients configured; every token request will fail");
        }

        let issuer_config = IssuerConfig::new(&config.issuer, &config.audience)
            .with_allowed_scopes(config.allowed_scopes.clone())
            .with_default_scope(&config.default_scope)
            .with_token_lifetime(time::Duration::seconds(
                i64::try_from(config.token_lifetime.as_secs()).unwrap_or(3600),
            ));
        let issuer = Arc::new(TokenIssuer::new(issuer_config, registry, jwt.clone()));

        let validator = Arc::new(
            TokenValidator::new(verification_key, &config.issuer, &config.audience)
                .with_clock_skew(time::Duration::seconds(
                    i64::try_from(config.clock_skew.as_secs()).unwrap_or(60),
                )),
        );
        let introspector = Arc::new(Introspector::new(validator.clone()));

        Ok(Self {
            token: TokenState::new(issuer),
            introspection: IntrospectionState::new(introspector),
            auth: AuthState::new(validator),
        })
    }
}

impl FromRef<AppState> for TokenState {
    fn from_ref(state: &AppState) -> Self {
        state.token.clone()
    }
}

impl FromRef<AppState> for IntrospectionState {
    fn from_ref(state: &AppState) -> Self {
        state.introspection.clone()
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
