//! Client-credentials token issuance.
//!
//! The issuer ties the client registry, scope negotiation, and the JWT
//! service together. Request checks run in a fixed order so a request
//! failing several checks always reports the same error: grant type
//! first, then parameter presence, then client authentication.

use std::sync::Arc;

use time::Duration;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::oauth::{TokenRequest, TokenResponse};
use crate::registry::ClientRegistry;
use crate::scope;
use crate::token::jwt::{AccessTokenClaims, JwtService};
use crate::AuthResult;

/// The only grant type this issuer supports.
pub const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Issuance parameters.
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// Issuer identifier embedded in the `iss` claim.
    pub issuer: String,

    /// Audience embedded in the `aud` claim.
    pub audience: String,

    /// Scopes this server is willing to grant, in canonical order.
    pub allowed_scopes: Vec<String>,

    /// Scope used when the request names none.
    pub default_scope: String,

    /// Access token lifetime.
    pub token_lifetime: Duration,
}

impl IssuerConfig {
    /// Creates a config with a 1 hour token lifetime.
    #[must_use]
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            allowed_scopes: vec!["read:data".to_string(), "write:data".to_string()],
            default_scope: "read:data".to_string(),
            token_lifetime: Duration::hours(1),
        }
    }

    /// Sets the allowed scopes.
    #[must_use]
    pub fn with_allowed_scopes(mut self, scopes: Vec<String>) -> Self {
        self.allowed_scopes = scopes;
        self
    }

    /// Sets the default scope.
    #[must_use]
    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = scope.into();
        self
    }

    /// Sets the token lifetime.
    #[must_use]
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }
}

/// Issues access tokens for the `client_credentials` grant.
///
/// Thread-safe; share via `Arc` across request handlers.
pub struct TokenIssuer {
    config: IssuerConfig,
    registry: Arc<ClientRegistry>,
    jwt: Arc<JwtService>,
}

impl TokenIssuer {
    /// Creates a new token issuer.
    #[must_use]
    pub fn new(config: IssuerConfig, registry: Arc<ClientRegistry>, jwt: Arc<JwtService>) -> Self {
        Self {
            config,
            registry,
            jwt,
        }
    }

    /// Returns the issuer configuration.
    #[must_use]
    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Handles a token request end to end.
    ///
    /// # Errors
    /// - [`AuthError::UnsupportedGrantType`] for any grant other than
    ///   `client_credentials`
    /// - [`AuthError::InvalidRequest`] when `client_id` or
    ///   `client_secret` is missing
    /// - [`AuthError::InvalidClient`] when authentication fails; unknown
    ///   client and wrong secret produce the identical error
    /// - [`AuthError::Internal`] when token encoding fails
    pub fn issue(&self, request: &TokenRequest) -> AuthResult<TokenResponse> {
        if request.grant_type != GRANT_CLIENT_CREDENTIALS {
            warn!(grant_type = %request.grant_type, "Rejected unsupported grant type");
            return Err(AuthError::unsupported_grant_type(&request.grant_type));
        }

        let (Some(client_id), Some(client_secret)) =
            (request.client_id.as_deref(), request.client_secret.as_deref())
        else {
            return Err(AuthError::invalid_request(
                "client_id and client_secret are required",
            ));
        };

        if !self.registry.verify_secret(client_id, client_secret) {
            warn!(client_id = %client_id, "Client authentication failed");
            return Err(AuthError::invalid_client("Invalid client credentials"));
        }

        let granted = scope::negotiate(
            request.scope.as_deref(),
            &self.config.allowed_scopes,
            &self.config.default_scope,
        );

        let lifetime_seconds = self.config.token_lifetime.whole_seconds();
        let claims = AccessTokenClaims::builder(&self.config.issuer, client_id)
            .audience(vec![self.config.audience.clone()])
            .expires_in_seconds(lifetime_seconds)
            .scope(granted.clone())
            .build();

        let token = self
            .jwt
            .encode(&claims)
            .map_err(|e| AuthError::internal(format!("Token encoding failed: {e}")))?;

        debug!(
            client_id = %client_id,
            scope = %granted,
            jti = %claims.jti,
            expires_in = lifetime_seconds,
            "Issued access token"
        );

        #[allow(clippy::cast_sign_loss)]
        Ok(TokenResponse::new(token, lifetime_seconds as u64, granted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Client;
    use crate::token::jwt::SigningKey;
    use crate::token::validator::TokenValidator;

    const TEST_SECRET: &[u8] = b"ThisIsA32CharacterLongSecretKey!";
    const ISSUER: &str = "https://auth.example.com";
    const AUDIENCE: &str = "api-server";

    fn issuer() -> TokenIssuer {
        let registry = Arc::new(ClientRegistry::new([
            Client::new("service-client-1", "secret123"),
            Client::new("batch-processor", "batchSecret456"),
        ]));
        let jwt = Arc::new(JwtService::new(SigningKey::from_secret(TEST_SECRET).unwrap()));
        TokenIssuer::new(IssuerConfig::new(ISSUER, AUDIENCE), registry, jwt)
    }

    fn request(client_id: &str, client_secret: &str, scope: Option<&str>) -> TokenRequest {
        TokenRequest {
            grant_type: GRANT_CLIENT_CREDENTIALS.to_string(),
            client_id: Some(client_id.to_string()),
            client_secret: Some(client_secret.to_string()),
            scope: scope.map(String::from),
        }
    }

    #[test]
    fn test_issues_validatable_token() {
        let issuer = issuer();
        let response = issuer
            .issue(&request("service-client-1", "secret123", Some("read:data write:data")))
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
        assert_eq!(response.scope, "read:data write:data");

        let validator = TokenValidator::new(issuer.jwt.verification_key(), ISSUER, AUDIENCE);
        let claims = validator.validate(&response.access_token).unwrap();
        assert_eq!(claims.client_id, "service-client-1");
        assert_eq!(claims.sub, "service-client-1");
        assert_eq!(claims.scope, "read:data write:data");
        assert_eq!(claims.aud, vec![AUDIENCE.to_string()]);
    }

    #[test]
    fn test_unsupported_grant_type() {
        let err = issuer()
            .issue(&TokenRequest {
                grant_type: "password".to_string(),
                client_id: Some("service-client-1".to_string()),
                client_secret: Some("secret123".to_string()),
                scope: None,
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedGrantType { .. }));
    }

    #[test]
    fn test_missing_credentials_is_invalid_request() {
        let issuer = issuer();

        let err = issuer
            .issue(&TokenRequest {
                grant_type: GRANT_CLIENT_CREDENTIALS.to_string(),
                client_id: None,
                client_secret: Some("secret123".to_string()),
                scope: None,
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRequest { .. }));

        let err = issuer
            .issue(&TokenRequest {
                grant_type: GRANT_CLIENT_CREDENTIALS.to_string(),
                client_id: Some("service-client-1".to_string()),
                client_secret: None,
                scope: None,
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRequest { .. }));
    }

    #[test]
    fn test_grant_type_checked_before_credentials() {
        // A bad grant type wins even when credentials are also missing.
        let err = issuer()
            .issue(&TokenRequest {
                grant_type: "authorization_code".to_string(),
                client_id: None,
                client_secret: None,
                scope: None,
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedGrantType { .. }));
    }

    #[test]
    fn test_unknown_client_and_wrong_secret_indistinguishable() {
        let issuer = issuer();

        let unknown = issuer
            .issue(&request("ghost", "secret123", None))
            .unwrap_err();
        let wrong = issuer
            .issue(&request("service-client-1", "wrong", None))
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, AuthError::InvalidClient { .. }));
        assert!(matches!(wrong, AuthError::InvalidClient { .. }));
    }

    #[test]
    fn test_default_scope_when_none_requested() {
        let response = issuer()
            .issue(&request("batch-processor", "batchSecret456", None))
            .unwrap();
        assert_eq!(response.scope, "read:data");
    }

    #[test]
    fn test_unknown_scopes_silently_dropped() {
        let response = issuer()
            .issue(&request("service-client-1", "secret123", Some("read:data admin")))
            .unwrap();
        assert_eq!(response.scope, "read:data");
    }

    #[test]
    fn test_no_overlap_yields_empty_scope_grant() {
        let response = issuer()
            .issue(&request("service-client-1", "secret123", Some("admin")))
            .unwrap();
        assert_eq!(response.scope, "");
    }

    #[test]
    fn test_custom_lifetime() {
        let registry = Arc::new(ClientRegistry::new([Client::new("svc", "topSecretValue1234")]));
        let jwt = Arc::new(JwtService::new(SigningKey::from_secret(TEST_SECRET).unwrap()));
        let config = IssuerConfig::new(ISSUER, AUDIENCE).with_token_lifetime(Duration::minutes(5));
        let issuer = TokenIssuer::new(config, registry, jwt);

        let response = issuer
            .issue(&request("svc", "topSecretValue1234", None))
            .unwrap();
        assert_eq!(response.expires_in, 300);
    }
}
