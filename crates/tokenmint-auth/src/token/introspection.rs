//! Token introspection (RFC 7662 subset).
//!
//! Introspection is a thin wrapper over the validator: a valid token
//! yields an active response carrying its claims; any validation
//! failure, whatever the reason, yields `{"active": false}` and nothing
//! else. The failure reason is logged server-side but never surfaced to
//! the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::token::validator::TokenValidator;

/// Introspection request body.
#[derive(Debug, Clone, Deserialize)]
pub struct IntrospectionRequest {
    /// The token to introspect.
    pub token: String,
}

/// Introspection response (RFC 7662 Section 2.2).
///
/// For an inactive token every field except `active` is omitted, so the
/// serialized response is exactly `{"active":false}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    /// Whether the token is currently active.
    pub active: bool,

    /// Space-separated granted scopes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// OAuth client ID the token was issued to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Subject of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Vec<String>>,

    /// Issuer of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Expiration time (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at time (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// JWT ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Token type, "Bearer" for active tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl IntrospectionResponse {
    /// Creates an inactive response with no other fields set.
    #[must_use]
    pub fn inactive() -> Self {
        Self {
            active: false,
            scope: None,
            client_id: None,
            sub: None,
            aud: None,
            iss: None,
            exp: None,
            iat: None,
            jti: None,
            token_type: None,
        }
    }

    /// Creates an active response from validated claims.
    #[must_use]
    pub fn active(claims: &crate::token::jwt::AccessTokenClaims) -> Self {
        Self {
            active: true,
            scope: Some(claims.scope.clone()),
            client_id: Some(claims.client_id.clone()),
            sub: Some(claims.sub.clone()),
            aud: Some(claims.aud.clone()),
            iss: Some(claims.iss.clone()),
            exp: Some(claims.exp),
            iat: Some(claims.iat),
            jti: Some(claims.jti.clone()),
            token_type: Some("Bearer".to_string()),
        }
    }
}

/// Answers introspection queries against a validator.
pub struct Introspector {
    validator: Arc<TokenValidator>,
}

impl Introspector {
    /// Creates a new introspector.
    #[must_use]
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }

    /// Introspects a token. Infallible by construction: validation
    /// failures collapse into the inactive response.
    #[must_use]
    pub fn introspect(&self, token: &str) -> IntrospectionResponse {
        match self.validator.validate(token) {
            Ok(claims) => IntrospectionResponse::active(&claims),
            Err(reason) => {
                debug!(reason = reason.as_str(), "Introspected token is inactive");
                IntrospectionResponse::inactive()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::jwt::{AccessTokenClaims, JwtService, SigningKey};

    const TEST_SECRET: &[u8] = b"ThisIsA32CharacterLongSecretKey!";
    const ISSUER: &str = "https://auth.example.com";
    const AUDIENCE: &str = "api-server";

    fn setup() -> (JwtService, Introspector) {
        let service = JwtService::new(SigningKey::from_secret(TEST_SECRET).unwrap());
        let validator = Arc::new(TokenValidator::new(
            service.verification_key(),
            ISSUER,
            AUDIENCE,
        ));
        (service, Introspector::new(validator))
    }

    #[test]
    fn test_active_token_carries_claims() {
        let (service, introspector) = setup();
        let claims = AccessTokenClaims::builder(ISSUER, "service-client-1")
            .audience(vec![AUDIENCE.to_string()])
            .scope("read:data")
            .build();
        let token = service.encode(&claims).unwrap();

        let response = introspector.introspect(&token);
        assert!(response.active);
        assert_eq!(response.client_id.as_deref(), Some("service-client-1"));
        assert_eq!(response.scope.as_deref(), Some("read:data"));
        assert_eq!(response.iss.as_deref(), Some(ISSUER));
        assert_eq!(response.exp, Some(claims.exp));
        assert_eq!(response.jti.as_deref(), Some(claims.jti.as_str()));
        assert_eq!(response.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn test_invalid_tokens_are_inactive() {
        let (service, introspector) = setup();

        // Malformed.
        assert!(!introspector.introspect("garbage").active);

        // Expired.
        let expired = AccessTokenClaims::builder(ISSUER, "svc")
            .audience(vec![AUDIENCE.to_string()])
            .expires_in_seconds(-120)
            .build();
        let token = service.encode(&expired).unwrap();
        assert!(!introspector.introspect(&token).active);

        // Wrong issuer.
        let foreign = AccessTokenClaims::builder("https://other.example.com", "svc")
            .audience(vec![AUDIENCE.to_string()])
            .build();
        let token = service.encode(&foreign).unwrap();
        assert!(!introspector.introspect(&token).active);
    }

    #[test]
    fn test_inactive_response_is_exactly_active_false() {
        // No field besides `active` may leak for a failed token.
        let (_, introspector) = setup();
        let response = introspector.introspect("not.a.token");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"active":false}"#);
    }

    #[test]
    fn test_tampered_token_is_inactive() {
        let (service, introspector) = setup();
        let claims = AccessTokenClaims::builder(ISSUER, "svc")
            .audience(vec![AUDIENCE.to_string()])
            .build();
        let token = service.encode(&claims).unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert!(!introspector.introspect(&tampered).active);
    }
}
