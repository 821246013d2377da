//! Token introspection endpoint handler (RFC 7662 subset).
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, routing::post};
//! use tokenmint_auth::http::introspect_handler;
//!
//! let app = Router::new()
//!     .route("/oauth/introspect", post(introspect_handler))
//!     .with_state(introspection_state);
//! ```
//!
//! # Request Format
//!
//! ```text
//! POST /oauth/introspect
//! Content-Type: application/json
//!
//! {"token": "<token_to_introspect>"}
//! ```
//!
//! # Security
//!
//! The endpoint never reveals why a token is inactive: every failure
//! collapses into `{"active": false}` with status 200.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::token::introspection::{IntrospectionRequest, Introspector};

/// State required for the introspection endpoint.
#[derive(Clone)]
pub struct IntrospectionState {
    /// Introspector answering queries.
    pub introspector: Arc<Introspector>,
}

impl IntrospectionState {
    /// Creates a new introspection state.
    #[must_use]
    pub fn new(introspector: Arc<Introspector>) -> Self {
        Self { introspector }
    }
}

/// Token introspection endpoint handler.
///
/// Always answers 200 with a JSON body; an inactive token yields exactly
/// `{"active": false}`.
pub async fn introspect_handler(
    State(state): State<IntrospectionState>,
    Json(request): Json<IntrospectionRequest>,
) -> impl IntoResponse {
    let response = state.introspector.introspect(&request.token);
    tracing::debug!(active = response.active, "Token introspection completed");
    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::jwt::{AccessTokenClaims, JwtService, SigningKey};
    use crate::token::validator::TokenValidator;
    use axum::body::to_bytes;

    const TEST_SECRET: &[u8] = b"ThisIsA32CharacterLongSecretKey!";
    const ISSUER: &str = "https://auth.example.com";
    const AUDIENCE: &str = "api-server";

    fn setup() -> (JwtService, IntrospectionState) {
        let service = JwtService::new(SigningKey::from_secret(TEST_SECRET).unwrap());
        let validator = Arc::new(TokenValidator::new(
            service.verification_key(),
            ISSUER,
            AUDIENCE,
        ));
        let state = IntrospectionState::new(Arc::new(Introspector::new(validator)));
        (service, state)
    }

    #[tokio::test]
    async fn test_active_token() {
        let (service, state) = setup();
        let claims = AccessTokenClaims::builder(ISSUER, "service-client-1")
            .audience(vec![AUDIENCE.to_string()])
            .scope("read:data")
            .build();
        let token = service.encode(&claims).unwrap();

        let response = introspect_handler(
            State(state),
            Json(IntrospectionRequest { token }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["active"], true);
        assert_eq!(json["client_id"], "service-client-1");
        assert_eq!(json["scope"], "read:data");
    }

    #[tokio::test]
    async fn test_invalid_token_is_200_inactive() {
        let (_, state) = setup();

        let response = introspect_handler(
            State(state),
            Json(IntrospectionRequest {
                token: "garbage".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"active":false}"#);
    }
}
