//! Error response handling for authentication middleware.
//!
//! This module implements `IntoResponse` for `AuthError` so extractors
//! and handlers can fail with `?`. Responses carry an RFC 6749 style
//! JSON body; 401 and 403 responses additionally carry a
//! `WWW-Authenticate` header per RFC 6750.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthError;

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let oauth_error = self.oauth_error_code();
        let message = self.to_string();

        let body = json!({
            "error": oauth_error,
            "error_description": message,
        });

        let mut headers = HeaderMap::new();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let www_auth = build_www_authenticate_header(oauth_error, &message);
            if let Ok(value) = HeaderValue::from_str(&www_auth) {
                headers.insert(header::WWW_AUTHENTICATE, value);
            }
        }

        (status, headers, Json(body)).into_response()
    }
}

/// Maps an `AuthError` to its HTTP status code.
fn status_for(error: &AuthError) -> StatusCode {
    match error {
        AuthError::InvalidClient { .. } | AuthError::Unauthorized { .. } => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::InvalidRequest { .. } | AuthError::UnsupportedGrantType { .. } => {
            StatusCode::BAD_REQUEST
        }
        AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AuthError::Configuration { .. } | AuthError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Builds the WWW-Authenticate header value.
///
/// Format: `Bearer realm="tokenmint", error="invalid_token", error_description="..."`
fn build_www_authenticate_header(error: &str, description: &str) -> String {
    let escaped_desc = description.replace('\"', "\\\"");
    format!("Bearer realm=\"tokenmint\", error=\"{error}\", error_description=\"{escaped_desc}\"")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_unauthorized_response() {
        let error = AuthError::unauthorized("Missing Authorization header");
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let www_auth = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(www_auth.contains("Bearer"));
        assert!(www_auth.contains("realm=\"tokenmint\""));
        assert!(www_auth.contains("error=\"invalid_token\""));
    }

    #[tokio::test]
    async fn test_forbidden_response() {
        let error = AuthError::forbidden("Token lacks required scope 'write:data'");
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let www_auth = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(www_auth.contains("error=\"insufficient_scope\""));
    }

    #[tokio::test]
    async fn test_invalid_client_response() {
        let error = AuthError::invalid_client("Invalid client credentials");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_request_responses() {
        let error = AuthError::invalid_request("client_id and client_secret are required");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);

        let error = AuthError::unsupported_grant_type("password");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_server_error_response() {
        let error = AuthError::internal("Token encoding failed");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let error = AuthError::unauthorized("Token validation failed: expired");
        let response = error.into_response();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "invalid_token");
        assert!(
            json["error_description"]
                .as_str()
                .unwrap()
                .contains("expired")
        );
    }

    #[test]
    fn test_www_authenticate_header_escaping() {
        let header = build_www_authenticate_header("invalid_token", "Token contains \"quotes\"");
        assert!(header.contains("\\\"quotes\\\""));
    }
}
