//! Token endpoint wire types.
//!
//! Request, response, and error types for the OAuth 2.0 token endpoint.
//! Only the `client_credentials` grant is supported; the token endpoint
//! accepts a form-encoded body and answers with JSON per RFC 6749.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token request parameters.
///
/// Clients authenticate with `client_id` + `client_secret`, either in
/// the request body or via an HTTP Basic header (in which case the
/// handler copies the credentials into these fields before issuance).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    /// OAuth 2.0 grant type. Must be "client_credentials".
    pub grant_type: String,

    /// Client ID.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Client secret.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Requested scope (space-separated).
    #[serde(default)]
    pub scope: Option<String>,
}

/// Successful token response.
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "eyJhbG...",
///   "token_type": "Bearer",
///   "expires_in": 3600,
///   "scope": "read:data write:data"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The access token (JWT).
    pub access_token: String,

    /// Token type, always "Bearer".
    pub token_type: String,

    /// Access token lifetime in seconds.
    pub expires_in: u64,

    /// Granted scopes (space-separated).
    pub scope: String,
}

impl TokenResponse {
    /// Creates a new token response.
    #[must_use]
    pub fn new(access_token: String, expires_in: u64, scope: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            scope,
        }
    }
}

/// Token error response.
///
/// # Example Response
///
/// ```json
/// {
///   "error": "invalid_client"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TokenError {
    /// OAuth 2.0 error code.
    pub error: TokenErrorCode,

    /// Human-readable error description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl TokenError {
    /// Creates a new token error.
    #[must_use]
    pub fn new(error: TokenErrorCode) -> Self {
        Self {
            error,
            error_description: None,
        }
    }

    /// Creates a new token error with description.
    #[must_use]
    pub fn with_description(error: TokenErrorCode, description: impl Into<String>) -> Self {
        Self {
            error,
            error_description: Some(description.into()),
        }
    }
}

/// OAuth 2.0 token error codes (RFC 6749 Section 5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenErrorCode {
    /// The request is missing a required parameter or is otherwise
    /// malformed.
    InvalidRequest,

    /// Client authentication failed. Unknown client id and wrong secret
    /// produce the same code.
    InvalidClient,

    /// The authorization grant type is not supported by this server.
    UnsupportedGrantType,
}

impl TokenErrorCode {
    /// Returns the string representation of the error code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidClient => "invalid_client",
            Self::UnsupportedGrantType => "unsupported_grant_type",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidClient => 401,
            Self::InvalidRequest | Self::UnsupportedGrantType => 400,
        }
    }
}

impl fmt::Display for TokenErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_deserialization() {
        let json = r#"{
            "grant_type": "client_credentials",
            "client_id": "backend-service",
            "client_secret": "secret123",
            "scope": "read:data"
        }"#;

        let request: TokenRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.grant_type, "client_credentials");
        assert_eq!(request.client_id, Some("backend-service".to_string()));
        assert_eq!(request.client_secret, Some("secret123".to_string()));
        assert_eq!(request.scope, Some("read:data".to_string()));
    }

    #[test]
    fn test_token_request_optional_fields_default() {
        let json = r#"{"grant_type": "client_credentials"}"#;
        let request: TokenRequest = serde_json::from_str(json).unwrap();
        assert!(request.client_id.is_none());
        assert!(request.client_secret.is_none());
        assert!(request.scope.is_none());
    }

    #[test]
    fn test_token_response_serialization() {
        let response = TokenResponse::new(
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...".to_string(),
            3600,
            "read:data write:data".to_string(),
        );

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""token_type":"Bearer""#));
        assert!(json.contains(r#""expires_in":3600"#));
        assert!(json.contains(r#""scope":"read:data write:data""#));
    }

    #[test]
    fn test_token_error_serialization() {
        let error = TokenError::new(TokenErrorCode::InvalidClient);
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"error":"invalid_client"}"#);

        let error =
            TokenError::with_description(TokenErrorCode::InvalidRequest, "Missing client_id");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains(r#""error":"invalid_request""#));
        assert!(json.contains(r#""error_description":"Missing client_id""#));
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(TokenErrorCode::InvalidRequest.as_str(), "invalid_request");
        assert_eq!(TokenErrorCode::InvalidClient.as_str(), "invalid_client");
        assert_eq!(
            TokenErrorCode::UnsupportedGrantType.as_str(),
            "unsupported_grant_type"
        );
    }

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(TokenErrorCode::InvalidRequest.http_status(), 400);
        assert_eq!(TokenErrorCode::InvalidClient.http_status(), 401);
        assert_eq!(TokenErrorCode::UnsupportedGrantType.http_status(), 400);
    }
}
