//! OAuth 2.0 token endpoint handler.
//!
//! This module provides the HTTP handler for the token endpoint. Only
//! the `client_credentials` grant is supported.
//!
//! # Example
//!
//! ```ignore
//! POST /oauth/token
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=client_credentials
//! &client_id=service-client-1
//! &client_secret=secret123
//! &scope=read:data write:data
//! ```
//!
//! Clients may alternatively authenticate with an HTTP Basic header:
//! `Authorization: Basic <base64(client_id:client_secret)>`.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use base64::Engine;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::oauth::{TokenError, TokenErrorCode, TokenRequest, TokenResponse};
use crate::token::issuer::TokenIssuer;

/// State required for the token endpoint.
#[derive(Clone)]
pub struct TokenState {
    /// Issuer handling the client-credentials grant.
    pub issuer: Arc<TokenIssuer>,
}

impl TokenState {
    /// Creates a new token state.
    #[must_use]
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }
}

/// OAuth 2.0 token endpoint handler.
///
/// Handles POST requests with an `application/x-www-form-urlencoded`
/// body. Credentials come from the body or from an HTTP Basic header;
/// a Basic header takes precedence over body fields.
///
/// Responses, success and failure alike, carry `Cache-Control: no-store`
/// so tokens are never cached by intermediaries.
pub async fn token_handler(
    State(state): State<TokenState>,
    headers: HeaderMap,
    Form(mut request): Form<TokenRequest>,
) -> Response {
    debug!(
        grant_type = %request.grant_type,
        client_id = ?request.client_id,
        "Processing token request"
    );

    if let Some((client_id, client_secret)) = extract_basic_auth(&headers) {
        request.client_id = Some(client_id);
        request.client_secret = Some(client_secret);
    }

    match state.issuer.issue(&request) {
        Ok(response) => {
            info!(
                client_id = ?request.client_id,
                scope = %response.scope,
                "Token issued successfully"
            );
            token_success_response(response)
        }
        Err(e) => {
            warn!(
                client_id = ?request.client_id,
                grant_type = %request.grant_type,
                error = %e,
                "Token request failed"
            );
            token_error_response(e)
        }
    }
}

/// Extracts client credentials from an HTTP Basic Authorization header.
fn extract_basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let encoded = auth_str.strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let creds = String::from_utf8(decoded).ok()?;
    let (client_id, client_secret) = creds.split_once(':')?;
    Some((client_id.to_string(), client_secret.to_string()))
}

/// Builds a successful token response.
fn token_success_response(response: TokenResponse) -> Response {
    (
        StatusCode::OK,
        [
            ("Content-Type", "application/json"),
            ("Cache-Control", "no-store"),
            ("Pragma", "no-cache"),
        ],
        Json(response),
    )
        .into_response()
}

/// Builds an error response for the token endpoint.
fn token_error_response(error: AuthError) -> Response {
    let (code, description) = match &error {
        AuthError::InvalidClient { message } => (TokenErrorCode::InvalidClient, message.clone()),
        AuthError::InvalidRequest { message } => (TokenErrorCode::InvalidRequest, message.clone()),
        AuthError::UnsupportedGrantType { grant_type } => (
            TokenErrorCode::UnsupportedGrantType,
            format!("Grant type '{grant_type}' is not supported"),
        ),
        // Configuration and internal failures are not token errors.
        _ => return error.into_response(),
    };

    let token_error = TokenError::with_description(code, description);
    let status = match code.http_status() {
        401 => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_REQUEST,
    };

    (
        status,
        [
            ("Content-Type", "application/json"),
            ("Cache-Control", "no-store"),
            ("Pragma", "no-cache"),
        ],
        Json(token_error),
    )
        .into_response()
}
