//! # tokenmint-auth
//!
//! OAuth 2.0 client-credentials authorization for the tokenmint server.
//!
//! This crate provides:
//! - Token issuance for the `client_credentials` grant
//! - Stateless JWT validation (HS256 and RS256)
//! - Token introspection (RFC 7662 subset)
//! - Bearer-token middleware with scope-based policy
//!
//! ## Overview
//!
//! Machine clients authenticate against an in-memory registry and receive
//! signed, scoped, time-bounded access tokens. A companion validator checks
//! signature, issuer, audience, and lifetime against an explicit algorithm
//! allow-list; both the resource guard and the introspection endpoint are
//! thin callers of that validator.
//!
//! ## Modules
//!
//! - [`config`] - Authentication configuration
//! - [`registry`] - In-memory client registry
//! - [`scope`] - Scope negotiation and checks
//! - [`oauth`] - Token endpoint wire types
//! - [`token`] - Token issuance, validation, and introspection
//! - [`middleware`] - Bearer-token extraction and scope enforcement
//! - [`http`] - Axum handlers for the OAuth endpoints

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod oauth;
pub mod registry;
pub mod scope;
pub mod token;

pub use config::{AuthConfig, ClientEntry, ConfigError, SigningConfig};
pub use error::AuthError;
pub use http::{
    IntrospectionState, TokenState, introspect_handler, token_handler,
};
pub use middleware::{AuthContext, AuthState, BearerAuth};
pub use oauth::{TokenError, TokenErrorCode, TokenRequest, TokenResponse};
pub use registry::{Client, ClientRegistry};
pub use token::introspection::{IntrospectionRequest, IntrospectionResponse, Introspector};
pub use token::issuer::{IssuerConfig, TokenIssuer};
pub use token::jwt::{
    AccessTokenClaims, JwtError, JwtService, SigningAlgorithm, SigningKey, VerificationKey,
};
pub use token::validator::{TokenValidator, ValidationError};

/// Type alias for authentication/authorization results.
pub type AuthResult<T> = Result<T, AuthError>;
