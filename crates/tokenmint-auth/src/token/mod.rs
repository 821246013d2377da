//! Token issuance, validation, and introspection.
//!
//! - [`jwt`] - Signing keys, claims, and JWT encoding
//! - [`issuer`] - Client-credentials token issuance
//! - [`validator`] - Stateless token validation
//! - [`introspection`] - RFC 7662 style introspection

pub mod introspection;
pub mod issuer;
pub mod jwt;
pub mod validator;

pub use introspection::{IntrospectionRequest, IntrospectionResponse, Introspector};
pub use issuer::{IssuerConfig, TokenIssuer};
pub use jwt::{AccessTokenClaims, JwtError, JwtService, SigningAlgorithm, SigningKey, VerificationKey};
pub use validator::{TokenValidator, ValidationError};
