//! JWT signing keys, claims, and encoding.
//!
//! This module is the cryptographic boundary of the token service. It
//! supports one symmetric algorithm (HS256) and one asymmetric algorithm
//! (RS256, 2048-bit keys), wraps the key material for signing and
//! verification, and defines the access token claim set.
//!
//! ## Example
//!
//! ```ignore
//! use tokenmint_auth::token::jwt::{JwtService, SigningKey};
//!
//! let key = SigningKey::from_secret(b"ThisIsA32CharacterLongSecretKey!")?;
//! let service = JwtService::new(key);
//!
//! let token = service.encode(&claims)?;
//! ```

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Minimum length in bytes for HMAC secrets.
pub const MIN_HMAC_SECRET_LEN: usize = 32;

/// RSA key size in bits for generated key pairs.
const RSA_KEY_BITS: usize = 2048;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during key handling and token encoding.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to encode a token.
    #[error("Failed to encode token: {message}")]
    EncodingError {
        /// Description of the encoding error.
        message: String,
    },

    /// Failed to generate a cryptographic key.
    #[error("Key generation error: {message}")]
    KeyGenerationError {
        /// Description of the key generation error.
        message: String,
    },

    /// Invalid key format or data.
    #[error("Invalid key: {message}")]
    InvalidKey {
        /// Description of why the key is invalid.
        message: String,
    },
}

impl JwtError {
    /// Creates a new `EncodingError`.
    #[must_use]
    pub fn encoding_error(message: impl Into<String>) -> Self {
        Self::EncodingError {
            message: message.into(),
        }
    }

    /// Creates a new `KeyGenerationError`.
    #[must_use]
    pub fn key_generation_error(message: impl Into<String>) -> Self {
        Self::KeyGenerationError {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidKey` error.
    #[must_use]
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }
}

// ============================================================================
// Signing Algorithm
// ============================================================================

/// Supported signing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// HMAC with SHA-256 (symmetric).
    HS256,
    /// RSA with SHA-256 (asymmetric, 2048-bit minimum).
    RS256,
}

impl SigningAlgorithm {
    /// Converts to the `jsonwebtoken` Algorithm type.
    #[must_use]
    pub fn to_jwt_algorithm(self) -> Algorithm {
        match self {
            Self::HS256 => Algorithm::HS256,
            Self::RS256 => Algorithm::RS256,
        }
    }

    /// Returns the algorithm name as used in JWT headers.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::RS256 => "RS256",
        }
    }

    /// Returns `true` if this algorithm uses a shared secret.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Self::HS256)
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Token Claims
// ============================================================================

/// Access token claims.
///
/// Created once at issuance, embedded verbatim in the signed token, and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// Issuer (authorization server identifier).
    pub iss: String,

    /// Subject. For client_credentials the client is the subject.
    pub sub: String,

    /// Audience (resource server identifiers).
    pub aud: Vec<String>,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Not before (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// JWT ID, unique per issuance.
    pub jti: String,

    /// Space-separated granted scopes.
    pub scope: String,

    /// OAuth client ID.
    pub client_id: String,
}

impl AccessTokenClaims {
    /// Creates a new builder for access token claims.
    #[must_use]
    pub fn builder(issuer: impl Into<String>, client_id: impl Into<String>) -> AccessTokenClaimsBuilder {
        AccessTokenClaimsBuilder::new(issuer, client_id)
    }
}

/// Builder for `AccessTokenClaims`.
pub struct AccessTokenClaimsBuilder {
    iss: String,
    sub: String,
    aud: Vec<String>,
    exp: i64,
    iat: i64,
    nbf: Option<i64>,
    jti: String,
    scope: String,
    client_id: String,
}

impl AccessTokenClaimsBuilder {
    fn new(issuer: impl Into<String>, client_id: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let client_id = client_id.into();
        Self {
            iss: issuer.into(),
            sub: client_id.clone(),
            aud: Vec::new(),
            exp: now + 3600, // Default 1 hour
            iat: now,
            nbf: None,
            jti: uuid::Uuid::new_v4().to_string(),
            scope: String::new(),
            client_id,
        }
    }

    /// Sets the audience.
    #[must_use]
    pub fn audience(mut self, aud: Vec<String>) -> Self {
        self.aud = aud;
        self
    }

    /// Sets the expiration time in seconds from issuance.
    #[must_use]
    pub fn expires_in_seconds(mut self, seconds: i64) -> Self {
        self.exp = self.iat + seconds;
        self
    }

    /// Sets the not-before time.
    #[must_use]
    pub fn not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Sets the granted scopes.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Builds the access token claims.
    #[must_use]
    pub fn build(self) -> AccessTokenClaims {
        AccessTokenClaims {
            iss: self.iss,
            sub: self.sub,
            aud: self.aud,
            exp: self.exp,
            iat: self.iat,
            nbf: self.nbf,
            jti: self.jti,
            scope: self.scope,
            client_id: self.client_id,
        }
    }
}

// ============================================================================
// Key Material
// ============================================================================

/// A signing key for token issuance.
///
/// Holds both halves of the key: the encoding key for signing and the
/// matching decoding key, from which a [`VerificationKey`] can be split
/// off for verifiers that must not hold the private key.
pub struct SigningKey {
    /// Signing algorithm bound to this key.
    pub algorithm: SigningAlgorithm,

    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKey {
    /// Creates an HS256 signing key from a shared secret.
    ///
    /// # Errors
    /// Returns an error if the secret is shorter than 32 bytes.
    pub fn from_secret(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.len() < MIN_HMAC_SECRET_LEN {
            return Err(JwtError::invalid_key(format!(
                "HMAC secret must be at least {MIN_HMAC_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self {
            algorithm: SigningAlgorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// Generates a new RS256 key pair (2048-bit).
    ///
    /// # Errors
    /// Returns an error if key generation fails.
    pub fn generate_rsa() -> Result<Self, JwtError> {
        let private_key = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
            .map_err(|e| JwtError::key_generation_error(e.to_string()))?;

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| JwtError::key_generation_error(e.to_string()))?;

        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| JwtError::key_generation_error(e.to_string()))?;

        Self::from_rsa_pem(&private_pem, &public_pem)
    }

    /// Loads an RS256 key pair from PEM strings.
    ///
    /// # Errors
    /// Returns an error if the PEM data is invalid.
    pub fn from_rsa_pem(private_pem: &str, public_pem: &str) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .map_err(|e| JwtError::invalid_key(e.to_string()))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .map_err(|e| JwtError::invalid_key(e.to_string()))?;

        Ok(Self {
            algorithm: SigningAlgorithm::RS256,
            encoding_key,
            decoding_key,
        })
    }

    /// Splits off the verification half of this key.
    ///
    /// For HS256 this is the same secret; for RS256 it carries only the
    /// public key.
    #[must_use]
    pub fn verification_key(&self) -> VerificationKey {
        VerificationKey {
            algorithm: self.algorithm,
            decoding_key: self.decoding_key.clone(),
        }
    }
}

/// The verification half of a key, safe to hand to resource servers.
#[derive(Clone)]
pub struct VerificationKey {
    /// Signing algorithm this key verifies.
    pub algorithm: SigningAlgorithm,

    pub(crate) decoding_key: DecodingKey,
}

impl VerificationKey {
    /// Creates an HS256 verification key from the shared secret.
    ///
    /// # Errors
    /// Returns an error if the secret is shorter than 32 bytes.
    pub fn from_secret(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.len() < MIN_HMAC_SECRET_LEN {
            return Err(JwtError::invalid_key(format!(
                "HMAC secret must be at least {MIN_HMAC_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self {
            algorithm: SigningAlgorithm::HS256,
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// Creates an RS256 verification key from a public key PEM.
    ///
    /// # Errors
    /// Returns an error if the PEM data is invalid.
    pub fn from_rsa_public_pem(public_pem: &str) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .map_err(|e| JwtError::invalid_key(e.to_string()))?;

        Ok(Self {
            algorithm: SigningAlgorithm::RS256,
            decoding_key,
        })
    }
}

// ============================================================================
// JWT Service
// ============================================================================

/// Service for encoding claims into compact signed tokens.
///
/// Thread-safe (`Send + Sync`); share via `Arc` across handlers.
pub struct JwtService {
    signing_key: SigningKey,
}

impl JwtService {
    /// Creates a new JWT service around a signing key.
    #[must_use]
    pub fn new(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }

    /// Encodes claims into a compact JWT string.
    ///
    /// The header records the algorithm actually used, which validators
    /// re-check against their allow-list before any signature work.
    ///
    /// # Errors
    /// Returns an error if encoding fails.
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.signing_key.algorithm.to_jwt_algorithm());

        encode(&header, claims, &self.signing_key.encoding_key)
            .map_err(|e| JwtError::encoding_error(e.to_string()))
    }

    /// Returns the algorithm this service signs with.
    #[must_use]
    pub fn algorithm(&self) -> SigningAlgorithm {
        self.signing_key.algorithm
    }

    /// Returns the verification half of the signing key.
    #[must_use]
    pub fn verification_key(&self) -> VerificationKey {
        self.signing_key.verification_key()
    }
}

// ============================================================================
// Tests
// ============================================================================
