//! Stateless token validation.
//!
//! The validator checks a compact token in a fixed order, and the first
//! failing check wins:
//!
//! 1. structure (three non-empty base64url segments, decodable header)
//! 2. algorithm allow-list (before any signature work)
//! 3. signature
//! 4. issuer
//! 5. audience
//! 6. lifetime (`exp`, and `nbf` when present), with clock skew
//!
//! Every failure is a [`ValidationError`] variant returned to the
//! caller; the validator never panics on malformed input and never
//! invokes callbacks. Callers inspect the result and decide.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Validation, decode};
use time::{Duration, OffsetDateTime};

use crate::token::jwt::{AccessTokenClaims, SigningAlgorithm, VerificationKey};

/// Reasons a token can fail validation.
///
/// The ordering of checks is part of the contract: for example, a token
/// with a disallowed algorithm *and* a bad signature reports
/// `InvalidAlgorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The token does not have the compact three-segment structure, or
    /// a segment cannot be decoded.
    #[error("Malformed token")]
    Malformed,

    /// The header declares an algorithm outside the allow-list.
    #[error("Algorithm not allowed")]
    InvalidAlgorithm,

    /// The signature does not verify under the supplied key.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The `iss` claim does not match the expected issuer.
    #[error("Invalid issuer")]
    InvalidIssuer,

    /// The `aud` claim does not contain the expected audience.
    #[error("Invalid audience")]
    InvalidAudience,

    /// The token has expired.
    #[error("Token expired")]
    Expired,

    /// The token's `nbf` claim lies in the future.
    #[error("Token not yet valid")]
    NotYetValid,
}

impl ValidationError {
    /// Returns the error name as a stable snake_case code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::InvalidAlgorithm => "invalid_algorithm",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidIssuer => "invalid_issuer",
            Self::InvalidAudience => "invalid_audience",
            Self::Expired => "expired",
            Self::NotYetValid => "not_yet_valid",
        }
    }
}

/// Stateless validator for access tokens.
///
/// Construction takes everything validation depends on (verification
/// key, expected issuer and audience, algorithm allow-list, clock skew)
/// so `validate` itself has no ambient inputs besides the clock.
pub struct TokenValidator {
    verification_key: VerificationKey,
    expected_issuer: String,
    expected_audience: String,
    allowed_algorithms: Vec<SigningAlgorithm>,
    clock_skew: Duration,
}

impl TokenValidator {
    /// Creates a validator with the key's own algorithm as the only
    /// allowed algorithm and a 60 second clock skew.
    #[must_use]
    pub fn new(
        verification_key: VerificationKey,
        expected_issuer: impl Into<String>,
        expected_audience: impl Into<String>,
    ) -> Self {
        let allowed_algorithms = vec![verification_key.algorithm];
        Self {
            verification_key,
            expected_issuer: expected_issuer.into(),
            expected_audience: expected_audience.into(),
            allowed_algorithms,
            clock_skew: Duration::seconds(60),
        }
    }

    /// Overrides the algorithm allow-list.
    #[must_use]
    pub fn with_allowed_algorithms(mut self, algorithms: Vec<SigningAlgorithm>) -> Self {
        self.allowed_algorithms = algorithms;
        self
    }

    /// Overrides the clock skew tolerance.
    #[must_use]
    pub fn with_clock_skew(mut self, skew: Duration) -> Self {
        self.clock_skew = skew;
        self
    }

    /// Returns the expected issuer.
    #[must_use]
    pub fn expected_issuer(&self) -> &str {
        &self.expected_issuer
    }

    /// Returns the expected audience.
    #[must_use]
    pub fn expected_audience(&self) -> &str {
        &self.expected_audience
    }

    /// Validates a compact token string.
    ///
    /// On success returns the claims exactly as they were embedded at
    /// issuance.
    ///
    /// # Errors
    /// Returns the first failing check as a [`ValidationError`].
    pub fn validate(&self, token: &str) -> Result<AccessTokenClaims, ValidationError> {
        self.validate_at(token, OffsetDateTime::now_utc())
    }

    /// Validates a token against an explicit point in time.
    ///
    /// # Errors
    /// Returns the first failing check as a [`ValidationError`].
    pub fn validate_at(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<AccessTokenClaims, ValidationError> {
        // 1. Structural check: exactly three non-empty segments.
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(ValidationError::Malformed);
        }

        // 2. Algorithm allow-list, checked on the raw header before any
        //    signature work. Parsing the header by hand keeps unknown
        //    algorithm names (e.g. "none") distinguishable from a
        //    structurally broken header.
        let algorithm = self.header_algorithm(segments[0])?;
        if !self.allowed_algorithms.contains(&algorithm) {
            return Err(ValidationError::InvalidAlgorithm);
        }

        // 3. Signature. Issuer/audience/lifetime checks are disabled here
        //    and performed explicitly below so the failure order stays
        //    deterministic and skew-aware.
        let mut validation = Validation::new(algorithm.to_jwt_algorithm());
        validation.validate_exp = false;
        validation.validate_aud = false;

        let claims = decode::<AccessTokenClaims>(
            token,
            &self.verification_key.decoding_key,
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => ValidationError::InvalidSignature,
            _ => ValidationError::Malformed,
        })?
        .claims;

        // 4. Issuer equality.
        if claims.iss != self.expected_issuer {
            return Err(ValidationError::InvalidIssuer);
        }

        // 5. Audience membership.
        if !claims.aud.iter().any(|a| a == &self.expected_audience) {
            return Err(ValidationError::InvalidAudience);
        }

        // 6. Lifetime, with skew applied on both bounds.
        let now = now.unix_timestamp();
        let skew = self.clock_skew.whole_seconds();
        if now > claims.exp + skew {
            return Err(ValidationError::Expired);
        }
        if let Some(nbf) = claims.nbf {
            if now < nbf - skew {
                return Err(ValidationError::NotYetValid);
            }
        }

        Ok(claims)
    }

    /// Decodes the header segment and extracts the declared algorithm.
    ///
    /// A header that cannot be decoded or lacks an `alg` string is
    /// malformed; a well-formed header naming an algorithm this service
    /// does not implement is an allow-list failure.
    fn header_algorithm(&self, header_segment: &str) -> Result<SigningAlgorithm, ValidationError> {
        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_segment)
            .map_err(|_| ValidationError::Malformed)?;
        let header: serde_json::Value =
            serde_json::from_slice(&header_bytes).map_err(|_| ValidationError::Malformed)?;

        let alg = header
            .get("alg")
            .and_then(serde_json::Value::as_str)
            .ok_or(ValidationError::Malformed)?;

        match alg {
            "HS256" => Ok(SigningAlgorithm::HS256),
            "RS256" => Ok(SigningAlgorithm::RS256),
            _ => Err(ValidationError::InvalidAlgorithm),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
