use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::ReceivedClaims;
use super::errors::TokenError;
use crate::config::SecurityConfig;
use crate::config::SignatureAlgorithm;

/// Signs and verifies bearer tokens carrying a subject and an expiration.
///
/// The algorithm is fixed at construction. Verification accepts exactly
/// that algorithm, so a token whose header names any other one (including
/// `none`) never reaches signature checking.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from a secret and an HMAC algorithm.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `algorithm` - Algorithm used for signing and pinned for verification
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes)
    /// - Rotating the secret invalidates every token issued before
    pub fn new(secret: &[u8], algorithm: SignatureAlgorithm) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: algorithm.into(),
        }
    }

    /// Create a codec from the security configuration.
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(config.secret_key.as_bytes(), config.algorithm)
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Already stringified user identifier
    /// * `ttl` - Token lifetime; zero and negative values are not rejected
    ///
    /// # Returns
    /// Compact JWS string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        self.encode(&Claims::new(subject, ttl))
    }

    /// Sign an already built claim set.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token
    ///
    /// # Returns
    /// The subject and expiration the token was issued with
    ///
    /// # Errors
    /// * `Malformed` - Not a well-formed signed token, or unexpected claims
    /// * `InvalidSignature` - Signature mismatch or non-pinned algorithm
    /// * `Expired` - `exp` lies in the past
    /// * `MissingSubject` - Valid token without `sub`
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<ReceivedClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| classify(e.kind()))?;

        let ReceivedClaims { sub, exp } = token_data.claims;
        let sub = sub.ok_or(TokenError::MissingSubject)?;

        Ok(Claims { sub, exp })
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::MissingRequiredClaim(claim) => {
            TokenError::Malformed(format!("missing required claim: {}", claim))
        }
        ErrorKind::InvalidToken => TokenError::Malformed("not a signed token".to_string()),
        ErrorKind::Base64(e) => TokenError::Malformed(e.to_string()),
        ErrorKind::Json(e) => TokenError::Malformed(e.to_string()),
        ErrorKind::Utf8(e) => TokenError::Malformed(e.to_string()),
        other => TokenError::Malformed(format!("{:?}", other)),
    }
}
