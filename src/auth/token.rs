use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// The HMAC family. Tokens whose header names anything else are refused
/// before their signature is looked at.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user's id as a decimal string.
    #[serde(rename = "userID")]
    pub user_id: String,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration timestamp (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies HS256 bearer tokens.
///
/// Keys are derived once from the `AuthConfig`; the service is read-only after
/// construction and shared between workers behind an `Arc`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    has_secret: bool,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // iat and exp are optional in the claim shape; exp is still enforced when present.
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: config.token_ttl,
            has_secret: !secret.is_empty(),
        }
    }

    /// Signs a token for `user_id`, valid for the configured TTL.
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        if !self.has_secret {
            return Err(TokenError::MissingSecret);
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing(format!("token lifetime {} is out of range", self.ttl)))?;
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: Some(now.timestamp()),
            exp: Some(expires_at.timestamp()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies a token's algorithm, signature and expiry, and decodes its claims.
    ///
    /// Without a secret every token is refused; an empty HMAC key is public.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if !self.has_secret {
            return Err(TokenError::MissingSecret);
        }

        let algorithm = header_algorithm(token)?;
        let accepted = algorithm
            .parse::<Algorithm>()
            .map(|alg| ACCEPTED_ALGORITHMS.contains(&alg))
            .unwrap_or(false);
        if !accepted {
            return Err(TokenError::UnexpectedSigningMethod(algorithm));
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidAlgorithm => TokenError::UnexpectedSigningMethod(algorithm),
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

/// Reads the `alg` field of a compact JWT's header without trusting anything else in it.
///
/// `jsonwebtoken` cannot parse a header naming an algorithm it does not know
/// (such as `none`), so the header is decoded by hand here to tell those apart
/// from structurally broken tokens.
fn header_algorithm(token: &str) -> Result<String, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments[0].is_empty() {
        return Err(TokenError::Malformed("expected three segments".into()));
    }

    let raw = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|e| TokenError::Malformed(format!("header is not base64url: {}", e)))?;
    let header: serde_json::Value = serde_json::from_slice(&raw)
        .map_err(|e| TokenError::Malformed(format!("header is not JSON: {}", e)))?;

    header
        .get("alg")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| TokenError::Malformed("header has no alg".into()))
}
