use chrono::Utc;
use serde_json::json;
use serde_json::Value;

use super::claims::Claims;
use super::errors::TokenError;
use super::key::SigningKey;
use crate::codec;
use crate::crypto::constant_time_eq;
use crate::crypto::hmac_sha256;

/// Signing algorithm advertised in every token header.
pub const ALGORITHM: &str = "HS256";

/// Token kind advertised in every token header.
pub const TOKEN_TYPE: &str = "JWT";

/// Default token lifetime (24 hours).
pub const DEFAULT_TTL_SECONDS: i64 = 60 * 60 * 24;

/// Issues and verifies compact HS256 tokens.
///
/// A token is `header.claims.signature`, each segment URL-safe base64 without
/// padding. The signature is HMAC-SHA256 over `header.claims` as sent on the
/// wire. Holds no state besides the key, so one signer can be shared across
/// any number of tasks.
#[derive(Debug, Clone)]
pub struct TokenSigner {
    key: SigningKey,
}

impl TokenSigner {
    /// Create a new signer for `key`.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(key: impl Into<SigningKey>) -> Self {
        Self { key: key.into() }
    }

    /// Issue a token for `claims` that expires `ttl_seconds` from now.
    ///
    /// Any `exp` already present in `claims` is overwritten. A negative TTL
    /// yields a token that is already expired.
    pub fn issue(&self, claims: Claims, ttl_seconds: i64) -> String {
        self.issue_at(claims, ttl_seconds, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds).
    pub fn issue_at(&self, mut claims: Claims, ttl_seconds: i64, now: i64) -> String {
        claims.set_expiration(now.saturating_add(ttl_seconds));

        let header = json!({ "alg": ALGORITHM, "typ": TOKEN_TYPE }).to_string();
        let payload = Value::Object(claims.into_map()).to_string();

        let header_segment = codec::encode(header);
        let claims_segment = codec::encode(payload);
        let signature = self.sign(&header_segment, &claims_segment);

        format!(
            "{}.{}.{}",
            header_segment,
            claims_segment,
            codec::encode(signature)
        )
    }

    /// Verify `token` against the current time.
    ///
    /// # Errors
    /// * `MalformedToken` - Wrong segment count, bad encoding or unparsable claims
    /// * `BadSignature` - Signature does not match the key
    /// * `Expired` - `exp` is in the past
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify `token` as if the current time were `now` (Unix seconds).
    ///
    /// Tokens without an `exp` claim never expire. Tokens issued here always
    /// carry one.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let (header_segment, claims_segment, signature_segment) = split_segments(token)?;

        let expected = self.sign(header_segment, claims_segment);
        let signature = codec::decode(signature_segment)
            .map_err(|e| TokenError::MalformedToken(format!("signature segment: {}", e)))?;

        if !constant_time_eq(&expected, &signature) {
            return Err(TokenError::BadSignature);
        }

        let claims = decode_claims(claims_segment)?;

        if !claims.contains(Claims::EXPIRATION) {
            return Ok(claims);
        }

        let exp = claims
            .expiration()
            .ok_or_else(|| TokenError::MalformedToken("exp claim is not numeric".to_string()))?;

        if exp < now {
            return Err(TokenError::Expired { exp, now });
        }

        Ok(claims)
    }

    /// Decode claims without checking the signature or expiry.
    ///
    /// # Security Warning
    /// Only use for logging or debugging. Never trust claims from this
    /// method for authorization decisions.
    pub fn decode_unverified(&self, token: &str) -> Result<Claims, TokenError> {
        let (_, claims_segment, _) = split_segments(token)?;
        decode_claims(claims_segment)
    }

    fn sign(&self, header_segment: &str, claims_segment: &str) -> [u8; 32] {
        let signing_input = format!("{}.{}", header_segment, claims_segment);
        hmac_sha256(self.key.as_bytes(), signing_input.as_bytes())
    }
}

fn split_segments(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let mut segments = token.split('.');

    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(header), Some(claims), Some(signature), None)
            if !header.is_empty() && !claims.is_empty() && !signature.is_empty() =>
        {
            Ok((header, claims, signature))
        }
        _ => Err(TokenError::MalformedToken(
            "expected three non-empty segments".to_string(),
        )),
    }
}

fn decode_claims(claims_segment: &str) -> Result<Claims, TokenError> {
    let bytes = codec::decode(claims_segment)
        .map_err(|e| TokenError::MalformedToken(format!("claims segment: {}", e)))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(Claims::from(map)),
        Ok(_) => Err(TokenError::MalformedToken(
            "claims segment is not a JSON object".to_string(),
        )),
        Err(e) => Err(TokenError::MalformedToken(format!("claims segment: {}", e))),
    }
}
