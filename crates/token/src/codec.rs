//! Compact HS256 token codec
//!
//! Tokens use the familiar `header.claims.signature` layout, each segment
//! base64url-encoded without padding. Only HS256 is ever accepted: the
//! algorithm named in a presented header is checked against the pinned
//! value before the signature is looked at, so a token cannot pick its own
//! (weaker, stronger or no-op) algorithm.

use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use capstore_config::AuthorityConfig;
use capstore_core::{
    Error, Operation, Result, SigningKey, MAX_TOKEN_LENGTH, OBJECT_RESOURCE_TYPE,
    TOKEN_ALGORITHM, TOKEN_TYPE,
};
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// Issues capability tokens
pub trait TokenIssuer: Send + Sync {
    /// Sign a token granting `operation` on `name`, bound to `issuer`
    fn issue(&self, operation: Operation, name: &str, issuer: &str) -> Result<String>;
}

/// Verifies capability tokens
pub trait TokenVerifier: Send + Sync {
    /// Check signature, temporal window and issuer, returning the claims
    fn verify(&self, token: &str, expected_issuer: &str) -> Result<Claims>;
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenHeader {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

/// HMAC-SHA256 codec backed by one shared key.
///
/// Implements both [`TokenIssuer`] and [`TokenVerifier`]; callers hold it
/// through whichever of the two capabilities they need.
pub struct HmacTokenCodec<C = SystemClock> {
    key: SigningKey,
    lifetime_secs: i64,
    clock: C,
}

impl HmacTokenCodec<SystemClock> {
    pub fn new(key: SigningKey, lifetime: Duration) -> Self {
        Self::with_clock(key, lifetime, SystemClock)
    }

    pub fn from_config(config: &AuthorityConfig) -> Self {
        Self::new(config.signing_key.clone(), config.token_lifetime)
    }
}

impl<C: Clock> HmacTokenCodec<C> {
    pub fn with_clock(key: SigningKey, lifetime: Duration, clock: C) -> Self {
        Self {
            key,
            lifetime_secs: i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX),
            clock,
        }
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(self.key.as_bytes())
            .map_err(|e| Error::configuration(format!("unusable signing key: {e}")))
    }
}

impl<C: Clock> TokenIssuer for HmacTokenCodec<C> {
    fn issue(&self, operation: Operation, name: &str, issuer: &str) -> Result<String> {
        let now = self.clock.now();
        let claims = Claims {
            resource_type: OBJECT_RESOURCE_TYPE.to_string(),
            operation,
            name: name.to_string(),
            iss: issuer.to_string(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(self.lifetime_secs),
        };
        let header = TokenHeader {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: Some(TOKEN_TYPE.to_string()),
        };

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }
}

impl<C: Clock> TokenVerifier for HmacTokenCodec<C> {
    fn verify(&self, token: &str, expected_issuer: &str) -> Result<Claims> {
        // Bound the work done on hostile input before any decoding
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::malformed_token(format!(
                "token exceeds {MAX_TOKEN_LENGTH} bytes"
            )));
        }

        let mut segments = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(Error::malformed_token(
                "expected three dot-separated segments",
            ));
        };

        let header: TokenHeader = decode_segment(header_b64, "header")?;
        if header.alg != TOKEN_ALGORITHM {
            return Err(Error::invalid_signature(format!(
                "algorithm '{}' is not allowed",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| Error::invalid_signature("signature is not base64url"))?;
        let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| Error::invalid_signature("signature does not match"))?;

        let claims: Claims = decode_segment(claims_b64, "claims")?;

        let now = self.clock.now();
        if !claims.is_valid_at(now) {
            return Err(if now < claims.nbf {
                Error::NotYetValid {
                    not_before: claims.nbf,
                }
            } else {
                Error::Expired {
                    expired_at: claims.exp,
                }
            });
        }
        if claims.iss != expected_issuer {
            return Err(Error::issuer_mismatch(expected_issuer, &claims.iss));
        }
        if claims.resource_type != OBJECT_RESOURCE_TYPE {
            return Err(Error::malformed_token(format!(
                "unexpected resource type '{}'",
                claims.resource_type
            )));
        }

        Ok(claims)
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str, what: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| Error::malformed_token(format!("{what} is not base64url")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::malformed_token(format!("{what} is not valid JSON: {e}")))
}
