//! Bearer token payload decoding.
//!
//! Only the self-asserted `exp` claim is read. No signature verification is
//! done here; the backend rejects forged or expired tokens with 401 on use.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

/// Standard alphabet, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
/// URL-safe alphabet (RFC 7519 tokens), padding optional.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Why a token could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token must have 3 dot-separated segments, found {0}")]
    Shape(usize),

    #[error("token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not a claims object: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Claims this client reads from the token payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch.
    pub exp: f64,
}

impl TokenClaims {
    /// `exp` lies strictly after `now_secs`. A NaN on either side is invalid.
    #[must_use]
    pub fn is_valid_at(&self, now_secs: f64) -> bool {
        self.exp > now_secs
    }
}

/// Decode the payload segment of `header.payload.signature`.
///
/// # Errors
///
/// Returns [`TokenError`] when the token does not have exactly three
/// segments, the payload is not base64, or it lacks a numeric `exp`.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(TokenError::Shape(segments.len()));
    };
    let bytes = STANDARD_LENIENT
        .decode(payload)
        .or_else(|_| URL_SAFE_LENIENT.decode(payload))?;
    Ok(serde_json::from_slice(&bytes)?)
}
