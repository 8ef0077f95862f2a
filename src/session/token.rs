// SPDX-License-Identifier: MIT

//! Client-side JWT claim inspection.
//!
//! The backend signs the token and is the only party that verifies it. This
//! side decodes the claims without a key, purely to restore session state,
//! so signature validation is deliberately disabled. Expiry is enforced by
//! the session store and the gate, not here, because they need to tell
//! "expired" apart from "malformed".

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims this client consumes from the access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Opaque principal id
    #[serde(default)]
    pub sub: Option<String>,
    /// Role name, resolved through the canonical table
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token decode failure. Every variant is recovered locally by the caller;
/// none of them propagate past the session store.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(#[from] jsonwebtoken::errors::Error),
}

/// Strip the JSON-quoting a stored token picks up from storage
/// round-tripping, plus stray whitespace.
pub fn unwrap_stored(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

/// Decode the embedded claims of an access token without verifying its
/// signature. A token missing the `exp` claim counts as malformed.
pub fn decode_claims(token: &str) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false; // the store distinguishes expired from malformed
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}
