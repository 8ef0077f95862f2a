// SPDX-License-Identifier: MIT

//! The authenticated actor and its persisted form.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// The authenticated actor, constructed by the session store from a decoded
/// token and published to the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Opaque identifier assigned by the backend
    pub id: String,
    /// Email address (may be absent from the token)
    pub email: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Role, resolved through the canonical table
    pub role: Role,
    /// Bearer access token, exactly as sent to the backend
    pub access_token: String,
    /// Opaque refresh token; carried through but never exercised here
    pub refresh_token: Option<String>,
    /// Access token expiry (Unix timestamp, from the `exp` claim)
    pub expires_at: i64,
}

impl Principal {
    /// Whether the embedded expiry has passed at `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// Persisted session record: the `userData` value in storage.
///
/// The record and the separately stored token must agree; the session store
/// discards both when they do not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SessionProfile>,
}

/// Cached profile fields nested inside the session record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
