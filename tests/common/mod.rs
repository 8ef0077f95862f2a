// SPDX-License-Identifier: MIT

//! Shared helpers for integration tests.
//!
//! The backend signs real tokens; tests forge structurally identical ones
//! with a throwaway secret, which the client accepts because it never
//! verifies signatures.

use std::sync::Arc;

use evshare_dashboard::storage::keys;
use evshare_dashboard::{MemoryStorage, SessionStorage, SessionStore};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Forge a token with the given role claim and expiry.
#[allow(dead_code)]
pub fn forge_token(role: &str, exp: i64) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({
            "sub": "user-1",
            "role": role,
            "email": "owner@evshare.example",
            "name": "Test Owner",
            "exp": exp,
        }),
        &EncodingKey::from_secret(b"not-the-backend-secret"),
    )
    .expect("Failed to forge test token")
}

/// Forge a token whose claims omit the role entirely.
#[allow(dead_code)]
pub fn forge_roleless_token(exp: i64) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "sub": "user-1", "exp": exp }),
        &EncodingKey::from_secret(b"not-the-backend-secret"),
    )
    .expect("Failed to forge test token")
}

/// An expiry one hour in the future.
#[allow(dead_code)]
pub fn one_hour_ahead() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

/// An expiry one hour in the past.
#[allow(dead_code)]
pub fn one_hour_ago() -> i64 {
    chrono::Utc::now().timestamp() - 3600
}

/// Seed storage the way the backend-era web client did: JSON-quoted token
/// plus the cached session record.
#[allow(dead_code)]
pub fn seed_session(storage: &MemoryStorage, token: &str) {
    storage
        .put(keys::TOKEN, &format!("\"{token}\""))
        .expect("seeding token");
    storage
        .put(
            keys::USER_DATA,
            &serde_json::json!({ "accessToken": token, "data": { "id": "user-1" } }).to_string(),
        )
        .expect("seeding session record");
}

/// A session store over fresh in-memory storage seeded with `token`.
#[allow(dead_code)]
pub fn seeded_store(token: &str) -> (Arc<MemoryStorage>, SessionStore) {
    let storage = Arc::new(MemoryStorage::new());
    seed_session(&storage, token);
    let store = SessionStore::new(storage.clone());
    (storage, store)
}
