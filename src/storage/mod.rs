// SPDX-License-Identifier: MIT

//! Persisted session storage.
//!
//! Screens never touch these backends directly; the session store is the
//! only reader and writer. Key names are fixed by the backend-era web client
//! and must not change, including the legacy ones that only exist to be
//! cleared on logout.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage key names.
pub mod keys {
    /// Bearer access token, JSON-quoted string.
    pub const TOKEN: &str = "token";
    /// Opaque refresh token.
    pub const REFRESH_TOKEN: &str = "refreshToken";
    /// Serialized [`SessionRecord`](crate::models::SessionRecord).
    pub const USER_DATA: &str = "userData";

    /// Legacy keys written by older builds; cleared on every purge so a
    /// stale value can never be trusted in isolation.
    pub const LEGACY: &[&str] = &[
        "user",
        "userRole",
        "userId",
        "password",
        "email",
        "profileData",
    ];
}

/// Contract for a persisted key-value session backend.
pub trait SessionStorage: Send + Sync {
    /// Fetch the value stored under `key`, if present.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any prior value.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Error type produced by [`SessionStorage`] backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend failure: {0}")]
    Backend(String),
}
