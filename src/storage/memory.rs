// SPDX-License-Identifier: MIT

//! Thread-safe in-memory session storage for tests and ephemeral sessions.

use dashmap::DashMap;

use crate::storage::{SessionStorage, StorageError};

/// Keeps the session record in-process; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage(DashMap<String, String>);

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.get(key).map(|v| v.clone()))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.remove(key);
        Ok(())
    }
}
