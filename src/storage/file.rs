// SPDX-License-Identifier: MIT

//! File-backed session storage.
//!
//! The whole key space is one JSON object persisted after each mutation,
//! written through a temp file and renamed so a crash mid-write cannot leave
//! a torn session on disk.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{SessionStorage, StorageError};

/// Durable session storage, the client-side counterpart of browser
/// `localStorage`.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    inner: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Open (or create) a store at the provided path, eagerly loading any
    /// existing session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        Self::ensure_parent_exists(&path)?;

        let snapshot = if path.exists() {
            Self::load_snapshot(&path)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            inner: RwLock::new(snapshot),
        })
    }

    fn load_snapshot(path: &Path) -> Result<HashMap<String, String>, StorageError> {
        let metadata = path.metadata().map_err(|e| {
            StorageError::Backend(format!("Failed to inspect {}: {e}", path.display()))
        })?;

        if metadata.len() == 0 {
            return Ok(HashMap::new());
        }

        let bytes = fs::read(path)
            .map_err(|e| StorageError::Backend(format!("Failed to read {}: {e}", path.display())))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    fn ensure_parent_exists(path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Backend(format!(
                    "Failed to create session directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }

    fn persist_locked(&self, contents: &HashMap<String, String>) -> Result<(), StorageError> {
        Self::ensure_parent_exists(&self.path)?;

        let serialized = serde_json::to_vec_pretty(contents).map_err(|e| {
            StorageError::Serialization(format!("Failed to serialize session: {e}"))
        })?;

        let mut tmp_path = self.path.clone();
        tmp_path.set_extension("tmp");

        {
            let mut file = File::create(&tmp_path).map_err(|e| {
                StorageError::Backend(format!("Failed to create {}: {e}", tmp_path.display()))
            })?;

            file.write_all(&serialized).map_err(|e| {
                StorageError::Backend(format!("Failed to write {}: {e}", tmp_path.display()))
            })?;
            file.sync_all().map_err(|e| {
                StorageError::Backend(format!("Failed to sync {}: {e}", tmp_path.display()))
            })?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            StorageError::Backend(format!("Failed to replace {}: {e}", self.path.display()))
        })
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| StorageError::Backend("Session lock poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| StorageError::Backend("Session lock poisoned".to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        self.persist_locked(&guard)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| StorageError::Backend("Session lock poisoned".to_string()))?;
        if guard.remove(key).is_some() {
            self.persist_locked(&guard)?;
        }
        Ok(())
    }
}
