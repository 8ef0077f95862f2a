// SPDX-License-Identifier: MIT

//! The session store: single owner of the Principal lifecycle.
//!
//! Only this type writes the published Principal; everything else reads it
//! through [`current_principal`](SessionStore::current_principal) or a
//! [`subscribe`](SessionStore::subscribe) receiver. Every failure path in
//! here recovers locally to "no session" so a bad token can never crash a
//! screen or leave a half-populated Principal behind.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::config::ClientConfig;
use crate::models::{Principal, Role, SessionProfile, SessionRecord};
use crate::session::token;
use crate::storage::{keys, FileStorage, MemoryStorage, SessionStorage};

/// Session store over a persisted storage backend.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    principal: watch::Sender<Option<Principal>>,
}

impl SessionStore {
    /// Create a store over the given backend. Call [`hydrate`](Self::hydrate)
    /// afterwards to restore any persisted session.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (principal, _) = watch::channel(None);
        Self { storage, principal }
    }

    /// Build a store from configuration: file-backed when a session file is
    /// configured, in-memory otherwise.
    pub fn from_config(config: &ClientConfig) -> crate::error::Result<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.session_file {
            Some(path) => Arc::new(FileStorage::open(path)?),
            None => Arc::new(MemoryStorage::new()),
        };
        Ok(Self::new(storage))
    }

    /// Restore the session from persisted storage and publish the result.
    ///
    /// Safe to call on every screen mount: a missing token is anonymous (no
    /// side effects), while malformed, expired, partial, or disagreeing
    /// state is purged and likewise ends anonymous. Never returns an error.
    pub fn hydrate(&self) -> Option<Principal> {
        let principal = self.restore(Utc::now().timestamp());
        self.principal.send_replace(principal.clone());
        principal
    }

    fn restore(&self, now: i64) -> Option<Principal> {
        let raw_token = self.read_key(keys::TOKEN);
        let raw_record = self.read_key(keys::USER_DATA);

        let (raw_token, raw_record) = match (raw_token, raw_record) {
            // Anonymous: nothing persisted, nothing to clean up.
            (None, None) => return None,
            (Some(t), Some(r)) => (t, r),
            // A token with no cached claims (or the reverse) is never
            // trusted in isolation.
            _ => {
                tracing::warn!("Partial session state in storage, discarding");
                self.purge();
                return None;
            }
        };

        let access_token = token::unwrap_stored(&raw_token);

        let claims = match token::decode_claims(access_token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(error = %e, "Stored token is malformed, discarding session");
                self.purge();
                return None;
            }
        };

        let record: SessionRecord = match serde_json::from_str(&raw_record) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Cached session record is unreadable, discarding session");
                self.purge();
                return None;
            }
        };

        if token::unwrap_stored(&record.access_token) != access_token {
            tracing::warn!("Stored token and cached record disagree, discarding session");
            self.purge();
            return None;
        }

        if claims.exp <= now {
            tracing::debug!(expired_at = claims.exp, "Stored token has expired");
            self.purge();
            return None;
        }

        let profile = record.data.unwrap_or_default();

        Some(Principal {
            id: claims.sub.or(profile.id).unwrap_or_default(),
            email: claims.email.or(profile.email),
            name: claims.name.or(profile.name),
            role: Role::from_name(claims.role.as_deref().unwrap_or("")),
            access_token: access_token.to_string(),
            refresh_token: self.read_key(keys::REFRESH_TOKEN),
            expires_at: claims.exp,
        })
    }

    /// Synchronous read of the currently published Principal.
    pub fn current_principal(&self) -> Option<Principal> {
        self.principal.borrow().clone()
    }

    /// Watch the published Principal. Receivers see every login, logout,
    /// and re-hydration.
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.principal.subscribe()
    }

    /// Explicit logout: clear every persisted key (current and legacy) and
    /// publish "no session". Idempotent.
    pub fn invalidate(&self) {
        self.purge();
        self.principal.send_replace(None);
    }

    /// Install a freshly issued session, replacing any prior one entirely,
    /// then re-hydrate so the Principal is always built through the one
    /// decode path. Returns the published Principal, or `None` when the
    /// issued token does not decode.
    pub fn establish(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
        profile: Option<SessionProfile>,
    ) -> Option<Principal> {
        self.purge();

        // The web client stored the token JSON-stringified; keep the quoted
        // form on disk and rely on hydrate to unwrap it.
        self.write_key(keys::TOKEN, &format!("\"{access_token}\""));

        let record = SessionRecord {
            access_token: access_token.to_string(),
            data: profile,
        };
        match serde_json::to_string(&record) {
            Ok(serialized) => self.write_key(keys::USER_DATA, &serialized),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize session record"),
        }

        if let Some(refresh) = refresh_token {
            self.write_key(keys::REFRESH_TOKEN, refresh);
        }

        self.hydrate()
    }

    /// Merge updated profile fields into the published Principal and the
    /// cached record. A no-op when no session is published.
    pub fn merge_profile(&self, name: Option<&str>, email: Option<&str>) {
        let Some(mut principal) = self.current_principal() else {
            return;
        };

        if let Some(name) = name {
            principal.name = Some(name.to_string());
        }
        if let Some(email) = email {
            principal.email = Some(email.to_string());
        }

        let record = SessionRecord {
            access_token: principal.access_token.clone(),
            data: Some(SessionProfile {
                id: Some(principal.id.clone()),
                email: principal.email.clone(),
                name: principal.name.clone(),
            }),
        };
        match serde_json::to_string(&record) {
            Ok(serialized) => self.write_key(keys::USER_DATA, &serialized),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize session record"),
        }

        self.principal.send_replace(Some(principal));
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Session storage read failed");
                None
            }
        }
    }

    fn write_key(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.put(key, value) {
            tracing::warn!(key, error = %e, "Session storage write failed");
        }
    }

    fn purge(&self) {
        let all_keys = [keys::TOKEN, keys::REFRESH_TOKEN, keys::USER_DATA]
            .into_iter()
            .chain(keys::LEGACY.iter().copied());
        for key in all_keys {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Session storage remove failed");
            }
        }
    }
}
