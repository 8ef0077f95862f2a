// SPDX-License-Identifier: MIT

//! Session restoration tests: hydration, purging, and idempotent logout.

mod common;

use std::sync::Arc;

use common::{forge_roleless_token, forge_token, one_hour_ago, one_hour_ahead, seeded_store};
use evshare_dashboard::storage::keys;
use evshare_dashboard::{MemoryStorage, Role, SessionStorage, SessionStore};

#[test]
fn test_hydrate_restores_principal_with_exact_role() {
    for (role_name, role) in [
        ("Admin", Role::Admin),
        ("Staff", Role::Staff),
        ("CoOwner", Role::CoOwner),
        ("Technician", Role::Technician),
    ] {
        let token = forge_token(role_name, one_hour_ahead());
        let (_storage, store) = seeded_store(&token);

        let principal = store.hydrate().expect("valid session should hydrate");
        assert_eq!(principal.role, role);
        assert_eq!(principal.role.name(), role_name);
        assert_eq!(store.current_principal(), Some(principal));
    }
}

#[test]
fn test_unrecognized_role_defaults_to_co_owner() {
    let token = forge_token("Superuser", one_hour_ahead());
    let (_storage, store) = seeded_store(&token);

    let principal = store.hydrate().expect("session should hydrate");
    assert_eq!(principal.role, Role::CoOwner);
    assert_eq!(principal.role.id(), 3);
}

#[test]
fn test_missing_role_claim_defaults_to_co_owner() {
    let token = forge_roleless_token(one_hour_ahead());
    let (_storage, store) = seeded_store(&token);

    let principal = store.hydrate().expect("session should hydrate");
    assert_eq!(principal.role, Role::CoOwner);
}

#[test]
fn test_expired_token_purges_storage() {
    let token = forge_token("Admin", one_hour_ago());
    let (storage, store) = seeded_store(&token);

    assert_eq!(store.hydrate(), None);
    assert_eq!(store.current_principal(), None);
    assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
    assert_eq!(storage.get(keys::USER_DATA).unwrap(), None);
}

#[test]
fn test_malformed_tokens_never_panic() {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    // Structurally token-shaped, but the payload is not JSON.
    let bogus_payload = format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(b"not json")
    );

    for bad in [
        "",
        "garbage",
        "a.b",
        "eyJhbGciOiJIUzI1NiJ9.broken",
        bogus_payload.as_str(),
    ] {
        let storage = Arc::new(MemoryStorage::new());
        storage.put(keys::TOKEN, &format!("\"{bad}\"")).unwrap();
        storage
            .put(
                keys::USER_DATA,
                &serde_json::json!({ "accessToken": bad }).to_string(),
            )
            .unwrap();

        let store = SessionStore::new(storage.clone());
        assert_eq!(store.hydrate(), None, "token {bad:?} must hydrate to nothing");
        assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
    }
}

#[test]
fn test_quote_wrapped_token_decodes_like_unwrapped() {
    let token = forge_token("Staff", one_hour_ahead());

    // Quoted, as written by the web client.
    let (_s, quoted_store) = seeded_store(&token);
    let quoted = quoted_store.hydrate().expect("quoted token hydrates");

    // Unquoted, as a by-hand migration might leave it.
    let storage = Arc::new(MemoryStorage::new());
    storage.put(keys::TOKEN, &token).unwrap();
    storage
        .put(
            keys::USER_DATA,
            &serde_json::json!({ "accessToken": token, "data": { "id": "user-1" } }).to_string(),
        )
        .unwrap();
    let plain_store = SessionStore::new(storage);
    let plain = plain_store.hydrate().expect("plain token hydrates");

    assert_eq!(quoted, plain);
    assert_eq!(quoted.access_token, token);
}

#[test]
fn test_partial_state_is_discarded_both_ways() {
    let token = forge_token("Admin", one_hour_ahead());

    // Token without cached record.
    let storage = Arc::new(MemoryStorage::new());
    storage.put(keys::TOKEN, &format!("\"{token}\"")).unwrap();
    let store = SessionStore::new(storage.clone());
    assert_eq!(store.hydrate(), None);
    assert_eq!(storage.get(keys::TOKEN).unwrap(), None);

    // Cached record without token.
    let storage = Arc::new(MemoryStorage::new());
    storage
        .put(
            keys::USER_DATA,
            &serde_json::json!({ "accessToken": token }).to_string(),
        )
        .unwrap();
    let store = SessionStore::new(storage.clone());
    assert_eq!(store.hydrate(), None);
    assert_eq!(storage.get(keys::USER_DATA).unwrap(), None);
}

#[test]
fn test_disagreeing_token_and_record_are_discarded() {
    let token = forge_token("Admin", one_hour_ahead());
    let other = forge_token("Staff", one_hour_ahead());

    let storage = Arc::new(MemoryStorage::new());
    storage.put(keys::TOKEN, &format!("\"{token}\"")).unwrap();
    storage
        .put(
            keys::USER_DATA,
            &serde_json::json!({ "accessToken": other }).to_string(),
        )
        .unwrap();

    let store = SessionStore::new(storage.clone());
    assert_eq!(store.hydrate(), None);
    assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
    assert_eq!(storage.get(keys::USER_DATA).unwrap(), None);
}

#[test]
fn test_anonymous_hydrate_has_no_side_effects() {
    let storage = Arc::new(MemoryStorage::new());
    storage.put("unrelated", "kept").unwrap();

    let store = SessionStore::new(storage.clone());
    assert_eq!(store.hydrate(), None);

    // No purge ran: unrelated keys survive an anonymous hydrate.
    assert_eq!(storage.get("unrelated").unwrap().as_deref(), Some("kept"));
}

#[test]
fn test_invalidate_is_idempotent_and_clears_legacy_keys() {
    let token = forge_token("Admin", one_hour_ahead());
    let (storage, store) = seeded_store(&token);
    for legacy in keys::LEGACY {
        storage.put(legacy, "stale").unwrap();
    }
    storage.put(keys::REFRESH_TOKEN, "r-1").unwrap();

    store.hydrate().expect("session should hydrate");
    store.invalidate();

    assert_eq!(store.current_principal(), None);
    assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
    assert_eq!(storage.get(keys::REFRESH_TOKEN).unwrap(), None);
    assert_eq!(storage.get(keys::USER_DATA).unwrap(), None);
    for legacy in keys::LEGACY {
        assert_eq!(storage.get(legacy).unwrap(), None, "{legacy} must be cleared");
    }

    // Second call is a no-op, not an error.
    store.invalidate();
    assert_eq!(store.current_principal(), None);
}

#[test]
fn test_establish_overwrites_prior_session() {
    let first = forge_token("Admin", one_hour_ahead());
    let (storage, store) = seeded_store(&first);
    store.hydrate().expect("first session hydrates");

    let second = forge_token("CoOwner", one_hour_ahead());
    let principal = store
        .establish(&second, Some("refresh-2"), None)
        .expect("established session publishes");

    assert_eq!(principal.role, Role::CoOwner);
    assert_eq!(principal.refresh_token.as_deref(), Some("refresh-2"));

    // Storage holds only the new session, token re-quoted like the web
    // client wrote it.
    assert_eq!(
        storage.get(keys::TOKEN).unwrap().as_deref(),
        Some(format!("\"{second}\"").as_str())
    );
}

#[test]
fn test_merge_profile_updates_published_principal() {
    let token = forge_token("CoOwner", one_hour_ahead());
    let (_storage, store) = seeded_store(&token);
    store.hydrate().expect("session hydrates");

    store.merge_profile(Some("New Name"), None);

    let principal = store.current_principal().expect("still published");
    assert_eq!(principal.name.as_deref(), Some("New Name"));
    // Untouched fields survive the merge.
    assert_eq!(principal.email.as_deref(), Some("owner@evshare.example"));

    // Re-hydration reads the merged record back.
    let rehydrated = store.hydrate().expect("merged session re-hydrates");
    assert_eq!(rehydrated.role, Role::CoOwner);
}

#[test]
fn test_subscribe_sees_login_and_logout() {
    let token = forge_token("Staff", one_hour_ahead());
    let (_storage, store) = seeded_store(&token);
    let rx = store.subscribe();

    store.hydrate().expect("session hydrates");
    assert!(rx.borrow().is_some());

    store.invalidate();
    assert!(rx.borrow().is_none());
}
