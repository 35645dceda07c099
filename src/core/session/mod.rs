//! Session store: the single authoritative holder of the current token and
//! user profile.
//!
//! The store is reactive (backed by `ArcRwSignal`) so components re-render on
//! login/logout, and durable: every mutation writes the full `{ token, user }`
//! pair under [`STORAGE_KEY`]. Persistence failures are logged, never
//! returned; the store itself cannot fail.
//!
//! The store does not touch the ambient credential slot. The auth gateway
//! installs and clears credentials explicitly.

pub mod storage;

use std::sync::Arc;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::models::UserPublic;
pub use storage::{MemoryStorage, SessionStorage, StorageError};

#[cfg(feature = "hydrate")]
pub use storage::BrowserStorage;

/// Fixed storage namespace for the persisted session record
pub const STORAGE_KEY: &str = "auth-storage";

/// Format version written alongside the record
const RECORD_VERSION: u32 = 0;

/// Current authentication state.
///
/// `user` is only ever present together with `token`.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserPublic>,
}

impl Session {
    /// Token presence is the only source of truth for authentication
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Enforce `user => token`, treating an empty token as absent
    fn sanitized(mut self) -> Self {
        if self.token.as_deref().is_some_and(str::is_empty) {
            self.token = None;
        }
        if self.token.is_none() && self.user.is_some() {
            tracing::warn!("Persisted session had a user without a token, dropping user");
            self.user = None;
        }
        self
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

/// On-disk shape of the session record
#[derive(Serialize)]
struct PersistedRecord<'a> {
    state: &'a Session,
    version: u32,
}

#[derive(Deserialize)]
struct StoredRecord {
    state: Session,
}

/// Reactive, persisted session store
#[derive(Clone)]
pub struct SessionStore {
    session: ArcRwSignal<Session>,
    restored: ArcRwSignal<bool>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Create an empty (logged out) store. Call [`SessionStore::rehydrate`]
    /// to restore the persisted record.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            session: ArcRwSignal::new(Session::default()),
            restored: ArcRwSignal::new(false),
            storage: Arc::new(storage),
        }
    }

    /// Create a store and restore the persisted record right away
    pub fn open(storage: impl SessionStorage + 'static) -> Self {
        let store = Self::new(storage);
        store.rehydrate();
        store
    }

    /// Reload the session from durable storage.
    ///
    /// A missing, unreadable or corrupt record yields a logged-out session.
    /// Returns whether a token was restored.
    pub fn rehydrate(&self) -> bool {
        let restored = match self.storage.load(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<StoredRecord>(&raw) {
                Ok(record) => record.state.sanitized(),
                Err(err) => {
                    tracing::warn!("Ignoring corrupt session record: {}", err);
                    Session::default()
                }
            },
            Ok(None) => Session::default(),
            Err(err) => {
                tracing::warn!("Failed to read session record: {}", err);
                Session::default()
            }
        };

        let has_token = restored.is_authenticated();
        tracing::debug!(authenticated = has_token, "Session rehydrated");

        self.session.set(restored);
        self.restored.set(true);
        has_token
    }

    /// Replace the token. Clearing it also clears the user.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        self.session.update(|session| {
            if token.is_none() {
                session.user = None;
            }
            session.token = token;
        });
        self.persist();
    }

    /// Replace the user profile wholesale.
    ///
    /// A profile offered while no token is set is rejected and `false` is
    /// returned; clearing the user is always accepted.
    pub fn set_user(&self, user: Option<UserPublic>) -> bool {
        if user.is_some() && !self.is_logged_in() {
            tracing::warn!("Rejected user profile: no active token");
            return false;
        }
        self.session.update(|session| session.user = user);
        self.persist();
        true
    }

    /// Clear token and user together. Idempotent.
    pub fn logout(&self) {
        self.session.set(Session::default());
        self.persist();
    }

    /// Current token (reactive)
    pub fn token(&self) -> Option<String> {
        self.session.with(|s| s.token.clone())
    }

    /// Current user (reactive)
    pub fn user(&self) -> Option<UserPublic> {
        self.session.with(|s| s.user.clone())
    }

    /// Whether a token is present (reactive)
    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    /// Whether a token is present, without subscribing the caller
    pub fn is_logged_in(&self) -> bool {
        self.session.with_untracked(Session::is_authenticated)
    }

    /// Copy of the current state, without subscribing the caller
    pub fn snapshot(&self) -> Session {
        self.session.get_untracked()
    }

    /// Whether rehydration has run (reactive)
    pub fn is_restored(&self) -> bool {
        self.restored.get()
    }

    /// Write the full record under the fixed key
    fn persist(&self) {
        let result = self.session.with_untracked(|session| {
            serde_json::to_string(&PersistedRecord {
                state: session,
                version: RECORD_VERSION,
            })
        });

        let outcome = match result {
            Ok(json) => self.storage.save(STORAGE_KEY, &json),
            Err(err) => Err(err.into()),
        };

        if let Err(err) = outcome {
            tracing::warn!("Failed to persist session: {}", err);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::sample_user;

    fn stored_json(storage: &MemoryStorage) -> serde_json::Value {
        serde_json::from_str(&storage.get(STORAGE_KEY).unwrap()).unwrap()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    #[test]
    fn test_new_store_is_logged_out() {
        let store = SessionStore::new(MemoryStorage::new());

        assert!(!store.is_logged_in());
        assert!(store.user().is_none());
        assert!(!store.is_restored());
    }

    #[test]
    fn test_set_token_updates_authenticated_flag() {
        let store = SessionStore::new(MemoryStorage::new());

        store.set_token(Some("abc".to_string()));

        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("abc".to_string()));
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let store = SessionStore::new(MemoryStorage::new());

        store.set_token(Some(String::new()));

        assert!(!store.is_logged_in());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_set_user_rejected_without_token() {
        let store = SessionStore::new(MemoryStorage::new());

        let accepted = store.set_user(Some(sample_user()));

        assert!(!accepted);
        assert!(store.user().is_none());
    }

    #[test]
    fn test_set_user_accepted_with_token() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_token(Some("abc".to_string()));

        assert!(store.set_user(Some(sample_user())));
        assert_eq!(store.user(), Some(sample_user()));
    }

    #[test]
    fn test_clearing_token_clears_user() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_token(Some("abc".to_string()));
        store.set_user(Some(sample_user()));

        store.set_token(None);

        assert!(store.user().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_token(Some("abc".to_string()));
        store.set_user(Some(sample_user()));

        store.logout();
        let once = store.snapshot();
        store.logout();

        assert_eq!(store.snapshot(), once);
        assert_eq!(once, Session::default());
        assert!(!store.is_logged_in());
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    #[test]
    fn test_every_mutation_persists_full_pair() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());

        store.set_token(Some("abc".to_string()));
        assert_eq!(stored_json(&storage)["state"]["token"], "abc");
        assert!(stored_json(&storage)["state"]["user"].is_null());

        store.set_user(Some(sample_user()));
        let json = stored_json(&storage);
        assert_eq!(json["state"]["token"], "abc");
        assert_eq!(json["state"]["user"]["email"], "a@b.com");
        assert_eq!(json["version"], 0);
    }

    #[test]
    fn test_round_trip_across_restart() {
        let storage = MemoryStorage::new();
        let store = SessionStore::open(storage.clone());
        store.set_token(Some("T".to_string()));
        store.set_user(Some(sample_user()));
        drop(store);

        let restarted = SessionStore::open(storage);

        assert!(restarted.is_restored());
        assert_eq!(restarted.token(), Some("T".to_string()));
        assert_eq!(restarted.user(), Some(sample_user()));
    }

    #[test]
    fn test_logout_overwrites_record_with_empty_values() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.set_token(Some("abc".to_string()));
        store.set_user(Some(sample_user()));

        store.logout();

        let json = stored_json(&storage);
        assert!(json["state"]["token"].is_null());
        assert!(json["state"]["user"].is_null());
        assert!(!SessionStore::open(storage).is_logged_in());
    }

    #[test]
    fn test_rehydrate_without_record() {
        let store = SessionStore::new(MemoryStorage::new());

        assert!(!store.rehydrate());
        assert!(store.is_restored());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_rehydrate_corrupt_record_logs_out() {
        let storage = MemoryStorage::new();
        storage.save(STORAGE_KEY, "not json").unwrap();

        let store = SessionStore::open(storage);

        assert!(store.is_restored());
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn test_rehydrate_drops_user_without_token() {
        let storage = MemoryStorage::new();
        let record = serde_json::json!({
            "state": { "token": null, "user": sample_user() },
            "version": 0
        });
        storage.save(STORAGE_KEY, &record.to_string()).unwrap();

        let store = SessionStore::open(storage);

        assert!(store.user().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_debug_redacts_token() {
        let store = SessionStore::new(MemoryStorage::new());
        store.set_token(Some("super-secret".to_string()));

        let debug_str = format!("{:?}", store);

        assert!(!debug_str.contains("super-secret"));
        assert!(debug_str.contains("<redacted>"));
    }
}
