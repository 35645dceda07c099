//! Ambient credential slot read by the API client.
//!
//! The slot is shared by cloning. Only the auth gateway writes to it; the API
//! client reads it on every request to attach `Authorization: Bearer <token>`.

use std::sync::{Arc, PoisonError, RwLock};

/// Shared bearer-token slot
#[derive(Clone, Default)]
pub struct CredentialSlot {
    token: Arc<RwLock<Option<String>>>,
}

impl CredentialSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a token, or clear the slot with `None`
    pub fn apply(&self, token: Option<&str>) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = token.map(str::to_string);
    }

    /// Current token, if one is installed
    pub fn current(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl std::fmt::Debug for CredentialSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself
        f.debug_struct("CredentialSlot")
            .field("set", &self.is_set())
            .finish()
    }
}
