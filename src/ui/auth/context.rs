//! Auth context for the component tree
//!
//! Wires the session store, credential slot, API client, query cache and
//! navigator into one [`AuthGateway`] and shares it through Leptos context.
//! The server renders with an empty in-memory session; the browser restores
//! the persisted one from localStorage once hydrated.

use std::sync::Arc;

use leptos::prelude::*;

use crate::core::config::Config;
use crate::core::credentials::CredentialSlot;
use crate::core::gateway::AuthGateway;
use crate::core::guards::{self, GuardDecision};
use crate::core::identity::ApiClient;
use crate::core::models::UserPublic;
use crate::core::navigation::{Destination, SignalNavigator};
use crate::core::query_cache::MemoryQueryCache;
use crate::core::session::SessionStore;

/// Gateway as assembled for the browser
pub type ConsoleGateway = AuthGateway<ApiClient, MemoryQueryCache, SignalNavigator>;

/// Auth context providing authentication state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    gateway: StoredValue<Arc<ConsoleGateway>>,
    api: StoredValue<ApiClient>,
    cache: StoredValue<MemoryQueryCache>,
    navigator: StoredValue<SignalNavigator>,
}

impl AuthContext {
    /// Shared handle to the gateway, for use inside `spawn_local`
    pub fn gateway(&self) -> Arc<ConsoleGateway> {
        self.gateway.get_value()
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn cache(&self) -> MemoryQueryCache {
        self.cache.get_value()
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.gateway.with_value(|g| g.is_authenticated())
    }

    /// Get current user (if authenticated)
    pub fn user(&self) -> Option<UserPublic> {
        self.gateway.with_value(|g| g.user())
    }

    /// Error message from last operation
    pub fn error(&self) -> Option<String> {
        self.gateway.with_value(|g| g.error())
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.gateway.with_value(|g| g.reset_error());
    }

    pub fn is_pending(&self) -> bool {
        self.gateway.with_value(|g| g.is_pending())
    }

    /// Whether the browser session has been restored yet
    pub fn is_restored(&self) -> bool {
        self.gateway.with_value(|g| g.session().is_restored())
    }

    /// Route guard condition for `destination`.
    ///
    /// `None` until the session is restored, then whether the page may render.
    pub fn allows(&self, destination: Destination) -> Option<bool> {
        if !self.is_restored() {
            return None;
        }
        let logged_in = self.is_authenticated();
        Some(guards::check(destination, logged_in) == GuardDecision::Render)
    }

    pub fn logout(&self) {
        self.gateway.with_value(|g| g.logout());
    }

    /// Destination most recently requested by the gateway
    pub fn requested_destination(&self) -> Option<Destination> {
        self.navigator.with_value(|n| n.requested())
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context(config: &Config) -> AuthContext {
    let credentials = CredentialSlot::new();
    let api = ApiClient::new(config, credentials.clone());
    let cache = MemoryQueryCache::new();
    let navigator = SignalNavigator::new();

    #[cfg(feature = "hydrate")]
    let storage = crate::core::session::BrowserStorage;
    #[cfg(not(feature = "hydrate"))]
    let storage = crate::core::session::MemoryStorage::new();

    let gateway = AuthGateway::new(
        SessionStore::new(storage),
        api.clone(),
        cache.clone(),
        navigator.clone(),
        credentials,
    );

    let ctx = AuthContext {
        gateway: StoredValue::new(Arc::new(gateway)),
        api: StoredValue::new(api),
        cache: StoredValue::new(cache),
        navigator: StoredValue::new(navigator),
    };

    // Restore after hydration so server and client render the same markup
    #[cfg(not(feature = "ssr"))]
    Effect::new(move |_| {
        ctx.gateway.with_value(|g| g.restore());
    });

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
