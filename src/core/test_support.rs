//! Test utilities for the core module.
//!
//! Fixtures and in-memory collaborators for exercising the gateway without a
//! backend or a router. Only compiled when running tests.

use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::core::credentials::CredentialSlot;
use crate::core::identity::{ApiError, IdentityService, UsersApi};
use crate::core::models::{
    LoginInput, Message, NewPassword, Token, UserPublic, UserRegister, UserRole, UsersPublic,
};
use crate::core::navigation::{Destination, Navigator};
use crate::core::query_cache::QueryCache;

/// The user returned by the mock identity service
pub fn sample_user() -> UserPublic {
    UserPublic {
        id: Uuid::from_u128(1),
        email: "a@b.com".to_string(),
        full_name: Some("Ada Admin".to_string()),
        is_active: true,
        is_superuser: true,
        role: UserRole::Admin,
    }
}

pub fn status_error(status: u16, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Identity service
// ============================================================================

#[derive(Debug)]
struct MockResponses {
    register: Result<UserPublic, ApiError>,
    token: Result<Token, ApiError>,
    profile: Result<UserPublic, ApiError>,
    recover: Result<Message, ApiError>,
    reset: Result<Message, ApiError>,
}

/// Scripted identity service. Every call succeeds unless a `failing_*`
/// builder replaced its response. Clones share state.
#[derive(Debug, Clone)]
pub struct MockIdentity {
    responses: Arc<Mutex<MockResponses>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    watched: CredentialSlot,
    profile_credentials: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockIdentity {
    /// Mock whose profile call records the token currently in `watched`
    pub fn new(watched: CredentialSlot) -> Self {
        let responses = MockResponses {
            register: Ok(sample_user()),
            token: Ok(Token {
                access_token: "abc".to_string(),
                token_type: "bearer".to_string(),
            }),
            profile: Ok(sample_user()),
            recover: Ok(Message {
                message: "Password recovery email sent".to_string(),
            }),
            reset: Ok(Message {
                message: "Password updated successfully".to_string(),
            }),
        };
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
            watched,
            profile_credentials: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_register(self, err: ApiError) -> Self {
        lock(&self.responses).register = Err(err);
        self
    }

    pub fn failing_login(self, err: ApiError) -> Self {
        lock(&self.responses).token = Err(err);
        self
    }

    pub fn failing_profile(self, err: ApiError) -> Self {
        lock(&self.responses).profile = Err(err);
        self
    }

    pub fn failing_reset(self, err: ApiError) -> Self {
        lock(&self.responses).reset = Err(err);
        self
    }

    /// Names of the calls made so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    /// Credential observed at each profile request
    pub fn profile_credentials(&self) -> Vec<Option<String>> {
        lock(&self.profile_credentials).clone()
    }

    fn record(&self, call: &'static str) {
        lock(&self.calls).push(call);
    }
}

impl IdentityService for MockIdentity {
    async fn register(&self, _registration: &UserRegister) -> Result<UserPublic, ApiError> {
        self.record("register");
        lock(&self.responses).register.clone()
    }

    async fn exchange_credentials(&self, _credentials: &LoginInput) -> Result<Token, ApiError> {
        self.record("exchange_credentials");
        lock(&self.responses).token.clone()
    }

    async fn fetch_own_profile(&self) -> Result<UserPublic, ApiError> {
        self.record("fetch_own_profile");
        lock(&self.profile_credentials).push(self.watched.current());
        lock(&self.responses).profile.clone()
    }

    async fn recover_password(&self, _email: &str) -> Result<Message, ApiError> {
        self.record("recover_password");
        lock(&self.responses).recover.clone()
    }

    async fn reset_password(&self, _reset: &NewPassword) -> Result<Message, ApiError> {
        self.record("reset_password");
        lock(&self.responses).reset.clone()
    }
}

// ============================================================================
// Users API
// ============================================================================

/// Users API that always answers with the same page and records the
/// requested `(skip, limit)` pairs
#[derive(Debug, Clone)]
pub struct MockUsersApi {
    page: UsersPublic,
    calls: Arc<Mutex<Vec<(usize, usize)>>>,
    failures: Arc<Mutex<usize>>,
}

impl MockUsersApi {
    pub fn with_users(data: Vec<UserPublic>, count: usize) -> Self {
        Self {
            page: UsersPublic { data, count },
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(0)),
        }
    }

    /// The next `times` listings fail with a 500
    pub fn failing(self, times: usize) -> Self {
        *lock(&self.failures) = times;
        self
    }

    pub fn calls(&self) -> Vec<(usize, usize)> {
        lock(&self.calls).clone()
    }
}

impl UsersApi for MockUsersApi {
    async fn list_users(&self, skip: usize, limit: usize) -> Result<UsersPublic, ApiError> {
        lock(&self.calls).push((skip, limit));
        let mut failures = lock(&self.failures);
        if *failures > 0 {
            *failures -= 1;
            return Err(status_error(500, "Internal Server Error"));
        }
        Ok(self.page.clone())
    }
}

// ============================================================================
// Navigation and cache
// ============================================================================

/// Navigator that remembers every destination it was sent to
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<Destination>>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Destination> {
        lock(&self.visited).clone()
    }

    pub fn last(&self) -> Option<Destination> {
        lock(&self.visited).last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        lock(&self.visited).push(destination);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Invalidated(String),
    Cleared,
}

/// Query cache that only records what was asked of it
#[derive(Debug, Clone, Default)]
pub struct RecordingCache {
    events: Arc<Mutex<Vec<CacheEvent>>>,
}

impl RecordingCache {
    pub fn events(&self) -> Vec<CacheEvent> {
        lock(&self.events).clone()
    }
}

impl QueryCache for RecordingCache {
    fn invalidate(&self, tag: &str) {
        lock(&self.events).push(CacheEvent::Invalidated(tag.to_string()));
    }

    fn clear(&self) {
        lock(&self.events).push(CacheEvent::Cleared);
    }
}
