//! Auth gateway
//!
//! Orchestrates sign-up, login, logout and password recovery. It is the only
//! component that calls the identity service and then mutates the session,
//! and it owns every rollback: after a failed call the session is either
//! fully logged in (token + profile) or fully logged out.

use leptos::prelude::*;

use crate::core::credentials::CredentialSlot;
use crate::core::identity::{ApiError, IdentityService};
use crate::core::models::{LoginInput, Message, NewPassword, UserPublic, UserRegister};
use crate::core::navigation::{Destination, Navigator};
use crate::core::query_cache::QueryCache;
use crate::core::session::SessionStore;
use crate::core::validation::validate_email;

/// Cache tag of the admin users list
pub const USERS_QUERY_TAG: &str = "users";

/// Auth workflow error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// Input rejected locally or by the backend
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or invalid/expired token
    #[error("{0}")]
    Unauthorized(String),

    /// Backend unreachable or answered unexpectedly
    #[error("{0}")]
    Transport(String),

    /// Token obtained but the profile could not be fetched; session rolled back
    #[error("Could not load your profile: {0}")]
    Consistency(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err.status() {
            Some(400 | 409 | 422) => AuthError::Validation(message),
            Some(401 | 403) => AuthError::Unauthorized(message),
            _ => AuthError::Transport(message),
        }
    }
}

impl AuthError {
    /// Classify a failed token exchange: any client error there means the
    /// credentials were refused.
    fn rejected_login(err: ApiError) -> Self {
        match err.status() {
            Some(400 | 401 | 403 | 422) => AuthError::Unauthorized(err.to_string()),
            _ => err.into(),
        }
    }
}

/// Auth façade over session, identity service, query cache and navigation
pub struct AuthGateway<I, C, N> {
    session: SessionStore,
    identity: I,
    cache: C,
    navigator: N,
    credentials: CredentialSlot,
    /// Error message from last operation
    error: ArcRwSignal<Option<String>>,
    /// Whether an auth request is in flight
    pending: ArcRwSignal<bool>,
}

impl<I, C, N> AuthGateway<I, C, N>
where
    I: IdentityService,
    C: QueryCache,
    N: Navigator,
{
    /// Create the gateway and install the session's token, if any, into the
    /// credential slot.
    pub fn new(
        session: SessionStore,
        identity: I,
        cache: C,
        navigator: N,
        credentials: CredentialSlot,
    ) -> Self {
        let gateway = Self {
            session,
            identity,
            cache,
            navigator,
            credentials,
            error: ArcRwSignal::new(None),
            pending: ArcRwSignal::new(false),
        };
        gateway.sync_credential();
        gateway
    }

    /// Rehydrate the session from storage and re-install its credential.
    /// Must run before any authenticated request.
    pub fn restore(&self) -> bool {
        let restored = self.session.rehydrate();
        self.sync_credential();
        restored
    }

    /// Clear the credential slot without touching the persisted session
    pub fn detach(&self) {
        self.credentials.apply(None);
    }

    fn sync_credential(&self) {
        let token = self.session.snapshot().token;
        self.credentials.apply(token.as_deref());
    }

    // ========================================================================
    // Workflows
    // ========================================================================

    /// Register a new account, then send the user to the login page.
    ///
    /// The cached users list is invalidated whether or not registration
    /// succeeds. The session is never touched.
    pub async fn sign_up(&self, registration: &UserRegister) -> Result<UserPublic, AuthError> {
        self.begin();
        let result = self.identity.register(registration).await;
        self.cache.invalidate(USERS_QUERY_TAG);
        self.pending.set(false);

        match result {
            Ok(user) => {
                tracing::info!("Registered account {}", user.email);
                self.navigator.navigate(Destination::Login);
                Ok(user)
            }
            Err(err) => Err(self.fail(err.into())),
        }
    }

    /// Exchange credentials for a token, then load the caller's profile.
    ///
    /// If the profile cannot be loaded the whole login is rolled back.
    pub async fn login(&self, credentials: &LoginInput) -> Result<UserPublic, AuthError> {
        self.begin();
        let result = self.run_login(credentials).await;
        self.pending.set(false);
        result
    }

    async fn run_login(&self, credentials: &LoginInput) -> Result<UserPublic, AuthError> {
        let token = match self.identity.exchange_credentials(credentials).await {
            Ok(token) => token,
            Err(err) => return Err(self.fail(AuthError::rejected_login(err))),
        };

        // Install the credential before the profile request is issued
        self.session.set_token(Some(token.access_token.clone()));
        self.credentials.apply(Some(&token.access_token));
        self.error.set(None);

        match self.identity.fetch_own_profile().await {
            Ok(user) => {
                self.session.set_user(Some(user.clone()));
                tracing::info!("Logged in as {}", user.email);
                self.navigator.navigate(Destination::Home);
                Ok(user)
            }
            Err(err) => {
                tracing::warn!("Profile fetch failed after login, rolling back");
                self.end_session();
                Err(self.fail(AuthError::Consistency(err.to_string())))
            }
        }
    }

    /// Log out: clear session and credential, drop cached queries, go to
    /// the login page. Safe to call when already logged out.
    pub fn logout(&self) {
        self.end_session();
        self.cache.clear();
        self.navigator.navigate(Destination::Login);
        tracing::info!("Logged out");
    }

    /// Request a password recovery email. Malformed addresses are rejected
    /// without contacting the backend.
    pub async fn recover_password(&self, email: &str) -> Result<Message, AuthError> {
        self.begin();
        let email = email.trim();
        if let Err(err) = validate_email(email) {
            self.pending.set(false);
            return Err(self.fail(AuthError::Validation(err.to_string())));
        }

        let result = self.identity.recover_password(email).await;
        self.pending.set(false);
        result.map_err(|err| self.fail(err.into()))
    }

    /// Set a new password from a recovery token, then go to the login page
    pub async fn reset_password(&self, reset: &NewPassword) -> Result<Message, AuthError> {
        self.begin();
        let result = self.identity.reset_password(reset).await;
        self.pending.set(false);

        match result {
            Ok(message) => {
                self.navigator.navigate(Destination::Login);
                Ok(message)
            }
            Err(err) => Err(self.fail(err.into())),
        }
    }

    fn begin(&self) {
        self.pending.set(true);
        self.error.set(None);
    }

    fn end_session(&self) {
        self.session.logout();
        self.credentials.apply(None);
    }

    /// Record the normalized message in the error slot
    fn fail(&self, err: AuthError) -> AuthError {
        tracing::warn!("Auth operation failed: {}", err);
        self.error.set(Some(err.to_string()));
        err
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Get current user (if authenticated)
    pub fn user(&self) -> Option<UserPublic> {
        self.session.user()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Error message from the last failed operation
    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    /// Clear error message
    pub fn reset_error(&self) {
        self.error.set(None);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn credentials(&self) -> &CredentialSlot {
        &self.credentials
    }
}
