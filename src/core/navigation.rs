//! Named navigation destinations and the navigator seam used by the gateway.

use leptos::prelude::*;

/// Every page the console can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Home,
    Settings,
    Admin,
    Login,
    Signup,
    RecoverPassword,
    ResetPassword,
}

impl Destination {
    pub const ALL: [Destination; 7] = [
        Destination::Home,
        Destination::Settings,
        Destination::Admin,
        Destination::Login,
        Destination::Signup,
        Destination::RecoverPassword,
        Destination::ResetPassword,
    ];

    /// Path segment as declared in the router (no leading slash)
    pub fn segment(&self) -> &'static str {
        match self {
            Destination::Home => "",
            Destination::Settings => "settings",
            Destination::Admin => "admin",
            Destination::Login => "login",
            Destination::Signup => "signup",
            Destination::RecoverPassword => "recover-password",
            Destination::ResetPassword => "reset-password",
        }
    }

    /// Absolute path
    pub fn path(&self) -> String {
        format!("/{}", self.segment())
    }

    /// Resolve an absolute path, ignoring any query string or trailing slash
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segment = path.trim_matches('/');
        Self::ALL.into_iter().find(|d| d.segment() == segment)
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Fire-and-forget navigation
pub trait Navigator {
    fn navigate(&self, destination: Destination);
}

/// Navigator that publishes the requested destination in a signal.
///
/// The UI watches [`SignalNavigator::requested`] from inside the router and
/// performs the actual navigation.
#[derive(Clone)]
pub struct SignalNavigator {
    requested: ArcRwSignal<Option<Destination>>,
}

impl SignalNavigator {
    pub fn new() -> Self {
        Self {
            requested: ArcRwSignal::new(None),
        }
    }

    /// Last requested destination (reactive)
    pub fn requested(&self) -> Option<Destination> {
        self.requested.get()
    }
}

impl Default for SignalNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for SignalNavigator {
    fn navigate(&self, destination: Destination) {
        tracing::debug!("Navigating to {}", destination);
        self.requested.set(Some(destination));
    }
}
