//! Route guards
//!
//! Pure, synchronous checks on token presence. Nothing here touches the
//! network; the UI evaluates them before a page renders.

use crate::core::navigation::Destination;
use crate::core::session::SessionStore;

/// Who may see a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Requires a token; anonymous visitors go to the login page
    AuthOnly,
    /// Login/signup/recovery pages; signed-in users go home
    GuestOnly,
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Destination),
}

/// True iff the session holds a token
pub fn is_logged_in(session: &SessionStore) -> bool {
    session.is_logged_in()
}

/// Access class of a destination
pub fn access_for(destination: Destination) -> RouteAccess {
    match destination {
        Destination::Home | Destination::Settings | Destination::Admin => RouteAccess::AuthOnly,
        Destination::Login
        | Destination::Signup
        | Destination::RecoverPassword
        | Destination::ResetPassword => RouteAccess::GuestOnly,
    }
}

pub fn decide(access: RouteAccess, logged_in: bool) -> GuardDecision {
    match (access, logged_in) {
        (RouteAccess::AuthOnly, true) | (RouteAccess::GuestOnly, false) => GuardDecision::Render,
        (RouteAccess::AuthOnly, false) => GuardDecision::Redirect(Destination::Login),
        (RouteAccess::GuestOnly, true) => GuardDecision::Redirect(Destination::Home),
    }
}

/// Decide a navigation to `destination` for the given login state
pub fn check(destination: Destination, logged_in: bool) -> GuardDecision {
    decide(access_for(destination), logged_in)
}

/// Decide a navigation against the current session
pub fn check_session(destination: Destination, session: &SessionStore) -> GuardDecision {
    check(destination, is_logged_in(session))
}

/// Where a refused visitor of `destination` is sent
pub fn redirect_target(destination: Destination) -> Destination {
    match access_for(destination) {
        RouteAccess::AuthOnly => Destination::Login,
        RouteAccess::GuestOnly => Destination::Home,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::MemoryStorage;
    use crate::core::test_support::sample_user;

    #[test]
    fn test_decision_table() {
        assert_eq!(decide(RouteAccess::AuthOnly, true), GuardDecision::Render);
        assert_eq!(
            decide(RouteAccess::AuthOnly, false),
            GuardDecision::Redirect(Destination::Login)
        );
        assert_eq!(
            decide(RouteAccess::GuestOnly, true),
            GuardDecision::Redirect(Destination::Home)
        );
        assert_eq!(decide(RouteAccess::GuestOnly, false), GuardDecision::Render);
    }

    #[test]
    fn test_access_classes() {
        for destination in [Destination::Home, Destination::Settings, Destination::Admin] {
            assert_eq!(access_for(destination), RouteAccess::AuthOnly);
        }
        for destination in [
            Destination::Login,
            Destination::Signup,
            Destination::RecoverPassword,
            Destination::ResetPassword,
        ] {
            assert_eq!(access_for(destination), RouteAccess::GuestOnly);
        }
    }

    #[test]
    fn test_redirect_target_matches_refusal() {
        for destination in Destination::ALL {
            for logged_in in [true, false] {
                if let GuardDecision::Redirect(target) = check(destination, logged_in) {
                    assert_eq!(target, redirect_target(destination));
                }
            }
        }
    }

    #[test]
    fn test_guest_pages_redirect_home_when_logged_in() {
        let session = SessionStore::new(MemoryStorage::new());
        session.set_token(Some("abc".to_string()));
        session.set_user(Some(sample_user()));

        assert_eq!(
            check_session(Destination::Login, &session),
            GuardDecision::Redirect(Destination::Home)
        );
        assert_eq!(check_session(Destination::Admin, &session), GuardDecision::Render);
    }

    #[test]
    fn test_logged_out_after_logout() {
        let session = SessionStore::new(MemoryStorage::new());
        session.set_token(Some("abc".to_string()));
        assert!(is_logged_in(&session));

        session.logout();
        session.logout();

        assert!(!is_logged_in(&session));
        assert_eq!(
            check_session(Destination::Settings, &session),
            GuardDecision::Redirect(Destination::Login)
        );
        assert_eq!(check_session(Destination::Signup, &session), GuardDecision::Render);
    }
}
