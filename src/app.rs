//! Root application component with routing and the auth context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ProtectedRoute, Router, Routes},
    hooks::use_navigate,
};

use crate::core::config::Config;
use crate::core::guards;
use crate::core::navigation::Destination;
use crate::ui::auth::{AuthContext, provide_auth_context, use_auth_context};
use crate::ui::pages::{
    AdminPage, HomePage, LoginPage, NotFoundPage, RecoverPasswordPage, ResetPasswordPage,
    SettingsPage, SignupPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Guard condition and redirect for one destination
fn guard(
    auth: AuthContext,
    destination: Destination,
) -> (
    impl Fn() -> Option<bool> + Clone + Send + Sync + 'static,
    impl Fn() -> String + Clone + Send + Sync + 'static,
) {
    (
        move || auth.allows(destination),
        move || guards::redirect_target(destination).path(),
    )
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let auth = provide_auth_context(&Config::from_env());

    let (home, home_redirect) = guard(auth, Destination::Home);
    let (settings, settings_redirect) = guard(auth, Destination::Settings);
    let (admin, admin_redirect) = guard(auth, Destination::Admin);
    let (login, login_redirect) = guard(auth, Destination::Login);
    let (signup, signup_redirect) = guard(auth, Destination::Signup);
    let (recover, recover_redirect) = guard(auth, Destination::RecoverPassword);
    let (reset, reset_redirect) = guard(auth, Destination::ResetPassword);

    view! {
        <Stylesheet id="leptos" href="/pkg/admin-console.css"/>
        <Title text="Admin Console"/>

        <Router>
            <NavigationBridge/>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <ProtectedRoute
                    path=StaticSegment(Destination::Home.segment())
                    view=HomePage
                    condition=home
                    redirect_path=home_redirect
                />
                <ProtectedRoute
                    path=StaticSegment(Destination::Settings.segment())
                    view=SettingsPage
                    condition=settings
                    redirect_path=settings_redirect
                />
                <ProtectedRoute
                    path=StaticSegment(Destination::Admin.segment())
                    view=AdminPage
                    condition=admin
                    redirect_path=admin_redirect
                />
                <ProtectedRoute
                    path=StaticSegment(Destination::Login.segment())
                    view=LoginPage
                    condition=login
                    redirect_path=login_redirect
                />
                <ProtectedRoute
                    path=StaticSegment(Destination::Signup.segment())
                    view=SignupPage
                    condition=signup
                    redirect_path=signup_redirect
                />
                <ProtectedRoute
                    path=StaticSegment(Destination::RecoverPassword.segment())
                    view=RecoverPasswordPage
                    condition=recover
                    redirect_path=recover_redirect
                />
                <ProtectedRoute
                    path=StaticSegment(Destination::ResetPassword.segment())
                    view=ResetPasswordPage
                    condition=reset
                    redirect_path=reset_redirect
                />
            </Routes>
        </Router>
    }
}

/// Performs the navigations the auth gateway requests.
///
/// Must be rendered inside the `<Router>`.
#[component]
fn NavigationBridge() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if let Some(destination) = auth.requested_destination() {
            navigate(&destination.path(), Default::default());
        }
    });
}
