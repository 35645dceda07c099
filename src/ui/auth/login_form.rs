//! Login form component
//!
//! Email/password form that hands the credentials to the auth gateway. The
//! gateway navigates home on success and fills the error slot on failure.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::models::LoginInput;
use crate::core::navigation::Destination;
use crate::core::validation::{self, ValidationError};

/// Login form component
#[component]
pub fn LoginForm() -> impl IntoView {
    let auth = use_auth_context();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    // Form validation
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let validate_email = move || {
        let error = validation::message(validation::validate_email(&email.get()));
        let valid = error.is_none();
        email_error.set(error);
        valid
    };

    // Login only needs a non-empty password; length rules apply at sign-up
    let validate_password = move || {
        let error = password
            .get()
            .is_empty()
            .then(|| ValidationError::Required("Password").to_string());
        let valid = error.is_none();
        password_error.set(error);
        valid
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        auth.clear_error();

        let email_valid = validate_email();
        let password_valid = validate_password();
        if !email_valid || !password_valid || auth.is_pending() {
            return;
        }

        let credentials = LoginInput::new(email.get().trim(), password.get());
        let gateway = auth.gateway();

        spawn_local(async move {
            // Error is already in the gateway's error slot
            let _ = gateway.login(&credentials).await;
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-6">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-theme-primary">"Welcome Back"</h2>
                <p class="mt-2 text-sm text-theme-secondary">
                    "Sign in to the administration console"
                </p>
            </div>

            {move || {
                auth.error().map(|error| {
                    view! {
                        <div class="p-3 bg-red-100 border border-red-300 rounded-lg">
                            <p class="text-sm text-red-700">{error}</p>
                        </div>
                    }
                })
            }}

            <div>
                <label for="email" class="block text-sm font-medium text-theme-primary mb-1">
                    "Email"
                </label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    class="input-base"
                    class:border-red-500=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                    on:blur=move |_| { validate_email(); }
                />
                {move || {
                    email_error.get().map(|error| view! { <p class="mt-1 text-sm text-red-500">{error}</p> })
                }}
            </div>

            <div>
                <label for="password" class="block text-sm font-medium text-theme-primary mb-1">
                    "Password"
                </label>
                <div class="relative">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        id="password"
                        name="password"
                        autocomplete="current-password"
                        placeholder="Enter your password"
                        class="input-base pr-16"
                        class:border-red-500=move || password_error.get().is_some()
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            password_error.set(None);
                        }
                        on:blur=move |_| { validate_password(); }
                    />
                    <button
                        type="button"
                        class="absolute inset-y-0 right-0 pr-3 text-sm text-theme-tertiary hover:text-theme-secondary"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                {move || {
                    password_error.get().map(|error| view! { <p class="mt-1 text-sm text-red-500">{error}</p> })
                }}
            </div>

            <div class="text-right text-sm">
                <A href=Destination::RecoverPassword.path() attr:class="text-accent-primary hover:underline">
                    "Forgot password?"
                </A>
            </div>

            <button type="submit" class="btn-primary w-full" disabled=move || auth.is_pending()>
                {move || if auth.is_pending() { "Signing in..." } else { "Log In" }}
            </button>

            <div class="text-center text-sm text-theme-secondary">
                "Don't have an account? "
                <A href=Destination::Signup.path() attr:class="text-accent-primary font-medium">
                    "Sign up"
                </A>
            </div>
        </form>
    }
}
