//! Register form component
//!
//! Sign-up form with full name, email, password and confirmation. On
//! success the gateway sends the user to the login page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::models::UserRegister;
use crate::core::navigation::Destination;
use crate::core::validation;

/// Register form component
#[component]
pub fn RegisterForm() -> impl IntoView {
    let auth = use_auth_context();

    // Form state
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    // Form validation
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let confirm_error = RwSignal::new(None::<String>);

    let validate_email = move || {
        let error = validation::message(validation::validate_email(&email.get()));
        let valid = error.is_none();
        email_error.set(error);
        valid
    };

    let validate_password = move || {
        let error = validation::message(validation::validate_password(&password.get()));
        let valid = error.is_none();
        password_error.set(error);
        valid
    };

    let validate_confirm = move || {
        let error = validation::message(validation::validate_confirmation(
            &password.get(),
            &confirm_password.get(),
        ));
        let valid = error.is_none();
        confirm_error.set(error);
        valid
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        auth.clear_error();

        let email_valid = validate_email();
        let password_valid = validate_password();
        let confirm_valid = validate_confirm();
        if !email_valid || !password_valid || !confirm_valid || auth.is_pending() {
            return;
        }

        let name = full_name.get();
        let registration = UserRegister {
            email: email.get().trim().to_string(),
            password: password.get(),
            full_name: Some(name.trim().to_string()).filter(|n| !n.is_empty()),
        };
        let gateway = auth.gateway();

        spawn_local(async move {
            let _ = gateway.sign_up(&registration).await;
        });
    };

    let field_error = |error: RwSignal<Option<String>>| {
        move || error.get().map(|e| view! { <p class="mt-1 text-sm text-red-500">{e}</p> })
    };

    view! {
        <form on:submit=on_submit class="space-y-5">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-theme-primary">"Create Account"</h2>
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
                <label for="full_name" class="block text-sm font-medium text-theme-primary mb-1">
                    "Full Name"
                </label>
                <input
                    type="text"
                    id="full_name"
                    autocomplete="name"
                    class="input-base"
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                />
            </div>

            <div>
                <label for="email" class="block text-sm font-medium text-theme-primary mb-1">
                    "Email"
                </label>
                <input
                    type="email"
                    id="email"
                    autocomplete="email"
                    class="input-base"
                    class:border-red-500=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                    on:blur=move |_| { validate_email(); }
                />
                {field_error(email_error)}
            </div>

            <div>
                <label for="password" class="block text-sm font-medium text-theme-primary mb-1">
                    "Password"
                </label>
                <input
                    type="password"
                    id="password"
                    autocomplete="new-password"
                    class="input-base"
                    class:border-red-500=move || password_error.get().is_some()
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        password.set(event_target_value(&ev));
                        password_error.set(None);
                    }
                    on:blur=move |_| { validate_password(); }
                />
                {field_error(password_error)}
            </div>

            <div>
                <label for="confirm_password" class="block text-sm font-medium text-theme-primary mb-1">
                    "Confirm Password"
                </label>
                <input
                    type="password"
                    id="confirm_password"
                    autocomplete="new-password"
                    class="input-base"
                    class:border-red-500=move || confirm_error.get().is_some()
                    prop:value=move || confirm_password.get()
                    on:input=move |ev| {
                        confirm_password.set(event_target_value(&ev));
                        confirm_error.set(None);
                    }
                    on:blur=move |_| { validate_confirm(); }
                />
                {field_error(confirm_error)}
            </div>

            <button type="submit" class="btn-primary w-full" disabled=move || auth.is_pending()>
                {move || if auth.is_pending() { "Creating account..." } else { "Sign Up" }}
            </button>

            <div class="text-center text-sm text-theme-secondary">
                "Already have an account? "
                <A href=Destination::Login.path() attr:class="text-accent-primary font-medium">
                    "Log In"
                </A>
            </div>
        </form>
    }
}
