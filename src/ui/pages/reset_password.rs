//! Reset password page
//!
//! Reached from the recovery email; the recovery token arrives as the
//! `token` query parameter.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;

use super::layout::GuestLayout;
use crate::core::models::NewPassword;
use crate::core::validation;
use crate::ui::auth::use_auth_context;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = use_auth_context();
    let query = use_query_map();

    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        let Some(token) = query.with(|q| q.get("token")).filter(|t| !t.is_empty()) else {
            form_error.set(Some("The reset link is missing its token".to_string()));
            return;
        };

        let new_password = password.get();
        let error = validation::message(validation::validate_password(&new_password)).or_else(|| {
            validation::message(validation::validate_confirmation(
                &new_password,
                &confirm_password.get(),
            ))
        });
        form_error.set(error.clone());
        if error.is_some() || auth.is_pending() {
            return;
        }

        let reset = NewPassword {
            token,
            new_password,
        };
        let gateway = auth.gateway();
        spawn_local(async move {
            let _ = gateway.reset_password(&reset).await;
        });
    };

    view! {
        <GuestLayout>
            <form on:submit=on_submit class="space-y-5">
                <h2 class="text-2xl font-bold text-theme-primary text-center">"Reset Password"</h2>
                <p class="text-sm text-theme-secondary text-center">
                    "Please enter your new password and confirm it to reset your password."
                </p>

                {move || {
                    form_error.get()
                        .or_else(|| auth.error())
                        .map(|error| view! { <p class="text-sm text-red-600">{error}</p> })
                }}

                <div>
                    <label for="new_password" class="block text-sm font-medium text-theme-primary mb-1">
                        "New Password"
                    </label>
                    <input
                        type="password"
                        id="new_password"
                        autocomplete="new-password"
                        class="input-base"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
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
                        prop:value=move || confirm_password.get()
                        on:input=move |ev| confirm_password.set(event_target_value(&ev))
                    />
                </div>

                <button type="submit" class="btn-primary w-full" disabled=move || auth.is_pending()>
                    "Reset Password"
                </button>
            </form>
        </GuestLayout>
    }
}
