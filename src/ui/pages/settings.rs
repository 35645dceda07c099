//! User settings page
//!
//! Shows the profile stored in the session and offers logout.

use leptos::prelude::*;

use super::layout::ConsoleLayout;
use crate::ui::auth::use_auth_context;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth_context();

    let profile = move || {
        auth.user().map(|user| {
            let full_name = user.full_name.clone().unwrap_or_else(|| "N/A".to_string());
            let status = if user.is_active { "Active" } else { "Inactive" };
            view! {
                <dl class="grid grid-cols-2 gap-4 max-w-lg">
                    <dt class="text-theme-secondary">"Full name"</dt>
                    <dd class="text-theme-primary">{full_name}</dd>
                    <dt class="text-theme-secondary">"Email"</dt>
                    <dd class="text-theme-primary">{user.email.clone()}</dd>
                    <dt class="text-theme-secondary">"Role"</dt>
                    <dd class="text-theme-primary">{user.role.label()}</dd>
                    <dt class="text-theme-secondary">"Status"</dt>
                    <dd class="text-theme-primary">{status}</dd>
                </dl>
            }
        })
    };

    view! {
        <ConsoleLayout>
            <h1 class="text-2xl font-bold text-theme-primary mb-6">"User Settings"</h1>
            {profile}
            <button class="btn-secondary mt-8" on:click=move |_| auth.logout()>
                "Log out"
            </button>
        </ConsoleLayout>
    }
}
