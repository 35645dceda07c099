//! Home page: greeting for the signed-in user

use leptos::prelude::*;

use super::layout::ConsoleLayout;
use crate::ui::auth::use_auth_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth_context();

    let greeting = move || {
        auth.user()
            .map(|user| format!("Hi, {}", user.display_name()))
            .unwrap_or_else(|| "Hi".to_string())
    };

    view! {
        <ConsoleLayout>
            <h1 class="text-2xl font-bold text-theme-primary">{greeting}</h1>
            <p class="mt-2 text-theme-secondary">"Welcome back, nice to see you again!"</p>
        </ConsoleLayout>
    }
}
