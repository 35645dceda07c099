//! Page shells shared by the guest and console pages

use leptos::prelude::*;

use crate::ui::auth::UserMenu;

/// Centered card used by login, signup and the password pages
#[component]
pub fn GuestLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            <main class="flex-1 flex items-center justify-center p-4">
                <div class="w-full max-w-md bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
                    {children()}
                </div>
            </main>
        </div>
    }
}

/// Header with the user menu above the page content
#[component]
pub fn ConsoleLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            <UserMenu />
            <main class="flex-1 max-w-7xl w-full mx-auto px-4 py-8">
                {children()}
            </main>
        </div>
    }
}
