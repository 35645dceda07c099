//! User menu component
//!
//! Header navigation for signed-in pages: greeting, links to the console
//! sections and the logout action.

use leptos::prelude::*;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::navigation::Destination;

/// User menu component for the header
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();

    let menu_open = RwSignal::new(false);

    let handle_logout = move |_| {
        menu_open.set(false);
        auth.logout();
    };

    let is_superuser = move || auth.user().is_some_and(|u| u.is_superuser);

    view! {
        <header class="border-b border-theme">
            <nav class="max-w-7xl mx-auto px-4 flex items-center justify-between h-16">
                <div class="flex items-center gap-6">
                    <A href=Destination::Home.path() attr:class="text-xl font-bold text-theme-primary">
                        "Admin Console"
                    </A>
                    <A href=Destination::Settings.path() attr:class="text-theme-secondary hover:text-theme-primary">
                        "User Settings"
                    </A>
                    <Show when=is_superuser>
                        <A href=Destination::Admin.path() attr:class="text-theme-secondary hover:text-theme-primary">
                            "Admin"
                        </A>
                    </Show>
                </div>

                <div class="relative">
                    <button
                        class="px-3 py-1.5 text-sm font-medium text-theme-secondary hover:text-theme-primary"
                        on:click=move |_| menu_open.update(|open| *open = !*open)
                    >
                        {move || {
                            auth.user()
                                .map(|u| u.display_name().to_string())
                                .unwrap_or_default()
                        }}
                    </button>
                    <Show when=move || menu_open.get()>
                        <div class="absolute right-0 mt-2 w-48 bg-theme-primary border border-theme rounded-lg shadow-lg py-1">
                            <A
                                href=Destination::Settings.path()
                                attr:class="block px-4 py-2 text-sm text-theme-primary hover:bg-theme-secondary"
                            >
                                "My profile"
                            </A>
                            <button
                                class="block w-full text-left px-4 py-2 text-sm text-red-600 hover:bg-theme-secondary"
                                on:click=handle_logout
                            >
                                "Log out"
                            </button>
                        </div>
                    </Show>
                </div>
            </nav>
        </header>
    }
}
