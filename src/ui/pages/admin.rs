//! Admin page: paged list of users
//!
//! The page number lives in the `page` query parameter so it survives
//! reloads and can be linked to.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use super::layout::ConsoleLayout;
use crate::core::models::UserPublic;
use crate::core::navigation::Destination;
use crate::core::users::{self, fetch_users_page};
use crate::ui::auth::use_auth_context;

fn page_href(page: usize) -> String {
    format!("{}?page={}", Destination::Admin.path(), page)
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth_context();
    let query = use_query_map();

    let page = Memo::new(move |_| {
        query
            .with(|q| q.get("page"))
            .and_then(|p| p.parse::<usize>().ok())
            .map_or(1, users::clamp_page)
    });

    let users = LocalResource::new(move || {
        let page = page.get();
        let api = auth.api();
        let cache = auth.cache();
        // Refetch whenever the cache is invalidated or cleared
        cache.generation();
        async move { fetch_users_page(&api, &cache, page).await }
    });

    let current_id = move || auth.user().map(|u| u.id);

    view! {
        <ConsoleLayout>
            <h1 class="text-2xl font-bold text-theme-primary mb-6">"Users Management"</h1>

            <Suspense fallback=move || view! { <p>"Loading users..."</p> }>
                {move || {
                    users.get().map(|result| match result {
                        Ok(list) => {
                            let page_count = users::page_count(list.count);
                            let current = page.get();
                            view! {
                                <table class="w-full text-left">
                                    <thead>
                                        <tr>
                                            <th>"Full name"</th>
                                            <th>"Email"</th>
                                            <th>"Role"</th>
                                            <th>"Status"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {list
                                            .data
                                            .into_iter()
                                            .map(|user| view! { <UserRow user=user current_id=current_id() /> })
                                            .collect::<Vec<_>>()}
                                    </tbody>
                                </table>
                                <div class="flex items-center justify-end gap-4 mt-4 text-sm">
                                    <Show when=move || { current > 1 }>
                                        <A href=page_href(current.saturating_sub(1))>"Previous"</A>
                                    </Show>
                                    <span>{format!("Page {} of {}", current, page_count)}</span>
                                    <Show when=move || { current < page_count }>
                                        <A href=page_href(current.saturating_add(1))>"Next"</A>
                                    </Show>
                                </div>
                            }
                                .into_any()
                        }
                        Err(err) => {
                            view! {
                                <div class="flex items-center gap-4">
                                    <p class="text-red-600">{err.to_string()}</p>
                                    <button
                                        class="px-3 py-1.5 text-sm font-medium text-theme-secondary hover:text-theme-primary"
                                        on:click=move |_| users::refresh_users(&auth.cache())
                                    >
                                        "Retry"
                                    </button>
                                </div>
                            }
                                .into_any()
                        }
                    })
                }}
            </Suspense>
        </ConsoleLayout>
    }
}

#[component]
fn UserRow(user: UserPublic, current_id: Option<uuid::Uuid>) -> impl IntoView {
    let is_you = current_id == Some(user.id);
    let full_name = user.full_name.clone().unwrap_or_else(|| "N/A".to_string());
    let status = if user.is_active { "Active" } else { "Inactive" };

    view! {
        <tr>
            <td>
                {full_name}
                {is_you.then(|| view! { <span class="ml-2 text-xs text-theme-tertiary">"(You)"</span> })}
            </td>
            <td>{user.email}</td>
            <td>{if user.is_superuser { "Superuser" } else { user.role.label() }}</td>
            <td>{status}</td>
        </tr>
    }
}
