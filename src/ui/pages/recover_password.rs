//! Password recovery page
//!
//! Asks the backend to email a reset link. The page stays put and shows the
//! backend's confirmation message.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::layout::GuestLayout;
use crate::core::navigation::Destination;
use crate::core::validation;
use crate::ui::auth::use_auth_context;

#[component]
pub fn RecoverPasswordPage() -> impl IntoView {
    let auth = use_auth_context();

    let email = RwSignal::new(String::new());
    let email_error = RwSignal::new(None::<String>);
    let sent = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();
        sent.set(None);

        let value = email.get().trim().to_string();
        let error = validation::message(validation::validate_email(&value));
        if error.is_some() || auth.is_pending() {
            email_error.set(error);
            return;
        }

        let gateway = auth.gateway();
        spawn_local(async move {
            if let Ok(message) = gateway.recover_password(&value).await {
                sent.set(Some(message.message));
            }
        });
    };

    view! {
        <GuestLayout>
            <form on:submit=on_submit class="space-y-5">
                <h2 class="text-2xl font-bold text-theme-primary text-center">"Password Recovery"</h2>
                <p class="text-sm text-theme-secondary text-center">
                    "A password recovery email will be sent to the registered account."
                </p>

                {move || auth.error().map(|error| view! { <p class="text-sm text-red-600">{error}</p> })}
                {move || sent.get().map(|message| view! { <p class="text-sm text-green-600">{message}</p> })}

                <div>
                    <label for="email" class="block text-sm font-medium text-theme-primary mb-1">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        class="input-base"
                        class:border-red-500=move || email_error.get().is_some()
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            email.set(event_target_value(&ev));
                            email_error.set(None);
                        }
                    />
                    {move || email_error.get().map(|e| view! { <p class="mt-1 text-sm text-red-500">{e}</p> })}
                </div>

                <button type="submit" class="btn-primary w-full" disabled=move || auth.is_pending()>
                    "Continue"
                </button>

                <div class="text-center text-sm">
                    <A href=Destination::Login.path() attr:class="text-accent-primary">"Back to log in"</A>
                </div>
            </form>
        </GuestLayout>
    }
}
