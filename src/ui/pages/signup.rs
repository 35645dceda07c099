//! Sign-up page component

use leptos::prelude::*;

use super::layout::GuestLayout;
use crate::ui::auth::RegisterForm;

#[component]
pub fn SignupPage() -> impl IntoView {
    view! {
        <GuestLayout>
            <RegisterForm />
        </GuestLayout>
    }
}
