//! Login page component

use leptos::prelude::*;

use super::layout::GuestLayout;
use crate::ui::auth::LoginForm;

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <GuestLayout>
            <LoginForm />
        </GuestLayout>
    }
}
