//! Admin Console - user administration front-end
//!
//! Session handling, authentication workflows and route guards for a user
//! management backend, rendered with Leptos (SSR + hydration).

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
