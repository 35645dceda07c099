pub mod auth;
pub mod pages;

pub use auth::{AuthContext, provide_auth_context, use_auth_context};
