//! Application pages module
//!
//! - Home, settings and admin pages (signed-in users)
//! - Login, signup, password recovery and reset pages (guests)
//! - Not-found fallback

mod admin;
mod home;
mod layout;
mod login;
mod not_found;
mod recover_password;
mod reset_password;
mod settings;
mod signup;

pub use admin::AdminPage;
pub use home::HomePage;
pub use layout::{ConsoleLayout, GuestLayout};
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use recover_password::RecoverPasswordPage;
pub use reset_password::ResetPasswordPage;
pub use settings::SettingsPage;
pub use signup::SignupPage;
