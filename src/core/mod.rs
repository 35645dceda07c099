//! Core session and authentication logic, independent of the UI

pub mod config;
pub mod credentials;
pub mod gateway;
pub mod guards;
pub mod identity;
pub mod models;
pub mod navigation;
pub mod query_cache;
pub mod session;
pub mod users;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use credentials::CredentialSlot;
pub use gateway::{AuthError, AuthGateway};
pub use guards::{GuardDecision, RouteAccess};
pub use identity::{ApiClient, ApiError, IdentityService, UsersApi};
pub use models::*;
pub use navigation::{Destination, Navigator, SignalNavigator};
pub use query_cache::{MemoryQueryCache, QueryCache, QueryKey};
pub use session::{Session, SessionStore};
