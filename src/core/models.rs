//! Wire models shared with the user-management backend.
//!
//! Field names follow the backend's JSON schema exactly, so these types are
//! (de)serialized as-is by the API client and the session store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Developer,
    Admin,
    #[default]
    User,
}

impl UserRole {
    /// Label used by role badges
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Developer => "Developer",
            UserRole::Admin => "Admin",
            UserRole::User => "User",
        }
    }
}

/// Public profile of a user, as returned by `/users/me` and the users list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub role: UserRole,
}

fn default_active() -> bool {
    true
}

impl UserPublic {
    /// Name to show in greetings, falling back to the email
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// One page of users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsersPublic {
    pub data: Vec<UserPublic>,
    pub count: usize,
}

/// Access token returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// OAuth2 password-grant form. `username` carries the email address.
#[derive(Debug, Clone, Serialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: email.into(),
            password: password.into(),
        }
    }
}

/// Self-service registration request
#[derive(Debug, Clone, Serialize)]
pub struct UserRegister {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Password reset request (token comes from the recovery email)
#[derive(Debug, Clone, Serialize)]
pub struct NewPassword {
    pub token: String,
    pub new_password: String,
}

/// Generic acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub message: String,
}
