//! Identity service boundary.
//!
//! [`IdentityService`] and [`UsersApi`] are the contracts the gateway and
//! pages depend on; [`ApiClient`] implements both over HTTP against the
//! user-management backend:
//! - POST /users/signup - Register a new user
//! - POST /login/access-token - Exchange credentials for a token (form)
//! - GET /users/me - Current user's profile (bearer)
//! - POST /password-recovery/{email} - Send a recovery email
//! - POST /reset-password/ - Set a new password with a recovery token
//! - GET /users/?skip=&limit= - Page of users (bearer)

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::config::Config;
use crate::core::credentials::CredentialSlot;
use crate::core::models::{
    LoginInput, Message, NewPassword, Token, UserPublic, UserRegister, UsersPublic,
};

/// Failure of a call to the backend
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from a non-success response body.
    ///
    /// Understands the backend's error envelope
    /// (`{"message": {"description": ...}}`) as well as plain `detail`
    /// strings and validation-error lists.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::Status { status, message }
    }

    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorEnvelope>,
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorEnvelope {
    Structured { description: String },
    Plain(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
struct FieldError {
    msg: String,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        let message = match (self.message, self.detail) {
            (Some(ErrorEnvelope::Structured { description }), _) => description,
            (Some(ErrorEnvelope::Plain(text)), _) => text,
            (None, Some(ErrorDetail::Text(text))) => text,
            (None, Some(ErrorDetail::Fields(fields))) => fields
                .into_iter()
                .map(|f| f.msg)
                .collect::<Vec<_>>()
                .join(", "),
            (None, None) => return None,
        };
        Some(message).filter(|m| !m.trim().is_empty())
    }
}

/// Authentication endpoints of the backend
#[allow(async_fn_in_trait)]
pub trait IdentityService {
    /// Create an account
    async fn register(&self, registration: &UserRegister) -> Result<UserPublic, ApiError>;

    /// Exchange email/password for a bearer token
    async fn exchange_credentials(&self, credentials: &LoginInput) -> Result<Token, ApiError>;

    /// Profile of the caller; requires the ambient credential
    async fn fetch_own_profile(&self) -> Result<UserPublic, ApiError>;

    /// Ask the backend to email a recovery link
    async fn recover_password(&self, email: &str) -> Result<Message, ApiError>;

    /// Set a new password using a recovery token
    async fn reset_password(&self, reset: &NewPassword) -> Result<Message, ApiError>;
}

/// User administration endpoints
#[allow(async_fn_in_trait)]
pub trait UsersApi {
    async fn list_users(&self, skip: usize, limit: usize) -> Result<UsersPublic, ApiError>;
}

/// HTTP client for the backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: CredentialSlot,
}

impl ApiClient {
    /// Create a client for the configured API. Requests carry whatever token
    /// is in `credentials` at the time they are sent.
    pub fn new(config: &Config, credentials: CredentialSlot) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base(),
            credentials,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `password-recovery/<email>`, with the address encoded as one segment
    fn recovery_url(&self, email: &str) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.endpoint("password-recovery"))
            .map_err(|e| ApiError::Transport(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport("API URL cannot have a path".to_string()))?
            .push(email);
        Ok(url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.current() {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_body(status.as_u16(), &body);
            tracing::debug!("API request failed ({}): {}", status, err);
            Err(err)
        }
    }
}

impl IdentityService for ApiClient {
    async fn register(&self, registration: &UserRegister) -> Result<UserPublic, ApiError> {
        let request = self.http.post(self.endpoint("users/signup")).json(registration);
        self.send(request).await
    }

    async fn exchange_credentials(&self, credentials: &LoginInput) -> Result<Token, ApiError> {
        let request = self
            .http
            .post(self.endpoint("login/access-token"))
            .form(credentials);
        self.send(request).await
    }

    async fn fetch_own_profile(&self) -> Result<UserPublic, ApiError> {
        let request = self.http.get(self.endpoint("users/me"));
        self.send(request).await
    }

    async fn recover_password(&self, email: &str) -> Result<Message, ApiError> {
        let request = self.http.post(self.recovery_url(email)?);
        self.send(request).await
    }

    async fn reset_password(&self, reset: &NewPassword) -> Result<Message, ApiError> {
        let request = self.http.post(self.endpoint("reset-password/")).json(reset);
        self.send(request).await
    }
}

impl UsersApi for ApiClient {
    async fn list_users(&self, skip: usize, limit: usize) -> Result<UsersPublic, ApiError> {
        let request = self
            .http
            .get(self.endpoint("users/"))
            .query(&[("skip", skip), ("limit", limit)]);
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let config = Config {
            api_url: "http://localhost:8000/".to_string(),
        };
        ApiClient::new(&config, CredentialSlot::new())
    }

    // ========================================================================
    // Error body normalization
    // ========================================================================

    #[test]
    fn test_structured_envelope_description() {
        let body = r#"{
            "object": "login.post",
            "code": 400,
            "status": "error",
            "message": {
                "http_code": 400,
                "error_code": 1002,
                "category": "http_error",
                "description": "Incorrect email or password",
                "request_id": "0b9c"
            }
        }"#;

        let err = ApiError::from_body(400, body);

        assert_eq!(err.to_string(), "Incorrect email or password");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_plain_detail_string() {
        let err = ApiError::from_body(401, r#"{"detail": "Could not validate credentials"}"#);
        assert_eq!(err.to_string(), "Could not validate credentials");
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "password"], "msg": "field required", "type": "missing"}
        ]}"#;

        let err = ApiError::from_body(422, body);

        assert_eq!(
            err.to_string(),
            "value is not a valid email address, field required"
        );
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status() {
        assert_eq!(ApiError::from_body(502, "<html>").to_string(), "HTTP 502");
        assert_eq!(ApiError::from_body(500, "").to_string(), "HTTP 500");
        assert_eq!(ApiError::from_body(404, r#"{"detail": ""}"#).to_string(), "HTTP 404");
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection refused"));
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let client = client();
        assert_eq!(
            client.endpoint("login/access-token"),
            "http://localhost:8000/api/v1/login/access-token"
        );
        assert_eq!(
            client.endpoint("/users/me"),
            "http://localhost:8000/api/v1/users/me"
        );
    }

    #[test]
    fn test_recovery_url_encodes_email_as_one_segment() {
        let client = client();

        assert_eq!(
            client.recovery_url("a@b.com").unwrap().as_str(),
            "http://localhost:8000/api/v1/password-recovery/a@b.com"
        );
        assert_eq!(
            client.recovery_url("x#y@ex.com").unwrap().path(),
            "/api/v1/password-recovery/x%23y@ex.com"
        );
        assert_eq!(
            client.recovery_url("50%@ex.com").unwrap().path(),
            "/api/v1/password-recovery/50%25@ex.com"
        );
        assert_eq!(
            client.recovery_url("../admin?x=1").unwrap().path(),
            "/api/v1/password-recovery/..%2Fadmin%3Fx=1"
        );
    }

    #[test]
    fn test_authorized_attaches_current_token() {
        let credentials = CredentialSlot::new();
        let config = Config::with_api_url("http://localhost:8000");
        let client = ApiClient::new(&config, credentials.clone());

        let anonymous = client
            .authorized(client.http.get(client.endpoint("users/me")))
            .build()
            .unwrap();
        assert!(anonymous.headers().get(AUTHORIZATION).is_none());

        credentials.apply(Some("abc"));
        let request = client
            .authorized(client.http.get(client.endpoint("users/me")))
            .build()
            .unwrap();
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer abc");
    }
}
