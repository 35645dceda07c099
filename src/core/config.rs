//! Console configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.
//! The WASM build has no process environment, so `CONSOLE_API_URL` is also
//! read at compile time as a fallback.

/// Default backend address used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Path prefix of the versioned backend API
pub const API_PREFIX: &str = "/api/v1";

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without the API prefix
    /// Example: https://api.example.com
    pub api_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `API_URL` falls back to the compile-time `CONSOLE_API_URL`, then to
    /// [`DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        let api_url = std::env::var("API_URL")
            .ok()
            .or_else(|| option_env!("CONSOLE_API_URL").map(str::to_string))
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self { api_url }
    }

    /// Configuration pointing at a specific backend
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Versioned API root, e.g. `http://localhost:8000/api/v1`
    pub fn api_base(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), API_PREFIX)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
