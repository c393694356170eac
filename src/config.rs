//! Client configuration: where the backend lives and which bearer token to send.
//!
//! The token is captured once, here, and moved into the `ApiClient`; nothing
//! re-reads it afterwards.

use crate::error::Result;
use std::env;
use tracing::{debug, warn};

/// Backend origin plus the `/api` prefix.
pub const DEFAULT_API_URL: &str = "https://verbose-cod-5j74gxwp7r63wj4-5001.app.github.dev/api";

/// Environment variable overriding the backend URL.
pub const API_URL_VAR: &str = "CHARGEBOOK_API_URL";

/// Environment variable holding the session token.
pub const TOKEN_VAR: &str = "CHARGEBOOK_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Builds the configuration from the process environment (and `.env`, if present).
    ///
    /// A missing URL falls back to [`DEFAULT_API_URL`]; a missing or empty token
    /// yields `None`, which the client sends as `Bearer null`.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let base_url = match env::var(API_URL_VAR) {
            Ok(url) => url,
            Err(env::VarError::NotPresent) => DEFAULT_API_URL.to_string(),
            Err(e) => return Err(e.into()),
        };

        let token = match env::var(TOKEN_VAR) {
            Ok(token) => Some(token),
            Err(env::VarError::NotPresent) => None,
            Err(e) => return Err(e.into()),
        };
        if token.as_deref().map_or(true, str::is_empty) {
            warn!("{} is not set; requests will carry 'Bearer null'", TOKEN_VAR);
        }

        let config = Self::new(base_url, token);
        debug!(base_url = %config.base_url, "Loaded client configuration");
        Ok(config)
    }

    /// Applies command-line overrides on top of this configuration.
    pub fn with_overrides(self, base_url: Option<String>, token: Option<String>) -> Self {
        Self::new(
            base_url.unwrap_or(self.base_url),
            token.or(self.token),
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, None)
    }
}
