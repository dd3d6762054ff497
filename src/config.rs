//! Application configuration
//!
//! All endpoints and keys can be overridden through environment variables;
//! the compiled-in defaults point at the production deployment.

use std::env;

const DEFAULT_API_BASE_URL: &str =
    "https://diqe9uc0ki.execute-api.ap-southeast-1.amazonaws.com/dev";
const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration resolved once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the aggregation API
    pub api_base_url: String,

    /// Base URL of the identity provider REST API
    pub auth_base_url: String,

    /// Web API key passed to every identity provider call
    pub auth_api_key: String,

    /// Timeout applied to every outbound HTTP request
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// Build the configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("MARKETPULSE_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            auth_base_url: env::var("MARKETPULSE_AUTH_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_BASE_URL.to_string()),
            auth_api_key: env::var("MARKETPULSE_AUTH_API_KEY").unwrap_or_default(),
            http_timeout_secs: env::var("MARKETPULSE_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
