//! Client configuration loaded from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Default API root when `STOREFRONT_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/v1";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root of the storefront REST API.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("STOREFRONT_API_URL").unwrap_or(defaults.api_url),
            timeout_secs: env::var("STOREFRONT_API_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}
