//! Client configuration loaded from environment variables.
//!
//! All settings have defaults pointing at a local development backend so
//! the client works with zero configuration.

use std::time::Duration;

use therethen_shared::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STREAM_URL,
};

/// Backend addresses and transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address every API route is appended to (no trailing slash).
    /// Env: `THERETHEN_API_URL`
    /// Default: `http://localhost:8000/api`
    pub api_base_url: String,

    /// Realtime stream address.
    /// Env: `THERETHEN_STREAM_URL`
    /// Default: `ws://localhost:8000/ws/chat/`
    pub stream_url: String,

    /// Per-request timeout for API calls.
    /// Env: `THERETHEN_REQUEST_TIMEOUT_SECS`
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            stream_url: DEFAULT_STREAM_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("THERETHEN_API_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(url) = lookup("THERETHEN_STREAM_URL") {
            config.stream_url = url;
        }

        if let Some(val) = lookup("THERETHEN_REQUEST_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid THERETHEN_REQUEST_TIMEOUT_SECS, using default"
                    );
                }
            }
        }

        config
    }

    /// Config targeting a single host, e.g. a test server.
    pub fn for_base(api_base_url: impl Into<String>, stream_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            stream_url: stream_url.into(),
            ..Self::default()
        }
    }
}
