//! # Client Configuration
//!
//! Where the persistence service lives and how long to wait for it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Configuration Priority                              │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SUNSET_API_URL=http://192.168.1.20:4000/api                        │
//! │     SUNSET_HTTP_TIMEOUT_SECS=15                                        │
//! │     SUNSET_CONNECT_TIMEOUT_SECS=5                                      │
//! │                                                                         │
//! │  2. Default Values                                                     │
//! │     http://localhost:4000/api, 10s connect, 30s request                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Connection settings for the persistence service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service API. Routes are joined under it, so a
    /// path prefix like `/api` is respected.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Per-request timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ClientConfig {
    /// Builds the config from defaults plus environment overrides, then
    /// validates it.
    pub fn load() -> ClientResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Config pointed at a specific service, defaults elsewhere.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidBaseUrl(format!(
                "unsupported scheme '{}', expected http or https",
                url.scheme()
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SUNSET_API_URL") {
            debug!(url = %url, "Overriding service URL from environment");
            self.base_url = url;
        }

        if let Ok(secs) = std::env::var("SUNSET_HTTP_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.parse::<u64>() {
                self.request_timeout_secs = parsed;
            }
        }

        if let Ok(secs) = std::env::var("SUNSET_CONNECT_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.parse::<u64>() {
                self.connect_timeout_secs = parsed;
            }
        }
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The parsed base URL.
    pub fn base_url(&self) -> ClientResult<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
