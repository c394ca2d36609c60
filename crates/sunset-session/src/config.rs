//! # Session Configuration
//!
//! Store identity loaded at startup and stamped onto every printed payload.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SUNSET_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so the session hands out clones freely.

use serde::{Deserialize, Serialize};

/// Identity of the store running this session.
///
/// Everything here is presentation data: it never participates in pricing
/// or persistence, it only decorates receipts and kitchen tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Store name printed at the top of receipts and tickets.
    pub store_name: String,

    /// Closing line printed at the bottom of receipts.
    pub receipt_footer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            store_name: "The Sunset Café".to_string(),
            receipt_footer: "THANK YOU".to_string(),
        }
    }
}

impl SessionConfig {
    /// Creates a SessionConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SUNSET_STORE_NAME`: Override store name
    /// - `SUNSET_RECEIPT_FOOTER`: Override receipt footer line
    pub fn from_env() -> Self {
        let mut config = SessionConfig::default();

        if let Ok(store_name) = std::env::var("SUNSET_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(footer) = std::env::var("SUNSET_RECEIPT_FOOTER") {
            config.receipt_footer = footer;
        }

        config
    }
}
