//! # Client Error Types
//!
//! Error types for service communication.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Service             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidBaseUrl │  │  Transport      │  │  Status                 │ │
//! │  │  InvalidConfig  │  │  (network/DNS/  │  │  (non-2xx with the      │ │
//! │  │                 │  │   timeout)      │  │   service's message)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │     Decode      │   Transport and 5xx are transient: the caller     │
//! │  │                 │   keeps its local state and tells the user.       │
//! │  │  Decode         │   Everything else points at a bug or bad setup.   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering all service-communication failures.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The configured base URL is unusable.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Some other configuration value is unusable.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response (network, DNS, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    // =========================================================================
    // Service Errors
    // =========================================================================
    /// The service answered with a non-success status.
    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    // =========================================================================
    // Decode Errors
    // =========================================================================
    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidBaseUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Whether the failure is worth retrying or at least presenting as
    /// temporary. The session layer keeps its local state untouched for
    /// these and surfaces a notice instead.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether the failure points at local configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidBaseUrl(_) | ClientError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ClientError::Transport("connection refused".into()).is_transient());
        assert!(ClientError::Status {
            status: 503,
            message: "maintenance".into()
        }
        .is_transient());

        assert!(!ClientError::Status {
            status: 404,
            message: "no such order".into()
        }
        .is_transient());
        assert!(!ClientError::Decode("missing field".into()).is_transient());
        assert!(!ClientError::InvalidBaseUrl("not a url".into()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Status {
            status: 422,
            message: "table number is required".into(),
        };
        assert_eq!(
            err.to_string(),
            "Service returned 422: table number is required"
        );
    }
}
