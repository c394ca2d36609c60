//! # Session Error Type
//!
//! One error surface for everything a session operation can raise.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in a Session Call                         │
//! │                                                                         │
//! │  Shell / UI                     Session                                 │
//! │  ──────────                     ───────                                 │
//! │                                                                         │
//! │  complete_order("o1")                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Controller method                                               │  │
//! │  │  Result<T, SessionError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule rejected?  ── CoreError::InvalidTransition ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Wire failed?    ── ClientError::Transport ──── SessionError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Either way, local session state is exactly what it was before the     │
//! │  call unless the call succeeded.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sunset_client::ClientError;
use sunset_core::CoreError;
use thiserror::Error;

/// Convenience alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Anything a session operation can fail with.
///
/// Both sources keep their own `Display` output; this enum only decides
/// which family a failure belongs to so a shell can pick a reaction.
#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Rule Rejections (local, permanent until the input changes)
    // =========================================================================
    /// A domain rule rejected the operation before or after the wire.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Persistence Failures (remote, typically transient)
    // =========================================================================
    /// The persistence service could not be reached or refused the call.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl SessionError {
    /// Whether retrying the same call unchanged could plausibly succeed.
    ///
    /// Rule rejections are never transient: the same input will be
    /// rejected again until the operator changes it.
    pub fn is_transient(&self) -> bool {
        match self {
            SessionError::Core(_) => false,
            SessionError::Client(err) => err.is_transient(),
        }
    }

    /// Machine-readable code for a shell's switch statement.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Core(CoreError::Validation(_)) => "VALIDATION_ERROR",
            SessionError::Core(CoreError::InvalidTransition { .. }) => "INVALID_TRANSITION",
            SessionError::Core(CoreError::OutOfRange { .. }) => "OUT_OF_RANGE",
            SessionError::Core(CoreError::NonMonotonic { .. }) => "NON_MONOTONIC",
            SessionError::Core(CoreError::InvalidQuantity { .. }) => "INVALID_QUANTITY",
            SessionError::Client(ClientError::Status { .. }) => "SERVICE_ERROR",
            SessionError::Client(_) => "CONNECTION_ERROR",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
