//! # Error Types
//!
//! Domain-specific error types for sunset-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sunset-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  sunset-client errors (separate crate)                                 │
//! │  └── ClientError      - Persistence service failures                   │
//! │                                                                         │
//! │  sunset-session errors (separate crate)                                │
//! │  └── SessionError     - What the UI shell sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Shell              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, bounds, timestamps)
//! 3. Errors are enum variants, never String
//! 4. Every rejection leaves the entity untouched; callers surface a notice

use chrono::{DateTime, Utc};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These errors represent rule violations in pricing, order transitions,
/// inventory bounds, or shift bookkeeping. They are always recoverable:
/// the operation is rejected and the caller's state is left as it was.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Illegal state-machine move on an order.
    ///
    /// ## When This Occurs
    /// - Adding an item to a completed order
    /// - Completing an order twice
    #[error("Cannot {action} an order that is {status}")]
    InvalidTransition { action: String, status: String },

    /// Numeric value outside its permitted bounds.
    ///
    /// ## When This Occurs
    /// - Sell quantity below 0 or above the item's total stock
    /// - Shift index beyond the currently open shift
    #[error("{field} {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Shift closing timestamp not strictly after the previous one.
    ///
    /// Guards against clock skew and duplicate close clicks: two closings
    /// at the same instant would create an empty, unaddressable shift.
    #[error("Shift closing {attempted} is not after previous closing {last}")]
    NonMonotonic {
        last: DateTime<Utc>,
        attempted: DateTime<Utc>,
    },

    /// Line quantity below 1.
    ///
    /// A line at quantity 0 is removed from its container, never stored,
    /// so every surviving line must carry a positive quantity.
    #[error("Quantity {quantity} for {name} must be at least 1")]
    InvalidQuantity { name: String, quantity: i64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before domain logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
