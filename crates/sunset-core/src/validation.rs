//! # Validation
//!
//! Field checks shared by the draft constructors and the session layer.
//! The rules are deliberately small: the persistence service applies its
//! own constraints, these exist so obviously bad input fails before a
//! network round trip.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a table label.
///
/// ## Rules
/// - Must not be blank (free-form otherwise: "5", "Patio 2", "takeaway")
///
/// ## Returns
/// The trimmed label.
///
/// ```rust
/// use sunset_core::validation::validate_table_number;
///
/// assert_eq!(validate_table_number(" 12 ").unwrap(), "12");
/// assert!(validate_table_number("   ").is_err());
/// ```
pub fn validate_table_number(table: &str) -> ValidationResult<String> {
    let table = table.trim();

    if table.is_empty() {
        return Err(ValidationError::Required {
            field: "table number".to_string(),
        });
    }

    Ok(table.to_string())
}

/// Validates a display name for a menu or inventory item.
///
/// ## Rules
/// - Must not be blank
///
/// ## Returns
/// The trimmed name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(name.to_string())
}

/// Validates an initial stock figure.
///
/// ## Rules
/// - Must be at least 1; an item with nothing to sell has no business
///   on the ledger
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 1 {
        return Err(ValidationError::MustBePositive {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a menu price.
///
/// ## Rules
/// - Must not be negative
/// - Zero is allowed (complimentary items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
