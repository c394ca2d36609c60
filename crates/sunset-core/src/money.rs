//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Service tax is 5% of the whole subtotal, so odd subtotals produce     │
//! │  fractional paisa that must survive further addition intact:           │
//! │    5% of Rs 3001 = Rs 150.05, exactly, not 150.050000000000001         │
//! │                                                                         │
//! │  OUR SOLUTION: Fixed-Point Decimals (rust_decimal)                      │
//! │    Sums and percentages are exact; rounding happens ONCE, at the       │
//! │    display/formatting boundary, never between operations.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sunset_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::from_decimal(dec!(150.50));
//! let doubled = price * 2;
//! assert_eq!(doubled, Money::from_decimal(dec!(301.00)));
//!
//! // Display rounds (and pads) to two fractional digits
//! assert_eq!(price.to_string(), "Rs 150.50");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in rupees.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Exact fixed-point math; negative values are legal
///   (change for insufficient cash is negative and flagged, not rejected)
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Derives**: Full serde support; travels as a plain JSON number on the
///   café API wire
///
/// ## Where Money Flows
/// ```text
/// MenuItem.price ──► LineItem.unit_price ──► line_total ──► subtotal
///                                                              │
///                    change ◄── cash received      service tax ┘
///                                                              │
///                          Displayed as "Rs 150.50" ◄── grand total
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Creates a Money value from a decimal amount.
    ///
    /// ## Example
    /// ```rust
    /// use sunset_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::from_decimal(dec!(250.75));
    /// assert_eq!(price.amount(), dec!(250.75));
    /// ```
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use sunset_core::money::Money;
    ///
    /// let price = Money::from_rupees(3000);
    /// assert_eq!(price.to_string(), "Rs 3000.00");
    /// ```
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Returns the exact inner amount, with whatever scale it accumulated.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount rounded to two fractional digits.
    ///
    /// This is the only place precision is dropped. Half-way values round
    /// away from zero, matching what a cashier expects from a till:
    /// Rs 2.345 → Rs 2.35.
    #[inline]
    pub fn rounded(&self) -> Decimal {
        let mut amount = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        amount
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    ///
    /// ## Example
    /// ```rust
    /// use sunset_core::money::Money;
    ///
    /// let change = Money::from_rupees(4000) - Money::from_rupees(4200);
    /// assert!(change.is_negative()); // short Rs 200, caller warns
    /// ```
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is the formatting boundary: the exact inner amount is rounded to
/// two digits here and nowhere earlier.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs {}", self.rounded())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values. Exact, no rounding.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (for line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

/// Multiplication by a decimal rate (for percentage taxes).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, rate: Decimal) -> Self {
        Money(self.0 * rate)
    }
}

/// Summation over iterators of Money (for subtotals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
