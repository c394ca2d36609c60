//! # Inventory Ledger
//!
//! Stock tracking, deliberately independent of the order flow.
//!
//! Each item records its total `stock` and a cumulative `sell_quantity`;
//! what is left on the shelf is always derived, never stored, so the two
//! figures cannot drift apart. Orders do not decrement stock; staff record
//! sold units by hand, which is how the café actually runs its counts.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation;

// =============================================================================
// Inventory Item
// =============================================================================

/// One stocked ingredient or product.
///
/// ## Invariant
/// `0 ≤ sell_quantity ≤ stock`, enforced on every mutation, not just at
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier assigned by the persistence service.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Total stocked units. Fixed at creation in this design.
    pub stock: i64,

    /// Cumulative units recorded as sold, within `[0, stock]`.
    pub sell_quantity: i64,
}

impl InventoryItem {
    /// Units left on the shelf: `stock − sell_quantity`.
    ///
    /// Derived on every read; there is no stored field to fall out of
    /// sync with.
    #[inline]
    pub fn remaining(&self) -> i64 {
        self.stock - self.sell_quantity
    }

    /// Checks a candidate sell quantity against the `[0, stock]` bound
    /// without touching the item.
    ///
    /// Callers holding only a cached copy use this to reject bad input
    /// before sending it anywhere.
    pub fn check_sell_quantity(&self, value: i64) -> CoreResult<()> {
        if value < 0 || value > self.stock {
            return Err(CoreError::OutOfRange {
                field: "sell quantity".to_string(),
                value,
                min: 0,
                max: self.stock,
            });
        }
        Ok(())
    }

    /// Replaces the recorded sell quantity.
    ///
    /// Fails with `OutOfRange` if `value` falls outside `[0, stock]`; the
    /// item is untouched in that case.
    pub fn set_sell_quantity(&mut self, value: i64) -> CoreResult<()> {
        self.check_sell_quantity(value)?;
        self.sell_quantity = value;
        Ok(())
    }
}

// =============================================================================
// Inventory Draft
// =============================================================================

/// A validated new inventory item awaiting persistence.
///
/// The service assigns the id; new items always start with nothing sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDraft {
    pub name: String,
    pub stock: i64,
}

impl InventoryDraft {
    /// Validates a name and an initial stock figure.
    ///
    /// Requires a non-blank name and positive stock; fails with
    /// `ValidationError` otherwise.
    pub fn new(name: &str, stock: i64) -> CoreResult<InventoryDraft> {
        let name = validation::validate_name("name", name)?;
        validation::validate_stock(stock)?;

        Ok(InventoryDraft { name, stock })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
