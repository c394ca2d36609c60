//! # Cart
//!
//! The staging area for an order being assembled at the register.
//!
//! A cart is session-local and never persisted: submitting it produces an
//! order (or a walk-in sale), clearing it either way. Totals and change
//! are always derived on demand through the pricing engine; nothing here
//! caches a number that could go stale when a line changes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::items::{LineItem, LineItems};
use crate::money::Money;
use crate::pricing::{self, Totals};
use crate::types::MenuItem;

// =============================================================================
// Cart
// =============================================================================

/// An in-progress order: lines, a table label, and cash tendered so far.
///
/// ## Invariants
/// - Lines are unique by item id (merging increments, never duplicates)
/// - Every line has quantity ≥ 1 (decreasing past 1 removes the line)
/// - `table_number` is a free-form label; empty means not yet assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines being assembled.
    #[ts(as = "Vec<LineItem>")]
    pub items: LineItems,

    /// Table label for dine-in orders. Free-form ("5", "Patio 2", …).
    pub table_number: String,

    /// Cash tendered, entered before finalization. `None` until typed.
    pub cash_received: Option<Money>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of a menu item, merging into an existing line if the
    /// item is already in the cart.
    pub fn add_item(&mut self, item: &MenuItem) -> CoreResult<()> {
        self.items.merge(item, 1)
    }

    /// Increments an existing line by 1. Unknown ids are a no-op.
    pub fn increase(&mut self, item_id: &str) -> bool {
        self.items.increase(item_id)
    }

    /// Decrements an existing line by 1, removing it at quantity 1.
    /// Unknown ids are a no-op.
    pub fn decrease(&mut self, item_id: &str) -> bool {
        self.items.decrease(item_id)
    }

    /// Stores the raw cash input. Change is derived on read, never here.
    pub fn set_cash_received(&mut self, amount: Option<Money>) {
        self.cash_received = amount;
    }

    /// Resets every field back to the empty cart.
    ///
    /// Called after a successful submission or an explicit cancel.
    pub fn clear(&mut self) {
        self.items.clear();
        self.table_number.clear();
        self.cash_received = None;
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrows the lines for pricing or snapshotting.
    pub fn lines(&self) -> &[LineItem] {
        self.items.as_slice()
    }

    /// Current subtotal / service tax / grand total.
    pub fn totals(&self) -> CoreResult<Totals> {
        Totals::compute(self.items.as_slice())
    }

    /// Change owed against the current cart contents.
    ///
    /// `None` until cash has been entered. Recomputed from the live lines
    /// on every call, so editing the cart after typing the cash amount
    /// keeps the figure honest. Negative change means insufficient cash;
    /// it is reported, not rejected.
    pub fn change(&self) -> CoreResult<Option<Money>> {
        match self.cash_received {
            None => Ok(None),
            Some(cash) => {
                let total = pricing::grand_total(self.items.as_slice())?;
                Ok(Some(pricing::change(cash, total)))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
