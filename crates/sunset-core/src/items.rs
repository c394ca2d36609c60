//! # Line Items
//!
//! The identity-merge collection shared by the cart and the order state
//! machine. Both containers follow the same rule: lines are unique by
//! `item_id`, adding an existing item bumps its quantity, and a quantity
//! reaching 0 removes the line rather than storing it.
//!
//! Keeping one collection type means the merge rule cannot drift between
//! the register screen and the order board.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::MenuItem;

// =============================================================================
// Line Item
// =============================================================================

/// One menu item plus a quantity inside a cart or order.
///
/// ## Price Freezing
/// `name` and `unit_price` are captured when the line is first created.
/// Re-pricing or renaming the menu item later never rewrites lines that
/// already exist; merging only ever touches `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Menu item id this line refers to.
    pub item_id: String,

    /// Item name at the time the line was created (frozen).
    pub name: String,

    /// Unit price at the time the line was created (frozen).
    pub unit_price: Money,

    /// Units on this line. Always ≥ 1; a line never sits at 0.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line from a menu item, freezing its name and price.
    pub fn from_menu_item(item: &MenuItem, quantity: i64) -> Self {
        LineItem {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
        }
    }

    /// Unit price × quantity for this line.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Line Item Collection
// =============================================================================

/// Ordered collection of lines, unique by `item_id`.
///
/// ## Invariants
/// - At most one line per `item_id` (merging increments, never duplicates)
/// - Every line has quantity ≥ 1 (0 removes the line)
/// - Insertion order is preserved (the UI renders lines in add order)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItems(Vec<LineItem>);

impl LineItems {
    /// Creates an empty collection.
    pub fn new() -> Self {
        LineItems(Vec::new())
    }

    /// Merges a menu item into the collection.
    ///
    /// ## Behavior
    /// - If the item is already present: quantity += `quantity`
    ///   (the existing line keeps its frozen price)
    /// - Otherwise: appends a new line frozen at the item's current price
    ///
    /// Fails with `InvalidQuantity` if `quantity < 1`; the collection is
    /// untouched in that case.
    pub fn merge(&mut self, item: &MenuItem, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity {
                name: item.name.clone(),
                quantity,
            });
        }

        if let Some(line) = self.0.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity += quantity;
            return Ok(());
        }

        self.0.push(LineItem::from_menu_item(item, quantity));
        Ok(())
    }

    /// Increments the quantity of an existing line by 1.
    ///
    /// Returns `false` if no line carries `item_id`; unknown ids are a
    /// no-op because the UI can only press buttons on rows it renders.
    pub fn increase(&mut self, item_id: &str) -> bool {
        match self.0.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => {
                line.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Decrements the quantity of an existing line by 1.
    ///
    /// A line at quantity 1 is removed outright; quantities never reach 0
    /// or go negative. Returns `false` if no line carries `item_id`.
    pub fn decrease(&mut self, item_id: &str) -> bool {
        match self.0.iter().position(|l| l.item_id == item_id) {
            Some(idx) => {
                if self.0[idx].quantity > 1 {
                    self.0[idx].quantity -= 1;
                } else {
                    self.0.remove(idx);
                }
                true
            }
            None => false,
        }
    }

    /// Removes all lines.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection holds no lines.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.0.iter().map(|l| l.quantity).sum()
    }

    /// Iterates over the lines in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.0.iter()
    }

    /// Borrows the lines as a slice (for the pricing functions).
    pub fn as_slice(&self) -> &[LineItem] {
        &self.0
    }

    /// Looks up a line by item id.
    pub fn get(&self, item_id: &str) -> Option<&LineItem> {
        self.0.iter().find(|l| l.item_id == item_id)
    }
}

impl<'a> IntoIterator for &'a LineItems {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<LineItem>> for LineItems {
    fn from(lines: Vec<LineItem>) -> Self {
        LineItems(lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
