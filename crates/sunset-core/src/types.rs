//! # Domain Types
//!
//! Shared entity types used throughout Sunset POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │   SalesRecord   │   │    SaleLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  date           │   │  name           │       │
//! │  │  name           │   │  items: [Sale-  │   │  price          │       │
//! │  │  category       │   │    Line]        │   │  quantity       │       │
//! │  │  price          │   │  total          │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Carts and orders hold LineItem (items module); history holds the      │
//! │  flatter SaleLine, a frozen projection that never merges again.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entity ids are strings assigned by the persistence service; this crate
//! never generates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::items::LineItem;
use crate::money::Money;
use crate::validation;

// =============================================================================
// Menu Item
// =============================================================================

/// A menu item available for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique identifier assigned by the persistence service.
    pub id: String,

    /// Display name shown to staff and on receipts.
    pub name: String,

    /// Menu section, e.g. "Main Course" or "Beverages". Free-form string;
    /// grouping preserves whatever spelling the service returns.
    pub category: String,

    /// Current list price. Orders snapshot this at creation time, so
    /// re-pricing a menu item never alters an existing order.
    pub price: Money,
}

/// Validated fields for creating or updating a menu item.
///
/// The persistence service assigns ids on create; updates reuse an
/// existing id supplied alongside the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    pub name: String,
    pub category: String,
    pub price: Money,
}

impl MenuItemDraft {
    /// Requires a non-blank name and category and a non-negative price.
    pub fn new(name: &str, category: &str, price: Money) -> CoreResult<MenuItemDraft> {
        let name = validation::validate_name("name", name)?;
        let category = validation::validate_name("category", category)?;
        validation::validate_price(price)?;

        Ok(MenuItemDraft {
            name,
            category,
            price,
        })
    }
}

/// One menu section with its items, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// Groups menu items by category, categories ordered by first appearance.
///
/// No sorting: the service controls presentation order by the order it
/// returns items in.
pub fn group_by_category(items: &[MenuItem]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(CategoryGroup {
                category: item.category.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

/// Filters menu items by case-insensitive name substring.
///
/// A blank term matches everything, so an empty search box shows the full
/// menu rather than none of it.
pub fn filter_by_name(items: &[MenuItem], term: &str) -> Vec<MenuItem> {
    items
        .iter()
        .filter(|item| matches_ignore_case(&item.name, term))
        .cloned()
        .collect()
}

/// Case-insensitive substring match, blank needle matches all.
///
/// Shared by menu filtering and history search so both screens agree on
/// what "matching" means.
pub(crate) fn matches_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// =============================================================================
// Sales History
// =============================================================================

/// One line of a historical sale: frozen name, price, and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    /// Item name as sold (menu renames never rewrite history).
    pub name: String,

    /// Unit price as sold.
    pub price: Money,

    /// Units sold.
    pub quantity: i64,
}

impl SaleLine {
    /// Price × quantity for this line.
    #[inline]
    pub fn line_amount(&self) -> Money {
        self.price * self.quantity
    }
}

impl From<&LineItem> for SaleLine {
    /// Freezes a cart/order line into the history shape, dropping the
    /// item id (history keys lines by name).
    fn from(line: &LineItem) -> Self {
        SaleLine {
            name: line.name.clone(),
            price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// A finished sale in the append-only history log.
///
/// Produced either by completing an order or by a walk-in checkout at the
/// register. Immutable once created; day and shift reports are pure
/// projections over sequences of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// When the sale happened. Orders use their completion stamp; walk-in
    /// sales use the checkout instant. Shift attribution keys on this.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// The lines sold.
    pub items: Vec<SaleLine>,

    /// Grand total charged for the sale (subtotal plus any service tax).
    pub total: Money,
}

impl SalesRecord {
    /// Sum of `price × quantity` over the lines.
    ///
    /// Day reports total this, not `total`: the stored grand total may
    /// include service tax, and the reporting screens count merchandise
    /// value per line.
    pub fn line_amount(&self) -> Money {
        self.items.iter().map(SaleLine::line_amount).sum()
    }

    /// Sum of quantities over the lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
