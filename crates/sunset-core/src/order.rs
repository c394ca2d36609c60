//! # Order Lifecycle
//!
//! The state machine for persisted orders.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order State Machine                                │
//! │                                                                         │
//! │   Cart ──submit──► OrderDraft ──service──► Pending ──complete──► Completed
//! │                    (validated,             │    ▲                  │    │
//! │                     priced, no id)         │    │                  │    │
//! │                                      add_item───┘             terminal │
//! │                                      (merge + re-price)               │
//! │                                                                         │
//! │   • add_item is legal ONLY while Pending                               │
//! │   • complete stamps completed_at exactly once                          │
//! │   • there is no reopen: Completed is the end of the line               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Total-Price Invariant
//! `total_price` always equals the pricing engine's grand total of `items`
//! as of the last mutation. Every merge re-derives it before the order is
//! considered consistent; nothing else may write it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::items::{LineItem, LineItems};
use crate::money::Money;
use crate::pricing;
use crate::types::{MenuItem, SaleLine, SalesRecord};
use crate::validation;

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Serialized with its capitalized spelling (`"Pending"`, `"Completed"`),
/// which is what the café API exchanges and the UI matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    /// Order is open: items may still be added.
    Pending,
    /// Order is finished and immutable.
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Completed => write!(f, "Completed"),
        }
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// A validated, priced order that has not been persisted yet.
///
/// The persistence service assigns the id; the item snapshot and the
/// grand total are fixed here, at submission time.
/// Menu re-pricing after this point cannot reach into the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub table_number: String,
    pub items: LineItems,
    pub total_price: Money,
}

impl OrderDraft {
    /// Validates and prices a cart into a draft.
    ///
    /// Requires a non-blank table number and at least one line; fails with
    /// `ValidationError` otherwise and leaves the cart untouched either way.
    pub fn from_cart(cart: &Cart) -> CoreResult<OrderDraft> {
        let table_number = validation::validate_table_number(&cart.table_number)?;
        if cart.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            }
            .into());
        }

        let total_price = pricing::grand_total(cart.lines())?;
        Ok(OrderDraft {
            table_number,
            items: cart.items.clone(),
            total_price,
        })
    }
}

// =============================================================================
// Order
// =============================================================================

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier assigned by the persistence service.
    pub id: String,

    /// Table label the order belongs to.
    pub table_number: String,

    /// Snapshotted lines. Prices were frozen when each line was created.
    #[ts(as = "Vec<LineItem>")]
    pub items: LineItems,

    /// Grand total of `items`, re-derived on every mutation.
    pub total_price: Money,

    /// Where the order sits in its lifecycle.
    pub status: OrderStatus,

    /// Completion stamp; `None` while pending, set exactly once.
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Whether the order is still open for amendment.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Whether the order has reached its terminal state.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// Merges a menu item into a pending order and re-prices it.
    ///
    /// ## Errors
    /// - `InvalidTransition` if the order is already completed
    /// - `InvalidQuantity` if `quantity < 1`
    ///
    /// On any error the order is untouched: both checks run before the
    /// merge mutates anything.
    pub fn add_item(&mut self, item: &MenuItem, quantity: i64) -> CoreResult<()> {
        if !self.is_pending() {
            return Err(CoreError::InvalidTransition {
                action: "add an item to".to_string(),
                status: self.status.to_string(),
            });
        }

        self.items.merge(item, quantity)?;
        self.total_price = pricing::grand_total(self.items.as_slice())?;
        Ok(())
    }

    /// Transitions a pending order to completed, stamping `completed_at`.
    ///
    /// One-way: a second call fails with `InvalidTransition` and the
    /// original stamp is kept.
    pub fn complete(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        if !self.is_pending() {
            return Err(CoreError::InvalidTransition {
                action: "complete".to_string(),
                status: self.status.to_string(),
            });
        }

        self.status = OrderStatus::Completed;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Projects a completed order into the history log.
    ///
    /// The record is dated by the completion stamp, so shift attribution
    /// follows when the order was closed out, not when it was opened.
    pub fn to_sales_record(&self) -> CoreResult<SalesRecord> {
        if !self.is_completed() {
            return Err(CoreError::InvalidTransition {
                action: "archive".to_string(),
                status: self.status.to_string(),
            });
        }
        let date = self.completed_at.ok_or(ValidationError::Required {
            field: "completedAt".to_string(),
        })?;

        Ok(SalesRecord {
            date,
            items: self.items.iter().map(SaleLine::from).collect(),
            total: self.total_price,
        })
    }
}

/// Splits orders into (pending, completed) for the two board columns.
///
/// Every order lands in exactly one list; `complete` is the only way to
/// move between them.
pub fn partition_by_status(orders: Vec<Order>) -> (Vec<Order>, Vec<Order>) {
    orders.into_iter().partition(Order::is_pending)
}

// =============================================================================
// Unit Tests
// =============================================================================
