//! # Order Board
//!
//! Pending and completed orders for the dine-in floor.
//!
//! ## Lifecycle on the Board
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Board Flow                                 │
//! │                                                                         │
//! │   place(draft) ────────► service ──► Order ──► pending list            │
//! │                                                                         │
//! │   add_item(id, …) ─────► service ──► re-priced Order ──► same slot     │
//! │                                                                         │
//! │   complete(id) ────────► service ──► stamped Order ──► completed list  │
//! │                      ▲                                                  │
//! │                      └── already completed? rejected locally,          │
//! │                          the request never leaves                       │
//! │                                                                         │
//! │   Every mutation adopts the service's returned order wholesale; the    │
//! │   board never edits an order it did not receive over the wire.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sunset_client::PosBackend;
use sunset_core::order::{self, OrderDraft};
use sunset_core::{CoreError, LineItem, Money, Order, OrderStatus};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::SessionResult;

// =============================================================================
// Order Ticket
// =============================================================================

/// Data for one kitchen token.
///
/// Carries whatever the kitchen printer shows: table, status, lines, and
/// the order total. The timestamp appears once the order is completed.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTicket {
    /// Store name for the header.
    pub store_name: String,

    /// Table the order belongs to.
    pub table_number: String,

    pub status: OrderStatus,

    /// Completion stamp; `None` while the order is still pending.
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Lines as ordered.
    pub lines: Vec<LineItem>,

    pub total_price: Money,
}

// =============================================================================
// Order Board
// =============================================================================

/// The two order queues, partitioned by status.
///
/// Both lists are snapshots of the service's state: `refresh` replaces
/// them wholesale, and every mutation adopts the returned order.
pub struct OrderBoard {
    backend: Arc<dyn PosBackend>,
    store_name: String,
    pending: Vec<Order>,
    completed: Vec<Order>,
}

impl OrderBoard {
    pub fn new(backend: Arc<dyn PosBackend>, store_name: impl Into<String>) -> Self {
        OrderBoard {
            backend,
            store_name: store_name.into(),
            pending: Vec::new(),
            completed: Vec::new(),
        }
    }

    /// Replaces both partitions with the service's current orders.
    pub async fn refresh(&mut self) -> SessionResult<()> {
        let orders = self.backend.list_orders().await?;
        let (pending, completed) = order::partition_by_status(orders);
        debug!(
            pending = pending.len(),
            completed = completed.len(),
            "order board refreshed"
        );
        self.pending = pending;
        self.completed = completed;
        Ok(())
    }

    pub fn pending(&self) -> &[Order] {
        &self.pending
    }

    pub fn completed(&self) -> &[Order] {
        &self.completed
    }

    /// Looks an order up on either side of the board.
    pub fn find(&self, order_id: &str) -> Option<&Order> {
        self.pending
            .iter()
            .chain(self.completed.iter())
            .find(|order| order.id == order_id)
    }

    /// Sends a validated draft to the service and adopts the created order.
    pub async fn place(&mut self, draft: &OrderDraft) -> SessionResult<Order> {
        let order = self.backend.create_order(draft).await?;
        info!(order_id = %order.id, table = %order.table_number, "order placed");
        self.pending.push(order.clone());
        Ok(order)
    }

    /// Marks a pending order completed and moves it across the board.
    ///
    /// An order already on the completed side is rejected without a
    /// network call; the one-way rule does not need the service's help.
    pub async fn complete(&mut self, order_id: &str) -> SessionResult<Order> {
        if self.completed.iter().any(|order| order.id == order_id) {
            return Err(CoreError::InvalidTransition {
                action: "complete".to_string(),
                status: OrderStatus::Completed.to_string(),
            }
            .into());
        }

        let order = self.backend.complete_order(order_id).await?;
        info!(order_id = %order.id, "order completed");
        self.pending.retain(|pending| pending.id != order_id);
        self.completed.push(order.clone());
        Ok(order)
    }

    /// Adds a line to a pending order and adopts the re-priced result.
    pub async fn add_item(
        &mut self,
        order_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> SessionResult<Order> {
        if self.completed.iter().any(|order| order.id == order_id) {
            return Err(CoreError::InvalidTransition {
                action: "add an item to".to_string(),
                status: OrderStatus::Completed.to_string(),
            }
            .into());
        }

        let order = self
            .backend
            .add_order_item(order_id, item_id, quantity)
            .await?;
        match self.pending.iter_mut().find(|pending| pending.id == order_id) {
            Some(slot) => *slot = order.clone(),
            None => self.pending.push(order.clone()),
        }
        Ok(order)
    }

    /// Builds a kitchen token for an order on either side of the board.
    pub fn ticket(&self, order_id: &str) -> Option<OrderTicket> {
        let order = self.find(order_id)?;
        Some(OrderTicket {
            store_name: self.store_name.clone(),
            table_number: order.table_number.clone(),
            status: order.status,
            completed_at: order.completed_at,
            lines: order.items.as_slice().to_vec(),
            total_price: order.total_price,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
