//! # Backend Contract
//!
//! One trait method per persistence-service operation. The session layer
//! holds an `Arc<dyn PosBackend>`, so tests can swap the HTTP backend for
//! an in-memory one without touching any session code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sunset_core::inventory::{InventoryDraft, InventoryItem};
use sunset_core::order::{Order, OrderDraft};
use sunset_core::types::{MenuItem, MenuItemDraft, SalesRecord};

use crate::error::ClientResult;

/// The persistence service, seen from the café floor.
///
/// Every method is a single round trip. None of them touch local state;
/// deciding what to do with a response (or a failure) is the caller's
/// job, which is how a failed request leaves the session exactly as it
/// was.
#[async_trait]
pub trait PosBackend: Send + Sync {
    // =========================================================================
    // Menu
    // =========================================================================

    /// Full menu, in the service's presentation order.
    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>>;

    /// Creates a menu item; the service assigns the id.
    async fn create_menu_item(&self, draft: &MenuItemDraft) -> ClientResult<MenuItem>;

    /// Replaces a menu item's fields.
    async fn update_menu_item(&self, id: &str, draft: &MenuItemDraft) -> ClientResult<MenuItem>;

    /// Removes a menu item. Existing orders keep their snapshotted lines.
    async fn delete_menu_item(&self, id: &str) -> ClientResult<()>;

    // =========================================================================
    // Orders
    // =========================================================================

    /// All orders, both pending and completed.
    async fn list_orders(&self) -> ClientResult<Vec<Order>>;

    /// Persists a draft; the returned order is `Pending` with an id.
    async fn create_order(&self, draft: &OrderDraft) -> ClientResult<Order>;

    /// Merges a menu item into a pending order and returns the re-priced
    /// order.
    async fn add_order_item(
        &self,
        order_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> ClientResult<Order>;

    /// Completes a pending order; the service stamps `completedAt`.
    async fn complete_order(&self, order_id: &str) -> ClientResult<Order>;

    // =========================================================================
    // Inventory
    // =========================================================================

    async fn list_inventory(&self) -> ClientResult<Vec<InventoryItem>>;

    /// Creates an inventory item with nothing sold yet.
    async fn create_inventory_item(&self, draft: &InventoryDraft) -> ClientResult<InventoryItem>;

    /// Replaces the recorded sell quantity and returns the updated item.
    async fn update_sell_quantity(&self, id: &str, value: i64) -> ClientResult<InventoryItem>;

    // =========================================================================
    // History & Shifts
    // =========================================================================

    /// The full sale history, oldest first.
    async fn list_history(&self) -> ClientResult<Vec<SalesRecord>>;

    /// Appends a walk-in sale to the history.
    async fn append_history(&self, record: &SalesRecord) -> ClientResult<SalesRecord>;

    /// Every recorded shift closing, oldest first.
    async fn list_shift_closings(&self) -> ClientResult<Vec<DateTime<Utc>>>;

    /// Closes the current shift and returns the service-stamped instant.
    async fn close_shift(&self) -> ClientResult<DateTime<Utc>>;
}
