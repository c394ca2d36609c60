//! # Stock Room
//!
//! The inventory ledger's session-side cache.
//!
//! Sell quantities are checked against the cached item before the update
//! leaves the building, so an out-of-range figure costs nothing and the
//! cache only ever changes by adopting a service response.

use std::sync::Arc;

use sunset_client::PosBackend;
use sunset_core::{InventoryDraft, InventoryItem};
use tracing::{debug, info};

use crate::error::SessionResult;

/// Inventory list plus the mutations the stock page performs.
pub struct StockRoom {
    backend: Arc<dyn PosBackend>,
    items: Vec<InventoryItem>,
}

impl StockRoom {
    pub fn new(backend: Arc<dyn PosBackend>) -> Self {
        StockRoom {
            backend,
            items: Vec::new(),
        }
    }

    /// Replaces the snapshot with the service's current ledger.
    pub async fn refresh(&mut self) -> SessionResult<()> {
        let items = self.backend.list_inventory().await?;
        debug!(count = items.len(), "inventory refreshed");
        self.items = items;
        Ok(())
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Validates and persists a new ledger entry.
    ///
    /// New items start with nothing sold; the service assigns the id.
    pub async fn add_item(&mut self, name: &str, stock: i64) -> SessionResult<InventoryItem> {
        let draft = InventoryDraft::new(name, stock)?;
        let item = self.backend.create_inventory_item(&draft).await?;
        info!(item_id = %item.id, stock, "inventory item added");
        self.items.push(item.clone());
        Ok(item)
    }

    /// Records the units sold for one item.
    ///
    /// The `[0, stock]` bound is enforced against the cached item first;
    /// a rejected value never reaches the service and the cache is only
    /// updated from the service's response.
    pub async fn set_sell_quantity(&mut self, id: &str, value: i64) -> SessionResult<InventoryItem> {
        if let Some(cached) = self.items.iter().find(|item| item.id == id) {
            cached.check_sell_quantity(value)?;
        }

        let item = self.backend.update_sell_quantity(id, value).await?;
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(slot) => *slot = item.clone(),
            None => self.items.push(item.clone()),
        }
        Ok(item)
    }
}

// =============================================================================
// Tests
// =============================================================================
