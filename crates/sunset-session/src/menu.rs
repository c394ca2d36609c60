//! # Menu Administration
//!
//! Create, re-price, and retire menu items.
//!
//! Drafts are validated locally before they travel; the cached list only
//! ever changes by adopting what the service returned. Re-pricing an item
//! never rewrites existing orders or history, which snapshot prices at
//! sale time.

use std::sync::Arc;

use sunset_client::PosBackend;
use sunset_core::{MenuItem, MenuItemDraft, Money};
use tracing::{debug, info};

use crate::error::SessionResult;

/// The full menu list plus its CRUD operations.
pub struct MenuAdmin {
    backend: Arc<dyn PosBackend>,
    items: Vec<MenuItem>,
}

impl MenuAdmin {
    pub fn new(backend: Arc<dyn PosBackend>) -> Self {
        MenuAdmin {
            backend,
            items: Vec::new(),
        }
    }

    /// Replaces the list with the service's current menu.
    pub async fn refresh(&mut self) -> SessionResult<()> {
        let items = self.backend.list_menu_items().await?;
        debug!(count = items.len(), "menu list refreshed");
        self.items = items;
        Ok(())
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Validates and persists a new menu item.
    pub async fn create(
        &mut self,
        name: &str,
        category: &str,
        price: Money,
    ) -> SessionResult<MenuItem> {
        let draft = MenuItemDraft::new(name, category, price)?;
        let item = self.backend.create_menu_item(&draft).await?;
        info!(item_id = %item.id, name = %item.name, "menu item created");
        self.items.push(item.clone());
        Ok(item)
    }

    /// Rewrites an existing item's name, category, and price.
    pub async fn update(
        &mut self,
        id: &str,
        name: &str,
        category: &str,
        price: Money,
    ) -> SessionResult<MenuItem> {
        let draft = MenuItemDraft::new(name, category, price)?;
        let item = self.backend.update_menu_item(id, &draft).await?;
        info!(item_id = %item.id, "menu item updated");
        match self.items.iter_mut().find(|cached| cached.id == id) {
            Some(slot) => *slot = item.clone(),
            None => self.items.push(item.clone()),
        }
        Ok(item)
    }

    /// Removes an item from the menu.
    pub async fn delete(&mut self, id: &str) -> SessionResult<()> {
        self.backend.delete_menu_item(id).await?;
        info!(item_id = %id, "menu item deleted");
        self.items.retain(|item| item.id != id);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
