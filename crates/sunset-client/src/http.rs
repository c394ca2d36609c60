//! # HTTP Backend
//!
//! `PosBackend` over plain JSON HTTP.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    menu                         list_menu_items                    │
//! │  POST   menu                         create_menu_item                   │
//! │  PUT    menu/{id}                    update_menu_item                   │
//! │  DELETE menu/{id}                    delete_menu_item                   │
//! │                                                                         │
//! │  GET    orders                       list_orders                        │
//! │  POST   orders                       create_order                       │
//! │  POST   orders/{id}/items            add_order_item                     │
//! │  POST   orders/{id}/complete         complete_order                     │
//! │                                                                         │
//! │  GET    inventory                    list_inventory                     │
//! │  POST   inventory                    create_inventory_item              │
//! │  PUT    inventory/{id}/sell-quantity update_sell_quantity               │
//! │                                                                         │
//! │  GET    history                      list_history                       │
//! │  POST   history                      append_history                     │
//! │  GET    shifts/closings              list_shift_closings                │
//! │  POST   shifts/close                 close_shift                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Routes are joined onto the configured base URL, so a reverse-proxy
//! prefix like `/api` carries through untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Response;
use serde::de::DeserializeOwned;
use sunset_core::inventory::{InventoryDraft, InventoryItem};
use sunset_core::order::{Order, OrderDraft};
use sunset_core::types::{MenuItem, MenuItemDraft, SalesRecord};
use tracing::debug;
use url::Url;

use crate::backend::PosBackend;
use crate::config::ClientConfig;
use crate::dto::{
    AddOrderItemRequest, ApiErrorBody, ShiftClosingResponse, UpdateSellQuantityRequest,
};
use crate::error::{ClientError, ClientResult};

/// The production backend: reqwest against the persistence service.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Builds a client with the configured timeouts.
    pub fn new(config: &ClientConfig) -> ClientResult<HttpBackend> {
        let mut base_url = config.base_url()?;
        // joining relative routes needs the trailing slash, otherwise
        // "host/api".join("menu") would drop the /api prefix
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(HttpBackend { http, base_url })
    }

    fn route(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

/// Turns a response into `T`, or into a `Status` error carrying whatever
/// message the service attached.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_string(),
        };
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json::<T>().await?)
}

/// Status check for responses whose body we do not care about.
async fn expect_success(response: Response) -> ClientResult<()> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_string(),
        };
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(())
}

#[async_trait]
impl PosBackend for HttpBackend {
    // =========================================================================
    // Menu
    // =========================================================================

    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        let url = self.route("menu")?;
        debug!(%url, "Fetching menu");
        decode(self.http.get(url).send().await?).await
    }

    async fn create_menu_item(&self, draft: &MenuItemDraft) -> ClientResult<MenuItem> {
        let url = self.route("menu")?;
        debug!(%url, name = %draft.name, "Creating menu item");
        decode(self.http.post(url).json(draft).send().await?).await
    }

    async fn update_menu_item(&self, id: &str, draft: &MenuItemDraft) -> ClientResult<MenuItem> {
        let url = self.route(&format!("menu/{id}"))?;
        debug!(%url, "Updating menu item");
        decode(self.http.put(url).json(draft).send().await?).await
    }

    async fn delete_menu_item(&self, id: &str) -> ClientResult<()> {
        let url = self.route(&format!("menu/{id}"))?;
        debug!(%url, "Deleting menu item");
        expect_success(self.http.delete(url).send().await?).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let url = self.route("orders")?;
        debug!(%url, "Fetching orders");
        decode(self.http.get(url).send().await?).await
    }

    async fn create_order(&self, draft: &OrderDraft) -> ClientResult<Order> {
        let url = self.route("orders")?;
        debug!(%url, table = %draft.table_number, "Creating order");
        decode(self.http.post(url).json(draft).send().await?).await
    }

    async fn add_order_item(
        &self,
        order_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> ClientResult<Order> {
        let url = self.route(&format!("orders/{order_id}/items"))?;
        debug!(%url, item_id, quantity, "Adding item to order");
        let body = AddOrderItemRequest {
            item_id: item_id.to_string(),
            quantity,
        };
        decode(self.http.post(url).json(&body).send().await?).await
    }

    async fn complete_order(&self, order_id: &str) -> ClientResult<Order> {
        let url = self.route(&format!("orders/{order_id}/complete"))?;
        debug!(%url, "Completing order");
        decode(self.http.post(url).send().await?).await
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    async fn list_inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        let url = self.route("inventory")?;
        debug!(%url, "Fetching inventory");
        decode(self.http.get(url).send().await?).await
    }

    async fn create_inventory_item(&self, draft: &InventoryDraft) -> ClientResult<InventoryItem> {
        let url = self.route("inventory")?;
        debug!(%url, name = %draft.name, "Creating inventory item");
        decode(self.http.post(url).json(draft).send().await?).await
    }

    async fn update_sell_quantity(&self, id: &str, value: i64) -> ClientResult<InventoryItem> {
        let url = self.route(&format!("inventory/{id}/sell-quantity"))?;
        debug!(%url, value, "Updating sell quantity");
        let body = UpdateSellQuantityRequest {
            sell_quantity: value,
        };
        decode(self.http.put(url).json(&body).send().await?).await
    }

    // =========================================================================
    // History & Shifts
    // =========================================================================

    async fn list_history(&self) -> ClientResult<Vec<SalesRecord>> {
        let url = self.route("history")?;
        debug!(%url, "Fetching sale history");
        decode(self.http.get(url).send().await?).await
    }

    async fn append_history(&self, record: &SalesRecord) -> ClientResult<SalesRecord> {
        let url = self.route("history")?;
        debug!(%url, "Appending walk-in sale");
        decode(self.http.post(url).json(record).send().await?).await
    }

    async fn list_shift_closings(&self) -> ClientResult<Vec<DateTime<Utc>>> {
        let url = self.route("shifts/closings")?;
        debug!(%url, "Fetching shift closings");
        decode(self.http.get(url).send().await?).await
    }

    async fn close_shift(&self) -> ClientResult<DateTime<Utc>> {
        let url = self.route("shifts/close")?;
        debug!(%url, "Closing shift");
        let body: ShiftClosingResponse = decode(self.http.post(url).send().await?).await?;
        Ok(body.timestamp)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
