//! # Wire Payloads
//!
//! Request and response bodies with no domain struct of their own. The
//! drafts from sunset-core already serialize to the shapes the service
//! expects, so only the leftovers live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body for merging an item into a pending order.
///
/// The service owns the menu, so the item travels by id and the service
/// resolves name and price on its side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderItemRequest {
    pub item_id: String,
    pub quantity: i64,
}

/// Body for replacing an inventory item's recorded sell quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSellQuantityRequest {
    pub sell_quantity: i64,
}

/// Response from closing a shift: the service-stamped closing instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftClosingResponse {
    pub timestamp: DateTime<Utc>,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}
