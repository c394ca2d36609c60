//! # Register
//!
//! The front counter: menu browsing, the cart, and the walk-in sale.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Register Flow                                  │
//! │                                                                         │
//! │   refresh_menu() ──► menu snapshot ──► menu_by_category()               │
//! │                                    └─► search_menu("chai")             │
//! │                                                                         │
//! │   add_to_cart / increase / decrease ──► Cart (sunset-core)             │
//! │                                                                         │
//! │   checkout_sale(now):                                                   │
//! │     cart ──► totals ──► SalesRecord ──► append_history ──► Receipt     │
//! │                                             │                           │
//! │                                             └─ failure: cart untouched │
//! │     success: cart cleared (lines, table, cash)                          │
//! │                                                                         │
//! │   Dine-in orders leave through the session's place_order instead.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sunset_client::PosBackend;
use sunset_core::types::{self, CategoryGroup, SaleLine, SalesRecord};
use sunset_core::{Cart, CoreError, LineItem, MenuItem, Money, Totals, ValidationError};
use tracing::{debug, info};
use ts_rs::TS;

use crate::config::SessionConfig;
use crate::error::SessionResult;

// =============================================================================
// Receipt
// =============================================================================

/// Everything a printer needs to render one walk-in receipt.
///
/// All figures are frozen at checkout; the printer never recomputes.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Store name for the header.
    pub store_name: String,

    /// Table label as entered; may be blank for takeaway.
    pub table_number: String,

    /// Checkout instant; also the date of the archived record.
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,

    /// Lines as sold.
    pub lines: Vec<LineItem>,

    pub subtotal: Money,
    pub service_tax: Money,
    pub grand_total: Money,

    /// Cash tendered, if it was entered.
    pub cash_received: Option<Money>,

    /// `cash_received − grand_total`; negative means short-paid.
    pub change: Option<Money>,

    /// Closing line for the footer.
    pub footer: String,
}

// =============================================================================
// Register
// =============================================================================

/// Menu snapshot plus the cart being assembled at the counter.
///
/// The menu is a cache of the service's list, replaced wholesale on
/// `refresh_menu`; the cart is session-local and never persisted.
pub struct Register {
    backend: Arc<dyn PosBackend>,
    config: SessionConfig,
    menu: Vec<MenuItem>,
    cart: Cart,
}

impl Register {
    pub fn new(backend: Arc<dyn PosBackend>, config: SessionConfig) -> Self {
        Register {
            backend,
            config,
            menu: Vec::new(),
            cart: Cart::new(),
        }
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Replaces the menu snapshot with the service's current list.
    pub async fn refresh_menu(&mut self) -> SessionResult<()> {
        let items = self.backend.list_menu_items().await?;
        debug!(count = items.len(), "menu refreshed");
        self.menu = items;
        Ok(())
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    /// Menu grouped by category in first-seen order, for the tabbed view.
    pub fn menu_by_category(&self) -> Vec<CategoryGroup> {
        types::group_by_category(&self.menu)
    }

    /// Case-insensitive name filter over the menu snapshot.
    pub fn search_menu(&self, term: &str) -> Vec<MenuItem> {
        types::filter_by_name(&self.menu, term)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds one unit of a menu item, merging into an existing line.
    pub fn add_to_cart(&mut self, item: &MenuItem) -> SessionResult<()> {
        self.cart.add_item(item)?;
        Ok(())
    }

    /// Increments a cart line by 1. Unknown ids are a no-op.
    pub fn increase(&mut self, item_id: &str) -> bool {
        self.cart.increase(item_id)
    }

    /// Decrements a cart line by 1, removing it at quantity 1.
    pub fn decrease(&mut self, item_id: &str) -> bool {
        self.cart.decrease(item_id)
    }

    pub fn set_table_number(&mut self, label: impl Into<String>) {
        self.cart.table_number = label.into();
    }

    pub fn set_cash_received(&mut self, amount: Option<Money>) {
        self.cart.set_cash_received(amount);
    }

    /// Current cart totals, derived on demand.
    pub fn totals(&self) -> SessionResult<Totals> {
        Ok(self.cart.totals()?)
    }

    /// Change due against the entered cash. Negative means short-paid;
    /// that is flagged to the operator, not rejected.
    pub fn change(&self) -> SessionResult<Option<Money>> {
        Ok(self.cart.change()?)
    }

    /// Abandons the cart: lines, table label, and cash all reset.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Walk-in Checkout
    // =========================================================================

    /// Finalizes the cart as an immediate cash sale.
    ///
    /// The sale never becomes a pending order: it is archived straight to
    /// history and a receipt comes back for the printer. The cart is only
    /// cleared once the archive call succeeds, so a failure leaves it
    /// exactly as it was and the operator can retry.
    pub async fn checkout_sale(&mut self, now: DateTime<Utc>) -> SessionResult<Receipt> {
        if self.cart.is_empty() {
            return Err(CoreError::from(ValidationError::Required {
                field: "items".to_string(),
            })
            .into());
        }

        let totals = self.cart.totals()?;
        let change = self.cart.change()?;
        let record = SalesRecord {
            date: now,
            items: self.cart.lines().iter().map(SaleLine::from).collect(),
            total: totals.grand_total,
        };

        let archived = self.backend.append_history(&record).await?;

        let receipt = Receipt {
            store_name: self.config.store_name.clone(),
            table_number: self.cart.table_number.clone(),
            placed_at: archived.date,
            lines: self.cart.lines().to_vec(),
            subtotal: totals.subtotal,
            service_tax: totals.service_tax,
            grand_total: totals.grand_total,
            cash_received: self.cart.cash_received,
            change,
            footer: self.config.receipt_footer.clone(),
        };

        self.cart.clear();
        info!(total = %receipt.grand_total, "walk-in sale archived");
        Ok(receipt)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{menu_item, sample_menu, ts, FakeBackend};

    fn register_with_menu(backend: Arc<FakeBackend>) -> Register {
        Register::new(backend, SessionConfig::default())
    }

    #[tokio::test]
    async fn test_refresh_menu_feeds_the_projections() {
        let backend = Arc::new(FakeBackend::with_menu(sample_menu()));
        let mut register = register_with_menu(backend);

        register.refresh_menu().await.unwrap();

        let groups = register.menu_by_category();
        let names: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["Main Course", "Beverages", "Desserts"]);

        let hits = register.search_menu("doodh");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Doodh Patti");
    }

    #[tokio::test]
    async fn test_checkout_appends_one_record_and_clears_the_cart() {
        let backend = Arc::new(FakeBackend::with_menu(sample_menu()));
        let mut register = register_with_menu(backend.clone());
        register.refresh_menu().await.unwrap();

        let karahi = register.menu()[0].clone();
        register.add_to_cart(&karahi).unwrap();
        register.increase("m1");
        register.set_table_number("7");
        register.set_cash_received(Some(Money::from_rupees(5000)));

        let now = ts("2025-03-01T13:00:00Z");
        let receipt = register.checkout_sale(now).await.unwrap();

        assert_eq!(backend.history_len(), 1);
        assert_eq!(receipt.store_name, "The Sunset Café");
        assert_eq!(receipt.table_number, "7");
        assert_eq!(receipt.placed_at, now);
        assert_eq!(receipt.subtotal, Money::from_rupees(4000));
        assert_eq!(receipt.service_tax, Money::from_rupees(200));
        assert_eq!(receipt.grand_total, Money::from_rupees(4200));
        assert_eq!(receipt.cash_received, Some(Money::from_rupees(5000)));
        assert_eq!(receipt.change, Some(Money::from_rupees(800)));
        assert_eq!(receipt.footer, "THANK YOU");

        assert!(register.cart().is_empty());
        assert_eq!(register.cart().table_number, "");
        assert_eq!(register.cart().cash_received, None);
    }

    #[tokio::test]
    async fn test_checkout_below_threshold_carries_no_tax() {
        let backend = Arc::new(FakeBackend::with_menu(vec![
            menu_item("m1", "Seekh Kabab", "Main Course", 1000),
            menu_item("m2", "Kashmiri Chai", "Beverages", 500),
        ]));
        let mut register = register_with_menu(backend);
        register.refresh_menu().await.unwrap();

        let kabab = register.menu()[0].clone();
        let chai = register.menu()[1].clone();
        register.add_to_cart(&kabab).unwrap();
        register.increase("m1");
        register.add_to_cart(&chai).unwrap();

        let receipt = register
            .checkout_sale(ts("2025-03-01T13:00:00Z"))
            .await
            .unwrap();
        assert_eq!(receipt.subtotal, Money::from_rupees(2500));
        assert!(receipt.service_tax.is_zero());
        assert_eq!(receipt.grand_total, Money::from_rupees(2500));
        assert_eq!(receipt.change, None);
    }

    #[tokio::test]
    async fn test_receipt_wire_shape() {
        let backend = Arc::new(FakeBackend::with_menu(sample_menu()));
        let mut register = register_with_menu(backend);
        register.refresh_menu().await.unwrap();

        let karahi = register.menu()[0].clone();
        register.add_to_cart(&karahi).unwrap();
        register.set_table_number("7");

        let receipt = register
            .checkout_sale(ts("2025-03-01T13:00:00Z"))
            .await
            .unwrap();
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["storeName"], "The Sunset Café");
        assert_eq!(json["tableNumber"], "7");
        assert!(json["placedAt"].is_string());
        assert_eq!(json["lines"][0]["itemId"], "m1");
        assert!(json["grandTotal"].is_number());
        assert!(json["cashReceived"].is_null());
        assert_eq!(json["footer"], "THANK YOU");
    }

    #[tokio::test]
    async fn test_checkout_rejects_an_empty_cart() {
        let backend = Arc::new(FakeBackend::new());
        let mut register = register_with_menu(backend.clone());

        let err = register
            .checkout_sale(ts("2025-03-01T13:00:00Z"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(backend.history_len(), 0);
    }

    #[tokio::test]
    async fn test_failed_checkout_leaves_the_cart_intact() {
        let backend = Arc::new(FakeBackend::with_menu(sample_menu()));
        let mut register = register_with_menu(backend.clone());
        register.refresh_menu().await.unwrap();

        let karahi = register.menu()[0].clone();
        register.add_to_cart(&karahi).unwrap();
        register.set_table_number("3");

        backend.set_offline(true);
        let err = register
            .checkout_sale(ts("2025-03-01T13:00:00Z"))
            .await
            .unwrap_err();

        assert!(err.is_transient());
        assert_eq!(backend.history_len(), 0);
        assert_eq!(register.cart().items.len(), 1);
        assert_eq!(register.cart().table_number, "3");
    }
}
