//! # POS Session
//!
//! One object owning every screen's state, plus the shared handle a
//! shell keeps for its event loop.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Ownership                                 │
//! │                                                                         │
//! │   SessionHandle (Clone) ──► Arc<Mutex<PosSession>>                      │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │   ┌──────────┬────────────┬───────────┬─────────────┬───────────┐      │
//! │   │ Register │ OrderBoard │ StockRoom │ HistoryDesk │ MenuAdmin │      │
//! │   └──────────┴────────────┴───────────┴─────────────┴───────────┘      │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                        Arc<dyn PosBackend> (shared)                     │
//! │                                                                         │
//! │   One lock, one mutator at a time. Cross-screen flows (cart ──►        │
//! │   pending board) live here so no screen reaches into another.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use sunset_client::PosBackend;
use sunset_core::{Order, OrderDraft};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::history::HistoryDesk;
use crate::menu::MenuAdmin;
use crate::orders::OrderBoard;
use crate::register::Register;
use crate::stock::StockRoom;

// =============================================================================
// PosSession
// =============================================================================

/// All five controllers over one shared backend.
pub struct PosSession {
    pub register: Register,
    pub orders: OrderBoard,
    pub stock: StockRoom,
    pub history: HistoryDesk,
    pub menu_admin: MenuAdmin,
    config: SessionConfig,
}

impl PosSession {
    pub fn new(backend: Arc<dyn PosBackend>, config: SessionConfig) -> Self {
        PosSession {
            register: Register::new(backend.clone(), config.clone()),
            orders: OrderBoard::new(backend.clone(), config.store_name.clone()),
            stock: StockRoom::new(backend.clone()),
            history: HistoryDesk::new(backend.clone()),
            menu_admin: MenuAdmin::new(backend),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Loads every screen's snapshot in one sweep.
    ///
    /// Stops at the first failure; snapshots already refreshed keep their
    /// new data, the rest keep their old.
    pub async fn refresh_all(&mut self) -> SessionResult<()> {
        self.register.refresh_menu().await?;
        self.orders.refresh().await?;
        self.stock.refresh().await?;
        self.history.refresh().await?;
        self.menu_admin.refresh().await?;
        info!("session refreshed");
        Ok(())
    }

    /// Submits the register's cart as a dine-in order.
    ///
    /// The cart is validated and priced locally into a draft, the created
    /// order joins the pending board, and only then is the cart cleared.
    /// Any failure leaves the cart for the operator to fix or retry.
    pub async fn place_order(&mut self) -> SessionResult<Order> {
        let draft = OrderDraft::from_cart(self.register.cart())?;
        let order = self.orders.place(&draft).await?;
        self.register.clear_cart();
        Ok(order)
    }
}

// =============================================================================
// SessionHandle
// =============================================================================

/// Cloneable handle to one shared session.
///
/// Shells keep a clone per event source; the async mutex serializes all
/// access, including across the await inside a backend call.
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<PosSession>>,
}

impl SessionHandle {
    pub fn new(session: PosSession) -> Self {
        SessionHandle {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Runs a closure with read access to the session.
    pub async fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PosSession) -> R,
    {
        let session = self.session.lock().await;
        f(&session)
    }

    /// Runs a closure with mutable access to the session.
    ///
    /// For synchronous mutations (cart edits, cursor moves). Operations
    /// that call the backend go through [`SessionHandle::lock`] instead.
    pub async fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PosSession) -> R,
    {
        let mut session = self.session.lock().await;
        f(&mut session)
    }

    /// Holds the session across await points for async operations.
    pub async fn lock(&self) -> MutexGuard<'_, PosSession> {
        self.session.lock().await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record_at, sample_menu, ts, FakeBackend};
    use sunset_core::{InventoryItem, Money};

    fn session_over(backend: Arc<FakeBackend>) -> PosSession {
        PosSession::new(backend, SessionConfig::default())
    }

    #[tokio::test]
    async fn test_refresh_all_fills_every_screen() {
        let backend = Arc::new(FakeBackend::with_menu(sample_menu()));
        backend.push_inventory(InventoryItem {
            id: "i1".to_string(),
            name: "Basmati Rice".to_string(),
            stock: 50,
            sell_quantity: 10,
        });
        backend.push_history(record_at(ts("2025-03-01T10:00:00Z"), "Chicken Karahi", 2000, 1));
        backend.push_closing(ts("2025-03-01T12:00:00Z"));

        let mut session = session_over(backend);
        session.refresh_all().await.unwrap();

        assert_eq!(session.register.menu().len(), 3);
        assert_eq!(session.menu_admin.items().len(), 3);
        assert_eq!(session.stock.items().len(), 1);
        assert_eq!(session.history.records().len(), 1);
        assert_eq!(session.history.shift_count(), 2);
        assert!(session.orders.pending().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_clears_the_cart_only_on_success() {
        let backend = Arc::new(FakeBackend::with_menu(sample_menu()));
        let mut session = session_over(backend.clone());
        session.register.refresh_menu().await.unwrap();

        let karahi = session.register.menu()[0].clone();
        session.register.add_to_cart(&karahi).unwrap();
        session.register.set_table_number("4");

        let order = session.place_order().await.unwrap();
        assert_eq!(order.table_number, "4");
        assert_eq!(session.orders.pending().len(), 1);
        assert!(session.register.cart().is_empty());

        // A failed placement must leave the cart for a retry.
        session.register.add_to_cart(&karahi).unwrap();
        session.register.set_table_number("6");
        backend.set_offline(true);

        let err = session.place_order().await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(session.register.cart().items.len(), 1);
        assert_eq!(session.orders.pending().len(), 1);
    }

    #[tokio::test]
    async fn test_place_order_validates_before_the_wire() {
        let backend = Arc::new(FakeBackend::with_menu(sample_menu()));
        backend.set_offline(true);
        let mut session = session_over(backend);

        // Blank table and empty cart are both local rejections.
        let err = session.place_order().await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        session.register.set_table_number("4");
        let err = session.place_order().await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_handle_clones_share_one_session() {
        let backend = Arc::new(FakeBackend::with_menu(sample_menu()));
        let handle = SessionHandle::new(session_over(backend));
        let other = handle.clone();

        handle.lock().await.register.refresh_menu().await.unwrap();

        other
            .with_session_mut(|session| {
                let karahi = session.register.menu()[0].clone();
                session.register.add_to_cart(&karahi).unwrap();
                session.register.set_table_number("2");
            })
            .await;

        let order = handle.lock().await.place_order().await.unwrap();
        assert_eq!(order.total_price, Money::from_rupees(2000));

        let pending = other
            .with_session(|session| session.orders.pending().len())
            .await;
        assert_eq!(pending, 1);
    }
}
