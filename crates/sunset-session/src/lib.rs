//! # sunset-session: Stateful Session Layer for Sunset POS
//!
//! The single owner of live POS state. Rules live in `sunset-core`, the
//! wire lives in `sunset-client`; this crate is the part that remembers.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Session Layer                                  │
//! │                                                                         │
//! │   Shell / UI event loop                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   SessionHandle ──► Arc<Mutex<PosSession>>                              │
//! │                            │                                            │
//! │      ┌──────────┬──────────┼───────────┬─────────────┬───────────┐     │
//! │      ▼          ▼          ▼           ▼             ▼           │     │
//! │   Register  OrderBoard  StockRoom  HistoryDesk   MenuAdmin       │     │
//! │   menu+cart pending/    inventory  records+log   menu CRUD       │     │
//! │   walk-in   completed   ledger     cursors+vers                  │     │
//! │      │          │          │           │             │           │     │
//! │      └──────────┴──────────┴───────────┴─────────────┘           │     │
//! │                            │                                     │     │
//! │                            ▼                                     │     │
//! │                   Arc<dyn PosBackend>                            │     │
//! │                                                                  │     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Controllers
//! - [`Register`]: menu browsing, the cart, walk-in checkout with receipt
//! - [`OrderBoard`]: pending/completed partitions and kitchen tickets
//! - [`StockRoom`]: the inventory ledger's cached list
//! - [`HistoryDesk`]: versioned records + shift log with two cursors
//! - [`MenuAdmin`]: menu CRUD
//!
//! ## Design Rules
//! 1. **Validate before the wire**: every rule runs locally against
//!    cached state first; a rejected input costs no request.
//! 2. **Adopt, never invent**: caches change only by adopting a service
//!    response, so a failed call leaves state exactly as it was.
//! 3. **One owner**: all mutation goes through the session's lock; the
//!    pure projections in `sunset-core` do the thinking over snapshots.
//!
//! ## Quick Start
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sunset_client::{ClientConfig, HttpBackend};
//! use sunset_session::{PosSession, SessionConfig, SessionHandle};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(HttpBackend::new(&ClientConfig::load()?)?);
//! let session = PosSession::new(backend, SessionConfig::from_env());
//! let handle = SessionHandle::new(session);
//!
//! handle.lock().await.refresh_all().await?;
//! let pending = handle.with_session(|s| s.orders.pending().len()).await;
//! println!("{pending} pending orders");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod menu;
pub mod orders;
pub mod register;
pub mod session;
pub mod stock;

#[cfg(test)]
pub(crate) mod testing;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use history::HistoryDesk;
pub use menu::MenuAdmin;
pub use orders::{OrderBoard, OrderTicket};
pub use register::{Receipt, Register};
pub use session::{PosSession, SessionHandle};
pub use stock::StockRoom;
