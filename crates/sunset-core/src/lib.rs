//! # sunset-core: Pure Business Logic for Sunset POS
//!
//! This crate is the **heart** of Sunset POS. It contains the café's
//! ordering, inventory, and shift-accounting rules as pure functions and
//! plain data types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sunset POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  sunset-session (Session Layer)                 │   │
//! │  │    Register ──► OrderBoard ──► StockRoom ──► HistoryDesk        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sunset-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   cart    │  │   order   │  │ inventory │  │   │
//! │  │   │ tax step  │  │  LineItems│  │ lifecycle │  │  ledger   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   shift   │  │  report   │  │   money   │  │   types   │  │   │
//! │  │   │ windows   │  │ summaries │  │  Decimal  │  │  entities │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK READS • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  sunset-client (HTTP Layer)                     │   │
//! │  │            PosBackend trait, reqwest implementation             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (MenuItem, SalesRecord, etc.)
//! - [`money`] - Fixed-point money on `rust_decimal`
//! - [`items`] - The identity-merging line-item collection
//! - [`pricing`] - Subtotal, stepped service tax, grand total, change
//! - [`cart`] - The staging area for an order being assembled
//! - [`order`] - The Pending → Completed order state machine
//! - [`inventory`] - Stock vs. sell-quantity ledger
//! - [`shift`] - Half-open shift windows over the sale history
//! - [`report`] - Day buckets, name search, shift summaries
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic on their inputs, no hidden state
//! 2. **No Clock Reads**: "now" is always a parameter, so shift math is testable
//! 3. **Decimal Money**: `rust_decimal` everywhere, rounding only at display
//! 4. **Explicit Errors**: typed rejections, state untouched on failure
//!
//! ## Example Usage
//!
//! ```rust
//! use sunset_core::{Cart, MenuItem, Money, OrderDraft};
//!
//! let karahi = MenuItem {
//!     id: "m1".to_string(),
//!     name: "Chicken Karahi".to_string(),
//!     category: "Main Course".to_string(),
//!     price: Money::from_rupees(2000),
//! };
//!
//! let mut cart = Cart::new();
//! cart.table_number = "5".to_string();
//! cart.add_item(&karahi).unwrap();
//! cart.increase("m1");
//!
//! // 4000 subtotal is past the service-tax step, so 5% applies
//! let draft = OrderDraft::from_cart(&cart).unwrap();
//! assert_eq!(draft.total_price, Money::from_rupees(4200));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod inventory;
pub mod items;
pub mod money;
pub mod order;
pub mod pricing;
pub mod report;
pub mod shift;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sunset_core::Cart` instead of
// `use sunset_core::cart::Cart`

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{InventoryDraft, InventoryItem};
pub use items::{LineItem, LineItems};
pub use money::Money;
pub use order::{Order, OrderDraft, OrderStatus};
pub use pricing::{Totals, SERVICE_TAX_RATE, SERVICE_TAX_THRESHOLD};
pub use report::{DaySummary, SearchHits, ShiftSummary};
pub use shift::{Cursor, ShiftLog, ShiftWindow};
pub use types::*;
