//! # sunset-client: HTTP Client for the Sunset POS Persistence Service
//!
//! The wire layer of Sunset POS. Domain rules stay in `sunset-core`; this
//! crate only carries validated payloads to the service and decodes what
//! comes back.
//!
//! ## Modules
//!
//! - [`backend`] - The `PosBackend` trait, one method per service operation
//! - [`http`] - `HttpBackend`, the reqwest implementation
//! - [`config`] - Service address and timeouts, with env overrides
//! - [`dto`] - Wire payloads that have no domain struct of their own
//! - [`error`] - Client error types with a transient/permanent split
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sunset_client::{ClientConfig, HttpBackend, PosBackend};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load()?;
//! let backend = HttpBackend::new(&config)?;
//!
//! let menu = backend.list_menu_items().await?;
//! println!("{} items on the menu", menu.len());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod dto;
pub mod error;
pub mod http;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use backend::PosBackend;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
