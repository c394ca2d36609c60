//! # Service Probe
//!
//! Walks every read endpoint of a running persistence service and prints
//! what it finds. Handy when standing up a new till or chasing a flaky
//! network.
//!
//! ## Usage
//! ```bash
//! # Against the default local service
//! cargo run -p sunset-client --bin probe
//!
//! # Against another till's service
//! SUNSET_API_URL=http://192.168.1.20:4000/api cargo run -p sunset-client --bin probe
//! ```

use sunset_client::{ClientConfig, HttpBackend, PosBackend};
use sunset_core::order::partition_by_status;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::load()?;

    println!("Sunset POS Service Probe");
    println!("========================");
    println!("Service: {}", config.base_url);
    println!();

    let backend = HttpBackend::new(&config)?;

    let menu = backend.list_menu_items().await?;
    println!("✓ Menu: {} items", menu.len());

    let orders = backend.list_orders().await?;
    let (pending, completed) = partition_by_status(orders);
    println!(
        "✓ Orders: {} pending, {} completed",
        pending.len(),
        completed.len()
    );

    let inventory = backend.list_inventory().await?;
    println!("✓ Inventory: {} items", inventory.len());

    let history = backend.list_history().await?;
    println!("✓ History: {} records", history.len());

    let closings = backend.list_shift_closings().await?;
    println!(
        "✓ Shifts: {} closings, {} addressable shifts",
        closings.len(),
        closings.len() + 1
    );

    println!();
    println!("✓ Service is reachable and all listings decode");

    Ok(())
}
