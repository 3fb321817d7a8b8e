//! # PokeMart Storefront
//!
//! TCP server for the multi-client shopping-basket service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Server                                │
//! │                                                                         │
//! │  Clients ───► TCP (7667) ───► sessions ───► store actor ───► broadcasts │
//! │                                                                         │
//! │  All state is in memory and lost on restart.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;

use poke_store::config::StoreConfig;
use poke_store::server::Server;
use poke_store::store::{Store, StoreSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("starting PokeMart storefront...");

    // Load configuration
    let config = StoreConfig::load()?;
    info!(
        addr = %config.bind_address(),
        mailbox = config.mailbox_capacity,
        outbox = config.outbox_capacity,
        "configuration loaded"
    );

    // Spawn the store actor; the handle is the only way anything reaches it
    let (store, handle) = Store::new(StoreSettings::from(&config));
    tokio::spawn(store.run());

    // Bind the listener; failure here aborts the process before serving
    let server = Server::bind(&config.bind_address(), config.outbox_capacity).await?;

    // Serve until a shutdown signal arrives
    tokio::select! {
        result = server.run(handle) => {
            result?;
        }
        _ = shutdown_signal() => {}
    }

    info!("storefront shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, stopping listener...");
}
