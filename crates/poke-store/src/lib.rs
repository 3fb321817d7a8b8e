//! # poke-store: Store Actor + Wire Protocol for PokeMart
//!
//! This crate provides the concurrent service layer of the PokeMart basket
//! service: a single-writer actor that owns all shared state, the pure
//! dispatcher it runs orders through, and the TCP surface that feeds it.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PokeMart Service Layer                             │
//! │                                                                         │
//! │  TCP clients                                                            │
//! │      │ newline-delimited JSON                                           │
//! │      ▼                                                                  │
//! │  ┌──────────┐   accept   ┌──────────┐   orders    ┌──────────────────┐  │
//! │  │  server  │ ─────────► │ session  │ ──────────► │   store actor    │  │
//! │  │ (listen) │  per conn  │ (decode, │  join/leave │  (sole owner of  │  │
//! │  └──────────┘            │  encode) │ ◄────────── │  baskets+clients)│  │
//! │                          └──────────┘  responses  └────────┬─────────┘  │
//! │                                                            │            │
//! │                                                   ┌────────▼─────────┐  │
//! │                                                   │    dispatch      │  │
//! │                                                   │ (pure verb table)│  │
//! │                                                   └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` actor, its handle, and client identity
//! - [`dispatch`] - Pure command interpreter (verb table)
//! - [`protocol`] - Wire message types and the JSON line codec
//! - [`session`] - Per-connection read/write handling
//! - [`server`] - TCP listener and accept loop
//! - [`config`] - Environment-variable configuration
//! - [`error`] - Service error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use poke_store::config::StoreConfig;
//! use poke_store::server::Server;
//! use poke_store::store::{Store, StoreSettings};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::load()?;
//! let (store, handle) = Store::new(StoreSettings::from(&config));
//! tokio::spawn(store.run());
//!
//! let server = Server::bind(&config.bind_address(), config.outbox_capacity).await?;
//! server.run(handle).await?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod server;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use dispatch::{Delivery, Scope};
pub use error::{StoreError, StoreResult};
pub use protocol::{Request, Response, StatusCode, Verb};
pub use server::Server;
pub use store::{ClientId, Order, Store, StoreHandle, StoreSettings};
