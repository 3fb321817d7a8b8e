//! # poke-core: Pure Business Logic for PokeMart
//!
//! This crate is the **heart** of the PokeMart basket service. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PokeMart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Clients (TCP, newline JSON)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            poke-store (store actor + dispatcher)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ poke-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   item    │  │  basket   │  │ checkout  │  │   │
//! │  │   │   Money   │  │ ItemKind  │  │  Basket   │  │ discounts │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CHANNELS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`item`] - The item catalog and its fixed price table
//! - [`basket`] - Named baskets of item quantities
//! - [`checkout`] - Discount rules and the checkout pipeline
//! - [`error`] - Domain error types
//!
//! ## Example
//!
//! ```rust
//! use poke_core::basket::Basket;
//! use poke_core::checkout::{CheckoutSystem, PercentOff, QuantityPromo};
//! use poke_core::item::{ItemKind, PriceList};
//!
//! let prices = PriceList::standard();
//! let mut checkout = CheckoutSystem::new(prices);
//! checkout.register(QuantityPromo::new(ItemKind::Repel, 3));
//! checkout.register(PercentOff::new(ItemKind::RareCandy, 1900)); // 19%
//!
//! let mut basket = Basket::new("cart1");
//! basket.add_item(ItemKind::Pokeball, 2);
//!
//! let totals = checkout.checkout(&basket);
//! assert_eq!(totals.payable(), totals.total - totals.discount);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod checkout;
pub mod error;
pub mod item;
pub mod money;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::Basket;
pub use checkout::{CheckoutSystem, CheckoutTotals, DiscountRule, PercentOff, QuantityPromo};
pub use error::{CoreError, CoreResult};
pub use item::{ItemKind, PriceList};
pub use money::Money;
