//! # Basket
//!
//! A named, mutable collection of item quantities.
//!
//! ## Invariants
//! - Quantities only grow: the core exposes no removal operation.
//! - Identifier uniqueness is enforced by the dispatcher's Create check, not
//!   here; a `Basket` does not know about its siblings.
//! - Insertion order of item kinds is irrelevant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::item::ItemKind;

/// A shopping basket: a client-supplied identifier plus item quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    /// Client-supplied identifier, unique across live baskets.
    pub id: String,

    /// Quantity per item kind. Absent kind means zero.
    items: HashMap<ItemKind, u32>,
}

impl Basket {
    /// Creates a new empty basket.
    pub fn new(id: impl Into<String>) -> Self {
        Basket {
            id: id.into(),
            items: HashMap::new(),
        }
    }

    /// Increments the stored quantity for `kind`, creating the entry if absent.
    pub fn add_item(&mut self, kind: ItemKind, qty: u32) {
        *self.items.entry(kind).or_insert(0) += qty;
    }

    /// Quantity currently held for `kind` (zero if absent).
    pub fn quantity(&self, kind: ItemKind) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }

    /// Iterates over the (kind, quantity) pairs present in the basket.
    pub fn contents(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        self.items.iter().map(|(k, q)| (*k, *q))
    }

    /// Total unit count across all kinds.
    pub fn total_quantity(&self) -> u64 {
        self.items.values().map(|q| *q as u64).sum()
    }

    /// Checks if the basket holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
