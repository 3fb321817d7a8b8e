//! # Item Catalog
//!
//! The fixed set of item kinds the store sells, and the price table that maps
//! each kind to a unit price.
//!
//! The catalog is closed: clients send item names as strings and anything that
//! does not parse into an [`ItemKind`] is rejected with
//! [`CoreError::UnknownItemType`] before it ever reaches a basket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Item Kind
// =============================================================================

/// An item type the store recognizes.
///
/// Wire names are the lowercase forms used in client commands and broadcast
/// messages: `pokeball`, `potion`, `repel`, `rare-candy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Pokeball,
    Potion,
    Repel,
    RareCandy,
}

impl ItemKind {
    /// All catalog entries, in display order.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Pokeball,
        ItemKind::Potion,
        ItemKind::Repel,
        ItemKind::RareCandy,
    ];

    /// The wire/display name for this kind.
    pub const fn name(&self) -> &'static str {
        match self {
            ItemKind::Pokeball => "pokeball",
            ItemKind::Potion => "potion",
            ItemKind::Repel => "repel",
            ItemKind::RareCandy => "rare-candy",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pokeball" => Ok(ItemKind::Pokeball),
            "potion" => Ok(ItemKind::Potion),
            "repel" => Ok(ItemKind::Repel),
            "rare-candy" => Ok(ItemKind::RareCandy),
            other => Err(CoreError::UnknownItemType(other.to_string())),
        }
    }
}

// =============================================================================
// Price List
// =============================================================================

/// Fixed price table keyed by item kind.
///
/// Prices never change while the store runs; the list is built once at store
/// construction and shared read-only with the checkout pipeline.
#[derive(Debug, Clone)]
pub struct PriceList {
    pokeball: Money,
    potion: Money,
    repel: Money,
    rare_candy: Money,
}

impl PriceList {
    /// The standard storefront price table.
    pub fn standard() -> Self {
        PriceList {
            pokeball: Money::from_cents(200),   // $2.00
            potion: Money::from_cents(300),     // $3.00
            repel: Money::from_cents(350),      // $3.50
            rare_candy: Money::from_cents(4800) // $48.00
        }
    }

    /// Unit price for one item kind.
    pub fn price(&self, kind: ItemKind) -> Money {
        match kind {
            ItemKind::Pokeball => self.pokeball,
            ItemKind::Potion => self.potion,
            ItemKind::Repel => self.repel,
            ItemKind::RareCandy => self.rare_candy,
        }
    }
}

impl Default for PriceList {
    fn default() -> Self {
        PriceList::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("pokeball".parse::<ItemKind>().unwrap(), ItemKind::Pokeball);
        assert_eq!("potion".parse::<ItemKind>().unwrap(), ItemKind::Potion);
        assert_eq!("repel".parse::<ItemKind>().unwrap(), ItemKind::Repel);
        assert_eq!(
            "rare-candy".parse::<ItemKind>().unwrap(),
            ItemKind::RareCandy
        );
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "masterball".parse::<ItemKind>().unwrap_err();
        assert_eq!(err.to_string(), "item type 'masterball' does not exist");
    }

    #[test]
    fn test_display_round_trips() {
        for kind in ItemKind::ALL {
            assert_eq!(kind.to_string().parse::<ItemKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ItemKind::RareCandy).unwrap();
        assert_eq!(json, "\"rare-candy\"");
        let kind: ItemKind = serde_json::from_str("\"pokeball\"").unwrap();
        assert_eq!(kind, ItemKind::Pokeball);
    }

    #[test]
    fn test_standard_prices() {
        let prices = PriceList::standard();
        assert_eq!(prices.price(ItemKind::Pokeball).cents(), 200);
        assert_eq!(prices.price(ItemKind::RareCandy).cents(), 4800);
    }
}
