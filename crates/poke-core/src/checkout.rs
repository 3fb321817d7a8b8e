//! # Checkout Pipeline
//!
//! Discount rules and the checkout system that applies them.
//!
//! ## Pipeline Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Pipeline                                │
//! │                                                                         │
//! │  Basket ──► total = Σ price(kind) × qty                                 │
//! │     │                                                                   │
//! │     ├──► Rule 1 ──► discount₁ ┐                                         │
//! │     ├──► Rule 2 ──► discount₂ ├──► discount = Σ discountᵢ               │
//! │     └──► Rule N ──► discountₙ ┘                                         │
//! │                                                                         │
//! │  payable = max(total − discount, 0)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are registered once at store construction and evaluated in
//! registration order. Each rule sees the full basket contents and nothing
//! else: rules never observe each other's output.

use crate::basket::Basket;
use crate::item::{ItemKind, PriceList};
use crate::money::Money;

// =============================================================================
// Discount Rule Trait
// =============================================================================

/// A pure, registered pricing adjustment applied during checkout.
///
/// Implementations carry no mutable state. `discount` must be a pure function
/// of the basket contents and the price table.
pub trait DiscountRule: Send + Sync {
    /// Short name for logs and receipts.
    fn name(&self) -> &'static str;

    /// The amount this rule takes off the basket's total.
    fn discount(&self, basket: &Basket, prices: &PriceList) -> Money;
}

// =============================================================================
// Percent-Off Rule
// =============================================================================

/// Flat percentage off every unit of one designated item kind.
///
/// The rate is in basis points (1900 = 19%), matching the money math in
/// [`Money::percent_bps`].
#[derive(Debug, Clone)]
pub struct PercentOff {
    item: ItemKind,
    rate_bps: u32,
}

impl PercentOff {
    pub fn new(item: ItemKind, rate_bps: u32) -> Self {
        PercentOff { item, rate_bps }
    }
}

impl DiscountRule for PercentOff {
    fn name(&self) -> &'static str {
        "percent-off"
    }

    fn discount(&self, basket: &Basket, prices: &PriceList) -> Money {
        let qty = basket.quantity(self.item);
        if qty == 0 {
            return Money::zero();
        }
        prices
            .price(self.item)
            .multiply_quantity(qty as i64)
            .percent_bps(self.rate_bps)
    }
}

// =============================================================================
// Quantity Promo Rule
// =============================================================================

/// Promotional threshold discount: every `threshold`-th unit of one designated
/// item kind is free.
///
/// With threshold 3, a basket holding 7 repels gets 2 free (7 / 3 = 2).
#[derive(Debug, Clone)]
pub struct QuantityPromo {
    item: ItemKind,
    threshold: u32,
}

impl QuantityPromo {
    /// `threshold` of zero would divide by zero; it is clamped to 1, which
    /// makes every unit free (a configuration nobody ships, but defined).
    pub fn new(item: ItemKind, threshold: u32) -> Self {
        QuantityPromo {
            item,
            threshold: threshold.max(1),
        }
    }
}

impl DiscountRule for QuantityPromo {
    fn name(&self) -> &'static str {
        "quantity-promo"
    }

    fn discount(&self, basket: &Basket, prices: &PriceList) -> Money {
        let free_units = basket.quantity(self.item) / self.threshold;
        prices.price(self.item).multiply_quantity(free_units as i64)
    }
}

// =============================================================================
// Checkout Totals
// =============================================================================

/// The outcome of running a basket through the pipeline.
///
/// `total` and `discount` are reported unclamped so callers can verify the
/// invariant `discount = Σ ruleᵢ(basket)`; only `payable` floors at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTotals {
    /// Sum of unit price × quantity over kinds present in the basket.
    pub total: Money,

    /// Sum of every registered rule's contribution, in registration order.
    pub discount: Money,
}

impl CheckoutTotals {
    /// Final amount the client owes: `total − discount`, never negative.
    pub fn payable(&self) -> Money {
        self.total.sub_clamped(self.discount)
    }
}

// =============================================================================
// Checkout System
// =============================================================================

/// Owns the ordered sequence of discount rules and the price table.
///
/// Constructed once per store and never mutated afterwards; the store actor
/// holds it immutably for the life of the process.
pub struct CheckoutSystem {
    prices: PriceList,
    rules: Vec<Box<dyn DiscountRule>>,
}

impl CheckoutSystem {
    /// Creates a checkout system with no rules registered.
    pub fn new(prices: PriceList) -> Self {
        CheckoutSystem {
            prices,
            rules: Vec::new(),
        }
    }

    /// Registers a discount rule. Evaluation order is registration order.
    pub fn register(&mut self, rule: impl DiscountRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// The price table this system evaluates against.
    pub fn prices(&self) -> &PriceList {
        &self.prices
    }

    /// Runs the basket through the pipeline.
    pub fn checkout(&self, basket: &Basket) -> CheckoutTotals {
        let total: Money = basket
            .contents()
            .map(|(kind, qty)| self.prices.price(kind).multiply_quantity(qty as i64))
            .sum();

        let discount: Money = self
            .rules
            .iter()
            .map(|rule| rule.discount(basket, &self.prices))
            .sum();

        CheckoutTotals { total, discount }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// The standard registration: every 3rd repel free, 19% off rare candy.
    fn standard_system() -> CheckoutSystem {
        let mut system = CheckoutSystem::new(PriceList::standard());
        system.register(QuantityPromo::new(ItemKind::Repel, 3));
        system.register(PercentOff::new(ItemKind::RareCandy, 1900));
        system
    }

    #[test]
    fn test_empty_basket_totals_zero() {
        let system = standard_system();
        let totals = system.checkout(&Basket::new("cart1"));
        assert!(totals.total.is_zero());
        assert!(totals.discount.is_zero());
        assert!(totals.payable().is_zero());
    }

    #[test]
    fn test_total_is_price_times_quantity() {
        let system = standard_system();
        let mut basket = Basket::new("cart1");
        basket.add_item(ItemKind::Pokeball, 3); // 3 × $2.00
        basket.add_item(ItemKind::Potion, 2); // 2 × $3.00

        let totals = system.checkout(&basket);
        assert_eq!(totals.total.cents(), 1200);
        assert!(totals.discount.is_zero());
        assert_eq!(totals.payable().cents(), 1200);
    }

    #[test]
    fn test_percent_off_rule() {
        let system = standard_system();
        let mut basket = Basket::new("cart1");
        basket.add_item(ItemKind::RareCandy, 2); // 2 × $48.00 = $96.00

        let totals = system.checkout(&basket);
        assert_eq!(totals.total.cents(), 9600);
        // 19% of $96.00 = $18.24
        assert_eq!(totals.discount.cents(), 1824);
        assert_eq!(totals.payable().cents(), 9600 - 1824);
    }

    #[test]
    fn test_quantity_promo_rule() {
        let system = standard_system();
        let mut basket = Basket::new("cart1");
        basket.add_item(ItemKind::Repel, 7); // 7 × $3.50, 2 free

        let totals = system.checkout(&basket);
        assert_eq!(totals.total.cents(), 2450);
        assert_eq!(totals.discount.cents(), 700);
        assert_eq!(totals.payable().cents(), 1750);
    }

    #[test]
    fn test_rules_combine_independently() {
        let system = standard_system();
        let mut basket = Basket::new("cart1");
        basket.add_item(ItemKind::Repel, 3); // one free: $3.50
        basket.add_item(ItemKind::RareCandy, 1); // 19% of $48.00: $9.12
        basket.add_item(ItemKind::Pokeball, 1); // no rule

        let totals = system.checkout(&basket);
        assert_eq!(totals.total.cents(), 3 * 350 + 4800 + 200);
        assert_eq!(totals.discount.cents(), 350 + 912);
        assert_eq!(
            totals.payable(),
            totals.total - totals.discount
        );
    }

    #[test]
    fn test_payable_clamps_at_zero() {
        // A 200%-off rule pushes the discount past the total; the reported
        // payable amount floors at zero rather than going negative.
        let mut system = CheckoutSystem::new(PriceList::standard());
        system.register(PercentOff::new(ItemKind::Potion, 20000));

        let mut basket = Basket::new("cart1");
        basket.add_item(ItemKind::Potion, 1);

        let totals = system.checkout(&basket);
        assert_eq!(totals.total.cents(), 300);
        assert_eq!(totals.discount.cents(), 600);
        assert!(totals.payable().is_zero());
    }

    #[test]
    fn test_rule_sees_full_basket_not_prior_output() {
        // Two percent rules on the same item each discount from the raw line
        // total, not from the other's output: 10% + 10% of $100 is $20.
        let mut system = CheckoutSystem::new(PriceList::standard());
        system.register(PercentOff::new(ItemKind::RareCandy, 1000));
        system.register(PercentOff::new(ItemKind::RareCandy, 1000));

        let mut basket = Basket::new("cart1");
        basket.add_item(ItemKind::RareCandy, 1); // $48.00

        let totals = system.checkout(&basket);
        assert_eq!(totals.discount.cents(), 480 + 480);
    }
}
