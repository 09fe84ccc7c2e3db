//! # Order Totals
//!
//! Pure conversion from cart lines to `{ subtotal, tax, fee, total }`.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lines ──► Σ(unit price × quantity) ──► subtotal   (exact cents)        │
//! │                                            │                            │
//! │                       × tax rate, rounded ─┼──► tax                     │
//! │                                            │                            │
//! │             flat fee if subtotal > 0 ──────┼──► fee                     │
//! │                                            ▼                            │
//! │                     subtotal + tax + fee ──► total                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no per-line rounding: the only rounding step is the tax.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{FeePolicy, LineItem};

/// Anything with a unit price and a quantity.
pub trait PricedLine {
    fn unit_price(&self) -> Money;
    fn quantity(&self) -> i64;
}

impl PricedLine for LineItem {
    fn unit_price(&self) -> Money {
        self.product.price
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }
}

impl PricedLine for (Money, i64) {
    fn unit_price(&self) -> Money {
        self.0
    }

    fn quantity(&self) -> i64 {
        self.1
    }
}

impl<T: PricedLine + ?Sized> PricedLine for &T {
    fn unit_price(&self) -> Money {
        (**self).unit_price()
    }

    fn quantity(&self) -> i64 {
        (**self).quantity()
    }
}

/// Derived order amounts. Recomputed on every read, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub fee: Money,
    pub total: Money,
}

/// Computes order totals under `policy`.
///
/// Total over any input; an empty list gives all zeros.
///
/// ## Example
/// ```rust
/// use pixelmart_core::{calculate_totals, FeePolicy, Money};
///
/// let lines = [(Money::from_cents(3800), 3), (Money::from_cents(4500), 1)];
/// let totals = calculate_totals(&lines, &FeePolicy::default());
/// assert_eq!(totals.total.to_string(), "$173.53");
/// ```
pub fn calculate_totals<I>(lines: I, policy: &FeePolicy) -> OrderTotals
where
    I: IntoIterator,
    I::Item: PricedLine,
{
    let subtotal: Money = lines
        .into_iter()
        .map(|line| line.unit_price().multiply_quantity(line.quantity()))
        .sum();

    let tax = subtotal.calculate_tax(policy.tax_rate);
    let fee = if subtotal.is_positive() {
        policy.flat_fee
    } else {
        Money::zero()
    };

    OrderTotals {
        subtotal,
        tax,
        fee,
        total: subtotal + tax + fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductRef, TaxRate};
    use crate::Cart;

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = calculate_totals(Cart::new().items(), &FeePolicy::default());
        assert_eq!(totals, OrderTotals::default());
        assert!(totals.fee.is_zero());
    }

    #[test]
    fn test_checkout_scenario() {
        let mut cart = Cart::new();
        cart.add_item(ProductRef::new("p1", "Brush Pack", Money::from_cents(3800)), 1, None);
        cart.add_item(ProductRef::new("p2", "Font Kit", Money::from_cents(4500)), 1, None);
        cart.update_quantity("p1", 3);

        let totals = calculate_totals(cart.items(), &FeePolicy::default());
        assert_eq!(totals.subtotal.cents(), 15900);
        assert_eq!(totals.tax.cents(), 954);
        assert_eq!(totals.fee.cents(), 499);
        assert_eq!(totals.total.cents(), 17353);
    }

    #[test]
    fn test_no_float_drift() {
        // 0.1 + 0.2 style inputs stay exact
        let lines = [(Money::from_cents(10), 1), (Money::from_cents(20), 1)];
        let totals = calculate_totals(lines, &FeePolicy::new(TaxRate::zero(), Money::zero()));
        assert_eq!(totals.total.cents(), 30);

        let lines = [(Money::from_cents(1999), 3)];
        let totals = calculate_totals(lines, &FeePolicy::default());
        assert_eq!(totals.subtotal.cents(), 5997);
        // 5997 × 6% = 359.82 → 360
        assert_eq!(totals.tax.cents(), 360);
    }

    #[test]
    fn test_fee_only_when_subtotal_positive() {
        let free = [(Money::zero(), 4)];
        let totals = calculate_totals(free, &FeePolicy::default());
        assert!(totals.fee.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_custom_policy() {
        let policy = FeePolicy::new(TaxRate::from_bps(600), Money::from_cents(400));
        let totals = calculate_totals([(Money::from_cents(10000), 1)], &policy);
        assert_eq!(totals.fee.cents(), 400);
        assert_eq!(totals.total.cents(), 10000 + 600 + 400);
    }
}
