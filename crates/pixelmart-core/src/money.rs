//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A browser cart summing prices as floats:                               │
//! │    19.99 × 3 = 59.970000000000006                                       │
//! │    then toFixed(2) on every line  → cent-level drift on the total       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 × 3 = 5997 cents, summed exactly, rounded once for tax          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decimal values only appear at the wire boundary (API prices, order
//! payloads) through [`Money::from_decimal`] and [`Money::to_decimal`].
//!
//! ## Usage
//! ```rust
//! use pixelmart_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 3;                // $32.97
//! assert_eq!(line.cents(), 3297);
//! assert_eq!(line.to_string(), "$32.97");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ProductRef.price ──► LineItem line total ──► OrderTotals.subtotal      │
/// │                                                    │                    │
/// │                        TaxRate (bps) ──────────────┼──► tax             │
/// │                        FeePolicy.flat_fee ─────────┼──► fee             │
/// │                                                    ▼                    │
/// │                                             OrderTotals.total           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Serializes as a plain integer of cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal currency amount into cents.
    ///
    /// Rounds to 2 fraction digits first (midpoint away from zero), so
    /// `38`, `38.0` and `38.004` all become 3800 cents.
    ///
    /// ## Example
    /// ```rust
    /// use pixelmart_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_decimal(Decimal::new(4499, 2)).unwrap(); // 44.99
    /// assert_eq!(price.cents(), 4499);
    /// ```
    pub fn from_decimal(amount: Decimal) -> CoreResult<Self> {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| CoreError::InvalidAmount(amount.to_string()))
    }

    /// Returns the amount as a decimal with exactly 2 fraction digits.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax rounded to the nearest cent (half up).
    ///
    /// ## Implementation
    /// Integer math: `(amount × bps + 5000) / 10000`. The +5000 is half of
    /// the 10000 divisor. i128 keeps large carts from overflowing; a result
    /// beyond the i64 range saturates.
    ///
    /// ## Example
    /// ```rust
    /// use pixelmart_core::money::Money;
    /// use pixelmart_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(15900); // $159.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(600));
    /// assert_eq!(tax.cents(), 954); // $9.54
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        let clamped = tax_cents.clamp(i64::MIN as i128, i64::MAX as i128);
        Money::from_cents(clamped as i64)
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34` / `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// Arithmetic saturates rather than wrapping or panicking.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(17353).to_string(), "$173.53");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(Decimal::new(38, 0)).unwrap().cents(), 3800);
        assert_eq!(Money::from_decimal(Decimal::new(499, 2)).unwrap().cents(), 499);
        // 12.345 → 12.35 (midpoint away from zero)
        assert_eq!(Money::from_decimal(Decimal::new(12345, 3)).unwrap().cents(), 1235);
        // 12.344 → 12.34
        assert_eq!(Money::from_decimal(Decimal::new(12344, 3)).unwrap().cents(), 1234);
    }

    #[test]
    fn test_from_decimal_rejects_out_of_range() {
        let huge = Decimal::MAX;
        assert!(matches!(
            Money::from_decimal(huge),
            Err(CoreError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(954).to_decimal().to_string(), "9.54");
        assert_eq!(Money::from_cents(15900).to_decimal().to_string(), "159.00");
    }

    #[test]
    fn test_tax_rounding_half_up() {
        // $0.25 at 6% = 1.5 cents → 2 cents
        assert_eq!(Money::from_cents(25).calculate_tax(TaxRate::from_bps(600)).cents(), 2);
        // $0.24 at 6% = 1.44 cents → 1 cent
        assert_eq!(Money::from_cents(24).calculate_tax(TaxRate::from_bps(600)).cents(), 1);
        assert!(Money::zero().calculate_tax(TaxRate::from_bps(600)).is_zero());
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 1]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 351);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(Money::from_cents(3800).multiply_quantity(10_000_000_000_000_000), max);
        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!(Money::from_cents(-2) * i64::MAX, Money::from_cents(i64::MIN));

        let total: Money = [max, max].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_tax_on_saturated_amount() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.calculate_tax(TaxRate::from_bps(20_000)), max);
        assert!(max.calculate_tax(TaxRate::from_bps(600)).is_positive());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(3800)).unwrap();
        assert_eq!(json, "3800");
        let back: Money = serde_json::from_str("4500").unwrap();
        assert_eq!(back.cents(), 4500);
    }
}
