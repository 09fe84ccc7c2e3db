//! # Domain Types
//!
//! Core domain types shared by the cart, the totals calculator and checkout.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductRef    │   │    LineItem     │   │   FeePolicy     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (identity)  │◄──│  product        │   │  tax_rate (bps) │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  flat_fee       │       │
//! │  │  price (Money)  │   │  license?       │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Snapshot
//! `ProductRef.price` is copied from the catalogue when the product is added
//! to the cart. Later catalogue price changes do not reach existing lines.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{DEFAULT_FLAT_FEE_CENTS, DEFAULT_TAX_RATE_BPS};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 600 bps = 6%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Fee Policy
// =============================================================================

/// The tax and flat-fee rules applied to an order.
///
/// ## Defaults
/// - Tax: 6%
/// - Flat fee: $4.99, charged once per non-empty order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FeePolicy {
    pub tax_rate: TaxRate,
    pub flat_fee: Money,
}

impl FeePolicy {
    pub const fn new(tax_rate: TaxRate, flat_fee: Money) -> Self {
        FeePolicy { tax_rate, flat_fee }
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        FeePolicy::new(
            TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            Money::from_cents(DEFAULT_FLAT_FEE_CENTS),
        )
    }
}

// =============================================================================
// Product Reference
// =============================================================================

/// The product fields a cart line keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRef {
    /// Immutable identity key.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price, frozen at add-to-cart time.
    pub price: Money,
}

impl ProductRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        ProductRef {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in a cart.
///
/// This is also the element type of the persisted snapshot, so its serde
/// shape is the snapshot format: `{ product, quantity, license? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub product: ProductRef,

    /// Always ≥ 1 inside a cart.
    pub quantity: i64,

    /// License tier label, e.g. "Commercial" or "Extended".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub license: Option<String>,
}

impl LineItem {
    pub fn new(product: ProductRef, quantity: i64, license: Option<String>) -> Self {
        LineItem {
            product,
            quantity,
            license,
        }
    }

    /// Product identity key of this line.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity, no rounding.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(600);
        assert_eq!(rate.bps(), 600);
        assert!((rate.percentage() - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_fee_policy_default() {
        let policy = FeePolicy::default();
        assert_eq!(policy.tax_rate.bps(), 600);
        assert_eq!(policy.flat_fee.cents(), 499);
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new(
            ProductRef::new("p1", "Icon Set", Money::from_cents(1999)),
            3,
            None,
        );
        assert_eq!(item.line_total().cents(), 5997);
        assert_eq!(item.product_id(), "p1");
    }

    #[test]
    fn test_line_item_json_shape() {
        let item = LineItem::new(
            ProductRef::new("p1", "Icon Set", Money::from_cents(3800)),
            2,
            Some("Commercial".to_string()),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "product": { "id": "p1", "name": "Icon Set", "price": 3800 },
                "quantity": 2,
                "license": "Commercial"
            })
        );

        let bare = LineItem::new(item.product.clone(), 1, None);
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("license").is_none());
    }

    #[test]
    fn test_ts_binding_marks_license_optional() {
        let decl = LineItem::decl();
        assert!(decl.contains("license?: string"), "{decl}");
        assert!(!decl.contains("string | null"), "{decl}");
    }
}
