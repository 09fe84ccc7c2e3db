//! # Cart
//!
//! The shopping cart list and its mutation rules.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  add_item(p, q, lic) ──► p in cart?  yes ──► quantity += q (≤ max)      │
//! │                                              license = lic if non-empty │
//! │                                      no  ──► push LineItem(p, q, lic)   │
//! │                                                                         │
//! │  update_quantity(id, q) ──► q ≤ 0 ──► remove_item(id)                   │
//! │                             q > 0 ──► quantity = min(q, max)            │
//! │                                                                         │
//! │  remove_item(id) ──────────► retain(product.id != id)                   │
//! │                                                                         │
//! │  clear() ──────────────────► items = []                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every quantity is in `1..=MAX_ITEM_QUANTITY`
//! - Insertion order is display order
//!
//! Every operation is total: unknown ids are no-ops, never errors.

use thiserror::Error;

use crate::money::Money;
use crate::types::{LineItem, ProductRef};
use crate::MAX_ITEM_QUANTITY;

/// Why a persisted snapshot was rejected.
#[derive(Debug, Error)]
pub enum MalformedSnapshot {
    #[error("not a list of cart lines: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("line for {product_id} has quantity {quantity}")]
    QuantityOutOfRange { product_id: String, quantity: i64 },

    #[error("line for {product_id} has a negative price")]
    NegativePrice { product_id: String },

    #[error("product {product_id} appears more than once")]
    DuplicateProduct { product_id: String },
}

/// An insertion-ordered list of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product, merging into an existing line for the same id.
    ///
    /// `quantity` is clamped into `1..=MAX_ITEM_QUANTITY`, and so is the
    /// merged quantity. An empty or whitespace-only `license` counts as no
    /// license.
    pub fn add_item(&mut self, product: ProductRef, quantity: i64, license: Option<String>) {
        let quantity = quantity.clamp(1, MAX_ITEM_QUANTITY);
        let license = license.filter(|l| !l.trim().is_empty());

        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = (item.quantity + quantity).min(MAX_ITEM_QUANTITY);
            if license.is_some() {
                item.license = license;
            }
            return;
        }

        self.items.push(LineItem::new(product, quantity, license));
    }

    /// Sets the quantity of a line; zero or negative removes it, anything
    /// above `MAX_ITEM_QUANTITY` is clamped.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(item) = self.find_mut(product_id) {
            item.quantity = quantity.min(MAX_ITEM_QUANTITY);
        }
    }

    /// Removes the line for `product_id`, if any.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id() != product_id);
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of unit price × quantity, exact in cents.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serializes the lines into the snapshot format.
    pub fn to_snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }

    /// Restores a cart from a snapshot, rejecting anything that is not a
    /// well-formed list or that breaks a cart invariant.
    pub fn from_snapshot(json: &str) -> Result<Cart, MalformedSnapshot> {
        let items: Vec<LineItem> = serde_json::from_str(json)?;

        for (idx, item) in items.iter().enumerate() {
            if !(1..=MAX_ITEM_QUANTITY).contains(&item.quantity) {
                return Err(MalformedSnapshot::QuantityOutOfRange {
                    product_id: item.product.id.clone(),
                    quantity: item.quantity,
                });
            }
            if item.product.price.is_negative() {
                return Err(MalformedSnapshot::NegativePrice {
                    product_id: item.product.id.clone(),
                });
            }
            if items[..idx].iter().any(|p| p.product.id == item.product.id) {
                return Err(MalformedSnapshot::DuplicateProduct {
                    product_id: item.product.id.clone(),
                });
            }
        }

        Ok(Cart { items })
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.product_id() == product_id)
    }
}
