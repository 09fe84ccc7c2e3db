//! # pixelmart-core: Pure Cart & Checkout Logic
//!
//! This crate is the **heart** of the PixelMart storefront. It holds the
//! cart list rules and the order-total math as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PixelMart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Storefront (apps/storefront)                      │   │
//! │  │   add / update / remove / clear ──► CartStore ──► checkout      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pixelmart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ ┌────────────┐    │   │
//! │  │  │ money  │ │ types  │ │  cart  │ │ totals │ │   order    │    │   │
//! │  │  │ Money  │ │Product │ │  Cart  │ │ Order  │ │ OrderReq.  │    │   │
//! │  │  │TaxRate │ │LineItem│ │ rules  │ │ Totals │ │ Customer   │    │   │
//! │  │  └────────┘ └────────┘ └────────┘ └────────┘ └────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                pixelmart-db (Snapshot slots)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (ProductRef, LineItem, FeePolicy, ...)
//! - [`cart`] - The cart list and its add/update/remove/clear rules
//! - [`totals`] - Order total calculator
//! - [`order`] - Order submission payload
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pixelmart_core::{calculate_totals, Cart, FeePolicy, Money, ProductRef};
//!
//! let mut cart = Cart::new();
//! let pack = ProductRef::new("brush-pack", "Brush Pack", Money::from_cents(3800));
//! cart.add_item(pack, 2, None);
//!
//! let totals = calculate_totals(cart.items(), &FeePolicy::default());
//! assert_eq!(totals.subtotal.cents(), 7600);
//! assert_eq!(totals.tax.cents(), 456);     // 6%
//! assert_eq!(totals.fee.cents(), 499);     // flat fee
//! assert_eq!(totals.total.cents(), 8555);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, MalformedSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{
    BillingAddress, CheckoutDetails, Customer, OrderConfirmation, OrderLine, OrderRequest,
};
pub use totals::{calculate_totals, OrderTotals, PricedLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default sales tax in basis points (6%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 600;

/// Default flat processing fee in cents ($4.99).
///
/// The storefront pages disagreed on this constant (4.99 and 4.00 were both
/// in use), so it is only a default; deployments set it explicitly.
pub const DEFAULT_FLAT_FEE_CENTS: i64 = 499;

/// Maximum quantity of a single cart line.
///
/// Adds and updates clamp to it; a snapshot line above it is malformed.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Name of the snapshot slot the cart is persisted under.
pub const DEFAULT_CART_SLOT: &str = "cart";
