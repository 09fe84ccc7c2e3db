//! # Checkout Commands
//!
//! Turns the cart into an order and submits it to the marketplace.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout details.json                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_checkout_details() ── unreadable / bad JSON ──► VALIDATION_ERROR  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRequest::from_cart() ── empty cart ──────────► CART_ERROR         │
//! │       │                     └ invalid details ─────► VALIDATION_ERROR   │
//! │       ▼                                                                 │
//! │  POST /orders (once) ── failure ──► error shown, cart KEPT for retry    │
//! │       │                                                                 │
//! │       ▼ success                                                         │
//! │  cart.clear() (empty snapshot persisted) ──► order number shown         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use pixelmart_core::{CheckoutDetails, OrderRequest, OrderTotals};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::client::Marketplace;
use crate::error::ApiError;
use crate::state::{CartStore, SnapshotStore};

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_number: String,
    /// Amounts that were charged.
    pub totals: OrderTotals,
}

/// Submits the cart as an order.
///
/// ## Errors
/// - `CART_ERROR` when the cart is empty (nothing is sent)
/// - `VALIDATION_ERROR` for invalid customer or address details
/// - `UPSTREAM_ERROR` / `NETWORK_ERROR` when submission fails; the cart is
///   left as it was
pub async fn checkout<S, M>(
    cart: &mut CartStore<S>,
    marketplace: &M,
    details: &CheckoutDetails,
) -> Result<CheckoutResponse, ApiError>
where
    S: SnapshotStore,
    M: Marketplace,
{
    debug!(lines = cart.line_count(), "checkout command");

    let totals = cart.totals();
    let order = OrderRequest::from_cart(cart.cart(), details, cart.policy())?;

    let confirmation = match marketplace.create_order(&order).await {
        Ok(confirmation) => confirmation,
        Err(e) => {
            warn!(error = %e, "Order submission failed, cart kept");
            return Err(e.into());
        }
    };

    info!(
        order_number = %confirmation.order_number,
        total = %totals.total,
        "Order placed"
    );

    cart.clear().await;

    Ok(CheckoutResponse {
        order_number: confirmation.order_number,
        totals,
    })
}

/// Reads checkout details (customer + billing address) from a JSON file.
///
/// ## File Format
/// ```json
/// {
///   "customer": { "name": "Ada Lovelace", "email": "ada@example.com" },
///   "billingAddress": {
///     "line1": "12 Analytical Row",
///     "city": "London",
///     "postalCode": "SW1A 1AA",
///     "country": "GB"
///   }
/// }
/// ```
pub async fn load_checkout_details(path: impl AsRef<Path>) -> Result<CheckoutDetails, ApiError> {
    let path = path.as_ref();

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        ApiError::validation(format!("Cannot read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        ApiError::validation(format!("Invalid checkout details in {}: {}", path.display(), e))
    })
}
