//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │          │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                 │                │             │
//! │       │           add_product        checkout            │             │
//! │       │           update_item     (checkout.rs)          │             │
//! │       │           remove_item            │ failed:       │             │
//! │       │                │                 │ cart kept     │             │
//! │       │                ▼                 ▼               │             │
//! │       └─────────── clear_cart ◄──────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pixelmart_core::validation::{validate_license, validate_product_id};
use pixelmart_core::{LineItem, OrderTotals};
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::Marketplace;
use crate::error::ApiError;
use crate::state::{CartStore, SnapshotStore};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub item_count: i64,
    pub totals: OrderTotals,
    pub persistent: bool,
}

impl<S: SnapshotStore> From<&CartStore<S>> for CartResponse {
    fn from(cart: &CartStore<S>) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            item_count: cart.total_item_count(),
            totals: cart.totals(),
            persistent: cart.is_persistent(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Shell Display
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  > cart                                                                 │
/// │                                                                         │
/// │    p1  Retro Brush Pack               x3        $114.00                 │
/// │    p2  Pixel Font Bundle [Extended]   x1         $45.00                 │
/// │    ──────────────────────────────────────────────────                   │
/// │    Subtotal                                     $159.00                 │
/// │    Tax (6%)                                       $9.54                 │
/// │    Fee                                            $4.99                 │
/// │    Total                                        $173.53                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart<S: SnapshotStore>(cart: &CartStore<S>) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(cart)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product is looked up through the marketplace and its record validated
/// - A record whose id differs from the requested one is rejected
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new item
/// - Price is "frozen" at time of adding (never re-fetched)
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  add p1 2 Extended                                                      │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Validate id and license                                    │    │
/// │  │  2. GET /products/p1 (404 → NOT_FOUND, cart untouched)         │    │
/// │  │  3. Check record id, validate it, convert price to cents       │    │
/// │  │  4. Merge into cart, persist snapshot                          │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn add_product<S, M>(
    cart: &mut CartStore<S>,
    marketplace: &M,
    product_id: &str,
    quantity: Option<i64>,
    license: Option<String>,
) -> Result<CartResponse, ApiError>
where
    S: SnapshotStore,
    M: Marketplace,
{
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, license = ?license, "add_product command");

    validate_product_id(product_id)?;
    validate_license(license.as_deref())?;

    let record = marketplace.get_product(product_id).await?;
    if record.id != product_id {
        warn!(requested = %product_id, returned = %record.id, "Marketplace returned a different product");
        return Err(ApiError::validation(format!(
            "Marketplace returned product {} when {} was requested",
            record.id, product_id
        )));
    }
    let product = record.into_product_ref()?;

    cart.add_item(product, quantity, license).await;
    Ok(CartResponse::from(&*cart))
}

/// Updates the quantity of an item in the cart.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the item
/// - Product not in cart: no-op
pub async fn update_cart_item<S: SnapshotStore>(
    cart: &mut CartStore<S>,
    product_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    cart.update_quantity(product_id, quantity).await;
    CartResponse::from(&*cart)
}

/// Removes an item from the cart. Removing an absent item is a no-op.
pub async fn remove_from_cart<S: SnapshotStore>(
    cart: &mut CartStore<S>,
    product_id: &str,
) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.remove_item(product_id).await;
    CartResponse::from(&*cart)
}

/// Clears all items from the cart.
pub async fn clear_cart<S: SnapshotStore>(cart: &mut CartStore<S>) -> CartResponse {
    debug!("clear_cart command");

    cart.clear().await;
    CartResponse::from(&*cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::FakeMarketplace;
    use crate::error::ErrorCode;
    use crate::state::MemorySnapshotStore;
    use pixelmart_core::{FeePolicy, MAX_ITEM_QUANTITY};

    async fn session() -> (CartStore<MemorySnapshotStore>, MemorySnapshotStore) {
        let store = MemorySnapshotStore::new();
        let cart = CartStore::hydrate(store.clone(), "cart", FeePolicy::default()).await;
        (cart, store)
    }

    #[tokio::test]
    async fn test_add_product_snapshots_price() {
        let (mut cart, _) = session().await;
        let market = FakeMarketplace::with_catalogue();

        let response = add_product(&mut cart, &market, "p1", Some(2), None)
            .await
            .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].product.price.cents(), 3800);
        assert_eq!(response.item_count, 2);
        assert_eq!(response.totals.subtotal.cents(), 7600);
    }

    #[tokio::test]
    async fn test_add_product_defaults_to_one() {
        let (mut cart, _) = session().await;
        let market = FakeMarketplace::with_catalogue();

        add_product(&mut cart, &market, "p1", None, None).await.unwrap();
        let response = add_product(&mut cart, &market, "p1", None, Some("Extended".to_string()))
            .await
            .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 2);
        assert_eq!(response.items[0].license.as_deref(), Some("Extended"));
    }

    #[tokio::test]
    async fn test_unknown_product_leaves_cart_untouched() {
        let (mut cart, store) = session().await;
        let market = FakeMarketplace::with_catalogue();
        add_product(&mut cart, &market, "p1", None, None).await.unwrap();

        let err = add_product(&mut cart, &market, "ghost", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_skips_lookup() {
        let (mut cart, _) = session().await;
        let market = FakeMarketplace::with_catalogue();

        let bad_id = add_product(&mut cart, &market, "has space", None, None).await;
        let long_license = add_product(&mut cart, &market, "p1", None, Some("x".repeat(51))).await;

        assert_eq!(bad_id.unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(long_license.unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(market.lookups(), 0);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_record_id_is_rejected() {
        let (mut cart, store) = session().await;
        let market = FakeMarketplace::with_catalogue();

        let err = add_product(&mut cart, &market, "moved", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("p9"));
        assert!(cart.is_empty());
        assert!(cart.cart().get("p9").is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_huge_quantity_is_capped() {
        let (mut cart, _) = session().await;
        let market = FakeMarketplace::with_catalogue();

        add_product(&mut cart, &market, "p1", Some(10_000_000_000_000_000), None)
            .await
            .unwrap();
        let response = add_product(&mut cart, &market, "p1", Some(i64::MAX), None)
            .await
            .unwrap();

        assert_eq!(response.item_count, MAX_ITEM_QUANTITY);
        assert_eq!(response.totals.subtotal.cents(), 3800 * MAX_ITEM_QUANTITY);
    }

    #[tokio::test]
    async fn test_invalid_record_is_rejected() {
        let (mut cart, _) = session().await;
        let market = FakeMarketplace::with_catalogue();

        let err = add_product(&mut cart, &market, "broken", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_update_remove_clear() {
        let (mut cart, _) = session().await;
        let market = FakeMarketplace::with_catalogue();
        add_product(&mut cart, &market, "p1", None, None).await.unwrap();
        add_product(&mut cart, &market, "p2", None, None).await.unwrap();

        let updated = update_cart_item(&mut cart, "p1", 3).await;
        assert_eq!(updated.totals.total.cents(), 17353);

        let removed = update_cart_item(&mut cart, "p1", -1).await;
        assert_eq!(removed.items.len(), 1);

        let again = remove_from_cart(&mut cart, "p1").await;
        assert_eq!(again, removed);

        let cleared = clear_cart(&mut cart).await;
        assert!(cleared.items.is_empty());
        assert_eq!(cleared.totals, OrderTotals::default());
        assert_eq!(get_cart(&cart), cleared);
    }
}
