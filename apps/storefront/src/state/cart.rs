//! # Cart State
//!
//! The shopper's cart session: one [`Cart`] plus the snapshot slot that
//! keeps it across restarts.
//!
//! ## Ownership
//! One session, one owner. The shell holds the `CartStore` and lends it to
//! commands by `&mut`; there is no global cart and no lock.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  startup ──────────────► CartStore::hydrate() ──► load slot → Cart      │
//! │                                                                         │
//! │  add <id> ─────────────► add_item() ─────────┐                          │
//! │  update <id> <qty> ────► update_quantity() ──┤   mutate Cart in memory  │
//! │  remove <id> ──────────► remove_item() ──────┤           │              │
//! │  clear / checkout ok ──► clear() ────────────┘           ▼              │
//! │                                                  persist() → save slot  │
//! │                                                                         │
//! │  cart / checkout ──────► items(), totals() (read only)                 │
//! │                                                                         │
//! │  NOTE: a failed load or save is logged and the session continues       │
//! │        in memory. Callers never see a persistence error.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pixelmart_core::{
    calculate_totals, Cart, FeePolicy, LineItem, Money, OrderTotals, ProductRef,
};
use tracing::{debug, error, info, warn};

use super::snapshot::SnapshotStore;

/// Cart session bound to a snapshot slot.
///
/// ## Persistence Modes
/// - **persistent**: every mutation writes the full snapshot to `slot`
/// - **in-memory**: the store failed (or was never available); mutations
///   only touch the in-memory cart
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    store: Option<S>,
    slot: String,
    policy: FeePolicy,
}

impl<S: SnapshotStore> CartStore<S> {
    /// Loads the cart from `slot`.
    ///
    /// ## Outcomes
    /// - slot absent → empty cart
    /// - slot well-formed → lines restored in stored order
    /// - slot malformed → discarded, empty cart
    /// - store error → empty cart, session degrades to in-memory
    pub async fn hydrate(store: S, slot: impl Into<String>, policy: FeePolicy) -> Self {
        let slot = slot.into();

        let (cart, store) = match store.load(&slot).await {
            Ok(None) => {
                debug!(slot = %slot, "No cart snapshot, starting empty");
                (Cart::new(), Some(store))
            }
            Ok(Some(payload)) => match Cart::from_snapshot(&payload) {
                Ok(cart) => {
                    info!(slot = %slot, lines = cart.line_count(), "Cart restored");
                    (cart, Some(store))
                }
                Err(e) => {
                    debug!(slot = %slot, error = %e, "Discarding malformed cart snapshot");
                    (Cart::new(), Some(store))
                }
            },
            Err(e) => {
                warn!(slot = %slot, error = %e, "Cart storage unavailable, keeping cart in memory");
                (Cart::new(), None)
            }
        };

        CartStore {
            cart,
            store,
            slot,
            policy,
        }
    }

    /// A session with no snapshot store at all.
    pub fn detached(slot: impl Into<String>, policy: FeePolicy) -> Self {
        CartStore {
            cart: Cart::new(),
            store: None,
            slot: slot.into(),
            policy,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of `product` (merging by id), then persists.
    pub async fn add_item(&mut self, product: ProductRef, quantity: i64, license: Option<String>) {
        self.cart.add_item(product, quantity, license);
        self.persist().await;
    }

    /// Sets a line's quantity; `quantity <= 0` removes it. Persists.
    pub async fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        self.cart.update_quantity(product_id, quantity);
        self.persist().await;
    }

    /// Removes a line if present. Persists.
    pub async fn remove_item(&mut self, product_id: &str) {
        self.cart.remove_item(product_id);
        self.persist().await;
    }

    /// Empties the cart and persists the empty snapshot.
    pub async fn clear(&mut self) {
        self.cart.clear();
        self.persist().await;
    }

    async fn persist(&mut self) {
        let Some(store) = &self.store else {
            return;
        };

        let payload = match self.cart.to_snapshot() {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart snapshot");
                return;
            }
        };

        let saved = store.save(&self.slot, &payload).await;
        if let Err(e) = saved {
            warn!(
                slot = %self.slot,
                error = %e,
                "Failed to save cart, continuing in memory"
            );
            self.store = None;
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    pub fn total_item_count(&self) -> i64 {
        self.cart.total_item_count()
    }

    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Subtotal, tax, fee and total under this session's fee policy.
    pub fn totals(&self) -> OrderTotals {
        calculate_totals(self.cart.items(), &self.policy)
    }

    pub fn policy(&self) -> &FeePolicy {
        &self.policy
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Whether mutations are still being written to the snapshot store.
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }
}
