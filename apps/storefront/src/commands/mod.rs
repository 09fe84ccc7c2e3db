//! # Commands Module
//!
//! Every action the shell can dispatch.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── get_cart, add_product, update/remove/clear
//! ├── checkout.rs  ◄─── checkout, load_checkout_details
//! └── status.rs    ◄─── get_status
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartStore<S>)
//!
//! // Needs cart and marketplace
//! async fn add_product(cart: &mut CartStore<S>, marketplace: &M, ...)
//!
//! // Needs cart and (maybe) database
//! async fn get_status(cart: &CartStore<S>, db: Option<&Database>, ...)
//! ```
//!
//! Generic over [`SnapshotStore`](crate::state::SnapshotStore) and
//! [`Marketplace`](crate::client::Marketplace) so tests run against
//! in-memory fakes.

pub mod cart;
pub mod checkout;
pub mod status;

pub use cart::{add_product, clear_cart, get_cart, remove_from_cart, update_cart_item, CartResponse};
pub use checkout::{checkout, load_checkout_details, CheckoutResponse};
pub use status::{get_status, DatabaseStatus, StatusResponse};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use pixelmart_core::{BillingAddress, CheckoutDetails, Customer, OrderConfirmation, OrderRequest};
    use rust_decimal::Decimal;

    use crate::client::{ClientError, Marketplace, ProductRecord};

    /// Marketplace with a fixed catalogue that records submitted orders.
    #[derive(Default)]
    pub struct FakeMarketplace {
        products: HashMap<String, ProductRecord>,
        rejection: Mutex<Option<(u16, String)>>,
        orders: Mutex<Vec<OrderRequest>>,
        lookups: AtomicUsize,
    }

    impl FakeMarketplace {
        /// p1 $38.00, p2 $45.00, a record with a negative price, and a
        /// `moved` entry that answers with product p9.
        pub fn with_catalogue() -> Self {
            let mut products = HashMap::new();
            for (key, id, name, cents) in [
                ("p1", "p1", "Retro Brush Pack", 3800),
                ("p2", "p2", "Pixel Font Bundle", 4500),
                ("broken", "broken", "Broken Record", -100),
                ("moved", "p9", "Relocated Sprite Sheet", 1200),
            ] {
                products.insert(
                    key.to_string(),
                    ProductRecord {
                        id: id.to_string(),
                        name: name.to_string(),
                        price: Decimal::new(cents, 2),
                    },
                );
            }
            FakeMarketplace {
                products,
                ..FakeMarketplace::default()
            }
        }

        pub fn reject_orders(&self, status: u16, message: &str) {
            *self.rejection.lock().unwrap() = Some((status, message.to_string()));
        }

        pub fn accept_orders(&self) {
            *self.rejection.lock().unwrap() = None;
        }

        pub fn orders(&self) -> Vec<OrderRequest> {
            self.orders.lock().unwrap().clone()
        }

        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    impl Marketplace for FakeMarketplace {
        async fn get_product(&self, id: &str) -> Result<ProductRecord, ClientError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.products
                .get(id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(id.to_string()))
        }

        async fn create_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, ClientError> {
            if let Some((status, message)) = self.rejection.lock().unwrap().clone() {
                return Err(ClientError::Api { status, message });
            }
            let mut orders = self.orders.lock().unwrap();
            orders.push(order.clone());
            Ok(OrderConfirmation {
                order_number: format!("PM-{}", 1000 + orders.len()),
            })
        }
    }

    pub fn details() -> CheckoutDetails {
        CheckoutDetails {
            customer: Customer {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            },
            billing_address: BillingAddress {
                line1: "12 Analytical Row".to_string(),
                line2: None,
                city: "London".to_string(),
                region: None,
                postal_code: "SW1A 1AA".to_string(),
                country: "GB".to_string(),
            },
        }
    }
}
