//! # Marketplace API Client
//!
//! The two calls the storefront makes to the marketplace backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product ──► GET  {base}/products/{id}  ──► { id, name, price }     │
//! │                        404 ─► ClientError::NotFound                     │
//! │                                                                         │
//! │  checkout ─────► POST {base}/orders         ──► { orderNumber }         │
//! │                        !2xx ─► ClientError::Api { status, message }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are sent once. No retry; the configured timeout applies.

use std::time::Duration;

use pixelmart_core::validation::{validate_price, validate_product_id, validate_product_name};
use pixelmart_core::{CoreResult, Money, OrderConfirmation, OrderRequest, ProductRef};
use reqwest::{StatusCode, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when talking to the marketplace API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Product lookup returned 404.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base URL can't carry a path.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Product record as served by `GET /products/{id}`.
///
/// `price` is accepted as a JSON number or a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

impl ProductRecord {
    /// Validates the record and freezes it into a cart product.
    pub fn into_product_ref(self) -> CoreResult<ProductRef> {
        validate_product_id(&self.id)?;
        validate_product_name(&self.name)?;
        let price = Money::from_decimal(self.price)?;
        validate_price(price)?;

        Ok(ProductRef::new(self.id, self.name, price))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// =============================================================================
// Marketplace Trait
// =============================================================================

/// The marketplace backend as seen by the storefront.
#[allow(async_fn_in_trait)]
pub trait Marketplace {
    /// Fetches one product by id.
    async fn get_product(&self, id: &str) -> Result<ProductRecord, ClientError>;

    /// Submits an order.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, ClientError>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// reqwest-backed marketplace client.
#[derive(Debug, Clone)]
pub struct HttpMarketplace {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpMarketplace {
    /// Creates a client for `base_url` (e.g. `http://localhost:8080/api`).
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(HttpMarketplace { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Marketplace for HttpMarketplace {
    async fn get_product(&self, id: &str) -> Result<ProductRecord, ClientError> {
        let url = self.endpoint(&["products", id])?;
        debug!(%url, "Fetching product");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        response
            .json::<ProductRecord>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, ClientError> {
        let url = self.endpoint(&["orders"])?;
        debug!(%url, lines = order.items.len(), total = %order.total, "Submitting order");

        let response = self.client.post(url).json(order).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        response
            .json::<OrderConfirmation>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// Builds an API error, preferring the `{ "message": ... }` field of the body.
fn api_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
