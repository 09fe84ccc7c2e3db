//! # Order Submission Payload
//!
//! Turns the cart into the JSON body of `POST /orders`.
//!
//! ## Wire Format
//! ```text
//! {
//!   "items": [{ "productId": "p1", "quantity": 3 }, ...],
//!   "customer": { "name": "...", "email": "..." },
//!   "billingAddress": { "line1": "...", "city": "...", ... },
//!   "subtotal": 159.0,
//!   "tax": 9.54,
//!   "shipping": 4.99,      ← the flat fee
//!   "total": 173.53
//! }
//! ```
//!
//! Amounts are computed in cents and converted to decimals only here.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::totals::{calculate_totals, OrderTotals};
use crate::types::FeePolicy;
use crate::validation::{
    validate_address_line, validate_country, validate_customer_name, validate_email,
    validate_optional_address_line, validate_postal_code, ValidationResult,
};

/// The person placing the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_customer_name(&self.name)?;
        validate_email(&self.email)
    }
}

/// Billing address entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillingAddress {
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub region: Option<String>,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2.
    pub country: String,
}

impl BillingAddress {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_address_line("address line 1", &self.line1)?;
        validate_optional_address_line("address line 2", self.line2.as_deref())?;
        validate_address_line("city", &self.city)?;
        validate_optional_address_line("region", self.region.as_deref())?;
        validate_postal_code(&self.postal_code)?;
        validate_country(&self.country)
    }
}

/// Everything the shopper enters on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutDetails {
    pub customer: Customer,
    pub billing_address: BillingAddress,
}

impl CheckoutDetails {
    pub fn validate(&self) -> ValidationResult<()> {
        self.customer.validate()?;
        self.billing_address.validate()
    }
}

/// One `{ productId, quantity }` entry of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i64,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
    pub customer: Customer,
    pub billing_address: BillingAddress,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl OrderRequest {
    /// Builds the order from the cart's current contents.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when there is nothing to order
    /// - [`CoreError::Validation`] when checkout details are invalid
    pub fn from_cart(cart: &Cart, details: &CheckoutDetails, policy: &FeePolicy) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        details.validate()?;

        let totals = calculate_totals(cart.items(), policy);
        let items = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
            })
            .collect();

        Ok(OrderRequest::with_totals(items, details, &totals))
    }

    fn with_totals(items: Vec<OrderLine>, details: &CheckoutDetails, totals: &OrderTotals) -> Self {
        OrderRequest {
            items,
            customer: details.customer.clone(),
            billing_address: details.billing_address.clone(),
            subtotal: totals.subtotal.to_decimal(),
            tax: totals.tax.to_decimal(),
            shipping: totals.fee.to_decimal(),
            total: totals.total.to_decimal(),
        }
    }
}

/// Successful response of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    /// Some deployments send a number, others a string.
    #[serde(deserialize_with = "string_or_number")]
    pub order_number: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ProductRef;

    fn details() -> CheckoutDetails {
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

    fn scenario_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(ProductRef::new("p1", "Brush Pack", Money::from_cents(3800)), 3, None);
        cart.add_item(
            ProductRef::new("p2", "Font Kit", Money::from_cents(4500)),
            1,
            Some("Commercial".to_string()),
        );
        cart
    }

    #[test]
    fn test_from_cart_builds_payload() {
        let request =
            OrderRequest::from_cart(&scenario_cart(), &details(), &FeePolicy::default()).unwrap();

        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].product_id, "p1");
        assert_eq!(request.items[0].quantity, 3);
        assert_eq!(request.subtotal, Decimal::new(15900, 2));
        assert_eq!(request.tax, Decimal::new(954, 2));
        assert_eq!(request.shipping, Decimal::new(499, 2));
        assert_eq!(request.total, Decimal::new(17353, 2));
    }

    #[test]
    fn test_payload_json_shape() {
        let request =
            OrderRequest::from_cart(&scenario_cart(), &details(), &FeePolicy::default()).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["items"][1]["productId"], "p2");
        assert_eq!(json["billingAddress"]["postalCode"], "SW1A 1AA");
        assert!(json["billingAddress"].get("line2").is_none());
        assert_eq!(json["tax"].as_f64(), Some(9.54));
        assert_eq!(json["shipping"].as_f64(), Some(4.99));
        assert_eq!(json["total"].as_f64(), Some(173.53));
    }

    #[test]
    fn test_ts_binding_marks_address_fields_optional() {
        let decl = BillingAddress::decl();
        assert!(decl.contains("line2?: string"), "{decl}");
        assert!(decl.contains("region?: string"), "{decl}");
    }

    #[test]
    fn test_empty_cart_rejected() {
        let result = OrderRequest::from_cart(&Cart::new(), &details(), &FeePolicy::default());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_invalid_details_rejected() {
        let mut bad = details();
        bad.customer.email = "not-an-email".to_string();
        let result = OrderRequest::from_cart(&scenario_cart(), &bad, &FeePolicy::default());
        assert!(matches!(result, Err(CoreError::Validation(_))));

        let mut bad = details();
        bad.billing_address.country = "GBR".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_confirmation_accepts_string_or_number() {
        let c: OrderConfirmation = serde_json::from_str(r#"{"orderNumber":"PM-1001"}"#).unwrap();
        assert_eq!(c.order_number, "PM-1001");

        let c: OrderConfirmation = serde_json::from_str(r#"{"orderNumber":1002}"#).unwrap();
        assert_eq!(c.order_number, "1002");
    }

    #[test]
    fn test_details_from_form_json() {
        let json = r#"{
            "customer": { "name": "Ada", "email": "ada@example.com" },
            "billingAddress": {
                "line1": "1 Main St", "city": "Springfield",
                "postalCode": "12345", "country": "US"
            }
        }"#;
        let parsed: CheckoutDetails = serde_json::from_str(json).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.billing_address.region, None);
    }
}
