//! # Validation Module
//!
//! Input validation for product records and checkout details.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront form (browser)                                    │
//! │  └── Immediate feedback on empty fields                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product records from GET /products/{id}                           │
//! │  └── Customer + billing address before POST /orders                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Marketplace API                                              │
//! │  └── Final authority, errors come back as { message }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart quantities are NOT validated here: the cart accepts every quantity
//! and normalizes it (see [`crate::cart`]).

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_PRODUCT_ID_LEN: usize = 64;
const MAX_NAME_LEN: usize = 200;
const MAX_LICENSE_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 254;
const MAX_ADDRESS_LINE_LEN: usize = 200;
const MAX_POSTAL_CODE_LEN: usize = 16;

// =============================================================================
// Generic Helpers
// =============================================================================

/// Checks that a trimmed value is non-empty and at most `max` chars.
pub fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

fn validate_optional(field: &str, value: Option<&str>, max: usize) -> ValidationResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product identity key.
///
/// ## Rules
/// - Non-empty, at most 64 characters
/// - No whitespace (ids end up in `/products/{id}` URLs)
///
/// ## Example
/// ```rust
/// use pixelmart_core::validation::validate_product_id;
///
/// assert!(validate_product_id("retro-brush-pack").is_ok());
/// assert!(validate_product_id("has space").is_err());
/// assert!(validate_product_id("").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    if id.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must not contain whitespace or '/'".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required("product name", name, MAX_NAME_LEN)
}

/// Validates a unit price. Zero is allowed (free downloads).
///
/// ## Example
/// ```rust
/// use pixelmart_core::money::Money;
/// use pixelmart_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(0)).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an optional license tier label.
pub fn validate_license(license: Option<&str>) -> ValidationResult<()> {
    validate_optional("license", license, MAX_LICENSE_LEN)
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name, MAX_NAME_LEN)
}

/// Validates an email address.
///
/// ## Rules
/// - Exactly one `@`
/// - Non-empty local part
/// - Domain contains a `.` that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    validate_required("email", email, MAX_EMAIL_LEN)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return Err(invalid("missing '@'")),
    };

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@example.com"));
    }

    if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
        return Err(invalid("domain must look like example.com"));
    }

    Ok(())
}

/// Validates a street address line.
pub fn validate_address_line(field: &str, line: &str) -> ValidationResult<()> {
    validate_required(field, line, MAX_ADDRESS_LINE_LEN)
}

/// Validates an optional second address line.
pub fn validate_optional_address_line(field: &str, line: Option<&str>) -> ValidationResult<()> {
    validate_optional(field, line, MAX_ADDRESS_LINE_LEN)
}

/// Validates a postal code.
///
/// ## Rules
/// - Non-empty, at most 16 characters
/// - Letters, digits, spaces and hyphens only
pub fn validate_postal_code(code: &str) -> ValidationResult<()> {
    validate_required("postal code", code, MAX_POSTAL_CODE_LEN)?;

    if !code
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "postal code".to_string(),
            reason: "must contain only letters, digits, spaces, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates an ISO 3166-1 alpha-2 country code (e.g. "US").
pub fn validate_country(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "country".to_string(),
        });
    }

    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "country".to_string(),
            reason: "must be a two-letter country code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
