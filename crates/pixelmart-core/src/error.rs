//! # Error Types
//!
//! Domain-specific error types for pixelmart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pixelmart-core errors (this file)                                     │
//! │  ├── CoreError        - Checkout / product record failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pixelmart-db errors (separate crate)                                  │
//! │  └── DbError          - Snapshot slot failures                         │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the shopper sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Shell output           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations themselves never fail: every add/update/remove/clear has a
//! defined next state. Errors only come from checkout and product records.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A monetary amount could not be represented in cents.
    ///
    /// ## When This Occurs
    /// - A decimal price from the API is out of the i64 cent range
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for product records coming from the marketplace API and for the
/// customer/billing details entered at checkout.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(
            CoreError::InvalidAmount("1e30".to_string()).to_string(),
            "Invalid amount: 1e30"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooLong {
            field: "license".to_string(),
            max: 50,
        };
        assert_eq!(err.to_string(), "license must be at most 50 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
