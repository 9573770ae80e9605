//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Cart and catalog rule violations               │
//! │  └── ValidationError  - Input / catalog record validation failures     │
//! │                                                                         │
//! │  storefront-cli errors (app)                                           │
//! │  ├── ApiError         - What the rendering surface sees (serialized)   │
//! │  └── ConfigError      - Config file / environment problems             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Rendering surface      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable: the operation that produced it left the
//! cart exactly as it was.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and catalog rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The product id is not in the catalog.
    ///
    /// ## When This Occurs
    /// - A stale product card sends an id that no longer exists
    /// - A typed command names an id outside the catalog
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Checkout was attempted with nothing in the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Checkout" (cart empty)
    ///      │
    ///      ▼
    /// EmptyCart
    ///      │
    ///      ▼
    /// UI shows: "Your cart is empty!" (nothing else happens)
    /// ```
    #[error("Your cart is empty!")]
    EmptyCart,

    /// A cart line would exceed the per-line quantity ceiling.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: u32 },

    /// A record or input failed validation.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation failures.
///
/// Raised while building a catalog from product records and while
/// sanitizing user input (search terms, category tags).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Empty after trimming.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be within {min}..={max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Not parseable, e.g. a product id that is not a number.
    #[error("{field} is malformed: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two catalog records share a key.
    #[error("duplicate {field}: {value}")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_messages() {
        let err = CoreError::ProductNotFound(ProductId::new(42));
        assert_eq!(err.to_string(), "Product not found: 42");

        assert_eq!(CoreError::EmptyCart.to_string(), "Your cart is empty!");

        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 1000 exceeds maximum allowed (999)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "3".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate product id: 3");
    }

    #[test]
    fn test_validation_wraps_into_core_error() {
        let err: CoreError = ValidationError::Required {
            field: "category".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid input: category is required");
    }
}
