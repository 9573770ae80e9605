//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  "add 42"                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Command parse ── bad syntax? ──► ApiError { INVALID_COMMAND }          │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  CartManager::add_to_cart ── CoreError::ProductNotFound ──┐             │
//! │     │                                                     ▼             │
//! │     │                                   ApiError { NOT_FOUND }          │
//! │     ▼                                                     │             │
//! │  Response ──────────────────────► Renderer ◄──────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are reported to the user and the loop continues; nothing here is
//! fatal and the cart is never left half-changed.

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};

/// Error returned from storefront commands.
///
/// ## Serialization
/// With `--json` the user sees:
/// ```json
/// {
///   "code": "EMPTY_CART",
///   "message": "Your cart is empty!"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart rule violated (quantity ceiling)
    CartError,

    /// Checkout with nothing in the cart
    EmptyCart,

    /// Unknown command or missing argument
    InvalidCommand,

    /// Response could not be produced (serialization)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid-command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidCommand, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, err.to_string()),
            CoreError::QuantityTooLarge { .. } => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ProductId;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::ProductNotFound(ProductId::new(42)).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");

        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.message, "Your cart is empty!");

        let err: ApiError = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        }
        .into();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_validation_error_mapping() {
        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "category".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "category is required");
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::new(ErrorCode::EmptyCart, "Your cart is empty!");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"EMPTY_CART","message":"Your cart is empty!"}"#);
    }
}
