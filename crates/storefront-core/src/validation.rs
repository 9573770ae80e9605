//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog build (Catalog::new)                                 │
//! │  ├── validate_product: id, name, price, category, rating               │
//! │  └── Duplicate ids rejected by the catalog itself                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: User input (CLI / rendering surface)                         │
//! │  ├── ProductId::from_str                                                │
//! │  └── validate_search_query, validate_category_tag                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_name, validate_search_query};
//!
//! validate_product_name("Coffee Maker").unwrap();
//! assert_eq!(validate_search_query("  Coffee ").unwrap(), "Coffee");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, Rating};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted category tag.
pub const MAX_CATEGORY_LEN: usize = 50;

/// Longest accepted search term.
pub const MAX_QUERY_LEN: usize = 100;

/// Highest accepted unit price: 10,000,000.00.
///
/// At the default quantity ceiling (999) a line stays below 10^13 cents, so
/// a cart total is exact for millions of lines before `Money` saturates.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category tag and returns it trimmed.
///
/// The `"all"` sentinel passes; it is interpreted by [`crate::CategoryFilter`].
pub fn validate_category_tag(tag: &str) -> ValidationResult<String> {
    let tag = tag.trim();

    if tag.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if tag.chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    Ok(tag.to_string())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price: `0..=MAX_PRICE_CENTS`. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a rating (0.0 to 5.0).
pub fn validate_rating(rating: Rating) -> ValidationResult<()> {
    if rating.tenths() > Rating::MAX_TENTHS {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates every field of a product record.
///
/// Id uniqueness is a property of the whole catalog and is checked there.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.get() == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product id".to_string(),
        });
    }

    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_category_tag(&product.category)?;
    validate_rating(product.rating)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Wireless Headphones").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category_tag() {
        assert_eq!(validate_category_tag(" books ").unwrap(), "books");
        assert_eq!(validate_category_tag("all").unwrap(), "all");
        assert!(validate_category_tag("").is_err());
        assert!(validate_category_tag(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("").unwrap(), "");
        assert_eq!(validate_search_query("  watch ").unwrap(), "watch");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::ZERO).is_ok());
        assert!(validate_price(Money::from_cents(1499)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());

        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_price(Money::from_cents(i64::MAX / 2 + 1)).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(Rating::from_tenths(0)).is_ok());
        assert!(validate_rating(Rating::from_tenths(50)).is_ok());
        assert!(validate_rating(Rating::from_tenths(51)).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&Product::new(1, "Blender", 4999, "home", 43, "🥤")).is_ok());

        let zero_id = Product::new(0, "Blender", 4999, "home", 43, "🥤");
        assert!(matches!(
            validate_product(&zero_id),
            Err(ValidationError::MustBePositive { .. })
        ));

        let negative = Product::new(2, "Blender", -1, "home", 43, "🥤");
        assert!(validate_product(&negative).is_err());

        let no_category = Product::new(3, "Blender", 4999, "", 43, "🥤");
        assert!(validate_product(&no_category).is_err());
    }
}
