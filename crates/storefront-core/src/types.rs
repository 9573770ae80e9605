//! # Domain Types
//!
//! Catalog-side domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ProductId     │   │     Rating      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  u32, > 0       │   │  tenths (u8)    │       │
//! │  │  name           │   │  unique within  │   │  45 = 4.5 stars │       │
//! │  │  price (Money)  │   │  the catalog    │   │  0..=50         │       │
//! │  │  category       │   └─────────────────┘   └─────────────────┘       │
//! │  │  rating         │                                                    │
//! │  │  glyph          │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable once the catalog is built. Cart lines copy the
//! name and price out of a product instead of pointing back at it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Identifier of a product in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses ids typed by the user (`"9"`, `" 12 "`).
impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u32 = s.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: format!("'{}' is not a whole number", s.trim()),
        })?;

        if id == 0 {
            return Err(ValidationError::MustBePositive {
                field: "product id".to_string(),
            });
        }

        Ok(ProductId(id))
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Customer rating from 0.0 to 5.0, stored in tenths of a star.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Rating(u8);

impl Rating {
    /// Highest rating, in tenths.
    pub const MAX_TENTHS: u8 = 50;

    #[inline]
    pub const fn from_tenths(tenths: u8) -> Self {
        Rating(tenths)
    }

    #[inline]
    pub const fn tenths(&self) -> u8 {
        self.0
    }

    /// Number of whole stars to draw (the rating rounded down).
    #[inline]
    pub const fn whole_stars(&self) -> usize {
        (self.0 / 10) as usize
    }
}

/// `45` displays as `4.5`, `40` as `4`.
impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 % 10 {
            0 => write!(f, "{}", self.0 / 10),
            frac => write!(f, "{}.{}", self.0 / 10, frac),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique positive identifier.
    pub id: ProductId,

    /// Display name shown on the product card and in the cart.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Category tag used by the filter buttons (e.g. "books").
    pub category: String,

    pub rating: Rating,

    /// Opaque display glyph (an emoji in the built-in catalog).
    pub glyph: String,
}

impl Product {
    /// Creates a product record. Validation happens when it joins a catalog.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price_cents: i64,
        category: impl Into<String>,
        rating_tenths: u8,
        glyph: impl Into<String>,
    ) -> Self {
        Product {
            id: ProductId::new(id),
            name: name.into(),
            price: Money::from_cents(price_cents),
            category: category.into(),
            rating: Rating::from_tenths(rating_tenths),
            glyph: glyph.into(),
        }
    }

    /// Exact (case-sensitive) category match, as used by the filter buttons.
    #[inline]
    pub fn in_category(&self, tag: &str) -> bool {
        self.category == tag
    }

    /// Case-insensitive substring match against name or category.
    ///
    /// `needle` must already be lowercase; the catalog lowers it once per
    /// query rather than once per product.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
