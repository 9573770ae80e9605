//! # Product Catalog
//!
//! The read-only list of products and the queries the product grid runs
//! against it.
//!
//! ## Query Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Queries                                  │
//! │                                                                         │
//! │  Filter button "books" ──► filter_by_category("books")                 │
//! │  Filter button "All"   ──► filter_by_category("all")  (no filtering)   │
//! │  Search box "COF"      ──► search("COF")                                │
//! │                              │                                          │
//! │                              ▼                                          │
//! │   lowercase once, substring match on name OR category                  │
//! │   "Coffee Maker" (home) ← MATCH                                        │
//! │                                                                         │
//! │  Add-to-cart button    ──► find_by_id(11)   (used by CartManager)      │
//! │                                                                         │
//! │  Every query preserves the catalog's natural order.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::error::{CoreResult, ValidationError};
use crate::types::{Product, ProductId};
use crate::validation::validate_product;
use crate::ALL_CATEGORIES;

/// The compiled-in demo products: (id, name, price in cents, category,
/// rating in tenths, glyph).
const BUILTIN_PRODUCTS: &[(u32, &str, i64, &str, u8, &str)] = &[
    (1, "Wireless Headphones", 7999, "electronics", 45, "🎧"),
    (2, "Smart Watch", 19999, "electronics", 47, "⌚"),
    (3, "Laptop Computer", 89999, "electronics", 48, "💻"),
    (4, "Bluetooth Speaker", 4999, "electronics", 43, "🔊"),
    (5, "Men's T-Shirt", 2499, "clothing", 42, "👕"),
    (6, "Women's Dress", 5999, "clothing", 46, "👗"),
    (7, "Running Shoes", 8999, "clothing", 45, "👟"),
    (8, "Winter Jacket", 12999, "clothing", 47, "🧥"),
    (9, "Best Seller Novel", 1499, "books", 49, "📚"),
    (10, "Cookbook", 1999, "books", 44, "📖"),
    (11, "Coffee Maker", 7999, "home", 46, "☕"),
    (12, "Blender", 4999, "home", 43, "🥤"),
];

// =============================================================================
// Category Filter
// =============================================================================

/// Which categories the product grid shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// No filtering: the whole catalog.
    #[default]
    All,
    /// Only products whose category equals the tag.
    Only(String),
}

impl CategoryFilter {
    /// Interprets a filter tag; `"all"` means no filtering.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(tag.to_string())
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(tag) => product.in_category(tag),
        }
    }

    /// The tag this filter was parsed from.
    pub fn tag(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(tag) => tag,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable product catalog with an id index.
///
/// ## Usage
/// ```rust
/// use storefront_core::{Catalog, ProductId};
///
/// let catalog = Catalog::builtin();
///
/// let novel = catalog.find_by_id(ProductId::new(9)).unwrap();
/// assert_eq!(novel.name, "Best Seller Novel");
///
/// assert_eq!(catalog.filter_by_category("books").len(), 2);
/// assert_eq!(catalog.search("coffee").len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from product records, validating each one.
    ///
    /// ## Errors
    /// - Any invalid record (see [`validate_product`])
    /// - Two records sharing an id
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            validate_product(product)?;

            if index.insert(product.id, position).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.to_string(),
                }
                .into());
            }
        }

        debug!(count = products.len(), "Catalog built");
        Ok(Catalog { products, index })
    }

    /// The compiled-in twelve-product demo catalog.
    pub fn builtin() -> Self {
        let products: Vec<Product> = builtin_products();
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();

        Catalog { products, index }
    }

    /// Looks up a product by id. Absence is explicit; callers must handle it.
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&position| &self.products[position])
    }

    /// Every product, in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Alias of [`Catalog::all`] under the name the rendering surface uses.
    pub fn get_all_products(&self) -> &[Product] {
        self.all()
    }

    /// Products in the given category; `"all"` returns the full catalog.
    pub fn filter_by_category(&self, tag: &str) -> Vec<&Product> {
        self.filter(&CategoryFilter::from_tag(tag))
    }

    /// Products accepted by `filter`, in catalog order.
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        let products: Vec<&Product> = self.products.iter().filter(|p| filter.matches(p)).collect();
        debug!(filter = %filter, count = products.len(), "Filtered catalog");
        products
    }

    /// Case-insensitive substring search over name and category.
    ///
    /// An empty (or all-whitespace) term matches every product.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        let products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .collect();
        debug!(term = %needle, count = products.len(), "Searched catalog");
        products
    }

    /// Distinct category tags in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(product.category.as_str());
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

fn builtin_products() -> Vec<Product> {
    BUILTIN_PRODUCTS
        .iter()
        .map(|&(id, name, price_cents, category, rating, glyph)| {
            Product::new(id, name, price_cents, category, rating, glyph)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
