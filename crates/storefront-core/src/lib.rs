//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate holds the catalog and the shopping cart. It has zero I/O
//! dependencies: rendering, input and timers belong to the presentation
//! layer, which talks to this crate through [`CartManager`] and [`Catalog`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Rendering surface (storefront-cli)                 │   │
//! │  │    Product grid ──► Cart badge ──► Cart modal ──► Toasts        │   │
//! │  └───────────────┬───────────────────────────────▲─────────────────┘   │
//! │                  │ queries / mutations           │ CartChanged          │
//! │  ┌───────────────▼───────────────────────────────┴─────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │   cart    │  │  manager  │  │   │
//! │  │   │  Catalog  │  │   Money   │  │   Cart    │  │CartManager│  │   │
//! │  │   │  Filter   │  │           │  │ CartLine  │  │ listeners │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • INTEGER MONEY                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, Rating)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Read-only product catalog and its queries
//! - [`cart`] - Cart lines and cart math
//! - [`manager`] - The cart manager: the only owner of cart state
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_core::{CartManager, Catalog, ProductId};
//!
//! let catalog = Arc::new(Catalog::builtin());
//! let mut manager = CartManager::new(catalog);
//!
//! manager.add_to_cart(ProductId::new(9)).unwrap();
//! manager.add_to_cart(ProductId::new(9)).unwrap();
//!
//! let order = manager.checkout().unwrap();
//! assert_eq!(order.total.to_decimal_string(), "29.98");
//! assert!(manager.lines().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod manager;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartStatus, CartSummary, CartView, QuantityChange};
pub use catalog::{Catalog, CategoryFilter};
pub use error::{CoreError, CoreResult, ValidationError};
pub use manager::{CartChanged, CartManager, ChangeReason, OrderConfirmation, SubscriptionId};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category tag that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Default ceiling for the quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering and keeps line totals far away from
/// integer overflow. The CLI can lower or raise it through its config.
pub const MAX_ITEM_QUANTITY: u32 = 999;
