//! # Catalog Commands
//!
//! Product grid queries: the current filter, category buttons and search.
//!
//! ## Grid Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  filter books ──► validate tag ──► ShopState.filter = Only("books")    │
//! │                                          │                              │
//! │  products ───────────────────────────────┤                              │
//! │                                          ▼                              │
//! │                           Catalog::filter(&filter) ──► Products        │
//! │                                                                         │
//! │  search mak ──► validate query ──► Catalog::search("mak") ──► Products │
//! │                 (filter is left untouched)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use storefront_core::validation::{validate_category_tag, validate_search_query};
use storefront_core::{CategoryFilter, Product};

use super::Response;
use crate::error::ApiError;
use crate::state::ShopState;

/// Product grid for the remembered filter.
pub fn products(state: &ShopState) -> Response {
    let products: Vec<Product> = state
        .catalog()
        .filter(state.filter())
        .into_iter()
        .cloned()
        .collect();
    debug!(filter = %state.filter(), count = products.len(), "products command");

    Response::Products {
        filter: state.filter().tag().to_string(),
        query: None,
        products,
    }
}

/// Switches the category filter and shows the grid.
///
/// Unknown categories are accepted and simply show an empty grid.
pub fn filter(state: &mut ShopState, tag: &str) -> Result<Response, ApiError> {
    let tag = validate_category_tag(tag)?;
    debug!(tag = %tag, "filter command");

    state.set_filter(CategoryFilter::from_tag(&tag));
    Ok(products(state))
}

/// Searches names and categories across the whole catalog.
pub fn search(state: &ShopState, term: &str) -> Result<Response, ApiError> {
    let query = validate_search_query(term)?;
    debug!(query = %query, "search command");

    let products: Vec<Product> = state
        .catalog()
        .search(&query)
        .into_iter()
        .cloned()
        .collect();

    Ok(Response::Products {
        filter: state.filter().tag().to_string(),
        query: Some(query),
        products,
    })
}

/// Filter buttons: `all` followed by every category in catalog order.
pub fn categories(state: &ShopState) -> Response {
    let mut categories = vec![storefront_core::ALL_CATEGORIES.to_string()];
    categories.extend(state.catalog().categories().into_iter().map(String::from));

    Response::Categories { categories }
}
