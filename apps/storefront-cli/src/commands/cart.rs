//! # Cart Commands
//!
//! Cart mutations and the cart modal.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart  ┌──────────┐   checkout   ┌──────────┐     │
//! │  │  Empty   │──────────────►│ NonEmpty │─────────────►│  Order   │     │
//! │  │          │◄──────────────│          │              │  Placed  │     │
//! │  └──────────┘  last line    └──────────┘              └──────────┘     │
//! │       ▲        removed /         │                         │           │
//! │       │        clear_cart        │ update_quantity         │           │
//! │       │                          │ remove_from_cart        │           │
//! │       └──────────────────────────┴─────────────────────────┘           │
//! │                         (cart is empty again)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use storefront_core::ProductId;

use super::Response;
use crate::error::ApiError;
use crate::state::ShopState;

/// Toast shown after a successful add.
pub const ADDED_TO_CART: &str = "Added to cart!";

/// Shows the cart modal.
pub fn get_cart(state: &ShopState) -> Response {
    debug!("get_cart command");
    Response::Cart(state.manager().view())
}

/// Adds one unit of a product and raises the "Added to cart!" toast.
///
/// ## Behavior
/// - Product already in the cart: quantity goes up by one
/// - Otherwise: a new line with the catalog price at this moment
/// - Unknown id: `NOT_FOUND`, no toast
pub fn add_to_cart(state: &mut ShopState, product_id: ProductId) -> Result<Response, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let summary = state.manager_mut().add_to_cart(product_id)?;
    state.notifier_mut().push(ADDED_TO_CART);

    Ok(Response::CartUpdated {
        summary,
        notification: Some(ADDED_TO_CART.to_string()),
    })
}

/// Changes a line's quantity by `delta`; at zero the line is removed.
pub fn update_quantity(
    state: &mut ShopState,
    product_id: ProductId,
    delta: i64,
) -> Result<Response, ApiError> {
    debug!(product_id = %product_id, delta, "update_quantity command");

    state.manager_mut().update_quantity(product_id, delta)?;
    Ok(get_cart(state))
}

/// Drops a line. Removing something that is not in the cart is fine.
pub fn remove_from_cart(state: &mut ShopState, product_id: ProductId) -> Response {
    debug!(product_id = %product_id, "remove_from_cart command");

    state.manager_mut().remove_from_cart(product_id);
    get_cart(state)
}

pub fn clear_cart(state: &mut ShopState) -> Response {
    debug!("clear_cart command");

    state.manager_mut().clear();
    get_cart(state)
}

/// Places the order and empties the cart.
pub fn checkout(state: &mut ShopState) -> Result<Response, ApiError> {
    debug!("checkout command");

    let order = state.manager_mut().checkout()?;

    Ok(Response::OrderPlaced(order))
}
