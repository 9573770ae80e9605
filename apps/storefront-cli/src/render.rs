//! # Rendering
//!
//! Turns command results into what the user sees on stdout.
//!
//! ## Text Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShopEasy                                               🛒 2            │  header
//! │  » Added to cart!                                                       │  toasts
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  📚 [9] Best Seller Novel                                               │
//! │     ⭐⭐⭐⭐ 4.9                                                          │  card
//! │     $14.99                                                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Your Cart                                                              │
//! │    [9] Best Seller Novel    $14.99   x2                                 │  modal
//! │  Total: $29.98                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` every result is one line of JSON: the [`Response`] on
//! success, `{ "code", "message" }` on failure. The header is text only.

use serde::Serialize;
use std::fmt::Write;
use tracing::error;

use storefront_core::{CartLine, CartView, Money, OrderConfirmation, Product};

use crate::commands::Response;
use crate::error::ApiError;
use crate::state::{OutputFormat, ShopState, StorefrontConfig};

/// Shown for `help`.
pub const HELP: &str = "\
Commands:
  products             show products for the current filter
  filter <tag|all>     filter products by category
  search [term]        search product names and categories
  categories           list categories
  add <id>             add a product to the cart
  inc <id> / dec <id>  change a cart line's quantity
  remove <id>          remove a line from the cart
  cart                 show the cart
  clear                empty the cart
  checkout             place the order
  help                 show this help
  quit                 leave the store";

/// Renders responses in the configured output format.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    store_name: String,
    currency_symbol: String,
}

impl Renderer {
    pub fn new(config: &StorefrontConfig) -> Self {
        Renderer {
            format: config.output,
            store_name: config.store_name.clone(),
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    /// Renders one command result.
    pub fn render(&self, result: &Result<Response, ApiError>) -> String {
        match (self.format, result) {
            (OutputFormat::Json, Ok(response)) => to_json(response),
            (OutputFormat::Json, Err(err)) => to_json(err),
            (OutputFormat::Text, Ok(response)) => self.text(response),
            (OutputFormat::Text, Err(err)) => format!("Error: {}", err),
        }
    }

    /// Store name, cart badge and live toasts. `None` in JSON mode.
    pub fn header(&self, state: &ShopState) -> Option<String> {
        if self.format == OutputFormat::Json {
            return None;
        }

        let mut out = format!("{}  🛒 {}", self.store_name, state.badge());
        for toast in state.notifier().active() {
            let _ = write!(out, "\n» {}", toast.message);
        }
        Some(out)
    }

    // =========================================================================
    // Text
    // =========================================================================

    fn text(&self, response: &Response) -> String {
        match response {
            Response::Products {
                filter,
                query,
                products,
            } => self.product_grid(filter, query.as_deref(), products),
            Response::Categories { categories } => {
                format!("Categories: {}", categories.join(", "))
            }
            // The toast itself is shown by the header.
            Response::CartUpdated { summary, .. } => format!(
                "Cart: {} item(s), {}",
                summary.item_count,
                self.price(summary.total)
            ),
            Response::Cart(view) => self.cart_modal(view),
            Response::OrderPlaced(order) => self.order_placed(order),
            Response::Help => HELP.to_string(),
            Response::Quit => "Thanks for visiting!".to_string(),
        }
    }

    fn product_grid(&self, filter: &str, query: Option<&str>, products: &[Product]) -> String {
        let mut out = match query {
            Some(query) if !query.is_empty() => format!("Search: \"{}\"", query),
            Some(_) => "Search: (everything)".to_string(),
            None => format!("Category: {}", filter),
        };

        if products.is_empty() {
            out.push_str("\nNo products found");
            return out;
        }

        for product in products {
            out.push('\n');
            out.push_str(&self.product_card(product));
        }
        out
    }

    /// One product card: glyph, id, name, stars, price.
    pub fn product_card(&self, product: &Product) -> String {
        format!(
            "{} [{}] {}\n   {} {}\n   {}",
            product.glyph,
            product.id,
            product.name,
            "⭐".repeat(product.rating.whole_stars()),
            product.rating,
            self.price(product.price)
        )
    }

    /// The cart modal: lines then the total.
    pub fn cart_modal(&self, view: &CartView) -> String {
        if view.lines.is_empty() {
            return "Your cart is empty".to_string();
        }

        let mut out = String::from("Your Cart");
        for line in &view.lines {
            out.push('\n');
            out.push_str(&self.cart_line(line));
        }
        let _ = write!(out, "\nTotal: {}", self.price(view.summary.total));
        out
    }

    fn cart_line(&self, line: &CartLine) -> String {
        format!(
            "  [{}] {}  {}  x{}",
            line.product_id,
            line.name,
            self.price(line.unit_price),
            line.quantity
        )
    }

    /// Checkout confirmation message.
    pub fn order_placed(&self, order: &OrderConfirmation) -> String {
        format!(
            "Order placed successfully!\nTotal: {}\n\nThank you for shopping with us!",
            self.price(order.total)
        )
    }

    fn price(&self, amount: Money) -> String {
        amount.display_with(&self.currency_symbol)
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "Failed to serialize response");
            let err = ApiError::internal(e.to_string());
            serde_json::json!({ "code": "INTERNAL", "message": err.message }).to_string()
        }
    }
}
