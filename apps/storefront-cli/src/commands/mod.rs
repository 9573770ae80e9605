//! # Commands
//!
//! One input line is one user event: it parses into a [`Command`], runs
//! against the [`ShopState`] and produces a [`Response`] for the renderer.
//!
//! ## Command Table
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │  Input               │  Effect                                          │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │  products            │  product grid for the current filter             │
//! │  filter <tag|all>    │  set category filter, show grid                  │
//! │  search [term]       │  name/category search, show grid                │
//! │  categories          │  list filter tags                                │
//! │  add <id>            │  add one unit, toast "Added to cart!"            │
//! │  inc <id> / dec <id> │  quantity +1 / -1 (0 removes the line)           │
//! │  remove <id>         │  drop the line                                   │
//! │  cart                │  cart modal                                      │
//! │  clear               │  empty the cart                                  │
//! │  checkout            │  place the order                                 │
//! │  help / quit         │                                                  │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;

use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

use storefront_core::{CartSummary, CartView, OrderConfirmation, Product, ProductId};

use crate::error::ApiError;
use crate::state::ShopState;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Filter(String),
    Search(String),
    Categories,
    Add(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    Cart,
    Clear,
    Checkout,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let product_id = || -> Result<ProductId, ApiError> {
            if rest.is_empty() {
                return Err(ApiError::invalid_command(format!(
                    "'{}' needs a product id",
                    verb
                )));
            }
            Ok(rest.parse::<ProductId>()?)
        };

        let command = match verb.to_lowercase().as_str() {
            "products" | "ls" => Command::Products,
            "filter" => {
                if rest.is_empty() {
                    return Err(ApiError::invalid_command("'filter' needs a category or 'all'"));
                }
                Command::Filter(rest.to_string())
            }
            "search" => Command::Search(rest.to_string()),
            "categories" => Command::Categories,
            "add" => Command::Add(product_id()?),
            "inc" | "+" => Command::Increment(product_id()?),
            "dec" | "-" => Command::Decrement(product_id()?),
            "remove" | "rm" => Command::Remove(product_id()?),
            "cart" => Command::Cart,
            "clear" => Command::Clear,
            "checkout" => Command::Checkout,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => return Err(ApiError::invalid_command("Type 'help' for commands")),
            other => {
                return Err(ApiError::invalid_command(format!(
                    "Unknown command '{}'. Type 'help' for commands",
                    other
                )))
            }
        };

        Ok(command)
    }
}

/// What a command hands to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Products {
        filter: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        query: Option<String>,
        products: Vec<Product>,
    },
    Categories {
        categories: Vec<String>,
    },
    CartUpdated {
        summary: CartSummary,
        #[serde(skip_serializing_if = "Option::is_none")]
        notification: Option<String>,
    },
    Cart(CartView),
    OrderPlaced(OrderConfirmation),
    Help,
    Quit,
}

/// Runs one command against the session.
pub fn execute(state: &mut ShopState, command: Command) -> Result<Response, ApiError> {
    debug!(?command, "Executing command");

    match command {
        Command::Products => Ok(catalog::products(state)),
        Command::Filter(tag) => catalog::filter(state, &tag),
        Command::Search(term) => catalog::search(state, &term),
        Command::Categories => Ok(catalog::categories(state)),
        Command::Add(id) => cart::add_to_cart(state, id),
        Command::Increment(id) => cart::update_quantity(state, id, 1),
        Command::Decrement(id) => cart::update_quantity(state, id, -1),
        Command::Remove(id) => Ok(cart::remove_from_cart(state, id)),
        Command::Cart => Ok(cart::get_cart(state)),
        Command::Clear => Ok(cart::clear_cart(state)),
        Command::Checkout => cart::checkout(state),
        Command::Help => Ok(Response::Help),
        Command::Quit => Ok(Response::Quit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_commands() {
        assert_eq!("products".parse::<Command>().unwrap(), Command::Products);
        assert_eq!(
            "filter books".parse::<Command>().unwrap(),
            Command::Filter("books".to_string())
        );
        assert_eq!(
            "search  coffee maker ".parse::<Command>().unwrap(),
            Command::Search("coffee maker".to_string())
        );
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(String::new()));
        assert_eq!(
            "ADD 9".parse::<Command>().unwrap(),
            Command::Add(ProductId::new(9))
        );
        assert_eq!(
            "dec 3".parse::<Command>().unwrap(),
            Command::Decrement(ProductId::new(3))
        );
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        let err = "add".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);

        let err = "add nine".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = "filter".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);

        let err = "dance".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);
        assert!(err.message.contains("dance"));
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_value(Response::Help).unwrap();
        assert_eq!(json["type"], "help");

        let json = serde_json::to_value(Response::Categories {
            categories: vec!["books".to_string()],
        })
        .unwrap();
        assert_eq!(json["type"], "categories");
        assert_eq!(json["categories"][0], "books");
    }
}
