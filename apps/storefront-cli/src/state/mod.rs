//! # Application State
//!
//! - [`ShopState`]: the session (cart manager, filter, badge, toasts)
//! - [`StorefrontConfig`]: read-only configuration loaded at startup

mod config;
mod shop;

pub use config::{ConfigError, OutputFormat, StorefrontConfig};
pub use shop::ShopState;
