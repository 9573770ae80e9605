//! # Shop State
//!
//! Everything one storefront session holds: the cart manager, the active
//! category filter, the cart badge and the toasts.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShopState (one per session, owned by the event loop)                   │
//! │                                                                         │
//! │  ┌──────────────────┐   CartChanged    ┌──────────────────┐            │
//! │  │   CartManager    │ ───────────────► │   badge (Cell)   │            │
//! │  │  (owns the cart) │   subscription   │   header count   │            │
//! │  └──────────────────┘                  └──────────────────┘            │
//! │                                                                         │
//! │  filter: CategoryFilter      notifier: Notifier (toasts)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The event loop processes one input line at a time, so plain `&mut`
//! access is enough; nothing here is shared across threads.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

use storefront_core::{CartManager, Catalog, CategoryFilter};

use super::config::StorefrontConfig;
use crate::notification::Notifier;

/// Session state driven by the command layer.
#[derive(Debug)]
pub struct ShopState {
    manager: CartManager,
    filter: CategoryFilter,
    badge: Rc<Cell<u64>>,
    notifier: Notifier,
}

impl ShopState {
    /// Creates a session over `catalog` with an empty cart.
    pub fn new(catalog: Arc<Catalog>, config: &StorefrontConfig) -> Self {
        let mut manager =
            CartManager::new(catalog).with_max_item_quantity(config.max_item_quantity);

        let badge = Rc::new(Cell::new(manager.cart_item_count()));
        let header = Rc::clone(&badge);
        manager.subscribe(move |change| {
            debug!(
                items = change.summary.item_count,
                total = %change.summary.total,
                reason = ?change.reason,
                "Cart changed"
            );
            header.set(change.summary.item_count);
        });

        ShopState {
            manager,
            filter: CategoryFilter::All,
            badge,
            notifier: Notifier::new(config.notification_ttl()),
        }
    }

    pub fn manager(&self) -> &CartManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut CartManager {
        &mut self.manager
    }

    pub fn catalog(&self) -> &Catalog {
        self.manager.catalog()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Item count as last published on the notification channel.
    pub fn badge(&self) -> u64 {
        self.badge.get()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }
}
