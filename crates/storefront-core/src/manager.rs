//! # Cart Manager
//!
//! The single owner of the shopping cart. The rendering surface holds a
//! `CartManager`, calls its operations, and listens to its change
//! notifications instead of reading cart internals.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │           add_to_cart                                                   │
//! │  ┌──────────┐ ───────────────────────► ┌──────────┐                    │
//! │  │  Empty   │                          │ NonEmpty │ ◄─┐ add / update /  │
//! │  │          │ ◄─────────────────────── │          │ ──┘ remove          │
//! │  └──────────┘  remove / update(last    └──────────┘                    │
//! │       ▲        line to 0) / clear /          │                          │
//! │       │        checkout                      │                          │
//! │       └──────────────────────────────────────┘                          │
//! │                                                                         │
//! │  checkout in Empty → EmptyCart error, still Empty                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transactions
//! Every operation takes `&mut self` and runs to completion before it
//! returns, so no caller can observe a half-applied change. Listeners run
//! after the mutation finished and see the final summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine, CartStatus, CartSummary, CartView, QuantityChange};
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ProductId;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Notifications
// =============================================================================

/// Why the cart changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "productId", rename_all = "snake_case")]
#[ts(export)]
pub enum ChangeReason {
    Added(ProductId),
    QuantityChanged(ProductId),
    Removed(ProductId),
    Cleared,
    CheckedOut,
}

/// Payload delivered to every listener after an effective change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartChanged {
    pub summary: CartSummary,
    pub reason: ChangeReason,
}

/// Handle returned by [`CartManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartChanged)>;

// =============================================================================
// Order Confirmation
// =============================================================================

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    #[ts(as = "String")]
    pub order_id: Uuid,

    /// The lines that were in the cart when it was checked out.
    pub lines: Vec<CartLine>,

    #[ts(type = "number")]
    pub item_count: u64,

    pub total: Money,

    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Cart Manager
// =============================================================================

/// Owns the cart, consults the catalog, and notifies listeners.
///
/// ## Usage
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::sync::Arc;
/// use storefront_core::{CartManager, Catalog, ProductId};
///
/// let mut manager = CartManager::new(Arc::new(Catalog::builtin()));
///
/// let badge = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&badge);
/// manager.subscribe(move |change| seen.set(change.summary.item_count));
///
/// manager.add_to_cart(ProductId::new(1)).unwrap();
/// manager.add_to_cart(ProductId::new(1)).unwrap();
/// assert_eq!(badge.get(), 2);
/// ```
pub struct CartManager {
    catalog: Arc<Catalog>,
    cart: Cart,
    max_item_quantity: u32,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartManager {
    /// Creates a manager with an empty cart.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        CartManager {
            catalog,
            cart: Cart::new(),
            max_item_quantity: MAX_ITEM_QUANTITY,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Overrides the per-line quantity ceiling (default 999).
    pub fn with_max_item_quantity(mut self, max: u32) -> Self {
        self.max_item_quantity = max;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn max_item_quantity(&self) -> u32 {
        self.max_item_quantity
    }

    // =========================================================================
    // Notification Channel
    // =========================================================================

    /// Registers a listener fired after every effective cart change.
    ///
    /// Listeners run synchronously, in subscription order. No-op operations
    /// (removing an absent line, a zero delta) do not fire.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartChanged) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!(subscription = id.0, "Cart listener subscribed");
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let initial_len = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != initial_len
    }

    fn notify(&mut self, reason: ChangeReason) -> CartSummary {
        let change = CartChanged {
            summary: self.cart.summary(),
            reason,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
        change.summary
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a catalog product to the cart.
    ///
    /// ## Behavior
    /// - Unknown id: `ProductNotFound`, cart unchanged
    /// - Already in cart: quantity + 1 (the frozen name/price are kept)
    /// - Not in cart: new line with quantity 1 at the end of the cart
    pub fn add_to_cart(&mut self, product_id: ProductId) -> CoreResult<CartSummary> {
        let Some(product) = self.catalog.find_by_id(product_id) else {
            warn!(product_id = %product_id, "add_to_cart: product not in catalog");
            return Err(CoreError::ProductNotFound(product_id));
        };

        let quantity = self.cart.add_product(product, self.max_item_quantity)?;
        debug!(product_id = %product_id, quantity, "Added to cart");

        Ok(self.notify(ChangeReason::Added(product_id)))
    }

    /// Adds `delta` to a line's quantity; a result of zero or below removes
    /// the line. Absent lines and a zero delta are no-ops.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> CoreResult<CartSummary> {
        let change = self
            .cart
            .adjust_quantity(product_id, delta, self.max_item_quantity)?;
        debug!(product_id = %product_id, delta, ?change, "update_quantity");

        Ok(match change {
            QuantityChange::Unchanged => self.cart.summary(),
            QuantityChange::Updated { .. } => self.notify(ChangeReason::QuantityChanged(product_id)),
            QuantityChange::Removed => self.notify(ChangeReason::Removed(product_id)),
        })
    }

    /// Removes a line. Removing an absent line is a silent no-op.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> CartSummary {
        if self.cart.remove(product_id) {
            debug!(product_id = %product_id, "Removed from cart");
            self.notify(ChangeReason::Removed(product_id))
        } else {
            self.cart.summary()
        }
    }

    /// Empties the cart without placing an order.
    pub fn clear(&mut self) -> CartSummary {
        if self.cart.is_empty() {
            return self.cart.summary();
        }

        let dropped = self.cart.take();
        debug!(lines = dropped.len(), "Cart cleared");
        self.notify(ChangeReason::Cleared)
    }

    /// Finalizes the cart: reports the total and empties the cart.
    ///
    /// ## Behavior
    /// - Empty cart: `EmptyCart`, nothing else happens
    /// - Otherwise: the lines are taken out of the cart in one step, the
    ///   confirmation is built from them, then listeners see the empty cart
    pub fn checkout(&mut self) -> CoreResult<OrderConfirmation> {
        if self.cart.is_empty() {
            warn!("checkout attempted on an empty cart");
            return Err(CoreError::EmptyCart);
        }

        let total = self.cart.total();
        let item_count = self.cart.item_count();
        let lines = self.cart.take();

        let order = OrderConfirmation {
            order_id: Uuid::new_v4(),
            lines,
            item_count,
            total,
            placed_at: Utc::now(),
        };

        info!(
            order_id = %order.order_id,
            items = order.item_count,
            total = %order.total,
            "Order placed"
        );

        self.notify(ChangeReason::CheckedOut);
        Ok(order)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of quantities across all lines.
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Sum of unit price × quantity across all lines.
    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.cart.line(product_id)
    }

    pub fn status(&self) -> CartStatus {
        self.cart.status()
    }

    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    pub fn view(&self) -> CartView {
        self.cart.view()
    }
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("catalog_len", &self.catalog.len())
            .field("cart", &self.cart)
            .field("max_item_quantity", &self.max_item_quantity)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> CartManager {
        CartManager::new(Arc::new(Catalog::builtin()))
    }

    /// Catalog with A = 10.00 and B = 5.50.
    fn small_manager() -> CartManager {
        let catalog = Catalog::new(vec![
            Product::new(1, "Product A", 1000, "test", 40, "🅰"),
            Product::new(2, "Product B", 550, "test", 40, "🅱"),
        ])
        .unwrap();
        CartManager::new(Arc::new(catalog))
    }

    fn record(manager: &mut CartManager) -> Rc<RefCell<Vec<CartChanged>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        manager.subscribe(move |change| sink.borrow_mut().push(*change));
        events
    }

    const A: ProductId = ProductId::new(1);
    const B: ProductId = ProductId::new(2);

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut manager = manager();
        manager.add_to_cart(A).unwrap();
        let summary = manager.add_to_cart(A).unwrap();

        assert_eq!(manager.lines().len(), 1);
        assert_eq!(manager.line(A).unwrap().quantity, 2);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.line_count, 1);
    }

    #[test]
    fn test_item_count() {
        let mut manager = manager();
        manager.add_to_cart(A).unwrap();
        manager.add_to_cart(B).unwrap();
        manager.add_to_cart(B).unwrap();

        assert_eq!(manager.cart_item_count(), 3);
    }

    #[test]
    fn test_cart_total() {
        let mut manager = small_manager();
        manager.add_to_cart(A).unwrap();
        manager.add_to_cart(A).unwrap();
        manager.add_to_cart(B).unwrap();

        assert_eq!(manager.cart_total(), Money::from_cents(2550));
        assert_eq!(manager.cart_total().to_decimal_string(), "25.50");
    }

    #[test]
    fn test_unknown_product_rejected() {
        let mut manager = manager();
        let events = record(&mut manager);

        let err = manager.add_to_cart(ProductId::new(99)).unwrap_err();

        assert_eq!(err, CoreError::ProductNotFound(ProductId::new(99)));
        assert_eq!(manager.status(), CartStatus::Empty);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_decrement_last_unit_removes_line_and_empties_cart() {
        let mut manager = manager();
        manager.add_to_cart(A).unwrap();
        assert_eq!(manager.status(), CartStatus::NonEmpty);

        let summary = manager.update_quantity(A, -1).unwrap();

        assert!(manager.line(A).is_none());
        assert_eq!(manager.status(), CartStatus::Empty);
        assert_eq!(summary.status(), CartStatus::Empty);
    }

    #[test]
    fn test_update_quantity_noops() {
        let mut manager = manager();
        let events = record(&mut manager);

        manager.update_quantity(A, 1).unwrap();
        assert!(manager.lines().is_empty());

        manager.add_to_cart(A).unwrap();
        manager.update_quantity(A, 0).unwrap();

        assert_eq!(manager.line(A).unwrap().quantity, 1);
        assert_eq!(events.borrow().len(), 1); // only the add
    }

    #[test]
    fn test_update_quantity_respects_ceiling() {
        let mut manager = manager().with_max_item_quantity(3);
        manager.add_to_cart(A).unwrap();

        let err = manager.update_quantity(A, 5).unwrap_err();
        assert_eq!(err, CoreError::QuantityTooLarge { requested: 6, max: 3 });
        assert_eq!(manager.line(A).unwrap().quantity, 1);

        manager.update_quantity(A, 2).unwrap();
        assert!(manager.add_to_cart(A).is_err());
        assert_eq!(manager.cart_item_count(), 3);
    }

    #[test]
    fn test_remove_twice_is_safe() {
        let mut manager = manager();
        let events = record(&mut manager);
        manager.add_to_cart(A).unwrap();

        manager.remove_from_cart(A);
        let summary = manager.remove_from_cart(A);

        assert_eq!(summary.item_count, 0);
        assert_eq!(manager.status(), CartStatus::Empty);
        assert_eq!(events.borrow().len(), 2); // add + one removal
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut manager = manager();
        let events = record(&mut manager);

        assert_eq!(manager.checkout().unwrap_err(), CoreError::EmptyCart);
        assert_eq!(manager.status(), CartStatus::Empty);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_checkout_reports_total_and_empties_cart() {
        let mut manager = small_manager();
        manager.add_to_cart(A).unwrap();
        manager.add_to_cart(A).unwrap();
        manager.add_to_cart(B).unwrap();

        let order = manager.checkout().unwrap();

        assert_eq!(order.total, Money::from_cents(2550));
        assert_eq!(order.item_count, 3);
        assert_eq!(order.lines.len(), 2);
        assert!(manager.lines().is_empty());
        assert!(manager.cart_total().is_zero());
        assert_eq!(manager.status(), CartStatus::Empty);
    }

    #[test]
    fn test_best_seller_novel_checkout_scenario() {
        let mut manager = manager();
        let novel = ProductId::new(9);

        manager.add_to_cart(novel).unwrap();
        manager.add_to_cart(novel).unwrap();
        let order = manager.checkout().unwrap();

        assert_eq!(order.total.to_decimal_string(), "29.98");
        assert_eq!(order.lines[0].name, "Best Seller Novel");
        assert_eq!(manager.cart_item_count(), 0);
        assert!(manager.lines().is_empty());
    }

    #[test]
    fn test_listeners_see_final_state() {
        let mut manager = small_manager();
        let events = record(&mut manager);

        manager.add_to_cart(A).unwrap();
        manager.add_to_cart(B).unwrap();
        manager.update_quantity(B, 1).unwrap();
        manager.checkout().unwrap();

        let events = events.borrow();
        let reasons: Vec<ChangeReason> = events.iter().map(|e| e.reason).collect();
        assert_eq!(
            reasons,
            vec![
                ChangeReason::Added(A),
                ChangeReason::Added(B),
                ChangeReason::QuantityChanged(B),
                ChangeReason::CheckedOut,
            ]
        );
        assert_eq!(events[2].summary.total, Money::from_cents(2100));
        // The checkout notification carries the already-empty cart
        assert_eq!(events[3].summary.item_count, 0);
        assert!(events[3].summary.total.is_zero());
    }

    #[test]
    fn test_decrement_past_zero_notifies_removed() {
        let mut manager = small_manager();
        let events = record(&mut manager);

        for _ in 0..3 {
            manager.add_to_cart(A).unwrap();
        }
        manager.add_to_cart(B).unwrap();
        manager.update_quantity(A, -50).unwrap();

        assert_eq!(events.borrow().last().unwrap().reason, ChangeReason::Removed(A));
        assert!(manager.line(A).is_none());
        assert_eq!(manager.cart_item_count(), 1);

        manager.update_quantity(B, -1).unwrap();

        let events = events.borrow();
        let last = events.last().unwrap();
        assert_eq!(last.reason, ChangeReason::Removed(B));
        assert_eq!(last.summary.item_count, 0);
        assert_eq!(manager.status(), CartStatus::Empty);
        assert!(!events.iter().any(|e| e.reason == ChangeReason::QuantityChanged(A)));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut manager = manager();
        let events = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&events);
        let id = manager.subscribe(move |_| *sink.borrow_mut() += 1);

        manager.add_to_cart(A).unwrap();
        assert!(manager.unsubscribe(id));
        assert!(!manager.unsubscribe(id));
        manager.add_to_cart(A).unwrap();

        assert_eq!(*events.borrow(), 1);
    }

    #[test]
    fn test_clear() {
        let mut manager = manager();
        let events = record(&mut manager);

        manager.clear();
        assert!(events.borrow().is_empty());

        manager.add_to_cart(A).unwrap();
        manager.add_to_cart(B).unwrap();
        let summary = manager.clear();

        assert_eq!(summary.item_count, 0);
        assert_eq!(events.borrow().last().unwrap().reason, ChangeReason::Cleared);
    }

    #[test]
    fn test_change_serialization() {
        let change = CartChanged {
            summary: CartSummary {
                item_count: 2,
                line_count: 1,
                total: Money::from_cents(2998),
            },
            reason: ChangeReason::Added(ProductId::new(9)),
        };
        let json = serde_json::to_value(change).unwrap();

        assert_eq!(json["reason"]["kind"], "added");
        assert_eq!(json["reason"]["productId"], 9);
        assert_eq!(json["summary"]["total"], 2998);
    }
}
