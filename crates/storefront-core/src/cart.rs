//! # Cart
//!
//! Cart lines and the arithmetic over them. The cart itself has no idea
//! who is watching it; [`crate::CartManager`] owns the only instance and
//! publishes the changes.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Operation                  Cart State Change                           │
//! │  ─────────                  ─────────────────                           │
//! │                                                                         │
//! │  add_product(p) ──────────► line exists?  qty += 1                      │
//! │                             otherwise     push(line{qty: 1})            │
//! │                                                                         │
//! │  adjust_quantity(id, d) ──► qty += d;  qty <= 0 → line removed          │
//! │                                                                         │
//! │  remove(id) ──────────────► lines.retain(id != ...)                     │
//! │                                                                         │
//! │  take() ──────────────────► lines swapped for an empty Vec              │
//! │                                                                         │
//! │  Invariants: one line per product id, every quantity >= 1,              │
//! │              lines kept in order of first addition.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's accumulated quantity within the cart.
///
/// ## Design Notes
/// `name` and `unit_price` are frozen when the product is first added;
/// later additions only bump the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: ProductId,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Price at time of adding (frozen)
    pub unit_price: Money,

    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line with quantity 1 from a product.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Status & Summaries
// =============================================================================

/// Whole-cart state for the Empty/NonEmpty state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CartStatus {
    Empty,
    NonEmpty,
}

/// Counts and total handed back from every cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Sum of quantities (the header badge).
    #[ts(type = "number")]
    pub item_count: u64,

    /// Number of distinct lines.
    pub line_count: u32,

    pub total: Money,
}

impl CartSummary {
    pub fn status(&self) -> CartStatus {
        if self.line_count == 0 {
            CartStatus::Empty
        } else {
            CartStatus::NonEmpty
        }
    }
}

/// Everything the cart modal needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub summary: CartSummary,
    /// When the cart was created or last emptied by checkout/clear.
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
}

/// Outcome of [`Cart::adjust_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line for the product, or a zero delta.
    Unchanged,
    /// The line now holds `quantity`.
    Updated { quantity: u32 },
    /// The quantity reached zero or below and the line was dropped.
    Removed,
}

// =============================================================================
// Cart
// =============================================================================

/// The ordered set of cart lines for the current session.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    opened_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            opened_at: Utc::now(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1 (name/price not refreshed)
    /// - Product not in cart: new line with quantity 1, appended at the end
    ///
    /// ## Errors
    /// `QuantityTooLarge` when the line is already at `max_quantity`; the
    /// cart is unchanged.
    pub fn add_product(&mut self, product: &Product, max_quantity: u32) -> CoreResult<u32> {
        if let Some(line) = self.line_mut(product.id) {
            let new_qty = line.quantity + 1;
            if new_qty > max_quantity {
                return Err(CoreError::QuantityTooLarge {
                    requested: i64::from(new_qty),
                    max: max_quantity,
                });
            }
            line.quantity = new_qty;
            return Ok(new_qty);
        }

        if max_quantity == 0 {
            return Err(CoreError::QuantityTooLarge {
                requested: 1,
                max: max_quantity,
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(1)
    }

    /// Adds a signed `delta` to the quantity of a line.
    ///
    /// ## Behavior
    /// - No line for `product_id`: no-op
    /// - `delta == 0`: no-op
    /// - Resulting quantity <= 0: the line is removed
    /// - Resulting quantity > `max_quantity`: `QuantityTooLarge`, unchanged
    pub fn adjust_quantity(
        &mut self,
        product_id: ProductId,
        delta: i64,
        max_quantity: u32,
    ) -> CoreResult<QuantityChange> {
        if delta == 0 {
            return Ok(QuantityChange::Unchanged);
        }

        let Some(line) = self.line_mut(product_id) else {
            return Ok(QuantityChange::Unchanged);
        };

        let new_qty = i64::from(line.quantity).saturating_add(delta);

        if new_qty <= 0 {
            self.remove(product_id);
            return Ok(QuantityChange::Removed);
        }

        if new_qty > i64::from(max_quantity) {
            return Err(CoreError::QuantityTooLarge {
                requested: new_qty,
                max: max_quantity,
            });
        }

        // Bounded by max_quantity above
        line.quantity = new_qty as u32;
        Ok(QuantityChange::Updated {
            quantity: line.quantity,
        })
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    /// Removes every line and returns them, restarting the cart.
    pub fn take(&mut self) -> Vec<CartLine> {
        self.opened_at = Utc::now();
        std::mem::take(&mut self.lines)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }

    /// Returns the total quantity of all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of unit price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn status(&self) -> CartStatus {
        if self.is_empty() {
            CartStatus::Empty
        } else {
            CartStatus::NonEmpty
        }
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.item_count(),
            line_count: self.lines.len() as u32,
            total: self.total(),
        }
    }

    pub fn view(&self) -> CartView {
        CartView {
            lines: self.lines.clone(),
            summary: self.summary(),
            opened_at: self.opened_at,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_ITEM_QUANTITY;

    fn test_product(id: u32, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), price_cents, "test", 40, "📦")
    }

    #[test]
    fn test_totals_never_overflow() {
        let mut cart = Cart::new();
        let yacht = test_product(1, i64::MAX / 2 + 1);

        cart.add_product(&yacht, MAX_ITEM_QUANTITY).unwrap();
        cart.add_product(&yacht, MAX_ITEM_QUANTITY).unwrap();
        cart.add_product(&test_product(2, i64::MAX), MAX_ITEM_QUANTITY)
            .unwrap();

        assert_eq!(cart.total().cents(), i64::MAX);
        assert_eq!(cart.summary().item_count, 3);
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product(1, 999);

        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 999);
        assert_eq!(cart.status(), CartStatus::NonEmpty);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product(1, 999);

        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();
        let qty = cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();

        assert_eq!(qty, 2);
        assert_eq!(cart.line_count(), 1); // Still one line
        assert_eq!(cart.line(product.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_keeps_snapshot() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 1000);
        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();

        product.name = "Renamed".to_string();
        product.price = Money::from_cents(1);
        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();

        let line = cart.line(product.id).unwrap();
        assert_eq!(line.name, "Product 1");
        assert_eq!(line.unit_price.cents(), 1000);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_lines_keep_first_addition_order() {
        let mut cart = Cart::new();
        for id in [3, 1, 2, 1, 3] {
            cart.add_product(&test_product(id, 100), MAX_ITEM_QUANTITY).unwrap();
        }

        let order: Vec<u32> = cart.lines().iter().map(|l| l.product_id.get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_total_in_cents() {
        let mut cart = Cart::new();
        let a = test_product(1, 1000);
        let b = test_product(2, 550);

        cart.add_product(&a, MAX_ITEM_QUANTITY).unwrap();
        cart.add_product(&a, MAX_ITEM_QUANTITY).unwrap();
        cart.add_product(&b, MAX_ITEM_QUANTITY).unwrap();

        assert_eq!(cart.total(), Money::from_cents(2550));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_adjust_quantity() {
        let mut cart = Cart::new();
        let product = test_product(1, 100);
        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();

        assert_eq!(
            cart.adjust_quantity(product.id, 4, MAX_ITEM_QUANTITY).unwrap(),
            QuantityChange::Updated { quantity: 5 }
        );
        assert_eq!(
            cart.adjust_quantity(product.id, -2, MAX_ITEM_QUANTITY).unwrap(),
            QuantityChange::Updated { quantity: 3 }
        );
        assert_eq!(
            cart.adjust_quantity(product.id, 0, MAX_ITEM_QUANTITY).unwrap(),
            QuantityChange::Unchanged
        );
    }

    #[test]
    fn test_adjust_to_zero_or_below_removes_line() {
        let mut cart = Cart::new();
        let product = test_product(1, 100);
        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();

        assert_eq!(
            cart.adjust_quantity(product.id, -1, MAX_ITEM_QUANTITY).unwrap(),
            QuantityChange::Removed
        );
        assert!(cart.is_empty());
        assert_eq!(cart.status(), CartStatus::Empty);

        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();
        assert_eq!(
            cart.adjust_quantity(product.id, -50, MAX_ITEM_QUANTITY).unwrap(),
            QuantityChange::Removed
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_missing_line_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.adjust_quantity(ProductId::new(7), 1, MAX_ITEM_QUANTITY).unwrap(),
            QuantityChange::Unchanged
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_ceiling() {
        let mut cart = Cart::new();
        let product = test_product(1, 100);
        cart.add_product(&product, 2).unwrap();
        cart.add_product(&product, 2).unwrap();

        let err = cart.add_product(&product, 2).unwrap_err();
        assert_eq!(err, CoreError::QuantityTooLarge { requested: 3, max: 2 });

        let err = cart.adjust_quantity(product.id, 5, 2).unwrap_err();
        assert_eq!(err, CoreError::QuantityTooLarge { requested: 7, max: 2 });

        // Rejections leave the line untouched
        assert_eq!(cart.line(product.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        let product = test_product(1, 100);
        cart.add_product(&product, MAX_ITEM_QUANTITY).unwrap();

        assert!(cart.remove(product.id));
        assert!(!cart.remove(product.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_take_empties_cart() {
        let mut cart = Cart::new();
        cart.add_product(&test_product(1, 100), MAX_ITEM_QUANTITY).unwrap();
        cart.add_product(&test_product(2, 200), MAX_ITEM_QUANTITY).unwrap();

        let lines = cart.take();

        assert_eq!(lines.len(), 2);
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_summary_and_view() {
        let mut cart = Cart::new();
        let empty = cart.summary();
        assert_eq!(empty.item_count, 0);
        assert_eq!(empty.status(), CartStatus::Empty);

        cart.add_product(&test_product(1, 250), MAX_ITEM_QUANTITY).unwrap();
        let view = cart.view();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.summary.status(), CartStatus::NonEmpty);
        assert_eq!(view.summary.total.cents(), 250);
        assert_eq!(view.opened_at, cart.opened_at());

        let json = serde_json::to_value(view.summary).unwrap();
        assert_eq!(json["itemCount"], 1);
        assert_eq!(json["lineCount"], 1);
    }
}
