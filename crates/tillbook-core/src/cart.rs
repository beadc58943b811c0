//! # Cart
//!
//! The transient working set of to-be-purchased lines for the current sale.
//!
//! The cart stores one [`CartLine`] per unit added, but is displayed grouped:
//! one row per distinct product with an aggregate quantity, in the order the
//! products were first added. Removal addresses the grouped rows and takes
//! off exactly one unit at a time.
//!
//! The cart is owned by the single active session; it never touches storage.
//! Catalog lookups happen in the caller (see `tillbook-store`'s `Till`), so
//! by the time a line lands here its price is already resolved and frozen.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, CartSummaryLine};

/// The shopping cart for the active sale.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Appends one unit of a product at the given price.
    pub fn add_line(&mut self, product_name: impl Into<String>, unit_price: Money) {
        self.lines.push(CartLine {
            product_name: product_name.into(),
            unit_price,
        });
    }

    /// Removes one unit of the product shown at `display_index` in the
    /// grouped view.
    ///
    /// If that was the last unit of the product, the row disappears from the
    /// display. The most recently added unit of the product is the one
    /// removed; units of one product always share the display row even when
    /// their frozen prices differ.
    ///
    /// ## Errors
    /// [`CoreError::IndexOutOfRange`] when `display_index` does not address a
    /// grouped row.
    pub fn remove_at(&mut self, display_index: usize) -> CoreResult<()> {
        let summary = self.summarize();
        let row = summary
            .get(display_index)
            .ok_or(CoreError::IndexOutOfRange {
                index: display_index,
                len: summary.len(),
            })?;

        // Grouped rows always come from at least one line, so this finds one.
        if let Some(pos) = self
            .lines
            .iter()
            .rposition(|l| l.product_name == row.product_name)
        {
            self.lines.remove(pos);
        }
        Ok(())
    }

    /// Groups lines by product in first-seen order.
    ///
    /// Each row carries the product's unit price, the aggregate quantity, and
    /// `subtotal = unit_price * quantity`.
    pub fn summarize(&self) -> Vec<CartSummaryLine> {
        let mut rows: Vec<CartSummaryLine> = Vec::new();
        for line in &self.lines {
            match rows.iter_mut().find(|r| r.product_name == line.product_name) {
                Some(row) => {
                    row.quantity += 1;
                    // the row keeps the price the product was first added at
                    row.subtotal = row.unit_price * row.quantity;
                }
                None => rows.push(CartSummaryLine {
                    product_name: line.product_name.clone(),
                    unit_price: line.unit_price,
                    quantity: 1,
                    subtotal: line.unit_price,
                }),
            }
        }
        rows
    }

    /// Sum of all line prices, independent of grouping.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.unit_price)
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units in the cart (not grouped rows).
    pub fn unit_count(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn summarize_groups_in_first_seen_order() {
        let mut cart = Cart::new();
        cart.add_line("Apple", cents(100));
        cart.add_line("Banana", cents(50));
        cart.add_line("Apple", cents(100));

        let rows = cart.summarize();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name, "Apple");
        assert_eq!(rows[0].quantity, 2);
        assert_eq!(rows[0].subtotal, cents(200));
        assert_eq!(rows[1].product_name, "Banana");
        assert_eq!(rows[1].quantity, 1);
        assert_eq!(rows[1].subtotal, cents(50));
    }

    #[test]
    fn total_is_sum_of_all_units() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Money::zero());

        cart.add_line("Apple", cents(100));
        cart.add_line("Milk", cents(250));
        cart.add_line("Apple", cents(100));
        assert_eq!(cart.total(), cents(450));
    }

    #[test]
    fn remove_at_takes_one_unit_off_a_group() {
        let mut cart = Cart::new();
        cart.add_line("Apple", cents(100));
        cart.add_line("Apple", cents(100));
        cart.add_line("Banana", cents(50));

        cart.remove_at(0).unwrap();
        let rows = cart.summarize();
        assert_eq!(rows[0].product_name, "Apple");
        assert_eq!(rows[0].quantity, 1);
        assert_eq!(cart.unit_count(), 2);
    }

    #[test]
    fn remove_at_drops_group_when_last_unit_goes() {
        let mut cart = Cart::new();
        cart.add_line("Apple", cents(100));
        cart.add_line("Banana", cents(50));

        cart.remove_at(1).unwrap();
        let rows = cart.summarize();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Apple");
    }

    #[test]
    fn remove_at_out_of_range() {
        let mut cart = Cart::new();
        cart.add_line("Apple", cents(100));

        let err = cart.remove_at(5).unwrap_err();
        assert_eq!(err, CoreError::IndexOutOfRange { index: 5, len: 1 });
        // cart unchanged
        assert_eq!(cart.unit_count(), 1);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_line("Apple", cents(100));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }
}
