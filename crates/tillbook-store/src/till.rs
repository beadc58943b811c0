//! # Till - Single-Session Facade
//!
//! Ties the catalog store, the active cart, and the transaction ledger
//! together into the surface the UI layer consumes. The UI owns no business
//! state: it invokes these operations and renders what they return.
//!
//! ## Checkout Flow
//! ```text
//!   add_to_cart("Apple")      catalog re-read, price frozen into a line
//!   add_to_cart("Apple")
//!   add_to_cart("Banana")
//!        │
//!   checkout("Sam")           grouped cart → ledger batch → receipt
//!        │                    cart cleared on success
//!        ▼
//!   Receipt { Apple x2 $2.00, Banana x1 $0.50, total $2.50 }
//! ```
//!
//! Exactly one till (one session) runs per process; nothing here is shared
//! across threads.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::info;

use tillbook_core::{
    report::{self, DailyRevenue, ProductSales},
    Cart, CartSummaryLine, CoreError, DateFilter, Money, Receipt, TransactionRecord,
    DEFAULT_CUSTOMER,
};

use crate::catalog::{Catalog, CatalogStore};
use crate::error::StoreResult;
use crate::ledger::Ledger;

/// The single active point-of-sale session.
#[derive(Debug)]
pub struct Till {
    catalog: CatalogStore,
    ledger: Ledger,
    cart: Cart,
}

impl Till {
    /// Creates a till over the given catalog and ledger files.
    pub fn new(catalog_path: impl Into<PathBuf>, ledger_path: impl Into<PathBuf>) -> Self {
        Till {
            catalog: CatalogStore::new(catalog_path),
            ledger: Ledger::new(ledger_path),
            cart: Cart::new(),
        }
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Current catalog (seeds the default one on first use).
    pub fn products(&self) -> StoreResult<Catalog> {
        self.catalog.load()
    }

    /// Upserts a product price from user input.
    pub fn set_price(&self, name: &str, price: &str) -> StoreResult<()> {
        self.catalog.set_price(name, price)
    }

    /// Removes a product from the catalog (no-op when absent).
    pub fn remove_product(&self, name: &str) -> StoreResult<()> {
        self.catalog.remove(name)
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one unit of a product to the cart at its current catalog price.
    ///
    /// The catalog file is re-read on every add, so price edits made while
    /// the till is open take effect immediately.
    ///
    /// ## Errors
    /// [`CoreError::UnknownProduct`] (wrapped) when the catalog has no such
    /// product; the cart is unchanged.
    pub fn add_to_cart(&mut self, product_name: &str) -> StoreResult<()> {
        let catalog = self.catalog.load()?;
        let price = catalog
            .get(product_name)
            .copied()
            .ok_or_else(|| CoreError::UnknownProduct(product_name.to_string()))?;
        self.cart.add_line(product_name, price);
        Ok(())
    }

    /// Removes one unit of the product at `display_index` in the grouped view.
    pub fn remove_from_cart(&mut self, display_index: usize) -> StoreResult<()> {
        self.cart.remove_at(display_index)?;
        Ok(())
    }

    /// The grouped cart rows, in first-added order.
    pub fn cart_summary(&self) -> Vec<CartSummaryLine> {
        self.cart.summarize()
    }

    /// Running total of the cart.
    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    /// Discards the cart without committing anything.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Commits the cart as of now. See [`checkout_at`](Self::checkout_at).
    pub fn checkout(&mut self, customer_name: &str) -> StoreResult<Receipt> {
        self.checkout_at(customer_name, Local::now().naive_local())
    }

    /// Commits the grouped cart to the ledger and returns the receipt.
    ///
    /// A blank customer name is recorded as "Unknown". On success the cart is
    /// cleared; on any failure the cart and the ledger file are untouched.
    ///
    /// ## Errors
    /// [`CoreError::EmptyCart`] (wrapped) when there is nothing to commit.
    pub fn checkout_at(
        &mut self,
        customer_name: &str,
        timestamp: NaiveDateTime,
    ) -> StoreResult<Receipt> {
        let customer = match customer_name.trim() {
            "" => DEFAULT_CUSTOMER,
            trimmed => trimmed,
        };

        let summary = self.cart.summarize();
        let records = self.ledger.append(&summary, customer, timestamp)?;
        let receipt = report::build_receipt(&records, customer, timestamp);
        self.cart.clear();

        info!(
            customer = customer,
            total = %receipt.grand_total,
            lines = receipt.lines.len(),
            "Checkout complete"
        );
        Ok(receipt)
    }

    // =========================================================================
    // History & Reports
    // =========================================================================

    /// Transaction history matching `filter`, most recently appended first.
    pub fn history(&self, filter: &DateFilter) -> StoreResult<Vec<TransactionRecord>> {
        let records = self.ledger.scan()?;
        Ok(report::history_view(&records, filter))
    }

    /// Revenue per date, in first-encountered order.
    pub fn daily_revenue(&self) -> StoreResult<Vec<DailyRevenue>> {
        let records = self.ledger.scan()?;
        Ok(report::daily_revenue(&records))
    }

    /// Top `n` products by units sold.
    pub fn top_products(&self, n: usize) -> StoreResult<Vec<ProductSales>> {
        let records = self.ledger.scan()?;
        Ok(report::top_products(&records, n))
    }

    /// Deletes a committed transaction by sequence index and re-sequences the
    /// ledger.
    pub fn delete_transaction(&self, sequence_index: u64) -> StoreResult<()> {
        self.ledger.delete(sequence_index)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
