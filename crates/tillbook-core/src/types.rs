//! # Domain Types
//!
//! Core domain types used throughout Tillbook.
//!
//! ## Type Overview
//! ```text
//!   CartLine          one unit of a product in the active cart
//!   CartSummaryLine   grouped cart view: (product, price, qty, subtotal)
//!   TransactionRecord one committed sale line in the durable ledger
//!   Receipt           pure projection of a just-committed checkout
//! ```
//!
//! `TransactionRecord` maps field-for-field onto the ledger CSV columns
//! `Index, Customer, Product, Price, Amount, Total, Timestamp`; the serde
//! renames below are what produce that header row.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Cart Lines
// =============================================================================

/// One unit of a product in the cart.
///
/// Adding the same product twice yields two lines; grouping happens only in
/// [`crate::cart::Cart::summarize`]. The unit price is frozen at add time, so
/// later catalog edits do not change lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_name: String,
    pub unit_price: Money,
}

/// A grouped cart row as displayed and as committed at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummaryLine {
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub subtotal: Money,
}

// =============================================================================
// Transaction Record
// =============================================================================

/// One committed sale line in the ledger.
///
/// ## Invariants
/// - `line_total == unit_price * quantity` (exact, integer cents)
/// - `sequence_index` is unique across the ledger and contiguous from 1
///   after any delete
/// - immutable once appended (deletion is the only mutation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// 1-based sequence number, reassigned contiguously on delete.
    #[serde(rename = "Index")]
    pub sequence_index: u64,

    /// Customer the sale was rung up for; "Unknown" when none was given.
    #[serde(rename = "Customer")]
    pub customer_name: String,

    #[serde(rename = "Product")]
    pub product_name: String,

    /// Unit price at time of sale (frozen).
    #[serde(rename = "Price")]
    pub unit_price: Money,

    /// Units sold of this product in this sale.
    #[serde(rename = "Amount")]
    pub quantity: u32,

    /// `unit_price * quantity`.
    #[serde(rename = "Total")]
    pub line_total: Money,

    /// When the sale was committed. Written as `YYYY-MM-DD HH:MM:SS`;
    /// legacy rows in `DD/MM/YYYY HH:MM` are accepted on read.
    #[serde(rename = "Timestamp", with = "crate::timestamp::serde_fmt")]
    pub timestamp: NaiveDateTime,
}

impl TransactionRecord {
    /// The date portion of the timestamp (daily revenue buckets by this).
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// One line on a printed receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product_name: String,
    pub quantity: u32,
    pub line_total: Money,
}

/// A receipt for a just-committed checkout.
///
/// Derived from the records the checkout appended; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub customer_name: String,
    /// Lines in the order the products were committed.
    pub lines: Vec<ReceiptLine>,
    pub grand_total: Money,
    pub timestamp: NaiveDateTime,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn record_date_is_date_portion() {
        let record = TransactionRecord {
            sequence_index: 1,
            customer_name: "Sam".to_string(),
            product_name: "Apple".to_string(),
            unit_price: Money::from_cents(100),
            quantity: 2,
            line_total: Money::from_cents(200),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
        };
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }
}
