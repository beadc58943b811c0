//! # Reporting Engine
//!
//! Pure aggregation functions over slices of committed [`TransactionRecord`]s.
//! Callers feed these from a full ledger scan (or a filtered one); nothing
//! here reads storage or keeps state.
//!
//! Ordering quirks are deliberate and load-bearing:
//! - [`daily_revenue`] buckets appear in first-encountered order, not
//!   chronological order, matching a single accumulation pass over the scan.
//! - [`history_view`] reverses append order rather than sorting by timestamp,
//!   because out-of-order timestamps are possible in the file.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::timestamp::DateFilter;
use crate::types::{Receipt, ReceiptLine, TransactionRecord};

/// Default ranking depth for [`top_products`].
pub const TOP_PRODUCTS_DEFAULT: usize = 10;

// =============================================================================
// Aggregation Row Types
// =============================================================================

/// Revenue total for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub total: Money,
}

/// Units sold of one product across all records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_name: String,
    pub quantity: u64,
}

// =============================================================================
// Receipt
// =============================================================================

/// Builds a receipt from the records a checkout just committed.
///
/// Lines keep the order the records were appended in;
/// `grand_total = Σ line_total`.
pub fn build_receipt(
    records: &[TransactionRecord],
    customer_name: impl Into<String>,
    timestamp: NaiveDateTime,
) -> Receipt {
    let mut grand_total = Money::zero();
    let lines = records
        .iter()
        .map(|r| {
            grand_total += r.line_total;
            ReceiptLine {
                product_name: r.product_name.clone(),
                quantity: r.quantity,
                line_total: r.line_total,
            }
        })
        .collect();

    Receipt {
        customer_name: customer_name.into(),
        lines,
        grand_total,
        timestamp,
    }
}

// =============================================================================
// Aggregations
// =============================================================================

/// Sums `line_total` per calendar date.
///
/// Buckets are emitted in the order their date is first encountered in
/// `records` (one accumulation pass, no sort).
pub fn daily_revenue(records: &[TransactionRecord]) -> Vec<DailyRevenue> {
    let mut buckets: Vec<DailyRevenue> = Vec::new();
    for record in records {
        let date = record.date();
        match buckets.iter_mut().find(|b| b.date == date) {
            Some(bucket) => bucket.total += record.line_total,
            None => buckets.push(DailyRevenue {
                date,
                total: record.line_total,
            }),
        }
    }
    buckets
}

/// Ranks products by total units sold, descending, truncated to `n`.
///
/// Ties keep the order the products were first seen in `records` (the sort
/// is stable over the accumulation order).
pub fn top_products(records: &[TransactionRecord], n: usize) -> Vec<ProductSales> {
    let mut totals: Vec<ProductSales> = Vec::new();
    for record in records {
        match totals
            .iter_mut()
            .find(|t| t.product_name == record.product_name)
        {
            Some(entry) => entry.quantity += u64::from(record.quantity),
            None => totals.push(ProductSales {
                product_name: record.product_name.clone(),
                quantity: u64::from(record.quantity),
            }),
        }
    }
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(n);
    totals
}

// =============================================================================
// Filtering
// =============================================================================

/// Keeps records whose timestamp matches every set filter component,
/// preserving file order.
pub fn filter_by_date(
    records: &[TransactionRecord],
    filter: &DateFilter,
) -> Vec<TransactionRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r.timestamp))
        .cloned()
        .collect()
}

/// The transaction-history listing: filtered, then reversed so the most
/// recently appended match comes first.
pub fn history_view(
    records: &[TransactionRecord],
    filter: &DateFilter,
) -> Vec<TransactionRecord> {
    let mut matched = filter_by_date(records, filter);
    matched.reverse();
    matched
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(index: u64, product: &str, qty: u32, cents_each: i64, date: (i32, u32, u32)) -> TransactionRecord {
        let unit_price = Money::from_cents(cents_each);
        TransactionRecord {
            sequence_index: index,
            customer_name: "Unknown".to_string(),
            product_name: product.to_string(),
            unit_price,
            quantity: qty,
            line_total: unit_price * qty,
            timestamp: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn receipt_preserves_order_and_sums_totals() {
        let records = vec![
            record(1, "Apple", 2, 100, (2024, 1, 5)),
            record(2, "Banana", 1, 50, (2024, 1, 5)),
        ];
        let ts = records[0].timestamp;
        let receipt = build_receipt(&records, "Sam", ts);

        assert_eq!(receipt.customer_name, "Sam");
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.lines[0].product_name, "Apple");
        assert_eq!(receipt.lines[0].line_total, Money::from_cents(200));
        assert_eq!(receipt.lines[1].product_name, "Banana");
        assert_eq!(receipt.grand_total, Money::from_cents(250));
        assert_eq!(receipt.timestamp, ts);
    }

    #[test]
    fn daily_revenue_merges_same_date_once() {
        let records = vec![
            record(1, "Apple", 10, 100, (2024, 1, 5)),
            record(2, "Milk", 2, 250, (2024, 1, 5)),
        ];
        let revenue = daily_revenue(&records);
        assert_eq!(revenue.len(), 1);
        assert_eq!(revenue[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(revenue[0].total, Money::from_cents(1500));
    }

    #[test]
    fn daily_revenue_keeps_first_encountered_order() {
        // later date appears first in the file; it must stay first
        let records = vec![
            record(1, "Apple", 1, 100, (2024, 3, 1)),
            record(2, "Apple", 1, 100, (2024, 1, 1)),
            record(3, "Apple", 1, 100, (2024, 3, 1)),
        ];
        let revenue = daily_revenue(&records);
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(revenue[0].total, Money::from_cents(200));
        assert_eq!(revenue[1].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn top_products_ranks_descending_with_stable_ties() {
        let records = vec![
            record(1, "Apple", 3, 100, (2024, 1, 1)),
            record(2, "Banana", 5, 50, (2024, 1, 1)),
            record(3, "Orange", 3, 75, (2024, 1, 2)),
            record(4, "Apple", 2, 100, (2024, 1, 2)),
        ];
        let top = top_products(&records, 10);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].product_name, "Apple");
        assert_eq!(top[0].quantity, 5);
        assert_eq!(top[1].product_name, "Banana");
        assert_eq!(top[2].product_name, "Orange");
    }

    #[test]
    fn top_products_tie_keeps_first_seen_order() {
        let records = vec![
            record(1, "Banana", 2, 50, (2024, 1, 1)),
            record(2, "Apple", 2, 100, (2024, 1, 1)),
        ];
        let top = top_products(&records, 10);
        assert_eq!(top[0].product_name, "Banana");
        assert_eq!(top[1].product_name, "Apple");
    }

    #[test]
    fn top_products_truncates_to_n() {
        let records: Vec<_> = (0..15)
            .map(|i| record(i + 1, &format!("P{}", i), 1, 100, (2024, 1, 1)))
            .collect();
        let top = top_products(&records, TOP_PRODUCTS_DEFAULT);
        assert_eq!(top.len(), 10);

        let quantities: Vec<u64> = top.iter().map(|t| t.quantity).collect();
        let mut sorted = quantities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(quantities, sorted, "quantities must be non-increasing");
    }

    #[test]
    fn filter_by_date_matches_components() {
        let records = vec![
            record(1, "Apple", 1, 100, (2023, 12, 20)),
            record(2, "Apple", 1, 100, (2024, 1, 15)),
        ];
        let filter = DateFilter::all().year(2024).month(1);
        let matched = filter_by_date(&records, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].sequence_index, 2);
    }

    #[test]
    fn history_view_reverses_append_order_not_timestamps() {
        // timestamps are out of order on purpose
        let records = vec![
            record(1, "Apple", 1, 100, (2024, 5, 1)),
            record(2, "Banana", 1, 50, (2024, 1, 1)),
            record(3, "Milk", 1, 250, (2024, 3, 1)),
        ];
        let view = history_view(&records, &DateFilter::all());
        let indices: Vec<u64> = view.iter().map(|r| r.sequence_index).collect();
        assert_eq!(indices, vec![3, 2, 1]);
    }
}
