//! # Transaction Ledger
//!
//! The durable, append-oriented, indexed log of committed sale lines.
//!
//! ## File Format
//! Headered CSV, one committed sale line per row, oldest first:
//! ```text
//! Index,Customer,Product,Price,Amount,Total,Timestamp
//! 1,Sam,Apple,1.00,2,2.00,2024-01-05 14:30:00
//! 2,Sam,Banana,0.50,1,0.50,2024-01-05 14:30:00
//! ```
//!
//! ## Sequencing
//! `Index` is assigned at append time as `max(existing) + 1` and stays unique
//! and non-decreasing in file order. Deleting a record re-sequences the
//! remainder contiguously from 1, preserving their order, and rewrites the
//! file in full (atomically).
//!
//! ## Robustness
//! Scans never fail on a bad row: anything that does not parse as a record -
//! wrong column count, non-numeric price or amount, a timestamp in neither
//! accepted format - is skipped with a warning and the scan continues.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use tillbook_core::{
    report, CartSummaryLine, CoreError, DateFilter, TransactionRecord,
};

use crate::atomic::rewrite_csv;
use crate::error::{StoreError, StoreResult};

/// Column header of the ledger file.
const HEADER: [&str; 7] = [
    "Index",
    "Customer",
    "Product",
    "Price",
    "Amount",
    "Total",
    "Timestamp",
];

// =============================================================================
// Ledger
// =============================================================================

/// Durable transaction ledger backed by a CSV file.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Creates a ledger over the given file path. The file itself is created
    /// (header only) on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Ledger { path: path.into() }
    }

    /// The file this ledger reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with its header row if it does not exist yet.
    fn ensure_file(&self) -> StoreResult<()> {
        let missing = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        if missing {
            debug!(path = %self.path.display(), "Creating empty ledger file");
            rewrite_csv(&self.path, &HEADER, |_| Ok(()))?;
        }
        Ok(())
    }

    /// Commits a grouped cart as a batch of new records.
    ///
    /// One record per summary line, each with a freshly assigned sequence
    /// index, all stamped with the given customer and timestamp. Returns the
    /// created records in the order they were written.
    ///
    /// ## Errors
    /// [`CoreError::EmptyCart`] (wrapped) when `summary` is empty; callers
    /// must not commit an empty cart.
    pub fn append(
        &self,
        summary: &[CartSummaryLine],
        customer_name: &str,
        timestamp: NaiveDateTime,
    ) -> StoreResult<Vec<TransactionRecord>> {
        if summary.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        self.ensure_file()?;
        let next_index = self
            .scan()?
            .iter()
            .map(|r| r.sequence_index)
            .max()
            .unwrap_or(0)
            + 1;

        let records: Vec<TransactionRecord> = summary
            .iter()
            .enumerate()
            .map(|(offset, line)| TransactionRecord {
                sequence_index: next_index + offset as u64,
                customer_name: customer_name.to_string(),
                product_name: line.product_name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.subtotal,
                timestamp,
            })
            .collect();

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for record in &records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!(
            customer = customer_name,
            lines = records.len(),
            first_index = next_index,
            "Transaction batch committed"
        );
        Ok(records)
    }

    /// Reads every record in file order (oldest first).
    ///
    /// Creates the file (header only) when missing. Malformed rows are
    /// skipped with a warning; the scan never aborts on one bad row.
    pub fn scan(&self) -> StoreResult<Vec<TransactionRecord>> {
        self.ensure_file()?;

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<TransactionRecord>() {
            match row {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "Skipping malformed ledger row");
                }
            }
        }

        debug!(records = records.len(), "Ledger scanned");
        Ok(records)
    }

    /// Records whose timestamp matches every set component of `filter`.
    ///
    /// Rows whose timestamp parsed under neither accepted format were
    /// already dropped by [`scan`](Self::scan).
    pub fn filter(&self, filter: &DateFilter) -> StoreResult<Vec<TransactionRecord>> {
        let records = self.scan()?;
        Ok(report::filter_by_date(&records, filter))
    }

    /// Removes the record with the given sequence index, re-sequences the
    /// remainder contiguously from 1 (preserving order), and rewrites the
    /// file in full.
    ///
    /// ## Errors
    /// [`StoreError::NotFound`] when no record carries that index; the file
    /// is untouched in that case.
    pub fn delete(&self, sequence_index: u64) -> StoreResult<()> {
        let mut records = self.scan()?;
        let position = records
            .iter()
            .position(|r| r.sequence_index == sequence_index)
            .ok_or_else(|| StoreError::not_found(sequence_index))?;
        records.remove(position);

        for (offset, record) in records.iter_mut().enumerate() {
            record.sequence_index = offset as u64 + 1;
        }

        rewrite_csv(&self.path, &HEADER, |writer| {
            for record in &records {
                writer.serialize(record)?;
            }
            Ok(())
        })?;

        info!(
            deleted = sequence_index,
            remaining = records.len(),
            "Transaction deleted, ledger re-sequenced"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use chrono::NaiveDate;
    use tillbook_core::Money;

    fn ts(y: i32, mo: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn line(product: &str, cents_each: i64, qty: u32) -> CartSummaryLine {
        let unit_price = Money::from_cents(cents_each);
        CartSummaryLine {
            product_name: product.to_string(),
            unit_price,
            quantity: qty,
            subtotal: unit_price * qty,
        }
    }

    fn ledger_in(dir: &tempfile::TempDir) -> Ledger {
        Ledger::new(dir.path().join("transactions.csv"))
    }

    #[test]
    fn scan_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        assert!(ledger.scan().unwrap().is_empty());
        let content = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(
            content.trim_end(),
            "Index,Customer,Product,Price,Amount,Total,Timestamp"
        );
    }

    #[test]
    fn append_empty_summary_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        let err = ledger.append(&[], "Sam", ts(2024, 1, 5)).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::EmptyCart)));
    }

    #[test]
    fn append_assigns_contiguous_indices_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        let records = ledger
            .append(
                &[line("Apple", 100, 2), line("Banana", 50, 1)],
                "Sam",
                ts(2024, 1, 5),
            )
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence_index, 1);
        assert_eq!(records[1].sequence_index, 2);
        assert_eq!(records[0].line_total, Money::from_cents(200));
        assert_eq!(records[1].line_total, Money::from_cents(50));

        let scanned = ledger.scan().unwrap();
        assert_eq!(scanned, records);
    }

    #[test]
    fn append_continues_from_max_index() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        ledger
            .append(&[line("Apple", 100, 1)], "Sam", ts(2024, 1, 5))
            .unwrap();
        let second = ledger
            .append(&[line("Milk", 250, 1)], "Kim", ts(2024, 1, 6))
            .unwrap();

        assert_eq!(second[0].sequence_index, 2);

        let indices: Vec<u64> = ledger
            .scan()
            .unwrap()
            .iter()
            .map(|r| r.sequence_index)
            .collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn scan_reads_rows_written_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        ledger
            .append(&[line("Apple", 100, 2)], "Sam", ts(2024, 1, 5))
            .unwrap();

        let content = fs::read_to_string(ledger.path()).unwrap();
        assert!(content.contains("1,Sam,Apple,1.00,2,2.00,2024-01-05 14:30:00"));
    }

    #[test]
    fn scan_skips_malformed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        fs::write(
            &path,
            "Index,Customer,Product,Price,Amount,Total,Timestamp\n\
             1,Sam,Apple,1.00,2,2.00,2024-01-05 14:30:00\n\
             2,Sam,Bread,not-a-price,1,1.80,2024-01-05 14:31:00\n\
             3,Sam,Milk,2.50,one,2.50,2024-01-05 14:32:00\n\
             4,Sam,Orange,0.75,1,0.75,sometime in January\n\
             5,Sam,Banana,0.50,1,0.50,2024-01-05 14:33:00\n",
        )
        .unwrap();

        let ledger = Ledger::new(&path);
        let records = ledger.scan().unwrap();
        let indices: Vec<u64> = records.iter().map(|r| r.sequence_index).collect();
        assert_eq!(indices, vec![1, 5]);
    }

    #[test]
    fn scan_accepts_legacy_timestamp_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        fs::write(
            &path,
            "Index,Customer,Product,Price,Amount,Total,Timestamp\n\
             1,Unknown,Apple,1.00,1,1.00,2/4/2025 10:33\n",
        )
        .unwrap();

        let ledger = Ledger::new(&path);
        let records = ledger.scan().unwrap();
        assert_eq!(records.len(), 1);
        let expected = NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(10, 33, 0)
            .unwrap();
        assert_eq!(records[0].timestamp, expected);
    }

    #[test]
    fn filter_by_year_and_month() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        ledger
            .append(&[line("Apple", 100, 1)], "Sam", ts(2023, 12, 20))
            .unwrap();
        ledger
            .append(&[line("Banana", 50, 1)], "Sam", ts(2024, 1, 15))
            .unwrap();

        let matched = ledger
            .filter(&DateFilter::all().year(2024).month(1))
            .unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].product_name, "Banana");
    }

    #[test]
    fn delete_resequences_remaining_records() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        ledger
            .append(
                &[line("Apple", 100, 1), line("Banana", 50, 1), line("Milk", 250, 1)],
                "Sam",
                ts(2024, 1, 5),
            )
            .unwrap();

        ledger.delete(2).unwrap();

        let records = ledger.scan().unwrap();
        let rows: Vec<(u64, &str)> = records
            .iter()
            .map(|r| (r.sequence_index, r.product_name.as_str()))
            .collect();
        assert_eq!(rows, vec![(1, "Apple"), (2, "Milk")]);
    }

    #[test]
    fn delete_unknown_index_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        ledger
            .append(&[line("Apple", 100, 1)], "Sam", ts(2024, 1, 5))
            .unwrap();
        let before = fs::read(ledger.path()).unwrap();

        let err = ledger.delete(99).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { index: 99 }));
        assert_eq!(fs::read(ledger.path()).unwrap(), before);
    }

    #[test]
    fn delete_rewrite_standardizes_legacy_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        fs::write(
            &path,
            "Index,Customer,Product,Price,Amount,Total,Timestamp\n\
             1,Unknown,Apple,1.00,1,1.00,2/4/2025 10:33\n\
             2,Unknown,Milk,2.50,1,2.50,2025-04-03 09:00:00\n",
        )
        .unwrap();

        let ledger = Ledger::new(&path);
        ledger.delete(2).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("2025-04-02 10:33:00"));
        assert!(!content.contains("2/4/2025"));
    }
}
