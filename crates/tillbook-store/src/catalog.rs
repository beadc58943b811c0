//! # Catalog Store
//!
//! The durable mapping of product name to unit price.
//!
//! ## File Format
//! Headered CSV, one product per row:
//! ```text
//! Name,Price
//! Apple,1.00
//! Banana,0.50
//! ```
//!
//! The catalog is small, so every mutation rewrites the whole file; the
//! rewrite is atomic (temp file + rename). There is no in-memory cache:
//! every operation re-reads the file, so edits made by other tooling are
//! visible immediately.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tillbook_core::Money;

use crate::atomic::rewrite_csv;
use crate::error::StoreResult;

/// Column header of the catalog file.
const HEADER: [&str; 2] = ["Name", "Price"];

/// Catalog the store is seeded with when no file exists yet.
const DEFAULT_CATALOG: [(&str, i64); 5] = [
    ("Apple", 100),
    ("Banana", 50),
    ("Orange", 75),
    ("Milk", 250),
    ("Bread", 180),
];

/// The in-memory catalog view: product name to unit price, ordered by name.
///
/// Name order makes every rewrite of the file deterministic.
pub type Catalog = BTreeMap<String, Money>;

#[derive(Debug, Serialize, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Price")]
    price: Money,
}

// =============================================================================
// Catalog Store
// =============================================================================

/// Durable product catalog backed by a CSV file.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a store over the given file path. The file itself is created
    /// lazily, on first [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current catalog.
    ///
    /// If no file exists yet, seeds the default five-product catalog and
    /// persists it immediately. Rows that fail to parse are skipped with a
    /// warning rather than failing the whole read.
    pub fn load(&self) -> StoreResult<Catalog> {
        // A zero-length file counts as absent: it has no header row either.
        let missing = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        if missing {
            info!(path = %self.path.display(), "No catalog file, seeding defaults");
            let catalog: Catalog = DEFAULT_CATALOG
                .iter()
                .map(|(name, cents)| (name.to_string(), Money::from_cents(*cents)))
                .collect();
            self.save(&catalog)?;
            return Ok(catalog);
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut catalog = Catalog::new();
        for row in reader.deserialize::<CatalogRow>() {
            match row {
                Ok(row) => {
                    catalog.insert(row.name, row.price);
                }
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "Skipping malformed catalog row");
                }
            }
        }

        debug!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Overwrites the durable store with the given catalog.
    ///
    /// Header plus one row per product; the write is atomic, so a concurrent
    /// reader never sees a partially written file.
    pub fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        rewrite_csv(&self.path, &HEADER, |writer| {
            for (name, price) in catalog {
                writer.serialize(CatalogRow {
                    name: name.clone(),
                    price: *price,
                })?;
            }
            Ok(())
        })?;

        debug!(products = catalog.len(), path = %self.path.display(), "Catalog saved");
        Ok(())
    }

    /// Upserts a product at the given price and persists.
    ///
    /// ## Errors
    /// [`tillbook_core::CoreError::InvalidPrice`] (wrapped in
    /// [`crate::StoreError::Core`]) when `price` is not a non-negative
    /// decimal; the file is untouched in that case.
    pub fn set_price(&self, name: &str, price: &str) -> StoreResult<()> {
        let price = Money::parse(price)?;
        let mut catalog = self.load()?;
        catalog.insert(name.trim().to_string(), price);
        self.save(&catalog)?;
        info!(product = name.trim(), price = %price, "Catalog price set");
        Ok(())
    }

    /// Deletes a product and persists. Removing an absent product is a no-op,
    /// not an error.
    pub fn remove(&self, name: &str) -> StoreResult<()> {
        let mut catalog = self.load()?;
        if catalog.remove(name).is_none() {
            debug!(product = name, "Remove of absent product, nothing to do");
            return Ok(());
        }
        self.save(&catalog)?;
        info!(product = name, "Catalog product removed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
