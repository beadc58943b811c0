//! # tillbook-store: Durable Storage for Tillbook
//!
//! This crate provides file-backed storage for the single-till POS ledger.
//! Durable state is two headered CSV files:
//!
//! - `products.csv` - the catalog: `Name,Price`
//! - `transactions.csv` - the ledger: `Index,Customer,Product,Price,Amount,Total,Timestamp`
//!
//! ## Module Organization
//!
//! - [`catalog`] - Catalog store (load/save/set_price/remove)
//! - [`ledger`] - Transaction ledger (append/scan/filter/delete)
//! - [`till`] - Single-session facade orchestrating catalog + cart + ledger
//! - [`error`] - Storage error types
//!
//! ## Durability Discipline
//!
//! There is no cache and no delta write: every operation re-reads its file,
//! and every mutation rewrites (or batch-appends to) the whole file. Full
//! rewrites go through a temp file and an atomic rename, so a reader never
//! observes a partially written store. Crash-safety over performance - both
//! files are small.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tillbook_store::Till;
//!
//! let mut till = Till::new("products.csv", "transactions.csv");
//! till.add_to_cart("Apple")?;
//! till.add_to_cart("Banana")?;
//! let receipt = till.checkout("Sam")?;
//! println!("total {}", receipt.grand_total);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod atomic;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod till;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{Catalog, CatalogStore};
pub use error::{StoreError, StoreResult};
pub use ledger::Ledger;
pub use till::Till;
