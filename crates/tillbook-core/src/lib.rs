//! # tillbook-core: Pure Business Logic for Tillbook
//!
//! This crate is the heart of the single-till POS ledger. It contains all
//! business logic as pure functions and in-memory state with zero I/O
//! dependencies.
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartLine, TransactionRecord, Receipt, ...)
//! - [`money`] - Money type with integer cents (no floating point!)
//! - [`cart`] - The active sale's working set of line entries
//! - [`timestamp`] - Dual-format timestamp parsing and date filtering
//! - [`report`] - Aggregations over committed transaction records
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input, same
//!    output. Even "now" is a parameter, never read here.
//! 2. **No I/O**: File access lives in `tillbook-store`, never here.
//! 3. **Integer Money**: All monetary values are cents (i64) to avoid float
//!    errors.
//! 4. **Explicit Errors**: All errors are typed, never strings or panics.
//!
//! ## Example Usage
//!
//! ```rust
//! use tillbook_core::cart::Cart;
//! use tillbook_core::money::Money;
//!
//! let mut cart = Cart::new();
//! cart.add_line("Apple", Money::parse("1.00").unwrap());
//! cart.add_line("Apple", Money::parse("1.00").unwrap());
//!
//! let rows = cart.summarize();
//! assert_eq!(rows[0].quantity, 2);
//! assert_eq!(cart.total().cents(), 200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod report;
pub mod timestamp;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use timestamp::DateFilter;
pub use types::{CartLine, CartSummaryLine, Receipt, ReceiptLine, TransactionRecord};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer name recorded when checkout is given a blank one.
pub const DEFAULT_CUSTOMER: &str = "Unknown";
