//! # Storage Error Types
//!
//! Error types for catalog and ledger file operations.
//!
//! ## Error Flow
//! ```text
//! std::io::Error / csv::Error  →  StoreError (adds context)
//!           CoreError          →  StoreError (domain failures pass through)
//! ```
//!
//! Every variant is recoverable: a failed mutation leaves the durable file
//! exactly as it was, and the caller decides what to show.

use thiserror::Error;

use tillbook_core::CoreError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain failure bubbled up from tillbook-core
    /// (invalid price, unknown product, empty cart, bad cart index).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No ledger record carries the given sequence index.
    #[error("Transaction #{index} not found")]
    NotFound { index: u64 },

    /// Underlying file access failed (missing directory, permissions, disk).
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV layer failed outside a single row's parse (for example, the
    /// file is unreadable). Per-row parse failures during scans are skipped,
    /// not raised.
    #[error("CSV read/write failed: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    /// Creates a NotFound error for a sequence index.
    pub fn not_found(index: u64) -> Self {
        StoreError::NotFound { index }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
