//! # Error Types
//!
//! Domain error types for tillbook-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, index, etc.)
//! 3. Errors are enum variants, never String
//!
//! Every failure here is local and recoverable: the operation aborts, prior
//! state (in memory and on disk) is untouched, and the caller gets a
//! structured result to surface.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Price input that cannot be parsed as a non-negative decimal.
    ///
    /// Raised when setting a catalog price from user input, and when a
    /// stored row carries an unreadable price column.
    #[error("Invalid price: '{0}'")]
    InvalidPrice(String),

    /// Cart add referencing a product absent from the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Checkout attempted with no items in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart removal referencing a display row that does not exist.
    #[error("Cart index {index} out of range (cart has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            CoreError::InvalidPrice("abc".to_string()).to_string(),
            "Invalid price: 'abc'"
        );
        assert_eq!(
            CoreError::UnknownProduct("Durian".to_string()).to_string(),
            "Product not found: Durian"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(
            CoreError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "Cart index 3 out of range (cart has 2 rows)"
        );
    }
}
