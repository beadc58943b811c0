//! # Money Module
//!
//! Monetary values as integer cents.
//!
//! Floating point cannot represent most decimal prices exactly, so every
//! monetary value in Tillbook is an `i64` count of cents. The durable CSV
//! format stores prices as decimal strings ("2.50"), which is exactly what
//! [`Money`] serializes to and parses from.
//!
//! ## Usage
//! ```rust
//! use tillbook_core::money::Money;
//!
//! let price = Money::parse("2.50").unwrap();
//! assert_eq!(price.cents(), 250);
//! assert_eq!((price * 3).decimal_string(), "7.50");
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that arithmetic on differences stays well-defined, but every
/// parsed price is non-negative (negative input is rejected as
/// [`CoreError::InvalidPrice`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parses a non-negative decimal string into Money.
    ///
    /// Accepts `"2"`, `"2.5"`, and `"2.50"` alike; whitespace around the
    /// number is ignored. Fraction digits past the second are truncated
    /// (legacy rows written by float-based tooling occasionally carry them).
    ///
    /// ## Errors
    /// Returns [`CoreError::InvalidPrice`] for empty, negative, or otherwise
    /// unparseable input. The offending text is carried in the error so the
    /// caller can surface it.
    ///
    /// ## Example
    /// ```rust
    /// use tillbook_core::money::Money;
    ///
    /// assert_eq!(Money::parse("1.80").unwrap().cents(), 180);
    /// assert_eq!(Money::parse("3").unwrap().cents(), 300);
    /// assert!(Money::parse("-1.00").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> CoreResult<Self> {
        let text = input.trim();
        let invalid = || CoreError::InvalidPrice(text.to_string());

        if text.is_empty() {
            return Err(invalid());
        }

        let (whole, frac) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };

        // A bare "." has neither part; "5." and ".5" are both fine.
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let mut cent_digits: String = frac.chars().take(2).collect();
        while cent_digits.len() < 2 {
            cent_digits.push('0');
        }
        let cents: i64 = cent_digits.parse().map_err(|_| invalid())?;

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(invalid)
    }

    /// Formats the value as a plain decimal string ("2.50", no currency sign).
    ///
    /// This is the representation written to the durable CSV files.
    pub fn decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a currency sign, for logs and receipts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Money::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a quantity (for line totals).
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Serializes as the decimal string the CSV columns expect.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.decimal_string())
    }
}

/// Deserializes from a decimal string, rejecting malformed prices.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Money::parse(&text).map_err(de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
