//! # Money Module
//!
//! Provides the `Money` type for handling FCFA amounts safely.
//!
//! ## Why Whole Francs?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FCFA HAS NO SUBUNIT                                                    │
//! │                                                                         │
//! │  The smallest coin in circulation is 5 FCFA and prices are quoted in   │
//! │  whole francs. Every amount in the engine is therefore an i64 count    │
//! │  of francs:                                                             │
//! │                                                                         │
//! │    17 535 FCFA  →  Money(17535)                                         │
//! │                                                                         │
//! │  Floats never enter the engine. Raw UI numbers are converted at the    │
//! │  boundary (see `validation::amount_from_f64`).                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caisse_core::money::Money;
//!
//! let total = Money::from_francs(17_535);
//! let tendered = Money::from_francs(20_000);
//!
//! assert_eq!((tendered - total).francs(), 2_465);
//! assert_eq!(total.to_string(), "17 535 FCFA");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Symbol appended to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "FCFA";

/// Separator placed between groups of three digits in displayed amounts.
pub const THOUSANDS_SEPARATOR: &str = " ";

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole FCFA francs.
///
/// ## Design Decisions
/// - **i64 (signed)**: a shortfall (`tendered - total` when tendered is short)
///   is representable without wrapping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Newtype**: serialises as a plain JSON number for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from whole francs.
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::money::Money;
    ///
    /// let price = Money::from_francs(2_500);
    /// assert_eq!(price.francs(), 2_500);
    /// ```
    #[inline]
    pub const fn from_francs(francs: i64) -> Self {
        Money(francs)
    }

    /// Returns the value in francs.
    #[inline]
    pub const fn francs(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtracts `other`, clamping the result at zero.
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::money::Money;
    ///
    /// let due = Money::from_francs(1_000);
    /// assert_eq!(Money::from_francs(1_500).saturating_sub(due).francs(), 500);
    /// assert_eq!(Money::from_francs(999).saturating_sub(due).francs(), 0);
    /// ```
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Money {
        let diff = self.0.saturating_sub(other.0);
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }

    /// Renders the amount with an explicit separator and currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::money::Money;
    ///
    /// let amount = Money::from_francs(1_250_000);
    /// assert_eq!(amount.format_with(".", "F"), "1.250.000 F");
    /// assert_eq!(amount.format_with(" ", ""), "1 250 000");
    /// ```
    pub fn format_with(&self, separator: &str, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = group_thousands(self.0.unsigned_abs(), separator);
        if symbol.is_empty() {
            format!("{sign}{digits}")
        } else {
            format!("{sign}{digits} {symbol}")
        }
    }
}

/// Groups the decimal digits of `value` by three, right to left.
fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    let lead = digits.len() % 3;

    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the cashier-facing form: `"17 535 FCFA"`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(THOUSANDS_SEPARATOR, CURRENCY_SYMBOL))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<i64> for Money {
    fn from(francs: i64) -> Self {
        Money(francs)
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a piece count (e.g. 3 × 500 FCFA).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Money(self.0 * count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_francs() {
        let money = Money::from_francs(17_535);
        assert_eq!(money.francs(), 17_535);
        assert_eq!(Money::from(250).francs(), 250);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_francs(0).to_string(), "0 FCFA");
        assert_eq!(Money::from_francs(5).to_string(), "5 FCFA");
        assert_eq!(Money::from_francs(999).to_string(), "999 FCFA");
        assert_eq!(Money::from_francs(1_000).to_string(), "1 000 FCFA");
        assert_eq!(Money::from_francs(17_535).to_string(), "17 535 FCFA");
        assert_eq!(Money::from_francs(100_000).to_string(), "100 000 FCFA");
        assert_eq!(Money::from_francs(-2_500).to_string(), "-2 500 FCFA");
    }

    #[test]
    fn test_format_with_custom_separator() {
        let amount = Money::from_francs(12_345_678);
        assert_eq!(amount.format_with(",", "XOF"), "12,345,678 XOF");
        assert_eq!(amount.format_with("", ""), "12345678");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_francs(1_000);
        let b = Money::from_francs(500);

        assert_eq!((a + b).francs(), 1_500);
        assert_eq!((a - b).francs(), 500);
        assert_eq!((b * 3).francs(), 1_500);

        let mut c = a;
        c += b;
        c -= Money::from_francs(250);
        assert_eq!(c.francs(), 1_250);
    }

    #[test]
    fn test_saturating_sub_never_negative() {
        let due = Money::from_francs(1_000);
        assert_eq!(Money::from_francs(999).saturating_sub(due), Money::zero());
        assert_eq!(Money::from_francs(1_000).saturating_sub(due), Money::zero());
        assert_eq!(Money::from_francs(i64::MIN).saturating_sub(due), Money::zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_francs(5).is_positive());
        assert!(Money::from_francs(-5).is_negative());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_francs(2_500)).unwrap();
        assert_eq!(json, "2500");
        let back: Money = serde_json::from_str("2500").unwrap();
        assert_eq!(back.francs(), 2_500);
    }
}
