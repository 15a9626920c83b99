//! # Validation Module
//!
//! Normalises raw cashier input into [`Money`] before it reaches the engine.
//!
//! ## Input Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tender field (UI)            THIS MODULE                 Engine        │
//! │  ─────────────────            ───────────                 ──────        │
//! │  "20 000 FCFA"   ──────►  parse_tendered_input  ──────►  Money(20000)   │
//! │  "1.500"         ──────►                        ──────►  Money(1500)    │
//! │  ""  / "abc"     ──────►  (lenient: zero)       ──────►  Money(0)       │
//! │                                                                         │
//! │  Raw UI number                                                          │
//! │  3.5 / NaN       ──────►  amount_from_f64       ──────►  None           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Accepted Text
//! - Whitespace anywhere (including non-breaking spaces) is ignored
//! - `.` and `,` are thousands separators and must be followed by exactly
//!   three digits
//! - An optional trailing `FCFA`, `CFA`, `XOF` or `F` suffix (any case)
//!
//! ## Usage
//! ```rust
//! use caisse_core::validation::{parse_tendered_input, parse_amount_strict};
//!
//! assert_eq!(parse_tendered_input("20 000 FCFA").francs(), 20_000);
//! assert_eq!(parse_tendered_input("").francs(), 0);
//! assert!(parse_amount_strict("total", "12,5").is_err());
//! ```

use tracing::debug;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Suffixes stripped from amount text, longest first.
const CURRENCY_SUFFIXES: [&str; 4] = ["fcfa", "cfa", "xof", "f"];

// =============================================================================
// Text Parsers
// =============================================================================

/// Parses amount text, rejecting anything that is not a whole,
/// non-negative number of francs.
///
/// ## Errors
/// - [`ValidationError::Required`] for empty input
/// - [`ValidationError::Negative`] for a leading `-`
/// - [`ValidationError::InvalidFormat`] for letters, misplaced separators or
///   values that do not fit in an `i64`
pub fn parse_amount_strict(field: &str, input: &str) -> ValidationResult<Money> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let body = strip_currency_suffix(&compact);

    if body.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if body.starts_with('-') {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    let body = body.strip_prefix('+').unwrap_or(body);
    let mut groups = body.split(['.', ',']);
    let head = groups.next().unwrap_or_default();
    let mut digits = head.to_string();

    for group in groups {
        if head.is_empty() || group.len() != 3 {
            return Err(invalid_format(
                field,
                "thousands separators must be followed by three digits",
            ));
        }
        digits.push_str(group);
    }

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid_format(field, "must contain only digits"));
    }

    digits
        .parse::<i64>()
        .map(Money::from_francs)
        .map_err(|_| invalid_format(field, "amount is too large"))
}

/// Parses the tendered-amount field.
///
/// Anything [`parse_amount_strict`] rejects is treated as nothing tendered,
/// so an empty or half-typed field reads as `0` (insufficient) rather than
/// an error.
pub fn parse_tendered_input(input: &str) -> Money {
    match parse_amount_strict("tendered", input) {
        Ok(amount) => amount,
        Err(err) => {
            debug!(input, %err, "tendered input normalised to zero");
            Money::zero()
        }
    }
}

fn strip_currency_suffix(text: &str) -> &str {
    let lower = text.to_ascii_lowercase();
    CURRENCY_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix))
        .map_or(text, |suffix| &text[..text.len() - suffix.len()])
}

fn invalid_format(field: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Numeric Boundary
// =============================================================================

/// Converts a raw UI number into whole francs.
///
/// Returns `None` for NaN, infinities, fractional values and values outside
/// the `i64` range. The sign is kept; callers decide what a negative means.
///
/// ## Example
/// ```rust
/// use caisse_core::validation::amount_from_f64;
///
/// assert_eq!(amount_from_f64(1500.0), Some(1500));
/// assert_eq!(amount_from_f64(3.5), None);
/// assert_eq!(amount_from_f64(f64::NAN), None);
/// ```
pub fn amount_from_f64(value: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; 2^63 is the first value out of range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }

    if value >= LIMIT || value < -LIMIT {
        return None;
    }

    Some(value as i64)
}

/// Converts a raw tendered number into [`Money`].
///
/// NaN, infinities and negative values read as zero. Fractions of a franc
/// cannot be handed over and are dropped.
pub fn tendered_from_f64(value: f64) -> Money {
    if !value.is_finite() || value <= 0.0 {
        return Money::zero();
    }

    amount_from_f64(value.floor()).map_or(Money::zero(), Money::from_francs)
}

// =============================================================================
// Unit Tests
// =============================================================================
