//! # Denomination Table
//!
//! The fixed set of banknotes and coins the cashier can physically hand over.
//!
//! ## The FCFA Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NOTES   10000   5000   2500   2000   1000                              │
//! │  COINS     500    250    100     50     25     10      5                │
//! │                                                                         │
//! │  Strictly descending, no duplicates, every value > 0.                  │
//! │  Built once per process, never mutated, shared freely across threads.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every other component reads the table in this order: the decomposer
//! relies on it for its greedy pass, the quick-amount advisor for rounding.
//!
//! ## Usage
//! ```rust
//! use caisse_core::denomination::DenominationTable;
//!
//! let table = DenominationTable::fcfa();
//! assert_eq!(table.largest(), 10_000);
//! assert_eq!(table.smallest(), 5);
//! assert!(table.contains(2_500));
//! ```

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::CURRENCY_SYMBOL;

/// FCFA note and coin values, largest first.
pub const FCFA_VALUES: [i64; 12] = [
    10_000, 5_000, 2_500, 2_000, 1_000, 500, 250, 100, 50, 25, 10, 5,
];

/// Values at or above this are printed on paper.
pub const NOTE_THRESHOLD: i64 = 1_000;

// =============================================================================
// Denomination
// =============================================================================

/// Physical form of a denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DenominationKind {
    /// Banknote.
    Note,
    /// Coin.
    Coin,
}

/// A single valid banknote or coin value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Denomination {
    /// Face value in francs (always > 0).
    #[ts(type = "number")]
    pub value: i64,

    /// Display label, e.g. `"2500 FCFA"`.
    pub label: String,

    /// Note or coin.
    pub kind: DenominationKind,
}

impl Denomination {
    fn new(value: i64) -> Self {
        let kind = if value >= NOTE_THRESHOLD {
            DenominationKind::Note
        } else {
            DenominationKind::Coin
        };

        Denomination {
            value,
            label: denomination_label(value),
            kind,
        }
    }
}

/// Label shown next to a piece count: `"<value> FCFA"`.
pub fn denomination_label(value: i64) -> String {
    format!("{value} {CURRENCY_SYMBOL}")
}

// =============================================================================
// Denomination Table
// =============================================================================

/// A validated, strictly descending list of denominations.
///
/// The built-in FCFA table is available through [`DenominationTable::fcfa`].
/// Custom tables go through [`DenominationTable::new`], which enforces the
/// ordering and uniqueness the decomposer depends on. A custom table should
/// also pass [`DenominationTable::is_greedy_canonical`] before it is used for
/// change breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DenominationTable {
    denominations: Vec<Denomination>,
}

static FCFA_TABLE: OnceLock<DenominationTable> = OnceLock::new();

impl DenominationTable {
    /// Returns the process-wide FCFA table.
    pub fn fcfa() -> &'static DenominationTable {
        FCFA_TABLE.get_or_init(|| DenominationTable {
            denominations: FCFA_VALUES.iter().copied().map(Denomination::new).collect(),
        })
    }

    /// Builds a custom table from face values.
    ///
    /// ## Rules
    /// - At least one value
    /// - Every value > 0
    /// - No duplicates
    /// - Strictly descending
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::denomination::DenominationTable;
    ///
    /// assert!(DenominationTable::new(&[200, 100, 50]).is_ok());
    /// assert!(DenominationTable::new(&[]).is_err());
    /// assert!(DenominationTable::new(&[50, 100]).is_err());
    /// assert!(DenominationTable::new(&[100, 100]).is_err());
    /// ```
    pub fn new(values: &[i64]) -> ValidationResult<Self> {
        if values.is_empty() {
            return Err(ValidationError::Required {
                field: "denominations".to_string(),
            });
        }

        for (i, &value) in values.iter().enumerate() {
            if value <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "denomination".to_string(),
                });
            }

            if values[..i].contains(&value) {
                return Err(ValidationError::Duplicate {
                    field: "denomination".to_string(),
                    value: value.to_string(),
                });
            }
        }

        if values.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ValidationError::NotDescending {
                field: "denominations".to_string(),
            });
        }

        Ok(DenominationTable {
            denominations: values.iter().copied().map(Denomination::new).collect(),
        })
    }

    /// All denominations, largest first.
    #[inline]
    pub fn denominations(&self) -> &[Denomination] {
        &self.denominations
    }

    /// Iterates denominations, largest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Denomination> {
        self.denominations.iter()
    }

    /// Face values, largest first.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = i64> + '_ {
        self.denominations.iter().map(|d| d.value)
    }

    /// Number of denominations in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    /// Always false: construction rejects empty tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    /// Largest face value.
    pub fn largest(&self) -> i64 {
        self.denominations.first().map_or(0, |d| d.value)
    }

    /// Smallest face value. Anything left below it is a residual.
    pub fn smallest(&self) -> i64 {
        self.denominations.last().map_or(0, |d| d.value)
    }

    /// Checks whether `value` is a face value in this table.
    pub fn contains(&self, value: i64) -> bool {
        self.denominations.iter().any(|d| d.value == value)
    }

    /// Finds the denomination with the given face value.
    pub fn get(&self, value: i64) -> Option<&Denomination> {
        self.denominations.iter().find(|d| d.value == value)
    }

    /// True when greedy decomposition is minimal for every amount up to
    /// `limit`. Also false when `limit` is above
    /// [`crate::breakdown::MAX_CANONICITY_LIMIT`]. See
    /// [`crate::breakdown::verify_greedy_canonical`].
    pub fn is_greedy_canonical(&self, limit: i64) -> bool {
        crate::breakdown::verify_greedy_canonical(self, limit).is_ok()
    }
}

impl<'a> IntoIterator for &'a DenominationTable {
    type Item = &'a Denomination;
    type IntoIter = std::slice::Iter<'a, Denomination>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
