//! # Breakdown Module
//!
//! Turns an amount into the notes and coins that physically make it up.
//!
//! ## Greedy Decomposition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  decompose(17535)                                                       │
//! │                                                                         │
//! │  remaining  denomination  count   entry                                 │
//! │  ─────────  ────────────  ─────   ─────────────────────                 │
//! │    17535        10000        1    1 × 10000 FCFA                        │
//! │     7535         5000        1    1 × 5000 FCFA                         │
//! │     2535         2500        1    1 × 2500 FCFA                         │
//! │       35      2000..50       0    (skipped)                             │
//! │       35           25        1    1 × 25 FCFA                           │
//! │       10           10        1    1 × 10 FCFA                           │
//! │        0            5        0    (skipped)                             │
//! │                                                                         │
//! │  Anything left below the smallest coin becomes one trailing            │
//! │  "(restant)" entry so the breakdown always sums to the input.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Greedy is not always minimal, even for FCFA: 4000 is 2 × 2000, greedy hands
//! over 2500 + 1000 + 500. Breakdowns follow the greedy rule regardless.
//! [`min_pieces`] gives the true minimum and [`verify_greedy_canonical`]
//! reports the first amount where the two disagree.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::denomination::DenominationTable;
use crate::error::{CoreError, CoreResult};
use crate::money::{Money, CURRENCY_SYMBOL};
use crate::validation::amount_from_f64;

/// Text shown when there is nothing to hand back.
pub const EMPTY_BREAKDOWN_PLACEHOLDER: &str = "Aucune monnaie à rendre";

/// Largest amount the dynamic-programming checks will enumerate up to.
/// The table they build holds one slot per franc.
pub const MAX_CANONICITY_LIMIT: i64 = 1_000_000;

// =============================================================================
// Breakdown Entry
// =============================================================================

/// One line of a breakdown: `count` pieces of `denomination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    /// Face value in francs, or the leftover amount for a residual entry.
    #[ts(type = "number")]
    pub denomination: i64,

    /// Number of pieces (always 1 for a residual entry).
    #[ts(type = "number")]
    pub count: i64,

    /// Display label.
    pub label: String,

    /// True for the synthetic leftover below the smallest denomination.
    pub residual: bool,
}

impl BreakdownEntry {
    /// Value of this line (`denomination × count`).
    #[inline]
    pub fn subtotal(&self) -> i64 {
        self.denomination * self.count
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Ordered list of entries, largest denomination first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Breakdown(Vec<BreakdownEntry>);

impl Breakdown {
    /// An empty breakdown ("nothing to decompose").
    #[inline]
    pub fn empty() -> Self {
        Breakdown(Vec::new())
    }

    /// All entries, largest denomination first.
    #[inline]
    pub fn entries(&self) -> &[BreakdownEntry] {
        &self.0
    }

    /// Iterates entries.
    pub fn iter(&self) -> std::slice::Iter<'_, BreakdownEntry> {
        self.0.iter()
    }

    /// Number of entries (not pieces).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there is nothing to hand over.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of `denomination × count` over all entries, residual included.
    pub fn total(&self) -> Money {
        Money::from_francs(self.0.iter().map(BreakdownEntry::subtotal).sum())
    }

    /// Sum of all piece counts.
    pub fn total_pieces(&self) -> i64 {
        self.0.iter().map(|e| e.count).sum()
    }

    /// The trailing residual entry, if any.
    pub fn residual(&self) -> Option<&BreakdownEntry> {
        self.0.last().filter(|e| e.residual)
    }

    /// Entries that are real notes and coins (residual excluded).
    pub fn physical(&self) -> impl Iterator<Item = &BreakdownEntry> {
        self.0.iter().filter(|e| !e.residual)
    }
}

impl<'a> IntoIterator for &'a Breakdown {
    type Item = &'a BreakdownEntry;
    type IntoIter = std::slice::Iter<'a, BreakdownEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Decomposer
// =============================================================================

/// Decomposes `amount` over the FCFA table.
///
/// Non-positive amounts yield an empty breakdown.
///
/// ## Example
/// ```rust
/// use caisse_core::breakdown::decompose;
/// use caisse_core::money::Money;
///
/// let breakdown = decompose(Money::from_francs(7));
/// let lines: Vec<(i64, i64)> = breakdown
///     .iter()
///     .map(|e| (e.denomination, e.count))
///     .collect();
///
/// assert_eq!(lines, vec![(5, 1), (2, 1)]);
/// assert_eq!(breakdown.residual().unwrap().label, "2 FCFA (restant)");
/// ```
pub fn decompose(amount: Money) -> Breakdown {
    decompose_with(DenominationTable::fcfa(), amount)
}

/// Decomposes `amount` over an arbitrary table.
///
/// ## Algorithm
/// Single pass over the table, largest first:
/// `count = remaining / d`, `remaining %= d`. A non-zero remainder after the
/// last denomination is appended as one residual entry.
pub fn decompose_with(table: &DenominationTable, amount: Money) -> Breakdown {
    let amount = amount.francs();
    if amount <= 0 {
        return Breakdown::empty();
    }

    let mut entries = Vec::new();
    let mut remaining = amount;

    for denomination in table {
        let count = remaining / denomination.value;
        if count > 0 {
            entries.push(BreakdownEntry {
                denomination: denomination.value,
                count,
                label: denomination.label.clone(),
                residual: false,
            });
            remaining %= denomination.value;
        }
    }

    if remaining > 0 {
        debug!(amount, remaining, "amount leaves a residual below the smallest denomination");
        entries.push(BreakdownEntry {
            denomination: remaining,
            count: 1,
            label: residual_label(remaining),
            residual: true,
        });
    }

    trace!(amount, entries = entries.len(), "amount decomposed");
    Breakdown(entries)
}

/// Decomposes a raw numeric value coming from the UI.
///
/// NaN, infinities, fractional and non-positive values yield an empty
/// breakdown.
///
/// ## Example
/// ```rust
/// use caisse_core::breakdown::decompose_number;
///
/// assert!(decompose_number(3.5).is_empty());
/// assert!(decompose_number(f64::NAN).is_empty());
/// assert_eq!(decompose_number(1500.0).total().francs(), 1500);
/// ```
pub fn decompose_number(amount: f64) -> Breakdown {
    match amount_from_f64(amount) {
        Some(francs) => decompose(Money::from_francs(francs)),
        None => Breakdown::empty(),
    }
}

fn residual_label(remaining: i64) -> String {
    format!("{remaining} {CURRENCY_SYMBOL} (restant)")
}

// =============================================================================
// Formatting
// =============================================================================

/// Renders one line per entry as `"<count> × <label>"`.
///
/// ## Example
/// ```rust
/// use caisse_core::breakdown::{decompose, format_breakdown, EMPTY_BREAKDOWN_PLACEHOLDER};
/// use caisse_core::money::Money;
///
/// assert_eq!(
///     format_breakdown(&decompose(Money::from_francs(2_600))),
///     "1 × 2500 FCFA\n1 × 100 FCFA"
/// );
/// assert_eq!(format_breakdown(&decompose(Money::zero())), EMPTY_BREAKDOWN_PLACEHOLDER);
/// ```
pub fn format_breakdown(breakdown: &Breakdown) -> String {
    if breakdown.is_empty() {
        return EMPTY_BREAKDOWN_PLACEHOLDER.to_string();
    }

    breakdown
        .iter()
        .map(|e| format!("{} × {}", e.count, e.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sum of all piece counts in `breakdown`.
#[inline]
pub fn total_pieces(breakdown: &Breakdown) -> i64 {
    breakdown.total_pieces()
}

// =============================================================================
// Canonicity
// =============================================================================

/// Minimum number of pieces that sum exactly to `amount`, by dynamic
/// programming over the table.
///
/// Returns `None` when `amount` cannot be formed exactly, is negative or is
/// above [`MAX_CANONICITY_LIMIT`], and `Some(0)` for 0.
pub fn min_pieces(table: &DenominationTable, amount: i64) -> Option<u64> {
    if amount > MAX_CANONICITY_LIMIT {
        return None;
    }
    let amount = usize::try_from(amount).ok()?;
    min_pieces_upto(table, amount).pop().flatten()
}

/// `best[a]` = minimum pieces for `a`, for every `a` in `0..=limit`.
fn min_pieces_upto(table: &DenominationTable, limit: usize) -> Vec<Option<u64>> {
    let mut best: Vec<Option<u64>> = vec![None; limit + 1];
    best[0] = Some(0);

    for a in 1..=limit {
        best[a] = table
            .values()
            .filter_map(|d| usize::try_from(d).ok())
            .filter(|&d| d <= a)
            .filter_map(|d| best[a - d].map(|pieces| pieces + 1))
            .min();
    }

    best
}

/// Checks that greedy decomposition is minimal for every amount in
/// `1..=limit` that the table can form exactly.
///
/// ## Errors
/// - [`CoreError::CheckLimitTooLarge`] when `limit` is above
///   [`MAX_CANONICITY_LIMIT`]
/// - [`CoreError::NonCanonicalTable`] at the first amount where greedy
///   loses to the minimum
///
/// ## Example
/// ```rust
/// use caisse_core::breakdown::verify_greedy_canonical;
/// use caisse_core::denomination::DenominationTable;
///
/// let coins = DenominationTable::new(&[20, 10, 5, 1]).unwrap();
/// assert!(verify_greedy_canonical(&coins, 100).is_ok());
///
/// // 6 = 3 + 3 (2 pieces), greedy gives 4 + 1 + 1.
/// let odd = DenominationTable::new(&[4, 3, 1]).unwrap();
/// assert!(verify_greedy_canonical(&odd, 10).is_err());
/// ```
pub fn verify_greedy_canonical(table: &DenominationTable, limit: i64) -> CoreResult<()> {
    if limit > MAX_CANONICITY_LIMIT {
        return Err(CoreError::CheckLimitTooLarge {
            limit,
            max: MAX_CANONICITY_LIMIT,
        });
    }

    let Ok(limit) = usize::try_from(limit) else {
        return Ok(());
    };

    let best = min_pieces_upto(table, limit);

    for (amount, optimal) in best.iter().enumerate().skip(1) {
        let Some(optimal) = *optimal else {
            continue;
        };

        let amount = amount as i64;
        let greedy = decompose_with(table, Money::from_francs(amount));
        let greedy_pieces = greedy.total_pieces().unsigned_abs();

        if greedy.residual().is_some() || greedy_pieces > optimal {
            return Err(CoreError::NonCanonicalTable {
                amount,
                optimal,
                greedy: greedy_pieces,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(breakdown: &Breakdown) -> Vec<(i64, i64)> {
        breakdown.iter().map(|e| (e.denomination, e.count)).collect()
    }

    #[test]
    fn test_decompose_17535() {
        let breakdown = decompose(Money::from_francs(17_535));
        assert_eq!(
            lines(&breakdown),
            vec![(10_000, 1), (5_000, 1), (2_500, 1), (25, 1), (10, 1)]
        );
        assert_eq!(breakdown.total().francs(), 17_535);
        assert!(breakdown.residual().is_none());
    }

    #[test]
    fn test_decompose_7_has_residual() {
        let breakdown = decompose(Money::from_francs(7));
        assert_eq!(lines(&breakdown), vec![(5, 1), (2, 1)]);

        let residual = breakdown.residual().unwrap();
        assert_eq!(residual.label, "2 FCFA (restant)");
        assert!(residual.residual);
        assert_eq!(breakdown.physical().count(), 1);
    }

    #[test]
    fn test_decompose_below_smallest_coin() {
        let breakdown = decompose(Money::from_francs(3));
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown.entries()[0].label, "3 FCFA (restant)");
        assert_eq!(breakdown.total().francs(), 3);
    }

    #[test]
    fn test_decompose_multiple_of_largest() {
        let breakdown = decompose(Money::from_francs(45_000));
        assert_eq!(lines(&breakdown), vec![(10_000, 4), (5_000, 1)]);
        assert_eq!(breakdown.total_pieces(), 5);
    }

    #[test]
    fn test_decompose_non_positive_is_empty() {
        assert!(decompose(Money::zero()).is_empty());
        assert!(decompose(Money::from_francs(-5)).is_empty());
    }

    #[test]
    fn test_decompose_number_rejects_fractions() {
        assert!(decompose_number(3.5).is_empty());
        assert!(decompose_number(-5.0).is_empty());
        assert!(decompose_number(0.0).is_empty());
        assert!(decompose_number(f64::INFINITY).is_empty());
        assert_eq!(lines(&decompose_number(750.0)), vec![(500, 1), (250, 1)]);
    }

    #[test]
    fn test_labels_match_table() {
        let breakdown = decompose(Money::from_francs(12_750));
        let labels: Vec<&str> = breakdown.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["10000 FCFA", "2500 FCFA", "250 FCFA"]
        );
    }

    #[test]
    fn test_format_breakdown() {
        let breakdown = decompose(Money::from_francs(20_510));
        assert_eq!(
            format_breakdown(&breakdown),
            "2 × 10000 FCFA\n1 × 500 FCFA\n1 × 10 FCFA"
        );
        assert_eq!(format_breakdown(&Breakdown::empty()), EMPTY_BREAKDOWN_PLACEHOLDER);
    }

    #[test]
    fn test_total_pieces() {
        assert_eq!(total_pieces(&decompose(Money::from_francs(20_510))), 4);
        assert_eq!(total_pieces(&Breakdown::empty()), 0);
    }

    #[test]
    fn test_custom_table_decomposition() {
        let table = DenominationTable::new(&[20, 10, 1]).unwrap();
        let breakdown = decompose_with(&table, Money::from_francs(53));
        assert_eq!(lines(&breakdown), vec![(20, 2), (10, 1), (1, 3)]);
        assert!(breakdown.residual().is_none());
    }

    #[test]
    fn test_min_pieces() {
        let table = DenominationTable::fcfa();
        assert_eq!(min_pieces(table, 0), Some(0));
        assert_eq!(min_pieces(table, 17_535), Some(5));
        assert_eq!(min_pieces(table, 7), None);
        assert_eq!(min_pieces(table, -1), None);

        let odd = DenominationTable::new(&[4, 3, 1]).unwrap();
        assert_eq!(min_pieces(&odd, 6), Some(2));
    }

    #[test]
    fn test_fcfa_table_greedy_holds_below_4000() {
        let table = DenominationTable::fcfa();
        assert!(verify_greedy_canonical(table, 3_995).is_ok());
    }

    #[test]
    fn test_fcfa_table_first_greedy_gap_is_4000() {
        // 2 × 2000 beats 2500 + 1000 + 500.
        let table = DenominationTable::fcfa();
        match verify_greedy_canonical(table, 2 * table.largest()) {
            Err(CoreError::NonCanonicalTable {
                amount,
                optimal,
                greedy,
            }) => {
                assert_eq!(amount, 4_000);
                assert_eq!(optimal, 2);
                assert_eq!(greedy, 3);
            }
            other => panic!("expected NonCanonicalTable, got {other:?}"),
        }
        assert_eq!(
            lines(&decompose(Money::from_francs(4_000))),
            vec![(2_500, 1), (1_000, 1), (500, 1)]
        );
    }

    #[test]
    fn test_non_canonical_table_detected() {
        let odd = DenominationTable::new(&[4, 3, 1]).unwrap();
        match verify_greedy_canonical(&odd, 10) {
            Err(CoreError::NonCanonicalTable {
                amount,
                optimal,
                greedy,
            }) => {
                assert_eq!(amount, 6);
                assert_eq!(optimal, 2);
                assert_eq!(greedy, 3);
            }
            other => panic!("expected NonCanonicalTable, got {other:?}"),
        }
    }

    #[test]
    fn test_check_limit_is_bounded() {
        let table = DenominationTable::fcfa();
        assert!(matches!(
            verify_greedy_canonical(table, i64::MAX),
            Err(CoreError::CheckLimitTooLarge { limit: i64::MAX, .. })
        ));
        assert!(matches!(
            verify_greedy_canonical(table, MAX_CANONICITY_LIMIT + 1),
            Err(CoreError::CheckLimitTooLarge { .. })
        ));
        assert!(!table.is_greedy_canonical(i64::MAX));

        assert_eq!(min_pieces(table, i64::MAX), None);
        assert_eq!(min_pieces(table, MAX_CANONICITY_LIMIT), Some(100));
    }

    #[test]
    fn test_residual_only_detected_as_non_canonical() {
        // 6 = 3 + 3 but greedy takes 4 and leaves 2 with no coin for it.
        let table = DenominationTable::new(&[4, 3]).unwrap();
        assert!(verify_greedy_canonical(&table, 6).is_err());
        assert!(verify_greedy_canonical(&table, 5).is_ok());
    }
}
