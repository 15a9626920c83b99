//! # Quick-Amount Advisor
//!
//! Proposes the round amounts a customer is most likely to hand over, so the
//! cashier can enter the tender with one tap.
//!
//! ## How Suggestions Are Built
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total = 3 200                                                          │
//! │                                                                         │
//! │  1. round up to a denomination        3 200 ──► 5 000                   │
//! │  2. total + increment, rounded up     3 700 ──► 5 000                   │
//! │     (500 / 1000 / 2500 for 1000..5000) 4 200 ──► 5 000                  │
//! │                                       5 700 ──► 10 000                  │
//! │  3. dedupe + sort                     {5 000, 10 000}                   │
//! │  4. backfill from 1000/2000/5000/10000 (nothing new >= 5 000)           │
//! │  5. still short: next multiples of 10 000 ──► 20 000, 30 000            │
//! │                                                                         │
//! │  result: [5 000, 10 000, 20 000, 30 000]                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every suggestion is >= the total and is either a face value from the
//! table or a multiple of the largest note, so it can always be paid exactly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;
use ts_rs::TS;

use crate::denomination::DenominationTable;
use crate::money::Money;

/// Number of suggestions returned.
pub const QUICK_AMOUNT_COUNT: usize = 4;

/// Common round amounts used as fallback and backfill.
pub const COMMON_AMOUNTS: [i64; QUICK_AMOUNT_COUNT] = [1_000, 2_000, 5_000, 10_000];

// =============================================================================
// Quick Amounts
// =============================================================================

/// Suggested tender amounts, strictly ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuickAmounts(Vec<Money>);

impl QuickAmounts {
    /// Suggestions, smallest first.
    #[inline]
    pub fn amounts(&self) -> &[Money] {
        &self.0
    }

    /// Iterates suggestions.
    pub fn iter(&self) -> std::slice::Iter<'_, Money> {
        self.0.iter()
    }

    /// Number of suggestions.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no suggestions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Suggestions as plain francs.
    pub fn francs(&self) -> Vec<i64> {
        self.0.iter().map(Money::francs).collect()
    }
}

impl<'a> IntoIterator for &'a QuickAmounts {
    type Item = &'a Money;
    type IntoIter = std::slice::Iter<'a, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Smallest FCFA face value >= `amount`; above the largest note, the next
/// multiple of 10 000.
///
/// Returns `None` when that multiple does not fit in an `i64`, which happens
/// only within 10 000 francs of `i64::MAX`.
///
/// ## Example
/// ```rust
/// use caisse_core::quick_amounts::round_up_to_denomination;
/// use caisse_core::money::Money;
///
/// let round = |francs| round_up_to_denomination(Money::from_francs(francs)).map(|m| m.francs());
///
/// assert_eq!(round(3_200), Some(5_000));
/// assert_eq!(round(2_500), Some(2_500));
/// assert_eq!(round(12_000), Some(20_000));
/// assert_eq!(round(i64::MAX), None);
/// ```
pub fn round_up_to_denomination(amount: Money) -> Option<Money> {
    round_up_with(DenominationTable::fcfa(), amount.francs()).map(Money::from_francs)
}

fn round_up_with(table: &DenominationTable, amount: i64) -> Option<i64> {
    if let Some(value) = table.values().rev().find(|&d| d >= amount) {
        return Some(value);
    }

    let largest = table.largest();
    let notes = amount / largest + i64::from(amount % largest != 0);
    notes.checked_mul(largest)
}

/// Increments added to the total, by order of magnitude.
fn increments_for(total: i64) -> [i64; 3] {
    match total {
        t if t < 1_000 => [25, 50, 100],
        t if t < 5_000 => [500, 1_000, 2_500],
        _ => [2_000, 2_500, 5_000],
    }
}

// =============================================================================
// Advisor
// =============================================================================

/// Proposes four ascending tender amounts for `total_due`.
///
/// ## Rules
/// - `total_due <= 0`: the common amounts `[1000, 2000, 5000, 10000]`
/// - otherwise: the rounded total plus `total + increment` rounded up,
///   deduplicated, backfilled from the common amounts that are >= the rounded
///   total, then from further multiples of 10 000
///
/// Within 40 000 francs of `i64::MAX` there are fewer than four payable
/// amounts >= the total; only those that exist are returned, possibly none.
///
/// ## Example
/// ```rust
/// use caisse_core::quick_amounts::generate_quick_amounts;
/// use caisse_core::money::Money;
///
/// assert_eq!(
///     generate_quick_amounts(Money::from_francs(1_000)).francs(),
///     vec![1_000, 2_000, 5_000, 10_000]
/// );
/// assert_eq!(
///     generate_quick_amounts(Money::from_francs(240)).francs(),
///     vec![250, 500, 1_000, 2_000]
/// );
/// ```
pub fn generate_quick_amounts(total_due: Money) -> QuickAmounts {
    let total = total_due.francs();
    if total <= 0 {
        return QuickAmounts(COMMON_AMOUNTS.iter().copied().map(Money::from_francs).collect());
    }

    let table = DenominationTable::fcfa();
    let Some(rounded) = round_up_with(table, total) else {
        debug!(total, "no payable amount above total");
        return QuickAmounts::default();
    };

    let mut candidates = BTreeSet::new();
    candidates.insert(rounded);
    for increment in increments_for(total) {
        if let Some(value) = total
            .checked_add(increment)
            .and_then(|amount| round_up_with(table, amount))
        {
            candidates.insert(value);
        }
    }

    for common in COMMON_AMOUNTS {
        if candidates.len() >= QUICK_AMOUNT_COUNT {
            break;
        }
        if common >= rounded {
            candidates.insert(common);
        }
    }

    if candidates.len() < QUICK_AMOUNT_COUNT {
        debug!(total, found = candidates.len(), "extending quick amounts with multiples of the largest note");

        let mut next = candidates.last().copied().unwrap_or(rounded);
        while candidates.len() < QUICK_AMOUNT_COUNT {
            let Some(value) = next
                .checked_add(1)
                .and_then(|amount| round_up_with(table, amount))
            else {
                break;
            };
            next = value;
            if !candidates.insert(next) {
                break;
            }
        }
    }

    QuickAmounts(
        candidates
            .into_iter()
            .take(QUICK_AMOUNT_COUNT)
            .map(Money::from_francs)
            .collect(),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(total: i64) -> Vec<i64> {
        generate_quick_amounts(Money::from_francs(total)).francs()
    }

    #[test]
    fn test_fallback_for_non_positive_total() {
        assert_eq!(quick(0), vec![1_000, 2_000, 5_000, 10_000]);
        assert_eq!(quick(-500), vec![1_000, 2_000, 5_000, 10_000]);
    }

    #[test]
    fn test_round_up() {
        let round = |a: i64| {
            round_up_to_denomination(Money::from_francs(a))
                .map(|m| m.francs())
                .unwrap_or_default()
        };
        assert_eq!(round(1), 5);
        assert_eq!(round(5), 5);
        assert_eq!(round(6), 10);
        assert_eq!(round(260), 500);
        assert_eq!(round(2_100), 2_500);
        assert_eq!(round(10_000), 10_000);
        assert_eq!(round(10_001), 20_000);
        assert_eq!(round(30_000), 30_000);
    }

    #[test]
    fn test_coin_scale_totals() {
        // 3 -> 5; 28 -> 50; 53 -> 100; 103 -> 250
        assert_eq!(quick(3), vec![5, 50, 100, 250]);
        // 600 -> 1000 for every increment; backfill 2000, 5000, 10000
        assert_eq!(quick(600), vec![1_000, 2_000, 5_000, 10_000]);
        assert_eq!(quick(300), vec![500, 1_000, 2_000, 5_000]);
    }

    #[test]
    fn test_mid_scale_totals() {
        assert_eq!(quick(1_000), vec![1_000, 2_000, 5_000, 10_000]);
        assert_eq!(quick(1_750), vec![2_000, 2_500, 5_000, 10_000]);
        assert_eq!(quick(3_200), vec![5_000, 10_000, 20_000, 30_000]);
    }

    #[test]
    fn test_large_totals() {
        assert_eq!(quick(7_500), vec![10_000, 20_000, 30_000, 40_000]);
        assert_eq!(quick(15_000), vec![20_000, 30_000, 40_000, 50_000]);
        assert_eq!(quick(17_000), vec![20_000, 30_000, 40_000, 50_000]);
    }

    #[test]
    fn test_shape_and_validity_over_range() {
        let table = DenominationTable::fcfa();
        for total in (0..=60_000).step_by(5).chain([1, 2, 3, 4, 7, 999, 1_001]) {
            let amounts = quick(total);
            assert_eq!(amounts.len(), QUICK_AMOUNT_COUNT, "total {total}");
            assert!(amounts.windows(2).all(|w| w[0] < w[1]), "total {total}: {amounts:?}");
            for amount in amounts {
                assert!(amount >= total, "total {total}");
                assert!(
                    table.contains(amount) || amount % table.largest() == 0,
                    "total {total}: {amount} is not payable"
                );
            }
        }
    }

    #[test]
    fn test_totals_near_i64_limit_stay_payable() {
        // Largest multiple of 10 000 that fits: 9_223_372_036_854_770_000.
        assert_eq!(
            quick(9_223_372_036_854_740_001),
            vec![
                9_223_372_036_854_750_000,
                9_223_372_036_854_760_000,
                9_223_372_036_854_770_000,
            ]
        );
        assert!(quick(i64::MAX - 5_000).is_empty());
        assert!(quick(i64::MAX).is_empty());
        assert_eq!(round_up_to_denomination(Money::from_francs(i64::MAX)), None);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(quick(4_321), quick(4_321));
    }
}
