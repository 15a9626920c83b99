//! # Change Calculator
//!
//! Decides whether the cash handed over covers the total and, if so, what to
//! give back.
//!
//! ## Tender States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │              tendered < total              tendered >= total            │
//! │         ┌──────────────────────┐      ┌──────────────────────┐          │
//! │         │     INSUFFICIENT     │      │      SUFFICIENT      │          │
//! │         │  change = 0          │      │  change = tendered   │          │
//! │         │  confirm blocked     │      │           - total    │          │
//! │         │  shortfall shown     │      │  breakdown shown     │          │
//! │         └──────────────────────┘      └──────────────────────┘          │
//! │                                                                         │
//! │  No history, no intermediate state: every keystroke in the tender      │
//! │  field recomputes the outcome from scratch.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caisse_core::change::{compute_change, TenderStatus};
//! use caisse_core::money::Money;
//!
//! let outcome = compute_change(Money::from_francs(1_000), Money::from_francs(1_500));
//! assert_eq!(outcome.status, TenderStatus::Sufficient);
//! assert_eq!(outcome.change.francs(), 500);
//! assert_eq!(outcome.breakdown.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::breakdown::{decompose, Breakdown};
use crate::money::Money;
use crate::validation::{parse_tendered_input, tendered_from_f64};

// =============================================================================
// Tender Status
// =============================================================================

/// Whether the tendered cash covers the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    /// Tendered < total; the sale cannot be confirmed.
    Insufficient,
    /// Tendered >= total; confirmation is allowed.
    Sufficient,
}

// =============================================================================
// Change Outcome
// =============================================================================

/// Result of one change computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOutcome {
    /// Amount owed.
    pub total_due: Money,

    /// Cash handed over (already normalised, never NaN).
    pub tendered: Money,

    /// Cash to hand back; zero when insufficient.
    pub change: Money,

    /// Cash still missing; zero when sufficient.
    pub shortfall: Money,

    /// Insufficient / Sufficient.
    pub status: TenderStatus,

    /// Notes and coins making up `change`.
    pub breakdown: Breakdown,
}

impl ChangeOutcome {
    /// True when the cashier may confirm the sale.
    #[inline]
    pub fn can_confirm(&self) -> bool {
        self.status == TenderStatus::Sufficient
    }

    /// Cashier-facing status line.
    ///
    /// ## Example
    /// ```rust
    /// use caisse_core::change::compute_change;
    /// use caisse_core::money::Money;
    ///
    /// let short = compute_change(Money::from_francs(1_000), Money::from_francs(999));
    /// assert_eq!(
    ///     short.status_message(),
    ///     "Montant insuffisant : reçu 999 FCFA, total 1 000 FCFA"
    /// );
    /// ```
    pub fn status_message(&self) -> String {
        match self.status {
            TenderStatus::Insufficient => format!(
                "Montant insuffisant : reçu {}, total {}",
                self.tendered, self.total_due
            ),
            TenderStatus::Sufficient if self.change.is_zero() => {
                "Montant exact, aucune monnaie à rendre".to_string()
            }
            TenderStatus::Sufficient => format!("Monnaie à rendre : {}", self.change),
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Computes change for `tendered` against `total_due`.
///
/// - `tendered < total_due`: change 0, [`TenderStatus::Insufficient`]
/// - otherwise: change `tendered - total_due`, [`TenderStatus::Sufficient`],
///   plus its breakdown
///
/// Pure and cheap; meant to be called on every edit of the tender field.
pub fn compute_change(total_due: Money, tendered: Money) -> ChangeOutcome {
    if tendered < total_due {
        let shortfall = total_due.saturating_sub(tendered);
        debug!(
            total_due = total_due.francs(),
            tendered = tendered.francs(),
            shortfall = shortfall.francs(),
            "tender insufficient"
        );

        return ChangeOutcome {
            total_due,
            tendered,
            change: Money::zero(),
            shortfall,
            status: TenderStatus::Insufficient,
            breakdown: Breakdown::empty(),
        };
    }

    let change = tendered.saturating_sub(total_due);

    ChangeOutcome {
        total_due,
        tendered,
        change,
        shortfall: Money::zero(),
        status: TenderStatus::Sufficient,
        breakdown: decompose(change),
    }
}

/// Computes change straight from the tender field's text.
///
/// Empty or unparsable text counts as nothing tendered.
///
/// ## Example
/// ```rust
/// use caisse_core::change::{compute_change_from_input, TenderStatus};
/// use caisse_core::money::Money;
///
/// let due = Money::from_francs(3_750);
/// assert_eq!(compute_change_from_input(due, "").status, TenderStatus::Insufficient);
/// assert_eq!(compute_change_from_input(due, "5 000").change.francs(), 1_250);
/// ```
pub fn compute_change_from_input(total_due: Money, tendered_text: &str) -> ChangeOutcome {
    compute_change(total_due, parse_tendered_input(tendered_text))
}

/// Computes change from a raw UI number that may be NaN.
pub fn compute_change_from_number(total_due: Money, tendered: f64) -> ChangeOutcome {
    compute_change(total_due, tendered_from_f64(tendered))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_sufficient() {
        let outcome = compute_change(Money::from_francs(1_000), Money::from_francs(1_500));
        assert_eq!(outcome.change.francs(), 500);
        assert_eq!(outcome.shortfall, Money::zero());
        assert_eq!(outcome.status, TenderStatus::Sufficient);
        assert!(outcome.can_confirm());
        assert_eq!(outcome.breakdown.total().francs(), 500);
    }

    #[test]
    fn test_change_insufficient() {
        let outcome = compute_change(Money::from_francs(1_000), Money::from_francs(999));
        assert_eq!(outcome.change, Money::zero());
        assert_eq!(outcome.shortfall.francs(), 1);
        assert_eq!(outcome.status, TenderStatus::Insufficient);
        assert!(!outcome.can_confirm());
        assert!(outcome.breakdown.is_empty());
    }

    #[test]
    fn test_change_exact() {
        let outcome = compute_change(Money::from_francs(1_000), Money::from_francs(1_000));
        assert_eq!(outcome.change, Money::zero());
        assert_eq!(outcome.status, TenderStatus::Sufficient);
        assert!(outcome.breakdown.is_empty());
        assert_eq!(
            outcome.status_message(),
            "Montant exact, aucune monnaie à rendre"
        );
    }

    #[test]
    fn test_change_breakdown_matches_change() {
        let outcome = compute_change(Money::from_francs(17_465), Money::from_francs(35_000));
        assert_eq!(outcome.change.francs(), 17_535);
        let lines: Vec<(i64, i64)> = outcome
            .breakdown
            .iter()
            .map(|e| (e.denomination, e.count))
            .collect();
        assert_eq!(
            lines,
            vec![(10_000, 1), (5_000, 1), (2_500, 1), (25, 1), (10, 1)]
        );
        assert_eq!(outcome.status_message(), "Monnaie à rendre : 17 535 FCFA");
    }

    #[test]
    fn test_zero_total_any_tender_is_sufficient() {
        let outcome = compute_change(Money::zero(), Money::zero());
        assert!(outcome.can_confirm());

        let outcome = compute_change(Money::zero(), Money::from_francs(500));
        assert_eq!(outcome.change.francs(), 500);
    }

    #[test]
    fn test_empty_input_is_insufficient_not_nan() {
        let outcome = compute_change_from_input(Money::from_francs(1_000), "");
        assert_eq!(outcome.tendered, Money::zero());
        assert_eq!(outcome.status, TenderStatus::Insufficient);
        assert_eq!(outcome.shortfall.francs(), 1_000);
    }

    #[test]
    fn test_nan_number_is_zero() {
        let outcome = compute_change_from_number(Money::from_francs(1_000), f64::NAN);
        assert_eq!(outcome.tendered, Money::zero());
        assert_eq!(outcome.status, TenderStatus::Insufficient);

        let outcome = compute_change_from_number(Money::from_francs(1_000), 2_000.0);
        assert_eq!(outcome.change.francs(), 1_000);
    }

    #[test]
    fn test_insufficient_message_names_both_amounts() {
        let outcome = compute_change_from_input(Money::from_francs(12_500), "10 000");
        assert_eq!(
            outcome.status_message(),
            "Montant insuffisant : reçu 10 000 FCFA, total 12 500 FCFA"
        );
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = compute_change(Money::from_francs(1_000), Money::from_francs(1_500));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["totalDue"], 1_000);
        assert_eq!(json["change"], 500);
        assert_eq!(json["status"], "sufficient");
        assert_eq!(json["breakdown"][0]["denomination"], 500);
        assert_eq!(json["breakdown"][0]["residual"], false);
    }
}
