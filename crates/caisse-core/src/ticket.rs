//! # Change Ticket
//!
//! Fixed-width text block printed on the thermal receipt printer when the
//! drawer opens, so the cashier can count the change out loud.
//!
//! ## Layout (32 columns)
//! ```text
//! --------------------------------
//! TOTAL                 1 000 FCFA
//! REÇU                  1 500 FCFA
//! MONNAIE                 500 FCFA
//! --------------------------------
//! 1 × 500 FCFA            500 FCFA
//! --------------------------------
//! ```
//!
//! A row whose label and amount do not fit on one line is split: the label
//! first, the amount right-aligned on the next line. Only a single word
//! wider than the paper (an oversized currency symbol) can overflow.
//!
//! The printer driver itself lives outside this crate; it receives the
//! string as-is.

use crate::breakdown::EMPTY_BREAKDOWN_PLACEHOLDER;
use crate::change::{ChangeOutcome, TenderStatus};
use crate::error::{ValidationError, ValidationResult};
use crate::money::{Money, CURRENCY_SYMBOL, THOUSANDS_SEPARATOR};

/// Paper widths (characters per line) of supported thermal printers.
pub const PAPER_WIDTHS: [usize; 3] = [32, 42, 48];

/// How amounts and lines are laid out on the ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLayout {
    paper_width: usize,
    separator: String,
    symbol: String,
}

impl TicketLayout {
    /// Creates a layout for the given paper width.
    ///
    /// ## Errors
    /// [`ValidationError::InvalidFormat`] when `paper_width` is not one of
    /// [`PAPER_WIDTHS`].
    pub fn new(paper_width: usize) -> ValidationResult<Self> {
        if !PAPER_WIDTHS.contains(&paper_width) {
            return Err(ValidationError::InvalidFormat {
                field: "paper_width".to_string(),
                reason: format!("must be one of {PAPER_WIDTHS:?}, got {paper_width}"),
            });
        }

        Ok(TicketLayout {
            paper_width,
            separator: THOUSANDS_SEPARATOR.to_string(),
            symbol: CURRENCY_SYMBOL.to_string(),
        })
    }

    /// Overrides the thousands separator and currency symbol.
    pub fn with_currency(mut self, separator: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.separator = separator.into();
        self.symbol = symbol.into();
        self
    }

    /// Characters per line.
    #[inline]
    pub fn paper_width(&self) -> usize {
        self.paper_width
    }

    fn amount(&self, money: Money) -> String {
        money.format_with(&self.separator, &self.symbol)
    }

    fn rule(&self) -> String {
        "-".repeat(self.paper_width)
    }

    /// `left` flush left, `right` flush right, at least one space between.
    /// Falls back to two right-aligned blocks when that does not fit.
    fn row(&self, left: &str, right: &str) -> Vec<String> {
        let width = self.paper_width;
        let used = left.chars().count() + right.chars().count();
        if used < width {
            return vec![format!("{left}{}{right}", " ".repeat(width - used))];
        }

        let mut lines = self.wrap(left);
        lines.extend(self.wrap(right).into_iter().map(|line| format!("{line:>width$}")));
        lines
    }

    /// Greedy word wrap to the paper width.
    fn wrap(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if !current.is_empty() && needed > self.paper_width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

impl Default for TicketLayout {
    fn default() -> Self {
        TicketLayout {
            paper_width: PAPER_WIDTHS[0],
            separator: THOUSANDS_SEPARATOR.to_string(),
            symbol: CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// Renders the change ticket for `outcome`.
///
/// ## Example
/// ```rust
/// use caisse_core::change::compute_change;
/// use caisse_core::money::Money;
/// use caisse_core::ticket::{render_change_ticket, TicketLayout};
///
/// let outcome = compute_change(Money::from_francs(1_000), Money::from_francs(1_500));
/// let ticket = render_change_ticket(&outcome, &TicketLayout::default());
///
/// assert!(ticket.lines().all(|line| line.chars().count() <= 32));
/// assert!(ticket.contains("1 × 500 FCFA"));
/// ```
pub fn render_change_ticket(outcome: &ChangeOutcome, layout: &TicketLayout) -> String {
    let mut lines = vec![layout.rule()];
    lines.extend(layout.row("TOTAL", &layout.amount(outcome.total_due)));
    lines.extend(layout.row("REÇU", &layout.amount(outcome.tendered)));

    match outcome.status {
        TenderStatus::Insufficient => {
            lines.extend(layout.row("MANQUE", &layout.amount(outcome.shortfall)));
            lines.push(layout.rule());
            lines.extend(layout.wrap(&outcome.status_message()));
        }
        TenderStatus::Sufficient => {
            lines.extend(layout.row("MONNAIE", &layout.amount(outcome.change)));
            lines.push(layout.rule());

            if outcome.breakdown.is_empty() {
                lines.extend(layout.wrap(EMPTY_BREAKDOWN_PLACEHOLDER));
            }
            for entry in &outcome.breakdown {
                let left = format!("{} × {}", entry.count, entry.label);
                let right = layout.amount(Money::from_francs(entry.subtotal()));
                lines.extend(layout.row(&left, &right));
            }
        }
    }

    lines.push(layout.rule());
    lines.join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================
