//! # caisse-core: Pure Cash-Tender Logic for Caisse
//!
//! This crate is the cash drawer's brain. It answers three questions the
//! cashier asks on every cash sale, as pure functions with zero I/O:
//!
//! 1. Did the customer hand over enough?
//! 2. Which notes and coins do I give back?
//! 3. Which round amounts is the customer likely to hand over?
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Caisse Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Cashier UI / caisse-cli (host shell)               │   │
//! │  │    Tender field ──► Change panel     Quick-amount chips         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain function calls                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ caisse-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌───────────┐ ┌──────────┐ ┌───────────────┐    │   │
//! │  │  │denomination│ │ breakdown │ │  change  │ │ quick_amounts │    │   │
//! │  │  │   table    │ │ decompose │ │ compute  │ │   generate    │    │   │
//! │  │  └────────────┘ └───────────┘ └──────────┘ └───────────────┘    │   │
//! │  │  ┌────────────┐ ┌───────────┐ ┌──────────┐                      │   │
//! │  │  │   money    │ │validation │ │  ticket  │                      │   │
//! │  │  └────────────┘ └───────────┘ └──────────┘                      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type in whole FCFA francs
//! - [`denomination`] - The FCFA note/coin table
//! - [`breakdown`] - Greedy decomposition into notes and coins
//! - [`change`] - Change calculator (Insufficient / Sufficient)
//! - [`quick_amounts`] - Round tender suggestions
//! - [`validation`] - Tender field and raw number normalisation
//! - [`ticket`] - Fixed-width change ticket for the receipt printer
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, safe to call on every keystroke
//! 2. **Total Operations**: the engine never fails; bad input degrades to
//!    documented fallbacks (zero tender, empty breakdown, common amounts)
//! 3. **Integer Money**: every amount is a whole number of francs (i64)
//! 4. **Explicit Errors**: edges (strict parsing, custom tables) return typed errors
//!
//! ## Example Usage
//!
//! ```rust
//! use caisse_core::{compute_change_from_input, format_breakdown, generate_quick_amounts, Money};
//!
//! let total = Money::from_francs(17_465);
//!
//! let chips = generate_quick_amounts(total);
//! assert_eq!(chips.francs(), vec![20_000, 30_000, 40_000, 50_000]);
//!
//! let outcome = compute_change_from_input(total, "35 000");
//! assert!(outcome.can_confirm());
//! assert_eq!(
//!     format_breakdown(&outcome.breakdown),
//!     "1 × 10000 FCFA\n1 × 5000 FCFA\n1 × 2500 FCFA\n1 × 25 FCFA\n1 × 10 FCFA"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod breakdown;
pub mod change;
pub mod denomination;
pub mod error;
pub mod money;
pub mod quick_amounts;
pub mod ticket;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use breakdown::{decompose, decompose_number, format_breakdown, total_pieces, Breakdown, BreakdownEntry};
pub use change::{compute_change, compute_change_from_input, ChangeOutcome, TenderStatus};
pub use denomination::{Denomination, DenominationKind, DenominationTable};
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use money::Money;
pub use quick_amounts::{generate_quick_amounts, round_up_to_denomination, QuickAmounts};
pub use ticket::{render_change_ticket, TicketLayout};
