//! # CLI Commands
//!
//! Argument definitions and the handlers behind each subcommand.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Command Flow                                   │
//! │                                                                         │
//! │  argv ──► Cli (clap) ──► execute() ──► caisse-core ──► render          │
//! │                              │                           │              │
//! │                              │                     text or --json       │
//! │                              ▼                           ▼              │
//! │                        CaisseConfig               String on stdout      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers return the text to print rather than printing it, so every
//! command is testable without capturing stdout.

use std::path::PathBuf;

use caisse_core::breakdown::{
    verify_greedy_canonical, EMPTY_BREAKDOWN_PLACEHOLDER, MAX_CANONICITY_LIMIT,
};
use caisse_core::validation::parse_amount_strict;
use caisse_core::{
    compute_change_from_input, decompose, format_breakdown, generate_quick_amounts,
    render_change_ticket, total_pieces, Breakdown, ChangeOutcome, DenominationKind,
    DenominationTable, Money,
};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;

use crate::config::CaisseConfig;
use crate::error::CliResult;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "caisse", about = "FCFA cash-tender helper", long_about = None)]
pub struct Cli {
    /// Config file (defaults to caisse.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Change owed and the notes and coins to hand back
    Change(TenderArgs),
    /// Decompose an amount into notes and coins
    Breakdown(BreakdownArgs),
    /// Round tender amounts to offer for a total
    Quick(QuickArgs),
    /// Print the change ticket for the receipt printer
    Ticket(TenderArgs),
    /// List the denomination table
    Table(TableArgs),
}

#[derive(Debug, Args)]
pub struct TenderArgs {
    /// Amount owed, e.g. "17 465" or 17465
    #[arg(long, allow_hyphen_values = true)]
    pub total: String,

    /// Cash handed over, as typed; empty or unreadable text counts as 0
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub tendered: String,
}

#[derive(Debug, Args)]
pub struct BreakdownArgs {
    /// Amount to decompose
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Fail unless greedy breakdowns are minimal for every amount up to LIMIT
    #[arg(
        long,
        value_name = "LIMIT",
        value_parser = clap::value_parser!(i64).range(1..=MAX_CANONICITY_LIMIT)
    )]
    pub check: Option<i64>,
}

#[derive(Debug, Args)]
pub struct QuickArgs {
    /// Amount owed
    #[arg(long, allow_hyphen_values = true)]
    pub total: String,
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs `command` and returns what should be printed on stdout.
pub fn execute(command: &Command, config: &CaisseConfig, json: bool) -> CliResult<String> {
    match command {
        Command::Change(args) => change(args, config, json),
        Command::Breakdown(args) => breakdown(args, config, json),
        Command::Quick(args) => quick(args, config, json),
        Command::Ticket(args) => ticket(args, config, json),
        Command::Table(args) => table(args, config, json),
    }
}

fn tender(args: &TenderArgs) -> CliResult<ChangeOutcome> {
    let total = parse_amount_strict("total", &args.total)?;
    let outcome = compute_change_from_input(total, &args.tendered);
    info!(
        total = total.francs(),
        tendered = outcome.tendered.francs(),
        status = ?outcome.status,
        "Change computed"
    );
    Ok(outcome)
}

fn change(args: &TenderArgs, config: &CaisseConfig, json: bool) -> CliResult<String> {
    let outcome = tender(args)?;
    if json {
        return Ok(serde_json::to_string_pretty(&outcome)?);
    }
    Ok(render_change(&outcome, config))
}

fn breakdown(args: &BreakdownArgs, config: &CaisseConfig, json: bool) -> CliResult<String> {
    let amount = parse_amount_strict("amount", &args.amount)?;
    let breakdown = decompose(amount);
    if json {
        let body = json!({
            "amount": amount,
            "breakdown": breakdown,
            "totalPieces": total_pieces(&breakdown),
        });
        return Ok(serde_json::to_string_pretty(&body)?);
    }
    Ok(render_breakdown(amount, &breakdown, config))
}

fn quick(args: &QuickArgs, config: &CaisseConfig, json: bool) -> CliResult<String> {
    let total = parse_amount_strict("total", &args.total)?;
    let amounts = generate_quick_amounts(total);
    if json {
        return Ok(serde_json::to_string_pretty(&amounts)?);
    }
    Ok(amounts
        .iter()
        .map(|amount| config.format_amount(*amount))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn ticket(args: &TenderArgs, config: &CaisseConfig, json: bool) -> CliResult<String> {
    let outcome = tender(args)?;
    let layout = config.ticket_layout()?;

    let mut lines = header_lines(config, layout.paper_width());
    lines.push(render_change_ticket(&outcome, &layout));
    let ticket = lines.join("\n");

    if json {
        let body = json!({ "outcome": outcome, "ticket": ticket });
        return Ok(serde_json::to_string_pretty(&body)?);
    }
    Ok(ticket)
}

fn table(args: &TableArgs, config: &CaisseConfig, json: bool) -> CliResult<String> {
    let table = DenominationTable::fcfa();
    if let Some(limit) = args.check {
        verify_greedy_canonical(table, limit)?;
        info!(limit, "greedy breakdowns are minimal up to limit");
    }

    if json {
        return Ok(serde_json::to_string_pretty(table)?);
    }

    let width = table
        .iter()
        .map(|d| config.format_amount(Money::from_francs(d.value)).chars().count())
        .max()
        .unwrap_or_default();

    Ok(table
        .iter()
        .map(|d| {
            let amount = config.format_amount(Money::from_francs(d.value));
            format!("{amount:>width$}  {}", kind_label(d.kind))
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

// =============================================================================
// Text Rendering
// =============================================================================

fn kind_label(kind: DenominationKind) -> &'static str {
    match kind {
        DenominationKind::Note => "billet",
        DenominationKind::Coin => "pièce",
    }
}

/// Change panel: amounts, status line, then the pieces to hand back.
pub fn render_change(outcome: &ChangeOutcome, config: &CaisseConfig) -> String {
    let mut lines = vec![
        format!("Total   : {}", config.format_amount(outcome.total_due)),
        format!("Reçu    : {}", config.format_amount(outcome.tendered)),
        format!("Monnaie : {}", config.format_amount(outcome.change)),
        outcome.status_message(),
    ];

    if outcome.can_confirm() && !outcome.breakdown.is_empty() {
        lines.push(String::new());
        lines.push(format_breakdown(&outcome.breakdown));
    }
    lines.join("\n")
}

/// Breakdown listing followed by the piece count.
pub fn render_breakdown(amount: Money, breakdown: &Breakdown, config: &CaisseConfig) -> String {
    if breakdown.is_empty() {
        return EMPTY_BREAKDOWN_PLACEHOLDER.to_string();
    }

    format!(
        "{}\n{}\nPièces : {}",
        config.format_amount(amount),
        format_breakdown(breakdown),
        total_pieces(breakdown)
    )
}

/// Store name and address, centred on the paper.
fn header_lines(config: &CaisseConfig, width: usize) -> Vec<String> {
    if config.store.name.trim().is_empty() {
        return Vec::new();
    }

    std::iter::once(&config.store.name)
        .chain(config.store.address.iter())
        .map(|line| format!("{:^width$}", line.trim()).trim_end().to_string())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
