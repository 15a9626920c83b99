//! # caisse-cli: Command-Line Shell for the Caisse Tender Engine
//!
//! A thin host around `caisse-core`. It does exactly four things:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         caisse-cli Startup                              │
//! │                                                                         │
//! │  1. Parse arguments          clap derive (Cli / Command)               │
//! │  2. Load configuration       defaults → caisse.toml → CAISSE_* env     │
//! │     (logged under RUST_LOG, else the default filter)                   │
//! │  3. Initialise tracing       RUST_LOG, else [logging].filter → stderr  │
//! │  4. Execute the command      caisse-core → text or JSON → stdout       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`commands`] - Argument definitions and subcommand handlers
//! - [`config`] - Configuration loading
//! - [`error`] - CLI error type

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{execute, Cli, Command};
pub use config::CaisseConfig;
pub use error::{CliError, CliResult};

/// Parses the process arguments, runs the command and reports failures.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match run_cli(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("caisse: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration and executes an already-parsed command line.
pub fn run_cli(cli: Cli) -> CliResult<String> {
    let config = load_config(cli.config.clone(), std::io::stderr)?;
    init_tracing(&config.logging.filter);

    info!(version = env!("CARGO_PKG_VERSION"), "caisse starting");
    execute(&cli.command, &config, cli.json)
}

/// Loads configuration with a temporary subscriber installed, so config
/// events are logged before the configured filter is known.
fn load_config<W>(path: Option<PathBuf>, writer: W) -> CliResult<CaisseConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = subscriber(config::DEFAULT_LOG_FILTER, writer);
    tracing::subscriber::with_default(bootstrap, || CaisseConfig::load(path))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=caisse_core=trace` - Show engine decisions only
/// - Default: the configured `[logging].filter`
///
/// Logs go to stderr; stdout carries only command output.
fn init_tracing(default_filter: &str) {
    // Already installed when run_cli runs more than once in a process.
    let _ = tracing::subscriber::set_global_default(subscriber(default_filter, std::io::stderr));
}

/// Formatting subscriber filtered by `RUST_LOG`, else `default_filter`.
fn subscriber<W>(default_filter: &str, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

// =============================================================================
// Unit Tests
// =============================================================================
