//! # caisse
//!
//! Binary entry point. All logic lives in the library crate.

use std::process::ExitCode;

fn main() -> ExitCode {
    caisse_cli::run()
}
