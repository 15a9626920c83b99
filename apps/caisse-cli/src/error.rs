//! # CLI Error Type
//!
//! Everything that can stop a `caisse` invocation. The engine itself never
//! fails; these come from configuration, strict argument parsing and output.

use std::path::PathBuf;

use caisse_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::config::CaisseConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// JSON output could not be produced.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Cashier input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Engine setup failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
