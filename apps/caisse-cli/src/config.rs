//! # Caisse Configuration
//!
//! Configuration for the `caisse` command-line shell.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CAISSE_STORE_NAME="Boutique Plateau"                               │
//! │     CAISSE_CURRENCY_SYMBOL=F                                           │
//! │     CAISSE_PAPER_WIDTH=48                                              │
//! │     CAISSE_LOG=debug                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/caisse/caisse.toml (Linux)                               │
//! │     ~/Library/Application Support/org.caisse.caisse/caisse.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "FCFA", space separator, 32-column paper                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # caisse.toml
//! [store]
//! name = "Boutique Plateau"
//! address = ["Avenue Lamine Gueye", "Dakar"]
//!
//! [display]
//! currency_symbol = "FCFA"
//! thousands_separator = " "
//! paper_width = 42  # 32 | 42 | 48
//!
//! [logging]
//! filter = "warn,caisse=info"
//! ```

use std::path::{Path, PathBuf};

use caisse_core::money::{CURRENCY_SYMBOL, THOUSANDS_SEPARATOR};
use caisse_core::ticket::{TicketLayout, PAPER_WIDTHS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn,caisse=info";

// =============================================================================
// Store Configuration
// =============================================================================

/// The shop printed at the top of change tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shop name. Empty means no ticket header.
    #[serde(default)]
    pub name: String,

    /// Address lines under the name.
    #[serde(default)]
    pub address: Vec<String>,
}

// =============================================================================
// Display Configuration
// =============================================================================

/// How amounts are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency symbol after every amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Separator between thousands groups.
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,

    /// Ticket printer paper width in characters.
    #[serde(default = "default_paper_width")]
    pub paper_width: usize,
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

fn default_thousands_separator() -> String {
    THOUSANDS_SEPARATOR.to_string()
}

fn default_paper_width() -> usize {
    PAPER_WIDTHS[0]
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency_symbol: default_currency_symbol(),
            thousands_separator: default_thousands_separator(),
            paper_width: default_paper_width(),
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration for the `caisse` shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaisseConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CaisseConfig {
    /// Loads configuration from file and environment.
    ///
    /// An explicit `config_path` must exist. The platform default path is
    /// optional; when it is missing the defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::ConfigNotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading caisse config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.display.currency_symbol.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        if !PAPER_WIDTHS.contains(&self.display.paper_width) {
            return Err(CliError::InvalidConfig(format!(
                "paper_width must be one of {:?}, got {}",
                PAPER_WIDTHS, self.display.paper_width
            )));
        }

        Ok(())
    }

    /// Applies `CAISSE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// An unparsable `CAISSE_PAPER_WIDTH` becomes 0, which
    /// [`CaisseConfig::validate`] rejects.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("CAISSE_STORE_NAME") {
            debug!(store = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(symbol) = lookup("CAISSE_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        if let Some(width) = lookup("CAISSE_PAPER_WIDTH") {
            debug!(width = %width, "Overriding paper width from environment");
            self.display.paper_width = width.trim().parse().unwrap_or(0);
        }

        if let Some(filter) = lookup("CAISSE_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the platform-specific config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "caisse", "caisse")
            .map(|dirs| dirs.config_dir().join("caisse.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Ticket layout for the configured printer and currency.
    pub fn ticket_layout(&self) -> CliResult<TicketLayout> {
        Ok(TicketLayout::new(self.display.paper_width)?.with_currency(
            self.display.thousands_separator.as_str(),
            self.display.currency_symbol.as_str(),
        ))
    }

    /// Formats francs with the configured separator and symbol.
    pub fn format_amount(&self, amount: caisse_core::Money) -> String {
        amount.format_with(&self.display.thousands_separator, &self.display.currency_symbol)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use caisse_core::Money;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CaisseConfig::default();
        assert_eq!(config.display.currency_symbol, "FCFA");
        assert_eq!(config.display.thousands_separator, " ");
        assert_eq!(config.display.paper_width, 32);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(config.store.name.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = CaisseConfig::from_toml(
            r#"
            [store]
            name = "Boutique Plateau"
            address = ["Avenue Lamine Gueye", "Dakar"]

            [display]
            currency_symbol = "F"
            thousands_separator = "."
            paper_width = 48

            [logging]
            filter = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Boutique Plateau");
        assert_eq!(config.store.address.len(), 2);
        assert_eq!(config.display.paper_width, 48);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.format_amount(Money::from_francs(17_535)), "17.535 F");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CaisseConfig::from_toml("[display]\npaper_width = 42\n").unwrap();
        assert_eq!(config.display.paper_width, 42);
        assert_eq!(config.display.currency_symbol, "FCFA");
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_toml() {
        let result = CaisseConfig::from_toml("[display]\npaper_width = \"wide\"\n");
        assert!(matches!(result, Err(CliError::ConfigParse(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CaisseConfig::default();
        config.display.paper_width = 40;
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));

        let mut config = CaisseConfig::default();
        config.display.currency_symbol = "  ".to_string();
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_overrides() {
        let mut config = CaisseConfig::default();
        config.apply_overrides(lookup_from(&[
            ("CAISSE_STORE_NAME", "Chez Awa"),
            ("CAISSE_CURRENCY_SYMBOL", "XOF"),
            ("CAISSE_PAPER_WIDTH", "42"),
            ("CAISSE_LOG", "trace"),
        ]));

        assert_eq!(config.store.name, "Chez Awa");
        assert_eq!(config.display.currency_symbol, "XOF");
        assert_eq!(config.display.paper_width, 42);
        assert_eq!(config.logging.filter, "trace");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparsable_width_override_fails_validation() {
        let mut config = CaisseConfig::default();
        config.apply_overrides(lookup_from(&[("CAISSE_PAPER_WIDTH", "wide")]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_path() {
        let result = CaisseConfig::load(Some(PathBuf::from("/nonexistent/caisse.toml")));
        assert!(matches!(result, Err(CliError::ConfigNotFound(_))));
    }

    #[test]
    fn test_ticket_layout_uses_display_settings() {
        let mut config = CaisseConfig::default();
        config.display.paper_width = 42;
        let layout = config.ticket_layout().unwrap();
        assert_eq!(layout.paper_width(), 42);
    }
}
