//! # Configuration
//!
//! Effective settings for the `inventa` command.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --margin, --page-size, --log-level                                  │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     INVENTA_DEFAULT_MARGIN=fixed:15                                    │
//! │     INVENTA_CURRENCY_SYMBOL=S/                                         │
//! │     INVENTA_PAGE_SIZE=50                                               │
//! │     INVENTA_LOG_LEVEL=debug   INVENTA_LOG_FORMAT=json                  │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, otherwise                                         │
//! │     ~/.config/inventa/config.toml (Linux)                              │
//! │     ~/Library/Application Support/com.inventa.inventa/config.toml      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     margin percentage:30, symbol "$", 20 rows per page, info logs      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! default_margin = "percentage:30"
//! currency_symbol = "$"
//!
//! [audit]
//! page_size = 20
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use inventa_core::validation::validate_page_size;
use inventa_core::{MarginSpec, DEFAULT_PAGE_SIZE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::logging::LoggingConfig;

/// Environment variable names.
pub mod env {
    pub const DEFAULT_MARGIN: &str = "INVENTA_DEFAULT_MARGIN";
    pub const CURRENCY_SYMBOL: &str = "INVENTA_CURRENCY_SYMBOL";
    pub const PAGE_SIZE: &str = "INVENTA_PAGE_SIZE";
    pub const LOG_LEVEL: &str = "INVENTA_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "INVENTA_LOG_FORMAT";
}

// =============================================================================
// Sections
// =============================================================================

/// `[pricing]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingSettings {
    /// Margin used by `price derive` when `--margin` is absent.
    #[serde(with = "margin_text")]
    pub default_margin: MarginSpec,
    /// Prefix for amounts in text output.
    pub currency_symbol: String,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            default_margin: MarginSpec::percentage(Decimal::from(30)),
            currency_symbol: "$".to_string(),
        }
    }
}

/// `[audit]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditSettings {
    pub page_size: usize,
}

impl Default for AuditSettings {
    fn default() -> Self {
        AuditSettings {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Margins are written as text in TOML (`"percentage:30"`, `"fixed:15"`).
mod margin_text {
    use inventa_core::MarginSpec;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(margin: &MarginSpec, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(margin)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MarginSpec, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete configuration after all sources are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub pricing: PricingSettings,
    pub audit: AuditSettings,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads defaults, then the config file, then environment overrides, and
    /// validates the result.
    ///
    /// An explicit `path` must exist; the platform default path is optional.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    AppConfig::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&text)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parses TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Output(e.to_string()))
    }

    /// Applies `INVENTA_*` overrides. `lookup` returns the value of a variable
    /// if it is set.
    pub fn apply_env<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env::DEFAULT_MARGIN) {
            self.pricing.default_margin = value
                .parse()
                .map_err(|e| CliError::Config(format!("{}: {}", env::DEFAULT_MARGIN, e)))?;
        }

        if let Some(value) = lookup(env::CURRENCY_SYMBOL) {
            self.pricing.currency_symbol = value;
        }

        if let Some(value) = lookup(env::PAGE_SIZE) {
            self.audit.page_size = value.trim().parse().map_err(|_| {
                CliError::Config(format!("{}: '{}' is not a number", env::PAGE_SIZE, value))
            })?;
        }

        if let Some(value) = lookup(env::LOG_LEVEL) {
            self.logging.level = value;
        }

        if let Some(value) = lookup(env::LOG_FORMAT) {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    /// Checks merged values.
    pub fn validate(&self) -> CliResult<()> {
        validate_page_size(self.audit.page_size)
            .map_err(|e| CliError::Config(format!("audit.page_size: {}", e)))?;
        self.logging.validate()?;
        Ok(())
    }
}

/// `<config dir>/config.toml` for this platform, if a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "inventa", "inventa").map(|dirs| dirs.config_dir().join("config.toml"))
}

// =============================================================================
// Unit Tests
// =============================================================================
