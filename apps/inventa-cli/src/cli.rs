//! Command-line interface definitions.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use inventa_core::decimal::parse_strict;
use inventa_core::{MarginSpec, Money};
use rust_decimal::Decimal;

/// Inventa - pricing, validation and audit helpers for the inventory system.
#[derive(Parser, Debug)]
#[command(name = "inventa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive or check sale prices
    #[command(subcommand)]
    Price(PriceCommand),

    /// Validate a decimal amount as typed into a form
    #[command(allow_negative_numbers = true)]
    Validate(ValidateArgs),

    /// Build a unit conversion table
    Conversions(ConversionsArgs),

    /// Filter, page or export audit log entries
    Audit(AuditArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `inventa price`
#[derive(Subcommand, Debug)]
pub enum PriceCommand {
    /// Compute a sale price from a purchase price and a margin
    #[command(allow_negative_numbers = true)]
    Derive(DeriveArgs),
    /// Check a manually entered sale price against the purchase price
    #[command(allow_negative_numbers = true)]
    Check(CheckArgs),
}

/// Subcommands for `inventa config`
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
}

/// Arguments for `price derive`.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Purchase price, e.g. 100 or 12.50
    #[arg(long)]
    pub purchase: Money,

    /// Margin: percentage:30, 30%, fixed:15 or 15 (defaults to config)
    #[arg(long)]
    pub margin: Option<MarginSpec>,
}

/// Arguments for `price check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(long)]
    pub purchase: Money,

    /// Sale price typed by the user
    #[arg(long)]
    pub sale: Money,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Raw text as typed into the field
    pub input: String,
}

/// Arguments for `conversions`.
#[derive(Args, Debug)]
pub struct ConversionsArgs {
    /// Name of the base unit
    #[arg(long)]
    pub base_unit: String,

    /// Sale price of one base unit
    #[arg(long)]
    pub base_price: Money,

    /// Presentation as NAME=FACTOR, repeatable (e.g. --unit box=12)
    #[arg(long = "unit", value_name = "NAME=FACTOR")]
    pub units: Vec<UnitFactor>,
}

/// Arguments for `audit`.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// JSON file holding an array of audit entries
    #[arg(short, long)]
    pub file: PathBuf,

    /// Substring of the user name
    #[arg(long)]
    pub user: Option<String>,

    /// Exact action (CREATE, UPDATE, ...)
    #[arg(long)]
    pub action: Option<String>,

    /// Exact entity type (product, sale, ...)
    #[arg(long)]
    pub entity: Option<String>,

    /// Earliest timestamp, RFC 3339 or YYYY-MM-DD (start of day, UTC)
    #[arg(long)]
    pub from: Option<DateBound>,

    /// Latest timestamp, RFC 3339 or YYYY-MM-DD (end of day, UTC)
    #[arg(long)]
    pub to: Option<DateBound>,

    /// Free-text search over description, entity id, user and entity
    #[arg(long)]
    pub search: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Entries per page (defaults to config)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Write every matching entry to this CSV file instead of printing a page
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

// =============================================================================
// Value Parsers
// =============================================================================

/// A `NAME=FACTOR` pair for `--unit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFactor {
    pub name: String,
    pub factor: Decimal,
}

impl FromStr for UnitFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, factor) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=FACTOR, got '{s}'"))?;

        let factor = parse_strict(factor.trim())
            .map_err(|e| format!("invalid factor '{}': {}", factor.trim(), e))?;

        Ok(UnitFactor {
            name: name.trim().to_string(),
            factor,
        })
    }
}

/// A date bound given as an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

impl DateBound {
    /// First instant covered by this bound.
    pub fn start(&self) -> DateTime<Utc> {
        match self {
            DateBound::Instant(at) => *at,
            DateBound::Day(day) => day.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Last instant covered by this bound.
    pub fn end(&self) -> DateTime<Utc> {
        match self {
            DateBound::Instant(at) => *at,
            DateBound::Day(day) => day
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .map(|at| at.and_utc())
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

impl FromStr for DateBound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(s) {
            return Ok(DateBound::Instant(at.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateBound::Day)
            .map_err(|_| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_price_derive_accepts_negative_fixed_margin() {
        let cli = Cli::parse_from(["inventa", "price", "derive", "--purchase", "100", "--margin", "-50"]);
        match cli.command {
            Commands::Price(PriceCommand::Derive(args)) => {
                assert_eq!(args.purchase, Money::from_cents(10000));
                assert_eq!(args.margin, Some(MarginSpec::fixed(Money::from_cents(-5000))));
            }
            other => panic!("expected price derive, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["inventa", "validate", "12.5", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn test_unit_factor_parse() {
        let unit: UnitFactor = "box = 12".parse().unwrap();
        assert_eq!(unit.name, "box");
        assert_eq!(unit.factor, Decimal::from(12));
        assert!("box".parse::<UnitFactor>().is_err());
        assert!("box=many".parse::<UnitFactor>().is_err());
    }

    #[test]
    fn test_date_bound_parse() {
        let day: DateBound = "2024-03-01".parse().unwrap();
        assert_eq!(day.start().to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert!(day.end() < "2024-03-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert!(day.end() > "2024-03-01T23:59:59Z".parse::<DateTime<Utc>>().unwrap());

        let instant: DateBound = "2024-03-01T10:00:00-05:00".parse().unwrap();
        assert_eq!(instant.start().to_rfc3339(), "2024-03-01T15:00:00+00:00");

        assert!("yesterday".parse::<DateBound>().is_err());
    }
}
