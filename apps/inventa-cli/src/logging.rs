//! Logging configuration and initialization.
//!
//! Logs go to stderr so stdout stays clean for `--json` output.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - show clamp/degradation events from inventa-core
//! - `RUST_LOG=inventa_core=trace` - trace for the core crate only
//! - Default: the configured level (`info`)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(CliError::Config(format!(
                "Unknown log format: '{}'. Valid options: pretty, json",
                other
            ))),
        }
    }
}

/// Logging configuration (`[logging]` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `info` or `info,inventa_core=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Checks that `level` is a valid filter directive.
    pub fn validate(&self) -> Result<(), CliError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| CliError::Config(format!("invalid log level '{}': {}", self.level, e)))
    }

    /// Installs the global tracing subscriber. `RUST_LOG` wins over `level`.
    ///
    /// A second call is a no-op.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let result = match self.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.try_init(),
        };

        if let Err(e) = result {
            tracing::debug!(error = %e, "Tracing subscriber already installed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_validate_level() {
        assert!(LoggingConfig::default().validate().is_ok());

        let custom = LoggingConfig {
            level: "warn,inventa_core=debug".into(),
            format: LogFormat::Json,
        };
        assert!(custom.validate().is_ok());

        let bad = LoggingConfig {
            level: "inventa_core=loud".into(),
            format: LogFormat::Pretty,
        };
        assert!(bad.validate().is_err());
    }
}
