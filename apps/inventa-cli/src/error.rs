//! # CLI Error Types
//!
//! What the operator sees when a command fails, plus the process exit code.
//!
//! ## Exit Codes
//! ```text
//! ┌──────┬──────────────────────────────────────────────────────────────────┐
//! │ Code │ Meaning                                                          │
//! ├──────┼──────────────────────────────────────────────────────────────────┤
//! │  0   │ Success (a below-cost price warning is still a success)          │
//! │  1   │ Business logic error (unknown conversion unit, CSV failure)      │
//! │  2   │ Invalid input value                                              │
//! │  3   │ Configuration error                                              │
//! │  4   │ File could not be read, parsed or written                        │
//! └──────┴──────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use inventa_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors surfaced by `inventa` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file or environment override is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected by validation.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Domain error from inventa-core.
    #[error("{0}")]
    Core(CoreError),

    /// Reading or writing a file failed.
    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file holds malformed JSON.
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing to stdout or serializing output failed.
    #[error("Output failed: {0}")]
    Output(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Core(_) | CliError::Output(_) => 1,
            CliError::Validation(_) => 2,
            CliError::Config(_) => 3,
            CliError::Io { .. } | CliError::Json { .. } => 4,
        }
    }
}

/// Validation errors keep their own exit code when they come wrapped.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(inner) => CliError::Validation(inner),
            other => CliError::Core(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

/// Convenience type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_validation_error_keeps_exit_code() {
        let err: CliError = CoreError::Validation(ValidationError::Required {
            field: "unit".to_string(),
        })
        .into();
        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Invalid input: unit is required");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Config("x".into()).exit_code(), 3);
        assert_eq!(
            CliError::from(CoreError::ConversionNotFound("box".into())).exit_code(),
            1
        );
        let io = CliError::Io {
            path: PathBuf::from("logs.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(io.exit_code(), 4);
        assert_eq!(io.to_string(), "Cannot access logs.json: missing");
    }
}
