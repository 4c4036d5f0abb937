//! # inventa-cli: Command-Line Front End for Inventa
//!
//! Exposes the inventa-core pricing, validation, conversion and audit rules
//! as the `inventa` command.
//!
//! ## Command Flow
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐   ┌────────────────────────┐
//! │ clap parse   │──►│ AppConfig::load      │──►│ LoggingConfig::init    │
//! │ (cli)        │   │ file + INVENTA_* env │   │ stderr, pretty or json │
//! └──────────────┘   └──────────────────────┘   └───────────┬────────────┘
//!                                                           │
//!                    ┌──────────────────────────────────────▼───────────┐
//!                    │ commands::run ──► inventa-core ──► stdout        │
//!                    │ exit code from the handler or CliError           │
//!                    └──────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::{CliError, CliResult};
