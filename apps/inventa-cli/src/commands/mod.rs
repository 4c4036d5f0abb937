//! Command handlers.
//!
//! Each handler writes its result to `out` and returns the process exit code.
//! Errors bubble up as [`CliError`](crate::error::CliError) and are reported
//! by `main`.

pub mod audit;
pub mod config;
pub mod conversions;
pub mod price;
pub mod validate;

use std::io::Write;

use serde::Serialize;

use crate::cli::{Cli, Commands, ConfigCommand, PriceCommand};
use crate::config::AppConfig;
use crate::error::CliResult;

/// Output settings shared by every handler.
#[derive(Debug, Clone, Copy)]
pub struct Output<'a> {
    pub json: bool,
    pub currency_symbol: &'a str,
}

impl Output<'_> {
    /// Pretty JSON followed by a newline.
    pub fn write_json<W: Write, T: Serialize + ?Sized>(&self, out: &mut W, value: &T) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn money(&self, amount: inventa_core::Money) -> String {
        amount.format_with_symbol(self.currency_symbol)
    }
}

/// Dispatches the parsed command line and flushes `out`.
pub fn run<W: Write>(cli: &Cli, config: &AppConfig, out: &mut W) -> CliResult<u8> {
    let output = Output {
        json: cli.json,
        currency_symbol: &config.pricing.currency_symbol,
    };

    let code = match &cli.command {
        Commands::Price(PriceCommand::Derive(args)) => price::derive(args, config, output, out)?,
        Commands::Price(PriceCommand::Check(args)) => price::check(args, output, out)?,
        Commands::Validate(args) => validate::execute(args, output, out)?,
        Commands::Conversions(args) => conversions::execute(args, output, out)?,
        Commands::Audit(args) => audit::execute(args, config, output, out)?,
        Commands::Config(ConfigCommand::Show) => config::show(config, output, out)?,
    };

    out.flush()?;
    Ok(code)
}
