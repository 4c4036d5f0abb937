//! `inventa config show`.

use std::io::Write;

use super::Output;
use crate::config::AppConfig;
use crate::error::CliResult;

/// Prints the merged configuration (TOML, or JSON with `--json`).
pub fn show<W: Write>(config: &AppConfig, output: Output<'_>, out: &mut W) -> CliResult<u8> {
    if output.json {
        output.write_json(out, config)?;
    } else {
        write!(out, "{}", config.to_toml()?)?;
    }
    Ok(0)
}
