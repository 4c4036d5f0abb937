use std::process::ExitCode;

use clap::Parser;
use inventa_cli::cli::Cli;
use inventa_cli::{commands, AppConfig, CliError};
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&e),
    };

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        if let Err(e) = config.logging.validate() {
            return report(&e);
        }
    }

    config.logging.init();
    debug!(command = ?cli.command, "Starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match commands::run(&cli, &config, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            debug!(error = ?e, "Command failed");
            report(&e)
        }
    }
}

fn report(err: &CliError) -> ExitCode {
    eprintln!("Error: {err}");
    ExitCode::from(err.exit_code())
}
