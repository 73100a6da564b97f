use clap::Parser;
use std::process::ExitCode;

use docqa::Settings;
use docqa::cli::{Cli, Commands, commands};
use docqa::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = settings.unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        Settings::default()
    });

    logging::init_with_config(&settings.logging, cli.verbose);

    if !matches!(cli.command, Commands::Init { .. }) && Settings::workspace_root().is_none() {
        tracing::debug!(target: "cli", "no .docqa directory found, using defaults and environment");
    }

    commands::dispatch(cli.command, settings)
}
