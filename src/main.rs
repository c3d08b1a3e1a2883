// LabLens - Laboratory Throughput Analytics
// Copyright (c) 2025 LabLens Contributors
// Licensed under the MIT License

use lablens::cli::{Cli, Commands};
use lablens::config::{load_config_or_default, LabConfig};
use lablens::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it is readable. Commands
    // load the file again and report any error with the proper exit code.
    let config = load_config_or_default(&cli.config).unwrap_or_else(|_| LabConfig::default());
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.application.log_level.as_str());

    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "LabLens - Laboratory Throughput Analytics"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Report(args) => args.execute(&cli.config, cli.has_explicit_config()),
        Commands::Generate(args) => args.execute(&cli.config, cli.has_explicit_config()),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
