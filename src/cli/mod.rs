//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for LabLens using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Configuration path used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "lablens.toml";

/// LabLens - Laboratory Throughput Analytics
#[derive(Parser, Debug)]
#[command(name = "lablens")]
#[command(version, about, long_about = None)]
#[command(author = "LabLens Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "LABLENS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LABLENS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether `--config` (or `LABLENS_CONFIG`) named a file other than the default
    pub fn has_explicit_config(&self) -> bool {
        self.config != DEFAULT_CONFIG_PATH
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the dashboard for a date range
    Report(commands::report::ReportArgs),

    /// Write a seeded mock dataset to a JSON file
    Generate(commands::generate::GenerateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::parse_from(["lablens", "report"]);
        assert_eq!(cli.config, "lablens.toml");
        assert!(!cli.has_explicit_config());
        assert!(matches!(cli.command, Commands::Report(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["lablens", "--config", "custom.toml", "report"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(cli.has_explicit_config());
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["lablens", "--log-level", "debug", "report"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_report_filters() {
        let cli = Cli::parse_from([
            "lablens",
            "report",
            "--priority",
            "urgent,high",
            "--sample-type",
            "Urinalysis",
            "--format",
            "json",
        ]);
        let Commands::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.priority, vec![Priority::Urgent, Priority::High]);
        assert_eq!(args.sample_type, vec!["Urinalysis".to_string()]);
        assert_eq!(args.format, commands::report::OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_conflicting_ranges() {
        let result = Cli::try_parse_from([
            "lablens",
            "report",
            "--start",
            "2024-03-01",
            "--end",
            "2024-03-02",
            "--last-days",
            "7",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_start_without_end() {
        let result = Cli::try_parse_from(["lablens", "report", "--start", "2024-03-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_priority() {
        let result = Cli::try_parse_from(["lablens", "report", "--priority", "asap"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["lablens", "generate", "--output", "out.json", "--seed", "9"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.days, None);
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["lablens", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["lablens", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
