// Dossier Sanitizer - Firewall configuration redaction engine
// Copyright (c) 2025 Dossier Contributors
// Licensed under the MIT License

use clap::Parser;
use dossier_sanitizer::cli::{Cli, Commands};
use dossier_sanitizer::config::{load_config, SanitizerConfig};
use dossier_sanitizer::log_error_with_context;
use dossier_sanitizer::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // validate-config reports load failures itself
    let config = match (&cli.command, cli.config.as_deref()) {
        (Commands::ValidateConfig(_), _) | (_, None) => SanitizerConfig::default(),
        (_, Some(path)) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                process::exit(2);
            }
        },
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.log_level);
    let _guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Dossier Sanitizer - Firewall configuration redaction engine"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    // Flush file logs before exiting
    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: &SanitizerConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Sanitize(args) => args.execute(config),
        Commands::Modes(args) => args.execute(),
        Commands::Rules(args) => args.execute(),
        Commands::ValidateConfig(args) => args.execute(
            cli.config
                .as_deref()
                .unwrap_or("dossier-sanitizer.toml"),
        ),
    }
}
