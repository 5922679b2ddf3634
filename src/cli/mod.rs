//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Dossier Sanitizer - firewall configuration redaction
#[derive(Parser, Debug)]
#[command(name = "dossier-sanitizer")]
#[command(version, about, long_about = None)]
#[command(author = "Dossier Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, env = "DOSSIER_SANITIZER_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DOSSIER_SANITIZER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitize an XML configuration document
    Sanitize(commands::sanitize::SanitizeArgs),

    /// List the available sanitization modes
    Modes(commands::modes::ModesArgs),

    /// List the redaction rules active in a mode
    Rules(commands::rules::RulesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
