//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the sanitizer configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Mode: {}", config.sanitizer.mode);
        match &config.sanitizer.mapping_report {
            Some(path) => println!("  Mapping Report: {}", path.display()),
            None => println!("  Mapping Report: disabled"),
        }
        println!("  Log Level: {}", config.logging.log_level);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!("  Pretty Report: {}", config.report.pretty);
        println!();
        Ok(0)
    }
}
