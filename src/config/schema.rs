//! Configuration schema types
//!
//! This module defines the configuration structure for the sanitizer.
//! Every section and field has a default, so an empty file is valid.

use crate::sanitizer::Mode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main sanitizer configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// Redaction settings
    #[serde(default)]
    pub sanitizer: SanitizerSection,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Mapping report output settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl SanitizerConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.sanitizer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// `[sanitizer]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SanitizerSection {
    /// Redaction mode (aggressive, moderate, minimal)
    #[serde(default)]
    pub mode: Mode,

    /// Where to write the mapping report; no report when unset
    #[serde(default)]
    pub mapping_report: Option<PathBuf>,
}

impl SanitizerSection {
    fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.mapping_report {
            if path.as_os_str().is_empty() {
                return Err("sanitizer.mapping_report must not be empty".to_string());
            }
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid logging.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// `[report]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Pretty-print the mapping report JSON
    #[serde(default)]
    pub pretty: bool,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SanitizerConfig::default();
        assert_eq!(config.sanitizer.mode, Mode::Aggressive);
        assert!(config.sanitizer.mapping_report.is_none());
        assert!(!config.report.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: SanitizerConfig = toml::from_str("").unwrap();
        assert_eq!(config, SanitizerConfig::default());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.log_level = "debug".to_string();
        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mode_is_case_sensitive_in_toml() {
        let ok: Result<SanitizerConfig, _> = toml::from_str("[sanitizer]\nmode = \"minimal\"\n");
        assert_eq!(ok.unwrap().sanitizer.mode, Mode::Minimal);

        let bad: Result<SanitizerConfig, _> = toml::from_str("[sanitizer]\nmode = \"Minimal\"\n");
        assert!(bad.is_err());
    }

    #[test]
    fn test_empty_mapping_report_path_rejected() {
        let mut config = SanitizerConfig::default();
        config.sanitizer.mapping_report = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }
}
