//! Configuration management for the sanitizer.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DOSSIER_SANITIZER_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dossier_sanitizer::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dossier-sanitizer.toml")?;
//! println!("Mode: {}", config.sanitizer.mode);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`SanitizerSection`] - Redaction mode and mapping report path
//! - [`LoggingConfig`] - Log level and local file logging
//! - [`ReportConfig`] - Mapping report formatting
//!
//! # Example Configuration
//!
//! ```toml
//! [sanitizer]
//! mode = "moderate"
//! mapping_report = "${AUDIT_DIR}/mapping.json"
//!
//! [logging]
//! log_level = "info"
//! local_enabled = true
//! local_path = "/var/log/dossier"
//! local_rotation = "daily"
//!
//! [report]
//! pretty = true
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{LoggingConfig, ReportConfig, SanitizerConfig, SanitizerSection};
