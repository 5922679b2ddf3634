//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! The library itself only emits `tracing` events. Values being redacted
//! are never logged; events carry rule names, context paths and counts.
//!
//! # Example
//!
//! ```no_run
//! use dossier_sanitizer::logging::init_logging;
//! use dossier_sanitizer::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a document sanitization run
///
/// # Example
///
/// ```no_run
/// use dossier_sanitizer::log_sanitize_start;
/// use dossier_sanitizer::sanitizer::Mode;
///
/// log_sanitize_start!(Mode::Moderate, 4096);
/// ```
#[macro_export]
macro_rules! log_sanitize_start {
    ($mode:expr, $bytes:expr) => {
        tracing::debug!(
            mode = %$mode,
            input_bytes = $bytes,
            "Starting sanitization"
        );
    };
}

/// Log the completion of a sanitization run
///
/// # Example
///
/// ```no_run
/// use dossier_sanitizer::log_sanitize_complete;
/// use dossier_sanitizer::sanitizer::Stats;
/// use std::time::Duration;
///
/// let stats = Stats::default();
/// log_sanitize_complete!(&stats, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_sanitize_complete {
    ($stats:expr, $duration:expr) => {
        tracing::debug!(
            total_fields = $stats.total_fields,
            redacted_fields = $stats.redacted_fields,
            skipped_fields = $stats.skipped_fields,
            duration_ms = $duration.as_millis() as u64,
            "Sanitization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use dossier_sanitizer::log_error_with_context;
/// use dossier_sanitizer::domain::SanitizerError;
///
/// let error = SanitizerError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::SanitizerError;
    use crate::sanitizer::{Mode, Stats};
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let stats = Stats::default();
        log_sanitize_start!(Mode::Minimal, 0usize);
        log_sanitize_complete!(&stats, Duration::from_millis(1));
        let error = SanitizerError::Configuration("bad".to_string());
        log_error_with_context!(&error, "test");
    }
}
