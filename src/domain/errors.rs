//! Domain error types
//!
//! This module defines the error hierarchy for the sanitizer.
//! Errors carry the operation they came from and never expose the
//! content of the document being processed.

use thiserror::Error;

/// Main sanitizer error type
///
/// A value that matches no rule is not an error; it passes through unchanged.
#[derive(Debug, Error)]
pub enum SanitizerError {
    /// I/O failure on the underlying reader or writer
    #[error("I/O error during {operation}: {source}")]
    Io {
        /// Operation that was running (e.g. "read input")
        operation: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Structural XML error the tolerant reader could not recover from
    #[error("XML parse error at byte {position}: {message}")]
    Parse {
        /// Byte offset in the input where parsing stopped
        position: u64,
        /// Parser message
        message: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unknown sanitization mode literal
    #[error("Invalid mode '{0}'. Must be one of: aggressive, moderate, minimal")]
    InvalidMode(String),
}

impl SanitizerError {
    /// Wraps an I/O error with the name of the failing operation
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }

    /// Returns true for errors raised while parsing the input document
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SanitizerError {
    fn from(err: serde_json::Error) -> Self {
        SanitizerError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SanitizerError {
    fn from(err: toml::de::Error) -> Self {
        SanitizerError::Configuration(format!("TOML parse error: {err}"))
    }
}
