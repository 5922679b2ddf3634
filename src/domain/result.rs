//! Result type alias for the sanitizer

use super::errors::SanitizerError;

/// Result type alias for sanitizer operations
///
/// # Examples
///
/// ```
/// use dossier_sanitizer::domain::result::Result;
/// use dossier_sanitizer::domain::errors::SanitizerError;
///
/// fn parse_level(s: &str) -> Result<u8> {
///     s.parse().map_err(|_| SanitizerError::Configuration(format!("bad level {s}")))
/// }
///
/// assert!(parse_level("3").is_ok());
/// assert!(parse_level("x").is_err());
/// ```
pub type Result<T> = std::result::Result<T, SanitizerError>;
