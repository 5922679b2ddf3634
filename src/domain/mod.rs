//! Domain types shared across the crate.
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, SanitizerError>`]:
//!
//! ```rust
//! use dossier_sanitizer::domain::{Result, SanitizerError};
//!
//! fn example() -> Result<()> {
//!     Err(SanitizerError::Configuration("missing mode".to_string()))
//! }
//! assert!(example().is_err());
//! ```

pub mod errors;
pub mod result;

pub use errors::SanitizerError;
pub use result::Result;
