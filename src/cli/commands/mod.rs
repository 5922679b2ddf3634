//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod modes;
pub mod rules;
pub mod sanitize;
pub mod validate;
