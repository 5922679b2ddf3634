// Dossier Sanitizer - Firewall configuration redaction engine
// Copyright (c) 2025 Dossier Contributors
// Licensed under the MIT License

//! # Dossier Sanitizer - Firewall configuration redaction
//!
//! Dossier Sanitizer removes secrets and identifying data from firewall
//! configuration exports (OPNsense, pfSense and similar XML documents) so
//! they can be shared for review, support or auditing.
//!
//! ## Overview
//!
//! This library provides:
//! - **Detecting** credentials, keys, certificates, addresses, host names,
//!   user names, emails and cloud identifiers by field name and value shape
//! - **Redacting** them with fixed placeholders or consistent pseudonyms,
//!   gated by one of three [`sanitizer::Mode`]s
//! - **Rewriting** XML documents token by token, leaving markup, whitespace
//!   and comments untouched apart from the replaced values
//! - **Reporting** every pseudonym assigned during a run as a JSON
//!   [`sanitizer::MappingReport`]
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`sanitizer`] - Detectors, rule table, mapper and document traversal
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use dossier_sanitizer::sanitizer::{Mode, Sanitizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = r#"<opnsense>
//!   <system>
//!     <hostname>fw-branch-07</hostname>
//!     <user><name>alice</name><password>s3cr3t</password></user>
//!   </system>
//! </opnsense>"#;
//!
//! let mut sanitizer = Sanitizer::new(Mode::Moderate);
//! let mut output = Vec::new();
//! sanitizer.sanitize_xml(input.as_bytes(), &mut output)?;
//!
//! let output = String::from_utf8(output)?;
//! assert!(output.contains("<hostname>host-001.example.com</hostname>"));
//! assert!(output.contains("<password>[REDACTED-PASSWORD]</password>"));
//!
//! let report = sanitizer.mapping_report();
//! assert_eq!(report.mappings.hostnames["fw-branch-07"], "host-001.example.com");
//! # Ok(())
//! # }
//! ```
//!
//! ## In-memory values
//!
//! Types implementing [`sanitizer::Sanitize`] (or declared with
//! [`sanitize_fields!`]) are sanitized in place, with the same rules as
//! the XML path. Anything serde can round-trip through JSON can go
//! through [`sanitizer::Sanitizer::sanitize_serde`].
//!
//! ## Error Handling
//!
//! Library operations return [`domain::SanitizerError`]; the binary wraps
//! them in `anyhow` for reporting.

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod sanitizer;
