//! Redaction engine for firewall configuration documents
//!
//! This module replaces sensitive values (credentials, keys, addresses,
//! host and user names, cloud identifiers) with deterministic placeholders
//! while keeping the document structure intact.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Detection**: stateless value and field-name classifiers ([`detector`])
//! - **Rules**: a static, mode-gated rule table ([`rules`]) resolved by the [`RuleEngine`]
//! - **Mapping**: consistent pseudonyms from a shared [`Mapper`]
//! - **Traversal**: an XML token rewriter and the [`Sanitize`] trait for
//!   in-memory values, both driven by the [`Sanitizer`]
//!
//! # Usage
//!
//! ```
//! use dossier_sanitizer::sanitizer::{Mode, Sanitizer};
//!
//! let mut sanitizer = Sanitizer::new(Mode::Aggressive);
//! let input = "<config><gateway>8.8.8.8</gateway></config>";
//! let mut output = Vec::new();
//! sanitizer.sanitize_xml(input.as_bytes(), &mut output)?;
//!
//! let output = String::from_utf8(output).unwrap();
//! assert_eq!(output, "<config><gateway>[REDACTED-PUBLIC-IP-1]</gateway></config>");
//! assert_eq!(sanitizer.stats().redacted_fields, 1);
//! # Ok::<(), dossier_sanitizer::domain::SanitizerError>(())
//! ```

pub mod detector;
pub mod engine;
pub mod mapper;
pub mod mode;
pub mod report;
pub mod rules;
pub mod stats;
pub mod traverse;
pub mod xml;

// Re-export main types
pub use engine::RuleEngine;
pub use mapper::{MapCategory, Mapper};
pub use mode::Mode;
pub use report::{MappingReport, ReportMappings};
pub use rules::{Rule, RuleCategory};
pub use stats::Stats;
pub use traverse::Sanitize;

use crate::domain::{Result, SanitizerError};
use crate::{log_sanitize_complete, log_sanitize_start};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates one sanitization run
///
/// A `Sanitizer` owns its [`RuleEngine`] and [`Stats`]; it is used through
/// `&mut self` by one run at a time. Parallel runs use separate sanitizers
/// and share a [`Mapper`] through [`Sanitizer::with_mapper`] to keep one
/// pseudonym namespace.
///
/// # Examples
///
/// ```
/// use dossier_sanitizer::sanitizer::{Mapper, Mode, Sanitizer};
/// use std::sync::Arc;
///
/// let mapper = Arc::new(Mapper::new());
/// let mut first = Sanitizer::with_mapper(Mode::Moderate, Arc::clone(&mapper));
/// let mut second = Sanitizer::with_mapper(Mode::Moderate, Arc::clone(&mapper));
///
/// assert_eq!(first.sanitize_value("wan.ipaddr", "8.8.8.8"), "[REDACTED-PUBLIC-IP-1]");
/// assert_eq!(second.sanitize_value("dns.server", "8.8.8.8"), "[REDACTED-PUBLIC-IP-1]");
/// ```
#[derive(Debug, Clone)]
pub struct Sanitizer {
    engine: RuleEngine,
    stats: Stats,
}

impl Sanitizer {
    /// Create a sanitizer with a fresh mapper
    pub fn new(mode: Mode) -> Self {
        Self::with_mapper(mode, Arc::new(Mapper::new()))
    }

    /// Create a sanitizer sharing an existing mapper
    pub fn with_mapper(mode: Mode, mapper: Arc<Mapper>) -> Self {
        Self {
            engine: RuleEngine::with_mapper(mode, mapper),
            stats: Stats::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn mapper(&self) -> &Arc<Mapper> {
        self.engine.mapper()
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Sanitize an XML document
    ///
    /// The whole input is buffered, rewritten token by token and written out
    /// in one piece. On a parse error nothing is written.
    ///
    /// # Errors
    ///
    /// - [`SanitizerError::Io`] when reading the input or writing the output fails
    /// - [`SanitizerError::Parse`] on a structural error the reader cannot recover from
    pub fn sanitize_xml<R: Read, W: Write>(&mut self, mut reader: R, mut writer: W) -> Result<()> {
        let mut input = Vec::new();
        reader
            .read_to_end(&mut input)
            .map_err(|e| SanitizerError::io("read input", e))?;

        let _span = tracing::info_span!("sanitize", mode = %self.mode(), input_bytes = input.len())
            .entered();
        log_sanitize_start!(self.mode(), input.len());
        let started = Instant::now();

        let output = xml::rewrite(self, &input)?;
        writer
            .write_all(&output)
            .and_then(|()| writer.flush())
            .map_err(|e| SanitizerError::io("write output", e))?;

        log_sanitize_complete!(&self.stats, started.elapsed());
        Ok(())
    }

    /// Sanitize an in-memory value through its [`Sanitize`] implementation
    pub fn sanitize_struct<T: Sanitize + ?Sized>(&mut self, value: &mut T) -> Result<()> {
        let _span = tracing::info_span!("sanitize", mode = %self.mode()).entered();
        let started = Instant::now();
        value.sanitize(self, "")?;
        log_sanitize_complete!(&self.stats, started.elapsed());
        Ok(())
    }

    /// Sanitize any serde type by way of its JSON representation
    ///
    /// Field paths follow the serialized names (`#[serde(rename)]` applies).
    pub fn sanitize_serde<T: Serialize + DeserializeOwned>(&mut self, value: &mut T) -> Result<()> {
        let mut json = serde_json::to_value(&*value)?;
        self.sanitize_struct(&mut json)?;
        *value = serde_json::from_value(json)?;
        Ok(())
    }

    /// Sanitize one value found at `context` and record the outcome
    ///
    /// Surrounding whitespace is kept. Sequence indices are dropped from
    /// the context, then the full path is tried first; when no rule
    /// changes the value, the last path segment is tried alone.
    pub fn sanitize_value(&mut self, context: &str, value: &str) -> String {
        let core = value.trim();
        if core.is_empty() {
            self.stats.record_skip();
            return value.to_string();
        }

        let context = strip_indices(context);
        let context = context.as_ref();
        let resolved = self.engine.resolve(context, core).or_else(|| {
            let leaf = leaf_segment(context);
            (leaf != context)
                .then(|| self.engine.resolve(leaf, core))
                .flatten()
        });

        let Some((rule, replacement)) = resolved else {
            if detector::looks_like_secret_field(context) {
                tracing::debug!(context, "Secret-looking field matched no active rule");
            }
            self.stats.record_skip();
            return value.to_string();
        };

        tracing::trace!(rule = rule.name, context, "Value redacted");
        self.stats.record_redaction(rule.name);

        let leading = &value[..value.len() - value.trim_start().len()];
        let trailing = &value[value.trim_end().len()..];
        format!("{leading}{replacement}{trailing}")
    }

    /// Copy of the run statistics
    pub fn stats(&self) -> Stats {
        self.stats.clone()
    }

    /// Clear the run statistics
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Mapping report for this sanitizer's mode
    pub fn mapping_report(&self) -> MappingReport {
        self.mapper().generate_report(self.mode())
    }
}

/// Remove `[i]` index suffixes (`users[0].name` → `users.name`)
fn strip_indices(path: &str) -> Cow<'_, str> {
    if !path.contains('[') {
        return Cow::Borrowed(path);
    }
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    Cow::Owned(out)
}

/// Last path segment without an index suffix (`a.b[2]` → `b`)
fn leaf_segment(path: &str) -> &str {
    let last = path.rsplit('.').next().unwrap_or(path);
    match last.find('[') {
        Some(idx) => &last[..idx],
        None => last,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_segment() {
        assert_eq!(leaf_segment("opnsense.system.hostname"), "hostname");
        assert_eq!(leaf_segment("users[3]"), "users");
        assert_eq!(leaf_segment("a.servers[0]"), "servers");
        assert_eq!(leaf_segment("plain"), "plain");
        assert_eq!(leaf_segment(""), "");
    }

    #[test]
    fn test_strip_indices() {
        assert_eq!(strip_indices("system.user[0].name"), "system.user.name");
        assert_eq!(strip_indices("dns[1]"), "dns");
        assert_eq!(strip_indices("plain.path"), "plain.path");
    }

    #[test]
    fn test_sanitize_value_leaf_fallback() {
        let mut sanitizer = Sanitizer::new(Mode::Aggressive);
        assert_eq!(
            sanitizer.sanitize_value("interfaces.lan.subnet", "192.168.1.0/24"),
            "192.168.X.1/24"
        );
        assert_eq!(sanitizer.sanitize_value("opnsense.apikey", "abc"), "[REDACTED-API-KEY]");
        assert_eq!(sanitizer.sanitize_value("opnsense.system.key", "abc"), "[REDACTED-API-KEY]");
    }

    #[test]
    fn test_unpadded_key_material_redacted_in_minimal() {
        let key = "QUJDREVGR0hJSktMTU5PUFFSU1RVVldYWVphYmNkZWZnaGlqa2xtbm9wcXJzdHV2d3h5eg";
        let mut sanitizer = Sanitizer::new(Mode::Minimal);
        assert_eq!(
            sanitizer.sanitize_value("openvpn.tls_key", key),
            "[REDACTED-KEY-MATERIAL]"
        );
        assert_eq!(sanitizer.stats().count_for("key_material"), 1);
    }

    #[test]
    fn test_loopback_cidr_in_hostname_field_uses_hostname_rule() {
        let mut sanitizer = Sanitizer::new(Mode::Aggressive);
        assert_eq!(
            sanitizer.sanitize_value("system.hostname", "127.0.0.1/8"),
            "host-001.example.com"
        );
        let stats = sanitizer.stats();
        assert_eq!(stats.count_for("hostname"), 1);
        assert_eq!(stats.count_for("cidr"), 0);
    }

    #[test]
    fn test_stats_are_balanced() {
        let mut sanitizer = Sanitizer::new(Mode::Minimal);
        sanitizer.sanitize_value("password", "secret");
        sanitizer.sanitize_value("descr", "LAN");
        sanitizer.sanitize_value("password", "");

        let stats = sanitizer.stats();
        assert_eq!(stats.total_fields, 3);
        assert_eq!(stats.redacted_fields, 1);
        assert_eq!(stats.skipped_fields, 2);
        assert_eq!(stats.count_for("password"), 1);

        sanitizer.reset_stats();
        assert_eq!(sanitizer.stats().total_fields, 0);
    }

    #[test]
    fn test_stats_returns_a_copy() {
        let mut sanitizer = Sanitizer::new(Mode::Minimal);
        let before = sanitizer.stats();
        sanitizer.sanitize_value("password", "secret");
        assert_eq!(before.total_fields, 0);
        assert_eq!(sanitizer.stats().total_fields, 1);
    }

    #[test]
    fn test_mapping_report_uses_mode() {
        let mut sanitizer = Sanitizer::new(Mode::Moderate);
        sanitizer.sanitize_value("user", "admin");
        let report = sanitizer.mapping_report();
        assert_eq!(report.mode, Mode::Moderate);
        assert_eq!(report.mappings.usernames["admin"], "user-001");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let mut sanitizer = Sanitizer::new(Mode::Aggressive);
        let mut out = Vec::new();
        let err = sanitizer
            .sanitize_xml("<a><b attr=\"x></a>".as_bytes(), &mut out)
            .unwrap_err();
        assert!(err.is_parse_error());
        assert!(out.is_empty());
    }
}
