//! Run statistics

use serde::Serialize;
use std::collections::BTreeMap;

/// Counters for one sanitization run
///
/// `total_fields` always equals `redacted_fields + skipped_fields`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Values inspected
    pub total_fields: u64,

    /// Values replaced
    pub redacted_fields: u64,

    /// Values left unchanged
    pub skipped_fields: u64,

    /// Redactions per rule name
    pub rules_applied: BTreeMap<String, u64>,
}

impl Stats {
    pub(crate) fn record_redaction(&mut self, rule_name: &str) {
        self.total_fields += 1;
        self.redacted_fields += 1;
        *self.rules_applied.entry(rule_name.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn record_skip(&mut self) {
        self.total_fields += 1;
        self.skipped_fields += 1;
    }

    /// Clear every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Redactions attributed to one rule
    pub fn count_for(&self, rule_name: &str) -> u64 {
        self.rules_applied.get(rule_name).copied().unwrap_or(0)
    }
}
