//! Mapping report
//!
//! A versioned, timestamped snapshot of every original→replacement pair a
//! [`Mapper`](super::mapper::Mapper) has issued. The report is an audit
//! artifact: it records what was replaced so a reviewer can follow the
//! pseudonyms, it is not meant to reverse a sanitized document.

use super::mode::Mode;
use crate::domain::{Result, SanitizerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Report format version
pub const REPORT_VERSION: &str = "1.0";

/// Snapshot of the mapper tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingReport {
    /// Report format version
    pub version: String,

    /// Generation time (RFC 3339, UTC)
    pub timestamp: DateTime<Utc>,

    /// Mode the sanitizer ran in
    pub mode: Mode,

    /// Original→replacement tables by category
    pub mappings: ReportMappings,
}

/// Original→replacement tables; empty categories are omitted when serialized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMappings {
    /// Public and private IP addresses
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ip_addresses: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hostnames: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub usernames: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub domains: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mac_addresses: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub emails: BTreeMap<String, String>,

    /// Generic category mappings
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, String>,
}

impl ReportMappings {
    /// Total number of recorded mappings
    pub fn len(&self) -> usize {
        self.ip_addresses.len()
            + self.hostnames.len()
            + self.usernames.len()
            + self.domains.len()
            + self.mac_addresses.len()
            + self.emails.len()
            + self.other.len()
    }

    /// No mapping has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MappingReport {
    /// Create a report stamped with the current time
    pub fn new(mode: Mode, mappings: ReportMappings) -> Self {
        Self {
            version: REPORT_VERSION.to_string(),
            timestamp: Utc::now(),
            mode,
            mappings,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the report as JSON to a file
    pub fn write_to_file(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        fs::write(path, json).map_err(|e| SanitizerError::io("write mapping report", e))?;

        tracing::debug!(
            path = %path.display(),
            mappings = self.mappings.len(),
            "Mapping report written"
        );
        Ok(())
    }

    /// Format a short human-readable summary
    pub fn summary(&self) -> String {
        let m = &self.mappings;
        format!(
            "Mapping report ({} mode): {} IPs, {} hostnames, {} usernames, {} domains, {} MACs, {} emails, {} other",
            self.mode,
            m.ip_addresses.len(),
            m.hostnames.len(),
            m.usernames.len(),
            m.domains.len(),
            m.mac_addresses.len(),
            m.emails.len(),
            m.other.len()
        )
    }
}
