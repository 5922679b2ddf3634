//! Consistent pseudonym mapping
//!
//! The [`Mapper`] hands out deterministic replacements: the same original
//! value in the same category always maps to the same placeholder for the
//! lifetime of the mapper, and distinct originals never share one. This
//! keeps a sanitized document internally consistent (an address used in
//! three rules is replaced by the same placeholder in all three).
//!
//! # Formats
//!
//! | Category | Replacement |
//! |---|---|
//! | Public IP | `[REDACTED-PUBLIC-IP-<n>]` |
//! | Private IP | `10.0.0.<n>`, or `a.b.X.<n>` with structure preserved |
//! | Hostname | `host-<nnn>.example.com` |
//! | Username | `user-<nnn>` |
//! | Domain | `example.com`, then `example<n>.com` |
//! | MAC | `XX:XX:XX:XX:XX:<hh>` |
//! | Email | `user<n>@example.com` |
//! | Generic | `[<CATEGORY>-REDACTED]` |
//!
//! # Thread Safety
//!
//! All operations take `&self`. State sits behind a single `RwLock`;
//! lookups share the read lock, and a miss upgrades to the write lock and
//! re-checks before allocating a counter value.

use super::mode::Mode;
use super::report::{MappingReport, ReportMappings};
use crate::domain::Result;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Mapping namespace; each has its own counter and table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapCategory {
    PublicIp,
    PrivateIp,
    Hostname,
    Username,
    Domain,
    Mac,
    Email,
    /// Fixed `[<CATEGORY>-REDACTED]` placeholders, recorded for the report only
    Generic,
}

#[derive(Debug, Default)]
struct MapperState {
    counters: HashMap<MapCategory, u64>,
    tables: HashMap<MapCategory, HashMap<String, String>>,
}

impl MapperState {
    fn lookup(&self, category: MapCategory, original: &str) -> Option<String> {
        self.tables
            .get(&category)
            .and_then(|table| table.get(original))
            .cloned()
    }

    fn next(&mut self, category: MapCategory) -> u64 {
        let counter = self.counters.entry(category).or_insert(0);
        *counter += 1;
        *counter
    }

    fn table(&self, category: MapCategory) -> BTreeMap<String, String> {
        self.tables
            .get(&category)
            .map(|table| table.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }
}

/// Thread-safe store of original→replacement mappings
#[derive(Debug, Default)]
pub struct Mapper {
    state: RwLock<MapperState>,
}

impl Mapper {
    /// Create an empty mapper
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a public IP address to `[REDACTED-PUBLIC-IP-<n>]`
    pub fn map_public_ip(&self, ip: &str) -> String {
        self.get_or_insert(MapCategory::PublicIp, ip, |n| {
            format!("[REDACTED-PUBLIC-IP-{n}]")
        })
    }

    /// Map a private IP address
    ///
    /// With `preserve_structure` the first two octets are kept
    /// (`192.168.X.<n>`), which retains the RFC 1918 range for readers of
    /// the sanitized document. Values without two dotted octets fall back
    /// to `10.0.0.<n>`. The first call for an address fixes its form.
    pub fn map_private_ip(&self, ip: &str, preserve_structure: bool) -> String {
        self.get_or_insert(MapCategory::PrivateIp, ip, |n| {
            if preserve_structure {
                let octets: Vec<&str> = ip.split('.').collect();
                if octets.len() >= 2 {
                    return format!("{}.{}.X.{n}", octets[0], octets[1]);
                }
            }
            format!("10.0.0.{n}")
        })
    }

    /// Map a hostname to `host-<nnn>.example.com`
    pub fn map_hostname(&self, hostname: &str) -> String {
        self.get_or_insert(MapCategory::Hostname, hostname, |n| {
            format!("host-{n:03}.example.com")
        })
    }

    /// Map a username to `user-<nnn>`
    pub fn map_username(&self, username: &str) -> String {
        self.get_or_insert(MapCategory::Username, username, |n| format!("user-{n:03}"))
    }

    /// Map a domain; the first one becomes `example.com`
    pub fn map_domain(&self, domain: &str) -> String {
        self.get_or_insert(MapCategory::Domain, domain, |n| {
            if n == 1 {
                "example.com".to_string()
            } else {
                format!("example{n}.com")
            }
        })
    }

    /// Map a MAC address to `XX:XX:XX:XX:XX:<hh>`
    pub fn map_mac(&self, mac: &str) -> String {
        self.get_or_insert(MapCategory::Mac, mac, |n| format!("XX:XX:XX:XX:XX:{n:02x}"))
    }

    /// Map an email address to `user<n>@example.com`
    pub fn map_email(&self, email: &str) -> String {
        self.get_or_insert(MapCategory::Email, email, |n| format!("user{n}@example.com"))
    }

    /// Fixed `[<CATEGORY>-REDACTED]` placeholder
    ///
    /// Not counter-based; the pair is recorded for the mapping report.
    pub fn map_generic(&self, category: &str, value: &str) -> String {
        let replacement = format!("[{}-REDACTED]", category.to_ascii_uppercase());
        if self.read().lookup(MapCategory::Generic, value).is_none() {
            self.write()
                .tables
                .entry(MapCategory::Generic)
                .or_default()
                .entry(value.to_string())
                .or_insert_with(|| replacement.clone());
        }
        replacement
    }

    /// Number of distinct originals mapped in a category
    pub fn mapping_count(&self, category: MapCategory) -> usize {
        self.read().tables.get(&category).map_or(0, HashMap::len)
    }

    /// Clear every counter and table
    pub fn reset(&self) {
        let mut state = self.write();
        state.counters.clear();
        state.tables.clear();
        tracing::debug!("Mapper state reset");
    }

    /// Snapshot the tables into a mapping report
    pub fn generate_report(&self, mode: Mode) -> MappingReport {
        let state = self.read();

        let mut ip_addresses = state.table(MapCategory::PublicIp);
        ip_addresses.extend(state.table(MapCategory::PrivateIp));

        let mappings = ReportMappings {
            ip_addresses,
            hostnames: state.table(MapCategory::Hostname),
            usernames: state.table(MapCategory::Username),
            domains: state.table(MapCategory::Domain),
            mac_addresses: state.table(MapCategory::Mac),
            emails: state.table(MapCategory::Email),
            other: state.table(MapCategory::Generic),
        };
        MappingReport::new(mode, mappings)
    }

    /// Mapping report as pretty-printed JSON
    pub fn to_json(&self, mode: Mode) -> Result<String> {
        self.generate_report(mode).to_json(true)
    }

    fn get_or_insert(
        &self,
        category: MapCategory,
        original: &str,
        synthesize: impl FnOnce(u64) -> String,
    ) -> String {
        if let Some(existing) = self.read().lookup(category, original) {
            return existing;
        }

        let mut state = self.write();
        // Another writer may have won the race between the two locks
        if let Some(existing) = state.lookup(category, original) {
            return existing;
        }
        let n = state.next(category);
        let replacement = synthesize(n);
        state
            .tables
            .entry(category)
            .or_default()
            .insert(original.to_string(), replacement.clone());
        replacement
    }

    // State is never left half-updated, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, MapperState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MapperState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
