//! Rule resolution and replacement
//!
//! The [`RuleEngine`] resolves a (field, value) pair against the rule table
//! for one fixed [`Mode`] and applies the winning rule's strategy through
//! the shared [`Mapper`].

use super::detector;
use super::mapper::Mapper;
use super::mode::Mode;
use super::rules::{Rule, RuleCategory, Strategy, RULES};
use std::cmp::Reverse;
use std::net::IpAddr;
use std::sync::Arc;
use url::{Host, Position, Url};

/// Mode-gated resolver over the static rule table
#[derive(Debug, Clone)]
pub struct RuleEngine {
    mode: Mode,
    mapper: Arc<Mapper>,
}

impl RuleEngine {
    /// Create an engine with a fresh mapper
    pub fn new(mode: Mode) -> Self {
        Self::with_mapper(mode, Arc::new(Mapper::new()))
    }

    /// Create an engine sharing an existing mapper
    pub fn with_mapper(mode: Mode, mapper: Arc<Mapper>) -> Self {
        Self { mode, mapper }
    }

    /// Replace the mapper (construct-then-use; requires exclusive access)
    pub fn set_mapper(&mut self, mapper: Arc<Mapper>) {
        self.mapper = mapper;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mapper(&self) -> &Arc<Mapper> {
        &self.mapper
    }

    /// Rules active in this engine's mode, in table order
    pub fn get_active_rules(&self) -> Vec<&'static Rule> {
        RULES.iter().filter(|r| r.is_active_in(self.mode)).collect()
    }

    /// Active rules of one category
    pub fn get_rules_by_category(&self, category: RuleCategory) -> Vec<&'static Rule> {
        self.active_rules()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Resolve a field name alone against the field-only rules
    pub fn should_redact_field(&self, field_name: &str) -> Option<&'static Rule> {
        if field_name.is_empty() {
            return None;
        }
        by_priority(
            self.active_rules()
                .filter(|r| r.is_field_only() && r.matches_field(field_name)),
        )
        .into_iter()
        .next()
    }

    /// Resolve a (field, value) pair
    ///
    /// Empty values are never redacted. A rule with a value pattern matches
    /// only when the value has that shape, whatever the field name says.
    pub fn should_redact_value(&self, field_name: &str, value: &str) -> Option<&'static Rule> {
        self.candidates(field_name, value).into_iter().next()
    }

    /// Every active rule matching a (field, value) pair, best first
    pub fn candidates(&self, field_name: &str, value: &str) -> Vec<&'static Rule> {
        if value.is_empty() {
            return Vec::new();
        }
        by_priority(self.active_rules().filter(|r| r.matches(field_name, value)))
    }

    /// First candidate whose strategy actually changes the value
    ///
    /// Structural strategies leave loopback, link-local and unspecified
    /// addresses alone; resolution then moves on to the next candidate.
    pub fn resolve(&self, field_name: &str, value: &str) -> Option<(&'static Rule, String)> {
        self.candidates(field_name, value)
            .into_iter()
            .find_map(|rule| {
                let replacement = self.redact_with(rule, value);
                (replacement != value).then_some((rule, replacement))
            })
    }

    /// Redact a value if any active rule changes it, else return it unchanged
    pub fn redact(&self, field_name: &str, value: &str) -> String {
        match self.resolve(field_name, value) {
            Some((_, replacement)) => replacement,
            None => value.to_string(),
        }
    }

    /// Apply a rule's strategy to a value
    pub fn redact_with(&self, rule: &Rule, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }
        let mapper = &self.mapper;
        match rule.strategy {
            Strategy::Fixed(placeholder) => placeholder.to_string(),
            Strategy::PublicIp => mapper.map_public_ip(value),
            Strategy::PrivateIp { preserve_structure } => {
                mapper.map_private_ip(value, preserve_structure)
            }
            Strategy::IpAddress => self
                .map_address(value)
                .unwrap_or_else(|| value.to_string()),
            Strategy::Cidr => self.map_cidr(value).unwrap_or_else(|| value.to_string()),
            Strategy::Endpoint => self.map_endpoint(value),
            Strategy::Url => self.map_url(value).unwrap_or_else(|| value.to_string()),
            Strategy::Hostname => mapper.map_hostname(value),
            Strategy::Username => mapper.map_username(value),
            Strategy::Domain => mapper.map_domain(value),
            Strategy::Mac => mapper.map_mac(value),
            Strategy::Email => mapper.map_email(value),
            Strategy::Generic(category) => mapper.map_generic(category, value),
        }
    }

    fn active_rules(&self) -> impl Iterator<Item = &'static Rule> + '_ {
        RULES.iter().filter(move |r| r.is_active_in(self.mode))
    }

    /// Map an address by its own class; `None` for loopback, link-local,
    /// unspecified or unparseable values
    fn map_address(&self, value: &str) -> Option<String> {
        let ip: IpAddr = value.parse().ok()?;
        if ip.is_unspecified() {
            return None;
        }
        if detector::is_private_ip(value) {
            Some(self.mapper.map_private_ip(value, true))
        } else if detector::is_public_ip(value) {
            Some(self.mapper.map_public_ip(value))
        } else {
            None
        }
    }

    /// `address/prefix`: map the address, keep the prefix
    fn map_cidr(&self, value: &str) -> Option<String> {
        let (address, prefix) = value.split_once('/')?;
        detector::parse_cidr(value)?;
        let mapped = self.map_address(address)?;
        Some(format!("{mapped}/{prefix}"))
    }

    /// `host[:port]` or `[v6]:port`: map the host, keep the port
    fn map_endpoint(&self, value: &str) -> String {
        let (host, port) = split_endpoint(value);
        if host.is_empty() {
            return value.to_string();
        }
        let mapped = if detector::is_ip_address(host) {
            match self.map_address(host) {
                Some(mapped) => mapped,
                None => return value.to_string(),
            }
        } else {
            self.mapper.map_hostname(host)
        };

        match port {
            Some(port) if mapped.contains(':') => format!("[{mapped}]:{port}"),
            Some(port) => format!("{mapped}:{port}"),
            None => mapped,
        }
    }

    /// Drop userinfo and map the host; scheme, port, path and query stay
    fn map_url(&self, value: &str) -> Option<String> {
        let parsed = Url::parse(value).ok()?;
        let host = match parsed.host()? {
            Host::Domain(name) => self.mapper.map_hostname(name),
            Host::Ipv4(ip) => self
                .map_address(&ip.to_string())
                .unwrap_or_else(|| ip.to_string()),
            Host::Ipv6(ip) => {
                let mapped = self
                    .map_address(&ip.to_string())
                    .unwrap_or_else(|| ip.to_string());
                format!("[{mapped}]")
            }
        };
        let port = parsed.port().map(|p| format!(":{p}")).unwrap_or_default();
        Some(format!(
            "{}://{host}{port}{}",
            parsed.scheme(),
            &parsed[Position::BeforePath..]
        ))
    }
}

/// Sort by descending priority; ties keep table order
fn by_priority(candidates: impl Iterator<Item = &'static Rule>) -> Vec<&'static Rule> {
    let mut rules: Vec<_> = candidates.collect();
    rules.sort_by_key(|r| Reverse(r.priority()));
    rules
}

/// Split an endpoint into host and optional numeric port
fn split_endpoint(value: &str) -> (&str, Option<&str>) {
    let is_port = |p: &str| !p.is_empty() && p.len() <= 5 && p.bytes().all(|b| b.is_ascii_digit());

    if let Some(rest) = value.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail.strip_prefix(':').filter(|p| is_port(*p));
            return (host, port);
        }
        return (value, None);
    }
    // A bare IPv6 address has several colons and no port
    if value.matches(':').count() == 1 {
        if let Some((host, port)) = value.split_once(':') {
            if is_port(port) {
                return (host, Some(port));
            }
        }
    }
    (value, None)
}
