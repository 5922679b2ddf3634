//! Redaction rule table
//!
//! The rule set is a fixed, ordered list of plain records built at compile
//! time. Each rule names the field names and/or value shapes it reacts to,
//! the modes it is active in, and how the replacement is produced.
//!
//! # Mode sets
//!
//! Every rule is active in one of three upward-closed sets, which is what
//! keeps the redacted sets nested across modes:
//!
//! - [`ALL_MODES`]: minimal, moderate and aggressive
//! - [`MODERATE_AND_UP`]: moderate and aggressive
//! - [`AGGRESSIVE_ONLY`]

use super::detector::{self, fields};
use super::mode::Mode;
use serde::Serialize;
use std::fmt;

/// Active in every mode
pub const ALL_MODES: &[Mode] = &[Mode::Aggressive, Mode::Moderate, Mode::Minimal];

/// Active in moderate and aggressive modes
pub const MODERATE_AND_UP: &[Mode] = &[Mode::Aggressive, Mode::Moderate];

/// Active in aggressive mode only
pub const AGGRESSIVE_ONLY: &[Mode] = &[Mode::Aggressive];

/// Rule category, used for statistics and introspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Passwords, secrets, tokens, PSKs, community strings
    Credentials,
    /// Addresses, subnets, endpoints, MACs
    Network,
    /// Usernames, emails, hostnames, domains
    Identity,
    /// Keys and certificates
    Crypto,
    /// Hardware and installation identifiers
    System,
    /// Cloud account and tenant identifiers
    Cloud,
}

impl RuleCategory {
    /// Get human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
            Self::Network => "network",
            Self::Identity => "identity",
            Self::Crypto => "crypto",
            Self::System => "system",
            Self::Cloud => "cloud",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a rule matches a field name (always case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMatcher {
    /// Field name contains the keyword
    Contains(&'static str),
    /// Field name contains any keyword of the list
    AnyOf(&'static [&'static str]),
    /// Field name is exactly this token
    Exact(&'static str),
}

impl FieldMatcher {
    /// Match against a field name or context path
    pub fn matches(&self, field_name: &str) -> bool {
        match self {
            Self::Contains(keyword) => field_name.to_ascii_lowercase().contains(keyword),
            Self::AnyOf(keywords) => fields::contains_any(field_name, keywords),
            Self::Exact(token) => field_name.eq_ignore_ascii_case(token),
        }
    }
}

/// Value shape a rule requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePattern {
    /// Private or public address (not loopback/link-local)
    RoutableIp,
    /// RFC 1918 / unique-local address
    PrivateIp,
    /// Public address that is not a netmask
    PublicIp,
    /// `address/prefix`
    Cidr,
    /// MAC address
    Mac,
    /// Email address
    Email,
    /// Dotted host name that is not an address
    Hostname,
    /// Any non-empty value that is not an IP address
    NonIp,
    /// Any non-empty value
    NonEmpty,
    /// Base64 blob of at least 40 characters
    Base64,
    /// PEM (or base64-wrapped PEM) private key
    PrivateKey,
    /// PEM (or base64-wrapped PEM) certificate
    Certificate,
    /// AWS-style access key identifier
    CloudAccessKey,
    /// Absolute URL with a host
    Url,
}

impl ValuePattern {
    /// Evaluate the detector behind this pattern
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::RoutableIp => detector::is_routable_ip(value) && !detector::is_netmask(value),
            Self::PrivateIp => detector::is_private_ip(value),
            Self::PublicIp => detector::is_public_ip(value) && !detector::is_netmask(value),
            Self::Cidr => detector::is_cidr(value),
            Self::Mac => detector::is_mac_address(value),
            Self::Email => detector::is_email(value),
            Self::Hostname => detector::is_hostname(value),
            Self::NonIp => !value.is_empty() && !detector::is_ip_address(value),
            Self::NonEmpty => !value.is_empty(),
            Self::Base64 => detector::is_base64(value),
            Self::PrivateKey => detector::is_private_key(value),
            Self::Certificate => detector::is_certificate(value),
            Self::CloudAccessKey => detector::is_aws_access_key(value),
            Self::Url => is_url_with_host(value),
        }
    }
}

/// Replacement strategy applied when a rule wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Constant placeholder
    Fixed(&'static str),
    /// `[REDACTED-PUBLIC-IP-<n>]`
    PublicIp,
    /// Private address mapping
    PrivateIp {
        /// Keep the first two octets
        preserve_structure: bool,
    },
    /// Private or public mapping chosen by the address itself
    IpAddress,
    /// Map the address and keep `/prefix`
    Cidr,
    /// Map the host of `host[:port]` and keep the port
    Endpoint,
    /// Drop credentials and map the host of a URL, keeping the rest
    Url,
    /// `host-<n>.example.com`
    Hostname,
    /// `user-<n>`
    Username,
    /// `example.com`, `example<n>.com`
    Domain,
    /// `XX:XX:XX:XX:XX:<n>`
    Mac,
    /// `user<n>@example.com`
    Email,
    /// `[<CATEGORY>-REDACTED]`
    Generic(&'static str),
}

/// A single redaction policy unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Unique rule name, used in statistics
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Category for statistics and selective listing
    pub category: RuleCategory,
    /// Field-name matchers; empty for pure value-shape rules
    pub field_matchers: &'static [FieldMatcher],
    /// Value shape required whenever this rule matches
    pub value_pattern: Option<ValuePattern>,
    /// Modes in which the rule is active
    pub modes: &'static [Mode],
    /// Replacement strategy
    pub strategy: Strategy,
}

impl Rule {
    /// Check whether the rule is active in a mode
    pub fn is_active_in(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }

    /// Rule keyed on field names only (no value requirement)
    pub fn is_field_only(&self) -> bool {
        !self.field_matchers.is_empty() && self.value_pattern.is_none()
    }

    /// Rule keyed on value shape only
    pub fn is_value_only(&self) -> bool {
        self.field_matchers.is_empty() && self.value_pattern.is_some()
    }

    /// Check the field name against this rule's matchers
    pub fn matches_field(&self, field_name: &str) -> bool {
        self.field_matchers.iter().any(|m| m.matches(field_name))
    }

    /// Evaluate the rule against a (field, value) pair
    ///
    /// A value pattern, when present, must always pass. Field matchers,
    /// when present, must match as well.
    pub fn matches(&self, field_name: &str, value: &str) -> bool {
        if let Some(pattern) = self.value_pattern {
            if !pattern.matches(value) {
                return false;
            }
        }
        self.field_matchers.is_empty() || self.matches_field(field_name)
    }

    /// Resolution priority; higher wins
    ///
    /// Credential and crypto rules come first, then pure value-shape rules,
    /// then field rules gated by a value shape, then rules implied by the
    /// field name alone.
    pub fn priority(&self) -> u8 {
        match self.category {
            RuleCategory::Credentials | RuleCategory::Crypto => 3,
            _ if self.is_value_only() => 2,
            _ if self.value_pattern.is_some() => 1,
            _ => 0,
        }
    }
}

/// Field names holding symmetric key material
const KEY_MATERIAL_KEYWORDS: &[&str] = &[
    "tlskey",
    "tls_key",
    "statickey",
    "static_key",
    "shared_key",
    "sharedkey",
    "authkey",
    "auth_key",
];

fn is_url_with_host(value: &str) -> bool {
    if !value.contains("://") {
        return false;
    }
    url::Url::parse(value)
        .map(|parsed| parsed.host_str().is_some_and(|host| !host.is_empty()))
        .unwrap_or(false)
}

/// Built-in rule table, in evaluation order
pub static RULES: &[Rule] = &[
    // --- Credentials (every mode) ---
    Rule {
        name: "password",
        description: "User, service and bind passwords",
        category: RuleCategory::Credentials,
        field_matchers: &[FieldMatcher::AnyOf(fields::PASSWORD_KEYWORDS)],
        value_pattern: None,
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-PASSWORD]"),
    },
    Rule {
        name: "secret",
        description: "Shared secrets and client secrets",
        category: RuleCategory::Credentials,
        field_matchers: &[FieldMatcher::Contains("secret")],
        value_pattern: None,
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-SECRET]"),
    },
    Rule {
        name: "pre_shared_key",
        description: "IPsec, WireGuard and OpenVPN pre-shared keys",
        category: RuleCategory::Credentials,
        field_matchers: &[FieldMatcher::AnyOf(fields::PSK_KEYWORDS)],
        value_pattern: None,
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-PSK]"),
    },
    Rule {
        name: "snmp_community",
        description: "SNMP community strings",
        category: RuleCategory::Credentials,
        field_matchers: &[FieldMatcher::AnyOf(fields::SNMP_COMMUNITY_KEYWORDS)],
        value_pattern: None,
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-SNMP-COMMUNITY]"),
    },
    Rule {
        name: "api_key",
        description: "API keys and bearer tokens",
        category: RuleCategory::Credentials,
        field_matchers: &[
            FieldMatcher::AnyOf(fields::API_KEY_KEYWORDS),
            FieldMatcher::Exact("key"),
        ],
        value_pattern: None,
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-API-KEY]"),
    },
    Rule {
        name: "otp_seed",
        description: "TOTP/OTP seeds",
        category: RuleCategory::Credentials,
        field_matchers: &[
            FieldMatcher::Contains("otp_seed"),
            FieldMatcher::Contains("otpseed"),
            FieldMatcher::Contains("totp"),
        ],
        value_pattern: None,
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-OTP-SEED]"),
    },
    Rule {
        name: "cloud_access_key",
        description: "AWS-style access key identifiers in any field",
        category: RuleCategory::Credentials,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::CloudAccessKey),
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-ACCESS-KEY]"),
    },
    // --- Crypto (every mode, except public material) ---
    Rule {
        name: "private_key_pem",
        description: "PEM private keys in any field",
        category: RuleCategory::Crypto,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::PrivateKey),
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-PRIVATE-KEY]"),
    },
    Rule {
        name: "private_key_field",
        description: "Fields holding private keys (certificate store, WireGuard)",
        category: RuleCategory::Crypto,
        field_matchers: &[
            FieldMatcher::Exact("prv"),
            FieldMatcher::Contains("private_key"),
            FieldMatcher::Contains("privatekey"),
            FieldMatcher::Contains("private-key"),
            FieldMatcher::Contains("privkey"),
        ],
        value_pattern: None,
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-PRIVATE-KEY]"),
    },
    Rule {
        name: "key_material",
        description: "Base64 key blobs (TLS auth keys, static keys)",
        category: RuleCategory::Crypto,
        field_matchers: &[FieldMatcher::AnyOf(KEY_MATERIAL_KEYWORDS)],
        value_pattern: Some(ValuePattern::Base64),
        modes: ALL_MODES,
        strategy: Strategy::Fixed("[REDACTED-KEY-MATERIAL]"),
    },
    Rule {
        name: "certificate_pem",
        description: "PEM certificates in any field",
        category: RuleCategory::Crypto,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::Certificate),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::Fixed("[REDACTED-CERTIFICATE]"),
    },
    Rule {
        name: "certificate_field",
        description: "Certificate store entries",
        category: RuleCategory::Crypto,
        field_matchers: &[FieldMatcher::Exact("crt"), FieldMatcher::Exact("cert")],
        value_pattern: Some(ValuePattern::NonEmpty),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::Fixed("[REDACTED-CERTIFICATE]"),
    },
    Rule {
        name: "public_key",
        description: "WireGuard and SSH public keys",
        category: RuleCategory::Crypto,
        field_matchers: &[
            FieldMatcher::Contains("public_key"),
            FieldMatcher::Contains("publickey"),
            FieldMatcher::Contains("pubkey"),
            FieldMatcher::Contains("authorizedkeys"),
        ],
        value_pattern: Some(ValuePattern::NonEmpty),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::Fixed("[REDACTED-PUBLIC-KEY]"),
    },
    // --- System identifiers (every mode) ---
    Rule {
        name: "system_identifier",
        description: "Serial numbers and hardware/machine identifiers",
        category: RuleCategory::System,
        field_matchers: &[
            FieldMatcher::Contains("serial_number"),
            FieldMatcher::Contains("serialnumber"),
            FieldMatcher::Contains("hardware_id"),
            FieldMatcher::Contains("hwid"),
            FieldMatcher::Contains("machine_id"),
            FieldMatcher::Contains("machineid"),
        ],
        value_pattern: None,
        modes: ALL_MODES,
        strategy: Strategy::Generic("SYSTEM-ID"),
    },
    // --- Public exposure network data (moderate and up) ---
    Rule {
        name: "public_ip",
        description: "Public IPv4/IPv6 addresses in any field",
        category: RuleCategory::Network,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::PublicIp),
        modes: MODERATE_AND_UP,
        strategy: Strategy::PublicIp,
    },
    Rule {
        name: "mac_address",
        description: "MAC addresses in any field",
        category: RuleCategory::Network,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::Mac),
        modes: MODERATE_AND_UP,
        strategy: Strategy::Mac,
    },
    // --- Identity (moderate and up) ---
    Rule {
        name: "email",
        description: "Email addresses in any field",
        category: RuleCategory::Identity,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::Email),
        modes: MODERATE_AND_UP,
        strategy: Strategy::Email,
    },
    Rule {
        name: "username",
        description: "Account and login names",
        category: RuleCategory::Identity,
        field_matchers: &[
            FieldMatcher::Contains("username"),
            FieldMatcher::Contains("user_name"),
            FieldMatcher::Contains("user.name"),
            FieldMatcher::Exact("user"),
            FieldMatcher::Exact("login"),
            FieldMatcher::Exact("binddn"),
        ],
        value_pattern: Some(ValuePattern::NonEmpty),
        modes: MODERATE_AND_UP,
        strategy: Strategy::Username,
    },
    Rule {
        name: "hostname",
        description: "Host name fields (address values are left to the IP rules)",
        category: RuleCategory::Identity,
        field_matchers: &[FieldMatcher::Contains("hostname"), FieldMatcher::Exact("fqdn")],
        value_pattern: Some(ValuePattern::NonIp),
        modes: MODERATE_AND_UP,
        strategy: Strategy::Hostname,
    },
    Rule {
        name: "domain",
        description: "DNS domain and search-domain fields",
        category: RuleCategory::Identity,
        field_matchers: &[
            FieldMatcher::Exact("domain"),
            FieldMatcher::Contains("domainname"),
            FieldMatcher::Contains("searchdomain"),
            FieldMatcher::Contains("domain_name"),
        ],
        value_pattern: Some(ValuePattern::NonIp),
        modes: MODERATE_AND_UP,
        strategy: Strategy::Domain,
    },
    // --- Cloud identifiers (moderate and up) ---
    Rule {
        name: "cloud_identifier",
        description: "Cloud account, tenant and subscription identifiers",
        category: RuleCategory::Cloud,
        field_matchers: &[
            FieldMatcher::Contains("account_id"),
            FieldMatcher::Contains("accountid"),
            FieldMatcher::Contains("tenant_id"),
            FieldMatcher::Contains("tenantid"),
            FieldMatcher::Contains("subscription_id"),
            FieldMatcher::Contains("client_id"),
            FieldMatcher::Contains("project_id"),
        ],
        value_pattern: Some(ValuePattern::NonEmpty),
        modes: MODERATE_AND_UP,
        strategy: Strategy::Generic("CLOUD-ID"),
    },
    // --- Internal topology (aggressive only) ---
    Rule {
        name: "subnet",
        description: "Subnet fields holding CIDR notation",
        category: RuleCategory::Network,
        field_matchers: &[FieldMatcher::Exact("subnet"), FieldMatcher::Exact("network")],
        value_pattern: Some(ValuePattern::Cidr),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::Cidr,
    },
    Rule {
        name: "cidr",
        description: "CIDR subnets in any field",
        category: RuleCategory::Network,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::Cidr),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::Cidr,
    },
    Rule {
        name: "rule_endpoint_address",
        description: "Rule source/destination addresses",
        category: RuleCategory::Network,
        field_matchers: &[FieldMatcher::Exact("from"), FieldMatcher::Exact("to")],
        value_pattern: Some(ValuePattern::RoutableIp),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::IpAddress,
    },
    Rule {
        name: "private_ip",
        description: "Private IPv4/IPv6 addresses in any field",
        category: RuleCategory::Network,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::PrivateIp),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::PrivateIp {
            preserve_structure: true,
        },
    },
    Rule {
        name: "endpoint",
        description: "Tunnel and peer endpoints (host[:port])",
        category: RuleCategory::Network,
        field_matchers: &[FieldMatcher::Contains("endpoint")],
        value_pattern: Some(ValuePattern::NonEmpty),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::Endpoint,
    },
    Rule {
        name: "url",
        description: "URLs with embedded hosts or credentials",
        category: RuleCategory::Network,
        field_matchers: &[],
        value_pattern: Some(ValuePattern::Url),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::Url,
    },
    Rule {
        name: "network_host",
        description: "Host names in server/host/gateway fields",
        category: RuleCategory::Network,
        field_matchers: &[
            FieldMatcher::Contains("host"),
            FieldMatcher::Contains("server"),
            FieldMatcher::Contains("gateway"),
            FieldMatcher::Contains("remote"),
            FieldMatcher::Contains("peer"),
        ],
        value_pattern: Some(ValuePattern::Hostname),
        modes: AGGRESSIVE_ONLY,
        strategy: Strategy::Hostname,
    },
];
