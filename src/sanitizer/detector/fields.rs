//! Field-name heuristics
//!
//! Keyword lists describing field names that usually hold secrets. A match
//! is a signal for the rule table, never a redaction decision on its own.

/// Field names that usually carry passwords
pub const PASSWORD_KEYWORDS: &[&str] = &["password", "passwd", "passphrase", "bindpw", "auth_pass"];

/// Field names that usually carry API keys or bearer tokens
pub const API_KEY_KEYWORDS: &[&str] = &[
    "apikey",
    "api_key",
    "api-key",
    "access_token",
    "auth_token",
    "authtoken",
    "bearer",
    "token",
];

/// Field names that usually carry pre-shared keys
pub const PSK_KEYWORDS: &[&str] = &[
    "pre-shared-key",
    "pre_shared_key",
    "presharedkey",
    "preshared",
    "psk",
];

/// Field names that usually carry SNMP community strings
pub const SNMP_COMMUNITY_KEYWORDS: &[&str] = &["rocommunity", "rwcommunity", "community"];

/// Case-insensitive substring match against a keyword list
pub fn contains_any(field_name: &str, keywords: &[&str]) -> bool {
    if field_name.is_empty() {
        return false;
    }
    let lower = field_name.to_ascii_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

/// Field name looks like it holds a password
pub fn is_password_field(field_name: &str) -> bool {
    contains_any(field_name, PASSWORD_KEYWORDS)
}

/// Field name looks like it holds an API key or token
pub fn is_api_key_field(field_name: &str) -> bool {
    contains_any(field_name, API_KEY_KEYWORDS)
}

/// Field name looks like it holds a pre-shared key
pub fn is_psk_field(field_name: &str) -> bool {
    contains_any(field_name, PSK_KEYWORDS)
}

/// Field name looks like it holds an SNMP community string
pub fn is_snmp_community_field(field_name: &str) -> bool {
    contains_any(field_name, SNMP_COMMUNITY_KEYWORDS)
}

/// Any of the secret-bearing heuristics
pub fn looks_like_secret_field(field_name: &str) -> bool {
    is_password_field(field_name)
        || is_api_key_field(field_name)
        || is_psk_field(field_name)
        || is_snmp_community_field(field_name)
}
