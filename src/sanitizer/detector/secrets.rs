//! Cryptographic material and opaque secret classifiers

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

static PEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)-----BEGIN ([A-Z0-9 ]{1,64})-----.*?-----END ([A-Z0-9 ]{1,64})-----")
        .expect("PEM regex is valid")
});

static BASE64_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").expect("base64 regex is valid"));

static AWS_ACCESS_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:AKIA|ASIA)[0-9A-Z]{16}$").expect("access key regex is valid"));

const MIN_BASE64_LEN: usize = 40;

/// Opaque base64 blob: at least 40 characters of the base64 alphabet,
/// optionally `=` padded
///
/// Padding is not required, so unpadded key files still count.
pub fn is_base64(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.len() >= MIN_BASE64_LEN && BASE64_REGEX.is_match(trimmed)
}

/// Any `-----BEGIN X-----...-----END X-----` block
pub fn is_pem_block(value: &str) -> bool {
    has_pem_label(value, |_| true)
}

/// PEM block whose label contains `CERTIFICATE`
///
/// Base64-wrapped PEM (as stored in OPNsense `<crt>` elements) is unwrapped first.
pub fn is_certificate(value: &str) -> bool {
    has_pem_label(value, |label| label.contains("CERTIFICATE"))
}

/// PEM block whose label contains `PRIVATE KEY`
///
/// Base64-wrapped PEM (as stored in OPNsense `<prv>` elements) is unwrapped first.
pub fn is_private_key(value: &str) -> bool {
    has_pem_label(value, |label| label.contains("PRIVATE KEY"))
}

/// AWS-style access key identifier (`AKIA…` / `ASIA…`)
pub fn is_aws_access_key(value: &str) -> bool {
    value.len() == 20 && AWS_ACCESS_KEY_REGEX.is_match(value)
}

fn has_pem_label(value: &str, accept: impl Fn(&str) -> bool) -> bool {
    if pem_labels_match(value, &accept) {
        return true;
    }
    match unwrap_base64_pem(value) {
        Some(decoded) => pem_labels_match(&decoded, &accept),
        None => false,
    }
}

fn pem_labels_match(text: &str, accept: &impl Fn(&str) -> bool) -> bool {
    if !text.contains("-----BEGIN ") {
        return false;
    }
    PEM_REGEX.captures_iter(text).any(|caps| {
        let begin = caps.get(1).map_or("", |m| m.as_str());
        let end = caps.get(2).map_or("", |m| m.as_str());
        begin == end && accept(begin)
    })
}

fn unwrap_base64_pem(value: &str) -> Option<String> {
    if !is_base64(value) {
        return None;
    }
    let bytes = STANDARD.decode(value.trim()).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    text.contains("-----BEGIN ").then_some(text)
}
