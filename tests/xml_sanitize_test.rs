//! Integration tests for XML document sanitization

use dossier_sanitizer::domain::SanitizerError;
use dossier_sanitizer::sanitizer::{Mode, Sanitizer};

const FIREWALL_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<opnsense>
  <system>
    <hostname>fw01</hostname>
    <domain>corp.example.org</domain>
    <user>
      <name>root</name>
      <password>$2y$10$abcdefghijk</password>
    </user>
    <dnsserver>9.9.9.9</dnsserver>
  </system>
  <interfaces>
    <wan>
      <ipaddr>8.8.4.4</ipaddr>
      <subnet>24</subnet>
      <netmask>255.255.255.0</netmask>
    </wan>
    <lan>
      <ipaddr>192.168.1.1</ipaddr>
      <subnet>24</subnet>
    </lan>
  </interfaces>
</opnsense>
"#;

fn sanitize(mode: Mode, input: &str) -> (String, Sanitizer) {
    let mut sanitizer = Sanitizer::new(mode);
    let mut output = Vec::new();
    sanitizer
        .sanitize_xml(input.as_bytes(), &mut output)
        .expect("sanitization succeeds");
    (String::from_utf8(output).unwrap(), sanitizer)
}

#[test]
fn test_gateway_public_ip_is_redacted() {
    let (output, _) = sanitize(Mode::Aggressive, "<config><gateway>8.8.8.8</gateway></config>");
    assert_eq!(output, "<config><gateway>[REDACTED-PUBLIC-IP-1]</gateway></config>");
    assert!(!output.contains("8.8.8.8"));
}

#[test]
fn test_minimal_mode_only_touches_credentials() {
    let (output, sanitizer) = sanitize(Mode::Minimal, FIREWALL_CONFIG);

    assert!(output.contains("<password>[REDACTED-PASSWORD]</password>"));
    assert!(output.contains("<hostname>fw01</hostname>"));
    assert!(output.contains("<name>root</name>"));
    assert!(output.contains("<ipaddr>8.8.4.4</ipaddr>"));
    assert!(output.contains("<ipaddr>192.168.1.1</ipaddr>"));

    let stats = sanitizer.stats();
    assert_eq!(stats.redacted_fields, 1);
    assert_eq!(stats.count_for("password"), 1);
}

#[test]
fn test_moderate_mode_maps_identities_and_public_addresses() {
    let (output, sanitizer) = sanitize(Mode::Moderate, FIREWALL_CONFIG);

    assert!(output.contains("<hostname>host-001.example.com</hostname>"));
    assert!(output.contains("<domain>example.com</domain>"));
    assert!(output.contains("<name>user-001</name>"));
    assert!(output.contains("<dnsserver>[REDACTED-PUBLIC-IP-1]</dnsserver>"));
    assert!(output.contains("<ipaddr>[REDACTED-PUBLIC-IP-2]</ipaddr>"));
    // Internal topology survives moderate mode
    assert!(output.contains("<ipaddr>192.168.1.1</ipaddr>"));

    let report = sanitizer.mapping_report();
    assert_eq!(report.mode, Mode::Moderate);
    assert_eq!(report.mappings.hostnames["fw01"], "host-001.example.com");
    assert_eq!(report.mappings.usernames["root"], "user-001");
    assert_eq!(report.mappings.ip_addresses["9.9.9.9"], "[REDACTED-PUBLIC-IP-1]");
}

#[test]
fn test_aggressive_mode_maps_private_addresses() {
    let (output, _) = sanitize(Mode::Aggressive, FIREWALL_CONFIG);
    assert!(output.contains("<ipaddr>192.168.X.1</ipaddr>"));
}

#[test]
fn test_netmask_is_never_redacted() {
    for mode in Mode::all() {
        let (output, _) = sanitize(mode, FIREWALL_CONFIG);
        assert!(
            output.contains("<netmask>255.255.255.0</netmask>"),
            "netmask changed in {mode} mode"
        );
        assert!(output.contains("<subnet>24</subnet>"));
    }
}

#[test]
fn test_email_in_hostname_field_is_mapped_as_email() {
    let (output, _) = sanitize(
        Mode::Moderate,
        "<system><hostname>admin@company.com</hostname></system>",
    );
    assert_eq!(output, "<system><hostname>user1@example.com</hostname></system>");
}

#[test]
fn test_repeated_values_share_one_pseudonym() {
    let input = "<dns><server>1.1.1.1</server><server>1.0.0.1</server><fallback>1.1.1.1</fallback></dns>";
    let (output, sanitizer) = sanitize(Mode::Moderate, input);
    assert_eq!(
        output,
        "<dns><server>[REDACTED-PUBLIC-IP-1]</server><server>[REDACTED-PUBLIC-IP-2]</server><fallback>[REDACTED-PUBLIC-IP-1]</fallback></dns>"
    );
    assert_eq!(sanitizer.mapping_report().mappings.ip_addresses.len(), 2);
}

#[test]
fn test_document_without_sensitive_content_is_unchanged() {
    let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- exported by the backup job -->\n<opnsense version=\"1.0\">\n  <theme>opnsense</theme>\n  <empty/>\n  <?render keep?>\n</opnsense>\n";
    let (output, sanitizer) = sanitize(Mode::Aggressive, input);
    assert_eq!(output, input);
    assert_eq!(sanitizer.stats().redacted_fields, 0);
}

#[test]
fn test_attribute_values_are_sanitized() {
    let input = r#"<wireguard><peer endpoint="198.51.100.7:51820" name="site-b"/></wireguard>"#;
    let (output, _) = sanitize(Mode::Aggressive, input);
    assert!(output.contains(r#"endpoint="[REDACTED-PUBLIC-IP-1]:51820""#));
    assert!(output.contains(r#"name="site-b""#));
    assert!(output.starts_with("<wireguard><peer "));
    assert!(output.ends_with("/></wireguard>"));
}

#[test]
fn test_secrets_in_comments_are_redacted() {
    let input = "<config><!-- old gateway was 8.8.8.8, contact admin@corp.com --></config>";
    let (output, _) = sanitize(Mode::Moderate, input);
    assert_eq!(
        output,
        "<config><!-- old gateway was [REDACTED-PUBLIC-IP-1], contact user1@example.com --></config>"
    );
}

#[test]
fn test_stats_balance() {
    let (_, sanitizer) = sanitize(Mode::Aggressive, FIREWALL_CONFIG);
    let stats = sanitizer.stats();
    assert!(stats.total_fields > 0);
    assert_eq!(stats.total_fields, stats.redacted_fields + stats.skipped_fields);
    let per_rule: u64 = stats.rules_applied.values().sum();
    assert_eq!(per_rule, stats.redacted_fields);
}

#[test]
fn test_unrecoverable_structure_error() {
    let mut sanitizer = Sanitizer::new(Mode::Aggressive);
    let mut output = Vec::new();
    let result = sanitizer.sanitize_xml("<config><!-- never closed".as_bytes(), &mut output);

    assert!(matches!(result, Err(SanitizerError::Parse { .. })));
    assert!(output.is_empty());
}

#[test]
fn test_mismatched_end_tag_is_tolerated() {
    let (output, _) = sanitize(Mode::Minimal, "<a><password>x</password></b>");
    assert_eq!(output, "<a><password>[REDACTED-PASSWORD]</password></b>");
}

#[test]
fn test_empty_document() {
    let (output, sanitizer) = sanitize(Mode::Aggressive, "");
    assert!(output.is_empty());
    assert_eq!(sanitizer.stats().total_fields, 0);
}
