#![no_main]

use dossier_sanitizer::sanitizer::detector;
use dossier_sanitizer::sanitizer::{Mode, RuleEngine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Every detector must return a verdict without panicking
    let _ = detector::is_ip_address(text);
    let _ = detector::is_private_ip(text);
    let _ = detector::is_public_ip(text);
    let _ = detector::is_netmask(text);
    let _ = detector::is_cidr(text);
    let _ = detector::is_mac_address(text);
    let _ = detector::is_email(text);
    let _ = detector::is_hostname(text);
    let _ = detector::is_base64(text);
    let _ = detector::is_pem_block(text);
    let _ = detector::is_certificate(text);
    let _ = detector::is_private_key(text);
    let _ = detector::is_aws_access_key(text);

    // Split into field name and value on the first tab
    let (field, value) = text.split_once('\t').unwrap_or(("", text));
    for mode in Mode::all() {
        let engine = RuleEngine::new(mode);
        let _ = engine.redact(field, value);
    }
});
