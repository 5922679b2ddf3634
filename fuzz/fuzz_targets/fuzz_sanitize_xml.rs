#![no_main]

use dossier_sanitizer::sanitizer::{Mode, Sanitizer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the mode, the rest is the document
    let Some((selector, document)) = data.split_first() else {
        return;
    };
    let mode = Mode::all()[usize::from(*selector) % 3];

    let mut sanitizer = Sanitizer::new(mode);
    let mut output = Vec::new();
    if sanitizer.sanitize_xml(document, &mut output).is_err() {
        assert!(output.is_empty());
    }

    let stats = sanitizer.stats();
    assert_eq!(stats.total_fields, stats.redacted_fields + stats.skipped_fields);
});
