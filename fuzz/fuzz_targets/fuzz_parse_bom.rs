#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the main BOM parsing entry point.
///
/// Feeds arbitrary UTF-8 strings to `parse_bom_str`, which builds the XML
/// tree, runs the strategy cascade and expands designators.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = bom_diff::parsers::parse_bom_str(s);
    }
});
