#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the heuristic strategy by wrapping input in an `item` container,
/// so attribute and child-element field collection is always reached.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let doc = format!("<bom><item ref=\"R1\">{s}</item></bom>");
        let _ = bom_diff::parsers::parse_bom_str(&doc);
    }
});
