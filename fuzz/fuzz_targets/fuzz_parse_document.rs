#![no_main]
use deep_compare::cli::{parse_document, DocumentFormat};
use libfuzzer_sys::fuzz_target;

/// Fuzz document loading with sniffed and forced formats.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_document(s, DocumentFormat::sniff(s));
        let _ = parse_document(s, DocumentFormat::Json);
        let _ = parse_document(s, DocumentFormat::Yaml);
    }
});
