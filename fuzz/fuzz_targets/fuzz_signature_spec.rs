#![no_main]

use libfuzzer_sys::fuzz_target;
use shardmend::domain::services::SignatureEntry;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(entry) = SignatureEntry::parse_spec(text) {
            assert!(!entry.pattern().is_empty());
            assert!(entry.extension().starts_with('.'));
        }
    }
});
