#![no_main]

use libfuzzer_sys::fuzz_target;
use shardmend::domain::entities::Header;
use shardmend::domain::services::{DuplicatePolicy, SignatureTable};

fuzz_target!(|data: &[u8]| {
    let header = Header::new(data);

    for policy in [DuplicatePolicy::FirstMatch, DuplicatePolicy::LastWins] {
        let table = SignatureTable::builtin(policy);
        let prefix = header.signature_prefix();
        assert_eq!(table.find_entry(prefix), table.find_entry_linear(prefix));
        assert!(table.resolve(&header).starts_with('.'));
    }
});
