//! Domain layer unit tests
//!
//! Tests for headers, the signature table and grouping.

use rstest::*;
use shardmend::domain::entities::{GroupSet, Header, HeaderKey};
use shardmend::domain::services::{DuplicatePolicy, SignatureEntry, SignatureTable};
use std::path::PathBuf;

// ============================================================================
// Signature Table Tests
// ============================================================================

#[fixture]
fn table() -> SignatureTable {
    SignatureTable::default()
}

#[rstest]
#[case(&[0x4D, 0x5A, 0x90, 0x00, 0x03, 0x00, 0x00, 0x00], ".exe")]
#[case(&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x08, 0x00], ".zip")]
#[case(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], ".png")]
#[case(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46], ".jpg")]
#[case(&[0x42, 0x4D, 0x36, 0x00, 0x0C, 0x00, 0x00, 0x00], ".bmp")]
#[case(&[0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00], ".gif")]
#[case(&[0x25, 0x50, 0x44, 0x46, 0x2D, 0x31, 0x2E, 0x37], ".pdf")]
#[case(&[0x49, 0x44, 0x33, 0x04, 0x00, 0x00, 0x00, 0x00], ".mp3")]
#[case(&[0x23, 0x21, 0x2F, 0x62, 0x69, 0x6E, 0x2F, 0x73], ".sh")]
#[case(&[0x7B, 0x22, 0x6B, 0x65, 0x79, 0x22, 0x3A, 0x20], ".json")]
#[case(&[0x7B, 0x5C, 0x72, 0x74, 0x66, 0x31, 0x5C, 0x61], ".rtf")]
#[case(&[0x00, 0x00, 0x01, 0xBA, 0x44, 0x00, 0x04, 0x00], ".mpg")]
#[case(&[0x00, 0x00, 0x01, 0xB3, 0x14, 0x00, 0xF0, 0x13], ".mpg")]
#[case(&[0x00, 0x01, 0x00, 0x00, 0x01, 0x00, 0x10, 0x10], ".ico")]
#[case(&[0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00], ".gz")]
#[case(&[0x1A, 0x45, 0xDF, 0xA3, 0x01, 0x00, 0x00, 0x00], ".mkv")]
#[case(&[0x55, 0x74, 0x66, 0x38, 0x00, 0x00, 0x00, 0x00], ".txt")]
#[case(&[0xEF, 0xBB, 0xBF, 0x68, 0x65, 0x6C, 0x6C, 0x6F], ".txt")]
#[case(&[0x2E, 0x70, 0x61, 0x6B, 0x00, 0x00, 0x00, 0x00], ".pak")]
#[case(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x00, 0x00, 0x00], ".bin")]
#[case(&[], ".bin")]
fn test_resolve_builtin(table: SignatureTable, #[case] header: &[u8], #[case] expected: &str) {
    assert_eq!(table.resolve(&Header::new(header)), expected);
}

#[rstest]
#[case(DuplicatePolicy::FirstMatch, ".exe", ".mkv")]
#[case(DuplicatePolicy::LastWins, ".dll", ".webm")]
fn test_duplicate_policy(
    #[case] policy: DuplicatePolicy,
    #[case] mz: &str,
    #[case] ebml: &str,
) {
    let table = SignatureTable::builtin(policy);
    assert_eq!(table.resolve(&Header::new(&[0x4D, 0x5A, 0x00, 0x00])), mz);
    assert_eq!(table.resolve(&Header::new(&[0x1A, 0x45, 0xDF, 0xA3])), ebml);
}

#[rstest]
fn test_declaration_order_decides(#[values(true, false)] short_first: bool) {
    let short = SignatureEntry::parse("AB", ".short").unwrap();
    let long = SignatureEntry::parse("AB-CD", ".long").unwrap();
    let entries = if short_first {
        vec![short, long]
    } else {
        vec![long, short]
    };
    let table = SignatureTable::from_entries(entries, DuplicatePolicy::FirstMatch);

    let resolved = table.resolve(&Header::new(&[0xAB, 0xCD, 0x00, 0x00]));
    assert_eq!(resolved, if short_first { ".short" } else { ".long" });

    // The long pattern cannot match a header that stops after AB
    assert_eq!(table.resolve(&Header::new(&[0xAB])), ".short");
}

#[rstest]
fn test_bytes_beyond_four_are_ignored(table: SignatureTable) {
    let a = Header::new(&[0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00]);
    let b = Header::new(&[0x52, 0x49, 0x46, 0x46, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_ne!(a.key(), b.key());
    assert_eq!(table.resolve(&a), table.resolve(&b));
    assert_eq!(table.resolve(&a), ".avi");
}

// ============================================================================
// Header Key / Group Tests
// ============================================================================

#[rstest]
#[case(&[0x00], "00")]
#[case(&[0xAB, 0xCD], "AB-CD")]
#[case(&[1, 2, 3, 4, 5, 6, 7, 8], "01-02-03-04-05-06-07-08")]
fn test_header_key(#[case] bytes: &[u8], #[case] expected: &str) {
    assert_eq!(HeaderKey::from_bytes(bytes).as_str(), expected);
}

#[rstest]
fn test_short_headers_differ_from_zero_padded() {
    // A 2-byte fragment is not the same as one padded with zeros
    let short = Header::new(&[0x4D, 0x5A]);
    let padded = Header::new(&[0x4D, 0x5A, 0, 0, 0, 0, 0, 0]);
    assert_ne!(short.key(), padded.key());

    let mut groups = GroupSet::new();
    groups.insert(short, PathBuf::from("a"));
    groups.insert(padded, PathBuf::from("b"));
    assert_eq!(groups.len(), 2);
}
