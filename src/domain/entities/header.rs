//! Fragment header entity
//!
//! The leading bytes of a fragment and the hex key derived from them.
//! Two fragments belong together exactly when their keys are equal.

use serde::Serialize;
use std::fmt;

/// Number of leading bytes captured per fragment
pub const HEADER_LEN: usize = 8;

/// Number of leading bytes that take part in extension matching
pub const SIGNATURE_PREFIX_LEN: usize = 4;

/// The first up to [`HEADER_LEN`] bytes of a fragment
///
/// Shorter fragments produce shorter headers; an unreadable fragment
/// produces an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Header {
    bytes: Vec<u8>,
}

impl Header {
    /// Creates a header from raw bytes, keeping at most [`HEADER_LEN`] of them
    pub fn new(bytes: &[u8]) -> Self {
        let len = bytes.len().min(HEADER_LEN);
        Self {
            bytes: bytes[..len].to_vec(),
        }
    }

    /// The empty header used for zero-length or unreadable fragments
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the captured bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the prefix used for signature matching
    pub fn signature_prefix(&self) -> &[u8] {
        let len = self.bytes.len().min(SIGNATURE_PREFIX_LEN);
        &self.bytes[..len]
    }

    /// Returns the grouping key for this header
    pub fn key(&self) -> HeaderKey {
        HeaderKey::from_bytes(&self.bytes)
    }
}

/// Uppercase, dash-separated hex form of a header (e.g. `4D-5A-90-00`)
///
/// An empty header maps to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HeaderKey(String);

impl HeaderKey {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(format_dashed_hex(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<empty>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Formats bytes as `AA-BB-CC`
pub fn format_dashed_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode_upper([*b]))
        .collect::<Vec<_>>()
        .join("-")
}

/// Parses `AA-BB-CC` (dashes optional, case-insensitive) back into bytes
pub fn parse_dashed_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let compact: String = text.chars().filter(|c| *c != '-').collect();
    hex::decode(compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_truncates_to_eight_bytes() {
        let header = Header::new(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(header.len(), HEADER_LEN);
        assert_eq!(header.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_signature_prefix_of_short_header() {
        let header = Header::new(&[0xFF, 0xD8]);
        assert_eq!(header.signature_prefix(), &[0xFF, 0xD8]);
        assert_eq!(Header::new(&[1, 2, 3, 4, 5]).signature_prefix(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_key_format() {
        let header = Header::new(&[0x4D, 0x5A, 0x90, 0x00, 0x03, 0x00, 0x00, 0x0a]);
        assert_eq!(header.key().as_str(), "4D-5A-90-00-03-00-00-0A");
    }

    #[test]
    fn test_empty_key() {
        let key = Header::empty().key();
        assert!(key.is_empty());
        assert_eq!(key.as_str(), "");
        assert_eq!(key.to_string(), "<empty>");
    }

    #[test]
    fn test_parse_dashed_hex() {
        assert_eq!(parse_dashed_hex("4D-5a").unwrap(), vec![0x4D, 0x5A]);
        assert_eq!(parse_dashed_hex("").unwrap(), Vec::<u8>::new());
        assert!(parse_dashed_hex("4D-5").is_err());
        assert!(parse_dashed_hex("ZZ").is_err());
    }
}
