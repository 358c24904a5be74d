//! Signature table service
//!
//! Ordered list of byte-prefix signatures used to guess an extension for
//! a reconstructed file. Order is significant: the earliest matching entry
//! wins, so two formats sharing a prefix are told apart only by position.
//!
//! Lookups use an anchored leftmost-first Aho-Corasick automaton, which
//! reports the earliest-declared pattern among those matching at offset 0.

use crate::domain::entities::{format_dashed_hex, parse_dashed_hex, Header};
use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use std::fmt;
use thiserror::Error;

/// Extension used when no signature matches
pub const DEFAULT_EXTENSION: &str = ".bin";

/// Built-in signatures, in resolution order
const BUILTIN_SIGNATURES: &[(&[u8], &str)] = &[
    (&[0x4D, 0x5A], ".exe"),
    (&[0x4D, 0x5A], ".dll"),
    (&[0x50, 0x4B, 0x03, 0x04], ".zip"),
    // Never reachable: longer than the matched prefix
    (&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x08, 0x00], ".docx"),
    (&[0x89, 0x50, 0x4E, 0x47], ".png"),
    (&[0xFF, 0xD8, 0xFF], ".jpg"),
    (&[0x42, 0x4D], ".bmp"),
    (&[0x47, 0x49, 0x46, 0x38], ".gif"),
    (&[0x25, 0x50, 0x44, 0x46], ".pdf"),
    (&[0x49, 0x44, 0x33], ".mp3"),
    (&[0x23, 0x21, 0x2F], ".sh"),
    (&[0x7B, 0x22], ".json"),
    (&[0x4F, 0x67, 0x67, 0x53], ".ogg"),
    (&[0x66, 0x4C, 0x61, 0x43], ".flac"),
    (&[0x00, 0x00, 0x01, 0xBA], ".mpg"),
    (&[0x00, 0x00, 0x01, 0xB3], ".mpg"),
    (&[0x1F, 0x8B, 0x08], ".gz"),
    (&[0x52, 0x49, 0x46, 0x46], ".avi"),
    (&[0x30, 0x26, 0xB2, 0x75], ".wmv"),
    (&[0x52, 0x61, 0x72, 0x21], ".rar"),
    (&[0xD0, 0xCF, 0x11, 0xE0], ".doc"),
    (&[0x46, 0x4F, 0x52, 0x4D], ".iff"),
    (&[0x4D, 0x54, 0x68, 0x64], ".mid"),
    (&[0x00, 0x01, 0x00, 0x00], ".ico"),
    (&[0x49, 0x49, 0x2A, 0x00], ".tiff"),
    (&[0xEF, 0xBB, 0xBF], ".txt"),
    (&[0x3C, 0x21, 0x44, 0x4F], ".html"),
    (&[0x1A, 0x45, 0xDF, 0xA3], ".mkv"),
    (&[0x1A, 0x45, 0xDF, 0xA3], ".webm"),
    (&[0x66, 0x74, 0x79, 0x70], ".mp4"),
    (&[0x47, 0x4C, 0x54, 0x32], ".dat"),
    (&[0x76, 0x65, 0x72, 0x73], ".version"),
    (&[0x75, 0x65, 0x70, 0x72], ".ueproj"),
    (&[0x7B, 0x5C, 0x72, 0x74], ".rtf"),
    (&[0x4D, 0x44, 0x4D, 0x50], ".pdb"),
    (&[0x55, 0x74, 0x66, 0x38], ".txt"),
    (&[0x2E, 0x70, 0x61, 0x6B], ".pak"),
];

/// Errors raised while building a signature table
#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Invalid signature pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Empty signature pattern for extension '{0}'")]
    EmptyPattern(String),

    #[error("Extension '{0}' must start with '.'")]
    InvalidExtension(String),

    #[error("Expected PATTERN=EXTENSION, got '{0}'")]
    MalformedSpec(String),
}

/// How entries sharing a pattern are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Every entry is kept; the first declaration of a pattern wins
    #[default]
    FirstMatch,
    /// Entries are unique by pattern; a repeated pattern keeps the position
    /// of its first declaration and the extension of its last
    LastWins,
}

/// A byte prefix and the extension it implies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEntry {
    pattern: Vec<u8>,
    extension: String,
}

impl SignatureEntry {
    /// Creates an entry from raw bytes
    pub fn new(pattern: Vec<u8>, extension: impl Into<String>) -> Result<Self, SignatureError> {
        let extension = extension.into();
        if !extension.starts_with('.') {
            return Err(SignatureError::InvalidExtension(extension));
        }
        if pattern.is_empty() {
            return Err(SignatureError::EmptyPattern(extension));
        }
        Ok(Self { pattern, extension })
    }

    /// Creates an entry from dashed hex notation, e.g. `("7F-45-4C-46", ".elf")`
    pub fn parse(pattern: &str, extension: impl Into<String>) -> Result<Self, SignatureError> {
        let bytes = parse_dashed_hex(pattern).map_err(|source| SignatureError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Self::new(bytes, extension)
    }

    /// Parses `PATTERN=EXTENSION`, as accepted on the command line
    pub fn parse_spec(spec: &str) -> Result<Self, SignatureError> {
        let (pattern, extension) = spec
            .split_once('=')
            .ok_or_else(|| SignatureError::MalformedSpec(spec.to_string()))?;
        Self::parse(pattern.trim(), extension.trim())
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Checks whether this entry's pattern is a prefix of `prefix`
    pub fn matches(&self, prefix: &[u8]) -> bool {
        prefix.starts_with(&self.pattern)
    }
}

impl fmt::Display for SignatureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_dashed_hex(&self.pattern), self.extension)
    }
}

/// Immutable, ordered signature table
///
/// # Example
///
/// ```
/// use shardmend::domain::entities::Header;
/// use shardmend::domain::services::SignatureTable;
///
/// let table = SignatureTable::default();
/// let header = Header::new(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46]);
/// assert_eq!(table.resolve(&header), ".jpg");
/// ```
#[derive(Debug, Clone)]
pub struct SignatureTable {
    entries: Vec<SignatureEntry>,
    policy: DuplicatePolicy,
    /// Anchored leftmost-first automaton over `entries`
    matcher: Option<AhoCorasick>,
}

impl SignatureTable {
    /// Builds a table from entries in resolution order
    pub fn from_entries(entries: Vec<SignatureEntry>, policy: DuplicatePolicy) -> Self {
        Self::assemble(apply_policy(entries, policy), policy)
    }

    /// Builds the built-in table
    pub fn builtin(policy: DuplicatePolicy) -> Self {
        Self::with_overrides(Vec::new(), policy)
    }

    /// Builds the built-in table with extra entries placed ahead of it
    ///
    /// The duplicate policy applies within the overrides and within the
    /// built-in list separately, so an override always shadows a built-in
    /// entry with the same pattern.
    pub fn with_overrides(overrides: Vec<SignatureEntry>, policy: DuplicatePolicy) -> Self {
        let builtins: Vec<SignatureEntry> = BUILTIN_SIGNATURES
            .iter()
            .map(|(pattern, extension)| SignatureEntry {
                pattern: pattern.to_vec(),
                extension: (*extension).to_string(),
            })
            .collect();

        let mut entries = apply_policy(overrides, policy);
        entries.extend(apply_policy(builtins, policy));
        Self::assemble(entries, policy)
    }

    fn assemble(entries: Vec<SignatureEntry>, policy: DuplicatePolicy) -> Self {
        let mut table = Self {
            entries,
            policy,
            matcher: None,
        };
        table.build_matcher();
        table
    }

    fn build_matcher(&mut self) {
        if self.entries.is_empty() {
            self.matcher = None;
            return;
        }

        let built = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .start_kind(StartKind::Anchored)
            .build(self.entries.iter().map(SignatureEntry::pattern));

        self.matcher = match built {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                tracing::warn!("Signature automaton unavailable, using linear scan: {}", e);
                None
            }
        };
    }

    /// Returns the entries in resolution order
    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the extension for a header
    ///
    /// Only the first four header bytes are considered. Falls back to
    /// [`DEFAULT_EXTENSION`] when nothing matches.
    pub fn resolve(&self, header: &Header) -> &str {
        self.find_entry(header.signature_prefix())
            .map(SignatureEntry::extension)
            .unwrap_or(DEFAULT_EXTENSION)
    }

    /// Finds the first entry whose pattern prefixes `prefix`
    pub fn find_entry(&self, prefix: &[u8]) -> Option<&SignatureEntry> {
        match &self.matcher {
            Some(matcher) => matcher
                .find(Input::new(prefix).anchored(Anchored::Yes))
                .map(|mat| &self.entries[mat.pattern().as_usize()]),
            None => self.find_entry_linear(prefix),
        }
    }

    /// Reference first-match scan
    pub fn find_entry_linear(&self, prefix: &[u8]) -> Option<&SignatureEntry> {
        self.entries.iter().find(|entry| entry.matches(prefix))
    }
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::builtin(DuplicatePolicy::default())
    }
}

fn apply_policy(entries: Vec<SignatureEntry>, policy: DuplicatePolicy) -> Vec<SignatureEntry> {
    match policy {
        DuplicatePolicy::FirstMatch => entries,
        DuplicatePolicy::LastWins => collapse_duplicates(entries),
    }
}

fn collapse_duplicates(entries: Vec<SignatureEntry>) -> Vec<SignatureEntry> {
    let mut collapsed: Vec<SignatureEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match collapsed.iter_mut().find(|e| e.pattern == entry.pattern) {
            Some(existing) => existing.extension = entry.extension,
            None => collapsed.push(entry),
        }
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(table: &SignatureTable, bytes: &[u8]) -> String {
        table.resolve(&Header::new(bytes)).to_string()
    }

    #[test]
    fn test_builtin_size() {
        let table = SignatureTable::builtin(DuplicatePolicy::FirstMatch);
        assert_eq!(table.len(), 37);

        let collapsed = SignatureTable::builtin(DuplicatePolicy::LastWins);
        // 4D-5A and 1A-45-DF-A3 each collapse to a single entry
        assert_eq!(collapsed.len(), 35);
    }

    #[test]
    fn test_first_match_keeps_earlier_duplicate() {
        let table = SignatureTable::builtin(DuplicatePolicy::FirstMatch);
        assert_eq!(resolve(&table, &[0x4D, 0x5A, 0x90, 0x00]), ".exe");
        assert_eq!(resolve(&table, &[0x1A, 0x45, 0xDF, 0xA3]), ".mkv");
    }

    #[test]
    fn test_last_wins_collapses_duplicates() {
        let table = SignatureTable::builtin(DuplicatePolicy::LastWins);
        assert_eq!(resolve(&table, &[0x4D, 0x5A, 0x90, 0x00]), ".dll");
        assert_eq!(resolve(&table, &[0x1A, 0x45, 0xDF, 0xA3]), ".webm");
        // Collapsed entry keeps its original slot
        assert_eq!(table.entries()[0].extension(), ".dll");
    }

    #[test]
    fn test_zip_shadows_docx() {
        let table = SignatureTable::default();
        let header = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x08, 0x00];
        assert_eq!(resolve(&table, &header), ".zip");
    }

    #[test]
    fn test_only_four_bytes_matched() {
        let table = SignatureTable::from_entries(
            vec![SignatureEntry::new(vec![1, 2, 3, 4, 5], ".five").unwrap()],
            DuplicatePolicy::FirstMatch,
        );
        assert_eq!(resolve(&table, &[1, 2, 3, 4, 5, 6, 7, 8]), DEFAULT_EXTENSION);
    }

    #[test]
    fn test_short_and_empty_headers() {
        let table = SignatureTable::default();
        assert_eq!(resolve(&table, &[]), ".bin");
        assert_eq!(resolve(&table, &[0x4D]), ".bin");
        assert_eq!(resolve(&table, &[0x42, 0x4D]), ".bmp");
        assert_eq!(resolve(&table, &[0xFF, 0xD8, 0xFF]), ".jpg");
    }

    #[test]
    fn test_overrides_take_priority() {
        let elf = SignatureEntry::parse("7F-45-4C-46", ".elf").unwrap();
        let exe = SignatureEntry::parse("4D5A", ".efi").unwrap();
        let table = SignatureTable::with_overrides(vec![elf, exe], DuplicatePolicy::FirstMatch);
        assert_eq!(resolve(&table, &[0x7F, 0x45, 0x4C, 0x46]), ".elf");
        assert_eq!(resolve(&table, &[0x4D, 0x5A, 0x00, 0x00]), ".efi");

        let exe = SignatureEntry::parse("4D5A", ".efi").unwrap();
        let collapsed = SignatureTable::with_overrides(vec![exe], DuplicatePolicy::LastWins);
        assert_eq!(resolve(&collapsed, &[0x4D, 0x5A, 0x00, 0x00]), ".efi");
    }

    #[test]
    fn test_entry_validation() {
        assert!(matches!(
            SignatureEntry::parse("4D-5A", "exe"),
            Err(SignatureError::InvalidExtension(_))
        ));
        assert!(matches!(
            SignatureEntry::parse("", ".x"),
            Err(SignatureError::EmptyPattern(_))
        ));
        assert!(matches!(
            SignatureEntry::parse("GG", ".x"),
            Err(SignatureError::InvalidPattern { .. })
        ));
        assert!(matches!(
            SignatureEntry::parse_spec("4D-5A"),
            Err(SignatureError::MalformedSpec(_))
        ));
        let entry = SignatureEntry::parse_spec("7f-45 = .elf").unwrap();
        assert_eq!(entry.pattern(), &[0x7F, 0x45]);
        assert_eq!(entry.to_string(), "7F-45 .elf");
    }

    #[test]
    fn test_empty_table_defaults() {
        let table = SignatureTable::from_entries(Vec::new(), DuplicatePolicy::FirstMatch);
        assert!(table.is_empty());
        assert_eq!(resolve(&table, &[0xFF, 0xD8, 0xFF, 0xE0]), ".bin");
    }

    #[test]
    fn test_automaton_agrees_with_linear_scan() {
        let table = SignatureTable::default();
        for (pattern, _) in BUILTIN_SIGNATURES {
            let prefix = &pattern[..pattern.len().min(4)];
            assert_eq!(table.find_entry(prefix), table.find_entry_linear(prefix));
        }
    }
}
