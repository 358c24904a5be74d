//! Reconstructed file entity
//!
//! Represents one output file stitched together from a fragment group.

use super::header::HeaderKey;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Prefix of every output file name
pub const OUTPUT_PREFIX: &str = "reconstructed_file_";

/// Builds the output file name for a counter value and extension
///
/// `output_file_name(3, ".png")` gives `reconstructed_file_3.png`.
pub fn output_file_name(index: u64, extension: &str) -> String {
    format!("{}{}{}", OUTPUT_PREFIX, index, extension)
}

/// A successfully written output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconstructedFile {
    /// Counter value, starting at 1
    index: u64,
    /// Header key of the source group
    key: HeaderKey,
    /// Resolved extension including the leading dot
    extension: String,
    /// Where the file was written
    path: PathBuf,
    /// Number of fragments concatenated
    fragment_count: usize,
    /// Total bytes written
    size: u64,
}

impl ReconstructedFile {
    pub fn new(
        index: u64,
        key: HeaderKey,
        extension: impl Into<String>,
        path: PathBuf,
        fragment_count: usize,
        size: u64,
    ) -> Self {
        Self {
            index,
            key,
            extension: extension.into(),
            path,
            fragment_count,
            size,
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn key(&self) -> &HeaderKey {
        &self.key
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    /// Returns the size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }
}
