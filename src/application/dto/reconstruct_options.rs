//! Reconstruct options DTO

use crate::domain::services::{DuplicatePolicy, HeaderSource, SignatureEntry};
use std::ffi::OsString;
use std::path::PathBuf;

/// Options for a reconstruction run
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Directory holding the fragments (scanned flat)
    pub input_dir: PathBuf,
    /// Directory receiving reconstructed files
    pub output_dir: PathBuf,
    /// Extra file names to leave out of the scan
    pub excluded: Vec<OsString>,
    /// Whether to leave out the running executable
    pub exclude_self: bool,
    /// How duplicate signature patterns are resolved
    pub duplicate_policy: DuplicatePolicy,
    /// Where a group's representative header comes from
    pub header_source: HeaderSource,
    /// Signatures consulted before the built-in table
    pub custom_signatures: Vec<SignatureEntry>,
    /// Plan only; nothing is written
    pub dry_run: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("reconstructed"),
            excluded: Vec::new(),
            exclude_self: true,
            duplicate_policy: DuplicatePolicy::default(),
            header_source: HeaderSource::default(),
            custom_signatures: Vec::new(),
            dry_run: false,
        }
    }
}

impl ReconstructOptions {
    /// Creates options for the given input and output directories
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_header_source(mut self, source: HeaderSource) -> Self {
        self.header_source = source;
        self
    }

    pub fn with_signatures(mut self, signatures: Vec<SignatureEntry>) -> Self {
        self.custom_signatures = signatures;
        self
    }

    /// Leaves a file name out of the scan
    pub fn excluding(mut self, file_name: impl Into<OsString>) -> Self {
        self.excluded.push(file_name.into());
        self
    }

    /// Keeps the running executable in the scan
    pub fn including_self(mut self) -> Self {
        self.exclude_self = false;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}
