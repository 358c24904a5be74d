//! Reconstruction report DTO

use crate::domain::entities::{HeaderKey, ReconstructedFile};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A group that could not be written
#[derive(Debug, Clone, Serialize)]
pub struct GroupFailure {
    pub key: HeaderKey,
    pub fragments: usize,
    pub error: String,
}

/// Output a group would produce in a dry run
#[derive(Debug, Clone, Serialize)]
pub struct PlannedFile {
    pub index: u64,
    pub key: HeaderKey,
    pub extension: String,
    pub path: PathBuf,
    pub fragments: usize,
}

/// Result of a reconstruction run
#[derive(Debug, Clone, Serialize)]
pub struct ReconstructionReport {
    /// Directory that was scanned
    pub input_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Fragments considered
    pub files_scanned: usize,
    /// Distinct header keys found
    pub groups_formed: usize,
    /// Files written, in counter order
    pub reconstructed: Vec<ReconstructedFile>,
    /// Dry-run plan, in counter order
    pub planned: Vec<PlannedFile>,
    /// Groups abandoned during writing
    pub failures: Vec<GroupFailure>,
    /// Fragments whose header could not be read
    pub unreadable_headers: Vec<PathBuf>,
    pub dry_run: bool,
    /// Duration of the run
    pub duration: Duration,
}

impl ReconstructionReport {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, dry_run: bool) -> Self {
        Self {
            input_dir,
            output_dir,
            files_scanned: 0,
            groups_formed: 0,
            reconstructed: Vec::new(),
            planned: Vec::new(),
            failures: Vec::new(),
            unreadable_headers: Vec::new(),
            dry_run,
            duration: Duration::ZERO,
        }
    }

    /// Total bytes written across all reconstructed files
    pub fn bytes_written(&self) -> u64 {
        self.reconstructed.iter().map(ReconstructedFile::size).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty() || !self.unreadable_headers.is_empty()
    }

    /// Returns a summary string
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str(&format!(
            "Scanned {} files into {} groups in {:.2}s\n",
            self.files_scanned,
            self.groups_formed,
            self.duration.as_secs_f64()
        ));

        if self.dry_run {
            summary.push_str(&format!(
                "Dry run: {} files would be written to {}\n",
                self.planned.len(),
                self.output_dir.display()
            ));
        } else {
            summary.push_str(&format!(
                "Reconstructed {} files ({} bytes) in {}\n",
                self.reconstructed.len(),
                self.bytes_written(),
                self.output_dir.display()
            ));
        }

        if !self.unreadable_headers.is_empty() {
            summary.push_str(&format!(
                "{} fragments had unreadable headers\n",
                self.unreadable_headers.len()
            ));
        }

        if !self.failures.is_empty() {
            summary.push_str(&format!("{} groups failed to write\n", self.failures.len()));
        }

        summary
    }

    /// Serialises the report as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the JSON report to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json().context("Failed to serialise report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}
