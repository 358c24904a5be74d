//! Reconstruction writer trait
//!
//! Defines the interface for turning a fragment group into an output file.

use super::fragment_reader::FragmentReadError;
use crate::domain::entities::{FragmentGroup, ProgressEvent, ReconstructedFile};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing a reconstructed file
#[derive(Error, Debug)]
pub enum ReconstructionError {
    #[error("Cannot create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ReadFragment(#[from] FragmentReadError),

    #[error("Failed to append {chunk} to {output}: {source}")]
    Append {
        chunk: PathBuf,
        output: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to finish {path}: {source}")]
    Finish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for writing reconstructed files
///
/// # Example
///
/// ```ignore
/// let writer = LocalReconstructionWriter::new("/output", LocalFragmentReader);
/// writer.prepare()?;
/// let file = writer.write_group(&group, ".png", 1, None)?;
/// println!("Saved to: {}", file.path().display());
/// ```
pub trait ReconstructionWriter {
    /// Returns the output directory
    fn output_dir(&self) -> &Path;

    /// Creates the output directory, including missing parents
    fn prepare(&self) -> Result<(), ReconstructionError>;

    /// Returns the path a group written under `index` would get
    fn output_path(&self, index: u64, extension: &str) -> PathBuf;

    /// Concatenates the group's members, sorted by path, into one output file
    ///
    /// On error the partially written file is left in place.
    fn write_group(
        &self,
        group: &FragmentGroup,
        extension: &str,
        index: u64,
        progress: Option<&dyn Fn(&ProgressEvent)>,
    ) -> Result<ReconstructedFile, ReconstructionError>;
}
