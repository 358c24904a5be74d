//! Progress events
//!
//! Human-readable notifications emitted while grouping and writing.
//! The `Display` form of each event is the line shown to the user.

use super::header::HeaderKey;
use std::fmt;
use std::path::PathBuf;

/// A single progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Directory listing taken
    ScanStarted { directory: PathBuf, files: usize },
    /// A fragment was filed under a header key
    FileGrouped { path: PathBuf, key: HeaderKey },
    /// A fragment's header could not be read; it joins the empty-header group
    HeaderReadFailed { path: PathBuf, error: String },
    /// Re-reading a representative header for extension detection failed
    ExtensionReadFailed { path: PathBuf, error: String },
    /// A fragment was appended to an output file
    ChunkAppended { chunk: PathBuf, output: PathBuf },
    /// An output file was written completely
    FileReconstructed { path: PathBuf },
    /// A group could not be written; no counter value was consumed
    GroupFailed { key: HeaderKey, error: String },
    /// Dry run: the output a group would produce
    GroupPlanned {
        key: HeaderKey,
        fragments: usize,
        output: PathBuf,
    },
}

impl ProgressEvent {
    /// Whether this event reports a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ProgressEvent::HeaderReadFailed { .. }
                | ProgressEvent::ExtensionReadFailed { .. }
                | ProgressEvent::GroupFailed { .. }
        )
    }

    /// Per-fragment chatter that quiet mode hides
    pub fn is_detail(&self) -> bool {
        matches!(
            self,
            ProgressEvent::FileGrouped { .. } | ProgressEvent::ChunkAppended { .. }
        )
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::ScanStarted { directory, files } => {
                write!(f, "Scanning directory: {} ({} files)", directory.display(), files)
            }
            ProgressEvent::FileGrouped { path, key } => {
                write!(f, "File: {} grouped under header: {}", path.display(), key)
            }
            ProgressEvent::HeaderReadFailed { path, error } => {
                write!(f, "Error reading file {}: {}", path.display(), error)
            }
            ProgressEvent::ExtensionReadFailed { path, error } => write!(
                f,
                "Error detecting file extension for {}: {}",
                path.display(),
                error
            ),
            ProgressEvent::ChunkAppended { chunk, output } => write!(
                f,
                "Appending chunk {} to {}",
                chunk.display(),
                output.display()
            ),
            ProgressEvent::FileReconstructed { path } => {
                write!(f, "Reconstructed file saved as: {}", path.display())
            }
            ProgressEvent::GroupFailed { key, error } => {
                write!(f, "Error reconstructing files for group {}: {}", key, error)
            }
            ProgressEvent::GroupPlanned {
                key,
                fragments,
                output,
            } => write!(
                f,
                "Would reconstruct {} fragment(s) under header {} as {}",
                fragments,
                key,
                output.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lines() {
        let event = ProgressEvent::FileGrouped {
            path: PathBuf::from("a.000"),
            key: HeaderKey::from_bytes(&[0x4D, 0x5A]),
        };
        assert_eq!(event.to_string(), "File: a.000 grouped under header: 4D-5A");
        assert!(event.is_detail());
        assert!(!event.is_error());

        let failed = ProgressEvent::GroupFailed {
            key: HeaderKey::default(),
            error: "denied".to_string(),
        };
        assert_eq!(
            failed.to_string(),
            "Error reconstructing files for group <empty>: denied"
        );
        assert!(failed.is_error());
    }
}
