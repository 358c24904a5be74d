//! Fragment reader trait
//!
//! Defines how the domain reads fragment headers and contents.

use crate::domain::entities::Header;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading a fragment
#[derive(Error, Debug)]
pub enum FragmentReadError {
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Fragment not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FragmentReadError {
    /// Classifies an I/O error raised for `path`
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Read access to fragments
///
/// Each call opens and releases its own handle, so a failure on one
/// fragment never leaks into the next.
pub trait FragmentReader {
    /// Reads up to [`HEADER_LEN`](crate::domain::entities::HEADER_LEN) bytes from the start of a fragment
    fn read_header(&self, path: &Path) -> Result<Header, FragmentReadError>;

    /// Opens a fragment for streaming its full contents
    fn open_fragment(&self, path: &Path) -> Result<Box<dyn Read>, FragmentReadError>;
}

impl<R: FragmentReader + ?Sized> FragmentReader for &R {
    fn read_header(&self, path: &Path) -> Result<Header, FragmentReadError> {
        (**self).read_header(path)
    }

    fn open_fragment(&self, path: &Path) -> Result<Box<dyn Read>, FragmentReadError> {
        (**self).open_fragment(path)
    }
}
