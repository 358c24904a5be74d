//! Directory scanner
//!
//! Takes a flat snapshot of the regular files in one directory, sorted by
//! path. Files created or removed afterwards are not observed.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while listing the input directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Input directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Cannot list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Lists candidate fragments in a directory
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    directory: PathBuf,
    excluded: Vec<OsString>,
    excluded_paths: Vec<PathBuf>,
}

impl DirectoryScanner {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            excluded: Vec::new(),
            excluded_paths: Vec::new(),
        }
    }

    /// Skips files with exactly this file name
    pub fn exclude(mut self, file_name: impl Into<OsString>) -> Self {
        self.excluded.push(file_name.into());
        self
    }

    /// Skips the file at exactly this location
    ///
    /// Paths are compared after canonicalisation, so a file elsewhere that
    /// merely shares the name is still listed.
    pub fn exclude_path(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.excluded_paths
            .push(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
        self
    }

    /// Skips the running executable when it lives in the scanned directory
    pub fn exclude_current_executable(self) -> Self {
        match current_executable_path() {
            Some(path) => self.exclude_path(path),
            None => self,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns regular files in lexicographic path order
    ///
    /// Entries that cannot be inspected are skipped with a warning.
    pub fn scan(&self) -> Result<Vec<PathBuf>, ScanError> {
        if !self.directory.exists() {
            return Err(ScanError::NotFound(self.directory.clone()));
        }
        if !self.directory.is_dir() {
            return Err(ScanError::NotADirectory(self.directory.clone()));
        }

        let entries = fs::read_dir(&self.directory).map_err(|source| ScanError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.directory.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file()
                || self.is_excluded(&entry.file_name())
                || self.is_excluded_path(&path)
            {
                continue;
            }
            files.push(path);
        }

        files.sort();
        tracing::debug!("Found {} candidate files in {}", files.len(), self.directory.display());
        Ok(files)
    }

    fn is_excluded(&self, file_name: &OsStr) -> bool {
        self.excluded.iter().any(|name| name == file_name)
    }

    fn is_excluded_path(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }
        match fs::canonicalize(path) {
            Ok(canonical) => self.excluded_paths.contains(&canonical),
            Err(_) => false,
        }
    }
}

/// Canonical location of the running executable
pub fn current_executable_path() -> Option<PathBuf> {
    std::env::current_exe()
        .and_then(fs::canonicalize)
        .ok()
}
