//! Local reconstruction writer
//!
//! Concatenates fragment groups into files on the local file system.

use crate::domain::entities::{output_file_name, FragmentGroup, ProgressEvent, ReconstructedFile};
use crate::domain::repositories::{FragmentReader, ReconstructionError, ReconstructionWriter};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Local file system writer
///
/// Members are streamed one at a time, so memory use does not grow with
/// fragment size.
pub struct LocalReconstructionWriter<R: FragmentReader> {
    output_dir: PathBuf,
    reader: R,
}

impl<R: FragmentReader> LocalReconstructionWriter<R> {
    pub fn new(output_dir: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            output_dir: output_dir.into(),
            reader,
        }
    }

    fn append_members(
        &self,
        group: &FragmentGroup,
        output_path: &Path,
        out: &mut BufWriter<File>,
        progress: Option<&dyn Fn(&ProgressEvent)>,
    ) -> Result<u64, ReconstructionError> {
        let mut written = 0u64;

        for chunk in group.sorted_members() {
            let mut source = self.reader.open_fragment(chunk)?;
            written += io::copy(&mut source, out).map_err(|source| ReconstructionError::Append {
                chunk: chunk.to_path_buf(),
                output: output_path.to_path_buf(),
                source,
            })?;

            if let Some(report) = progress {
                report(&ProgressEvent::ChunkAppended {
                    chunk: chunk.to_path_buf(),
                    output: output_path.to_path_buf(),
                });
            }
        }

        Ok(written)
    }
}

impl<R: FragmentReader> ReconstructionWriter for LocalReconstructionWriter<R> {
    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn prepare(&self) -> Result<(), ReconstructionError> {
        if !self.output_dir.is_dir() {
            fs::create_dir_all(&self.output_dir).map_err(|source| {
                ReconstructionError::CreateOutputDir {
                    path: self.output_dir.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    fn output_path(&self, index: u64, extension: &str) -> PathBuf {
        self.output_dir.join(output_file_name(index, extension))
    }

    fn write_group(
        &self,
        group: &FragmentGroup,
        extension: &str,
        index: u64,
        progress: Option<&dyn Fn(&ProgressEvent)>,
    ) -> Result<ReconstructedFile, ReconstructionError> {
        let output_path = self.output_path(index, extension);

        let file = File::create(&output_path).map_err(|source| ReconstructionError::CreateFile {
            path: output_path.clone(),
            source,
        })?;
        let mut out = BufWriter::new(file);

        let size = self.append_members(group, &output_path, &mut out, progress)?;

        let finish = |source: io::Error| ReconstructionError::Finish {
            path: output_path.clone(),
            source,
        };
        let file = out.into_inner().map_err(|e| finish(e.into_error()))?;
        file.sync_all().map_err(finish)?;

        Ok(ReconstructedFile::new(
            index,
            group.key().clone(),
            extension,
            output_path.clone(),
            group.len(),
            size,
        ))
    }
}
