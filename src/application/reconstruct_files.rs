//! Reconstruct files use case
//!
//! Groups fragments by header, resolves an extension per group and
//! writes one output file per group. Per-file and per-group failures are
//! reported and skipped; only setup failures end the run early.

use crate::application::dto::{GroupFailure, PlannedFile, ReconstructOptions, ReconstructionReport};
use crate::domain::entities::ProgressEvent;
use crate::domain::repositories::{FragmentReader, ReconstructionWriter};
use crate::domain::services::{ExtensionResolver, GroupingEngine, HeaderSource, SignatureTable};
use crate::infrastructure::fragments::{DirectoryScanner, LocalFragmentReader};
use crate::infrastructure::persistence::LocalReconstructionWriter;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;

/// Reconstruct files use case
pub struct ReconstructFilesUseCase<'a, R: FragmentReader, W: ReconstructionWriter> {
    table: &'a SignatureTable,
    reader: R,
    writer: W,
    header_source: HeaderSource,
}

impl<'a, R: FragmentReader, W: ReconstructionWriter> ReconstructFilesUseCase<'a, R, W> {
    /// Creates a new use case
    pub fn new(table: &'a SignatureTable, reader: R, writer: W) -> Self {
        Self {
            table,
            reader,
            writer,
            header_source: HeaderSource::default(),
        }
    }

    pub fn with_header_source(mut self, source: HeaderSource) -> Self {
        self.header_source = source;
        self
    }

    /// Executes the run over an already listed set of fragments
    ///
    /// Counter values start at 1 and are consumed only by groups that were
    /// written completely.
    pub fn execute(
        &self,
        input_dir: PathBuf,
        paths: &[PathBuf],
        dry_run: bool,
        progress: Option<&dyn Fn(&ProgressEvent)>,
    ) -> Result<ReconstructionReport> {
        let start_time = Instant::now();
        let mut report =
            ReconstructionReport::new(input_dir, self.writer.output_dir().to_path_buf(), dry_run);

        tracing::info!("Grouping {} fragments", paths.len());

        let grouping = GroupingEngine::new(&self.reader).group(paths, progress);
        report.files_scanned = grouping.groups.fragment_count();
        report.groups_formed = grouping.groups.len();
        report.unreadable_headers = grouping.unreadable;

        if !dry_run {
            self.writer.prepare().with_context(|| {
                format!(
                    "Failed to prepare output directory {}",
                    self.writer.output_dir().display()
                )
            })?;
        }

        let resolver = ExtensionResolver::new(self.table, &self.reader, self.header_source);
        let mut counter = 1u64;

        for group in &grouping.groups {
            let extension = resolver.resolve_group_extension(group, progress);

            if dry_run {
                let output = self.writer.output_path(counter, &extension);
                emit(
                    progress,
                    ProgressEvent::GroupPlanned {
                        key: group.key().clone(),
                        fragments: group.len(),
                        output: output.clone(),
                    },
                );
                report.planned.push(PlannedFile {
                    index: counter,
                    key: group.key().clone(),
                    extension,
                    path: output,
                    fragments: group.len(),
                });
                counter += 1;
                continue;
            }

            match self.writer.write_group(group, &extension, counter, progress) {
                Ok(written) => {
                    tracing::debug!(
                        "Group {} -> {} ({} bytes)",
                        group.key(),
                        written.path().display(),
                        written.size()
                    );
                    emit(
                        progress,
                        ProgressEvent::FileReconstructed {
                            path: written.path().to_path_buf(),
                        },
                    );
                    report.reconstructed.push(written);
                    counter += 1;
                }
                Err(e) => {
                    tracing::debug!("Group {} abandoned: {}", group.key(), e);
                    emit(
                        progress,
                        ProgressEvent::GroupFailed {
                            key: group.key().clone(),
                            error: e.to_string(),
                        },
                    );
                    report.failures.push(GroupFailure {
                        key: group.key().clone(),
                        fragments: group.len(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report.duration = start_time.elapsed();

        tracing::info!(
            "Reconstruction complete: {} files written, {} groups failed in {:.2}s",
            report.reconstructed.len(),
            report.failures.len(),
            report.duration.as_secs_f64()
        );

        Ok(report)
    }
}

fn emit(progress: Option<&dyn Fn(&ProgressEvent)>, event: ProgressEvent) {
    if let Some(report) = progress {
        report(&event);
    }
}

/// Runs a reconstruction over a local directory
///
/// Lists the input directory, builds the signature table from `options`
/// and writes into `options.output_dir`.
pub fn reconstruct_directory(
    options: &ReconstructOptions,
    progress: Option<&dyn Fn(&ProgressEvent)>,
) -> Result<ReconstructionReport> {
    let mut scanner = DirectoryScanner::new(&options.input_dir);
    if options.exclude_self {
        scanner = scanner.exclude_current_executable();
    }
    for name in &options.excluded {
        scanner = scanner.exclude(name.clone());
    }

    let paths = scanner
        .scan()
        .with_context(|| format!("Failed to scan {}", options.input_dir.display()))?;

    emit(
        progress,
        ProgressEvent::ScanStarted {
            directory: options.input_dir.clone(),
            files: paths.len(),
        },
    );

    let table =
        SignatureTable::with_overrides(options.custom_signatures.clone(), options.duplicate_policy);
    let writer = LocalReconstructionWriter::new(&options.output_dir, LocalFragmentReader);

    ReconstructFilesUseCase::new(&table, LocalFragmentReader, writer)
        .with_header_source(options.header_source)
        .execute(options.input_dir.clone(), &paths, options.dry_run, progress)
}
