//! Extension resolver
//!
//! Picks the output extension for a group from its first-inserted member.

use super::signature_table::{SignatureTable, DEFAULT_EXTENSION};
use crate::domain::entities::{FragmentGroup, ProgressEvent};
use crate::domain::repositories::FragmentReader;

/// Where the representative header comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderSource {
    /// Reuse the header captured while grouping
    #[default]
    Captured,
    /// Read the first member's header again at resolution time
    Reread,
}

/// Resolves group extensions against a signature table
pub struct ExtensionResolver<'a, R: FragmentReader> {
    table: &'a SignatureTable,
    reader: R,
    source: HeaderSource,
}

impl<'a, R: FragmentReader> ExtensionResolver<'a, R> {
    pub fn new(table: &'a SignatureTable, reader: R, source: HeaderSource) -> Self {
        Self {
            table,
            reader,
            source,
        }
    }

    /// Resolves the extension for `group`
    ///
    /// With [`HeaderSource::Reread`] a failed read yields the default
    /// extension and is reported.
    pub fn resolve_group_extension(
        &self,
        group: &FragmentGroup,
        progress: Option<&dyn Fn(&ProgressEvent)>,
    ) -> String {
        match self.source {
            HeaderSource::Captured => self.table.resolve(group.representative_header()).to_string(),
            HeaderSource::Reread => {
                let path = group.first_member();
                match self.reader.read_header(path) {
                    Ok(header) => self.table.resolve(&header).to_string(),
                    Err(e) => {
                        tracing::debug!("Extension re-read failed for {}: {}", path.display(), e);
                        if let Some(report) = progress {
                            report(&ProgressEvent::ExtensionReadFailed {
                                path: path.to_path_buf(),
                                error: e.to_string(),
                            });
                        }
                        DEFAULT_EXTENSION.to_string()
                    }
                }
            }
        }
    }
}
