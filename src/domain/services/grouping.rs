//! Grouping engine
//!
//! Buckets fragments by the exact bytes of their header. The input order
//! is preserved inside each bucket and decides the order of the buckets.

use crate::domain::entities::{GroupSet, Header, ProgressEvent};
use crate::domain::repositories::FragmentReader;
use std::path::PathBuf;

/// Outcome of a grouping pass
#[derive(Debug, Clone, Default)]
pub struct GroupingOutcome {
    pub groups: GroupSet,
    /// Fragments whose header could not be read
    pub unreadable: Vec<PathBuf>,
}

/// Classifies fragments by header key
pub struct GroupingEngine<R: FragmentReader> {
    reader: R,
}

impl<R: FragmentReader> GroupingEngine<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Groups `paths` in the order given
    ///
    /// A fragment whose header cannot be read is filed under the empty key
    /// and reported; it is never dropped.
    pub fn group(
        &self,
        paths: &[PathBuf],
        progress: Option<&dyn Fn(&ProgressEvent)>,
    ) -> GroupingOutcome {
        let mut outcome = GroupingOutcome::default();

        for path in paths {
            let header = match self.reader.read_header(path) {
                Ok(header) => header,
                Err(e) => {
                    tracing::debug!("Header read failed for {}: {}", path.display(), e);
                    if let Some(report) = progress {
                        report(&ProgressEvent::HeaderReadFailed {
                            path: path.clone(),
                            error: e.to_string(),
                        });
                    }
                    outcome.unreadable.push(path.clone());
                    Header::empty()
                }
            };

            let key = outcome.groups.insert(header, path.clone());

            if let Some(report) = progress {
                report(&ProgressEvent::FileGrouped {
                    path: path.clone(),
                    key,
                });
            }
        }

        tracing::debug!(
            "Grouped {} fragments into {} groups",
            outcome.groups.fragment_count(),
            outcome.groups.len()
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::FragmentReadError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Read;
    use std::path::Path;

    struct MemoryReader {
        files: HashMap<PathBuf, Vec<u8>>,
    }

    impl MemoryReader {
        fn new(files: &[(&str, &[u8])]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(name, data)| (PathBuf::from(name), data.to_vec()))
                    .collect(),
            }
        }
    }

    impl FragmentReader for MemoryReader {
        fn read_header(&self, path: &Path) -> Result<Header, FragmentReadError> {
            self.files
                .get(path)
                .map(|data| Header::new(data))
                .ok_or_else(|| FragmentReadError::NotFound(path.to_path_buf()))
        }

        fn open_fragment(&self, path: &Path) -> Result<Box<dyn Read>, FragmentReadError> {
            let data = self
                .files
                .get(path)
                .cloned()
                .ok_or_else(|| FragmentReadError::NotFound(path.to_path_buf()))?;
            Ok(Box::new(std::io::Cursor::new(data)))
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_groups_by_exact_header() {
        let reader = MemoryReader::new(&[
            ("a.000", &[0x4D, 0x5A, 0, 0, 1, 1, 1, 1, 9]),
            ("a.001", &[0x4D, 0x5A, 0, 0, 1, 1, 1, 1, 7]),
            ("a.002", &[0x4D, 0x5A, 0, 0, 1, 1, 1, 2]),
            ("b.000", &[0xFF, 0xD8, 0xFF, 0]),
        ]);
        let engine = GroupingEngine::new(reader);
        let outcome = engine.group(&paths(&["a.000", "a.001", "a.002", "b.000"]), None);

        assert_eq!(outcome.groups.len(), 3);
        let sizes: Vec<usize> = outcome.groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![2, 1, 1]);
        assert!(outcome.unreadable.is_empty());
    }

    #[test]
    fn test_unreadable_joins_empty_group() {
        let reader = MemoryReader::new(&[("empty", &[])]);
        let engine = GroupingEngine::new(reader);
        let events = RefCell::new(Vec::new());
        let sink = |e: &ProgressEvent| events.borrow_mut().push(e.clone());

        let outcome = engine.group(&paths(&["empty", "missing"]), Some(&sink));

        assert_eq!(outcome.groups.len(), 1);
        let group = outcome.groups.iter().next().unwrap();
        assert!(group.key().is_empty());
        assert_eq!(group.members(), &paths(&["empty", "missing"])[..]);
        assert_eq!(outcome.unreadable, paths(&["missing"]));

        let events = events.into_inner();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], ProgressEvent::HeaderReadFailed { .. }));
    }
}
