//! Local fragment reader
//!
//! Reads fragments straight from the local file system. Every call opens
//! its own read-only handle and drops it before returning.

use crate::domain::entities::{Header, HEADER_LEN};
use crate::domain::repositories::{FragmentReadError, FragmentReader};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// File system backed [`FragmentReader`]
///
/// # Example
///
/// ```ignore
/// let header = LocalFragmentReader.read_header(Path::new("chunk.000"))?;
/// println!("{}", header.key());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFragmentReader;

impl LocalFragmentReader {
    fn open(path: &Path) -> Result<File, FragmentReadError> {
        File::open(path).map_err(|e| FragmentReadError::from_io(path, e))
    }
}

impl FragmentReader for LocalFragmentReader {
    fn read_header(&self, path: &Path) -> Result<Header, FragmentReadError> {
        let file = Self::open(path)?;

        // take() + read_to_end keeps reading across short reads until EOF
        let mut bytes = Vec::with_capacity(HEADER_LEN);
        file.take(HEADER_LEN as u64)
            .read_to_end(&mut bytes)
            .map_err(|e| FragmentReadError::from_io(path, e))?;

        Ok(Header::new(&bytes))
    }

    fn open_fragment(&self, path: &Path) -> Result<Box<dyn Read>, FragmentReadError> {
        let file = Self::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_first_eight_bytes() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00])
            .unwrap();
        temp.flush().unwrap();

        let header = LocalFragmentReader.read_header(temp.path()).unwrap();
        assert_eq!(header.key().as_str(), "89-50-4E-47-0D-0A-1A-0A");
    }

    #[test]
    fn test_short_file_gives_short_header() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0x42, 0x4D, 0x01]).unwrap();
        temp.flush().unwrap();

        let header = LocalFragmentReader.read_header(temp.path()).unwrap();
        assert_eq!(header.as_bytes(), &[0x42, 0x4D, 0x01]);
    }

    #[test]
    fn test_empty_file_gives_empty_header() {
        let temp = NamedTempFile::new().unwrap();
        let header = LocalFragmentReader.read_header(temp.path()).unwrap();
        assert!(header.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = LocalFragmentReader.read_header(Path::new("/nonexistent/fragment.000"));
        assert!(matches!(result, Err(FragmentReadError::NotFound(_))));
    }

    #[test]
    fn test_open_fragment_streams_everything() {
        let mut temp = NamedTempFile::new().unwrap();
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        temp.write_all(&data).unwrap();
        temp.flush().unwrap();

        let mut contents = Vec::new();
        LocalFragmentReader
            .open_fragment(temp.path())
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(contents, data);
    }
}
