//! Fragment access on the local file system

mod directory_scanner;
mod local_fragment_reader;

pub use directory_scanner::{current_executable_path, DirectoryScanner, ScanError};
pub use local_fragment_reader::LocalFragmentReader;
