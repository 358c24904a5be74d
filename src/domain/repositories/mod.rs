//! Repository traits (interfaces)
//!
//! Contracts for the file system access the domain depends on.

mod fragment_reader;
mod reconstruction_writer;

pub use fragment_reader::{FragmentReadError, FragmentReader};
pub use reconstruction_writer::{ReconstructionError, ReconstructionWriter};
