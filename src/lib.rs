//! Fragment reconstruction
//!
//! Groups anonymous file fragments by the exact bytes of their header,
//! concatenates each group in file name order and guesses the extension
//! of the result from a table of known signatures.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::dto::{ReconstructOptions, ReconstructionReport};
pub use application::{reconstruct_directory, ReconstructFilesUseCase};
pub use domain::entities::{FragmentGroup, GroupSet, Header, HeaderKey, ProgressEvent, ReconstructedFile};
pub use domain::services::{DuplicatePolicy, HeaderSource, SignatureEntry, SignatureTable};
