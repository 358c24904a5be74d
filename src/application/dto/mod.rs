//! Data Transfer Objects

mod reconstruct_options;
mod reconstruction_report;

pub use reconstruct_options::ReconstructOptions;
pub use reconstruction_report::{GroupFailure, PlannedFile, ReconstructionReport};
