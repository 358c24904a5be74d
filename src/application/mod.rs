//! Application layer
//!
//! Use cases that orchestrate the domain services.

pub mod dto;
mod reconstruct_files;

pub use reconstruct_files::{reconstruct_directory, ReconstructFilesUseCase};
