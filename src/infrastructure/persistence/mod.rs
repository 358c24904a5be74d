//! Persistence of reconstructed files

mod local_reconstruction_writer;

pub use local_reconstruction_writer::LocalReconstructionWriter;
