//! Domain entities
//!
//! Core objects of fragment reconstruction: headers and their keys,
//! fragment groups, output files and progress notifications.

mod fragment_group;
mod header;
mod progress_event;
mod reconstructed_file;

pub use fragment_group::{FragmentGroup, GroupSet};
pub use header::{
    format_dashed_hex, parse_dashed_hex, Header, HeaderKey, HEADER_LEN, SIGNATURE_PREFIX_LEN,
};
pub use progress_event::ProgressEvent;
pub use reconstructed_file::{output_file_name, ReconstructedFile, OUTPUT_PREFIX};
