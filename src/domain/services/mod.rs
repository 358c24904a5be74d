//! Domain services
//!
//! Signature matching, grouping and extension resolution.

mod extension_resolver;
mod grouping;
mod signature_table;

pub use extension_resolver::{ExtensionResolver, HeaderSource};
pub use grouping::{GroupingEngine, GroupingOutcome};
pub use signature_table::{
    DuplicatePolicy, SignatureEntry, SignatureError, SignatureTable, DEFAULT_EXTENSION,
};
