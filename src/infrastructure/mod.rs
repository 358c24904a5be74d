//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories.
//! This layer contains all direct file system access.

pub mod fragments;
pub mod persistence;
