//! Domain layer - Core business logic
//!
//! Entities, repository traits and the services that classify and
//! regroup fragments. File system access goes through the traits only.

pub mod entities;
pub mod repositories;
pub mod services;
