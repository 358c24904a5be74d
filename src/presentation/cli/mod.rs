//! CLI module

mod commands;
mod progress;
mod prompt;

pub use commands::{Cli, Commands, RunArgs};
pub use progress::ProgressReporter;
pub use prompt::{prompt_output_dir, wait_for_key};
