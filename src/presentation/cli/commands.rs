//! CLI commands using clap

use crate::application::dto::ReconstructOptions;
use crate::domain::services::{DuplicatePolicy, HeaderSource, SignatureEntry};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

/// shardmend - Fragment Reconstructor
///
/// Groups anonymous file fragments by their leading bytes and stitches
/// each group back into a single file, guessing its extension from a
/// table of known signatures.
#[derive(Parser, Debug)]
#[command(name = "shardmend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reassemble file fragments grouped by header signature", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Treat duplicate signature patterns as a unique-keyed map (last declaration wins)
    #[arg(long, global = true)]
    pub legacy_collapse: bool,

    /// Extra signature consulted before the built-in table, e.g. 7F-45-4C-46=.elf
    #[arg(
        long = "signature",
        value_name = "PATTERN=EXT",
        global = true,
        value_parser = SignatureEntry::parse_spec
    )]
    pub signatures: Vec<SignatureEntry>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List signatures in resolution order
    ListSignatures,
}

/// Arguments of a reconstruction run
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Directory holding the fragments
    #[arg(short, long, default_value = ".")]
    pub input: PathBuf,

    /// Output directory for reconstructed files (prompted for when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name to leave out of the scan (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Do not skip the running executable when it sits in the input directory
    #[arg(long)]
    pub include_self: bool,

    /// Re-read each group's first fragment when resolving its extension
    #[arg(long)]
    pub reread_headers: bool,

    /// Show what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Only print saved files, errors and the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Wait for a key press before exiting
    #[arg(long)]
    pub pause: bool,
}

impl Cli {
    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::TRACE
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        if self.legacy_collapse {
            DuplicatePolicy::LastWins
        } else {
            DuplicatePolicy::FirstMatch
        }
    }

    /// Builds run options once the output directory is known
    pub fn to_options(&self, output_dir: PathBuf) -> ReconstructOptions {
        let header_source = if self.run.reread_headers {
            HeaderSource::Reread
        } else {
            HeaderSource::Captured
        };

        let mut options = ReconstructOptions::new(&self.run.input, output_dir)
            .with_duplicate_policy(self.duplicate_policy())
            .with_header_source(header_source)
            .with_signatures(self.signatures.clone());

        for name in &self.run.exclude {
            options = options.excluding(name);
        }
        if self.run.include_self {
            options = options.including_self();
        }
        if self.run.dry_run {
            options = options.dry_run();
        }
        options
    }
}
