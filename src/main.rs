use anyhow::Result;
use clap::Parser;
use console::style;

use shardmend::domain::services::SignatureTable;
use shardmend::presentation::cli::{prompt_output_dir, wait_for_key, Cli, Commands, ProgressReporter};
use shardmend::reconstruct_directory;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Some(Commands::ListSignatures) => list_signatures(&cli),
        None => run_reconstruction(&cli),
    }
}

fn run_reconstruction(cli: &Cli) -> Result<()> {
    print_banner();

    let output_dir = match &cli.run.output {
        Some(dir) => dir.clone(),
        None => prompt_output_dir()?,
    };
    let options = cli.to_options(output_dir);

    let reporter = ProgressReporter::new(cli.run.quiet);
    let progress = reporter.callback();

    let report = reconstruct_directory(&options, Some(&progress))?;

    // Outputs are already on disk, so a lost report does not fail the run
    if let Some(path) = &cli.run.report {
        match report.save(path) {
            Ok(()) => tracing::info!("Report written to {}", path.display()),
            Err(e) => eprintln!("{}", style(format!("{:#}", e)).yellow()),
        }
    }

    println!();
    print!("{}", report.summary());
    println!("{}", style("File reconstruction completed.").green().bold());

    if cli.run.pause {
        wait_for_key()?;
    }

    Ok(())
}

fn list_signatures(cli: &Cli) -> Result<()> {
    let table = SignatureTable::with_overrides(cli.signatures.clone(), cli.duplicate_policy());

    println!("{:<4} {:<26} {}", style("#").bold(), style("PATTERN").bold(), style("EXT").bold());
    println!("{}", "-".repeat(40));
    for (index, entry) in table.entries().iter().enumerate() {
        let pattern = shardmend::domain::entities::format_dashed_hex(entry.pattern());
        println!("{:<4} {:<26} {}", index + 1, pattern, entry.extension());
    }
    println!();
    println!("Unmatched fragments fall back to {}", shardmend::domain::services::DEFAULT_EXTENSION);

    Ok(())
}

fn print_banner() {
    println!();
    println!("{}", style("shardmend - Fragment Reconstructor").cyan().bold());
}
