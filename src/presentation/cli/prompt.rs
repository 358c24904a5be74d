//! Interactive prompts

use anyhow::{Context, Result};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;

/// Asks for the output directory; the answer is used verbatim
pub fn prompt_output_dir() -> Result<PathBuf> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the output folder path for reconstructed files")
        .interact_text()
        .context("Failed to get output directory")?;

    Ok(PathBuf::from(answer))
}

/// Blocks until a key is pressed
pub fn wait_for_key() -> Result<()> {
    println!("Press any key to exit.");
    Term::stdout()
        .read_key()
        .context("Failed to read key press")?;
    Ok(())
}
