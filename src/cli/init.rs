//! `overlay-proxy init`: write a starter config file.
//!
//! Creates `.overlay-proxy.yaml` in the current directory (or the given path)
//! with every setting spelled out at its default.

use crate::config::defaults;
use crate::utils::paths::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Run the `overlay-proxy init` command.
pub fn run_init(output_path: Option<PathBuf>, force: bool) -> Result<()> {
    let output_file = match output_path {
        Some(path) => path,
        None => std::env::current_dir()
            .context("Failed to get current directory")?
            .join(CONFIG_FILE_NAME),
    };

    if output_file.exists() && !force {
        println!(
            "{} A config file already exists at {}",
            "⚠".yellow(),
            output_file.display()
        );
        println!("  Use --force to overwrite it, or edit it directly.");
        return Ok(());
    }

    std::fs::write(&output_file, defaults::DEFAULT_CONFIG_YAML)
        .with_context(|| format!("Failed to write config file: {}", output_file.display()))?;

    println!();
    println!(
        "  {} Created {}",
        "✓".green().bold(),
        output_file.display().to_string().bold()
    );
    println!();
    println!("  {} Next steps:", "→".blue());
    println!(
        "    1. Review the settings: {}",
        format!("cat {}", output_file.display()).dimmed()
    );
    println!(
        "    2. Validate them: {}",
        format!("overlay-proxy --config {} check", output_file.display()).dimmed()
    );
    println!();

    Ok(())
}
