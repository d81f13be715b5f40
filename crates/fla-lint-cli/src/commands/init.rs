//! Init command implementation.

use anyhow::{bail, Context, Result};
use fla_lint_core::Config;
use std::path::Path;

const CONFIG_FILE: &str = "fla-lint.config.json";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to match your layer directories");
    println!("  2. Run: fla-lint check src");

    Ok(())
}

fn write_default(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let mut body = serde_json::to_string_pretty(&Config::default())?;
    body.push('\n');
    std::fs::write(config_path, body)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
