//! Check command implementation.

use anyhow::{bail, Context, Result};
use fla_lint_core::{Analyzer, AnalyzerError, Config};
use fla_lint_rules::all_rules;
use fla_lint_ts::Accelerator;
use std::path::Path;
use std::process::ExitCode;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Directories suggested when the scan root is unusable.
const ROOT_CANDIDATES: &[&str] = &["src", "."];

/// Runs the check command.
///
/// Returns [`ExitCode::FAILURE`] when any violation is reported.
pub fn run(path: &Path, format: OutputFormat, explicit: Option<&Path>) -> Result<ExitCode> {
    let root = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve root path {}", path.display()))?;
    validate_root(&root)?;

    let source = config_resolver::resolve(&root, explicit);
    match &source {
        ConfigSource::Explicit(p) if !p.is_file() => {
            tracing::warn!("Config {} not found, using defaults", p.display());
        }
        ConfigSource::Default(_) => tracing::debug!("No config file found, using defaults"),
        _ => tracing::debug!("Using config: {}", source.path().display()),
    }
    let loaded = Config::load(source.path()).map_err(AnalyzerError::from)?;

    let analyzer = Analyzer::builder()
        .root(&root)
        .loaded_config(loaded)
        .rules(all_rules(Accelerator::shared()))
        .build()?;

    tracing::info!(
        "Analyzing {} with {} rules",
        root.display(),
        analyzer.rule_count()
    );

    let report = analyzer.analyze()?;

    super::output::print(&report, format)?;

    Ok(if report.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn validate_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        return Ok(());
    }

    let reason = if root.exists() {
        "is not a directory"
    } else {
        "is not accessible"
    };
    let candidates: Vec<&str> = ROOT_CANDIDATES
        .iter()
        .copied()
        .filter(|c| Path::new(c).is_dir())
        .collect();

    if candidates.is_empty() {
        bail!("root path {reason}: {}", root.display());
    }
    bail!(
        "root path {reason}: {}\n  = help: try one of: {}",
        root.display(),
        candidates.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn validate_root_accepts_directories() {
        let tmp = TempDir::new().unwrap();
        assert!(validate_root(tmp.path()).is_ok());
    }

    #[test]
    fn validate_root_rejects_files_and_missing_paths() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.ts");
        std::fs::write(&file, "").unwrap();

        let err = validate_root(&file).unwrap_err().to_string();
        assert!(err.starts_with("root path is not a directory"), "{err}");

        let err = validate_root(&tmp.path().join("missing")).unwrap_err().to_string();
        assert!(err.starts_with("root path is not accessible"), "{err}");
        assert!(err.contains("try one of:"), "{err}");
    }
}
