//! Configuration file resolution.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (relative to the scan root)
//! 2. `{root}/fla-lint.config.json`, `{root}/.fla-lint.json` or
//!    `{root}/linter/fla-lint.config.json`
//! 3. No config found → defaults, reported as `{root}/linter/fla-lint.config.json`

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag. The file may not exist.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// No config found; defaults will be used. Holds the path reported in
    /// the run summary.
    Default(PathBuf),
}

impl ConfigSource {
    /// Returns the resolved path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Default(p) => p,
        }
    }

    /// Returns `true` when no config file was found.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

/// Project-level config file locations, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &[
    "fla-lint.config.json",
    ".fla-lint.json",
    "linter/fla-lint.config.json",
];

/// Path reported in the run summary when no config file exists.
const DEFAULT_REPORTED_PATH: &str = "linter/fla-lint.config.json";

/// Resolves the configuration file path for a scan rooted at `root`.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(root: &Path, explicit: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(root.join(p));
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = root.join(name);
        if candidate.is_file() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    ConfigSource::Default(root.join(DEFAULT_REPORTED_PATH))
}
