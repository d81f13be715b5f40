//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, LoadedConfig};
use crate::context::{is_parseable, LintContext};
use crate::rule::{LintRule, RuleKind};
use crate::tsconfig::discover_aliases;
use crate::types::{RunReport, Violation};
use crate::utils::paths::{normalize, relative_posix};

use miette::Diagnostic;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Errors that abort a run.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    /// The scan root is missing or not a directory.
    #[error("root path is not an accessible directory: {}", path.display())]
    #[diagnostic(
        code(fla_lint::analyzer::root),
        help("pass an existing directory, e.g. `src` or `.`")
    )]
    Root {
        /// The rejected root.
        path: PathBuf,
    },

    /// IO error reading a file.
    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(fla_lint::analyzer::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Error while walking the tree.
    #[error("Failed to walk directory tree: {0}")]
    #[diagnostic(code(fla_lint::analyzer::walk))]
    Walk(#[from] walkdir::Error),

    /// Configuration error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<LintRule>,
    config: Option<Config>,
    config_path: Option<PathBuf>,
    config_loaded: bool,
    discover_aliases: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule(mut self, rule: LintRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds rules in order.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = LintRule>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the configuration along with where it was resolved from.
    #[must_use]
    pub fn loaded_config(mut self, loaded: LoadedConfig) -> Self {
        self.config = Some(loaded.config);
        self.config_path = Some(loaded.path);
        self.config_loaded = loaded.loaded;
        self
    }

    /// Enables or disables `tsconfig.json`/`jsconfig.json` alias discovery
    /// (default: enabled).
    #[must_use]
    pub fn discover_aliases(mut self, enabled: bool) -> Self {
        self.discover_aliases = Some(enabled);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined for a
    /// relative root.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            let cwd = std::env::current_dir().map_err(|source| AnalyzerError::Io {
                path: root.clone(),
                source,
            })?;
            cwd.join(&root)
        };

        Ok(Analyzer {
            root: normalize(&root),
            rules: self.rules,
            config: self.config.unwrap_or_default(),
            config_path: self.config_path,
            config_loaded: self.config_loaded,
            discover_aliases: self.discover_aliases.unwrap_or(true),
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<LintRule>,
    config: Config,
    config_path: Option<PathBuf>,
    config_loaded: bool,
    discover_aliases: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Walks the tree, runs every rule and returns the sorted report.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a directory, or if walking the
    /// tree or reading a candidate file fails.
    pub fn analyze(&self) -> Result<RunReport, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let ctx = self.build_context()?;
        info!(
            "Found {} candidate files in {} walked files",
            ctx.candidate_files.len(),
            ctx.files.len()
        );

        let mut violations: Vec<Violation> = Vec::new();
        for kind in [RuleKind::File, RuleKind::Repo] {
            for rule in self.rules.iter().filter(|r| r.kind() == kind) {
                let found = rule.run(&ctx);
                debug!("{} produced {} violations", rule.id(), found.len());
                violations.extend(found);
            }
        }

        let config_path = self
            .config_path
            .as_deref()
            .map(|p| relative_posix(&self.root, p))
            .unwrap_or_default();
        let report = RunReport::new(
            violations,
            ctx.candidate_files.len(),
            config_path,
            self.config_loaded,
        );

        info!(
            "Analysis complete: {} violations in {} files",
            report.summary.error_count, report.summary.scanned_files
        );

        Ok(report)
    }

    /// Builds the per-run context: walk, candidate selection, content reads
    /// and alias discovery.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze`].
    pub fn build_context(&self) -> Result<LintContext, AnalyzerError> {
        if !self.root.is_dir() {
            return Err(AnalyzerError::Root {
                path: self.root.clone(),
            });
        }

        let (files, dirs) = self.walk()?;
        let mut ctx = LintContext::new(self.root.clone(), self.config.clone());
        if self.discover_aliases {
            let discovered = discover_aliases(&self.root);
            ctx = ctx.with_discovered_aliases(&discovered.aliases);
        }
        ctx = ctx.with_entries(files, dirs);

        let mut contents = HashMap::new();
        for path in ctx.candidate_files.iter().filter(|p| is_parseable(p)) {
            let bytes = std::fs::read(path).map_err(|source| AnalyzerError::Io {
                path: path.clone(),
                source,
            })?;
            // Invalid UTF-8 is replaced, not fatal.
            contents.insert(path.clone(), String::from_utf8_lossy(&bytes).into_owned());
        }

        Ok(ctx.with_contents(contents))
    }

    /// Walks the root, skipping ignored directory names and `.DS_Store`.
    fn walk(&self) -> Result<(Vec<PathBuf>, Vec<PathBuf>), AnalyzerError> {
        let ignore = &self.config.ignore_dirs;
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !ignore.iter().any(|i| *i == name)
            });

        for entry in walker {
            let entry = entry?;
            if entry.file_name() == ".DS_Store" {
                continue;
            }
            let path = normalize(entry.path());
            if entry.file_type().is_dir() {
                dirs.push(path);
            } else if entry.file_type().is_file() {
                files.push(path);
            }
        }

        debug!("Walked {} files and {} directories", files.len(), dirs.len());
        Ok((files, dirs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().is_absolute());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let analyzer = Analyzer::builder()
            .root(dir.path().join("nope"))
            .build()
            .unwrap();
        assert!(matches!(analyzer.analyze(), Err(AnalyzerError::Root { .. })));
    }

    #[test]
    fn test_walk_skips_ignored_dirs_and_ds_store() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/_pages/home/home.tsx", "export {}");
        touch(dir.path(), "src/_pages/home/.DS_Store", "");
        touch(dir.path(), "node_modules/pkg/_utils/x.ts", "");
        touch(dir.path(), "linter/_pages/y.ts", "");
        touch(dir.path(), "src/_pages/home/logo.svg", "<svg/>");

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .discover_aliases(false)
            .build()
            .unwrap();
        let ctx = analyzer.build_context().unwrap();

        let rel: Vec<String> = ctx.candidate_files.iter().map(|p| ctx.relative(p)).collect();
        assert_eq!(rel, vec!["src/_pages/home/home.tsx", "src/_pages/home/logo.svg"]);
        assert_eq!(ctx.content(&ctx.candidate_files[0]), "export {}");
        assert_eq!(ctx.content(&ctx.candidate_files[1]), "");
        assert!(ctx.dirs.iter().all(|d| !d.ends_with("node_modules")));
    }

    #[test]
    fn test_invalid_utf8_is_read_lossily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src/_pages/home/home.tsx");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"// caf\xe9 comment\nexport {}\n").unwrap();

        let ctx = Analyzer::builder()
            .root(dir.path())
            .discover_aliases(false)
            .build()
            .unwrap()
            .build_context()
            .unwrap();

        assert_eq!(
            ctx.content(&ctx.candidate_files[0]),
            "// caf\u{FFFD} comment\nexport {}\n"
        );
    }

    #[test]
    fn test_empty_tree_reports_nothing() {
        let dir = TempDir::new().unwrap();
        let report = Analyzer::builder()
            .root(dir.path())
            .loaded_config(LoadedConfig {
                config: Config::default(),
                path: dir.path().join("fla-lint.config.json"),
                loaded: false,
            })
            .build()
            .unwrap()
            .analyze()
            .unwrap();

        assert!(!report.has_errors());
        assert_eq!(report.summary.scanned_files, 0);
        assert_eq!(report.summary.config_path, "fla-lint.config.json");
        assert!(!report.summary.config_loaded);
    }
}
