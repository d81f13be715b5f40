//! Rule traits for defining lint rules.
//!
//! Rules come in two kinds. A [`FileRule`] looks at one candidate file at a
//! time; a [`RepoRule`] looks at the whole walked tree once. Both are pure:
//! they read the shared [`LintContext`] and return violations.
//!
//! [`LintRule`] closes the two kinds into one tagged variant with a single
//! [`LintRule::run`] entry point.

use rayon::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::context::{FileContext, LintContext};
use crate::types::Violation;

/// A per-file lint rule.
///
/// # Example
///
/// ```ignore
/// use fla_lint_core::{FileContext, FileRule, LintContext, Violation};
///
/// pub struct NoTodoFiles;
///
/// impl FileRule for NoTodoFiles {
///     fn id(&self) -> &'static str { "X001" }
///     fn name(&self) -> &'static str { "no-todo-files" }
///
///     fn check(&self, file: &FileContext, _ctx: &LintContext) -> Vec<Violation> {
///         if file.file_name.starts_with("todo") {
///             vec![file.violation(self.id(), 1, 1, "Rename this file.")]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait FileRule: Send + Sync {
    /// Returns the rule id (e.g., "FLA001").
    fn id(&self) -> &'static str;

    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether the rule's own sub-configuration enables it.
    fn enabled(&self, _config: &Config) -> bool {
        true
    }

    /// Checks a single candidate file.
    fn check(&self, file: &FileContext<'_>, ctx: &LintContext) -> Vec<Violation>;
}

/// Type alias for boxed [`FileRule`] trait objects.
pub type FileRuleBox = Box<dyn FileRule>;

/// A whole-tree lint rule.
pub trait RepoRule: Send + Sync {
    /// Returns the rule id (e.g., "FLA005").
    fn id(&self) -> &'static str;

    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether the rule's own sub-configuration enables it.
    fn enabled(&self, _config: &Config) -> bool {
        true
    }

    /// Checks the whole tree.
    fn check_repo(&self, ctx: &LintContext) -> Vec<Violation>;
}

/// Type alias for boxed [`RepoRule`] trait objects.
pub type RepoRuleBox = Box<dyn RepoRule>;

/// Rule kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Evaluated once per candidate file.
    File,
    /// Evaluated once per run.
    Repo,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Repo => write!(f, "repo"),
        }
    }
}

/// A registered rule of either kind.
pub enum LintRule {
    /// A per-file rule.
    File(FileRuleBox),
    /// A whole-tree rule.
    Repo(RepoRuleBox),
}

impl LintRule {
    /// Wraps a file rule.
    #[must_use]
    pub fn file<R: FileRule + 'static>(rule: R) -> Self {
        Self::File(Box::new(rule))
    }

    /// Wraps a repo rule.
    #[must_use]
    pub fn repo<R: RepoRule + 'static>(rule: R) -> Self {
        Self::Repo(Box::new(rule))
    }

    /// Rule id.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::File(r) => r.id(),
            Self::Repo(r) => r.id(),
        }
    }

    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::File(r) => r.name(),
            Self::Repo(r) => r.name(),
        }
    }

    /// Rule description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::File(r) => r.description(),
            Self::Repo(r) => r.description(),
        }
    }

    /// Rule kind.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::File(_) => RuleKind::File,
            Self::Repo(_) => RuleKind::Repo,
        }
    }

    /// True unless disabled through `rules.<ID>.enabled` or the rule's own
    /// sub-configuration.
    #[must_use]
    pub fn is_enabled(&self, config: &Config) -> bool {
        let own = match self {
            Self::File(r) => r.enabled(config),
            Self::Repo(r) => r.enabled(config),
        };
        own && config.is_rule_enabled(self.id())
    }

    /// Runs the rule against the context.
    ///
    /// File rules fan out over the candidate files in parallel; the returned
    /// order is unspecified and callers sort.
    #[must_use]
    pub fn run(&self, ctx: &LintContext) -> Vec<Violation> {
        if !self.is_enabled(&ctx.config) {
            debug!("Skipping disabled rule: {}", self.id());
            return Vec::new();
        }

        match self {
            Self::File(rule) => ctx
                .candidate_files
                .par_iter()
                .flat_map_iter(|path| rule.check(&ctx.file(path), ctx))
                .collect(),
            Self::Repo(rule) => rule.check_repo(ctx),
        }
    }
}

impl std::fmt::Debug for LintRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintRule")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;
    use std::path::PathBuf;

    struct EveryFile;

    impl FileRule for EveryFile {
        fn id(&self) -> &'static str {
            "TEST001"
        }
        fn name(&self) -> &'static str {
            "every-file"
        }
        fn check(&self, file: &FileContext<'_>, _ctx: &LintContext) -> Vec<Violation> {
            vec![file.violation(self.id(), 1, 1, "seen")]
        }
    }

    struct Once;

    impl RepoRule for Once {
        fn id(&self) -> &'static str {
            "TEST002"
        }
        fn name(&self) -> &'static str {
            "once"
        }
        fn description(&self) -> &'static str {
            "A repo rule"
        }
        fn enabled(&self, config: &Config) -> bool {
            config.module_grouping.enabled
        }
        fn check_repo(&self, _ctx: &LintContext) -> Vec<Violation> {
            vec![Violation::new(self.id(), Location::file_start("x"), "once")]
        }
    }

    fn ctx(config: Config) -> LintContext {
        LintContext::new("/repo", config).with_entries(
            vec![
                PathBuf::from("/repo/src/_pages/a/a.tsx"),
                PathBuf::from("/repo/src/_pages/b/b.tsx"),
                PathBuf::from("/repo/src/lib/c.ts"),
            ],
            vec![PathBuf::from("/repo")],
        )
    }

    #[test]
    fn test_file_rule_runs_per_candidate() {
        let rule = LintRule::file(EveryFile);
        assert_eq!(rule.kind(), RuleKind::File);
        let mut found = rule.run(&ctx(Config::default()));
        found.sort();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].location.file, "src/_pages/a/a.tsx");
    }

    #[test]
    fn test_repo_rule_runs_once() {
        let rule = LintRule::repo(Once);
        assert_eq!(rule.description(), "A repo rule");
        assert_eq!(rule.run(&ctx(Config::default())).len(), 1);
    }

    #[test]
    fn test_disabled_rules_do_not_run() {
        let mut config = Config::default();
        config.module_grouping.enabled = false;
        assert!(LintRule::repo(Once).run(&ctx(config)).is_empty());

        let mut config = Config::default();
        config.rules.insert(
            "TEST001".into(),
            crate::config::RuleConfig {
                enabled: Some(false),
            },
        );
        assert!(LintRule::file(EveryFile).run(&ctx(config)).is_empty());
    }
}
