//! Rule requiring kebab-case names under layer directories.
//!
//! # Detected Patterns
//!
//! - Directories whose name is not kebab-case (layer names and
//!   `_`-prefixed names are left to `FLA008`)
//! - Files whose module name (first dot-token) is not kebab-case
//! - Files with a dotted suffix token that is not kebab-case
//! - Any other file whose relative path contains an uppercase letter,
//!   reported once per file

use fla_lint_core::utils::{is_kebab_case, split_file_name, split_segments};
use fla_lint_core::{is_layer, Config, LintContext, Location, RepoRule, Violation};

/// Rule code for kebab-case-naming.
pub const CODE: &str = "FLA007";

/// Rule name for kebab-case-naming.
pub const NAME: &str = "kebab-case-naming";

/// Requires kebab-case directory and file names in layer scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct KebabCaseNaming;

impl KebabCaseNaming {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_dirs(ctx: &LintContext, violations: &mut Vec<Violation>) {
        let layers = &ctx.config.layer_dirs;

        for dir in &ctx.dirs {
            let rel = ctx.relative(dir);
            if rel.is_empty() || !ctx.in_layer_scope(&rel) {
                continue;
            }
            let Some(name) = dir.file_name().map(|n| n.to_string_lossy()) else {
                continue;
            };
            if is_layer(&name, layers) || name.starts_with('_') || is_kebab_case(&name) {
                continue;
            }
            violations.push(Violation::new(
                CODE,
                Location::file_start(rel.clone()),
                format!("Directory name '{name}' must be kebab-case."),
            ));
        }
    }

    fn check_file(rel: &str, file_name: &str) -> Vec<String> {
        let (stem, _) = split_file_name(file_name);
        let mut tokens = stem.split('.');
        let module_name = tokens.next().unwrap_or_default();

        if !is_kebab_case(module_name) {
            return vec![format!("File module name '{module_name}' must be kebab-case.")];
        }

        let messages: Vec<String> = tokens
            .filter(|token| !is_kebab_case(token))
            .map(|token| format!("File suffix token '{token}' must be kebab-case."))
            .collect();
        if !messages.is_empty() {
            return messages;
        }

        if split_segments(rel)
            .iter()
            .any(|seg| seg.chars().any(char::is_uppercase))
        {
            return vec![
                "Path segments under layer directories must use lowercase kebab-case.".to_string(),
            ];
        }

        Vec::new()
    }
}

impl RepoRule for KebabCaseNaming {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires kebab-case directory and file names under layer directories"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.naming_convention.enabled
    }

    fn check_repo(&self, ctx: &LintContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        Self::check_dirs(ctx, &mut violations);

        for path in &ctx.candidate_files {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let rel = ctx.relative(path);
            for message in Self::check_file(&rel, file_name) {
                violations.push(Violation::new(CODE, Location::file_start(rel.clone()), message));
            }
        }

        violations
    }
}
