//! Rule forbidding barrel files (`index.*`) under layer directories.

use fla_lint_core::{FileContext, FileRule, LintContext, Violation};

/// Rule code for no-barrel-index.
pub const CODE: &str = "FLA004";

/// Rule name for no-barrel-index.
pub const NAME: &str = "no-barrel-index";

/// Forbids `index.*` files in layer directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBarrelIndex;

impl NoBarrelIndex {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FileRule for NoBarrelIndex {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids barrel files (index.*) in layer directories"
    }

    fn check(&self, file: &FileContext<'_>, _ctx: &LintContext) -> Vec<Violation> {
        if !file.file_name.to_lowercase().starts_with("index.") {
            return Vec::new();
        }
        vec![file.violation(
            CODE,
            1,
            1,
            "Barrel files are forbidden in layer directories (index.*).",
        )]
    }
}
