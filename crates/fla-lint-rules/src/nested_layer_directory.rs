//! Rule requiring a module directory between nested layers.
//!
//! `_pages/_states` is rejected; `_pages/home/_states` is fine.

use fla_lint_core::{is_layer, Config, LintContext, Location, RepoRule, Violation};

/// Rule code for nested-layer-directory.
pub const CODE: &str = "FLA005";

/// Rule name for nested-layer-directory.
pub const NAME: &str = "nested-layer-directory";

/// Flags layer directories placed directly inside another layer directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedLayerDirectory;

impl NestedLayerDirectory {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RepoRule for NestedLayerDirectory {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids a layer directory as a direct child of another layer directory"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.nested_layer.enabled
    }

    fn check_repo(&self, ctx: &LintContext) -> Vec<Violation> {
        let layers = &ctx.config.layer_dirs;
        let mut violations = Vec::new();

        for dir in &ctx.layer_directories {
            let Some(parent) = dir.file_name().map(|n| n.to_string_lossy()) else {
                continue;
            };
            let Some(entries) = ctx.children(dir) else {
                continue;
            };

            for child in entries.dirs.iter().filter(|name| is_layer(name, layers)) {
                violations.push(Violation::new(
                    CODE,
                    Location::file_start(ctx.relative(&dir.join(child))),
                    format!(
                        "Nested layer directory '{child}' cannot be a direct child of '{parent}'. Place nested layers inside a module directory first."
                    ),
                ));
            }
        }

        violations
    }
}
