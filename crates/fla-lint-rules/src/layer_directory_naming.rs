//! Rule checking the spelling of layer directories.
//!
//! # Detected Patterns
//!
//! - `pages/`, `states/`, ... anywhere in the tree (bare form of a layer)
//! - `_hooks/` and other unknown `_`-prefixed directories in layer scope

use fla_lint_core::utils::split_segments;
use fla_lint_core::{is_layer, Config, LintContext, Location, RepoRule, Violation};

/// Rule code for layer-directory-naming.
pub const CODE: &str = "FLA008";

/// Rule name for layer-directory-naming.
pub const NAME: &str = "layer-directory-naming";

/// Flags misspelled layer directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerDirectoryNaming;

impl LayerDirectoryNaming {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RepoRule for LayerDirectoryNaming {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires layer directories to use their underscore-prefixed names"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.layer_directory_naming.enabled
    }

    fn check_repo(&self, ctx: &LintContext) -> Vec<Violation> {
        let layers = &ctx.config.layer_dirs;
        let bare: Vec<&str> = layers
            .iter()
            .map(|l| l.strip_prefix('_').unwrap_or(l))
            .filter(|b| !is_layer(b, layers))
            .collect();
        let mut violations = Vec::new();

        for dir in &ctx.dirs {
            let rel = ctx.relative(dir);
            let segments = split_segments(&rel);
            let Some(name) = segments.last().copied() else {
                continue;
            };

            if bare.contains(&name) {
                violations.push(Violation::new(
                    CODE,
                    Location::file_start(rel.clone()),
                    format!("Layer directory '{name}' must use underscore-prefixed form (e.g. '_{name}')."),
                ));
            }

            let in_layer_scope = segments.iter().any(|seg| is_layer(seg, layers));
            if in_layer_scope && name.starts_with('_') && !is_layer(name, layers) {
                violations.push(Violation::new(
                    CODE,
                    Location::file_start(rel.clone()),
                    format!(
                        "Unknown underscore-prefixed directory '{name}' found in layer scope. Use one of: {}.",
                        layers.join(", ")
                    ),
                ));
            }
        }

        violations
    }
}
