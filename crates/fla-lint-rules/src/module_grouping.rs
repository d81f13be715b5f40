//! Rule requiring one module grouping style per layer directory.
//!
//! Modules inside a layer directory are either directories
//! (`_states/cart/cart.ts`) or flat files (`_states/cart.ts`), never both.
//! A module present in both forms is reported on its own as well.

use std::collections::BTreeSet;

use fla_lint_core::utils::module_name_of;
use fla_lint_core::{is_layer, Config, LintContext, Location, RepoRule, Violation};

/// Rule code for module-grouping.
pub const CODE: &str = "FLA009";

/// Rule name for module-grouping.
pub const NAME: &str = "module-grouping";

/// Flags layer directories that mix directory and file modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleGrouping;

impl ModuleGrouping {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RepoRule for ModuleGrouping {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids mixing directory-based and file-based modules in one layer directory"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.module_grouping.enabled
    }

    fn check_repo(&self, ctx: &LintContext) -> Vec<Violation> {
        let layers = &ctx.config.layer_dirs;
        let mut violations = Vec::new();

        for layer_dir in &ctx.layer_directories {
            let Some(layer) = layer_dir.file_name().map(|n| n.to_string_lossy()) else {
                continue;
            };
            let Some(entries) = ctx.children(layer_dir) else {
                continue;
            };

            let module_dirs: BTreeSet<&str> = entries
                .dirs
                .iter()
                .map(String::as_str)
                .filter(|name| !name.starts_with(['.', '_']) && !is_layer(name, layers))
                .collect();
            let module_files: BTreeSet<&str> = entries
                .files
                .iter()
                .filter(|name| !name.starts_with('.') && !name.starts_with("index."))
                .filter_map(|name| module_name_of(name))
                .collect();

            let rel = ctx.relative(layer_dir);
            if !module_dirs.is_empty() && !module_files.is_empty() {
                violations.push(Violation::new(
                    CODE,
                    Location::file_start(rel.clone()),
                    format!(
                        "Layer directory '{layer}' mixes directory-based modules and file-based modules. Use one grouping style per layer directory."
                    ),
                ));
            }

            for module in module_dirs.intersection(&module_files) {
                violations.push(Violation::new(
                    CODE,
                    Location::file_start(rel.clone()),
                    format!(
                        "Module '{module}' exists as both file and directory under '{layer}'. If a module has nested layers, keep it directory-based only."
                    ),
                ));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, run};
    use fla_lint_core::LintRule;

    fn messages(files: &[(&str, &str)]) -> Vec<String> {
        run(&LintRule::repo(ModuleGrouping::new()), &context(files))
            .into_iter()
            .map(|v| v.message)
            .collect()
    }

    #[test]
    fn test_single_style_passes() {
        assert!(messages(&[
            ("src/_states/cart/cart.ts", ""),
            ("src/_states/session/session.ts", ""),
            ("src/_utils/format.ts", ""),
            ("src/_utils/date.ts", ""),
        ])
        .is_empty());
    }

    #[test]
    fn test_flags_mixed_styles() {
        let found = messages(&[
            ("src/_states/cart/cart.ts", ""),
            ("src/_states/session.ts", ""),
        ]);
        assert_eq!(
            found,
            vec!["Layer directory '_states' mixes directory-based modules and file-based modules. Use one grouping style per layer directory."]
        );
    }

    #[test]
    fn test_flags_module_in_both_forms() {
        let ctx = context(&[
            ("src/_states/cart/cart.ts", ""),
            ("src/_states/cart.type.ts", ""),
        ]);
        let found = run(&LintRule::repo(ModuleGrouping::new()), &ctx);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|v| v.location.file == "src/_states"));
        assert_eq!(
            found[1].message,
            "Module 'cart' exists as both file and directory under '_states'. If a module has nested layers, keep it directory-based only."
        );
    }

    #[test]
    fn test_nested_layers_index_and_private_dirs_are_ignored() {
        assert!(messages(&[
            ("src/_pages/home/home.tsx", ""),
            ("src/_pages/index.ts", ""),
            ("src/_pages/_states/x/x.ts", ""),
            ("src/_pages/_shared/y.ts", ""),
        ])
        .is_empty());
    }
}
