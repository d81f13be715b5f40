//! # fla-lint-rules
//!
//! Built-in rules for fla-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Kind | Description |
//! |------|------|------|-------------|
//! | FLA001 | `extension-suffix` | file | Restricts extensions and dotted filename suffixes |
//! | FLA002 | `interface-placement` | file | Confines `interface`/`type`/`enum` to `interfaceAllowedGlobs` |
//! | FLA003 | `layer-reference` | file | Forbids references from a lower layer into a higher one |
//! | FLA004 | `no-barrel-index` | file | Forbids `index.*` barrel files |
//! | FLA005 | `nested-layer-directory` | repo | Requires a module directory between nested layers |
//! | FLA006 | `single-use-global-module` | repo | Requires shared modules to have enough distinct consumers |
//! | FLA007 | `kebab-case-naming` | repo | Requires kebab-case names under layer directories |
//! | FLA008 | `layer-directory-naming` | repo | Requires underscore-prefixed layer directory names |
//! | FLA009 | `module-grouping` | repo | Forbids mixing directory and file modules in one layer |
//! | FLA010 | `page-only-router-hook` | file | Allows router hooks only in `_pages` |
//!
//! ## Usage
//!
//! ```ignore
//! use fla_lint_core::Analyzer;
//! use fla_lint_rules::all_rules;
//! use fla_lint_ts::Accelerator;
//!
//! let report = Analyzer::builder()
//!     .root("./src")
//!     .rules(all_rules(Accelerator::shared()))
//!     .build()?
//!     .analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extension_suffix;
mod interface_placement;
mod kebab_case_naming;
mod layer_directory_naming;
mod layer_reference;
mod module_grouping;
mod nested_layer_directory;
mod no_barrel_index;
mod page_only_router_hook;
mod single_use_global_module;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use fla_lint_ts::Accelerator;

pub use extension_suffix::ExtensionSuffix;
pub use interface_placement::InterfacePlacement;
pub use kebab_case_naming::KebabCaseNaming;
pub use layer_directory_naming::LayerDirectoryNaming;
pub use layer_reference::LayerReference;
pub use module_grouping::ModuleGrouping;
pub use nested_layer_directory::NestedLayerDirectory;
pub use no_barrel_index::NoBarrelIndex;
pub use page_only_router_hook::{is_router_hook, PageOnlyRouterHook};
pub use single_use_global_module::SingleUseGlobalModule;

/// Re-export core types for convenience.
pub use fla_lint_core::{LintRule, RuleKind, Violation};

/// Returns every built-in rule: file rules first, then repo rules.
///
/// The accelerator handle is shared by the rules that can use a syntax
/// tree; pass one handle per run.
#[must_use]
pub fn all_rules(accelerator: Arc<Accelerator>) -> Vec<LintRule> {
    vec![
        LintRule::file(ExtensionSuffix::new()),
        LintRule::file(InterfacePlacement::new(accelerator)),
        LintRule::file(LayerReference::new()),
        LintRule::file(NoBarrelIndex::new()),
        LintRule::file(PageOnlyRouterHook::new()),
        LintRule::repo(NestedLayerDirectory::new()),
        LintRule::repo(SingleUseGlobalModule::new()),
        LintRule::repo(KebabCaseNaming::new()),
        LintRule::repo(LayerDirectoryNaming::new()),
        LintRule::repo(ModuleGrouping::new()),
    ]
}
