//! Rule flagging shared modules that too few consumers use.
//!
//! # Rationale
//!
//! A module placed at a shared scope (for example `src/_states/search` or
//! `src/_pages/home/_components/card`) should be used by enough distinct
//! consumers to justify that placement. Otherwise it belongs next to its
//! only consumer.
//!
//! # Algorithm
//!
//! 1. Every module in a tracked layer (default `_states`, `_components`) is
//!    identified by its scoped key, e.g. `_pages/home/_states/search`.
//! 2. For every downward edge into such a module (source rank strictly
//!    greater than target rank) the importing file's consumer scope is
//!    recorded: its nearest container module, else its nearest page module,
//!    else the importing module itself.
//! 3. A module with no recorded scope, or with no walked file, is skipped. A module with at least
//!    `minUpperModuleReferences` distinct scopes passes. A module with one
//!    scope that already contains it passes. Everything else is reported at
//!    the first file of the module.

use std::collections::{BTreeMap, BTreeSet};

use fla_lint_core::{
    collect_edges, is_layer, is_parseable, Config, ConsumerScope, LintContext, Location, RepoRule,
    Violation,
};
use tracing::debug;

/// Rule code for single-use-global-module.
pub const CODE: &str = "FLA006";

/// Rule name for single-use-global-module.
pub const NAME: &str = "single-use-global-module";

/// Flags shared modules referenced by fewer than the configured number of
/// distinct consumer scopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleUseGlobalModule;

impl SingleUseGlobalModule {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Incoming references to one tracked module.
#[derive(Debug)]
struct Usage {
    layer: String,
    scopes: BTreeSet<ConsumerScope>,
}

impl RepoRule for SingleUseGlobalModule {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires shared modules to be used by enough distinct consumer scopes"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.single_use_global.enabled
    }

    fn check_repo(&self, ctx: &LintContext) -> Vec<Violation> {
        let settings = &ctx.config.single_use_global;
        let tracked = &settings.layers;

        // First walked file of every tracked module.
        let mut module_files: BTreeMap<String, String> = BTreeMap::new();
        for path in &ctx.candidate_files {
            let Some(info) = ctx.module_info(path) else {
                continue;
            };
            if !is_layer(&info.layer, tracked) {
                continue;
            }
            if let Some(key) = info.scoped_key {
                module_files
                    .entry(key)
                    .and_modify(|first| {
                        if info.relative_path < *first {
                            first.clone_from(&info.relative_path);
                        }
                    })
                    .or_insert(info.relative_path);
            }
        }

        let mut usage: BTreeMap<String, Usage> = BTreeMap::new();
        for path in ctx.candidate_files.iter().filter(|p| is_parseable(p)) {
            for edge in collect_edges(ctx, path, ctx.content(path)) {
                if !is_layer(&edge.target.layer, tracked) {
                    continue;
                }
                let downward = matches!(
                    (edge.source.rank, edge.target.rank),
                    (Some(s), Some(t)) if s > t
                );
                if !downward {
                    continue;
                }
                let (Some(key), Some(scope)) =
                    (edge.target.scoped_key.clone(), edge.source.consumer_scope())
                else {
                    continue;
                };

                let entry = usage.entry(key).or_insert_with(|| Usage {
                    layer: edge.target.layer.clone(),
                    scopes: BTreeSet::new(),
                });
                entry.scopes.insert(scope);
            }
        }

        debug!("Tracked {} referenced modules", usage.len());

        let mut violations = Vec::new();
        for (key, used) in usage {
            // References that resolve to no walked file are not modules.
            let Some(file) = module_files.get(&key) else {
                continue;
            };
            let count = used.scopes.len();
            if count >= settings.min_upper_module_references {
                continue;
            }
            if let [only] = used.scopes.iter().collect::<Vec<_>>().as_slice() {
                if only.contains(&key) {
                    continue;
                }
            }

            violations.push(Violation::new(
                CODE,
                Location::file_start(file.clone()),
                message(&key, &used),
            ));
        }

        violations
    }
}

fn message(key: &str, used: &Usage) -> String {
    let scopes = used
        .scopes
        .iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let head = format!(
        "Global module '{key}' is referenced by only {} upper-layer scope(s): {scopes}.",
        used.scopes.len()
    );

    let hint = match used.scopes.iter().collect::<Vec<_>>().as_slice() {
        [ConsumerScope::Container(scope)] => format!(
            "Move it into its only consuming container: '{scope}/{}/'.",
            used.layer
        ),
        [ConsumerScope::Page(scope)] => format!(
            "Move it into its only consuming page: '{scope}/{}/'.",
            used.layer
        ),
        _ => "Consider nesting it closer to its usage scope.".to_string(),
    };

    format!("{head} {hint}")
}
