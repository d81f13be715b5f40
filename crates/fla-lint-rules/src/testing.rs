//! In-memory contexts for rule unit tests.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use fla_lint_core::{is_parseable, Config, LintContext, LintRule, Violation};

pub(crate) const ROOT: &str = "/repo";

/// Builds a context from `(relative path, content)` pairs. Every ancestor
/// directory of a file is walked, plus any `extra_dirs`.
pub(crate) fn context_with(config: Config, files: &[(&str, &str)], extra_dirs: &[&str]) -> LintContext {
    let root = PathBuf::from(ROOT);
    let mut dirs: BTreeSet<PathBuf> = BTreeSet::new();
    dirs.insert(root.clone());

    let mut paths = Vec::new();
    let mut contents = HashMap::new();
    for (rel, content) in files {
        let path = root.join(rel);
        add_ancestors(&root, &path, &mut dirs);
        if is_parseable(&path) {
            contents.insert(path.clone(), (*content).to_string());
        }
        paths.push(path);
    }
    for rel in extra_dirs {
        let dir = root.join(rel);
        add_ancestors(&root, &dir, &mut dirs);
        dirs.insert(dir);
    }

    LintContext::new(root, config)
        .with_entries(paths, dirs.into_iter().collect())
        .with_contents(contents)
}

pub(crate) fn context(files: &[(&str, &str)]) -> LintContext {
    context_with(Config::default(), files, &[])
}

/// Runs `rule` and returns its violations in report order.
pub(crate) fn run(rule: &LintRule, ctx: &LintContext) -> Vec<Violation> {
    let mut found = rule.run(ctx);
    found.sort();
    found
}

fn add_ancestors(root: &Path, path: &Path, dirs: &mut BTreeSet<PathBuf>) {
    let mut current = path.parent();
    while let Some(dir) = current {
        if !dir.starts_with(root) {
            break;
        }
        dirs.insert(dir.to_path_buf());
        current = dir.parent();
    }
}
