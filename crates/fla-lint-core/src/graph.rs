//! Import edges between layer-scoped modules.

use std::path::Path;

use crate::context::LintContext;
use crate::module_info::ModuleInfo;
use crate::resolve::resolve_specifier;
use crate::scan::{extract_specifiers, SpecifierKind};
use crate::utils::text::line_column;

/// A resolved reference from one layer-scoped file to another layer-scoped
/// location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    /// The importing file.
    pub source: ModuleInfo,
    /// The resolved target (usually extensionless).
    pub target: ModuleInfo,
    /// Specifier as written.
    pub specifier: String,
    /// Syntactic form of the reference.
    pub kind: SpecifierKind,
    /// 1-based line of the specifier.
    pub line: usize,
    /// 1-based column of the first character inside the quotes.
    pub column: usize,
}

/// Collects edges out of `path`, whose text is `content`.
///
/// External specifiers, unresolved aliases and targets outside every layer
/// produce no edge. A file outside every layer has no edges.
#[must_use]
pub fn collect_edges(ctx: &LintContext, path: &Path, content: &str) -> Vec<ImportEdge> {
    let Some(source) = ctx.module_info(path) else {
        return Vec::new();
    };

    extract_specifiers(content)
        .into_iter()
        .filter_map(|found| {
            let resolved = resolve_specifier(&found.specifier, path, &ctx.root, &ctx.aliases)?;
            let target = ctx.module_info(&resolved)?;
            let (line, column) = line_column(content, found.offset);
            Some(ImportEdge {
                source: source.clone(),
                target,
                specifier: found.specifier,
                kind: found.kind,
                line,
                column,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::PathBuf;

    fn ctx() -> LintContext {
        let mut config = Config::default();
        config.path_aliases.insert("@/*".into(), "src/*".into());
        LintContext::new(PathBuf::from("/repo"), config)
    }

    #[test]
    fn test_edges_only_between_layers() {
        let ctx = ctx();
        let path = Path::new("/repo/src/_pages/home/home.tsx");
        let content = r#"import React from "react";
import { cart } from "../../_states/cart/cart";
import { fmt } from "@/_utils/format/format";
import { x } from "../../lib/x";
import { y } from "@unknown/y";
"#;
        let edges = collect_edges(&ctx, path, content);
        let targets: Vec<_> = edges
            .iter()
            .map(|e| e.target.module_key.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(targets, vec!["_states/cart", "_utils/format"]);

        assert_eq!(edges[0].source.layer, "_pages");
        assert_eq!(edges[0].target.rank, Some(3));
        assert_eq!((edges[0].line, edges[0].column), (2, 23));
        assert_eq!(edges[1].specifier, "@/_utils/format/format");
    }

    #[test]
    fn test_file_outside_layers_has_no_edges() {
        let ctx = ctx();
        let edges = collect_edges(
            &ctx,
            Path::new("/repo/src/lib/x.ts"),
            "import a from '../_states/a/a';",
        );
        assert!(edges.is_empty());
    }
}
