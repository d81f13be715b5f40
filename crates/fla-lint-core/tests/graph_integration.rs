//! Integration test: walk → context → import edges, with aliases discovered
//! from a real `tsconfig.json` chain.

use fla_lint_core::{
    collect_edges, Analyzer, Config, FileContext, FileRule, LintContext, LintRule, Violation,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("create fixture dir");
    fs::write(path, content).expect("write fixture file");
}

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    write(
        root,
        "tsconfig.base.json",
        r#"{
            // shared options
            "compilerOptions": { "baseUrl": ".", "paths": { "~/*": ["src/*"], } }
        }"#,
    );
    write(
        root,
        "tsconfig.json",
        r#"{ "extends": "./tsconfig.base", "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
    );
    write(
        root,
        "src/_pages/home/home.tsx",
        r#"import { useCart } from "@/_states/cart/cart";
import { fmt } from "~/_utils/format/format";
import { Button } from "../../_components/button/button";
import React from "react";
"#,
    );
    write(root, "src/_states/cart/cart.ts", "export const useCart = () => 1;\n");
    write(root, "src/_utils/format/format.ts", "export const fmt = String;\n");
    write(root, "src/_components/button/button.tsx", "export const Button = 1;\n");
    dir
}

#[test]
fn edges_resolve_through_discovered_aliases() {
    let dir = fixture();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .build()
        .expect("analyzer should build");
    let ctx = analyzer.build_context().expect("context should build");

    let home = ctx
        .candidate_files
        .iter()
        .find(|p| p.ends_with("home.tsx"))
        .expect("home page is a candidate")
        .clone();

    let edges = collect_edges(&ctx, &home, ctx.content(&home));
    let keys: Vec<&str> = edges
        .iter()
        .filter_map(|e| e.target.module_key.as_deref())
        .collect();
    assert_eq!(keys, vec!["_states/cart", "_utils/format", "_components/button"]);
    assert!(edges.iter().all(|e| e.source.rank == Some(5)));
}

#[test]
fn configured_aliases_override_discovered_ones() {
    let dir = fixture();
    let mut config = Config::default();
    config
        .path_aliases
        .insert("@/*".into(), "src/_components/*".into());

    let ctx = Analyzer::builder()
        .root(dir.path())
        .config(config)
        .build()
        .expect("analyzer should build")
        .build_context()
        .expect("context should build");

    let resolved = ctx.aliases.resolve("@/button/button", &ctx.root);
    assert_eq!(
        resolved,
        Some(ctx.root.join("src/_components/button/button"))
    );
}

struct ImportCount;

impl FileRule for ImportCount {
    fn id(&self) -> &'static str {
        "TEST100"
    }
    fn name(&self) -> &'static str {
        "import-count"
    }
    fn check(&self, file: &FileContext<'_>, ctx: &LintContext) -> Vec<Violation> {
        collect_edges(ctx, file.path, file.content)
            .into_iter()
            .map(|e| file.violation(self.id(), e.line, e.column, e.specifier))
            .collect()
    }
}

#[test]
fn analyze_is_sorted_and_idempotent() {
    let dir = fixture();
    let run = || {
        Analyzer::builder()
            .root(dir.path())
            .rule(LintRule::file(ImportCount))
            .build()
            .expect("analyzer should build")
            .analyze()
            .expect("analysis should succeed")
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(first.summary.scanned_files, 4);
    assert_eq!(first.summary.error_count, 3);

    let lines: Vec<usize> = first.violations.iter().map(|v| v.location.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert_eq!(first.violations[0].location.column, 26);
}
