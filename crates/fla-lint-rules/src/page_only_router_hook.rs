//! Rule confining router hooks to the page layer.
//!
//! # Rationale
//!
//! Navigation state (`useRouter`, `useSearchParams`, `usePathname`, ...)
//! is read in pages and passed down. Lower layers that call router hooks
//! directly become tied to the routing library and to a specific URL shape.
//!
//! # Detected Patterns
//!
//! Only hooks imported from a configured router module count:
//!
//! ```text
//! import { useRouter } from "next/router";        useRouter()
//! import { useParams as p } from "react-router";  p() is not a hook name
//! import * as nav from "next/navigation";         nav.usePathname()
//! import useNav from "react-router-dom/nav";      useNav?.()
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use fla_lint_core::scan::mask_source;
use fla_lint_core::utils::{line_column, GlobSet};
use fla_lint_core::{Config, FileContext, FileRule, LintContext, Violation, PAGE_LAYER};
use regex::Regex;

/// Rule code for page-only-router-hook.
pub const CODE: &str = "FLA010";

/// Rule name for page-only-router-hook.
pub const NAME: &str = "page-only-router-hook";

const IDENT: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";

static IMPORT_CLAUSE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(r#"\bimport\s+(?:type\s+)?([^;'"`]*?)\s*\bfrom\s*(?:"([^"\n]*)"|'([^'\n]*)')"#)
});
static NAMESPACE_IMPORT: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(&format!(r"\*\s*as\s+({IDENT})")));
static NAMED_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"\{([^}]*)\}"));
static NAMED_ENTRY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(&format!(r"^(?:type\s+)?({IDENT})(?:\s+as\s+({IDENT}))?$"))
});
static DIRECT_CALL: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(&format!(r"\b({IDENT})\s*(?:\?\.)?\s*\(")));
static NAMESPACE_CALL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(&format!(r"\b({IDENT})\s*\.\s*({IDENT})\s*(?:\?\.)?\s*\("))
});
static HOOK_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^use[A-Z0-9_$][A-Za-z0-9_$]*$"));
static IDENTIFIER: LazyLock<Option<Regex>> = LazyLock::new(|| compile(&format!("^{IDENT}$")));

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Invalid router hook pattern {}: {}", pattern, e);
            None
        }
    }
}

fn is_match(re: &Option<Regex>, value: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(value))
}

/// Returns true for `useX`-style hook names.
#[must_use]
pub fn is_router_hook(name: &str) -> bool {
    is_match(&HOOK_NAME, name)
}

/// Names bound by imports from router modules.
#[derive(Debug, Default, PartialEq, Eq)]
struct RouterImports {
    hooks: Vec<String>,
    namespaces: Vec<String>,
}

impl RouterImports {
    fn is_empty(&self) -> bool {
        self.hooks.is_empty() && self.namespaces.is_empty()
    }

    fn add_hook(&mut self, name: &str) {
        if is_router_hook(name) && !self.hooks.iter().any(|h| h == name) {
            self.hooks.push(name.to_string());
        }
    }

    fn collect(source: &str, masked: &str, modules: &GlobSet) -> Self {
        let mut found = Self::default();
        let Some(import_clause) = &*IMPORT_CLAUSE else {
            return found;
        };

        for caps in import_clause.captures_iter(masked) {
            let Some(quoted) = caps.get(2).or_else(|| caps.get(3)) else {
                continue;
            };
            let specifier = source.get(quoted.range()).unwrap_or_default().trim();
            if !modules.is_match(specifier) {
                continue;
            }
            let clause = caps.get(1).map_or("", |m| m.as_str());
            found.add_clause(clause);
        }

        found
    }

    fn add_clause(&mut self, clause: &str) {
        let mut rest = clause.to_string();

        if let Some(re) = &*NAMESPACE_IMPORT {
            for caps in re.captures_iter(clause) {
                if let Some(alias) = caps.get(1) {
                    self.namespaces.push(alias.as_str().to_string());
                }
            }
            rest = re.replace_all(&rest, " ").into_owned();
        }

        if let Some(re) = &*NAMED_BLOCK {
            if let Some(block) = re.captures(clause).and_then(|c| c.get(1)) {
                for entry in block.as_str().split(',').map(str::trim) {
                    if entry.is_empty() || entry.starts_with("...") {
                        continue;
                    }
                    let Some(caps) = (*NAMED_ENTRY).as_ref().and_then(|re| re.captures(entry)) else {
                        continue;
                    };
                    if let Some(local) = caps.get(2).or_else(|| caps.get(1)) {
                        self.add_hook(local.as_str());
                    }
                }
            }
            rest = re.replace_all(&rest, " ").into_owned();
        }

        for item in rest.split(',').map(str::trim) {
            if item != "type" && is_match(&IDENTIFIER, item) {
                self.add_hook(item);
            }
        }
    }
}

/// Forbids router hook calls outside the page layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOnlyRouterHook;

impl PageOnlyRouterHook {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Byte offsets and names of router hook calls in `source`.
    fn hook_calls(source: &str, modules: &GlobSet) -> BTreeMap<usize, String> {
        let masked = mask_source(source);
        let imports = RouterImports::collect(source, &masked, modules);
        let mut calls = BTreeMap::new();
        if imports.is_empty() {
            return calls;
        }
        let bytes = masked.as_bytes();

        if let Some(re) = &*DIRECT_CALL {
            for caps in re.captures_iter(&masked) {
                let Some(name) = caps.get(1) else {
                    continue;
                };
                if !imports.hooks.iter().any(|h| h == name.as_str()) {
                    continue;
                }
                // `x.useRouter()` is a member call, not the imported binding.
                if name.start() > 0 && matches!(bytes[name.start() - 1], b'.' | b'$') {
                    continue;
                }
                calls.insert(name.start(), name.as_str().to_string());
            }
        }

        if let Some(re) = &*NAMESPACE_CALL {
            for caps in re.captures_iter(&masked) {
                let (Some(namespace), Some(hook)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                if !imports.namespaces.iter().any(|n| n == namespace.as_str())
                    || !is_router_hook(hook.as_str())
                {
                    continue;
                }
                calls.insert(hook.start(), hook.as_str().to_string());
            }
        }

        calls
    }
}

impl FileRule for PageOnlyRouterHook {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Allows router hooks only in the _pages layer"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.page_only_router_hook.enabled
    }

    fn check(&self, file: &FileContext<'_>, ctx: &LintContext) -> Vec<Violation> {
        if !file.is_parseable() {
            return Vec::new();
        }
        match ctx.module_info(file.path) {
            Some(info) if info.layer != PAGE_LAYER => {}
            _ => return Vec::new(),
        }

        let modules = GlobSet::new(&ctx.config.page_only_router_hook.router_modules);
        Self::hook_calls(file.content, &modules)
            .into_iter()
            .map(|(offset, hook)| {
                let (line, column) = line_column(file.content, offset);
                file.violation(
                    CODE,
                    line,
                    column,
                    format!("Router hook '{hook}' is only allowed in {PAGE_LAYER} layers."),
                )
            })
            .collect()
    }
}
