//! Rule confining `interface`, `type` and `enum` declarations to approved
//! files.
//!
//! # Rationale
//!
//! Type-level declarations live in dedicated files (by default
//! `**/*.type.ts`) so that modules share shapes without importing each
//! other's runtime code.
//!
//! # Detection
//!
//! Declarations are located with the syntax accelerator when it is enabled
//! and loads; otherwise, and for any file the parser does not accept, the
//! masked-text scanner is used. Keywords inside comments, strings and
//! template bodies never count.

use std::sync::Arc;

use fla_lint_core::utils::GlobSet;
use fla_lint_core::{FileContext, FileRule, LintContext, Violation};
use fla_lint_ts::{Accelerator, Dialect, ScannerExtractor};

/// Rule code for interface-placement.
pub const CODE: &str = "FLA002";

/// Rule name for interface-placement.
pub const NAME: &str = "interface-placement";

const MESSAGE: &str = "'interface', 'type', and 'enum' declarations are only allowed in files matched by interfaceAllowedGlobs.";

/// Forbids type-level declarations outside `interfaceAllowedGlobs`.
#[derive(Debug, Clone)]
pub struct InterfacePlacement {
    accelerator: Arc<Accelerator>,
}

impl Default for InterfacePlacement {
    fn default() -> Self {
        Self::new(Accelerator::shared())
    }
}

impl InterfacePlacement {
    /// Creates the rule around a shared accelerator handle.
    #[must_use]
    pub fn new(accelerator: Arc<Accelerator>) -> Self {
        Self { accelerator }
    }
}

impl FileRule for InterfacePlacement {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Allows interface/type/enum declarations only in files matched by interfaceAllowedGlobs"
    }

    fn check(&self, file: &FileContext<'_>, ctx: &LintContext) -> Vec<Violation> {
        if !file.is_parseable() {
            return Vec::new();
        }
        if GlobSet::new(&ctx.config.interface_allowed_globs).is_match(&file.relative_path) {
            return Vec::new();
        }

        let declarations = if ctx.config.syntax_accelerator.enabled {
            self.accelerator
                .declarations(file.content, Dialect::from_extension(file.extension))
        } else {
            ScannerExtractor::scan(file.content)
        };

        declarations
            .into_iter()
            .map(|decl| file.violation(CODE, decl.line, decl.column, MESSAGE))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, context_with, run};
    use fla_lint_core::{Config, LintRule};

    const NOISY: &str = r#"// interface CommentInterface { a: string }
/* type CommentType = string; */
/*
 * enum CommentEnum { A }
 */
const single = 'interface SingleQuoted { a: string }';
const double = "type DoubleQuoted = number;";
const template = `
  interface FakeFromTemplate {
    text: string;
  }
  enum FakeFromTemplate { One }
`;
const mixed = `${single} type Fake = 1`;

export const value = 1;

export interface RealInterface {
  id: string;
}

type RealType = string;

export const label: RealType = "x";

enum RealEnum {
  A,
}
"#;

    fn positions(found: &[Violation]) -> Vec<(usize, usize)> {
        found
            .iter()
            .map(|v| (v.location.line, v.location.column))
            .collect()
    }

    #[test]
    fn test_reports_real_declarations_only() {
        let ctx = context(&[("src/_components/card/card.tsx", NOISY)]);
        let found = run(&LintRule::file(InterfacePlacement::default()), &ctx);
        assert_eq!(positions(&found), vec![(18, 8), (22, 1), (26, 1)]);
        assert!(found.iter().all(|v| v.message == MESSAGE));
    }

    #[test]
    fn test_scanner_path_matches_accelerated_path() {
        let mut config = Config::default();
        config.syntax_accelerator.enabled = false;
        let ctx = context_with(config, &[("src/_components/card/card.tsx", NOISY)], &[]);
        let found = run(&LintRule::file(InterfacePlacement::default()), &ctx);
        assert_eq!(positions(&found), vec![(18, 8), (22, 1), (26, 1)]);
    }

    #[test]
    fn test_unavailable_accelerator_never_skips_files() {
        let rule = InterfacePlacement::new(Arc::new(Accelerator::disabled()));
        let ctx = context(&[("src/_states/search/search.ts", "export type SearchState = { q: string };\n")]);
        let found = run(&LintRule::file(rule), &ctx);
        assert_eq!(positions(&found), vec![(1, 8)]);
    }

    #[test]
    fn test_allowed_globs_exempt_files() {
        let ctx = context(&[
            ("src/_pages/home/_components/search-landing/search-landing.type.ts", "export type Props = { q: string };\n"),
        ]);
        assert!(run(&LintRule::file(InterfacePlacement::default()), &ctx).is_empty());
    }

    #[test]
    fn test_non_parseable_files_are_skipped() {
        let ctx = context(&[("src/_components/card/card.css", "interface X {}")]);
        assert!(run(&LintRule::file(InterfacePlacement::default()), &ctx).is_empty());
    }
}
