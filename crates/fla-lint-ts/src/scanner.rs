//! Text-scanning declaration extractor.
//!
//! Works on masked source (comments and string bodies blanked) and never
//! fails, which makes it the fallback whenever the syntax tree is not
//! available or not trustworthy.

use std::sync::LazyLock;

use fla_lint_core::scan::mask_source;
use regex::Regex;

use crate::extractor::{DeclKind, Declaration, DeclarationExtractor, Dialect, ExtractError};

const IDENT: &str = r"[A-Za-z_$][\w$]*";

static PATTERNS: LazyLock<Vec<(DeclKind, Regex)>> = LazyLock::new(|| {
    [
        (
            DeclKind::Interface,
            format!(r"\binterface\s+({IDENT})\s*(?:<[^{{;]*?>\s*)?(?:extends\b|\{{)"),
        ),
        (
            DeclKind::TypeAlias,
            format!(r"\btype\s+({IDENT})\s*(?:<[^;{{}}]*?>\s*)?="),
        ),
        (
            DeclKind::Enum,
            format!(r"\b(?:const\s+)?enum\s+({IDENT})\s*\{{"),
        ),
    ]
    .into_iter()
    .filter_map(|(kind, pattern)| match Regex::new(&pattern) {
        Ok(re) => Some((kind, re)),
        Err(e) => {
            tracing::warn!("Invalid declaration pattern {}: {}", pattern, e);
            None
        }
    })
    .collect()
});

/// Regex-based extractor over masked source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScannerExtractor;

impl ScannerExtractor {
    /// Creates a new scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extracts declarations; infallible.
    #[must_use]
    pub fn scan(source: &str) -> Vec<Declaration> {
        let masked = mask_source(source);
        let bytes = masked.as_bytes();
        let mut found = Vec::new();

        for (kind, re) in PATTERNS.iter() {
            for caps in re.captures_iter(&masked) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                // `obj.type = ...` or `$enum {` is a member access, not a declaration.
                if whole.start() > 0 && matches!(bytes[whole.start() - 1], b'.' | b'$') {
                    continue;
                }
                found.push(Declaration::at(*kind, name.as_str(), source, whole.start()));
            }
        }

        found.sort_by_key(|d| d.offset);
        found
    }
}

impl DeclarationExtractor for ScannerExtractor {
    fn strategy(&self) -> &'static str {
        "scanner"
    }

    fn extract(&self, source: &str, _dialect: Dialect) -> Result<Vec<Declaration>, ExtractError> {
        Ok(Self::scan(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(src: &str) -> Vec<(DeclKind, String)> {
        ScannerExtractor::scan(src)
            .into_iter()
            .map(|d| (d.kind, d.name))
            .collect()
    }

    #[test]
    fn finds_declarations() {
        let src = r"
export interface Props extends Base { a: string }
interface Generic<T extends object> { t: T }
type Id = string;
type Box<T = string, U extends Array<T> = T[]> = { t: T; u: U };
export const enum Mode { A }
enum Plain { B }
";
        assert_eq!(
            names(src),
            vec![
                (DeclKind::Interface, "Props".into()),
                (DeclKind::Interface, "Generic".into()),
                (DeclKind::TypeAlias, "Id".into()),
                (DeclKind::TypeAlias, "Box".into()),
                (DeclKind::Enum, "Mode".into()),
                (DeclKind::Enum, "Plain".into()),
            ]
        );
    }

    #[test]
    fn ignores_non_declarations() {
        let src = r#"
import type { Props } from "./props";
import { type Id } from "./id";
export type { Props };
const kind = node.type === "x";
obj.type = "y";
// interface Hidden {}
const s = "type S = 1";
const t = `
  interface FakeFromTemplate {
    text: string;
  }
  enum FakeFromTemplate { One }
`;
"#;
        assert!(names(src).is_empty());
    }

    #[test]
    fn positions_point_at_keyword() {
        let src = "const a = 1;\n  export type Q = number;\n";
        let found = ScannerExtractor::scan(src);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].line, found[0].column), (2, 10));
    }

    #[test]
    fn const_enum_starts_at_const() {
        let src = "const enum E { A }";
        let found = ScannerExtractor::scan(src);
        assert_eq!(found[0].column, 1);
    }
}
