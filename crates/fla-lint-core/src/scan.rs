//! Lightweight source scanning: comment/string masking and import specifier
//! extraction.
//!
//! This is not a tokenizer. It recognizes just enough JavaScript/TypeScript
//! lexical structure to keep keywords that appear inside comments and string
//! literals from being mistaken for real syntax.

use std::sync::LazyLock;

use regex::Regex;

/// Blanks comments and string-literal bodies.
///
/// - block and line comments are blanked entirely, delimiters included
/// - `'`/`"` strings keep their delimiters; the body is blanked and an
///   unescaped newline ends the literal
/// - template literals keep their back-ticks; the body, including any
///   `${ ... }` region, is blanked
///
/// Every blanked character becomes as many spaces as it has UTF-8 bytes, and
/// line breaks are kept, so byte offsets and line numbers in the result are
/// those of `source`.
///
/// An interpolation region is not brace-balanced: a back-tick inside `${ }`
/// closes the template.
#[must_use]
pub fn mask_source(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            State::Code => match (ch, next) {
                ('/', Some('*')) => {
                    blank(&mut out, ch);
                    blank(&mut out, '*');
                    state = State::BlockComment;
                    i += 2;
                    continue;
                }
                ('/', Some('/')) => {
                    state = State::LineComment;
                    blank(&mut out, ch);
                }
                ('\'' | '"', _) => {
                    state = State::Quoted(ch);
                    out.push(ch);
                }
                ('`', _) => {
                    state = State::Template;
                    out.push(ch);
                }
                _ => out.push(ch),
            },
            State::LineComment => {
                if ch == '\n' {
                    state = State::Code;
                }
                blank(&mut out, ch);
            }
            State::BlockComment => {
                if ch == '*' && next == Some('/') {
                    blank(&mut out, ch);
                    blank(&mut out, '/');
                    state = State::Code;
                    i += 2;
                    continue;
                }
                blank(&mut out, ch);
            }
            State::Quoted(quote) => {
                if ch == '\\' {
                    blank(&mut out, ch);
                    if let Some(escaped) = next {
                        blank(&mut out, escaped);
                    }
                    i += 2;
                    continue;
                }
                if ch == quote {
                    out.push(ch);
                    state = State::Code;
                } else {
                    if ch == '\n' {
                        state = State::Code;
                    }
                    blank(&mut out, ch);
                }
            }
            State::Template => {
                if ch == '\\' {
                    blank(&mut out, ch);
                    if let Some(escaped) = next {
                        blank(&mut out, escaped);
                    }
                    i += 2;
                    continue;
                }
                if ch == '`' {
                    out.push(ch);
                    state = State::Code;
                } else {
                    blank(&mut out, ch);
                }
            }
        }
        i += 1;
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Quoted(char),
    Template,
}

fn blank(out: &mut String, ch: char) {
    if ch == '\n' || ch == '\r' {
        out.push(ch);
    } else {
        for _ in 0..ch.len_utf8() {
            out.push(' ');
        }
    }
}

/// How a specifier was referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpecifierKind {
    /// `import ... from "x"` or `import "x"`.
    Import,
    /// `export ... from "x"`.
    ReExport,
    /// `import("x")`.
    DynamicImport,
    /// `require("x")`.
    Require,
}

/// A module specifier found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    /// The specifier as written, without quotes.
    pub specifier: String,
    /// Byte offset of the first character inside the quotes.
    pub offset: usize,
    /// Syntactic form of the reference.
    pub kind: SpecifierKind,
}

const QUOTED: &str = r#"(?:"([^"\n]*)"|'([^'\n]*)')"#;

static PATTERNS: LazyLock<Vec<(SpecifierKind, Regex)>> = LazyLock::new(|| {
    [
        (
            SpecifierKind::Import,
            format!(r#"\bimport\s+(?:type\s+)?[^;'"`]*?\bfrom\s*{QUOTED}"#),
        ),
        (SpecifierKind::Import, format!(r"\bimport\s*{QUOTED}")),
        (
            SpecifierKind::ReExport,
            format!(r#"\bexport\s+(?:type\s+)?[^;'"`]*?\bfrom\s*{QUOTED}"#),
        ),
        (
            SpecifierKind::DynamicImport,
            format!(r"\bimport\s*\(\s*{QUOTED}\s*\)"),
        ),
        (
            SpecifierKind::Require,
            format!(r"\brequire\s*\(\s*{QUOTED}\s*\)"),
        ),
    ]
    .into_iter()
    .filter_map(|(kind, pattern)| match Regex::new(&pattern) {
        Ok(re) => Some((kind, re)),
        Err(e) => {
            tracing::warn!("Invalid specifier pattern {}: {}", pattern, e);
            None
        }
    })
    .collect()
});

/// Extracts module specifiers from `source`.
///
/// Patterns run over the masked text, so string bodies there are blank; the
/// specifier itself is read back from `source` at the same byte range.
/// Results are ordered by offset with duplicates removed.
#[must_use]
pub fn extract_specifiers(source: &str) -> Vec<ImportSpecifier> {
    let masked = mask_source(source);
    extract_from_masked(source, &masked)
}

/// Same as [`extract_specifiers`] for callers that already hold the masked
/// text.
#[must_use]
pub fn extract_from_masked(source: &str, masked: &str) -> Vec<ImportSpecifier> {
    let mut found: Vec<ImportSpecifier> = Vec::new();

    for (kind, re) in PATTERNS.iter() {
        for caps in re.captures_iter(masked) {
            let Some(group) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            let Some(specifier) = source.get(group.range()) else {
                continue;
            };
            if specifier.is_empty() {
                continue;
            }
            found.push(ImportSpecifier {
                specifier: specifier.to_string(),
                offset: group.start(),
                kind: *kind,
            });
        }
    }

    found.sort_by(|a, b| a.offset.cmp(&b.offset).then(a.kind.cmp(&b.kind)));
    found.dedup_by_key(|s| s.offset);
    found
}
