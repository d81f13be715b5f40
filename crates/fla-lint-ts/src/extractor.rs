//! Declaration extraction types and trait.
//!
//! `DeclarationExtractor` is the seam between the syntax-tree path and the
//! text-scanning fallback: both report the same declarations at the same
//! positions, so callers can swap one for the other per file.

use fla_lint_core::utils::line_column;
use thiserror::Error;

/// Kind of type-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclKind {
    /// `interface Foo { ... }`
    Interface,
    /// `type Foo = ...`
    TypeAlias,
    /// `enum Foo { ... }` or `const enum Foo { ... }`
    Enum,
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interface => write!(f, "interface"),
            Self::TypeAlias => write!(f, "type"),
            Self::Enum => write!(f, "enum"),
        }
    }
}

/// A declaration found in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declaration kind.
    pub kind: DeclKind,
    /// Declared identifier.
    pub name: String,
    /// Byte offset of the declaration keyword (or `const` for const enums).
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (1-indexed, in characters).
    pub column: usize,
}

impl Declaration {
    /// Creates a declaration, computing line and column from `source`.
    #[must_use]
    pub fn at(kind: DeclKind, name: impl Into<String>, source: &str, offset: usize) -> Self {
        let (line, column) = line_column(source, offset);
        Self {
            kind,
            name: name.into(),
            offset,
            line,
            column,
        }
    }
}

/// Source dialect, which picks the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `.ts`, `.js`, `.mjs`, `.cjs`
    TypeScript,
    /// `.tsx`, `.jsx`
    Tsx,
}

impl Dialect {
    /// Picks the dialect for a file extension (with leading dot).
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            ".tsx" | ".jsx" => Self::Tsx,
            _ => Self::TypeScript,
        }
    }
}

/// Why an extractor could not produce a result for one file.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into a parser.
    #[error("grammar unavailable: {0}")]
    Grammar(String),
    /// The parser returned no tree.
    #[error("parser produced no tree")]
    NoTree,
    /// The tree contains syntax errors.
    #[error("source has syntax errors")]
    Syntax,
}

/// Trait for declaration extraction strategies.
pub trait DeclarationExtractor: Send + Sync {
    /// Strategy identifier (e.g., `"tree-sitter"`, `"scanner"`).
    fn strategy(&self) -> &'static str;

    /// Extracts every `interface`/`type`/`enum` declaration, ordered by
    /// offset.
    ///
    /// # Errors
    ///
    /// Returns an error when this strategy cannot handle the source. The
    /// caller is expected to fall back to another strategy.
    fn extract(&self, source: &str, dialect: Dialect) -> Result<Vec<Declaration>, ExtractError>;
}
