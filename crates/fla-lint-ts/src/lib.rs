//! # fla-lint-ts
//!
//! Tree-sitter syntax accelerator for locating TypeScript type-level
//! declarations (`interface`, `type`, `enum`).
//!
//! The accelerator is optional. Every caller goes through
//! [`Accelerator::declarations`], which falls back to the masked-text
//! [`ScannerExtractor`] when grammars cannot be loaded or a file does not
//! parse cleanly, so results never depend on whether the accelerator ran.
//!
//! - [`DeclarationExtractor`] trait shared by both strategies
//! - [`TypeScriptExtractor`] for the syntax-tree path
//! - [`ScannerExtractor`] for the text path
//! - [`Accelerator`] for the lazily-initialized, resettable handle

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accelerator;
pub mod extractor;
pub mod scanner;
pub mod typescript;

pub use accelerator::{Accelerator, AcceleratorState};
pub use extractor::{DeclKind, Declaration, DeclarationExtractor, Dialect, ExtractError};
pub use scanner::ScannerExtractor;
pub use typescript::TypeScriptExtractor;
