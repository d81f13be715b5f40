//! Utility functions for rule implementations.

pub mod glob;
pub mod paths;
pub mod text;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use glob::{compile_glob, GlobSet};
#[doc(inline)]
pub use paths::{normalize, relative_posix, split_segments, to_posix};
#[doc(inline)]
pub use text::{is_kebab_case, line_column, module_name_of, split_file_name};
