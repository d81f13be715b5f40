//! Rule restricting file extensions and dotted suffixes under layer
//! directories.
//!
//! # Detected Patterns
//!
//! - Any extension outside `allowedExtensions` (`button.js`, `README`)
//! - For `.ts`/`.tsx`, a dotted suffix outside the default and extra suffix
//!   lists (`button.helper.ts`)
//!
//! # Good Patterns
//!
//! ```text
//! _components/button/button.tsx
//! _components/button/button.stories.tsx
//! _states/cart/cart.type.ts
//! ```

use fla_lint_core::utils::split_file_name;
use fla_lint_core::{FileContext, FileRule, LintContext, Violation};

/// Rule code for extension-suffix.
pub const CODE: &str = "FLA001";

/// Rule name for extension-suffix.
pub const NAME: &str = "extension-suffix";

/// Extensions whose dotted suffix is checked.
const SUFFIXED_EXTENSIONS: &[&str] = &[".ts", ".tsx"];

/// Restricts extensions and dotted suffixes of layer files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionSuffix;

impl ExtensionSuffix {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Last dot-token of the file stem, when the stem has more than one token.
fn suffix_of(file_name: &str) -> Option<&str> {
    let (stem, _) = split_file_name(file_name);
    let mut parts = stem.rsplit('.');
    let last = parts.next()?;
    parts.next().map(|_| last)
}

impl FileRule for ExtensionSuffix {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Restricts extensions and dotted filename suffixes of layer files"
    }

    fn check(&self, file: &FileContext<'_>, ctx: &LintContext) -> Vec<Violation> {
        let config = &ctx.config;
        let ext = file.extension;

        if !config.allowed_extensions.iter().any(|allowed| allowed == ext) {
            let shown = if ext.is_empty() { "(none)" } else { ext };
            return vec![file.violation(
                CODE,
                1,
                1,
                format!(
                    "Extension '{shown}' is not allowed in layer files. Allowed: {}",
                    config.allowed_extensions.join(", ")
                ),
            )];
        }

        if !SUFFIXED_EXTENSIONS.contains(&ext) {
            return Vec::new();
        }

        let Some(suffix) = suffix_of(file.file_name) else {
            return Vec::new();
        };
        let allowed = config.allowed_ts_suffixes();
        if allowed.contains(&suffix) {
            return Vec::new();
        }

        vec![file.violation(
            CODE,
            1,
            1,
            format!(
                "Suffix '.{suffix}.{}' is not allowed. Allowed suffixes: {}",
                ext.trim_start_matches('.'),
                allowed.join(", ")
            ),
        )]
    }
}
