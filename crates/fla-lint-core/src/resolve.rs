//! Specifier classification and resolution.
//!
//! Resolution is purely lexical. A resolved path is a location in the tree,
//! usually without an extension, and is never checked for existence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::utils::paths::{normalize, to_posix};

/// How a specifier is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierClass {
    /// Starts with `.`; resolved against the importing file's directory.
    Relative,
    /// Starts with `/`; resolved against the scan root.
    RootAbsolute,
    /// Matches an alias key.
    Aliased,
    /// Anything else. Never produces an edge.
    External,
}

/// Path aliases ordered for longest-key-first matching.
///
/// Two key forms are supported:
/// - plain: `@app` → `src/app`, matching `@app` exactly or as a prefix
/// - wildcard: `@/*` → `src/*`, matching anything that starts with `@/`
///
/// In both forms the remainder of the specifier, without its leading `/`, is
/// appended to the base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: Vec<AliasEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AliasEntry {
    key: String,
    prefix: String,
    base: String,
    target: String,
}

impl AliasEntry {
    fn new(key: &str, base: &str) -> Self {
        Self {
            key: key.to_string(),
            prefix: key.strip_suffix('*').unwrap_or(key).to_string(),
            base: to_posix(base.strip_suffix('*').unwrap_or(base)),
            target: base.to_string(),
        }
    }

    fn suffix<'a>(&self, specifier: &'a str) -> Option<&'a str> {
        if specifier == self.key {
            return Some("");
        }
        specifier.strip_prefix(self.prefix.as_str())
    }
}

impl AliasMap {
    /// Builds an alias map from `(pattern, base)` pairs. Entries with an
    /// empty key or base are dropped.
    #[must_use]
    pub fn new<I, K, V>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = Self::default();
        for (key, base) in aliases {
            map.insert(key.as_ref(), base.as_ref());
        }
        map
    }

    /// Inserts or replaces one alias.
    pub fn insert(&mut self, key: &str, base: &str) {
        if key.is_empty() || base.is_empty() {
            return;
        }
        self.entries.retain(|e| e.key != key);
        self.entries.push(AliasEntry::new(key, base));
        self.entries
            .sort_by(|a, b| b.key.len().cmp(&a.key.len()).then_with(|| a.key.cmp(&b.key)));
    }

    /// Overlays `other` on top of `self`; keys present in both take
    /// `other`'s base.
    pub fn extend_from(&mut self, other: &Self) {
        for entry in &other.entries {
            self.entries.retain(|e| e.key != entry.key);
            self.entries.push(entry.clone());
        }
        self.entries
            .sort_by(|a, b| b.key.len().cmp(&a.key.len()).then_with(|| a.key.cmp(&b.key)));
    }

    /// Returns true if there are no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the alias keys, longest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Returns true if some alias key matches `specifier`.
    #[must_use]
    pub fn matches(&self, specifier: &str) -> bool {
        self.entries.iter().any(|e| e.suffix(specifier).is_some())
    }

    /// Resolves `specifier` through the longest matching alias. Relative
    /// bases are taken from `root`.
    #[must_use]
    pub fn resolve(&self, specifier: &str, root: &Path) -> Option<PathBuf> {
        let (entry, suffix) = self
            .entries
            .iter()
            .find_map(|e| e.suffix(specifier).map(|s| (e, s)))?;

        let base = Path::new(&entry.base);
        let base = if base.is_absolute() {
            base.to_path_buf()
        } else {
            root.join(base)
        };
        let suffix = suffix.trim_start_matches('/');
        let joined = if suffix.is_empty() {
            base
        } else {
            base.join(suffix)
        };
        Some(normalize(&joined))
    }

    /// Converts the map back to `pattern → base` form, as given.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.target.clone()))
            .collect()
    }
}

/// Classifies a specifier.
#[must_use]
pub fn classify(specifier: &str, aliases: &AliasMap) -> SpecifierClass {
    if specifier.starts_with('.') {
        SpecifierClass::Relative
    } else if specifier.starts_with('/') {
        SpecifierClass::RootAbsolute
    } else if aliases.matches(specifier) {
        SpecifierClass::Aliased
    } else {
        SpecifierClass::External
    }
}

/// Resolves `specifier`, imported from `source_file`, to a lexical path.
///
/// Returns `None` for external specifiers.
#[must_use]
pub fn resolve_specifier(
    specifier: &str,
    source_file: &Path,
    root: &Path,
    aliases: &AliasMap,
) -> Option<PathBuf> {
    match classify(specifier, aliases) {
        SpecifierClass::Relative => {
            let dir = source_file.parent().unwrap_or(root);
            Some(normalize(&dir.join(specifier)))
        }
        SpecifierClass::RootAbsolute => {
            Some(normalize(&root.join(specifier.trim_start_matches('/'))))
        }
        SpecifierClass::Aliased => aliases.resolve(specifier, root),
        SpecifierClass::External => None,
    }
}
