//! Module identity derived from a file path and the layer configuration.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::layers::{innermost_layer_index, is_layer, LayerRanks, CONTAINER_LAYER, PAGE_LAYER};
use crate::utils::paths::{relative_posix, split_segments};
use crate::utils::text::module_name_of;

/// Where a path sits in the layer hierarchy.
///
/// Derived on demand from a path; cheap and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    /// Absolute path.
    pub path: PathBuf,
    /// Root-relative posix path.
    pub relative_path: String,
    /// Innermost layer name.
    pub layer: String,
    /// Rank of the innermost layer, `None` when unranked.
    pub rank: Option<i32>,
    /// True when no layer segment occurs before the innermost one.
    pub is_global: bool,
    /// First dot-token of the name right after the innermost layer.
    pub module_name: Option<String>,
    /// `layer/moduleName`.
    pub module_key: Option<String>,
    /// Module key qualified by every ancestor `layer/module` pair, e.g.
    /// `_pages/home/_states/search`.
    pub scoped_key: Option<String>,
    #[serde(skip)]
    scopes: Vec<ScopeSegment>,
}

/// One `layer/module` pair along a path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScopeSegment {
    layer: String,
    /// Scoped key up to and including this pair.
    key: String,
}

impl ModuleInfo {
    /// Derives module info for `path`, or `None` when no segment of its
    /// root-relative form names a layer.
    #[must_use]
    pub fn derive<S: AsRef<str>>(
        path: &Path,
        root: &Path,
        layers: &[S],
        ranks: &LayerRanks,
    ) -> Option<Self> {
        let relative_path = relative_posix(root, path);
        let segments = split_segments(&relative_path);
        let layer_index = innermost_layer_index(&segments, layers)?;

        let layer = segments[layer_index].to_string();
        let is_global = !segments[..layer_index]
            .iter()
            .any(|seg| is_layer(seg, layers));

        let module_name = segments
            .get(layer_index + 1)
            .and_then(|seg| module_name_of(seg))
            .map(str::to_string);
        let module_key = module_name.as_ref().map(|name| format!("{layer}/{name}"));

        let scopes = collect_scopes(&segments, layers);
        let scoped_key = module_name.as_ref().and_then(|_| scopes.last().map(|s| s.key.clone()));

        Some(Self {
            path: path.to_path_buf(),
            rank: ranks.rank(&layer),
            relative_path,
            layer,
            is_global,
            module_name,
            module_key,
            scoped_key,
            scopes,
        })
    }

    /// Nearest enclosing container-module scope, including this module's own
    /// scope when it is a container.
    #[must_use]
    pub fn container_scope(&self) -> Option<&str> {
        self.nearest_scope(CONTAINER_LAYER)
    }

    /// Nearest enclosing page-module scope.
    #[must_use]
    pub fn page_scope(&self) -> Option<&str> {
        self.nearest_scope(PAGE_LAYER)
    }

    /// The scope that counts as this file's consumer identity: its
    /// container scope, else its page scope, else its own scoped key.
    #[must_use]
    pub fn consumer_scope(&self) -> Option<ConsumerScope> {
        if let Some(key) = self.container_scope() {
            return Some(ConsumerScope::Container(key.to_string()));
        }
        if let Some(key) = self.page_scope() {
            return Some(ConsumerScope::Page(key.to_string()));
        }
        self.scoped_key.clone().map(ConsumerScope::Module)
    }

    fn nearest_scope(&self, layer: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find(|s| s.layer == layer)
            .map(|s| s.key.as_str())
    }
}

/// The identity under which an importing file is counted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsumerScope {
    /// A `_containers` module scope.
    Container(String),
    /// A `_pages` module scope.
    Page(String),
    /// The importing module itself.
    Module(String),
}

impl ConsumerScope {
    /// The scoped key of this scope.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Container(k) | Self::Page(k) | Self::Module(k) => k,
        }
    }

    /// Returns true if `scoped_key` equals this scope or is nested inside it.
    #[must_use]
    pub fn contains(&self, scoped_key: &str) -> bool {
        let key = self.key();
        scoped_key == key
            || scoped_key
                .strip_prefix(key)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl std::fmt::Display for ConsumerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Walks `segments` and records every `layer/module` pair.
fn collect_scopes<S: AsRef<str>>(segments: &[&str], layers: &[S]) -> Vec<ScopeSegment> {
    let mut scopes = Vec::new();
    let mut key = String::new();

    for (i, seg) in segments.iter().enumerate() {
        if !is_layer(seg, layers) {
            continue;
        }
        let Some(module) = segments.get(i + 1).and_then(|s| module_name_of(s)) else {
            continue;
        };
        if !key.is_empty() {
            key.push('/');
        }
        key.push_str(seg);
        key.push('/');
        key.push_str(module);
        scopes.push(ScopeSegment {
            layer: (*seg).to_string(),
            key: key.clone(),
        });
    }

    scopes
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYERS: &[&str] = &["_pages", "_containers", "_states", "_components", "_apis", "_utils"];

    fn info(rel: &str) -> Option<ModuleInfo> {
        let root = Path::new("/repo");
        ModuleInfo::derive(&root.join(rel), root, LAYERS, &LayerRanks::default())
    }

    #[test]
    fn test_global_module() {
        let m = info("src/_states/search/search.ts").unwrap();
        assert_eq!(m.layer, "_states");
        assert_eq!(m.rank, Some(3));
        assert!(m.is_global);
        assert_eq!(m.module_name.as_deref(), Some("search"));
        assert_eq!(m.module_key.as_deref(), Some("_states/search"));
        assert_eq!(m.scoped_key.as_deref(), Some("_states/search"));
        assert_eq!(m.relative_path, "src/_states/search/search.ts");
    }

    #[test]
    fn test_nested_module_is_not_global() {
        let m = info("src/_pages/home/_containers/search-landing/_states/search/search.ts").unwrap();
        assert_eq!(m.layer, "_states");
        assert!(!m.is_global);
        assert_eq!(m.module_key.as_deref(), Some("_states/search"));
        assert_eq!(
            m.scoped_key.as_deref(),
            Some("_pages/home/_containers/search-landing/_states/search")
        );
        assert_eq!(
            m.container_scope(),
            Some("_pages/home/_containers/search-landing")
        );
        assert_eq!(m.page_scope(), Some("_pages/home"));
    }

    #[test]
    fn test_module_name_strips_suffix_chain() {
        let m = info("src/_components/search-landing.type.ts").unwrap();
        assert_eq!(m.module_name.as_deref(), Some("search-landing"));
    }

    #[test]
    fn test_file_directly_in_layer_dir_without_module() {
        let m = info("src/_pages").unwrap();
        assert_eq!(m.module_name, None);
        assert_eq!(m.module_key, None);
        assert_eq!(m.scoped_key, None);
    }

    #[test]
    fn test_outside_layers() {
        assert!(info("src/lib/util.ts").is_none());
    }

    #[test]
    fn test_consumer_scope_prefers_container_then_page() {
        let container = info("src/_pages/home/_containers/landing/landing.tsx").unwrap();
        assert_eq!(
            container.consumer_scope(),
            Some(ConsumerScope::Container("_pages/home/_containers/landing".into()))
        );

        let page = info("src/_pages/home/home.tsx").unwrap();
        assert_eq!(
            page.consumer_scope(),
            Some(ConsumerScope::Page("_pages/home".into()))
        );

        let own = info("src/_states/cart/cart.ts").unwrap();
        assert_eq!(
            own.consumer_scope(),
            Some(ConsumerScope::Module("_states/cart".into()))
        );
    }

    #[test]
    fn test_scope_contains() {
        let scope = ConsumerScope::Container("_pages/home/_containers/landing".into());
        assert!(scope.contains("_pages/home/_containers/landing/_states/search"));
        assert!(scope.contains("_pages/home/_containers/landing"));
        assert!(!scope.contains("_pages/home/_containers/landing-two/_states/search"));
        assert!(!scope.contains("_pages/home/_states/search"));
    }
}
