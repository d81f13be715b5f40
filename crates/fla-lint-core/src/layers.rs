//! Layer names and dependency ranks.

use std::collections::BTreeMap;

use crate::utils::paths::split_segments;

/// The top layer. Only files whose innermost layer is this one may call
/// router hooks.
pub const PAGE_LAYER: &str = "_pages";

/// The layer whose modules act as consumer scopes for shared modules.
pub const CONTAINER_LAYER: &str = "_containers";

/// Default `(layer, rank)` table. Higher ranks may depend on lower ranks.
const DEFAULT_RANKS: &[(&str, i32)] = &[
    ("_pages", 5),
    ("_containers", 4),
    ("_states", 3),
    ("_components", 2),
    ("_apis", 1),
    ("_utils", 0),
];

/// Static map from layer name to dependency rank.
///
/// Layers missing from the table are unranked and never take part in
/// direction checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRanks {
    ranks: BTreeMap<String, i32>,
}

impl Default for LayerRanks {
    fn default() -> Self {
        Self {
            ranks: DEFAULT_RANKS
                .iter()
                .map(|(name, rank)| ((*name).to_string(), *rank))
                .collect(),
        }
    }
}

impl LayerRanks {
    /// Returns the rank of `layer`, or `None` when unranked.
    #[must_use]
    pub fn rank(&self, layer: &str) -> Option<i32> {
        self.ranks.get(layer).copied()
    }

    /// Iterates `(layer, rank)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.ranks.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Index of the innermost (right-most) segment naming a layer.
#[must_use]
pub fn innermost_layer_index<S: AsRef<str>>(segments: &[&str], layers: &[S]) -> Option<usize> {
    segments
        .iter()
        .rposition(|seg| is_layer(seg, layers))
}

/// Innermost layer named in `path`, if any.
#[must_use]
pub fn find_innermost_layer<'a, S: AsRef<str>>(path: &'a str, layers: &[S]) -> Option<&'a str> {
    let segments = split_segments(path);
    innermost_layer_index(&segments, layers).map(|i| segments[i])
}

/// Returns true if any segment of `path` names a layer.
#[must_use]
pub fn has_layer_segment<S: AsRef<str>>(path: &str, layers: &[S]) -> bool {
    split_segments(path).iter().any(|seg| is_layer(seg, layers))
}

/// Returns true if `name` is one of `layers`.
#[must_use]
pub fn is_layer<S: AsRef<str>>(name: &str, layers: &[S]) -> bool {
    layers.iter().any(|l| l.as_ref() == name)
}
