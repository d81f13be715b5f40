//! Lexical path utilities.
//!
//! Nothing here touches the filesystem: resolved import targets frequently
//! omit their extension and so never exist on disk verbatim.

use std::path::{Component, Path, PathBuf};

/// Replaces Windows separators with `/`.
#[must_use]
pub fn to_posix(value: &str) -> String {
    value.replace('\\', "/")
}

/// Splits a path string into its non-empty `/`-separated segments.
///
/// # Example
///
/// ```ignore
/// assert_eq!(split_segments("src//_pages/home/"), vec!["src", "_pages", "home"]);
/// ```
#[must_use]
pub fn split_segments(value: &str) -> Vec<&str> {
    value
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lexically normalizes a path, folding `.` and `..` components.
///
/// A `..` that would climb above the root of an absolute path is dropped.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out.iter().map(|c| c.as_os_str()).collect()
}

/// Returns `path` relative to `root` as a posix string.
///
/// Both paths are normalized first. When `path` lies outside `root` the
/// result climbs with `..` segments, mirroring a lexical `relative()`.
#[must_use]
pub fn relative_posix(root: &Path, path: &Path) -> String {
    let root = normalize(root);
    let path = normalize(path);

    if let Ok(rel) = path.strip_prefix(&root) {
        return join_components(rel);
    }

    let root_parts: Vec<Component<'_>> = root.components().collect();
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let common = root_parts
        .iter()
        .zip(&path_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    segments.extend(std::iter::repeat("..".to_string()).take(root_parts.len() - common));
    segments.extend(
        path_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    segments.join("/")
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
