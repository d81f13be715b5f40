//! Path-alias discovery from `tsconfig.json` / `jsconfig.json`.
//!
//! Starting at the scan root, the first ancestor directory holding a marker
//! file wins. Its `compilerOptions.paths` entries become aliases, and parent
//! configurations reached through relative `extends` references contribute
//! theirs underneath. Every failure on this path degrades to "no aliases from
//! here"; discovery never aborts a run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::resolve::AliasMap;
use crate::utils::paths::{normalize, to_posix};

/// Marker file names, in lookup order.
pub const MARKER_FILES: &[&str] = &["tsconfig.json", "jsconfig.json"];

/// Aliases read from one configuration file and its `extends` chain.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredAliases {
    /// Marker file the chain started from.
    pub source: Option<PathBuf>,
    /// Aliases with absolute bases.
    pub aliases: AliasMap,
}

/// Finds the nearest marker file at or above `root` and reads its aliases.
#[must_use]
pub fn discover_aliases(root: &Path) -> DiscoveredAliases {
    let Some(marker) = find_marker(root) else {
        debug!("No tsconfig/jsconfig found above {}", root.display());
        return DiscoveredAliases::default();
    };

    debug!("Reading path aliases from {}", marker.display());
    let mut visited = HashSet::new();
    let aliases = load_chain(&marker, &mut visited)
        .map(|resolved| resolved.aliases)
        .unwrap_or_default();

    debug!("Discovered {} path aliases", aliases.len());
    DiscoveredAliases {
        source: Some(marker),
        aliases,
    }
}

/// Returns the first marker file found walking up from `start`.
#[must_use]
pub fn find_marker(start: &Path) -> Option<PathBuf> {
    let start = normalize(start);
    start.ancestors().find_map(|dir| {
        MARKER_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// A configuration after its `extends` chain has been applied.
struct ResolvedConfig {
    base_url: Option<PathBuf>,
    aliases: AliasMap,
}

fn load_chain(path: &Path, visited: &mut HashSet<PathBuf>) -> Option<ResolvedConfig> {
    let path = normalize(path);
    if !visited.insert(path.clone()) {
        warn!("Ignoring cyclic extends at {}", path.display());
        return None;
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };
    let value: Value = match serde_json::from_str(&strip_jsonc(&content)) {
        Ok(value) => value,
        Err(e) => {
            warn!("Cannot parse {}: {}", path.display(), e);
            return None;
        }
    };

    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let parent = value
        .get("extends")
        .and_then(Value::as_str)
        .and_then(|ext| extends_path(&dir, ext))
        .and_then(|parent| {
            debug!("Following extends to {}", parent.display());
            load_chain(&parent, visited)
        });

    let options = value.get("compilerOptions");
    let own_base_url = options
        .and_then(|o| o.get("baseUrl"))
        .and_then(Value::as_str)
        .map(|base| normalize(&dir.join(base)));
    let base_url = own_base_url.or_else(|| parent.as_ref().and_then(|p| p.base_url.clone()));

    let mut aliases = parent.map(|p| p.aliases).unwrap_or_default();
    if let Some(paths) = options.and_then(|o| o.get("paths")).and_then(Value::as_object) {
        let anchor = base_url.clone().unwrap_or_else(|| dir.clone());
        for (key, targets) in paths {
            let Some(first) = first_target(targets) else {
                continue;
            };
            let base = normalize(&anchor.join(first));
            aliases.insert(key, &to_posix(&base.to_string_lossy()));
        }
    }

    Some(ResolvedConfig { base_url, aliases })
}

/// First string candidate of a `paths` entry. A bare string is accepted too.
fn first_target(targets: &Value) -> Option<&str> {
    match targets {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.iter().find_map(Value::as_str),
        _ => None,
    }
}

/// Resolves a relative `extends` reference. Package references are skipped.
fn extends_path(dir: &Path, reference: &str) -> Option<PathBuf> {
    if !(reference.starts_with("./") || reference.starts_with("../")) {
        debug!("Skipping non-relative extends '{}'", reference);
        return None;
    }
    let mut path = dir.join(reference);
    if path.extension().is_none_or(|ext| ext != "json") {
        let mut name = path.as_os_str().to_owned();
        name.push(".json");
        path = PathBuf::from(name);
    }
    Some(path)
}

/// Removes `//` and `/* */` comments and trailing commas so that
/// JSON-with-comments parses as JSON. String contents are left intact.
#[must_use]
pub fn strip_jsonc(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '"' => {
                out.push(ch);
                i += 1;
                while i < chars.len() {
                    let c = chars[i];
                    out.push(c);
                    i += 1;
                    if c == '\\' {
                        if let Some(&escaped) = chars.get(i) {
                            out.push(escaped);
                            i += 1;
                        }
                    } else if c == '"' {
                        break;
                    }
                }
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            ',' => {
                let j = skip_trivia(&chars, i + 1);
                let dangling = matches!(chars.get(j), Some('}' | ']'));
                if !dangling {
                    out.push(ch);
                }
                i += 1;
            }
            _ => {
                out.push(ch);
                i += 1;
            }
        }
    }

    out
}

/// Index of the next character after whitespace and comments.
fn skip_trivia(chars: &[char], mut i: usize) -> usize {
    loop {
        match (chars.get(i), chars.get(i + 1)) {
            (Some(c), _) if c.is_whitespace() => i += 1,
            (Some('/'), Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            (Some('/'), Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            _ => return i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_strip_jsonc() {
        let input = r#"{
  // line comment
  "compilerOptions": {
    /* block */
    "paths": { "@/*": ["src/*"], },
    "url": "http://example.com", // trailing
  },
}"#;
        let value: Value = serde_json::from_str(&strip_jsonc(input)).unwrap();
        assert_eq!(value["compilerOptions"]["paths"]["@/*"][0], "src/*");
        assert_eq!(value["compilerOptions"]["url"], "http://example.com");
    }

    #[test]
    fn test_discovers_paths_from_tsconfig() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*", "gen/*"] } } }"#,
        )
        .unwrap();

        let found = discover_aliases(dir.path());
        assert_eq!(found.source, Some(dir.path().join("tsconfig.json")));
        assert_eq!(
            found.aliases.resolve("@/_states/x", Path::new("/unused")),
            Some(dir.path().join("src/_states/x"))
        );
    }

    #[test]
    fn test_walks_up_and_prefers_tsconfig() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("apps/web");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{ "compilerOptions": { "paths": { "~/*": ["./*"] } } }"#,
        )
        .unwrap();
        fs::write(dir.path().join("jsconfig.json"), "{}").unwrap();

        assert_eq!(find_marker(&nested), Some(dir.path().join("tsconfig.json")));
        let found = discover_aliases(&nested);
        assert_eq!(found.aliases.keys().collect::<Vec<_>>(), vec!["~/*"]);
    }

    #[test]
    fn test_extends_chain_merges_and_child_wins() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/base.json"),
            r##"{
                // shared
                "compilerOptions": {
                    "baseUrl": "..",
                    "paths": { "@/*": ["lib/*"], "#shared/*": ["shared/*"] }
                }
            }"##,
        )
        .unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{ "extends": "./config/base", "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
        )
        .unwrap();

        let found = discover_aliases(dir.path());
        let root = Path::new("/unused");
        assert_eq!(
            found.aliases.resolve("@/a", root),
            Some(dir.path().join("src/a"))
        );
        assert_eq!(
            found.aliases.resolve("#shared/b", root),
            Some(dir.path().join("shared/b"))
        );
    }

    #[test]
    fn test_cyclic_extends_terminates() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{ "extends": "./other.json", "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("other.json"),
            r#"{ "extends": "./tsconfig.json" }"#,
        )
        .unwrap();

        let found = discover_aliases(dir.path());
        assert_eq!(found.aliases.len(), 1);
    }

    #[test]
    fn test_broken_configs_degrade_to_no_aliases() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{ "extends": "./missing", "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
        )
        .unwrap();
        assert_eq!(discover_aliases(dir.path()).aliases.len(), 1);

        fs::write(dir.path().join("tsconfig.json"), "{ not json").unwrap();
        assert!(discover_aliases(dir.path()).aliases.is_empty());
    }
}
