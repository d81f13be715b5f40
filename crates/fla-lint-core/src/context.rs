//! Context types for rule execution.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::layers::{has_layer_segment, LayerRanks};
use crate::module_info::ModuleInfo;
use crate::resolve::AliasMap;
use crate::types::{Location, Violation};
use crate::utils::paths::relative_posix;
use crate::utils::text::split_file_name;

/// Extensions whose contents are read and scanned.
pub const PARSEABLE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs"];

/// Returns true if `path` has a parseable source extension.
#[must_use]
pub fn is_parseable(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| PARSEABLE_EXTENSIONS.contains(&split_file_name(name).1))
}

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents (empty for non-parseable files).
    pub content: &'a str,
    /// Root-relative posix path.
    pub relative_path: String,
    /// File name.
    pub file_name: &'a str,
    /// Extension with its leading dot, or empty.
    pub extension: &'a str,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        Self {
            path,
            content,
            relative_path: relative_posix(root, path),
            file_name,
            extension: split_file_name(file_name).1,
        }
    }

    /// Returns true if the file's contents were read for scanning.
    #[must_use]
    pub fn is_parseable(&self) -> bool {
        PARSEABLE_EXTENSIONS.contains(&self.extension)
    }

    /// Creates a violation in this file.
    #[must_use]
    pub fn violation(
        &self,
        rule_id: &str,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Violation {
        Violation::new(
            rule_id,
            Location::new(self.relative_path.clone(), line, column),
            message,
        )
    }
}

/// Immediate children of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirEntries {
    /// Child directory names.
    pub dirs: BTreeSet<String>,
    /// Child file names.
    pub files: BTreeSet<String>,
}

/// Directory listing derived from the walk, so repo rules never touch the
/// filesystem again.
#[derive(Debug, Clone, Default)]
pub struct DirIndex {
    children: BTreeMap<PathBuf, DirEntries>,
}

impl DirIndex {
    /// Builds the index from walked directories and files.
    #[must_use]
    pub fn new(dirs: &[PathBuf], files: &[PathBuf]) -> Self {
        let mut children: BTreeMap<PathBuf, DirEntries> = BTreeMap::new();

        for dir in dirs {
            children.entry(dir.clone()).or_default();
        }
        for dir in dirs {
            if let (Some(parent), Some(name)) = (dir.parent(), dir.file_name()) {
                if let Some(entries) = children.get_mut(parent) {
                    entries.dirs.insert(name.to_string_lossy().into_owned());
                }
            }
        }
        for file in files {
            if let (Some(parent), Some(name)) = (file.parent(), file.file_name()) {
                children
                    .entry(parent.to_path_buf())
                    .or_default()
                    .files
                    .insert(name.to_string_lossy().into_owned());
            }
        }

        Self { children }
    }

    /// Children of `dir`; empty when `dir` was not walked.
    #[must_use]
    pub fn children(&self, dir: &Path) -> Option<&DirEntries> {
        self.children.get(dir)
    }
}

/// Shared, read-only context for a single run.
#[derive(Debug, Clone)]
pub struct LintContext {
    /// Scan root.
    pub root: PathBuf,
    /// Effective configuration.
    pub config: Config,
    /// Layer rank table.
    pub ranks: LayerRanks,
    /// Discovered aliases overlaid with configured ones.
    pub aliases: AliasMap,
    /// Every walked file, sorted.
    pub files: Vec<PathBuf>,
    /// Every walked directory (including the root), sorted.
    pub dirs: Vec<PathBuf>,
    /// Files with at least one layer segment in their relative path.
    pub candidate_files: Vec<PathBuf>,
    /// Directories named after a layer.
    pub layer_directories: Vec<PathBuf>,
    contents: HashMap<PathBuf, String>,
    dir_index: DirIndex,
}

impl LintContext {
    /// Creates an empty context for `root`. Configured path aliases are
    /// applied immediately.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        let aliases = AliasMap::new(&config.path_aliases);
        Self {
            root: root.into(),
            config,
            ranks: LayerRanks::default(),
            aliases,
            files: Vec::new(),
            dirs: Vec::new(),
            candidate_files: Vec::new(),
            layer_directories: Vec::new(),
            contents: HashMap::new(),
            dir_index: DirIndex::default(),
        }
    }

    /// Installs discovered aliases underneath the configured ones.
    #[must_use]
    pub fn with_discovered_aliases(mut self, discovered: &AliasMap) -> Self {
        let mut aliases = discovered.clone();
        aliases.extend_from(&AliasMap::new(&self.config.path_aliases));
        self.aliases = aliases;
        self
    }

    /// Sets the walked entries and derives the candidate and layer lists.
    #[must_use]
    pub fn with_entries(mut self, mut files: Vec<PathBuf>, mut dirs: Vec<PathBuf>) -> Self {
        files.sort();
        dirs.sort();

        let layers = &self.config.layer_dirs;
        self.candidate_files = files
            .iter()
            .filter(|f| has_layer_segment(&relative_posix(&self.root, f), layers))
            .cloned()
            .collect();
        self.layer_directories = dirs
            .iter()
            .filter(|d| {
                d.file_name()
                    .is_some_and(|n| layers.iter().any(|l| n == l.as_str()))
            })
            .cloned()
            .collect();
        self.dir_index = DirIndex::new(&dirs, &files);
        self.files = files;
        self.dirs = dirs;
        self
    }

    /// Sets pre-read file contents.
    #[must_use]
    pub fn with_contents(mut self, contents: HashMap<PathBuf, String>) -> Self {
        self.contents = contents;
        self
    }

    /// Contents of `path`, or empty when it was not read.
    #[must_use]
    pub fn content(&self, path: &Path) -> &str {
        self.contents.get(path).map_or("", String::as_str)
    }

    /// Root-relative posix form of `path`.
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        relative_posix(&self.root, path)
    }

    /// Module info for `path` under the active layers.
    #[must_use]
    pub fn module_info(&self, path: &Path) -> Option<ModuleInfo> {
        ModuleInfo::derive(path, &self.root, &self.config.layer_dirs, &self.ranks)
    }

    /// Directory listing for `dir`.
    #[must_use]
    pub fn children(&self, dir: &Path) -> Option<&DirEntries> {
        self.dir_index.children(dir)
    }

    /// Builds a file context for a candidate file.
    #[must_use]
    pub fn file<'a>(&'a self, path: &'a Path) -> FileContext<'a> {
        FileContext::new(path, self.content(path), &self.root)
    }

    /// Returns true if a relative path lies under layer scope.
    #[must_use]
    pub fn in_layer_scope(&self, relative: &str) -> bool {
        has_layer_segment(relative, &self.config.layer_dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/repo")
    }

    #[test]
    fn test_is_parseable() {
        assert!(is_parseable(Path::new("a/b.tsx")));
        assert!(is_parseable(Path::new("a/b.cjs")));
        assert!(!is_parseable(Path::new("a/b.css")));
        assert!(!is_parseable(Path::new("a/.ts")));
    }

    #[test]
    fn test_file_context() {
        let path = root().join("src/_pages/home/home.type.ts");
        let ctx = FileContext::new(&path, "", &root());
        assert_eq!(ctx.relative_path, "src/_pages/home/home.type.ts");
        assert_eq!(ctx.file_name, "home.type.ts");
        assert_eq!(ctx.extension, ".ts");
        let v = ctx.violation("FLA001", 1, 1, "m");
        assert_eq!(v.location.file, "src/_pages/home/home.type.ts");
    }

    #[test]
    fn test_entries_derive_candidates_and_index() {
        let files = vec![
            root().join("src/_pages/home/home.tsx"),
            root().join("src/lib/util.ts"),
            root().join("README.md"),
        ];
        let dirs = vec![
            root(),
            root().join("src"),
            root().join("src/_pages"),
            root().join("src/_pages/home"),
            root().join("src/lib"),
        ];
        let ctx = LintContext::new(root(), Config::default()).with_entries(files, dirs);

        assert_eq!(ctx.candidate_files, vec![root().join("src/_pages/home/home.tsx")]);
        assert_eq!(ctx.layer_directories, vec![root().join("src/_pages")]);

        let src = ctx.children(&root().join("src")).unwrap();
        assert_eq!(src.dirs.iter().collect::<Vec<_>>(), vec!["_pages", "lib"]);
        assert!(src.files.is_empty());
        let top = ctx.children(&root()).unwrap();
        assert!(top.files.contains("README.md"));
    }

    #[test]
    fn test_configured_aliases_override_discovered() {
        let mut config = Config::default();
        config.path_aliases.insert("@/*".into(), "src/*".into());
        let discovered = AliasMap::new([("@/*", "/repo/app/*"), ("~/*", "/repo/*")]);
        let ctx = LintContext::new(root(), config).with_discovered_aliases(&discovered);

        assert_eq!(ctx.aliases.len(), 2);
        assert_eq!(
            ctx.aliases.resolve("@/x", &root()),
            Some(root().join("src/x"))
        );
    }
}
