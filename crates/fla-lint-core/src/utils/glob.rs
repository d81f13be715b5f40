//! Restricted glob compiler.
//!
//! Supports exactly three wildcards:
//! - `*` matches any run of non-separator characters
//! - `**/` matches zero or more whole path segments (`**` elsewhere matches anything)
//! - `?` matches one non-separator character
//!
//! Every other character is literal. There is no brace expansion and no
//! character classes.

use regex::Regex;

/// Compiles a glob pattern into an anchored regular expression.
///
/// # Errors
///
/// Returns an error if the generated expression is rejected by the regex
/// engine (for example, when it exceeds the size limit).
///
/// # Example
///
/// ```ignore
/// let re = compile_glob("**/*.type.ts")?;
/// assert!(re.is_match("src/_pages/home/home.type.ts"));
/// ```
pub fn compile_glob(glob: &str) -> Result<Regex, regex::Error> {
    let mut out = String::from("^");
    let chars: Vec<char> = glob.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            ch => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
            }
        }
        i += 1;
    }

    out.push('$');
    Regex::new(&out)
}

/// A compiled list of glob patterns; matches when any pattern matches.
#[derive(Debug, Clone, Default)]
pub struct GlobSet {
    matchers: Vec<Regex>,
}

impl GlobSet {
    /// Compiles all patterns, skipping (and logging) any that fail to compile.
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = patterns
            .into_iter()
            .filter_map(|p| match compile_glob(p.as_ref()) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Ignoring glob '{}': {}", p.as_ref(), e);
                    None
                }
            })
            .collect();
        Self { matchers }
    }

    /// Returns true if `path` (posix form) matches any pattern.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        let normalized = super::paths::to_posix(path);
        self.matchers.iter().any(|re| re.is_match(&normalized))
    }

    /// Returns true if the set holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
