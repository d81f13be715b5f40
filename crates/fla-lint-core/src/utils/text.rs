//! Text helpers shared by the scanner and the naming rules.

/// Converts a byte offset into a 1-based `(line, column)` pair.
///
/// Lines are counted by `\n`; the column counts characters since the last
/// newline. Offsets past the end clamp to the end of `source`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(line_column("ab\ncd", 4), (2, 2));
/// ```
#[must_use]
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let head = &source[..end];

    let line = head.bytes().filter(|b| *b == b'\n').count() + 1;
    let line_start = head.rfind('\n').map_or(0, |i| i + 1);
    let column = head[line_start..].chars().count() + 1;

    (line, column)
}

/// Splits a file name into `(stem, extension)`.
///
/// The extension keeps its leading dot. A leading dot alone (`.env`) does not
/// start an extension, matching the usual dotfile convention.
#[must_use]
pub fn split_file_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(0) | None => (name, ""),
        Some(i) => (&name[..i], &name[i..]),
    }
}

/// Returns the module name for a file or directory name: the first
/// dot-separated token, or `None` when that token is empty.
///
/// `search.type.ts` and `search` both yield `search`.
#[must_use]
pub fn module_name_of(segment: &str) -> Option<&str> {
    let name = segment.split('.').next().unwrap_or(segment);
    (!name.is_empty()).then_some(name)
}

/// Checks for kebab-case: lowercase ASCII alphanumerics separated by single
/// hyphens, with no leading or trailing hyphen.
#[must_use]
pub fn is_kebab_case(value: &str) -> bool {
    !value.is_empty()
        && value.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}
