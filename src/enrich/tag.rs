//! README category extraction
//!
//! Portfolio repos mark their category on the first README line, e.g.
//! `// WEB - personal portfolio`. The tag is whatever follows the `//`
//! marker up to the first delimiter, uppercased so it matches the UI's
//! category filters (`WEB` / `MOBILE` / `BACKEND`).

/// Delimiters that end the tag: hyphen, en dash, em dash, colon, pipe
const TAG_DELIMITERS: [char; 5] = ['-', '\u{2013}', '\u{2014}', ':', '|'];

/// Extract the category tag from raw README text.
///
/// Returns `None` unless the first line, after trimming, starts with `//`
/// and carries a non-empty token before the first delimiter.
pub fn extract_readme_tag(readme: &str) -> Option<String> {
    let first_line = readme.lines().next()?.trim();
    let candidate = first_line.strip_prefix("//")?.trim();
    if candidate.is_empty() {
        return None;
    }

    let token = candidate
        .split(TAG_DELIMITERS)
        .next()
        .unwrap_or_default()
        .trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_uppercase())
}
