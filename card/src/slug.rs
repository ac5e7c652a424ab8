use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Derives a URL-safe identifier from a display name.
///
/// Lowercases, splits off diacritics ("Nguyễn" becomes "Nguyen"), then
/// collapses everything outside `[a-z0-9]` into single hyphens with no
/// hyphen at either edge. Yields an empty string when nothing survives,
/// so callers pick their own fallback.
pub fn slugify(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let collapse = Regex::new(r"[^a-z0-9]+").unwrap();

    collapse
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}
