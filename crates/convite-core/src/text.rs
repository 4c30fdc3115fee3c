//! Text normalization for case- and accent-insensitive search.
//!
//! A search needle matches a record when `normalize(needle)` is a substring
//! of `normalize(name)`. Normalization upper-cases, trims, and strips
//! combining diacritical marks (NFD decomposition, then dropping the
//! combining characters), so "Jose" finds "JOSÉ".

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize text for comparison.
///
/// Upper-cases, trims surrounding whitespace, and removes combining marks.
/// Pure and idempotent: `normalize(normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    text.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}
