//! Normalized edit-distance similarity
//!
//! Uses Levenshtein distance (unit cost insert/delete/substitute) over
//! lowercased Unicode scalar values.

use rapidfuzz::distance::levenshtein;

/// Case-insensitive similarity in [0, 1]
///
/// `1 - distance / max(len(a), len(b))`, with two empty strings defined as
/// identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein::distance(a.chars(), b.chars());
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}
