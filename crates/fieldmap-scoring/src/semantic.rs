//! Semantic tag overlap

use std::collections::BTreeSet;

fn tag_set(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// `|S ∩ T| / max(|S|, |T|, 1)` over de-duplicated, lowercased tags
///
/// Empty tag sets give 0 rather than a division by zero.
pub fn tag_overlap(source: &[String], target: &[String]) -> f64 {
    let source = tag_set(source);
    let target = tag_set(target);

    let shared = source.intersection(&target).count();
    let denominator = source.len().max(target.len()).max(1);
    shared as f64 / denominator as f64
}
