//! Lexical variants of a field name
//!
//! Produces the comparison forms used by name scoring so that naming
//! conventions (`customer_email`, `customerEmail`, `customer-email`) do not
//! hide an otherwise identical name.

use std::collections::BTreeSet;

/// Split camel-case boundaries, collapse non-alphanumeric runs and lowercase
///
/// A boundary is a lowercase letter or digit followed by an uppercase letter.
pub fn normalize_words(raw: &str) -> Vec<String> {
    let mut spaced = String::with_capacity(raw.len() + 8);
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        if let Some(p) = prev {
            if (p.is_lowercase() || p.is_ascii_digit()) && c.is_uppercase() {
                spaced.push(' ');
            }
        }
        if c.is_alphanumeric() {
            spaced.push(c);
        } else {
            spaced.push(' ');
        }
        prev = Some(c);
    }

    spaced
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// All comparison variants of a field name
///
/// Contains the lowercase original, the space-joined normalized form and
/// its snake, kebab and concatenated joins. Duplicates collapse, so the
/// set holds at most one empty string.
pub fn name_variants(raw: &str) -> BTreeSet<String> {
    let words = normalize_words(raw);

    let mut variants = BTreeSet::new();
    variants.insert(raw.to_lowercase());
    variants.insert(words.join(" "));
    variants.insert(words.join("_"));
    variants.insert(words.join("-"));
    variants.insert(words.concat());
    variants
}
