//! Declared type compatibility table

/// Score for identical types
pub const IDENTICAL: f64 = 1.0;

/// `string` against one of its textual specialisations
pub const STRING_FAMILY: f64 = 0.7;

/// `number` against `integer`
pub const NUMERIC_FAMILY: f64 = 0.9;

/// `datetime` against `date`
pub const TEMPORAL_FAMILY: f64 = 0.85;

/// Two differently spelled array types
pub const ARRAY_FAMILY: f64 = 0.8;

/// Anything else: weakly eligible, never excluded
pub const BASELINE: f64 = 0.25;

const STRING_SPECIALISATIONS: [&str; 3] = ["text", "slug", "url"];

fn is_array(t: &str) -> bool {
    t == "array" || t.starts_with("array<") || t.ends_with("[]")
}

fn cross_pair(a: &str, b: &str, x: &str, y: &str) -> bool {
    (a == x && b == y) || (a == y && b == x)
}

/// How interchangeable two declared field types are, in (0, 1]
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
pub fn type_compatibility(source: &str, target: &str) -> f64 {
    let a = source.trim().to_lowercase();
    let b = target.trim().to_lowercase();

    if a == b {
        return IDENTICAL;
    }

    let string_family = (a == "string" && STRING_SPECIALISATIONS.contains(&b.as_str()))
        || (b == "string" && STRING_SPECIALISATIONS.contains(&a.as_str()));
    if string_family {
        return STRING_FAMILY;
    }

    if cross_pair(&a, &b, "number", "integer") {
        return NUMERIC_FAMILY;
    }

    if cross_pair(&a, &b, "datetime", "date") {
        return TEMPORAL_FAMILY;
    }

    if is_array(&a) && is_array(&b) {
        return ARRAY_FAMILY;
    }

    BASELINE
}
