//! Column label formatting.
//!
//! Backend field names come either as camel case (`bBoxHigh`) or as
//! upper/snake case (`MANUFACTURER_ADDRESS`). Labels are the words of the
//! name, each capitalized, joined by a single space.

/// Turn a raw field name into a column title.
///
/// `"MANUFACTURER_ADDRESS"` → `"Manufacturer Address"`,
/// `"bBoxHigh"` → `"B Box High"`, `"id"` → `"Id"`.
pub fn format_label(raw: &str) -> String {
    let segments = if is_camel_case(raw) {
        split_camel(raw)
    } else {
        raw.split('_').filter(|s| !s.is_empty()).collect()
    };

    segments
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Camel case: no underscore, and the first or second character is a
/// lower-case letter.
fn is_camel_case(raw: &str) -> bool {
    if raw.contains('_') {
        return false;
    }
    let mut chars = raw.chars();
    let first = chars.next();
    let second = chars.next();
    first.is_some_and(|c| c.is_ascii_lowercase()) || second.is_some_and(|c| c.is_ascii_lowercase())
}

/// Split before every upper-case ASCII letter (never before the first char).
fn split_camel(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        if c.is_ascii_uppercase() && i > start {
            parts.push(&raw[start..i]);
            start = i;
        }
    }
    if start < raw.len() {
        parts.push(&raw[start..]);
    }
    parts
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
