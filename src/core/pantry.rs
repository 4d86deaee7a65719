//! Ingredient text normalization.
//!
//! The ingredients field is free text split on commas or newlines. Detected
//! names from the image endpoint are merged into it with set semantics:
//! case-sensitive exact-string dedup, existing entries first.

/// Splits free-text ingredients on commas/newlines, trimming each segment
/// and dropping empty ones. Relative order is preserved.
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merges detected ingredient names into the existing free-text list and
/// returns the comma-joined result.
///
/// Existing entries keep their order; new names are appended in the order
/// received. Matching is case-sensitive and exact, so "Egg" does not
/// collapse into an existing "egg".
pub fn merge_detected(existing_text: &str, detected: &[String]) -> String {
    let mut merged = split_ingredients(existing_text);
    for name in detected {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if !merged.iter().any(|entry| entry == name) {
            merged.push(name.to_string());
        }
    }
    merged.join(", ")
}
