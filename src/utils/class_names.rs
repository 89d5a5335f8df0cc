// Class-name merging for badge and table markup
//
// Mirrors the usual `cn(...)` helper: conditional parts are joined, blank
// tokens dropped, and a later utility overrides an earlier one from the same
// conflict group ("p-2 p-4" → "p-4", "md:w-8 md:w-10" → "md:w-10").

/// Utility prefixes where only the last class may survive
/// Longer prefixes come first so "px-2" is never read as "p".
const CONFLICT_PREFIXES: &[&str] = &[
    "px", "py", "pt", "pb", "pl", "pr", "p",
    "mx", "my", "mt", "mb", "ml", "mr", "m",
    "gap", "rounded", "w", "h",
];

/// Merge class lists, later tokens winning over earlier conflicting ones
pub fn merge_classes<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for token in parts.into_iter().flat_map(str::split_whitespace) {
        let group = conflict_group(token);
        kept.retain(|existing| {
            if *existing == token {
                return false;
            }
            match (&group, conflict_group(existing)) {
                (Some(a), Some(b)) => *a != b,
                _ => true,
            }
        });
        kept.push(token);
    }

    kept.join(" ")
}

/// Conditional class helper: `when(is_active, "bg-blue-50")`
pub fn when(condition: bool, classes: &str) -> &str {
    if condition {
        classes
    } else {
        ""
    }
}

/// Variant chain ("md:hover:") plus the utility prefix, if the token has one
fn conflict_group(token: &str) -> Option<(String, &'static str)> {
    let (variant, utility) = match token.rfind(':') {
        Some(idx) => (&token[..=idx], &token[idx + 1..]),
        None => ("", token),
    };

    CONFLICT_PREFIXES
        .iter()
        .find(|prefix| {
            utility == **prefix
                || utility
                    .strip_prefix(**prefix)
                    .map_or(false, |rest| rest.starts_with('-'))
        })
        .map(|prefix| (variant.to_string(), *prefix))
}
