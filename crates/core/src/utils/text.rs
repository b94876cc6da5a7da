/// Normalizes a pipeline status label for filtering: trimmed, lowercased,
/// spaces replaced by underscores (`"In Progress"` -> `"in_progress"`).
pub fn normalize_status(status: &str) -> String {
    status.trim().to_lowercase().replace(' ', "_")
}

/// Case-insensitive substring check. `needle_lower` must already be lowercase.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
