//! Group filter parsing for list queries

/// Parses a comma-separated `hosts_groups` value into the groups to match.
///
/// Returns `None` when the input is empty, meaning "do not filter". Each token
/// is trimmed of surrounding whitespace; duplicates and empty tokens are kept
/// as given, so `"a,,a"` yields `["a", "", "a"]`.
pub fn parse_group_filter(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }

    Some(raw.split(',').map(|g| g.trim().to_string()).collect())
}
