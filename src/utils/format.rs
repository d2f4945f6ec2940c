use chrono::{DateTime, Utc};

/// Case-insensitive substring check for search filtering
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive ordering for display sorting
pub fn cmp_ignore_case(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a timestamp for display, e.g. "Nov 02, 2024 18:30"
pub fn format_timestamp(timestamp: &Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(dt) => dt.format("%b %d, %Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Kasbah of the Udayas", "udayas"));
        assert!(contains_ignore_case("Hassan Tower", "HASSAN"));
        assert!(!contains_ignore_case("Chellah", "medina"));
        assert!(contains_ignore_case("anything", ""));
    }

    #[test]
    fn test_cmp_ignore_case() {
        use std::cmp::Ordering;
        assert_eq!(cmp_ignore_case("agdal", "Agdal"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("Agdal", "Hassan"), Ordering::Less);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer sentence", 9), "a long...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_timestamp() {
        let dt: DateTime<Utc> = "2024-11-02T18:30:00Z".parse().expect("timestamp");
        assert_eq!(format_timestamp(&Some(dt)), "Nov 02, 2024 18:30");
        assert_eq!(format_timestamp(&None), "-");
    }
}
