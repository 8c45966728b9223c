//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Truncates a string to at most `max_len` characters, marking the cut with `...`.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a tag list as `#a #b`.
pub fn format_tags(tags: &[String], use_colors: bool) -> String {
    let joined = tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");

    if use_colors {
        joined.cyan().to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_short() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_str_long() {
        assert_eq!(truncate_str("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("日本語のテキストです", 6), "日本語...");
    }

    #[test]
    fn test_format_tags_plain() {
        let tags = vec!["go".to_string(), "backend".to_string()];
        assert_eq!(format_tags(&tags, false), "#go #backend");
    }

    #[test]
    fn test_format_tags_empty() {
        assert_eq!(format_tags(&[], false), "");
    }
}
