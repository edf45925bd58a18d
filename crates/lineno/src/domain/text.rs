//! Primitive string helpers shared by the transform engine.

/// Whether the text is empty once surrounding whitespace is removed.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Count the leading characters of `text` drawn from `set`.
pub fn leading_count(text: &str, set: &[char]) -> usize {
    text.chars().take_while(|ch| set.contains(ch)).count()
}

/// Substring starting at the char offset `from`; empty when out of range.
pub fn char_slice_from(text: &str, from: usize) -> &str {
    match text.char_indices().nth(from) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

/// Occurrences of `pattern` in `text`. Matches are found left to right and
/// may share characters with a longer pattern counted separately (counting
/// `"\r"` also sees the `\r` inside every `"\r\n"`).
pub fn count_matches(text: &str, pattern: &str) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    text.matches(pattern).count()
}

/// Parse a base-10 integer, `None` on anything that is not one.
pub fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank(" \t "));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn leading_count_over_custom_set() {
        assert_eq!(leading_count("\t  text", &[' ', '\t']), 3);
        assert_eq!(leading_count("text", &[' ', '\t']), 0);
        assert_eq!(leading_count("   ", &[' ', '\t']), 3);
    }

    #[test]
    fn char_slice_is_scalar_indexed() {
        assert_eq!(char_slice_from("héllo", 2), "llo");
        assert_eq!(char_slice_from("ab", 2), "");
        assert_eq!(char_slice_from("ab", 10), "");
        assert_eq!(char_slice_from("", 0), "");
    }

    #[test]
    fn count_matches_sees_overlapping_break_styles() {
        let text = "a\r\nb\nc\r";
        assert_eq!(count_matches(text, "\r\n"), 1);
        assert_eq!(count_matches(text, "\r"), 2);
        assert_eq!(count_matches(text, "\n"), 2);
        assert_eq!(count_matches(text, ""), 0);
    }

    #[test]
    fn parse_integer_rejects_non_integers() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("  -7 "), Some(-7));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("12abc"), None);
        assert_eq!(parse_integer("1.5"), None);
    }
}
