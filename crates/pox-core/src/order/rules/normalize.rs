//! Whitespace and case normalization helpers.

use std::borrow::Cow;

use super::patterns::{FOOTER_KEYWORDS, SECTION_LABEL};

/// Collapse every run of whitespace (including line breaks) to a single
/// space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if s.contains('\r') {
        Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Lowercase a token and strip surrounding punctuation, for keyword comparison.
pub fn normalize_word(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Whether a line carries totals or tax rather than an item.
pub fn is_footer_line(line: &str) -> bool {
    FOOTER_KEYWORDS.is_match(line)
}

/// Whether a line ends the current table row: a footer, a signature block,
/// or a `Label:` line.
pub fn is_row_terminator(line: &str) -> bool {
    is_footer_line(line) || SECTION_LABEL.is_match(line.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Steel \t Bolt\n  M6  "), "Steel Bolt M6");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc"), "a\nb\nc");
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("QTY:"), "qty");
        assert_eq!(normalize_word("(Item)"), "item");
    }

    #[test]
    fn test_row_terminator() {
        assert!(is_row_terminator("Subtotal        70.000"));
        assert!(is_row_terminator("   Requested By          Approved By"));
        assert!(!is_row_terminator("Galvanized, zinc plated"));
    }
}
