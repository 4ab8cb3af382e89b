//! Line splitting shared by the extractors.

/// Every Unicode line boundary, not just `\n` / `\r\n`. `\r\n` counts as one break.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Splits `text` on any line boundary. A trailing break does not add an empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_trailing_break_adds_no_line() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_crlf_is_a_single_break() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_lone_carriage_return_splits() {
        assert_eq!(split_lines("a\rb\r\rc"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_other_unicode_breaks_split() {
        assert_eq!(
            split_lines("a\u{0B}b\u{0C}c\u{85}d\u{2028}e\u{2029}f\u{1C}g"),
            vec!["a", "b", "c", "d", "e", "f", "g"]
        );
    }
}
