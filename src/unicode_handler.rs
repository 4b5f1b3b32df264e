//! Unicode width and text layout utilities
//!
//! Handles East Asian Width calculations and grapheme-aware wrapping.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "…";

/// Calculate the display width of a string
///
/// Takes into account East Asian Wide/Fullwidth characters.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncate a string to fit within a maximum display width
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for grapheme in s.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > max_width {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }

    result
}

/// Centre a string within `target_width` columns
pub fn center_to_width(s: &str, target_width: usize) -> String {
    let s = truncate_to_width(s, target_width);
    let padding = target_width - display_width(&s);
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(padding - left))
}

/// Split one line into rows no wider than `width`, breaking anywhere.
///
/// Always returns at least one row, so an empty line keeps its place.
pub fn hard_wrap(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut current = 0;

    for grapheme in line.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current > 0 && current + grapheme_width > width {
            rows.push(String::new());
            current = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push_str(grapheme);
        }
        current += grapheme_width;
    }

    rows
}

/// Lay text out into at most `max_lines` lines of `width` columns.
///
/// Explicit newlines are honoured, words wrap at whitespace and overlong words
/// break at grapheme boundaries. If anything is cut off, the last line ends
/// with an ellipsis.
pub fn wrap_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph.trim_end_matches('\r'), width, &mut lines);
    }

    // Drop trailing blank lines so "HELLO\n" prints like "HELLO"
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let room = width.saturating_sub(display_width(ELLIPSIS));
            *last = format!("{}{}", truncate_to_width(last.trim_end(), room), ELLIPSIS);
        }
    }

    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, out: &mut Vec<String>) {
    let mut line = String::new();

    for word in paragraph.split_word_bounds() {
        if display_width(&line) + display_width(word) <= width {
            line.push_str(word);
            continue;
        }

        if word.trim().is_empty() {
            // Whitespace at a wrap point is dropped
            flush_line(&mut line, out);
            continue;
        }

        if !line.is_empty() {
            flush_line(&mut line, out);
        }

        // Break words wider than a whole line
        for grapheme in word.graphemes(true) {
            if !line.is_empty() && display_width(&line) + grapheme.width() > width {
                flush_line(&mut line, out);
            }
            line.push_str(grapheme);
        }
    }

    flush_line(&mut line, out);
}

fn flush_line(line: &mut String, out: &mut Vec<String>) {
    out.push(line.trim_end().to_string());
    line.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_wrap() {
        assert_eq!(hard_wrap("", 4), vec![""]);
        assert_eq!(hard_wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(hard_wrap("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("Hello"), 5);
    }

    #[test]
    fn test_display_width_cjk() {
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Hello, World!", 5), "Hello");
        assert_eq!(truncate_to_width("你好世界", 5), "你好");
    }

    #[test]
    fn test_center_to_width() {
        assert_eq!(center_to_width("Hi", 6), "  Hi  ");
        assert_eq!(center_to_width("Hi", 5), " Hi  ");
        assert_eq!(center_to_width("Hello", 3), "Hel");
    }

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_lines("HELLO", 10, 3), vec!["HELLO"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_lines("", 10, 3).is_empty());
        assert!(wrap_lines("\n\n", 10, 3).is_empty());
    }

    #[test]
    fn test_wrap_at_words() {
        assert_eq!(
            wrap_lines("the quick brown fox", 10, 3),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_honours_newlines() {
        assert_eq!(wrap_lines("ONE\nTWO", 10, 3), vec!["ONE", "TWO"]);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrap_lines("ABCDEFGH", 3, 3), vec!["ABC", "DEF", "GH"]);
    }

    #[test]
    fn test_wrap_limits_lines_with_ellipsis() {
        let lines = wrap_lines("A\nB\nC\nD", 4, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "C…");
    }

    #[test]
    fn test_wrapped_lines_fit_width() {
        let text = "A".repeat(101);
        for line in wrap_lines(&text, 12, 3) {
            assert!(display_width(&line) <= 12);
        }
    }
}
