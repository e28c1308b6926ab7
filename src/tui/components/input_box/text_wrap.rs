//! Wrapping and cursor geometry for the InputBox.
//!
//! Stateless helpers over `(text, width)`; the buffer itself lives in
//! `InputBox`.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border + left padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

pub(super) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after borders and padding. 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrap `text` into display lines, keeping the empty line a trailing
/// newline produces.
pub(super) fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.is_empty() || (text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty())) {
        lines.push(String::new());
    }
    lines
}

pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    wrap_lines(text, width).len() as u16
}

/// `(row, column)` of the cursor inside the wrapped text, before scrolling.
///
/// Columns are display cells, so wide characters count twice.
pub(super) fn cursor_cell(text: &str, cursor: usize, width: u16) -> (u16, u16) {
    let before = &text[..cursor];
    if width == 0 {
        return (0, 0);
    }

    // Rows: wrap everything up to the cursor
    let row = wrap_lines(before, width).len().saturating_sub(1) as u16;

    // Column: only the current logical line matters. textwrap trims trailing
    // whitespace, so measure the raw text after the last wrapped segment.
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let logical = &before[line_start..];
    let segments = textwrap::wrap(logical, wrap_options(width));
    let consumed: usize = segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .map(|s| s.chars().count())
        .sum();
    let tail: String = logical.chars().skip(consumed).collect();
    // Separators swallowed at a wrap point don't occupy a cell
    let tail = if consumed > 0 { tail.trim_start() } else { tail.as_str() };
    let col = (tail.width() as u16).min(width);

    (row, col)
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

/// Byte offset of the same character column on the neighbouring logical
/// line, or `None` at the first/last line.
pub(super) fn vertical_target(text: &str, cursor: usize, up: bool) -> Option<usize> {
    let line_start = text[..cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = text[line_start..cursor].chars().count();

    let (start, end) = if up {
        if line_start == 0 {
            return None;
        }
        let prev_end = line_start - 1;
        let prev_start = text[..prev_end].rfind('\n').map(|i| i + 1).unwrap_or(0);
        (prev_start, prev_end)
    } else {
        let line_end = text[cursor..].find('\n').map(|i| cursor + i)?;
        let next_start = line_end + 1;
        let next_end = text[next_start..]
            .find('\n')
            .map(|i| next_start + i)
            .unwrap_or(text.len());
        (next_start, next_end)
    };

    let offset = text[start..end]
        .char_indices()
        .nth(column)
        .map(|(i, _)| start + i)
        .unwrap_or(end);
    Some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_basics() {
        assert_eq!(wrap_line_count("", 80), 1);
        assert_eq!(wrap_line_count("hello", 0), 1);
        assert_eq!(wrap_line_count("hello", 80), 1);
        assert_eq!(wrap_line_count("a\nb\nc", 80), 3);
    }

    #[test]
    fn long_words_break() {
        assert_eq!(wrap_line_count("aaaaaaaaaa", 5), 2);
    }

    #[test]
    fn trailing_newline_adds_line() {
        assert_eq!(wrap_line_count("hello\n", 80), 2);
        assert_eq!(wrap_line_count("aaaaaaaaaa\n", 5), 3);
    }

    #[test]
    fn cursor_cell_on_first_line() {
        assert_eq!(cursor_cell("hello", 5, 80), (0, 5));
        assert_eq!(cursor_cell("hello", 2, 80), (0, 2));
    }

    #[test]
    fn cursor_cell_keeps_trailing_spaces() {
        assert_eq!(cursor_cell("hi  ", 4, 80), (0, 4));
    }

    #[test]
    fn cursor_cell_keeps_leading_spaces() {
        assert_eq!(cursor_cell("  x", 3, 80), (0, 3));
    }

    #[test]
    fn cursor_cell_after_newline() {
        assert_eq!(cursor_cell("ab\n", 3, 80), (1, 0));
        assert_eq!(cursor_cell("ab\ncd", 5, 80), (1, 2));
    }

    #[test]
    fn cursor_cell_on_wrapped_segment() {
        // "aaaaa" | "bb" at width 5
        assert_eq!(cursor_cell("aaaaabb", 7, 5), (1, 2));
    }

    #[test]
    fn cursor_cell_counts_wide_chars() {
        assert_eq!(cursor_cell("日本", "日本".len(), 80), (0, 4));
    }

    #[test]
    fn char_boundaries_multibyte() {
        let s = "café";
        assert_eq!(prev_char_boundary(s, 5), 3);
        assert_eq!(prev_char_boundary(s, 3), 2);
        assert_eq!(next_char_boundary(s, 3), 5);
        assert_eq!(next_char_boundary(s, 5), 5);
    }

    #[test]
    fn char_boundaries_emoji() {
        let s = "a🔥b";
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(prev_char_boundary(s, 5), 1);
    }

    #[test]
    fn vertical_moves_keep_column() {
        let text = "hello\nhi\nworld";
        // From "hel|lo" down → "hi|" (clamped to line end)
        assert_eq!(vertical_target(text, 3, false), Some(8));
        // From "hi|" down → "wo|rld"
        assert_eq!(vertical_target(text, 8, false), Some(11));
        // From "wo|rld" up → "hi|"
        assert_eq!(vertical_target(text, 11, true), Some(8));
    }

    #[test]
    fn vertical_moves_stop_at_edges() {
        assert_eq!(vertical_target("one\ntwo", 1, true), None);
        assert_eq!(vertical_target("one\ntwo", 5, false), None);
    }
}
