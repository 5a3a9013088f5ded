//! Line splitting.

/// Returns true for every character that ends a line.
///
/// This is the universal-newline set: LF, CR (and CRLF as one break),
/// vertical tab, form feed, the file/group/record separators, NEL and the
/// Unicode line and paragraph separators.
pub const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split `text` into lines, dropping the terminators.
///
/// A trailing terminator does not start an extra empty line, and the empty
/// string has no lines at all.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }

        lines.push(&text[start..idx]);
        start = idx + c.len_utf8();

        if c == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Returns true if the line only holds whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
