//! Display-safe escaping of raw line text.
//!
//! Markup-significant characters become entities, and whitespace is turned
//! into non-breaking spaces so a browser does not collapse it.

use std::borrow::Cow;
use std::fmt::{self, Write};

const NBSP: &str = "&nbsp;";

/// A tab is shown as four non-breaking spaces.
const TAB: &str = "&nbsp;&nbsp;&nbsp;&nbsp;";

fn replacement(c: char) -> Option<&'static str> {
    Some(match c {
        '&' => "&amp;",
        '<' => "&lt;",
        '>' => "&gt;",
        '"' => "&quot;",
        '\'' => "&#x27;",
        ' ' => NBSP,
        '\t' => TAB,
        _ => return None,
    })
}

/// Escape `text` for display, borrowing it when nothing needs replacing.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| replacement(c).is_some()) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    write_escaped(&mut out, text).expect("writing to String cannot fail");
    Cow::Owned(out)
}

/// Write the escaped form of `text` into `w`.
pub fn write_escaped<W: Write>(w: &mut W, text: &str) -> fmt::Result {
    let mut last = 0;
    for (idx, c) in text.char_indices() {
        if let Some(rep) = replacement(c) {
            w.write_str(&text[last..idx])?;
            w.write_str(rep)?;
            last = idx + c.len_utf8();
        }
    }
    w.write_str(&text[last..])
}
