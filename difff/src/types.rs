//! Alignment result types.
//!
//! An alignment is a `Vec<AlignedPair>`: one row per output line, each side
//! holding the spans of the line it shows (or nothing, for insertions and
//! deletions).

use std::borrow::Cow;

use crate::escape;

/// Whether a span is unchanged or highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Text present on both sides
    Plain,
    /// Text that only exists on this side
    Changed,
}

/// A contiguous run of raw text from one input line.
///
/// Spans borrow from the compared texts. Escaping happens when the span is
/// rendered, never before, so a character is escaped exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Plain or changed
    pub kind: SpanKind,
    /// The raw (unescaped) text
    pub text: &'a str,
}

impl<'a> Span<'a> {
    /// An unchanged run.
    pub const fn plain(text: &'a str) -> Self {
        Self {
            kind: SpanKind::Plain,
            text,
        }
    }

    /// A highlighted run.
    pub const fn changed(text: &'a str) -> Self {
        Self {
            kind: SpanKind::Changed,
            text,
        }
    }

    /// Returns true if this span is highlighted.
    pub const fn is_changed(self) -> bool {
        matches!(self.kind, SpanKind::Changed)
    }

    /// The display-safe markup for this span's text.
    pub fn escaped(self) -> Cow<'a, str> {
        escape::escape(self.text)
    }
}

/// How a pair relates its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    /// Both sides present, nothing highlighted
    Equal,
    /// Both sides present, some text highlighted
    Replace,
    /// Only the left side is present
    Delete,
    /// Only the right side is present
    Insert,
}

impl PairKind {
    /// Gutter marker used by text renderers.
    pub const fn symbol(self) -> char {
        match self {
            Self::Equal => ' ',
            Self::Replace => '~',
            Self::Delete => '-',
            Self::Insert => '+',
        }
    }
}

/// One row of the diff output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair<'a> {
    /// Spans of the line from text A, if this row shows one
    pub left: Option<Vec<Span<'a>>>,
    /// Spans of the line from text B, if this row shows one
    pub right: Option<Vec<Span<'a>>>,
}

impl<'a> AlignedPair<'a> {
    /// A line present unchanged in both texts.
    pub fn equal(line: &'a str) -> Self {
        Self {
            left: Some(whole_line(SpanKind::Plain, line)),
            right: Some(whole_line(SpanKind::Plain, line)),
        }
    }

    /// A line only present in text A, highlighted as a whole.
    pub fn deletion(line: &'a str) -> Self {
        Self {
            left: Some(whole_line(SpanKind::Changed, line)),
            right: None,
        }
    }

    /// A line only present in text B, highlighted as a whole.
    pub fn insertion(line: &'a str) -> Self {
        Self {
            left: None,
            right: Some(whole_line(SpanKind::Changed, line)),
        }
    }

    /// Two matched lines with their character-level spans.
    pub fn matched(left: Vec<Span<'a>>, right: Vec<Span<'a>>) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    /// Classify this pair.
    ///
    /// A pair with neither side present is reported as [`PairKind::Equal`].
    pub fn kind(&self) -> PairKind {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => {
                if left.iter().chain(right).any(|span| span.is_changed()) {
                    PairKind::Replace
                } else {
                    PairKind::Equal
                }
            }
            (Some(_), None) => PairKind::Delete,
            (None, Some(_)) => PairKind::Insert,
            (None, None) => PairKind::Equal,
        }
    }

    /// Returns true if any span on either side is highlighted.
    pub fn has_changes(&self) -> bool {
        !matches!(self.kind(), PairKind::Equal)
    }

    /// Raw text of the left line, reassembled from its spans.
    pub fn left_text(&self) -> Option<String> {
        self.left.as_deref().map(concat)
    }

    /// Raw text of the right line, reassembled from its spans.
    pub fn right_text(&self) -> Option<String> {
        self.right.as_deref().map(concat)
    }
}

fn whole_line(kind: SpanKind, line: &str) -> Vec<Span<'_>> {
    if line.is_empty() {
        Vec::new()
    } else {
        vec![Span { kind, text: line }]
    }
}

fn concat(spans: &[Span<'_>]) -> String {
    spans.iter().map(|span| span.text).collect()
}

/// Per-kind pair counts of an alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Rows with identical lines
    pub equal: usize,
    /// Rows pairing two different lines
    pub replaced: usize,
    /// Rows with a left line only
    pub deleted: usize,
    /// Rows with a right line only
    pub inserted: usize,
}

impl Summary {
    /// Count the pairs of an alignment by kind.
    pub fn of(pairs: &[AlignedPair<'_>]) -> Self {
        let mut summary = Self::default();
        for pair in pairs {
            match pair.kind() {
                PairKind::Equal => summary.equal += 1,
                PairKind::Replace => summary.replaced += 1,
                PairKind::Delete => summary.deleted += 1,
                PairKind::Insert => summary.inserted += 1,
            }
        }
        summary
    }

    /// Total number of rows.
    pub const fn total(&self) -> usize {
        self.equal + self.replaced + self.deleted + self.inserted
    }

    /// Returns true if every row is unchanged.
    pub const fn is_identical(&self) -> bool {
        self.replaced == 0 && self.deleted == 0 && self.inserted == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_kinds() {
        assert_eq!(AlignedPair::equal("a").kind(), PairKind::Equal);
        assert_eq!(AlignedPair::deletion("a").kind(), PairKind::Delete);
        assert_eq!(AlignedPair::insertion("a").kind(), PairKind::Insert);
        assert_eq!(
            AlignedPair::matched(vec![Span::plain("a")], vec![Span::plain("a")]).kind(),
            PairKind::Equal
        );
        assert_eq!(
            AlignedPair::matched(
                vec![Span::plain("a"), Span::changed("b")],
                vec![Span::plain("a")]
            )
            .kind(),
            PairKind::Replace
        );
    }

    #[test]
    fn test_empty_lines_have_no_spans() {
        let pair = AlignedPair::insertion("");
        assert_eq!(pair.right, Some(vec![]));
        assert_eq!(pair.right_text().as_deref(), Some(""));
        assert_eq!(pair.left_text(), None);
    }

    #[test]
    fn test_text_reassembly() {
        let pair = AlignedPair::matched(
            vec![Span::plain("fn "), Span::changed("main"), Span::plain("()")],
            vec![Span::plain("fn "), Span::changed("start"), Span::plain("()")],
        );
        assert_eq!(pair.left_text().as_deref(), Some("fn main()"));
        assert_eq!(pair.right_text().as_deref(), Some("fn start()"));
        assert!(pair.has_changes());
    }

    #[test]
    fn test_summary() {
        let pairs = vec![
            AlignedPair::equal("a"),
            AlignedPair::insertion("b"),
            AlignedPair::insertion("c"),
            AlignedPair::deletion("d"),
        ];
        let summary = Summary::of(&pairs);
        assert_eq!(
            summary,
            Summary {
                equal: 1,
                replaced: 0,
                deleted: 1,
                inserted: 2,
            }
        );
        assert_eq!(summary.total(), 4);
        assert!(!summary.is_identical());
        assert!(Summary::of(&[AlignedPair::equal("x")]).is_identical());
    }

    #[test]
    fn test_span_escaped() {
        assert_eq!(Span::plain("a<b").escaped(), "a&lt;b");
        assert_eq!(Span::changed("ab").escaped(), "ab");
    }
}
