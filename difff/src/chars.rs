//! Character-level diffing of a line pair.
//!
//! Opcodes come from Myers' algorithm over the characters of both lines. Its
//! minimal edit script matches a longest common subsequence, so the matched
//! character count is the LCS length. No element is ever treated as junk:
//! short lines made of a few repeated characters (indentation, table rules,
//! code punctuation) must still match.

use core::ops::Range;

use similar::{Algorithm, DiffTag, capture_diff_slices, get_diff_ratio};

use crate::types::{Span, SpanKind};

/// A line split into characters, remembering where each one starts.
#[derive(Debug, Clone)]
pub(crate) struct LineChars<'a> {
    pub(crate) text: &'a str,
    chars: Vec<char>,
    /// Byte offset of every character, plus `text.len()` at the end
    offsets: Vec<usize>,
}

impl<'a> LineChars<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        for (idx, c) in text.char_indices() {
            chars.push(c);
            offsets.push(idx);
        }
        offsets.push(text.len());
        Self {
            text,
            chars,
            offsets,
        }
    }

    /// Byte range covering the characters in `range`.
    fn byte_range(&self, range: Range<usize>) -> Range<usize> {
        self.offsets[range.start]..self.offsets[range.end]
    }

    /// Similarity ratio against another line, see [`similarity_ratio`].
    pub(crate) fn ratio(&self, other: &LineChars<'_>) -> f32 {
        let ops = capture_diff_slices(Algorithm::Myers, &self.chars, &other.chars);
        get_diff_ratio(&ops, self.chars.len(), other.chars.len())
    }

    /// Character-level spans of both lines, see [`diff_chars`].
    pub(crate) fn diff(&self, other: &LineChars<'a>) -> (Vec<Span<'a>>, Vec<Span<'a>>) {
        let mut left = SpanBuilder::new(self.text);
        let mut right = SpanBuilder::new(other.text);

        for op in capture_diff_slices(Algorithm::Myers, &self.chars, &other.chars) {
            let (tag, old, new) = op.as_tag_tuple();
            let old = self.byte_range(old);
            let new = other.byte_range(new);
            match tag {
                DiffTag::Equal => {
                    left.push(SpanKind::Plain, old);
                    right.push(SpanKind::Plain, new);
                }
                DiffTag::Delete => left.push(SpanKind::Changed, old),
                DiffTag::Insert => right.push(SpanKind::Changed, new),
                DiffTag::Replace => {
                    left.push(SpanKind::Changed, old);
                    right.push(SpanKind::Changed, new);
                }
            }
        }

        (left.finish(), right.finish())
    }
}

/// Collects byte runs of one line, merging neighbours of the same kind.
struct SpanBuilder<'a> {
    text: &'a str,
    runs: Vec<(SpanKind, Range<usize>)>,
}

impl<'a> SpanBuilder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            runs: Vec::new(),
        }
    }

    fn push(&mut self, kind: SpanKind, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        if let Some((last_kind, last)) = self.runs.last_mut() {
            if *last_kind == kind && last.end == range.start {
                last.end = range.end;
                return;
            }
        }
        self.runs.push((kind, range));
    }

    fn finish(self) -> Vec<Span<'a>> {
        let text = self.text;
        self.runs
            .into_iter()
            .map(|(kind, range)| Span {
                kind,
                text: &text[range],
            })
            .collect()
    }
}

/// Highlight the characters that differ between two lines.
///
/// Returns the spans of `line_a` and the spans of `line_b`. Matched runs are
/// [`SpanKind::Plain`] on both sides; deleted characters are
/// [`SpanKind::Changed`] on the left, inserted ones on the right, and a
/// replacement marks both. Concatenating a side's span text gives back the
/// original line. Empty lines produce no spans.
pub fn diff_chars<'a>(line_a: &'a str, line_b: &'a str) -> (Vec<Span<'a>>, Vec<Span<'a>>) {
    LineChars::new(line_a).diff(&LineChars::new(line_b))
}

/// How alike two lines are, from 0.0 (nothing in common) to 1.0 (identical).
///
/// Computed as `2 * M / T`, where `M` is the number of matched characters
/// and `T` the combined character count. Two empty lines are identical.
pub fn similarity_ratio(line_a: &str, line_b: &str) -> f32 {
    LineChars::new(line_a).ratio(&LineChars::new(line_b))
}
