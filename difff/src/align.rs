//! Line alignment.
//!
//! Walks both texts with one cursor each. Identical lines are paired
//! directly. On a mismatch, a bounded forward search in each text looks for
//! the line most similar to the other side's current line:
//!
//! 1. If neither search finds a candidate at or above the threshold, the two
//!    current lines are paired as a replacement.
//! 2. Otherwise the direction with the better ratio wins (ties go to text B):
//!    the lines skipped over become insertions (or deletions), and the
//!    current line is paired with the candidate.
//!
//! Every step advances at least one cursor, so the walk does at most
//! `window * (n + m)` ratio computations.

use crate::chars::LineChars;
use crate::lines::{is_blank, split_lines};
use crate::types::AlignedPair;

/// Configuration for the alignment walk.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignConfig {
    /// Number of lines, starting at the cursor, searched for a
    /// re-synchronization point after a mismatch.
    /// A window of 0 pairs every mismatch as a replacement.
    pub window: usize,

    /// Minimum similarity ratio for a candidate to be accepted.
    /// Candidates with exactly this ratio are accepted.
    pub threshold: f32,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl AlignConfig {
    /// Default search window, in lines.
    pub const DEFAULT_WINDOW: usize = 15;

    /// Default similarity threshold.
    pub const DEFAULT_THRESHOLD: f32 = 0.5;

    /// Set the search window.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the similarity threshold, clamped into `[0, 1]`.
    ///
    /// NaN falls back to [`AlignConfig::DEFAULT_THRESHOLD`].
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = if threshold.is_nan() {
            Self::DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }
}

/// Align two texts line by line with the default configuration.
///
/// Every line of `text_a` shows up on the left of exactly one pair, every
/// line of `text_b` on the right of exactly one pair, both in their original
/// order.
pub fn align<'a>(text_a: &'a str, text_b: &'a str) -> Vec<AlignedPair<'a>> {
    align_with(text_a, text_b, &AlignConfig::default())
}

/// Align two texts line by line.
pub fn align_with<'a>(
    text_a: &'a str,
    text_b: &'a str,
    config: &AlignConfig,
) -> Vec<AlignedPair<'a>> {
    let aligner = Aligner::new(text_a, text_b, config);
    debug!(
        lines_a = aligner.a.len(),
        lines_b = aligner.b.len(),
        window = config.window,
        threshold = config.threshold,
        "align start"
    );

    let pairs = aligner.run();
    debug!(
        pairs = pairs.len(),
        summary = ?crate::types::Summary::of(&pairs),
        "align done"
    );

    pairs
}

/// Best candidate found by a forward search.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    ratio: f32,
    index: usize,
}

/// What to do about a mismatch at the cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resync {
    /// Pair the two current lines.
    Replace,
    /// Lines of B before `at` are insertions; B[at] pairs with A's line.
    SkipB { at: usize },
    /// Lines of A before `at` are deletions; A[at] pairs with B's line.
    SkipA { at: usize },
}

impl Resync {
    fn decide(
        forward_b: Option<Candidate>,
        forward_a: Option<Candidate>,
        threshold: f32,
    ) -> Self {
        let accept = |c: Option<Candidate>| c.filter(|c| c.ratio >= threshold);
        match (accept(forward_b), accept(forward_a)) {
            (None, None) => Self::Replace,
            (Some(b), Some(a)) if a.ratio > b.ratio => Self::SkipA { at: a.index },
            (Some(b), _) => Self::SkipB { at: b.index },
            (None, Some(a)) => Self::SkipA { at: a.index },
        }
    }
}

struct Aligner<'a, 'c> {
    a: Vec<LineChars<'a>>,
    b: Vec<LineChars<'a>>,
    config: &'c AlignConfig,
    out: Vec<AlignedPair<'a>>,
}

impl<'a, 'c> Aligner<'a, 'c> {
    fn new(text_a: &'a str, text_b: &'a str, config: &'c AlignConfig) -> Self {
        let a: Vec<_> = split_lines(text_a).into_iter().map(LineChars::new).collect();
        let b: Vec<_> = split_lines(text_b).into_iter().map(LineChars::new).collect();
        let out = Vec::with_capacity(a.len().max(b.len()));
        Self { a, b, config, out }
    }

    fn run(mut self) -> Vec<AlignedPair<'a>> {
        let (mut i, mut j) = (0, 0);

        loop {
            if i == self.a.len() {
                let rest = &self.b[j..];
                self.out
                    .extend(rest.iter().map(|line| AlignedPair::insertion(line.text)));
                break;
            }
            if j == self.b.len() {
                let rest = &self.a[i..];
                self.out
                    .extend(rest.iter().map(|line| AlignedPair::deletion(line.text)));
                break;
            }

            if self.a[i].text == self.b[j].text {
                self.out.push(AlignedPair::equal(self.a[i].text));
                i += 1;
                j += 1;
                continue;
            }

            let forward_b = self.search(&self.a[i], &self.b, j);
            let forward_a = self.search(&self.b[j], &self.a, i);
            let resync = Resync::decide(forward_b, forward_a, self.config.threshold);
            trace!(i, j, ?forward_b, ?forward_a, ?resync, "mismatch");

            match resync {
                Resync::Replace => {
                    self.pair(i, j);
                    i += 1;
                    j += 1;
                }
                Resync::SkipB { at } => {
                    for line in &self.b[j..at] {
                        self.out.push(AlignedPair::insertion(line.text));
                    }
                    self.pair(i, at);
                    i += 1;
                    j = at + 1;
                }
                Resync::SkipA { at } => {
                    for line in &self.a[i..at] {
                        self.out.push(AlignedPair::deletion(line.text));
                    }
                    self.pair(at, j);
                    i = at + 1;
                    j += 1;
                }
            }
        }

        self.out
    }

    /// Scan `lines[start..start + window]` for the line most similar to
    /// `needle`, skipping blank lines. The first of equally good lines wins.
    fn search(
        &self,
        needle: &LineChars<'a>,
        lines: &[LineChars<'a>],
        start: usize,
    ) -> Option<Candidate> {
        let end = start.saturating_add(self.config.window).min(lines.len());
        let mut best: Option<Candidate> = None;

        for (index, line) in lines.iter().enumerate().take(end).skip(start) {
            if is_blank(line.text) {
                continue;
            }
            let ratio = needle.ratio(line);
            if best.is_none_or(|b| ratio > b.ratio) {
                best = Some(Candidate { ratio, index });
            }
        }

        best
    }

    /// Emit the character-level pair of `a[i]` and `b[j]`.
    fn pair(&mut self, i: usize, j: usize) {
        let (left, right) = self.a[i].diff(&self.b[j]);
        self.out.push(AlignedPair::matched(left, right));
    }
}
