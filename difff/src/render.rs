//! Two-column rendering of an alignment.
//!
//! [`rows`] flattens pairs into the row structure handed to a page template.
//! The render functions walk those rows and let a [`CellBackend`] decide how
//! plain and highlighted runs are written: escaped HTML for the browser,
//! bracketed plain text for tests and logs, or ANSI colors for a terminal.

use std::fmt::{self, Write};

use owo_colors::{OwoColorize, Rgb};
use unicode_width::UnicodeWidthStr;

use crate::escape::write_escaped;
use crate::types::{AlignedPair, PairKind, Span};

/// Which column a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Text A
    Left,
    /// Text B
    Right,
}

/// Semantic style of a run of text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    /// Text present on both sides
    Unchanged,
    /// Highlighted text in the left column
    Deleted,
    /// Highlighted text in the right column
    Inserted,
}

impl RunStyle {
    fn of(span: Span<'_>, column: Column) -> Self {
        match (span.is_changed(), column) {
            (false, _) => Self::Unchanged,
            (true, Column::Left) => Self::Deleted,
            (true, Column::Right) => Self::Inserted,
        }
    }
}

/// One row of the two-column output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'p, 'a> {
    /// Classification of the underlying pair
    pub kind: PairKind,
    /// Left cell, `None` when the row has no line from text A
    pub left: Option<&'p [Span<'a>]>,
    /// Right cell, `None` when the row has no line from text B
    pub right: Option<&'p [Span<'a>]>,
}

/// Flatten aligned pairs into rows, one per pair.
pub fn rows<'p, 'a>(pairs: &'p [AlignedPair<'a>]) -> Vec<Row<'p, 'a>> {
    pairs
        .iter()
        .map(|pair| Row {
            kind: pair.kind(),
            left: pair.left.as_deref(),
            right: pair.right.as_deref(),
        })
        .collect()
}

/// A backend that decides how runs of cell text are written.
pub trait CellBackend {
    /// Write one run of raw text with the given style.
    fn write_run<W: Write>(&self, w: &mut W, text: &str, style: RunStyle) -> fmt::Result;

    /// Display columns taken by decorations around a run (not its text).
    fn decoration_width(&self, _style: RunStyle) -> usize {
        0
    }

    /// Write all spans of a cell.
    fn write_cell<W: Write>(&self, w: &mut W, spans: &[Span<'_>], column: Column) -> fmt::Result {
        for span in spans {
            self.write_run(w, span.text, RunStyle::of(*span, column))?;
        }
        Ok(())
    }

    /// Display width of a cell as written by this backend.
    fn cell_width(&self, spans: &[Span<'_>], column: Column) -> usize {
        spans
            .iter()
            .map(|span| span.text.width() + self.decoration_width(RunStyle::of(*span, column)))
            .sum()
    }
}

/// HTML backend: escapes text and wraps highlighted runs in a `<span>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlBackend {
    /// Class of the `<span>` around highlighted runs (default: `highlight`)
    pub highlight_class: &'static str,
    /// Class of each `<td>` cell (default: `result-text`)
    pub cell_class: &'static str,
}

impl Default for HtmlBackend {
    fn default() -> Self {
        Self {
            highlight_class: "highlight",
            cell_class: "result-text",
        }
    }
}

impl CellBackend for HtmlBackend {
    fn write_run<W: Write>(&self, w: &mut W, text: &str, style: RunStyle) -> fmt::Result {
        match style {
            RunStyle::Unchanged => write_escaped(w, text),
            RunStyle::Deleted | RunStyle::Inserted => {
                write!(w, "<span class=\"{}\">", self.highlight_class)?;
                write_escaped(w, text)?;
                w.write_str("</span>")
            }
        }
    }
}

/// Plain backend: highlighted runs are written as `[text]`.
///
/// Use this for tests and logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBackend;

impl CellBackend for PlainBackend {
    fn write_run<W: Write>(&self, w: &mut W, text: &str, style: RunStyle) -> fmt::Result {
        match style {
            RunStyle::Unchanged => w.write_str(text),
            RunStyle::Deleted | RunStyle::Inserted => write!(w, "[{text}]"),
        }
    }

    fn decoration_width(&self, style: RunStyle) -> usize {
        match style {
            RunStyle::Unchanged => 0,
            RunStyle::Deleted | RunStyle::Inserted => 2,
        }
    }
}

/// Colors for terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTheme {
    /// Color for highlighted text in the left column (default: red)
    pub deleted: Rgb,
    /// Color for highlighted text in the right column (default: green)
    pub inserted: Rgb,
}

impl Default for DiffTheme {
    fn default() -> Self {
        Self::TOKYO_NIGHT
    }
}

impl DiffTheme {
    /// Tokyo Night color theme (default).
    pub const TOKYO_NIGHT: Self = Self {
        deleted: Rgb(247, 118, 142),
        inserted: Rgb(158, 206, 106),
    };
}

/// ANSI backend: highlighted runs are colored, unchanged text is left as is.
#[derive(Debug, Clone, Default)]
pub struct AnsiBackend {
    theme: DiffTheme,
}

impl AnsiBackend {
    /// Create a new ANSI backend with the given theme.
    pub fn new(theme: DiffTheme) -> Self {
        Self { theme }
    }
}

impl CellBackend for AnsiBackend {
    fn write_run<W: Write>(&self, w: &mut W, text: &str, style: RunStyle) -> fmt::Result {
        match style {
            RunStyle::Unchanged => w.write_str(text),
            RunStyle::Deleted => write!(w, "{}", text.color(self.theme.deleted)),
            RunStyle::Inserted => write!(w, "{}", text.color(self.theme.inserted)),
        }
    }
}

/// Options for rendering an alignment.
#[derive(Debug, Clone)]
pub struct RenderOptions<B: CellBackend> {
    /// Backend for styling cell text.
    pub backend: B,
    /// Text between the two columns of the side-by-side view (default: ` | `).
    pub separator: &'static str,
}

impl Default for RenderOptions<AnsiBackend> {
    fn default() -> Self {
        Self::with_backend(AnsiBackend::default())
    }
}

impl RenderOptions<PlainBackend> {
    /// Create options with plain backend (no markup, no colors).
    pub fn plain() -> Self {
        Self::with_backend(PlainBackend)
    }
}

impl<B: CellBackend> RenderOptions<B> {
    /// Create options with a custom backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            separator: " | ",
        }
    }
}

/// Render pairs as HTML table rows, one `<tr>` per pair.
///
/// Absent sides become empty cells.
pub fn render_html<W: Write>(
    pairs: &[AlignedPair<'_>],
    w: &mut W,
    backend: &HtmlBackend,
) -> fmt::Result {
    for row in rows(pairs) {
        w.write_str("<tr>")?;
        for (cell, column) in [(row.left, Column::Left), (row.right, Column::Right)] {
            write!(w, "<td class=\"{}\">", backend.cell_class)?;
            if let Some(spans) = cell {
                backend.write_cell(w, spans, column)?;
            }
            w.write_str("</td>")?;
        }
        w.write_str("</tr>\n")?;
    }
    Ok(())
}

/// Render pairs as HTML table rows into a String.
pub fn render_html_to_string(pairs: &[AlignedPair<'_>], backend: &HtmlBackend) -> String {
    let mut out = String::new();
    render_html(pairs, &mut out, backend).expect("writing to String cannot fail");
    out
}

/// Render pairs as a two-column text view.
///
/// Each line starts with the row's [`PairKind::symbol`], followed by the left
/// cell padded to the widest left cell, the separator and the right cell.
/// Trailing whitespace is trimmed from every line.
pub fn render_side_by_side<W: Write, B: CellBackend>(
    pairs: &[AlignedPair<'_>],
    w: &mut W,
    opts: &RenderOptions<B>,
) -> fmt::Result {
    let rows = rows(pairs);
    let left_width = rows
        .iter()
        .filter_map(|row| row.left)
        .map(|spans| opts.backend.cell_width(spans, Column::Left))
        .max()
        .unwrap_or(0);

    let mut line = String::new();
    for row in rows {
        line.clear();
        line.push(row.kind.symbol());
        line.push(' ');

        let mut width = 0;
        if let Some(spans) = row.left {
            opts.backend.write_cell(&mut line, spans, Column::Left)?;
            width = opts.backend.cell_width(spans, Column::Left);
        }
        line.extend(std::iter::repeat_n(' ', left_width - width));
        line.push_str(opts.separator);

        if let Some(spans) = row.right {
            opts.backend.write_cell(&mut line, spans, Column::Right)?;
        }

        w.write_str(line.trim_end())?;
        w.write_char('\n')?;
    }
    Ok(())
}

/// Render pairs as a two-column text view into a String.
pub fn render_side_by_side_to_string<B: CellBackend>(
    pairs: &[AlignedPair<'_>],
    opts: &RenderOptions<B>,
) -> String {
    let mut out = String::new();
    render_side_by_side(pairs, &mut out, opts).expect("writing to String cannot fail");
    out
}
