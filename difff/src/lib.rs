#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod tracing_macros;

mod align;
mod chars;
mod escape;
mod lines;
mod render;
mod types;

pub use align::{AlignConfig, align, align_with};
pub use chars::{diff_chars, similarity_ratio};
pub use escape::{escape, write_escaped};
pub use lines::{is_blank, is_line_break, split_lines};
pub use render::{
    AnsiBackend, CellBackend, Column, DiffTheme, HtmlBackend, PlainBackend, RenderOptions, Row,
    RunStyle, render_html, render_html_to_string, render_side_by_side,
    render_side_by_side_to_string, rows,
};
pub use types::{AlignedPair, PairKind, Span, SpanKind, Summary};

/// Align two texts and render the result as HTML table rows.
///
/// This is the output a page template embeds inside its `<tbody>`.
pub fn diff_html(text_a: &str, text_b: &str) -> String {
    let pairs = align(text_a, text_b);
    render_html_to_string(&pairs, &HtmlBackend::default())
}
