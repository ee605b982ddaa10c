//! Rendering parse errors with source snippets.

use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use awk_parse::ParseError;

/// Render `err` against `source` as a labelled snippet.
///
/// `name` identifies the program in the header (a file name or
/// `<program>`). Falls back to a one-line message if rendering fails.
pub fn render_parse_error(name: &str, source: &str, err: &ParseError, color: bool) -> String {
    let range = label_range(source, err.span.to_range());
    let mut out = Vec::new();
    let written = Report::build(ReportKind::Error, name, range.start)
        .with_config(Config::default().with_color(color))
        .with_message(&err.message)
        .with_label(Label::new((name, range)).with_message(&err.message))
        .finish()
        .write((name, Source::from(source)), &mut out);
    match written {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => format!("{name}: {}\n", err.message),
    }
}

/// Convert a byte range to the character offsets the renderer expects,
/// widening an empty range to cover one character where there is one.
fn label_range(source: &str, bytes: Range<usize>) -> Range<usize> {
    let start = char_offset(source, bytes.start);
    let end = char_offset(source, bytes.end).max(start);
    if end == start && start < source.chars().count() {
        start..start + 1
    } else {
        start..end
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    let byte = byte.min(source.len());
    source
        .char_indices()
        .take_while(|&(index, _)| index < byte)
        .count()
}
