//! Caret-annotated rendering of errors against the expression source

use crate::Span;

/// Errors that point at a location in the expression source.
pub trait Diagnostic {
    /// Human readable message, without location
    fn message(&self) -> String;

    /// Offending token range
    fn span(&self) -> Span;

    fn offset(&self) -> usize {
        self.span().start
    }

    fn token_length(&self) -> usize {
        self.span().len()
    }

    /// Render the error with the offending line and a caret underline
    fn format(&self, source: &str) -> String {
        render(&self.message(), source, self.span())
    }
}

/// Render `message` against the line of `source` containing `span`:
///
/// ```text
/// <message>, at position <offset>,
/// in: <line>
///     <offset spaces>^^^<trailing spaces>
/// ```
///
/// The caret run covers the token (at least one caret, so end-of-input
/// errors stay visible).
pub fn render(message: &str, source: &str, span: Span) -> String {
    let offset = floor_char_boundary(source, span.start);
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = source[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(source.len());
    let line = &source[line_start..line_end];

    let token_end = floor_char_boundary(source, span.end.clamp(offset, line_end));
    let column = source[line_start..offset].chars().count();
    let carets = source[offset..token_end].chars().count().max(1);
    let trailing = line.chars().count().saturating_sub(column + carets);

    format!(
        "{}, at position {},\nin: {}\n    {}{}{}",
        message,
        span.start,
        line,
        " ".repeat(column),
        "^".repeat(carets),
        " ".repeat(trailing)
    )
}

fn floor_char_boundary(source: &str, index: usize) -> usize {
    let mut index = index.min(source.len());
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}
