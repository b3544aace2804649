use rowan::TextRange;
use serde::Serialize;

use super::serialize_text_range;

/// Line/column view of a span, 1-based, columns counted in code points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePositionRange {
    #[serde(rename = "sourceName")]
    pub source_name: String,
    #[serde(rename = "line")]
    pub start_line: u32,
    #[serde(rename = "column")]
    pub start_column: u32,
    #[serde(rename = "endLine")]
    pub end_line: u32,
    #[serde(rename = "endColumn")]
    pub end_column: u32,
    #[serde(serialize_with = "serialize_text_range")]
    pub span: TextRange,
}

impl SourcePositionRange {
    pub fn new(source: &str, source_name: impl Into<String>, span: TextRange) -> Self {
        let (start_line, start_column, end_line, end_column) = line_columns(source, span);
        Self {
            source_name: source_name.into(),
            start_line,
            start_column,
            end_line,
            end_column,
            span,
        }
    }
}

impl std::fmt::Display for SourcePositionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.source_name, self.start_line, self.start_column
        )
    }
}

/// Returns the 1-based `(line, column)` of the byte offset `pos`.
///
/// Only `\n` starts a new line. The `\r` of a `\r\n` pair and a lone `\r`
/// both count as ordinary columns.
pub fn line_column_at(source: &str, pos: usize) -> (u32, u32) {
    let (line, column, _, _) = line_columns(source, TextRange::empty((pos as u32).into()));
    (line, column)
}

fn line_columns(source: &str, span: TextRange) -> (u32, u32, u32, u32) {
    let start: usize = span.start().into();
    let end: usize = span.end().into();

    let mut line = 1;
    let mut column = 1;
    let mut start_pos = None;

    for (offset, c) in source.char_indices() {
        if offset >= start && start_pos.is_none() {
            start_pos = Some((line, column));
        }
        if offset >= end {
            break;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    let (start_line, start_column) = start_pos.unwrap_or((line, column));
    (start_line, start_column, line, column)
}
