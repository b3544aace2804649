//! Node-level parsing errors and their aggregation.
//!
//! The parser never stops on a syntax error: each malformed node carries a
//! [`ParsingError`]. After the parse, errors are collected in tree pre-order
//! into an [`ErrorAggregation`] that knows the line/column of every error and
//! can render them as annotated snippets.

pub mod message;
mod position;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;
use serde::{Serialize, Serializer};

pub use position::{SourcePositionRange, line_column_at};
pub use printer::ErrorsPrinter;

use crate::parser::ast::{Chunk, Node};
use crate::parser::walk::{Visitor, walk_node};

/// Coarse classification of node errors.
///
/// Most errors are `UnspecifiedParsingError`; the other kinds are set where
/// consumers (completion, formatting) need to tell recoverable shapes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ParsingErrorKind {
    #[default]
    UnspecifiedParsingError,
    UnterminatedMemberExpr,
    MissingBlock,
    MissingFnBody,
    MissingEqualsSignInDeclaration,
    MissingObjectPropertyValue,
    MissingObjectPatternProperty,
    ExtractionExpressionExpected,
    UnterminatedDoubleColonExpr,
    UnterminatedStructDefinition,
    /// The node is complete but is not followed by a valid terminator.
    InvalidNext,
}

/// Error attached to a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ParsingError {
    pub kind: ParsingErrorKind,
    pub message: String,
}

impl ParsingError {
    pub fn new(kind: ParsingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unspecified(message: impl Into<String>) -> Self {
        Self::new(ParsingErrorKind::UnspecifiedParsingError, message)
    }
}

/// All node errors of a chunk, in tree pre-order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ErrorAggregation {
    /// One `\n{source}:{line}:{col}: {message}` line per error.
    #[serde(rename = "completeMessage")]
    pub message: String,
    pub errors: Vec<ParsingError>,
    #[serde(rename = "errorPositions")]
    pub positions: Vec<SourcePositionRange>,
}

impl ErrorAggregation {
    /// Walks `chunk` and gathers every node error. Returns `None` when the
    /// tree is error-free.
    pub fn collect(chunk: &Chunk, source: &str, source_name: &str) -> Option<Self> {
        let mut collector = Collector {
            source,
            source_name,
            aggregation: None,
        };
        collector.visit_chunk(chunk);
        collector.aggregation
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParsingError, &SourcePositionRange)> {
        self.errors.iter().zip(self.positions.iter())
    }

    fn push(&mut self, error: ParsingError, position: SourcePositionRange) {
        self.message.push_str(&format!(
            "\n{}:{}:{}: {}",
            position.source_name, position.start_line, position.start_column, error.message
        ));
        self.errors.push(error);
        self.positions.push(position);
    }
}

struct Collector<'a> {
    source: &'a str,
    source_name: &'a str,
    aggregation: Option<ErrorAggregation>,
}

impl Visitor for Collector<'_> {
    fn visit_node(&mut self, node: &Node) {
        if let Some(err) = &node.err {
            let position = SourcePositionRange::new(self.source, self.source_name, node.span);
            self.aggregation
                .get_or_insert_with(|| ErrorAggregation {
                    message: String::new(),
                    errors: Vec::new(),
                    positions: Vec::new(),
                })
                .push(err.clone(), position);
        }
        walk_node(self, node);
    }
}

pub(crate) fn serialize_text_range<S: Serializer>(
    range: &TextRange,
    s: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;
    let mut state = s.serialize_struct("TextRange", 2)?;
    state.serialize_field("start", &u32::from(range.start()))?;
    state.serialize_field("end", &u32::from(range.end()))?;
    state.end()
}
