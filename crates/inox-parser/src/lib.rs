//! Inox: error-recovering parser for the Inox language.
//!
//! # Example
//!
//! ```
//! use inox_parser::{ParserOptions, parse_chunk};
//!
//! let source = "const A = 1\n$x = (A + 1)\nprint $x";
//!
//! let parsed = parse_chunk(source, "main.ix", ParserOptions::default()).expect("not cancelled");
//! assert!(parsed.errors.is_none());
//! eprintln!("{}", parsed.chunk.dump());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{
    ErrorAggregation, ErrorsPrinter, ParsingError, ParsingErrorKind, SourcePositionRange,
};
pub use parser::ast::{Chunk, Node, NodeKind};
pub use parser::{
    CancellationHandle, CancellationToken, ParsedChunk, ParserOptions, must_parse_chunk,
    parse_chunk,
};

/// Errors that can occur during chunk parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The cancellation handle reported cancellation. Carries the tree built
    /// before the parse stopped.
    #[error("parsing cancelled: {reason}")]
    CancelledParse { reason: String, chunk: Box<Chunk> },

    #[error("chunk parsing failed with {} errors:{}", .0.error_count(), .0.message)]
    Parsing(ErrorAggregation),
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;
