//! Parser infrastructure for the Inox language.
//!
//! # Architecture
//!
//! A hand-written recursive-descent parser working directly on the source
//! text, without a separate lexing pass: Inox literals (paths, URLs, hosts,
//! quantities, dates) are context-sensitive, so the grammar decides how to
//! scan from the leading character.
//!
//! - Byte offsets: the cursor and all spans are byte offsets, text is sliced
//!   from the source only when a node stores a raw lexeme
//! - Typed tree: every production returns an owned [`ast::Node`]
//! - Flat token stream: delimiters, keywords, newlines and comments are pushed
//!   into one vector that ends up sorted on the [`ast::Chunk`]
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree. Recovery follows these rules:
//!
//! 1. Malformed nodes are built anyway and carry a [`ParsingError`](crate::ParsingError)
//! 2. A missing sub-expression becomes a `MissingExpression` node at the cursor
//! 3. Unexpected chars in a block, list or argument list are eaten as
//!    `UnexpectedChar` tokens and the enclosing loop resumes
//! 4. On recursion limit, remaining input goes into a single `UnknownNode`
//!
//! Cancellation is the only condition that aborts a parse.

pub mod ast;
pub mod scan;
pub mod token;
pub mod walk;

mod core;
mod dump;
mod grammar;
mod invariants;
mod unparse;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub use dump::ChunkPrinter;

use crate::diagnostics::ErrorAggregation;
use crate::{Error, Result};
use ast::Chunk;
use self::core::Parser;

/// Default number of major productions between two cancellation checks.
pub const DEFAULT_NO_CHECK_FUEL: u32 = 10;

/// Default maximum nesting depth.
pub const DEFAULT_RECURSION_LIMIT: u32 = 512;

/// Stack reserved per nesting level, sized for unoptimized builds.
const STACK_PER_NESTING_LEVEL: usize = 128 * 1024;

const MIN_PARSER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Source of cancellation polled while parsing. Handles are shared with the
/// parsing thread.
pub trait CancellationHandle: Sync {
    fn is_cancelled(&self) -> bool;

    fn cancellation_reason(&self) -> String {
        "parsing was cancelled".to_owned()
    }
}

/// Thread-safe flag that can cancel a running parse from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl CancellationHandle for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Clone)]
pub struct ParserOptions<'h> {
    pub(crate) no_check_fuel: u32,
    pub(crate) cancellation: Option<&'h dyn CancellationHandle>,
    pub(crate) start_index: usize,
    pub(crate) parent_source_name: Option<String>,
    pub(crate) recursion_limit: u32,
}

impl Default for ParserOptions<'_> {
    fn default() -> Self {
        Self {
            no_check_fuel: DEFAULT_NO_CHECK_FUEL,
            cancellation: None,
            start_index: 0,
            parent_source_name: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl std::fmt::Debug for ParserOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserOptions")
            .field("no_check_fuel", &self.no_check_fuel)
            .field("cancellation", &self.cancellation.is_some())
            .field("start_index", &self.start_index)
            .field("parent_source_name", &self.parent_source_name)
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}

impl<'h> ParserOptions<'h> {
    /// Major productions between two cancellation checks. Values below 1 are
    /// treated as 1.
    pub fn with_no_check_fuel(mut self, fuel: u32) -> Self {
        self.no_check_fuel = fuel.max(1);
        self
    }

    pub fn with_cancellation(mut self, handle: &'h dyn CancellationHandle) -> Self {
        self.cancellation = Some(handle);
        self
    }

    pub fn with_start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Name reported in error positions instead of the chunk's own name.
    pub fn with_parent_source_name(mut self, name: impl Into<String>) -> Self {
        self.parent_source_name = Some(name.into());
        self
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }
}

/// Tree and node errors of a completed parse.
#[derive(Debug, Clone)]
pub struct ParsedChunk {
    pub chunk: Chunk,
    /// `Some` iff at least one node carries an error.
    pub errors: Option<ErrorAggregation>,
}

impl ParsedChunk {
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }
}

/// Main entry point. Returns `Err` only on cancellation.
///
/// The parse runs on a scoped thread whose stack grows with the recursion
/// limit, so nesting up to the limit cannot overflow the caller's stack.
pub fn parse_chunk(source: &str, name: &str, options: ParserOptions) -> Result<ParsedChunk> {
    let stack_size = (options.recursion_limit as usize)
        .saturating_mul(STACK_PER_NESTING_LEVEL)
        .max(MIN_PARSER_STACK_SIZE);

    std::thread::scope(|scope| {
        let worker = std::thread::Builder::new()
            .name("inox-parser".to_owned())
            .stack_size(stack_size)
            .spawn_scoped(scope, || parse_on_current_thread(source, name, &options));
        match worker {
            Ok(handle) => handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload)),
            Err(_) => parse_on_current_thread(source, name, &options),
        }
    })
}

fn parse_on_current_thread(
    source: &str,
    name: &str,
    options: &ParserOptions,
) -> Result<ParsedChunk> {
    let source_name = options.parent_source_name.as_deref().unwrap_or(name);
    let mut parser = Parser::new(source, options);
    parser.check_cancellation();

    let chunk = parser.parse_chunk();

    if let Some(reason) = parser.cancellation_reason() {
        return Err(Error::CancelledParse {
            reason: reason.to_owned(),
            chunk: Box::new(chunk),
        });
    }

    let errors = ErrorAggregation::collect(&chunk, source, source_name);
    Ok(ParsedChunk { chunk, errors })
}

/// Parses `source` as `<chunk>` and fails when any node carries an error.
pub fn must_parse_chunk(source: &str, options: ParserOptions) -> Result<Chunk> {
    let parsed = parse_chunk(source, "<chunk>", options)?;
    match parsed.errors {
        Some(errors) => Err(Error::Parsing(errors)),
        None => Ok(parsed.chunk),
    }
}
