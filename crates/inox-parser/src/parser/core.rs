//! Parser state machine and low-level operations.

use std::cell::Cell;

use rowan::{TextRange, TextSize};

use super::ast::{Node, NodeKind};
use super::scan::{
    is_comment_first_space, is_forbidden_space, is_space_not_lf, is_unpaired_or_closing_delim,
};
use super::token::{Token, TokenKind};
use super::{CancellationHandle, ParserOptions};
use crate::diagnostics::message::{self, RECURSION_LIMIT_EXCEEDED};
use crate::diagnostics::{ParsingError, ParsingErrorKind};

const DEBUG_FUEL: u32 = 256;

/// Recursive-descent state over a UTF-8 source.
///
/// The cursor `i` is a byte offset and always sits on a char boundary. `len`
/// is the logical end of input: it is lowered while parsing a bounded region
/// (XML interpolations) and collapsed to `i` once the parse is cancelled.
pub struct Parser<'src, 'h> {
    pub(super) s: &'src str,
    pub(super) i: usize,
    pub(super) len: usize,
    pub(super) tokens: Vec<Token>,
    /// Set while parsing the right side of a `%` form: bare identifiers are
    /// pattern identifiers there.
    pub(super) in_pattern: bool,
    pub(super) depth: u32,
    pub(super) debug_fuel: Cell<u32>,
    no_check_fuel: u32,
    remaining_fuel: u32,
    cancellation: Option<&'h dyn CancellationHandle>,
    recursion_limit: u32,
    cancelled: Option<String>,
}

impl<'src, 'h> Parser<'src, 'h> {
    pub fn new(source: &'src str, options: &ParserOptions<'h>) -> Self {
        let start = floor_char_boundary(source, options.start_index);
        let no_check_fuel = options.no_check_fuel.max(1);
        Self {
            s: source,
            i: start,
            len: source.len(),
            tokens: Vec::new(),
            in_pattern: false,
            depth: 0,
            debug_fuel: Cell::new(DEBUG_FUEL),
            no_check_fuel,
            remaining_fuel: no_check_fuel,
            cancellation: options.cancellation,
            recursion_limit: options.recursion_limit,
            cancelled: None,
        }
    }

    /// Reason of the cancellation, once the handle reported one.
    pub(super) fn cancellation_reason(&self) -> Option<&str> {
        self.cancelled.as_deref()
    }

    pub(super) fn take_tokens(&mut self) -> Vec<Token> {
        let mut tokens = std::mem::take(&mut self.tokens);
        tokens.sort_by_key(|t| t.span.start());
        tokens
    }

    // ---- cursor ----

    pub(super) fn eof(&self) -> bool {
        self.i >= self.len
    }

    /// Char at the cursor, `None` at the logical end.
    pub(super) fn peek(&self) -> Option<char> {
        self.ensure_progress();
        self.char_at(self.i)
    }

    pub(super) fn char_at(&self, pos: usize) -> Option<char> {
        self.s.get(pos..self.len)?.chars().next()
    }

    /// Byte `offset` bytes after the cursor.
    pub(super) fn byte(&self, offset: usize) -> Option<u8> {
        let pos = self.i + offset;
        if pos < self.len {
            Some(self.s.as_bytes()[pos])
        } else {
            None
        }
    }

    pub(super) fn at(&self, c: u8) -> bool {
        self.byte(0) == Some(c)
    }

    pub(super) fn at_str(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Whether the cursor is at the end of input or before a delimiter that
    /// ends an expression.
    pub(super) fn at_expression_end(&self) -> bool {
        self.peek().is_none_or(is_unpaired_or_closing_delim)
    }

    /// Whether an object, record or dictionary entry may end here: end of
    /// input, `}`, `,`, a line break or a comment.
    pub(super) fn at_entry_end(&self) -> bool {
        match self.peek() {
            None | Some('\n' | ',' | '}') => true,
            Some('#') => self
                .char_at(self.i + 1)
                .is_some_and(|c| is_comment_first_space(c) || c == '\n'),
            Some(_) => false,
        }
    }

    pub(super) fn rest(&self) -> &'src str {
        self.s.get(self.i..self.len).unwrap_or("")
    }

    pub(super) fn prev_char(&self) -> Option<char> {
        self.s.get(..self.i)?.chars().next_back()
    }

    /// Advances past the current char.
    pub(super) fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.i += c.len_utf8();
            self.debug_fuel.set(DEBUG_FUEL);
        }
    }

    /// Advances `n` bytes. The caller has checked that they are ASCII.
    pub(super) fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.len);
        self.debug_fuel.set(DEBUG_FUEL);
    }

    pub(super) fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    pub(super) fn text(&self, start: usize, end: usize) -> &'src str {
        self.s.get(start..end).unwrap_or("")
    }

    pub(super) fn range(&self, start: usize, end: usize) -> TextRange {
        TextRange::new(offset(start), offset(end.max(start)))
    }

    /// Span from `start` to the cursor.
    pub(super) fn span_from(&self, start: usize) -> TextRange {
        self.range(start, self.i)
    }

    // ---- tokens ----

    pub(super) fn token(&mut self, kind: TokenKind, start: usize, end: usize) {
        let span = self.range(start, end);
        self.tokens.push(Token::new(kind, span));
    }

    pub(super) fn token_raw(&mut self, kind: TokenKind, start: usize, end: usize) {
        let span = self.range(start, end);
        let raw = self.text(start, end).to_owned();
        self.tokens.push(Token::with_raw(kind, span, raw));
    }

    /// Emits a token of `kind` for the next `len` bytes and advances past them.
    pub(super) fn eat_token(&mut self, kind: TokenKind, len: usize) {
        let start = self.i;
        self.bump_n(len);
        self.token(kind, start, self.i);
    }

    /// Emits `kind` and advances when the cursor is at `text`.
    pub(super) fn eat_token_if(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.at_str(text) {
            self.eat_token(kind, text.len());
            true
        } else {
            false
        }
    }

    pub(super) fn token_checkpoint(&self) -> usize {
        self.tokens.len()
    }

    /// Drops tokens emitted after `checkpoint`, for backtracking.
    pub(super) fn rewind(&mut self, pos: usize, checkpoint: usize) {
        self.i = pos;
        self.tokens.truncate(checkpoint);
    }

    // ---- whitespace and comments ----

    pub(super) fn eat_space(&mut self) {
        self.bump_while(is_space_not_lf);
    }

    /// `#` followed by inline space or a line break starts a comment that runs
    /// to the end of the line.
    pub(super) fn eat_comment(&mut self) -> bool {
        if !self.at(b'#') {
            return false;
        }
        match self.char_at(self.i + 1) {
            Some(c) if is_space_not_lf(c) || c == '\n' => {}
            _ => return false,
        }
        let start = self.i;
        self.bump_while(|c| c != '\n');
        self.token_raw(TokenKind::Comment, start, self.i);
        true
    }

    fn eat_separators(&mut self, newline: bool, comment: bool, comma: bool, semicolon: bool) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => self.bump(),
                '\n' if newline => self.eat_token(TokenKind::Newline, 1),
                ',' if comma => self.eat_token(TokenKind::Comma, 1),
                ';' if semicolon => self.eat_token(TokenKind::Semicolon, 1),
                '#' if comment => {
                    if !self.eat_comment() {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    pub(super) fn eat_space_newline(&mut self) {
        self.eat_separators(true, false, false, false);
    }

    pub(super) fn eat_space_comments(&mut self) {
        self.eat_separators(false, true, false, false);
    }

    pub(super) fn eat_space_newline_comment(&mut self) {
        self.eat_separators(true, true, false, false);
    }

    pub(super) fn eat_space_newline_comma(&mut self) {
        self.eat_separators(true, false, true, false);
    }

    pub(super) fn eat_space_newline_comma_comment(&mut self) {
        self.eat_separators(true, true, true, false);
    }

    pub(super) fn eat_space_newline_semicolon_comment(&mut self) {
        self.eat_separators(true, true, false, true);
    }

    pub(super) fn eat_space_comma(&mut self) {
        self.eat_separators(false, false, true, false);
    }

    // ---- errors ----

    pub(super) fn missing_expression(&self, show_right: bool) -> Node {
        Node::with_err(
            self.range(self.i, self.i),
            error(message::fmt_expr_expected_here(self.s, self.i, show_right)),
            NodeKind::MissingExpression,
        )
    }

    /// Empty `MissingExpression` without an error of its own, for required
    /// children whose absence is reported on the parent.
    pub(super) fn absent(&self) -> Node {
        Node::new(self.range(self.i, self.i), NodeKind::MissingExpression)
    }

    /// Empty `MissingExpression` at `pos`, for values missing before skipped space.
    pub(super) fn missing_at(&self, pos: usize) -> Node {
        Node::new(self.range(pos, pos), NodeKind::MissingExpression)
    }

    /// Consumes one char as an `UnexpectedChar` token and returns it.
    pub(super) fn eat_unexpected_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        let start = self.i;
        self.bump();
        self.token_raw(TokenKind::UnexpectedChar, start, self.i);
        Some(c)
    }

    /// Forbidden spaces are reported by the statement loops, everything else
    /// by the caller.
    pub(super) fn at_forbidden_space(&self) -> bool {
        self.peek().is_some_and(is_forbidden_space)
    }

    // ---- fuel ----

    /// Called once per major production. Every `no_check_fuel` calls the
    /// cancellation handle is polled; on cancellation the logical end of input
    /// collapses to the cursor so every production unwinds quickly.
    pub(super) fn consume_fuel(&mut self) {
        if self.cancelled.is_some() {
            return;
        }
        self.remaining_fuel = self.remaining_fuel.saturating_sub(1);
        if self.remaining_fuel > 0 {
            return;
        }
        self.remaining_fuel = self.no_check_fuel;
        self.check_cancellation();
    }

    pub(super) fn check_cancellation(&mut self) {
        let Some(handle) = self.cancellation else {
            return;
        };
        if handle.is_cancelled() {
            self.cancelled = Some(handle.cancellation_reason());
            self.len = self.i;
        }
    }

    pub(super) fn is_cancelled(&self) -> bool {
        self.cancelled.is_some()
    }

    /// Returns `false` when the nesting limit is reached; the caller then
    /// returns [`Parser::recursion_limit_node`].
    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.depth >= self.recursion_limit {
            return false;
        }
        self.depth += 1;
        self.debug_fuel.set(DEBUG_FUEL);
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.debug_fuel.set(DEBUG_FUEL);
    }

    /// Swallows the rest of the input into one error node.
    pub(super) fn recursion_limit_node(&mut self) -> Node {
        let start = self.i;
        self.i = self.len;
        Node::with_err(
            self.span_from(start),
            error(RECURSION_LIMIT_EXCEEDED),
            NodeKind::UnknownNode,
        )
    }

    /// Runs a nesting production one level deeper.
    pub(super) fn nested(&mut self, f: impl FnOnce(&mut Self) -> Node) -> Node {
        if !self.enter_recursion() {
            return self.recursion_limit_node();
        }
        let node = f(self);
        self.exit_recursion();
        node
    }

    /// Runs `f` with the logical end of input lowered to `end`.
    pub(super) fn with_end<T>(&mut self, end: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.len;
        self.len = end.min(saved);
        let result = f(self);
        if self.is_cancelled() {
            self.len = self.i;
        } else {
            self.len = saved;
        }
        result
    }
}

pub(super) fn offset(pos: usize) -> TextSize {
    TextSize::from(u32::try_from(pos).unwrap_or(u32::MAX))
}

pub(super) fn error(message: impl Into<String>) -> Option<ParsingError> {
    Some(ParsingError::unspecified(message))
}

pub(super) fn error_of(kind: ParsingErrorKind, message: impl Into<String>) -> Option<ParsingError> {
    Some(ParsingError::new(kind, message))
}

fn floor_char_boundary(s: &str, mut pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
