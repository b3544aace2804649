//! Statements, blocks and embedded modules.
//!
//! A statement starts as an expression: keyword identifiers are returned
//! bare by the expression parser and dispatched here by name, other heads
//! may turn into assignments, command-like calls or pipelines depending on
//! what follows them.

use rowan::TextRange;

use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::diagnostics::{ParsingError, ParsingErrorKind};
use crate::parser::Parser;
use crate::parser::ast::{AssignmentOperator, Node, NodeKind};
use crate::parser::core::{error, error_of};
use crate::parser::scan::{
    is_alpha, is_comment_first_space, is_keyword, is_unpaired_or_closing_delim,
};
use crate::parser::token::TokenKind;

use super::reject_keyword_name;

impl Parser<'_, '_> {
    /// `{ statements }`, the cursor is at `{`.
    pub(crate) fn parse_block(&mut self) -> Node {
        self.assert_at(b'{');
        if !self.enter_recursion() {
            return self.recursion_limit_node();
        }
        let start = self.i;
        self.eat_token(TokenKind::OpeningCurlyBracket, 1);

        let statements = self.parse_statement_sequence(true);

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else {
            error(message::UNTERMINATED_BLOCK_MISSING_BRACE)
        };
        self.exit_recursion();

        Node::with_err(self.span_from(start), err, NodeKind::Block { statements })
    }

    /// `{ [manifest {...}] statements }` of `go`, `testsuite`, `testcase` and
    /// `lifetimejob`, the cursor is at `{`.
    pub(crate) fn parse_embedded_module(&mut self) -> Node {
        self.assert_at(b'{');
        if !self.enter_recursion() {
            return self.recursion_limit_node();
        }
        let start = self.i;
        self.eat_token(TokenKind::OpeningCurlyBracket, 1);

        self.eat_space_newline_comma_comment();
        let manifest = self.parse_manifest_if_present();
        let statements = self.parse_statement_sequence(true);

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else {
            error(message::UNTERMINATED_EMBEDDED_MODULE)
        };
        self.exit_recursion();

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::EmbeddedModule {
                manifest: manifest.map(Node::boxed),
                statements,
                single_call_expr: false,
            },
        )
    }

    /// `manifest {...}`; any value other than an object literal is an error.
    pub(crate) fn parse_manifest_if_present(&mut self) -> Option<Node> {
        if !self.at_word("manifest") {
            return None;
        }
        let start = self.i;
        self.eat_token(TokenKind::ManifestKeyword, "manifest".len());
        self.eat_space();

        let object = self.parse_expression();
        let err = match object.kind {
            NodeKind::ObjectLiteral { .. } | NodeKind::MissingExpression => None,
            _ => error(message::INVALID_MANIFEST_DESC_VALUE),
        };
        Some(Node::with_err(
            self.range(start, usize::from(object.span.end())),
            err,
            NodeKind::Manifest {
                object: object.boxed(),
            },
        ))
    }

    /// Statements separated by newlines or `;`, up to the end of input or,
    /// when `in_braces` is set, up to a `}` left for the caller.
    pub(super) fn parse_statement_sequence(&mut self, in_braces: bool) -> Vec<Node> {
        let mut statements = Vec::new();
        let mut prev_end = None;
        let mut prev_invalid_next = false;

        loop {
            self.eat_space_newline_semicolon_comment();
            match self.peek() {
                None => break,
                Some('}') if in_braces => break,
                Some(_) => {}
            }

            if self.at_forbidden_space() {
                statements.push(self.unexpected_char_node(UnexpectedCharContext::BlockOrModule));
                continue;
            }

            let missing_separator = prev_end == Some(self.i)
                && !prev_invalid_next
                && !self.prev_char().is_some_and(char::is_whitespace);

            let mut stmt = self.parse_statement();
            if stmt.is_missing_expression() {
                statements.push(stmt);
                break;
            }

            prev_end = Some(self.i);
            prev_invalid_next = stmt
                .err
                .as_ref()
                .is_some_and(|e| e.kind == ParsingErrorKind::InvalidNext);

            if missing_separator && stmt.err.is_none() {
                stmt.err = error(message::STMTS_SHOULD_BE_SEPARATED_BY);
            }
            statements.push(stmt);
        }

        statements
    }

    pub(crate) fn parse_statement(&mut self) -> Node {
        self.consume_fuel();
        let start = self.i;
        let mut expr = self.parse_expression();

        let parenthesized = expr.is_parenthesized;
        let mut keyword = None;
        match &mut expr.kind {
            NodeKind::MissingExpression => {
                if self.eof() {
                    return expr;
                }
                return self.unexpected_char_node(UnexpectedCharContext::BlockOrModule);
            }
            NodeKind::IdentifierLiteral { name } if !parenthesized && is_keyword(name) => {
                keyword = Some(name.clone());
            }
            NodeKind::IdentifierLiteral { name }
                if !parenthesized && name == "struct" && self.at(b' ') =>
            {
                return self.parse_struct_definition(start);
            }
            NodeKind::IdentifierLiteral { .. } | NodeKind::IdentifierMemberExpression { .. }
                if !parenthesized =>
            {
                let saved = self.i;
                self.eat_space();
                if self.at(b';') {
                    return Node::new(
                        expr.span,
                        NodeKind::CallExpression {
                            callee: expr.boxed(),
                            arguments: Vec::new(),
                            must: true,
                            command_like_syntax: true,
                        },
                    );
                }
                self.i = saved;
            }
            NodeKind::TestSuiteExpression { is_statement, .. }
            | NodeKind::TestCaseExpression { is_statement, .. }
                if !parenthesized =>
            {
                *is_statement = true;
            }
            _ => {}
        }

        if let Some(name) = keyword {
            if self.at_assignment_operator_after_space() {
                return self.parse_assignment(expr);
            }
            if let Some(stmt) = self.parse_keyword_statement(&name, expr.span) {
                return stmt;
            }
        }

        if matches!(expr.kind, NodeKind::CallExpression { .. }) {
            return expr;
        }

        let followed_by_space = self.at(b' ');
        self.eat_space();

        let Some(c) = self.peek() else {
            return expr;
        };

        match c {
            '=' => self.parse_assignment(expr),
            ';' => expr,
            '+' | '-' | '*' | '/' if self.byte(1) == Some(b'=') => self.parse_assignment(expr),
            '+' | '-' | '*' | '/' if followed_by_space && !expr.is_parenthesized => {
                self.parse_command_like_statement(start, expr)
            }
            _ => {
                let is_callee = expr.is_ident_or_ident_member() && !expr.is_parenthesized;
                let stops = is_unpaired_or_closing_delim(c) && !matches!(c, '|' | ':');
                if is_callee && followed_by_space && !stops {
                    return self.parse_command_like_statement(start, expr);
                }
                expr
            }
        }
    }

    /// Statement forms introduced by a keyword. `None` for keywords that do
    /// not start a statement.
    fn parse_keyword_statement(&mut self, name: &str, span: TextRange) -> Option<Node> {
        let start = usize::from(span.start());
        let end = usize::from(span.end());
        let kind = TokenKind::keyword(name)?;

        let stmt = match name {
            "assert" => {
                self.token(kind, start, end);
                self.eat_space();
                let expr = self.parse_expression();
                Node::new(
                    self.range(start, usize::from(expr.span.end())),
                    NodeKind::AssertionStatement { expr: expr.boxed() },
                )
            }
            "if" => self.parse_if_statement(start, end),
            "for" => {
                self.token(kind, start, end);
                self.parse_for_statement(start)
            }
            "walk" => {
                self.token(kind, start, end);
                self.parse_walk_statement(start)
            }
            "switch" | "match" => {
                self.token(kind, start, end);
                self.parse_switch_match_statement(start, name == "match")
            }
            "drop-perms" => {
                self.token(kind, start, end);
                self.parse_permission_dropping_statement(start)
            }
            "import" => {
                self.token(kind, start, end);
                self.parse_import_statement(start)
            }
            "return" | "yield" => {
                self.token(kind, start, end);
                let expr = self.parse_value_until_statement_end();
                let expr_end = expr.as_ref().map_or(end, |e| usize::from(e.span.end()));
                let span = self.range(start, expr_end);
                let expr = expr.map(Node::boxed);
                let kind = if name == "return" {
                    NodeKind::ReturnStatement { expr }
                } else {
                    NodeKind::YieldStatement { expr }
                };
                Node::new(span, kind)
            }
            "break" | "continue" => {
                self.token(kind, start, end);
                let label = self.parse_label();
                let label_end = label.as_ref().map_or(end, |l| usize::from(l.span.end()));
                let span = self.range(start, label_end);
                let label = label.map(Node::boxed);
                let kind = if name == "break" {
                    NodeKind::BreakStatement { label }
                } else {
                    NodeKind::ContinueStatement { label }
                };
                Node::new(span, kind)
            }
            "assign" => {
                self.token(kind, start, end);
                self.parse_multi_assignment(start)
            }
            "var" => {
                self.token(kind, start, end);
                self.parse_local_variable_declarations(start)
            }
            "synchronized" => {
                self.token(kind, start, end);
                self.parse_synchronized_block(start)
            }
            "prune" => {
                self.token(kind, start, end);
                Node::new(span, NodeKind::PruneStatement)
            }
            "extend" => {
                self.token(kind, start, end);
                self.parse_extend_statement(start)
            }
            _ => return None,
        };
        Some(stmt)
    }

    /// `if test {...} [else {...} | else if ...]`. `start..keyword_end` is the
    /// `if` keyword, the cursor is after it.
    fn parse_if_statement(&mut self, start: usize, keyword_end: usize) -> Node {
        self.nested(|p| p.parse_if_statement_inner(start, keyword_end))
    }

    fn parse_if_statement_inner(&mut self, start: usize, keyword_end: usize) -> Node {
        self.token(TokenKind::IfKeyword, start, keyword_end);
        self.eat_space();
        let test = self.parse_expression();
        self.eat_space();

        let statement = |p: &Self,
                         err,
                         test: Node,
                         consequent: Option<Node>,
                         alternate: Option<Node>| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::IfStatement {
                    test: test.boxed(),
                    consequent: consequent.map(Node::boxed),
                    alternate: alternate.map(Node::boxed),
                },
            )
        };

        match self.peek() {
            None => {
                let err = error_of(
                    ParsingErrorKind::MissingBlock,
                    message::UNTERMINATED_IF_STMT_MISSING_BLOCK,
                );
                return statement(self, err, test, None, None);
            }
            Some('{') => {}
            Some(c) => {
                let err = error_of(
                    ParsingErrorKind::MissingBlock,
                    message::fmt_unterminated_if_stmt_should_be_followed_by_block(c),
                );
                return statement(self, err, test, None, None);
            }
        }

        let consequent = self.parse_block();
        let after_block = self.i;
        self.eat_space();
        if !self.at_word("else") {
            self.i = after_block;
            return statement(self, None, test, Some(consequent), None);
        }

        self.eat_token(TokenKind::ElseKeyword, "else".len());
        self.eat_space();

        let (alternate, err) = match self.peek() {
            None => (
                None,
                error_of(
                    ParsingErrorKind::MissingBlock,
                    message::UNTERMINATED_IF_STMT_MISSING_BLOCK_AFTER_ELSE,
                ),
            ),
            Some('{') => (Some(self.parse_block()), None),
            Some('i') if self.at_word("if") => {
                let if_start = self.i;
                self.bump_n(2);
                (Some(self.parse_if_statement(if_start, self.i)), None)
            }
            Some(c) => (
                None,
                error_of(
                    ParsingErrorKind::MissingBlock,
                    message::fmt_unterminated_if_stmt_else_should_be_followed_by_block(c),
                ),
            ),
        };
        statement(self, err, test, Some(consequent), alternate)
    }

    /// `for [%p] [key,] [%p] value in iterated {...}`, `for chunked ...` or
    /// `for iterated {...}`. The `for` keyword is consumed.
    fn parse_for_statement(&mut self, start: usize) -> Node {
        self.eat_space();

        let mut stmt = ForParts::default();
        let mut first_pattern = None;
        let first;

        if self.at(b'%') {
            let pattern = self.parse_percent_prefixed_pattern(false);
            self.eat_space();
            if self.at(b'{') {
                stmt.iterated_value = Some(pattern);
                return self.finish_variable_less_for(start, stmt);
            }
            first_pattern = Some(pattern);
            first = self.parse_expression();
        } else {
            let mut expr = self.parse_expression();
            if expr.ident_name() == Some("chunked") && !expr.is_parenthesized {
                self.token(
                    TokenKind::ChunkedKeyword,
                    usize::from(expr.span.start()),
                    usize::from(expr.span.end()),
                );
                stmt.chunked = true;
                self.eat_space();
                expr = self.parse_expression();
            }
            first = expr;
        }

        if !matches!(first.kind, NodeKind::IdentifierLiteral { .. }) {
            self.eat_space();
            stmt.iterated_value = Some(first);
            return self.finish_variable_less_for(start, stmt);
        }
        let mut first = first;
        reject_keyword_name(&mut first);

        self.eat_space();
        if self.eof() {
            stmt.key_pattern = first_pattern;
            stmt.key_index_ident = Some(first);
            return stmt.into_node(self.span_from(start), error(message::INVALID_FOR_STMT));
        }

        let mut err = None;
        if self.at_str("in") {
            stmt.value_pattern = first_pattern;
            stmt.value_elem_ident = Some(first);
        } else {
            stmt.key_pattern = first_pattern;
            stmt.key_index_ident = Some(first);

            match self.peek() {
                Some(',') => self.eat_token(TokenKind::Comma, 1),
                Some(c) => {
                    err = error(message::fmt_for_stmt_key_index_should_be_followed_by_comma_not(c));
                }
                None => {}
            }
            self.eat_space();

            if self.eof() {
                return stmt.into_node(self.span_from(start), error(message::UNTERMINATED_FOR_STMT));
            }

            if self.at(b'%') {
                stmt.value_pattern = Some(self.parse_percent_prefixed_pattern(false));
                self.eat_space();
            }

            let mut value = self.parse_expression();
            reject_keyword_name(&mut value);
            if matches!(value.kind, NodeKind::IdentifierLiteral { .. }) {
                stmt.value_elem_ident = Some(value);
            } else if err.is_none() {
                err = error(message::INVALID_FOR_STMT);
            }
            self.eat_space();

            if self.eof() {
                return stmt.into_node(self.span_from(start), error(message::UNTERMINATED_FOR_STMT));
            }
            if !self.at_str("in") {
                return stmt.into_node(
                    self.span_from(start),
                    error(message::INVALID_FOR_STMT_MISSING_IN_KEYWORD),
                );
            }
        }

        self.eat_token(TokenKind::InKeyword, 2);
        if !self.eof() && !self.at(b' ') {
            return stmt.into_node(
                self.span_from(start),
                error(message::INVALID_FOR_STMT_IN_KEYWORD_SHOULD_BE_FOLLOWED_BY_SPACE),
            );
        }
        self.eat_space();

        if self.eof() {
            return stmt.into_node(
                self.span_from(start),
                error(message::INVALID_FOR_STMT_MISSING_VALUE_AFTER_IN),
            );
        }

        stmt.iterated_value = Some(self.parse_expression());
        self.eat_space();

        if self.at(b'{') {
            stmt.body = Some(self.parse_block());
        } else if err.is_none() {
            err = error_of(
                ParsingErrorKind::MissingBlock,
                message::UNTERMINATED_FOR_STMT_MISSING_BLOCK,
            );
        }
        stmt.into_node(self.span_from(start), err)
    }

    fn finish_variable_less_for(&mut self, start: usize, mut stmt: ForParts) -> Node {
        let err = if self.at(b'{') {
            stmt.body = Some(self.parse_block());
            None
        } else {
            error_of(ParsingErrorKind::MissingBlock, message::UNTERMINATED_FOR_STMT_MISSING_BLOCK)
        };
        stmt.into_node(self.span_from(start), err)
    }

    /// `walk walked [meta,] entry {...}`, the keyword is consumed.
    fn parse_walk_statement(&mut self, start: usize) -> Node {
        self.eat_space();
        let walked = self.parse_expression();

        let statement = |p: &Self,
                         err,
                         walked: Node,
                         meta: Option<Node>,
                         entry: Option<Node>,
                         body: Option<Node>| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::WalkStatement {
                    walked: walked.boxed(),
                    meta_ident: meta.map(Node::boxed),
                    entry_ident: entry.map(Node::boxed),
                    body: body.map(Node::boxed),
                },
            )
        };

        if walked.is_missing_expression() {
            let err = error(message::UNTERMINATED_WALK_STMT_MISSING_WALKED_VALUE);
            return statement(self, err, walked, None, None, None);
        }

        self.eat_space();
        let ident = self.parse_expression();
        if !matches!(ident.kind, NodeKind::IdentifierLiteral { .. }) {
            let err = error(message::UNTERMINATED_WALK_STMT_MISSING_ENTRY_VARIABLE_NAME);
            return statement(self, err, walked, None, None, None);
        }
        self.eat_space();

        let mut meta = None;
        let mut entry = Some(ident);
        let mut err = None;

        if self.at(b',') {
            self.eat_token(TokenKind::Comma, 1);
            meta = entry.take();
            self.eat_space();

            if self.eof() || self.at(b'{') {
                err = error(message::INVALID_WALK_STMT_MISSING_ENTRY_IDENTIFIER);
            } else {
                let ident = self.parse_expression();
                if !matches!(ident.kind, NodeKind::IdentifierLiteral { .. }) {
                    let err = error(message::UNTERMINATED_WALK_STMT_MISSING_ENTRY_VARIABLE_NAME);
                    return statement(self, err, walked, meta, None, None);
                }
                entry = Some(ident);
                self.eat_space();
            }
        }

        let body = if self.at(b'{') {
            Some(self.parse_block())
        } else {
            if err.is_none() {
                err = error_of(
                    ParsingErrorKind::MissingBlock,
                    message::UNTERMINATED_WALK_STMT_MISSING_BLOCK,
                );
            }
            None
        };
        statement(self, err, walked, meta, entry, body)
    }

    /// `switch value { cases }` or `match value { cases }`, the keyword is
    /// consumed.
    fn parse_switch_match_statement(&mut self, start: usize, is_match: bool) -> Node {
        self.eat_space();

        let statement = |p: &Self, err, discriminant: Node, cases, default_cases| {
            let kind = if is_match {
                NodeKind::MatchStatement {
                    discriminant: discriminant.boxed(),
                    cases,
                    default_cases,
                }
            } else {
                NodeKind::SwitchStatement {
                    discriminant: discriminant.boxed(),
                    cases,
                    default_cases,
                }
            };
            Node::with_err(p.span_from(start), err, kind)
        };

        if self.eof() {
            let msg = if is_match {
                message::UNTERMINATED_MATCH_STMT_MISSING_VALUE
            } else {
                message::UNTERMINATED_SWITCH_STMT_MISSING_VALUE
            };
            let discriminant = self.absent();
            return statement(self, error(msg), discriminant, Vec::new(), Vec::new());
        }

        let discriminant = self.parse_expression();
        self.eat_space();

        if !self.at(b'{') {
            let msg = if is_match {
                message::UNTERMINATED_MATCH_STMT_MISSING_BODY
            } else {
                message::UNTERMINATED_SWITCH_STMT_MISSING_BODY
            };
            return statement(self, error(msg), discriminant, Vec::new(), Vec::new());
        }
        self.eat_token(TokenKind::OpeningCurlyBracket, 1);

        let mut cases = Vec::new();
        let mut default_cases: Vec<Node> = Vec::new();

        loop {
            self.eat_space_newline_semicolon_comment();
            if self.eof() || self.at(b'}') {
                break;
            }

            if self.at_word("defaultcase") {
                let mut case = self.parse_default_case();
                if !default_cases.is_empty() && case.err.is_none() {
                    case.err = error(message::DEFAULT_CASE_MUST_BE_UNIQUE);
                }
                default_cases.push(case);
                continue;
            }

            cases.push(self.parse_case(is_match));
        }

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else if is_match {
            error(message::UNTERMINATED_MATCH_STMT_MISSING_CLOSING_BRACE)
        } else {
            error(message::UNTERMINATED_SWITCH_STMT_MISSING_CLOSING_BRACE)
        };
        statement(self, err, discriminant, cases, default_cases)
    }

    fn parse_default_case(&mut self) -> Node {
        let start = self.i;
        self.eat_token(TokenKind::DefaultcaseKeyword, "defaultcase".len());
        self.eat_space();

        let (block, err) = if self.at(b'{') {
            (Some(self.parse_block()), None)
        } else {
            (
                None,
                error_of(
                    ParsingErrorKind::MissingBlock,
                    message::UNTERMINATED_DEFAULT_CASE_MISSING_BLOCK,
                ),
            )
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::DefaultCase {
                block: block.map(Node::boxed),
            },
        )
    }

    /// `v1, v2 [group] {...}`. Switch case values must be simple literals,
    /// match case values must be known without evaluation.
    fn parse_case(&mut self, is_match: bool) -> Node {
        let start = self.i;
        let mut values = Vec::new();
        let mut group_matching_variable = None;
        let mut err = None;

        let case = |p: &Self, err, values, group: Option<Node>, block: Option<Node>| {
            let kind = if is_match {
                NodeKind::MatchCase {
                    values,
                    group_matching_variable: group.map(Node::boxed),
                    block: block.map(Node::boxed),
                }
            } else {
                NodeKind::SwitchCase {
                    values,
                    block: block.map(Node::boxed),
                }
            };
            Node::with_err(p.span_from(start), err, kind)
        };

        if self.at(b'{') {
            values.push(Node::with_err(
                self.range(self.i, self.i),
                error(message::fmt_case_value_expected_here(self.s, self.i, true)),
                NodeKind::MissingExpression,
            ));
        }

        while !self.eof() && !self.at(b'{') {
            let value = self.parse_expression();

            if value.is_missing_expression() && !self.eof() && !self.at(b'}') {
                values.push(
                    self.unexpected_char_node(UnexpectedCharContext::SwitchOrMatchStatement),
                );
                return case(self, err, values, None, None);
            }

            if err.is_none() {
                let valid = if is_match {
                    has_statically_known_value(&value)
                } else {
                    value.is_simple_value_literal()
                };
                if !valid && !value.is_missing_expression() {
                    err = error(if is_match {
                        message::INVALID_MATCH_CASE_VALUE_EXPLANATION
                    } else {
                        message::INVALID_SWITCH_CASE_VALUE_EXPLANATION
                    });
                }
            }
            values.push(value);
            self.eat_space();

            match self.peek() {
                None | Some('{' | '}') => break,
                Some(',') => {
                    self.eat_token(TokenKind::Comma, 1);
                    self.eat_space();
                }
                Some(c) if is_match && is_alpha(c) => {
                    group_matching_variable = Some(self.parse_expression());
                    self.eat_space();
                    break;
                }
                Some(_) => {
                    values.push(
                        self.unexpected_char_node(UnexpectedCharContext::SwitchOrMatchStatement),
                    );
                    return case(self, err, values, group_matching_variable, None);
                }
            }
        }

        let block = if self.at(b'{') {
            Some(self.parse_block())
        } else {
            if err.is_none() {
                let msg = if is_match {
                    message::UNTERMINATED_MATCH_CASE_MISSING_BLOCK
                } else {
                    message::UNTERMINATED_SWITCH_CASE_MISSING_BLOCK
                };
                err = error_of(ParsingErrorKind::MissingBlock, msg);
            }
            None
        };
        case(self, err, values, group_matching_variable, block)
    }

    /// `drop-perms {permissions}`, the keyword is consumed.
    fn parse_permission_dropping_statement(&mut self, start: usize) -> Node {
        self.eat_space();
        let object = self.parse_expression();
        let err = match object.kind {
            NodeKind::ObjectLiteral { .. } => None,
            _ => error(message::DROP_PERM_KEYWORD_SHOULD_BE_FOLLOWED_BY),
        };
        Node::with_err(
            self.range(start, usize::from(object.span.end())),
            err,
            NodeKind::PermissionDroppingStatement {
                object: object.boxed(),
            },
        )
    }

    /// `import name source {config}` or the inclusion import `import ./file.ix`,
    /// the keyword is consumed.
    fn parse_import_statement(&mut self, start: usize) -> Node {
        self.eat_space();
        let head = self.parse_expression();

        match head.kind {
            NodeKind::AbsolutePathLiteral { .. } | NodeKind::RelativePathLiteral { .. } => {
                let err = import_source_error(&head).and_then(error);
                return Node::with_err(
                    self.span_from(start),
                    err,
                    NodeKind::InclusionImportStatement {
                        source: head.boxed(),
                    },
                );
            }
            NodeKind::AbsolutePathExpression { .. } | NodeKind::RelativePathExpression { .. } => {
                return Node::with_err(
                    self.span_from(start),
                    error(message::INCLUSION_IMPORT_STMT_SRC_SHOULD_BE_A_PATH_LIT),
                    NodeKind::InclusionImportStatement {
                        source: head.boxed(),
                    },
                );
            }
            NodeKind::IdentifierLiteral { .. } => {}
            _ => {
                return Node::with_err(
                    self.span_from(start),
                    error(message::IMPORT_STMT_IMPORT_KEYWORD_SHOULD_BE_FOLLOWED_BY_IDENT),
                    NodeKind::ImportStatement {
                        identifier: None,
                        source: Some(head.boxed()),
                        configuration: None,
                    },
                );
            }
        }

        self.eat_space();
        let source = self.parse_expression();
        if !matches!(
            source.kind,
            NodeKind::URLLiteral { .. }
                | NodeKind::AbsolutePathLiteral { .. }
                | NodeKind::RelativePathLiteral { .. }
        ) {
            return Node::with_err(
                self.span_from(start),
                error(message::IMPORT_STMT_SRC_SHOULD_BE_AN_URL_OR_PATH_LIT),
                NodeKind::ImportStatement {
                    identifier: Some(head.boxed()),
                    source: Some(source.boxed()),
                    configuration: None,
                },
            );
        }
        let err = import_source_error(&source).and_then(error);

        self.eat_space();
        let mut configuration = self.parse_expression();
        if !matches!(configuration.kind, NodeKind::ObjectLiteral { .. })
            && configuration.err.is_none()
        {
            configuration.err = error(message::IMPORT_STMT_CONFIG_SHOULD_BE_AN_OBJ_LIT);
        }

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::ImportStatement {
                identifier: Some(head.boxed()),
                source: Some(source.boxed()),
                configuration: Some(configuration.boxed()),
            },
        )
    }

    /// `synchronized v1 v2 {...}`, the keyword is consumed.
    fn parse_synchronized_block(&mut self, start: usize) -> Node {
        self.eat_space();

        let mut synchronized_values = Vec::new();
        while let Some(c) = self.peek() {
            if c == '{' || c == '\n' {
                break;
            }
            let value = self.parse_expression();
            if value.is_missing_expression() {
                synchronized_values.push(
                    self.unexpected_char_node(UnexpectedCharContext::SynchronizedValueList),
                );
            } else {
                synchronized_values.push(value);
            }
            self.eat_space();
        }

        let mut err = None;
        if synchronized_values.is_empty() {
            err = error(message::SYNCHRONIZED_KEYWORD_SHOULD_BE_FOLLOWED_BY_SYNC_VALUES);
        }

        let block = if self.at(b'{') {
            Some(self.parse_block())
        } else {
            if err.is_none() {
                err = error_of(
                    ParsingErrorKind::MissingBlock,
                    message::UNTERMINATED_SYNCHRONIZED_MISSING_BLOCK,
                );
            }
            None
        };

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::SynchronizedBlockStatement {
                synchronized_values,
                block: block.map(Node::boxed),
            },
        )
    }

    /// `extend %pattern {...}`, the keyword is consumed.
    fn parse_extend_statement(&mut self, start: usize) -> Node {
        let keyword_end = self.i;
        self.eat_space();

        let statement = |p: &Self, err, extended_pattern: Option<Node>, extension: Option<Node>| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::ExtendStatement {
                    extended_pattern: extended_pattern.map(Node::boxed),
                    extension: extension.map(Node::boxed),
                },
            )
        };

        if self.at_expression_end() {
            self.i = keyword_end;
            let err =
                error(message::UNTERMINATED_EXTEND_STMT_MISSING_PATTERN_TO_EXTEND_AFTER_KEYWORD);
            return statement(self, err, None, None);
        }

        let mut pattern = self.parse_expression_in_pattern(true);
        if pattern.err.is_none()
            && !matches!(pattern.kind, NodeKind::PatternIdentifierLiteral { .. })
        {
            pattern.err = error(message::A_PATTERN_NAME_WAS_EXPECTED);
        }
        let pattern_end = self.i;
        self.eat_space();

        if self.at_expression_end() {
            self.i = pattern_end;
            let err = error(
                message::UNTERMINATED_EXTEND_STMT_MISSING_OBJECT_LITERAL_AFTER_EXTENDED_PATTERN,
            );
            return statement(self, err, Some(pattern), None);
        }

        let mut extension = self.parse_expression();
        if extension.err.is_none() && !matches!(extension.kind, NodeKind::ObjectLiteral { .. }) {
            extension.err = error(message::INVALID_EXTENSION_VALUE_AN_OBJECT_LITERAL_WAS_EXPECTED);
        }
        statement(self, None, Some(pattern), Some(extension))
    }

    /// `assign a b = value` or `assign? a b = value`, the keyword is consumed.
    fn parse_multi_assignment(&mut self, start: usize) -> Node {
        let nillable = self.eat_token_if(TokenKind::QuestionMark, "?");
        let mut variables = Vec::new();

        let statement = |p: &Self, err, variables, right: Node| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::MultiAssignment {
                    variables,
                    right: right.boxed(),
                    nillable,
                },
            )
        };

        loop {
            self.eat_space();
            if self.eof() || self.at(b'=') {
                break;
            }
            let mut variable = self.parse_expression();
            reject_keyword_name(&mut variable);
            if !matches!(variable.kind, NodeKind::IdentifierLiteral { .. }) {
                variables.push(variable);
                let right = self.absent();
                let err = error(message::ASSIGN_KEYWORD_SHOULD_BE_FOLLOWED_BY_IDENTS);
                return statement(self, err, variables, right);
            }
            variables.push(variable);
        }

        if !self.at(b'=') {
            let right = self.absent();
            let err = error(message::UNTERMINATED_MULTI_ASSIGN_MISSING_EQL_SIGN);
            return statement(self, err, variables, right);
        }

        self.eat_token(TokenKind::Equal, 1);
        self.eat_space();
        let right = self.parse_expression();

        let mut node = statement(self, None, variables, right);
        self.check_assignment_terminator(&mut node.err);
        node
    }

    /// Whether an assignment operator follows, possibly after inline space.
    fn at_assignment_operator_after_space(&self) -> bool {
        let rest = self.rest().trim_start_matches([' ', '\t', '\r']);
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some('='), next) => next != Some('='),
            (Some('+' | '-' | '*' | '/'), Some('=')) => true,
            _ => false,
        }
    }

    /// `left <op> right`; also pattern and pattern namespace definitions.
    /// The cursor is at the operator, possibly after inline space.
    fn parse_assignment(&mut self, left: Node) -> Node {
        let start = usize::from(left.span.start());
        self.eat_space();

        let (operator, token, len) = match self.peek() {
            Some('+') => (AssignmentOperator::PlusAssign, TokenKind::PlusEqual, 2),
            Some('-') => (AssignmentOperator::MinusAssign, TokenKind::MinusEqual, 2),
            Some('*') => (AssignmentOperator::MulAssign, TokenKind::MulEqual, 2),
            Some('/') => (AssignmentOperator::DivAssign, TokenKind::DivEqual, 2),
            _ => (AssignmentOperator::Assign, TokenKind::Equal, 1),
        };
        self.eat_token(token, len);

        let mut node = match left.kind {
            NodeKind::PatternIdentifierLiteral { .. } => {
                self.parse_pattern_definition(left, operator)
            }
            NodeKind::PatternNamespaceIdentifierLiteral { .. } => {
                self.parse_pattern_namespace_definition(left, operator)
            }
            _ => {
                self.eat_space();
                self.parse_assignment_value(start, left, operator)
            }
        };
        self.check_assignment_terminator(&mut node.err);
        node
    }

    fn parse_assignment_value(
        &mut self,
        start: usize,
        left: Node,
        operator: AssignmentOperator,
    ) -> Node {
        let assignment = |p: &Self, err, left: Node, right: Node| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::Assignment {
                    left: left.boxed(),
                    right: right.boxed(),
                    operator,
                },
            )
        };

        let mut err = None;
        match &left.kind {
            NodeKind::IdentifierLiteral { name } if is_keyword(name) => {
                err = error(message::KEYWORDS_SHOULD_NOT_BE_USED_IN_ASSIGNMENT_LHS);
            }
            NodeKind::Variable { .. }
            | NodeKind::GlobalVariable { .. }
            | NodeKind::IdentifierLiteral { .. }
            | NodeKind::MemberExpression { .. }
            | NodeKind::IndexExpression { .. }
            | NodeKind::SliceExpression { .. }
            | NodeKind::IdentifierMemberExpression { .. } => {}
            other => {
                let err = error(message::fmt_invalid_assignment_invalid_lhs(other.name()));
                let right = self.absent();
                return assignment(self, err, left, right);
            }
        }

        if self.eof() {
            let right = self.absent();
            return assignment(
                self,
                error(message::UNTERMINATED_ASSIGNMENT_MISSING_VALUE_AFTER_EQL_SIGN),
                left,
                right,
            );
        }

        if self.at(b'|') {
            self.eat_token(TokenKind::Pipe, 1);
            self.eat_space();
            let mut right = self.parse_statement();
            let stages = match &mut right.kind {
                NodeKind::PipelineStatement { stages } => Some(std::mem::take(stages)),
                _ => None,
            };
            let Some(stages) = stages else {
                let err = error(message::INVALID_ASSIGN_A_PIPELINE_EXPR_WAS_EXPECTED_AFTER_PIPE);
                return assignment(self, err, left, right);
            };
            right.kind = NodeKind::PipelineExpression { stages };
            return assignment(self, err, left, right);
        }

        let right = self.parse_expression();
        assignment(self, err, left, right)
    }

    /// An assignment ends at `;`, a line break, `}` or a comment.
    fn check_assignment_terminator(&mut self, err: &mut Option<ParsingError>) {
        let saved = self.i;
        self.eat_space();
        let terminated = match self.peek() {
            None | Some(';' | '\n' | '}') => true,
            Some('#') => self
                .char_at(self.i + 1)
                .is_some_and(|c| is_comment_first_space(c) || c == '\n'),
            Some(_) => false,
        };
        self.i = saved;
        if !terminated && err.is_none() {
            *err = error_of(
                ParsingErrorKind::InvalidNext,
                message::UNTERMINATED_ASSIGNMENT_MISSING_TERMINATOR,
            );
        }
    }

    /// `callee arg1 arg2 ...`, optionally followed by `| stage ...`.
    fn parse_command_like_statement(&mut self, start: usize, callee: Node) -> Node {
        let call = self.parse_command_like_call(start, callee);

        let after_call = self.i;
        self.eat_space();
        if !self.at(b'|') {
            self.i = after_call;
            return call;
        }

        let mut stages = vec![call];
        let mut err = None;
        self.eat_token(TokenKind::Pipe, 1);

        loop {
            self.eat_space();
            if self.eof() {
                err = error(message::UNTERMINATED_PIPE_STMT_LAST_STAGE_EMPTY);
                break;
            }

            let stage_start = self.i;
            let callee = self.parse_expression();
            if !callee.is_ident_or_ident_member() {
                stages.push(callee);
                err = error(message::INVALID_PIPE_STATE_ALL_STAGES_SHOULD_BE_CALLS);
                break;
            }

            stages.push(self.parse_command_like_call(stage_start, callee));

            let after_stage = self.i;
            self.eat_space();
            match self.peek() {
                Some('|') => self.eat_token(TokenKind::Pipe, 1),
                None | Some('\n' | ';' | '}') => {
                    self.i = after_stage;
                    break;
                }
                Some(c) => {
                    err = error(message::fmt_invalid_pipeline_stage_unexpected_char(c));
                    break;
                }
            }
        }

        Node::with_err(self.span_from(start), err, NodeKind::PipelineStatement { stages })
    }

    /// Arguments up to the end of the line; the call ends with its last
    /// argument.
    fn parse_command_like_call(&mut self, start: usize, callee: Node) -> Node {
        let arguments = self.parse_call_args_no_parenthesis();
        let end = arguments
            .last()
            .map_or(usize::from(callee.span.end()), |a| usize::from(a.span.end()));
        Node::new(
            self.range(start, end),
            NodeKind::CallExpression {
                callee: callee.boxed(),
                arguments,
                must: true,
                command_like_syntax: true,
            },
        )
    }

    /// Value of `return` and `yield`, absent at the end of the statement.
    fn parse_value_until_statement_end(&mut self) -> Option<Node> {
        let saved = self.i;
        self.eat_space();
        if self.at_statement_end() {
            self.i = saved;
            return None;
        }
        Some(self.parse_expression())
    }

    /// Optional label of `break` and `continue`.
    fn parse_label(&mut self) -> Option<Node> {
        let saved = self.i;
        let checkpoint = self.token_checkpoint();
        self.eat_space();
        if !self.peek().is_some_and(is_alpha) {
            self.i = saved;
            return None;
        }
        let label = self.parse_expression();
        match &label.kind {
            NodeKind::IdentifierLiteral { name } if !is_keyword(name) => Some(label),
            _ => {
                self.rewind(saved, checkpoint);
                None
            }
        }
    }

    fn at_statement_end(&self) -> bool {
        match self.peek() {
            None | Some(';' | '}' | '\n') => true,
            Some('#') => self
                .char_at(self.i + 1)
                .is_some_and(|c| is_comment_first_space(c) || c == '\n'),
            Some(_) => false,
        }
    }
}

#[derive(Default)]
struct ForParts {
    key_index_ident: Option<Node>,
    key_pattern: Option<Node>,
    value_elem_ident: Option<Node>,
    value_pattern: Option<Node>,
    chunked: bool,
    iterated_value: Option<Node>,
    body: Option<Node>,
}

impl ForParts {
    fn into_node(self, span: TextRange, err: Option<ParsingError>) -> Node {
        Node::with_err(
            span,
            err,
            NodeKind::ForStatement {
                key_index_ident: self.key_index_ident.map(Node::boxed),
                key_pattern: self.key_pattern.map(Node::boxed),
                value_elem_ident: self.value_elem_ident.map(Node::boxed),
                value_pattern: self.value_pattern.map(Node::boxed),
                chunked: self.chunked,
                iterated_value: self.iterated_value.map(Node::boxed),
                body: self.body.map(Node::boxed),
            },
        )
    }
}

/// Values a match case can compare against without evaluating code.
fn has_statically_known_value(node: &Node) -> bool {
    use NodeKind::*;
    if node.is_simple_value_literal() {
        return true;
    }
    match &node.kind {
        PatternIdentifierLiteral { .. }
        | PatternNamespaceMemberExpression { .. }
        | PatternCallExpression { .. }
        | PatternUnion { .. }
        | OptionalPatternExpression { .. }
        | ReadonlyPatternExpression { .. }
        | ObjectPatternLiteral { .. }
        | RecordPatternLiteral { .. }
        | ListPatternLiteral { .. }
        | TuplePatternLiteral { .. }
        | NamedSegmentPathPatternLiteral { .. }
        | ComplexStringPatternPiece { .. }
        | FunctionPatternExpression { .. } => true,
        ListLiteral { elements, .. } | TupleLiteral { elements, .. } => {
            elements.iter().all(has_statically_known_value)
        }
        ObjectLiteral { elements } | RecordLiteral { elements } => {
            elements.iter().all(|e| match &e.kind {
                ObjectProperty { value, .. } => has_statically_known_value(value),
                _ => false,
            })
        }
        _ => false,
    }
}

/// Sources of imports must designate a `.ix` file without `//`, `..` or `.`
/// segments. For URLs only the path part is checked.
fn import_source_error(source: &Node) -> Option<&'static str> {
    match &source.kind {
        NodeKind::AbsolutePathLiteral { value, .. }
        | NodeKind::RelativePathLiteral { value, .. } => {
            let path = value.strip_prefix("./").unwrap_or(value);
            check_import_path(
                path,
                [
                    message::PATH_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_SLASHSLASH,
                    message::PATH_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SLASHSLASH,
                    message::PATH_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SEGMENTS,
                ],
            )
        }
        NodeKind::URLLiteral { value } => {
            let after_scheme = value.split_once("://").map_or(value.as_str(), |(_, rest)| rest);
            let path = after_scheme.find('/').map_or("", |i| &after_scheme[i..]);
            let path = path.split(['?', '#']).next().unwrap_or("");
            check_import_path(
                path,
                [
                    message::PATH_OF_URL_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_SLASHSLASH,
                    message::PATH_OF_URL_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SLASHSLASH,
                    message::PATH_OF_URL_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SEGMENTS,
                ],
            )
        }
        _ => None,
    }
}

/// `messages` are the `//`, `..` and `.` errors, in that order.
fn check_import_path(path: &str, messages: [&'static str; 3]) -> Option<&'static str> {
    let [slash_slash, dot_dot, dot] = messages;
    if path.contains("//") {
        return Some(slash_slash);
    }
    for segment in path.split('/') {
        match segment {
            ".." => return Some(dot_dot),
            "." => return Some(dot),
            _ => {}
        }
    }
    if !path.ends_with(".ix") {
        return Some(message::URL_LITS_AND_PATH_LITS_USED_AS_IMPORT_SRCS_SHOULD_END_WITH_IX);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::check_import_path;
    use crate::diagnostics::message;

    const MESSAGES: [&str; 3] = ["slash-slash", "dot-dot", "dot"];

    #[test]
    fn import_paths() {
        assert_eq!(check_import_path("/lib/a.ix", MESSAGES), None);
        assert_eq!(check_import_path("lib/a.ix", MESSAGES), None);
        assert_eq!(check_import_path("/lib//a.ix", MESSAGES), Some("slash-slash"));
        assert_eq!(check_import_path("/lib/../a.ix", MESSAGES), Some("dot-dot"));
        assert_eq!(check_import_path("/lib/./a.ix", MESSAGES), Some("dot"));
        assert_eq!(
            check_import_path("/lib/a.js", MESSAGES),
            Some(message::URL_LITS_AND_PATH_LITS_USED_AS_IMPORT_SRCS_SHOULD_END_WITH_IX)
        );
    }
}
