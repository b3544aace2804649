use std::ops::ControlFlow;

use crate::diagnostics::ParsingErrorKind;
use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind, UnaryOperator};
use crate::parser::core::{error, error_of};
use crate::parser::scan::{
    is_alpha, is_byte_slice_base, is_dec_digit, is_ident_char, is_keyword,
    is_unpaired_or_closing_delim,
};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    pub(crate) fn parse_expression(&mut self) -> Node {
        self.parse_expression_with(false)
    }

    /// `preceded_by_paren` is set for the first operand of a parenthesized
    /// expression, where a few forms (`concat`, flags) read differently.
    pub(crate) fn parse_expression_with(&mut self, preceded_by_paren: bool) -> Node {
        self.consume_fuel();
        if !self.enter_recursion() {
            return self.recursion_limit_node();
        }
        let expr = self.parse_expression_inner(preceded_by_paren);
        self.exit_recursion();
        expr
    }

    /// Parses an expression with bare identifiers read as pattern identifiers
    /// (`in_pattern = true`) or as values (`false`).
    pub(crate) fn parse_expression_in_pattern(&mut self, in_pattern: bool) -> Node {
        let saved = std::mem::replace(&mut self.in_pattern, in_pattern);
        let expr = self.parse_expression();
        self.in_pattern = saved;
        expr
    }

    fn parse_expression_inner(&mut self, preceded_by_paren: bool) -> Node {
        let start = self.i;
        let Some(c) = self.peek() else {
            return self.missing_expression(false);
        };

        let lhs = match c {
            '$' => self.parse_variable(),
            '!' => return self.parse_bool_negation(),
            '~' => return self.parse_runtime_type_check(),
            ':' => {
                return match self.byte(1) {
                    Some(b'/') if self.byte(2) == Some(b'/') => self.parse_url_like(start),
                    Some(b'0'..=b'9') => self.parse_port_literal(),
                    Some(b'{') => self.parse_dictionary_literal(),
                    _ => self.missing_expression(true),
                };
            }
            c if is_alpha(c) || c == '_' => {
                return self.parse_ident_led_expression(preceded_by_paren);
            }
            '0' if self.byte(1).is_some_and(|b| is_byte_slice_base(b as char))
                && self.byte(2) == Some(b'[') =>
            {
                return self.parse_byte_slice_literal();
            }
            '0'..='9' => return self.parse_number_and_range_and_rate_literals(),
            '{' if self.in_pattern => return self.parse_object_pattern_literal(false, false),
            '{' => return self.parse_object_or_record_literal(false),
            '[' if self.in_pattern => return self.parse_list_pattern_literal(false, false),
            '[' => return self.parse_list_or_tuple_literal(false),
            '|' if self.in_pattern => return self.parse_pattern_union(start, preceded_by_paren),
            '\'' => return self.parse_rune_or_rune_range(),
            '"' => return self.parse_quoted_string_literal(),
            '`' => return self.parse_multiline_string_literal(),
            '+' if self.byte(1).is_some_and(|b| b.is_ascii_digit()) => {
                return self.missing_expression(true);
            }
            '+' => return self.parse_unquoted_string_or_email(start),
            '/' => return self.parse_path_like_expression(false),
            '.' => return self.parse_dot_starting_expression(),
            '-' => return self.parse_dash_starting_expression(preceded_by_paren),
            '#' => return self.parse_hash_starting_expression(),
            '@' => return self.parse_at_starting_expression(),
            '%' => {
                let pattern = self.parse_percent_prefixed_pattern(preceded_by_paren);
                let templated = matches!(
                    pattern.kind,
                    NodeKind::PatternIdentifierLiteral { .. }
                        | NodeKind::PatternNamespaceMemberExpression { .. }
                );
                if templated && self.at(b'`') {
                    return self.parse_string_template_literal(pattern);
                }
                return pattern;
            }
            '(' => self.parse_parenthesized_expression(),
            _ => return self.missing_expression(true),
        };

        self.parse_postfix_chain(start, lhs)
    }

    fn parse_variable(&mut self) -> Node {
        self.assert_at(b'$');
        let start = self.i;
        self.bump();
        let global = self.at(b'$');
        if global {
            self.bump();
        }
        let name_start = self.i;
        self.bump_while(is_ident_char);
        let name = self.text(name_start, self.i).to_owned();
        let kind = if global {
            NodeKind::GlobalVariable { name }
        } else {
            NodeKind::Variable { name }
        };
        Node::new(self.span_from(start), kind)
    }

    fn parse_bool_negation(&mut self) -> Node {
        let start = self.i;
        self.eat_token(TokenKind::ExclamationMark, 1);
        let operand = self.parse_expression();
        Node::new(
            self.range(start, usize::from(operand.span.end())),
            NodeKind::UnaryExpression {
                operator: UnaryOperator::BoolNegate,
                operand: operand.boxed(),
            },
        )
    }

    fn parse_runtime_type_check(&mut self) -> Node {
        let start = self.i;
        self.eat_token(TokenKind::Tilde, 1);
        let expr = self.parse_expression();
        Node::new(
            self.range(start, usize::from(expr.span.end())),
            NodeKind::RuntimeTypeCheckExpression {
                expr: expr.boxed(),
            },
        )
    }

    /// Identifier-led forms: keyword expressions, identifiers, identifier
    /// members and their calls.
    fn parse_ident_led_expression(&mut self, preceded_by_paren: bool) -> Node {
        let start = self.i;
        let head = self.parse_ident_starting_expression();

        let callee_name = match &head.kind {
            NodeKind::IdentifierLiteral { name } => {
                let name = name.clone();
                match name.as_str() {
                    "go" => return self.parse_spawn_expression(start),
                    "fn" if self.in_pattern => return self.parse_function_pattern(start),
                    "fn" => return self.parse_function(start),
                    "s" if self.at(b'!') => {
                        self.bump();
                        return self.parse_css_selector_expression(start);
                    }
                    "Mapping" => return self.parse_mapping_expression(start),
                    "comp" => return self.parse_compute_expression(start),
                    "udata" => return self.parse_udata_literal(start),
                    "concat" => {
                        return self.parse_concatenation_expression(start, preceded_by_paren);
                    }
                    "testsuite" => return self.parse_test_suite_expression(start),
                    "testcase" => return self.parse_test_case_expression(start),
                    "lifetimejob" => return self.parse_lifetimejob_expression(start),
                    "on" => return self.parse_reception_handler_expression(start),
                    "sendval" => return self.parse_send_value_expression(start),
                    "readonly" if self.in_pattern => {
                        return self.parse_readonly_pattern_expression(start);
                    }
                    "new" => return self.parse_new_expression(start),
                    _ => {}
                }
                if is_keyword(&name) {
                    return head;
                }
                if self.in_pattern {
                    return self.parse_unprefixed_pattern_identifier(head);
                }
                name
            }
            NodeKind::IdentifierMemberExpression {
                left,
                property_names,
            } => {
                if self.in_pattern && property_names.len() == 1 {
                    return self.parse_unprefixed_pattern_namespace_member(head);
                }
                left.ident_name().unwrap_or_default().to_owned()
            }
            NodeKind::SelfExpression | NodeKind::MemberExpression { .. } => String::new(),
            _ => return head,
        };

        if self.at_expression_end() && !self.at_str("::") {
            return head;
        }

        let xml_start = self.at(b'<') && self.char_at(self.i + 1).is_some_and(is_alpha);
        if xml_start && head.ident_name().is_some() {
            return self.parse_xml_expression(head);
        }

        let lhs = self.parse_call_if_present(head, &callee_name);
        self.parse_postfix_chain(start, lhs)
    }

    /// Member, index, slice, extraction, double-colon, call and boolean
    /// conversion suffixes.
    pub(crate) fn parse_postfix_chain(&mut self, start: usize, mut lhs: Node) -> Node {
        while let Some(c) = self.peek() {
            if is_unpaired_or_closing_delim(c) && !self.at_str("::") {
                break;
            }
            let step = match c {
                '[' | '.' => self.parse_member_like(start, lhs),
                ':' => self.parse_double_colon_element(start, lhs),
                '(' => ControlFlow::Continue(self.parse_parenthesized_call(start, lhs)),
                '!' if self.byte(1) == Some(b'(') => {
                    ControlFlow::Continue(self.parse_parenthesized_call(start, lhs))
                }
                '?' => {
                    self.eat_token(TokenKind::QuestionMark, 1);
                    ControlFlow::Continue(Node::new(
                        self.span_from(start),
                        NodeKind::BooleanConversionExpression { expr: lhs.boxed() },
                    ))
                }
                _ => break,
            };
            match step {
                ControlFlow::Continue(next) => lhs = next,
                ControlFlow::Break(done) => return done,
            }
        }
        lhs
    }

    fn parse_member_like(&mut self, start: usize, lhs: Node) -> ControlFlow<Node, Node> {
        let is_dot = self.at(b'.');

        if is_dot && self.byte(1) == Some(b'{') {
            let keys = self.parse_key_list();
            return ControlFlow::Continue(Node::new(
                self.span_from(start),
                NodeKind::ExtractionExpression {
                    object: lhs.boxed(),
                    keys: keys.boxed(),
                },
            ));
        }

        if is_dot {
            self.eat_token(TokenKind::Dot, 1);
        } else {
            self.eat_token(TokenKind::OpeningBracket, 1);
        }

        let unterminated = match self.peek() {
            None => true,
            Some(c) => is_unpaired_or_closing_delim(c) && (is_dot || (c != ':' && c != ']')),
        };
        if unterminated {
            if is_dot {
                return ControlFlow::Break(Node::with_err(
                    self.span_from(start),
                    error_of(
                        ParsingErrorKind::UnterminatedMemberExpr,
                        message::UNTERMINATED_MEMB_OR_INDEX_EXPR,
                    ),
                    NodeKind::MemberExpression {
                        left: lhs.boxed(),
                        property_name: None,
                        optional: false,
                    },
                ));
            }
            return ControlFlow::Break(invalid_member_like(
                self.span_from(start),
                lhs,
                message::UNTERMINATED_MEMB_OR_INDEX_EXPR,
            ));
        }

        if !is_dot {
            return self.parse_index_or_slice(start, lhs);
        }

        if self.at(b'(') {
            return ControlFlow::Continue(self.parse_computed_member(start, lhs, false));
        }

        let optional = self.eat_token_if(TokenKind::QuestionMark, "?");
        let dynamic = self.eat_token_if(TokenKind::LessThan, "<");
        let member = |span, lhs: Node, name: Option<Node>, err| {
            let kind = if dynamic {
                NodeKind::DynamicMemberExpression {
                    left: lhs.boxed(),
                    property_name: name.map(Node::boxed),
                    optional,
                }
            } else {
                NodeKind::MemberExpression {
                    left: lhs.boxed(),
                    property_name: name.map(Node::boxed),
                    optional,
                }
            };
            Node::with_err(span, err, kind)
        };

        let Some(c) = self.peek() else {
            let msg = if dynamic {
                message::UNTERMINATED_DYN_MEMB_OR_INDEX_EXPR
            } else {
                message::UNTERMINATED_MEMB_OR_INDEX_EXPR
            };
            return ControlFlow::Break(member(self.span_from(start), lhs, None, error(msg)));
        };

        if optional && self.at(b'(') {
            return ControlFlow::Continue(self.parse_computed_member(start, lhs, true));
        }

        if !is_alpha(c) && c != '_' {
            let err = error(message::fmt_prop_name_should_start_with_a_letter_not(c));
            return ControlFlow::Break(member(self.span_from(start), lhs, None, err));
        }

        let name_start = self.i;
        self.bump_while(is_ident_char);
        let name = ident_node(self, name_start);
        ControlFlow::Continue(member(self.span_from(start), lhs, Some(name), None))
    }

    /// `lhs::element`, the cursor is at `::`.
    fn parse_double_colon_element(&mut self, start: usize, lhs: Node) -> ControlFlow<Node, Node> {
        self.eat_token(TokenKind::DoubleColon, 2);

        let element = |p: &Self, lhs: Node, element: Option<Node>, err| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::DoubleColonExpression {
                    left: lhs.boxed(),
                    element: element.map(Node::boxed),
                },
            )
        };

        let Some(c) = self.peek().filter(|&c| !is_unpaired_or_closing_delim(c)) else {
            let err = error_of(
                ParsingErrorKind::UnterminatedDoubleColonExpr,
                message::UNTERMINATED_DOUBLE_COLON_EXPR,
            );
            return ControlFlow::Break(element(self, lhs, None, err));
        };

        let err = if is_alpha(c) || c == '_' {
            None
        } else {
            error(message::fmt_double_colon_expression_element_should_start_with_a_letter_not(c))
        };
        let name_start = self.i;
        self.bump_while(is_ident_char);
        let name = ident_node(self, name_start);
        ControlFlow::Continue(element(self, lhs, Some(name), err))
    }

    /// `.(expr)` or `.?(expr)`, the dot is already consumed.
    fn parse_computed_member(&mut self, start: usize, lhs: Node, optional: bool) -> Node {
        self.eat_token(TokenKind::OpeningParenthesis, 1);
        self.eat_space();
        let property_name = self.parse_expression();
        self.eat_space();
        let err = if self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
            None
        } else {
            error(message::UNTERMINATED_PARENTHESIZED_EXPR_MISSING_CLOSING_PAREN)
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::ComputedMemberExpression {
                left: lhs.boxed(),
                property_name: property_name.boxed(),
                optional,
            },
        )
    }

    /// `[i]`, `[i:j]`, `[:j]`, `[i:]`, the opening bracket is consumed.
    fn parse_index_or_slice(&mut self, start: usize, lhs: Node) -> ControlFlow<Node, Node> {
        self.eat_space();
        if self.eof() {
            return ControlFlow::Break(invalid_member_like(
                self.span_from(start),
                lhs,
                message::UNTERMINATED_INDEX_OR_SLICE_EXPR,
            ));
        }

        let mut start_index = None;
        let mut is_slice = self.at(b':');
        if is_slice {
            self.eat_token(TokenKind::Colon, 1);
        } else {
            start_index = Some(self.parse_expression());
        }

        self.eat_space();
        if self.eof() {
            return ControlFlow::Break(invalid_member_like(
                self.span_from(start),
                lhs,
                message::UNTERMINATED_INDEX_OR_SLICE_EXPR,
            ));
        }

        if self.at(b':') {
            if is_slice {
                return ControlFlow::Break(Node::with_err(
                    self.span_from(start),
                    error(message::INVALID_SLICE_EXPR_SINGLE_COLON),
                    NodeKind::SliceExpression {
                        indexed: lhs.boxed(),
                        start_index: start_index.map(Node::boxed),
                        end_index: None,
                    },
                ));
            }
            is_slice = true;
            self.eat_token(TokenKind::Colon, 1);
        }

        self.eat_space();

        if is_slice && start_index.is_none() && (self.eof() || self.at(b']')) {
            return ControlFlow::Break(Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_SLICE_EXPR_MISSING_END_INDEX),
                NodeKind::SliceExpression {
                    indexed: lhs.boxed(),
                    start_index: None,
                    end_index: None,
                },
            ));
        }

        let mut end_index = None;
        if is_slice && !self.eof() && !self.at(b']') {
            end_index = Some(self.parse_expression());
        }

        self.eat_space();
        if !self.eat_token_if(TokenKind::ClosingBracket, "]") {
            return ControlFlow::Break(invalid_member_like(
                self.span_from(start),
                lhs,
                message::UNTERMINATED_INDEX_OR_SLICE_EXPR_MISSING_CLOSING_BRACKET,
            ));
        }

        let kind = match (is_slice, start_index) {
            (false, Some(index)) => NodeKind::IndexExpression {
                indexed: lhs.boxed(),
                index: index.boxed(),
            },
            (_, start_index) => NodeKind::SliceExpression {
                indexed: lhs.boxed(),
                start_index: start_index.map(Node::boxed),
                end_index: end_index.map(Node::boxed),
            },
        };
        ControlFlow::Continue(Node::new(self.span_from(start), kind))
    }

    /// `.{a, b}`: the key list of an extraction expression.
    pub(crate) fn parse_key_list(&mut self) -> Node {
        let start = self.i;
        self.eat_token(TokenKind::OpeningKeylistBracket, 2);

        let mut keys = Vec::new();
        let mut err = None;

        while !self.eof() && !self.at(b'}') {
            self.eat_space_comma();
            if self.eof() {
                break;
            }

            let key = self.parse_expression();
            if key.is_missing_expression() {
                if self.at(b'}') {
                    break;
                }
                keys.push(self.unexpected_char_node(UnexpectedCharContext::KeyList));
                continue;
            }

            if !matches!(
                key.kind,
                NodeKind::IdentifierLiteral { .. } | NodeKind::UnambiguousIdentifierLiteral { .. }
            ) {
                err = error(message::KEY_LIST_CAN_ONLY_CONTAIN_IDENTS);
            }
            keys.push(key);
            self.eat_space_comma();
        }

        if !self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            err = error(message::UNTERMINATED_KEY_LIST_MISSING_BRACE);
        }

        Node::with_err(self.span_from(start), err, NodeKind::KeyListExpression { keys })
    }

    /// Shorthand calls of identifier callees: `f"str"`, `f{obj}`, `f(args)`
    /// and `f!(args)`. Returns the callee when no call follows.
    fn parse_call_if_present(&mut self, callee: Node, callee_name: &str) -> Node {
        let start = usize::from(callee.span.start());
        match self.peek() {
            Some('"' | '{') => {
                let argument = self.parse_expression();
                Node::new(
                    self.range(start, usize::from(argument.span.end())),
                    NodeKind::CallExpression {
                        callee: callee.boxed(),
                        arguments: vec![argument],
                        must: true,
                        command_like_syntax: false,
                    },
                )
            }
            Some('(') if !is_keyword(callee_name) => self.parse_parenthesized_call(start, callee),
            Some('!') if self.byte(1) == Some(b'(') && !is_keyword(callee_name) => {
                self.parse_parenthesized_call(start, callee)
            }
            _ => callee,
        }
    }

    /// Call with parenthesized arguments, the cursor is at `(` or `!(`.
    fn parse_parenthesized_call(&mut self, start: usize, callee: Node) -> Node {
        let must = self.eat_token_if(TokenKind::ExclamationMark, "!");
        self.eat_token(TokenKind::OpeningParenthesis, 1);

        let mut arguments = Vec::new();
        let mut spread_seen = false;

        while !self.eof() && !self.at(b')') {
            self.eat_space_newline_comma();
            if self.eof() || self.at(b')') {
                break;
            }
            match self.parse_call_argument(&mut spread_seen, UnexpectedCharContext::CallArguments) {
                Some(arg) => arguments.push(arg),
                None => break,
            }
            self.eat_space_newline_comma();
        }

        let err = if self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
            None
        } else {
            error(message::UNTERMINATED_CALL_MISSING_CLOSING_PAREN)
        };

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::CallExpression {
                callee: callee.boxed(),
                arguments,
                must,
                command_like_syntax: false,
            },
        )
    }

    /// One argument, with an optional `...` spread prefix. A missing argument
    /// becomes an `UnknownNode` over one unexpected char; `None` when nothing
    /// is left to consume.
    fn parse_call_argument(
        &mut self,
        spread_seen: &mut bool,
        context: UnexpectedCharContext,
    ) -> Option<Node> {
        let arg_err = if *spread_seen {
            error(message::SPREAD_ARGUMENT_CANNOT_BE_FOLLOWED_BY_ADDITIONAL_ARGS)
        } else {
            None
        };

        let spread_start = self.i;
        let is_spread = self.eat_token_if(TokenKind::ThreeDots, "...");
        let arg = self.parse_expression();

        if arg.is_missing_expression() && !is_spread {
            if self.eof() || self.at(b')') {
                return None;
            }
            return Some(self.unexpected_char_node(context));
        }

        if is_spread {
            *spread_seen = true;
            let span = self.range(spread_start, usize::from(arg.span.end()));
            return Some(Node::with_err(
                span,
                arg_err,
                NodeKind::SpreadArgument { expr: arg.boxed() },
            ));
        }

        let mut arg = arg;
        if arg.err.is_none() && arg_err.is_some() {
            arg.err = arg_err;
        }
        Some(arg)
    }

    /// Arguments of a command-like call: they run until the end of the line,
    /// a `;` or a closing delimiter.
    pub(crate) fn parse_call_args_no_parenthesis(&mut self) -> Vec<Node> {
        let mut arguments = Vec::new();
        let mut spread_seen = false;

        loop {
            self.eat_space_comments();
            match self.peek() {
                None => break,
                Some(c) if is_unpaired_or_closing_delim(c) && c != ':' => break,
                Some(_) => {}
            }

            let arg_start = self.i;
            let arg_err = if spread_seen {
                error(message::SPREAD_ARGUMENT_CANNOT_BE_FOLLOWED_BY_ADDITIONAL_ARGS)
            } else {
                None
            };
            let is_spread = self.eat_token_if(TokenKind::ThreeDots, "...");
            let arg = self.parse_expression();

            if is_spread {
                spread_seen = true;
                arguments.push(Node::with_err(
                    self.range(arg_start, usize::from(arg.span.end())),
                    arg_err,
                    NodeKind::SpreadArgument { expr: arg.boxed() },
                ));
                continue;
            }

            if arg.is_missing_expression() {
                if self.eof() {
                    arguments.push(arg);
                    break;
                }
                arguments.push(self.unexpected_char_node(UnexpectedCharContext::CallArguments));
                continue;
            }

            let mut arg = arg;
            if arg.err.is_none() && arg_err.is_some() {
                arg.err = arg_err;
            }
            arguments.push(arg);
        }

        arguments
    }

    /// Consumes one char as an `UnexpectedChar` token and wraps it in an
    /// `UnknownNode`.
    pub(crate) fn unexpected_char_node(&mut self, context: UnexpectedCharContext) -> Node {
        let start = self.i;
        let Some(c) = self.eat_unexpected_char() else {
            return self.missing_expression(false);
        };
        Node::with_err(
            self.span_from(start),
            error(message::fmt_unexpected_char(c, context)),
            NodeKind::UnknownNode,
        )
    }

    /// Whether the char after the cursor ends a name: end of input or a
    /// non-identifier char.
    pub(crate) fn at_word_end(&self, len: usize) -> bool {
        self.char_at(self.i + len).is_none_or(|c| !is_ident_char(c))
    }

    /// Whether the cursor is at `word` followed by a non-identifier char.
    pub(crate) fn at_word(&self, word: &str) -> bool {
        self.at_str(word) && self.at_word_end(word.len())
    }

    pub(crate) fn at_decimal_digit(&self) -> bool {
        self.peek().is_some_and(is_dec_digit)
    }
}

pub(super) fn ident_node(parser: &Parser<'_, '_>, start: usize) -> Node {
    Node::new(
        parser.span_from(start),
        NodeKind::IdentifierLiteral {
            name: parser.text(start, parser.i).to_owned(),
        },
    )
}

fn invalid_member_like(span: rowan::TextRange, lhs: Node, msg: &str) -> Node {
    Node::with_err(
        span,
        error(msg),
        NodeKind::InvalidMemberLike {
            left: lhs.boxed(),
            right: None,
        },
    )
}
