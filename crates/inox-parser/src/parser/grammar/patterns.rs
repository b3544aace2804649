//! Pattern forms.
//!
//! `%` selects the form from the next char: `%|` unions, `%{` object
//! patterns, `%[` list patterns, `%(` conversions, `` %` `` regexes, `%-`
//! option patterns, `%/` and `%:` path and URL patterns, and `%name` with its
//! suffixes. Inside a pattern context the same forms are written without `%`.

use crate::diagnostics::ParsingErrorKind;
use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::parser::Parser;
use crate::parser::ast::{AssignmentOperator, Node, NodeKind};
use crate::parser::core::{error, error_of};
use crate::parser::scan::{
    is_alpha, is_closing_delim, is_comment_first_space, is_dec_digit, is_delim, is_ident_char,
    is_metadata_key, is_space_not_lf, is_supported_scheme, is_unpaired_or_closing_delim,
};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    /// Dispatches on the char after `%`. `preceded_by_paren` lets a union
    /// span several lines.
    pub(crate) fn parse_percent_prefixed_pattern(&mut self, preceded_by_paren: bool) -> Node {
        self.nested(|p| p.parse_percent_prefixed_pattern_inner(preceded_by_paren))
    }

    fn parse_percent_prefixed_pattern_inner(&mut self, preceded_by_paren: bool) -> Node {
        self.assert_at(b'%');
        let start = self.i;

        match self.byte(1) {
            Some(b'|') => {
                let saved = std::mem::replace(&mut self.in_pattern, true);
                let union = self.parse_pattern_union(start, preceded_by_paren);
                self.in_pattern = saved;
                union
            }
            Some(b'.' | b'/') => self.parse_path_like_expression(true),
            Some(b':') => {
                self.bump();
                self.parse_url_like_pattern(start)
            }
            Some(b'{') => {
                let saved = std::mem::replace(&mut self.in_pattern, true);
                let pattern = self.parse_object_pattern_literal(true, false);
                self.in_pattern = saved;
                pattern
            }
            Some(b'[') => {
                let saved = std::mem::replace(&mut self.in_pattern, true);
                let pattern = self.parse_list_pattern_literal(true, false);
                self.in_pattern = saved;
                pattern
            }
            Some(b'(') => {
                self.eat_token(TokenKind::PercentSymbol, 1);
                let value = self.parse_expression_in_pattern(false);
                Node::new(
                    self.range(start, usize::from(value.span.end())),
                    NodeKind::PatternConversionExpression {
                        value: value.boxed(),
                    },
                )
            }
            Some(b'`') => self.parse_regular_expression_literal(),
            Some(b'-') => self.parse_option_pattern_literal(),
            Some(c) if is_alpha(c as char) => self.parse_percent_alpha_starting_pattern(),
            _ => {
                self.eat_token(TokenKind::PercentSymbol, 1);
                Node::with_err(
                    self.span_from(start),
                    error(message::UNTERMINATED_PATT),
                    NodeKind::UnknownNode,
                )
            }
        }
    }

    /// `%name`, `%ns.`, `%ns.member` and the forms they start: `%fn(...)`,
    /// `%str(...)`, pattern calls, optional patterns and `%https://...`.
    fn parse_percent_alpha_starting_pattern(&mut self) -> Node {
        let start = self.i;
        self.bump();
        self.bump_while(is_ident_char);
        let name = self.text(start + 1, self.i).to_owned();

        if self.at(b'.') {
            self.bump();
            let namespace = Node::new(
                self.span_from(start),
                NodeKind::PatternNamespaceIdentifierLiteral {
                    name,
                    unprefixed: false,
                },
            );
            return self.parse_pattern_namespace_member(start, namespace);
        }

        match name.as_str() {
            "fn" => return self.parse_function_pattern(start),
            "str" if self.at(b'(') => {
                self.token(TokenKind::PercentStr, start, self.i);
                return self.parse_complex_string_pattern_piece(start);
            }
            _ if self.at(b':') && is_supported_scheme(&name) => {
                return self.parse_url_like_pattern(start);
            }
            _ => {}
        }

        let ident = Node::new(
            self.span_from(start),
            NodeKind::PatternIdentifierLiteral {
                name,
                unprefixed: false,
            },
        );
        self.parse_pattern_suffix(ident)
    }

    /// Member access on a pattern namespace, the cursor is after the dot.
    fn parse_pattern_namespace_member(&mut self, start: usize, namespace: Node) -> Node {
        let Some(c) = self.peek() else {
            return namespace;
        };
        if is_delim(c) || is_space_not_lf(c) {
            return namespace;
        }
        if !is_alpha(c) && c != '_' {
            let mut namespace = namespace;
            namespace.err = error(
                message::fmt_pattern_namespace_member_should_start_with_a_letter_not(c),
            );
            return namespace;
        }

        let member_start = self.i;
        self.bump_while(is_ident_char);
        let member_name = Node::new(
            self.span_from(member_start),
            NodeKind::IdentifierLiteral {
                name: self.text(member_start, self.i).to_owned(),
            },
        );
        let member = Node::new(
            self.span_from(start),
            NodeKind::PatternNamespaceMemberExpression {
                namespace: namespace.boxed(),
                member_name: member_name.boxed(),
            },
        );
        self.parse_pattern_suffix(member)
    }

    /// `p(args)`, `p{...}` and `p?` directly after a named pattern.
    fn parse_pattern_suffix(&mut self, pattern: Node) -> Node {
        match self.peek() {
            Some('(' | '{') => self.parse_pattern_call(pattern),
            Some('?') => {
                self.eat_token(TokenKind::QuestionMark, 1);
                Node::new(
                    self.span_from(usize::from(pattern.span.start())),
                    NodeKind::OptionalPatternExpression {
                        pattern: pattern.boxed(),
                    },
                )
            }
            _ => pattern,
        }
    }

    /// A bare identifier read in a pattern context.
    pub(crate) fn parse_unprefixed_pattern_identifier(&mut self, head: Node) -> Node {
        let span = head.span;
        let NodeKind::IdentifierLiteral { name } = head.kind else {
            return head;
        };
        let ident = Node::new(
            span,
            NodeKind::PatternIdentifierLiteral {
                name,
                unprefixed: true,
            },
        );
        self.parse_pattern_suffix(ident)
    }

    /// `ns.member` read in a pattern context.
    pub(crate) fn parse_unprefixed_pattern_namespace_member(&mut self, head: Node) -> Node {
        let span = head.span;
        let NodeKind::IdentifierMemberExpression {
            left,
            mut property_names,
        } = head.kind
        else {
            return head;
        };
        let namespace_name = left.ident_name().map(str::to_owned);
        let (Some(namespace_name), 1) = (namespace_name, property_names.len()) else {
            return Node::new(
                span,
                NodeKind::IdentifierMemberExpression {
                    left,
                    property_names,
                },
            );
        };
        let Some(member_name) = property_names.pop() else {
            return head_without_members(span, left);
        };

        let namespace_end = usize::from(left.span.end()) + 1;
        let namespace = Node::new(
            self.range(usize::from(span.start()), namespace_end),
            NodeKind::PatternNamespaceIdentifierLiteral {
                name: namespace_name,
                unprefixed: true,
            },
        );
        let member = Node::new(
            span,
            NodeKind::PatternNamespaceMemberExpression {
                namespace: namespace.boxed(),
                member_name: member_name.boxed(),
            },
        );
        self.parse_pattern_suffix(member)
    }

    /// `readonly pattern`, only in a pattern context.
    pub(crate) fn parse_readonly_pattern_expression(&mut self, start: usize) -> Node {
        self.token(TokenKind::ReadonlyKeyword, start, self.i);
        self.eat_space();
        let pattern = self.parse_expression_in_pattern(true);
        Node::new(
            self.range(start, usize::from(pattern.span.end())),
            NodeKind::ReadonlyPatternExpression {
                pattern: pattern.boxed(),
            },
        )
    }

    /// `%| a | b` or, in a pattern context, `| a | b`. Without a preceding
    /// paren the union ends at the line end; inside parens it runs until the
    /// closing paren, which is left to the caller.
    pub(crate) fn parse_pattern_union(&mut self, start: usize, preceded_by_paren: bool) -> Node {
        if self.at(b'%') {
            self.eat_token(TokenKind::PatternUnionOpeningPipe, 2);
        } else {
            self.eat_token(TokenKind::PatternUnionPipe, 1);
        }

        let mut cases = Vec::new();
        self.eat_union_separators(preceded_by_paren);
        cases.push(self.parse_expression_in_pattern(true));
        self.eat_union_separators(preceded_by_paren);

        let mut err = None;
        loop {
            let continues = match self.peek() {
                Some('|') => true,
                Some('\n') => preceded_by_paren,
                Some(c) => !is_unpaired_or_closing_delim(c),
                None => false,
            };
            if !continues {
                break;
            }

            self.eat_union_separators(preceded_by_paren);
            if preceded_by_paren && (self.eof() || self.at(b')')) {
                break;
            }
            if !self.at(b'|') {
                err = error(message::INVALID_PATT_UNION_ELEMENT_SEPARATOR_EXPLANATION);
                break;
            }
            self.eat_token(TokenKind::PatternUnionPipe, 1);

            self.eat_union_separators(preceded_by_paren);
            cases.push(self.parse_expression_in_pattern(true));
            self.eat_union_separators(preceded_by_paren);
        }

        Node::with_err(self.span_from(start), err, NodeKind::PatternUnion { cases })
    }

    fn eat_union_separators(&mut self, preceded_by_paren: bool) {
        if preceded_by_paren {
            self.eat_space_newline_comma_comment();
        } else {
            self.eat_space();
        }
    }

    /// `callee(arg, ...)` or `callee{...}`, arguments are patterns.
    fn parse_pattern_call(&mut self, callee: Node) -> Node {
        let start = usize::from(callee.span.start());
        let saved = std::mem::replace(&mut self.in_pattern, true);

        let mut arguments = Vec::new();
        let mut err = None;

        if self.at(b'{') {
            arguments.push(self.parse_expression());
        } else {
            self.eat_token(TokenKind::OpeningParenthesis, 1);
            self.eat_space_comma();

            while !self.eof() && !self.at(b')') {
                let arg = self.parse_expression();
                if arg.is_missing_expression() {
                    arguments.push(
                        self.unexpected_char_node(UnexpectedCharContext::PatternCallArguments),
                    );
                } else {
                    arguments.push(arg);
                }
                self.eat_space_comma();
            }

            if !self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
                err = error(message::UNTERMINATED_PATTERN_CALL_MISSING_CLOSING_PAREN);
            }
        }

        self.in_pattern = saved;
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::PatternCallExpression {
                callee: callee.boxed(),
                arguments,
            },
        )
    }

    /// `` %`[a-z]+` ``, the cursor is at `%`.
    fn parse_regular_expression_literal(&mut self) -> Node {
        let start = self.i;
        self.bump_n(2);
        let content_start = self.i;

        while let Some(c) = self.peek() {
            if c == '`' && !self.is_escaped() {
                break;
            }
            self.bump();
        }

        if self.eof() {
            let raw = self.text(start, self.i).to_owned();
            return Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_REGEX_LIT),
                NodeKind::RegularExpressionLiteral {
                    value: raw[2..].to_owned(),
                    raw,
                },
            );
        }

        let value = self.text(content_start, self.i).to_owned();
        self.bump();
        let raw = self.text(start, self.i).to_owned();

        let err = regex_syntax::parse(&value)
            .err()
            .and_then(|e| error(message::fmt_invalid_regex_literal(&e.to_string())));

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::RegularExpressionLiteral { raw, value },
        )
    }

    /// `%-x=pattern` and `%--name=pattern`, the cursor is at `%`.
    fn parse_option_pattern_literal(&mut self) -> Node {
        let start = self.i;
        self.bump_n(2);

        let single_dash = !self.at(b'-');
        if !single_dash {
            self.bump();
        }

        let option = |parser: &Self, name: String, value: Node, msg: Option<&str>| {
            Node::with_err(
                parser.span_from(start),
                msg.and_then(error),
                NodeKind::OptionPatternLiteral {
                    name,
                    value: value.boxed(),
                    single_dash,
                    unprefixed: false,
                },
            )
        };

        let Some(c) = self.peek() else {
            let msg = if single_dash {
                message::DASH_SHOULD_BE_FOLLOWED_BY_OPTION_NAME
            } else {
                message::DOUBLE_DASH_SHOULD_BE_FOLLOWED_BY_OPTION_NAME
            };
            return option(self, String::new(), self.absent(), Some(msg));
        };

        if !is_alpha(c) && !is_dec_digit(c) {
            return option(
                self,
                String::new(),
                self.absent(),
                Some(message::OPTION_NAME_CAN_ONLY_CONTAIN_ALPHANUM_CHARS),
            );
        }

        let name_start = self.i;
        self.bump_while(|c| is_alpha(c) || is_dec_digit(c) || c == '-');
        let name = self.text(name_start, self.i).to_owned();

        self.parse_option_pattern_value(start, name, single_dash, false)
    }

    /// The `=pattern` part of an option pattern; also used for the unprefixed
    /// `--name=pattern` form of pattern contexts.
    pub(crate) fn parse_option_pattern_value(
        &mut self,
        start: usize,
        name: String,
        single_dash: bool,
        unprefixed: bool,
    ) -> Node {
        let option = |parser: &Self, name: String, value: Node, msg: Option<&str>| {
            Node::with_err(
                parser.span_from(start),
                msg.and_then(error),
                NodeKind::OptionPatternLiteral {
                    name,
                    value: value.boxed(),
                    single_dash,
                    unprefixed,
                },
            )
        };

        if !self.eat_token_if(TokenKind::Equal, "=") {
            return option(
                self,
                name,
                self.absent(),
                Some(message::UNTERMINATED_OPION_PATTERN_A_VALUE_IS_EXPECTED_AFTER_EQUAL_SIGN),
            );
        }
        if self.eof() {
            return option(
                self,
                name,
                self.absent(),
                Some(message::UNTERMINATED_OPION_PATT_EQUAL_ASSIGN_SHOULD_BE_FOLLOWED_BY_EXPR),
            );
        }

        let value = self.parse_expression_in_pattern(true);
        option(self, name, value, None)
    }

    /// `%{...}`, `{...}` in a pattern context, or `#{...}` record patterns.
    /// The cursor is at `%`, `{` or `#`.
    pub(crate) fn parse_object_pattern_literal(
        &mut self,
        percent_prefixed: bool,
        is_record: bool,
    ) -> Node {
        self.nested(|p| p.parse_object_pattern_literal_inner(percent_prefixed, is_record))
    }

    fn parse_object_pattern_literal_inner(
        &mut self,
        percent_prefixed: bool,
        is_record: bool,
    ) -> Node {
        let start = self.i;
        if percent_prefixed {
            self.eat_token(TokenKind::OpeningObjectPatternBracket, 2);
        } else if is_record {
            self.eat_token(TokenKind::OpeningRecordBracket, 2);
        } else {
            self.eat_token(TokenKind::OpeningCurlyBracket, 1);
        }

        let mut elements = Vec::new();
        let mut inexact = false;

        self.eat_space_newline_comma_comment();
        while let Some(c) = self.peek() {
            if c == '}' || is_closing_delim(c) {
                break;
            }

            if self.at_str("...") {
                let spread_start = self.i;
                self.eat_token(TokenKind::ThreeDots, 3);
                self.eat_space();

                if self.peek().is_none_or(|c| matches!(c, '}' | ',' | '\n')) {
                    inexact = true;
                } else {
                    let expr = self.parse_expression_in_pattern(true);
                    elements.push(Node::new(
                        self.range(spread_start, usize::from(expr.span.end())),
                        NodeKind::PatternPropertySpreadElement { expr: expr.boxed() },
                    ));
                }
            } else {
                elements.push(self.parse_object_pattern_property());
            }

            self.eat_space_newline_comma_comment();
        }

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else if is_record {
            error(message::UNTERMINATED_REC_PATTERN_MISSING_CLOSING_BRACE)
        } else {
            error(message::UNTERMINATED_OBJ_PATTERN_MISSING_CLOSING_BRACE)
        };

        let kind = if is_record {
            NodeKind::RecordPatternLiteral { elements, inexact }
        } else {
            NodeKind::ObjectPatternLiteral { elements, inexact }
        };
        Node::with_err(self.span_from(start), err, kind)
    }

    /// `key: pattern`, `key?: pattern`, `key %T: pattern`, or a keyless
    /// value, which is an error.
    fn parse_object_pattern_property(&mut self) -> Node {
        let start = self.i;
        let key = self.parse_expression_in_pattern(false);
        if key.is_missing_expression() {
            return self.unexpected_char_node(UnexpectedCharContext::ObjectPattern);
        }

        let (key, optional) = match key.kind {
            NodeKind::BooleanConversionExpression { expr } if !key.is_parenthesized => {
                (*expr, true)
            }
            kind => (
                Node {
                    kind,
                    ..key
                },
                false,
            ),
        };

        let key_name = match &key.kind {
            _ if key.is_parenthesized => None,
            NodeKind::IdentifierLiteral { name } => Some(name.clone()),
            NodeKind::QuotedStringLiteral { value, .. } => Some(value.clone()),
            _ => None,
        };
        let key_end = usize::from(key.span.end());
        self.eat_space();

        let Some(key_name) = key_name else {
            return self.parse_keyless_object_pattern_property(start, key_end, key, optional);
        };

        let mut err = if is_metadata_key(&key_name) {
            error(message::METAPROPS_ARE_NOT_ALLOWED_IN_OBJECT_PATTERNS)
        } else {
            None
        };

        let type_annotation = if self.at(b'%') {
            let annotation = self.parse_percent_prefixed_pattern(false);
            self.eat_space();
            Some(annotation.boxed())
        } else {
            None
        };

        let property = |parser: &Self, key: Node, type_annotation, value: Node, err| {
            Node::with_err(
                parser.range(start, usize::from(value.span.end()).max(key_end)),
                err,
                NodeKind::ObjectPatternProperty {
                    key: Some(key.boxed()),
                    type_annotation,
                    value: value.boxed(),
                    optional,
                },
            )
        };

        if !self.at(b':') {
            let msg = if type_annotation.is_some() {
                message::fmt_invalid_obj_key_missing_colon_after_type_annotation(&key_name)
            } else {
                message::fmt_invalid_obj_pattern_key_missing_colon_after_key(&key_name)
            };
            let value = self.missing_at(key_end);
            return property(self, key, type_annotation, value, error(msg));
        }

        self.eat_token(TokenKind::Colon, 1);
        self.eat_space();

        if self.at(b'#') && self.char_at(self.i + 1).is_some_and(is_comment_first_space) {
            self.eat_space_newline_comment();
            err = error(message::fmt_invalid_obj_pattern_key_comment_before_value_of_key(
                &key_name,
            ));
        }

        match self.peek() {
            None | Some('}' | ',') => {
                let err = err.or_else(|| {
                    error_of(
                        ParsingErrorKind::MissingObjectPatternProperty,
                        message::MISSING_PROPERTY_PATTERN,
                    )
                });
                let value = self.absent();
                return property(self, key, type_annotation, value, err);
            }
            Some('\n') => {
                let value = self.absent();
                return property(
                    self,
                    key,
                    type_annotation,
                    value,
                    error(message::UNEXPECTED_NEWLINE_AFTER_COLON),
                );
            }
            Some(_) => {}
        }

        let value = self.parse_expression_in_pattern(true);
        if value.is_missing_expression() {
            let unexpected = self.unexpected_char_node(UnexpectedCharContext::ObjectPattern);
            let err = err.or_else(|| unexpected.err.clone());
            return property(self, key, type_annotation, value, err);
        }

        self.eat_space();
        let separated = self.at_entry_end() || self.peek().is_some_and(is_closing_delim);
        if !separated && err.is_none() {
            err = error(message::INVALID_OBJ_PATT_LIT_ENTRY_SEPARATION);
        }
        property(self, key, type_annotation, value, err)
    }

    /// A value not preceded by an identifier or string key.
    fn parse_keyless_object_pattern_property(
        &mut self,
        start: usize,
        key_end: usize,
        value: Node,
        optional: bool,
    ) -> Node {
        let keyless = |parser: &Self, value: Node, err| {
            Node::with_err(
                parser.range(start, usize::from(value.span.end()).max(key_end)),
                err,
                NodeKind::ObjectPatternProperty {
                    key: None,
                    type_annotation: None,
                    value: value.boxed(),
                    optional,
                },
            )
        };

        if !self.at(b':') {
            let msg = if self.at_entry_end() {
                message::A_KEY_IS_REQUIRED_FOR_EACH_VALUE_IN_OBJ_REC_PATTERNS
            } else {
                message::INVALID_OBJ_PATT_LIT_ENTRY_SEPARATION
            };
            return keyless(self, value, error(msg));
        }

        let msg =
            message::fmt_only_idents_and_strings_valid_obj_pattern_keys_not(value.kind.name());
        self.eat_token(TokenKind::Colon, 1);
        self.eat_space();
        if self.at_entry_end() {
            return keyless(self, value, error(msg));
        }
        let value = self.parse_expression_in_pattern(true);
        keyless(self, value, error(msg))
    }

    /// `%[...]`, `[...]` in a pattern context, or `#[...]` tuple patterns,
    /// optionally followed by a general element: `%[]%int`.
    pub(crate) fn parse_list_pattern_literal(
        &mut self,
        percent_prefixed: bool,
        is_tuple: bool,
    ) -> Node {
        self.nested(|p| p.parse_list_pattern_literal_inner(percent_prefixed, is_tuple))
    }

    fn parse_list_pattern_literal_inner(&mut self, percent_prefixed: bool, is_tuple: bool) -> Node {
        let start = self.i;
        if percent_prefixed {
            self.eat_token(TokenKind::OpeningListPatternBracket, 2);
        } else if is_tuple {
            self.eat_token(TokenKind::OpeningTupleBracket, 2);
        } else {
            self.eat_token(TokenKind::OpeningBracket, 1);
        }

        let mut elements = Vec::new();

        while !self.eof() && !self.at(b']') {
            self.eat_space_newline_comma_comment();
            let Some(c) = self.peek() else {
                break;
            };
            if c == ']' {
                break;
            }

            let element = self.parse_expression_in_pattern(true);
            if !element.is_missing_expression() {
                elements.push(element);
            } else if is_closing_delim(c) {
                break;
            } else {
                elements.push(self.unexpected_char_node(UnexpectedCharContext::ListPattern));
            }
            self.eat_space_newline_comma_comment();
        }

        let mut err = if self.eat_token_if(TokenKind::ClosingBracket, "]") {
            None
        } else {
            error(message::UNTERMINATED_LIST_TUPLE_PATT_LIT_MISSING_BRACE)
        };

        let general_start = self
            .peek()
            .is_some_and(|c| {
                c == '%' || c == '#' || c == '_' || is_alpha(c) || matches!(c, '{' | '[' | '(')
            });
        let mut general_element = None;
        if err.is_none() && general_start {
            if !elements.is_empty() {
                err = error(message::INVALID_LIST_TUPLE_PATT_GENERAL_ELEMENT_IF_ELEMENTS);
            }
            general_element = Some(self.parse_expression_in_pattern(true).boxed());
        }

        let kind = if is_tuple {
            NodeKind::TuplePatternLiteral {
                elements,
                general_element,
            }
        } else {
            NodeKind::ListPatternLiteral {
                elements,
                general_element,
            }
        };
        Node::with_err(self.span_from(start), err, kind)
    }

    /// `%name = pattern` or `%name = @ pattern` (lazy), the assignment
    /// operator is already consumed.
    pub(crate) fn parse_pattern_definition(
        &mut self,
        left: Node,
        operator: AssignmentOperator,
    ) -> Node {
        let start = usize::from(left.span.start());
        self.eat_space();

        let definition = |parser: &Self, left: Node, right: Node, is_lazy, msg: Option<&str>| {
            Node::with_err(
                parser.span_from(start),
                msg.and_then(error),
                NodeKind::PatternDefinition {
                    left: left.boxed(),
                    right: right.boxed(),
                    is_lazy,
                },
            )
        };

        if self.eof() {
            let right = self.absent();
            let err = Some(message::UNTERMINATED_PATT_DEF_MISSING_RHS);
            return definition(self, left, right, false, err);
        }
        if operator != AssignmentOperator::Assign {
            let right = self.absent();
            return definition(
                self,
                left,
                right,
                false,
                Some(message::INVALID_PATT_DEF_MISSING_OPERATOR_SHOULD_BE_EQUAL),
            );
        }

        let is_lazy = self.at(b'@') && self.char_at(self.i + 1).is_some_and(char::is_whitespace);
        if is_lazy {
            self.eat_token(TokenKind::AtSign, 1);
            self.eat_space();
        }

        let right = self.parse_expression_in_pattern(true);
        let msg = right
            .is_missing_expression()
            .then_some(message::UNTERMINATED_PATT_DEF_MISSING_RHS);
        definition(self, left, right, is_lazy, msg)
    }

    /// `%ns. = value`, the assignment operator is already consumed.
    pub(crate) fn parse_pattern_namespace_definition(
        &mut self,
        left: Node,
        operator: AssignmentOperator,
    ) -> Node {
        let start = usize::from(left.span.start());
        self.eat_space();

        let msg = if self.eof() {
            Some(message::UNTERMINATED_PATT_NS_DEF_MISSING_RHS)
        } else if operator != AssignmentOperator::Assign {
            Some(message::INVALID_PATT_NS_DEF_MISSING_OPERATOR_SHOULD_BE_EQUAL)
        } else {
            None
        };

        let right = if msg.is_some() {
            self.absent()
        } else {
            self.parse_expression_in_pattern(false)
        };
        let msg = msg.or_else(|| {
            right
                .is_missing_expression()
                .then_some(message::UNTERMINATED_PATT_NS_DEF_MISSING_RHS)
        });

        Node::with_err(
            self.span_from(start),
            msg.and_then(error),
            NodeKind::PatternNamespaceDefinition {
                left: left.boxed(),
                right: right.boxed(),
            },
        )
    }
}

fn head_without_members(span: rowan::TextRange, left: Box<Node>) -> Node {
    Node::new(
        span,
        NodeKind::IdentifierMemberExpression {
            left,
            property_names: Vec::new(),
        },
    )
}
