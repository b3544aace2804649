//! Identifier-like expressions and the forms selected by a single leading
//! char: `#`, `.`, `-` and `@`.

use crate::diagnostics::ParsingErrorKind;
use crate::diagnostics::message;
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::{error, error_of};
use crate::parser::scan::{
    is_alpha, is_dec_digit, is_delim, is_ident_char, is_supported_scheme,
    is_unpaired_or_closing_delim, is_unquoted_string_char,
};
use crate::parser::token::TokenKind;

use super::expressions::ident_node;

impl Parser<'_, '_> {
    /// Identifiers, identifier member expressions (`a.b.c`), `self`, boolean
    /// and nil literals, and the literals an identifier can start: unquoted
    /// strings, emails and URLs.
    pub(crate) fn parse_ident_starting_expression(&mut self) -> Node {
        let start = self.i;
        self.bump();
        self.bump_while(is_ident_char);
        let ident = ident_node(self, start);
        let name = self.text(start, self.i);

        if name == "self" {
            return Node::new(ident.span, NodeKind::SelfExpression);
        }

        if self.at(b'.') && !self.at_postfix_dot() {
            return self.parse_ident_member_expression(start, ident);
        }

        let is_protocol = self.at_str("://");
        let unquoted_next = self
            .peek()
            .is_some_and(|c| c == '\\' || (is_unquoted_string_char(c) && c != ':' && c != '.'));
        if !is_protocol && unquoted_next {
            return self.parse_unquoted_string_or_email(start);
        }

        match name {
            "true" | "false" => {
                return Node::new(
                    ident.span,
                    NodeKind::BooleanLiteral {
                        value: name == "true",
                    },
                );
            }
            "nil" => return Node::new(ident.span, NodeKind::NilLiteral),
            _ => {}
        }

        if is_protocol {
            if is_supported_scheme(name) {
                return self.parse_url_like(start);
            }
            return Node::with_err(
                ident.span,
                error(message::fmt_invalid_uri_unsupported_protocol(name)),
                NodeKind::InvalidURL {
                    value: name.to_owned(),
                },
            );
        }

        if name.ends_with('-') {
            let mut ident = ident;
            ident.err = error(message::IDENTIFIER_LITERAL_MUST_NO_END_WITH_A_HYPHEN);
            return ident;
        }

        ident
    }

    /// `.{`, `.(` and `.?` after a name are member-like suffixes handled by
    /// the postfix loop.
    fn at_postfix_dot(&self) -> bool {
        matches!(self.byte(1), Some(b'{' | b'(' | b'?'))
    }

    /// `a.b.c` and `a.<b`, the cursor is at the first dot.
    fn parse_ident_member_expression(&mut self, start: usize, ident: Node) -> Node {
        let mut head = ident;
        let mut property_names: Vec<Node> = Vec::new();
        // Cleared once a dynamic member turns the chain into nested members.
        let mut plain = true;

        loop {
            self.bump();

            let Some(c) = self.peek().filter(|&c| !is_unpaired_or_closing_delim(c)) else {
                self.token(TokenKind::Dot, self.i - 1, self.i);
                let span = self.span_from(start);
                let err = error_of(
                    ParsingErrorKind::UnterminatedMemberExpr,
                    message::UNTERMINATED_IDENT_MEMB_EXPR,
                );
                if plain {
                    return Node::with_err(
                        span,
                        err,
                        NodeKind::IdentifierMemberExpression {
                            left: head.boxed(),
                            property_names,
                        },
                    );
                }
                return Node::with_err(
                    span,
                    err,
                    NodeKind::MemberExpression {
                        left: head.boxed(),
                        property_name: None,
                        optional: false,
                    },
                );
            };

            let dynamic = c == '<';
            if dynamic {
                self.bump();
            } else if !is_alpha(c) && c != '_' {
                return self.parse_unquoted_string_or_email(start);
            }

            let name_start = self.i;
            let left_end = usize::from(head.span.end()).max(
                property_names
                    .last()
                    .map_or(0, |n: &Node| usize::from(n.span.end())),
            );
            self.bump_while(is_ident_char);
            let property = ident_node(self, name_start);

            if dynamic {
                let names = std::mem::take(&mut property_names);
                let left = collapse(head, names, self.range(start, left_end));
                head = Node::new(
                    self.span_from(start),
                    NodeKind::DynamicMemberExpression {
                        left: left.boxed(),
                        property_name: Some(property.boxed()),
                        optional: false,
                    },
                );
                plain = false;
            } else if plain {
                property_names.push(property);
            } else {
                head = Node::new(
                    self.span_from(start),
                    NodeKind::MemberExpression {
                        left: head.boxed(),
                        property_name: Some(property.boxed()),
                        optional: false,
                    },
                );
            }

            if !self.at(b'.') || self.at_postfix_dot() {
                break;
            }
        }

        let expr = collapse(head, property_names, self.span_from(start));

        let unquoted_next = self.peek().is_some_and(|c| {
            c == '\\' || (is_unquoted_string_char(c) && !matches!(c, ':' | '<' | '.'))
        });
        if unquoted_next {
            return self.parse_unquoted_string_or_email(start);
        }
        expr
    }

    /// `#name`, `#{...}` records and `#[...]` tuples.
    pub(crate) fn parse_hash_starting_expression(&mut self) -> Node {
        self.assert_at(b'#');
        match self.byte(1) {
            Some(b'{') if self.in_pattern => return self.parse_object_pattern_literal(false, true),
            Some(b'{') => return self.parse_object_or_record_literal(true),
            Some(b'[') if self.in_pattern => return self.parse_list_pattern_literal(false, true),
            Some(b'[') => return self.parse_list_or_tuple_literal(true),
            _ => {}
        }

        let start = self.i;
        self.bump();
        self.bump_while(is_ident_char);

        let err = if self.i == start + 1 {
            error(message::UNTERMINATED_IDENTIFIER_LIT)
        } else {
            None
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::UnambiguousIdentifierLiteral {
                name: self.text(start + 1, self.i).to_owned(),
            },
        )
    }

    /// Relative paths, key lists, `..upper` ranges and `.name` property names.
    pub(crate) fn parse_dot_starting_expression(&mut self) -> Node {
        self.assert_at(b'.');
        let start = self.i;

        if self.at_str("./") || self.at_str("../") {
            return self.parse_path_like_expression(false);
        }

        match self.char_at(self.i + 1) {
            Some('{') => return self.parse_key_list(),
            Some('.') => {
                self.eat_token(TokenKind::TwoDots, 2);
                let upper_bound = self.parse_expression();
                return Node::new(
                    self.span_from(start),
                    NodeKind::UpperBoundRangeExpression {
                        upper_bound: upper_bound.boxed(),
                    },
                );
            }
            Some(c) if is_ident_char(c) && !is_dec_digit(c) => {
                self.bump();
                self.bump_while(is_ident_char);
                return Node::new(
                    self.span_from(start),
                    NodeKind::PropertyNameLiteral {
                        name: self.text(start + 1, self.i).to_owned(),
                    },
                );
            }
            _ => {}
        }

        self.eat_unexpected_char();
        Node::with_err(
            self.span_from(start),
            error(message::DOT_SHOULD_BE_FOLLOWED_BY),
            NodeKind::UnknownNode,
        )
    }

    /// Numbers, flags (`-v`, `--verbose`), options (`--name=value`) and
    /// dash-only unquoted strings.
    pub(crate) fn parse_dash_starting_expression(&mut self, preceded_by_paren: bool) -> Node {
        self.assert_at(b'-');
        let start = self.i;
        self.bump();

        let dash_only = |parser: &Self| {
            let raw = parser.text(start, parser.i).to_owned();
            Node::new(
                parser.span_from(start),
                NodeKind::UnquotedStringLiteral {
                    value: raw.clone(),
                    raw,
                },
            )
        };

        let Some(c) = self.peek() else {
            return dash_only(self);
        };
        if c.is_whitespace() || (preceded_by_paren && c == '$') {
            return dash_only(self);
        }

        if is_dec_digit(c) {
            self.i = start;
            return self.parse_number_and_range_and_rate_literals();
        }

        let single_dash = !self.at(b'-');
        if !single_dash {
            self.bump();
        }

        let Some(c) = self.peek() else {
            return dash_only(self);
        };
        if c.is_whitespace() || is_delim(c) {
            return dash_only(self);
        }

        if !is_alpha(c) && !is_dec_digit(c) {
            if is_unquoted_string_char(c) {
                return self.parse_unquoted_string_or_email(start);
            }
            return Node::with_err(
                self.span_from(start),
                error(message::OPTION_NAME_CAN_ONLY_CONTAIN_ALPHANUM_CHARS),
                NodeKind::FlagLiteral {
                    raw: self.text(start, self.i).to_owned(),
                    name: String::new(),
                    single_dash,
                },
            );
        }

        let name_start = self.i;
        self.bump_while(|c| is_alpha(c) || is_dec_digit(c) || c == '-');
        let name = self.text(name_start, self.i).to_owned();

        if !self.at(b'=') {
            return Node::new(
                self.span_from(start),
                NodeKind::FlagLiteral {
                    raw: self.text(start, self.i).to_owned(),
                    name,
                    single_dash,
                },
            );
        }

        if self.in_pattern {
            return self.parse_option_pattern_value(start, name, single_dash, true);
        }

        self.eat_token(TokenKind::Equal, 1);

        if self.eof() {
            let value = self.missing_expression(false);
            return Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_OPION_EXPR_EQUAL_ASSIGN_SHOULD_BE_FOLLOWED_BY_EXPR),
                NodeKind::OptionExpression {
                    name,
                    value: value.boxed(),
                    single_dash,
                },
            );
        }

        let value = self.parse_expression();
        Node::new(
            self.span_from(start),
            NodeKind::OptionExpression {
                name,
                value: value.boxed(),
                single_dash,
            },
        )
    }

    /// `@(expr)` lazy expressions, `@alias = host` definitions and URLs that
    /// start with a host alias.
    pub(crate) fn parse_at_starting_expression(&mut self) -> Node {
        self.assert_at(b'@');
        let start = self.i;

        match self.byte(1) {
            Some(b'(') => {
                self.eat_token(TokenKind::AtSign, 1);
                let expression = self.parse_expression();
                Node::new(
                    self.span_from(start),
                    NodeKind::LazyExpression {
                        expression: expression.boxed(),
                    },
                )
            }
            Some(b'a'..=b'z') => self.parse_host_alias_related(start),
            _ => {
                self.eat_unexpected_char();
                Node::with_err(
                    self.span_from(start),
                    error(message::AT_SYMBOL_SHOULD_BE_FOLLOWED_BY),
                    NodeKind::UnknownNode,
                )
            }
        }
    }

    fn parse_host_alias_related(&mut self, start: usize) -> Node {
        let mut j = start + 1;
        while let Some(c) = self.char_at(j).filter(|&c| is_ident_char(c)) {
            j += c.len_utf8();
        }
        let alias_end = j;
        while let Some(c) = self.char_at(j).filter(|&c| c == ' ' || c == '\t' || c == '\r') {
            j += c.len_utf8();
        }

        match self.char_at(j) {
            None => {}
            Some('=') => return self.parse_host_alias_definition(start, alias_end, j),
            Some(c) if is_unpaired_or_closing_delim(c) => {}
            Some(_) => return self.parse_url_like(start),
        }

        self.bump_n(j - self.i);
        Node::with_err(
            self.span_from(start),
            error(message::UNTERMINATED_ALIAS_RELATED_LITERAL),
            NodeKind::InvalidAliasRelatedNode {
                raw: self.text(start, j).to_owned(),
            },
        )
    }

    /// `@alias = <host>`, `equal` is the offset of `=`.
    fn parse_host_alias_definition(
        &mut self,
        start: usize,
        alias_end: usize,
        equal: usize,
    ) -> Node {
        let left = Node::new(
            self.range(start, alias_end),
            NodeKind::AtHostLiteral {
                value: self.text(start, alias_end).to_owned(),
            },
        );
        self.bump_n(equal - self.i);
        self.eat_token(TokenKind::Equal, 1);
        self.eat_space();

        let right = self.parse_expression();
        let err = if right.is_missing_expression() {
            error(message::INVALID_HOST_ALIAS_DEF_MISSING_VALUE_AFTER_EQL_SIGN)
        } else {
            None
        };

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::HostAliasDefinition {
                left: left.boxed(),
                right: right.boxed(),
            },
        )
    }
}

/// Identifier member expression over `names`, or `head` alone when no name
/// was read.
fn collapse(head: Node, names: Vec<Node>, span: rowan::TextRange) -> Node {
    if names.is_empty() {
        return head;
    }
    Node::new(
        span,
        NodeKind::IdentifierMemberExpression {
            left: head.boxed(),
            property_names: names,
        },
    )
}
