//! Object, record, list, tuple and dictionary literals.

use crate::diagnostics::ParsingErrorKind;
use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::{error, error_of};
use crate::parser::scan::{is_closing_delim, is_comment_first_space, is_metadata_key};
use crate::parser::token::TokenKind;

/// Key of an object or record entry, as read before the colon.
enum EntryKey {
    /// Identifier or quoted string: `name: value`.
    Explicit { key: Node, name: String },
    /// Any other expression, which is the value of an unnamed entry.
    Implicit(Node),
}

impl Parser<'_, '_> {
    /// `{...}` or `#{...}`, the cursor is at `{` or `#`.
    pub(crate) fn parse_object_or_record_literal(&mut self, is_record: bool) -> Node {
        self.nested(|p| p.parse_object_or_record_literal_inner(is_record))
    }

    fn parse_object_or_record_literal_inner(&mut self, is_record: bool) -> Node {
        let start = self.i;
        if is_record {
            self.eat_token(TokenKind::OpeningRecordBracket, 2);
        } else {
            self.eat_token(TokenKind::OpeningCurlyBracket, 1);
        }

        let saved = std::mem::replace(&mut self.in_pattern, false);
        let mut elements = Vec::new();

        self.eat_space_newline_comma_comment();
        while let Some(c) = self.peek() {
            if c == '}' || is_closing_delim(c) {
                break;
            }

            let element = if self.at_str("...") {
                self.parse_property_spread_element()
            } else {
                self.parse_object_entry(is_record)
            };
            elements.push(element);
            self.eat_space_newline_comma_comment();
        }
        self.in_pattern = saved;

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else if is_record {
            error(message::UNTERMINATED_REC_MISSING_CLOSING_BRACE)
        } else {
            error(message::UNTERMINATED_OBJ_MISSING_CLOSING_BRACE)
        };

        let kind = if is_record {
            NodeKind::RecordLiteral { elements }
        } else {
            NodeKind::ObjectLiteral { elements }
        };
        Node::with_err(self.span_from(start), err, kind)
    }

    /// `...$obj.{a, b}`: only extraction expressions can be spread.
    fn parse_property_spread_element(&mut self) -> Node {
        let start = self.i;
        self.eat_token(TokenKind::ThreeDots, 3);
        self.eat_space();

        let expr = self.parse_expression();
        let mut err = if matches!(expr.kind, NodeKind::ExtractionExpression { .. }) {
            None
        } else {
            error_of(
                ParsingErrorKind::ExtractionExpressionExpected,
                message::fmt_invalid_spread_elem_expr_should_be_extr_expr_not(expr.kind.name()),
            )
        };

        let end = usize::from(expr.span.end());
        self.eat_space();
        if !self.eof() && !self.at_entry_end() {
            err = error(message::INVALID_OBJ_REC_LIT_SPREAD_SEPARATION);
        }

        Node::with_err(
            self.range(start, end),
            err,
            NodeKind::PropertySpreadElement { expr: expr.boxed() },
        )
    }

    fn parse_object_entry(&mut self, is_record: bool) -> Node {
        let start = self.i;
        let checkpoint = self.token_checkpoint();
        let key = self.parse_expression();

        if key.is_missing_expression() {
            let mut invalid = self.unexpected_char_node(UnexpectedCharContext::ObjectRecord);
            invalid.kind = NodeKind::InvalidObjectElement;
            return invalid;
        }

        let parenthesized = self
            .tokens
            .get(checkpoint)
            .is_some_and(|t| {
                t.kind == TokenKind::OpeningParenthesis && usize::from(t.span.start()) == start
            });

        let name = match &key.kind {
            _ if parenthesized || key.is_parenthesized => None,
            NodeKind::IdentifierLiteral { name } => Some(name.clone()),
            NodeKind::QuotedStringLiteral { value, .. } => Some(value.clone()),
            _ => None,
        };
        let entry_key = match name {
            Some(name) => EntryKey::Explicit { key, name },
            None => EntryKey::Implicit(key),
        };

        self.eat_space();

        match entry_key {
            EntryKey::Implicit(value) => self.parse_implicit_key_entry(start, value),
            EntryKey::Explicit { key, name } => {
                if is_metadata_key(&name) && !is_record && self.at(b'{') {
                    return self.parse_object_meta_property(start, key);
                }
                self.parse_explicit_key_entry(start, key, &name, is_record)
            }
        }
    }

    /// Value without key: `{1, "a"}`.
    fn parse_implicit_key_entry(&mut self, start: usize, value: Node) -> Node {
        let end = usize::from(value.span.end());
        let property = |parser: &Self, value: Node, type_annotation: Option<Box<Node>>, end, err| {
            Node::with_err(
                parser.range(start, end),
                err,
                NodeKind::ObjectProperty {
                    key: None,
                    type_annotation,
                    value: value.boxed(),
                },
            )
        };

        match self.peek() {
            None => property(self, value, None, end, None),
            Some('%') => {
                let annotation = self.parse_percent_prefixed_pattern(false);
                let end = usize::from(annotation.span.end());
                property(
                    self,
                    value,
                    Some(annotation.boxed()),
                    end,
                    error(message::ONLY_EXPLICIT_KEY_CAN_HAVE_A_TYPE_ANNOT),
                )
            }
            Some(':') => {
                let err = error(message::fmt_only_idents_and_strings_valid_obj_record_keys_not(
                    value.kind.name(),
                ));
                self.eat_token(TokenKind::Colon, 1);
                self.eat_space();
                if self.at_entry_end() {
                    return property(self, value, None, self.i, err);
                }
                let actual = self.parse_expression();
                let end = usize::from(actual.span.end());
                property(self, actual, None, end, err)
            }
            Some(c) if self.at_entry_end() || is_closing_delim(c) => {
                property(self, value, None, end, None)
            }
            Some(_) => property(
                self,
                value,
                None,
                end,
                error(message::INVALID_OBJ_REC_LIT_ENTRY_SEPARATION),
            ),
        }
    }

    /// `_name_ { statements }`.
    fn parse_object_meta_property(&mut self, start: usize, key: Node) -> Node {
        let block = self.parse_block();
        let statements = match block.kind {
            NodeKind::Block { statements } => statements,
            _ => Vec::new(),
        };
        let initialization = Node::with_err(
            block.span,
            block.err,
            NodeKind::InitializationBlock { statements },
        );
        Node::new(
            self.range(start, usize::from(initialization.span.end())),
            NodeKind::ObjectMetaProperty {
                key: key.boxed(),
                initialization: initialization.boxed(),
            },
        )
    }

    /// `name: value` or `name %T: value`.
    fn parse_explicit_key_entry(
        &mut self,
        start: usize,
        key: Node,
        name: &str,
        is_record: bool,
    ) -> Node {
        let mut err = None;

        let mut type_annotation = None;
        if self.at(b'%') && !is_record {
            let annotation = self.parse_percent_prefixed_pattern(false);
            if is_metadata_key(name) {
                err = error(message::METAPROP_KEY_CANNOT_HAVE_A_TYPE_ANNOT);
            }
            type_annotation = Some(annotation.boxed());
            self.eat_space();
        }

        let key_end = type_annotation
            .as_ref()
            .map_or(usize::from(key.span.end()), |t| usize::from(t.span.end()));
        let property = |parser: &Self, key: Node, type_annotation, value: Node, end: usize, err| {
            Node::with_err(
                parser.range(start, end.max(key_end)),
                err,
                NodeKind::ObjectProperty {
                    key: Some(key.boxed()),
                    type_annotation,
                    value: value.boxed(),
                },
            )
        };

        if !self.at(b':') {
            let msg = if type_annotation.is_some() {
                message::fmt_invalid_obj_key_missing_colon_after_type_annotation(name)
            } else {
                message::fmt_invalid_obj_record_key_missing_colon_after_key(name)
            };
            let value = self.missing_at(key_end);
            return property(self, key, type_annotation, value, key_end, err.or(error(msg)));
        }

        self.eat_token(TokenKind::Colon, 1);
        self.eat_space();

        if self.at(b'#') && self.char_at(self.i + 1).is_some_and(is_comment_first_space) {
            self.eat_space_newline_comment();
            err = error(message::fmt_invalid_obj_record_key_comment_before_value_of_key(name));
        }

        match self.peek() {
            None | Some('}' | ',') => {
                let err = err.or_else(|| {
                    error_of(
                        ParsingErrorKind::MissingObjectPropertyValue,
                        message::MISSING_PROPERTY_VALUE,
                    )
                });
                let value = self.absent();
                return property(self, key, type_annotation, value, self.i, err);
            }
            Some('\n') => {
                let value = self.absent();
                return property(
                    self,
                    key,
                    type_annotation,
                    value,
                    self.i,
                    error(message::UNEXPECTED_NEWLINE_AFTER_COLON),
                );
            }
            Some(_) => {}
        }

        let value = self.parse_expression();
        if value.is_missing_expression() {
            let unexpected = self.unexpected_char_node(UnexpectedCharContext::ObjectRecord);
            let err = err.or(unexpected.err);
            return property(self, key, type_annotation, value, self.i, err);
        }

        let end = usize::from(value.span.end());
        self.eat_space();
        let separated = self.at_entry_end() || self.peek().is_some_and(is_closing_delim);
        if !separated && err.is_none() {
            err = error(message::INVALID_OBJ_REC_LIT_ENTRY_SEPARATION);
        }
        property(self, key, type_annotation, value, end, err)
    }

    /// `[...]`, `#[...]` or typed `[]%int[...]`, the cursor is at `[` or `#`.
    pub(crate) fn parse_list_or_tuple_literal(&mut self, is_tuple: bool) -> Node {
        self.nested(|p| p.parse_list_or_tuple_literal_inner(is_tuple))
    }

    fn parse_list_or_tuple_literal_inner(&mut self, is_tuple: bool) -> Node {
        let start = self.i;
        if is_tuple {
            self.eat_token(TokenKind::OpeningTupleBracket, 2);
        } else {
            self.eat_token(TokenKind::OpeningBracket, 1);
        }

        let saved = std::mem::replace(&mut self.in_pattern, false);
        let mut type_annotation = None;
        let mut elements = Vec::new();
        let mut err = None;

        if self.at(b']') && self.byte(1) == Some(b'%') {
            self.eat_token(TokenKind::ClosingBracket, 1);
            type_annotation = Some(self.parse_percent_prefixed_pattern(false).boxed());
            if !self.eat_token_if(TokenKind::OpeningBracket, "[") {
                err = error(message::UNTERMINATED_LIST_LIT_MISSING_OPENING_BRACKET_AFTER_TYPE);
            }
        }

        if err.is_none() {
            self.parse_list_elements(&mut elements);
            if !self.eat_token_if(TokenKind::ClosingBracket, "]") {
                err = error(message::UNTERMINATED_LIST_LIT_MISSING_CLOSING_BRACKET);
            }
        }
        self.in_pattern = saved;

        let kind = if is_tuple {
            NodeKind::TupleLiteral {
                type_annotation,
                elements,
            }
        } else {
            NodeKind::ListLiteral {
                type_annotation,
                elements,
            }
        };
        Node::with_err(self.span_from(start), err, kind)
    }

    fn parse_list_elements(&mut self, elements: &mut Vec<Node>) {
        while !self.eof() && !self.at(b']') {
            self.eat_space_newline_comma_comment();
            if self.eof() || self.at(b']') {
                break;
            }

            let element_start = self.i;
            let is_spread = self.eat_token_if(TokenKind::ThreeDots, "...");
            let expr = self.parse_expression();

            if is_spread {
                let err = if expr.is_missing_expression() {
                    error(message::UNTERMINATED_SPREAD_ELEM_MISSING_EXPR)
                } else {
                    None
                };
                elements.push(Node::with_err(
                    self.range(element_start, usize::from(expr.span.end())),
                    err,
                    NodeKind::ElementSpreadElement { expr: expr.boxed() },
                ));
            } else if expr.is_missing_expression() {
                if !self.at(b',') {
                    break;
                }
                elements.push(expr);
            } else {
                elements.push(expr);
            }

            self.eat_space_newline_comma_comment();
        }
    }

    /// `:{key: value, ...}`, keys are simple value literals.
    pub(crate) fn parse_dictionary_literal(&mut self) -> Node {
        self.nested(|p| p.parse_dictionary_literal_inner())
    }

    fn parse_dictionary_literal_inner(&mut self) -> Node {
        let start = self.i;
        self.eat_token(TokenKind::OpeningDictionaryBracket, 2);

        let saved = std::mem::replace(&mut self.in_pattern, false);
        let mut entries = Vec::new();

        while !self.eof() && !self.at(b'}') {
            self.eat_space_newline_comma_comment();
            if self.eof() || self.at(b'}') {
                break;
            }
            if self.peek().is_some_and(is_closing_delim) {
                break;
            }
            entries.push(self.parse_dictionary_entry());
            self.eat_space_newline_comma_comment();
        }
        self.in_pattern = saved;

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else {
            error(message::UNTERMINATED_DICT_MISSING_CLOSING_BRACE)
        };
        Node::with_err(self.span_from(start), err, NodeKind::DictionaryLiteral { entries })
    }

    fn parse_dictionary_entry(&mut self) -> Node {
        let start = self.i;
        let mut key = self.parse_expression();

        if key.is_missing_expression() {
            let unexpected = self.unexpected_char_node(UnexpectedCharContext::Dictionary);
            return Node::with_err(
                self.span_from(start),
                unexpected.err,
                NodeKind::DictionaryEntry {
                    key: key.boxed(),
                    value: None,
                },
            );
        }

        let mut err = None;
        if key.err.is_none() {
            if !key.is_simple_value_literal() {
                key.err = error(message::INVALID_DICT_KEY_ONLY_SIMPLE_VALUE_LITS);
            } else if self.text(start, usize::from(key.span.end())).ends_with(':') {
                err = error(message::INVALID_DICT_ENTRY_MISSING_SPACE_BETWEEN_KEY_AND_COLON);
            }
        }

        let entry = |parser: &Self, key: Node, value: Option<Node>, err| {
            let end = value
                .as_ref()
                .map_or(usize::from(key.span.end()), |v| usize::from(v.span.end()));
            Node::with_err(
                parser.range(start, end),
                err,
                NodeKind::DictionaryEntry {
                    key: key.boxed(),
                    value: value.map(Node::boxed),
                },
            )
        };

        self.eat_space();
        if err.is_some() {
            return entry(self, key, None, err);
        }

        match self.peek() {
            None | Some('}' | ',') => {
                let err = error(message::INVALID_DICT_ENTRY_MISSING_COLON_AFTER_KEY);
                return entry(self, key, None, err);
            }
            Some(':') => self.eat_token(TokenKind::Colon, 1),
            Some(c) => {
                self.eat_unexpected_char();
                return entry(
                    self,
                    key,
                    None,
                    error(message::fmt_unexpected_char(c, UnexpectedCharContext::Dictionary)),
                );
            }
        }

        self.eat_space();
        if self.eof() || self.at(b'}') {
            return entry(self, key, None, None);
        }

        let value = self.parse_expression();
        if value.is_missing_expression() {
            let c = self.peek();
            while self.peek().is_some_and(|c| c != '}' && c != ',') {
                self.eat_unexpected_char();
            }
            let err = c.and_then(|c| {
                error(message::fmt_unexpected_char(c, UnexpectedCharContext::Dictionary))
            });
            return entry(self, key, Some(value), err);
        }

        self.eat_space();
        let err = if self.eof() || self.at_entry_end() {
            None
        } else {
            error(message::INVALID_DICT_LIT_ENTRY_SEPARATION)
        };
        entry(self, key, Some(value), err)
    }
}
