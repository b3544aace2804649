//! Struct definitions (`struct Point { x int; y int }`) and `new`
//! expressions (`new Point {x: 1, y: 2}`).
//!
//! `struct` is read as an identifier at the start of a statement; `new` is
//! dispatched from the identifier-led expressions.

use crate::diagnostics::ParsingErrorKind;
use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::{error, error_of};
use crate::parser::scan::{is_alpha, is_ident_char};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    /// The cursor is after the `struct` word.
    pub(crate) fn parse_struct_definition(&mut self, start: usize) -> Node {
        self.token(TokenKind::StructKeyword, start, self.i);
        let keyword_end = self.i;
        self.eat_space();

        let definition = |p: &Self, err, name: Option<Node>, body: Option<Node>| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::StructDefinition {
                    name: name.map(Node::boxed),
                    body: body.map(Node::boxed),
                },
            )
        };
        let unterminated = |msg| error_of(ParsingErrorKind::UnterminatedStructDefinition, msg);

        if !self.peek().is_some_and(|c| is_alpha(c) || c == '_') {
            self.i = keyword_end;
            let err = unterminated(message::UNTERMINATED_STRUCT_DEF_MISSING_NAME_AFTER_KEYWORD);
            return definition(self, err, None, None);
        }

        let name_start = self.i;
        self.bump_while(is_ident_char);
        let name = Node::new(
            self.span_from(name_start),
            NodeKind::PatternIdentifierLiteral {
                name: self.text(name_start, self.i).to_owned(),
                unprefixed: true,
            },
        );
        let name_end = self.i;
        self.eat_space();

        if !self.at(b'{') {
            self.i = name_end;
            let err = unterminated(message::UNTERMINATED_STRUCT_DEF_MISSING_BODY);
            return definition(self, err, Some(name), None);
        }

        let (body, closed) = self.parse_struct_body();
        let err = if closed {
            None
        } else {
            unterminated(message::UNTERMINATED_STRUCT_BODY_MISSING_CLOSING_BRACE)
        };
        definition(self, err, Some(name), Some(body))
    }

    /// `{ field type; fn method() {...} }`. Returns the body and whether it
    /// was closed.
    fn parse_struct_body(&mut self) -> (Node, bool) {
        let start = self.i;
        self.eat_token(TokenKind::OpeningCurlyBracket, 1);
        self.eat_space_newline_semicolon_comment();

        let mut definitions = Vec::new();
        while !self.eof() && !self.at(b'}') {
            let expr = self.parse_expression();
            if expr.is_missing_expression() {
                definitions.push(self.unexpected_char_node(UnexpectedCharContext::StructBody));
                self.eat_space_newline_semicolon_comment();
                continue;
            }

            let definition = match expr.kind {
                NodeKind::IdentifierLiteral { .. } => {
                    let field_start = usize::from(expr.span.start());
                    self.eat_space();
                    let field_type = self.parse_expression_in_pattern(true);
                    Node::new(
                        self.span_from(field_start),
                        NodeKind::StructFieldDefinition {
                            name: expr.boxed(),
                            field_type: Some(field_type.boxed()),
                        },
                    )
                }
                NodeKind::FunctionDeclaration { .. } => expr,
                _ => {
                    let mut expr = expr;
                    if expr.err.is_none() {
                        expr.err = error(
                            message::ONLY_FIELD_AND_METHOD_DEFINITIONS_ARE_ALLOWED_IN_STRUCT_BODY,
                        );
                    }
                    expr
                }
            };
            definitions.push(definition);
            self.eat_space_newline_semicolon_comment();
        }

        let closed = self.eat_token_if(TokenKind::ClosingCurlyBracket, "}");
        let body = Node::new(self.span_from(start), NodeKind::StructBody { definitions });
        (body, closed)
    }

    /// `new Type`, `new Type {field: value}` or `new Type value`. The cursor
    /// is after `new`.
    pub(crate) fn parse_new_expression(&mut self, start: usize) -> Node {
        self.token(TokenKind::NewKeyword, start, self.i);
        let keyword_end = self.i;
        self.eat_space();

        let new = |p: &Self, err, struct_type: Option<Node>, initialization: Option<Node>| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::NewExpression {
                    struct_type: struct_type.map(Node::boxed),
                    initialization: initialization.map(Node::boxed),
                },
            )
        };

        if !self.peek().is_some_and(|c| is_alpha(c) || c == '_') {
            self.i = keyword_end;
            let err = error_of(
                ParsingErrorKind::UnterminatedStructDefinition,
                message::UNTERMINATED_NEW_EXPR_MISSING_TYPE_AFTER_KEYWORD,
            );
            return new(self, err, None, None);
        }

        let struct_type = self.parse_expression_in_pattern(true);
        let type_end = self.i;
        self.eat_space();

        if self.at_expression_end() {
            self.i = type_end;
            return new(self, None, Some(struct_type), None);
        }

        let initialization = if self.at(b'{') {
            self.parse_struct_initialization_literal()
        } else {
            self.parse_expression()
        };
        new(self, None, Some(struct_type), Some(initialization))
    }

    /// `{name: value, ...}` after the type of a `new` expression.
    fn parse_struct_initialization_literal(&mut self) -> Node {
        let start = self.i;
        self.eat_token(TokenKind::OpeningCurlyBracket, 1);
        self.eat_space_newline_comma_comment();

        let mut fields = Vec::new();
        while !self.eof() && !self.at(b'}') {
            let expr = self.parse_expression();
            if expr.is_missing_expression() {
                fields.push(
                    self.unexpected_char_node(UnexpectedCharContext::StructInitializationLiteral),
                );
                self.eat_space_newline_comma_comment();
                continue;
            }

            if !matches!(expr.kind, NodeKind::IdentifierLiteral { .. }) {
                let mut expr = expr;
                if expr.err.is_none() {
                    expr.err = error(message::ONLY_FIELD_INIT_PAIRS_ALLOWED);
                }
                fields.push(expr);
                self.eat_space_newline_comma_comment();
                continue;
            }

            let field_start = usize::from(expr.span.start());
            let name_end = self.i;
            self.eat_space();
            if self.eof() || self.at(b'}') {
                fields.push(Node::new(
                    expr.span,
                    NodeKind::StructFieldInitialization {
                        name: expr.boxed(),
                        value: None,
                    },
                ));
                break;
            }

            if !self.at(b':') {
                self.i = name_end;
                fields.push(Node::with_err(
                    expr.span,
                    error(message::MISSING_COLON_AFTER_FIELD_NAME),
                    NodeKind::StructFieldInitialization {
                        name: expr.boxed(),
                        value: None,
                    },
                ));
                self.eat_space_newline_comma_comment();
                continue;
            }

            self.eat_token(TokenKind::Colon, 1);
            self.eat_space();
            let value = self.parse_expression();
            fields.push(Node::new(
                self.span_from(field_start),
                NodeKind::StructFieldInitialization {
                    name: expr.boxed(),
                    value: Some(value.boxed()),
                },
            ));
            self.eat_space_newline_comma_comment();
        }

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else {
            error_of(
                ParsingErrorKind::UnterminatedStructDefinition,
                message::UNTERMINATED_STRUCT_INIT_LIT_MISSING_CLOSING_BRACE,
            )
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::StructInitializationLiteral { fields },
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::message;
    use crate::parser::tests::{dump, error_messages};

    #[test]
    fn struct_definition() {
        let res = dump("struct Point { x int; fn f() {} }");
        insta::assert_snapshot!(res, @r"
        Chunk [0..33]
          StructDefinition [0..33]
            PatternIdentifierLiteral [7..12] %Point
            StructBody [13..33]
              StructFieldDefinition [15..20]
                IdentifierLiteral [15..16] x
                PatternIdentifierLiteral [17..20] %int
              FunctionDeclaration [22..31]
                FunctionExpression [22..31]
                  Block [29..31]
                IdentifierLiteral [25..26] f
        ");
    }

    #[test]
    fn struct_definition_errors() {
        let messages = error_messages("struct {}");
        assert_eq!(messages, vec![message::UNTERMINATED_STRUCT_DEF_MISSING_NAME_AFTER_KEYWORD]);

        let messages = error_messages("struct Point");
        assert_eq!(messages, vec![message::UNTERMINATED_STRUCT_DEF_MISSING_BODY]);

        let messages = error_messages("struct Point { x int");
        assert_eq!(messages, vec![message::UNTERMINATED_STRUCT_BODY_MISSING_CLOSING_BRACE]);

        let messages = error_messages("struct Point { 1 }");
        assert_eq!(
            messages,
            vec![message::ONLY_FIELD_AND_METHOD_DEFINITIONS_ARE_ALLOWED_IN_STRUCT_BODY]
        );
    }

    #[test]
    fn new_expression() {
        let res = dump("new Point {x: 1}");
        insta::assert_snapshot!(res, @r"
        Chunk [0..16]
          NewExpression [0..16]
            PatternIdentifierLiteral [4..9] %Point
            StructInitializationLiteral [10..16]
              StructFieldInitialization [11..15]
                IdentifierLiteral [11..12] x
                IntLiteral [14..15] 1
        ");
    }

    #[test]
    fn new_expression_errors() {
        let messages = error_messages("new");
        assert_eq!(messages, vec![message::UNTERMINATED_NEW_EXPR_MISSING_TYPE_AFTER_KEYWORD]);

        let messages = error_messages("new Point {x: 1");
        assert_eq!(messages, vec![message::UNTERMINATED_STRUCT_INIT_LIT_MISSING_CLOSING_BRACE]);

        let messages = error_messages("new Point {x 1}");
        assert_eq!(
            messages,
            vec![message::MISSING_COLON_AFTER_FIELD_NAME, message::ONLY_FIELD_INIT_PAIRS_ALLOWED]
        );

        assert!(error_messages("new Point").is_empty());
    }
}
