//! `const` and `var` declarations.
//!
//! Both come in a single form (`const a = 1`) and a parenthesized list form
//! (`var (a = 1; b %int = 2)`). A declaration without `=` is kept with an
//! absent right side.

use crate::diagnostics::message;
use crate::diagnostics::{ParsingError, ParsingErrorKind};
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::{error, error_of};
use crate::parser::scan::is_alpha;
use crate::parser::token::TokenKind;

use super::reject_keyword_name;

#[derive(Clone, Copy, PartialEq, Eq)]
enum DeclarationKind {
    GlobalConstant,
    LocalVariable,
}

impl Parser<'_, '_> {
    /// `const ...` at the top of a chunk, `None` when the keyword is absent.
    pub(super) fn parse_global_constant_declarations(&mut self) -> Option<Node> {
        if !self.at_word("const") {
            return None;
        }
        let start = self.i;
        self.eat_token(TokenKind::ConstKeyword, "const".len());
        self.eat_space();

        let (declarations, err) = self.parse_declaration_list(DeclarationKind::GlobalConstant);
        Some(Node::with_err(
            self.span_from(start),
            err,
            NodeKind::GlobalConstantDeclarations { declarations },
        ))
    }

    /// Declarations after `var`, the keyword is consumed.
    pub(super) fn parse_local_variable_declarations(&mut self, start: usize) -> Node {
        self.eat_space();

        let (declarations, err) = if self.eof() || self.at(b'\n') {
            (Vec::new(), error(message::UNTERMINATED_LOCAL_VAR_DECLS))
        } else {
            self.parse_declaration_list(DeclarationKind::LocalVariable)
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::LocalVariableDeclarations { declarations },
        )
    }

    fn parse_declaration_list(
        &mut self,
        kind: DeclarationKind,
    ) -> (Vec<Node>, Option<ParsingError>) {
        let (unterminated, missing_paren) = match kind {
            DeclarationKind::GlobalConstant => (
                message::UNTERMINATED_GLOBAL_CONS_DECLS,
                message::INVALID_GLOBAL_CONST_DECLS_MISSING_CLOSING_PAREN,
            ),
            DeclarationKind::LocalVariable => (
                message::UNTERMINATED_LOCAL_VAR_DECLS,
                message::UNTERMINATED_LOCAL_VAR_DECLS_MISSING_CLOSING_PAREN,
            ),
        };

        let mut declarations = Vec::new();
        match self.peek() {
            None => return (declarations, error(unterminated)),
            Some(c) if is_alpha(c) || c == '_' => {
                declarations.push(self.parse_declaration(kind));
                return (declarations, None);
            }
            Some('(') => self.eat_token(TokenKind::OpeningParenthesis, 1),
            Some(_) => return (declarations, error(unterminated)),
        }

        loop {
            self.eat_space_newline_semicolon_comment();
            match self.peek() {
                None => return (declarations, error(missing_paren)),
                Some(')') => break,
                Some(_) => declarations.push(self.parse_declaration(kind)),
            }
        }
        self.eat_token(TokenKind::ClosingParenthesis, 1);
        (declarations, None)
    }

    /// `name [type] = value`; the type annotation is only allowed on local
    /// variables.
    fn parse_declaration(&mut self, kind: DeclarationKind) -> Node {
        self.consume_fuel();
        let mut left = self.parse_expression();
        let start = usize::from(left.span.start());
        reject_keyword_name(&mut left);

        let name = left.ident_name().map(str::to_owned);
        let mut err = match (&name, kind) {
            (Some(_), _) => None,
            (None, DeclarationKind::GlobalConstant) => {
                error(message::INVALID_GLOBAL_CONST_DECL_LHS_MUST_BE_AN_IDENT)
            }
            (None, DeclarationKind::LocalVariable) => {
                error(message::INVALID_LOCAL_VAR_DECL_LHS_MUST_BE_AN_IDENT)
            }
        };
        self.eat_space();

        let mut type_annotation = None;
        if kind == DeclarationKind::LocalVariable
            && !self.eof()
            && !self.at(b'=')
            && !self.at(b'\n')
            && !self.at(b')')
        {
            let annotation = if self.at(b'%') {
                self.parse_percent_prefixed_pattern(false)
            } else {
                self.parse_expression_in_pattern(true)
            };
            if !annotation.is_missing_expression() {
                type_annotation = Some(annotation);
                self.eat_space();
            }
        }

        if !self.at(b'=') {
            if err.is_none() {
                let msg = match (&type_annotation, kind) {
                    (Some(_), _) => message::EQUAL_SIGN_MISSING_AFTER_TYPE_ANNOTATION.to_owned(),
                    (None, DeclarationKind::GlobalConstant) => {
                        message::fmt_invalid_const_decl_missing_equals_sign(
                            name.as_deref().unwrap_or_default(),
                        )
                    }
                    (None, DeclarationKind::LocalVariable) => {
                        message::fmt_invalid_local_var_decl_missing_equals_sign(
                            name.as_deref().unwrap_or_default(),
                        )
                    }
                };
                err = error_of(ParsingErrorKind::MissingEqualsSignInDeclaration, msg);
            }
            if !self.at(b'\n') && !self.at(b')') {
                self.eat_unexpected_char();
            }
            let right = self.absent();
            return self.declaration(kind, start, err, left, type_annotation, right, false);
        }

        self.eat_token(TokenKind::Equal, 1);
        self.eat_space();
        let right = self.parse_expression();
        self.declaration(kind, start, err, left, type_annotation, right, true)
    }

    #[allow(clippy::too_many_arguments)]
    fn declaration(
        &self,
        kind: DeclarationKind,
        start: usize,
        err: Option<ParsingError>,
        left: Node,
        type_annotation: Option<Node>,
        right: Node,
        has_value: bool,
    ) -> Node {
        let span = self.span_from(start);
        match kind {
            DeclarationKind::GlobalConstant => Node::with_err(
                span,
                err,
                NodeKind::GlobalConstantDeclaration {
                    left: left.boxed(),
                    right: right.boxed(),
                },
            ),
            DeclarationKind::LocalVariable => Node::with_err(
                span,
                err,
                NodeKind::LocalVariableDeclaration {
                    left: left.boxed(),
                    type_annotation: type_annotation.map(Node::boxed),
                    right: has_value.then(|| right.boxed()),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::message;
    use crate::parser::tests::{dump, error_messages};

    #[test]
    fn single_local_variable() {
        let res = dump("var a = 1");
        insta::assert_snapshot!(res, @r"
        Chunk [0..9]
          LocalVariableDeclarations [0..9]
            LocalVariableDeclaration [4..9]
              IdentifierLiteral [4..5] a
              IntLiteral [8..9] 1
        ");
    }

    #[test]
    fn local_variable_missing_equals_sign() {
        let res = dump("var a");
        insta::assert_snapshot!(res, @r"
        Chunk [0..5]
          LocalVariableDeclarations [0..5]
            LocalVariableDeclaration [4..5] !! invalid local variable declaration, missing '=' sign after name a
              IdentifierLiteral [4..5] a
        ");
    }

    #[test]
    fn parenthesized_constants() {
        let res = dump("const (\n  a = 1\n  b = 2\n)");
        insta::assert_snapshot!(res, @r"
        Chunk [0..25]
          GlobalConstantDeclarations [0..25]
            GlobalConstantDeclaration [10..15]
              IdentifierLiteral [10..11] a
              IntLiteral [14..15] 1
            GlobalConstantDeclaration [18..23]
              IdentifierLiteral [18..19] b
              IntLiteral [22..23] 2
        ");
    }

    #[test]
    fn keyword_as_declared_name() {
        let expected = vec![message::KEYWORDS_SHOULD_NOT_BE_USED_IN_ASSIGNMENT_LHS];
        assert_eq!(error_messages("var if = 1"), expected);
        assert_eq!(error_messages("const (if = 1)"), expected);
        assert_eq!(error_messages("var (a = 1; return = 2)"), expected);
    }
}
