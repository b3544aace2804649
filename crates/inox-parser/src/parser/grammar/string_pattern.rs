//! Complex string patterns: `%str("a"+ name:(|"x" | "y") 'a'..'z'=3)`.

use crate::diagnostics::message;
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind, OccurrenceCountModifier};
use crate::parser::core::error;
use crate::parser::scan::{is_alpha, is_dec_digit, is_delim, is_ident_char};
use crate::parser::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PieceKind {
    /// `%str(...)`, the `%str` token is already emitted.
    Root,
    /// `(...)` nested in another piece.
    Parenthesized,
    /// One case of a `(| ... )` union, ends at `|` or `)`.
    UnionCase,
}

impl Parser<'_, '_> {
    /// Parses the parenthesized part of `%str(...)`, the cursor is at `(`.
    pub(crate) fn parse_complex_string_pattern_piece(&mut self, start: usize) -> Node {
        self.assert_at(b'(');
        let saved = std::mem::replace(&mut self.in_pattern, true);
        let piece = self.parse_string_pattern_piece(start, PieceKind::Root);
        self.in_pattern = saved;
        piece
    }

    fn parse_string_pattern_piece(&mut self, start: usize, kind: PieceKind) -> Node {
        self.nested(|p| p.parse_string_pattern_piece_inner(start, kind))
    }

    fn parse_string_pattern_piece_inner(&mut self, start: usize, kind: PieceKind) -> Node {
        self.consume_fuel();
        if kind != PieceKind::UnionCase {
            self.eat_token(TokenKind::OpeningParenthesis, 1);
        }

        let mut elements = Vec::new();
        let piece_end =
            |p: &Self| p.eof() || p.at(b')') || (kind == PieceKind::UnionCase && p.at(b'|'));

        while !piece_end(self) {
            self.eat_space_newline_comment();
            if piece_end(self) {
                break;
            }

            if self.at(b'|') {
                let union = self.parse_string_pattern_union(self.i, true);
                elements.push(Node::new(
                    union.span,
                    NodeKind::PatternPieceElement {
                        quantifier: OccurrenceCountModifier::ExactlyOne,
                        exact_occurrence_count: 0,
                        expr: union.boxed(),
                        group_name: None,
                    },
                ));
                break;
            }

            elements.push(self.parse_string_pattern_element());
        }

        let mut err = None;
        if kind != PieceKind::UnionCase
            && !self.eat_token_if(TokenKind::ClosingParenthesis, ")")
        {
            err = error(message::UNTERMINATED_COMPLEX_STRING_PATT_MISSING_CLOSING_BRACKET);
        }

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::ComplexStringPatternPiece { elements },
        )
    }

    /// `[group:] atom [occurrence]`.
    fn parse_string_pattern_element(&mut self) -> Node {
        let start = self.i;
        let group_name = self.parse_string_pattern_group_name();

        let expr = self.parse_string_pattern_atom();
        let mut quantifier = OccurrenceCountModifier::ExactlyOne;
        let mut exact_occurrence_count = 0;
        let mut err = None;

        let modifier_start = self.i;
        match self.peek() {
            Some(c @ ('+' | '*' | '?')) => {
                quantifier = match c {
                    '+' => OccurrenceCountModifier::AtLeastOne,
                    '*' => OccurrenceCountModifier::ZeroOrMore,
                    _ => OccurrenceCountModifier::OptionalOccurrence,
                };
                self.bump();
                self.token_raw(TokenKind::OccurrenceModifier, modifier_start, self.i);
            }
            Some('=') => {
                self.bump();
                let count_start = self.i;
                self.bump_while(is_dec_digit);
                if count_start == self.i {
                    err = error(message::UNTERMINATED_PATT_UNTERMINATED_EXACT_OCURRENCE_COUNT);
                } else {
                    match self.text(count_start, self.i).parse::<u32>() {
                        Ok(count) => exact_occurrence_count = count,
                        Err(_) => err = error(message::INVALID_PATTERN_INVALID_OCCURENCE_COUNT),
                    }
                    quantifier = OccurrenceCountModifier::ExactOccurrenceCount;
                    self.token_raw(TokenKind::OccurrenceModifier, modifier_start, self.i);
                }
            }
            _ => {}
        }

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::PatternPieceElement {
                quantifier,
                exact_occurrence_count,
                expr: expr.boxed(),
                group_name: group_name.map(Node::boxed),
            },
        )
    }

    /// `name:` before an element. Leaves the cursor untouched when the word is
    /// not followed by a colon.
    fn parse_string_pattern_group_name(&mut self) -> Option<Node> {
        if !self.peek().is_some_and(is_alpha) {
            return None;
        }
        let name_len = self
            .rest()
            .find(|c: char| !(is_alpha(c) || is_dec_digit(c) || c == '_' || c == '-'))?;
        if self.byte(name_len) != Some(b':') {
            return None;
        }

        let start = self.i;
        self.bump_n(name_len);
        let name = self.text(start, self.i).to_owned();
        let err = if name.ends_with('-') {
            error(message::INVALID_GROUP_NAME_SHOULD_NOT_END_WITH_DASH)
        } else {
            None
        };
        let group_name =
            Node::with_err(self.span_from(start), err, NodeKind::PatternGroupName { name });

        self.eat_token(TokenKind::Colon, 1);
        self.eat_space();
        Some(group_name)
    }

    fn parse_string_pattern_atom(&mut self) -> Node {
        let start = self.i;
        let Some(c) = self.peek() else {
            return self.expected_string_pattern_here();
        };

        match c {
            ')' | '|' => self.expected_string_pattern_here(),
            '(' if matches!(self.byte(1), None | Some(b')')) => {
                self.eat_token(TokenKind::OpeningParenthesis, 1);
                Node::with_err(
                    self.span_from(start),
                    error(message::fmt_a_pattern_was_expected_here(self.s, self.i)),
                    NodeKind::InvalidComplexStringPatternElement,
                )
            }
            '(' if self.byte(1) == Some(b'|') => {
                self.eat_token(TokenKind::OpeningParenthesis, 1);
                self.parse_string_pattern_union(start, false)
            }
            '(' => self.parse_string_pattern_piece(start, PieceKind::Parenthesized),
            '"' | '`' | '\'' => self.parse_expression(),
            '-' | '0'..='9' => {
                let expr = self.parse_expression();
                if matches!(expr.kind, NodeKind::IntegerRangeLiteral { .. }) {
                    expr
                } else {
                    Node::with_err(
                        expr.span,
                        error(message::INVALID_COMPLEX_PATTERN_ELEMENT),
                        NodeKind::InvalidComplexStringPatternElement,
                    )
                }
            }
            c if is_alpha(c) => {
                self.bump_while(is_ident_char);
                Node::new(
                    self.span_from(start),
                    NodeKind::PatternIdentifierLiteral {
                        name: self.text(start, self.i).to_owned(),
                        unprefixed: true,
                    },
                )
            }
            '%' if self.byte(1) == Some(b'`') => self.parse_percent_prefixed_pattern(false),
            _ => {
                self.bump_while(|c| !is_delim(c) && c != '"' && c != '\'');
                if self.i == start {
                    self.eat_unexpected_char();
                    return Node::with_err(
                        self.span_from(start),
                        error(message::fmt_a_pattern_was_expected_here(self.s, start)),
                        NodeKind::InvalidComplexStringPatternElement,
                    );
                }
                Node::with_err(
                    self.span_from(start),
                    error(message::INVALID_COMPLEX_PATTERN_ELEMENT),
                    NodeKind::InvalidComplexStringPatternElement,
                )
            }
        }
    }

    fn expected_string_pattern_here(&self) -> Node {
        Node::with_err(
            self.range(self.i, self.i),
            error(message::fmt_a_pattern_was_expected_here(self.s, self.i)),
            NodeKind::InvalidComplexStringPatternElement,
        )
    }

    /// `(| a | b)` or the shorthand `| a | b` at the end of a piece. The
    /// opening parenthesis, if any, is already consumed.
    fn parse_string_pattern_union(&mut self, start: usize, shorthand: bool) -> Node {
        let mut cases = Vec::new();

        while !self.eof() && !self.at(b')') {
            self.eat_space_newline_comment();
            if self.eof() || self.at(b')') {
                break;
            }

            if !self.at(b'|') {
                self.bump_while(|c| c != ')');
                return Node::with_err(
                    self.span_from(start),
                    error(message::INVALID_PATT_UNION_ELEMENT_SEPARATOR_EXPLANATION),
                    NodeKind::PatternUnion { cases },
                );
            }
            self.eat_token(TokenKind::PatternUnionPipe, 1);
            self.eat_space_newline_comment();

            if self.eof() || self.at(b')') || self.at(b'|') {
                cases.push(self.expected_string_pattern_here());
                continue;
            }

            let piece = self.parse_string_pattern_piece(self.i, PieceKind::UnionCase);
            cases.push(simplify_union_case(piece));
        }

        let err = if shorthand || self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
            None
        } else {
            error(message::UNTERMINATED_UNION_MISSING_CLOSING_PAREN)
        };
        Node::with_err(self.span_from(start), err, NodeKind::PatternUnion { cases })
    }
}

/// A union case made of a single plain element is the element's atom.
fn simplify_union_case(piece: Node) -> Node {
    if piece.err.is_some() {
        return piece;
    }
    let NodeKind::ComplexStringPatternPiece { mut elements } = piece.kind else {
        return piece;
    };
    let plain = matches!(
        elements.as_slice(),
        [Node {
            err: None,
            kind: NodeKind::PatternPieceElement {
                quantifier: OccurrenceCountModifier::ExactlyOne,
                group_name: None,
                ..
            },
            ..
        }]
    );
    match elements.pop() {
        Some(Node {
            kind: NodeKind::PatternPieceElement { expr, .. },
            ..
        }) if plain => *expr,
        Some(element) => {
            elements.push(element);
            Node::new(piece.span, NodeKind::ComplexStringPatternPiece { elements })
        }
        None => Node::new(piece.span, NodeKind::ComplexStringPatternPiece { elements }),
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::dump;

    #[test]
    fn string_elements() {
        let res = dump(r#"%str("a" "b")"#);
        insta::assert_snapshot!(res, @r#"
        Chunk [0..13]
          ComplexStringPatternPiece [0..13]
            PatternPieceElement [5..8] quantifier=ExactlyOne
              QuotedStringLiteral [5..8] "a"
            PatternPieceElement [9..12] quantifier=ExactlyOne
              QuotedStringLiteral [9..12] "b"
        "#);
    }
}
