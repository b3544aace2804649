//! Parenthesized, unary and binary expressions.
//!
//! Binary expressions are always parenthesized: `(a + b)`. Inside the
//! parentheses, `and`/`or` join terms into a left-associative chain; mixing
//! the two in one chain is reported on the outermost node.

use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::parser::Parser;
use crate::parser::ast::{BinaryOperator, Node, NodeKind, UnaryOperator};
use crate::parser::core::error;
use crate::parser::scan::{is_alpha, is_dec_digit, is_ident_char, is_unpaired_or_closing_delim};
use crate::parser::token::TokenKind;

/// Result of reading the text where a binary operator is expected.
enum OperatorScan {
    Valid(BinaryOperator),
    /// The text is not an operator; an `InvalidOperator` token was pushed.
    Invalid,
    /// `?`, `!` or `=` directly followed by the end of the operand.
    MissingOperand,
    /// An operand starts where the operator should be.
    MissingOperator,
}

const SYMBOL_OPERATORS: &[(&str, BinaryOperator, TokenKind)] = &[
    ("+", BinaryOperator::Add, TokenKind::Plus),
    ("+.", BinaryOperator::AddDot, TokenKind::PlusDot),
    ("-", BinaryOperator::Sub, TokenKind::Minus),
    ("-.", BinaryOperator::SubDot, TokenKind::MinusDot),
    ("*", BinaryOperator::Mul, TokenKind::Asterisk),
    ("*.", BinaryOperator::MulDot, TokenKind::AsteriskDot),
    ("/", BinaryOperator::Div, TokenKind::Slash),
    ("/.", BinaryOperator::DivDot, TokenKind::SlashDot),
    ("\\", BinaryOperator::SetDifference, TokenKind::AntiSlash),
    ("<", BinaryOperator::Less, TokenKind::LessThan),
    ("<.", BinaryOperator::LessDot, TokenKind::LessThanDot),
    ("<=", BinaryOperator::LessOrEqual, TokenKind::LessOrEqual),
    ("<=.", BinaryOperator::LessOrEqualDot, TokenKind::LessOrEqualDot),
    (">", BinaryOperator::Greater, TokenKind::GreaterThan),
    (">.", BinaryOperator::GreaterDot, TokenKind::GreaterThanDot),
    (">=", BinaryOperator::GreaterOrEqual, TokenKind::GreaterOrEqual),
    (">=.", BinaryOperator::GreaterOrEqualDot, TokenKind::GreaterOrEqualDot),
    ("==", BinaryOperator::Equal, TokenKind::EqualEqual),
    ("!=", BinaryOperator::NotEqual, TokenKind::ExclamationMarkEqual),
    ("??", BinaryOperator::NilCoalescing, TokenKind::DoubleQuestionMark),
    (".", BinaryOperator::Dot, TokenKind::Dot),
    ("..", BinaryOperator::Range, TokenKind::TwoDots),
    ("..<", BinaryOperator::ExclEndRange, TokenKind::DotDotLessThan),
];

const WORD_OPERATORS: &[(&str, BinaryOperator, TokenKind)] = &[
    ("and", BinaryOperator::And, TokenKind::AndKeyword),
    ("or", BinaryOperator::Or, TokenKind::OrKeyword),
    ("in", BinaryOperator::In, TokenKind::InKeyword),
    ("not-in", BinaryOperator::NotIn, TokenKind::NotIn),
    ("is", BinaryOperator::Is, TokenKind::Is),
    ("is-not", BinaryOperator::IsNot, TokenKind::IsNot),
    ("keyof", BinaryOperator::Keyof, TokenKind::Keyof),
    ("match", BinaryOperator::Match, TokenKind::Match),
    ("not-match", BinaryOperator::NotMatch, TokenKind::NotMatch),
    ("substrof", BinaryOperator::Substrof, TokenKind::Substrof),
];

fn is_operator_symbol(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '\\' | '<' | '>' | '?' | '!' | '=' | '.')
}

impl Parser<'_, '_> {
    /// `(expr)`, `(-expr)`, `(if ...)` and binary chains.
    pub(crate) fn parse_parenthesized_expression(&mut self) -> Node {
        self.assert_at(b'(');
        let start = self.i;
        self.eat_token(TokenKind::OpeningParenthesis, 1);
        self.eat_space_newline_comment();

        let left_start = self.i;
        let mut left = self.parse_expression_with(true);

        if left.ident_name() == Some("if") {
            return self.parse_if_expression(start, left);
        }

        self.eat_space_newline_comment();

        if left.is_missing_expression() {
            return self.parenthesized_missing_operand(start, left);
        }

        if matches!(&left.kind, NodeKind::UnquotedStringLiteral { value, .. } if value == "-") {
            left = self.parse_number_negation(left);
            if self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
                left.span = self.span_from(start);
                left.is_parenthesized = true;
                return left;
            }
        }

        if self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
            left.is_parenthesized = true;
            return left;
        }

        if self.eof() {
            left.is_parenthesized = true;
            if left.err.is_none() {
                left.err = error(message::UNTERMINATED_PARENTHESIZED_EXPR_MISSING_CLOSING_PAREN);
            }
            return left;
        }

        let mut expr = self.parse_chain_term(left_start, left);
        let is_binary = matches!(expr.kind, NodeKind::BinaryExpression { .. });
        let mut chain_operator = None;
        let mut mixed = false;

        loop {
            self.eat_space_newline_comment();
            let Some((operator, kind, len)) = self.at_chain_operator() else {
                break;
            };
            self.eat_token(kind, len);
            if chain_operator.is_some_and(|op| op != operator) {
                mixed = true;
            }
            chain_operator = Some(operator);

            self.eat_space_newline_comment();
            let operand_start = self.i;
            let operand = self.parse_expression();
            let right = if operand.is_missing_expression() {
                operand
            } else {
                self.parse_chain_term(operand_start, operand)
            };
            let missing = right.is_missing_expression();
            let err = if missing {
                error(message::UNTERMINATED_BIN_EXPR_MISSING_OPERAND)
            } else {
                None
            };

            expr = Node::with_err(
                self.range(left_start, usize::from(right.span.end())),
                err,
                NodeKind::BinaryExpression {
                    operator: Some(operator),
                    left: expr.boxed(),
                    right: right.boxed(),
                },
            );
            if missing {
                break;
            }
        }

        if !is_binary && chain_operator.is_none() {
            return expr;
        }

        self.eat_space_newline_comment();
        let closed = self.eat_token_if(TokenKind::ClosingParenthesis, ")");
        expr.span = self.span_from(start);
        expr.is_parenthesized = true;

        if expr.err.is_none() {
            if !closed {
                expr.err = error(message::UNTERMINATED_BIN_EXPR_MISSING_PAREN);
            } else if mixed {
                expr.err = error(message::BIN_EXPR_CHAIN_OPERATORS_SHOULD_BE_THE_SAME);
            }
        }
        expr
    }

    fn parenthesized_missing_operand(&mut self, start: usize, left: Node) -> Node {
        if self.eof() {
            return Node::with_err(self.span_from(start), left.err, NodeKind::UnknownNode);
        }
        if self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
            let mut node = Node::with_err(self.span_from(start), left.err, NodeKind::UnknownNode);
            node.is_parenthesized = true;
            return node;
        }
        let Some(c) = self.eat_unexpected_char() else {
            return left;
        };
        Node::with_err(
            self.span_from(start),
            error(message::fmt_unexpected_char(
                c,
                UnexpectedCharContext::ParenthesizedExpression,
            )),
            NodeKind::UnknownNode,
        )
    }

    /// `-` was read as an unquoted string: the next expression is negated.
    fn parse_number_negation(&mut self, minus: Node) -> Node {
        let minus_start = usize::from(minus.span.start());
        self.token(TokenKind::Minus, minus_start, usize::from(minus.span.end()));
        let operand = self.parse_expression();
        let err = if operand.is_missing_expression() {
            error(message::UNTERMINATED_UNARY_EXPR_MISSING_OPERAND)
        } else {
            None
        };
        self.eat_space();
        Node::with_err(
            self.span_from(minus_start),
            err,
            NodeKind::UnaryExpression {
                operator: UnaryOperator::NumberNegate,
                operand: operand.boxed(),
            },
        )
    }

    fn at_chain_operator(&self) -> Option<(BinaryOperator, TokenKind, usize)> {
        if self.at_word("and") {
            Some((BinaryOperator::And, TokenKind::AndKeyword, 3))
        } else if self.at_word("or") {
            Some((BinaryOperator::Or, TokenKind::OrKeyword, 2))
        } else {
            None
        }
    }

    /// `left OP right` where `OP` is not `and`/`or`. Returns `left` unchanged
    /// when the term ends right after it.
    fn parse_chain_term(&mut self, start: usize, left: Node) -> Node {
        self.eat_space_newline_comment();
        if self.eof() || self.at(b')') || self.at_chain_operator().is_some() {
            return left;
        }

        let (operator, mut err) = match self.scan_binary_operator() {
            OperatorScan::Valid(op) => (Some(op), None),
            OperatorScan::Invalid => (None, error(message::INVALID_BIN_EXPR_NON_EXISTING_OPERATOR)),
            OperatorScan::MissingOperator => {
                (None, error(message::UNTERMINATED_BIN_EXPR_MISSING_OPERATOR))
            }
            OperatorScan::MissingOperand => {
                let right = self.missing_expression(false);
                return Node::with_err(
                    self.span_from(start),
                    error(message::UNTERMINATED_BIN_EXPR_MISSING_OPERAND_OR_INVALID_OPERATOR),
                    NodeKind::BinaryExpression {
                        operator: None,
                        left: left.boxed(),
                        right: right.boxed(),
                    },
                );
            }
        };

        self.eat_space();
        let pattern_operand = matches!(
            operator,
            Some(BinaryOperator::Match | BinaryOperator::NotMatch)
        );
        let right = if pattern_operand {
            self.parse_expression_in_pattern(true)
        } else {
            self.parse_expression()
        };

        if right.is_missing_expression() && err.is_none() {
            err = error(message::UNTERMINATED_BIN_EXPR_MISSING_OPERAND);
        }

        let end = usize::from(right.span.end()).max(start);
        Node::with_err(
            self.range(start, end),
            err,
            NodeKind::BinaryExpression {
                operator,
                left: left.boxed(),
                right: right.boxed(),
            },
        )
    }

    fn scan_binary_operator(&mut self) -> OperatorScan {
        let start = self.i;
        let Some(c) = self.peek() else {
            return OperatorScan::MissingOperand;
        };

        if matches!(c, '$' | '"' | '\'' | '`') || is_dec_digit(c) {
            return OperatorScan::MissingOperator;
        }

        if is_operator_symbol(c) {
            if matches!(c, '?' | '!' | '=') {
                let next = self.char_at(self.i + 1);
                if next.is_none_or(|n| is_unpaired_or_closing_delim(n) && n != '=') {
                    self.bump();
                    self.token_raw(TokenKind::InvalidOperator, start, self.i);
                    return OperatorScan::MissingOperand;
                }
            }
            self.bump_while(is_operator_symbol);
            let text = self.text(start, self.i);
            return match SYMBOL_OPERATORS.iter().find(|(s, ..)| *s == text) {
                Some(&(_, op, kind)) => {
                    self.token(kind, start, self.i);
                    OperatorScan::Valid(op)
                }
                None => {
                    self.token_raw(TokenKind::InvalidOperator, start, self.i);
                    OperatorScan::Invalid
                }
            };
        }

        if is_alpha(c) || c == '_' {
            self.bump_while(is_ident_char);
            let text = self.text(start, self.i);
            return match WORD_OPERATORS.iter().find(|(s, ..)| *s == text) {
                Some(&(_, op, kind)) => {
                    self.token(kind, start, self.i);
                    OperatorScan::Valid(op)
                }
                None => {
                    self.token_raw(TokenKind::InvalidOperator, start, self.i);
                    OperatorScan::Invalid
                }
            };
        }

        self.eat_unexpected_char();
        OperatorScan::Invalid
    }

    /// `(if test consequent [else alternate])`, `if` is already parsed.
    fn parse_if_expression(&mut self, start: usize, if_ident: Node) -> Node {
        self.token(
            TokenKind::IfKeyword,
            usize::from(if_ident.span.start()),
            usize::from(if_ident.span.end()),
        );
        self.eat_space();
        let test = self.parse_expression();
        self.eat_space();
        let consequent = self.parse_expression();
        self.eat_space_newline_comment();

        let mut err = None;
        let mut alternate = None;
        if self.at_word("else") {
            self.eat_token(TokenKind::ElseKeyword, 4);
            self.eat_space();
            let value = self.parse_expression();
            if value.is_missing_expression() {
                err = error(message::UNTERMINATED_IF_EXPR_MISSING_VALUE_AFTER_ELSE);
            }
            alternate = Some(value.boxed());
            self.eat_space_newline_comment();
        }

        if !self.eat_token_if(TokenKind::ClosingParenthesis, ")") && err.is_none() {
            err = error(message::UNTERMINATED_IF_EXPR_MISSING_CLOSING_PAREN);
        }

        let mut node = Node::with_err(
            self.span_from(start),
            err,
            NodeKind::IfExpression {
                test: test.boxed(),
                consequent: consequent.boxed(),
                alternate,
            },
        );
        node.is_parenthesized = true;
        node
    }
}
