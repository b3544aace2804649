//! CSS selector expressions: `s!div.item > a[href^="https"]:hover`.

use crate::diagnostics::message;
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::error;
use crate::parser::scan::{is_alpha, is_ident_char, is_non_space_css_combinator};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    /// The `s!` prefix is consumed, `start` is the offset of `s`. The
    /// selector runs until the end of the line, a closing `)`/`}`, a `;`, or
    /// a terminating `!` which is consumed.
    pub(crate) fn parse_css_selector_expression(&mut self, start: usize) -> Node {
        self.token(TokenKind::CssSelectorPrefix, start, self.i);

        if self.eof() {
            return Node::with_err(
                self.span_from(start),
                error(message::EMPTY_CSS_SELECTOR),
                NodeKind::InvalidCssSelectorNode,
            );
        }

        let mut elements = Vec::new();
        let mut after_combinator = false;

        while let Some(c) = self.peek() {
            if matches!(c, '\n' | ')' | '}' | ';') {
                break;
            }
            if c == '!' {
                self.bump();
                break;
            }

            let element_start = self.i;
            let Some(element) = self.parse_css_selector_element(after_combinator) else {
                after_combinator = false;
                continue;
            };
            after_combinator = matches!(element.kind, NodeKind::CssCombinator { .. });
            if element.err.is_some() && self.i == element_start {
                self.bump();
            }
            elements.push(element);
        }

        Node::new(self.span_from(start), NodeKind::CssSelectorExpression { elements })
    }

    /// Returns `None` for insignificant space: around explicit combinators
    /// and at the end of the selector.
    fn parse_css_selector_element(&mut self, after_combinator: bool) -> Option<Node> {
        let start = self.i;
        let c = self.peek()?;

        let node = match c {
            '>' | '~' | '+' => {
                self.bump();
                Node::new(self.span_from(start), NodeKind::CssCombinator { name: c.to_string() })
            }
            '.' => {
                self.bump();
                let (name, err) =
                    self.css_name(message::UNTERMINATED_CSS_CLASS_SELECTOR_NAME_EXPECTED);
                Node::with_err(self.span_from(start), err, NodeKind::CssClassSelector { name })
            }
            '#' => {
                self.bump();
                let (name, err) =
                    self.css_name(message::UNTERMINATED_CSS_ID_SELECTOR_NAME_EXPECTED);
                Node::with_err(self.span_from(start), err, NodeKind::CssIdSelector { name })
            }
            '[' => self.parse_css_attribute_selector(),
            ':' => self.parse_css_pseudo_selector(),
            ' ' | '\t' => {
                self.eat_space();
                let insignificant = after_combinator
                    || self
                        .peek()
                        .is_none_or(|c| {
                            is_non_space_css_combinator(c)
                                || matches!(c, '\n' | ')' | '}' | ';' | '!')
                        });
                if insignificant {
                    return None;
                }
                Node::new(
                    self.span_from(start),
                    NodeKind::CssCombinator { name: " ".to_owned() },
                )
            }
            '*' => {
                self.bump();
                Node::new(self.span_from(start), NodeKind::CssTypeSelector { name: "*".to_owned() })
            }
            c if is_alpha(c) => {
                self.bump_while(is_ident_char);
                Node::new(
                    self.span_from(start),
                    NodeKind::CssTypeSelector {
                        name: self.text(start, self.i).to_owned(),
                    },
                )
            }
            _ => Node::with_err(
                self.range(start, start),
                error(message::EMPTY_CSS_SELECTOR),
                NodeKind::InvalidCssSelectorNode,
            ),
        };
        Some(node)
    }

    /// Name after `.`, `#`, `:` or `::`.
    fn css_name(&mut self, missing: &str) -> (String, Option<crate::diagnostics::ParsingError>) {
        if !self.peek().is_some_and(is_alpha) {
            return (String::new(), error(missing));
        }
        let start = self.i;
        self.bump_while(is_ident_char);
        (self.text(start, self.i).to_owned(), None)
    }

    /// `[name]`, `[name=value]`, `[name~=value]` and the other matchers.
    fn parse_css_attribute_selector(&mut self) -> Node {
        let start = self.i;
        self.eat_token(TokenKind::OpeningBracket, 1);

        let invalid = |p: &Self, msg: &str, name: Option<Node>, matcher: String| {
            let name = name.unwrap_or_else(|| p.absent());
            Node::with_err(
                p.span_from(start),
                error(msg),
                NodeKind::CssAttributeSelector {
                    attribute_name: name.boxed(),
                    matcher,
                    value: None,
                },
            )
        };

        match self.peek() {
            None => {
                let msg = message::UNTERMINATED_CSS_ATTR_SELECTOR_NAME_EXPECTED;
                return invalid(self, msg, None, String::new());
            }
            Some(c) if !is_alpha(c) => {
                let msg = message::CSS_ATTRIBUTE_NAME_SHOULD_START_WITH_ALPHA_CHAR;
                return invalid(self, msg, None, String::new());
            }
            Some(_) => {}
        }

        let name_start = self.i;
        self.bump_while(is_ident_char);
        let name = Node::new(
            self.span_from(name_start),
            NodeKind::IdentifierLiteral {
                name: self.text(name_start, self.i).to_owned(),
            },
        );

        if self.eat_token_if(TokenKind::ClosingBracket, "]") {
            return Node::new(
                self.span_from(start),
                NodeKind::CssAttributeSelector {
                    attribute_name: name.boxed(),
                    matcher: String::new(),
                    value: None,
                },
            );
        }

        let matcher_start = self.i;
        match self.peek() {
            None => {
                return invalid(
                    self,
                    message::UNTERMINATED_CSS_ATTR_SELECTOR_PATTERN_EXPECTED_AFTER_NAME,
                    Some(name),
                    String::new(),
                );
            }
            Some('~' | '*' | '^' | '|' | '$') => {
                self.bump();
                if !self.at(b'=') {
                    let msg = message::UNTERMINATED_CSS_ATTR_SELECTOR_INVALID_PATTERN;
                    return invalid(self, msg, Some(name), String::new());
                }
                self.bump();
            }
            Some('=') => self.bump(),
            Some(_) => {
                let msg = message::UNTERMINATED_CSS_ATTR_SELECTOR_INVALID_PATTERN;
                return invalid(self, msg, Some(name), String::new());
            }
        }
        let matcher = self.text(matcher_start, self.i).to_owned();

        let value = self.parse_expression();
        if !self.eat_token_if(TokenKind::ClosingBracket, "]") {
            return Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_CSS_ATTRIBUTE_SELECTOR_MISSING_BRACKET),
                NodeKind::CssAttributeSelector {
                    attribute_name: name.boxed(),
                    matcher,
                    value: Some(value.boxed()),
                },
            );
        }

        Node::new(
            self.span_from(start),
            NodeKind::CssAttributeSelector {
                attribute_name: name.boxed(),
                matcher,
                value: Some(value.boxed()),
            },
        )
    }

    /// `:hover`, `:nth-child(2)` or `::before`.
    fn parse_css_pseudo_selector(&mut self) -> Node {
        let start = self.i;
        self.bump();

        if self.eof() {
            return Node::with_err(
                self.span_from(start),
                error(message::INVALID_CSS_SELECTOR),
                NodeKind::InvalidCssSelectorNode,
            );
        }

        if self.at(b':') {
            self.bump();
            let (name, err) = self.css_name(message::INVALID_PSEUDO_CSS_SELECTOR_INVALID_NAME);
            return Node::with_err(
                self.span_from(start),
                err,
                NodeKind::CssPseudoElementSelector { name },
            );
        }

        let (name, err) = self.css_name(message::INVALID_CSS_CLASS_SELECTOR_INVALID_NAME);
        let mut arguments = Vec::new();
        if err.is_none() && self.at(b'(') {
            self.eat_token(TokenKind::OpeningParenthesis, 1);
            while !self.eof() && !self.at(b')') {
                self.eat_space_comma();
                let arg = self.parse_expression();
                if arg.is_missing_expression() {
                    break;
                }
                arguments.push(arg);
                self.eat_space_comma();
            }
            if !self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
                return Node::with_err(
                    self.span_from(start),
                    error(message::INVALID_CSS_SELECTOR),
                    NodeKind::CssPseudoClassSelector { name, arguments },
                );
            }
        }

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::CssPseudoClassSelector { name, arguments },
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::dump;

    #[test]
    fn selector_with_combinators() {
        let res = dump("s!div.item > a");
        insta::assert_snapshot!(res, @r"
        Chunk [0..14]
          CssSelectorExpression [0..14]
            CssTypeSelector [2..5] div
            CssClassSelector [5..10] item
            CssCombinator [11..12] >
            CssTypeSelector [13..14] a
        ");
    }
}
