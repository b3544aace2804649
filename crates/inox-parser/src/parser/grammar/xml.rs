//! XML expressions: `html<div class="a">{value} text</div>`.
//!
//! Children are text slices, `{expr}` interpolations and nested elements.
//! Interpolations are parsed by a sub-parse bounded to the braces, so a bad
//! expression never escapes its interpolation. `script` and `style` bodies
//! are kept as raw text.

use crate::diagnostics::message;
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::error;
use crate::parser::scan::{is_alpha, is_ident_char};
use crate::parser::token::TokenKind;

const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Outcome of an element parse, seen from the parent's children loop.
struct ParsedElement {
    node: Node,
    /// `false` when the element was closed by a tag with another name: the
    /// parent should not report its own missing closing tag again.
    matching_closing_tag: bool,
}

impl Parser<'_, '_> {
    /// `namespace` is the identifier before `<`; the cursor is at `<`.
    pub(crate) fn parse_xml_expression(&mut self, namespace: Node) -> Node {
        let start = usize::from(namespace.span.start());

        if !self.char_at(self.i + 1).is_some_and(is_alpha) {
            self.eat_token(TokenKind::LessThan, 1);
            let element = self.absent();
            return Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_XML_EXPRESSION_MISSING_TOP_ELEM_NAME),
                NodeKind::XMLExpression {
                    namespace: namespace.boxed(),
                    element: element.boxed(),
                },
            );
        }

        let element = self.parse_xml_element().node;
        Node::new(
            self.span_from(start),
            NodeKind::XMLExpression {
                namespace: namespace.boxed(),
                element: element.boxed(),
            },
        )
    }

    fn parse_xml_element(&mut self) -> ParsedElement {
        self.consume_fuel();
        let start = self.i;
        self.eat_token(TokenKind::LessThan, 1);

        let name_start = self.i;
        self.bump_while(is_ident_char);
        let tag_name = self.text(name_start, self.i).to_owned();
        let name = Node::new(
            self.span_from(name_start),
            NodeKind::IdentifierLiteral {
                name: tag_name.clone(),
            },
        );
        self.eat_space_newline_comment();

        let attributes = self.parse_xml_attributes();

        let opening = |p: &Self, err, name: Node, attributes, self_closing| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::XMLOpeningElement {
                    name: name.boxed(),
                    attributes,
                    self_closing,
                },
            )
        };
        let element = |p: &Self,
                       err,
                       opening: Node,
                       children,
                       closing: Option<Node>,
                       raw| ParsedElement {
            node: Node::with_err(
                p.span_from(start),
                err,
                NodeKind::XMLElement {
                    opening: opening.boxed(),
                    children,
                    closing: closing.map(Node::boxed),
                    raw_element_content: raw,
                },
            ),
            matching_closing_tag: true,
        };

        if !self.at(b'>') && !self.at(b'/') {
            let err = error(message::UNTERMINATED_OPENING_XML_TAG_MISSING_CLOSING);
            let opening = opening(self, err, name, attributes, false);
            return element(self, None, opening, Vec::new(), None, None);
        }

        if self.at(b'/') {
            if self.byte(1) != Some(b'>') {
                self.bump();
                let err = error(message::UNTERMINATED_SELF_CLOSING_XML_TAG_MISSING_CLOSING);
                let opening = opening(self, err, name, attributes, true);
                return element(self, None, opening, Vec::new(), None, None);
            }
            self.eat_token(TokenKind::SelfClosingTagTerminator, 2);
            let opening = opening(self, None, name, attributes, true);
            return element(self, None, opening, Vec::new(), None, None);
        }

        self.eat_token(TokenKind::GreaterThan, 1);
        let opening = opening(self, None, name, attributes, false);

        let mut children = Vec::new();
        let mut raw = None;
        let mut children_matched = true;
        if RAW_TEXT_ELEMENTS.contains(&tag_name.as_str()) {
            let raw_start = self.i;
            while !self.eof() && !self.at_str("</") {
                self.bump();
            }
            raw = Some(self.text(raw_start, self.i).to_owned());
        } else {
            children_matched = self.parse_xml_children(&mut children);
        }

        if !self.at(b'<') {
            let err = if children_matched {
                error(message::fmt_expected_closing_tag(&tag_name))
            } else {
                None
            };
            return element(self, err, opening, children, None, raw);
        }

        let closing_start = self.i;
        self.eat_token(TokenKind::EndTagOpenDelimiter, 2);
        let closing_name_start = self.i;
        self.bump_while(is_ident_char);
        let closing_name = self.text(closing_name_start, self.i).to_owned();
        let closing_name_node = Node::new(
            self.span_from(closing_name_start),
            NodeKind::IdentifierLiteral {
                name: closing_name.clone(),
            },
        );

        let mut matching_closing_tag = true;
        let mut closing_err = None;
        if closing_name != tag_name {
            closing_err = error(message::fmt_expected_closing_tag(&tag_name));
            matching_closing_tag = false;
        }

        if !self.at(b'>') {
            if closing_err.is_none() {
                closing_err = error(message::UNTERMINATED_CLOSING_XML_TAG_MISSING_CLOSING_DELIM);
            }
        } else {
            self.eat_token(TokenKind::GreaterThan, 1);
        }

        let closing = Node::with_err(
            self.span_from(closing_start),
            closing_err,
            NodeKind::XMLClosingElement {
                name: closing_name_node.boxed(),
            },
        );
        let mut parsed = element(self, None, opening, children, Some(closing), raw);
        parsed.matching_closing_tag = matching_closing_tag;
        parsed
    }

    /// Attributes up to `>`, `/`, or the start of another element.
    fn parse_xml_attributes(&mut self) -> Vec<Node> {
        let mut attributes = Vec::new();

        while let Some(c) = self.peek() {
            if matches!(c, '>' | '/' | '<') {
                break;
            }

            let mut name = self.parse_expression();
            if name.is_missing_expression() {
                attributes.push(Node::new(
                    name.span,
                    NodeKind::XMLAttribute {
                        name: name.boxed(),
                        value: None,
                    },
                ));
                break;
            }
            if name.err.is_none() && !matches!(name.kind, NodeKind::IdentifierLiteral { .. }) {
                name.err = error(message::XML_ATTRIBUTE_NAME_SHOULD_BE_IDENT);
            }

            let attr_start = usize::from(name.span.start());
            if self.at(b'=') {
                self.eat_token(TokenKind::Equal, 1);
                let value = self.parse_expression();
                let missing = value.is_missing_expression();
                attributes.push(Node::new(
                    self.span_from(attr_start),
                    NodeKind::XMLAttribute {
                        name: name.boxed(),
                        value: Some(value.boxed()),
                    },
                ));
                if missing {
                    break;
                }
            } else {
                attributes.push(Node::new(
                    self.span_from(attr_start),
                    NodeKind::XMLAttribute {
                        name: name.boxed(),
                        value: None,
                    },
                ));
            }

            self.eat_space_newline_comment();
        }

        attributes
    }

    /// Children up to `</`. Returns `false` when a child element was closed
    /// by a mismatched tag.
    fn parse_xml_children(&mut self, children: &mut Vec<Node>) -> bool {
        let mut all_matched = true;
        let mut text_start = self.i;

        while !self.eof() && !self.at_str("</") {
            match self.peek() {
                Some('{') => {
                    children.push(xml_text(self, text_start, self.i));
                    let interpolation = self.parse_xml_interpolation();
                    children.push(interpolation);
                    text_start = self.i;
                }
                Some('<') => {
                    children.push(xml_text(self, text_start, self.i));
                    if !self.char_at(self.i + 1).is_some_and(is_alpha) {
                        self.eat_token(TokenKind::LessThan, 1);
                        children.push(Node::with_err(
                            self.span_from(self.i - 1),
                            error(message::UNTERMINATED_XML_EXPRESSION_MISSING_TOP_ELEM_NAME),
                            NodeKind::UnknownNode,
                        ));
                    } else if self.enter_recursion() {
                        let child = self.parse_xml_element();
                        self.exit_recursion();
                        all_matched &= child.matching_closing_tag;
                        children.push(child.node);
                    } else {
                        children.push(self.recursion_limit_node());
                    }
                    text_start = self.i;
                }
                _ => self.bump(),
            }
        }

        children.push(xml_text(self, text_start, self.i));
        all_matched
    }

    /// `{expr}`, the cursor is at `{`. The expression is parsed with the end
    /// of input lowered to the matching `}`.
    fn parse_xml_interpolation(&mut self) -> Node {
        self.nested(|p| p.parse_xml_interpolation_inner())
    }

    fn parse_xml_interpolation_inner(&mut self) -> Node {
        self.eat_token(TokenKind::XmlInterpOpeningBracket, 1);
        let inner_start = self.i;

        let mut depth = 0usize;
        let mut inner_end = None;
        for (offset, c) in self.rest().char_indices() {
            match c {
                '{' => depth += 1,
                '}' if depth == 0 => {
                    inner_end = Some(self.i + offset);
                    break;
                }
                '}' => depth -= 1,
                _ => {}
            }
        }

        let Some(inner_end) = inner_end else {
            self.i = self.len;
            let raw = self.text(inner_start, self.i).to_owned();
            return Node::with_err(
                self.span_from(inner_start),
                error(message::UNTERMINATED_XML_INTERP),
                NodeKind::XMLText { value: raw.clone(), raw },
            );
        };

        let inner = self.text(inner_start, inner_end);
        let (expr, err) = if inner.trim().is_empty() {
            self.i = inner_end;
            (self.absent(), error(message::EMPTY_XML_INTERP))
        } else {
            self.with_end(inner_end, |p| {
                p.eat_space_newline();
                let expr = p.parse_expression();
                p.eat_space_newline_comment();
                let mut err = None;
                if !p.eof() {
                    let rest_start = p.i;
                    p.i = inner_end;
                    p.token_raw(TokenKind::InvalidInterpSlice, rest_start, inner_end);
                    if !expr.is_missing_expression() {
                        err = error(message::XML_INTERP_SHOULD_CONTAIN_A_SINGLE_EXPR);
                    }
                }
                (expr, err)
            })
        };

        let node = Node::with_err(
            self.range(inner_start, inner_end),
            err,
            NodeKind::XMLInterpolation { expr: expr.boxed() },
        );
        if !self.is_cancelled() {
            self.i = inner_end;
            self.eat_token(TokenKind::XmlInterpClosingBracket, 1);
        }
        node
    }
}

fn xml_text(parser: &Parser<'_, '_>, start: usize, end: usize) -> Node {
    let raw = parser.text(start, end).to_owned();
    Node::new(
        parser.range(start, end),
        NodeKind::XMLText {
            value: raw.clone(),
            raw,
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::dump;

    #[test]
    fn element_with_interpolation() {
        let res = dump("h<div>{1}2</div>");
        insta::assert_snapshot!(res, @r#"
        Chunk [0..16]
          XMLExpression [0..16]
            IdentifierLiteral [0..1] h
            XMLElement [1..16]
              XMLOpeningElement [1..6]
                IdentifierLiteral [2..5] div
              XMLText [6..6] ""
              XMLInterpolation [7..8]
                IntLiteral [7..8] 1
              XMLText [9..10] "2"
              XMLClosingElement [10..16]
                IdentifierLiteral [12..15] div
        "#);
    }
}
