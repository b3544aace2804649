//! String-like literals: quoted, multiline and unquoted strings, emails,
//! runes and string templates.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::message;
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::error;
use crate::parser::scan::{is_ident_char, is_interpolation_allowed_char, is_unquoted_string_char};
use crate::parser::token::TokenKind;

static STRICT_EMAIL_ADDRESS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,24}$)").ok());

pub(crate) fn is_strict_email_address(s: &str) -> bool {
    STRICT_EMAIL_ADDRESS
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}

impl Parser<'_, '_> {
    /// `"..."`, decoded with JSON escapes. A raw newline ends the literal.
    pub(crate) fn parse_quoted_string_literal(&mut self) -> Node {
        self.assert_at(b'"');
        let start = self.i;
        self.bump();

        while let Some(c) = self.peek() {
            if c == '\n' || (c == '"' && !self.is_escaped()) {
                break;
            }
            self.bump();
        }

        if !self.at(b'"') {
            return Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_QUOTED_STRING_LIT),
                NodeKind::QuotedStringLiteral {
                    raw: self.text(start, self.i).to_owned(),
                    value: String::new(),
                },
            );
        }

        self.bump();
        let raw = self.text(start, self.i).to_owned();
        let (value, err) = match serde_json::from_str::<String>(&raw) {
            Ok(value) => (value, None),
            Err(e) => (
                String::new(),
                error(message::fmt_invalid_string_lit_json(&e.to_string())),
            ),
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::QuotedStringLiteral { raw, value },
        )
    }

    /// Whether the char at the cursor is preceded by an odd number of `\`.
    pub(super) fn is_escaped(&self) -> bool {
        let backslashes = self.s.as_bytes()[..self.i]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        backslashes % 2 == 1
    }

    /// `` `...` ``, may span several lines.
    pub(crate) fn parse_multiline_string_literal(&mut self) -> Node {
        self.assert_at(b'`');
        let start = self.i;
        self.bump();

        while let Some(c) = self.peek() {
            if c == '`' && !self.is_escaped() {
                break;
            }
            self.bump();
        }

        if !self.at(b'`') {
            return Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_MULTILINE_STRING_LIT),
                NodeKind::MultilineStringLiteral {
                    raw: self.text(start, self.i).to_owned(),
                    value: String::new(),
                },
            );
        }

        self.bump();
        let raw = self.text(start, self.i).to_owned();
        let (value, err) = match decode_multiline(&raw[1..raw.len() - 1]) {
            Ok(value) => (value, None),
            Err(e) => (String::new(), error(message::fmt_invalid_string_lit_json(&e))),
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::MultilineStringLiteral { raw, value },
        )
    }

    /// The char at the cursor and the unquoted-string chars after it. The
    /// lexeme is an email address when it matches the strict email regex.
    pub(crate) fn parse_unquoted_string_or_email(&mut self, start: usize) -> Node {
        self.bump();
        loop {
            match self.peek() {
                Some(c) if is_unquoted_string_char(c) => self.bump(),
                Some('\\') if self.byte(1) == Some(b':') => self.bump_n(2),
                _ => break,
            }
        }

        let raw = self.text(start, self.i);
        if is_strict_email_address(raw) {
            return Node::new(
                self.span_from(start),
                NodeKind::EmailAddressLiteral {
                    value: raw.to_owned(),
                },
            );
        }

        Node::new(
            self.span_from(start),
            NodeKind::UnquotedStringLiteral {
                raw: raw.to_owned(),
                value: raw.replace('\\', ""),
            },
        )
    }

    /// `'c'` or `'a'..'z'`.
    pub(crate) fn parse_rune_or_rune_range(&mut self) -> Node {
        let start = self.i;
        let lower = self.parse_rune_literal();

        if !self.at(b'.') {
            return lower;
        }

        if self.byte(1) != Some(b'.') {
            self.eat_token(TokenKind::Dot, 1);
            let upper = self.missing_expression(false);
            return Node::with_err(
                self.span_from(start),
                error(message::INVALID_RUNE_RANGE_EXPR),
                NodeKind::RuneRangeExpression {
                    lower: lower.boxed(),
                    upper: upper.boxed(),
                },
            );
        }

        self.eat_token(TokenKind::TwoDots, 2);

        if !self.at(b'\'') {
            let upper = self.missing_expression(false);
            return Node::with_err(
                self.span_from(start),
                error(message::INVALID_RUNE_RANGE_EXPR),
                NodeKind::RuneRangeExpression {
                    lower: lower.boxed(),
                    upper: upper.boxed(),
                },
            );
        }

        let upper = self.parse_rune_literal();
        Node::new(
            self.span_from(start),
            NodeKind::RuneRangeExpression {
                lower: lower.boxed(),
                upper: upper.boxed(),
            },
        )
    }

    fn parse_rune_literal(&mut self) -> Node {
        self.assert_at(b'\'');
        let start = self.i;
        self.bump();

        let rune = |parser: &Self, value: char, msg: Option<&str>| {
            Node::with_err(
                parser.span_from(start),
                msg.and_then(error),
                NodeKind::RuneLiteral { value },
            )
        };

        let Some(mut value) = self.peek() else {
            return rune(self, '\0', Some(message::UNTERMINATED_RUNE_LIT));
        };

        if value == '\'' {
            return rune(self, '\0', Some(message::INVALID_RUNE_LIT_NO_CHAR));
        }

        if value == '\\' {
            self.bump();
            let Some(escaped) = self.peek() else {
                return rune(self, '\0', Some(message::UNTERMINATED_RUNE_LIT));
            };
            value = match escaped {
                'a' => '\u{07}',
                'b' => '\u{08}',
                'f' => '\u{0C}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'v' => '\u{0B}',
                '\\' => '\\',
                '\'' => '\'',
                _ => {
                    return rune(
                        self,
                        '\0',
                        Some(message::INVALID_RUNE_LIT_INVALID_SINGLE_CHAR_ESCAPE),
                    );
                }
            };
        }

        self.bump();

        if self.at(b'\'') {
            self.bump();
            rune(self, value, None)
        } else {
            rune(self, value, Some(message::UNTERMINATED_RUNE_LIT_MISSING_QUOTE))
        }
    }

    /// `` %p`text {{type:expr}} text` ``, the cursor is at the backquote that
    /// follows the pattern.
    pub(crate) fn parse_string_template_literal(&mut self, pattern: Node) -> Node {
        self.assert_at(b'`');
        let start = usize::from(pattern.span.start());
        self.eat_token(TokenKind::Backquote, 1);

        let mut slices = Vec::new();
        let mut slice_start = self.i;
        let mut interpolation_start = None;

        while let Some(c) = self.peek() {
            if c == '`' && !self.is_escaped() {
                break;
            }

            match interpolation_start {
                None if self.at_str("{{") => {
                    slices.push(self.template_slice(slice_start, self.i));
                    self.eat_token(TokenKind::StrInterpOpeningBrackets, 2);
                    interpolation_start = Some(self.i);
                }
                Some(interp_start) if self.at_str("}}") => {
                    let interp_end = self.i;
                    slices.push(self.parse_template_interpolation(interp_start, interp_end));
                    self.i = interp_end;
                    self.eat_token(TokenKind::StrInterpClosingBrackets, 2);
                    interpolation_start = None;
                    slice_start = self.i;
                }
                _ => self.bump(),
            }
        }

        match interpolation_start {
            Some(interp_start) => slices.push(Node::with_err(
                self.span_from(interp_start),
                error(message::UNTERMINATED_STRING_INTERP),
                NodeKind::StringTemplateSlice {
                    raw: self.text(interp_start, self.i).to_owned(),
                    value: String::new(),
                },
            )),
            None => slices.push(self.template_slice(slice_start, self.i)),
        }

        let err = if self.eat_token_if(TokenKind::Backquote, "`") || interpolation_start.is_some() {
            None
        } else {
            error(message::UNTERMINATED_STRING_TEMPL_LIT)
        };

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::StringTemplateLiteral {
                pattern: Some(pattern.boxed()),
                slices,
            },
        )
    }

    fn template_slice(&self, start: usize, end: usize) -> Node {
        let raw = self.text(start, end).to_owned();
        let (value, err) = match decode_multiline(&raw) {
            Ok(value) => (value, None),
            Err(e) => (String::new(), error(message::fmt_invalid_string_lit_json(&e))),
        };
        Node::with_err(
            self.range(start, end),
            err,
            NodeKind::StringTemplateSlice { raw, value },
        )
    }

    /// `type:expr` between `{{` and `}}`. The expression is parsed in place
    /// with the end of input lowered to `end`.
    fn parse_template_interpolation(&mut self, start: usize, end: usize) -> Node {
        let content = self.text(start, end);
        let name_len = content
            .char_indices()
            .find(|&(_, c)| !is_ident_char(c))
            .map_or(content.len(), |(offset, _)| offset);

        let invalid = |parser: &Self, msg: &str, type_name: &str| {
            Node::with_err(
                parser.range(start, end),
                error(msg),
                NodeKind::StringTemplateInterpolation {
                    type_name: type_name.to_owned(),
                    expr: Node::new(parser.range(end, end), NodeKind::MissingExpression).boxed(),
                },
            )
        };

        if !content.chars().all(is_interpolation_allowed_char) {
            return invalid(self, message::STR_INTERP_LIMITED_CHARSET, "");
        }
        if content.trim().is_empty() {
            return invalid(self, message::INVALID_STRING_INTERPOLATION_SHOULD_NOT_BE_EMPTY, "");
        }
        if name_len == 0 {
            return invalid(
                self,
                message::INVALID_STRING_INTERPOLATION_SHOULD_START_WITH_A_NAME,
                "",
            );
        }

        let type_name = &content[..name_len];
        let after_name = &content[name_len..];
        if !after_name.starts_with(':') || after_name.len() == 1 {
            return invalid(
                self,
                message::NAME_IN_STR_INTERP_SHOULD_BE_FOLLOWED_BY_COLON_AND_EXPR,
                type_name,
            );
        }

        self.i = start + name_len + 1;
        let expr = self.with_end(end, |p| {
            let expr = p.parse_expression();
            p.eat_space();
            expr
        });

        let err = if self.i != end || expr.err.is_some() {
            error(message::INVALID_STR_INTERP)
        } else {
            None
        };

        Node::with_err(
            self.range(start, end),
            err,
            NodeKind::StringTemplateInterpolation {
                type_name: type_name.to_owned(),
                expr: expr.boxed(),
            },
        )
    }
}

/// Decodes the content of a multiline string: raw line breaks and tabs are
/// kept, `` \` `` is a backquote and the other escapes are JSON escapes.
fn decode_multiline(inner: &str) -> Result<String, String> {
    let mut json = String::with_capacity(inner.len() + 2);
    json.push('"');
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\n' => json.push_str("\\n"),
            '\r' => json.push_str("\\r"),
            '\t' => json.push_str("\\t"),
            '"' => json.push_str("\\\""),
            '\\' => match chars.next() {
                Some('`') => json.push('`'),
                Some(next) => {
                    json.push('\\');
                    json.push(next);
                }
                None => json.push('\\'),
            },
            c => json.push(c),
        }
    }
    json.push('"');
    serde_json::from_str::<String>(&json).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiline_escapes() {
        assert_eq!(decode_multiline("a\nb").unwrap(), "a\nb");
        assert_eq!(decode_multiline("\\`x\\`").unwrap(), "`x`");
        assert_eq!(decode_multiline("say \"hi\"").unwrap(), "say \"hi\"");
        assert_eq!(decode_multiline("a\\\\b").unwrap(), "a\\b");
        assert_eq!(decode_multiline("\\n").unwrap(), "\n");
        assert!(decode_multiline("\\q").is_err());
    }

    #[test]
    fn strict_email() {
        assert!(is_strict_email_address("foo@mail.com"));
        assert!(is_strict_email_address("John.Doe+tag@example.org"));
        assert!(!is_strict_email_address("foo@mail"));
        assert!(!is_strict_email_address("a+b"));
    }
}
