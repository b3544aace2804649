//! Numeric literals: integers, floats, number ranges, quantities, rates,
//! dates, ports and byte slices.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::parser::Parser;
use crate::parser::ast::{DateValue, Node, NodeKind};
use crate::parser::core::error;
use crate::parser::scan::{is_alpha, is_dec_digit, is_ident_char};
use crate::parser::token::TokenKind;

static DATE_LITERAL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+y)(-\d{1,2}mt)?(-\d{1,2}d)?(-\d{1,2}h)?(-\d{1,2}m)?(-\d{1,2}s)?(-\d{1,3}ms)?(-\d{1,3}us)?(-[a-zA-Z_/]+[a-zA-Z_])$",
    )
    .ok()
});

static DATE_LITERAL_WITHOUT_LOCATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+y)(-\d{1,2}mt)?(-\d{1,2}d)?(-\d{1,2}h)?(-\d{1,2}m)?(-\d{1,2}s)?(-\d{1,3}ms)?(-\d{1,3}us)?$",
    )
    .ok()
});

fn matches(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(s))
}

/// Radix of an integer lexeme, decimal unless prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    Decimal,
    Hexadecimal,
    Octal,
    Binary,
}

impl Radix {
    fn of(raw: &str) -> Self {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        match digits.get(..2) {
            Some("0x") => Radix::Hexadecimal,
            Some("0o") => Radix::Octal,
            Some("0b") => Radix::Binary,
            _ => Radix::Decimal,
        }
    }

    fn value(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
            Radix::Octal => 8,
            Radix::Binary => 2,
        }
    }

    fn quantity_error(self) -> Option<&'static str> {
        match self {
            Radix::Decimal => None,
            Radix::Hexadecimal => Some(message::QUANTITY_LIT_NOT_ALLOWED_WITH_HEXADECIMAL_NUM),
            Radix::Octal => Some(message::QUANTITY_LIT_NOT_ALLOWED_WITH_OCTAL_NUM),
            Radix::Binary => Some(message::QUANTITY_LIT_NOT_ALLOWED_WITH_BINARY_NUM),
        }
    }
}

impl Parser<'_, '_> {
    /// Entry point for digit-led and negative numeric literals.
    pub(crate) fn parse_number_and_range_and_rate_literals(&mut self) -> Node {
        let start = self.i;
        let number = self.scan_number();

        let lower = if self.peek().is_some_and(|c| is_alpha(c) || c == '%') {
            self.scan_quantity_or_rate(start, number)
        } else {
            number
        };

        let rangeable = matches!(
            lower.kind,
            NodeKind::IntLiteral { .. }
                | NodeKind::FloatLiteral { .. }
                | NodeKind::QuantityLiteral { .. }
        );
        if !rangeable || !self.at_str("..") {
            return lower;
        }
        self.parse_number_range(start, lower)
    }

    /// One integer or float, without range or unit. Stops before `..`.
    fn scan_number(&mut self) -> Node {
        let start = self.i;
        if self.at(b'-') {
            self.bump();
        }

        let prefixed = self.at(b'0')
            && matches!(self.byte(1), Some(b'x' | b'o' | b'b'))
            && self.char_at(self.i + 2).is_some_and(|c| c.is_ascii_hexdigit());
        if prefixed {
            self.bump_n(2);
            self.bump_while(|c| c.is_ascii_hexdigit() || c == '_');
            return self.int_literal(start);
        }

        self.bump_while(|c| is_dec_digit(c) || c == '_');

        let is_float = self.at(b'.') && self.byte(1) != Some(b'.');
        if !is_float {
            return self.int_literal(start);
        }

        self.bump();
        self.bump_while(|c| is_dec_digit(c) || c == '_');

        if self.at(b'e') {
            let sign_len = usize::from(matches!(self.byte(1), Some(b'-' | b'+')));
            if self.byte(1 + sign_len).is_some_and(|b| b.is_ascii_digit()) {
                self.bump_n(1 + sign_len);
                self.bump_while(is_dec_digit);
            }
        }

        let raw = self.text(start, self.i).to_owned();
        let (value, err) = match raw.replace('_', "").parse::<f64>() {
            Ok(value) => (value, None),
            Err(_) => (0.0, error(message::INVALID_FLOAT_LIT)),
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::FloatLiteral { raw, value },
        )
    }

    fn int_literal(&self, start: usize) -> Node {
        let raw = self.text(start, self.i).to_owned();
        let radix = Radix::of(&raw);
        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.as_str()),
        };
        let digits = if radix == Radix::Decimal {
            unsigned.replace('_', "")
        } else {
            unsigned[2..].replace('_', "")
        };

        let parsed =
            i64::from_str_radix(&digits, radix.value()).map(|v| if negative { -v } else { v });
        let (value, err) = match parsed {
            Ok(value) => (value, None),
            Err(_) => (0, error(message::INVALID_INT_LIT)),
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::IntLiteral { raw, value },
        )
    }

    /// `lower..upper` where `lower` is an integer, float or quantity. Integer
    /// ranges require an upper bound, float and quantity ranges may be open.
    fn parse_number_range(&mut self, start: usize, lower: Node) -> Node {
        self.eat_token(TokenKind::TwoDots, 2);

        let has_upper = self.at_decimal_digit()
            || (self.at(b'-') && self.byte(1).is_some_and(|b| b.is_ascii_digit()));

        if !has_upper {
            return match lower.kind {
                NodeKind::IntLiteral { .. } => Node::with_err(
                    self.span_from(start),
                    error(message::UNTERMINATED_INT_RANGE_LIT),
                    NodeKind::IntegerRangeLiteral {
                        lower_bound: lower.boxed(),
                        upper_bound: None,
                    },
                ),
                NodeKind::FloatLiteral { .. } => Node::new(
                    self.span_from(start),
                    NodeKind::FloatRangeLiteral {
                        lower_bound: lower.boxed(),
                        upper_bound: None,
                    },
                ),
                _ => Node::new(
                    self.span_from(start),
                    NodeKind::QuantityRangeLiteral {
                        lower_bound: lower.boxed(),
                        upper_bound: None,
                    },
                ),
            };
        }

        let upper_start = self.i;
        let mut upper = self.scan_number();
        if self.peek().is_some_and(|c| is_alpha(c) || c == '%') {
            upper = self.scan_quantity_or_rate(upper_start, upper);
        }

        let (kind, err) = match lower.kind {
            NodeKind::IntLiteral { .. } => {
                let ok = matches!(upper.kind, NodeKind::IntLiteral { .. });
                let err = (!ok).then_some(message::UPPER_BOUND_OF_INT_RANGE_LIT_SHOULD_BE_INT_LIT);
                let kind = NodeKind::IntegerRangeLiteral {
                    lower_bound: lower.boxed(),
                    upper_bound: Some(upper.boxed()),
                };
                (kind, err)
            }
            NodeKind::FloatLiteral { .. } => {
                let ok = matches!(upper.kind, NodeKind::FloatLiteral { .. });
                let err =
                    (!ok).then_some(message::UPPER_BOUND_OF_FLOAT_RANGE_LIT_SHOULD_BE_FLOAT_LIT);
                let kind = NodeKind::FloatRangeLiteral {
                    lower_bound: lower.boxed(),
                    upper_bound: Some(upper.boxed()),
                };
                (kind, err)
            }
            _ => {
                let ok = matches!(upper.kind, NodeKind::QuantityLiteral { .. });
                let err = (!ok).then_some(message::UPPER_BOUND_OF_QTY_RANGE_LIT_SHOULD_BE_QTY_LIT);
                let kind = NodeKind::QuantityRangeLiteral {
                    lower_bound: lower.boxed(),
                    upper_bound: Some(upper.boxed()),
                };
                (kind, err)
            }
        };

        Node::with_err(self.span_from(start), err.and_then(error), kind)
    }

    /// Units after `number`: a quantity (`1h30m`), a rate (`10kB/s`) or a
    /// date (`2020y-10mt-UTC`).
    fn scan_quantity_or_rate(&mut self, start: usize, number: Node) -> Node {
        let (first_value, radix, is_float) = match &number.kind {
            NodeKind::IntLiteral { raw, value } => (*value as f64, Radix::of(raw), false),
            NodeKind::FloatLiteral { value, .. } => (*value, Radix::Decimal, true),
            _ => return number,
        };

        let negative = self.text(start, start + 1) == "-";
        if !is_float && !negative && self.at(b'y') && self.byte(1) == Some(b'-') {
            return self.parse_date_literal(start);
        }

        let mut err = radix.quantity_error();
        let unit_start = self.i;
        self.bump();
        self.bump_while(is_alpha);

        let mut values = vec![first_value];
        let mut units = vec![self.text(unit_start, self.i).to_owned()];

        while self.at_decimal_digit() {
            let next = self.scan_number();
            let value = match next.kind {
                NodeKind::IntLiteral { value, .. } => value as f64,
                NodeKind::FloatLiteral { value, .. } => value,
                _ => {
                    err = err.or(Some(message::INVALID_QUANTITY_LIT));
                    break;
                }
            };
            values.push(value);

            if !self.peek().is_some_and(is_alpha) {
                err = err.or(Some(message::INVALID_QUANTITY_LIT));
                break;
            }
            let unit_start = self.i;
            self.bump_while(is_alpha);
            units.push(self.text(unit_start, self.i).to_owned());
        }

        if !self.at(b'/') {
            return Node::with_err(
                self.span_from(start),
                err.and_then(error),
                NodeKind::QuantityLiteral {
                    raw: self.text(start, self.i).to_owned(),
                    values,
                    units,
                },
            );
        }

        self.bump();
        let div_unit_start = self.i;
        match self.peek() {
            None => {
                err = err.or(Some(message::INVALID_RATE_LIT_DIV_SYMBOL_SHOULD_BE_FOLLOWED_BY_UNIT));
            }
            Some(c) if !is_alpha(c) => err = err.or(Some(message::INVALID_RATE_LIT)),
            Some(_) => {
                self.bump_while(is_alpha);
                if self.peek().is_some_and(is_ident_char) {
                    err = err.or(Some(message::INVALID_RATE_LIT));
                }
            }
        }

        Node::with_err(
            self.span_from(start),
            err.and_then(error),
            NodeKind::RateLiteral {
                raw: self.text(start, self.i).to_owned(),
                values,
                units,
                div_unit: self.text(div_unit_start, self.i).to_owned(),
            },
        )
    }

    fn parse_date_literal(&mut self, start: usize) -> Node {
        self.assert_at(b'y');
        self.bump();
        self.bump_while(|c| is_alpha(c) || is_dec_digit(c) || matches!(c, '-' | '/' | '_'));

        let raw = self.text(start, self.i).to_owned();
        let (value, err) = match parse_date_value(&raw) {
            Ok(value) => (value, None),
            Err(msg) => (DateValue::default(), error(msg)),
        };
        Node::with_err(self.span_from(start), err, NodeKind::DateLiteral { raw, value })
    }

    /// `:80` or `:443/https`.
    pub(crate) fn parse_port_literal(&mut self) -> Node {
        self.assert_at(b':');
        let start = self.i;
        self.bump();

        let number_start = self.i;
        self.bump_while(is_dec_digit);
        let port_number = self
            .text(number_start, self.i)
            .parse::<u16>()
            .ok();

        let mut err = port_number
            .is_none()
            .then_some(message::INVALID_PORT_LITERAL_INVALID_PORT_NUMBER);

        let mut scheme_name = String::new();
        if self.at(b'/') {
            self.bump();
            let scheme_start = self.i;
            self.bump_while(|c| is_alpha(c) || c == '-');
            scheme_name = self.text(scheme_start, self.i).to_owned();
            if scheme_name.is_empty() {
                err = err.or(Some(
                    message::UNTERMINATED_PORT_LITERAL_MISSING_SCHEME_NAME_AFTER_SLASH,
                ));
            }
        }

        Node::with_err(
            self.span_from(start),
            err.and_then(error),
            NodeKind::PortLiteral {
                raw: self.text(start, self.i).to_owned(),
                port_number: port_number.unwrap_or(0),
                scheme_name,
            },
        )
    }

    /// `0x[...]`, `0b[...]` and `0d[...]`.
    pub(crate) fn parse_byte_slice_literal(&mut self) -> Node {
        self.assert_at(b'0');
        let start = self.i;
        self.bump();

        let Some(base) = self.peek() else {
            let err = Some(message::UNKNOWN_BYTE_SLICE_BASE.to_owned());
            return self.byte_slice(start, Vec::new(), err);
        };
        self.bump();

        let missing_brackets = match base {
            'x' => message::UNTERMINATED_HEX_BYTE_SICE_LIT_MISSING_BRACKETS,
            'b' => message::UNTERMINATED_BIN_BYTE_SICE_LIT_MISSING_BRACKETS,
            'd' => message::UNTERMINATED_DECIMAL_BYTE_SICE_LIT_MISSING_BRACKETS,
            _ => {
                let err = Some(message::UNKNOWN_BYTE_SLICE_BASE.to_owned());
                return self.byte_slice(start, Vec::new(), err);
            }
        };
        if !self.at(b'[') {
            return self.byte_slice(start, Vec::new(), Some(missing_brackets.to_owned()));
        }
        self.bump();
        self.eat_space();

        let mut errors = ByteSliceErrors::default();
        let value = match base {
            'x' => self.scan_hex_bytes(&mut errors),
            'b' => self.scan_binary_bytes(&mut errors),
            _ => self.scan_decimal_bytes(&mut errors),
        };

        if self.eof() {
            errors.push(message::UNTERMINATED_BYTE_SICE_LIT_MISSING_CLOSING_BRACKET.to_owned());
        } else {
            self.bump();
        }

        self.byte_slice(start, value, errors.0)
    }

    fn byte_slice(&self, start: usize, value: Vec<u8>, err: Option<String>) -> Node {
        Node::with_err(
            self.span_from(start),
            err.and_then(error),
            NodeKind::ByteSliceLiteral {
                raw: self.text(start, self.i).to_owned(),
                value,
            },
        )
    }

    fn scan_hex_bytes(&mut self, errors: &mut ByteSliceErrors) -> Vec<u8> {
        let mut digits = Vec::new();
        while let Some(c) = self.peek().filter(|&c| c != ']') {
            match c.to_digit(16) {
                Some(d) => digits.push(d as u8),
                None => errors.unexpected(c, UnexpectedCharContext::HexadecimalByteSliceLiteral),
            }
            self.bump();
            self.eat_space();
        }

        if errors.0.is_some() {
            return Vec::new();
        }
        if digits.len() % 2 != 0 {
            errors.push(message::INVALID_HEX_BYTE_SICE_LIT_LENGTH_SHOULD_BE_EVEN.to_owned());
            return Vec::new();
        }
        digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect()
    }

    fn scan_binary_bytes(&mut self, errors: &mut ByteSliceErrors) -> Vec<u8> {
        let mut value = Vec::new();
        let mut current = 0u8;
        let mut bit_count = 0;

        while let Some(c) = self.peek().filter(|&c| c != ']') {
            match c {
                '0' | '1' => {
                    current = (current << 1) | u8::from(c == '1');
                    bit_count += 1;
                    if bit_count == 8 {
                        value.push(current);
                        current = 0;
                        bit_count = 0;
                    }
                }
                ' ' | '\n' | '\r' => {}
                _ => errors.unexpected(c, UnexpectedCharContext::BinaryByteSliceLiteral),
            }
            self.bump();
            self.eat_space();
        }

        if bit_count != 0 {
            value.push(current);
        }
        value
    }

    fn scan_decimal_bytes(&mut self, errors: &mut ByteSliceErrors) -> Vec<u8> {
        let mut groups: Vec<String> = Vec::new();
        let mut current = String::new();

        while let Some(c) = self.peek().filter(|&c| c != ']') {
            match c {
                '0'..='9' => current.push(c),
                ' ' | '\t' | '\r' => {
                    if !current.is_empty() {
                        groups.push(std::mem::take(&mut current));
                    }
                }
                _ => errors.unexpected(c, UnexpectedCharContext::DecimalByteSliceLiteral),
            }
            self.bump();
        }
        if !current.is_empty() {
            groups.push(current);
        }

        if errors.0.is_some() {
            return Vec::new();
        }

        let mut value = Vec::with_capacity(groups.len());
        for group in &groups {
            match group.parse::<u8>() {
                Ok(byte) if group.len() <= 3 => value.push(byte),
                _ => {
                    errors.push(message::fmt_invalid_byte_in_decimal_byte_slice_literal(group));
                    return Vec::new();
                }
            }
        }
        value
    }
}

/// Byte slice errors are accumulated, one message per line.
#[derive(Default)]
struct ByteSliceErrors(Option<String>);

impl ByteSliceErrors {
    fn push(&mut self, msg: String) {
        match &mut self.0 {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(&msg);
            }
            None => self.0 = Some(msg),
        }
    }

    fn unexpected(&mut self, c: char, context: UnexpectedCharContext) {
        self.push(message::fmt_unexpected_char(c, context));
    }
}

/// Validates `raw` and extracts its components. Missing components default
/// to the start of their unit (month 1, day 1, 00:00:00).
fn parse_date_value(raw: &str) -> Result<DateValue, &'static str> {
    if !matches(&DATE_LITERAL, raw) {
        if matches(&DATE_LITERAL_WITHOUT_LOCATION, raw) {
            return Err(message::INVALID_DATE_LITERAL_MISSING_LOCATION_PART_AT_THE_END);
        }
        return Err(message::INVALID_DATE_LITERAL);
    }

    let parts: Vec<&str> = raw.split('-').collect();
    let (Some((year_part, middle)), Some(location)) = (parts.split_first(), parts.last()) else {
        return Err(message::INVALID_DATE_LITERAL);
    };
    let middle = &middle[..middle.len().saturating_sub(1)];

    let number = |s: &str| s.parse::<u16>().map_err(|_| message::INVALID_DATE_LITERAL);

    let mut date = DateValue {
        year: year_part
            .trim_end_matches('y')
            .parse()
            .map_err(|_| message::INVALID_DATE_LITERAL)?,
        month: 1,
        day: 1,
        location: (*location).to_owned(),
        ..DateValue::default()
    };

    for part in middle {
        if let Some(v) = part.strip_suffix("mt") {
            date.month = number(v)? as u8;
        } else if let Some(v) = part.strip_suffix("ms") {
            date.millisecond = number(v)?;
        } else if let Some(v) = part.strip_suffix("us") {
            date.microsecond = number(v)?;
        } else if let Some(v) = part.strip_suffix('d') {
            date.day = number(v)? as u8;
        } else if let Some(v) = part.strip_suffix('h') {
            date.hour = number(v)? as u8;
        } else if let Some(v) = part.strip_suffix('m') {
            date.minute = number(v)? as u8;
        } else if let Some(v) = part.strip_suffix('s') {
            date.second = number(v)? as u8;
        }
    }

    if !(1..=12).contains(&date.month) {
        return Err(message::INVALID_MONTH_VALUE);
    }
    if !(1..=31).contains(&date.day) {
        return Err(message::INVALID_DAY_VALUE);
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_components() {
        let date = parse_date_value("2020y-10mt-5d-13h-7m-UTC").unwrap();
        assert_eq!(date.year, 2020);
        assert_eq!(date.month, 10);
        assert_eq!(date.day, 5);
        assert_eq!(date.hour, 13);
        assert_eq!(date.minute, 7);
        assert_eq!(date.location, "UTC");
    }

    #[test]
    fn date_defaults_and_location() {
        let date = parse_date_value("2020y-America/Los_Angeles").unwrap();
        assert_eq!((date.month, date.day), (1, 1));
        assert_eq!(date.location, "America/Los_Angeles");
    }

    #[test]
    fn date_errors() {
        assert_eq!(
            parse_date_value("2020y-10mt"),
            Err(message::INVALID_DATE_LITERAL_MISSING_LOCATION_PART_AT_THE_END)
        );
        assert_eq!(parse_date_value("2020y-13mt-UTC"), Err(message::INVALID_MONTH_VALUE));
        assert_eq!(parse_date_value("2020y-0d-UTC"), Err(message::INVALID_DAY_VALUE));
        assert_eq!(parse_date_value("2020y-"), Err(message::INVALID_DATE_LITERAL));
    }
}
