//! Path literals, path expressions and path patterns, plus the `{expr}`
//! slice scanner shared with URL paths and query values.

use crate::diagnostics::message;
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::error;
use crate::parser::scan::{is_delim, is_ident_char, is_interpolation_allowed_char};
use crate::parser::token::TokenKind;

/// What the literal parts of an interpolated region become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SliceFlavor {
    Path,
    QueryValue,
}

impl SliceFlavor {
    fn literal(self, value: String) -> NodeKind {
        match self {
            SliceFlavor::Path => NodeKind::PathSlice { value },
            SliceFlavor::QueryValue => NodeKind::URLQueryParameterValueSlice { value },
        }
    }

    fn invalid_interpolation(self) -> &'static str {
        match self {
            SliceFlavor::Path => message::INVALID_PATH_INTERP,
            SliceFlavor::QueryValue => message::INVALID_QUERY_PARAM_INTERP,
        }
    }

    fn empty_interpolation(self) -> &'static str {
        match self {
            SliceFlavor::Path => message::EMPTY_PATH_INTERP,
            SliceFlavor::QueryValue => message::EMPTY_QUERY_PARAM_INTERP,
        }
    }

    fn charset_explanation(self) -> &'static str {
        match self {
            SliceFlavor::Path => message::PATH_INTERP_EXPLANATION,
            SliceFlavor::QueryValue => message::QUERY_PARAM_INTERP_EXPLANATION,
        }
    }

    fn missing_closing_brace(self) -> &'static str {
        match self {
            SliceFlavor::Path => message::UNTERMINATED_PATH_INTERP_MISSING_CLOSING_BRACE,
            SliceFlavor::QueryValue => {
                message::UNTERMINATED_QUERY_PARAM_INTERP_MISSING_CLOSING_BRACE
            }
        }
    }
}

impl Parser<'_, '_> {
    /// `/a/b`, `./a`, `` /`a b` ``, `/{$dir}/file` and, with `is_pattern`
    /// (cursor at `%`), `%/a/...`, `%/{:name}` and `%/{$dir}/*`.
    pub(crate) fn parse_path_like_expression(&mut self, is_pattern: bool) -> Node {
        let start = self.i;
        if is_pattern {
            self.assert_at(b'%');
            self.bump();
        }

        let path_start = self.i;
        let is_absolute = self.at(b'/');
        self.bump();
        if !is_absolute {
            self.bump_while(|c| c == '.');
            self.bump_while(|c| c == '/');
        }

        let mut err: Option<String> = None;
        let is_quoted = self.at(b'`');
        if is_quoted {
            self.bump();
            self.bump_while(|c| c != '`');
            if self.at(b'`') {
                self.bump();
            } else {
                let msg = if is_pattern {
                    message::UNTERMINATED_QUOTED_PATH_PATTERN_LIT_MISSING_CLOSING_BACTICK
                } else {
                    message::UNTERMINATED_QUOTED_PATH_LIT_MISSING_CLOSING_BACTICK
                };
                err = Some(msg.to_owned());
            }
        } else {
            self.scan_path_chars();
        }

        let raw = self.text(start, self.i).to_owned();
        let value: String = self.text(path_start, self.i).chars().filter(|&c| c != '`').collect();
        let end = self.i;

        let slices = if is_quoted {
            vec![Node::new(
                self.range(path_start, end),
                NodeKind::PathSlice {
                    value: value.clone(),
                },
            )]
        } else {
            self.parse_interpolated_slices(path_start, end, SliceFlavor::Path)
        };
        self.i = end;

        let misplaced_prefix = is_pattern
            && value.contains("/...")
            && value.strip_suffix("/...").is_none_or(|t| t.contains("/..."));
        if value.contains("/....") || misplaced_prefix {
            err = err.or_else(|| {
                Some(message::fmt_slash_dot_dot_dot_can_only_be_present_at_end_of_path_pattern(
                    &value,
                ))
            });
        }

        let has_interpolations = slices.len() > 1;

        if is_pattern {
            return self.path_pattern(start, raw, value, slices, is_absolute, err);
        }

        let has_named_segments = slices
            .iter()
            .any(|s| matches!(s.kind, NodeKind::NamedPathSegment { .. }));
        if has_named_segments {
            err = err.or(Some(message::ONLY_PATH_PATTERNS_CAN_CONTAIN_NAMED_SEGMENTS.to_owned()));
        }

        let span = self.span_from(start);
        let kind = match (has_interpolations, is_absolute) {
            (true, true) => NodeKind::AbsolutePathExpression { slices },
            (true, false) => NodeKind::RelativePathExpression { slices },
            (false, true) => NodeKind::AbsolutePathLiteral { raw, value },
            (false, false) => NodeKind::RelativePathLiteral { raw, value },
        };
        Node::with_err(span, err.and_then(error), kind)
    }

    /// Non-space chars up to a delimiter; `{...}` interpolations are skipped
    /// as a whole.
    fn scan_path_chars(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || (is_delim(c) && c != '{') {
                break;
            }
            self.bump();
            if c == '{' {
                self.bump_while(|c| c != '\n' && c != '}');
                if self.at(b'}') {
                    self.bump();
                }
            }
        }
    }

    fn path_pattern(
        &mut self,
        start: usize,
        raw: String,
        value: String,
        slices: Vec<Node>,
        is_absolute: bool,
        err: Option<String>,
    ) -> Node {
        let span = self.span_from(start);

        if slices.len() <= 1 {
            if err.is_none() && !has_balanced_brackets(&value) {
                return Node::with_err(
                    span,
                    error(message::INVALID_PATH_PATT_UNBALANCED_DELIMITERS),
                    NodeKind::InvalidPathPattern { value },
                );
            }
            let kind = if is_absolute {
                NodeKind::AbsolutePathPatternLiteral { raw, value }
            } else {
                NodeKind::RelativePathPatternLiteral { raw, value }
            };
            return Node::with_err(span, err.and_then(error), kind);
        }

        self.token(TokenKind::PercentSymbol, start, start + 1);

        let slices: Vec<Node> = slices
            .into_iter()
            .map(|slice| match slice.kind {
                NodeKind::PathSlice { value } => Node::with_err(
                    slice.span,
                    slice.err,
                    NodeKind::PathPatternSlice { value },
                ),
                _ => slice,
            })
            .collect();

        let is_named = |s: &Node| matches!(s.kind, NodeKind::NamedPathSegment { .. });
        let is_literal = |s: &Node| matches!(s.kind, NodeKind::PathPatternSlice { .. });
        let has_named_segments = slices.iter().any(is_named);
        let has_interpolations = slices.iter().any(|s| !is_named(s) && !is_literal(s));

        if has_named_segments && has_interpolations {
            return Node::with_err(
                span,
                error(message::CANNOT_MIX_PATH_INTER_PATH_NAMED_SEGMENT),
                NodeKind::NamedSegmentPathPatternLiteral {
                    raw,
                    str_value: String::new(),
                    slices,
                },
            );
        }

        if !has_named_segments {
            return Node::with_err(
                span,
                err.and_then(error),
                NodeKind::PathPatternExpression { slices },
            );
        }

        let slice_value = |s: &Node| match &s.kind {
            NodeKind::PathPatternSlice { value } => Some(value.clone()),
            _ => None,
        };
        let misplaced = slices.iter().enumerate().any(|(j, s)| {
            if !is_named(s) {
                return false;
            }
            let prev_ok = j
                .checked_sub(1)
                .and_then(|p| slice_value(&slices[p]))
                .is_some_and(|v| v.ends_with('/'));
            let next_ok = slices
                .get(j + 1)
                .is_none_or(|n| slice_value(n).is_some_and(|v| v.starts_with('/')));
            !prev_ok || !next_ok
        });

        let err = if misplaced {
            Some(message::INVALID_PATH_PATT_NAMED_SEGMENTS.to_owned())
        } else {
            err
        };

        Node::with_err(
            span,
            err.and_then(error),
            NodeKind::NamedSegmentPathPatternLiteral {
                raw,
                str_value: format!("%{value}"),
                slices,
            },
        )
    }

    /// Splits `[start, end)` into literal slices and `{...}` interpolations.
    /// Interpolations are parsed in place as expressions; the cursor is
    /// restored afterwards.
    pub(super) fn parse_interpolated_slices(
        &mut self,
        start: usize,
        end: usize,
        flavor: SliceFlavor,
    ) -> Vec<Node> {
        let saved = self.i;
        let bytes = self.s.as_bytes();
        let mut slices = Vec::new();
        let mut slice_start = start;
        let mut i = start;

        while i < end {
            if bytes[i] != b'{' {
                i += 1;
                continue;
            }

            slices.push(Node::new(
                self.range(slice_start, i),
                flavor.literal(self.text(slice_start, i).to_owned()),
            ));
            self.token(TokenKind::SingleInterpOpeningBrace, i, i + 1);

            let content_start = i + 1;
            let close = bytes[content_start..end]
                .iter()
                .position(|&b| b == b'}')
                .map(|p| content_start + p);
            let content_end = close.unwrap_or(end);

            self.parse_slice_interpolation(&mut slices, content_start, content_end, flavor);

            match close {
                Some(close) => {
                    self.token(TokenKind::SingleInterpClosingBrace, close, close + 1);
                    i = close + 1;
                }
                None => {
                    slices.push(Node::with_err(
                        self.range(end, end),
                        error(flavor.missing_closing_brace()),
                        flavor.literal(String::new()),
                    ));
                    i = end;
                }
            }
            slice_start = i;
        }

        if slice_start < end {
            slices.push(Node::new(
                self.range(slice_start, end),
                flavor.literal(self.text(slice_start, end).to_owned()),
            ));
        }

        self.i = saved;
        slices
    }

    fn parse_slice_interpolation(
        &mut self,
        slices: &mut Vec<Node>,
        start: usize,
        end: usize,
        flavor: SliceFlavor,
    ) {
        let content = self.text(start, end);

        if flavor == SliceFlavor::Path && content.starts_with(':') {
            slices.push(self.named_path_segment(start, end));
            return;
        }

        let invalid = |parser: &mut Self, msg: &str| {
            if start < end {
                parser.token_raw(TokenKind::InvalidInterpSlice, start, end);
            }
            Node::with_err(parser.range(start, end), error(msg), NodeKind::UnknownNode)
        };

        if content.is_empty() {
            slices.push(invalid(self, flavor.empty_interpolation()));
            return;
        }
        if !content.chars().all(is_interpolation_allowed_char) {
            slices.push(invalid(self, flavor.charset_explanation()));
            return;
        }

        let checkpoint = self.token_checkpoint();
        self.i = start;
        let expr = self.with_end(end, |p| p.parse_expression_in_pattern(false));

        if self.i != end || expr.has_error_in_tree() {
            self.rewind(start, checkpoint);
            slices.push(invalid(self, flavor.invalid_interpolation()));
            return;
        }
        slices.push(expr);
    }

    /// `{:name}` in a path pattern, `start` is the offset of `:`.
    fn named_path_segment(&self, start: usize, end: usize) -> Node {
        let name = self.text(start + 1, end);
        let err = if name.is_empty() || !name.chars().all(is_ident_char) {
            Some(message::INVALID_NAMED_SEGMENT_PATH_PATTERN_COLON_SHOULD_BE_FOLLOWED_BY_A_NAME)
        } else if name.starts_with('-') {
            Some(message::INVALID_NAMED_SEGMENT_PATH_PATTERN_COLON_NAME_SHOULD_NOT_START_WITH_DASH)
        } else if name.ends_with('-') {
            Some(message::INVALID_NAMED_SEGMENT_PATH_PATTERN_COLON_NAME_SHOULD_NOT_END_WITH_DASH)
        } else {
            None
        };
        Node::with_err(
            self.range(start, end),
            err.and_then(error),
            NodeKind::NamedPathSegment {
                name: name.to_owned(),
            },
        )
    }
}

/// Unescaped `[` and `]` of a globbing pattern must pair up.
fn has_balanced_brackets(value: &str) -> bool {
    let mut depth = 0i32;
    let mut escaped = false;
    for c in value.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::has_balanced_brackets;

    #[test]
    fn globbing_brackets() {
        assert!(has_balanced_brackets("/a/[a-z].txt"));
        assert!(has_balanced_brackets(r"/a/\[.txt"));
        assert!(!has_balanced_brackets("/a/[a-z.txt"));
        assert!(!has_balanced_brackets("/a/]["));
    }
}
