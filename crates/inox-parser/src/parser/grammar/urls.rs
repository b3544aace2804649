//! URL-like literals: schemes, hosts, URLs, URL expressions and their
//! pattern counterparts.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::message;
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::error;
use crate::parser::scan::{contains_not_escaped_bracket, contains_not_escaped_dollar, is_delim};
use crate::parser::token::TokenKind;

use super::paths::SliceFlavor;

static LOOSE_URL_EXPR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(@[a-zA-Z0-9_-]+|https?://([-\w]+|(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,32}\.[a-zA-Z0-9]{1,6}\b|\{[$]{0,2}[-\w]+\}))([{?#/][-a-zA-Z0-9@:%_+.~#?&/=${}]{0,100})$",
    )
    .ok()
});

static LOOSE_HOST: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z0-9+]+)?://([-\w]+|(www\.)?[-a-zA-Z0-9.]{1,32}\.[a-zA-Z0-9]{1,6})(:[0-9]{1,5})?$",
    )
    .ok()
});

static LOOSE_HOST_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z0-9+]+)?://([-\w]+|[*]+|(www\.)?[-a-zA-Z0-9.*]{1,32}\.[a-zA-Z0-9*]{1,6})(:[0-9]{1,5})?$",
    )
    .ok()
});

static URL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z0-9+]+)://([-\w]+|(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,32}\.[a-zA-Z0-9]{1,6})\b([-a-zA-Z0-9@:%_+.~#?&/=]{0,100})$",
    )
    .ok()
});

static URL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z][a-z0-9+]*)://([-\w]+|[-a-zA-Z0-9@:%._+~#=]{1,64}\.[a-zA-Z0-9]{1,6})\b(:[0-9]+)?([?#/][-a-zA-Z0-9@:%_*+.~#?&/=]*)$",
    )
    .ok()
});

fn matches(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(s))
}

impl Parser<'_, '_> {
    /// Schemes (`https://`), hosts, URLs and URL expressions. The cursor is
    /// at `://` after the scheme name, or at `@` for URLs starting with a
    /// host alias.
    pub(crate) fn parse_url_like(&mut self, start: usize) -> Node {
        let starts_with_alias = self.char_at(start) == Some('@');
        if !starts_with_alias {
            self.bump_n(3);
        }
        let after_scheme = self.i;
        self.scan_url_chars();

        let u = self.text(start, self.i);
        let span = self.span_from(start);

        if !starts_with_alias && self.i == after_scheme {
            let name = self.text(start, after_scheme - 3).to_owned();
            let err = name
                .is_empty()
                .then_some(message::INVALID_SCHEME_LIT_MISSING_SCHEME)
                .and_then(error);
            return Node::with_err(span, err, NodeKind::SchemeLiteral { name });
        }

        if matches(&LOOSE_HOST, u) {
            return Node::with_err(
                span,
                check_host(u).and_then(error),
                NodeKind::HostLiteral { value: u.to_owned() },
            );
        }

        if matches(&LOOSE_URL_EXPR, u) && (starts_with_alias || u.contains('{')) {
            return self.url_expression(start, after_scheme, starts_with_alias);
        }

        if matches(&URL, u) && url_path(u).contains('/') {
            return Node::new(span, NodeKind::URLLiteral { value: u.to_owned() });
        }

        Node::with_err(
            span,
            error(message::INVALID_URL_OR_HOST),
            NodeKind::InvalidURL { value: u.to_owned() },
        )
    }

    /// Consumes chars up to a space or a delimiter other than `:` and `{`;
    /// `{...}` interpolations are skipped as a whole.
    fn scan_url_chars(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || (is_delim(c) && c != ':' && c != '{') {
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

    /// `https://{host}/a/{$b}?x={$y}` and `@alias/a`. The whole URL is
    /// already consumed.
    fn url_expression(
        &mut self,
        start: usize,
        after_scheme: usize,
        starts_with_alias: bool,
    ) -> Node {
        let end = self.i;
        let bytes = self.s.as_bytes();
        let mut err = None;

        let query_start = bytes[after_scheme..end]
            .iter()
            .position(|&b| b == b'?')
            .map(|p| after_scheme + p);
        let path_end = query_start.unwrap_or(end);

        let host_interpolated = !starts_with_alias && bytes.get(after_scheme) == Some(&b'{');
        let mut path_start = after_scheme;
        let mut host_expr = None;

        if host_interpolated {
            self.token(TokenKind::SingleInterpOpeningBrace, after_scheme, after_scheme + 1);
            let close = bytes[after_scheme..path_end]
                .iter()
                .position(|&b| b == b'}')
                .map_or(path_end, |p| after_scheme + p);
            host_expr = Some(self.parse_host_interpolation(after_scheme + 1, close));
            if close < path_end {
                self.token(TokenKind::SingleInterpClosingBrace, close, close + 1);
                path_start = close + 1;
            } else {
                path_start = close;
            }
        } else {
            while path_start < path_end && !matches!(bytes[path_start], b'/' | b'{') {
                path_start += 1;
            }
        }

        let path = self.parse_interpolated_slices(path_start, path_end, SliceFlavor::Path);

        let mut query_params = Vec::new();
        if let Some(query_start) = query_start {
            self.token(TokenKind::QueryParamQuestionMark, query_start, query_start + 1);
            query_params = self.parse_query(query_start + 1, end, &mut err);
        }

        let host_part = match host_expr {
            Some(expr) => {
                if expr.err.is_some() {
                    err = err.or(Some(message::INVALID_HOST_INTERPOLATION.to_owned()));
                }
                expr
            }
            None => {
                let value = self.text(start, path_start).to_owned();
                let kind = if value.contains("://") {
                    NodeKind::HostLiteral { value }
                } else {
                    NodeKind::AtHostLiteral { value }
                };
                Node::new(self.range(start, path_start), kind)
            }
        };

        let raw = self.text(start, end).to_owned();
        if raw.ends_with("/...") {
            err = err.or(Some(message::URL_EXPR_CANNOT_END_WITH_SLASH_3DOTS.to_owned()));
        }

        self.i = end;
        Node::with_err(
            self.span_from(start),
            err.and_then(error),
            NodeKind::URLExpression {
                raw,
                host_part: host_part.boxed(),
                path,
                query_params,
            },
        )
    }

    fn parse_host_interpolation(&mut self, start: usize, end: usize) -> Node {
        let saved = self.i;
        let checkpoint = self.token_checkpoint();
        self.i = start;
        let expr = self.with_end(end, |p| p.parse_expression_in_pattern(false));
        let consumed = self.i == end;
        self.i = saved;

        if consumed && !expr.has_error_in_tree() {
            return expr;
        }
        self.tokens.truncate(checkpoint);
        if start < end {
            self.token_raw(TokenKind::InvalidInterpSlice, start, end);
        }
        Node::with_err(
            self.range(start, end),
            error(message::INVALID_HOST_INTERPOLATION),
            NodeKind::UnknownNode,
        )
    }

    /// `key=value&key2={$v}` in `[start, end)`.
    fn parse_query(&mut self, start: usize, end: usize, err: &mut Option<String>) -> Vec<Node> {
        let bytes = self.s.as_bytes();
        let mut params = Vec::new();
        let mut j = start;

        while j < end {
            let key_start = j;
            while j < end && bytes[j] != b'=' {
                j += 1;
            }
            let key = self.text(key_start, j).to_owned();
            if j >= end {
                *err = err
                    .take()
                    .or(Some(message::INVALID_QUERY_MISSING_EQUAL_SIGN_AFTER_KEY.to_owned()));
            } else {
                j += 1;
            }

            if contains_not_escaped_bracket(&key) || contains_not_escaped_dollar(&key) {
                *err = err
                    .take()
                    .or(Some(message::fmt_invalid_query_keys_cannot_contain_dollar(&key)));
            }

            let value_start = j;
            while j < end && bytes[j] != b'&' {
                j += 1;
            }
            let value = if value_start < j {
                self.parse_interpolated_slices(value_start, j, SliceFlavor::QueryValue)
            } else {
                Vec::new()
            };

            params.push(Node::new(
                self.range(key_start, j),
                NodeKind::URLQueryParameter { name: key, value },
            ));

            while j < end && bytes[j] == b'&' {
                self.token(TokenKind::QueryParamSep, j, j + 1);
                j += 1;
            }
        }

        params
    }

    /// `%https://example.com/...`, `%https://*.com` and `%://**.com`. The
    /// cursor is at `:` after the optional scheme name, `start` is the
    /// offset of `%`.
    pub(crate) fn parse_url_like_pattern(&mut self, start: usize) -> Node {
        self.assert_at(b':');
        self.bump();
        let slashes_start = self.i;
        self.bump_while(|c| c == '/');

        if self.i - slashes_start != 2 {
            return Node::with_err(
                self.span_from(start),
                error(
                    message::INVALID_URL_OR_HOST_PATT_SCHEME_SHOULD_BE_FOLLOWED_BY_COLON_SLASH_SLASH,
                ),
                NodeKind::InvalidURLPattern {
                    value: self.text(start + 1, self.i).to_owned(),
                },
            );
        }

        let after_slashes = self.i;
        self.scan_url_chars();

        let raw = self.text(start, self.i).to_owned();
        let value = raw[1..].to_owned();
        let span = self.span_from(start);

        if self.i == after_slashes {
            return Node::with_err(
                span,
                error(message::UNTERMINATED_URL_OR_HOST_PATT_MISSING_HOST),
                NodeKind::InvalidURLPattern { value },
            );
        }

        if matches(&LOOSE_HOST_PATTERN, &value) {
            return Node::with_err(
                span,
                check_host_pattern(&value).and_then(error),
                NodeKind::HostPatternLiteral { raw, value },
            );
        }

        let err = if !matches(&URL_PATTERN, &value) {
            Some(message::INVALID_URL_PATT)
        } else {
            check_url_pattern(&value).or_else(|| {
                value
                    .contains('?')
                    .then_some(message::URL_PATT_LITS_WITH_QUERY_PART_NOT_SUPPORTED_YET)
            })
        };

        Node::with_err(span, err.and_then(error), NodeKind::URLPatternLiteral { raw, value })
    }
}

/// Path of an absolute URL: after the host, before any query or fragment.
fn url_path(u: &str) -> &str {
    let after_scheme = u.split_once("://").map_or(u, |(_, rest)| rest);
    let path = after_scheme.find('/').map_or("", |i| &after_scheme[i..]);
    path.split(['?', '#']).next().unwrap_or_default()
}

/// Hosts have no credentials and a port in `0..=65535`.
fn check_host(u: &str) -> Option<&'static str> {
    let host = u.split_once("://").map_or(u, |(_, host)| host);
    if host.contains('@') {
        return Some(message::INVALID_HOST_LIT);
    }
    match host.split_once(':') {
        Some((_, port)) if port.parse::<u16>().is_err() => Some(message::INVALID_HOST_LIT),
        _ => None,
    }
}

fn check_host_pattern(u: &str) -> Option<&'static str> {
    let after_scheme = u.split_once("://").map_or(u, |(_, rest)| rest);
    let hostname = after_scheme.split(':').next().unwrap_or_default();
    let parts: Vec<&str> = hostname.split('.').collect();

    if parts.len() == 1 {
        return match parts[0] {
            "**" => None,
            "*" => Some(message::INVALID_HOST_PATT_SUGGEST_DOUBLE_STAR),
            _ => Some(message::INVALID_HOST_PATT),
        };
    }
    if u.matches("**").count() > 1 {
        return Some(message::INVALID_HOST_PATT_AT_MOST_ONE_DOUBLE_STAR);
    }
    if u.contains("***") {
        return Some(message::INVALID_HOST_PATT_ONLY_SINGLE_OR_DOUBLE_STAR);
    }
    if parts.iter().all(|p| *p == "*" || *p == "**") {
        return Some(message::INVALID_HOST_PATT);
    }
    None
}

/// `...` is only allowed once, as a trailing `/...`.
fn check_url_pattern(u: &str) -> Option<&'static str> {
    let is_prefix_pattern = u.ends_with("/...");
    if !u.contains("...") || (is_prefix_pattern && u.matches("...").count() == 1) {
        return None;
    }

    let last_segment = u.rsplit('/').next().unwrap_or_default();
    if last_segment.chars().filter(|&c| c == '.').count() > 3 {
        return Some(message::URL_PATTERNS_CANNOT_END_WITH_SLASH_MORE_THAN_4_DOTS);
    }
    Some(message::URL_PATTERN_SUBSEQUENT_DOT_EXPLANATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_patterns() {
        assert_eq!(check_host_pattern("https://**"), None);
        assert_eq!(check_host_pattern("https://*.example.com"), None);
        assert_eq!(
            check_host_pattern("https://*"),
            Some(message::INVALID_HOST_PATT_SUGGEST_DOUBLE_STAR)
        );
        assert_eq!(check_host_pattern("https://*.*"), Some(message::INVALID_HOST_PATT));
        assert_eq!(
            check_host_pattern("https://**.**.com"),
            Some(message::INVALID_HOST_PATT_AT_MOST_ONE_DOUBLE_STAR)
        );
    }

    #[test]
    fn url_patterns() {
        assert_eq!(check_url_pattern("https://example.com/a/..."), None);
        assert_eq!(
            check_url_pattern("https://example.com/a/...."),
            Some(message::URL_PATTERNS_CANNOT_END_WITH_SLASH_MORE_THAN_4_DOTS)
        );
        assert_eq!(
            check_url_pattern("https://example.com/.../a"),
            Some(message::URL_PATTERN_SUBSEQUENT_DOT_EXPLANATION)
        );
    }

    #[test]
    fn hosts() {
        assert_eq!(check_host("https://example.com:8080"), None);
        assert_eq!(check_host("https://example.com:99999"), Some(message::INVALID_HOST_LIT));
    }

    #[test]
    fn paths_of_urls() {
        assert_eq!(url_path("https://example.com/a/b?x=1"), "/a/b");
        assert_eq!(url_path("https://example.com?x=1"), "");
    }
}
