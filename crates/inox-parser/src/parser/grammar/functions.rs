//! Function expressions, declarations and function patterns.

use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::diagnostics::{ParsingError, ParsingErrorKind};
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::{error, error_of};
use crate::parser::scan::{is_alpha, is_keyword};
use crate::parser::token::TokenKind;

/// Parenthesized parameter list.
struct Parameters {
    nodes: Vec<Node>,
    is_variadic: bool,
    err: Option<ParsingError>,
}

/// Body of a function expression: a block or `=> expr`.
struct FunctionBody {
    body: Option<Node>,
    is_body_expression: bool,
    err: Option<ParsingError>,
}

impl Parser<'_, '_> {
    /// `fn [captures] [name](params) [%ret] {block}` or `... => expr`. The
    /// `fn` word is consumed, `start` is its offset. A name turns the
    /// expression into a [`NodeKind::FunctionDeclaration`].
    pub(crate) fn parse_function(&mut self, start: usize) -> Node {
        self.nested(|p| p.parse_function_inner(start))
    }

    fn parse_function_inner(&mut self, start: usize) -> Node {
        self.token(TokenKind::FnKeyword, start, start + 2);
        self.eat_space();

        let mut captured_local_variables = Vec::new();
        let mut has_capture_list = false;
        if self.at(b'[') {
            has_capture_list = true;
            if let Err(err) = self.parse_capture_list(&mut captured_local_variables) {
                return function_node(
                    self.span_from(start),
                    Some(err),
                    captured_local_variables,
                    Parameters::empty(),
                    None,
                    FunctionBody::none(),
                );
            }
            self.eat_space();
        }

        let mut name = None;
        if self.peek().is_some_and(is_alpha) {
            let name_start = self.i;
            let mut ident = self.parse_ident_starting_expression();
            if !matches!(ident.kind, NodeKind::IdentifierLiteral { .. }) {
                let err = error(message::fmt_func_name_should_be_an_ident_not(ident.kind.name()));
                let function = self.absent();
                return Node::with_err(
                    self.span_from(start),
                    err,
                    NodeKind::FunctionDeclaration {
                        function: function.boxed(),
                        name: ident.boxed(),
                    },
                );
            }
            if ident.err.is_none() && is_keyword(self.text(name_start, self.i)) {
                ident.err = error(message::KEYWORDS_SHOULD_NOT_BE_USED_AS_FN_NAMES);
            }
            name = Some(ident);
        }

        if !self.at(b'(') {
            let msg = if has_capture_list && name.is_none() {
                message::CAPTURE_LIST_SHOULD_BE_FOLLOWED_BY_PARAMS
            } else {
                message::FN_KEYWORD_OR_FUNC_NAME_SHOULD_BE_FOLLOWED_BY_PARAMS
            };
            let err = error_of(ParsingErrorKind::InvalidNext, msg);
            return declaration_or_function(
                self.span_from(start),
                name,
                err,
                captured_local_variables,
                Parameters::empty(),
                None,
                FunctionBody::none(),
            );
        }

        let parameters = self.parse_parameters(false);
        if parameters.err.is_some() {
            let err = parameters.err.clone();
            return declaration_or_function(
                self.span_from(start),
                name,
                err,
                captured_local_variables,
                parameters,
                None,
                FunctionBody::none(),
            );
        }

        self.eat_space();
        let return_type = if self.at(b'%') {
            Some(self.parse_percent_prefixed_pattern(false))
        } else {
            None
        };
        self.eat_space();

        let body = self.parse_function_body(return_type.is_some());
        let end = body
            .body
            .as_ref()
            .map_or(self.i, |b| usize::from(b.span.end()));
        let err = body.err.clone();

        declaration_or_function(
            self.range(start, end),
            name,
            err,
            captured_local_variables,
            parameters,
            return_type,
            body,
        )
    }

    /// `[a, b]`, the cursor is at `[`. Fails when the list is unterminated.
    fn parse_capture_list(&mut self, captured: &mut Vec<Node>) -> Result<(), ParsingError> {
        self.eat_token(TokenKind::OpeningBracket, 1);
        self.eat_space();

        while !self.eof() && !self.at(b']') {
            let mut local = self.parse_expression();
            if local.is_missing_expression() {
                if self.eof() {
                    break;
                }
                captured.push(self.unexpected_char_node(UnexpectedCharContext::CaptureList));
            } else {
                if local.err.is_none()
                    && !matches!(local.kind, NodeKind::IdentifierLiteral { .. })
                {
                    local.err = error(message::CAPTURE_LIST_SHOULD_ONLY_CONTAIN_IDENTIFIERS);
                }
                captured.push(local);
            }
            self.eat_space_comma();
        }

        if self.eat_token_if(TokenKind::ClosingBracket, "]") {
            Ok(())
        } else {
            Err(ParsingError::new(
                ParsingErrorKind::InvalidNext,
                message::UNTERMINATED_CAPTURE_LIST_MISSING_CLOSING_BRACKET,
            ))
        }
    }

    /// `(a %int, ...rest)`, the cursor is at `(`. In function patterns a
    /// parameter can be a bare pattern: `%fn(%int, %str)`.
    fn parse_parameters(&mut self, in_function_pattern: bool) -> Parameters {
        self.eat_token(TokenKind::OpeningParenthesis, 1);

        let mut nodes = Vec::new();
        let mut is_variadic = false;

        while !self.eof() && !self.at(b')') {
            self.eat_space_newline_comma();
            if self.eof() || self.at(b')') {
                break;
            }

            let param_err = if is_variadic {
                error(message::VARIADIC_PARAM_IS_UNIQUE_AND_SHOULD_BE_LAST_PARAM)
            } else {
                None
            };
            let param_start = self.i;
            if self.eat_token_if(TokenKind::ThreeDots, "...") {
                is_variadic = true;
            }

            let var = self.parse_expression_in_pattern(false);
            if var.is_missing_expression() {
                nodes.push(self.unexpected_char_node(UnexpectedCharContext::Parameters));
                self.eat_space_newline_comma();
                continue;
            }

            let is_ident = matches!(var.kind, NodeKind::IdentifierLiteral { .. });
            if is_ident {
                self.eat_space();
                let type_annotation = if self.at_expression_end() {
                    None
                } else {
                    Some(self.parse_expression_in_pattern(true))
                };
                let mut err = param_err;
                if err.is_none() && var.ident_name().is_some_and(is_keyword) {
                    err = error(message::KEYWORDS_SHOULD_NOT_BE_USED_AS_PARAM_NAMES);
                }
                let end = type_annotation
                    .as_ref()
                    .map_or(usize::from(var.span.end()), |t| usize::from(t.span.end()));
                nodes.push(Node::with_err(
                    self.range(param_start, end),
                    err,
                    NodeKind::FunctionParameter {
                        var: Some(var.boxed()),
                        type_annotation: type_annotation.map(Node::boxed),
                        is_variadic,
                    },
                ));
            } else if in_function_pattern && is_pattern_param(&var) {
                nodes.push(Node::with_err(
                    self.range(param_start, usize::from(var.span.end())),
                    param_err,
                    NodeKind::FunctionParameter {
                        var: None,
                        type_annotation: Some(var.boxed()),
                        is_variadic,
                    },
                ));
            } else {
                let msg = if in_function_pattern {
                    message::PARAM_LIST_OF_FUNC_PATT_SHOULD_CONTAIN_PARAMETERS_SEP_BY_COMMAS
                } else {
                    message::PARAM_LIST_OF_FUNC_SHOULD_CONTAIN_PARAMETERS_SEP_BY_COMMAS
                };
                let mut var = var;
                var.err = error(msg);
                nodes.push(var);
            }

            self.eat_space_newline_comma();
        }

        let err = if self.eof() {
            error(message::UNTERMINATED_PARAM_LIST_MISSING_CLOSING_PAREN)
        } else if self.eat_token_if(TokenKind::ClosingParenthesis, ")") {
            None
        } else {
            error(message::INVALID_FUNC_SYNTAX)
        };

        Parameters {
            nodes,
            is_variadic,
            err,
        }
    }

    fn parse_function_body(&mut self, has_return_type: bool) -> FunctionBody {
        let msg = if has_return_type {
            message::RETURN_TYPE_OF_FUNC_SHOULD_BE_FOLLOWED_BY_BLOCK_OR_ARROW
        } else {
            message::PARAM_LIST_OF_FUNC_SHOULD_BE_FOLLOWED_BY_BLOCK_OR_ARROW
        };

        match self.peek() {
            None => FunctionBody {
                body: None,
                is_body_expression: false,
                err: error_of(ParsingErrorKind::MissingFnBody, msg),
            },
            Some('{') => FunctionBody {
                body: Some(self.parse_block()),
                is_body_expression: false,
                err: None,
            },
            Some('=') if self.byte(1) == Some(b'>') => {
                self.eat_token(TokenKind::Arrow, 2);
                self.eat_space();
                let expr = self.parse_expression_in_pattern(false);
                FunctionBody {
                    body: Some(expr),
                    is_body_expression: true,
                    err: None,
                }
            }
            Some(_) => FunctionBody {
                body: None,
                is_body_expression: false,
                err: error_of(ParsingErrorKind::InvalidNext, msg),
            },
        }
    }

    /// `%fn(params) [%ret]`, or `fn(params) [%ret]` in a pattern context. The
    /// `%fn` or `fn` word is consumed, `start` is its offset.
    pub(crate) fn parse_function_pattern(&mut self, start: usize) -> Node {
        self.nested(|p| p.parse_function_pattern_inner(start))
    }

    fn parse_function_pattern_inner(&mut self, start: usize) -> Node {
        if self.text(start, start + 1) == "%" {
            self.token(TokenKind::PercentFn, start, start + 3);
        } else {
            self.token(TokenKind::FnKeyword, start, start + 2);
        }
        self.eat_space();

        if !self.at(b'(') {
            return Node::with_err(
                self.span_from(start),
                error_of(
                    ParsingErrorKind::InvalidNext,
                    message::PERCENT_FN_SHOULD_BE_FOLLOWED_BY_PARAMETERS,
                ),
                NodeKind::FunctionPatternExpression {
                    parameters: Vec::new(),
                    return_type: None,
                    is_variadic: false,
                },
            );
        }

        let saved = std::mem::replace(&mut self.in_pattern, false);
        let Parameters {
            nodes: parameters,
            is_variadic,
            err,
        } = self.parse_parameters(true);

        let mut end = self.i;
        let mut return_type = None;
        if err.is_none() {
            self.eat_space();
            if self.at(b'%') {
                let pattern = self.parse_percent_prefixed_pattern(false);
                end = usize::from(pattern.span.end());
                return_type = Some(pattern.boxed());
            }
        }
        self.in_pattern = saved;

        Node::with_err(
            self.range(start, end),
            err,
            NodeKind::FunctionPatternExpression {
                parameters,
                return_type,
                is_variadic,
            },
        )
    }
}

impl Parameters {
    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            is_variadic: false,
            err: None,
        }
    }
}

impl FunctionBody {
    fn none() -> Self {
        Self {
            body: None,
            is_body_expression: false,
            err: None,
        }
    }
}

/// Pattern forms accepted as anonymous parameters of a function pattern.
fn is_pattern_param(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::PatternCallExpression { .. }
            | NodeKind::PatternNamespaceMemberExpression { .. }
            | NodeKind::PatternIdentifierLiteral { .. }
            | NodeKind::ObjectPatternLiteral { .. }
            | NodeKind::ListPatternLiteral { .. }
            | NodeKind::ComplexStringPatternPiece { .. }
            | NodeKind::RegularExpressionLiteral { .. }
    )
}

fn function_node(
    span: rowan::TextRange,
    err: Option<ParsingError>,
    captured_local_variables: Vec<Node>,
    parameters: Parameters,
    return_type: Option<Node>,
    body: FunctionBody,
) -> Node {
    Node::with_err(
        span,
        err,
        NodeKind::FunctionExpression {
            captured_local_variables,
            parameters: parameters.nodes,
            return_type: return_type.map(Node::boxed),
            is_variadic: parameters.is_variadic,
            body: body.body.map(Node::boxed),
            is_body_expression: body.is_body_expression,
        },
    )
}

/// Wraps the function in a declaration when it is named; the error then
/// lives on the declaration.
fn declaration_or_function(
    span: rowan::TextRange,
    name: Option<Node>,
    err: Option<ParsingError>,
    captured_local_variables: Vec<Node>,
    parameters: Parameters,
    return_type: Option<Node>,
    body: FunctionBody,
) -> Node {
    match name {
        Some(name) => {
            let function = function_node(
                span,
                None,
                captured_local_variables,
                parameters,
                return_type,
                body,
            );
            Node::with_err(
                span,
                err,
                NodeKind::FunctionDeclaration {
                    function: function.boxed(),
                    name: name.boxed(),
                },
            )
        }
        None => function_node(span, err, captured_local_variables, parameters, return_type, body),
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::dump;

    #[test]
    fn function_with_typed_parameter() {
        let res = dump("fn(x %int){}");
        insta::assert_snapshot!(res, @r"
        Chunk [0..12]
          FunctionExpression [0..12]
            FunctionParameter [3..9]
              IdentifierLiteral [3..4] x
              PatternIdentifierLiteral [5..9] %int
            Block [10..12]
        ");
    }
}
