//! Keyword-led expression forms: spawn, mapping, compute, udata, concat,
//! test suites and cases, lifetime jobs, reception handlers and `sendval`.
//!
//! Each entry point is called once the keyword has been read as an
//! identifier; `start` is the keyword offset and the cursor sits right after
//! it.

use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::parser::Parser;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::core::error;
use crate::parser::scan::{is_alpha, is_unpaired_or_closing_delim};
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    pub(super) fn keyword_token(&mut self, kind: TokenKind, start: usize) {
        self.token(kind, start, self.i);
    }

    /// Consumes `word` when it comes next as a whole identifier.
    pub(super) fn eat_keyword_word(&mut self, kind: TokenKind, word: &str) -> bool {
        if !self.at_word(word) {
            return false;
        }
        let start = self.i;
        self.bump_n(word.len());
        self.token(kind, start, self.i);
        true
    }

    /// `go [meta] do {module}` or `go [meta] do f(args)`.
    pub(crate) fn parse_spawn_expression(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::GoKeyword, start);
        self.eat_space();

        let spawn = |p: &Self, err, meta: Option<Node>, module: Option<Node>| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::SpawnExpression {
                    meta: meta.map(Node::boxed),
                    module: module.map(Node::boxed),
                },
            )
        };

        if self.eof() {
            let err = error(
                message::UNTERMINATED_SPAWN_EXPRESSION_MISSING_EMBEDDED_MODULE_AFTER_GO_KEYWORD,
            );
            return spawn(self, err, None, None);
        }

        let mut meta = None;
        if !self.eat_keyword_word(TokenKind::DoKeyword, "do") {
            meta = Some(self.parse_expression());
            self.eat_space();
            if !self.eat_keyword_word(TokenKind::DoKeyword, "do") {
                let err =
                    error(message::UNTERMINATED_SPAWN_EXPRESSION_MISSING_DO_KEYWORD_AFTER_META);
                return spawn(self, err, meta, None);
            }
        }
        self.eat_space();

        if self.eof() {
            let err = error(
                message::UNTERMINATED_SPAWN_EXPRESSION_MISSING_EMBEDDED_MODULE_AFTER_DO_KEYWORD,
            );
            return spawn(self, err, meta, None);
        }

        let module = if self.at(b'{') {
            self.parse_embedded_module()
        } else {
            let expr = self.parse_expression();
            let simple_call = matches!(
                &expr.kind,
                NodeKind::CallExpression { callee, .. }
                    if matches!(callee.kind, NodeKind::IdentifierLiteral { .. })
            );
            let err = if simple_call {
                None
            } else {
                error(message::SPAWN_EXPR_ONLY_SIMPLE_CALLS_ARE_SUPPORTED)
            };
            Node::with_err(
                expr.span,
                err,
                NodeKind::EmbeddedModule {
                    manifest: None,
                    statements: vec![expr],
                    single_call_expr: true,
                },
            )
        };

        spawn(self, None, meta, Some(module))
    }

    /// `Mapping { key => value  n %int => compute(n) }`.
    pub(crate) fn parse_mapping_expression(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::MappingKeyword, start);
        self.eat_space();

        if !self.at(b'{') {
            return Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_MAPPING_EXPRESSION_MISSING_BODY),
                NodeKind::MappingExpression { entries: Vec::new() },
            );
        }
        self.eat_token(TokenKind::OpeningCurlyBracket, 1);
        self.eat_space_newline_comment();

        let mut entries = Vec::new();
        while !self.eof() && !self.at(b'}') {
            let entry_start = self.i;
            let key = self.parse_mapping_key();
            self.eat_space();

            let dynamic = matches!(key.kind, NodeKind::IdentifierLiteral { .. });

            if self.eof() {
                let span = self.span_from(entry_start);
                let kind = if dynamic {
                    let key_pattern = self.absent();
                    let value_computation = self.absent();
                    NodeKind::DynamicMappingEntry {
                        key: key_pattern.boxed(),
                        key_var: key.boxed(),
                        group_matching_variable: None,
                        value_computation: value_computation.boxed(),
                    }
                } else {
                    let value = self.absent();
                    NodeKind::StaticMappingEntry {
                        key: key.boxed(),
                        value: value.boxed(),
                    }
                };
                entries.push(Node::new(span, kind));
                return Node::with_err(
                    self.span_from(start),
                    error(message::UNTERMINATED_MAPPING_ENTRY),
                    NodeKind::MappingExpression { entries },
                );
            }

            let mut key_pattern = None;
            let mut group_matching_variable = None;
            if dynamic {
                key_pattern = Some(self.parse_mapping_key());
                self.eat_space();

                if self.peek().is_some_and(|c| is_alpha(c) || c == '_') {
                    let mut var = self.parse_ident_starting_expression();
                    if var.err.is_none()
                        && !matches!(var.kind, NodeKind::IdentifierLiteral { .. })
                    {
                        var.err = error(
                            message::INVALID_DYNAMIC_MAPPING_ENTRY_GROUP_MATCHING_VAR_EXPECTED,
                        );
                    }
                    group_matching_variable = Some(var);
                }
            }

            let mut end = self.i;
            self.eat_space();

            let mut value = None;
            if self.at_str("=>") {
                self.eat_token(TokenKind::Arrow, 2);
                self.eat_space();
                value = Some(self.parse_expression());
            }

            let err = match &value {
                Some(value) => {
                    end = usize::from(value.span.end());
                    None
                }
                None => error(message::UNTERMINATED_MAPPING_ENTRY_MISSING_ARROW_VALUE),
            };
            let value = value.unwrap_or_else(|| self.missing_at(end));

            let kind = match key_pattern {
                Some(key_pattern) => NodeKind::DynamicMappingEntry {
                    key: key_pattern.boxed(),
                    key_var: key.boxed(),
                    group_matching_variable: group_matching_variable.map(Node::boxed),
                    value_computation: value.boxed(),
                },
                None => NodeKind::StaticMappingEntry {
                    key: key.boxed(),
                    value: value.boxed(),
                },
            };
            entries.push(Node::with_err(self.range(entry_start, end), err, kind));

            self.eat_space_newline_comment();
        }

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else {
            error(message::UNTERMINATED_MAPPING_EXPRESSION_MISSING_CLOSING_BRACE)
        };
        Node::with_err(self.span_from(start), err, NodeKind::MappingExpression { entries })
    }

    fn parse_mapping_key(&mut self) -> Node {
        let key = self.parse_expression();
        if key.is_missing_expression() && !self.eof() {
            return self.unexpected_char_node(UnexpectedCharContext::MappingExpression);
        }
        key
    }

    /// `comp expr`.
    pub(crate) fn parse_compute_expression(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::CompKeyword, start);
        self.eat_space();
        let arg = self.parse_expression();
        Node::new(self.span_from(start), NodeKind::ComputeExpression { arg: arg.boxed() })
    }

    /// `udata root { child { grandchild }, leaf }`.
    pub(crate) fn parse_udata_literal(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::UdataKeyword, start);
        self.eat_space();

        let root = self.parse_expression();
        self.eat_space();

        if !self.at(b'{') {
            return Node::new(
                self.span_from(start),
                NodeKind::UDataLiteral {
                    root: root.boxed(),
                    children: Vec::new(),
                },
            );
        }
        self.eat_token(TokenKind::OpeningCurlyBracket, 1);
        self.eat_space_newline_comma_comment();

        let mut children = Vec::new();
        while !self.eof() && !self.at(b'}') {
            let (entry, cont) = self.parse_udata_entry();
            children.push(entry);
            if !cont {
                return Node::new(
                    self.span_from(start),
                    NodeKind::UDataLiteral {
                        root: root.boxed(),
                        children,
                    },
                );
            }
            self.eat_space_newline_comma_comment();
        }

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else {
            error(message::UNTERMINATED_UDATA_LIT_MISSING_CLOSING_BRACE)
        };
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::UDataLiteral {
                root: root.boxed(),
                children,
            },
        )
    }

    /// One entry of a udata tree. The flag is `false` when the input ended
    /// inside the entry and the enclosing loops should stop.
    fn parse_udata_entry(&mut self) -> (Node, bool) {
        self.consume_fuel();
        let start = self.i;

        let mut value = self.parse_expression();
        self.eat_space();

        if !value.is_missing_expression() && self.at(b':') {
            self.eat_token(TokenKind::Colon, 1);
            self.eat_space();
            let pair_value = self.parse_expression();
            value = Node::new(
                self.range(start, usize::from(pair_value.span.end())),
                NodeKind::UDataPair {
                    key: value.boxed(),
                    value: pair_value.boxed(),
                },
            );
            self.eat_space();
        }

        let entry = |p: &Self, err, value: Node, children| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::UDataEntry {
                    value: value.boxed(),
                    children,
                },
            )
        };

        if value.is_missing_expression() && !self.eof() {
            let unknown = self.unexpected_char_node(UnexpectedCharContext::UdataLiteral);
            return (entry(self, None, unknown, Vec::new()), true);
        }
        if self.eof() {
            let err = error(message::UNTERMINATED_UDATA_ENTRY);
            return (entry(self, err, value, Vec::new()), false);
        }
        if !self.at(b'{') {
            let leaf = Node::new(
                self.range(start, usize::from(value.span.end())),
                NodeKind::UDataEntry {
                    value: value.boxed(),
                    children: Vec::new(),
                },
            );
            return (leaf, true);
        }

        if !self.enter_recursion() {
            let unknown = self.recursion_limit_node();
            return (entry(self, None, value, vec![unknown]), false);
        }

        self.eat_token(TokenKind::OpeningCurlyBracket, 1);
        self.eat_space_newline_comment();

        let mut children = Vec::new();
        while !self.eof() && !self.at(b'}') {
            let (child, cont) = self.parse_udata_entry();
            children.push(child);
            if !cont {
                self.exit_recursion();
                return (entry(self, None, value, children), false);
            }
            self.eat_space_newline_comma_comment();
        }
        self.exit_recursion();

        let err = if self.eat_token_if(TokenKind::ClosingCurlyBracket, "}") {
            None
        } else {
            error(message::UNTERMINATED_UDATA_ENTRY_MISSING_CLOSING_BRACE)
        };
        (entry(self, err, value, children), true)
    }

    /// `concat a b ...c`. Inside parentheses the elements may span lines.
    pub(crate) fn parse_concatenation_expression(
        &mut self,
        start: usize,
        preceded_by_paren: bool,
    ) -> Node {
        self.keyword_token(TokenKind::ConcatKeyword, start);
        self.eat_space();

        let mut elements = Vec::new();
        while self.peek().is_some_and(|c| !is_unpaired_or_closing_delim(c)) {
            let elem_start = self.i;
            let element = if self.eat_token_if(TokenKind::ThreeDots, "...") {
                let expr = self.parse_expression();
                Node::new(
                    self.range(elem_start, usize::from(expr.span.end())),
                    NodeKind::ElementSpreadElement { expr: expr.boxed() },
                )
            } else {
                self.parse_expression()
            };
            let stuck = element.is_missing_expression() && self.i == elem_start;
            elements.push(element);
            if stuck {
                elements.push(
                    self.unexpected_char_node(UnexpectedCharContext::ParenthesizedExpression),
                );
            }

            if preceded_by_paren {
                self.eat_space_newline_comment();
            } else {
                self.eat_space();
            }
        }

        let err = if elements.is_empty() {
            error(message::UNTERMINATED_CONCAT_EXPR_ELEMS_EXPECTED)
        } else {
            None
        };
        Node::with_err(self.span_from(start), err, NodeKind::ConcatenationExpression { elements })
    }

    /// `testsuite [meta] {module}`.
    pub(crate) fn parse_test_suite_expression(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::TestsuiteKeyword, start);
        let (meta, module, err) =
            self.parse_test_meta_and_module(
                message::UNTERMINATED_TESTSUITE_EXPRESSION_MISSING_BLOCK,
            );
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::TestSuiteExpression {
                meta: meta.map(Node::boxed),
                module: module.map(Node::boxed),
                is_statement: false,
            },
        )
    }

    /// `testcase [meta] {module}`.
    pub(crate) fn parse_test_case_expression(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::TestcaseKeyword, start);
        let (meta, module, err) =
            self.parse_test_meta_and_module(
                message::UNTERMINATED_TESTCASE_EXPRESSION_MISSING_BLOCK,
            );
        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::TestCaseExpression {
                meta: meta.map(Node::boxed),
                module: module.map(Node::boxed),
                is_statement: false,
            },
        )
    }

    fn parse_test_meta_and_module(
        &mut self,
        missing_block: &str,
    ) -> (Option<Node>, Option<Node>, Option<crate::diagnostics::ParsingError>) {
        self.eat_space();
        if self.eof() {
            return (None, None, error(missing_block));
        }

        let mut meta = None;
        if !self.at(b'{') {
            meta = Some(self.parse_expression());
            self.eat_space();
        }

        if !self.at(b'{') {
            return (meta, None, error(missing_block));
        }
        let module = self.parse_embedded_module();
        (meta, Some(module), None)
    }

    /// `lifetimejob meta [for subject] {module}`.
    pub(crate) fn parse_lifetimejob_expression(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::LifetimejobKeyword, start);
        self.eat_space();

        if self.eof() {
            let meta = self.absent();
            return Node::with_err(
                self.span_from(start),
                error(message::UNTERMINATED_LIFETIMEJOB_EXPRESSION_MISSING_META),
                NodeKind::LifetimejobExpression {
                    meta: meta.boxed(),
                    subject: None,
                    module: None,
                },
            );
        }

        let meta = self.parse_expression();
        self.eat_space();

        let mut subject = None;
        if self.eat_keyword_word(TokenKind::ForKeyword, "for") {
            self.eat_space();
            subject = Some(self.parse_expression());
            self.eat_space();
        }

        let (module, err) = if self.at(b'{') {
            (Some(self.parse_embedded_module()), None)
        } else {
            (
                None,
                error(message::UNTERMINATED_LIFETIMEJOB_EXPRESSION_MISSING_EMBEDDED_MODULE),
            )
        };

        Node::with_err(
            self.span_from(start),
            err,
            NodeKind::LifetimejobExpression {
                meta: meta.boxed(),
                subject: subject.map(Node::boxed),
                module: module.map(Node::boxed),
            },
        )
    }

    /// `on received %pattern handler`.
    pub(crate) fn parse_reception_handler_expression(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::OnKeyword, start);
        self.eat_space();

        let handler_node = |p: &Self, err, pattern: Node, handler: Node| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::ReceptionHandlerExpression {
                    pattern: pattern.boxed(),
                    handler: handler.boxed(),
                },
            )
        };

        if self.at_expression_end() {
            let (pattern, handler) = (self.absent(), self.absent());
            let err = error(message::UNTERMINATED_RECEP_HANDLER_MISSING_RECEIVED_KEYWORD);
            return handler_node(self, err, pattern, handler);
        }

        let mut missing_received = None;
        if !self.eat_keyword_word(TokenKind::ReceivedKeyword, "received") {
            self.parse_expression();
            missing_received = error(message::INVALID_RECEP_HANDLER_MISSING_RECEIVED_KEYWORD);
        }
        self.eat_space();

        if self.at_expression_end() {
            let (pattern, handler) = (self.absent(), self.absent());
            let err = error(message::UNTERMINATED_RECEP_HANDLER_MISSING_PATTERN);
            return handler_node(self, err, pattern, handler);
        }

        let pattern = self.parse_expression();
        self.eat_space();

        if self.at_expression_end() {
            let handler = self.absent();
            let err = error(message::UNTERMINATED_RECEP_HANDLER_MISSING_HANDLER_OR_PATTERN);
            return handler_node(self, err, pattern, handler);
        }

        let handler = self.parse_expression();
        self.eat_space();
        handler_node(self, missing_received, pattern, handler)
    }

    /// `sendval value to receiver`.
    pub(crate) fn parse_send_value_expression(&mut self, start: usize) -> Node {
        self.keyword_token(TokenKind::SendvalKeyword, start);
        self.eat_space();

        let send = |p: &Self, err, value: Option<Node>, receiver: Option<Node>| {
            Node::with_err(
                p.span_from(start),
                err,
                NodeKind::SendValueExpression {
                    value: value.map(Node::boxed),
                    receiver: receiver.map(Node::boxed),
                },
            )
        };

        if self.at_expression_end() {
            let err = error(message::UNTERMINATED_SENDVALUE_EXPRESSION_MISSING_VALUE);
            return send(self, err, None, None);
        }

        let value = self.parse_expression();
        self.eat_space();

        if !self.eat_keyword_word(TokenKind::ToKeyword, "to") {
            let err =
                error(message::INVALID_SENDVALUE_EXPRESSION_MISSING_TO_KEYWORD_BEFORE_RECEIVER);
            let receiver = (!self.at_expression_end()).then(|| self.parse_expression());
            return send(self, err, Some(value), receiver);
        }
        self.eat_space();

        if self.at_expression_end() {
            let err = error(message::UNTERMINATED_SENDVALUE_EXPRESSION_MISSING_TO_KEYWORD);
            return send(self, err, Some(value), None);
        }

        let receiver = self.parse_expression();
        send(self, None, Some(value), Some(receiver))
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::message;
    use crate::parser::tests::{dump, error_messages};

    #[test]
    fn compute_expression() {
        let res = dump("comp 1");
        insta::assert_snapshot!(res, @r"
        Chunk [0..6]
          ComputeExpression [0..6]
            IntLiteral [5..6] 1
        ");
    }

    #[test]
    fn concatenation_without_elements() {
        let res = dump("(concat)");
        insta::assert_snapshot!(res, @r"
        Chunk [0..8]
          ConcatenationExpression [1..7] !! unterminated concatenation expression: at least one element is expected after keyword 'concat'
        ");
    }

    #[test]
    fn spawn_of_method_call_is_rejected() {
        let messages = error_messages("go do $a.b()");
        assert_eq!(messages, vec![message::SPAWN_EXPR_ONLY_SIMPLE_CALLS_ARE_SUPPORTED]);
    }

    #[test]
    fn spawn_of_simple_call() {
        assert!(error_messages("go do f()").is_empty());
        assert!(error_messages("go do f(1)").is_empty());
    }
    #[test]
    fn send_value_expression() {
        let res = dump("sendval $a to $b");
        insta::assert_snapshot!(res, @r"
        Chunk [0..16]
          SendValueExpression [0..16]
            Variable [8..10] $a
            Variable [14..16] $b
        ");
    }

    #[test]
    fn send_value_expression_errors() {
        let messages = error_messages("sendval");
        assert_eq!(messages, vec![message::UNTERMINATED_SENDVALUE_EXPRESSION_MISSING_VALUE]);

        let messages = error_messages("sendval $a $b");
        assert_eq!(
            messages,
            vec![message::INVALID_SENDVALUE_EXPRESSION_MISSING_TO_KEYWORD_BEFORE_RECEIVER]
        );

        let messages = error_messages("sendval $a to");
        assert_eq!(messages, vec![message::UNTERMINATED_SENDVALUE_EXPRESSION_MISSING_TO_KEYWORD]);
    }
}
