//! Source reconstruction from the token stream and the raw lexemes kept on
//! leaf nodes.
//!
//! Bytes covered by neither a token nor a leaf lexeme (inline whitespace) are
//! written as spaces, so `unparse` normalizes inline space but reparses to
//! the same tree.

use std::borrow::Cow;

use rowan::TextRange;

use super::ast::{Chunk, Node, NodeKind};
use super::walk::{Visitor, walk_node};

impl Chunk {
    /// Text that parses back to this chunk.
    pub fn unparse(&self) -> String {
        let mut writer = RawWriter {
            out: vec![b' '; usize::from(self.span.end())],
        };
        for token in &self.tokens {
            writer.write(token.span, token.text());
        }
        writer.visit_chunk(self);
        String::from_utf8_lossy(&writer.out).into_owned()
    }
}

struct RawWriter {
    out: Vec<u8>,
}

impl RawWriter {
    /// Lexemes whose length differs from their span are not source text
    /// (decoded values) and are skipped.
    fn write(&mut self, span: TextRange, text: &str) {
        let start = usize::from(span.start());
        let end = usize::from(span.end());
        if text.len() != end - start || end > self.out.len() {
            return;
        }
        self.out[start..end].copy_from_slice(text.as_bytes());
    }
}

impl Visitor for RawWriter {
    fn visit_node(&mut self, node: &Node) {
        if let Some(text) = leaf_text(&node.kind) {
            self.write(node.span, &text);
        }
        walk_node(self, node);
    }
}

/// Source text of a node that stores its lexeme.
fn leaf_text(kind: &NodeKind) -> Option<Cow<'_, str>> {
    use NodeKind::*;
    let text = match kind {
        Variable { name } => Cow::Owned(format!("${name}")),
        GlobalVariable { name } => Cow::Owned(format!("$${name}")),
        IdentifierLiteral { name } | UnambiguousIdentifierLiteral { name } => {
            Cow::Borrowed(name.as_str())
        }
        PropertyNameLiteral { name } => Cow::Owned(format!(".{name}")),
        PatternIdentifierLiteral { name, unprefixed } => match unprefixed {
            true => Cow::Borrowed(name.as_str()),
            false => Cow::Owned(format!("%{name}")),
        },
        BooleanLiteral { value } => Cow::Borrowed(if *value { "true" } else { "false" }),
        NilLiteral => Cow::Borrowed("nil"),
        RuneLiteral { value } => Cow::Owned(format!("'{value}'")),
        IntLiteral { raw, .. }
        | FloatLiteral { raw, .. }
        | PortLiteral { raw, .. }
        | QuantityLiteral { raw, .. }
        | RateLiteral { raw, .. }
        | DateLiteral { raw, .. }
        | QuotedStringLiteral { raw, .. }
        | UnquotedStringLiteral { raw, .. }
        | MultilineStringLiteral { raw, .. }
        | RegularExpressionLiteral { raw, .. }
        | ByteSliceLiteral { raw, .. }
        | FlagLiteral { raw, .. }
        | HostPatternLiteral { raw, .. }
        | URLPatternLiteral { raw, .. }
        | AbsolutePathLiteral { raw, .. }
        | RelativePathLiteral { raw, .. }
        | AbsolutePathPatternLiteral { raw, .. }
        | RelativePathPatternLiteral { raw, .. }
        | StringTemplateSlice { raw, .. }
        | XMLText { raw, .. }
        | InvalidAliasRelatedNode { raw } => Cow::Borrowed(raw.as_str()),
        URLLiteral { value }
        | HostLiteral { value }
        | EmailAddressLiteral { value }
        | InvalidURL { value }
        | InvalidURLPattern { value }
        | InvalidPathPattern { value }
        | PathSlice { value }
        | PathPatternSlice { value }
        | URLQueryParameterValueSlice { value } => Cow::Borrowed(value.as_str()),
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::{ParserOptions, parse_chunk};

    fn reparse(src: &str) -> (String, bool) {
        let first = parse_chunk(src, "<chunk>", ParserOptions::default()).expect("not cancelled");
        let text = first.chunk.unparse();
        let second =
            parse_chunk(&text, "<chunk>", ParserOptions::default()).expect("not cancelled");
        (text, first.chunk == second.chunk)
    }

    #[test]
    fn unparse_restores_the_source() {
        let src = indoc! {r#"
            # comment
            a = 1
            $c.d[0] = "s"
            f(x)
        "#};
        let (text, equal) = reparse(src);
        assert_eq!(text, src);
        assert!(equal);
    }

    #[test]
    fn inline_whitespace_is_normalized() {
        let (text, equal) = reparse("a =\t1");
        assert_eq!(text, "a = 1");
        assert!(equal);
    }

    #[test]
    fn reparse_of_invalid_input_is_equal() {
        let sources = [
            "(1 + ",
            "{a: 1, b}",
            "fn(x %int){",
            "h<div>{1}</span>",
            "$a.",
            "a = )",
            "const (a = 1)\nmanifest {}\nvar b %int = 2",
            "if (a > 1) { return [1, 2] } else { f(x) }",
        ];
        for src in sources {
            let (_, equal) = reparse(src);
            assert!(equal, "{src:?}");
        }
    }
}
