//! Indented text dump of a chunk, used by tests and debugging tools.
//!
//! One line per node: `Kind [start..end]`, followed by the node's scalar data
//! (names, raw lexemes, operators) and by `!! message` when the node carries
//! an error.

use std::fmt::Write;

use super::ast::{Chunk, Node, NodeKind, UnaryOperator};

pub struct ChunkPrinter<'c> {
    chunk: &'c Chunk,
    spans: bool,
    errors: bool,
    tokens: bool,
}

impl<'c> ChunkPrinter<'c> {
    pub fn new(chunk: &'c Chunk) -> Self {
        Self {
            chunk,
            spans: true,
            errors: true,
            tokens: false,
        }
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn with_errors(mut self, value: bool) -> Self {
        self.errors = value;
        self
    }

    /// Appends the token stream after the tree.
    pub fn with_tokens(mut self, value: bool) -> Self {
        self.tokens = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "Chunk")?;
        if self.spans {
            let span = self.chunk.span;
            write!(w, " [{}..{}]", u32::from(span.start()), u32::from(span.end()))?;
        }
        writeln!(w)?;

        for node in self.chunk.top_level_nodes() {
            self.format_node(node, 1, w)?;
        }

        if self.tokens {
            for token in &self.chunk.tokens {
                writeln!(
                    w,
                    "{:?} [{}..{}] {:?}",
                    token.kind,
                    u32::from(token.span.start()),
                    u32::from(token.span.end()),
                    token.text()
                )?;
            }
        }
        Ok(())
    }

    fn format_node(&self, node: &Node, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        write!(w, "{}{}", prefix, node.kind.name())?;
        if self.spans {
            write!(w, " [{}..{}]", u32::from(node.span.start()), u32::from(node.span.end()))?;
        }
        if let Some(attrs) = attrs(&node.kind) {
            write!(w, " {}", attrs)?;
        }
        if self.errors
            && let Some(err) = &node.err
        {
            write!(w, " !! {}", err.message)?;
        }
        writeln!(w)?;

        for child in node.children() {
            self.format_node(child, indent + 1, w)?;
        }
        Ok(())
    }
}

/// Scalar data shown on a node's line.
fn attrs(kind: &NodeKind) -> Option<String> {
    use NodeKind::*;
    let attrs = match kind {
        Variable { name } => format!("${name}"),
        GlobalVariable { name } => format!("$${name}"),
        IdentifierLiteral { name }
        | UnambiguousIdentifierLiteral { name }
        | PropertyNameLiteral { name }
        | SchemeLiteral { name }
        | NamedPathSegment { name }
        | PatternGroupName { name }
        | OptionExpression { name, .. }
        | CssCombinator { name }
        | CssClassSelector { name }
        | CssPseudoClassSelector { name, .. }
        | CssPseudoElementSelector { name }
        | CssTypeSelector { name }
        | CssIdSelector { name } => name.clone(),
        PatternIdentifierLiteral { name, .. } => format!("%{name}"),
        PatternNamespaceIdentifierLiteral { name, .. } => format!("%{name}."),
        BooleanLiteral { value } => value.to_string(),
        RuneLiteral { value } => format!("{value:?}"),
        IntLiteral { raw, .. }
        | FloatLiteral { raw, .. }
        | PortLiteral { raw, .. }
        | QuantityLiteral { raw, .. }
        | RateLiteral { raw, .. }
        | DateLiteral { raw, .. }
        | UnquotedStringLiteral { raw, .. }
        | RegularExpressionLiteral { raw, .. }
        | ByteSliceLiteral { raw, .. }
        | FlagLiteral { raw, .. }
        | HostPatternLiteral { raw, .. }
        | URLPatternLiteral { raw, .. }
        | AbsolutePathLiteral { raw, .. }
        | RelativePathLiteral { raw, .. }
        | AbsolutePathPatternLiteral { raw, .. }
        | RelativePathPatternLiteral { raw, .. }
        | NamedSegmentPathPatternLiteral { raw, .. }
        | InvalidAliasRelatedNode { raw } => raw.clone(),
        URLLiteral { value }
        | HostLiteral { value }
        | EmailAddressLiteral { value }
        | AtHostLiteral { value }
        | InvalidURL { value }
        | InvalidURLPattern { value }
        | InvalidPathPattern { value }
        | PathSlice { value }
        | PathPatternSlice { value }
        | URLQueryParameterValueSlice { value } => value.clone(),
        QuotedStringLiteral { value, .. }
        | MultilineStringLiteral { value, .. }
        | StringTemplateSlice { value, .. }
        | XMLText { value, .. } => format!("{value:?}"),
        UnaryExpression { operator, .. } => match operator {
            UnaryOperator::NumberNegate => "-".to_owned(),
            UnaryOperator::BoolNegate => "!".to_owned(),
        },
        BinaryExpression { operator, .. } => operator.map_or("?", |op| op.as_str()).to_owned(),
        Assignment { operator, .. } => operator.as_str().to_owned(),
        PatternPieceElement { quantifier, .. } => format!("quantifier={quantifier:?}"),
        ForStatement { chunked: true, .. } => "chunked".to_owned(),
        MultiAssignment { nillable: true, .. } => "nillable".to_owned(),
        PatternDefinition { is_lazy: true, .. } => "lazy".to_owned(),
        _ => return None,
    };
    Some(attrs)
}

impl Chunk {
    /// Dump with spans and errors, see [`ChunkPrinter`].
    pub fn dump(&self) -> String {
        ChunkPrinter::new(self).dump()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::ChunkPrinter;
    use crate::{ParserOptions, parse_chunk};

    #[test]
    fn without_spans() {
        let parsed =
            parse_chunk("a = 1", "<chunk>", ParserOptions::default()).expect("not cancelled");
        let res = ChunkPrinter::new(&parsed.chunk).with_spans(false).dump();
        assert_eq!(
            res,
            indoc! {"
                Chunk
                  Assignment =
                    IdentifierLiteral a
                    IntLiteral 1
            "}
        );
    }

    #[test]
    fn with_tokens() {
        let parsed =
            parse_chunk("(1)", "<chunk>", ParserOptions::default()).expect("not cancelled");
        let res = ChunkPrinter::new(&parsed.chunk).with_tokens(true).dump();
        insta::assert_snapshot!(res, @r#"
        Chunk [0..3]
          IntLiteral [1..2] 1
        OpeningParenthesis [0..1] "("
        ClosingParenthesis [2..3] ")"
        "#);
    }
}
