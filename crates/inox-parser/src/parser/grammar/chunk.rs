//! Chunk: the root production.
//!
//! Prologue order is fixed: shebang, `includable-chunk`, `const`, `preinit`,
//! `manifest`. Included chunks have no `preinit` nor `manifest`.

use crate::diagnostics::ParsingErrorKind;
use crate::diagnostics::message;
use crate::parser::Parser;
use crate::parser::ast::{Chunk, Node, NodeKind};
use crate::parser::core::error_of;
use crate::parser::token::TokenKind;

impl Parser<'_, '_> {
    pub(crate) fn parse_chunk(&mut self) -> Chunk {
        self.eat_shebang();
        self.eat_space_newline_semicolon_comment();

        let includable_chunk_desc = self.parse_includable_chunk_description();
        self.eat_space_newline_semicolon_comment();

        let global_constant_declarations = self.parse_global_constant_declarations();
        self.eat_space_newline_semicolon_comment();

        let (preinit, manifest) = if includable_chunk_desc.is_some() {
            (None, None)
        } else {
            let preinit = self.parse_preinit_statement();
            self.eat_space_newline_semicolon_comment();
            let manifest = self.parse_manifest_if_present();
            (preinit, manifest)
        };

        let statements = self.parse_statement_sequence(false);

        Chunk {
            span: self.range(0, self.s.len()),
            global_constant_declarations: global_constant_declarations.map(Node::boxed),
            preinit: preinit.map(Node::boxed),
            manifest: manifest.map(Node::boxed),
            includable_chunk_desc: includable_chunk_desc.map(Node::boxed),
            statements,
            tokens: self.take_tokens(),
        }
    }

    /// `#!...` on the first line is kept as a comment token.
    fn eat_shebang(&mut self) {
        if self.i != 0 || !self.at_str("#!") {
            return;
        }
        self.bump_while(|c| c != '\n');
        self.token_raw(TokenKind::Comment, 0, self.i);
    }

    fn parse_includable_chunk_description(&mut self) -> Option<Node> {
        if !self.at_word("includable-chunk") {
            return None;
        }
        let start = self.i;
        self.eat_token(TokenKind::IncludableChunkKeyword, "includable-chunk".len());
        Some(Node::new(self.span_from(start), NodeKind::IncludableChunkDescription))
    }

    /// `preinit {...}`, run before the manifest is evaluated.
    fn parse_preinit_statement(&mut self) -> Option<Node> {
        if !self.at_word("preinit") {
            return None;
        }
        let start = self.i;
        self.eat_token(TokenKind::PreinitKeyword, "preinit".len());
        self.eat_space();

        if !self.at(b'{') {
            return Some(Node::with_err(
                self.span_from(start),
                error_of(
                    ParsingErrorKind::MissingBlock,
                    message::PREINIT_KEYWORD_SHOULD_BE_FOLLOWED_BY_A_BLOCK,
                ),
                NodeKind::PreinitStatement { block: None },
            ));
        }

        let block = self.parse_block();
        Some(Node::new(
            self.span_from(start),
            NodeKind::PreinitStatement {
                block: Some(block.boxed()),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::dump;

    #[test]
    fn prologue() {
        let res = dump("preinit {}\nmanifest {}\n1");
        insta::assert_snapshot!(res, @r"
        Chunk [0..24]
          PreinitStatement [0..10]
            Block [8..10]
          Manifest [11..22]
            ObjectLiteral [20..22]
          IntLiteral [23..24] 1
        ");
    }

    #[test]
    fn includable_chunk_has_no_manifest() {
        let res = dump("includable-chunk\nmanifest {}");
        insta::assert_snapshot!(res, @r"
        Chunk [0..28]
          IncludableChunkDescription [0..16]
          CallExpression [17..28]
            IdentifierLiteral [17..25] manifest
            ObjectLiteral [26..28]
        ");
    }
}
