use crate::diagnostics::message::{self, UnexpectedCharContext};
use crate::parser::tests::{dump, error_messages};
use crate::parser::token::TokenKind;
use crate::{ParserOptions, parse_chunk};

#[test]
fn closing_paren_in_module() {
    let res = dump("a = 1\n)");
    insta::assert_snapshot!(res, @r"
    Chunk [0..7]
      Assignment [0..5] =
        IdentifierLiteral [0..1] a
        IntLiteral [4..5] 1
      UnknownNode [6..7] !! unexpected char ')' (code: 41) in block or module
    ");
}

#[test]
fn unexpected_char_becomes_a_token() {
    let parsed = parse_chunk(")", "<chunk>", ParserOptions::default()).expect("not cancelled");
    let token = &parsed.chunk.tokens[0];
    assert_eq!(token.kind, TokenKind::UnexpectedChar);
    assert_eq!(token.text(), ")");
}

#[test]
fn forbidden_space_is_reported() {
    let messages = error_messages("\u{a0}1");
    assert_eq!(
        messages,
        vec![message::fmt_unexpected_char('\u{a0}', UnexpectedCharContext::BlockOrModule)]
    );
    assert!(messages[0].contains("non regular space, code: 160"));
}

#[test]
fn parsing_resumes_after_unexpected_chars() {
    let res = dump(") ]\n1");
    insta::assert_snapshot!(res, @r"
    Chunk [0..5]
      UnknownNode [0..1] !! unexpected char ')' (code: 41) in block or module
      UnknownNode [2..3] !! unexpected char ']' (code: 93) in block or module
      IntLiteral [4..5] 1
    ");
}
