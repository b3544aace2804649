use rowan::TextRange;

use crate::diagnostics::message;
use crate::parser::tests::{dump, error_messages};
use crate::parser::token::{Token, TokenKind};
use crate::{ParserOptions, parse_chunk};

#[test]
fn empty_chunk() {
    let parsed = parse_chunk("", "<chunk>", ParserOptions::default()).expect("not cancelled");

    assert!(parsed.chunk.statements.is_empty());
    assert!(parsed.errors.is_none());
    insta::assert_snapshot!(parsed.chunk.dump(), @"Chunk [0..0]");
}

#[test]
fn newline_token_between_statements() {
    let parsed = parse_chunk("1\n2", "<chunk>", ParserOptions::default()).expect("not cancelled");

    assert_eq!(
        parsed.chunk.tokens,
        vec![Token::new(TokenKind::Newline, TextRange::new(1.into(), 2.into()))]
    );
    insta::assert_snapshot!(parsed.chunk.dump(), @r"
    Chunk [0..3]
      IntLiteral [0..1] 1
      IntLiteral [2..3] 2
    ");
}

#[test]
fn member_then_index() {
    let res = dump("$a.b[0]");
    insta::assert_snapshot!(res, @r"
    Chunk [0..7]
      IndexExpression [0..7]
        MemberExpression [0..4]
          Variable [0..2] $a
          IdentifierLiteral [3..4] b
        IntLiteral [5..6] 0
    ");
}

#[test]
fn or_chain_of_comparisons() {
    let res = dump("(a > b or c > d)");
    insta::assert_snapshot!(res, @r"
    Chunk [0..16]
      BinaryExpression [0..16] or
        BinaryExpression [1..6] >
          IdentifierLiteral [1..2] a
          IdentifierLiteral [5..6] b
        BinaryExpression [10..15] >
          IdentifierLiteral [10..11] c
          IdentifierLiteral [14..15] d
    ");
}

#[test]
fn mixed_chain_is_an_error() {
    let res = dump("(a > b or c > d and e > f)");
    insta::assert_snapshot!(res, @r"
    Chunk [0..26]
      BinaryExpression [0..26] and !! the operators of a binary expression chain should be all the same: either 'or' or 'and'
        BinaryExpression [1..15] or
          BinaryExpression [1..6] >
            IdentifierLiteral [1..2] a
            IdentifierLiteral [5..6] b
          BinaryExpression [10..15] >
            IdentifierLiteral [10..11] c
            IdentifierLiteral [14..15] d
        BinaryExpression [20..25] >
          IdentifierLiteral [20..21] e
          IdentifierLiteral [24..25] f
    ");
}

#[test]
fn parenthesized_expression_keeps_inner_span() {
    let parsed = parse_chunk("(1)", "<chunk>", ParserOptions::default()).expect("not cancelled");
    let stmt = &parsed.chunk.statements[0];

    assert!(stmt.is_parenthesized);
    assert_eq!(stmt.span, TextRange::new(1.into(), 2.into()));
}

#[test]
fn double_colon_expression() {
    let res = dump("$a::b");
    insta::assert_snapshot!(res, @r"
    Chunk [0..5]
      DoubleColonExpression [0..5]
        Variable [0..2] $a
        IdentifierLiteral [4..5] b
    ");

    let res = dump("a::b.c");
    insta::assert_snapshot!(res, @r"
    Chunk [0..6]
      MemberExpression [0..6]
        DoubleColonExpression [0..4]
          IdentifierLiteral [0..1] a
          IdentifierLiteral [3..4] b
        IdentifierLiteral [5..6] c
    ");
}

#[test]
fn double_colon_expression_errors() {
    let messages = error_messages("$a::");
    assert_eq!(messages, vec![message::UNTERMINATED_DOUBLE_COLON_EXPR]);

    let messages = error_messages("$a::1");
    assert_eq!(
        messages,
        vec!["element of double-colon expression should start with a letter, not '1'"]
    );
}
