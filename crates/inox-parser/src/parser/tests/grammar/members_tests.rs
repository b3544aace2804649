use crate::diagnostics::message;
use crate::parser::tests::{dump, error_messages};

#[test]
fn computed_member() {
    let res = dump("$a.(b)");
    insta::assert_snapshot!(res, @r"
    Chunk [0..6]
      ComputedMemberExpression [0..6]
        Variable [0..2] $a
        IdentifierLiteral [4..5] b
    ");

    let messages = error_messages("$a.(b");
    assert_eq!(messages, vec![message::UNTERMINATED_PARENTHESIZED_EXPR_MISSING_CLOSING_PAREN]);
}

#[test]
fn dynamic_member() {
    let res = dump("$a.<b");
    insta::assert_snapshot!(res, @r"
    Chunk [0..5]
      DynamicMemberExpression [0..5]
        Variable [0..2] $a
        IdentifierLiteral [4..5] b
    ");

    let messages = error_messages("$a.<");
    assert_eq!(messages, vec![message::UNTERMINATED_DYN_MEMB_OR_INDEX_EXPR]);
}

#[test]
fn optional_member() {
    let res = dump("$a.?b");
    insta::assert_snapshot!(res, @r"
    Chunk [0..5]
      MemberExpression [0..5]
        Variable [0..2] $a
        IdentifierLiteral [4..5] b
    ");
}

#[test]
fn member_name_must_start_with_a_letter() {
    let messages = error_messages("$a.1");
    assert_eq!(messages[0], message::fmt_prop_name_should_start_with_a_letter_not('1'));
}

#[test]
fn boolean_conversion() {
    let res = dump("$a?\n$a.b?");
    insta::assert_snapshot!(res, @r"
    Chunk [0..9]
      BooleanConversionExpression [0..3]
        Variable [0..2] $a
      BooleanConversionExpression [4..9]
        MemberExpression [4..8]
          Variable [4..6] $a
          IdentifierLiteral [7..8] b
    ");
}

#[test]
fn lazy_expression() {
    let res = dump("@($a)");
    insta::assert_snapshot!(res, @r"
    Chunk [0..5]
      LazyExpression [0..5]
        Variable [2..4] $a
    ");

    let messages = error_messages("@1");
    assert_eq!(messages[0], message::AT_SYMBOL_SHOULD_BE_FOLLOWED_BY);
}

#[test]
fn if_expression() {
    let res = dump("(if true 1 else 2)");
    insta::assert_snapshot!(res, @r"
    Chunk [0..18]
      IfExpression [0..18]
        BooleanLiteral [4..8] true
        IntLiteral [9..10] 1
        IntLiteral [16..17] 2
    ");
}

#[test]
fn if_expression_errors() {
    let messages = error_messages("(if true 1");
    assert_eq!(messages, vec![message::UNTERMINATED_IF_EXPR_MISSING_CLOSING_PAREN]);

    let messages = error_messages("(if true 1 else)");
    assert_eq!(messages[0], message::UNTERMINATED_IF_EXPR_MISSING_VALUE_AFTER_ELSE);
}

#[test]
fn options_and_flags() {
    let res = dump("-x=1\n--verbose");
    insta::assert_snapshot!(res, @r"
    Chunk [0..14]
      OptionExpression [0..4] x
        IntLiteral [3..4] 1
      FlagLiteral [5..14] --verbose
    ");

    let messages = error_messages("-x=");
    assert_eq!(
        messages[0],
        message::UNTERMINATED_OPION_EXPR_EQUAL_ASSIGN_SHOULD_BE_FOLLOWED_BY_EXPR
    );
}
