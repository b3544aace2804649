use crate::diagnostics::message;
use crate::parser::tests::{dump, error_messages};

#[test]
fn object_with_typed_property() {
    let res = dump("{a: 1, b %int: 2}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..17]
      ObjectLiteral [0..17]
        ObjectProperty [1..5]
          IdentifierLiteral [1..2] a
          IntLiteral [4..5] 1
        ObjectProperty [7..16]
          IdentifierLiteral [7..8] b
          PatternIdentifierLiteral [9..13] %int
          IntLiteral [15..16] 2
    ");
}

#[test]
fn missing_colon_keeps_value_inside_the_property() {
    let res = dump("{break }");
    insta::assert_snapshot!(res, @r"
    Chunk [0..8]
      ObjectLiteral [0..8]
        ObjectProperty [1..6] !! invalid object/record literal, missing colon after key 'break'
          IdentifierLiteral [1..6] break
          MissingExpression [6..6]
    ");
}

#[test]
fn object_errors() {
    let messages = error_messages("{a: 1");
    assert_eq!(messages, vec![message::UNTERMINATED_OBJ_MISSING_CLOSING_BRACE]);

    let messages = error_messages("{a: }");
    assert_eq!(messages, vec![message::MISSING_PROPERTY_VALUE]);

    let messages = error_messages("{a: 1 b: 2}");
    assert_eq!(messages, vec![message::INVALID_OBJ_REC_LIT_ENTRY_SEPARATION]);
}

#[test]
fn spread_of_extraction() {
    let res = dump("{...$a.{b}}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..11]
      ObjectLiteral [0..11]
        PropertySpreadElement [1..10]
          ExtractionExpression [4..10]
            Variable [4..6] $a
            KeyListExpression [6..10]
              IdentifierLiteral [8..9] b
    ");

    let messages = error_messages("{...$a}");
    assert_eq!(
        messages,
        vec![message::fmt_invalid_spread_elem_expr_should_be_extr_expr_not("Variable")]
    );
}

#[test]
fn records_and_tuples() {
    let res = dump("#{a: 1}\n#[1, 2]");
    insta::assert_snapshot!(res, @r"
    Chunk [0..15]
      RecordLiteral [0..7]
        ObjectProperty [2..6]
          IdentifierLiteral [2..3] a
          IntLiteral [5..6] 1
      TupleLiteral [8..15]
        IntLiteral [10..11] 1
        IntLiteral [13..14] 2
    ");

    let messages = error_messages("#{a: 1");
    assert_eq!(messages, vec![message::UNTERMINATED_REC_MISSING_CLOSING_BRACE]);
}

#[test]
fn typed_list() {
    let res = dump("[]%int[1]");
    insta::assert_snapshot!(res, @r"
    Chunk [0..9]
      ListLiteral [0..9]
        PatternIdentifierLiteral [2..6] %int
        IntLiteral [7..8] 1
    ");

    let messages = error_messages("[1, 2");
    assert_eq!(messages, vec![message::UNTERMINATED_LIST_LIT_MISSING_CLOSING_BRACKET]);
}

#[test]
fn dictionaries() {
    let res = dump(r#":{"a": 1}"#);
    insta::assert_snapshot!(res, @r#"
    Chunk [0..9]
      DictionaryLiteral [0..9]
        DictionaryEntry [2..8]
          QuotedStringLiteral [2..5] "a"
          IntLiteral [7..8] 1
    "#);
}

#[test]
fn dictionary_errors() {
    let messages = error_messages(":{a: 1}");
    assert_eq!(messages, vec![message::INVALID_DICT_KEY_ONLY_SIMPLE_VALUE_LITS]);

    let messages = error_messages(r#":{"a": 1"#);
    assert_eq!(messages, vec![message::UNTERMINATED_DICT_MISSING_CLOSING_BRACE]);

    let messages = error_messages(r#":{"a"}"#);
    assert_eq!(messages, vec![message::INVALID_DICT_ENTRY_MISSING_COLON_AFTER_KEY]);
}

#[test]
fn extraction() {
    let res = dump("$a.{b, c}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..9]
      ExtractionExpression [0..9]
        Variable [0..2] $a
        KeyListExpression [2..9]
          IdentifierLiteral [4..5] b
          IdentifierLiteral [7..8] c
    ");

    let messages = error_messages("$a.{b, 1}");
    assert_eq!(messages, vec![message::KEY_LIST_CAN_ONLY_CONTAIN_IDENTS]);
}

#[test]
fn slices() {
    let res = dump("$a[1:2]\n$a[:2]\n$a[1:]");
    insta::assert_snapshot!(res, @r"
    Chunk [0..21]
      SliceExpression [0..7]
        Variable [0..2] $a
        IntLiteral [3..4] 1
        IntLiteral [5..6] 2
      SliceExpression [8..14]
        Variable [8..10] $a
        IntLiteral [12..13] 2
      SliceExpression [15..21]
        Variable [15..17] $a
        IntLiteral [18..19] 1
    ");
}
