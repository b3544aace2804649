use crate::diagnostics::message;
use crate::parser::ast::NodeKind;
use crate::parser::tests::{dump, error_messages};
use crate::{ParserOptions, parse_chunk};

#[test]
fn pattern_definition_with_object_pattern() {
    let res = dump("%p = {a: int, b?: str}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..22]
      PatternDefinition [0..22]
        PatternIdentifierLiteral [0..2] %p
        ObjectPatternLiteral [5..22]
          ObjectPatternProperty [6..12]
            IdentifierLiteral [6..7] a
            PatternIdentifierLiteral [9..12] %int
          ObjectPatternProperty [14..21]
            IdentifierLiteral [14..15] b
            PatternIdentifierLiteral [18..21] %str
    ");
}

#[test]
fn question_mark_makes_a_property_optional() {
    let parsed =
        parse_chunk("%{a?: int}", "<chunk>", ParserOptions::default()).expect("not cancelled");
    let NodeKind::ObjectPatternLiteral { elements, inexact } = &parsed.chunk.statements[0].kind
    else {
        panic!("expected an object pattern");
    };
    assert!(!inexact);
    assert!(matches!(elements[0].kind, NodeKind::ObjectPatternProperty { optional: true, .. }));
}

#[test]
fn object_pattern_errors() {
    let messages = error_messages("%{a: int");
    assert_eq!(messages, vec![message::UNTERMINATED_OBJ_PATTERN_MISSING_CLOSING_BRACE]);

    let messages = error_messages("%{a: int b: int}");
    assert_eq!(messages, vec![message::INVALID_OBJ_PATT_LIT_ENTRY_SEPARATION]);

    let messages = error_messages("%{a: }");
    assert_eq!(messages, vec![message::MISSING_PROPERTY_PATTERN]);
}

#[test]
fn list_patterns() {
    let res = dump("%[int, str]\n%[]%int");
    insta::assert_snapshot!(res, @r"
    Chunk [0..19]
      ListPatternLiteral [0..11]
        PatternIdentifierLiteral [2..5] %int
        PatternIdentifierLiteral [7..10] %str
      ListPatternLiteral [12..19]
        PatternIdentifierLiteral [15..19] %int
    ");

    let messages = error_messages("%[int]str");
    assert_eq!(messages, vec![message::INVALID_LIST_TUPLE_PATT_GENERAL_ELEMENT_IF_ELEMENTS]);
}

#[test]
fn pattern_union() {
    let res = dump("%| int | str");
    insta::assert_snapshot!(res, @r"
    Chunk [0..12]
      PatternUnion [0..12]
        PatternIdentifierLiteral [3..6] %int
        PatternIdentifierLiteral [9..12] %str
    ");

    let messages = error_messages("%| int str");
    let expected = message::INVALID_PATT_UNION_ELEMENT_SEPARATOR_EXPLANATION.to_owned();
    assert!(messages.contains(&expected));
}

#[test]
fn lazy_pattern_definition() {
    let res = dump("%p = @ int");
    insta::assert_snapshot!(res, @r"
    Chunk [0..10]
      PatternDefinition [0..10] lazy
        PatternIdentifierLiteral [0..2] %p
        PatternIdentifierLiteral [7..10] %int
    ");

    let messages = error_messages("%p = ");
    assert_eq!(messages, vec![message::UNTERMINATED_PATT_DEF_MISSING_RHS]);
}

#[test]
fn readonly_pattern() {
    let res = dump("%p = readonly int");
    insta::assert_snapshot!(res, @r"
    Chunk [0..17]
      PatternDefinition [0..17]
        PatternIdentifierLiteral [0..2] %p
        ReadonlyPatternExpression [5..17]
          PatternIdentifierLiteral [14..17] %int
    ");
}

#[test]
fn pattern_namespaces() {
    let res = dump("%ns. = {a: int}\n%ns.a");
    insta::assert_snapshot!(res, @r"
    Chunk [0..21]
      PatternNamespaceDefinition [0..15]
        PatternNamespaceIdentifierLiteral [0..4] %ns.
        ObjectLiteral [7..15]
          ObjectProperty [8..14]
            IdentifierLiteral [8..9] a
            IdentifierLiteral [11..14] int
      PatternNamespaceMemberExpression [16..21]
        PatternNamespaceIdentifierLiteral [16..20] %ns.
        IdentifierLiteral [20..21] a
    ");
}

#[test]
fn pattern_calls_and_optional_patterns() {
    let res = dump("%p(int)\n%int?");
    insta::assert_snapshot!(res, @r"
    Chunk [0..13]
      PatternCallExpression [0..7]
        PatternIdentifierLiteral [0..2] %p
        PatternIdentifierLiteral [3..6] %int
      OptionalPatternExpression [8..13]
        PatternIdentifierLiteral [8..12] %int
    ");

    let messages = error_messages("%p(int");
    assert_eq!(messages, vec![message::UNTERMINATED_PATTERN_CALL_MISSING_CLOSING_PAREN]);
}

#[test]
fn function_patterns() {
    let res = dump("%fn(x int) %str\n%fn(%int)");
    insta::assert_snapshot!(res, @r"
    Chunk [0..25]
      FunctionPatternExpression [0..15]
        FunctionParameter [4..9]
          IdentifierLiteral [4..5] x
          PatternIdentifierLiteral [6..9] %int
        PatternIdentifierLiteral [11..15] %str
      FunctionPatternExpression [16..25]
        FunctionParameter [20..24]
          PatternIdentifierLiteral [20..24] %int
    ");

    let messages = error_messages("%fn");
    assert_eq!(messages, vec![message::PERCENT_FN_SHOULD_BE_FOLLOWED_BY_PARAMETERS]);
}

#[test]
fn option_patterns() {
    let res = dump("%-x=int\n%--name=int");
    insta::assert_snapshot!(res, @r"
    Chunk [0..19]
      OptionPatternLiteral [0..7]
        PatternIdentifierLiteral [4..7] %int
      OptionPatternLiteral [8..19]
        PatternIdentifierLiteral [16..19] %int
    ");

    let messages = error_messages("%-x");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_OPION_PATTERN_A_VALUE_IS_EXPECTED_AFTER_EQUAL_SIGN]
    );

    let messages = error_messages("%-x=");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_OPION_PATT_EQUAL_ASSIGN_SHOULD_BE_FOLLOWED_BY_EXPR]
    );
}
