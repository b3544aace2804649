use crate::ParserOptions;
use crate::diagnostics::message;
use crate::parser::tests::{dump, error_messages, error_messages_with};

#[test]
fn if_missing_block() {
    let res = dump("if true");
    insta::assert_snapshot!(res, @r"
    Chunk [0..7]
      IfStatement [0..7] !! unterminated if statement: block is missing
        BooleanLiteral [3..7] true
    ");
}

#[test]
fn unterminated_block() {
    let res = dump("if true {");
    insta::assert_snapshot!(res, @r"
    Chunk [0..9]
      IfStatement [0..9]
        BooleanLiteral [3..7] true
        Block [8..9] !! unterminated block, missing closing brace '}'
    ");
}

#[test]
fn missing_separator() {
    let res = dump("f()g()");
    insta::assert_snapshot!(res, @r"
    Chunk [0..6]
      CallExpression [0..3]
        IdentifierLiteral [0..1] f
      CallExpression [3..6] !! statements should be separated by a space, newline or ';'
        IdentifierLiteral [3..4] g
    ");
}

#[test]
fn assignment_missing_value() {
    let res = dump("$a =");
    insta::assert_snapshot!(res, @r"
    Chunk [0..4]
      Assignment [0..4] = !! unterminated assignment, missing value after the '=' sign
        Variable [0..2] $a
        MissingExpression [4..4]
    ");
}

#[test]
fn assignment_missing_terminator() {
    let messages = error_messages("$a = 1 2");
    assert_eq!(messages, vec![message::UNTERMINATED_ASSIGNMENT_MISSING_TERMINATOR]);
}

#[test]
fn assignment_to_keyword() {
    let messages = error_messages("if = 1");
    assert_eq!(messages, vec![message::KEYWORDS_SHOULD_NOT_BE_USED_IN_ASSIGNMENT_LHS]);
}

#[test]
fn pipeline_last_stage_empty() {
    let res = dump("a |");
    insta::assert_snapshot!(res, @r"
    Chunk [0..3]
      PipelineStatement [0..3] !! unterminated pipeline statement: last stage is empty
        CallExpression [0..1]
          IdentifierLiteral [0..1] a
    ");
}

#[test]
fn duplicate_default_case() {
    let res = dump("switch 1 { defaultcase {} defaultcase {} }");
    insta::assert_snapshot!(res, @r"
    Chunk [0..42]
      SwitchStatement [0..42]
        IntLiteral [7..8] 1
        DefaultCase [11..25]
          Block [23..25]
        DefaultCase [26..40] !! default case must be unique
          Block [38..40]
    ");
}

#[test]
fn switch_case_value_must_be_simple() {
    let messages = error_messages("switch 1 { $a {} }");
    assert_eq!(messages, vec![message::INVALID_SWITCH_CASE_VALUE_EXPLANATION]);
}

#[test]
fn import_source_must_end_with_ix() {
    let messages = error_messages("import ./a.js");
    assert_eq!(
        messages,
        vec![message::URL_LITS_AND_PATH_LITS_USED_AS_IMPORT_SRCS_SHOULD_END_WITH_IX]
    );
}

#[test]
fn import_source_without_dot_segments() {
    let messages = error_messages("import /lib/../a.ix");
    assert_eq!(
        messages,
        vec![message::PATH_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SLASHSLASH]
    );
}

#[test]
fn preinit_requires_block() {
    let messages = error_messages("preinit");
    assert_eq!(messages, vec![message::PREINIT_KEYWORD_SHOULD_BE_FOLLOWED_BY_A_BLOCK]);
}

#[test]
fn manifest_requires_object() {
    let messages = error_messages("manifest 1");
    assert_eq!(messages, vec![message::INVALID_MANIFEST_DESC_VALUE]);
}

#[test]
fn drop_perms_requires_object() {
    let messages = error_messages("drop-perms 1");
    assert_eq!(messages, vec![message::DROP_PERM_KEYWORD_SHOULD_BE_FOLLOWED_BY]);
}

#[test]
fn synchronized_requires_values() {
    let messages = error_messages("synchronized {}");
    assert_eq!(
        messages,
        vec![message::SYNCHRONIZED_KEYWORD_SHOULD_BE_FOLLOWED_BY_SYNC_VALUES]
    );
}

#[test]
fn walk_requires_entry_variable() {
    let messages = error_messages("walk $t");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_WALK_STMT_MISSING_ENTRY_VARIABLE_NAME]
    );
}

#[test]
fn const_missing_equals_sign() {
    let messages = error_messages("const a");
    assert_eq!(
        messages,
        vec![message::fmt_invalid_const_decl_missing_equals_sign("a")]
    );
}

#[test]
fn recovery_continues_after_error() {
    let res = dump("if true 1");
    insta::assert_snapshot!(res, @r"
    Chunk [0..9]
      IfStatement [0..8] !! invalid if statement, test expression should be followed by a block, not '1'
        BooleanLiteral [3..7] true
      IntLiteral [8..9] 1
    ");
}

#[test]
fn recursion_limit() {
    let messages = error_messages_with(
        "((((((1))))))",
        ParserOptions::default().with_recursion_limit(3),
    );
    assert!(messages.iter().any(|m| m == message::RECURSION_LIMIT_EXCEEDED));
}
