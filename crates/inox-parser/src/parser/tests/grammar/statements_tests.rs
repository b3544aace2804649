use crate::diagnostics::message;
use crate::parser::tests::{dump, error_messages};

#[test]
fn if_statement() {
    let res = dump("if true { 1 }");
    insta::assert_snapshot!(res, @r"
    Chunk [0..13]
      IfStatement [0..13]
        BooleanLiteral [3..7] true
        Block [8..13]
          IntLiteral [10..11] 1
    ");
}

#[test]
fn else_if() {
    let res = dump("if a {} else if b {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..20]
      IfStatement [0..20]
        IdentifierLiteral [3..4] a
        Block [5..7]
        IfStatement [13..20]
          IdentifierLiteral [16..17] b
          Block [18..20]
    ");
}

#[test]
fn for_key_value() {
    let res = dump("for i, e in $list {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..20]
      ForStatement [0..20]
        IdentifierLiteral [4..5] i
        IdentifierLiteral [7..8] e
        Variable [12..17] $list
        Block [18..20]
    ");
}

#[test]
fn for_without_variables() {
    let res = dump("for $list {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..12]
      ForStatement [0..12]
        Variable [4..9] $list
        Block [10..12]
    ");
}

#[test]
fn break_inside_for() {
    let res = dump("for $l { break }");
    insta::assert_snapshot!(res, @r"
    Chunk [0..16]
      ForStatement [0..16]
        Variable [4..6] $l
        Block [7..16]
          BreakStatement [9..14]
    ");
}

#[test]
fn walk_statement() {
    let res = dump("walk $t e {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..12]
      WalkStatement [0..12]
        Variable [5..7] $t
        IdentifierLiteral [8..9] e
        Block [10..12]
    ");
}

#[test]
fn switch_with_default_case() {
    let res = dump("switch 1 {\n  1 { }\n  defaultcase { }\n}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..38]
      SwitchStatement [0..38]
        IntLiteral [7..8] 1
        SwitchCase [13..18]
          IntLiteral [13..14] 1
          Block [15..18]
        DefaultCase [21..36]
          Block [33..36]
    ");
}

#[test]
fn return_with_and_without_value() {
    let res = dump("return 1\nreturn");
    insta::assert_snapshot!(res, @r"
    Chunk [0..15]
      ReturnStatement [0..8]
        IntLiteral [7..8] 1
      ReturnStatement [9..15]
    ");
}

#[test]
fn compound_assignment() {
    let res = dump("$a += 1");
    insta::assert_snapshot!(res, @r"
    Chunk [0..7]
      Assignment [0..7] +=
        Variable [0..2] $a
        IntLiteral [6..7] 1
    ");
}

#[test]
fn multi_assignment() {
    let res = dump("assign a b = c");
    insta::assert_snapshot!(res, @r"
    Chunk [0..14]
      MultiAssignment [0..14]
        IdentifierLiteral [7..8] a
        IdentifierLiteral [9..10] b
        IdentifierLiteral [13..14] c
    ");
}

#[test]
fn command_like_call() {
    let res = dump("print 1 2");
    insta::assert_snapshot!(res, @r"
    Chunk [0..9]
      CallExpression [0..9]
        IdentifierLiteral [0..5] print
        IntLiteral [6..7] 1
        IntLiteral [8..9] 2
    ");
}

#[test]
fn call_without_arguments() {
    let res = dump("a;");
    insta::assert_snapshot!(res, @r"
    Chunk [0..2]
      CallExpression [0..1]
        IdentifierLiteral [0..1] a
    ");
}

#[test]
fn pipeline() {
    let res = dump("a 1 | b");
    insta::assert_snapshot!(res, @r"
    Chunk [0..7]
      PipelineStatement [0..7]
        CallExpression [0..3]
          IdentifierLiteral [0..1] a
          IntLiteral [2..3] 1
        CallExpression [6..7]
          IdentifierLiteral [6..7] b
    ");
}

#[test]
fn import_with_configuration() {
    let res = dump("import lib https://example.com/lib.ix {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..40]
      ImportStatement [0..40]
        IdentifierLiteral [7..10] lib
        URLLiteral [11..37] https://example.com/lib.ix
        ObjectLiteral [38..40]
    ");
}

#[test]
fn inclusion_import() {
    let res = dump("import ./a.ix");
    insta::assert_snapshot!(res, @r"
    Chunk [0..13]
      InclusionImportStatement [0..13]
        RelativePathLiteral [7..13] ./a.ix
    ");
}

#[test]
fn permission_dropping() {
    let res = dump("drop-perms {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..13]
      PermissionDroppingStatement [0..13]
        ObjectLiteral [11..13]
    ");
}

#[test]
fn synchronized_block() {
    let res = dump("synchronized $a {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..18]
      SynchronizedBlockStatement [0..18]
        Variable [13..15] $a
        Block [16..18]
    ");
}

#[test]
fn assertion() {
    let res = dump("assert true");
    insta::assert_snapshot!(res, @r"
    Chunk [0..11]
      AssertionStatement [0..11]
        BooleanLiteral [7..11] true
    ");
}

#[test]
fn statements_separated_by_newlines_and_semicolons() {
    let res = dump("1\n2; 3");
    insta::assert_snapshot!(res, @r"
    Chunk [0..6]
      IntLiteral [0..1] 1
      IntLiteral [2..3] 2
      IntLiteral [5..6] 3
    ");
}

#[test]
fn keyword_as_assigned_or_iteration_variable() {
    let expected = vec![message::KEYWORDS_SHOULD_NOT_BE_USED_IN_ASSIGNMENT_LHS];
    assert_eq!(error_messages("assign if b = c"), expected);
    assert_eq!(error_messages("for if in $x {}"), expected);
    assert_eq!(error_messages("for i, switch in $x {}"), expected);
    assert!(error_messages("for i, e in $x {}").is_empty());
}

#[test]
fn pipeline_as_assigned_value() {
    let res = dump("x = | a 1 | b");
    insta::assert_snapshot!(res, @r"
    Chunk [0..13]
      Assignment [0..13] =
        IdentifierLiteral [0..1] x
        PipelineExpression [6..13]
          CallExpression [6..9]
            IdentifierLiteral [6..7] a
            IntLiteral [8..9] 1
          CallExpression [12..13]
            IdentifierLiteral [12..13] b
    ");
}

#[test]
fn assigned_value_after_pipe_must_be_a_pipeline() {
    let messages = error_messages("x = | a 1");
    assert_eq!(messages, vec![message::INVALID_ASSIGN_A_PIPELINE_EXPR_WAS_EXPECTED_AFTER_PIPE]);
}

#[test]
fn prune_statement() {
    let res = dump("walk $t e { prune }");
    insta::assert_snapshot!(res, @r"
    Chunk [0..19]
      WalkStatement [0..19]
        Variable [5..7] $t
        IdentifierLiteral [8..9] e
        Block [10..19]
          PruneStatement [12..17]
    ");
}

#[test]
fn extend_statement() {
    let res = dump("extend %p {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..12]
      ExtendStatement [0..12]
        PatternIdentifierLiteral [7..9] %p
        ObjectLiteral [10..12]
    ");
}

#[test]
fn extend_statement_errors() {
    let messages = error_messages("extend");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_EXTEND_STMT_MISSING_PATTERN_TO_EXTEND_AFTER_KEYWORD]
    );

    let messages = error_messages("extend %p");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_EXTEND_STMT_MISSING_OBJECT_LITERAL_AFTER_EXTENDED_PATTERN]
    );

    let messages = error_messages("extend 1 {}");
    assert_eq!(messages, vec![message::A_PATTERN_NAME_WAS_EXPECTED]);

    let messages = error_messages("extend %p 1");
    assert_eq!(messages, vec![message::INVALID_EXTENSION_VALUE_AN_OBJECT_LITERAL_WAS_EXPECTED]);
}
