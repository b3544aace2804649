use crate::diagnostics::message;
use crate::parser::tests::{dump, error_messages};

#[test]
fn mapping_with_static_and_dynamic_entries() {
    let res = dump("Mapping { 0 => 1\n n %int => n }");
    insta::assert_snapshot!(res, @r"
    Chunk [0..31]
      MappingExpression [0..31]
        StaticMappingEntry [10..16]
          IntLiteral [10..11] 0
          IntLiteral [15..16] 1
        DynamicMappingEntry [18..29]
          IdentifierLiteral [18..19] n
          PatternIdentifierLiteral [20..24] %int
          IdentifierLiteral [28..29] n
    ");
}

#[test]
fn mapping_errors() {
    let messages = error_messages("Mapping");
    assert_eq!(messages, vec![message::UNTERMINATED_MAPPING_EXPRESSION_MISSING_BODY]);

    let messages = error_messages("Mapping { 0 => 1");
    assert_eq!(messages, vec![message::UNTERMINATED_MAPPING_EXPRESSION_MISSING_CLOSING_BRACE]);

    let messages = error_messages("Mapping { 0 }");
    assert_eq!(messages, vec![message::UNTERMINATED_MAPPING_ENTRY_MISSING_ARROW_VALUE]);
}

#[test]
fn udata_tree() {
    let res = dump("udata 0 { 1 { 2 }, 3 }");
    insta::assert_snapshot!(res, @r"
    Chunk [0..22]
      UDataLiteral [0..22]
        IntLiteral [6..7] 0
        UDataEntry [10..17]
          IntLiteral [10..11] 1
          UDataEntry [14..15]
            IntLiteral [14..15] 2
        UDataEntry [19..20]
          IntLiteral [19..20] 3
    ");
}

#[test]
fn unterminated_udata_entry() {
    let messages = error_messages("udata 0 {1");
    assert_eq!(messages, vec![message::UNTERMINATED_UDATA_ENTRY]);
}

#[test]
fn lifetimejob() {
    let res = dump("lifetimejob #job {}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..19]
      LifetimejobExpression [0..19]
        UnambiguousIdentifierLiteral [12..16] job
        EmbeddedModule [17..19]
    ");

    assert!(error_messages("lifetimejob #job for %int {}").is_empty());
}

#[test]
fn lifetimejob_errors() {
    let messages = error_messages("lifetimejob");
    assert_eq!(messages, vec![message::UNTERMINATED_LIFETIMEJOB_EXPRESSION_MISSING_META]);

    let messages = error_messages("lifetimejob #job");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_LIFETIMEJOB_EXPRESSION_MISSING_EMBEDDED_MODULE]
    );
}

#[test]
fn reception_handler() {
    let res = dump("on received %int $h");
    insta::assert_snapshot!(res, @r"
    Chunk [0..19]
      ReceptionHandlerExpression [0..19]
        PatternIdentifierLiteral [12..16] %int
        Variable [17..19] $h
    ");
}

#[test]
fn reception_handler_errors() {
    let messages = error_messages("on");
    assert_eq!(messages, vec![message::UNTERMINATED_RECEP_HANDLER_MISSING_RECEIVED_KEYWORD]);

    let messages = error_messages("on received");
    assert_eq!(messages, vec![message::UNTERMINATED_RECEP_HANDLER_MISSING_PATTERN]);

    let messages = error_messages("on received %int");
    assert_eq!(messages, vec![message::UNTERMINATED_RECEP_HANDLER_MISSING_HANDLER_OR_PATTERN]);
}

#[test]
fn spawn_with_meta() {
    let res = dump("go $m do f()");
    insta::assert_snapshot!(res, @r"
    Chunk [0..12]
      SpawnExpression [0..12]
        Variable [3..5] $m
        EmbeddedModule [9..12]
          CallExpression [9..12]
            IdentifierLiteral [9..10] f
    ");
}

#[test]
fn spawn_errors() {
    let messages = error_messages("go");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_SPAWN_EXPRESSION_MISSING_EMBEDDED_MODULE_AFTER_GO_KEYWORD]
    );

    let messages = error_messages("go $m");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_SPAWN_EXPRESSION_MISSING_DO_KEYWORD_AFTER_META]
    );

    let messages = error_messages("go do");
    assert_eq!(
        messages,
        vec![message::UNTERMINATED_SPAWN_EXPRESSION_MISSING_EMBEDDED_MODULE_AFTER_DO_KEYWORD]
    );
}

#[test]
fn match_with_group_variable_and_default_case() {
    let res = dump("match $x {\n1 {}\n%int n {}\ndefaultcase {}\n}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..42]
      MatchStatement [0..42]
        Variable [6..8] $x
        MatchCase [11..15]
          IntLiteral [11..12] 1
          Block [13..15]
        MatchCase [16..25]
          PatternIdentifierLiteral [16..20] %int
          IdentifierLiteral [21..22] n
          Block [23..25]
        DefaultCase [26..40]
          Block [38..40]
    ");
}

#[test]
fn match_errors() {
    let messages = error_messages("match");
    assert_eq!(messages, vec![message::UNTERMINATED_MATCH_STMT_MISSING_VALUE]);

    let messages = error_messages("match $x");
    assert_eq!(messages, vec![message::UNTERMINATED_MATCH_STMT_MISSING_BODY]);

    let messages = error_messages("match $x { 1 {}");
    assert_eq!(messages, vec![message::UNTERMINATED_MATCH_STMT_MISSING_CLOSING_BRACE]);

    let messages = error_messages("match $x { $y {} }");
    assert_eq!(messages, vec![message::INVALID_MATCH_CASE_VALUE_EXPLANATION]);
}
