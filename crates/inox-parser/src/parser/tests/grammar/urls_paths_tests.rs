use crate::diagnostics::message;
use crate::parser::ast::NodeKind;
use crate::parser::tests::{dump, error_messages};
use crate::{ParserOptions, parse_chunk};

#[test]
fn path_literals() {
    let res = dump("/a/b\n./a");
    insta::assert_snapshot!(res, @r"
    Chunk [0..8]
      AbsolutePathLiteral [0..4] /a/b
      RelativePathLiteral [5..8] ./a
    ");
}

#[test]
fn path_expression() {
    let res = dump("/a/{$b}/c");
    insta::assert_snapshot!(res, @r"
    Chunk [0..9]
      AbsolutePathExpression [0..9]
        PathSlice [0..3] /a/
        Variable [4..6] $b
        PathSlice [7..9] /c
    ");

    let messages = error_messages("/a/{}");
    assert_eq!(messages, vec![message::EMPTY_PATH_INTERP]);
}

#[test]
fn path_patterns() {
    let res = dump("%/a/...");
    insta::assert_snapshot!(res, @r"
    Chunk [0..7]
      AbsolutePathPatternLiteral [0..7] %/a/...
    ");

    let messages = error_messages("%/a/.../b/...");
    assert_eq!(messages.len(), 1);
}

#[test]
fn named_segments() {
    let res = dump("%/users/{:id}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..13]
      NamedSegmentPathPatternLiteral [0..13] %/users/{:id}
        PathPatternSlice [1..8] /users/
        NamedPathSegment [9..12] id
    ");

    let messages = error_messages("/users/{:id}");
    assert_eq!(messages, vec![message::ONLY_PATH_PATTERNS_CAN_CONTAIN_NAMED_SEGMENTS]);

    let messages = error_messages("%/users{:id}");
    assert_eq!(messages, vec![message::INVALID_PATH_PATT_NAMED_SEGMENTS]);
}

#[test]
fn schemes_hosts_and_urls() {
    let res = dump("https://\nhttps://example.com\nhttps://example.com/a");
    insta::assert_snapshot!(res, @r"
    Chunk [0..50]
      SchemeLiteral [0..8] https
      HostLiteral [9..28] https://example.com
      URLLiteral [29..50] https://example.com/a
    ");

    let messages = error_messages("https://example.com:99999");
    assert_eq!(messages, vec![message::INVALID_HOST_LIT]);
}

#[test]
fn url_expression() {
    let res = dump("https://example.com/a/{$b}");
    insta::assert_snapshot!(res, @r"
    Chunk [0..26]
      URLExpression [0..26]
        HostLiteral [0..19] https://example.com
        PathSlice [19..22] /a/
        Variable [23..25] $b
    ");
}

#[test]
fn url_expression_with_query() {
    let src = "https://example.com/a?x={$b}&y=1";
    let parsed = parse_chunk(src, "<chunk>", ParserOptions::default()).expect("not cancelled");
    assert!(!parsed.has_errors());

    let NodeKind::URLExpression { query_params, .. } = &parsed.chunk.statements[0].kind else {
        panic!("expected a URL expression");
    };
    let names: Vec<&str> = query_params
        .iter()
        .filter_map(|p| match &p.kind {
            NodeKind::URLQueryParameter { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["x", "y"]);
}

#[test]
fn host_and_url_patterns() {
    let res = dump("%https://*.example.com\n%https://example.com/a/...");
    insta::assert_snapshot!(res, @r"
    Chunk [0..49]
      HostPatternLiteral [0..22] %https://*.example.com
      URLPatternLiteral [23..49] %https://example.com/a/...
    ");

    let messages = error_messages("%https://*");
    assert_eq!(messages, vec![message::INVALID_HOST_PATT_SUGGEST_DOUBLE_STAR]);
}
