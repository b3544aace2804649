use super::{ErrorAggregation, ParsingErrorKind, SourcePositionRange, line_column_at};
use crate::{ParserOptions, parse_chunk};

fn collect(src: &str) -> Option<ErrorAggregation> {
    parse_chunk(src, "main.ix", ParserOptions::default())
        .expect("not cancelled")
        .errors
}

#[test]
fn no_errors() {
    assert!(collect("a = 1\nb = 2").is_none());
}

#[test]
fn aggregated_message_has_one_line_per_error() {
    let errors = collect("a = 1\nif true").expect("errors");

    assert_eq!(errors.error_count(), 1);
    assert_eq!(
        errors.message,
        "\nmain.ix:2:1: unterminated if statement: block is missing"
    );
    assert_eq!(errors.errors[0].kind, ParsingErrorKind::MissingBlock);

    let position = &errors.positions[0];
    assert_eq!((position.start_line, position.start_column), (2, 1));
    assert_eq!((position.end_line, position.end_column), (2, 8));
}

#[test]
fn parent_source_name_is_reported() {
    let options = ParserOptions::default().with_parent_source_name("parent.ix");
    let errors = parse_chunk("if true", "included.ix", options)
        .expect("not cancelled")
        .errors
        .expect("errors");

    assert_eq!(errors.positions[0].source_name, "parent.ix");
    assert_eq!(errors.positions[0].to_string(), "parent.ix:1:1");
}

#[test]
fn errors_in_pre_order() {
    let errors = collect("if true\nfor").expect("errors");
    assert!(errors.error_count() >= 2);
    assert!(errors.errors[0].message.starts_with("invalid if statement"));
    assert!(
        errors
            .positions
            .windows(2)
            .all(|w| w[0].span.start() <= w[1].span.start())
    );
}

#[test]
fn line_columns_count_code_points() {
    let source = "é = 1\nab";
    assert_eq!(line_column_at(source, 0), (1, 1));
    assert_eq!(line_column_at(source, 2), (1, 2));
    assert_eq!(line_column_at(source, 7), (2, 1));
    assert_eq!(line_column_at(source, 8), (2, 2));
}

#[test]
fn position_of_empty_span_at_end() {
    let source = "ab";
    let position = SourcePositionRange::new(source, "x.ix", rowan::TextRange::empty(2.into()));
    assert_eq!((position.start_line, position.start_column), (1, 3));
    assert_eq!((position.end_line, position.end_column), (1, 3));
}

#[test]
fn aggregation_json() {
    let errors = collect("if true").expect("errors");
    let json = serde_json::to_string_pretty(&errors).expect("serializable");

    insta::assert_snapshot!(json, @r#"
    {
      "completeMessage": "\nmain.ix:1:1: unterminated if statement: block is missing",
      "errors": [
        {
          "kind": "MissingBlock",
          "message": "unterminated if statement: block is missing"
        }
      ],
      "errorPositions": [
        {
          "sourceName": "main.ix",
          "line": 1,
          "column": 1,
          "endLine": 1,
          "endColumn": 8,
          "span": {
            "start": 0,
            "end": 7
          }
        }
      ]
    }
    "#);
}

#[test]
fn printer_renders_snippet() {
    let source = "a = 1\nif true";
    let errors = collect(source).expect("errors");
    let res = errors.printer(source).render();

    insta::assert_snapshot!(res, @r"
    error: unterminated if statement: block is missing
      |
    2 | if true
      | ^^^^^^^ unterminated if statement: block is missing
    ");
}
