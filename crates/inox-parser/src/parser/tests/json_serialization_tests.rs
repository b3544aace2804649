use serde_json::json;

use crate::{ParserOptions, parse_chunk};

fn to_json(src: &str) -> serde_json::Value {
    let parsed = parse_chunk(src, "<chunk>", ParserOptions::default()).expect("not cancelled");
    serde_json::to_value(&parsed.chunk).expect("serializable")
}

#[test]
fn int_literal_chunk() {
    let parsed = parse_chunk("1", "<chunk>", ParserOptions::default()).expect("not cancelled");
    let res = serde_json::to_string_pretty(&parsed.chunk).expect("serializable");

    insta::assert_snapshot!(res, @r#"
    {
      "span": {
        "start": 0,
        "end": 1
      },
      "statements": [
        {
          "span": {
            "start": 0,
            "end": 1
          },
          "type": "IntLiteral",
          "raw": "1",
          "value": 1
        }
      ],
      "tokens": []
    }
    "#);
}

#[test]
fn node_error_is_serialized() {
    let value = to_json("if true");
    assert_eq!(
        value["statements"][0]["err"],
        json!({
            "kind": "MissingBlock",
            "message": "unterminated if statement: block is missing",
        })
    );
    assert_eq!(value["statements"][0]["type"], "IfStatement");
}

#[test]
fn tokens_are_serialized() {
    let value = to_json("(1)");
    assert_eq!(
        value["tokens"],
        json!([
            {"kind": "OpeningParenthesis", "span": {"start": 0, "end": 1}},
            {"kind": "ClosingParenthesis", "span": {"start": 2, "end": 3}},
        ])
    );
    assert_eq!(value["statements"][0]["is_parenthesized"], true);
}

#[test]
fn comment_token_keeps_its_text() {
    let value = to_json("# note\n1");
    assert_eq!(
        value["tokens"][0],
        json!({"kind": "Comment", "span": {"start": 0, "end": 6}, "raw": "# note"})
    );
    assert_eq!(value["tokens"][1]["kind"], "Newline");
}
