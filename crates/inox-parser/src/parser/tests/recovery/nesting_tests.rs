use crate::diagnostics::message;
use crate::parser::tests::error_messages_with;
use crate::{ParserOptions, parse_chunk};

const DEPTH: usize = 5000;

fn nest(open: &str, close: &str, depth: usize) -> String {
    let mut src = open.repeat(depth);
    src.push_str(&close.repeat(depth));
    src
}

fn assert_limit_reported(open: &str, close: &str) {
    let src = nest(open, close, DEPTH);
    let messages = error_messages_with(&src, ParserOptions::default());
    assert!(
        messages.iter().any(|m| m == message::RECURSION_LIMIT_EXCEEDED),
        "{open:?} nested {DEPTH} deep: {messages:?}"
    );
}

#[test]
fn deep_objects() {
    assert_limit_reported("{a: ", "}");
}

#[test]
fn deep_records() {
    assert_limit_reported("#{a: ", "}");
}

#[test]
fn deep_object_patterns() {
    assert_limit_reported("%{a: ", "}");
}

#[test]
fn deep_list_patterns() {
    assert_limit_reported("%[", "]");
}

#[test]
fn deep_lists() {
    assert_limit_reported("[", "]");
}

#[test]
fn deep_parenthesized_expressions() {
    assert_limit_reported("(", ")");
}

#[test]
fn deep_if_statements() {
    assert_limit_reported("if true {", "}");
}

#[test]
fn deep_function_bodies() {
    assert_limit_reported("fn(){", "}");
}

#[test]
fn deep_xml_interpolations() {
    assert_limit_reported("h<a>{", "}</a>");
}

#[test]
fn deep_string_pattern_pieces() {
    let mut src = String::from("%str");
    src.push_str(&nest("(", ")", DEPTH));
    let messages = error_messages_with(&src, ParserOptions::default());
    assert!(messages.iter().any(|m| m == message::RECURSION_LIMIT_EXCEEDED));
}

#[test]
fn unterminated_nesting_is_total() {
    for open in ["{a: ", "if true {", "fn(){", "h<a>{", "#{a: ", "%{a: "] {
        let src = open.repeat(DEPTH);
        let parsed = parse_chunk(&src, "<chunk>", ParserOptions::default());
        let parsed = parsed.expect("not cancelled");
        assert!(parsed.has_errors(), "{open:?}");
        let last = parsed.chunk.statements.last().expect("one statement");
        assert_eq!(usize::from(last.span.end()), src.len());
    }
}

#[test]
fn nesting_below_the_limit_has_no_errors() {
    let src = format!("a = {}", nest("[", "]", 100));
    assert!(error_messages_with(&src, ParserOptions::default()).is_empty());
}

#[test]
fn lower_limit_is_honored() {
    let src = format!("a = {}", nest("[", "]", 20));
    let options = ParserOptions::default().with_recursion_limit(10);
    let messages = error_messages_with(&src, options);
    assert!(messages.contains(&message::RECURSION_LIMIT_EXCEEDED.to_owned()));

    let src = format!("a = {}", nest("[", "]", 3));
    let options = ParserOptions::default().with_recursion_limit(10);
    assert!(error_messages_with(&src, options).is_empty());
}
