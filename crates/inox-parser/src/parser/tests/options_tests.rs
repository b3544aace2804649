use crate::{Error, ParserOptions, must_parse_chunk, parse_chunk};

#[test]
fn must_parse_valid_chunk() {
    let chunk = must_parse_chunk("a = 1", ParserOptions::default()).expect("valid chunk");
    assert_eq!(chunk.statements.len(), 1);
}

#[test]
fn must_parse_reports_errors() {
    let err = must_parse_chunk("if true", ParserOptions::default()).expect_err("invalid chunk");
    let Error::Parsing(errors) = err else {
        panic!("expected parsing errors");
    };
    assert_eq!(errors.error_count(), 1);
    assert_eq!(errors.positions[0].source_name, "<chunk>");
}

#[test]
fn start_index_skips_the_beginning() {
    let options = ParserOptions::default().with_start_index(2);
    let parsed = parse_chunk("1\n2", "<chunk>", options).expect("not cancelled");
    insta::assert_snapshot!(parsed.chunk.dump(), @r"
    Chunk [0..3]
      IntLiteral [2..3] 2
    ");
}
