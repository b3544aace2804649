//! Structural invariants over inputs built from fixed fragments, their
//! prefixes and their pairwise concatenations.

use rowan::{TextRange, TextSize};

use crate::parser::ast::{Chunk, Node};
use crate::{ParserOptions, parse_chunk};

const FRAGMENTS: &[&str] = &[
    "a = 1",
    "$a.b[0]",
    "(a > b or c > d)",
    "{a: 1, b %int: 2}",
    "#[1, 2]",
    ":{\"a\": 1}",
    "%p = {a: int, b?: str}",
    "%| int | str",
    "fn f(x %int) %str { return \"s\" }",
    "if true { 1 } else { 2 }",
    "for i, e in $list { break }",
    "switch 1 { 1 { } defaultcase { } }",
    "match $x { %int n {} }",
    "Mapping { 0 => 1 }",
    "udata 0 { 1 { 2 }, 3 }",
    "go $m do f()",
    "https://example.com/a/{$b}?x=1",
    "%/users/{:id}",
    "%p`a{{int:$x}}b`",
    "h<div>{1}</div>",
    "print 1 2 | b",
    "struct Point { x int }",
    "0x[ab cd]",
    "1h30m",
];

fn inputs() -> Vec<String> {
    let mut out = Vec::new();
    for fragment in FRAGMENTS {
        for (i, _) in fragment.char_indices().skip(1) {
            out.push(fragment[..i].to_owned());
        }
        out.push((*fragment).to_owned());
    }
    for a in FRAGMENTS {
        for b in FRAGMENTS {
            out.push(format!("{a}\n{b}"));
            out.push(format!("{a}{b}"));
        }
    }
    out
}

fn check_node(src: &str, node: &Node, parent: TextRange) {
    assert!(node.span.start() <= node.span.end(), "{src:?}: {node:?}");
    assert!(
        parent.contains_range(node.span),
        "{src:?}: {:?} at {:?} is outside {parent:?}",
        node.kind,
        node.span
    );
    for child in node.children() {
        check_node(src, child, node.span);
    }
}

fn check_chunk(src: &str, chunk: &Chunk) {
    assert_eq!(chunk.span, TextRange::up_to(TextSize::of(src)), "{src:?}");
    for node in chunk.top_level_nodes() {
        check_node(src, node, chunk.span);
    }
    for pair in chunk.tokens.windows(2) {
        assert!(
            pair[0].span.end() <= pair[1].span.start(),
            "{src:?}: overlapping tokens {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn spans_nest_and_tokens_are_ordered() {
    for src in inputs() {
        let parsed = parse_chunk(&src, "<chunk>", ParserOptions::default()).expect("not cancelled");
        check_chunk(&src, &parsed.chunk);
    }
}

#[test]
fn errors_are_reported_iff_some_node_carries_one() {
    for src in inputs() {
        let parsed = parse_chunk(&src, "<chunk>", ParserOptions::default()).expect("not cancelled");
        let in_tree = parsed.chunk.top_level_nodes().any(Node::has_error_in_tree);
        assert_eq!(parsed.has_errors(), in_tree, "{src:?}");
    }
}
