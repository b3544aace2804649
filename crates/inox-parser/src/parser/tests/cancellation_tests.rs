use std::sync::atomic::{AtomicU32, Ordering};

use crate::{CancellationHandle, CancellationToken, Error, ParserOptions, parse_chunk};

/// Cancels once it has been polled `limit` times.
struct CancelAfter {
    polls: AtomicU32,
    limit: u32,
}

impl CancellationHandle for CancelAfter {
    fn is_cancelled(&self) -> bool {
        self.polls.fetch_add(1, Ordering::Relaxed) >= self.limit
    }

    fn cancellation_reason(&self) -> String {
        "deadline exceeded".to_owned()
    }
}

#[test]
fn cancelled_before_start() {
    let token = CancellationToken::new();
    token.cancel();

    let options = ParserOptions::default().with_cancellation(&token);
    let err = parse_chunk("a = 1\nb = 2", "<chunk>", options).expect_err("cancelled");

    let Error::CancelledParse { reason, chunk } = err else {
        panic!("expected a cancelled parse");
    };
    assert_eq!(reason, "parsing was cancelled");
    assert!(chunk.statements.is_empty());
}

#[test]
fn uncancelled_token_does_not_interfere() {
    let token = CancellationToken::new();
    let options = ParserOptions::default().with_cancellation(&token).with_no_check_fuel(1);
    let parsed = parse_chunk("a = 1\nb = 2", "<chunk>", options).expect("not cancelled");
    assert_eq!(parsed.chunk.statements.len(), 2);
    assert!(!parsed.has_errors());
}

#[test]
fn cancelled_mid_parse_returns_partial_chunk() {
    let handle = CancelAfter {
        polls: AtomicU32::new(0),
        limit: 3,
    };
    let source = "a = 1\nb = 2\nc = 3\nd = 4\ne = 5\nf = 6";
    let options = ParserOptions::default()
        .with_cancellation(&handle)
        .with_no_check_fuel(1);

    let err = parse_chunk(source, "<chunk>", options).expect_err("cancelled");
    let Error::CancelledParse { reason, chunk } = err else {
        panic!("expected a cancelled parse");
    };
    assert_eq!(reason, "deadline exceeded");
    assert!(chunk.statements.len() < 6);
}

#[test]
fn handle_is_polled_once_per_fuel_window() {
    let handle = CancelAfter {
        polls: AtomicU32::new(0),
        limit: 1,
    };
    let source = "a = 1\n".repeat(20);
    let options = ParserOptions::default()
        .with_cancellation(&handle)
        .with_no_check_fuel(5);

    let err = parse_chunk(&source, "<chunk>", options).expect_err("cancelled");
    let Error::CancelledParse { chunk, .. } = err else {
        panic!("expected a cancelled parse");
    };
    assert!(!chunk.statements.is_empty());
    assert!(chunk.statements.len() < 20);
    assert_eq!(handle.polls.load(Ordering::Relaxed), 2);
    assert_eq!(usize::from(chunk.span.end()), source.len());
}

#[test]
fn large_fuel_window_never_polls_a_small_input() {
    let handle = CancelAfter {
        polls: AtomicU32::new(0),
        limit: 1,
    };
    let options = ParserOptions::default()
        .with_cancellation(&handle)
        .with_no_check_fuel(1000);

    let parsed = parse_chunk("a = 1\nb = 2", "<chunk>", options).expect("not cancelled");
    assert_eq!(parsed.chunk.statements.len(), 2);
    assert_eq!(handle.polls.load(Ordering::Relaxed), 1);
}
