mod cancellation_tests;
mod grammar;
mod invariants_tests;
mod json_serialization_tests;
mod options_tests;
mod recovery;

use crate::{ParserOptions, parse_chunk};

/// Dump of `src` parsed with default options.
pub(crate) fn dump(src: &str) -> String {
    parse_chunk(src, "<chunk>", ParserOptions::default())
        .expect("not cancelled")
        .chunk
        .dump()
}

/// Messages of all node errors, in tree order.
pub(crate) fn error_messages(src: &str) -> Vec<String> {
    error_messages_with(src, ParserOptions::default())
}

pub(crate) fn error_messages_with(src: &str, options: ParserOptions<'_>) -> Vec<String> {
    let parsed = parse_chunk(src, "<chunk>", options).expect("not cancelled");
    parsed
        .errors
        .map(|errors| errors.errors.into_iter().map(|e| e.message).collect())
        .unwrap_or_default()
}
