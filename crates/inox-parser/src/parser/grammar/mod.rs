//! Grammar productions for the Inox language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Productions return owned nodes; delimiters and keywords are pushed to the
//! parser's token vector as they are consumed.

mod binary;
mod chunk;
mod css;
mod declarations;
mod expressions;
mod forms;
mod functions;
mod idents;
mod numbers;
mod objects;
mod paths;
mod patterns;
mod statements;
mod string_pattern;
mod strings;
mod structs;
mod urls;
mod xml;

use crate::diagnostics::message;
use crate::parser::ast::Node;
use crate::parser::core::error;
use crate::parser::scan::is_keyword;

/// Flags a declared name that is a keyword: `var if = 1`, `for if in x`.
fn reject_keyword_name(name: &mut Node) {
    if name.err.is_none() && !name.is_parenthesized && name.ident_name().is_some_and(is_keyword) {
        name.err = error(message::KEYWORDS_SHOULD_NOT_BE_USED_IN_ASSIGNMENT_LHS);
    }
}
