//! Character classes shared by the grammar.

/// Names that cannot be used as variable, parameter or assignment target names.
pub const KEYWORDS: &[&str] = &[
    "if",
    "else",
    "preinit",
    "manifest",
    "includable-chunk",
    "drop-perms",
    "assign",
    "const",
    "var",
    "for",
    "walk",
    "in",
    "go",
    "import",
    "fn",
    "switch",
    "match",
    "defaultcase",
    "return",
    "yield",
    "break",
    "continue",
    "assert",
    "self",
    "Mapping",
    "comp",
    "udata",
    "concat",
    "testsuite",
    "testcase",
    "synchronized",
    "lifetimejob",
    "on",
    "received",
    "do",
    "chunked",
    "and",
    "or",
    "not",
    "readonly",
    "prune",
    "sendval",
    "extend",
    "to",
    "nil",
    "true",
    "false",
];

/// Schemes accepted in URL, host and scheme literals.
pub const SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ldb", "file", "mem", "s3"];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

pub fn is_supported_scheme(name: &str) -> bool {
    SCHEMES.contains(&name)
}

/// `_name_`: object keys reserved for metaproperties.
pub fn is_metadata_key(key: &str) -> bool {
    key.len() > 2 && key.starts_with('_') && key.ends_with('_')
}

pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_dec_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_ident_char(c: char) -> bool {
    is_alpha(c) || is_dec_digit(c) || c == '-' || c == '_'
}

pub fn is_byte_slice_base(c: char) -> bool {
    matches!(c, 'x' | 'd' | 'b')
}

pub fn is_interpolation_allowed_char(c: char) -> bool {
    is_ident_char(c) || matches!(c, '[' | ']' | '.' | '$' | ':')
}

pub fn is_unquoted_string_char(c: char) -> bool {
    is_ident_char(c) || matches!(c, '+' | '~' | '/' | '^' | '@' | '.' | '%')
}

/// Inline space. A lone `\r` is inline space, never a line break.
pub fn is_space_not_lf(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

/// Character that must follow `#` for the `#` to start a comment.
pub fn is_comment_first_space(c: char) -> bool {
    is_space_not_lf(c)
}

pub fn is_delim(c: char) -> bool {
    matches!(
        c,
        '{' | '}' | '[' | ']' | '(' | ')' | '\n' | ',' | ';' | ':' | '|'
    )
}

pub fn is_unpaired_delim(c: char) -> bool {
    matches!(c, '\n' | ',' | ';' | ':' | '|')
}

pub fn is_closing_delim(c: char) -> bool {
    matches!(c, '}' | ')' | ']')
}

pub fn is_unpaired_or_closing_delim(c: char) -> bool {
    matches!(
        c,
        '\n' | ',' | ';' | ':' | '=' | ')' | ']' | '}' | '|'
    )
}

pub fn is_non_space_css_combinator(c: char) -> bool {
    matches!(c, '>' | '~' | '+')
}

/// Unicode spaces other than the regular ones (`' '`, `\t`, `\r`, `\n`).
pub fn is_forbidden_space(c: char) -> bool {
    c.is_whitespace() && c != '\n' && !is_space_not_lf(c)
}

pub fn has_path_like_start(s: &str) -> bool {
    s.starts_with('/') || s.starts_with("./") || s.starts_with("../")
}

fn count_prev_backslashes(s: &[u8], i: usize) -> usize {
    s[..i].iter().rev().take_while(|&&b| b == b'\\').count()
}

/// Whether `s` contains a `{` that is not escaped by an odd number of `\`.
pub fn contains_not_escaped_bracket(s: &str) -> bool {
    contains_not_escaped(s, b'{')
}

pub fn contains_not_escaped_dollar(s: &str) -> bool {
    contains_not_escaped(s, b'$')
}

fn contains_not_escaped(s: &str, target: u8) -> bool {
    let bytes = s.as_bytes();
    bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == target && count_prev_backslashes(bytes, i) % 2 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_spaces() {
        assert!(is_forbidden_space('\u{00A0}'));
        assert!(is_forbidden_space('\u{2003}'));
        assert!(!is_forbidden_space(' '));
        assert!(!is_forbidden_space('\n'));
        assert!(!is_forbidden_space('\r'));
    }

    #[test]
    fn escaped_brackets() {
        assert!(contains_not_escaped_bracket("/a/{x}"));
        assert!(!contains_not_escaped_bracket(r"/a/\{x"));
        assert!(contains_not_escaped_bracket(r"/a/\\{x}"));
        assert!(!contains_not_escaped_dollar("/a/b"));
    }

    #[test]
    fn metadata_keys() {
        assert!(is_metadata_key("_url_"));
        assert!(!is_metadata_key("__"));
        assert!(!is_metadata_key("_a"));
    }
}
