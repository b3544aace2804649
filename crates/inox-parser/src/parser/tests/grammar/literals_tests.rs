use crate::diagnostics::message;
use crate::parser::tests::{dump, error_messages};

#[test]
fn byte_slices() {
    let res = dump("0x[ab cd]\n0b[1010]\n0d[12 255]");
    insta::assert_snapshot!(res, @r"
    Chunk [0..30]
      ByteSliceLiteral [0..9] 0x[ab cd]
      ByteSliceLiteral [10..18] 0b[1010]
      ByteSliceLiteral [19..30] 0d[12 255]
    ");
}

#[test]
fn byte_slice_errors() {
    let messages = error_messages("0x[abc]");
    assert_eq!(messages, vec![message::INVALID_HEX_BYTE_SICE_LIT_LENGTH_SHOULD_BE_EVEN]);

    let messages = error_messages("0x[ab");
    assert_eq!(messages, vec![message::UNTERMINATED_BYTE_SICE_LIT_MISSING_CLOSING_BRACKET]);
}

#[test]
fn ports() {
    let res = dump(":80\n:443/https");
    insta::assert_snapshot!(res, @r"
    Chunk [0..14]
      PortLiteral [0..3] :80
      PortLiteral [4..14] :443/https
    ");
}

#[test]
fn port_errors() {
    let messages = error_messages(":99999");
    assert_eq!(messages, vec![message::INVALID_PORT_LITERAL_INVALID_PORT_NUMBER]);

    let messages = error_messages(":80/");
    assert_eq!(messages, vec![message::UNTERMINATED_PORT_LITERAL_MISSING_SCHEME_NAME_AFTER_SLASH]);
}

#[test]
fn quantities_and_rates() {
    let res = dump("1h30m\n10kB/s\n1.5x");
    insta::assert_snapshot!(res, @r"
    Chunk [0..17]
      QuantityLiteral [0..5] 1h30m
      RateLiteral [6..12] 10kB/s
      QuantityLiteral [13..17] 1.5x
    ");
}

#[test]
fn quantity_and_rate_errors() {
    let messages = error_messages("10kB/");
    assert_eq!(messages, vec![message::INVALID_RATE_LIT_DIV_SYMBOL_SHOULD_BE_FOLLOWED_BY_UNIT]);

    let messages = error_messages("0x10kB");
    assert_eq!(messages, vec![message::QUANTITY_LIT_NOT_ALLOWED_WITH_HEXADECIMAL_NUM]);
}

#[test]
fn dates() {
    let res = dump("2020y-10mt-5d-UTC");
    insta::assert_snapshot!(res, @r"
    Chunk [0..17]
      DateLiteral [0..17] 2020y-10mt-5d-UTC
    ");

    let messages = error_messages("2020y-10mt");
    assert_eq!(messages, vec![message::INVALID_DATE_LITERAL_MISSING_LOCATION_PART_AT_THE_END]);

    let messages = error_messages("2020y-13mt-UTC");
    assert_eq!(messages, vec![message::INVALID_MONTH_VALUE]);
}

#[test]
fn emails_and_unquoted_strings() {
    let res = dump("foo@mail.com\nfoo+bar");
    insta::assert_snapshot!(res, @r"
    Chunk [0..20]
      EmailAddressLiteral [0..12] foo@mail.com
      UnquotedStringLiteral [13..20] foo+bar
    ");
}

#[test]
fn runes_and_rune_ranges() {
    let res = dump(r"'a'..'z'");
    insta::assert_snapshot!(res, @r"
    Chunk [0..8]
      RuneRangeExpression [0..8]
        RuneLiteral [0..3] 'a'
        RuneLiteral [5..8] 'z'
    ");

    let messages = error_messages("'a");
    assert_eq!(messages, vec![message::UNTERMINATED_RUNE_LIT_MISSING_QUOTE]);
}

#[test]
fn quoted_string_escapes() {
    let res = dump(r#""a\tb""#);
    insta::assert_snapshot!(res, @r#"
    Chunk [0..6]
      QuotedStringLiteral [0..6] "a\tb"
    "#);
}

#[test]
fn regex_literals() {
    let res = dump("%`a+`");
    insta::assert_snapshot!(res, @r"
    Chunk [0..5]
      RegularExpressionLiteral [0..5] %`a+`
    ");

    let messages = error_messages("%`(`");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("invalid regex literal: "), "{messages:?}");

    let messages = error_messages("%`ab");
    assert_eq!(messages, vec![message::UNTERMINATED_REGEX_LIT]);
}

#[test]
fn string_templates() {
    let res = dump("%p`a{{int:$x}}b`");
    insta::assert_snapshot!(res, @r#"
    Chunk [0..16]
      StringTemplateLiteral [0..16]
        PatternIdentifierLiteral [0..2] %p
        StringTemplateSlice [3..4] "a"
        StringTemplateInterpolation [6..12]
          Variable [10..12] $x
        StringTemplateSlice [14..15] "b"
    "#);
}

#[test]
fn string_template_errors() {
    let messages = error_messages("%p`{{}}`");
    assert_eq!(messages, vec![message::INVALID_STRING_INTERPOLATION_SHOULD_NOT_BE_EMPTY]);

    let messages = error_messages("%p`{{int}}`");
    assert_eq!(messages, vec![message::NAME_IN_STR_INTERP_SHOULD_BE_FOLLOWED_BY_COLON_AND_EXPR]);

    let messages = error_messages("%p`a");
    assert_eq!(messages, vec![message::UNTERMINATED_STRING_TEMPL_LIT]);
}
