//! Tokens recorded alongside the tree.
//!
//! Only the parts of the source that are not nodes become tokens: keywords,
//! delimiters, operators, newlines, comments and unexpected characters. Every
//! token lives once in [`Chunk::tokens`](super::ast::Chunk::tokens), sorted by
//! start offset.

use rowan::TextRange;
use serde::Serialize;

use crate::diagnostics::serialize_text_range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(serialize_with = "serialize_text_range")]
    pub span: TextRange,
    /// Source text, only for kinds whose text is not fixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self {
            kind,
            span,
            raw: None,
        }
    }

    pub fn with_raw(kind: TokenKind, span: TextRange, raw: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            raw: Some(raw.into()),
        }
    }

    pub fn text(&self) -> &str {
        self.raw.as_deref().unwrap_or_else(|| self.kind.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // keywords
    IfKeyword,
    ElseKeyword,
    PreinitKeyword,
    ManifestKeyword,
    IncludableChunkKeyword,
    DropPermsKeyword,
    AssignKeyword,
    ConstKeyword,
    VarKeyword,
    ForKeyword,
    WalkKeyword,
    InKeyword,
    GoKeyword,
    ImportKeyword,
    FnKeyword,
    PercentFn,
    SwitchKeyword,
    MatchKeyword,
    DefaultcaseKeyword,
    ReturnKeyword,
    YieldKeyword,
    BreakKeyword,
    ContinueKeyword,
    AssertKeyword,
    SelfKeyword,
    MappingKeyword,
    CompKeyword,
    UdataKeyword,
    ConcatKeyword,
    TestsuiteKeyword,
    TestcaseKeyword,
    SynchronizedKeyword,
    LifetimejobKeyword,
    OnKeyword,
    ReceivedKeyword,
    DoKeyword,
    ChunkedKeyword,
    AndKeyword,
    OrKeyword,
    ReadonlyKeyword,
    PruneKeyword,
    SendvalKeyword,
    ToKeyword,
    ExtendKeyword,
    StructKeyword,
    NewKeyword,
    PercentStr,

    // operator words
    NotIn,
    Is,
    IsNot,
    Keyof,
    Match,
    NotMatch,
    Substrof,

    // symbols
    PercentSymbol,
    Tilde,
    ExclamationMark,
    ExclamationMarkEqual,
    DoubleQuestionMark,
    Plus,
    PlusDot,
    Minus,
    MinusDot,
    Asterisk,
    AsteriskDot,
    Slash,
    SlashDot,
    AntiSlash,
    GreaterThan,
    GreaterThanDot,
    GreaterOrEqual,
    GreaterOrEqualDot,
    LessThan,
    LessThanDot,
    LessOrEqual,
    LessOrEqualDot,
    SelfClosingTagTerminator,
    EndTagOpenDelimiter,
    OpeningBracket,
    ClosingBracket,
    OpeningCurlyBracket,
    ClosingCurlyBracket,
    OpeningDictionaryBracket,
    OpeningKeylistBracket,
    OpeningObjectPatternBracket,
    OpeningListPatternBracket,
    OpeningRecordBracket,
    OpeningTupleBracket,
    OpeningParenthesis,
    ClosingParenthesis,
    SingleInterpOpeningBrace,
    SingleInterpClosingBrace,
    PatternUnionOpeningPipe,
    PatternUnionPipe,
    DoubleColon,
    Arrow,
    Pipe,
    Comma,
    Colon,
    Semicolon,
    CssSelectorPrefix,
    Dot,
    TwoDots,
    DotDotLessThan,
    ThreeDots,
    DotLessThan,
    Equal,
    EqualEqual,
    PlusEqual,
    MinusEqual,
    MulEqual,
    DivEqual,
    AtSign,
    QueryParamQuestionMark,
    QueryParamSep,
    QuestionMark,
    Backquote,
    StrInterpOpeningBrackets,
    StrInterpClosingBrackets,
    XmlInterpOpeningBracket,
    XmlInterpClosingBracket,
    Newline,

    // valued
    UnexpectedChar,
    InvalidOperator,
    InvalidInterpSlice,
    OccurrenceModifier,
    Comment,
}

impl TokenKind {
    /// Fixed text of the kind, `"<?>"` for valued kinds.
    pub fn as_str(self) -> &'static str {
        use TokenKind::*;
        match self {
            IfKeyword => "if",
            ElseKeyword => "else",
            PreinitKeyword => "preinit",
            ManifestKeyword => "manifest",
            IncludableChunkKeyword => "includable-chunk",
            DropPermsKeyword => "drop-perms",
            AssignKeyword => "assign",
            ConstKeyword => "const",
            VarKeyword => "var",
            ForKeyword => "for",
            WalkKeyword => "walk",
            InKeyword => "in",
            GoKeyword => "go",
            ImportKeyword => "import",
            FnKeyword => "fn",
            PercentFn => "%fn",
            SwitchKeyword => "switch",
            MatchKeyword => "match",
            DefaultcaseKeyword => "defaultcase",
            ReturnKeyword => "return",
            YieldKeyword => "yield",
            BreakKeyword => "break",
            ContinueKeyword => "continue",
            AssertKeyword => "assert",
            SelfKeyword => "self",
            MappingKeyword => "Mapping",
            CompKeyword => "comp",
            UdataKeyword => "udata",
            ConcatKeyword => "concat",
            TestsuiteKeyword => "testsuite",
            TestcaseKeyword => "testcase",
            SynchronizedKeyword => "synchronized",
            LifetimejobKeyword => "lifetimejob",
            OnKeyword => "on",
            ReceivedKeyword => "received",
            DoKeyword => "do",
            ChunkedKeyword => "chunked",
            AndKeyword => "and",
            OrKeyword => "or",
            ReadonlyKeyword => "readonly",
            PruneKeyword => "prune",
            SendvalKeyword => "sendval",
            ToKeyword => "to",
            ExtendKeyword => "extend",
            StructKeyword => "struct",
            NewKeyword => "new",
            PercentStr => "%str",
            NotIn => "not-in",
            Is => "is",
            IsNot => "is-not",
            Keyof => "keyof",
            Match => "match",
            NotMatch => "not-match",
            Substrof => "substrof",
            PercentSymbol => "%",
            Tilde => "~",
            ExclamationMark => "!",
            ExclamationMarkEqual => "!=",
            DoubleQuestionMark => "??",
            Plus => "+",
            PlusDot => "+.",
            Minus => "-",
            MinusDot => "-.",
            Asterisk => "*",
            AsteriskDot => "*.",
            Slash => "/",
            SlashDot => "/.",
            AntiSlash => "\\",
            GreaterThan => ">",
            GreaterThanDot => ">.",
            GreaterOrEqual => ">=",
            GreaterOrEqualDot => ">=.",
            LessThan => "<",
            LessThanDot => "<.",
            LessOrEqual => "<=",
            LessOrEqualDot => "<=.",
            SelfClosingTagTerminator => "/>",
            EndTagOpenDelimiter => "</",
            OpeningBracket => "[",
            ClosingBracket => "]",
            OpeningCurlyBracket => "{",
            ClosingCurlyBracket => "}",
            OpeningDictionaryBracket => ":{",
            OpeningKeylistBracket => ".{",
            OpeningObjectPatternBracket => "%{",
            OpeningListPatternBracket => "%[",
            OpeningRecordBracket => "#{",
            OpeningTupleBracket => "#[",
            OpeningParenthesis => "(",
            ClosingParenthesis => ")",
            SingleInterpOpeningBrace => "{",
            SingleInterpClosingBrace => "}",
            PatternUnionOpeningPipe => "%|",
            PatternUnionPipe => "|",
            DoubleColon => "::",
            Arrow => "=>",
            Pipe => "|",
            Comma => ",",
            Colon => ":",
            Semicolon => ";",
            CssSelectorPrefix => "s!",
            Dot => ".",
            TwoDots => "..",
            DotDotLessThan => "..<",
            ThreeDots => "...",
            DotLessThan => ".<",
            Equal => "=",
            EqualEqual => "==",
            PlusEqual => "+=",
            MinusEqual => "-=",
            MulEqual => "*=",
            DivEqual => "/=",
            AtSign => "@",
            QueryParamQuestionMark => "?",
            QueryParamSep => "&",
            QuestionMark => "?",
            Backquote => "`",
            StrInterpOpeningBrackets => "{{",
            StrInterpClosingBrackets => "}}",
            XmlInterpOpeningBracket => "{",
            XmlInterpClosingBracket => "}",
            Newline => "\n",
            UnexpectedChar
            | InvalidOperator
            | InvalidInterpSlice
            | OccurrenceModifier
            | Comment => {
                "<?>"
            },
        }
    }

    /// Whether the token text is not fixed and is stored in [`Token::raw`].
    pub fn is_valued(self) -> bool {
        matches!(
            self,
            TokenKind::UnexpectedChar
                | TokenKind::InvalidOperator
                | TokenKind::InvalidInterpSlice
                | TokenKind::OccurrenceModifier
                | TokenKind::Comment
        )
    }

    /// Keyword token for an identifier, if it is one.
    pub fn keyword(name: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match name {
            "if" => IfKeyword,
            "else" => ElseKeyword,
            "preinit" => PreinitKeyword,
            "manifest" => ManifestKeyword,
            "includable-chunk" => IncludableChunkKeyword,
            "drop-perms" => DropPermsKeyword,
            "assign" => AssignKeyword,
            "const" => ConstKeyword,
            "var" => VarKeyword,
            "for" => ForKeyword,
            "walk" => WalkKeyword,
            "in" => InKeyword,
            "go" => GoKeyword,
            "import" => ImportKeyword,
            "fn" => FnKeyword,
            "switch" => SwitchKeyword,
            "match" => MatchKeyword,
            "defaultcase" => DefaultcaseKeyword,
            "return" => ReturnKeyword,
            "yield" => YieldKeyword,
            "break" => BreakKeyword,
            "continue" => ContinueKeyword,
            "assert" => AssertKeyword,
            "self" => SelfKeyword,
            "Mapping" => MappingKeyword,
            "comp" => CompKeyword,
            "udata" => UdataKeyword,
            "concat" => ConcatKeyword,
            "testsuite" => TestsuiteKeyword,
            "testcase" => TestcaseKeyword,
            "synchronized" => SynchronizedKeyword,
            "lifetimejob" => LifetimejobKeyword,
            "on" => OnKeyword,
            "received" => ReceivedKeyword,
            "do" => DoKeyword,
            "chunked" => ChunkedKeyword,
            "and" => AndKeyword,
            "or" => OrKeyword,
            "readonly" => ReadonlyKeyword,
            "prune" => PruneKeyword,
            "sendval" => SendvalKeyword,
            "to" => ToKeyword,
            "extend" => ExtendKeyword,
            _ => return None,
        })
    }
}
