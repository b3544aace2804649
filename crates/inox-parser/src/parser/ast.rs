//! Typed AST produced by the parser.
//!
//! Every node has a span, an optional error and the `is_parenthesized` flag;
//! the variant-specific data lives in [`NodeKind`]. Parents own their children
//! (`Box<Node>` / `Vec<Node>`), the [`Chunk`] owns the whole tree and the
//! token stream.

use rowan::TextRange;
use serde::Serialize;

use super::token::Token;
use crate::diagnostics::{ParsingError, serialize_text_range};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    #[serde(serialize_with = "serialize_text_range")]
    pub span: TextRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_constant_declarations: Option<Box<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preinit: Option<Box<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Box<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includable_chunk_desc: Option<Box<Node>>,
    pub statements: Vec<Node>,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(serialize_with = "serialize_text_range")]
    pub span: TextRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<ParsingError>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_parenthesized: bool,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(span: TextRange, kind: NodeKind) -> Self {
        Self {
            span,
            err: None,
            is_parenthesized: false,
            kind,
        }
    }

    pub fn with_err(span: TextRange, err: Option<ParsingError>, kind: NodeKind) -> Self {
        Self {
            span,
            err,
            is_parenthesized: false,
            kind,
        }
    }

    pub fn boxed(self) -> Box<Node> {
        Box::new(self)
    }

    pub fn is_missing_expression(&self) -> bool {
        matches!(self.kind, NodeKind::MissingExpression)
    }

    /// Name of an identifier, variable or global variable node.
    pub fn variable_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Variable { name }
            | NodeKind::GlobalVariable { name }
            | NodeKind::IdentifierLiteral { name } => Some(name),
            _ => None,
        }
    }

    pub fn ident_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::IdentifierLiteral { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_ident_or_ident_member(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::IdentifierLiteral { .. } | NodeKind::IdentifierMemberExpression { .. }
        )
    }

    /// Literal nodes whose value is known without evaluation.
    pub fn is_simple_value_literal(&self) -> bool {
        use NodeKind::*;
        matches!(
            self.kind,
            QuotedStringLiteral { .. }
                | MultilineStringLiteral { .. }
                | UnquotedStringLiteral { .. }
                | IntLiteral { .. }
                | FloatLiteral { .. }
                | PortLiteral { .. }
                | QuantityLiteral { .. }
                | RateLiteral { .. }
                | DateLiteral { .. }
                | BooleanLiteral { .. }
                | NilLiteral
                | RuneLiteral { .. }
                | RegularExpressionLiteral { .. }
                | ByteSliceLiteral { .. }
                | FlagLiteral { .. }
                | AbsolutePathLiteral { .. }
                | RelativePathLiteral { .. }
                | AbsolutePathPatternLiteral { .. }
                | RelativePathPatternLiteral { .. }
                | URLLiteral { .. }
                | URLPatternLiteral { .. }
                | HostLiteral { .. }
                | HostPatternLiteral { .. }
                | SchemeLiteral { .. }
                | EmailAddressLiteral { .. }
                | IdentifierLiteral { .. }
                | UnambiguousIdentifierLiteral { .. }
                | PropertyNameLiteral { .. }
                | IntegerRangeLiteral { .. }
                | FloatRangeLiteral { .. }
                | QuantityRangeLiteral { .. }
        )
    }
}

/// Calendar date of a [`NodeKind::DateLiteral`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DateValue {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    pub microsecond: u16,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Add,
    AddDot,
    Sub,
    SubDot,
    Mul,
    MulDot,
    Div,
    DivDot,
    SetDifference,
    Less,
    LessDot,
    LessOrEqual,
    LessOrEqualDot,
    Greater,
    GreaterDot,
    GreaterOrEqual,
    GreaterOrEqualDot,
    Equal,
    NotEqual,
    Is,
    IsNot,
    In,
    NotIn,
    Keyof,
    Dot,
    Range,
    ExclEndRange,
    And,
    Or,
    Match,
    NotMatch,
    Substrof,
    NilCoalescing,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Add => "+",
            AddDot => "+.",
            Sub => "-",
            SubDot => "-.",
            Mul => "*",
            MulDot => "*.",
            Div => "/",
            DivDot => "/.",
            SetDifference => "\\",
            Less => "<",
            LessDot => "<.",
            LessOrEqual => "<=",
            LessOrEqualDot => "<=.",
            Greater => ">",
            GreaterDot => ">.",
            GreaterOrEqual => ">=",
            GreaterOrEqualDot => ">=.",
            Equal => "==",
            NotEqual => "!=",
            Is => "is",
            IsNot => "is-not",
            In => "in",
            NotIn => "not-in",
            Keyof => "keyof",
            Dot => ".",
            Range => "..",
            ExclEndRange => "..<",
            And => "and",
            Or => "or",
            Match => "match",
            NotMatch => "not-match",
            Substrof => "substrof",
            NilCoalescing => "??",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    NumberNegate,
    BoolNegate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssignmentOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    MulAssign,
    DivAssign,
}

impl AssignmentOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::PlusAssign => "+=",
            AssignmentOperator::MinusAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OccurrenceCountModifier {
    ExactlyOne,
    AtLeastOne,
    ZeroOrMore,
    OptionalOccurrence,
    ExactOccurrenceCount,
}

type Child = Box<Node>;
type OptChild = Option<Box<Node>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    // recovery
    MissingExpression,
    UnknownNode,
    InvalidURLPattern {
        value: String,
    },
    InvalidURL {
        value: String,
    },
    InvalidAliasRelatedNode {
        raw: String,
    },
    InvalidPathPattern {
        value: String,
    },
    InvalidComplexStringPatternElement,
    InvalidObjectElement,
    InvalidMemberLike {
        left: Child,
        right: OptChild,
    },
    InvalidCssSelectorNode,

    // modules & declarations
    EmbeddedModule {
        manifest: OptChild,
        statements: Vec<Node>,
        single_call_expr: bool,
    },
    Block {
        statements: Vec<Node>,
    },
    Manifest {
        object: Child,
    },
    PreinitStatement {
        block: OptChild,
    },
    IncludableChunkDescription,
    GlobalConstantDeclarations {
        declarations: Vec<Node>,
    },
    GlobalConstantDeclaration {
        left: Child,
        right: Child,
    },
    LocalVariableDeclarations {
        declarations: Vec<Node>,
    },
    LocalVariableDeclaration {
        left: Child,
        type_annotation: OptChild,
        right: OptChild,
    },

    // identifiers & access
    Variable {
        name: String,
    },
    GlobalVariable {
        name: String,
    },
    IdentifierLiteral {
        name: String,
    },
    UnambiguousIdentifierLiteral {
        name: String,
    },
    PropertyNameLiteral {
        name: String,
    },
    SelfExpression,
    IdentifierMemberExpression {
        left: Child,
        property_names: Vec<Node>,
    },
    MemberExpression {
        left: Child,
        property_name: OptChild,
        optional: bool,
    },
    DynamicMemberExpression {
        left: Child,
        property_name: OptChild,
        optional: bool,
    },
    ComputedMemberExpression {
        left: Child,
        property_name: Child,
        optional: bool,
    },
    IndexExpression {
        indexed: Child,
        index: Child,
    },
    SliceExpression {
        indexed: Child,
        start_index: OptChild,
        end_index: OptChild,
    },
    KeyListExpression {
        keys: Vec<Node>,
    },
    ExtractionExpression {
        object: Child,
        keys: Child,
    },
    BooleanConversionExpression {
        expr: Child,
    },
    /// `$a::b`
    DoubleColonExpression {
        left: Child,
        element: OptChild,
    },

    // scalar literals
    BooleanLiteral {
        value: bool,
    },
    NilLiteral,
    IntLiteral {
        raw: String,
        value: i64,
    },
    FloatLiteral {
        raw: String,
        value: f64,
    },
    PortLiteral {
        raw: String,
        port_number: u16,
        scheme_name: String,
    },
    QuantityLiteral {
        raw: String,
        values: Vec<f64>,
        units: Vec<String>,
    },
    RateLiteral {
        raw: String,
        values: Vec<f64>,
        units: Vec<String>,
        div_unit: String,
    },
    DateLiteral {
        raw: String,
        value: DateValue,
    },
    RuneLiteral {
        value: char,
    },
    QuotedStringLiteral {
        raw: String,
        value: String,
    },
    UnquotedStringLiteral {
        raw: String,
        value: String,
    },
    MultilineStringLiteral {
        raw: String,
        value: String,
    },
    RegularExpressionLiteral {
        raw: String,
        value: String,
    },
    ByteSliceLiteral {
        raw: String,
        value: Vec<u8>,
    },
    FlagLiteral {
        raw: String,
        name: String,
        single_dash: bool,
    },
    OptionExpression {
        name: String,
        value: Child,
        single_dash: bool,
    },
    EmailAddressLiteral {
        value: String,
    },
    AtHostLiteral {
        value: String,
    },
    HostAliasDefinition {
        left: Child,
        right: Child,
    },
    LazyExpression {
        expression: Child,
    },

    // URLs & paths
    URLLiteral {
        value: String,
    },
    SchemeLiteral {
        name: String,
    },
    HostLiteral {
        value: String,
    },
    HostPatternLiteral {
        raw: String,
        value: String,
    },
    URLPatternLiteral {
        raw: String,
        value: String,
    },
    AbsolutePathLiteral {
        raw: String,
        value: String,
    },
    RelativePathLiteral {
        raw: String,
        value: String,
    },
    AbsolutePathPatternLiteral {
        raw: String,
        value: String,
    },
    RelativePathPatternLiteral {
        raw: String,
        value: String,
    },
    NamedSegmentPathPatternLiteral {
        raw: String,
        str_value: String,
        slices: Vec<Node>,
    },
    PathPatternExpression {
        slices: Vec<Node>,
    },
    AbsolutePathExpression {
        slices: Vec<Node>,
    },
    RelativePathExpression {
        slices: Vec<Node>,
    },
    PathSlice {
        value: String,
    },
    PathPatternSlice {
        value: String,
    },
    NamedPathSegment {
        name: String,
    },
    URLExpression {
        raw: String,
        host_part: Child,
        path: Vec<Node>,
        query_params: Vec<Node>,
    },
    URLQueryParameter {
        name: String,
        value: Vec<Node>,
    },
    URLQueryParameterValueSlice {
        value: String,
    },

    // templates & ranges
    StringTemplateLiteral {
        pattern: OptChild,
        slices: Vec<Node>,
    },
    StringTemplateSlice {
        raw: String,
        value: String,
    },
    StringTemplateInterpolation {
        type_name: String,
        expr: Child,
    },
    IntegerRangeLiteral {
        lower_bound: Child,
        upper_bound: OptChild,
    },
    FloatRangeLiteral {
        lower_bound: Child,
        upper_bound: OptChild,
    },
    QuantityRangeLiteral {
        lower_bound: Child,
        upper_bound: OptChild,
    },
    UpperBoundRangeExpression {
        upper_bound: Child,
    },
    RuneRangeExpression {
        lower: Child,
        upper: Child,
    },

    // composite literals
    ObjectLiteral {
        elements: Vec<Node>,
    },
    RecordLiteral {
        elements: Vec<Node>,
    },
    ObjectProperty {
        key: OptChild,
        type_annotation: OptChild,
        value: Child,
    },
    ObjectMetaProperty {
        key: Child,
        initialization: Child,
    },
    InitializationBlock {
        statements: Vec<Node>,
    },
    PropertySpreadElement {
        expr: Child,
    },
    ListLiteral {
        type_annotation: OptChild,
        elements: Vec<Node>,
    },
    TupleLiteral {
        type_annotation: OptChild,
        elements: Vec<Node>,
    },
    ElementSpreadElement {
        expr: Child,
    },
    DictionaryLiteral {
        entries: Vec<Node>,
    },
    DictionaryEntry {
        key: Child,
        value: OptChild,
    },

    // patterns
    PatternIdentifierLiteral {
        name: String,
        unprefixed: bool,
    },
    PatternNamespaceIdentifierLiteral {
        name: String,
        unprefixed: bool,
    },
    PatternNamespaceMemberExpression {
        namespace: Child,
        member_name: Child,
    },
    OptionalPatternExpression {
        pattern: Child,
    },
    ReadonlyPatternExpression {
        pattern: Child,
    },
    ObjectPatternLiteral {
        elements: Vec<Node>,
        inexact: bool,
    },
    RecordPatternLiteral {
        elements: Vec<Node>,
        inexact: bool,
    },
    ObjectPatternProperty {
        key: OptChild,
        type_annotation: OptChild,
        value: Child,
        optional: bool,
    },
    PatternPropertySpreadElement {
        expr: Child,
    },
    ListPatternLiteral {
        elements: Vec<Node>,
        general_element: OptChild,
    },
    TuplePatternLiteral {
        elements: Vec<Node>,
        general_element: OptChild,
    },
    OptionPatternLiteral {
        name: String,
        value: Child,
        single_dash: bool,
        unprefixed: bool,
    },
    PatternUnion {
        cases: Vec<Node>,
    },
    PatternCallExpression {
        callee: Child,
        arguments: Vec<Node>,
    },
    PatternDefinition {
        left: Child,
        right: Child,
        is_lazy: bool,
    },
    PatternNamespaceDefinition {
        left: Child,
        right: Child,
    },
    ComplexStringPatternPiece {
        elements: Vec<Node>,
    },
    PatternPieceElement {
        quantifier: OccurrenceCountModifier,
        exact_occurrence_count: u32,
        expr: Child,
        group_name: OptChild,
    },
    PatternGroupName {
        name: String,
    },
    PatternConversionExpression {
        value: Child,
    },
    FunctionPatternExpression {
        parameters: Vec<Node>,
        return_type: OptChild,
        is_variadic: bool,
    },
    RuntimeTypeCheckExpression {
        expr: Child,
    },

    // statements & control flow
    Assignment {
        left: Child,
        right: Child,
        operator: AssignmentOperator,
    },
    MultiAssignment {
        variables: Vec<Node>,
        right: Child,
        nillable: bool,
    },
    CallExpression {
        callee: Child,
        arguments: Vec<Node>,
        must: bool,
        command_like_syntax: bool,
    },
    SpreadArgument {
        expr: Child,
    },
    IfStatement {
        test: Child,
        consequent: OptChild,
        alternate: OptChild,
    },
    IfExpression {
        test: Child,
        consequent: Child,
        alternate: OptChild,
    },
    ForStatement {
        key_index_ident: OptChild,
        key_pattern: OptChild,
        value_elem_ident: OptChild,
        value_pattern: OptChild,
        chunked: bool,
        iterated_value: OptChild,
        body: OptChild,
    },
    WalkStatement {
        walked: Child,
        meta_ident: OptChild,
        entry_ident: OptChild,
        body: OptChild,
    },
    SwitchStatement {
        discriminant: Child,
        cases: Vec<Node>,
        default_cases: Vec<Node>,
    },
    SwitchCase {
        values: Vec<Node>,
        block: OptChild,
    },
    MatchStatement {
        discriminant: Child,
        cases: Vec<Node>,
        default_cases: Vec<Node>,
    },
    MatchCase {
        values: Vec<Node>,
        group_matching_variable: OptChild,
        block: OptChild,
    },
    DefaultCase {
        block: OptChild,
    },
    ReturnStatement {
        expr: OptChild,
    },
    YieldStatement {
        expr: OptChild,
    },
    BreakStatement {
        label: OptChild,
    },
    ContinueStatement {
        label: OptChild,
    },
    AssertionStatement {
        expr: Child,
    },
    SynchronizedBlockStatement {
        synchronized_values: Vec<Node>,
        block: OptChild,
    },
    PermissionDroppingStatement {
        object: Child,
    },
    ImportStatement {
        identifier: OptChild,
        source: OptChild,
        configuration: OptChild,
    },
    InclusionImportStatement {
        source: Child,
    },
    PipelineStatement {
        stages: Vec<Node>,
    },
    /// Pipeline on the right of `=`: `a = | ls | grep x`.
    PipelineExpression {
        stages: Vec<Node>,
    },
    PruneStatement,
    ExtendStatement {
        extended_pattern: OptChild,
        extension: OptChild,
    },
    UnaryExpression {
        operator: UnaryOperator,
        operand: Child,
    },
    BinaryExpression {
        /// `None` when the operator text is not a known operator.
        operator: Option<BinaryOperator>,
        left: Child,
        right: Child,
    },

    // functions
    FunctionExpression {
        captured_local_variables: Vec<Node>,
        parameters: Vec<Node>,
        return_type: OptChild,
        is_variadic: bool,
        body: OptChild,
        is_body_expression: bool,
    },
    FunctionDeclaration {
        function: Child,
        name: Child,
    },
    FunctionParameter {
        var: OptChild,
        type_annotation: OptChild,
        is_variadic: bool,
    },

    // concurrency & data forms
    SpawnExpression {
        meta: OptChild,
        module: OptChild,
    },
    MappingExpression {
        entries: Vec<Node>,
    },
    StaticMappingEntry {
        key: Child,
        value: Child,
    },
    DynamicMappingEntry {
        key: Child,
        key_var: Child,
        group_matching_variable: OptChild,
        value_computation: Child,
    },
    ComputeExpression {
        arg: Child,
    },
    UDataLiteral {
        root: Child,
        children: Vec<Node>,
    },
    UDataEntry {
        value: Child,
        children: Vec<Node>,
    },
    UDataPair {
        key: Child,
        value: Child,
    },
    ConcatenationExpression {
        elements: Vec<Node>,
    },
    TestSuiteExpression {
        meta: OptChild,
        module: OptChild,
        is_statement: bool,
    },
    TestCaseExpression {
        meta: OptChild,
        module: OptChild,
        is_statement: bool,
    },
    LifetimejobExpression {
        meta: Child,
        subject: OptChild,
        module: OptChild,
    },
    ReceptionHandlerExpression {
        pattern: Child,
        handler: Child,
    },

    SendValueExpression {
        value: OptChild,
        receiver: OptChild,
    },

    // structs
    StructDefinition {
        name: OptChild,
        body: OptChild,
    },
    StructBody {
        definitions: Vec<Node>,
    },
    StructFieldDefinition {
        name: Child,
        field_type: OptChild,
    },
    NewExpression {
        struct_type: OptChild,
        initialization: OptChild,
    },
    StructInitializationLiteral {
        fields: Vec<Node>,
    },
    StructFieldInitialization {
        name: Child,
        value: OptChild,
    },

    // CSS selectors
    CssSelectorExpression {
        elements: Vec<Node>,
    },
    CssCombinator {
        name: String,
    },
    CssClassSelector {
        name: String,
    },
    CssPseudoClassSelector {
        name: String,
        arguments: Vec<Node>,
    },
    CssPseudoElementSelector {
        name: String,
    },
    CssTypeSelector {
        name: String,
    },
    CssIdSelector {
        name: String,
    },
    CssAttributeSelector {
        attribute_name: Child,
        matcher: String,
        value: OptChild,
    },

    // XML
    XMLExpression {
        namespace: Child,
        element: Child,
    },
    XMLElement {
        opening: Child,
        children: Vec<Node>,
        closing: OptChild,
        raw_element_content: Option<String>,
    },
    XMLOpeningElement {
        name: Child,
        attributes: Vec<Node>,
        self_closing: bool,
    },
    XMLClosingElement {
        name: Child,
    },
    XMLAttribute {
        name: Child,
        value: OptChild,
    },
    XMLText {
        raw: String,
        value: String,
    },
    XMLInterpolation {
        expr: Child,
    },
}

macro_rules! kind_names {
    ($($variant:ident),* $(,)?) => {
        impl NodeKind {
            /// Variant name, as used in dumps and in the `type` field of JSON output.
            pub fn name(&self) -> &'static str {
                match self {
                    $(NodeKind::$variant { .. } => stringify!($variant),)*
                }
            }
        }
    };
}

kind_names!(
    MissingExpression,
    UnknownNode,
    InvalidURLPattern,
    InvalidURL,
    InvalidAliasRelatedNode,
    InvalidPathPattern,
    InvalidComplexStringPatternElement,
    InvalidObjectElement,
    InvalidMemberLike,
    InvalidCssSelectorNode,
    EmbeddedModule,
    Block,
    Manifest,
    PreinitStatement,
    IncludableChunkDescription,
    GlobalConstantDeclarations,
    GlobalConstantDeclaration,
    LocalVariableDeclarations,
    LocalVariableDeclaration,
    Variable,
    GlobalVariable,
    IdentifierLiteral,
    UnambiguousIdentifierLiteral,
    PropertyNameLiteral,
    SelfExpression,
    IdentifierMemberExpression,
    MemberExpression,
    DynamicMemberExpression,
    ComputedMemberExpression,
    IndexExpression,
    SliceExpression,
    KeyListExpression,
    ExtractionExpression,
    BooleanConversionExpression,
    DoubleColonExpression,
    BooleanLiteral,
    NilLiteral,
    IntLiteral,
    FloatLiteral,
    PortLiteral,
    QuantityLiteral,
    RateLiteral,
    DateLiteral,
    RuneLiteral,
    QuotedStringLiteral,
    UnquotedStringLiteral,
    MultilineStringLiteral,
    RegularExpressionLiteral,
    ByteSliceLiteral,
    FlagLiteral,
    OptionExpression,
    EmailAddressLiteral,
    AtHostLiteral,
    HostAliasDefinition,
    LazyExpression,
    URLLiteral,
    SchemeLiteral,
    HostLiteral,
    HostPatternLiteral,
    URLPatternLiteral,
    AbsolutePathLiteral,
    RelativePathLiteral,
    AbsolutePathPatternLiteral,
    RelativePathPatternLiteral,
    NamedSegmentPathPatternLiteral,
    PathPatternExpression,
    AbsolutePathExpression,
    RelativePathExpression,
    PathSlice,
    PathPatternSlice,
    NamedPathSegment,
    URLExpression,
    URLQueryParameter,
    URLQueryParameterValueSlice,
    StringTemplateLiteral,
    StringTemplateSlice,
    StringTemplateInterpolation,
    IntegerRangeLiteral,
    FloatRangeLiteral,
    QuantityRangeLiteral,
    UpperBoundRangeExpression,
    RuneRangeExpression,
    ObjectLiteral,
    RecordLiteral,
    ObjectProperty,
    ObjectMetaProperty,
    InitializationBlock,
    PropertySpreadElement,
    ListLiteral,
    TupleLiteral,
    ElementSpreadElement,
    DictionaryLiteral,
    DictionaryEntry,
    PatternIdentifierLiteral,
    PatternNamespaceIdentifierLiteral,
    PatternNamespaceMemberExpression,
    OptionalPatternExpression,
    ReadonlyPatternExpression,
    ObjectPatternLiteral,
    RecordPatternLiteral,
    ObjectPatternProperty,
    PatternPropertySpreadElement,
    ListPatternLiteral,
    TuplePatternLiteral,
    OptionPatternLiteral,
    PatternUnion,
    PatternCallExpression,
    PatternDefinition,
    PatternNamespaceDefinition,
    ComplexStringPatternPiece,
    PatternPieceElement,
    PatternGroupName,
    PatternConversionExpression,
    FunctionPatternExpression,
    RuntimeTypeCheckExpression,
    Assignment,
    MultiAssignment,
    CallExpression,
    SpreadArgument,
    IfStatement,
    IfExpression,
    ForStatement,
    WalkStatement,
    SwitchStatement,
    SwitchCase,
    MatchStatement,
    MatchCase,
    DefaultCase,
    ReturnStatement,
    YieldStatement,
    BreakStatement,
    ContinueStatement,
    AssertionStatement,
    SynchronizedBlockStatement,
    PermissionDroppingStatement,
    ImportStatement,
    InclusionImportStatement,
    PipelineStatement,
    PipelineExpression,
    PruneStatement,
    ExtendStatement,
    UnaryExpression,
    BinaryExpression,
    FunctionExpression,
    FunctionDeclaration,
    FunctionParameter,
    SpawnExpression,
    MappingExpression,
    StaticMappingEntry,
    DynamicMappingEntry,
    ComputeExpression,
    UDataLiteral,
    UDataEntry,
    UDataPair,
    ConcatenationExpression,
    TestSuiteExpression,
    TestCaseExpression,
    LifetimejobExpression,
    ReceptionHandlerExpression,
    SendValueExpression,
    StructDefinition,
    StructBody,
    StructFieldDefinition,
    NewExpression,
    StructInitializationLiteral,
    StructFieldInitialization,
    CssSelectorExpression,
    CssCombinator,
    CssClassSelector,
    CssPseudoClassSelector,
    CssPseudoElementSelector,
    CssTypeSelector,
    CssIdSelector,
    CssAttributeSelector,
    XMLExpression,
    XMLElement,
    XMLOpeningElement,
    XMLClosingElement,
    XMLAttribute,
    XMLText,
    XMLInterpolation,
);
