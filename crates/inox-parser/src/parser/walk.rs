//! Tree traversal.
//!
//! # Usage
//!
//! Implement `Visitor` for your struct. Override `visit_node` to add logic and
//! call `walk_node` within your override to continue recursion (or omit it to
//! stop).
//!
//! ```
//! use inox_parser::{ParserOptions, parse_chunk};
//! use inox_parser::parser::ast::Node;
//! use inox_parser::parser::walk::{Visitor, walk_node};
//!
//! struct CountNodes(usize);
//!
//! impl Visitor for CountNodes {
//!     fn visit_node(&mut self, node: &Node) {
//!         self.0 += 1;
//!         walk_node(self, node);
//!     }
//! }
//!
//! let parsed = parse_chunk("$a.b", "<chunk>", ParserOptions::default()).unwrap();
//! let mut counter = CountNodes(0);
//! counter.visit_chunk(&parsed.chunk);
//! assert_eq!(counter.0, 3);
//! ```

use super::ast::{Chunk, Node, NodeKind};
use super::token::Token;

pub trait Visitor: Sized {
    fn visit_chunk(&mut self, chunk: &Chunk) {
        walk_chunk(self, chunk);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }
}

/// Visits the top-level nodes in source order.
pub fn walk_chunk<V: Visitor>(visitor: &mut V, chunk: &Chunk) {
    for node in chunk.top_level_nodes() {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for child in node.children() {
        visitor.visit_node(child);
    }
}

impl Chunk {
    /// Prologue nodes followed by the statements.
    pub fn top_level_nodes(&self) -> impl Iterator<Item = &Node> {
        self.includable_chunk_desc
            .as_deref()
            .into_iter()
            .chain(self.global_constant_declarations.as_deref())
            .chain(self.preinit.as_deref())
            .chain(self.manifest.as_deref())
            .chain(self.statements.iter())
    }

    /// Tokens that belong to `node` itself: inside its span and outside the
    /// spans of all its children.
    pub fn tokens_of(&self, node: &Node) -> Vec<&Token> {
        let children = node.children();
        let first = self
            .tokens
            .partition_point(|t| t.span.start() < node.span.start());

        self.tokens[first..]
            .iter()
            .take_while(|t| t.span.start() < node.span.end())
            .filter(|t| node.span.contains_range(t.span))
            .filter(|t| !children.iter().any(|c| c.span.contains_range(t.span)))
            .collect()
    }

    /// Tokens that are not inside any top-level node.
    pub fn own_tokens(&self) -> Vec<&Token> {
        let nodes: Vec<&Node> = self.top_level_nodes().collect();
        self.tokens
            .iter()
            .filter(|t| !nodes.iter().any(|n| n.span.contains_range(t.span)))
            .collect()
    }
}

impl Node {
    /// Direct children ordered by start offset. The function of a
    /// `FunctionDeclaration` spans its name, so it comes first.
    pub fn children(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.kind.push_children(&mut out);
        out
    }

    /// Whether this node or any descendant carries an error.
    pub fn has_error_in_tree(&self) -> bool {
        self.err.is_some() || self.children().into_iter().any(Node::has_error_in_tree)
    }
}

fn one<'a>(out: &mut Vec<&'a Node>, node: &'a Node) {
    out.push(node);
}

fn opt<'a>(out: &mut Vec<&'a Node>, node: &'a Option<Box<Node>>) {
    if let Some(node) = node {
        out.push(node);
    }
}

fn many<'a>(out: &mut Vec<&'a Node>, nodes: &'a [Node]) {
    out.extend(nodes.iter());
}

impl NodeKind {
    fn push_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        use NodeKind::*;
        match self {
            MissingExpression
            | UnknownNode
            | InvalidURLPattern { .. }
            | InvalidURL { .. }
            | InvalidAliasRelatedNode { .. }
            | InvalidPathPattern { .. }
            | InvalidComplexStringPatternElement
            | InvalidObjectElement
            | InvalidCssSelectorNode
            | IncludableChunkDescription
            | Variable { .. }
            | GlobalVariable { .. }
            | IdentifierLiteral { .. }
            | UnambiguousIdentifierLiteral { .. }
            | PropertyNameLiteral { .. }
            | SelfExpression
            | BooleanLiteral { .. }
            | NilLiteral
            | IntLiteral { .. }
            | FloatLiteral { .. }
            | PortLiteral { .. }
            | QuantityLiteral { .. }
            | RateLiteral { .. }
            | DateLiteral { .. }
            | RuneLiteral { .. }
            | QuotedStringLiteral { .. }
            | UnquotedStringLiteral { .. }
            | MultilineStringLiteral { .. }
            | RegularExpressionLiteral { .. }
            | ByteSliceLiteral { .. }
            | FlagLiteral { .. }
            | EmailAddressLiteral { .. }
            | AtHostLiteral { .. }
            | URLLiteral { .. }
            | SchemeLiteral { .. }
            | HostLiteral { .. }
            | HostPatternLiteral { .. }
            | URLPatternLiteral { .. }
            | AbsolutePathLiteral { .. }
            | RelativePathLiteral { .. }
            | AbsolutePathPatternLiteral { .. }
            | RelativePathPatternLiteral { .. }
            | PathSlice { .. }
            | PathPatternSlice { .. }
            | NamedPathSegment { .. }
            | URLQueryParameterValueSlice { .. }
            | StringTemplateSlice { .. }
            | PatternIdentifierLiteral { .. }
            | PatternNamespaceIdentifierLiteral { .. }
            | PatternGroupName { .. }
            | CssCombinator { .. }
            | CssClassSelector { .. }
            | CssPseudoElementSelector { .. }
            | CssTypeSelector { .. }
            | CssIdSelector { .. }
            | XMLText { .. }
            | PruneStatement => {}

            InvalidMemberLike { left, right } => {
                one(out, left);
                opt(out, right);
            }
            EmbeddedModule {
                manifest,
                statements,
                ..
            } => {
                opt(out, manifest);
                many(out, statements);
            }
            Block { statements } | InitializationBlock { statements } => many(out, statements),
            Manifest { object } => one(out, object),
            PreinitStatement { block } => opt(out, block),
            GlobalConstantDeclarations { declarations }
            | LocalVariableDeclarations { declarations } => many(out, declarations),
            GlobalConstantDeclaration { left, right }
            | HostAliasDefinition { left, right }
            | PatternNamespaceDefinition { left, right } => {
                one(out, left);
                one(out, right);
            }
            PatternDefinition { left, right, .. } => {
                one(out, left);
                one(out, right);
            }
            LocalVariableDeclaration {
                left,
                type_annotation,
                right,
            } => {
                one(out, left);
                opt(out, type_annotation);
                opt(out, right);
            }
            IdentifierMemberExpression {
                left,
                property_names,
            } => {
                one(out, left);
                many(out, property_names);
            }
            MemberExpression {
                left,
                property_name,
                ..
            }
            | DynamicMemberExpression {
                left,
                property_name,
                ..
            } => {
                one(out, left);
                opt(out, property_name);
            }
            ComputedMemberExpression {
                left,
                property_name,
                ..
            } => {
                one(out, left);
                one(out, property_name);
            }
            IndexExpression { indexed, index } => {
                one(out, indexed);
                one(out, index);
            }
            SliceExpression {
                indexed,
                start_index,
                end_index,
            } => {
                one(out, indexed);
                opt(out, start_index);
                opt(out, end_index);
            }
            KeyListExpression { keys } => many(out, keys),
            ExtractionExpression { object, keys } => {
                one(out, object);
                one(out, keys);
            }
            BooleanConversionExpression { expr }
            | PropertySpreadElement { expr }
            | ElementSpreadElement { expr }
            | PatternPropertySpreadElement { expr }
            | SpreadArgument { expr }
            | AssertionStatement { expr }
            | RuntimeTypeCheckExpression { expr }
            | StringTemplateInterpolation { expr, .. }
            | XMLInterpolation { expr } => one(out, expr),
            OptionExpression { value, .. } | OptionPatternLiteral { value, .. } => one(out, value),
            LazyExpression { expression } => one(out, expression),
            NamedSegmentPathPatternLiteral { slices, .. }
            | PathPatternExpression { slices }
            | AbsolutePathExpression { slices }
            | RelativePathExpression { slices } => many(out, slices),
            URLExpression {
                host_part,
                path,
                query_params,
                ..
            } => {
                one(out, host_part);
                many(out, path);
                many(out, query_params);
            }
            URLQueryParameter { value, .. } => many(out, value),
            StringTemplateLiteral { pattern, slices } => {
                opt(out, pattern);
                many(out, slices);
            }
            IntegerRangeLiteral {
                lower_bound,
                upper_bound,
            }
            | FloatRangeLiteral {
                lower_bound,
                upper_bound,
            }
            | QuantityRangeLiteral {
                lower_bound,
                upper_bound,
            } => {
                one(out, lower_bound);
                opt(out, upper_bound);
            }
            UpperBoundRangeExpression { upper_bound } => one(out, upper_bound),
            RuneRangeExpression { lower, upper } => {
                one(out, lower);
                one(out, upper);
            }
            ObjectLiteral { elements }
            | RecordLiteral { elements }
            | ObjectPatternLiteral { elements, .. }
            | RecordPatternLiteral { elements, .. }
            | ComplexStringPatternPiece { elements }
            | ConcatenationExpression { elements }
            | CssSelectorExpression { elements } => many(out, elements),
            ObjectProperty {
                key,
                type_annotation,
                value,
            }
            | ObjectPatternProperty {
                key,
                type_annotation,
                value,
                ..
            } => {
                opt(out, key);
                opt(out, type_annotation);
                one(out, value);
            }
            ObjectMetaProperty {
                key,
                initialization,
            } => {
                one(out, key);
                one(out, initialization);
            }
            ListLiteral {
                type_annotation,
                elements,
            }
            | TupleLiteral {
                type_annotation,
                elements,
            } => {
                opt(out, type_annotation);
                many(out, elements);
            }
            DictionaryLiteral { entries } | MappingExpression { entries } => many(out, entries),
            DictionaryEntry { key, value } => {
                one(out, key);
                opt(out, value);
            }
            PatternNamespaceMemberExpression {
                namespace,
                member_name,
            } => {
                one(out, namespace);
                one(out, member_name);
            }
            OptionalPatternExpression { pattern } => one(out, pattern),
            ListPatternLiteral {
                elements,
                general_element,
            }
            | TuplePatternLiteral {
                elements,
                general_element,
            } => {
                many(out, elements);
                opt(out, general_element);
            }
            PatternUnion { cases } => many(out, cases),
            PatternCallExpression { callee, arguments }
            | CallExpression {
                callee, arguments, ..
            } => {
                one(out, callee);
                many(out, arguments);
            }
            PatternPieceElement {
                expr, group_name, ..
            } => {
                opt(out, group_name);
                one(out, expr);
            }
            PatternConversionExpression { value } => one(out, value),
            FunctionPatternExpression {
                parameters,
                return_type,
                ..
            } => {
                many(out, parameters);
                opt(out, return_type);
            }
            Assignment { left, right, .. } => {
                one(out, left);
                one(out, right);
            }
            MultiAssignment {
                variables, right, ..
            } => {
                many(out, variables);
                one(out, right);
            }
            IfStatement {
                test,
                consequent,
                alternate,
            } => {
                one(out, test);
                opt(out, consequent);
                opt(out, alternate);
            }
            IfExpression {
                test,
                consequent,
                alternate,
            } => {
                one(out, test);
                one(out, consequent);
                opt(out, alternate);
            }
            ForStatement {
                key_index_ident,
                key_pattern,
                value_elem_ident,
                value_pattern,
                iterated_value,
                body,
                ..
            } => {
                opt(out, key_pattern);
                opt(out, key_index_ident);
                opt(out, value_pattern);
                opt(out, value_elem_ident);
                opt(out, iterated_value);
                opt(out, body);
            }
            WalkStatement {
                walked,
                meta_ident,
                entry_ident,
                body,
            } => {
                one(out, walked);
                opt(out, meta_ident);
                opt(out, entry_ident);
                opt(out, body);
            }
            SwitchStatement {
                discriminant,
                cases,
                default_cases,
            }
            | MatchStatement {
                discriminant,
                cases,
                default_cases,
            } => {
                one(out, discriminant);
                let mut all: Vec<&Node> = cases.iter().chain(default_cases.iter()).collect();
                all.sort_by_key(|n| n.span.start());
                out.extend(all);
            }
            SwitchCase { values, block } => {
                many(out, values);
                opt(out, block);
            }
            MatchCase {
                values,
                group_matching_variable,
                block,
            } => {
                many(out, values);
                opt(out, group_matching_variable);
                opt(out, block);
            }
            DefaultCase { block } => opt(out, block),
            ReturnStatement { expr } | YieldStatement { expr } => opt(out, expr),
            BreakStatement { label } | ContinueStatement { label } => opt(out, label),
            SynchronizedBlockStatement {
                synchronized_values,
                block,
            } => {
                many(out, synchronized_values);
                opt(out, block);
            }
            PermissionDroppingStatement { object } => one(out, object),
            ImportStatement {
                identifier,
                source,
                configuration,
            } => {
                opt(out, identifier);
                opt(out, source);
                opt(out, configuration);
            }
            InclusionImportStatement { source } => one(out, source),
            PipelineStatement { stages } | PipelineExpression { stages } => many(out, stages),
            ExtendStatement {
                extended_pattern,
                extension,
            } => {
                opt(out, extended_pattern);
                opt(out, extension);
            }
            DoubleColonExpression { left, element } => {
                one(out, left);
                opt(out, element);
            }
            ReadonlyPatternExpression { pattern } => one(out, pattern),
            SendValueExpression { value, receiver } => {
                opt(out, value);
                opt(out, receiver);
            }
            StructDefinition { name, body } => {
                opt(out, name);
                opt(out, body);
            }
            StructBody { definitions } => many(out, definitions),
            StructFieldDefinition { name, field_type } => {
                one(out, name);
                opt(out, field_type);
            }
            NewExpression {
                struct_type,
                initialization,
            } => {
                opt(out, struct_type);
                opt(out, initialization);
            }
            StructInitializationLiteral { fields } => many(out, fields),
            StructFieldInitialization { name, value } => {
                one(out, name);
                opt(out, value);
            }
            UnaryExpression { operand, .. } => one(out, operand),
            BinaryExpression { left, right, .. } => {
                one(out, left);
                one(out, right);
            }
            FunctionExpression {
                captured_local_variables,
                parameters,
                return_type,
                body,
                ..
            } => {
                many(out, captured_local_variables);
                many(out, parameters);
                opt(out, return_type);
                opt(out, body);
            }
            FunctionDeclaration { function, name } => {
                if name.span.start() <= function.span.start() {
                    one(out, name);
                    one(out, function);
                } else {
                    one(out, function);
                    one(out, name);
                }
            }
            FunctionParameter {
                var,
                type_annotation,
                ..
            } => {
                opt(out, var);
                opt(out, type_annotation);
            }
            SpawnExpression { meta, module } => {
                opt(out, meta);
                opt(out, module);
            }
            StaticMappingEntry { key, value } => {
                one(out, key);
                one(out, value);
            }
            DynamicMappingEntry {
                key,
                key_var,
                group_matching_variable,
                value_computation,
            } => {
                one(out, key_var);
                one(out, key);
                opt(out, group_matching_variable);
                one(out, value_computation);
            }
            ComputeExpression { arg } => one(out, arg),
            UDataLiteral { root, children } => {
                one(out, root);
                many(out, children);
            }
            UDataEntry { value, children } => {
                one(out, value);
                many(out, children);
            }
            UDataPair { key, value } => {
                one(out, key);
                one(out, value);
            }
            TestSuiteExpression { meta, module, .. } | TestCaseExpression { meta, module, .. } => {
                opt(out, meta);
                opt(out, module);
            }
            LifetimejobExpression {
                meta,
                subject,
                module,
            } => {
                one(out, meta);
                opt(out, subject);
                opt(out, module);
            }
            ReceptionHandlerExpression { pattern, handler } => {
                one(out, pattern);
                one(out, handler);
            }
            CssPseudoClassSelector { arguments, .. } => many(out, arguments),
            CssAttributeSelector {
                attribute_name,
                value,
                ..
            } => {
                one(out, attribute_name);
                opt(out, value);
            }
            XMLExpression { namespace, element } => {
                one(out, namespace);
                one(out, element);
            }
            XMLElement {
                opening,
                children,
                closing,
                ..
            } => {
                one(out, opening);
                many(out, children);
                opt(out, closing);
            }
            XMLOpeningElement {
                name, attributes, ..
            } => {
                one(out, name);
                many(out, attributes);
            }
            XMLClosingElement { name } => one(out, name),
            XMLAttribute { name, value } => {
                one(out, name);
                opt(out, value);
            }
        }
    }
}
