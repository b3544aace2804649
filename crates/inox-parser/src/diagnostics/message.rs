//! Message texts of node errors.
//!
//! Constants are fixed messages; `fmt_*` functions build messages that embed
//! a piece of the source or a node kind name.

use crate::parser::scan::is_forbidden_space;

// chunk & blocks
pub const STMTS_SHOULD_BE_SEPARATED_BY: &str =
    "statements should be separated by a space, newline or ';'";
pub const PREINIT_KEYWORD_SHOULD_BE_FOLLOWED_BY_A_BLOCK: &str =
    "preinit keyword should be followed by a block";
pub const INVALID_MANIFEST_DESC_VALUE: &str =
    "invalid manifest description value, an object is expected";
pub const UNTERMINATED_BLOCK_MISSING_BRACE: &str = "unterminated block, missing closing brace '}'";
pub const UNTERMINATED_EMBEDDED_MODULE: &str = "unterminated embedded module";
pub const RECURSION_LIMIT_EXCEEDED: &str =
    "nesting is too deep, the rest of the input is not parsed";

// identifiers & members
pub const KEYWORDS_SHOULD_NOT_BE_USED_IN_ASSIGNMENT_LHS: &str =
    "keywords should not be used in left hand side of assignment";
pub const KEYWORDS_SHOULD_NOT_BE_USED_AS_FN_NAMES: &str =
    "keywords should not be used as function names";
pub const KEYWORDS_SHOULD_NOT_BE_USED_AS_PARAM_NAMES: &str =
    "keywords should not be used as parameter names";
pub const UNTERMINATED_IDENTIFIER_LIT: &str = "unterminated identifier literal";
pub const IDENTIFIER_LITERAL_MUST_NO_END_WITH_A_HYPHEN: &str =
    "identifier literal must not end with '-'";
pub const UNTERMINATED_MEMB_OR_INDEX_EXPR: &str = "unterminated member/index expression";
pub const UNTERMINATED_IDENT_MEMB_EXPR: &str = "unterminated identifier member expression";
pub const UNTERMINATED_DYN_MEMB_OR_INDEX_EXPR: &str =
    "unterminated dynamic member/index expression";
pub const UNTERMINATED_INDEX_OR_SLICE_EXPR: &str = "unterminated index/slice expression";
pub const INVALID_SLICE_EXPR_SINGLE_COLON: &str =
    "invalid slice expression, a single colon should be present";
pub const UNTERMINATED_SLICE_EXPR_MISSING_END_INDEX: &str =
    "unterminated slice expression, missing end index";
pub const UNTERMINATED_INDEX_OR_SLICE_EXPR_MISSING_CLOSING_BRACKET: &str =
    "unterminated index/slice expression, missing closing bracket ']'";
pub const UNTERMINATED_KEY_LIST_MISSING_BRACE: &str =
    "unterminated key list, missing closing brace '}'";
pub const KEY_LIST_CAN_ONLY_CONTAIN_IDENTS: &str = "a key list can only contain identifiers";
pub const DOT_SHOULD_BE_FOLLOWED_BY: &str = "'.' should be followed by (.)?(/), or a letter";

// calls & pipelines
pub const UNTERMINATED_CALL_MISSING_CLOSING_PAREN: &str =
    "unterminated call, missing closing parenthesis ')'";
pub const UNTERMINATED_CALL: &str = "unterminated call";
pub const SPREAD_ARGUMENT_CANNOT_BE_FOLLOWED_BY_ADDITIONAL_ARGS: &str =
    "a spread argument cannot be followed by additional arguments";
pub const UNTERMINATED_PIPE_STMT_LAST_STAGE_EMPTY: &str =
    "unterminated pipeline statement: last stage is empty";
pub const INVALID_PIPE_STATE_ALL_STAGES_SHOULD_BE_CALLS: &str =
    "invalid pipeline stage, all pipeline stages should be calls";

// parenthesized, unary, binary
pub const UNTERMINATED_PARENTHESIZED_EXPR_MISSING_CLOSING_PAREN: &str =
    "unterminated parenthesized expression: missing closing parenthesis";
pub const UNTERMINATED_UNARY_EXPR_MISSING_OPERAND: &str =
    "unterminated unary expression: missing operand";
pub const INVALID_BIN_EXPR_NON_EXISTING_OPERATOR: &str =
    "invalid binary expression, non existing operator";
pub const UNTERMINATED_BIN_EXPR_MISSING_OPERATOR: &str =
    "unterminated binary expression: missing operator";
pub const UNTERMINATED_BIN_EXPR_MISSING_OPERAND: &str =
    "unterminated binary expression: missing right operand";
pub const UNTERMINATED_BIN_EXPR_MISSING_OPERAND_OR_INVALID_OPERATOR: &str =
    "unterminated binary expression: missing right operand and/or invalid operator";
pub const UNTERMINATED_BIN_EXPR_MISSING_PAREN: &str =
    "unterminated binary expression: missing closing parenthesis";
pub const BIN_EXPR_CHAIN_OPERATORS_SHOULD_BE_THE_SAME: &str =
    "the operators of a binary expression chain should be all the same: either 'or' or 'and'";
pub const UNTERMINATED_IF_EXPR_MISSING_VALUE_AFTER_ELSE: &str =
    "unterminated if expression, missing value after 'else'";
pub const UNTERMINATED_IF_EXPR_MISSING_CLOSING_PAREN: &str =
    "unterminated if expression: missing closing parenthesis";

// numbers, dates, byte slices
pub const INVALID_INT_LIT: &str = "invalid integer literal";
pub const INVALID_FLOAT_LIT: &str = "invalid floating point literal";
pub const INVALID_QUANTITY_LIT: &str = "invalid quantity literal";
pub const QUANTITY_LIT_NOT_ALLOWED_WITH_HEXADECIMAL_NUM: &str =
    "quantity literals with a hexadecimal number are not allowed";
pub const QUANTITY_LIT_NOT_ALLOWED_WITH_OCTAL_NUM: &str =
    "quantity literals with an octal number are not allowed";
pub const QUANTITY_LIT_NOT_ALLOWED_WITH_BINARY_NUM: &str =
    "quantity literals with a binary number are not allowed";
pub const INVALID_RATE_LIT: &str = "invalid rate literal";
pub const INVALID_RATE_LIT_DIV_SYMBOL_SHOULD_BE_FOLLOWED_BY_UNIT: &str =
    "invalid rate literal: '/' should be immediately followed by a unit";
pub const UNTERMINATED_INT_RANGE_LIT: &str = "unterminated integer range literal";
pub const UPPER_BOUND_OF_INT_RANGE_LIT_SHOULD_BE_INT_LIT: &str =
    "upper bound of an integer range literal should be a integer literal";
pub const UPPER_BOUND_OF_FLOAT_RANGE_LIT_SHOULD_BE_FLOAT_LIT: &str =
    "upper bound of a float range literal should be a float literal";
pub const UPPER_BOUND_OF_QTY_RANGE_LIT_SHOULD_BE_QTY_LIT: &str =
    "upper bound of a quantity range literal should be a quantity literal";
pub const INVALID_UPPER_BOUND_RANGE_EXPR: &str = "invalid upper-bound range expression";
pub const INVALID_DATE_LITERAL: &str = "invalid date literal";
pub const INVALID_DATE_LITERAL_MISSING_LOCATION_PART_AT_THE_END: &str =
    "invalid date literal: missing location part at the end (e.g.,`-UTC`, `-America/Los_Angeles`)";
pub const INVALID_MONTH_VALUE: &str = "invalid month value";
pub const INVALID_DAY_VALUE: &str = "invalid day value";
pub const UNKNOWN_BYTE_SLICE_BASE: &str = "unknown byte slice base";
pub const UNTERMINATED_HEX_BYTE_SICE_LIT_MISSING_BRACKETS: &str =
    "unterminated hexadecimal byte slice literal: missing brackets";
pub const UNTERMINATED_BIN_BYTE_SICE_LIT_MISSING_BRACKETS: &str =
    "unterminated binary byte slice literal: missing brackets";
pub const UNTERMINATED_DECIMAL_BYTE_SICE_LIT_MISSING_BRACKETS: &str =
    "unterminated decimal byte slice literal: missing brackets";
pub const INVALID_HEX_BYTE_SICE_LIT_LENGTH_SHOULD_BE_EVEN: &str =
    "invalid hexadecimal byte slice literal: length should be even";
pub const UNTERMINATED_BYTE_SICE_LIT_MISSING_CLOSING_BRACKET: &str =
    "unterminated byte slice literal: missing closing bracket";
pub const INVALID_PORT_LITERAL_INVALID_PORT_NUMBER: &str =
    "invalid port literal: invalid port number, maximum is 65_535";
pub const UNTERMINATED_PORT_LITERAL_MISSING_SCHEME_NAME_AFTER_SLASH: &str =
    "unterminated port literal; missing scheme name after '/'";

// strings, runes, regexes, templates
pub const UNTERMINATED_QUOTED_STRING_LIT: &str = "unterminated quoted string literal";
pub const UNTERMINATED_MULTILINE_STRING_LIT: &str = "unterminated multiline string literal";
pub const UNTERMINATED_RUNE_LIT: &str = "unterminated rune literal";
pub const INVALID_RUNE_LIT_NO_CHAR: &str = "invalid rune literal: no character";
pub const INVALID_RUNE_LIT_INVALID_SINGLE_CHAR_ESCAPE: &str =
    "invalid rune literal: invalid single character escape";
pub const UNTERMINATED_RUNE_LIT_MISSING_QUOTE: &str =
    "unterminated rune literal, missing ' at the end";
pub const INVALID_RUNE_RANGE_EXPR: &str = "invalid rune range expression";
pub const UNTERMINATED_REGEX_LIT: &str = "unterminated regex literal";
pub const INVALID_STRING_INTERPOLATION_SHOULD_NOT_BE_EMPTY: &str =
    "string interpolation should not be empty";
pub const INVALID_STRING_INTERPOLATION_SHOULD_START_WITH_A_NAME: &str =
    "string interpolation should start with a name";
pub const NAME_IN_STR_INTERP_SHOULD_BE_FOLLOWED_BY_COLON_AND_EXPR: &str =
    "name in string interpolation should be followed by a colon and an expression";
pub const STR_INTERP_LIMITED_CHARSET: &str =
    "a string interpolation can only contain a limited set of characters";
pub const INVALID_STR_INTERP: &str = "invalid string interpolation";
pub const UNTERMINATED_STRING_INTERP: &str = "unterminated string interpolation";
pub const UNTERMINATED_STRING_TEMPL_LIT: &str = "unterminated string template literal";
pub const INVALID_OPTION_NAME: &str =
    "the name of an option can only contain alphanumeric characters";
pub const OPTION_NAME_CAN_ONLY_CONTAIN_ALPHANUM_CHARS: &str =
    "the name of an option can only contain alphanumeric characters";
pub const DASH_SHOULD_BE_FOLLOWED_BY_OPTION_NAME: &str = "'-' should be followed by an option name";
pub const DOUBLE_DASH_SHOULD_BE_FOLLOWED_BY_OPTION_NAME: &str =
    "'--' should be followed by an option name";
pub const UNTERMINATED_OPION_EXPR_EQUAL_ASSIGN_SHOULD_BE_FOLLOWED_BY_EXPR: &str =
    "unterminated option expression, '=' should be followed by an expression";
pub const UNTERMINATED_OPION_PATT_EQUAL_ASSIGN_SHOULD_BE_FOLLOWED_BY_EXPR: &str =
    "unterminated option pattern, '=' should be followed by an expression";
pub const UNTERMINATED_OPION_PATTERN_A_VALUE_IS_EXPECTED_AFTER_EQUAL_SIGN: &str =
    "unterminated option pattern, a value is expected after '='";

// paths
pub const INVALID_PATH_INTERP: &str = "invalid path interpolation";
pub const EMPTY_PATH_INTERP: &str = "empty path interpolation";
pub const PATH_INTERP_EXPLANATION: &str =
    "a path interpolation can only contain a limited set of characters";
pub const CANNOT_MIX_PATH_INTER_PATH_NAMED_SEGMENT: &str =
    "cannot mix interpolation and named path segments";
pub const UNTERMINATED_PATH_INTERP: &str = "unterminated path interpolation";
pub const UNTERMINATED_PATH_INTERP_MISSING_CLOSING_BRACE: &str =
    "unterminated path interpolation; missing closing brace";
pub const UNTERMINATED_QUOTED_PATH_LIT_MISSING_CLOSING_BACTICK: &str =
    "unterminated quoted path literal: missing closing backtick";
pub const UNTERMINATED_QUOTED_PATH_EXPR_MISSING_CLOSING_BACTICK: &str =
    "unterminated quoted path expression: missing closing backtick";
pub const ONLY_PATH_PATTERNS_CAN_CONTAIN_NAMED_SEGMENTS: &str =
    "only path patterns can contain named segments";
pub const INVALID_PATH_PATT_NAMED_SEGMENTS: &str =
    "invalid path pattern literal with named segments";
pub const INVALID_PATH_PATT_UNBALANCED_DELIMITERS: &str =
    "invalid path pattern literal: unbalanced delimiters";
pub const UNTERMINATED_QUOTED_PATH_PATTERN_LIT_MISSING_CLOSING_BACTICK: &str =
    "unterminated quoted path pattern literal: missing closing backtick";
pub const QUOTED_PATH_PATTERN_EXPRS_ARE_NOT_SUPPORTED_YET: &str =
    "quoted path pattern expressions are not supported yet";
pub const INVALID_NAMED_SEGMENT_PATH_PATTERN_COLON_SHOULD_BE_FOLLOWED_BY_A_NAME: &str =
    "invalid named-segment path pattern: colon should be followed by a name";
pub const INVALID_NAMED_SEGMENT_PATH_PATTERN_COLON_NAME_SHOULD_NOT_START_WITH_DASH: &str =
    "invalid named-segment path pattern: name should not start with '-'";
pub const INVALID_NAMED_SEGMENT_PATH_PATTERN_COLON_NAME_SHOULD_NOT_END_WITH_DASH: &str =
    "invalid named-segment path pattern: name should not end with '-'";

// URLs, hosts, schemes
pub const INVALID_QUERY: &str = "invalid query";
pub const UNTERMINATED_QUERY_PARAM_INTERP: &str = "unterminated query parameter interpolation";
pub const UNTERMINATED_QUERY_PARAM_INTERP_MISSING_CLOSING_BRACE: &str =
    "unterminated query parameter interpolation: missing closing brace '}'";
pub const INVALID_QUERY_PARAM_INTERP: &str = "invalid query parameter interpolation";
pub const EMPTY_QUERY_PARAM_INTERP: &str = "empty query parameter interpolation";
pub const URL_PATTERN_SUBSEQUENT_DOT_EXPLANATION: &str =
    "URL patterns cannot contain more than 2 subsequents dots except /... at the end";
pub const URL_PATTERNS_CANNOT_END_WITH_SLASH_MORE_THAN_4_DOTS: &str =
    "URL patterns cannot end with more than 3 subsequent dots preceded by a slash";
pub const UNTERMINATED_URL_OR_HOST_PATT_MISSING_HOST: &str =
    "unterminated URL or Host pattern: missing host part after ://";
pub const INVALID_URL_PATT: &str = "invalid URL pattern";
pub const INVALID_SCHEME_LIT_MISSING_SCHEME: &str =
    "invalid scheme literal: '://' should be preceded by a scheme";
pub const INVALID_HOST_LIT: &str = "invalid host literal";
pub const INVALID_URL: &str = "invalid URL";
pub const INVALID_URL_OR_HOST: &str = "invalid URL or Host";
pub const INVALID_HOST_INTERPOLATION: &str = "invalid host interpolation";
pub const URL_EXPR_CANNOT_CONTAIN_INTERP_NEXT_TO_EACH_OTHER: &str =
    "an URL expression cannot contain interpolations next to each others";
pub const URL_EXPR_CANNOT_END_WITH_SLASH_3DOTS: &str = "an URL expression cannot end with /...";
pub const INVALID_HOST_PATT: &str = "invalid host pattern";
pub const INVALID_HOST_PATT_SUGGEST_DOUBLE_STAR: &str =
    "invalid host pattern: maybe you wanted to write '**' instead of '*'";
pub const INVALID_HOST_PATT_AT_MOST_ONE_DOUBLE_STAR: &str =
    "invalid host pattern: at most one '**' can be used";
pub const INVALID_HOST_PATT_ONLY_SINGLE_OR_DOUBLE_STAR: &str =
    "invalid host pattern: more than two '*' do not make sense";
pub const AT_SYMBOL_SHOULD_BE_FOLLOWED_BY: &str =
    "'@' should be followed by '(' <expr> ')' or by the name of variable (@host/path)";
pub const UNTERMINATED_URL_EXPRESSION: &str = "unterminated url expression";
pub const INVALID_HOST_ALIAS_DEF_MISSING_VALUE_AFTER_EQL_SIGN: &str =
    "unterminated HostAliasDefinition, missing value after '='";
pub const UNTERMINATED_ALIAS_RELATED_LITERAL: &str = "unterminated alias-related literal";
pub const INVALID_URL_OR_HOST_PATT_SCHEME_SHOULD_BE_FOLLOWED_BY_COLON_SLASH_SLASH: &str =
    "invalid URL or host pattern: the scheme should be followed by '://'";
pub const URL_PATT_LITS_WITH_QUERY_PART_NOT_SUPPORTED_YET: &str =
    "URL pattern literals with a query part are not supported yet";
pub const QUERY_PARAM_INTERP_EXPLANATION: &str =
    "a query parameter interpolation can only contain a limited set of characters";
pub const INVALID_QUERY_MISSING_EQUAL_SIGN_AFTER_KEY: &str =
    "invalid query: a key should be followed by '='";

// patterns
pub const UNTERMINATED_PATT: &str = "unterminated pattern: '%'";
pub const INVALID_COMPLEX_PATTERN_ELEMENT: &str = "invalid complex pattern element";
pub const INVALID_PATT_UNION_ELEMENT_SEPARATOR_EXPLANATION: &str =
    "invalid pattern union: elements should be separated by '|'";
pub const INVALID_PATTERN_INVALID_OCCURENCE_COUNT: &str =
    "invalid pattern: invalid exact ocurrence count";
pub const UNTERMINATED_PATT_UNTERMINATED_EXACT_OCURRENCE_COUNT: &str =
    "unterminated pattern: unterminated exact ocurrence count: missing count after '='";
pub const UNTERMINATED_PAREN_PATTERN_MISSING_PAREN: &str =
    "unterminated parenthesized pattern, missing closing parenthesis";
pub const UNTERMINATED_COMPLEX_STRING_PATT_MISSING_CLOSING_BRACKET: &str =
    "unterminated complex string pattern: missing closing ')'";
pub const INVALID_GROUP_NAME_SHOULD_NOT_END_WITH_DASH: &str =
    "invalid group name: name should not end with '-'";
pub const UNTERMINATED_COMPLEX_STRING_PATT_ELEM_MISSING_COLON_AFTER_GROUP_NAME: &str =
    "unterminated complex string pattern element: missing colon after group name";
pub const UNTERMINATED_UNION_MISSING_CLOSING_PAREN: &str =
    "unterminated union: missing closing ')'";
pub const UNTERMINATED_PATTERN_CALL_MISSING_CLOSING_PAREN: &str =
    "unterminated pattern call: missing closing parenthesis ')'";
pub const UNTERMINATED_LIST_TUPLE_PATT_LIT_MISSING_BRACE: &str =
    "unterminated list/tuple pattern literal, missing closing bracket ']'";
pub const INVALID_LIST_TUPLE_PATT_GENERAL_ELEMENT_IF_ELEMENTS: &str =
    "invalid list/tuple pattern literal, the general element (after ']') should not be specified if there are elements";
pub const INVALID_OBJ_PATT_LIT_ENTRY_SEPARATION: &str =
    "invalid object/record pattern literal, each entry should be followed by '}', newline, or ','.";
pub const METAPROPS_ARE_NOT_ALLOWED_IN_OBJECT_PATTERNS: &str =
    "metaproperties are not allowed in object patterns";
pub const A_KEY_IS_REQUIRED_FOR_EACH_VALUE_IN_OBJ_REC_PATTERNS: &str =
    "a key is required for each value in object/record patterns";
pub const UNTERMINATED_OBJ_PATTERN_MISSING_CLOSING_BRACE: &str =
    "unterminated object pattern literal, missing closing brace '}'";
pub const UNTERMINATED_REC_PATTERN_MISSING_CLOSING_BRACE: &str =
    "unterminated record pattern literal, missing closing brace '}'";
pub const MISSING_PROPERTY_PATTERN: &str = "missing property pattern";
pub const UNTERMINATED_PATT_DEF_MISSING_RHS: &str =
    "unterminated pattern definition: missing pattern after '='";
pub const UNTERMINATED_PATT_NS_DEF_MISSING_RHS: &str =
    "unterminated pattern namespace definition: missing definition after '='";
pub const PERCENT_FN_SHOULD_BE_FOLLOWED_BY_PARAMETERS: &str =
    "'%fn' should be followed by parameters";
pub const PARAM_LIST_OF_FUNC_PATT_SHOULD_CONTAIN_PARAMETERS_SEP_BY_COMMAS: &str =
    "the parameter list of a function pattern should contain parameters (a parameter is a type preceded (or not) by an identifier) separated by commas";
pub const INVALID_PATT_DEF_MISSING_OPERATOR_SHOULD_BE_EQUAL: &str =
    "invalid pattern definition: the operator should be '='";
pub const INVALID_PATT_NS_DEF_MISSING_OPERATOR_SHOULD_BE_EQUAL: &str =
    "invalid pattern namespace definition: the operator should be '='";

// objects, records, lists, dictionaries
pub const INVALID_OBJ_REC_LIT_ENTRY_SEPARATION: &str =
    "invalid object/record literal, each entry should be followed by '}', newline, or ','.";
pub const INVALID_OBJ_REC_LIT_SPREAD_SEPARATION: &str =
    "invalid object/record literal, a spread should be followed by '}', newline or ','.";
pub const MISSING_PROPERTY_VALUE: &str = "missing property value";
pub const UNEXPECTED_NEWLINE_AFTER_COLON: &str = "unexpected newline after colon";
pub const ONLY_EXPLICIT_KEY_CAN_HAVE_A_TYPE_ANNOT: &str =
    "only explicit keys can have a type annotation";
pub const METAPROP_KEY_CANNOT_HAVE_A_TYPE_ANNOT: &str =
    "metaproperty keys cannot have a type annotation";
pub const UNTERMINATED_OBJ_MISSING_CLOSING_BRACE: &str =
    "unterminated object literal, missing closing brace '}'";
pub const UNTERMINATED_REC_MISSING_CLOSING_BRACE: &str =
    "unterminated record literal, missing closing brace '}'";
pub const UNTERMINATED_LIST_LIT_MISSING_CLOSING_BRACKET: &str =
    "unterminated list literal, missing closing bracket ']'";
pub const UNTERMINATED_SPREAD_ELEM_MISSING_EXPR: &str =
    "unterminated spread element: missing expression";
pub const UNTERMINATED_LIST_LIT_MISSING_OPENING_BRACKET_AFTER_TYPE: &str =
    "unterminated list literal, missing opening bracket '[' after type annotation";
pub const UNTERMINATED_DICT_MISSING_CLOSING_BRACE: &str =
    "unterminated dictionary literal, missing closing brace '}'";
pub const INVALID_DICT_KEY_ONLY_SIMPLE_VALUE_LITS: &str =
    "invalid key for dictionary literal, only simple value literals are allowed";
pub const INVALID_DICT_ENTRY_MISSING_COLON_AFTER_KEY: &str =
    "invalid dictionary entry: missing colon ':' after key";
pub const INVALID_DICT_ENTRY_MISSING_SPACE_BETWEEN_KEY_AND_COLON: &str =
    "invalid dictionary entry: missing space between key and ':'";
pub const INVALID_DICT_LIT_ENTRY_SEPARATION: &str =
    "invalid dictionary literal, each entry should be followed by '}', newline, or ','.";

// functions
pub const FN_KEYWORD_OR_FUNC_NAME_SHOULD_BE_FOLLOWED_BY_PARAMS: &str =
    "function: fn keyword (or function name) should be followed by parameters";
pub const CAPTURE_LIST_SHOULD_BE_FOLLOWED_BY_PARAMS: &str =
    "capture list should be followed by parameters";
pub const CAPTURE_LIST_SHOULD_ONLY_CONTAIN_IDENTIFIERS: &str =
    "capture list should only contain identifiers";
pub const UNTERMINATED_CAPTURE_LIST_MISSING_CLOSING_BRACKET: &str =
    "unterminated capture list: missing closing bracket";
pub const PARAM_LIST_OF_FUNC_SHOULD_CONTAIN_PARAMETERS_SEP_BY_COMMAS: &str =
    "the parameter list of a function should contain parameters (a parameter is an identifier followed (or not) by a type) separated by commas";
pub const UNTERMINATED_PARAM_LIST_MISSING_CLOSING_PAREN: &str =
    "unterminated parameter list: missing closing parenthesis";
pub const PARAM_LIST_OF_FUNC_SHOULD_BE_FOLLOWED_BY_BLOCK_OR_ARROW: &str =
    "function: parameter list should be followed by a block or an arrow";
pub const RETURN_TYPE_OF_FUNC_SHOULD_BE_FOLLOWED_BY_BLOCK_OR_ARROW: &str =
    "function: return type should be followed by a block or an arrow, note that 'int{' is a pattern call shorthand, you might have forgotten a space after the return type";
pub const INVALID_FUNC_SYNTAX: &str = "invalid function syntax";
pub const VARIADIC_PARAM_IS_UNIQUE_AND_SHOULD_BE_LAST_PARAM: &str =
    "the variadic parameter should be unique and should be the last parameter";

// statements
pub const UNTERMINATED_IF_STMT_MISSING_BLOCK: &str = "unterminated if statement: block is missing";
pub const UNTERMINATED_IF_STMT_MISSING_BLOCK_AFTER_ELSE: &str =
    "unterminated if statement, missing block after 'else'";
pub const INVALID_FOR_STMT: &str = "invalid for statement";
pub const UNTERMINATED_FOR_STMT: &str = "unterminated for statement";
pub const INVALID_FOR_STMT_MISSING_IN_KEYWORD: &str = "invalid for statement: missing 'in' keyword";
pub const INVALID_FOR_STMT_IN_KEYWORD_SHOULD_BE_FOLLOWED_BY_SPACE: &str =
    "invalid for statement: 'in' keyword should be followed by a space";
pub const INVALID_FOR_STMT_MISSING_VALUE_AFTER_IN: &str =
    "unterminated for statement: missing value after 'in'";
pub const UNTERMINATED_FOR_STMT_MISSING_BLOCK: &str =
    "unterminated for statement: missing block";
pub const UNTERMINATED_WALK_STMT_MISSING_WALKED_VALUE: &str =
    "unterminated walk statement: missing walked value";
pub const UNTERMINATED_WALK_STMT_MISSING_ENTRY_VARIABLE_NAME: &str =
    "unterminated walk statement: missing entry variable's name";
pub const INVALID_WALK_STMT_MISSING_ENTRY_IDENTIFIER: &str =
    "invalid walk statement: missing entry identifier";
pub const UNTERMINATED_WALK_STMT_MISSING_BLOCK: &str =
    "unterminated walk statement: missing block";
pub const UNTERMINATED_SWITCH_CASE_MISSING_BLOCK: &str = "invalid switch case: missing block";
pub const UNTERMINATED_MATCH_CASE_MISSING_BLOCK: &str = "invalid match case: missing block";
pub const UNTERMINATED_DEFAULT_CASE_MISSING_BLOCK: &str = "invalid default case: missing block";
pub const DEFAULT_CASE_MUST_BE_UNIQUE: &str = "default case must be unique";
pub const UNTERMINATED_SWITCH_STMT_MISSING_CLOSING_BRACE: &str =
    "unterminated switch statement: missing closing body brace '}'";
pub const UNTERMINATED_MATCH_STMT_MISSING_CLOSING_BRACE: &str =
    "unterminated match statement: missing closing body brace '}'";
pub const INVALID_SWITCH_CASE_VALUE_EXPLANATION: &str =
    "invalid switch case: only simple value literals (1, 1.0, /home, ..) are supported";
pub const INVALID_MATCH_CASE_VALUE_EXPLANATION: &str =
    "invalid match case: only values that are statically known can be used";
pub const UNTERMINATED_SWITCH_STMT_MISSING_BODY: &str =
    "unterminated switch statement: missing body";
pub const UNTERMINATED_MATCH_STMT_MISSING_BODY: &str = "unterminated match statement: missing body";
pub const UNTERMINATED_SWITCH_STMT_MISSING_VALUE: &str =
    "unterminated switch statement: missing value";
pub const UNTERMINATED_MATCH_STMT_MISSING_VALUE: &str =
    "unterminated match statement: missing value";
pub const DROP_PERM_KEYWORD_SHOULD_BE_FOLLOWED_BY: &str =
    "permission dropping statement: 'drop-perms' keyword should be followed by an object literal (permissions)";
pub const UNTERMINATED_MULTI_ASSIGN_MISSING_EQL_SIGN: &str =
    "unterminated multi assign statement: missing '=' sign";
pub const ASSIGN_KEYWORD_SHOULD_BE_FOLLOWED_BY_IDENTS: &str =
    "assign keyword should be followed by identifiers (assign a b = <value>)";
pub const UNTERMINATED_ASSIGNMENT_MISSING_VALUE_AFTER_EQL_SIGN: &str =
    "unterminated assignment, missing value after the '=' sign";
pub const UNTERMINATED_ASSIGNMENT_MISSING_TERMINATOR: &str =
    "unterminated assignment: missing terminator (';' or end of line), if you are trying to write a binary expression note that binary expressions are always parenthesized, example: myvar = (1 + 2)";
pub const SYNCHRONIZED_KEYWORD_SHOULD_BE_FOLLOWED_BY_SYNC_VALUES: &str =
    "synchronized keyword should be followed by synchronized values";
pub const UNTERMINATED_SYNCHRONIZED_MISSING_BLOCK: &str =
    "unterminated synchronized block: missing block";

// declarations
pub const UNTERMINATED_GLOBAL_CONS_DECLS: &str = "unterminated global const declarations";
pub const INVALID_GLOBAL_CONST_DECLS_MISSING_CLOSING_PAREN: &str =
    "invalid global const declarations: missing closing parenthesis";
pub const INVALID_GLOBAL_CONST_DECL_LHS_MUST_BE_AN_IDENT: &str =
    "invalid global const declaration: left hand side must be an identifier";
pub const UNTERMINATED_LOCAL_VAR_DECLS: &str = "unterminated local variable declarations";
pub const UNTERMINATED_LOCAL_VAR_DECLS_MISSING_CLOSING_PAREN: &str =
    "unterminated local variable declarations, missing closing parenthesis";
pub const INVALID_LOCAL_VAR_DECL_LHS_MUST_BE_AN_IDENT: &str =
    "invalid local variable declaration, left hand side must be an identifier";
pub const EQUAL_SIGN_MISSING_AFTER_TYPE_ANNOTATION: &str = "'=' missing after type annotation";

// imports
pub const IMPORT_STMT_IMPORT_KEYWORD_SHOULD_BE_FOLLOWED_BY_IDENT: &str =
    "import statement: the 'import' keyword should be followed by an identifier";
pub const IMPORT_STMT_SRC_SHOULD_BE_AN_URL_OR_PATH_LIT: &str =
    "import statement: source should be a URL literal or Path literal";
pub const IMPORT_STMT_CONFIG_SHOULD_BE_AN_OBJ_LIT: &str =
    "import statement: configuration should be an object literal";
pub const INCLUSION_IMPORT_STMT_SRC_SHOULD_BE_A_PATH_LIT: &str =
    "inclusion import statement: source should be path literal (/file.ix, ./file.ix, ...)";
pub const PATH_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_SLASHSLASH: &str =
    "path literals used as import sources should not contain '//'";
pub const PATH_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SLASHSLASH: &str =
    "path literals used as import sources should not contain '..' segments; if possible use an absolute path literal instead";
pub const PATH_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SEGMENTS: &str =
    "path literals used as import sources should not contain segments with only a dot (e.g. /./file.ix); `./` is allowed at the start though";
pub const PATH_OF_URL_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_SLASHSLASH: &str =
    "the path of URL literals used as import sources should not contain '//'";
pub const PATH_OF_URL_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SLASHSLASH: &str =
    "the path of URL literals used as import sources should not contain '..' segments";
pub const PATH_OF_URL_LITERALS_USED_AS_IMPORT_SRCS_SHOULD_NOT_CONTAIN_DOT_SEGMENTS: &str =
    "the path of URL literals used as import sources should not contain segments with only a dot (e.g. /./file.ix)";
pub const URL_LITS_AND_PATH_LITS_USED_AS_IMPORT_SRCS_SHOULD_END_WITH_IX: &str =
    "URL literals and path literals used as import sources should end with `.ix`";

// concurrency & data forms
pub const UNTERMINATED_MAPPING_EXPRESSION_MISSING_BODY: &str =
    "unterminated mapping expression: missing body";
pub const UNTERMINATED_MAPPING_EXPRESSION_MISSING_CLOSING_BRACE: &str =
    "unterminated mapping expression: missing closing brace";
pub const UNTERMINATED_MAPPING_ENTRY: &str = "unterminated mapping entry";
pub const INVALID_DYNAMIC_MAPPING_ENTRY_GROUP_MATCHING_VAR_EXPECTED: &str =
    "invalid dynamic mapping entry: group matching variable expected";
pub const UNTERMINATED_MAPPING_ENTRY_MISSING_ARROW_VALUE: &str =
    "unterminated mapping entry: missing '=> <value>' after key";
pub const UNTERMINATED_UDATA_LIT_MISSING_OPENING_BRACE: &str =
    "unterminated udata literal: missing opening brace";
pub const UNTERMINATED_UDATA_LIT_MISSING_CLOSING_BRACE: &str =
    "unterminated udata literal: missing closing brace";
pub const UNTERMINATED_UDATA_ENTRY_MISSING_CLOSING_BRACE: &str =
    "unterminated udata entry: missing closing brace";
pub const UNTERMINATED_UDATA_ENTRY: &str = "unterminated udata entry";
pub const UNTERMINATED_TESTSUITE_EXPRESSION_MISSING_BLOCK: &str =
    "unterminated test suite expression: missing block";
pub const UNTERMINATED_TESTCASE_EXPRESSION_MISSING_BLOCK: &str =
    "unterminated test case expression: missing block";
pub const UNTERMINATED_LIFETIMEJOB_EXPRESSION_MISSING_META: &str =
    "unterminated lifetimejob expression: missing meta";
pub const UNTERMINATED_LIFETIMEJOB_EXPRESSION_MISSING_EMBEDDED_MODULE: &str =
    "unterminated lifetimejob expression: missing embedded module";
pub const UNTERMINATED_SPAWN_EXPRESSION_MISSING_EMBEDDED_MODULE_AFTER_GO_KEYWORD: &str =
    "unterminated spawn expression: missing embedded module after 'go' keyword";
pub const UNTERMINATED_SPAWN_EXPRESSION_MISSING_DO_KEYWORD_AFTER_META: &str =
    "unterminated spawn expression: missing 'do' keyword after meta value";
pub const UNTERMINATED_SPAWN_EXPRESSION_MISSING_EMBEDDED_MODULE_AFTER_DO_KEYWORD: &str =
    "unterminated spawn expression: missing embedded module after 'do' keyword";
pub const SPAWN_EXPR_ONLY_SIMPLE_CALLS_ARE_SUPPORTED: &str =
    "spawn expression: only simple calls are supported for now";
pub const UNTERMINATED_RECEP_HANDLER_MISSING_RECEIVED_KEYWORD: &str =
    "unterminated reception handler expression: missing 'received' keyword after 'on' keyword";
pub const INVALID_RECEP_HANDLER_MISSING_RECEIVED_KEYWORD: &str =
    "invalid reception handler expression: missing 'received' keyword after 'on' keyword";
pub const UNTERMINATED_RECEP_HANDLER_MISSING_PATTERN: &str =
    "unterminated reception handler expression: missing pattern value";
pub const UNTERMINATED_RECEP_HANDLER_MISSING_HANDLER_OR_PATTERN: &str =
    "unterminated reception handler expression: missing handler or pattern";
pub const UNTERMINATED_CONCAT_EXPR_ELEMS_EXPECTED: &str =
    "unterminated concatenation expression: at least one element is expected after keyword 'concat'";
pub const UNTERMINATED_SENDVALUE_EXPRESSION_MISSING_VALUE: &str =
    "unterminated send value expression: missing value after 'sendval' keyword";
pub const INVALID_SENDVALUE_EXPRESSION_MISSING_TO_KEYWORD_BEFORE_RECEIVER: &str =
    "invalid send value expression: 'to' keyword missing before receiver value";
pub const UNTERMINATED_SENDVALUE_EXPRESSION_MISSING_TO_KEYWORD: &str =
    "unterminated send value expression: missing value after 'to' keyword after value";
pub const UNTERMINATED_DOUBLE_COLON_EXPR: &str = "unterminated double-colon expression";
pub const INVALID_ASSIGN_A_PIPELINE_EXPR_WAS_EXPECTED_AFTER_PIPE: &str =
    "invalid assignment: a pipeline expression was expected after the '|' symbol";

// extend statements
pub const UNTERMINATED_EXTEND_STMT_MISSING_PATTERN_TO_EXTEND_AFTER_KEYWORD: &str =
    "unterminated extend statement: missing pattern after keyword 'extend'";
pub const UNTERMINATED_EXTEND_STMT_MISSING_OBJECT_LITERAL_AFTER_EXTENDED_PATTERN: &str =
    "unterminated extend statement: missing object literal (extension) after pattern";
pub const A_PATTERN_NAME_WAS_EXPECTED: &str = "a pattern name was expected";
pub const INVALID_EXTENSION_VALUE_AN_OBJECT_LITERAL_WAS_EXPECTED: &str =
    "invalid extension value: an object literal was expected";

// structs
pub const UNTERMINATED_STRUCT_DEF_MISSING_NAME_AFTER_KEYWORD: &str =
    "unterminated struct definition: missing name after keyword 'struct'";
pub const UNTERMINATED_STRUCT_DEF_MISSING_BODY: &str =
    "unterminated struct definition: missing body";
pub const UNTERMINATED_STRUCT_BODY_MISSING_CLOSING_BRACE: &str =
    "unterminated struct body: missing closing brace";
pub const ONLY_FIELD_AND_METHOD_DEFINITIONS_ARE_ALLOWED_IN_STRUCT_BODY: &str =
    "only field and method definitions are allowed inside a struct body";
pub const UNTERMINATED_NEW_EXPR_MISSING_TYPE_AFTER_KEYWORD: &str =
    "unterminated 'new' expression: missing type after keyword 'new'";
pub const UNTERMINATED_STRUCT_INIT_LIT_MISSING_CLOSING_BRACE: &str =
    "unterminated struct initialization literal: missing closing brace";
pub const ONLY_FIELD_INIT_PAIRS_ALLOWED: &str = "only field initialization pairs are allowed";
pub const MISSING_COLON_AFTER_FIELD_NAME: &str = "missing colon after field name";

// CSS selectors
pub const EMPTY_CSS_SELECTOR: &str = "empty CSS selector";
pub const INVALID_PSEUDO_CSS_SELECTOR_INVALID_NAME: &str =
    "invalid CSS pseudo element selector, invalid name";
pub const INVALID_CSS_CLASS_SELECTOR_INVALID_NAME: &str =
    "invalid CSS class selector, invalid name";
pub const INVALID_CSS_SELECTOR: &str = "invalid CSS selector";
pub const UNTERMINATED_CSS_ATTRIBUTE_SELECTOR_MISSING_BRACKET: &str =
    "unterminated CSS attribute selector, missing closing bracket";
pub const UNTERMINATED_CSS_ATTR_SELECTOR_INVALID_PATTERN: &str =
    "unterminated CSS attribute selector, invalid pattern";
pub const UNTERMINATED_CSS_ATTR_SELECTOR_PATTERN_EXPECTED_AFTER_NAME: &str =
    "unterminated CSS attribute selector, a pattern is expected after the name";
pub const CSS_ATTRIBUTE_NAME_SHOULD_START_WITH_ALPHA_CHAR: &str =
    "an attribute name should start with an alpha character like identifiers";
pub const UNTERMINATED_CSS_ATTR_SELECTOR_NAME_EXPECTED: &str =
    "unterminated CSS attribute selector, an attribute name was expected";
pub const UNTERMINATED_CSS_ID_SELECTOR_NAME_EXPECTED: &str =
    "unterminated CSS id selector, a name was expected after '#'";
pub const UNTERMINATED_CSS_CLASS_SELECTOR_NAME_EXPECTED: &str =
    "unterminated CSS class selector, a name was expected";

// XML
pub const UNTERMINATED_XML_EXPRESSION_MISSING_TOP_ELEM_NAME: &str =
    "unterminated xml expression: missing name of top element";
pub const UNTERMINATED_OPENING_XML_TAG_MISSING_CLOSING: &str =
    "unterminated opening xml tag: missing closing delimiter '>'";
pub const UNTERMINATED_SELF_CLOSING_XML_TAG_MISSING_CLOSING: &str =
    "unterminated self-closing xml tag: missing closing '>' after '/'";
pub const UNTERMINATED_XML_INTERP: &str = "unterminated xml interpolation";
pub const UNTERMINATED_CLOSING_XML_TAG_MISSING_CLOSING_DELIM: &str =
    "unterminated closing xml tag: missing closing delimiter '>' after tag name";
pub const EMPTY_XML_INTERP: &str = "xml interpolation should not be empty";
pub const XML_INTERP_SHOULD_CONTAIN_A_SINGLE_EXPR: &str =
    "an xml interpolation should contain a single expression";
pub const XML_ATTRIBUTE_NAME_SHOULD_BE_IDENT: &str = "xml attribute's name should be an identifier";

pub fn fmt_invalid_regex_literal(err: &str) -> String {
    format!("invalid regex literal: {err}")
}

pub fn fmt_only_idents_and_strings_valid_obj_record_keys_not(kind_name: &str) -> String {
    format!(
        "Only identifiers and strings are valid object/record literal keys, not a(n) {kind_name}"
    )
}

pub fn fmt_only_idents_and_strings_valid_obj_pattern_keys_not(kind_name: &str) -> String {
    format!(
        "Only identifiers and strings are valid object pattern literal keys, not a(n) {kind_name}"
    )
}

pub fn fmt_prefix_patt_cannot_contain_globbing_pattern(value: &str) -> String {
    format!("prefix path patterns cannot contain globbing patterns '{value}'")
}

pub fn fmt_slash_dot_dot_dot_can_only_be_present_at_end_of_path_pattern(value: &str) -> String {
    format!("'/...' can only appear at the end of a path pattern '{value}'")
}

pub fn fmt_invalid_obj_record_key_missing_colon_after_key(key: &str) -> String {
    format!("invalid object/record literal, missing colon after key '{key}'")
}

pub fn fmt_invalid_obj_pattern_key_missing_colon_after_key(key: &str) -> String {
    format!("invalid object pattern literal, missing colon after key '{key}'")
}

pub fn fmt_invalid_obj_key_missing_colon_after_type_annotation(key: &str) -> String {
    format!("invalid object literal, missing colon after type annotation for key '{key}'")
}

pub fn fmt_invalid_obj_record_key_comment_before_value_of_key(key: &str) -> String {
    format!("invalid object/record literal, comment before value of key '{key}'")
}

pub fn fmt_invalid_obj_pattern_key_comment_before_value_of_key(key: &str) -> String {
    format!("invalid object pattern literal, comment before value of key '{key}'")
}

pub fn fmt_invalid_uri_unsupported_protocol(protocol: &str) -> String {
    format!("invalid URI: unsupported protocol '{protocol}'")
}

pub fn fmt_double_colon_expression_element_should_start_with_a_letter_not(c: char) -> String {
    format!("element of double-colon expression should start with a letter, not '{c}'")
}

pub fn fmt_prop_name_should_start_with_a_letter_not(c: char) -> String {
    format!("property name should start with a letter, not '{c}'")
}

pub fn fmt_pattern_namespace_member_should_start_with_a_letter_not(c: char) -> String {
    format!("pattern namespace member should start with a letter, not '{c}'")
}

pub fn fmt_invalid_query_keys_cannot_contain_dollar(key: &str) -> String {
    format!("invalid query: keys cannot contain '$' or '{{' characters: key '{key}'")
}

pub fn fmt_invalid_string_lit_json(err: &str) -> String {
    format!("invalid string literal: json string: {err}")
}

/// `an expression was expected: ...<left><<here>><right>...` with up to five
/// characters of context on each side of `pos`.
pub fn fmt_expr_expected_here(source: &str, pos: usize, show_right: bool) -> String {
    let (left, right) = context_around(source, pos);
    let right = if show_right { right } else { "" };
    format!("an expression was expected: ...{left}<<here>>{right}...")
}

pub fn fmt_case_value_expected_here(source: &str, pos: usize, show_right: bool) -> String {
    let (left, right) = context_around(source, pos);
    let right = if show_right { right } else { "" };
    format!(
        "a value was expected: ...{left}<<here>>{right}..., object literals should be surrounded by parentheses"
    )
}

pub fn fmt_a_pattern_was_expected_here(source: &str, pos: usize) -> String {
    let (left, right) = context_around(source, pos);
    format!("a pattern was expected: ...{left}<<here>>{right}...")
}

pub fn fmt_invalid_const_decl_missing_equals_sign(name: &str) -> String {
    format!("invalid global const declaration, missing '=' sign after name {name}")
}

pub fn fmt_invalid_local_var_decl_missing_equals_sign(name: &str) -> String {
    format!("invalid local variable declaration, missing '=' sign after name {name}")
}

pub fn fmt_func_name_should_be_an_ident_not(kind_name: &str) -> String {
    format!("function name should be an identifier, not a(n) {kind_name}")
}

pub fn fmt_unterminated_if_stmt_should_be_followed_by_block(c: char) -> String {
    format!("invalid if statement, test expression should be followed by a block, not '{c}'")
}

pub fn fmt_unterminated_if_stmt_else_should_be_followed_by_block(c: char) -> String {
    format!("invalid if statement, 'else' should be followed by a block a or 'if', not '{c}'")
}

pub fn fmt_for_stmt_key_index_should_be_followed_by_comma_not(c: char) -> String {
    format!("for statement: key/index name should be followed by a comma ',' , not {c}")
}

pub fn fmt_invalid_pipeline_stage_unexpected_char(c: char) -> String {
    format!("invalid pipeline stage, unexpected char '{c}'")
}

pub fn fmt_invalid_spread_elem_expr_should_be_extr_expr_not(kind_name: &str) -> String {
    format!(
        "invalid spread element in object literal: expression should be an extraction expression, not a(n) {kind_name}. Example: {{...obj.{{a, b}}}}"
    )
}

pub fn fmt_invalid_assignment_invalid_lhs(kind_name: &str) -> String {
    format!("invalid assignment: cannot assign a(n) {kind_name}")
}

pub fn fmt_expected_closing_tag(name: &str) -> String {
    format!("expected closing '{name}' tag")
}

pub fn fmt_invalid_byte_in_decimal_byte_slice_literal(byte: &str) -> String {
    format!("invalid byte {byte} in decimal byte slice literal")
}

/// Where an unexpected character was found, used by `fmt_unexpected_char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedCharContext {
    BlockOrModule,
    ParenthesizedExpression,
    CallArguments,
    PatternCallArguments,
    Parameters,
    CaptureList,
    KeyList,
    Dictionary,
    ObjectRecord,
    ObjectPattern,
    ListPattern,
    SwitchOrMatchStatement,
    MappingExpression,
    UdataLiteral,
    HexadecimalByteSliceLiteral,
    BinaryByteSliceLiteral,
    DecimalByteSliceLiteral,
    SynchronizedValueList,
    StructBody,
    StructInitializationLiteral,
}

impl UnexpectedCharContext {
    fn as_str(self) -> &'static str {
        match self {
            Self::BlockOrModule => "block or module",
            Self::ParenthesizedExpression => "parenthesized expression",
            Self::CallArguments => "call arguments",
            Self::PatternCallArguments => "pattern call arguments",
            Self::Parameters => "parameters",
            Self::CaptureList => "capture list",
            Self::KeyList => "key list",
            Self::Dictionary => "dictionary",
            Self::ObjectRecord => "object or record",
            Self::ObjectPattern => "object or record pattern",
            Self::ListPattern => "list or tuple pattern",
            Self::SwitchOrMatchStatement => "switch or match statement",
            Self::MappingExpression => "mapping expression",
            Self::UdataLiteral => "udata literal",
            Self::HexadecimalByteSliceLiteral => "hexadecimal byte slice literal",
            Self::BinaryByteSliceLiteral => "binary byte slice literal",
            Self::DecimalByteSliceLiteral => "decimal byte slice literal",
            Self::SynchronizedValueList => "synchronized value list",
            Self::StructBody => "struct body",
            Self::StructInitializationLiteral => "struct initialization literal",
        }
    }
}

pub fn fmt_unexpected_char(c: char, context: UnexpectedCharContext) -> String {
    format!("unexpected char {} in {}", fmt_char_info(c), context.as_str())
}

/// `'c' (code: N)`, with escapes for tab/CR/LF and a marker for unusual spaces.
pub fn fmt_char_info(c: char) -> String {
    let repr = match c {
        '\t' => "'\\t'".to_string(),
        '\r' => "'\\r'".to_string(),
        '\n' => "'\\n'".to_string(),
        _ => format!("'{c}'"),
    };
    if is_forbidden_space(c) {
        format!("{repr} (non regular space, code: {})", c as u32)
    } else {
        format!("{repr} (code: {})", c as u32)
    }
}

fn context_around(source: &str, pos: usize) -> (&str, &str) {
    let pos = pos.min(source.len());
    let left_start = source[..pos]
        .char_indices()
        .rev()
        .nth(4)
        .map_or(0, |(offset, _)| offset);
    let right_end = source[pos..]
        .char_indices()
        .nth(5)
        .map_or(source.len(), |(offset, _)| pos + offset);
    (&source[left_start..pos], &source[pos..right_end])
}
