//! Token kinds, kind sets, and the annotated token record.

use std::fmt;

macro_rules! token_kinds {
    ($($(#[$attr:meta])* $variant:ident => $name:literal,)*) => {
        /// Lexical category of a token.
        ///
        /// The set is closed: every token the pipeline produces carries
        /// exactly one of these kinds, and the names returned by
        /// [`TokenKind::name`] are stable identifiers for rule authors.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(u8)]
        pub enum TokenKind {
            $($(#[$attr])* $variant,)*
        }

        impl TokenKind {
            /// Every kind in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Stable `T_*` name of this kind.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

token_kinds! {
    // Tags and trivia.
    OpenTag => "T_OPEN_TAG",
    OpenTagWithEcho => "T_OPEN_TAG_WITH_ECHO",
    CloseTag => "T_CLOSE_TAG",
    InlineHtml => "T_INLINE_HTML",
    #[default]
    Whitespace => "T_WHITESPACE",
    Comment => "T_COMMENT",
    DocCommentOpenTag => "T_DOC_COMMENT_OPEN_TAG",
    DocCommentCloseTag => "T_DOC_COMMENT_CLOSE_TAG",
    DocCommentStar => "T_DOC_COMMENT_STAR",
    DocCommentWhitespace => "T_DOC_COMMENT_WHITESPACE",
    DocCommentTag => "T_DOC_COMMENT_TAG",
    DocCommentString => "T_DOC_COMMENT_STRING",

    // Literals.
    LNumber => "T_LNUMBER",
    DNumber => "T_DNUMBER",
    ConstantEncapsedString => "T_CONSTANT_ENCAPSED_STRING",
    /// Double-quoted string containing interpolation, kept as one token.
    DoubleQuotedString => "T_DOUBLE_QUOTED_STRING",
    /// Backtick shell-execution string, kept as one token.
    ShellExec => "T_SHELL_EXEC",
    StartHeredoc => "T_START_HEREDOC",
    Heredoc => "T_HEREDOC",
    EndHeredoc => "T_END_HEREDOC",
    StartNowdoc => "T_START_NOWDOC",
    Nowdoc => "T_NOWDOC",
    EndNowdoc => "T_END_NOWDOC",

    // Names.
    String => "T_STRING",
    Variable => "T_VARIABLE",
    NameQualified => "T_NAME_QUALIFIED",
    NameFullyQualified => "T_NAME_FULLY_QUALIFIED",
    NameRelative => "T_NAME_RELATIVE",
    ParamName => "T_PARAM_NAME",
    GotoLabel => "T_GOTO_LABEL",
    BadCharacter => "T_BAD_CHARACTER",

    // Keywords.
    Abstract => "T_ABSTRACT",
    Array => "T_ARRAY",
    As => "T_AS",
    Break => "T_BREAK",
    Callable => "T_CALLABLE",
    Case => "T_CASE",
    Catch => "T_CATCH",
    Class => "T_CLASS",
    Clone => "T_CLONE",
    Const => "T_CONST",
    Continue => "T_CONTINUE",
    Declare => "T_DECLARE",
    Default => "T_DEFAULT",
    Do => "T_DO",
    Echo => "T_ECHO",
    Else => "T_ELSE",
    Elseif => "T_ELSEIF",
    Empty => "T_EMPTY",
    Enddeclare => "T_ENDDECLARE",
    Endfor => "T_ENDFOR",
    Endforeach => "T_ENDFOREACH",
    Endif => "T_ENDIF",
    Endswitch => "T_ENDSWITCH",
    Endwhile => "T_ENDWHILE",
    Enum => "T_ENUM",
    EnumCase => "T_ENUM_CASE",
    Eval => "T_EVAL",
    Exit => "T_EXIT",
    Extends => "T_EXTENDS",
    Final => "T_FINAL",
    Finally => "T_FINALLY",
    Fn => "T_FN",
    For => "T_FOR",
    Foreach => "T_FOREACH",
    Function => "T_FUNCTION",
    Closure => "T_CLOSURE",
    AnonClass => "T_ANON_CLASS",
    Global => "T_GLOBAL",
    Goto => "T_GOTO",
    HaltCompiler => "T_HALT_COMPILER",
    If => "T_IF",
    Implements => "T_IMPLEMENTS",
    Include => "T_INCLUDE",
    IncludeOnce => "T_INCLUDE_ONCE",
    Instanceof => "T_INSTANCEOF",
    Insteadof => "T_INSTEADOF",
    Interface => "T_INTERFACE",
    Isset => "T_ISSET",
    List => "T_LIST",
    LogicalAnd => "T_LOGICAL_AND",
    LogicalOr => "T_LOGICAL_OR",
    LogicalXor => "T_LOGICAL_XOR",
    Match => "T_MATCH",
    MatchDefault => "T_MATCH_DEFAULT",
    Namespace => "T_NAMESPACE",
    New => "T_NEW",
    Print => "T_PRINT",
    Private => "T_PRIVATE",
    Protected => "T_PROTECTED",
    Public => "T_PUBLIC",
    Readonly => "T_READONLY",
    Require => "T_REQUIRE",
    RequireOnce => "T_REQUIRE_ONCE",
    Return => "T_RETURN",
    Static => "T_STATIC",
    Switch => "T_SWITCH",
    Throw => "T_THROW",
    Trait => "T_TRAIT",
    Try => "T_TRY",
    Unset => "T_UNSET",
    Use => "T_USE",
    Var => "T_VAR",
    While => "T_WHILE",
    Yield => "T_YIELD",
    YieldFrom => "T_YIELD_FROM",
    SelfKeyword => "T_SELF",
    Parent => "T_PARENT",
    True => "T_TRUE",
    False => "T_FALSE",
    Null => "T_NULL",

    // Magic constants.
    ClassC => "T_CLASS_C",
    Dir => "T_DIR",
    File => "T_FILE",
    FuncC => "T_FUNC_C",
    Line => "T_LINE",
    MethodC => "T_METHOD_C",
    NsC => "T_NS_C",
    TraitC => "T_TRAIT_C",
    PropertyC => "T_PROPERTY_C",

    // Casts.
    IntCast => "T_INT_CAST",
    DoubleCast => "T_DOUBLE_CAST",
    StringCast => "T_STRING_CAST",
    ArrayCast => "T_ARRAY_CAST",
    ObjectCast => "T_OBJECT_CAST",
    BoolCast => "T_BOOL_CAST",
    UnsetCast => "T_UNSET_CAST",
    BinaryCast => "T_BINARY_CAST",

    // Operators.
    Equal => "T_EQUAL",
    IsEqual => "T_IS_EQUAL",
    IsNotEqual => "T_IS_NOT_EQUAL",
    IsIdentical => "T_IS_IDENTICAL",
    IsNotIdentical => "T_IS_NOT_IDENTICAL",
    LessThan => "T_LESS_THAN",
    GreaterThan => "T_GREATER_THAN",
    IsSmallerOrEqual => "T_IS_SMALLER_OR_EQUAL",
    IsGreaterOrEqual => "T_IS_GREATER_OR_EQUAL",
    Spaceship => "T_SPACESHIP",
    BooleanAnd => "T_BOOLEAN_AND",
    BooleanOr => "T_BOOLEAN_OR",
    BooleanNot => "T_BOOLEAN_NOT",
    Plus => "T_PLUS",
    Minus => "T_MINUS",
    Multiply => "T_MULTIPLY",
    Divide => "T_DIVIDE",
    Modulus => "T_MODULUS",
    Pow => "T_POW",
    StringConcat => "T_STRING_CONCAT",
    BitwiseAnd => "T_BITWISE_AND",
    BitwiseOr => "T_BITWISE_OR",
    BitwiseXor => "T_BITWISE_XOR",
    BitwiseNot => "T_BITWISE_NOT",
    Sl => "T_SL",
    Sr => "T_SR",
    Inc => "T_INC",
    Dec => "T_DEC",
    PlusEqual => "T_PLUS_EQUAL",
    MinusEqual => "T_MINUS_EQUAL",
    MulEqual => "T_MUL_EQUAL",
    DivEqual => "T_DIV_EQUAL",
    ConcatEqual => "T_CONCAT_EQUAL",
    ModEqual => "T_MOD_EQUAL",
    PowEqual => "T_POW_EQUAL",
    AndEqual => "T_AND_EQUAL",
    OrEqual => "T_OR_EQUAL",
    XorEqual => "T_XOR_EQUAL",
    SlEqual => "T_SL_EQUAL",
    SrEqual => "T_SR_EQUAL",
    Coalesce => "T_COALESCE",
    CoalesceEqual => "T_COALESCE_EQUAL",
    ObjectOperator => "T_OBJECT_OPERATOR",
    NullsafeObjectOperator => "T_NULLSAFE_OBJECT_OPERATOR",
    DoubleColon => "T_DOUBLE_COLON",
    DoubleArrow => "T_DOUBLE_ARROW",
    FnArrow => "T_FN_ARROW",
    MatchArrow => "T_MATCH_ARROW",
    InlineThen => "T_INLINE_THEN",
    InlineElse => "T_INLINE_ELSE",
    Nullable => "T_NULLABLE",
    TypeUnion => "T_TYPE_UNION",
    TypeIntersection => "T_TYPE_INTERSECTION",
    Ellipsis => "T_ELLIPSIS",
    Asperand => "T_ASPERAND",
    NsSeparator => "T_NS_SEPARATOR",
    Dollar => "T_DOLLAR",

    // Structural punctuation.
    OpenParenthesis => "T_OPEN_PARENTHESIS",
    CloseParenthesis => "T_CLOSE_PARENTHESIS",
    TypeOpenParenthesis => "T_TYPE_OPEN_PARENTHESIS",
    TypeCloseParenthesis => "T_TYPE_CLOSE_PARENTHESIS",
    OpenSquareBracket => "T_OPEN_SQUARE_BRACKET",
    CloseSquareBracket => "T_CLOSE_SQUARE_BRACKET",
    OpenShortArray => "T_OPEN_SHORT_ARRAY",
    CloseShortArray => "T_CLOSE_SHORT_ARRAY",
    OpenCurlyBracket => "T_OPEN_CURLY_BRACKET",
    CloseCurlyBracket => "T_CLOSE_CURLY_BRACKET",
    Semicolon => "T_SEMICOLON",
    Comma => "T_COMMA",
    Colon => "T_COLON",
    GotoColon => "T_GOTO_COLON",
    Attribute => "T_ATTRIBUTE",
    AttributeEnd => "T_ATTRIBUTE_END",
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl TokenKind {
    /// Whether the kind carries no syntactic meaning (whitespace and comments).
    #[must_use]
    pub const fn is_empty(self) -> bool {
        EMPTY.contains(self)
    }

    /// Look up a reserved word of the base grammar (case-insensitive).
    ///
    /// Words that only became keywords in later revisions (`fn`, `match`,
    /// `enum`, `readonly`) and the literal words `self`, `parent`, `true`,
    /// `false`, `null` are not reserved here; the normalizer promotes them.
    #[must_use]
    pub fn reserved(word: &str) -> Option<Self> {
        let kind = match word.to_ascii_lowercase().as_str() {
            "abstract" => Self::Abstract,
            "and" => Self::LogicalAnd,
            "array" => Self::Array,
            "as" => Self::As,
            "break" => Self::Break,
            "callable" => Self::Callable,
            "case" => Self::Case,
            "catch" => Self::Catch,
            "class" => Self::Class,
            "clone" => Self::Clone,
            "const" => Self::Const,
            "continue" => Self::Continue,
            "declare" => Self::Declare,
            "default" => Self::Default,
            "die" | "exit" => Self::Exit,
            "do" => Self::Do,
            "echo" => Self::Echo,
            "else" => Self::Else,
            "elseif" => Self::Elseif,
            "empty" => Self::Empty,
            "enddeclare" => Self::Enddeclare,
            "endfor" => Self::Endfor,
            "endforeach" => Self::Endforeach,
            "endif" => Self::Endif,
            "endswitch" => Self::Endswitch,
            "endwhile" => Self::Endwhile,
            "eval" => Self::Eval,
            "extends" => Self::Extends,
            "final" => Self::Final,
            "finally" => Self::Finally,
            "for" => Self::For,
            "foreach" => Self::Foreach,
            "function" => Self::Function,
            "global" => Self::Global,
            "goto" => Self::Goto,
            "if" => Self::If,
            "implements" => Self::Implements,
            "include" => Self::Include,
            "include_once" => Self::IncludeOnce,
            "instanceof" => Self::Instanceof,
            "insteadof" => Self::Insteadof,
            "interface" => Self::Interface,
            "isset" => Self::Isset,
            "list" => Self::List,
            "namespace" => Self::Namespace,
            "new" => Self::New,
            "or" => Self::LogicalOr,
            "print" => Self::Print,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "public" => Self::Public,
            "require" => Self::Require,
            "require_once" => Self::RequireOnce,
            "return" => Self::Return,
            "static" => Self::Static,
            "switch" => Self::Switch,
            "throw" => Self::Throw,
            "trait" => Self::Trait,
            "try" => Self::Try,
            "unset" => Self::Unset,
            "use" => Self::Use,
            "var" => Self::Var,
            "while" => Self::While,
            "xor" => Self::LogicalXor,
            "yield" => Self::Yield,
            "__halt_compiler" => Self::HaltCompiler,
            "__class__" => Self::ClassC,
            "__dir__" => Self::Dir,
            "__file__" => Self::File,
            "__function__" => Self::FuncC,
            "__line__" => Self::Line,
            "__method__" => Self::MethodC,
            "__namespace__" => Self::NsC,
            "__trait__" => Self::TraitC,
            "__property__" => Self::PropertyC,
            _ => return None,
        };
        Some(kind)
    }
}

/// Constant-time membership set over [`TokenKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet([u64; 4]);

impl KindSet {
    /// The set containing no kinds.
    pub const NONE: Self = Self([0; 4]);

    /// Build a set from a slice of kinds.
    #[must_use]
    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < kinds.len() {
            let k = kinds[i] as usize;
            bits[k / 64] |= 1 << (k % 64);
            i += 1;
        }
        Self(bits)
    }

    #[must_use]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let k = kind as usize;
        self.0[k / 64] & (1 << (k % 64)) != 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self([
            self.0[0] | other.0[0],
            self.0[1] | other.0[1],
            self.0[2] | other.0[2],
            self.0[3] | other.0[3],
        ])
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        let mut bits = self.0;
        let k = kind as usize;
        bits[k / 64] |= 1 << (k % 64);
        Self(bits)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
    }

    /// Iterate the member kinds in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL.iter().copied().filter(|k| self.contains(*k))
    }
}

impl From<TokenKind> for KindSet {
    fn from(kind: TokenKind) -> Self {
        Self::NONE.with(kind)
    }
}

impl<const N: usize> From<[TokenKind; N]> for KindSet {
    fn from(kinds: [TokenKind; N]) -> Self {
        Self::of(&kinds)
    }
}

impl From<&[TokenKind]> for KindSet {
    fn from(kinds: &[TokenKind]) -> Self {
        Self::of(kinds)
    }
}

impl FromIterator<TokenKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

use TokenKind as K;

/// Whitespace and comments.
pub const EMPTY: KindSet = KindSet::of(&[
    K::Whitespace,
    K::Comment,
    K::DocCommentOpenTag,
    K::DocCommentCloseTag,
    K::DocCommentStar,
    K::DocCommentWhitespace,
    K::DocCommentTag,
    K::DocCommentString,
]);

/// Comment kinds only.
pub const COMMENTS: KindSet = KindSet::of(&[
    K::Comment,
    K::DocCommentOpenTag,
    K::DocCommentCloseTag,
    K::DocCommentStar,
    K::DocCommentWhitespace,
    K::DocCommentTag,
    K::DocCommentString,
]);

/// Single-token names, qualified or not.
pub const NAMES: KindSet = KindSet::of(&[
    K::String,
    K::NameQualified,
    K::NameFullyQualified,
    K::NameRelative,
]);

/// Tokens that may own a lexical scope.
pub const SCOPE_OWNERS: KindSet = KindSet::of(&[
    K::Class,
    K::AnonClass,
    K::Interface,
    K::Trait,
    K::Enum,
    K::Function,
    K::Closure,
    K::Fn,
    K::Namespace,
    K::If,
    K::Elseif,
    K::Else,
    K::For,
    K::Foreach,
    K::While,
    K::Do,
    K::Switch,
    K::Case,
    K::Default,
    K::Try,
    K::Catch,
    K::Finally,
    K::Declare,
    K::Match,
    K::Use,
    K::StartHeredoc,
    K::StartNowdoc,
]);

/// Tokens that may own the parenthesis group following them.
pub const PARENTHESIS_OWNERS: KindSet = KindSet::of(&[
    K::Array,
    K::List,
    K::Isset,
    K::Unset,
    K::Empty,
    K::Eval,
    K::Exit,
    K::If,
    K::Elseif,
    K::While,
    K::For,
    K::Foreach,
    K::Switch,
    K::Catch,
    K::Declare,
    K::Match,
    K::Function,
    K::Closure,
    K::Fn,
    K::AnonClass,
    K::Use,
]);

/// Class-like declarations whose bodies hold members.
pub const OO_SCOPES: KindSet =
    KindSet::of(&[K::Class, K::AnonClass, K::Interface, K::Trait, K::Enum]);

/// Function-like declarations whose parentheses hold parameters.
pub const FUNCTION_LIKE: KindSet = KindSet::of(&[K::Function, K::Closure, K::Fn]);

/// Member and parameter modifiers.
pub const MODIFIERS: KindSet = KindSet::of(&[
    K::Public,
    K::Private,
    K::Protected,
    K::Static,
    K::Readonly,
    K::Final,
    K::Abstract,
    K::Var,
]);

/// Words with keyword meaning that revert to identifiers in name position.
pub const KEYWORDS: KindSet = KindSet::of(&[
    K::Abstract,
    K::Array,
    K::As,
    K::Break,
    K::Callable,
    K::Case,
    K::Catch,
    K::Class,
    K::Clone,
    K::Const,
    K::Continue,
    K::Declare,
    K::Default,
    K::Do,
    K::Echo,
    K::Else,
    K::Elseif,
    K::Empty,
    K::Enddeclare,
    K::Endfor,
    K::Endforeach,
    K::Endif,
    K::Endswitch,
    K::Endwhile,
    K::Enum,
    K::EnumCase,
    K::Eval,
    K::Exit,
    K::Extends,
    K::Final,
    K::Finally,
    K::Fn,
    K::For,
    K::Foreach,
    K::Function,
    K::Closure,
    K::AnonClass,
    K::Global,
    K::Goto,
    K::HaltCompiler,
    K::If,
    K::Implements,
    K::Include,
    K::IncludeOnce,
    K::Instanceof,
    K::Insteadof,
    K::Interface,
    K::Isset,
    K::List,
    K::LogicalAnd,
    K::LogicalOr,
    K::LogicalXor,
    K::Match,
    K::MatchDefault,
    K::Namespace,
    K::New,
    K::Print,
    K::Private,
    K::Protected,
    K::Public,
    K::Readonly,
    K::Require,
    K::RequireOnce,
    K::Return,
    K::Static,
    K::Switch,
    K::Throw,
    K::Trait,
    K::Try,
    K::Unset,
    K::Use,
    K::Var,
    K::While,
    K::Yield,
    K::SelfKeyword,
    K::Parent,
    K::True,
    K::False,
    K::Null,
    K::ClassC,
    K::Dir,
    K::File,
    K::FuncC,
    K::Line,
    K::MethodC,
    K::NsC,
    K::TraitC,
    K::PropertyC,
]);

/// Kinds that expand tabs in their text when a tab width is configured.
pub const TAB_EXPANDED: KindSet = KindSet::of(&[
    K::Whitespace,
    K::Comment,
    K::DocCommentWhitespace,
    K::DocCommentString,
    K::InlineHtml,
    K::Heredoc,
    K::Nowdoc,
    K::EndHeredoc,
    K::EndNowdoc,
]);

/// An opener/closer pair. `closer` is `None` when the input ended first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    pub opener: usize,
    pub closer: Option<usize>,
}

/// Scope triple shared by a scope's owner, opener and closer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeLink {
    pub owner: usize,
    pub opener: usize,
    pub closer: Option<usize>,
}

/// Parenthesis triple. `owner` is `None` for pure grouping parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParenLink {
    pub owner: Option<usize>,
    pub opener: usize,
    pub closer: Option<usize>,
}

/// One lexical token with its structural annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text; tabs are expanded here when a tab width is configured.
    pub text: String,
    /// Original source text when `text` was rewritten by tab expansion.
    pub orig_text: Option<String>,
    /// Index of this token in its stream.
    pub position: usize,
    /// Byte offset of the first character in the decoded source.
    pub offset: usize,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character, after tab expansion.
    pub column: usize,
    /// Display width in columns, tabs expanded and line breaks excluded.
    pub length: usize,
    pub scope: Option<ScopeLink>,
    pub parenthesis: Option<ParenLink>,
    /// Square, short-array and curly bracket pairing.
    pub bracket: Option<Pair>,
    /// Innermost attribute region this token belongs to.
    pub attribute: Option<Pair>,
    /// Enclosing attribute regions outside the innermost one, outermost first.
    pub nested_attributes: Vec<Pair>,
    /// Enclosing parenthesis pairs, outermost first.
    pub nested_parenthesis: Vec<Pair>,
    /// Doc comment open/close pairing, set on both tags.
    pub comment: Option<Pair>,
    /// Positions of `@tags` inside a doc comment, set on the open tag.
    pub comment_tags: Vec<usize>,
    /// Every enclosing scope owner and its kind, outermost first.
    pub enclosing_scopes: Vec<(usize, TokenKind)>,
    pub nesting_level: usize,
}

impl Token {
    /// Create an unannotated token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
            line: 1,
            column: 1,
            ..Self::default()
        }
    }

    /// The exact source text this token covers.
    #[must_use]
    pub fn source_text(&self) -> &str {
        self.orig_text.as_deref().unwrap_or(&self.text)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Case-insensitive comparison of the token text.
    #[must_use]
    pub fn text_is(&self, word: &str) -> bool {
        self.text.eq_ignore_ascii_case(word)
    }
}
