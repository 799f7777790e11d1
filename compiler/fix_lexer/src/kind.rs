//! Token kinds produced by the scanner and the cooking pass.
//!
//! Kinds mirror the tokenizer vocabulary of PHP (`T_*` names) plus a small
//! set of custom kinds (`CT::T_*`) that the cooking pass assigns to bracket
//! characters whose role the raw scanner cannot decide on its own.

/// Declares `TokenKind` together with its display names and the `ALL` table.
macro_rules! define_token_kinds {
    ($( $(#[$meta:meta])* $variant:ident => $name:literal, )*) => {
        /// Classification of a kind-tagged lexical unit.
        ///
        /// Bare single-character units (`;`, `(`, `=`, ...) carry no kind.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum TokenKind {
            $( $(#[$meta])* $variant, )*
        }

        impl TokenKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [TokenKind] = &[ $( TokenKind::$variant, )* ];

            /// Tokenizer name of this kind (`T_WHITESPACE`, `CT::T_ARRAY_SQUARE_BRACE_OPEN`, ...).
            pub const fn name(self) -> &'static str {
                match self {
                    $( TokenKind::$variant => $name, )*
                }
            }
        }
    };
}

define_token_kinds! {
    // === Markup and tags ===
    /// Text outside of `<?php ... ?>`.
    InlineHtml => "T_INLINE_HTML",
    /// `<?php` plus the single whitespace character following it.
    OpenTag => "T_OPEN_TAG",
    OpenTagWithEcho => "T_OPEN_TAG_WITH_ECHO",
    /// `?>` plus a directly following line ending.
    CloseTag => "T_CLOSE_TAG",

    // === Trivia ===
    Whitespace => "T_WHITESPACE",
    /// `// ...`, `# ...` and `/* ... */`. Single-line forms exclude the line ending.
    Comment => "T_COMMENT",
    DocComment => "T_DOC_COMMENT",

    // === Names and literals ===
    Variable => "T_VARIABLE",
    /// Identifier that is not a reserved word.
    String => "T_STRING",
    LNumber => "T_LNUMBER",
    DNumber => "T_DNUMBER",
    ConstantEncapsedString => "T_CONSTANT_ENCAPSED_STRING",
    NsSeparator => "T_NS_SEPARATOR",

    // === Keywords ===
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
    ElseIf => "T_ELSEIF",
    Empty => "T_EMPTY",
    EndDeclare => "T_ENDDECLARE",
    EndFor => "T_ENDFOR",
    EndForeach => "T_ENDFOREACH",
    EndIf => "T_ENDIF",
    EndSwitch => "T_ENDSWITCH",
    EndWhile => "T_ENDWHILE",
    Enum => "T_ENUM",
    Eval => "T_EVAL",
    Exit => "T_EXIT",
    Extends => "T_EXTENDS",
    Final => "T_FINAL",
    Finally => "T_FINALLY",
    Fn => "T_FN",
    For => "T_FOR",
    Foreach => "T_FOREACH",
    Function => "T_FUNCTION",
    Global => "T_GLOBAL",
    Goto => "T_GOTO",
    If => "T_IF",
    Implements => "T_IMPLEMENTS",
    Include => "T_INCLUDE",
    IncludeOnce => "T_INCLUDE_ONCE",
    InstanceOf => "T_INSTANCEOF",
    InsteadOf => "T_INSTEADOF",
    Interface => "T_INTERFACE",
    Isset => "T_ISSET",
    List => "T_LIST",
    LogicalAnd => "T_LOGICAL_AND",
    LogicalOr => "T_LOGICAL_OR",
    LogicalXor => "T_LOGICAL_XOR",
    Match => "T_MATCH",
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

    // === Magic constants ===
    ClassC => "T_CLASS_C",
    Dir => "T_DIR",
    File => "T_FILE",
    FuncC => "T_FUNC_C",
    Line => "T_LINE",
    MethodC => "T_METHOD_C",
    NsC => "T_NS_C",
    TraitC => "T_TRAIT_C",

    // === Casts ===
    ArrayCast => "T_ARRAY_CAST",
    BoolCast => "T_BOOL_CAST",
    DoubleCast => "T_DOUBLE_CAST",
    IntCast => "T_INT_CAST",
    ObjectCast => "T_OBJECT_CAST",
    StringCast => "T_STRING_CAST",
    UnsetCast => "T_UNSET_CAST",

    // === Multi-character operators ===
    AndEqual => "T_AND_EQUAL",
    BooleanAnd => "T_BOOLEAN_AND",
    BooleanOr => "T_BOOLEAN_OR",
    Coalesce => "T_COALESCE",
    CoalesceEqual => "T_COALESCE_EQUAL",
    ConcatEqual => "T_CONCAT_EQUAL",
    Dec => "T_DEC",
    DivEqual => "T_DIV_EQUAL",
    DoubleArrow => "T_DOUBLE_ARROW",
    DoubleColon => "T_DOUBLE_COLON",
    Ellipsis => "T_ELLIPSIS",
    Inc => "T_INC",
    IsEqual => "T_IS_EQUAL",
    IsGreaterOrEqual => "T_IS_GREATER_OR_EQUAL",
    IsIdentical => "T_IS_IDENTICAL",
    IsNotEqual => "T_IS_NOT_EQUAL",
    IsNotIdentical => "T_IS_NOT_IDENTICAL",
    IsSmallerOrEqual => "T_IS_SMALLER_OR_EQUAL",
    MinusEqual => "T_MINUS_EQUAL",
    ModEqual => "T_MOD_EQUAL",
    MulEqual => "T_MUL_EQUAL",
    NullsafeObjectOperator => "T_NULLSAFE_OBJECT_OPERATOR",
    ObjectOperator => "T_OBJECT_OPERATOR",
    OrEqual => "T_OR_EQUAL",
    PlusEqual => "T_PLUS_EQUAL",
    Pow => "T_POW",
    PowEqual => "T_POW_EQUAL",
    Sl => "T_SL",
    SlEqual => "T_SL_EQUAL",
    Spaceship => "T_SPACESHIP",
    Sr => "T_SR",
    SrEqual => "T_SR_EQUAL",
    XorEqual => "T_XOR_EQUAL",

    // === Custom kinds assigned by the cooking pass ===
    ArraySquareBraceOpen => "CT::T_ARRAY_SQUARE_BRACE_OPEN",
    ArraySquareBraceClose => "CT::T_ARRAY_SQUARE_BRACE_CLOSE",
    DestructuringSquareBraceOpen => "CT::T_DESTRUCTURING_SQUARE_BRACE_OPEN",
    DestructuringSquareBraceClose => "CT::T_DESTRUCTURING_SQUARE_BRACE_CLOSE",
    DynamicPropBraceOpen => "CT::T_DYNAMIC_PROP_BRACE_OPEN",
    DynamicPropBraceClose => "CT::T_DYNAMIC_PROP_BRACE_CLOSE",
    DynamicVarBraceOpen => "CT::T_DYNAMIC_VAR_BRACE_OPEN",
    DynamicVarBraceClose => "CT::T_DYNAMIC_VAR_BRACE_CLOSE",
    ArrayIndexCurlyBraceOpen => "CT::T_ARRAY_INDEX_CURLY_BRACE_OPEN",
    ArrayIndexCurlyBraceClose => "CT::T_ARRAY_INDEX_CURLY_BRACE_CLOSE",
    GroupImportBraceOpen => "CT::T_GROUP_IMPORT_BRACE_OPEN",
    GroupImportBraceClose => "CT::T_GROUP_IMPORT_BRACE_CLOSE",
    BraceClassInstantiationOpen => "CT::T_BRACE_CLASS_INSTANTIATION_OPEN",
    BraceClassInstantiationClose => "CT::T_BRACE_CLASS_INSTANTIATION_CLOSE",
}

impl TokenKind {
    /// Resolve a reserved word or magic constant (ASCII case-insensitive).
    pub fn keyword(word: &str) -> Option<TokenKind> {
        // No reserved word is longer than 16 bytes.
        if word.len() > 16 {
            return None;
        }
        let lower = word.to_ascii_lowercase();
        let kind = match lower.as_str() {
            "abstract" => TokenKind::Abstract,
            "and" => TokenKind::LogicalAnd,
            "array" => TokenKind::Array,
            "as" => TokenKind::As,
            "break" => TokenKind::Break,
            "callable" => TokenKind::Callable,
            "case" => TokenKind::Case,
            "catch" => TokenKind::Catch,
            "class" => TokenKind::Class,
            "clone" => TokenKind::Clone,
            "const" => TokenKind::Const,
            "continue" => TokenKind::Continue,
            "declare" => TokenKind::Declare,
            "default" => TokenKind::Default,
            "die" | "exit" => TokenKind::Exit,
            "do" => TokenKind::Do,
            "echo" => TokenKind::Echo,
            "else" => TokenKind::Else,
            "elseif" => TokenKind::ElseIf,
            "empty" => TokenKind::Empty,
            "enddeclare" => TokenKind::EndDeclare,
            "endfor" => TokenKind::EndFor,
            "endforeach" => TokenKind::EndForeach,
            "endif" => TokenKind::EndIf,
            "endswitch" => TokenKind::EndSwitch,
            "endwhile" => TokenKind::EndWhile,
            "enum" => TokenKind::Enum,
            "eval" => TokenKind::Eval,
            "extends" => TokenKind::Extends,
            "final" => TokenKind::Final,
            "finally" => TokenKind::Finally,
            "fn" => TokenKind::Fn,
            "for" => TokenKind::For,
            "foreach" => TokenKind::Foreach,
            "function" => TokenKind::Function,
            "global" => TokenKind::Global,
            "goto" => TokenKind::Goto,
            "if" => TokenKind::If,
            "implements" => TokenKind::Implements,
            "include" => TokenKind::Include,
            "include_once" => TokenKind::IncludeOnce,
            "instanceof" => TokenKind::InstanceOf,
            "insteadof" => TokenKind::InsteadOf,
            "interface" => TokenKind::Interface,
            "isset" => TokenKind::Isset,
            "list" => TokenKind::List,
            "match" => TokenKind::Match,
            "namespace" => TokenKind::Namespace,
            "new" => TokenKind::New,
            "or" => TokenKind::LogicalOr,
            "print" => TokenKind::Print,
            "private" => TokenKind::Private,
            "protected" => TokenKind::Protected,
            "public" => TokenKind::Public,
            "readonly" => TokenKind::Readonly,
            "require" => TokenKind::Require,
            "require_once" => TokenKind::RequireOnce,
            "return" => TokenKind::Return,
            "static" => TokenKind::Static,
            "switch" => TokenKind::Switch,
            "throw" => TokenKind::Throw,
            "trait" => TokenKind::Trait,
            "try" => TokenKind::Try,
            "unset" => TokenKind::Unset,
            "use" => TokenKind::Use,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            "xor" => TokenKind::LogicalXor,
            "yield" => TokenKind::Yield,
            "__class__" => TokenKind::ClassC,
            "__dir__" => TokenKind::Dir,
            "__file__" => TokenKind::File,
            "__function__" => TokenKind::FuncC,
            "__line__" => TokenKind::Line,
            "__method__" => TokenKind::MethodC,
            "__namespace__" => TokenKind::NsC,
            "__trait__" => TokenKind::TraitC,
            _ => return None,
        };
        Some(kind)
    }

    /// Resolve the type name inside a cast, e.g. `int` in `(int)`.
    pub fn cast(type_name: &str) -> Option<TokenKind> {
        let kind = match type_name.to_ascii_lowercase().as_str() {
            "array" => TokenKind::ArrayCast,
            "bool" | "boolean" => TokenKind::BoolCast,
            "double" | "float" | "real" => TokenKind::DoubleCast,
            "int" | "integer" => TokenKind::IntCast,
            "object" => TokenKind::ObjectCast,
            "binary" | "string" => TokenKind::StringCast,
            "unset" => TokenKind::UnsetCast,
            _ => return None,
        };
        Some(kind)
    }

    /// Look a kind up by its tokenizer name.
    pub fn from_name(name: &str) -> Option<TokenKind> {
        TokenKind::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Reserved words, including the word-form logical operators.
    pub fn is_keyword(self) -> bool {
        (TokenKind::Abstract as u16..=TokenKind::Yield as u16).contains(&(self as u16))
    }

    /// `__CLASS__`, `__DIR__`, ...
    pub fn is_magic_constant(self) -> bool {
        (TokenKind::ClassC as u16..=TokenKind::TraitC as u16).contains(&(self as u16))
    }

    /// `(int)`, `(string)`, ...
    pub fn is_cast(self) -> bool {
        (TokenKind::ArrayCast as u16..=TokenKind::UnsetCast as u16).contains(&(self as u16))
    }

    /// Kinds assigned by the cooking pass rather than the scanner.
    pub fn is_custom(self) -> bool {
        self as u16 >= TokenKind::ArraySquareBraceOpen as u16
    }

    /// `class`, `interface`, `trait` and `enum`.
    pub fn is_classy(self) -> bool {
        matches!(
            self,
            TokenKind::Class | TokenKind::Interface | TokenKind::Trait | TokenKind::Enum
        )
    }

    /// Whitespace and both comment kinds.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
