//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! Only the parts of Swift that matter for locating declarations get their
//! own kinds; everything else is carried losslessly as generic tokens.

/// All syntax kinds (tokens and nodes) for Swift source
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, blocks, statements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // foo, `class`, $0
    INTEGER,            // 42, 0xFF
    FLOAT,              // 3.14
    STRING,             // "hello", """…""", #"raw"#

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    SEMICOLON,          // ;
    COLON,              // :
    COMMA,              // ,
    DOT,                // .
    AT,                 // @
    OPERATOR,           // any operator run: = -> + ?? ...
    POUND_IDENT,        // #available, #selector, #warning

    // =========================================================================
    // COMPILER DIRECTIVES
    // =========================================================================
    POUND_IF,
    POUND_ELSEIF,
    POUND_ELSE,
    POUND_ENDIF,

    // =========================================================================
    // KEYWORDS - access control
    // =========================================================================
    PRIVATE_KW,
    FILEPRIVATE_KW,
    INTERNAL_KW,
    PUBLIC_KW,
    // `open` and `package` are contextual; the parser remaps them in modifier position
    OPEN_KW,
    PACKAGE_KW,

    // =========================================================================
    // KEYWORDS - declaration introducers
    // =========================================================================
    FUNC_KW,
    CLASS_KW,
    STRUCT_KW,
    ENUM_KW,
    PROTOCOL_KW,
    EXTENSION_KW,
    VAR_KW,
    LET_KW,
    INIT_KW,
    DEINIT_KW,
    SUBSCRIPT_KW,
    TYPEALIAS_KW,
    IMPORT_KW,
    ASSOCIATEDTYPE_KW,
    OPERATOR_KW,
    PRECEDENCEGROUP_KW,
    CASE_KW,
    STATIC_KW,

    // =========================================================================
    // KEYWORDS - statements
    // =========================================================================
    IF_KW,
    ELSE_KW,
    GUARD_KW,
    FOR_KW,
    IN_KW,
    WHILE_KW,
    REPEAT_KW,
    SWITCH_KW,
    DO_KW,
    CATCH_KW,
    DEFER_KW,
    RETURN_KW,
    THROW_KW,
    BREAK_KW,
    CONTINUE_KW,
    WHERE_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    ATTRIBUTE_LIST,
    ATTRIBUTE,
    MODIFIER_LIST,
    MODIFIER,

    // Modifier-bearing declarations
    FUNCTION_DECL,
    CLASS_DECL,
    STRUCT_DECL,
    ENUM_DECL,
    PROTOCOL_DECL,
    EXTENSION_DECL,
    VARIABLE_DECL,
    INITIALIZER_DECL,
    SUBSCRIPT_DECL,
    TYPEALIAS_DECL,
    IMPORT_DECL,

    // Declarations whose modifiers are never rewritten
    ACTOR_DECL,
    DEINIT_DECL,
    ENUM_CASE_DECL,
    ASSOCIATEDTYPE_DECL,
    OPERATOR_DECL,
    PRECEDENCEGROUP_DECL,
    MACRO_DECL,

    // Blocks and statements
    MEMBER_BLOCK,
    CODE_BLOCK,
    CLOSURE,
    STATEMENT,
    IF_CONFIG,
    IF_CONFIG_CLAUSE,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, newline or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::NEWLINE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PRIVATE_KW as u16) && (self as u16) <= (Self::WHERE_KW as u16)
    }

    /// Check if this is a `#if`-family directive token
    pub fn is_directive(self) -> bool {
        matches!(
            self,
            Self::POUND_IF | Self::POUND_ELSEIF | Self::POUND_ELSE | Self::POUND_ENDIF
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SwiftLanguage {}

impl rowan::Language for SwiftLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<SwiftLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SwiftLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SwiftLanguage>;
