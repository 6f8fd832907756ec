//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for the Swift declarations
//! the rewriter cares about. Each struct wraps a SyntaxNode and provides
//! methods to access children.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use crate::access::AccessLevel;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn first_significant(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| !t.kind().is_trivia())
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// Declarations at the top level of the file
    pub fn decls(&self) -> impl Iterator<Item = Decl> + '_ {
        self.0.children().filter_map(Decl::cast)
    }
}

// ============================================================================
// Modifiers
// ============================================================================

ast_node!(ModifierList, MODIFIER_LIST);

impl ModifierList {
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.children().filter_map(Modifier::cast)
    }

    /// The first access-control modifier, if any
    pub fn access_level(&self) -> Option<AccessLevel> {
        self.modifiers().find_map(|m| m.access_level())
    }
}

ast_node!(Modifier, MODIFIER);

impl Modifier {
    /// The modifier keyword (`public`, `static`, `private` in `private(set)`)
    pub fn name(&self) -> Option<SyntaxToken> {
        first_significant(&self.0)
    }

    /// The word inside a `(set)` style detail
    pub fn detail(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .skip_while(|t| t.kind() != SyntaxKind::L_PAREN)
            .find(|t| t.kind() == SyntaxKind::IDENT)
    }

    pub fn access_level(&self) -> Option<AccessLevel> {
        self.name().and_then(|t| AccessLevel::for_keyword(t.kind()))
    }
}

// ============================================================================
// Blocks
// ============================================================================

ast_node!(MemberBlock, MEMBER_BLOCK);

impl MemberBlock {
    pub fn members(&self) -> impl Iterator<Item = Decl> + '_ {
        self.0.children().filter_map(Decl::cast)
    }

    /// True when the braces contain nothing but trivia
    pub fn is_empty(&self) -> bool {
        self.0.children().next().is_none()
    }
}

// ============================================================================
// Declarations
// ============================================================================

ast_node!(FunctionDecl, FUNCTION_DECL);
ast_node!(ClassDecl, CLASS_DECL);
ast_node!(StructDecl, STRUCT_DECL);
ast_node!(EnumDecl, ENUM_DECL);
ast_node!(ProtocolDecl, PROTOCOL_DECL);
ast_node!(ExtensionDecl, EXTENSION_DECL);
ast_node!(VariableDecl, VARIABLE_DECL);
ast_node!(InitializerDecl, INITIALIZER_DECL);
ast_node!(SubscriptDecl, SUBSCRIPT_DECL);
ast_node!(TypeAliasDecl, TYPEALIAS_DECL);
ast_node!(ImportDecl, IMPORT_DECL);

/// A declaration whose access modifiers can be rewritten
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decl {
    Function(FunctionDecl),
    Class(ClassDecl),
    Struct(StructDecl),
    Enum(EnumDecl),
    Protocol(ProtocolDecl),
    Extension(ExtensionDecl),
    Variable(VariableDecl),
    Initializer(InitializerDecl),
    Subscript(SubscriptDecl),
    TypeAlias(TypeAliasDecl),
    Import(ImportDecl),
}

impl AstNode for Decl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::FUNCTION_DECL
                | SyntaxKind::CLASS_DECL
                | SyntaxKind::STRUCT_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::PROTOCOL_DECL
                | SyntaxKind::EXTENSION_DECL
                | SyntaxKind::VARIABLE_DECL
                | SyntaxKind::INITIALIZER_DECL
                | SyntaxKind::SUBSCRIPT_DECL
                | SyntaxKind::TYPEALIAS_DECL
                | SyntaxKind::IMPORT_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::FUNCTION_DECL => Some(Self::Function(FunctionDecl(node))),
            SyntaxKind::CLASS_DECL => Some(Self::Class(ClassDecl(node))),
            SyntaxKind::STRUCT_DECL => Some(Self::Struct(StructDecl(node))),
            SyntaxKind::ENUM_DECL => Some(Self::Enum(EnumDecl(node))),
            SyntaxKind::PROTOCOL_DECL => Some(Self::Protocol(ProtocolDecl(node))),
            SyntaxKind::EXTENSION_DECL => Some(Self::Extension(ExtensionDecl(node))),
            SyntaxKind::VARIABLE_DECL => Some(Self::Variable(VariableDecl(node))),
            SyntaxKind::INITIALIZER_DECL => Some(Self::Initializer(InitializerDecl(node))),
            SyntaxKind::SUBSCRIPT_DECL => Some(Self::Subscript(SubscriptDecl(node))),
            SyntaxKind::TYPEALIAS_DECL => Some(Self::TypeAlias(TypeAliasDecl(node))),
            SyntaxKind::IMPORT_DECL => Some(Self::Import(ImportDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Function(n) => n.syntax(),
            Self::Class(n) => n.syntax(),
            Self::Struct(n) => n.syntax(),
            Self::Enum(n) => n.syntax(),
            Self::Protocol(n) => n.syntax(),
            Self::Extension(n) => n.syntax(),
            Self::Variable(n) => n.syntax(),
            Self::Initializer(n) => n.syntax(),
            Self::Subscript(n) => n.syntax(),
            Self::TypeAlias(n) => n.syntax(),
            Self::Import(n) => n.syntax(),
        }
    }
}

impl Decl {
    pub fn kind(&self) -> SyntaxKind {
        self.syntax().kind()
    }

    pub fn modifier_list(&self) -> Option<ModifierList> {
        self.syntax().children().find_map(ModifierList::cast)
    }

    /// The keyword that introduces the declaration (`func`, `var`, `class`, ...)
    ///
    /// This is the first significant token directly under the declaration
    /// node, since attributes and modifiers live in their own child nodes.
    pub fn introducer(&self) -> Option<SyntaxToken> {
        first_significant(self.syntax())
    }

    /// The declared name, when it is a plain identifier
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax()
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .skip(1)
            .find(|t| t.kind() == SyntaxKind::IDENT)
    }

    pub fn member_block(&self) -> Option<MemberBlock> {
        self.syntax().children().find_map(MemberBlock::cast)
    }

    /// Class, struct, enum or extension; protocol requirements are never rewritten
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Class(_) | Self::Struct(_) | Self::Enum(_) | Self::Extension(_)
        )
    }

    /// Kinds that are rewritten when they appear as members of a container
    pub fn is_member_kind(&self) -> bool {
        !matches!(self, Self::Extension(_) | Self::Import(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_swift;

    fn first_decl(source: &str) -> Decl {
        let parse = parse_swift(source);
        let file = SourceFile::cast(parse.syntax()).unwrap();
        file.decls().next().unwrap()
    }

    #[test]
    fn test_modifiers_and_introducer() {
        let decl = first_decl("@objc public static func foo() {}");
        assert_eq!(decl.kind(), SyntaxKind::FUNCTION_DECL);
        let list = decl.modifier_list().unwrap();
        let names: Vec<_> = list
            .modifiers()
            .filter_map(|m| m.name())
            .map(|t| t.text().to_string())
            .collect();
        assert_eq!(names, ["public", "static"]);
        assert_eq!(list.access_level(), Some(AccessLevel::Public));
        assert_eq!(decl.introducer().unwrap().kind(), SyntaxKind::FUNC_KW);
        assert_eq!(decl.name().unwrap().text(), "foo");
    }

    #[test]
    fn test_setter_detail() {
        let decl = first_decl("public private(set) var x = 1");
        let modifiers: Vec<_> = decl.modifier_list().unwrap().modifiers().collect();
        assert_eq!(modifiers.len(), 2);
        assert_eq!(modifiers[1].access_level(), Some(AccessLevel::Private));
        assert_eq!(modifiers[1].detail().unwrap().text(), "set");
        assert!(modifiers[0].detail().is_none());
    }

    #[test]
    fn test_open_is_remapped_in_modifier_position() {
        let decl = first_decl("open class Foo {}");
        assert_eq!(decl.kind(), SyntaxKind::CLASS_DECL);
        assert_eq!(
            decl.modifier_list().unwrap().access_level(),
            Some(AccessLevel::Open)
        );
    }

    #[test]
    fn test_member_block() {
        let decl = first_decl("struct S {\n  var a: Int\n  func b() {}\n}");
        assert!(decl.is_container());
        let kinds: Vec<_> = decl.member_block().unwrap().members().map(|m| m.kind()).collect();
        assert_eq!(kinds, [SyntaxKind::VARIABLE_DECL, SyntaxKind::FUNCTION_DECL]);
    }

    #[test]
    fn test_empty_member_block() {
        let decl = first_decl("extension Foo { }");
        assert!(decl.member_block().unwrap().is_empty());
        assert!(!decl.is_member_kind());
    }
}
