//! Tree rewriter that applies an [`AccessChange`] to every eligible declaration.
//!
//! The walk rebuilds green nodes bottom-up and shares every untouched
//! subtree with the input tree. Visiting returns `None` for an unchanged
//! node, so a no-op change costs no allocation beyond the walk itself.
//!
//! ## Scopes
//!
//! A stack of enclosing kinds is carried down the walk. A function declared
//! directly in another function's body is skipped together with everything
//! nested in it. Every other declaration reached by the walk is rewritten,
//! including ones in statement bodies, closures and deinit bodies.

mod modifiers;

use rowan::{GreenNode, NodeOrToken};

use crate::access::AccessChange;
use crate::parser::{AstNode, Decl, SyntaxElement, SyntaxKind, SyntaxNode};
use modifiers::{ModifierEdit, ModifierSlot, Trivia, apply_change};

type GreenElement = rowan::NodeOrToken<GreenNode, rowan::GreenToken>;

/// What a node of the walk is nested in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Enclosing {
    /// Member block of a type or extension
    Type,
    /// `#if` clause
    Conditional,
    /// Body of a `func`
    Function,
    /// Body of an initializer, deinit, subscript, accessor or macro
    Body,
    /// Body of `if`, `for`, `do`, ...
    Statement,
    Closure,
}

impl Enclosing {
    fn for_node(node: &SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::MEMBER_BLOCK => Some(Self::Type),
            SyntaxKind::IF_CONFIG => Some(Self::Conditional),
            SyntaxKind::CLOSURE => Some(Self::Closure),
            SyntaxKind::CODE_BLOCK => Some(match node.parent().map(|p| p.kind()) {
                Some(SyntaxKind::FUNCTION_DECL) => Self::Function,
                Some(
                    SyntaxKind::INITIALIZER_DECL
                    | SyntaxKind::DEINIT_DECL
                    | SyntaxKind::SUBSCRIPT_DECL
                    | SyntaxKind::VARIABLE_DECL
                    | SyntaxKind::MACRO_DECL,
                ) => Self::Body,
                _ => Self::Statement,
            }),
            _ => None,
        }
    }
}

/// Rewrites access modifiers in a parsed source file
#[derive(Debug, Clone, Copy)]
pub struct AccessRewriter {
    change: AccessChange,
}

impl AccessRewriter {
    pub fn new(change: AccessChange) -> Self {
        Self { change }
    }

    /// Rewrite `root` and return the new root node
    pub fn rewrite(&self, root: &SyntaxNode) -> SyntaxNode {
        let mut walk = Walk {
            change: self.change,
            scopes: Vec::new(),
        };
        match walk.visit(root) {
            Some(green) => SyntaxNode::new_root(green),
            None => root.clone(),
        }
    }
}

struct Walk {
    change: AccessChange,
    scopes: Vec<Enclosing>,
}

impl Walk {
    /// A `func` declared directly in the body of another `func`
    fn is_nested_function(&self, decl: &Decl) -> bool {
        matches!(decl, Decl::Function(_)) && self.scopes.last() == Some(&Enclosing::Function)
    }

    /// Generic recursion; declarations are dispatched on the way down
    fn visit(&mut self, node: &SyntaxNode) -> Option<GreenNode> {
        if let Some(decl) = Decl::cast(node.clone()) {
            if self.is_nested_function(&decl) {
                tracing::trace!(scopes = ?self.scopes, "skipping nested function");
                return None;
            }
            return self.visit_decl(&decl);
        }

        let scope = Enclosing::for_node(node);
        if let Some(scope) = scope {
            self.scopes.push(scope);
        }
        let result = self.visit_children(node);
        if scope.is_some() {
            self.scopes.pop();
        }
        result
    }

    fn visit_children(&mut self, node: &SyntaxNode) -> Option<GreenNode> {
        let mut changed = false;
        let mut children = Vec::new();
        for element in node.children_with_tokens() {
            match element {
                NodeOrToken::Node(child) => match self.visit(&child) {
                    Some(green) => {
                        changed = true;
                        children.push(NodeOrToken::Node(green));
                    }
                    None => children.push(NodeOrToken::Node(child.green().into_owned())),
                },
                NodeOrToken::Token(token) => children.push(NodeOrToken::Token(token.green().to_owned())),
            }
        }
        changed.then(|| GreenNode::new(node.kind().into(), children))
    }

    fn visit_decl(&mut self, decl: &Decl) -> Option<GreenNode> {
        if !decl.is_container() {
            return self.transform(decl);
        }

        let rebuilt = self.visit_members(decl);

        // An extension with members keeps its own access level
        let keeps_own_level = matches!(decl, Decl::Extension(_))
            && decl.member_block().is_some_and(|block| !block.is_empty());
        if keeps_own_level {
            return rebuilt;
        }

        let node = match &rebuilt {
            Some(green) => SyntaxNode::new_root(green.clone()),
            None => decl.syntax().clone(),
        };
        let Some(current) = Decl::cast(node) else {
            return rebuilt;
        };
        self.transform(&current).or(rebuilt)
    }

    /// Dispatch the member kinds of a type body
    fn visit_members(&mut self, decl: &Decl) -> Option<GreenNode> {
        let block = decl.member_block()?;
        self.scopes.push(Enclosing::Type);
        let mut changed = false;
        let mut children = Vec::new();
        for element in block.syntax().children_with_tokens() {
            let rewritten = match &element {
                NodeOrToken::Node(child) => Decl::cast(child.clone())
                    .filter(|member| member.is_member_kind())
                    .and_then(|member| self.visit_decl(&member)),
                NodeOrToken::Token(_) => None,
            };
            match rewritten {
                Some(green) => {
                    changed = true;
                    children.push(NodeOrToken::Node(green));
                }
                None => children.push(green_element(&element)),
            }
        }
        self.scopes.pop();

        if !changed {
            return None;
        }
        let block_green = GreenNode::new(SyntaxKind::MEMBER_BLOCK.into(), children);
        Some(replace_child(decl.syntax(), block.syntax(), block_green))
    }

    /// Apply the change to the declaration's own modifier list
    fn transform(&self, decl: &Decl) -> Option<GreenNode> {
        let list = decl.modifier_list()?;
        let slots: Vec<_> = list.modifiers().map(|m| ModifierSlot::from_modifier(&m)).collect();
        let edit = apply_change(self.change, &slots, &introducer_leading(decl.syntax()))?;
        tracing::trace!(kind = ?decl.kind(), modifiers = edit.modifiers.len(), "rewrote modifiers");
        Some(rebuild_decl(decl.syntax(), edit))
    }
}

fn green_element(element: &SyntaxElement) -> GreenElement {
    match element {
        NodeOrToken::Node(node) => NodeOrToken::Node(node.green().into_owned()),
        NodeOrToken::Token(token) => NodeOrToken::Token(token.green().to_owned()),
    }
}

fn replace_child(parent: &SyntaxNode, target: &SyntaxNode, replacement: GreenNode) -> GreenNode {
    let children: Vec<_> = parent
        .children_with_tokens()
        .map(|element| match element {
            NodeOrToken::Node(node) if &node == target => NodeOrToken::Node(replacement.clone()),
            other => green_element(&other),
        })
        .collect();
    GreenNode::new(parent.kind().into(), children)
}

/// Trivia between the modifier list and the introducer keyword
fn introducer_leading(decl: &SyntaxNode) -> Trivia {
    decl.children_with_tokens()
        .skip_while(|e| e.kind() != SyntaxKind::MODIFIER_LIST)
        .skip(1)
        .map_while(|e| e.into_token().filter(|t| t.kind().is_trivia()))
        .map(|t| t.green().to_owned())
        .collect()
}

/// Swap in the new modifier list and the introducer's new leading trivia
fn rebuild_decl(decl: &SyntaxNode, edit: ModifierEdit) -> GreenNode {
    enum State {
        BeforeList,
        BeforeIntroducer,
        Rest,
    }

    let ModifierEdit {
        modifiers,
        introducer_leading,
    } = edit;
    let mut list = Some(GreenNode::new(
        SyntaxKind::MODIFIER_LIST.into(),
        modifiers
            .into_iter()
            .map(|m| NodeOrToken::Node(m.into_green()))
            .collect::<Vec<_>>(),
    ));
    let mut introducer_leading = Some(introducer_leading);

    let mut state = State::BeforeList;
    let mut children: Vec<GreenElement> = Vec::new();
    for element in decl.children_with_tokens() {
        match state {
            State::BeforeList if element.kind() == SyntaxKind::MODIFIER_LIST => {
                if let Some(list) = list.take() {
                    children.push(NodeOrToken::Node(list));
                }
                state = State::BeforeIntroducer;
            }
            State::BeforeIntroducer if element.kind().is_trivia() => {}
            State::BeforeIntroducer => {
                if let Some(trivia) = introducer_leading.take() {
                    children.extend(trivia.into_iter().map(NodeOrToken::Token));
                }
                children.push(green_element(&element));
                state = State::Rest;
            }
            _ => children.push(green_element(&element)),
        }
    }
    GreenNode::new(decl.kind().into(), children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessLevel;
    use crate::parser::parse_swift;

    fn rewrite(source: &str, change: AccessChange) -> String {
        let root = parse_swift(source).syntax();
        AccessRewriter::new(change).rewrite(&root).text().to_string()
    }

    #[test]
    fn test_unchanged_tree_is_shared() {
        let root = parse_swift("func f() {\n  func g() {}\n}\n").syntax();
        let rewritten = AccessRewriter::new(AccessChange::IncreaseLevel).rewrite(&root);
        assert_eq!(rewritten.green(), root.green());
    }

    #[test]
    fn test_introducer_leading_collects_doc_comment() {
        let root = parse_swift("/// doc\nfunc f() {}").syntax();
        let decl = root.children().next().unwrap();
        let text: String = introducer_leading(&decl).iter().map(|t| t.text().to_string()).collect();
        assert_eq!(text, "/// doc\n");
    }

    #[test]
    fn test_statement_and_closure_bodies_are_visited() {
        assert_eq!(
            rewrite(
                "if true {\n    var x = 1\n}\nfoo { func bar() {} }",
                AccessChange::force(AccessLevel::Public)
            ),
            "if true {\n    public var x = 1\n}\nfoo { public func bar() {} }"
        );
    }

    #[test]
    fn test_deinit_body_is_visited() {
        assert_eq!(
            rewrite("deinit {\n    func f() {}\n}", AccessChange::force(AccessLevel::Private)),
            "deinit {\n    private func f() {}\n}"
        );
    }

    #[test]
    fn test_nested_function_is_skipped() {
        let root = parse_swift("func outer() {\n    func inner() {}\n}").syntax();
        let outer = root.children().next().unwrap();
        let body = outer.children().find(|n| n.kind() == SyntaxKind::CODE_BLOCK).unwrap();
        let inner = Decl::cast(body.descendants().find(|n| n.kind() == SyntaxKind::FUNCTION_DECL).unwrap()).unwrap();
        let mut walk = Walk {
            change: AccessChange::force(AccessLevel::Public),
            scopes: vec![Enclosing::for_node(&body).unwrap()],
        };
        assert!(walk.is_nested_function(&inner));
        assert!(walk.visit(inner.syntax()).is_none());
        walk.scopes = vec![Enclosing::Statement];
        assert!(!walk.is_nested_function(&inner));
    }

    #[test]
    fn test_conditional_clauses_are_not_local() {
        assert_eq!(
            rewrite("#if DEBUG\nfunc f() {}\n#endif\n", AccessChange::force(AccessLevel::Private)),
            "#if DEBUG\nprivate func f() {}\n#endif\n"
        );
    }

    #[test]
    fn test_actor_members_are_visited() {
        assert_eq!(
            rewrite("actor A {\n    func f() {}\n}", AccessChange::set(AccessLevel::Public)),
            "actor A {\n    public func f() {}\n}"
        );
    }
}
