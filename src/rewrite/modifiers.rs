//! The modifier-list transformation for a single declaration.
//!
//! Works on green tokens so the result can be spliced straight back into
//! the tree. The declaration's leading trivia (indentation, doc comments)
//! must come out exactly once, on whichever token ends up first.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use crate::access::{AccessChange, AccessLevel};
use crate::parser::{AstNode, Modifier, SyntaxKind, SyntaxToken};

/// A run of trivia tokens
pub(crate) type Trivia = Vec<GreenToken>;

/// One modifier split into leading trivia, its own tokens and trailing trivia
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModifierSlot {
    pub leading: Trivia,
    pub body: Vec<GreenToken>,
    pub trailing: Trivia,
    pub level: Option<AccessLevel>,
}

impl ModifierSlot {
    pub fn from_modifier(modifier: &Modifier) -> Self {
        let tokens: Vec<_> = modifier
            .syntax()
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .collect();
        let first = tokens.iter().position(|t| !t.kind().is_trivia());
        let last = tokens.iter().rposition(|t| !t.kind().is_trivia());
        let green = |range: &[SyntaxToken]| -> Vec<GreenToken> {
            range.iter().map(|t| t.green().to_owned()).collect()
        };
        let (leading, body, trailing) = match (first, last) {
            (Some(first), Some(last)) => (
                green(&tokens[..first]),
                green(&tokens[first..=last]),
                green(&tokens[last + 1..]),
            ),
            _ => (green(&tokens), Vec::new(), Vec::new()),
        };
        Self {
            leading,
            body,
            trailing,
            level: modifier.access_level(),
        }
    }

    /// A bare access keyword
    pub fn access(level: AccessLevel) -> Self {
        Self {
            leading: Vec::new(),
            body: vec![GreenToken::new(level.keyword().into(), level.as_str())],
            trailing: Vec::new(),
            level: Some(level),
        }
    }

    pub fn into_green(self) -> GreenNode {
        let children: Vec<_> = self
            .leading
            .into_iter()
            .chain(self.body)
            .chain(self.trailing)
            .map(NodeOrToken::Token)
            .collect();
        GreenNode::new(SyntaxKind::MODIFIER.into(), children)
    }
}

/// The new modifier list and the introducer's new leading trivia
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModifierEdit {
    pub modifiers: Vec<ModifierSlot>,
    pub introducer_leading: Trivia,
}

/// Apply `change` to a modifier list.
///
/// Returns `None` when the change leaves the list as it was.
pub(crate) fn apply_change(
    change: AccessChange,
    original: &[ModifierSlot],
    introducer_leading: &Trivia,
) -> Option<ModifierEdit> {
    let first_access = original.iter().position(|m| m.level.is_some());

    // If the first modifier is removed, its leading trivia is the one kept.
    let effective = original
        .first()
        .map(|m| m.leading.clone())
        .unwrap_or_else(|| introducer_leading.clone());

    let without_access = || -> Vec<ModifierSlot> {
        original
            .iter()
            .filter(|m| m.level.is_none())
            .cloned()
            .collect()
    };

    let modifiers = match change {
        AccessChange::SetLevel {
            level,
            skip_if_already_set,
        } => {
            if skip_if_already_set && first_access.is_some() {
                return None;
            }
            let mut modifiers = without_access();
            modifiers.insert(0, ModifierSlot::access(level));
            modifiers
        }
        AccessChange::IncreaseLevel | AccessChange::DecreaseLevel => {
            let index = first_access?;
            let current = original[index].level?;
            let level = if change == AccessChange::IncreaseLevel {
                current.increase()
            } else {
                current.decrease()
            };
            let mut modifiers = without_access();
            let index = index.min(modifiers.len());
            modifiers.insert(index, ModifierSlot::access(level));
            modifiers
        }
        AccessChange::RemoveAccessControl => {
            first_access?;
            without_access()
        }
    };

    Some(layout(modifiers, effective))
}

/// Space-separate the list and put the leading trivia on the first token
fn layout(mut modifiers: Vec<ModifierSlot>, effective: Trivia) -> ModifierEdit {
    if modifiers.is_empty() {
        return ModifierEdit {
            modifiers,
            introducer_leading: effective,
        };
    }
    for (i, modifier) in modifiers.iter_mut().enumerate() {
        modifier.leading = if i == 0 { effective.clone() } else { Vec::new() };
        modifier.trailing = vec![space()];
    }
    ModifierEdit {
        modifiers,
        introducer_leading: Vec::new(),
    }
}

fn space() -> GreenToken {
    GreenToken::new(SyntaxKind::WHITESPACE.into(), " ")
}
