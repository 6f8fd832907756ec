//! # access-ninja
//!
//! Lossless rewriting of Swift access-control modifiers on selected lines.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! command   → Editor commands, options, host buffer glue
//!   ↓
//! edit      → compute_edits: lines → parse → rewrite → lines
//!   ↓
//! rewrite   → Scope-aware tree rewriter, modifier-list transformation
//!   ↓
//! selection → Host selections → whole buffer lines
//!   ↓
//! access    → AccessLevel, AccessChange
//!   ↓
//! parser    → Logos lexer, lossless recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (TextPosition, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → access → rewrite → edit → command)
// ============================================================================

/// Foundation types: host positions, line index
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, AST wrappers
pub mod parser;

/// Access levels and changes
pub mod access;

/// Selection to line resolution
pub mod selection;

/// Tree rewriter
pub mod rewrite;

/// Line edits and text buffers
pub mod edit;

/// Editor commands
pub mod command;

mod error;

// Re-export commonly needed items
pub use access::{AccessChange, AccessLevel};
pub use command::{AccessCommand, CommandDefinition, CommandOptions, command_definitions};
pub use edit::{LineEdits, SourceBuffer, TextBuffer, apply_edits, compute_edits};
pub use error::AccessError;
pub use rewrite::AccessRewriter;
pub use selection::selected_lines;

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextPosition, TextRange};
