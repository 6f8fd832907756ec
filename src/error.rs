//! Error types for command execution.

use thiserror::Error;

/// Errors surfaced to the user when a command cannot run.
///
/// Problems inside the selected text are never errors; they leave the
/// buffer unchanged instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The buffer has no selection at all.
    #[error("AccessNinja needs a selection to work on.")]
    NoSelection,

    /// The buffer does not hold Swift source.
    #[error("AccessNinja only works on Swift code.")]
    UnsupportedContent { content_type: String },
}
