//! Editor commands: one per access change a user can invoke.

mod options;

pub use options::CommandOptions;

use smol_str::{SmolStr, format_smolstr};

use crate::access::{AccessChange, AccessLevel};
use crate::edit::{TextBuffer, apply_edits, compute_edits};
use crate::error::AccessError;

/// A command and the change it applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessCommand {
    change: AccessChange,
}

/// What a host needs to register a command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandDefinition {
    pub class_name: SmolStr,
    pub identifier: SmolStr,
    pub name: SmolStr,
}

impl AccessCommand {
    pub fn new(change: AccessChange) -> Self {
        Self { change }
    }

    /// Every command, in menu order
    pub fn all() -> Vec<Self> {
        let forced = AccessLevel::ALL.into_iter().map(AccessChange::force);
        let skipping = AccessLevel::ALL.into_iter().map(AccessChange::set);
        forced
            .chain(skipping)
            .chain([
                AccessChange::IncreaseLevel,
                AccessChange::DecreaseLevel,
                AccessChange::RemoveAccessControl,
            ])
            .map(Self::new)
            .collect()
    }

    pub fn change(&self) -> AccessChange {
        self.change
    }

    /// Menu title, e.g. `Set Public Level`
    pub fn name(&self) -> SmolStr {
        format_smolstr!("{}", self.change)
    }

    /// Stable identifier, e.g. `SetPublicLevelCommand`
    ///
    /// Hosts keep key bindings under these names, so increase and decrease
    /// keep their historical `...AccessLevelCommand` spelling.
    pub fn identifier(&self) -> SmolStr {
        match self.change {
            AccessChange::IncreaseLevel => SmolStr::new_static("IncreaseAccessLevelCommand"),
            AccessChange::DecreaseLevel => SmolStr::new_static("DecreaseAccessLevelCommand"),
            change => {
                let mut id: String = change.to_string().split_whitespace().collect();
                id.push_str("Command");
                SmolStr::from(id)
            }
        }
    }

    pub fn definition(&self, options: &CommandOptions) -> CommandDefinition {
        let class_name = self.identifier();
        CommandDefinition {
            identifier: format_smolstr!("{}.{}", options.identifier_prefix, class_name),
            class_name,
            name: self.name(),
        }
    }

    /// Look a command up by its identifier, with or without the prefix
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let class_name = identifier.rsplit('.').next().unwrap_or(identifier);
        Self::all().into_iter().find(|c| c.identifier() == class_name)
    }

    /// Rewrite the selected lines of `buffer`
    pub fn perform<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        options: &CommandOptions,
    ) -> Result<(), AccessError> {
        let content_type = buffer.content_type();
        if !options.supports(content_type) {
            return Err(AccessError::UnsupportedContent {
                content_type: content_type.to_string(),
            });
        }
        if buffer.selections().is_empty() {
            return Err(AccessError::NoSelection);
        }

        let edits = compute_edits(buffer.lines(), buffer.selections(), self.change);
        tracing::debug!(command = %self.identifier(), edits = edits.len(), "performing command");
        apply_edits(buffer, &edits);
        Ok(())
    }
}

/// Definitions for every command, in menu order
pub fn command_definitions(options: &CommandOptions) -> Vec<CommandDefinition> {
    AccessCommand::all()
        .iter()
        .map(|command| command.definition(options))
        .collect()
}
