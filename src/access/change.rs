use std::fmt;

use super::AccessLevel;

/// The edit a command asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessChange {
    /// Replace any access modifier with `level`
    SetLevel {
        level: AccessLevel,
        skip_if_already_set: bool,
    },
    IncreaseLevel,
    DecreaseLevel,
    RemoveAccessControl,
}

impl AccessChange {
    /// `SetLevel` that leaves declarations with an existing access modifier alone
    pub fn set(level: AccessLevel) -> Self {
        Self::SetLevel {
            level,
            skip_if_already_set: true,
        }
    }

    /// `SetLevel` that overwrites existing access modifiers
    pub fn force(level: AccessLevel) -> Self {
        Self::SetLevel {
            level,
            skip_if_already_set: false,
        }
    }
}

impl fmt::Display for AccessChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetLevel {
                level,
                skip_if_already_set: true,
            } => write!(f, "Set {level} Level Skip If Already Set"),
            Self::SetLevel { level, .. } => write!(f, "Set {level} Level"),
            Self::IncreaseLevel => f.write_str("Increase Level"),
            Self::DecreaseLevel => f.write_str("Decrease Level"),
            Self::RemoveAccessControl => f.write_str("Remove Access Control"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(AccessChange::force(AccessLevel::Public).to_string(), "Set Public Level");
        assert_eq!(
            AccessChange::set(AccessLevel::Fileprivate).to_string(),
            "Set Fileprivate Level Skip If Already Set"
        );
        assert_eq!(AccessChange::RemoveAccessControl.to_string(), "Remove Access Control");
    }
}
