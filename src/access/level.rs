use std::fmt;
use std::str::FromStr;

use crate::parser::SyntaxKind;

/// Swift access levels, narrowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AccessLevel {
    Private,
    Fileprivate,
    Internal,
    Package,
    Public,
    Open,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 6] = [
        Self::Private,
        Self::Fileprivate,
        Self::Internal,
        Self::Package,
        Self::Public,
        Self::Open,
    ];

    /// Ordering rank, `internal` being 0
    pub fn rank(self) -> i8 {
        match self {
            Self::Private => -2,
            Self::Fileprivate => -1,
            Self::Internal => 0,
            Self::Package => 1,
            Self::Public => 2,
            Self::Open => 3,
        }
    }

    pub fn for_keyword(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::PRIVATE_KW => Some(Self::Private),
            SyntaxKind::FILEPRIVATE_KW => Some(Self::Fileprivate),
            SyntaxKind::INTERNAL_KW => Some(Self::Internal),
            SyntaxKind::PACKAGE_KW => Some(Self::Package),
            SyntaxKind::PUBLIC_KW => Some(Self::Public),
            SyntaxKind::OPEN_KW => Some(Self::Open),
            _ => None,
        }
    }

    pub fn keyword(self) -> SyntaxKind {
        match self {
            Self::Private => SyntaxKind::PRIVATE_KW,
            Self::Fileprivate => SyntaxKind::FILEPRIVATE_KW,
            Self::Internal => SyntaxKind::INTERNAL_KW,
            Self::Package => SyntaxKind::PACKAGE_KW,
            Self::Public => SyntaxKind::PUBLIC_KW,
            Self::Open => SyntaxKind::OPEN_KW,
        }
    }

    /// Source spelling of the keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Fileprivate => "fileprivate",
            Self::Internal => "internal",
            Self::Package => "package",
            Self::Public => "public",
            Self::Open => "open",
        }
    }

    /// One step wider, saturating at `open`
    pub fn increase(self) -> Self {
        match self {
            Self::Private => Self::Fileprivate,
            Self::Fileprivate => Self::Internal,
            Self::Internal => Self::Package,
            Self::Package => Self::Public,
            Self::Public | Self::Open => Self::Open,
        }
    }

    /// One step narrower, saturating at `private`
    pub fn decrease(self) -> Self {
        match self {
            Self::Private | Self::Fileprivate => Self::Private,
            Self::Internal => Self::Fileprivate,
            Self::Package => Self::Internal,
            Self::Public => Self::Package,
            Self::Open => Self::Public,
        }
    }
}

/// Display name as shown in command titles
impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Private => "Private",
            Self::Fileprivate => "Fileprivate",
            Self::Internal => "Internal",
            Self::Package => "Package",
            Self::Public => "Public",
            Self::Open => "Open",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access level `{0}`")]
pub struct UnknownAccessLevel(pub String);

/// Parses the source keyword (`fileprivate`, `open`, ...)
impl FromStr for AccessLevel {
    type Err = UnknownAccessLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownAccessLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_matches_order() {
        let ranks: Vec<_> = AccessLevel::ALL.iter().map(|l| l.rank()).collect();
        assert_eq!(ranks, [-2, -1, 0, 1, 2, 3]);
        assert!(AccessLevel::Private < AccessLevel::Open);
    }

    #[test]
    fn test_neighbours_saturate() {
        assert_eq!(AccessLevel::Open.increase(), AccessLevel::Open);
        assert_eq!(AccessLevel::Private.decrease(), AccessLevel::Private);
        assert_eq!(AccessLevel::Internal.increase(), AccessLevel::Package);
        assert_eq!(AccessLevel::Public.decrease(), AccessLevel::Package);
    }

    #[test]
    fn test_keyword_round_trip() {
        for level in AccessLevel::ALL {
            assert_eq!(AccessLevel::for_keyword(level.keyword()), Some(level));
            assert_eq!(level.as_str().parse::<AccessLevel>(), Ok(level));
        }
        assert_eq!(AccessLevel::for_keyword(SyntaxKind::STATIC_KW), None);
        assert!("Public".parse::<AccessLevel>().is_err());
    }
}
