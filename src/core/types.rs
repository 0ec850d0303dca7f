use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumIter;
use thiserror::Error;

/// One of the two record collections the backend serves
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    #[default]
    Issues,
    Events,
}

impl DatasetKind {
    /// Endpoint path segment relative to the service root
    pub fn path(&self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::Events => "events",
        }
    }

    /// Human-readable title used for headings and status text
    pub fn title(&self) -> &'static str {
        match self {
            Self::Issues => "Issues",
            Self::Events => "Events",
        }
    }

    /// Slot index for per-kind storage
    pub fn index(&self) -> usize {
        match self {
            Self::Issues => 0,
            Self::Events => 1,
        }
    }

    /// The kind that is not this one
    pub fn other(&self) -> Self {
        match self {
            Self::Issues => Self::Events,
            Self::Events => Self::Issues,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for DatasetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "issues" => Ok(Self::Issues),
            "events" => Ok(Self::Events),
            _ => Err(CoreError::InvalidKind(s.to_string())),
        }
    }
}

/// Errors raised by the session core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown dataset kind '{0}' (expected 'issues' or 'events')")]
    InvalidKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_parsing() {
        assert_eq!(DatasetKind::from_str("issues").unwrap(), DatasetKind::Issues);
        assert_eq!(DatasetKind::from_str(" Events ").unwrap(), DatasetKind::Events);

        let err = DatasetKind::from_str("devices").unwrap_err();
        assert_eq!(err, CoreError::InvalidKind("devices".to_string()));
    }

    #[test]
    fn test_kind_paths_are_distinct() {
        let paths: Vec<_> = DatasetKind::iter().map(|k| k.path()).collect();
        assert_eq!(paths, vec!["issues", "events"]);
        assert_eq!(DatasetKind::Issues.other(), DatasetKind::Events);
        assert_eq!(DatasetKind::Events.to_string(), "events");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&DatasetKind::Events).unwrap();
        assert_eq!(json, "\"events\"");

        let restored: DatasetKind = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, DatasetKind::Events);
    }
}
