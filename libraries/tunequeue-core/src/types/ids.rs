/// ID types for TuneQueue entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Song identifier
///
/// Unique and stable within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a new song ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SongId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for SongId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_inner() {
        let id = SongId::new("42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn numeric_ids_convert() {
        assert_eq!(SongId::from(7u32), SongId::new("7"));
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&SongId::new("s1")).unwrap();
        assert_eq!(json, "\"s1\"");
    }
}
