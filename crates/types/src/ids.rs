//! Newtype wrapper for element identity.
//!
//! Identities are assigned by the editing layer, never by the renderers. They
//! travel with an element through every projection so selection can follow a
//! node across re-renders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier for one element of a content tree.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Creates a new ElementId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this element ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_creation() {
        let id1 = ElementId::new("el-1");
        let id2 = ElementId::from("el-1");
        let id3 = ElementId::from(String::from("el-1"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "el-1");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ElementId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: ElementId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }
}
