use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("item id cannot be empty")]
pub struct EmptyItemId;

/// Unique identifier for an Item.
///
/// Catalog documents are keyed by opaque strings, so the id is string-backed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new `ItemId` from a trimmed, non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `EmptyItemId` if the value is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyItemId> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyItemId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = EmptyItemId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl FromStr for ItemId {
    type Err = EmptyItemId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({:?})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_trims_and_rejects_blank() {
        assert_eq!(ItemId::new("  abc ").unwrap().as_str(), "abc");
        assert_eq!(ItemId::new("   "), Err(EmptyItemId));
    }

    #[test]
    fn item_id_display_and_debug() {
        let id: ItemId = "sk1".parse().unwrap();
        assert_eq!(format!("{id}"), "sk1");
        assert_eq!(format!("{id:?}"), "ItemId(\"sk1\")");
    }
}
