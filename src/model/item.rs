//! Requesters.

use std::fmt;

/// Index of an [`Item`] inside its topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(usize);

impl ItemId {
    /// Wraps an arena index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the topology's item list.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A requester competing for resource time.
///
/// Items carry only a name. Two items are the same requester exactly when
/// their [`ItemId`]s are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    name: String,
}

impl Item {
    /// Creates an item with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Item name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
