//! Shopping item domain model
//!
//! An item is pure data: its id, label and count. Whether an item is
//! currently being edited is tracked by the store, not by the item.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Item ID, assigned by the store from a monotonically increasing counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// Wraps a raw id value
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw id value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One shopping-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
        }
    }
}
