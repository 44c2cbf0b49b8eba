//! Serializable store actions
//!
//! One JSON object per action, tagged by `op`:
//!
//! ```text
//! {"op":"add","name":"Milk","quantity":"2"}
//! {"op":"begin_edit","id":1}
//! {"op":"commit_edit","id":1,"name":"Bread","quantity":"3"}
//! {"op":"cancel_edit"}
//! {"op":"delete","id":1}
//! ```
//!
//! Quantities are carried as text because parsing them is part of the
//! operation being recorded.

use serde::{Deserialize, Serialize};

use super::item::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    Add {
        name: String,
        quantity: String,
    },
    BeginEdit {
        id: ItemId,
    },
    CommitEdit {
        id: ItemId,
        name: String,
        quantity: String,
    },
    CancelEdit,
    Delete {
        id: ItemId,
    },
}

impl Action {
    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Action::Add { .. } => "add",
            Action::BeginEdit { .. } => "begin_edit",
            Action::CommitEdit { .. } => "commit_edit",
            Action::CancelEdit => "cancel_edit",
            Action::Delete { .. } => "delete",
        }
    }
}

/// Result of applying an action that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A new item was appended
    Added(ItemId),
    /// An existing item or the editing state changed
    Changed,
    /// Nothing matched; the store is untouched
    Unchanged,
}
