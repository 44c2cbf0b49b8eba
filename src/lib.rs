//! Shopping List - an in-memory shopping list with a terminal UI
//!
//! The [`ItemStore`] owns an ordered list of items and exposes add, inline
//! edit and delete operations. The terminal UI and the `replay` command are
//! thin front ends that render its snapshots and call its operations.

pub mod domain;
pub mod config;
pub mod cli;

pub use domain::{Action, Item, ItemId, ItemStore, ListActions, Snapshot, ValidationError};
