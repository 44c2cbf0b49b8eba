//! Domain models for the shopping list
//!
//! Contains the list store and its data types without any I/O concerns.

mod action;
mod item;
mod quantity;
mod store;

pub use action::{Action, Applied};
pub use item::{Item, ItemId};
pub use quantity::{parse_lenient, parse_strict, ValidationError, FALLBACK_QUANTITY};
pub use store::{ItemStore, ItemView, ListActions, ListenerId, Snapshot};
