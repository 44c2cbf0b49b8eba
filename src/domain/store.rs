//! Item list store
//!
//! [`ItemStore`] owns the canonical list of items. Every mutation goes
//! through one of its operations, runs to completion, and (when something
//! actually changed) publishes a fresh [`Snapshot`] to subscribed listeners.
//!
//! Targets that do not exist are silent no-ops: the operation reports
//! `false` / [`Applied::Unchanged`] and no listener fires.

use std::rc::Rc;

use serde::Serialize;

use super::action::{Action, Applied};
use super::item::{Item, ItemId};
use super::quantity::{self, ValidationError};

/// Handle returned by [`ItemStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Box<dyn FnMut(&Snapshot)>;

/// Immutable view of the list at one point in time
///
/// Cloning is cheap; the item vector is shared until the store next mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    items: Rc<Vec<Item>>,
    editing: Option<ItemId>,
    version: u64,
}

impl Snapshot {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The item whose inline editor is open, if any
    pub fn editing(&self) -> Option<ItemId> {
        self.editing
    }

    /// Increases by one on every state change
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_editing(&self, id: ItemId) -> bool {
        self.editing == Some(id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items with their editing flag resolved, for rendering and export
    pub fn views(&self) -> Vec<ItemView<'_>> {
        self.items
            .iter()
            .map(|item| ItemView {
                id: item.id,
                name: &item.name,
                quantity: item.quantity,
                editing: self.is_editing(item.id),
            })
            .collect()
    }
}

/// An item as the view layer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView<'a> {
    pub id: ItemId,
    pub name: &'a str,
    pub quantity: u32,
    pub editing: bool,
}

/// Operations the view layer may invoke on the list
pub trait ListActions {
    fn snapshot(&self) -> Snapshot;

    fn add(&mut self, name: &str, quantity: &str) -> Result<ItemId, ValidationError>;

    fn begin_edit(&mut self, id: ItemId) -> bool;

    fn commit_edit(&mut self, id: ItemId, name: &str, quantity: &str) -> bool;

    fn cancel_edit(&mut self) -> bool;

    fn delete(&mut self, id: ItemId) -> bool;
}

/// Sole owner of the shopping list
pub struct ItemStore {
    items: Rc<Vec<Item>>,
    editing: Option<ItemId>,
    next_id: u32,
    version: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: usize,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("items", &self.items)
            .field("editing", &self.editing)
            .field("next_id", &self.next_id)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ItemStore {
    /// Creates an empty store; the first item gets id 1
    pub fn new() -> Self {
        Self {
            items: Rc::new(Vec::new()),
            editing: None,
            next_id: 1,
            version: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: Rc::clone(&self.items),
            editing: self.editing,
            version: self.version,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Registers a listener called after every state change
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != len_before
    }

    /// Appends a new item
    ///
    /// The name must contain something other than whitespace and the
    /// quantity must be a non-negative whole number. On error the list is
    /// left untouched.
    pub fn add(&mut self, name: &str, quantity: &str) -> Result<ItemId, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        let quantity = quantity::parse_strict(quantity)?;

        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        Rc::make_mut(&mut self.items).push(Item::new(id, name, quantity));
        self.publish();
        Ok(id)
    }

    /// Opens the inline editor on one item, closing it on any other
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        if self.editing == Some(id) || self.get(id).is_none() {
            return false;
        }
        self.editing = Some(id);
        self.publish();
        true
    }

    /// Saves an inline edit and closes the editor
    ///
    /// Unparseable quantity text becomes 1.
    pub fn commit_edit(&mut self, id: ItemId, name: &str, quantity: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };

        let item = &mut Rc::make_mut(&mut self.items)[index];
        item.name = name.to_string();
        item.quantity = quantity::parse_lenient(quantity);
        self.editing = None;
        self.publish();
        true
    }

    /// Closes the inline editor without saving
    pub fn cancel_edit(&mut self) -> bool {
        if self.editing.take().is_none() {
            return false;
        }
        self.publish();
        true
    }

    pub fn delete(&mut self, id: ItemId) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };

        Rc::make_mut(&mut self.items).remove(index);
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.publish();
        true
    }

    /// Dispatches a recorded action
    pub fn apply(&mut self, action: &Action) -> Result<Applied, ValidationError> {
        let changed = match action {
            Action::Add { name, quantity } => return self.add(name, quantity).map(Applied::Added),
            Action::BeginEdit { id } => self.begin_edit(*id),
            Action::CommitEdit { id, name, quantity } => self.commit_edit(*id, name, quantity),
            Action::CancelEdit => self.cancel_edit(),
            Action::Delete { id } => self.delete(*id),
        };

        Ok(if changed {
            Applied::Changed
        } else {
            Applied::Unchanged
        })
    }

    fn publish(&mut self) {
        self.version += 1;
        let snapshot = self.snapshot();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

impl ListActions for ItemStore {
    fn snapshot(&self) -> Snapshot {
        ItemStore::snapshot(self)
    }

    fn add(&mut self, name: &str, quantity: &str) -> Result<ItemId, ValidationError> {
        ItemStore::add(self, name, quantity)
    }

    fn begin_edit(&mut self, id: ItemId) -> bool {
        ItemStore::begin_edit(self, id)
    }

    fn commit_edit(&mut self, id: ItemId, name: &str, quantity: &str) -> bool {
        ItemStore::commit_edit(self, id, name, quantity)
    }

    fn cancel_edit(&mut self) -> bool {
        ItemStore::cancel_edit(self)
    }

    fn delete(&mut self, id: ItemId) -> bool {
        ItemStore::delete(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn id(n: u32) -> ItemId {
        ItemId::new(n)
    }

    fn store_with(names: &[&str]) -> ItemStore {
        let mut store = ItemStore::new();
        for name in names {
            store.add(name, "1").unwrap();
        }
        store
    }

    // ==========================================================================
    // add
    // ==========================================================================

    #[test]
    fn add_to_empty_list() {
        let mut store = ItemStore::new();
        let new_id = store.add("Milk", "2").unwrap();

        let snapshot = store.snapshot();
        assert_eq!(new_id, id(1));
        assert_eq!(snapshot.items(), &[Item::new(id(1), "Milk", 2)]);
        assert!(!snapshot.is_editing(id(1)));
    }

    #[test]
    fn add_blank_name_leaves_list_unchanged() {
        let mut store = store_with(&["Milk"]);
        let before = store.snapshot();

        assert_eq!(store.add("", "2"), Err(ValidationError::BlankName));
        assert_eq!(store.add("   ", "2"), Err(ValidationError::BlankName));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn add_invalid_quantity_is_rejected() {
        let mut store = ItemStore::new();

        assert_eq!(
            store.add("Eggs", "abc"),
            Err(ValidationError::InvalidQuantity("abc".to_string()))
        );
        assert!(store.add("Eggs", "-1").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn add_blank_name_wins_over_bad_quantity() {
        let mut store = ItemStore::new();
        assert_eq!(store.add(" ", "abc"), Err(ValidationError::BlankName));
    }

    #[test]
    fn add_preserves_insertion_order() {
        let store = store_with(&["Milk", "Eggs", "Bread"]);
        let names: Vec<_> = store.snapshot().items().iter().map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["Milk", "Eggs", "Bread"]);
    }

    #[test]
    fn add_allows_duplicate_names() {
        let store = store_with(&["Milk", "Milk"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = store_with(&["a", "b", "c"]);
        assert!(store.delete(id(3)));

        let new_id = store.add("d", "1").unwrap();
        assert_eq!(new_id, id(4));
    }

    // ==========================================================================
    // begin_edit / commit_edit / cancel_edit
    // ==========================================================================

    #[test]
    fn begin_edit_marks_only_target() {
        let mut store = store_with(&["Milk"]);
        let before = store.snapshot();

        assert!(store.begin_edit(id(1)));

        let after = store.snapshot();
        assert!(after.is_editing(id(1)));
        assert_eq!(after.items(), before.items());
    }

    #[test]
    fn begin_edit_moves_editor_between_items() {
        let mut store = store_with(&["Milk", "Eggs"]);
        store.begin_edit(id(1));
        store.begin_edit(id(2));

        let snapshot = store.snapshot();
        assert!(!snapshot.is_editing(id(1)));
        assert!(snapshot.is_editing(id(2)));
    }

    #[test]
    fn begin_edit_is_idempotent() {
        let mut store = store_with(&["Milk"]);
        store.begin_edit(id(1));
        let once = store.snapshot();

        assert!(!store.begin_edit(id(1)));
        assert_eq!(store.snapshot(), once);
    }

    #[test]
    fn begin_edit_unknown_id_is_noop() {
        let mut store = store_with(&["Milk"]);
        store.begin_edit(id(1));

        assert!(!store.begin_edit(id(99)));
        assert_eq!(store.snapshot().editing(), Some(id(1)));
    }

    #[test]
    fn commit_edit_with_unparseable_quantity_falls_back() {
        let mut store = store_with(&["Milk"]);
        store.begin_edit(id(1));

        assert!(store.commit_edit(id(1), "Bread", "xyz"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items(), &[Item::new(id(1), "Bread", 1)]);
        assert_eq!(snapshot.editing(), None);
    }

    #[test]
    fn commit_edit_updates_name_and_quantity() {
        let mut store = store_with(&["Milk", "Eggs"]);
        store.begin_edit(id(2));
        store.commit_edit(id(2), "Duck eggs", "12");

        assert_eq!(store.get(id(2)), Some(&Item::new(id(2), "Duck eggs", 12)));
        assert_eq!(store.get(id(1)).map(|i| i.name.as_str()), Some("Milk"));
    }

    #[test]
    fn commit_edit_other_item_closes_editor() {
        let mut store = store_with(&["Milk", "Eggs"]);
        store.begin_edit(id(1));

        assert!(store.commit_edit(id(2), "Duck eggs", "6"));
        assert_eq!(store.snapshot().editing(), None);
        assert_eq!(store.get(id(2)), Some(&Item::new(id(2), "Duck eggs", 6)));
        assert_eq!(store.get(id(1)), Some(&Item::new(id(1), "Milk", 1)));
    }

    #[test]
    fn commit_edit_unknown_id_is_noop() {
        let mut store = store_with(&["Milk"]);
        store.begin_edit(id(1));
        let before = store.snapshot();

        assert!(!store.commit_edit(id(5), "Bread", "2"));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn cancel_edit_keeps_item() {
        let mut store = store_with(&["Milk"]);
        store.begin_edit(id(1));

        assert!(store.cancel_edit());
        assert_eq!(store.snapshot().editing(), None);
        assert_eq!(store.get(id(1)), Some(&Item::new(id(1), "Milk", 1)));
        assert!(!store.cancel_edit());
    }

    // ==========================================================================
    // delete
    // ==========================================================================

    #[test]
    fn delete_only_item() {
        let mut store = store_with(&["Milk"]);
        assert!(store.delete(id(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = store_with(&["Milk"]);
        let before = store.snapshot();

        assert!(!store.delete(id(99)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn delete_item_being_edited_closes_editor() {
        let mut store = store_with(&["Milk", "Eggs"]);
        store.begin_edit(id(2));
        store.delete(id(2));

        assert_eq!(store.snapshot().editing(), None);
    }

    #[test]
    fn delete_other_item_keeps_editor_open() {
        let mut store = store_with(&["Milk", "Eggs"]);
        store.begin_edit(id(2));
        store.delete(id(1));

        assert_eq!(store.snapshot().editing(), Some(id(2)));
    }

    // ==========================================================================
    // Snapshots and listeners
    // ==========================================================================

    #[test]
    fn snapshot_is_not_affected_by_later_mutation() {
        let mut store = store_with(&["Milk"]);
        let old = store.snapshot();

        store.commit_edit(id(1), "Oat milk", "3");
        store.add("Eggs", "6").unwrap();

        assert_eq!(old.items(), &[Item::new(id(1), "Milk", 1)]);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn version_only_moves_on_change() {
        let mut store = ItemStore::new();
        assert_eq!(store.snapshot().version(), 0);

        store.add("Milk", "1").unwrap();
        assert_eq!(store.snapshot().version(), 1);

        let _ = store.add("", "1");
        store.delete(id(42));
        assert_eq!(store.snapshot().version(), 1);
    }

    #[test]
    fn listeners_see_each_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = ItemStore::new();

        let sink = Rc::clone(&seen);
        store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.len()));

        store.add("Milk", "1").unwrap();
        store.add("Eggs", "12").unwrap();
        let _ = store.add("Bad", "x");
        store.delete(id(1));
        store.delete(id(1));

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0));
        let mut store = ItemStore::new();

        let sink = Rc::clone(&count);
        let listener = store.subscribe(move |_| *sink.borrow_mut() += 1);
        store.add("Milk", "1").unwrap();

        assert!(store.unsubscribe(listener));
        assert!(!store.unsubscribe(listener));
        store.add("Eggs", "1").unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn views_resolve_editing_flag() {
        let mut store = store_with(&["Milk", "Eggs"]);
        store.begin_edit(id(2));

        let snapshot = store.snapshot();
        let views = snapshot.views();
        assert!(!views[0].editing);
        assert!(views[1].editing);
        assert_eq!(views[1].name, "Eggs");
    }

    // ==========================================================================
    // apply / ListActions
    // ==========================================================================

    #[test]
    fn apply_dispatches_actions() {
        let mut store = ItemStore::new();

        let added = store
            .apply(&Action::Add {
                name: "Milk".to_string(),
                quantity: "2".to_string(),
            })
            .unwrap();
        assert_eq!(added, Applied::Added(id(1)));

        assert_eq!(
            store.apply(&Action::BeginEdit { id: id(1) }),
            Ok(Applied::Changed)
        );
        assert_eq!(
            store.apply(&Action::Delete { id: id(7) }),
            Ok(Applied::Unchanged)
        );
        assert!(store
            .apply(&Action::Add {
                name: "Eggs".to_string(),
                quantity: "lots".to_string(),
            })
            .is_err());
    }

    #[test]
    fn store_works_through_capability_trait() {
        fn shop(actions: &mut dyn ListActions) {
            let milk = actions.add("Milk", "1").unwrap();
            actions.begin_edit(milk);
            actions.commit_edit(milk, "Milk", "4");
        }

        let mut store = ItemStore::new();
        shop(&mut store);
        assert_eq!(store.get(id(1)).map(|i| i.quantity), Some(4));
    }

    // ==========================================================================
    // Properties
    // ==========================================================================

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn action_strategy() -> impl Strategy<Value = Action> {
            let name = "[a-z ]{0,6}";
            let quantity = "(-?[0-9]{1,3}|[a-z]{0,2})";
            let target = (1u32..12).prop_map(ItemId::new);

            prop_oneof![
                (name, quantity).prop_map(|(name, quantity)| Action::Add { name, quantity }),
                target.clone().prop_map(|id| Action::BeginEdit { id }),
                (target.clone(), name, quantity)
                    .prop_map(|(id, name, quantity)| Action::CommitEdit { id, name, quantity }),
                Just(Action::CancelEdit),
                target.prop_map(|id| Action::Delete { id }),
            ]
        }

        proptest! {
            #[test]
            fn length_changes_only_through_add_and_delete(
                actions in proptest::collection::vec(action_strategy(), 0..60)
            ) {
                let mut store = ItemStore::new();

                for action in &actions {
                    let before = store.len();
                    let result = store.apply(action);
                    let after = store.len();

                    match (action, result) {
                        (Action::Add { .. }, Ok(_)) => prop_assert_eq!(after, before + 1),
                        (Action::Delete { .. }, Ok(Applied::Changed)) => {
                            prop_assert_eq!(after + 1, before)
                        }
                        _ => prop_assert_eq!(after, before),
                    }
                }
            }

            #[test]
            fn ids_stay_unique_and_editor_points_at_live_item(
                actions in proptest::collection::vec(action_strategy(), 0..60)
            ) {
                let mut store = ItemStore::new();
                let mut issued = HashSet::new();

                for action in &actions {
                    if let Ok(Applied::Added(new_id)) = store.apply(action) {
                        prop_assert!(issued.insert(new_id), "id {} issued twice", new_id);
                    }

                    let snapshot = store.snapshot();
                    let live: HashSet<_> = snapshot.items().iter().map(|i| i.id).collect();
                    prop_assert_eq!(live.len(), snapshot.len());
                    if let Some(editing) = snapshot.editing() {
                        prop_assert!(live.contains(&editing));
                    }
                }
            }
        }
    }
}
