//! TUI application state and logic
//!
//! The app owns the text typed into the add dialog and the inline editor.
//! Everything else it shows comes from the latest store snapshot, which is
//! refreshed whenever the store reports a change.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::config::Config;
use crate::domain::{Item, ItemId, ItemStore, ListActions, Snapshot};

const HELP: &str = "j/k:move a:add e:edit d:delete q:quit";

/// Which text field of a form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Quantity,
}

impl Field {
    fn toggle(self) -> Self {
        match self {
            Field::Name => Field::Quantity,
            Field::Quantity => Field::Name,
        }
    }
}

/// Name and quantity text being typed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Form {
    pub name: String,
    pub quantity: String,
    pub field: Field,
}

impl Form {
    fn active_mut(&mut self) -> &mut String {
        match self.field {
            Field::Name => &mut self.name,
            Field::Quantity => &mut self.quantity,
        }
    }

    /// Applies a text editing key; returns false if the key is not for the form
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = self.field.toggle();
            }
            KeyCode::Backspace => {
                self.active_mut().pop();
            }
            KeyCode::Char(c) => {
                self.active_mut().push(c);
            }
            _ => return false,
        }
        true
    }
}

/// The add-item dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddDialog {
    pub form: Form,
    /// Why the last submit was rejected
    pub error: Option<String>,
}

/// Inline editor state for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub id: ItemId,
    pub form: Form,
}

/// Confirmation actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete(ItemId),
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Adding(AddDialog),
    Editing(Editor),
    Confirm(ConfirmAction),
}

/// Application state
pub struct App {
    /// The list, reached only through its operations
    store: Box<dyn ListActions>,

    /// Set by the store listener when the list changed
    changed: Rc<Cell<bool>>,

    /// What the views render
    snapshot: Snapshot,

    /// Selected row
    selected: usize,

    input_mode: InputMode,

    status_message: Option<String>,

    should_quit: bool,

    confirm_delete: bool,

    default_quantity: String,
}

impl App {
    pub fn new(mut store: ItemStore, config: &Config) -> Self {
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        store.subscribe(move |_| flag.set(true));

        let snapshot = store.snapshot();

        Self {
            store: Box::new(store),
            changed,
            snapshot,
            selected: 0,
            input_mode: InputMode::Normal,
            status_message: None,
            should_quit: false,
            confirm_delete: config.confirm_delete,
            default_quantity: config.default_quantity.clone(),
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        let mut redraw = true;

        while !self.should_quit {
            if redraw {
                terminal.draw(|frame| views::list::draw(frame, self))?;
            }

            redraw = match events.next()? {
                Event::Key(key) => {
                    self.handle_key(key);
                    true
                }
                Event::Resize => true,
                Event::Tick => false,
            };
        }

        Ok(())
    }

    /// Handle key events
    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key.code),
            InputMode::Adding(_) => self.handle_add_key(key.code),
            InputMode::Editing(_) => self.handle_edit_key(key.code),
            InputMode::Confirm(_) => self.handle_confirm_key(key.code),
        }

        self.sync();
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Char('a') => {
                self.input_mode = InputMode::Adding(AddDialog {
                    form: Form {
                        quantity: self.default_quantity.clone(),
                        ..Form::default()
                    },
                    error: None,
                });
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                self.begin_edit();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(item) = self.selected_item() {
                    let id = item.id;
                    if self.confirm_delete {
                        self.input_mode = InputMode::Confirm(ConfirmAction::Delete(id));
                    } else {
                        self.delete(id);
                    }
                }
            }
            KeyCode::Char('?') => {
                self.status_message = Some(HELP.to_string());
            }
            _ => {}
        }
    }

    /// Handle keys in the add dialog
    fn handle_add_key(&mut self, code: KeyCode) {
        let InputMode::Adding(dialog) = &mut self.input_mode else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => match self.store.add(&dialog.form.name, &dialog.form.quantity) {
                Ok(id) => {
                    self.status_message = Some(format!("Added: {}", dialog.form.name));
                    self.input_mode = InputMode::Normal;
                    self.sync();
                    if let Some(index) = self.snapshot.position(id) {
                        self.selected = index;
                    }
                }
                Err(e) => {
                    dialog.error = Some(e.to_string());
                }
            },
            other => {
                if dialog.form.handle_key(other) {
                    dialog.error = None;
                }
            }
        }
    }

    /// Handle keys in the inline editor
    fn handle_edit_key(&mut self, code: KeyCode) {
        let InputMode::Editing(editor) = &mut self.input_mode else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.store.cancel_edit();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                let (id, name, quantity) = (editor.id, &editor.form.name, &editor.form.quantity);
                if self.store.commit_edit(id, name, quantity) {
                    self.status_message = Some(format!("Saved: {}", name));
                }
                self.input_mode = InputMode::Normal;
            }
            other => {
                editor.form.handle_key(other);
            }
        }
    }

    /// Handle keys in confirm mode
    fn handle_confirm_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let InputMode::Confirm(ConfirmAction::Delete(id)) = self.input_mode {
                    self.delete(id);
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// Open the inline editor on the selected item
    fn begin_edit(&mut self) {
        let Some(item) = self.selected_item().cloned() else {
            return;
        };

        self.store.begin_edit(item.id);
        self.input_mode = InputMode::Editing(Editor {
            id: item.id,
            form: Form {
                name: item.name,
                quantity: item.quantity.to_string(),
                field: Field::Name,
            },
        });
    }

    fn delete(&mut self, id: ItemId) {
        let name = self.snapshot.get(id).map(|item| item.name.clone());
        if self.store.delete(id) {
            self.status_message = name.map(|name| format!("Deleted: {}", name));
        }
    }

    /// Pick up the latest snapshot if the store changed
    fn sync(&mut self) {
        if self.changed.replace(false) {
            self.snapshot = self.store.snapshot();
            if self.selected >= self.snapshot.len() {
                self.selected = self.snapshot.len().saturating_sub(1);
            }
        }
    }

    fn move_selection_down(&mut self) {
        if !self.snapshot.is_empty() {
            self.selected = (self.selected + 1) % self.snapshot.len();
        }
    }

    fn move_selection_up(&mut self) {
        if !self.snapshot.is_empty() {
            self.selected = if self.selected == 0 {
                self.snapshot.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    // Public accessors for views

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.snapshot.items().get(self.selected)
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// The editor form if `id` is the item being edited
    pub fn editor_for(&self, id: ItemId) -> Option<&Form> {
        match &self.input_mode {
            InputMode::Editing(editor) if editor.id == id && self.snapshot.is_editing(id) => {
                Some(&editor.form)
            }
            _ => None,
        }
    }
}
