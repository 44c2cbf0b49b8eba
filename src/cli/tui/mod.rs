//! Interactive terminal UI
//!
//! Renders the shopping list with ratatui and turns key presses into
//! store operations.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::Output;
use crate::config::Config;
use crate::domain::ItemStore;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, config: &Config) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    let mut app = App::new(ItemStore::new(), config);
    let mut terminal = ui::init_terminal()?;
    let events = EventHandler::new(Duration::from_millis(config.tick_rate_ms));

    // Restore the terminal even if drawing or a handler panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            output.verbose_ctx("tui", "Terminal restored");
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
