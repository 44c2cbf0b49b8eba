//! # Command-Line Interface
//!
//! Front ends over the [`ItemStore`](crate::domain::ItemStore).
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `shop` / `shop tui` | Interactive terminal UI |
//! | `shop replay <FILE>` | Apply recorded JSON Lines actions and print the list |
//!
//! ## Output Formats
//!
//! `replay` supports the `--format` flag:
//! - `text` (default) - Human-readable table
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the config file.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! shop --verbose replay actions.jsonl
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod replay;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use replay::{replay, Rejection, ReplayError, ReplayReport};
