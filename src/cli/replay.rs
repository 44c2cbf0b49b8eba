//! Replay recorded actions against an empty list
//!
//! Input is JSON Lines, one [`Action`] per line. Blank lines and lines
//! starting with `#` are skipped. Adds that fail validation are reported
//! and skipped, the same way the add dialog stays open without creating
//! an item; a line that is not a valid action aborts the replay.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use super::output::Output;
use crate::domain::{Action, Applied, ItemStore, Snapshot, ValidationError};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Line {line}: invalid action: {source}")]
    InvalidAction {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read actions: {0}")]
    Io(#[from] io::Error),
}

/// An action the store refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub line: usize,
    pub op: &'static str,
    pub error: String,
}

impl Rejection {
    fn new(line: usize, action: &Action, error: &ValidationError) -> Self {
        Self {
            line,
            op: action.label(),
            error: error.to_string(),
        }
    }
}

/// Outcome of a replay
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Actions that changed the list
    pub applied: usize,
    /// Actions that targeted a missing item
    pub unchanged: usize,
    pub rejected: Vec<Rejection>,
}

/// Applies every action from `reader` to `store` in order
pub fn replay<R: BufRead>(store: &mut ItemStore, reader: R) -> Result<ReplayReport, ReplayError> {
    let mut report = ReplayReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let action: Action = serde_json::from_str(trimmed).map_err(|source| {
            ReplayError::InvalidAction {
                line: line_no,
                source,
            }
        })?;

        match store.apply(&action) {
            Ok(Applied::Added(_)) | Ok(Applied::Changed) => report.applied += 1,
            Ok(Applied::Unchanged) => report.unchanged += 1,
            Err(e) => report.rejected.push(Rejection::new(line_no, &action, &e)),
        }
    }

    Ok(report)
}

/// Runs the `replay` command
pub fn run(output: &Output, input: &str) -> Result<()> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file =
            File::open(input).with_context(|| format!("Failed to open action file: {}", input))?;
        Box::new(BufReader::new(file))
    };

    let mut store = ItemStore::new();
    if output.is_verbose() {
        let log = output.clone();
        store.subscribe(move |snapshot| {
            log.verbose_ctx(
                "store",
                &format!(
                    "v{}: {} item(s), editing {:?}",
                    snapshot.version(),
                    snapshot.len(),
                    snapshot.editing().map(|id| id.get())
                ),
            );
        });
    }

    let report = replay(&mut store, reader).context("Replay aborted")?;
    output.verbose_ctx(
        "replay",
        &format!(
            "applied={} unchanged={} rejected={}",
            report.applied,
            report.unchanged,
            report.rejected.len()
        ),
    );

    let snapshot = store.snapshot();
    if output.is_json() {
        output.data(&serde_json::json!({
            "items": snapshot.views(),
            "editing": snapshot.editing(),
            "applied": report.applied,
            "unchanged": report.unchanged,
            "rejected": report.rejected,
        }));
    } else {
        for rejection in &report.rejected {
            output.error(&format!(
                "line {}: {} rejected: {}",
                rejection.line, rejection.op, rejection.error
            ));
        }
        print_list(&snapshot);
        output.blank();
        output.success(&format!(
            "Applied {} action(s), {} rejected",
            report.applied,
            report.rejected.len()
        ));
    }

    Ok(())
}

fn print_list(snapshot: &Snapshot) {
    if snapshot.is_empty() {
        println!("Shopping list is empty");
        return;
    }

    println!("{:<6} {:<30} {:>5}", "ID", "NAME", "QTY");
    println!("{}", "-".repeat(43));
    for view in snapshot.views() {
        let marker = if view.editing { "  (editing)" } else { "" };
        println!("{:<6} {:<30} {:>5}{}", view.id, view.name, view.quantity, marker);
    }
}
