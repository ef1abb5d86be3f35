//! CLI command implementations

pub mod add;
pub mod definition;
pub mod export;
pub mod list;
pub mod menu;
pub mod remove;
pub mod search;
pub mod stats;
pub mod toggle;
pub mod update;

pub use definition::{Cli, Commands};

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::store::{LoadReport, Store, StoreError};
use crate::task::{Priority, Task};

/// Open the store at the given path (or the default location), warning on
/// stderr if the data file needed recovery.
pub fn open_store(file: Option<PathBuf>) -> Result<Store> {
    let path = file.unwrap_or_else(Store::default_path);
    let store = Store::open(path)?;

    match store.load_report() {
        LoadReport::Clean => {}
        LoadReport::Recovered { backup } => {
            eprintln!(
                "Warning: task file was unreadable; restored from backup {}",
                backup.display()
            );
        }
        LoadReport::Corrupt { detail } => {
            eprintln!(
                "Warning: task file is corrupt and no usable backup was found ({}); starting empty",
                detail
            );
        }
    }

    Ok(store)
}

/// Convert a 1-based task number from the command line into a store index.
pub fn to_index(number: usize) -> Result<usize> {
    match number.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Task numbers start at 1"),
    }
}

/// Parse a priority argument, surfacing the store's validation error kind.
pub fn parse_priority(s: &str) -> Result<Priority, StoreError> {
    Priority::parse(s).ok_or_else(|| StoreError::InvalidPriority(s.to_string()))
}

/// Print numbered task lines, or a placeholder when nothing matched.
pub fn print_task_lines(pairs: &[(usize, &Task)]) {
    if pairs.is_empty() {
        println!("No tasks match.");
        return;
    }
    for (index, task) in pairs {
        println!("{}", task.display_line(index + 1));
    }
}
