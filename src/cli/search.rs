//! `td search` command implementation

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::query;

#[derive(Args)]
pub struct SearchArgs {
    /// Term to match against title, description, and category
    pub term: String,
}

pub fn run(file: Option<PathBuf>, args: SearchArgs) -> Result<()> {
    if args.term.trim().is_empty() {
        bail!("Search term cannot be empty");
    }

    let store = super::open_store(file)?;
    let matches = query::search(store.tasks(), args.term.trim());

    if matches.is_empty() {
        println!("No matching tasks found.");
        return Ok(());
    }

    super::print_task_lines(&matches);
    println!("\n{} match(es)", matches.len());

    Ok(())
}
