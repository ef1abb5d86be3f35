//! `td toggle` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ToggleArgs {
    /// Task number (1-based, as shown by `td list`)
    pub number: usize,
}

pub fn run(file: Option<PathBuf>, args: ToggleArgs) -> Result<()> {
    let mut store = super::open_store(file)?;
    let index = super::to_index(args.number)?;

    let completed = store.toggle_complete(index)?;
    let state = if completed { "completed" } else { "pending" };
    println!("Task {} marked as {}", args.number, state);

    Ok(())
}
