//! `td remove` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct RemoveArgs {
    /// Task number (1-based, as shown by `td list`)
    pub number: usize,
}

pub fn run(file: Option<PathBuf>, args: RemoveArgs) -> Result<()> {
    let mut store = super::open_store(file)?;
    let index = super::to_index(args.number)?;

    let removed = store.delete(index)?;
    println!("Removed: {}", removed.title);

    Ok(())
}
