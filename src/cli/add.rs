//! `td add` command implementation

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::task::Task;

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,

    /// Priority (low, medium, high)
    #[arg(short, long, default_value = "medium")]
    pub priority: String,

    /// Due date (YYYY-MM-DD)
    #[arg(short, long)]
    pub due: Option<String>,

    /// Category label
    #[arg(short, long, default_value = "general")]
    pub category: String,

    /// Longer description
    #[arg(long)]
    pub description: Option<String>,

    /// Color tag
    #[arg(long)]
    pub color: Option<String>,
}

pub fn run(file: Option<PathBuf>, args: AddArgs) -> Result<()> {
    let mut store = super::open_store(file)?;

    let mut task = Task::new(&args.title);
    task.priority = super::parse_priority(&args.priority)?;
    task.due_date = args.due.as_deref().map(parse_due).transpose()?;
    // Blank category falls back to the default, as the menu does.
    let category = args.category.trim();
    if !category.is_empty() {
        task.category = category.to_string();
    }
    task.description = args.description;
    task.color = args.color;

    store.add(task)?;
    let number = store.len();
    if let Some(added) = store.tasks().last() {
        println!("Added: {}", added.display_line(number));
    }

    Ok(())
}

pub(super) fn parse_due(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}' (expected YYYY-MM-DD)", s))
}
