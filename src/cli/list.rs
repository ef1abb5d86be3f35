//! `td list` command implementation

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::query::{self, SortKey};
use crate::task::Task;

#[derive(Args)]
pub struct ListArgs {
    /// Show only completed tasks
    #[arg(long, conflicts_with = "pending")]
    pub completed: bool,

    /// Show only pending tasks
    #[arg(long)]
    pub pending: bool,

    /// Filter by priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Filter by category (exact, case-insensitive)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort by key (due-date, priority, title, category)
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(file: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let store = super::open_store(file)?;
    let tasks = store.tasks();

    let mut view: Vec<(usize, &Task)> = tasks.iter().enumerate().collect();

    if args.completed || args.pending {
        let keep = query::filter_by_status(tasks, args.completed);
        retain_matching(&mut view, &keep);
    }

    if let Some(priority) = &args.priority {
        let priority = super::parse_priority(priority)?;
        let keep = query::filter_by_priority(tasks, priority);
        retain_matching(&mut view, &keep);
    }

    if let Some(category) = &args.category {
        let keep = query::filter_by_category(tasks, category);
        retain_matching(&mut view, &keep);
    }

    if let Some(sort) = &args.sort {
        let Some(key) = SortKey::parse(sort) else {
            bail!("Unknown sort key '{}' (expected due-date, priority, title, or category)", sort);
        };
        let order = query::sorted_by(tasks, key);
        reorder_matching(&mut view, &order);
    }

    if args.json {
        let selected: Vec<&Task> = view.iter().map(|(_, t)| *t).collect();
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No tasks in your list.");
        return Ok(());
    }

    super::print_task_lines(&view);
    println!("\nTotal: {} of {} task(s)", view.len(), store.len());

    Ok(())
}

/// Keep only entries whose original index also appears in `keep`.
fn retain_matching(view: &mut Vec<(usize, &Task)>, keep: &[(usize, &Task)]) {
    view.retain(|(i, _)| keep.iter().any(|(k, _)| k == i));
}

/// Rearrange the view to follow `order`, dropping nothing.
fn reorder_matching<'a>(view: &mut Vec<(usize, &'a Task)>, order: &[(usize, &'a Task)]) {
    let mut reordered = Vec::with_capacity(view.len());
    for (i, task) in order {
        if view.iter().any(|(v, _)| v == i) {
            reordered.push((*i, *task));
        }
    }
    *view = reordered;
}
