//! `td stats` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::query;

#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(file: Option<PathBuf>, args: StatsArgs) -> Result<()> {
    let store = super::open_store(file)?;
    let stats = query::statistics(store.tasks());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Task statistics");
    println!("Total tasks: {}", stats.total);
    println!(
        "Completed: {} ({:.1}%)",
        stats.completed,
        stats.completion_rate * 100.0
    );
    println!("Pending: {}", stats.pending);

    println!("\nBy priority:");
    for (priority, count) in &stats.by_priority {
        println!("  {}: {}", priority, count);
    }

    if !stats.by_category.is_empty() {
        println!("\nBy category:");
        for (category, count) in &stats.by_category {
            println!("  {}: {}", category, count);
        }
    }

    Ok(())
}
