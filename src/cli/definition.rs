//! Top-level clap definition for the `td` binary

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::{add, export, list, remove, search, stats, toggle, update};

#[derive(Parser)]
#[command(
    name = "td",
    about = "Local task tracker with JSON persistence and timestamped backups",
    version
)]
pub struct Cli {
    /// Path to the tasks file (default: ~/.taskdeck/tasks.json)
    #[arg(long, global = true, env = "TASKDECK_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(add::AddArgs),

    /// List tasks, with optional filters and sorting
    List(list::ListArgs),

    /// Update fields of an existing task
    Update(update::UpdateArgs),

    /// Remove a task
    Remove(remove::RemoveArgs),

    /// Toggle a task between pending and completed
    Toggle(toggle::ToggleArgs),

    /// Search tasks by keyword
    Search(search::SearchArgs),

    /// Show task statistics
    Stats(stats::StatsArgs),

    /// Export tasks to CSV or a text listing
    Export(export::ExportArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
