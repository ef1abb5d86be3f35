//! `td export` command implementation

use anyhow::{bail, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::export::{export_csv, export_txt};
use crate::task::Task;

#[derive(Args)]
pub struct ExportArgs {
    /// Export format (csv or txt)
    pub format: String,

    /// Output path (default: tasks_export.csv / tasks_export.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(file: Option<PathBuf>, args: ExportArgs) -> Result<()> {
    let store = super::open_store(file)?;
    let path = write_export(store.tasks(), &args.format, args.output)?;
    println!("Exported {} task(s) to {}", store.len(), path.display());
    Ok(())
}

/// Shared by the subcommand and the interactive menu.
pub(super) fn write_export(
    tasks: &[Task],
    format: &str,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    match format.trim().to_lowercase().as_str() {
        "csv" => {
            let path = output.unwrap_or_else(|| PathBuf::from("tasks_export.csv"));
            export_csv(tasks, Path::new(&path))?;
            Ok(path)
        }
        "txt" | "text" => {
            let path = output.unwrap_or_else(|| PathBuf::from("tasks_export.txt"));
            export_txt(tasks, Path::new(&path))?;
            Ok(path)
        }
        other => bail!("Unknown export format '{}' (expected csv or txt)", other),
    }
}
