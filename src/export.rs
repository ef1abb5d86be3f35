//! Export the task collection to CSV or a plain-text listing.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::task::Task;

const CSV_HEADER: [&str; 7] = [
    "title",
    "completed",
    "priority",
    "due_date",
    "category",
    "description",
    "color",
];

/// Write one CSV row per task, header included. Optional fields render as
/// empty cells.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for task in tasks {
        writer.write_record([
            task.title.clone(),
            task.completed.to_string(),
            task.priority.label().to_string(),
            task.due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            task.category.clone(),
            task.description.clone().unwrap_or_default(),
            task.color.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write one human-readable line per task, mirroring the list display.
pub fn export_txt(tasks: &[Task], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for (i, task) in tasks.iter().enumerate() {
        writeln!(writer, "{}", task.display_line(i + 1))?;
    }

    writer.flush()?;
    Ok(())
}
