//! `td update` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::store::TaskPatch;

use super::add::parse_due;

#[derive(Args)]
pub struct UpdateArgs {
    /// Task number (1-based, as shown by `td list`)
    pub number: usize,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// New due date (YYYY-MM-DD; pass an empty string to clear)
    #[arg(short, long)]
    pub due: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New description (empty string to clear)
    #[arg(long)]
    pub description: Option<String>,

    /// New color tag (empty string to clear)
    #[arg(long)]
    pub color: Option<String>,
}

/// Map an optional text argument to a patch entry: absent leaves the field
/// alone, an empty string clears it, anything else sets it.
fn text_patch(arg: Option<String>) -> Option<Option<String>> {
    arg.map(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn run(file: Option<PathBuf>, args: UpdateArgs) -> Result<()> {
    let mut store = super::open_store(file)?;
    let index = super::to_index(args.number)?;

    let due_date = match args.due.as_deref() {
        None => None,
        Some(s) if s.trim().is_empty() => Some(None),
        Some(s) => Some(Some(parse_due(s)?)),
    };

    let patch = TaskPatch {
        title: args.title,
        priority: args.priority.as_deref().map(super::parse_priority).transpose()?,
        due_date,
        category: args.category,
        description: text_patch(args.description),
        color: text_patch(args.color),
    };

    store.update(index, patch)?;
    println!(
        "Updated: {}",
        store.tasks()[index].display_line(args.number)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_patch() {
        assert_eq!(text_patch(None), None);
        assert_eq!(text_patch(Some("".to_string())), Some(None));
        assert_eq!(text_patch(Some("  ".to_string())), Some(None));
        assert_eq!(
            text_patch(Some(" blue ".to_string())),
            Some(Some("blue".to_string()))
        );
    }
}
