//! Interactive numbered menu, the default surface when `td` is run with no
//! subcommand.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::query::{self, SortKey};
use crate::store::{Store, StoreError, TaskPatch};
use crate::task::Task;

pub fn run(file: Option<PathBuf>) -> Result<()> {
    let mut store = super::open_store(file)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_loop(&mut store, &mut input, &mut output)
}

const MENU: &str = "\nTO-DO LIST
1. Add a task
2. View all tasks
3. View pending tasks
4. View completed tasks
5. Toggle task completion
6. Delete a task
7. Update a task
8. Filter by priority
9. Filter by category
10. Sort tasks
11. Show statistics
12. Search tasks
13. Export tasks
14. Exit";

pub fn run_loop<R: BufRead, W: Write>(
    store: &mut Store,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        writeln!(output, "{}", MENU)?;
        let Some(choice) = prompt(input, output, "Enter your choice: ")? else {
            break;
        };

        let result = match choice.as_str() {
            "1" => add_task(store, input, output),
            "2" => view(store.tasks().iter().enumerate().collect(), output),
            "3" => view(query::filter_by_status(store.tasks(), false), output),
            "4" => view(query::filter_by_status(store.tasks(), true), output),
            "5" => with_number(store, input, output, "toggle", |store, index| {
                store.toggle_complete(index).map(|_| ())
            }),
            "6" => with_number(store, input, output, "delete", |store, index| {
                store.delete(index).map(|_| ())
            }),
            "7" => update_task(store, input, output),
            "8" => filter_by_priority(store, input, output),
            "9" => filter_by_category(store, input, output),
            "10" => sort_tasks(store, input, output),
            "11" => show_statistics(store, output),
            "12" => search_tasks(store, input, output),
            "13" => export_tasks(store, input, output),
            "14" => break,
            other => {
                writeln!(output, "Invalid choice '{}'. Please try again.", other)?;
                Ok(())
            }
        };
        result?;
    }

    writeln!(output, "Goodbye!")?;
    Ok(())
}

/// Print a prompt and read one trimmed line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    msg: &str,
) -> Result<Option<String>> {
    write!(output, "{}", msg)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn view<W: Write>(pairs: Vec<(usize, &Task)>, output: &mut W) -> Result<()> {
    if pairs.is_empty() {
        writeln!(output, "No tasks match.")?;
        return Ok(());
    }
    for (index, task) in &pairs {
        writeln!(output, "{}", task.display_line(index + 1))?;
    }
    Ok(())
}

/// Report a store rejection without aborting the menu loop.
fn report<W: Write>(output: &mut W, result: std::result::Result<(), StoreError>) -> Result<()> {
    if let Err(e) = result {
        writeln!(output, "Error: {}", e)?;
    }
    Ok(())
}

fn add_task<R: BufRead, W: Write>(store: &mut Store, input: &mut R, output: &mut W) -> Result<()> {
    let Some(title) = prompt(input, output, "Task title: ")? else {
        return Ok(());
    };

    let Some(priority) = prompt(input, output, "Priority (low/medium/high) [medium]: ")? else {
        return Ok(());
    };
    let priority = if priority.is_empty() {
        crate::task::Priority::default()
    } else {
        match super::parse_priority(&priority) {
            Ok(p) => p,
            Err(e) => return report(output, Err(e)),
        }
    };

    let Some(due) = prompt(input, output, "Due date (YYYY-MM-DD) [none]: ")? else {
        return Ok(());
    };
    let due_date = if due.is_empty() {
        None
    } else {
        match super::add::parse_due(&due) {
            Ok(d) => Some(d),
            Err(e) => {
                writeln!(output, "Error: {}", e)?;
                return Ok(());
            }
        }
    };

    let Some(category) = prompt(input, output, "Category [general]: ")? else {
        return Ok(());
    };

    let mut task = Task::new(title);
    task.priority = priority;
    task.due_date = due_date;
    if !category.is_empty() {
        task.category = category;
    }

    match store.add(task) {
        Ok(_) => writeln!(output, "Task added.")?,
        Err(e) => writeln!(output, "Error: {}", e)?,
    }
    Ok(())
}

/// Prompt for a 1-based task number and run an index-based store operation.
fn with_number<R, W, F>(
    store: &mut Store,
    input: &mut R,
    output: &mut W,
    verb: &str,
    op: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnOnce(&mut Store, usize) -> std::result::Result<(), StoreError>,
{
    view(store.tasks().iter().enumerate().collect(), output)?;
    let msg = format!("Task number to {}: ", verb);
    let Some(raw) = prompt(input, output, &msg)? else {
        return Ok(());
    };

    let Ok(number) = raw.parse::<usize>() else {
        writeln!(output, "Please enter a valid number.")?;
        return Ok(());
    };
    let Ok(index) = super::to_index(number) else {
        writeln!(output, "Task numbers start at 1.")?;
        return Ok(());
    };

    report(output, op(store, index))
}

fn update_task<R: BufRead, W: Write>(
    store: &mut Store,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    view(store.tasks().iter().enumerate().collect(), output)?;
    let Some(raw) = prompt(input, output, "Task number to update: ")? else {
        return Ok(());
    };
    let Ok(number) = raw.parse::<usize>() else {
        writeln!(output, "Please enter a valid number.")?;
        return Ok(());
    };
    let Ok(index) = super::to_index(number) else {
        writeln!(output, "Task numbers start at 1.")?;
        return Ok(());
    };

    writeln!(
        output,
        "Field: 1. Title  2. Priority  3. Due date  4. Category  5. Description  6. Color"
    )?;
    let Some(field) = prompt(input, output, "Enter your choice: ")? else {
        return Ok(());
    };
    let Some(value) = prompt(input, output, "New value (empty clears optional fields): ")? else {
        return Ok(());
    };

    let mut patch = TaskPatch::default();
    match field.as_str() {
        "1" => patch.title = Some(value),
        "2" => match super::parse_priority(&value) {
            Ok(p) => patch.priority = Some(p),
            Err(e) => return report(output, Err(e)),
        },
        "3" => {
            patch.due_date = if value.is_empty() {
                Some(None)
            } else {
                match super::add::parse_due(&value) {
                    Ok(d) => Some(Some(d)),
                    Err(e) => {
                        writeln!(output, "Error: {}", e)?;
                        return Ok(());
                    }
                }
            }
        }
        "4" => patch.category = Some(value),
        "5" => patch.description = Some(if value.is_empty() { None } else { Some(value) }),
        "6" => patch.color = Some(if value.is_empty() { None } else { Some(value) }),
        other => {
            writeln!(output, "Invalid choice '{}'.", other)?;
            return Ok(());
        }
    }

    match store.update(index, patch) {
        Ok(_) => writeln!(output, "Task updated.")?,
        Err(e) => writeln!(output, "Error: {}", e)?,
    }
    Ok(())
}

fn filter_by_priority<R: BufRead, W: Write>(
    store: &Store,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let Some(raw) = prompt(input, output, "Priority to show (low/medium/high): ")? else {
        return Ok(());
    };
    match super::parse_priority(&raw) {
        Ok(p) => view(query::filter_by_priority(store.tasks(), p), output),
        Err(e) => {
            writeln!(output, "Error: {}", e)?;
            Ok(())
        }
    }
}

fn filter_by_category<R: BufRead, W: Write>(
    store: &Store,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let Some(category) = prompt(input, output, "Category to show: ")? else {
        return Ok(());
    };
    view(query::filter_by_category(store.tasks(), &category), output)
}

fn sort_tasks<R: BufRead, W: Write>(store: &Store, input: &mut R, output: &mut W) -> Result<()> {
    let Some(raw) = prompt(
        input,
        output,
        "Sort by (due-date/priority/title/category): ",
    )?
    else {
        return Ok(());
    };
    match SortKey::parse(&raw) {
        Some(key) => view(query::sorted_by(store.tasks(), key), output),
        None => {
            writeln!(output, "Unknown sort key '{}'.", raw)?;
            Ok(())
        }
    }
}

fn show_statistics<W: Write>(store: &Store, output: &mut W) -> Result<()> {
    let stats = query::statistics(store.tasks());
    writeln!(output, "Total tasks: {}", stats.total)?;
    writeln!(
        output,
        "Completed: {} ({:.1}%)",
        stats.completed,
        stats.completion_rate * 100.0
    )?;
    writeln!(output, "Pending: {}", stats.pending)?;
    for (priority, count) in &stats.by_priority {
        writeln!(output, "  {}: {}", priority, count)?;
    }
    for (category, count) in &stats.by_category {
        writeln!(output, "  {}: {}", category, count)?;
    }
    Ok(())
}

fn search_tasks<R: BufRead, W: Write>(store: &Store, input: &mut R, output: &mut W) -> Result<()> {
    let Some(term) = prompt(input, output, "Search term: ")? else {
        return Ok(());
    };
    if term.is_empty() {
        writeln!(output, "Search term cannot be empty.")?;
        return Ok(());
    }
    view(query::search(store.tasks(), &term), output)
}

fn export_tasks<R: BufRead, W: Write>(store: &Store, input: &mut R, output: &mut W) -> Result<()> {
    let Some(format) = prompt(input, output, "Export format (csv/txt): ")? else {
        return Ok(());
    };
    match super::export::write_export(store.tasks(), &format, None) {
        Ok(path) => writeln!(output, "Exported to {}", path.display())?,
        Err(e) => writeln!(output, "Error: {}", e)?,
    }
    Ok(())
}
