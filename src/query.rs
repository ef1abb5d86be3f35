//! Pure queries over the task collection: filter, search, sort, statistics.
//!
//! Filters and searches return `(original index, task)` pairs so callers can
//! keep displaying the stable 1-based task numbers the mutation commands use.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::task::{Priority, Task};

/// Sort key for [`sorted_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DueDate,
    Priority,
    Title,
    Category,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "due-date" | "due_date" | "due" => Some(Self::DueDate),
            "priority" => Some(Self::Priority),
            "title" => Some(Self::Title),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}

pub fn filter_by_status(tasks: &[Task], completed: bool) -> Vec<(usize, &Task)> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.completed == completed)
        .collect()
}

pub fn filter_by_category<'a>(tasks: &'a [Task], name: &str) -> Vec<(usize, &'a Task)> {
    let name = name.to_lowercase();
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.category.to_lowercase() == name)
        .collect()
}

pub fn filter_by_priority(tasks: &[Task], priority: Priority) -> Vec<(usize, &Task)> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.priority == priority)
        .collect()
}

/// Case-insensitive substring match across title, description, and category,
/// in original order.
pub fn search<'a>(tasks: &'a [Task], term: &str) -> Vec<(usize, &'a Task)> {
    let term = term.to_lowercase();
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            t.title.to_lowercase().contains(&term)
                || t.description
                    .as_ref()
                    .map(|d| d.to_lowercase().contains(&term))
                    .unwrap_or(false)
                || t.category.to_lowercase().contains(&term)
        })
        .collect()
}

/// Return a new ordering of the collection. The sort is stable, so ties keep
/// insertion order. High priority sorts first; missing due dates sort last.
pub fn sorted_by(tasks: &[Task], key: SortKey) -> Vec<(usize, &Task)> {
    let mut out: Vec<(usize, &Task)> = tasks.iter().enumerate().collect();
    match key {
        SortKey::DueDate => out.sort_by(|(_, a), (_, b)| match (&a.due_date, &b.due_date) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::Priority => out.sort_by(|(_, a), (_, b)| b.priority.cmp(&a.priority)),
        SortKey::Title => {
            out.sort_by(|(_, a), (_, b)| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::Category => out
            .sort_by(|(_, a), (_, b)| a.category.to_lowercase().cmp(&b.category.to_lowercase())),
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_rate: f64,
    pub by_priority: BTreeMap<&'static str, usize>,
    pub by_category: BTreeMap<String, usize>,
}

pub fn statistics(tasks: &[Task]) -> Statistics {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();

    let mut by_priority: BTreeMap<&'static str, usize> =
        [Priority::Low, Priority::Medium, Priority::High]
            .iter()
            .map(|p| (p.label(), 0))
            .collect();
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();

    for task in tasks {
        *by_priority.entry(task.priority.label()).or_insert(0) += 1;
        *by_category.entry(task.category.clone()).or_insert(0) += 1;
    }

    Statistics {
        total,
        completed,
        pending: total - completed,
        completion_rate: if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        },
        by_priority,
        by_category,
    }
}
