//! Task record and priority levels

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority. Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse priority from text
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "1" => Some(Self::Low),
            "medium" | "med" | "2" => Some(Self::Medium),
            "high" | "3" => Some(Self::High),
            _ => None,
        }
    }

    /// Get the text label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Get the icon used in list output
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🔴",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn default_category() -> String {
    "general".to_string()
}

/// A task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task title. Never empty; the store enforces this.
    pub title: String,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Due date (if any)
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Free-form grouping label
    #[serde(default = "default_category")]
    pub category: String,

    /// Additional details
    #[serde(default)]
    pub description: Option<String>,

    /// Color tag for display
    #[serde(default)]
    pub color: Option<String>,
}

impl Task {
    /// Create a new pending task with default priority and category
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            priority: Priority::default(),
            due_date: None,
            category: default_category(),
            description: None,
            color: None,
        }
    }

    /// Format as a single list line, numbered from 1
    pub fn display_line(&self, number: usize) -> String {
        let status = if self.completed { "✅" } else { "❌" };
        let mut line = format!(
            "{}. {} {} {} [{}]",
            number,
            status,
            self.priority.icon(),
            self.title,
            self.category
        );

        if let Some(due) = &self.due_date {
            line.push_str(&format!(" 📅 {}", due.format("%Y-%m-%d")));
        }

        line
    }
}
