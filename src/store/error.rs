use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("A task titled '{0}' already exists")]
    DuplicateTitle(String),

    #[error("Invalid priority '{0}' (expected low, medium, or high)")]
    InvalidPriority(String),

    #[error("No task at number {number} (the list has {len} task(s))")]
    IndexOutOfRange { number: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
