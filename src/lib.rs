//! Taskdeck library - task store, queries, and export behind the `td` CLI

pub mod cli;
pub mod export;
pub mod query;
pub mod store;
pub mod task;
