//! Task data model

pub mod model;

pub use model::{Priority, Task};
