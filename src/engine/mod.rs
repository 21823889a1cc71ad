//! Core engine modules for the task board.

pub mod config;
pub mod db;
pub mod error;
pub mod manager;
pub mod resolver;
pub mod seed;
pub mod stats;
pub mod store;
pub mod task;
pub mod types;
pub mod view;

pub use error::{LoadError, ManagerError, StoreError, TaskError};
pub use manager::TaskManager;
pub use task::{Task, TaskPatch, TaskRecord};
pub use types::{Priority, SortKey, Status, StatusFilter};
