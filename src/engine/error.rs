//! Error types for the engine.

use thiserror::Error;

/// Validation failures when creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("invalid status '{0}' (expected to-do, in-progress, done or blocked)")]
    InvalidStatus(String),
    #[error("invalid priority '{0}' (expected low, medium or high)")]
    InvalidPriority(String),
    #[error("invalid sort key '{0}'")]
    InvalidSortKey(String),
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Failures of the underlying key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reasons the persisted collection could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no tasks stored under '{0}'")]
    Missing(String),
    #[error("stored tasks are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of a task manager operation.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("no task with id '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Validation(#[from] TaskError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}
