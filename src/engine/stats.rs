//! Aggregate counts over the task collection.

use super::task::Task;
use super::types::Status;
use serde::Serialize;

/// Total plus one count per status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskStats {
    pub total: usize,
    pub to_do: usize,
    pub in_progress: usize,
    pub done: usize,
    pub blocked: usize,
}

impl TaskStats {
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            stats.total += 1;
            match task.status() {
                Status::ToDo => stats.to_do += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Done => stats.done += 1,
                Status::Blocked => stats.blocked += 1,
            }
        }
        stats
    }

    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::ToDo => self.to_do,
            Status::InProgress => self.in_progress,
            Status::Done => self.done,
            Status::Blocked => self.blocked,
        }
    }
}
