//! Sample tasks for an empty board.

use super::error::TaskError;
use super::task::Task;
use super::types::{Priority, Status};
use chrono::{Duration, Utc};

const SAMPLES: [(&str, &str, Status, Priority); 6] = [
    (
        "Set up project repository",
        "Create the repository, add a README and a license",
        Status::Done,
        Priority::High,
    ),
    (
        "Design the data model",
        "Decide which fields a task carries and how it is stored",
        Status::Done,
        Priority::Medium,
    ),
    (
        "Implement filtering",
        "Filter the board by status and search text",
        Status::InProgress,
        Priority::High,
    ),
    (
        "Add drag and drop reordering",
        "Let cards be swapped to set a manual order",
        Status::ToDo,
        Priority::Medium,
    ),
    (
        "Write user documentation",
        "",
        Status::ToDo,
        Priority::Low,
    ),
    (
        "Publish release",
        "Waiting on the documentation review",
        Status::Blocked,
        Priority::Medium,
    ),
];

/// Builds the six sample tasks, oldest first, one minute apart.
///
/// # Errors
/// Only fails if a sample title were blank.
pub fn sample_tasks() -> Result<Vec<Task>, TaskError> {
    let now = Utc::now();
    let count = i64::try_from(SAMPLES.len()).unwrap_or(i64::MAX);
    SAMPLES
        .iter()
        .zip(0..)
        .map(|((title, description, status, priority), i)| {
            Task::create(title, description, *status, *priority)
                .map(|task| task.created(now - Duration::minutes(count - i)))
        })
        .collect()
}
