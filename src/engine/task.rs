//! The task record: validation, editing and its persisted shape.

use super::error::TaskError;
use super::types::{Priority, Status};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A single task on the board.
///
/// `color` always equals `status.color()`; fields are private so the two
/// cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: String,
    title: String,
    description: String,
    status: Status,
    priority: Priority,
    created_at: DateTime<Utc>,
    color: &'static str,
}

/// A partial edit. Only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Persisted form of a task: primitive fields only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: String,
    pub created_at: String,
    #[serde(default)]
    pub color: String,
}

impl Task {
    /// Creates a task with a fresh id and the current time.
    ///
    /// # Errors
    /// Returns `TaskError::EmptyTitle` if the title is blank after trimming.
    pub fn create(
        title: &str,
        description: &str,
        status: Status,
        priority: Priority,
    ) -> Result<Self, TaskError> {
        let title = validated_title(title)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description: description.trim().to_string(),
            status,
            priority,
            // Millisecond precision keeps the ISO-8601 form lossless.
            created_at: Utc::now().trunc_subsecs(3),
            color: status.color(),
        })
    }

    /// Creates a `to-do`, `medium` task with no description.
    ///
    /// # Errors
    /// Returns `TaskError::EmptyTitle` if the title is blank after trimming.
    pub fn with_title(title: &str) -> Result<Self, TaskError> {
        Self::create(title, "", Status::default(), Priority::default())
    }

    /// Overrides the creation time. Used when building fixtures.
    #[must_use]
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at.trunc_subsecs(3);
        self
    }

    /// Applies a partial edit.
    ///
    /// The title is checked before anything is written, so a blank title
    /// leaves the task untouched.
    ///
    /// # Errors
    /// Returns `TaskError::EmptyTitle` if the patch carries a blank title.
    pub fn update(&mut self, patch: &TaskPatch) -> Result<(), TaskError> {
        let title = patch.title.as_deref().map(validated_title).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = &patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
            self.color = status.color();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn color(&self) -> &'static str {
        self.color
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    #[must_use]
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.to_string(),
            priority: self.priority.to_string(),
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            color: self.color.to_string(),
        }
    }

    /// Rebuilds a task from its persisted form.
    ///
    /// Stored data is validated like fresh input. The stored color is ignored
    /// and derived again from the status.
    ///
    /// # Errors
    /// Returns a `TaskError` if the title is blank, the status or priority is
    /// unknown, or the timestamp is not RFC 3339.
    pub fn from_record(record: TaskRecord) -> Result<Self, TaskError> {
        let title = validated_title(&record.title)?;
        let status: Status = record.status.parse()?;
        let priority: Priority = record.priority.parse()?;
        let created_at = DateTime::parse_from_rfc3339(&record.created_at)
            .map_err(|_| TaskError::InvalidTimestamp(record.created_at.clone()))?
            .with_timezone(&Utc);

        Ok(Self {
            id: record.id,
            title,
            description: record.description.trim().to_string(),
            status,
            priority,
            created_at,
            color: status.color(),
        })
    }
}

fn validated_title(title: &str) -> Result<String, TaskError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
