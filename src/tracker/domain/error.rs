//! Error types for tracker domain construction and validation.

use super::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Errors returned while constructing tracker domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// A name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// A name exceeds its storage limit.
    #[error("name exceeds {max} character limit: {value}")]
    NameTooLong {
        /// The rejected value.
        value: String,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// A username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// A username contains characters outside letters, digits and `@.+-_`.
    #[error("username '{0}' may only contain letters, digits and @/./+/-/_")]
    InvalidUsername(String),

    /// A username exceeds the 150-character storage limit.
    #[error("username exceeds 150 character limit: {0}")]
    UsernameTooLong(String),
}

/// Rule failures raised when a task or project mutation is validated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The deadline lies before the reference time.
    #[error("deadline cannot be in the past: {deadline} is before {reference}")]
    PastDeadline {
        /// Rejected deadline, rendered for display.
        deadline: String,
        /// Reference time the deadline was compared against.
        reference: String,
    },

    /// The task deadline falls after its project's deadline.
    #[error("deadline cannot be later than project deadline: {task_deadline} is after {project_deadline}")]
    DeadlineExceedsProject {
        /// Rejected task deadline.
        task_deadline: DateTime<Utc>,
        /// Deadline of the owning project.
        project_deadline: NaiveDate,
    },

    /// Another task in the same project already uses the name.
    #[error("task '{name}' already exists in this project")]
    DuplicateNameInProject {
        /// Colliding task name.
        name: String,
        /// Project scope of the collision.
        project: Option<ProjectId>,
    },

    /// The project still owns tasks that are not completed.
    #[error("cannot complete project {project} with {incomplete} uncompleted task(s)")]
    IncompleteTasksExist {
        /// Project whose completion was rejected.
        project: ProjectId,
        /// Number of incomplete owned tasks.
        incomplete: usize,
    },
}

impl ValidationError {
    /// Builds a [`ValidationError::PastDeadline`] from any displayable pair.
    pub fn past_deadline(deadline: impl ToString, reference: impl ToString) -> Self {
        Self::PastDeadline {
            deadline: deadline.to_string(),
            reference: reference.to_string(),
        }
    }
}

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

