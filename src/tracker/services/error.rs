//! Service-level error taxonomy.

use crate::tracker::{
    domain::{EntityRef, TaskId, TrackerDomainError, ValidationError, WorkerId},
    ports::TrackerRepositoryError,
};
use thiserror::Error;

/// Errors returned by tracker services.
#[derive(Debug, Error)]
pub enum TrackerServiceError {
    /// A name or username could not be constructed.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),

    /// A business rule rejected the mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The target entity, or one it references, does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// A worker outside the task's eligibility set was assigned.
    #[error("worker {worker} is not eligible for task {task}")]
    IneligibleAssignee {
        /// Task being assigned.
        task: TaskId,
        /// Rejected worker.
        worker: WorkerId,
    },

    /// Any other repository failure.
    #[error(transparent)]
    Repository(TrackerRepositoryError),
}

impl From<TrackerRepositoryError> for TrackerServiceError {
    fn from(err: TrackerRepositoryError) -> Self {
        match err {
            TrackerRepositoryError::NotFound(entity) => Self::NotFound(entity),
            TrackerRepositoryError::DuplicateTaskName { name, project } => {
                Self::Validation(ValidationError::DuplicateNameInProject {
                    name,
                    project: Some(project),
                })
            }
            TrackerRepositoryError::CompletionBlocked {
                project,
                incomplete,
            } => Self::Validation(ValidationError::IncompleteTasksExist {
                project,
                incomplete,
            }),
            other @ (TrackerRepositoryError::DuplicateName { .. }
            | TrackerRepositoryError::Persistence(_)) => Self::Repository(other),
        }
    }
}

/// Result type for tracker service operations.
pub type TrackerServiceResult<T> = Result<T, TrackerServiceError>;
