//! Completion toggles for tasks and projects.

use super::{TrackerServiceError, TrackerServiceResult};
use crate::tracker::{
    domain::{Project, ProjectId, Task, TaskId},
    ports::{ProjectRepository, TaskRepository},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Flips completion flags.
///
/// Toggles do not re-check deadlines. Completing a project requires every
/// owned task to be complete; reopening it is always allowed.
#[derive(Clone)]
pub struct CompletionCoordinator<R>
where
    R: TaskRepository + ProjectRepository,
{
    repository: Arc<R>,
}

impl<R> CompletionCoordinator<R>
where
    R: TaskRepository + ProjectRepository,
{
    /// Creates a new completion coordinator.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Flips a task's completion flag and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task.
    pub async fn toggle_task_completion(&self, id: TaskId) -> TrackerServiceResult<Task> {
        let task = self.repository.toggle_task_completion(id).await?;
        debug!(task = %id, completed = task.is_completed(), "task completion toggled");
        Ok(task)
    }

    /// Flips a project's completion flag and returns the updated project.
    ///
    /// The owned tasks are counted by the store in the same atomic step as
    /// the write.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project and `Validation` when the
    /// project would be completed while it owns incomplete tasks. A rejected
    /// toggle leaves the stored project unchanged.
    pub async fn toggle_project_completion(&self, id: ProjectId) -> TrackerServiceResult<Project> {
        match self.repository.toggle_project_completion(id).await {
            Ok(project) => {
                debug!(
                    project = %id,
                    completed = project.is_completed(),
                    "project completion toggled"
                );
                Ok(project)
            }
            Err(err) => {
                let service_err = TrackerServiceError::from(err);
                if matches!(service_err, TrackerServiceError::Validation(_)) {
                    warn!(project = %id, error = %service_err, "project completion rejected");
                }
                Err(service_err)
            }
        }
    }
}
