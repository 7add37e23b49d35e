//! Assignment of workers to tasks.
//!
//! Managers assign from the eligibility set computed from the task's
//! project. Workers may also take or release a task themselves; taking is
//! not scoped by eligibility.

use super::{
    TrackerServiceError, TrackerServiceResult,
    lookup::{require_project, require_task, require_team, require_worker, require_workers},
};
use crate::tracker::{
    domain::{EligibilityScope, Task, TaskId, Worker, WorkerId},
    ports::{ProjectRepository, TaskRepository, TeamRepository, WorkerRepository},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Eligibility queries and assignee changes.
#[derive(Clone)]
pub struct AssignmentService<R>
where
    R: TaskRepository + ProjectRepository + TeamRepository + WorkerRepository,
{
    repository: Arc<R>,
}

impl<R> AssignmentService<R>
where
    R: TaskRepository + ProjectRepository + TeamRepository + WorkerRepository,
{
    /// Creates a new assignment service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the workers the task may be assigned to, by username.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task.
    pub async fn eligible_workers(&self, task_id: TaskId) -> TrackerServiceResult<Vec<Worker>> {
        let task = require_task(&*self.repository, task_id).await?;
        match self.scope_for(&task).await? {
            EligibilityScope::AllWorkers => Ok(self.repository.list_workers().await?),
            EligibilityScope::Restricted(eligible) => {
                Ok(self.repository.find_workers(&eligible).await?)
            }
        }
    }

    /// Replaces the task's assignees.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task or worker, and
    /// `IneligibleAssignee` for the first worker outside the eligibility
    /// set.
    pub async fn assign_workers(
        &self,
        task_id: TaskId,
        workers: impl IntoIterator<Item = WorkerId> + Send,
    ) -> TrackerServiceResult<Task> {
        let requested: BTreeSet<WorkerId> = workers.into_iter().collect();
        let mut task = require_task(&*self.repository, task_id).await?;
        require_workers(&*self.repository, &requested).await?;

        let scope = self.scope_for(&task).await?;
        if let Some(worker) = requested.iter().copied().find(|worker| !scope.permits(*worker)) {
            warn!(task = %task_id, worker = %worker, "ineligible assignee rejected");
            return Err(TrackerServiceError::IneligibleAssignee {
                task: task_id,
                worker,
            });
        }

        task.replace_assignees(requested);
        let stored = self.repository.update_task(&task).await?;
        debug!(task = %task_id, assignees = stored.assignees().len(), "task assignees replaced");
        Ok(stored)
    }

    /// Adds the acting worker to the task's assignees.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task or worker.
    pub async fn take_task(&self, task_id: TaskId, actor: WorkerId) -> TrackerServiceResult<Task> {
        let mut task = require_task(&*self.repository, task_id).await?;
        require_worker(&*self.repository, actor).await?;
        if !task.assign(actor) {
            return Ok(task);
        }
        let stored = self.repository.update_task(&task).await?;
        debug!(task = %task_id, worker = %actor, "task taken");
        Ok(stored)
    }

    /// Removes the acting worker from the task's assignees.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task.
    pub async fn release_task(&self, task_id: TaskId, actor: WorkerId) -> TrackerServiceResult<Task> {
        let mut task = require_task(&*self.repository, task_id).await?;
        if !task.unassign(actor) {
            return Ok(task);
        }
        let stored = self.repository.update_task(&task).await?;
        debug!(task = %task_id, worker = %actor, "task released");
        Ok(stored)
    }

    async fn scope_for(&self, task: &Task) -> TrackerServiceResult<EligibilityScope> {
        let Some(project_id) = task.project() else {
            return Ok(EligibilityScope::AllWorkers);
        };
        let project = require_project(&*self.repository, project_id).await?;
        let team = match project.team() {
            Some(team_id) => Some(require_team(&*self.repository, team_id).await?),
            None => None,
        };
        Ok(EligibilityScope::resolve(Some(&project), team.as_ref()))
    }
}
