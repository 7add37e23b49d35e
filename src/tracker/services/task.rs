//! Task creation, editing, and listing.

use super::{
    TrackerServiceResult,
    lookup::{require_project, require_task, require_task_type, require_workers},
};
use crate::tracker::{
    domain::{
        EntityName, ProjectId, Task, TaskId, TaskPriority, TaskTypeId, TaskValidationContext,
        WorkerId, validate_task,
    },
    ports::{
        ProjectRepository, TaskListFilter, TaskRepository, TaskTypeRepository, WorkerRepository,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Request payload for creating or editing a task.
///
/// On update every field is replaced, except the assignees, which are kept
/// unless [`TaskRequest::with_assignees`] was called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    name: String,
    deadline: DateTime<Utc>,
    task_type: TaskTypeId,
    description: String,
    priority: TaskPriority,
    project: Option<ProjectId>,
    assignees: Option<BTreeSet<WorkerId>>,
}

impl TaskRequest {
    /// Creates a request with the required fields and medium priority.
    #[must_use]
    pub fn new(name: impl Into<String>, deadline: DateTime<Utc>, task_type: TaskTypeId) -> Self {
        Self {
            name: name.into(),
            deadline,
            task_type,
            description: String::new(),
            priority: TaskPriority::default(),
            project: None,
            assignees: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Places the task in a project.
    #[must_use]
    pub const fn with_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = WorkerId>) -> Self {
        self.assignees = Some(assignees.into_iter().collect());
        self
    }
}

/// Task creation, editing, and listing.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository + ProjectRepository + TaskTypeRepository + WorkerRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository + ProjectRepository + TaskTypeRepository + WorkerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task after running every task rule.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an invalid name, `NotFound` for an unknown task
    /// type, project, or assignee, and `Validation` when a rule fails.
    pub async fn create_task(&self, request: TaskRequest) -> TrackerServiceResult<Task> {
        let name = EntityName::new(request.name.as_str())?;
        require_task_type(&*self.repository, request.task_type).await?;

        let mut task = Task::new(name, request.deadline, request.task_type)
            .with_description(request.description)
            .with_priority(request.priority);
        if let Some(project) = request.project {
            task = task.with_project(project);
        }
        if let Some(assignees) = request.assignees {
            require_workers(&*self.repository, &assignees).await?;
            task = task.with_assignees(assignees);
        }

        self.validate(&task).await?;
        self.repository.store_task(&task).await?;
        debug!(
            task = %task.id(),
            project = ?task.project(),
            priority = task.priority().as_str(),
            "task created"
        );
        Ok(task)
    }

    /// Replaces a task's editable fields and re-runs every task rule.
    ///
    /// The completion flag is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task, task type, project, or
    /// assignee, `Domain` for an invalid name, and `Validation` when a rule
    /// fails.
    pub async fn update_task(&self, id: TaskId, request: TaskRequest) -> TrackerServiceResult<Task> {
        let name = EntityName::new(request.name.as_str())?;
        let mut task = require_task(&*self.repository, id).await?;
        require_task_type(&*self.repository, request.task_type).await?;

        task.rename(name);
        task.set_description(request.description);
        task.reschedule(request.deadline);
        task.set_priority(request.priority);
        task.set_task_type(request.task_type);
        task.set_project(request.project);
        if let Some(assignees) = request.assignees {
            require_workers(&*self.repository, &assignees).await?;
            task.replace_assignees(assignees);
        }

        self.validate(&task).await?;
        let stored = self.repository.update_task(&task).await?;
        debug!(task = %id, "task updated");
        Ok(stored)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task.
    pub async fn delete_task(&self, id: TaskId) -> TrackerServiceResult<()> {
        self.repository.delete_task(id).await?;
        debug!(task = %id, "task deleted");
        Ok(())
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn find_task(&self, id: TaskId) -> TrackerServiceResult<Option<Task>> {
        Ok(self.repository.find_task(id).await?)
    }

    /// Lists tasks matching the filter in its deadline order.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn list_tasks(&self, filter: TaskListFilter) -> TrackerServiceResult<Vec<Task>> {
        Ok(self.repository.list_tasks(&filter).await?)
    }

    /// Loads the task's project scope and runs the task rules against it.
    async fn validate(&self, task: &Task) -> TrackerServiceResult<()> {
        let now = self.clock.utc();
        let outcome = match task.project() {
            None => validate_task(task, &TaskValidationContext::standalone(), now),
            Some(project_id) => {
                let project = require_project(&*self.repository, project_id).await?;
                let scope = self.repository.tasks_for_project(project_id).await?;
                validate_task(task, &TaskValidationContext::within(&project, &scope), now)
            }
        };
        outcome.map_err(|err| {
            warn!(task = %task.id(), name = %task.name(), error = %err, "task rejected");
            err.into()
        })
    }
}
