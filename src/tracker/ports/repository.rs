//! Repository ports for tracker persistence.
//!
//! Each aggregate has its own trait so services depend only on the storage
//! they use. Implementations enforce the storage-level invariants: unique
//! names, referential actions on delete, and completion toggles applied as
//! a single atomic read-check-write.

use super::TaskListFilter;
use crate::tracker::domain::{
    EntityRef, NamedEntity, Position, PositionId, Project, ProjectId, Task, TaskId, TaskType,
    TaskTypeId, Team, TeamId, Worker, WorkerId,
};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracker repository operations.
pub type TrackerRepositoryResult<T> = Result<T, TrackerRepositoryError>;

/// Worker persistence contract.
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    /// Stores a new worker.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateName`] when the username is
    /// taken.
    async fn store_worker(&self, worker: &Worker) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing worker.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the worker does not
    /// exist.
    async fn update_worker(&self, worker: &Worker) -> TrackerRepositoryResult<()>;

    /// Finds a worker by identifier.
    async fn find_worker(&self, id: WorkerId) -> TrackerRepositoryResult<Option<Worker>>;

    /// Returns the existing workers among `ids`, ordered by username.
    async fn find_workers(&self, ids: &BTreeSet<WorkerId>)
    -> TrackerRepositoryResult<Vec<Worker>>;

    /// Returns every worker, ordered by username.
    async fn list_workers(&self) -> TrackerRepositoryResult<Vec<Worker>>;

    /// Returns the number of workers.
    async fn count_workers(&self) -> TrackerRepositoryResult<u64>;

    /// Deletes a worker, clearing leader references and removing it from
    /// team memberships and task assignee sets.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the worker does not
    /// exist.
    async fn delete_worker(&self, id: WorkerId) -> TrackerRepositoryResult<()>;
}

/// Position persistence contract.
#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// Stores a new position.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateName`] when the name is taken.
    async fn store_position(&self, position: &Position) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing position.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the position does not
    /// exist.
    async fn update_position(&self, position: &Position) -> TrackerRepositoryResult<()>;

    /// Finds a position by identifier.
    async fn find_position(&self, id: PositionId) -> TrackerRepositoryResult<Option<Position>>;

    /// Returns every position, ordered by name.
    async fn list_positions(&self) -> TrackerRepositoryResult<Vec<Position>>;

    /// Deletes a position, clearing it from workers that held it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the position does not
    /// exist.
    async fn delete_position(&self, id: PositionId) -> TrackerRepositoryResult<()>;
}

/// Team persistence contract.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team with its members.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateName`] when the name is taken.
    async fn store_team(&self, team: &Team) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing team, including its member set.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the team does not
    /// exist.
    async fn update_team(&self, team: &Team) -> TrackerRepositoryResult<()>;

    /// Finds a team by identifier.
    async fn find_team(&self, id: TeamId) -> TrackerRepositoryResult<Option<Team>>;

    /// Returns every team, ordered by name.
    async fn list_teams(&self) -> TrackerRepositoryResult<Vec<Team>>;

    /// Deletes a team, clearing it from projects it delivered.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the team does not
    /// exist.
    async fn delete_team(&self, id: TeamId) -> TrackerRepositoryResult<()>;
}

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateName`] when the name is taken.
    async fn store_project(&self, project: &Project) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing project and returns the stored state.
    ///
    /// The stored completion flag is kept; only
    /// [`ProjectRepository::toggle_project_completion`] changes it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the project does not
    /// exist, or [`TrackerRepositoryError::DuplicateName`] when the name is
    /// taken.
    async fn update_project(&self, project: &Project) -> TrackerRepositoryResult<Project>;

    /// Flips a project's completion flag as one atomic read-check-write.
    ///
    /// Completing counts the owned incomplete tasks under the same lock as
    /// the write. Reopening is unconditional.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the project does not
    /// exist, or [`TrackerRepositoryError::CompletionBlocked`] when it would
    /// be completed while owning incomplete tasks. A blocked toggle writes
    /// nothing.
    async fn toggle_project_completion(&self, id: ProjectId)
    -> TrackerRepositoryResult<Project>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> TrackerRepositoryResult<Option<Project>>;

    /// Returns every project, ordered by name.
    async fn list_projects(&self) -> TrackerRepositoryResult<Vec<Project>>;

    /// Returns the number of projects.
    async fn count_projects(&self) -> TrackerRepositoryResult<u64>;

    /// Deletes a project together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn delete_project(&self, id: ProjectId) -> TrackerRepositoryResult<()>;
}

/// Task type persistence contract.
#[async_trait]
pub trait TaskTypeRepository: Send + Sync {
    /// Stores a new task type.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateName`] when the name is taken.
    async fn store_task_type(&self, task_type: &TaskType) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing task type.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the task type does not
    /// exist.
    async fn update_task_type(&self, task_type: &TaskType) -> TrackerRepositoryResult<()>;

    /// Finds a task type by identifier.
    async fn find_task_type(&self, id: TaskTypeId) -> TrackerRepositoryResult<Option<TaskType>>;

    /// Returns every task type, ordered by name.
    async fn list_task_types(&self) -> TrackerRepositoryResult<Vec<TaskType>>;

    /// Deletes a task type together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the task type does not
    /// exist.
    async fn delete_task_type(&self, id: TaskTypeId) -> TrackerRepositoryResult<()>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task with its assignees.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateTaskName`] when the name is
    /// taken within the task's project.
    async fn store_task(&self, task: &Task) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing task, including its assignee set, and
    /// returns the stored state.
    ///
    /// The stored completion flag is kept; only
    /// [`TaskRepository::toggle_task_completion`] changes it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the task does not
    /// exist, or [`TrackerRepositoryError::DuplicateTaskName`] on a name
    /// collision within the project.
    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<Task>;

    /// Flips a task's completion flag atomically and returns the stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn toggle_task_completion(&self, id: TaskId) -> TrackerRepositoryResult<Task>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>>;

    /// Returns tasks matching the filter in the requested deadline order.
    async fn list_tasks(&self, filter: &TaskListFilter) -> TrackerRepositoryResult<Vec<Task>>;

    /// Returns every task owned by a project, earliest deadline first.
    async fn tasks_for_project(&self, project: ProjectId) -> TrackerRepositoryResult<Vec<Task>>;

    /// Returns the number of tasks.
    async fn count_tasks(&self) -> TrackerRepositoryResult<u64>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<()>;
}

/// Errors returned by tracker repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackerRepositoryError {
    /// A unique name or username is already taken.
    #[error("duplicate {entity} name: {name}")]
    DuplicateName {
        /// Kind of entity.
        entity: NamedEntity,
        /// Colliding name.
        name: String,
    },

    /// A task name is already taken within the same project.
    #[error("duplicate task name '{name}' in project {project}")]
    DuplicateTaskName {
        /// Colliding name.
        name: String,
        /// Project scope.
        project: ProjectId,
    },

    /// A completed project write was refused because tasks are open.
    #[error("project {project} still has {incomplete} uncompleted task(s)")]
    CompletionBlocked {
        /// Project being completed.
        project: ProjectId,
        /// Number of incomplete owned tasks.
        incomplete: usize,
    },

    /// The entity, or an entity it references, was not found.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
