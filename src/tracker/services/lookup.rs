//! Shared load-or-`NotFound` helpers.

use super::{TrackerServiceError, TrackerServiceResult};
use crate::tracker::{
    domain::{
        EntityRef, Position, PositionId, Project, ProjectId, Task, TaskId, TaskType, TaskTypeId,
        Team, TeamId, Worker, WorkerId,
    },
    ports::{
        PositionRepository, ProjectRepository, TaskRepository, TaskTypeRepository, TeamRepository,
        WorkerRepository,
    },
};
use std::collections::BTreeSet;

pub(super) async fn require_worker<R>(repository: &R, id: WorkerId) -> TrackerServiceResult<Worker>
where
    R: WorkerRepository + ?Sized,
{
    repository
        .find_worker(id)
        .await?
        .ok_or(TrackerServiceError::NotFound(EntityRef::Worker(id)))
}

/// Loads every listed worker, failing on the first missing one.
pub(super) async fn require_workers<R>(
    repository: &R,
    ids: &BTreeSet<WorkerId>,
) -> TrackerServiceResult<Vec<Worker>>
where
    R: WorkerRepository + ?Sized,
{
    let found = repository.find_workers(ids).await?;
    if let Some(missing) = ids
        .iter()
        .find(|id| !found.iter().any(|worker| worker.id() == **id))
    {
        return Err(TrackerServiceError::NotFound(EntityRef::Worker(*missing)));
    }
    Ok(found)
}

pub(super) async fn require_position<R>(
    repository: &R,
    id: PositionId,
) -> TrackerServiceResult<Position>
where
    R: PositionRepository + ?Sized,
{
    repository
        .find_position(id)
        .await?
        .ok_or(TrackerServiceError::NotFound(EntityRef::Position(id)))
}

pub(super) async fn require_team<R>(repository: &R, id: TeamId) -> TrackerServiceResult<Team>
where
    R: TeamRepository + ?Sized,
{
    repository
        .find_team(id)
        .await?
        .ok_or(TrackerServiceError::NotFound(EntityRef::Team(id)))
}

pub(super) async fn require_project<R>(
    repository: &R,
    id: ProjectId,
) -> TrackerServiceResult<Project>
where
    R: ProjectRepository + ?Sized,
{
    repository
        .find_project(id)
        .await?
        .ok_or(TrackerServiceError::NotFound(EntityRef::Project(id)))
}

pub(super) async fn require_task_type<R>(
    repository: &R,
    id: TaskTypeId,
) -> TrackerServiceResult<TaskType>
where
    R: TaskTypeRepository + ?Sized,
{
    repository
        .find_task_type(id)
        .await?
        .ok_or(TrackerServiceError::NotFound(EntityRef::TaskType(id)))
}

pub(super) async fn require_task<R>(repository: &R, id: TaskId) -> TrackerServiceResult<Task>
where
    R: TaskRepository + ?Sized,
{
    repository
        .find_task(id)
        .await?
        .ok_or(TrackerServiceError::NotFound(EntityRef::Task(id)))
}
