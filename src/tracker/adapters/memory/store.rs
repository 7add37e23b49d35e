//! In-memory tracker store for tests and embedding.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::tracker::{
    domain::{
        EntityRef, NamedEntity, Position, PositionId, Project, ProjectId, Task, TaskId, TaskType,
        TaskTypeId, Team, TeamId, Worker, WorkerId,
    },
    ports::{
        DeadlineOrder, PositionRepository, ProjectRepository, TaskListFilter, TaskRepository,
        TaskTypeRepository, TeamRepository, TrackerRepositoryError, TrackerRepositoryResult,
        WorkerRepository,
    },
};

/// Thread-safe in-memory store implementing every tracker repository port.
///
/// All aggregates share one lock so that referential actions and the
/// completion toggles apply atomically, as a relational store would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerStore {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    workers: HashMap<WorkerId, Worker>,
    positions: HashMap<PositionId, Position>,
    teams: HashMap<TeamId, Team>,
    projects: HashMap<ProjectId, Project>,
    task_types: HashMap<TaskTypeId, TaskType>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTrackerStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TrackerRepositoryResult<RwLockReadGuard<'_, InMemoryTrackerState>> {
        self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TrackerRepositoryResult<RwLockWriteGuard<'_, InMemoryTrackerState>> {
        self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryTrackerState {
    fn require_worker(&self, id: WorkerId) -> TrackerRepositoryResult<()> {
        require(self.workers.contains_key(&id), EntityRef::Worker(id))
    }

    fn require_workers<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a WorkerId>,
    ) -> TrackerRepositoryResult<()> {
        ids.into_iter().try_for_each(|id| self.require_worker(*id))
    }

    fn check_worker(&self, worker: &Worker) -> TrackerRepositoryResult<()> {
        if let Some(position) = worker.position() {
            require(
                self.positions.contains_key(&position),
                EntityRef::Position(position),
            )?;
        }
        let taken = self
            .workers
            .values()
            .any(|other| other.id() != worker.id() && other.username() == worker.username());
        unique(taken, NamedEntity::Worker, worker.username().as_str())
    }

    fn check_position(&self, position: &Position) -> TrackerRepositoryResult<()> {
        let taken = self
            .positions
            .values()
            .any(|other| other.id() != position.id() && other.name() == position.name());
        unique(taken, NamedEntity::Position, position.name().as_str())
    }

    fn check_team(&self, team: &Team) -> TrackerRepositoryResult<()> {
        self.require_workers(team.leader().iter().chain(team.members()))?;
        let taken = self
            .teams
            .values()
            .any(|other| other.id() != team.id() && other.name() == team.name());
        unique(taken, NamedEntity::Team, team.name().as_str())
    }

    fn check_project(&self, project: &Project) -> TrackerRepositoryResult<()> {
        self.require_workers(project.leader().iter())?;
        if let Some(team) = project.team() {
            require(self.teams.contains_key(&team), EntityRef::Team(team))?;
        }
        let taken = self
            .projects
            .values()
            .any(|other| other.id() != project.id() && other.name() == project.name());
        unique(taken, NamedEntity::Project, project.name().as_str())
    }

    fn check_task_type(&self, task_type: &TaskType) -> TrackerRepositoryResult<()> {
        let taken = self
            .task_types
            .values()
            .any(|other| other.id() != task_type.id() && other.name() == task_type.name());
        unique(taken, NamedEntity::TaskType, task_type.name().as_str())
    }

    fn check_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        require(
            self.task_types.contains_key(&task.task_type()),
            EntityRef::TaskType(task.task_type()),
        )?;
        self.require_workers(task.assignees())?;
        let Some(project) = task.project() else {
            return Ok(());
        };
        require(self.projects.contains_key(&project), EntityRef::Project(project))?;
        let taken = self.tasks.values().any(|other| {
            other.id() != task.id() && other.project() == Some(project) && other.name() == task.name()
        });
        if taken {
            return Err(TrackerRepositoryError::DuplicateTaskName {
                name: task.name().as_str().to_owned(),
                project,
            });
        }
        Ok(())
    }

    fn incomplete_tasks(&self, project: ProjectId) -> usize {
        self.tasks
            .values()
            .filter(|task| task.project() == Some(project) && !task.is_completed())
            .count()
    }

    fn remove_tasks_where(&mut self, predicate: impl Fn(&Task) -> bool) {
        self.tasks.retain(|_, task| !predicate(task));
    }
}

fn require(present: bool, entity: EntityRef) -> TrackerRepositoryResult<()> {
    if present {
        Ok(())
    } else {
        Err(TrackerRepositoryError::NotFound(entity))
    }
}

fn unique(taken: bool, entity: NamedEntity, name: &str) -> TrackerRepositoryResult<()> {
    if taken {
        return Err(TrackerRepositoryError::DuplicateName {
            entity,
            name: name.to_owned(),
        });
    }
    Ok(())
}

fn sorted_by_key<T, K: Ord>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut collected: Vec<T> = items.collect();
    collected.sort_by_key(|item| key(item));
    collected
}

fn sort_by_deadline(tasks: &mut [Task], order: DeadlineOrder) {
    tasks.sort_by(|left, right| {
        let by_deadline = left.deadline().cmp(&right.deadline());
        let directed = match order {
            DeadlineOrder::Ascending => by_deadline,
            DeadlineOrder::Descending => by_deadline.reverse(),
        };
        directed.then_with(|| left.name().cmp(right.name()))
    });
}

fn count(len: usize) -> TrackerRepositoryResult<u64> {
    u64::try_from(len).map_err(TrackerRepositoryError::persistence)
}

#[async_trait]
impl WorkerRepository for InMemoryTrackerStore {
    async fn store_worker(&self, worker: &Worker) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        state.check_worker(worker)?;
        state.workers.insert(worker.id(), worker.clone());
        Ok(())
    }

    async fn update_worker(&self, worker: &Worker) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        state.require_worker(worker.id())?;
        state.check_worker(worker)?;
        state.workers.insert(worker.id(), worker.clone());
        Ok(())
    }

    async fn find_worker(&self, id: WorkerId) -> TrackerRepositoryResult<Option<Worker>> {
        Ok(self.read()?.workers.get(&id).cloned())
    }

    async fn find_workers(
        &self,
        ids: &BTreeSet<WorkerId>,
    ) -> TrackerRepositoryResult<Vec<Worker>> {
        let state = self.read()?;
        let found = ids.iter().filter_map(|id| state.workers.get(id).cloned());
        Ok(sorted_by_key(found, |worker| worker.username().clone()))
    }

    async fn list_workers(&self) -> TrackerRepositoryResult<Vec<Worker>> {
        let state = self.read()?;
        Ok(sorted_by_key(state.workers.values().cloned(), |worker| {
            worker.username().clone()
        }))
    }

    async fn count_workers(&self) -> TrackerRepositoryResult<u64> {
        count(self.read()?.workers.len())
    }

    async fn delete_worker(&self, id: WorkerId) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        if state.workers.remove(&id).is_none() {
            return Err(TrackerRepositoryError::NotFound(EntityRef::Worker(id)));
        }
        for team in state.teams.values_mut() {
            team.detach_worker(id);
        }
        for project in state.projects.values_mut() {
            project.detach_worker(id);
        }
        for task in state.tasks.values_mut() {
            task.unassign(id);
        }
        Ok(())
    }
}

#[async_trait]
impl PositionRepository for InMemoryTrackerStore {
    async fn store_position(&self, position: &Position) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        state.check_position(position)?;
        state.positions.insert(position.id(), position.clone());
        Ok(())
    }

    async fn update_position(&self, position: &Position) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        require(
            state.positions.contains_key(&position.id()),
            EntityRef::Position(position.id()),
        )?;
        state.check_position(position)?;
        state.positions.insert(position.id(), position.clone());
        Ok(())
    }

    async fn find_position(&self, id: PositionId) -> TrackerRepositoryResult<Option<Position>> {
        Ok(self.read()?.positions.get(&id).cloned())
    }

    async fn list_positions(&self) -> TrackerRepositoryResult<Vec<Position>> {
        let state = self.read()?;
        Ok(sorted_by_key(state.positions.values().cloned(), |position| {
            position.name().clone()
        }))
    }

    async fn delete_position(&self, id: PositionId) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        if state.positions.remove(&id).is_none() {
            return Err(TrackerRepositoryError::NotFound(EntityRef::Position(id)));
        }
        for worker in state.workers.values_mut() {
            if worker.position() == Some(id) {
                worker.clear_position();
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for InMemoryTrackerStore {
    async fn store_team(&self, team: &Team) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        state.check_team(team)?;
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn update_team(&self, team: &Team) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        require(state.teams.contains_key(&team.id()), EntityRef::Team(team.id()))?;
        state.check_team(team)?;
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_team(&self, id: TeamId) -> TrackerRepositoryResult<Option<Team>> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn list_teams(&self) -> TrackerRepositoryResult<Vec<Team>> {
        let state = self.read()?;
        Ok(sorted_by_key(state.teams.values().cloned(), |team| {
            team.name().clone()
        }))
    }

    async fn delete_team(&self, id: TeamId) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        if state.teams.remove(&id).is_none() {
            return Err(TrackerRepositoryError::NotFound(EntityRef::Team(id)));
        }
        for project in state.projects.values_mut() {
            project.detach_team(id);
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryTrackerStore {
    async fn store_project(&self, project: &Project) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        state.check_project(project)?;
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> TrackerRepositoryResult<Project> {
        let mut state = self.write()?;
        let completion = state
            .projects
            .get(&project.id())
            .map(Project::completion)
            .ok_or(TrackerRepositoryError::NotFound(EntityRef::Project(project.id())))?;
        state.check_project(project)?;
        let mut stored = project.clone();
        stored.set_completion(completion);
        state.projects.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn toggle_project_completion(
        &self,
        id: ProjectId,
    ) -> TrackerRepositoryResult<Project> {
        let mut state = self.write()?;
        let incomplete = state.incomplete_tasks(id);
        let project = state
            .projects
            .get_mut(&id)
            .ok_or(TrackerRepositoryError::NotFound(EntityRef::Project(id)))?;
        let next = project.completion().toggled();
        if next.is_complete() && incomplete > 0 {
            return Err(TrackerRepositoryError::CompletionBlocked {
                project: id,
                incomplete,
            });
        }
        project.set_completion(next);
        Ok(project.clone())
    }

    async fn find_project(&self, id: ProjectId) -> TrackerRepositoryResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> TrackerRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        Ok(sorted_by_key(state.projects.values().cloned(), |project| {
            project.name().clone()
        }))
    }

    async fn count_projects(&self) -> TrackerRepositoryResult<u64> {
        count(self.read()?.projects.len())
    }

    async fn delete_project(&self, id: ProjectId) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.remove(&id).is_none() {
            return Err(TrackerRepositoryError::NotFound(EntityRef::Project(id)));
        }
        state.remove_tasks_where(|task| task.project() == Some(id));
        Ok(())
    }
}

#[async_trait]
impl TaskTypeRepository for InMemoryTrackerStore {
    async fn store_task_type(&self, task_type: &TaskType) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        state.check_task_type(task_type)?;
        state.task_types.insert(task_type.id(), task_type.clone());
        Ok(())
    }

    async fn update_task_type(&self, task_type: &TaskType) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        require(
            state.task_types.contains_key(&task_type.id()),
            EntityRef::TaskType(task_type.id()),
        )?;
        state.check_task_type(task_type)?;
        state.task_types.insert(task_type.id(), task_type.clone());
        Ok(())
    }

    async fn find_task_type(&self, id: TaskTypeId) -> TrackerRepositoryResult<Option<TaskType>> {
        Ok(self.read()?.task_types.get(&id).cloned())
    }

    async fn list_task_types(&self) -> TrackerRepositoryResult<Vec<TaskType>> {
        let state = self.read()?;
        Ok(sorted_by_key(state.task_types.values().cloned(), |task_type| {
            task_type.name().clone()
        }))
    }

    async fn delete_task_type(&self, id: TaskTypeId) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        if state.task_types.remove(&id).is_none() {
            return Err(TrackerRepositoryError::NotFound(EntityRef::TaskType(id)));
        }
        state.remove_tasks_where(|task| task.task_type() == id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTrackerStore {
    async fn store_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        state.check_task(task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<Task> {
        let mut state = self.write()?;
        let is_completed = state
            .tasks
            .get(&task.id())
            .map(Task::is_completed)
            .ok_or(TrackerRepositoryError::NotFound(EntityRef::Task(task.id())))?;
        state.check_task(task)?;
        let mut stored = task.clone();
        stored.set_completed(is_completed);
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn toggle_task_completion(&self, id: TaskId) -> TrackerRepositoryResult<Task> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TrackerRepositoryError::NotFound(EntityRef::Task(id)))?;
        task.toggle_completion();
        Ok(task.clone())
    }

    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self, filter: &TaskListFilter) -> TrackerRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        sort_by_deadline(&mut tasks, filter.order());
        Ok(tasks)
    }

    async fn tasks_for_project(&self, project: ProjectId) -> TrackerRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.project() == Some(project))
            .cloned()
            .collect();
        sort_by_deadline(&mut tasks, DeadlineOrder::Ascending);
        Ok(tasks)
    }

    async fn count_tasks(&self) -> TrackerRepositoryResult<u64> {
        count(self.read()?.tasks.len())
    }

    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_none() {
            return Err(TrackerRepositoryError::NotFound(EntityRef::Task(id)));
        }
        Ok(())
    }
}
