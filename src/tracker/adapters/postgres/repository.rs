//! `PostgreSQL` repository implementation for tracker storage.
//!
//! Referential actions (cascade and set-null) are declared on the foreign
//! keys in the migration. Unknown workers in membership and assignment sets
//! are reported as `NotFound` before the link rows are written. Edits never
//! write completion flags; only the toggles flip them, in place.

use super::{
    models::{
        PositionRow, ProjectChanges, ProjectRow, TaskAssigneeRow, TaskChanges, TaskRow,
        TaskTypeRow, TeamMemberRow, TeamRow, WorkerRow,
    },
    schema::{positions, projects, task_assignees, task_types, tasks, team_members, teams, workers},
};
use crate::tracker::{
    domain::{
        EntityName, EntityRef, NamedEntity, PersistedProjectData, PersistedTaskData,
        PersistedTeamData, PersistedWorkerData, Position, PositionId, Project, ProjectId, Task,
        TaskId, TaskPriority, TaskType, TaskTypeId, Team, TeamId, Username, Worker, WorkerId,
        WorkerProfile,
    },
    ports::{
        CompletionFilter, DeadlineOrder, PositionRepository, ProjectRepository, TaskListFilter,
        TaskRepository, TaskTypeRepository, TeamRepository, TrackerRepositoryError,
        TrackerRepositoryResult, WorkerRepository,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by tracker adapters.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

const POSITIONS_NAME_UNIQUE: &str = "positions_name_unique";
const WORKERS_USERNAME_UNIQUE: &str = "workers_username_unique";
const TEAMS_NAME_UNIQUE: &str = "teams_name_unique";
const PROJECTS_NAME_UNIQUE: &str = "projects_name_unique";
const TASK_TYPES_NAME_UNIQUE: &str = "task_types_name_unique";
const TASKS_NAME_PROJECT_UNIQUE: &str = "tasks_name_project_unique";

/// `PostgreSQL`-backed tracker repository.
#[derive(Debug, Clone)]
pub struct PostgresTrackerRepository {
    pool: TrackerPgPool,
}

impl PostgresTrackerRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TrackerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TrackerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TrackerRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TrackerRepositoryError::persistence)?
    }
}

impl From<DieselError> for TrackerRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

fn is_unique_violation(err: &DieselError, constraint: &str) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(constraint)
    )
}

fn duplicate_name(
    entity: NamedEntity,
    name: &str,
    constraint: &'static str,
) -> impl FnOnce(DieselError) -> TrackerRepositoryError {
    let name = name.to_owned();
    move |err| {
        if is_unique_violation(&err, constraint) {
            TrackerRepositoryError::DuplicateName { entity, name }
        } else {
            TrackerRepositoryError::persistence(err)
        }
    }
}

fn task_write_error(
    err: DieselError,
    name: &str,
    project: Option<Uuid>,
) -> TrackerRepositoryError {
    match project {
        Some(project_id) if is_unique_violation(&err, TASKS_NAME_PROJECT_UNIQUE) => {
            TrackerRepositoryError::DuplicateTaskName {
                name: name.to_owned(),
                project: ProjectId::from_uuid(project_id),
            }
        }
        _ => TrackerRepositoryError::persistence(err),
    }
}

const fn require_affected(affected: usize, entity: EntityRef) -> TrackerRepositoryResult<()> {
    if affected == 0 {
        return Err(TrackerRepositoryError::NotFound(entity));
    }
    Ok(())
}

fn to_count(value: i64) -> TrackerRepositoryResult<u64> {
    u64::try_from(value).map_err(TrackerRepositoryError::persistence)
}

fn entity_name(value: String) -> TrackerRepositoryResult<EntityName> {
    EntityName::new(value).map_err(TrackerRepositoryError::persistence)
}

// ── Row conversion ──────────────────────────────────────────────────

fn position_to_row(position: &Position) -> PositionRow {
    PositionRow {
        id: position.id().into_inner(),
        name: position.name().as_str().to_owned(),
        description: position.description().to_owned(),
    }
}

fn row_to_position(row: PositionRow) -> TrackerRepositoryResult<Position> {
    Ok(Position::from_persisted(
        PositionId::from_uuid(row.id),
        entity_name(row.name)?,
        row.description,
    ))
}

fn worker_to_row(worker: &Worker) -> WorkerRow {
    WorkerRow {
        id: worker.id().into_inner(),
        username: worker.username().as_str().to_owned(),
        first_name: worker.first_name().to_owned(),
        last_name: worker.last_name().to_owned(),
        full_name: worker.full_name().to_owned(),
        position_id: worker.position().map(PositionId::into_inner),
        biography: worker.biography().to_owned(),
    }
}

fn row_to_worker(row: WorkerRow) -> TrackerRepositoryResult<Worker> {
    let username = Username::new(row.username).map_err(TrackerRepositoryError::persistence)?;
    Ok(Worker::from_persisted(PersistedWorkerData {
        id: WorkerId::from_uuid(row.id),
        username,
        profile: WorkerProfile {
            first_name: row.first_name,
            last_name: row.last_name,
            position: row.position_id.map(PositionId::from_uuid),
            biography: row.biography,
        },
    }))
}

fn team_to_row(team: &Team) -> TeamRow {
    TeamRow {
        id: team.id().into_inner(),
        name: team.name().as_str().to_owned(),
        leader_id: team.leader().map(WorkerId::into_inner),
    }
}

fn member_rows(team: &Team) -> Vec<TeamMemberRow> {
    team.members()
        .iter()
        .map(|worker| TeamMemberRow {
            team_id: team.id().into_inner(),
            worker_id: worker.into_inner(),
        })
        .collect()
}

fn row_to_team(row: TeamRow, members: BTreeSet<WorkerId>) -> TrackerRepositoryResult<Team> {
    Ok(Team::from_persisted(PersistedTeamData {
        id: TeamId::from_uuid(row.id),
        name: entity_name(row.name)?,
        leader: row.leader_id.map(WorkerId::from_uuid),
        members,
    }))
}

fn project_to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().to_owned(),
        leader_id: project.leader().map(WorkerId::into_inner),
        team_id: project.team().map(TeamId::into_inner),
        deadline: project.deadline(),
        is_completed: project.is_completed(),
    }
}

fn project_changes(project: &Project) -> ProjectChanges {
    ProjectChanges {
        name: project.name().as_str().to_owned(),
        description: project.description().to_owned(),
        leader_id: project.leader().map(WorkerId::into_inner),
        team_id: project.team().map(TeamId::into_inner),
        deadline: project.deadline(),
    }
}

fn row_to_project(row: ProjectRow) -> TrackerRepositoryResult<Project> {
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: entity_name(row.name)?,
        description: row.description,
        leader: row.leader_id.map(WorkerId::from_uuid),
        team: row.team_id.map(TeamId::from_uuid),
        deadline: row.deadline,
        is_completed: row.is_completed,
    }))
}

fn task_type_to_row(task_type: &TaskType) -> TaskTypeRow {
    TaskTypeRow {
        id: task_type.id().into_inner(),
        name: task_type.name().as_str().to_owned(),
        description: task_type.description().to_owned(),
    }
}

fn row_to_task_type(row: TaskTypeRow) -> TrackerRepositoryResult<TaskType> {
    Ok(TaskType::from_persisted(
        TaskTypeId::from_uuid(row.id),
        entity_name(row.name)?,
        row.description,
    ))
}

fn task_to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        name: task.name().as_str().to_owned(),
        description: task.description().to_owned(),
        deadline: task.deadline(),
        is_completed: task.is_completed(),
        priority: task.priority().as_str().to_owned(),
        task_type_id: task.task_type().into_inner(),
        project_id: task.project().map(ProjectId::into_inner),
    }
}

fn task_changes(task: &Task) -> TaskChanges {
    TaskChanges {
        name: task.name().as_str().to_owned(),
        description: task.description().to_owned(),
        deadline: task.deadline(),
        priority: task.priority().as_str().to_owned(),
        task_type_id: task.task_type().into_inner(),
        project_id: task.project().map(ProjectId::into_inner),
    }
}

fn assignee_rows(task: &Task) -> Vec<TaskAssigneeRow> {
    task.assignees()
        .iter()
        .map(|worker| TaskAssigneeRow {
            task_id: task.id().into_inner(),
            worker_id: worker.into_inner(),
        })
        .collect()
}

fn row_to_task(row: TaskRow, assignees: BTreeSet<WorkerId>) -> TrackerRepositoryResult<Task> {
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TrackerRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        name: entity_name(row.name)?,
        description: row.description,
        deadline: row.deadline,
        is_completed: row.is_completed,
        priority,
        task_type: TaskTypeId::from_uuid(row.task_type_id),
        project: row.project_id.map(ProjectId::from_uuid),
        assignees,
    }))
}

// ── Link tables ─────────────────────────────────────────────────────

fn load_members(
    connection: &mut PgConnection,
    team_ids: Vec<Uuid>,
) -> TrackerRepositoryResult<HashMap<Uuid, BTreeSet<WorkerId>>> {
    let rows = team_members::table
        .filter(team_members::team_id.eq_any(team_ids))
        .select(TeamMemberRow::as_select())
        .load::<TeamMemberRow>(connection)?;
    let mut grouped: HashMap<Uuid, BTreeSet<WorkerId>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.team_id)
            .or_default()
            .insert(WorkerId::from_uuid(row.worker_id));
    }
    Ok(grouped)
}

fn load_teams(
    connection: &mut PgConnection,
    rows: Vec<TeamRow>,
) -> TrackerRepositoryResult<Vec<Team>> {
    let ids = rows.iter().map(|row| row.id).collect();
    let mut members = load_members(connection, ids)?;
    rows.into_iter()
        .map(|row| {
            let team_members = members.remove(&row.id).unwrap_or_default();
            row_to_team(row, team_members)
        })
        .collect()
}

/// Reports the first referenced worker that does not exist, in id order.
fn require_workers_exist(
    connection: &mut PgConnection,
    ids: impl Iterator<Item = Uuid>,
) -> TrackerRepositoryResult<()> {
    let wanted: BTreeSet<Uuid> = ids.collect();
    if wanted.is_empty() {
        return Ok(());
    }
    let found: BTreeSet<Uuid> = workers::table
        .filter(workers::id.eq_any(wanted.iter().copied().collect::<Vec<_>>()))
        .select(workers::id)
        .load::<Uuid>(connection)?
        .into_iter()
        .collect();
    wanted.difference(&found).next().map_or(Ok(()), |missing| {
        Err(TrackerRepositoryError::NotFound(EntityRef::Worker(
            WorkerId::from_uuid(*missing),
        )))
    })
}

fn replace_members(
    connection: &mut PgConnection,
    team_id: Uuid,
    rows: &[TeamMemberRow],
) -> TrackerRepositoryResult<()> {
    require_workers_exist(connection, rows.iter().map(|row| row.worker_id))?;
    diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id)))
        .execute(connection)?;
    if !rows.is_empty() {
        diesel::insert_into(team_members::table)
            .values(rows)
            .execute(connection)?;
    }
    Ok(())
}

fn load_assignees(
    connection: &mut PgConnection,
    task_ids: Vec<Uuid>,
) -> TrackerRepositoryResult<HashMap<Uuid, BTreeSet<WorkerId>>> {
    let rows = task_assignees::table
        .filter(task_assignees::task_id.eq_any(task_ids))
        .select(TaskAssigneeRow::as_select())
        .load::<TaskAssigneeRow>(connection)?;
    let mut grouped: HashMap<Uuid, BTreeSet<WorkerId>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.task_id)
            .or_default()
            .insert(WorkerId::from_uuid(row.worker_id));
    }
    Ok(grouped)
}

fn load_tasks(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TrackerRepositoryResult<Vec<Task>> {
    let ids = rows.iter().map(|row| row.id).collect();
    let mut assignees = load_assignees(connection, ids)?;
    rows.into_iter()
        .map(|row| {
            let task_assignees = assignees.remove(&row.id).unwrap_or_default();
            row_to_task(row, task_assignees)
        })
        .collect()
}

fn load_task(connection: &mut PgConnection, row: TaskRow) -> TrackerRepositoryResult<Task> {
    let id = TaskId::from_uuid(row.id);
    load_tasks(connection, vec![row])?
        .pop()
        .ok_or(TrackerRepositoryError::NotFound(EntityRef::Task(id)))
}

fn replace_assignees(
    connection: &mut PgConnection,
    task_id: Uuid,
    rows: &[TaskAssigneeRow],
) -> TrackerRepositoryResult<()> {
    require_workers_exist(connection, rows.iter().map(|row| row.worker_id))?;
    diesel::delete(task_assignees::table.filter(task_assignees::task_id.eq(task_id)))
        .execute(connection)?;
    if !rows.is_empty() {
        diesel::insert_into(task_assignees::table)
            .values(rows)
            .execute(connection)?;
    }
    Ok(())
}

// ── Port implementations ────────────────────────────────────────────

#[async_trait]
impl WorkerRepository for PostgresTrackerRepository {
    async fn store_worker(&self, worker: &Worker) -> TrackerRepositoryResult<()> {
        let row = worker_to_row(worker);
        self.run_blocking(move |connection| {
            diesel::insert_into(workers::table)
                .values(&row)
                .execute(connection)
                .map_err(duplicate_name(
                    NamedEntity::Worker,
                    &row.username,
                    WORKERS_USERNAME_UNIQUE,
                ))?;
            Ok(())
        })
        .await
    }

    async fn update_worker(&self, worker: &Worker) -> TrackerRepositoryResult<()> {
        let row = worker_to_row(worker);
        let id = worker.id();
        self.run_blocking(move |connection| {
            let affected = diesel::update(workers::table.find(row.id))
                .set(&row)
                .execute(connection)
                .map_err(duplicate_name(
                    NamedEntity::Worker,
                    &row.username,
                    WORKERS_USERNAME_UNIQUE,
                ))?;
            require_affected(affected, EntityRef::Worker(id))
        })
        .await
    }

    async fn find_worker(&self, id: WorkerId) -> TrackerRepositoryResult<Option<Worker>> {
        self.run_blocking(move |connection| {
            let row = workers::table
                .find(id.into_inner())
                .select(WorkerRow::as_select())
                .first::<WorkerRow>(connection)
                .optional()?;
            row.map(row_to_worker).transpose()
        })
        .await
    }

    async fn find_workers(
        &self,
        ids: &BTreeSet<WorkerId>,
    ) -> TrackerRepositoryResult<Vec<Worker>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            workers::table
                .filter(workers::id.eq_any(uuids))
                .order(workers::username.asc())
                .select(WorkerRow::as_select())
                .load::<WorkerRow>(connection)?
                .into_iter()
                .map(row_to_worker)
                .collect()
        })
        .await
    }

    async fn list_workers(&self) -> TrackerRepositoryResult<Vec<Worker>> {
        self.run_blocking(|connection| {
            workers::table
                .order(workers::username.asc())
                .select(WorkerRow::as_select())
                .load::<WorkerRow>(connection)?
                .into_iter()
                .map(row_to_worker)
                .collect()
        })
        .await
    }

    async fn count_workers(&self) -> TrackerRepositoryResult<u64> {
        self.run_blocking(|connection| to_count(workers::table.count().get_result(connection)?))
            .await
    }

    async fn delete_worker(&self, id: WorkerId) -> TrackerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(workers::table.find(id.into_inner())).execute(connection)?;
            require_affected(affected, EntityRef::Worker(id))
        })
        .await
    }
}

#[async_trait]
impl PositionRepository for PostgresTrackerRepository {
    async fn store_position(&self, position: &Position) -> TrackerRepositoryResult<()> {
        let row = position_to_row(position);
        self.run_blocking(move |connection| {
            diesel::insert_into(positions::table)
                .values(&row)
                .execute(connection)
                .map_err(duplicate_name(
                    NamedEntity::Position,
                    &row.name,
                    POSITIONS_NAME_UNIQUE,
                ))?;
            Ok(())
        })
        .await
    }

    async fn update_position(&self, position: &Position) -> TrackerRepositoryResult<()> {
        let row = position_to_row(position);
        let id = position.id();
        self.run_blocking(move |connection| {
            let affected = diesel::update(positions::table.find(row.id))
                .set(&row)
                .execute(connection)
                .map_err(duplicate_name(
                    NamedEntity::Position,
                    &row.name,
                    POSITIONS_NAME_UNIQUE,
                ))?;
            require_affected(affected, EntityRef::Position(id))
        })
        .await
    }

    async fn find_position(&self, id: PositionId) -> TrackerRepositoryResult<Option<Position>> {
        self.run_blocking(move |connection| {
            let row = positions::table
                .find(id.into_inner())
                .select(PositionRow::as_select())
                .first::<PositionRow>(connection)
                .optional()?;
            row.map(row_to_position).transpose()
        })
        .await
    }

    async fn list_positions(&self) -> TrackerRepositoryResult<Vec<Position>> {
        self.run_blocking(|connection| {
            positions::table
                .order(positions::name.asc())
                .select(PositionRow::as_select())
                .load::<PositionRow>(connection)?
                .into_iter()
                .map(row_to_position)
                .collect()
        })
        .await
    }

    async fn delete_position(&self, id: PositionId) -> TrackerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(positions::table.find(id.into_inner())).execute(connection)?;
            require_affected(affected, EntityRef::Position(id))
        })
        .await
    }
}

#[async_trait]
impl TeamRepository for PostgresTrackerRepository {
    async fn store_team(&self, team: &Team) -> TrackerRepositoryResult<()> {
        let row = team_to_row(team);
        let members = member_rows(team);
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                diesel::insert_into(teams::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(duplicate_name(NamedEntity::Team, &row.name, TEAMS_NAME_UNIQUE))?;
                replace_members(tx, row.id, &members)
            })
        })
        .await
    }

    async fn update_team(&self, team: &Team) -> TrackerRepositoryResult<()> {
        let row = team_to_row(team);
        let members = member_rows(team);
        let id = team.id();
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                let affected = diesel::update(teams::table.find(row.id))
                    .set(&row)
                    .execute(tx)
                    .map_err(duplicate_name(NamedEntity::Team, &row.name, TEAMS_NAME_UNIQUE))?;
                require_affected(affected, EntityRef::Team(id))?;
                replace_members(tx, row.id, &members)
            })
        })
        .await
    }

    async fn find_team(&self, id: TeamId) -> TrackerRepositoryResult<Option<Team>> {
        self.run_blocking(move |connection| {
            let row = teams::table
                .find(id.into_inner())
                .select(TeamRow::as_select())
                .first::<TeamRow>(connection)
                .optional()?;
            let Some(team_row) = row else {
                return Ok(None);
            };
            Ok(load_teams(connection, vec![team_row])?.pop())
        })
        .await
    }

    async fn list_teams(&self) -> TrackerRepositoryResult<Vec<Team>> {
        self.run_blocking(|connection| {
            let rows = teams::table
                .order(teams::name.asc())
                .select(TeamRow::as_select())
                .load::<TeamRow>(connection)?;
            load_teams(connection, rows)
        })
        .await
    }

    async fn delete_team(&self, id: TeamId) -> TrackerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(teams::table.find(id.into_inner())).execute(connection)?;
            require_affected(affected, EntityRef::Team(id))
        })
        .await
    }
}

#[async_trait]
impl ProjectRepository for PostgresTrackerRepository {
    async fn store_project(&self, project: &Project) -> TrackerRepositoryResult<()> {
        let row = project_to_row(project);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(duplicate_name(
                    NamedEntity::Project,
                    &row.name,
                    PROJECTS_NAME_UNIQUE,
                ))?;
            Ok(())
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> TrackerRepositoryResult<Project> {
        let changes = project_changes(project);
        let id = project.id();
        self.run_blocking(move |connection| {
            let row = diesel::update(projects::table.find(id.into_inner()))
                .set(&changes)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .optional()
                .map_err(duplicate_name(
                    NamedEntity::Project,
                    &changes.name,
                    PROJECTS_NAME_UNIQUE,
                ))?
                .ok_or(TrackerRepositoryError::NotFound(EntityRef::Project(id)))?;
            row_to_project(row)
        })
        .await
    }

    async fn toggle_project_completion(
        &self,
        id: ProjectId,
    ) -> TrackerRepositoryResult<Project> {
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                // The row lock conflicts with the key-share lock taken by
                // foreign key checks of concurrent task inserts.
                let row = projects::table
                    .find(id.into_inner())
                    .select(ProjectRow::as_select())
                    .for_update()
                    .first::<ProjectRow>(tx)
                    .optional()?
                    .ok_or(TrackerRepositoryError::NotFound(EntityRef::Project(id)))?;

                let completing = !row.is_completed;
                if completing {
                    // Owned task rows stay locked until commit so a toggle
                    // cannot reopen one after the count.
                    let owned: Vec<bool> = tasks::table
                        .filter(tasks::project_id.eq(row.id))
                        .select(tasks::is_completed)
                        .for_update()
                        .load(tx)?;
                    let incomplete = owned.iter().filter(|done| !**done).count();
                    if incomplete > 0 {
                        return Err(TrackerRepositoryError::CompletionBlocked {
                            project: id,
                            incomplete,
                        });
                    }
                }

                let updated = diesel::update(projects::table.find(row.id))
                    .set(projects::is_completed.eq(completing))
                    .returning(ProjectRow::as_returning())
                    .get_result::<ProjectRow>(tx)?;
                row_to_project(updated)
            })
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> TrackerRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_projects(&self) -> TrackerRepositoryResult<Vec<Project>> {
        self.run_blocking(|connection| {
            projects::table
                .order(projects::name.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?
                .into_iter()
                .map(row_to_project)
                .collect()
        })
        .await
    }

    async fn count_projects(&self) -> TrackerRepositoryResult<u64> {
        self.run_blocking(|connection| to_count(projects::table.count().get_result(connection)?))
            .await
    }

    async fn delete_project(&self, id: ProjectId) -> TrackerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(projects::table.find(id.into_inner())).execute(connection)?;
            require_affected(affected, EntityRef::Project(id))
        })
        .await
    }
}

#[async_trait]
impl TaskTypeRepository for PostgresTrackerRepository {
    async fn store_task_type(&self, task_type: &TaskType) -> TrackerRepositoryResult<()> {
        let row = task_type_to_row(task_type);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_types::table)
                .values(&row)
                .execute(connection)
                .map_err(duplicate_name(
                    NamedEntity::TaskType,
                    &row.name,
                    TASK_TYPES_NAME_UNIQUE,
                ))?;
            Ok(())
        })
        .await
    }

    async fn update_task_type(&self, task_type: &TaskType) -> TrackerRepositoryResult<()> {
        let row = task_type_to_row(task_type);
        let id = task_type.id();
        self.run_blocking(move |connection| {
            let affected = diesel::update(task_types::table.find(row.id))
                .set(&row)
                .execute(connection)
                .map_err(duplicate_name(
                    NamedEntity::TaskType,
                    &row.name,
                    TASK_TYPES_NAME_UNIQUE,
                ))?;
            require_affected(affected, EntityRef::TaskType(id))
        })
        .await
    }

    async fn find_task_type(&self, id: TaskTypeId) -> TrackerRepositoryResult<Option<TaskType>> {
        self.run_blocking(move |connection| {
            let row = task_types::table
                .find(id.into_inner())
                .select(TaskTypeRow::as_select())
                .first::<TaskTypeRow>(connection)
                .optional()?;
            row.map(row_to_task_type).transpose()
        })
        .await
    }

    async fn list_task_types(&self) -> TrackerRepositoryResult<Vec<TaskType>> {
        self.run_blocking(|connection| {
            task_types::table
                .order(task_types::name.asc())
                .select(TaskTypeRow::as_select())
                .load::<TaskTypeRow>(connection)?
                .into_iter()
                .map(row_to_task_type)
                .collect()
        })
        .await
    }

    async fn delete_task_type(&self, id: TaskTypeId) -> TrackerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(task_types::table.find(id.into_inner())).execute(connection)?;
            require_affected(affected, EntityRef::TaskType(id))
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTrackerRepository {
    async fn store_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let row = task_to_row(task);
        let assignees = assignee_rows(task);
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                diesel::insert_into(tasks::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| task_write_error(err, &row.name, row.project_id))?;
                replace_assignees(tx, row.id, &assignees)
            })
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<Task> {
        let changes = task_changes(task);
        let assignees = assignee_rows(task);
        let id = task.id();
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                let row = diesel::update(tasks::table.find(id.into_inner()))
                    .set(&changes)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)
                    .optional()
                    .map_err(|err| task_write_error(err, &changes.name, changes.project_id))?
                    .ok_or(TrackerRepositoryError::NotFound(EntityRef::Task(id)))?;
                replace_assignees(tx, row.id, &assignees)?;
                load_task(tx, row)
            })
        })
        .await
    }

    async fn toggle_task_completion(&self, id: TaskId) -> TrackerRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                let row = diesel::update(tasks::table.find(id.into_inner()))
                    .set(tasks::is_completed.eq(diesel::dsl::not(tasks::is_completed)))
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)
                    .optional()?
                    .ok_or(TrackerRepositoryError::NotFound(EntityRef::Task(id)))?;
                load_task(tx, row)
            })
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            let Some(task_row) = row else {
                return Ok(None);
            };
            Ok(load_tasks(connection, vec![task_row])?.pop())
        })
        .await
    }

    async fn list_tasks(&self, filter: &TaskListFilter) -> TrackerRepositoryResult<Vec<Task>> {
        let query_filter = *filter;
        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            query = match query_filter.status() {
                CompletionFilter::All => query,
                CompletionFilter::Completed => query.filter(tasks::is_completed.eq(true)),
                CompletionFilter::Uncompleted => query.filter(tasks::is_completed.eq(false)),
            };
            if let Some(worker) = query_filter.assignee() {
                let assigned = task_assignees::table
                    .filter(task_assignees::worker_id.eq(worker.into_inner()))
                    .select(task_assignees::task_id);
                query = query.filter(tasks::id.eq_any(assigned));
            }
            query = match query_filter.order() {
                DeadlineOrder::Ascending => query.order((tasks::deadline.asc(), tasks::name.asc())),
                DeadlineOrder::Descending => {
                    query.order((tasks::deadline.desc(), tasks::name.asc()))
                }
            };
            let rows = query.load::<TaskRow>(connection)?;
            load_tasks(connection, rows)
        })
        .await
    }

    async fn tasks_for_project(&self, project: ProjectId) -> TrackerRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project.into_inner()))
                .order((tasks::deadline.asc(), tasks::name.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            load_tasks(connection, rows)
        })
        .await
    }

    async fn count_tasks(&self) -> TrackerRepositoryResult<u64> {
        self.run_blocking(|connection| to_count(tasks::table.count().get_result(connection)?))
            .await
    }

    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner())).execute(connection)?;
            require_affected(affected, EntityRef::Task(id))
        })
        .await
    }
}
