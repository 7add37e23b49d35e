//! Diesel row models for tracker persistence.

use super::schema::{
    positions, projects, task_assignees, task_types, tasks, team_members, teams, workers,
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Row for the `positions` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = positions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PositionRow {
    /// Position identifier.
    pub id: Uuid,
    /// Unique position name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Row for the `workers` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = workers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct WorkerRow {
    /// Worker identifier.
    pub id: Uuid,
    /// Unique login handle.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Derived display name.
    pub full_name: String,
    /// Optional job position.
    pub position_id: Option<Uuid>,
    /// Free-form biography.
    pub biography: String,
}

/// Row for the `teams` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TeamRow {
    /// Team identifier.
    pub id: Uuid,
    /// Unique team name.
    pub name: String,
    /// Optional team leader.
    pub leader_id: Option<Uuid>,
}

/// Row for the `team_members` link table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamMemberRow {
    /// Team identifier.
    pub team_id: Uuid,
    /// Member worker identifier.
    pub worker_id: Uuid,
}

/// Row for the `projects` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: Uuid,
    /// Unique project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Optional project leader.
    pub leader_id: Option<Uuid>,
    /// Optional delivering team.
    pub team_id: Option<Uuid>,
    /// Deadline date.
    pub deadline: NaiveDate,
    /// Completion flag.
    pub is_completed: bool,
}

/// Editable `projects` columns. The completion flag is written only by
/// toggles.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChanges {
    /// Unique project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Optional project leader.
    pub leader_id: Option<Uuid>,
    /// Optional delivering team.
    pub team_id: Option<Uuid>,
    /// Deadline date.
    pub deadline: NaiveDate,
}

/// Row for the `task_types` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = task_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskTypeRow {
    /// Task type identifier.
    pub id: Uuid,
    /// Unique task type name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Row for the `tasks` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Task name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Deadline timestamp.
    pub deadline: DateTime<Utc>,
    /// Completion flag.
    pub is_completed: bool,
    /// Priority label.
    pub priority: String,
    /// Task category.
    pub task_type_id: Uuid,
    /// Optional owning project.
    pub project_id: Option<Uuid>,
}

/// Editable `tasks` columns, without the completion flag.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskChanges {
    /// Task name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Deadline timestamp.
    pub deadline: DateTime<Utc>,
    /// Priority label.
    pub priority: String,
    /// Task category.
    pub task_type_id: Uuid,
    /// Optional owning project.
    pub project_id: Option<Uuid>,
}

/// Row for the `task_assignees` link table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_assignees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskAssigneeRow {
    /// Task identifier.
    pub task_id: Uuid,
    /// Assigned worker identifier.
    pub worker_id: Uuid,
}
