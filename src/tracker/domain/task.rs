//! Task aggregate and priority levels.

use super::{EntityName, ParseTaskPriorityError, ProjectId, TaskId, TaskTypeId, WorkerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Urgency of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Must be handled immediately.
    Urgent,
    /// Should be handled soon.
    High,
    /// Normal priority.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "URGENT",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "URGENT" => Ok(Self::Urgent),
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// A unit of work with a deadline, priority and assignees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: EntityName,
    description: String,
    deadline: DateTime<Utc>,
    is_completed: bool,
    priority: TaskPriority,
    task_type: TaskTypeId,
    project: Option<ProjectId>,
    assignees: BTreeSet<WorkerId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: EntityName,
    /// Persisted description.
    pub description: String,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted category.
    pub task_type: TaskTypeId,
    /// Persisted owning project, if any.
    pub project: Option<ProjectId>,
    /// Persisted assignee set.
    pub assignees: BTreeSet<WorkerId>,
}

impl Task {
    /// Creates a new incomplete task with medium priority.
    #[must_use]
    pub fn new(name: EntityName, deadline: DateTime<Utc>, task_type: TaskTypeId) -> Self {
        Self {
            id: TaskId::new(),
            name,
            description: String::new(),
            deadline,
            is_completed: false,
            priority: TaskPriority::Medium,
            task_type,
            project: None,
            assignees: BTreeSet::new(),
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

    /// Sets the initial assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = WorkerId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            deadline: data.deadline,
            is_completed: data.is_completed,
            priority: data.priority,
            task_type: data.task_type,
            project: data.project,
            assignees: data.assignees,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &EntityName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns `true` when the task is done.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the category.
    #[must_use]
    pub const fn task_type(&self) -> TaskTypeId {
        self.task_type
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project(&self) -> Option<ProjectId> {
        self.project
    }

    /// Returns the assignee set.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<WorkerId> {
        &self.assignees
    }

    /// Returns `true` when the worker is assigned.
    #[must_use]
    pub fn is_assigned(&self, worker: WorkerId) -> bool {
        self.assignees.contains(&worker)
    }

    /// Renames the task.
    pub fn rename(&mut self, name: EntityName) {
        self.name = name;
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Moves the deadline.
    pub const fn reschedule(&mut self, deadline: DateTime<Utc>) {
        self.deadline = deadline;
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Replaces the category.
    pub const fn set_task_type(&mut self, task_type: TaskTypeId) {
        self.task_type = task_type;
    }

    /// Moves the task to another project, or out of any project.
    pub const fn set_project(&mut self, project: Option<ProjectId>) {
        self.project = project;
    }

    /// Flips the completion flag and returns the new value.
    pub const fn toggle_completion(&mut self) -> bool {
        self.is_completed = !self.is_completed;
        self.is_completed
    }

    /// Overwrites the completion flag.
    pub const fn set_completed(&mut self, is_completed: bool) {
        self.is_completed = is_completed;
    }

    /// Adds an assignee. Returns `false` when already assigned.
    pub fn assign(&mut self, worker: WorkerId) -> bool {
        self.assignees.insert(worker)
    }

    /// Removes an assignee. Returns `false` when not assigned.
    pub fn unassign(&mut self, worker: WorkerId) -> bool {
        self.assignees.remove(&worker)
    }

    /// Replaces the whole assignee set.
    pub fn replace_assignees(&mut self, assignees: BTreeSet<WorkerId>) {
        self.assignees = assignees;
    }
}
