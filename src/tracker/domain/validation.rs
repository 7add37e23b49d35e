//! Validation rules for task and project mutations.
//!
//! Each rule is a pure function returning `Ok(())` or a specific
//! [`ValidationError`]. [`validate_task`] and [`validate_project`] compose the
//! rules in a fixed order and stop at the first failure. Callers run them
//! before every insert and every update; nothing here touches storage.

use super::{Project, Task, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};

/// Stored state a task is validated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskValidationContext<'a> {
    project: Option<&'a Project>,
    project_tasks: &'a [Task],
}

impl<'a> TaskValidationContext<'a> {
    /// Context for a task outside any project.
    #[must_use]
    pub const fn standalone() -> Self {
        Self {
            project: None,
            project_tasks: &[],
        }
    }

    /// Context for a task inside `project`, alongside the tasks currently
    /// stored for that project.
    #[must_use]
    pub const fn within(project: &'a Project, project_tasks: &'a [Task]) -> Self {
        Self {
            project: Some(project),
            project_tasks,
        }
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project(&self) -> Option<&'a Project> {
        self.project
    }

    /// Returns the stored tasks sharing the project scope.
    #[must_use]
    pub const fn project_tasks(&self) -> &'a [Task] {
        self.project_tasks
    }
}

/// Rejects task deadlines earlier than `now`.
///
/// # Errors
///
/// Returns [`ValidationError::PastDeadline`] when `task.deadline() < now`.
pub fn ensure_task_deadline_not_past(task: &Task, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if task.deadline() < now {
        return Err(ValidationError::past_deadline(task.deadline(), now));
    }
    Ok(())
}

/// Rejects task deadlines whose date falls after the project deadline.
///
/// # Errors
///
/// Returns [`ValidationError::DeadlineExceedsProject`] when the task belongs
/// to `project` and `task.deadline().date_naive() > project.deadline()`.
pub fn ensure_task_within_project_deadline(
    task: &Task,
    project: Option<&Project>,
) -> Result<(), ValidationError> {
    let Some(owner) = project else {
        return Ok(());
    };
    if task.deadline().date_naive() > owner.deadline() {
        return Err(ValidationError::DeadlineExceedsProject {
            task_deadline: task.deadline(),
            project_deadline: owner.deadline(),
        });
    }
    Ok(())
}

/// Rejects a task name already used by another task of the same project.
///
/// Tasks without a project are never in conflict with each other.
///
/// # Errors
///
/// Returns [`ValidationError::DuplicateNameInProject`] on collision.
pub fn ensure_task_name_unique(task: &Task, scope_tasks: &[Task]) -> Result<(), ValidationError> {
    let Some(project) = task.project() else {
        return Ok(());
    };
    let collides = scope_tasks.iter().any(|other| {
        other.id() != task.id() && other.project() == Some(project) && other.name() == task.name()
    });
    if collides {
        return Err(ValidationError::DuplicateNameInProject {
            name: task.name().as_str().to_owned(),
            project: Some(project),
        });
    }
    Ok(())
}

/// Runs every task rule in order.
///
/// # Errors
///
/// Returns the first [`ValidationError`] raised by
/// [`ensure_task_deadline_not_past`], [`ensure_task_within_project_deadline`]
/// or [`ensure_task_name_unique`].
pub fn validate_task(
    task: &Task,
    context: &TaskValidationContext<'_>,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    ensure_task_deadline_not_past(task, now)?;
    ensure_task_within_project_deadline(task, context.project())?;
    ensure_task_name_unique(task, context.project_tasks())
}

/// Rejects project deadlines earlier than `today`.
///
/// # Errors
///
/// Returns [`ValidationError::PastDeadline`] when `project.deadline() < today`.
pub fn ensure_project_deadline_not_past(
    project: &Project,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if project.deadline() < today {
        return Err(ValidationError::past_deadline(project.deadline(), today));
    }
    Ok(())
}

/// Rejects a completed project that still owns incomplete tasks.
///
/// # Errors
///
/// Returns [`ValidationError::IncompleteTasksExist`] when the project is
/// marked complete and any task in `owned_tasks` is not.
pub fn ensure_project_completable(
    project: &Project,
    owned_tasks: &[Task],
) -> Result<(), ValidationError> {
    if !project.is_completed() {
        return Ok(());
    }
    let incomplete = owned_tasks
        .iter()
        .filter(|task| task.project() == Some(project.id()) && !task.is_completed())
        .count();
    if incomplete > 0 {
        return Err(ValidationError::IncompleteTasksExist {
            project: project.id(),
            incomplete,
        });
    }
    Ok(())
}

/// Runs every project rule in order.
///
/// # Errors
///
/// Returns the first [`ValidationError`] raised by
/// [`ensure_project_deadline_not_past`] or [`ensure_project_completable`].
pub fn validate_project(
    project: &Project,
    owned_tasks: &[Task],
    today: NaiveDate,
) -> Result<(), ValidationError> {
    ensure_project_deadline_not_past(project, today)?;
    ensure_project_completable(project, owned_tasks)
}
