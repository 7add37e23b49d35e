//! Query parameters for listing tasks.

use crate::tracker::domain::{Task, WorkerId};

/// Completion status selector for task lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    /// Every task.
    #[default]
    All,
    /// Only completed tasks.
    Completed,
    /// Only tasks still open.
    Uncompleted,
}

impl CompletionFilter {
    /// Returns `true` when the task passes the filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.is_completed(),
            Self::Uncompleted => !task.is_completed(),
        }
    }
}

/// Sort direction on task deadlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeadlineOrder {
    /// Earliest deadline first.
    #[default]
    Ascending,
    /// Latest deadline first.
    Descending,
}

/// Filter and ordering for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskListFilter {
    status: CompletionFilter,
    assignee: Option<WorkerId>,
    order: DeadlineOrder,
}

impl TaskListFilter {
    /// Lists every task, earliest deadline first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts by completion status.
    #[must_use]
    pub const fn with_status(mut self, status: CompletionFilter) -> Self {
        self.status = status;
        self
    }

    /// Restricts to tasks assigned to `worker`.
    #[must_use]
    pub const fn assigned_to(mut self, worker: WorkerId) -> Self {
        self.assignee = Some(worker);
        self
    }

    /// Sets the deadline ordering.
    #[must_use]
    pub const fn ordered(mut self, order: DeadlineOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns the completion selector.
    #[must_use]
    pub const fn status(&self) -> CompletionFilter {
        self.status
    }

    /// Returns the assignee restriction, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<WorkerId> {
        self.assignee
    }

    /// Returns the deadline ordering.
    #[must_use]
    pub const fn order(&self) -> DeadlineOrder {
        self.order
    }

    /// Returns `true` when the task passes status and assignee filters.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task) && self.assignee.is_none_or(|worker| task.is_assigned(worker))
    }
}
