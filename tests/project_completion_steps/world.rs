//! Shared world state for project completion BDD scenarios.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use std::sync::Arc;
use taskboard::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{Project, Task, TaskType},
    services::{
        CatalogService, CompletionCoordinator, ProjectService, TaskService, TrackerServiceError,
    },
};

/// Scenario world for project completion behaviour tests.
pub struct CompletionWorld {
    pub catalog: CatalogService<InMemoryTrackerStore>,
    pub projects: ProjectService<InMemoryTrackerStore, DefaultClock>,
    pub tasks: TaskService<InMemoryTrackerStore, DefaultClock>,
    pub completion: CompletionCoordinator<InMemoryTrackerStore>,
    pub task_type: Option<TaskType>,
    pub project: Option<Project>,
    pub created_tasks: Vec<Task>,
    pub last_toggle_result: Option<Result<Project, TrackerServiceError>>,
}

impl CompletionWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTrackerStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            catalog: CatalogService::new(Arc::clone(&store)),
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskService::new(Arc::clone(&store), clock),
            completion: CompletionCoordinator::new(store),
            task_type: None,
            project: None,
            created_tasks: Vec::new(),
            last_toggle_result: None,
        }
    }

    /// Returns the project created by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no project has been created yet.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Finds a task created earlier in the scenario by name.
    ///
    /// # Errors
    ///
    /// Returns an error when no such task was created.
    pub fn task_named(&self, name: &str) -> Result<&Task, eyre::Report> {
        self.created_tasks
            .iter()
            .find(|task| task.name().as_str() == name)
            .ok_or_else(|| eyre::eyre!("no task named '{name}' in scenario world"))
    }
}

impl Default for CompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CompletionWorld {
    CompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Returns the wall-clock instant offset by whole days.
#[must_use]
pub fn days_from_now(days: u32) -> DateTime<Utc> {
    DefaultClock.utc() + Duration::days(i64::from(days))
}

/// Returns today's UTC date offset by whole days.
#[must_use]
pub fn days_from_today(days: u32) -> NaiveDate {
    days_from_now(days).date_naive()
}
