//! Dashboard counters.

use super::TrackerServiceResult;
use crate::tracker::ports::{ProjectRepository, TaskRepository, WorkerRepository};
use serde::Serialize;
use std::sync::Arc;

/// Entity counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackerOverview {
    /// Number of tasks.
    pub tasks: u64,
    /// Number of projects.
    pub projects: u64,
    /// Number of workers.
    pub workers: u64,
}

/// Read-only summary queries.
#[derive(Clone)]
pub struct OverviewService<R>
where
    R: TaskRepository + ProjectRepository + WorkerRepository,
{
    repository: Arc<R>,
}

impl<R> OverviewService<R>
where
    R: TaskRepository + ProjectRepository + WorkerRepository,
{
    /// Creates a new overview service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Counts tasks, projects, and workers.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when a count fails.
    pub async fn overview(&self) -> TrackerServiceResult<TrackerOverview> {
        Ok(TrackerOverview {
            tasks: self.repository.count_tasks().await?,
            projects: self.repository.count_projects().await?,
            workers: self.repository.count_workers().await?,
        })
    }
}
