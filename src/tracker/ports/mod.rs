//! Port contracts for tracker persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by tracker services.

pub mod query;
pub mod repository;

pub use query::{CompletionFilter, DeadlineOrder, TaskListFilter};
pub use repository::{
    PositionRepository, ProjectRepository, TaskRepository, TaskTypeRepository, TeamRepository,
    TrackerRepositoryError, TrackerRepositoryResult, WorkerRepository,
};
