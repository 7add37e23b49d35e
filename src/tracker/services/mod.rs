//! Application services for task and project tracking.
//!
//! Every mutation re-reads the state it validates against, then writes
//! through the repository ports, which re-check uniqueness and the project
//! completion guard at write time.

mod assignment;
mod catalog;
mod completion;
mod error;
mod lookup;
mod overview;
mod project;
mod staff;
mod task;

pub use assignment::AssignmentService;
pub use catalog::{CatalogEntryRequest, CatalogService};
pub use completion::CompletionCoordinator;
pub use error::{TrackerServiceError, TrackerServiceResult};
pub use overview::{OverviewService, TrackerOverview};
pub use project::{ProjectRequest, ProjectService};
pub use staff::{CreateTeamRequest, RegisterWorkerRequest, StaffService, UpdateTeamRequest};
pub use task::{TaskRequest, TaskService};
