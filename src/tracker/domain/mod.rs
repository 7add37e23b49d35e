//! Domain model for task and project tracking.
//!
//! Entities carry data and the small mutators services need. The invariants
//! that span entities (deadlines, name scopes, completion guards) live in
//! [`validation`] and the assignment rules in [`eligibility`], both as pure
//! functions over already-loaded state.

mod catalog;
mod eligibility;
mod error;
mod ids;
mod name;
mod project;
mod task;
mod team;
mod validation;
mod worker;

pub use catalog::{Position, TaskType};
pub use eligibility::{EligibilityScope, ProjectStaffing};
pub use error::{ParseTaskPriorityError, TrackerDomainError, ValidationError};
pub use ids::{EntityRef, NamedEntity, PositionId, ProjectId, TaskId, TaskTypeId, TeamId, WorkerId};
pub use name::{EntityName, Username};
pub use project::{PersistedProjectData, Project, ProjectCompletion};
pub use task::{PersistedTaskData, Task, TaskPriority};
pub use team::{PersistedTeamData, Team};
pub use validation::{
    TaskValidationContext, ensure_project_completable, ensure_project_deadline_not_past,
    ensure_task_deadline_not_past, ensure_task_name_unique, ensure_task_within_project_deadline,
    validate_project, validate_task,
};
pub use worker::{PersistedWorkerData, Worker, WorkerProfile, derive_full_name};
