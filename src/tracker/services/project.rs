//! Project lifecycle orchestration.

use super::{
    TrackerServiceResult,
    lookup::{require_project, require_team, require_worker},
};
use crate::tracker::{
    domain::{EntityName, Project, ProjectId, Task, TeamId, WorkerId, validate_project},
    ports::{ProjectRepository, TaskRepository, TeamRepository, WorkerRepository},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Request payload for creating or editing a project.
///
/// On update, every field is replaced; unset optional fields are cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    name: String,
    deadline: NaiveDate,
    description: String,
    leader: Option<WorkerId>,
    team: Option<TeamId>,
}

impl ProjectRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            deadline,
            description: String::new(),
            leader: None,
            team: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the project leader.
    #[must_use]
    pub const fn with_leader(mut self, leader: WorkerId) -> Self {
        self.leader = Some(leader);
        self
    }

    /// Sets the delivering team.
    #[must_use]
    pub const fn with_team(mut self, team: TeamId) -> Self {
        self.team = Some(team);
        self
    }
}

/// Project creation, editing, and listing.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository + TaskRepository + WorkerRepository + TeamRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository + TaskRepository + WorkerRepository + TeamRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project after validating its deadline.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an invalid name, `NotFound` for an unknown
    /// leader or team, `Validation` for a past deadline, or `Repository`
    /// when the name is taken.
    pub async fn create_project(&self, request: ProjectRequest) -> TrackerServiceResult<Project> {
        let name = EntityName::new(request.name.as_str())?;
        self.check_references(&request).await?;

        let mut project =
            Project::new(name, request.deadline).with_description(request.description);
        if let Some(leader) = request.leader {
            project = project.with_leader(leader);
        }
        if let Some(team) = request.team {
            project = project.with_team(team);
        }

        if let Err(err) = validate_project(&project, &[], self.today()) {
            warn!(project = %project.name(), error = %err, "project rejected");
            return Err(err.into());
        }
        self.repository.store_project(&project).await?;
        debug!(project = %project.id(), deadline = %project.deadline(), "project created");
        Ok(project)
    }

    /// Replaces a project's editable fields and re-validates it.
    ///
    /// The completion flag is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project, leader, or team, `Domain`
    /// for an invalid name, `Validation` when a rule fails, or `Repository`
    /// when the name is taken.
    pub async fn update_project(
        &self,
        id: ProjectId,
        request: ProjectRequest,
    ) -> TrackerServiceResult<Project> {
        let name = EntityName::new(request.name.as_str())?;
        let mut project = require_project(&*self.repository, id).await?;
        self.check_references(&request).await?;

        project.rename(name);
        project.set_description(request.description);
        project.set_leader(request.leader);
        project.set_team(request.team);
        project.reschedule(request.deadline);

        let owned = self.repository.tasks_for_project(id).await?;
        if let Err(err) = validate_project(&project, &owned, self.today()) {
            warn!(project = %id, error = %err, "project update rejected");
            return Err(err.into());
        }
        let stored = self.repository.update_project(&project).await?;
        debug!(project = %id, "project updated");
        Ok(stored)
    }

    /// Deletes a project together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project.
    pub async fn delete_project(&self, id: ProjectId) -> TrackerServiceResult<()> {
        self.repository.delete_project(id).await?;
        debug!(project = %id, "project deleted");
        Ok(())
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn find_project(&self, id: ProjectId) -> TrackerServiceResult<Option<Project>> {
        Ok(self.repository.find_project(id).await?)
    }

    /// Lists every project by name.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn list_projects(&self) -> TrackerServiceResult<Vec<Project>> {
        Ok(self.repository.list_projects().await?)
    }

    /// Lists a project's tasks, earliest deadline first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project.
    pub async fn project_tasks(&self, id: ProjectId) -> TrackerServiceResult<Vec<Task>> {
        require_project(&*self.repository, id).await?;
        Ok(self.repository.tasks_for_project(id).await?)
    }

    async fn check_references(&self, request: &ProjectRequest) -> TrackerServiceResult<()> {
        if let Some(leader) = request.leader {
            require_worker(&*self.repository, leader).await?;
        }
        if let Some(team) = request.team {
            require_team(&*self.repository, team).await?;
        }
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}
