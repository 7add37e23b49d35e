//! Worker, position, and team administration.

use super::{
    TrackerServiceResult,
    catalog::CatalogEntryRequest,
    lookup::{require_position, require_team, require_worker, require_workers},
};
use crate::tracker::{
    domain::{
        EntityName, Position, PositionId, Team, TeamId, Username, Worker, WorkerId, WorkerProfile,
    },
    ports::{PositionRepository, TeamRepository, WorkerRepository},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Request payload for registering a worker account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterWorkerRequest {
    username: String,
    profile: WorkerProfile,
}

impl RegisterWorkerRequest {
    /// Creates a request with only the username set.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile: WorkerProfile::default(),
        }
    }

    /// Sets first and last names.
    #[must_use]
    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.profile = self.profile.with_names(first_name, last_name);
        self
    }

    /// Sets the job position.
    #[must_use]
    pub fn with_position(mut self, position: PositionId) -> Self {
        self.profile = self.profile.with_position(position);
        self
    }

    /// Sets the biography.
    #[must_use]
    pub fn with_biography(mut self, biography: impl Into<String>) -> Self {
        self.profile = self.profile.with_biography(biography);
        self
    }
}

/// Request payload for creating a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    name: String,
    leader: Option<WorkerId>,
    members: BTreeSet<WorkerId>,
}

impl CreateTeamRequest {
    /// Creates a request for an empty, leaderless team.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leader: None,
            members: BTreeSet::new(),
        }
    }

    /// Sets the team leader.
    #[must_use]
    pub const fn with_leader(mut self, leader: WorkerId) -> Self {
        self.leader = Some(leader);
        self
    }

    /// Sets the initial members.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = WorkerId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Request payload for renaming a team or changing its leader.
///
/// Leaving the leader unset clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTeamRequest {
    name: String,
    leader: Option<WorkerId>,
}

impl UpdateTeamRequest {
    /// Creates a request with the new name and no leader.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leader: None,
        }
    }

    /// Sets the team leader.
    #[must_use]
    pub const fn with_leader(mut self, leader: WorkerId) -> Self {
        self.leader = Some(leader);
        self
    }
}

/// Administration of workers, positions, and teams.
#[derive(Clone)]
pub struct StaffService<R>
where
    R: WorkerRepository + PositionRepository + TeamRepository,
{
    repository: Arc<R>,
}

impl<R> StaffService<R>
where
    R: WorkerRepository + PositionRepository + TeamRepository,
{
    /// Creates a new staff service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a worker account.
    ///
    /// # Errors
    ///
    /// Returns [`super::TrackerServiceError::Domain`] for an invalid
    /// username, `NotFound` for an unknown position, or `Repository` when
    /// the username is taken.
    pub async fn register_worker(&self, request: RegisterWorkerRequest) -> TrackerServiceResult<Worker> {
        let username = Username::new(request.username)?;
        if let Some(position) = request.profile.position {
            require_position(&*self.repository, position).await?;
        }
        let worker = Worker::new(username, request.profile);
        self.repository.store_worker(&worker).await?;
        debug!(worker = %worker.id(), username = %worker.username(), "worker registered");
        Ok(worker)
    }

    /// Replaces a worker's profile and recomputes the full name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown worker or position.
    pub async fn update_worker_profile(
        &self,
        id: WorkerId,
        profile: WorkerProfile,
    ) -> TrackerServiceResult<Worker> {
        let mut worker = require_worker(&*self.repository, id).await?;
        if let Some(position) = profile.position {
            require_position(&*self.repository, position).await?;
        }
        worker.update_profile(profile);
        self.repository.update_worker(&worker).await?;
        debug!(worker = %id, full_name = worker.full_name(), "worker profile updated");
        Ok(worker)
    }

    /// Deletes a worker, detaching it from teams, projects, and tasks.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown worker.
    pub async fn delete_worker(&self, id: WorkerId) -> TrackerServiceResult<()> {
        self.repository.delete_worker(id).await?;
        debug!(worker = %id, "worker deleted");
        Ok(())
    }

    /// Finds a worker by identifier.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn find_worker(&self, id: WorkerId) -> TrackerServiceResult<Option<Worker>> {
        Ok(self.repository.find_worker(id).await?)
    }

    /// Lists every worker by username.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn list_workers(&self) -> TrackerServiceResult<Vec<Worker>> {
        Ok(self.repository.list_workers().await?)
    }

    /// Creates a job position.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an invalid name or `Repository` when the name is
    /// taken.
    pub async fn create_position(&self, request: CatalogEntryRequest) -> TrackerServiceResult<Position> {
        let (name, description) = request.into_parts()?;
        let position = Position::new(name, description);
        self.repository.store_position(&position).await?;
        debug!(position = %position.id(), name = %position.name(), "position created");
        Ok(position)
    }

    /// Renames or re-describes a job position.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown position, `Domain` for an invalid
    /// name, or `Repository` when the name is taken.
    pub async fn update_position(
        &self,
        id: PositionId,
        request: CatalogEntryRequest,
    ) -> TrackerServiceResult<Position> {
        let (name, description) = request.into_parts()?;
        let mut position = require_position(&*self.repository, id).await?;
        position.revise(name, description);
        self.repository.update_position(&position).await?;
        debug!(position = %id, "position updated");
        Ok(position)
    }

    /// Deletes a job position, clearing it from workers.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown position.
    pub async fn delete_position(&self, id: PositionId) -> TrackerServiceResult<()> {
        self.repository.delete_position(id).await?;
        debug!(position = %id, "position deleted");
        Ok(())
    }

    /// Lists every position by name.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn list_positions(&self) -> TrackerServiceResult<Vec<Position>> {
        Ok(self.repository.list_positions().await?)
    }

    /// Creates a team.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an invalid name, `NotFound` for an unknown
    /// leader or member, or `Repository` when the name is taken.
    pub async fn create_team(&self, request: CreateTeamRequest) -> TrackerServiceResult<Team> {
        let name = EntityName::new(request.name)?;
        if let Some(leader) = request.leader {
            require_worker(&*self.repository, leader).await?;
        }
        require_workers(&*self.repository, &request.members).await?;

        let mut team = Team::new(name).with_members(request.members);
        if let Some(leader) = request.leader {
            team = team.with_leader(leader);
        }
        self.repository.store_team(&team).await?;
        debug!(team = %team.id(), members = team.members().len(), "team created");
        Ok(team)
    }

    /// Renames a team and replaces its leader.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown team or leader, `Domain` for an
    /// invalid name, or `Repository` when the name is taken.
    pub async fn update_team(&self, id: TeamId, request: UpdateTeamRequest) -> TrackerServiceResult<Team> {
        let name = EntityName::new(request.name)?;
        let mut team = require_team(&*self.repository, id).await?;
        if let Some(leader) = request.leader {
            require_worker(&*self.repository, leader).await?;
        }
        team.rename(name);
        team.set_leader(request.leader);
        self.repository.update_team(&team).await?;
        debug!(team = %id, "team updated");
        Ok(team)
    }

    /// Adds a worker to a team; adding an existing member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown team or worker.
    pub async fn add_team_member(&self, team_id: TeamId, worker: WorkerId) -> TrackerServiceResult<Team> {
        let mut team = require_team(&*self.repository, team_id).await?;
        require_worker(&*self.repository, worker).await?;
        if team.add_member(worker) {
            self.repository.update_team(&team).await?;
            debug!(team = %team_id, worker = %worker, "team member added");
        }
        Ok(team)
    }

    /// Removes a worker from a team; removing a non-member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown team.
    pub async fn remove_team_member(
        &self,
        team_id: TeamId,
        worker: WorkerId,
    ) -> TrackerServiceResult<Team> {
        let mut team = require_team(&*self.repository, team_id).await?;
        if team.remove_member(worker) {
            self.repository.update_team(&team).await?;
            debug!(team = %team_id, worker = %worker, "team member removed");
        }
        Ok(team)
    }

    /// Deletes a team, clearing it from projects.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown team.
    pub async fn delete_team(&self, id: TeamId) -> TrackerServiceResult<()> {
        self.repository.delete_team(id).await?;
        debug!(team = %id, "team deleted");
        Ok(())
    }

    /// Finds a team by identifier.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn find_team(&self, id: TeamId) -> TrackerServiceResult<Option<Team>> {
        Ok(self.repository.find_team(id).await?)
    }

    /// Lists every team by name.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn list_teams(&self) -> TrackerServiceResult<Vec<Team>> {
        Ok(self.repository.list_teams().await?)
    }
}
