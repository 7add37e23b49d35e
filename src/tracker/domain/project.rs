//! Projects and their completion state.

use super::{EntityName, ProjectId, TeamId, WorkerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion state of a project.
///
/// `Incomplete -> Complete` is guarded by the owned tasks; the reverse
/// transition is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCompletion {
    /// Work on the project is ongoing.
    Incomplete,
    /// The project has been marked done.
    Complete,
}

impl ProjectCompletion {
    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Incomplete => Self::Complete,
            Self::Complete => Self::Incomplete,
        }
    }

    /// Maps a stored boolean flag to a state.
    #[must_use]
    pub const fn from_flag(is_completed: bool) -> Self {
        if is_completed {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }

    /// Returns the stored boolean flag.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// A deadline-bound container of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: EntityName,
    description: String,
    leader: Option<WorkerId>,
    team: Option<TeamId>,
    deadline: NaiveDate,
    completion: ProjectCompletion,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted unique name.
    pub name: EntityName,
    /// Persisted description.
    pub description: String,
    /// Persisted leader, if any.
    pub leader: Option<WorkerId>,
    /// Persisted delivering team, if any.
    pub team: Option<TeamId>,
    /// Persisted deadline date.
    pub deadline: NaiveDate,
    /// Persisted completion flag.
    pub is_completed: bool,
}

impl Project {
    /// Creates a new incomplete project.
    #[must_use]
    pub fn new(name: EntityName, deadline: NaiveDate) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            description: String::new(),
            leader: None,
            team: None,
            deadline,
            completion: ProjectCompletion::Incomplete,
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

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            leader: data.leader,
            team: data.team,
            deadline: data.deadline,
            completion: ProjectCompletion::from_flag(data.is_completed),
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &EntityName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the leader, if any.
    #[must_use]
    pub const fn leader(&self) -> Option<WorkerId> {
        self.leader
    }

    /// Returns the delivering team, if any.
    #[must_use]
    pub const fn team(&self) -> Option<TeamId> {
        self.team
    }

    /// Returns the deadline date.
    #[must_use]
    pub const fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Returns the completion state.
    #[must_use]
    pub const fn completion(&self) -> ProjectCompletion {
        self.completion
    }

    /// Returns `true` when the project is marked complete.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completion.is_complete()
    }

    /// Renames the project.
    pub fn rename(&mut self, name: EntityName) {
        self.name = name;
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the leader.
    pub const fn set_leader(&mut self, leader: Option<WorkerId>) {
        self.leader = leader;
    }

    /// Replaces the delivering team.
    pub const fn set_team(&mut self, team: Option<TeamId>) {
        self.team = team;
    }

    /// Moves the deadline.
    pub const fn reschedule(&mut self, deadline: NaiveDate) {
        self.deadline = deadline;
    }

    /// Sets the completion state without checking owned tasks.
    ///
    /// Callers validate the result with
    /// [`validate_project`](super::validate_project) before persisting.
    pub const fn set_completion(&mut self, completion: ProjectCompletion) {
        self.completion = completion;
    }

    /// Clears the leader when it refers to a deleted worker.
    pub fn detach_worker(&mut self, worker: WorkerId) {
        if self.leader == Some(worker) {
            self.leader = None;
        }
    }

    /// Clears the team when it refers to a deleted team.
    pub fn detach_team(&mut self, team: TeamId) {
        if self.team == Some(team) {
            self.team = None;
        }
    }
}
