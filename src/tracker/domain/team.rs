//! Teams of workers.

use super::{EntityName, TeamId, WorkerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named group of workers, optionally with a designated leader.
///
/// Teams do not work on individual tasks directly; they deliver projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: EntityName,
    leader: Option<WorkerId>,
    members: BTreeSet<WorkerId>,
}

/// Parameter object for reconstructing a persisted team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted team identifier.
    pub id: TeamId,
    /// Persisted team name.
    pub name: EntityName,
    /// Persisted leader, if any.
    pub leader: Option<WorkerId>,
    /// Persisted member set.
    pub members: BTreeSet<WorkerId>,
}

impl Team {
    /// Creates an empty team without a leader.
    #[must_use]
    pub fn new(name: EntityName) -> Self {
        Self {
            id: TeamId::new(),
            name,
            leader: None,
            members: BTreeSet::new(),
        }
    }

    /// Sets the initial leader.
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

    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            leader: data.leader,
            members: data.members,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &EntityName {
        &self.name
    }

    /// Returns the leader, if any.
    #[must_use]
    pub const fn leader(&self) -> Option<WorkerId> {
        self.leader
    }

    /// Returns the member set.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<WorkerId> {
        &self.members
    }

    /// Returns `true` when the worker is a member.
    #[must_use]
    pub fn has_member(&self, worker: WorkerId) -> bool {
        self.members.contains(&worker)
    }

    /// Renames the team.
    pub fn rename(&mut self, name: EntityName) {
        self.name = name;
    }

    /// Replaces the leader.
    pub const fn set_leader(&mut self, leader: Option<WorkerId>) {
        self.leader = leader;
    }

    /// Adds a member. Returns `false` when already present.
    pub fn add_member(&mut self, worker: WorkerId) -> bool {
        self.members.insert(worker)
    }

    /// Removes a member. Returns `false` when absent.
    pub fn remove_member(&mut self, worker: WorkerId) -> bool {
        self.members.remove(&worker)
    }

    /// Drops every reference to a deleted worker.
    pub fn detach_worker(&mut self, worker: WorkerId) {
        if self.leader == Some(worker) {
            self.leader = None;
        }
        self.members.remove(&worker);
    }
}
