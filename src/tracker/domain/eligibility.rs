//! Assignment eligibility for tasks.
//!
//! A task outside any project may be assigned to anyone. A task inside a
//! project is scoped to the people delivering it: the project's team members
//! and the project leader.

use super::{Project, Team, WorkerId};
use std::collections::BTreeSet;

/// Who is positioned to deliver a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStaffing<'a> {
    /// Both a delivering team and a leader are set.
    TeamAndLeader {
        /// Delivering team.
        team: &'a Team,
        /// Project leader.
        leader: WorkerId,
    },
    /// Only a leader is set.
    LeaderOnly {
        /// Project leader.
        leader: WorkerId,
    },
    /// Only a delivering team is set.
    TeamOnly {
        /// Delivering team.
        team: &'a Team,
    },
    /// Neither a team nor a leader is set.
    Unstaffed,
}

impl<'a> ProjectStaffing<'a> {
    /// Classifies a project given its loaded team.
    ///
    /// `team` is ignored unless it is the project's own team.
    #[must_use]
    pub fn of(project: &Project, team: Option<&'a Team>) -> Self {
        let own_team = team.filter(|candidate| project.team() == Some(candidate.id()));
        match (own_team, project.leader()) {
            (Some(delivering), Some(leader)) => Self::TeamAndLeader {
                team: delivering,
                leader,
            },
            (None, Some(leader)) => Self::LeaderOnly { leader },
            (Some(delivering), None) => Self::TeamOnly { team: delivering },
            (None, None) => Self::Unstaffed,
        }
    }

    /// Returns the workers eligible for tasks in the project.
    #[must_use]
    pub fn eligible(&self) -> BTreeSet<WorkerId> {
        match self {
            Self::TeamAndLeader { team, leader } => {
                let mut eligible = team.members().clone();
                eligible.insert(*leader);
                eligible
            }
            Self::LeaderOnly { leader } => BTreeSet::from([*leader]),
            Self::TeamOnly { team } => team.members().clone(),
            Self::Unstaffed => BTreeSet::new(),
        }
    }
}

/// Set of workers a task may be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityScope {
    /// Any worker; the task has no project.
    AllWorkers,
    /// Only the listed workers.
    Restricted(BTreeSet<WorkerId>),
}

impl EligibilityScope {
    /// Resolves the scope for a task given its project and that project's
    /// team.
    #[must_use]
    pub fn resolve(project: Option<&Project>, team: Option<&Team>) -> Self {
        match project {
            None => Self::AllWorkers,
            Some(owner) => Self::Restricted(ProjectStaffing::of(owner, team).eligible()),
        }
    }

    /// Returns `true` when the worker may be assigned.
    #[must_use]
    pub fn permits(&self, worker: WorkerId) -> bool {
        match self {
            Self::AllWorkers => true,
            Self::Restricted(eligible) => eligible.contains(&worker),
        }
    }
}
