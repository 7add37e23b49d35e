//! Identifier types for tracker aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a worker account.
    WorkerId
);
uuid_identifier!(
    /// Unique identifier for a job position.
    PositionId
);
uuid_identifier!(
    /// Unique identifier for a team.
    TeamId
);
uuid_identifier!(
    /// Unique identifier for a project.
    ProjectId
);
uuid_identifier!(
    /// Unique identifier for a task category.
    TaskTypeId
);
uuid_identifier!(
    /// Unique identifier for a task.
    TaskId
);

/// Typed reference to any tracker entity, used in lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A worker account.
    Worker(WorkerId),
    /// A job position.
    Position(PositionId),
    /// A team.
    Team(TeamId),
    /// A project.
    Project(ProjectId),
    /// A task category.
    TaskType(TaskTypeId),
    /// A task.
    Task(TaskId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Worker(id) => write!(f, "worker {id}"),
            Self::Position(id) => write!(f, "position {id}"),
            Self::Team(id) => write!(f, "team {id}"),
            Self::Project(id) => write!(f, "project {id}"),
            Self::TaskType(id) => write!(f, "task type {id}"),
            Self::Task(id) => write!(f, "task {id}"),
        }
    }
}

/// Kind of entity whose unique name collided in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedEntity {
    /// Worker username.
    Worker,
    /// Position name.
    Position,
    /// Team name.
    Team,
    /// Project name.
    Project,
    /// Task type name.
    TaskType,
}

impl NamedEntity {
    /// Returns a lowercase label for messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Position => "position",
            Self::Team => "team",
            Self::Project => "project",
            Self::TaskType => "task type",
        }
    }
}

impl fmt::Display for NamedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
