//! Reference data: job positions and task categories.

use super::{EntityName, PositionId, TaskTypeId};
use serde::{Deserialize, Serialize};

/// A job-title classification assignable to workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    id: PositionId,
    name: EntityName,
    description: String,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(name: EntityName, description: impl Into<String>) -> Self {
        Self::from_persisted(PositionId::new(), name, description)
    }

    /// Reconstructs a position from persisted storage.
    #[must_use]
    pub fn from_persisted(id: PositionId, name: EntityName, description: impl Into<String>) -> Self {
        Self {
            id,
            name,
            description: description.into(),
        }
    }

    /// Returns the position identifier.
    #[must_use]
    pub const fn id(&self) -> PositionId {
        self.id
    }

    /// Returns the position name.
    #[must_use]
    pub const fn name(&self) -> &EntityName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces name and description.
    pub fn revise(&mut self, name: EntityName, description: impl Into<String>) {
        self.name = name;
        self.description = description.into();
    }
}

/// A category label for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskType {
    id: TaskTypeId,
    name: EntityName,
    description: String,
}

impl TaskType {
    /// Creates a new task type.
    #[must_use]
    pub fn new(name: EntityName, description: impl Into<String>) -> Self {
        Self::from_persisted(TaskTypeId::new(), name, description)
    }

    /// Reconstructs a task type from persisted storage.
    #[must_use]
    pub fn from_persisted(id: TaskTypeId, name: EntityName, description: impl Into<String>) -> Self {
        Self {
            id,
            name,
            description: description.into(),
        }
    }

    /// Returns the task type identifier.
    #[must_use]
    pub const fn id(&self) -> TaskTypeId {
        self.id
    }

    /// Returns the task type name.
    #[must_use]
    pub const fn name(&self) -> &EntityName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces name and description.
    pub fn revise(&mut self, name: EntityName, description: impl Into<String>) {
        self.name = name;
        self.description = description.into();
    }
}
