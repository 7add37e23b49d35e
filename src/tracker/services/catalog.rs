//! Task type catalog.

use super::{TrackerServiceResult, lookup::require_task_type};
use crate::tracker::{
    domain::{EntityName, TaskType, TaskTypeId, TrackerDomainError},
    ports::TaskTypeRepository,
};
use std::sync::Arc;
use tracing::debug;

/// Name and description of a catalog entry (task type or position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntryRequest {
    name: String,
    description: String,
}

impl CatalogEntryRequest {
    /// Creates a request with an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub(super) fn into_parts(self) -> Result<(EntityName, String), TrackerDomainError> {
        Ok((EntityName::new(self.name)?, self.description))
    }
}

/// Maintenance of task categories.
#[derive(Clone)]
pub struct CatalogService<R>
where
    R: TaskTypeRepository,
{
    repository: Arc<R>,
}

impl<R> CatalogService<R>
where
    R: TaskTypeRepository,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a task type.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an invalid name or `Repository` when the name is
    /// taken.
    pub async fn create_task_type(&self, request: CatalogEntryRequest) -> TrackerServiceResult<TaskType> {
        let (name, description) = request.into_parts()?;
        let task_type = TaskType::new(name, description);
        self.repository.store_task_type(&task_type).await?;
        debug!(task_type = %task_type.id(), name = %task_type.name(), "task type created");
        Ok(task_type)
    }

    /// Renames or re-describes a task type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task type, `Domain` for an invalid
    /// name, or `Repository` when the name is taken.
    pub async fn update_task_type(
        &self,
        id: TaskTypeId,
        request: CatalogEntryRequest,
    ) -> TrackerServiceResult<TaskType> {
        let (name, description) = request.into_parts()?;
        let mut task_type = require_task_type(&*self.repository, id).await?;
        task_type.revise(name, description);
        self.repository.update_task_type(&task_type).await?;
        debug!(task_type = %id, "task type updated");
        Ok(task_type)
    }

    /// Deletes a task type together with every task of that type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task type.
    pub async fn delete_task_type(&self, id: TaskTypeId) -> TrackerServiceResult<()> {
        self.repository.delete_task_type(id).await?;
        debug!(task_type = %id, "task type deleted");
        Ok(())
    }

    /// Finds a task type by identifier.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn find_task_type(&self, id: TaskTypeId) -> TrackerServiceResult<Option<TaskType>> {
        Ok(self.repository.find_task_type(id).await?)
    }

    /// Lists every task type by name.
    ///
    /// # Errors
    ///
    /// Returns `Repository` when the lookup fails.
    pub async fn list_task_types(&self) -> TrackerServiceResult<Vec<TaskType>> {
        Ok(self.repository.list_task_types().await?)
    }
}
