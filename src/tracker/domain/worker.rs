//! Worker accounts and the derived full name.

use super::{PositionId, Username, WorkerId};
use serde::{Deserialize, Serialize};

/// Editable profile fields of a worker account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job position, if any.
    pub position: Option<PositionId>,
    /// Free-form biography.
    pub biography: String,
}

impl WorkerProfile {
    /// Sets first and last names.
    #[must_use]
    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Sets the job position.
    #[must_use]
    pub const fn with_position(mut self, position: PositionId) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the biography.
    #[must_use]
    pub fn with_biography(mut self, biography: impl Into<String>) -> Self {
        self.biography = biography.into();
        self
    }
}

/// A person who can be assigned tasks and lead teams or projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    id: WorkerId,
    username: Username,
    first_name: String,
    last_name: String,
    full_name: String,
    position: Option<PositionId>,
    biography: String,
}

/// Parameter object for reconstructing a persisted worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkerData {
    /// Persisted worker identifier.
    pub id: WorkerId,
    /// Persisted username.
    pub username: Username,
    /// Persisted profile fields.
    pub profile: WorkerProfile,
}

impl Worker {
    /// Creates a new worker account.
    #[must_use]
    pub fn new(username: Username, profile: WorkerProfile) -> Self {
        Self::from_persisted(PersistedWorkerData {
            id: WorkerId::new(),
            username,
            profile,
        })
    }

    /// Reconstructs a worker from persisted storage.
    ///
    /// The full name is always recomputed from the stored name parts.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkerData) -> Self {
        let WorkerProfile {
            first_name,
            last_name,
            position,
            biography,
        } = data.profile;
        let full_name = derive_full_name(&last_name, &first_name);
        Self {
            id: data.id,
            username: data.username,
            first_name,
            last_name,
            full_name,
            position,
            biography,
        }
    }

    /// Returns the worker identifier.
    #[must_use]
    pub const fn id(&self) -> WorkerId {
        self.id
    }

    /// Returns the login handle.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the derived `"last first"` name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the job position, if any.
    #[must_use]
    pub const fn position(&self) -> Option<PositionId> {
        self.position
    }

    /// Returns the biography.
    #[must_use]
    pub fn biography(&self) -> &str {
        &self.biography
    }

    /// Returns the name shown to other users.
    ///
    /// Falls back to the username unless both first and last names are set.
    /// Names are trimmed first, so a whitespace-only name counts as missing
    /// in the same way [`derive_full_name`] drops it.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return self.username.as_str();
        }
        &self.full_name
    }

    /// Returns the editable profile fields.
    #[must_use]
    pub fn profile(&self) -> WorkerProfile {
        WorkerProfile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            position: self.position,
            biography: self.biography.clone(),
        }
    }

    /// Replaces the profile and recomputes the full name.
    pub fn update_profile(&mut self, profile: WorkerProfile) {
        self.full_name = derive_full_name(&profile.last_name, &profile.first_name);
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.position = profile.position;
        self.biography = profile.biography;
    }

    /// Detaches the worker from a deleted position.
    pub const fn clear_position(&mut self) {
        self.position = None;
    }
}

/// Joins the non-blank trimmed name parts as `"last first"`.
#[must_use]
pub fn derive_full_name(last_name: &str, first_name: &str) -> String {
    [last_name.trim(), first_name.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
