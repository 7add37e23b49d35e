//! Validated name types shared by tracker aggregates.

use super::TrackerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for entity names, matching the `VARCHAR(100)` columns.
const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for worker usernames, matching the `VARCHAR(150)` column.
const MAX_USERNAME_LENGTH: usize = 150;

/// Trimmed, non-empty display name of a position, team, project, task type
/// or task.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    /// Creates a validated entity name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyName`] when the value is blank, or
    /// [`TrackerDomainError::NameTooLong`] when it exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(TrackerDomainError::EmptyName);
        }

        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(TrackerDomainError::NameTooLong {
                value: raw,
                max: MAX_NAME_LENGTH,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login handle of a worker account.
///
/// Accepts letters, digits and the characters `@`, `.`, `+`, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyUsername`],
    /// [`TrackerDomainError::UsernameTooLong`] or
    /// [`TrackerDomainError::InvalidUsername`] when the value is rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(TrackerDomainError::EmptyUsername);
        }

        if normalized.chars().count() > MAX_USERNAME_LENGTH {
            return Err(TrackerDomainError::UsernameTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
        if !is_valid {
            return Err(TrackerDomainError::InvalidUsername(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
