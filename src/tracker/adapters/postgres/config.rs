//! Connection pool configuration read from the process environment.

use super::TrackerPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable overriding the maximum pool size.
pub const POOL_SIZE_ENV: &str = "TASKBOARD_DB_POOL_SIZE";

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the tracker's `PostgreSQL` connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresPoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PostgresPoolConfig {
    /// Creates a configuration with default pool limits.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_POOL_SIZE,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Reads `DATABASE_URL` and the optional `TASKBOARD_DB_POOL_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolConfigError::MissingUrl`] when `DATABASE_URL` is unset
    /// or blank, and [`PoolConfigError::InvalidPoolSize`] when the pool size
    /// is not a positive integer.
    pub fn from_env() -> Result<Self, PoolConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`PostgresPoolConfig::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PoolConfigError> {
        let database_url = lookup(DATABASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .ok_or(PoolConfigError::MissingUrl)?;
        let mut config = Self::new(database_url);
        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            let size = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(PoolConfigError::InvalidPoolSize(raw))?;
            config.max_size = size;
        }
        Ok(config)
    }

    /// Overrides the maximum number of pooled connections.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Overrides how long checkout waits for a free connection.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Returns the checkout timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Builds the connection pool, establishing the first connection eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`PoolConfigError::Pool`] when the database is unreachable.
    pub fn build_pool(&self) -> Result<TrackerPgPool, PoolConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        Ok(Pool::builder()
            .max_size(self.max_size)
            .connection_timeout(self.connection_timeout)
            .build(manager)?)
    }
}

/// Errors raised while configuring the connection pool.
#[derive(Debug, Error)]
pub enum PoolConfigError {
    /// No connection URL was provided.
    #[error("{DATABASE_URL_ENV} is not set")]
    MissingUrl,

    /// The pool size override is not a positive integer.
    #[error("{POOL_SIZE_ENV} must be a positive integer, got '{0}'")]
    InvalidPoolSize(String),

    /// The pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

