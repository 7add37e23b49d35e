//! `PostgreSQL` adapters for tracker persistence.

mod config;
mod models;
mod repository;
mod schema;

pub use config::{DATABASE_URL_ENV, POOL_SIZE_ENV, PoolConfigError, PostgresPoolConfig};
pub use repository::{PostgresTrackerRepository, TrackerPgPool};
