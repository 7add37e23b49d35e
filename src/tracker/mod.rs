//! Task and project tracking.
//!
//! Workers are grouped into teams and hold positions; projects carry a
//! deadline, an optional leader, and an optional delivering team; tasks
//! belong to an optional project, have a type and a priority, and are
//! assigned to workers. The module follows hexagonal architecture:
//!
//! - Domain types and pure rules in [`domain`]
//! - Port contracts in [`ports`]
//! - In-memory and `PostgreSQL` implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
