//! Taskboard: task and project tracking core.
//!
//! This crate holds the domain model, validation rules, assignment
//! eligibility, and completion coordination for a small team task tracker,
//! together with storage adapters and the services that tie them together.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: entities and pure rule functions with no infrastructure
//!   dependencies
//! - **Ports**: repository traits the services depend on
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`tracker`]: workers, teams, projects, tasks, and the services that
//!   manage them

pub mod tracker;
