//! Step definitions for project completion scenarios.

pub mod world;

mod then;
mod when;
