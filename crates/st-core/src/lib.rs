//! st-core - Core library for Strata
//!
//! This crate provides the change sequence catalogue, the per-database
//! build log, the migration planner, configuration parsing, and the shared
//! error types used across all Strata components.

pub mod build_log;
pub mod config;
pub mod error;
pub mod planner;
pub mod role;
pub mod sequence;

pub use build_log::{AppliedRecord, BuildLog};
pub use config::{Config, ConnectionConfig, Settings};
pub use error::{CoreError, CoreResult};
pub use planner::{DatabaseState, MigrationPlanner, PlanStep};
pub use role::ScriptRole;
pub use sequence::{ChangeRecord, ChangeSequence};
