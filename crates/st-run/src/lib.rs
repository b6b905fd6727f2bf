//! st-run - Plan execution for Strata
//!
//! This crate applies the planner's output: each planned script is resolved
//! to its file, executed through a `ScriptRunner`, and journaled in the
//! build log immediately on success.

pub mod error;
pub mod runner;

pub use error::{RunError, RunResult};
pub use runner::BuildRunner;
