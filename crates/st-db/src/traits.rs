//! ScriptRunner trait definition

use crate::error::DbResult;
use std::path::Path;

/// Execution boundary for schema-change scripts.
///
/// The planner decides what to run and in what order; implementations of
/// this trait run a single named script against a live database. Execution
/// is a blocking call with no timeout; plans are applied strictly
/// sequentially within one invocation.
pub trait ScriptRunner: Send + Sync {
    /// Execute one script file against the database
    fn run_script(&self, script: &Path) -> DbResult<()>;

    /// Verify the database is reachable before any script runs
    fn check_connection(&self) -> DbResult<()>;

    /// Runner identifier for logging
    fn runner_type(&self) -> &'static str;
}
