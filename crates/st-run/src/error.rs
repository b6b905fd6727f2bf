//! Error types for st-run

use thiserror::Error;

/// Plan execution errors
#[derive(Error, Debug)]
pub enum RunError {
    /// R001: A planned script has no file on disk
    #[error("[R001] Script file {path} does not exist")]
    ScriptMissing { path: String },

    /// Planning or journaling error
    #[error(transparent)]
    Core(#[from] st_core::CoreError),

    /// Script execution error, propagated unchanged
    #[error(transparent)]
    Db(#[from] st_db::DbError),
}

/// Result type alias for RunError
pub type RunResult<T> = Result<T, RunError>;
