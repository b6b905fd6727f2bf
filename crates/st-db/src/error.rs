//! Error types for st-db

use thiserror::Error;

/// Script execution errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection check failed (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionFailed(String),

    /// Script execution failed (D002)
    #[error("[D002] Script execution failed for {script}: {message}")]
    ExecutionFailed { script: String, message: String },

    /// Could not spawn or talk to the client process (D003)
    #[error("[D003] Failed to run {client}: {source}")]
    ClientSpawn {
        client: String,
        source: std::io::Error,
    },

    /// Script file could not be read (D004)
    #[error("[D004] Failed to read script '{path}': {source}")]
    ScriptRead {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
