//! Error types for st-git

use thiserror::Error;

/// Version-control history errors
#[derive(Error, Debug)]
pub enum GitError {
    /// git exited with a failure status (G001)
    #[error("[G001] git {command} failed: {message}")]
    CommandFailed { command: String, message: String },

    /// git output did not parse (G002)
    #[error("[G002] Unexpected git output for {command}: {message}")]
    UnexpectedOutput { command: String, message: String },

    /// Could not spawn git (G003)
    #[error("[G003] Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type alias for GitError
pub type GitResult<T> = Result<T, GitError>;
