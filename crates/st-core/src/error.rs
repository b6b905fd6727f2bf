//! Error types for st-core

use thiserror::Error;

/// Core error type for Strata
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Change hash already recorded in the sequence
    #[error("[E001] Duplicate change hash: {hash}")]
    DuplicateHash { hash: String },

    /// E002: A fresh database cannot be provisioned without a snapshot
    #[error("[E002] No snapshot available: at least one snapshot is required to provision a new database")]
    NoSnapshotAvailable,

    /// E003: No drop script exists at or before the last applied change
    #[error("[E003] No drop script available at or before {last_hash}")]
    NoDropAvailable { last_hash: String },

    /// E004: Configuration file not found
    #[error("[E004] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E005: Failed to parse configuration file
    #[error("[E005] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E006: Invalid configuration value
    #[error("[E006] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E007: IO error
    #[error("[E007] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E008: IO error with file path context
    #[error("[E008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E009: JSON serialization/deserialization error
    #[error("[E009] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
