//! Build log: the append-only journal of scripts applied to one database
//!
//! Each target database carries its own log. The last entry is privileged:
//! it alone determines the database state the planner starts from. The
//! timestamp on each entry is audit information only and never participates
//! in ordering decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::role::ScriptRole;

/// One journal entry: a script of `role` from change `hash` was applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedRecord {
    /// The change the applied script came from
    pub hash: String,

    /// The specific script that was run
    pub role: ScriptRole,

    /// When the script was applied (audit only)
    pub applied_at: DateTime<Utc>,
}

/// Append-only journal of everything applied to one database instance.
///
/// Persisted as a pretty-printed JSON array of [`AppliedRecord`]s. The log
/// enforces no uniqueness constraint; not re-issuing work is the planner's
/// responsibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildLog {
    entries: Vec<AppliedRecord>,
}

impl BuildLog {
    /// Create an empty log (an unprovisioned database)
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a script was successfully applied, stamped with the
    /// current time
    pub fn append(&mut self, hash: impl Into<String>, role: ScriptRole) {
        self.entries.push(AppliedRecord {
            hash: hash.into(),
            role,
            applied_at: Utc::now(),
        });
    }

    /// The most recently appended entry, or `None` for an unprovisioned
    /// database. An empty log is a legitimate state, not an error.
    pub fn last(&self) -> Option<&AppliedRecord> {
        self.entries.last()
    }

    /// Iterate over the entries in append order
    pub fn iter(&self) -> impl Iterator<Item = &AppliedRecord> {
        self.entries.iter()
    }

    /// Number of entries in the log
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a log from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a log, treating an absent file as an empty journal
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        Self::load(path)
    }

    /// Save the log to a file path atomically.
    ///
    /// Uses write-to-temp-then-rename to prevent corruption. Called after
    /// every applied script so a crash mid-plan leaves the journal accurate.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "build_log_test.rs"]
mod tests;
