//! Change sequence: the ordered catalogue of every schema change
//!
//! The sequence is append-only. Position within it is the append index and
//! is the only ordering key; it is never derived from the hash, a timestamp,
//! or any lexical property of the identifier.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::role::ScriptRole;

/// One entry in the change sequence: a commit hash plus the script roles
/// that were present in that commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Opaque version-control commit id
    pub hash: String,

    /// An upgrade script was present in this change
    #[serde(default, skip_serializing_if = "is_false")]
    pub upgrade: bool,

    /// A drop script was present in this change
    #[serde(default, skip_serializing_if = "is_false")]
    pub drop: bool,

    /// A snapshot script was present in this change
    #[serde(default, skip_serializing_if = "is_false")]
    pub snapshot: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

impl ChangeRecord {
    /// Create a new change record
    pub fn new(hash: impl Into<String>, upgrade: bool, drop: bool, snapshot: bool) -> Self {
        Self {
            hash: hash.into(),
            upgrade,
            drop,
            snapshot,
        }
    }

    /// Whether a script of the given role was present in this change
    pub fn has_role(&self, role: ScriptRole) -> bool {
        match role {
            ScriptRole::Snapshot => self.snapshot,
            ScriptRole::Upgrade => self.upgrade,
            ScriptRole::Drop => self.drop,
        }
    }
}

/// Ordered, append-only catalogue of all known changes.
///
/// Persisted as a pretty-printed JSON array of [`ChangeRecord`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSequence {
    records: Vec<ChangeRecord>,
}

impl ChangeSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change record at the end of the sequence.
    ///
    /// Hash uniqueness is an invariant of the catalogue; a repeated hash is
    /// rejected, never silently ignored.
    pub fn append(&mut self, record: ChangeRecord) -> CoreResult<()> {
        if self.position(&record.hash).is_some() {
            return Err(CoreError::DuplicateHash { hash: record.hash });
        }
        self.records.push(record);
        Ok(())
    }

    /// Append index of the record with the given hash
    pub fn position(&self, hash: &str) -> Option<usize> {
        self.records.iter().position(|r| r.hash == hash)
    }

    /// Hash of the most recently appended record carrying a snapshot script,
    /// if any snapshot has ever been recorded
    pub fn latest_snapshot(&self) -> Option<&str> {
        self.records
            .iter()
            .rev()
            .find(|r| r.snapshot)
            .map(|r| r.hash.as_str())
    }

    /// Hashes of every record strictly after `since_hash` that carries
    /// `role`, in sequence order.
    ///
    /// An unknown `since_hash` scans from the beginning of history. This is
    /// a deliberate fallback rather than an error: a journal whose anchor
    /// hash is missing from the catalogue still yields a full replay instead
    /// of wedging.
    pub fn hashes_with_role_since(&self, role: ScriptRole, since_hash: &str) -> Vec<&str> {
        let start = match self.position(since_hash) {
            Some(pos) => pos + 1,
            None => {
                log::warn!(
                    "since hash {} not found in change sequence; scanning from the beginning",
                    since_hash
                );
                0
            }
        };
        self.records[start..]
            .iter()
            .filter(|r| r.has_role(role))
            .map(|r| r.hash.as_str())
            .collect()
    }

    /// Hashes of every record at or before `before_hash` (inclusive) that
    /// carries `role`, in sequence order.
    ///
    /// An unknown `before_hash` matches against the full sequence, the
    /// symmetric fallback to [`hashes_with_role_since`].
    ///
    /// [`hashes_with_role_since`]: ChangeSequence::hashes_with_role_since
    pub fn hashes_with_role_before(&self, role: ScriptRole, before_hash: &str) -> Vec<&str> {
        let end = match self.position(before_hash) {
            Some(pos) => pos + 1,
            None => {
                log::warn!(
                    "before hash {} not found in change sequence; matching the full sequence",
                    before_hash
                );
                self.records.len()
            }
        };
        self.records[..end]
            .iter()
            .filter(|r| r.has_role(role))
            .map(|r| r.hash.as_str())
            .collect()
    }

    /// Iterate over the records in append order
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter()
    }

    /// Number of records in the sequence
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the sequence has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load a sequence from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a sequence, treating an absent file as an empty document
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        Self::load(path)
    }

    /// Save the sequence to a file path atomically.
    ///
    /// Uses write-to-temp-then-rename to prevent corruption.
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
#[path = "sequence_test.rs"]
mod tests;
