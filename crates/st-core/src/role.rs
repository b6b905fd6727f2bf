//! Script roles and on-disk script layout

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The kind of schema-change script a change carries.
///
/// A single change (one version-control commit) may carry several scripts,
/// one per role; a build log entry records exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptRole {
    /// Creates a full schema from nothing
    Snapshot,
    /// Incremental script applied on top of a provisioned database
    Upgrade,
    /// Tears the schema down, returning the database to empty
    Drop,
}

impl ScriptRole {
    /// Directory under the database dir that holds scripts of this role
    pub fn dir_name(&self) -> &'static str {
        match self {
            ScriptRole::Snapshot => "snapshots",
            ScriptRole::Upgrade => "upgrade_scripts",
            ScriptRole::Drop => "drops",
        }
    }

    /// File-name stem used for scripts of this role
    pub fn file_stem(&self) -> &'static str {
        match self {
            ScriptRole::Snapshot => "snapshot",
            ScriptRole::Upgrade => "upgrade_script",
            ScriptRole::Drop => "drop",
        }
    }

    /// Parse a role from an incoming script file stem
    pub fn from_file_stem(stem: &str) -> Option<Self> {
        match stem {
            "snapshot" => Some(ScriptRole::Snapshot),
            "upgrade_script" => Some(ScriptRole::Upgrade),
            "drop" => Some(ScriptRole::Drop),
            _ => None,
        }
    }

    /// Script file name for a given change hash, e.g. `snapshot_<hash>.sql`
    pub fn script_file_name(&self, hash: &str) -> String {
        format!("{}_{}.sql", self.file_stem(), hash)
    }

    /// Relative script path under the database dir
    pub fn script_rel_path(&self, hash: &str) -> PathBuf {
        PathBuf::from(self.dir_name()).join(self.script_file_name(hash))
    }
}

impl std::fmt::Display for ScriptRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptRole::Snapshot => write!(f, "snapshot"),
            ScriptRole::Upgrade => write!(f, "upgrade"),
            ScriptRole::Drop => write!(f, "drop"),
        }
    }
}
