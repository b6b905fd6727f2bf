//! Migration planning: pure decision logic over the catalogue and journal
//!
//! The planner computes what to run and in what order; it executes nothing
//! and has no side effects. Planning is idempotent given an accurate build
//! log, which is what makes "retry" equal to "run the command again".

use serde::Serialize;

use crate::build_log::BuildLog;
use crate::error::{CoreError, CoreResult};
use crate::role::ScriptRole;
use crate::sequence::ChangeSequence;

/// One step of a plan: run the script of `role` from change `hash`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub hash: String,
    pub role: ScriptRole,
}

impl PlanStep {
    pub fn new(hash: impl Into<String>, role: ScriptRole) -> Self {
        Self {
            hash: hash.into(),
            role,
        }
    }
}

impl std::fmt::Display for PlanStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.role, self.hash)
    }
}

/// The state a database is in, derived from the last journal entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseState {
    /// No entries, or the last applied action was a drop. Only a snapshot
    /// can unblock this state.
    Empty,
    /// The last applied action was a snapshot or an upgrade
    Provisioned { last_hash: String },
}

impl DatabaseState {
    /// Derive the state from a build log
    pub fn of(log: &BuildLog) -> Self {
        match log.last() {
            None => DatabaseState::Empty,
            Some(entry) if entry.role == ScriptRole::Drop => DatabaseState::Empty,
            Some(entry) => DatabaseState::Provisioned {
                last_hash: entry.hash.clone(),
            },
        }
    }
}

impl std::fmt::Display for DatabaseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseState::Empty => write!(f, "empty"),
            DatabaseState::Provisioned { last_hash } => {
                write!(f, "provisioned (at {})", last_hash)
            }
        }
    }
}

/// Planner over a change sequence and one database's build log
pub struct MigrationPlanner<'a> {
    sequence: &'a ChangeSequence,
    log: &'a BuildLog,
}

impl<'a> MigrationPlanner<'a> {
    /// Create a new planner
    pub fn new(sequence: &'a ChangeSequence, log: &'a BuildLog) -> Self {
        Self { sequence, log }
    }

    /// State of the target database
    pub fn state(&self) -> DatabaseState {
        DatabaseState::of(self.log)
    }

    /// Plan the `build` operation.
    ///
    /// Empty database: provision from the latest snapshot, then every
    /// upgrade after it. Fails with [`CoreError::NoSnapshotAvailable`] if
    /// the catalogue has no snapshot at all.
    ///
    /// Provisioned database: every upgrade after the last applied hash. An
    /// empty plan means the database is already up to date.
    pub fn plan_build(&self) -> CoreResult<Vec<PlanStep>> {
        let since_hash = match self.state() {
            DatabaseState::Empty => {
                let snapshot_hash = self
                    .sequence
                    .latest_snapshot()
                    .ok_or(CoreError::NoSnapshotAvailable)?;

                let mut steps = vec![PlanStep::new(snapshot_hash, ScriptRole::Snapshot)];
                steps.extend(self.upgrades_since(snapshot_hash));
                return Ok(steps);
            }
            DatabaseState::Provisioned { last_hash } => last_hash,
        };

        Ok(self.upgrades_since(&since_hash))
    }

    /// Plan the `drop` operation.
    ///
    /// Already empty (never provisioned, or the last action was a drop):
    /// empty plan, signaling nothing to do. Otherwise the single most recent
    /// drop script at or before the last applied hash; fails with
    /// [`CoreError::NoDropAvailable`] if none exists.
    pub fn plan_drop(&self) -> CoreResult<Vec<PlanStep>> {
        let last_hash = match self.state() {
            DatabaseState::Empty => return Ok(Vec::new()),
            DatabaseState::Provisioned { last_hash } => last_hash,
        };

        let drops = self
            .sequence
            .hashes_with_role_before(ScriptRole::Drop, &last_hash);
        match drops.last() {
            Some(hash) => Ok(vec![PlanStep::new(*hash, ScriptRole::Drop)]),
            None => Err(CoreError::NoDropAvailable { last_hash }),
        }
    }

    /// Snapshot-role hashes recorded after the last applied hash. Used by
    /// the drop-on-new-snapshot rebuild flow; empty for an empty database.
    pub fn snapshots_since_last_applied(&self) -> Vec<&str> {
        match self.state() {
            DatabaseState::Empty => Vec::new(),
            DatabaseState::Provisioned { last_hash } => self
                .sequence
                .hashes_with_role_since(ScriptRole::Snapshot, &last_hash),
        }
    }

    fn upgrades_since(&self, hash: &str) -> Vec<PlanStep> {
        self.sequence
            .hashes_with_role_since(ScriptRole::Upgrade, hash)
            .into_iter()
            .map(|h| PlanStep::new(h, ScriptRole::Upgrade))
            .collect()
    }
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
