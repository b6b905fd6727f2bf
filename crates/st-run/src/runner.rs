//! Plan execution
//!
//! Steps run strictly in order. After each successful script the build log
//! is appended to and saved before the next step starts, so a failure or
//! crash mid-plan leaves the journal reflecting exactly what was applied.
//! Retrying is rerunning the command: planning picks up from the last
//! journaled step.

use st_core::{BuildLog, ChangeSequence, Config, MigrationPlanner, PlanStep};
use st_db::ScriptRunner;
use std::path::Path;

use crate::error::{RunError, RunResult};

/// Applies planned scripts against one database and journals each one
pub struct BuildRunner<'a> {
    config: &'a Config,
    sequence: &'a ChangeSequence,
    runner: &'a dyn ScriptRunner,
}

impl<'a> BuildRunner<'a> {
    /// Create a new build runner
    pub fn new(
        config: &'a Config,
        sequence: &'a ChangeSequence,
        runner: &'a dyn ScriptRunner,
    ) -> Self {
        Self {
            config,
            sequence,
            runner,
        }
    }

    /// Bring the database up to date.
    ///
    /// Plans with [`MigrationPlanner::plan_build`] and applies the steps.
    /// When `settings.drop_on_new_snapshot` is enabled and a snapshot newer
    /// than the last applied change exists, the database is dropped first
    /// and re-provisioned from that snapshot.
    ///
    /// Returns the number of scripts executed.
    pub fn build(&self, log: &mut BuildLog, log_path: &Path) -> RunResult<usize> {
        let mut executed = 0;

        if self.config.settings.drop_on_new_snapshot {
            let planner = MigrationPlanner::new(self.sequence, log);
            if !planner.snapshots_since_last_applied().is_empty() {
                log::debug!("new snapshot found; dropping before rebuild");
                let drop_plan = planner.plan_drop()?;
                executed += self.apply(&drop_plan, log, log_path)?;
            }
        }

        let plan = MigrationPlanner::new(self.sequence, log).plan_build()?;
        executed += self.apply(&plan, log, log_path)?;
        Ok(executed)
    }

    /// Tear the database down via the most recent applicable drop script.
    ///
    /// Returns the number of scripts executed; 0 means the database was
    /// already empty and there was nothing to do.
    pub fn drop(&self, log: &mut BuildLog, log_path: &Path) -> RunResult<usize> {
        let plan = MigrationPlanner::new(self.sequence, log).plan_drop()?;
        self.apply(&plan, log, log_path)
    }

    /// Apply a plan step by step, journaling after every success.
    ///
    /// Aborts at the first failing step with the journal already saved up
    /// to the last success; there is no in-process retry.
    pub fn apply(
        &self,
        plan: &[PlanStep],
        log: &mut BuildLog,
        log_path: &Path,
    ) -> RunResult<usize> {
        for (index, step) in plan.iter().enumerate() {
            let script = self.config.script_path(&step.hash, step.role);
            if !script.exists() {
                return Err(RunError::ScriptMissing {
                    path: script.display().to_string(),
                });
            }

            log::debug!(
                "applying step {}/{}: {} via {}",
                index + 1,
                plan.len(),
                step,
                self.runner.runner_type()
            );
            self.runner.run_script(&script)?;

            log.append(step.hash.clone(), step.role);
            log.save(log_path)?;
        }

        Ok(plan.len())
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
