//! Version-control history: the source of change identifiers
//!
//! Change identifiers in the change sequence are commit hashes. This module
//! defines the read-only boundary through which the ingestion step learns
//! which commit is newest and which files it touched.

use crate::error::{GitError, GitResult};
use std::path::PathBuf;
use std::process::Command;

/// Read-only view of the version-control history of a project
pub trait VersionControlHistory {
    /// Identifier of the most recent change (the last commit hash)
    fn last_change_id(&self) -> GitResult<String>;

    /// Paths touched by the given change, relative to the repository root
    fn files_changed_by(&self, id: &str) -> GitResult<Vec<PathBuf>>;
}

/// History backed by the `git` command-line client
pub struct GitCli {
    work_dir: PathBuf,
}

impl GitCli {
    /// Create a history reader rooted at the given working directory
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn git(&self, args: &[&str]) -> GitResult<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControlHistory for GitCli {
    fn last_change_id(&self) -> GitResult<String> {
        let stdout = self.git(&["log", "--pretty=oneline", "-n", "1"])?;
        parse_oneline_hash(&stdout).ok_or_else(|| GitError::UnexpectedOutput {
            command: "log".to_string(),
            message: stdout.trim().to_string(),
        })
    }

    fn files_changed_by(&self, id: &str) -> GitResult<Vec<PathBuf>> {
        let stdout = self.git(&["show", "--name-status", "--pretty=format:", id])?;
        log::debug!("change {} touched {} lines of status output", id, stdout.lines().count());
        Ok(parse_name_status(&stdout))
    }
}

/// Extract the commit hash from one line of `git log --pretty=oneline`
fn parse_oneline_hash(output: &str) -> Option<String> {
    output
        .lines()
        .next()?
        .split_whitespace()
        .next()
        .map(str::to_string)
}

/// Parse `git show --name-status` output into the touched paths.
///
/// Lines look like `M\tpath`, `A\tpath`, `D\tpath`; rename/copy lines
/// (`R100\told\tnew`) report the new path.
fn parse_name_status(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let status = fields.next()?.trim();
            if status.is_empty() {
                return None;
            }
            let path = fields.last()?;
            Some(PathBuf::from(path))
        })
        .collect()
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
