//! MySQL client-process backend
//!
//! Scripts are piped into a spawned `mysql` client rather than executed
//! through a driver: the scripts are operator-authored files of arbitrary
//! statements (DDL, DML, delimiter changes) that the stock client already
//! handles.

use crate::error::{DbError, DbResult};
use crate::traits::ScriptRunner;
use st_core::ConnectionConfig;
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

const MYSQL_CLIENT: &str = "mysql";

/// Runs scripts by piping them into the `mysql` command-line client
pub struct MysqlCliRunner {
    connection: ConnectionConfig,
}

impl MysqlCliRunner {
    /// Create a new runner for the given connection
    pub fn new(connection: ConnectionConfig) -> Self {
        Self { connection }
    }

    /// Client arguments for the configured connection.
    ///
    /// The password is passed via MYSQL_PWD (see [`command`]) so it never
    /// appears in the process list.
    ///
    /// [`command`]: MysqlCliRunner::command
    fn client_args(&self) -> Vec<String> {
        vec![
            format!("--host={}", self.connection.host),
            format!("--port={}", self.connection.port),
            format!("--user={}", self.connection.username),
            self.connection.database.clone(),
        ]
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(MYSQL_CLIENT);
        cmd.args(self.client_args())
            .env("MYSQL_PWD", &self.connection.password);
        cmd
    }

    fn run(&self, mut cmd: Command, script: &Path) -> DbResult<()> {
        let output = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| DbError::ClientSpawn {
                client: MYSQL_CLIENT.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(DbError::ExecutionFailed {
                script: script.display().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl ScriptRunner for MysqlCliRunner {
    fn run_script(&self, script: &Path) -> DbResult<()> {
        let file = File::open(script).map_err(|source| DbError::ScriptRead {
            path: script.display().to_string(),
            source,
        })?;

        log::debug!("running {} via {}", script.display(), MYSQL_CLIENT);

        let mut cmd = self.command();
        cmd.stdin(Stdio::from(file));
        self.run(cmd, script)
    }

    fn check_connection(&self) -> DbResult<()> {
        let mut cmd = self.command();
        cmd.arg("--execute=SELECT 1")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let output = cmd.output().map_err(|source| DbError::ClientSpawn {
            client: MYSQL_CLIENT.to_string(),
            source,
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(DbError::ConnectionFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }

    fn runner_type(&self) -> &'static str {
        "mysql"
    }
}

#[cfg(test)]
#[path = "mysql_test.rs"]
mod tests;
