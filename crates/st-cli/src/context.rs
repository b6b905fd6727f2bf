//! Runtime context for CLI commands

use anyhow::{Context, Result};
use st_core::{BuildLog, ChangeSequence, Config};
use st_db::MysqlCliRunner;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Runtime context containing the loaded config and persisted documents
pub struct RuntimeContext {
    /// Project configuration
    pub config: Config,

    /// The change sequence catalogue
    pub sequence: ChangeSequence,

    /// This database's build log
    pub log: BuildLog,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let project_path = Path::new(&args.project_dir);

        // Load config from custom path or project directory
        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(project_path).context("Failed to load project configuration")?
        };

        // Absent documents are legitimate: a fresh catalogue and an
        // unprovisioned database
        let sequence = ChangeSequence::load_or_default(&config.sequence_path())
            .context("Failed to load change sequence")?;
        let log =
            BuildLog::load_or_default(&config.build_log_path()).context("Failed to load build log")?;

        Ok(Self {
            config,
            sequence,
            log,
            verbose: args.verbose,
        })
    }

    /// Script runner for the configured database connection
    pub fn runner(&self) -> MysqlCliRunner {
        MysqlCliRunner::new(self.config.database.clone())
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
