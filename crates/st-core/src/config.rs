//! Configuration types and parsing for strata.yml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::role::ScriptRole;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "strata.yml";

/// Name of the persisted change sequence document
pub const SEQUENCE_FILE_NAME: &str = "change-sequence.json";

/// Name of the persisted build log document
pub const BUILD_LOG_FILE_NAME: &str = "build-log.json";

/// Directory for incoming, not-yet-recorded scripts
pub const NEW_SCRIPTS_DIR: &str = "new";

/// Main project configuration from strata.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory holding the script tree and the persisted documents,
    /// relative to the project root
    #[serde(default = "default_database_dir")]
    pub database_dir: String,

    /// Builder behavior settings
    #[serde(default)]
    pub settings: Settings,

    /// Database connection configuration
    pub database: ConnectionConfig,

    /// Project root the config was loaded from (not part of the file)
    #[serde(skip)]
    pub root: PathBuf,
}

/// Builder behavior settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Drop and re-provision when a snapshot newer than the last applied
    /// change exists
    #[serde(default)]
    pub drop_on_new_snapshot: bool,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Database server hostname
    pub host: String,

    /// Database server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name
    pub database: String,

    /// Username for the connection
    pub username: String,

    /// Password for the connection
    pub password: String,
}

fn default_database_dir() -> String {
    "database".to_string()
}

fn default_port() -> u16 {
    3306
}

impl Config {
    /// Load configuration from an explicit file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;

        let mut config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `strata.yml` in a project directory
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        if self.database_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database_dir must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute path of the database directory
    pub fn database_path(&self) -> PathBuf {
        self.root.join(&self.database_dir)
    }

    /// Path of the persisted change sequence document
    pub fn sequence_path(&self) -> PathBuf {
        self.database_path().join(SEQUENCE_FILE_NAME)
    }

    /// Path of the persisted build log document
    pub fn build_log_path(&self) -> PathBuf {
        self.database_path().join(BUILD_LOG_FILE_NAME)
    }

    /// Directory incoming scripts are committed to before being recorded
    pub fn new_scripts_path(&self) -> PathBuf {
        self.database_path().join(NEW_SCRIPTS_DIR)
    }

    /// Path of the script for a given change hash and role, e.g.
    /// `<database_dir>/upgrade_scripts/upgrade_script_<hash>.sql`
    pub fn script_path(&self, hash: &str, role: ScriptRole) -> PathBuf {
        self.database_path().join(role.script_rel_path(hash))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
