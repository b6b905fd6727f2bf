//! Init command implementation - scaffolds a new Strata project

use anyhow::{Context, Result};
use st_core::config::{BUILD_LOG_FILE_NAME, CONFIG_FILE_NAME, NEW_SCRIPTS_DIR, SEQUENCE_FILE_NAME};
use st_core::{BuildLog, ChangeSequence, ScriptRole};
use std::fs;
use std::path::Path;

use crate::cli::{GlobalArgs, InitArgs};

/// Execute the init command
pub(crate) fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    let project_dir = Path::new(&global.project_dir);
    let config_path = project_dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        anyhow::bail!(
            "'{}' already exists. This directory is already a Strata project.",
            config_path.display()
        );
    }

    println!("Initializing Strata project: {}\n", args.name);

    // Script directory tree
    let database_dir = project_dir.join("database");
    let mut dirs = vec![database_dir.join(NEW_SCRIPTS_DIR)];
    for role in [ScriptRole::Snapshot, ScriptRole::Upgrade, ScriptRole::Drop] {
        dirs.push(database_dir.join(role.dir_name()));
    }
    for dir in &dirs {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    // Generate strata.yml
    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{name}"
database_dir: "database"

settings:
  drop_on_new_snapshot: false

database:
  host: "changeme"
  port: 3306
  database: "changeme"
  username: "changeme"
  password: "changeme"
"#,
        name = safe_name,
    );
    fs::write(&config_path, config_content).context("Failed to write strata.yml")?;

    // Empty persisted documents
    ChangeSequence::new()
        .save(&database_dir.join(SEQUENCE_FILE_NAME))
        .context("Failed to write change sequence")?;
    BuildLog::new()
        .save(&database_dir.join(BUILD_LOG_FILE_NAME))
        .context("Failed to write build log")?;

    println!("  Created {}", CONFIG_FILE_NAME);
    println!("  Created database/{}", SEQUENCE_FILE_NAME);
    println!("  Created database/{}", BUILD_LOG_FILE_NAME);
    println!("  Created database/{}/", NEW_SCRIPTS_DIR);
    for role in [ScriptRole::Snapshot, ScriptRole::Upgrade, ScriptRole::Drop] {
        println!("  Created database/{}/", role.dir_name());
    }
    println!();
    println!("Project '{}' initialized successfully!", args.name);
    println!();
    println!("Next steps:");
    println!("  edit {}            # database connection", CONFIG_FILE_NAME);
    println!("  commit snapshot.sql into database/new/");
    println!("  strata record         # record it in the change sequence");
    println!("  strata build          # provision the database");

    Ok(())
}
