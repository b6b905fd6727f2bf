//! Record command implementation - ingests committed scripts into the sequence
//!
//! Scripts are authored as `snapshot.sql`, `upgrade_script.sql`, or
//! `drop.sql` inside `<database_dir>/new/` and committed. Recording a change
//! moves each committed incoming script to its role directory under its
//! change hash and appends one ChangeRecord with the roles that were found.

use anyhow::{Context, Result};
use st_core::{ChangeRecord, ScriptRole};
use st_git::{GitCli, VersionControlHistory};
use std::fs;
use std::path::PathBuf;

use crate::cli::{GlobalArgs, RecordArgs};
use crate::context::RuntimeContext;

/// One pending file move: an incoming script and its recorded destination
#[derive(Debug)]
struct ScriptMove {
    source: PathBuf,
    dest: PathBuf,
    role: ScriptRole,
}

/// Execute the record command
pub(crate) fn execute(args: &RecordArgs, global: &GlobalArgs) -> Result<()> {
    let mut ctx = RuntimeContext::new(global)?;
    let history = GitCli::new(&ctx.config.root);

    let hash = match &args.hash {
        Some(hash) => hash.clone(),
        None => history
            .last_change_id()
            .context("Cannot read the last commit")?,
    };
    ctx.verbose(&format!("recording change {}", hash));

    let moves = collect_moves(&ctx, &history, &hash)?;
    log::debug!("change {} has {} incoming scripts", hash, moves.len());
    if moves.is_empty() {
        println!("No SQL files to record.");
        return Ok(());
    }

    // Validate everything before moving anything, so a bad file leaves the
    // tree untouched
    let record = ChangeRecord::new(
        hash.clone(),
        moves.iter().any(|m| m.role == ScriptRole::Upgrade),
        moves.iter().any(|m| m.role == ScriptRole::Drop),
        moves.iter().any(|m| m.role == ScriptRole::Snapshot),
    );
    ctx.sequence.append(record)?;

    for script_move in &moves {
        if let Some(parent) = script_move.dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&script_move.source, &script_move.dest).with_context(|| {
            format!(
                "Failed to move {} to {}",
                script_move.source.display(),
                script_move.dest.display()
            )
        })?;
        println!(
            "  {} -> {}",
            script_move.source.display(),
            script_move.dest.display()
        );
    }

    ctx.sequence
        .save(&ctx.config.sequence_path())
        .context("Failed to save change sequence")?;

    println!("Recorded change {} ({} scripts).", hash, moves.len());
    Ok(())
}

/// Find committed `.sql` files sitting in the incoming directory and map
/// each to its role destination. Unknown file stems abort the whole record.
fn collect_moves(
    ctx: &RuntimeContext,
    history: &dyn VersionControlHistory,
    hash: &str,
) -> Result<Vec<ScriptMove>> {
    let new_dir = ctx.config.new_scripts_path();
    let mut moves = Vec::new();

    for rel_path in history.files_changed_by(hash)? {
        let source = ctx.config.root.join(&rel_path);

        // Only files that are still present in the incoming directory
        if source.parent() != Some(new_dir.as_path()) || !source.exists() {
            continue;
        }
        if source.extension().and_then(|e| e.to_str()) != Some("sql") {
            continue;
        }

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let role = ScriptRole::from_file_stem(stem).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown script type '{}' in {} (expected snapshot, upgrade_script, or drop)",
                stem,
                source.display()
            )
        })?;

        moves.push(ScriptMove {
            source,
            dest: ctx.config.script_path(hash, role),
            role,
        });
    }

    Ok(moves)
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
