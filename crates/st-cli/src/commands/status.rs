//! Status command implementation

use anyhow::Result;
use serde::Serialize;
use st_core::{CoreError, MigrationPlanner};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::context::RuntimeContext;

/// Status report for one database
#[derive(Debug, Serialize)]
struct StatusReport {
    state: String,
    last_applied: Option<LastApplied>,
    changes_known: usize,
    scripts_applied: usize,
    pending_scripts: usize,
    blocked: Option<String>,
}

#[derive(Debug, Serialize)]
struct LastApplied {
    hash: String,
    role: String,
    applied_at: String,
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let planner = MigrationPlanner::new(&ctx.sequence, &ctx.log);

    let (pending_scripts, blocked) = match planner.plan_build() {
        Ok(plan) => (plan.len(), None),
        // A snapshotless catalogue blocks provisioning but is still a
        // reportable status, not a status failure
        Err(err @ CoreError::NoSnapshotAvailable) => (0, Some(err.to_string())),
        Err(err) => return Err(err.into()),
    };

    let report = StatusReport {
        state: planner.state().to_string(),
        last_applied: ctx.log.last().map(|entry| LastApplied {
            hash: entry.hash.clone(),
            role: entry.role.to_string(),
            applied_at: entry.applied_at.to_rfc3339(),
        }),
        changes_known: ctx.sequence.len(),
        scripts_applied: ctx.log.len(),
        pending_scripts,
        blocked,
    };

    match args.output {
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        StatusOutput::Table => print_table(&report),
    }

    Ok(())
}

fn print_table(report: &StatusReport) {
    println!("state:           {}", report.state);
    match &report.last_applied {
        Some(last) => println!(
            "last applied:    {} {} at {}",
            last.role, last.hash, last.applied_at
        ),
        None => println!("last applied:    (none)"),
    }
    println!("changes known:   {}", report.changes_known);
    println!("scripts applied: {}", report.scripts_applied);
    println!("pending scripts: {}", report.pending_scripts);
    if let Some(blocked) = &report.blocked {
        println!("blocked:         {}", blocked);
    }
}
