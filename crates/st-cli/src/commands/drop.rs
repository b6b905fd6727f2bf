//! Drop command implementation

use anyhow::{Context, Result};
use st_core::MigrationPlanner;
use st_db::ScriptRunner;
use st_run::BuildRunner;

use crate::cli::{DropArgs, GlobalArgs};
use crate::context::RuntimeContext;
use crate::commands::build::print_plan;

/// Execute the drop command
pub(crate) fn execute(args: &DropArgs, global: &GlobalArgs) -> Result<()> {
    let mut ctx = RuntimeContext::new(global)?;

    if args.dry_run {
        let plan = MigrationPlanner::new(&ctx.sequence, &ctx.log)
            .plan_drop()
            .context("Cannot plan drop")?;
        print_plan(&plan);
        return Ok(());
    }

    let runner = ctx.runner();
    runner
        .check_connection()
        .context("Cannot reach the target database")?;
    ctx.verbose(&format!("connected via {}", runner.runner_type()));

    let log_path = ctx.config.build_log_path();
    let executed =
        BuildRunner::new(&ctx.config, &ctx.sequence, &runner).drop(&mut ctx.log, &log_path)?;

    println!("{} scripts executed successfully.", executed);
    Ok(())
}
