//! Build command implementation

use anyhow::{Context, Result};
use st_core::MigrationPlanner;
use st_db::ScriptRunner;
use st_run::BuildRunner;

use crate::cli::{BuildArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the build command
pub(crate) fn execute(args: &BuildArgs, global: &GlobalArgs) -> Result<()> {
    let mut ctx = RuntimeContext::new(global)?;

    if args.dry_run {
        let plan = MigrationPlanner::new(&ctx.sequence, &ctx.log)
            .plan_build()
            .context("Cannot plan build")?;
        print_plan(&plan);
        return Ok(());
    }

    let runner = ctx.runner();
    runner
        .check_connection()
        .context("Cannot reach the target database")?;
    ctx.verbose(&format!("connected via {}", runner.runner_type()));

    let log_path = ctx.config.build_log_path();
    let executed = BuildRunner::new(&ctx.config, &ctx.sequence, &runner)
        .build(&mut ctx.log, &log_path)?;

    println!("{} scripts executed successfully.", executed);
    Ok(())
}

pub(crate) fn print_plan(plan: &[st_core::PlanStep]) {
    if plan.is_empty() {
        println!("Nothing to do.");
        return;
    }
    for step in plan {
        println!("would apply: {}", step);
    }
    println!("{} scripts would be executed.", plan.len());
}
