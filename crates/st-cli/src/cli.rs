//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Strata - sequenced database builds from version-controlled scripts
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending snapshot/upgrade scripts to the database
    Build(BuildArgs),

    /// Drop the database via the most recent applicable drop script
    Drop(DropArgs),

    /// Scaffold a new Strata project in the project directory
    Init(InitArgs),

    /// Show the database state and pending work
    Status(StatusArgs),

    /// Record committed scripts from the incoming directory into the sequence
    Record(RecordArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Print the plan without executing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the drop command
#[derive(Args, Debug)]
pub struct DropArgs {
    /// Print the plan without executing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name written into strata.yml
    #[arg(short, long, default_value = "myproject")]
    pub name: String,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Human-readable summary
    Table,
    /// JSON output
    Json,
}

/// Arguments for the record command
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Change hash to record (default: the last commit)
    #[arg(long)]
    pub hash: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
