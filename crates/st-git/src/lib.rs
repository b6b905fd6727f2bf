//! st-git - Version-control history layer for Strata
//!
//! This crate provides the `VersionControlHistory` trait and the git
//! command-line implementation used by the ingestion step.

pub mod error;
pub mod history;

pub use error::{GitError, GitResult};
pub use history::{GitCli, VersionControlHistory};
