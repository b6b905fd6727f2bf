//! st-db - Script execution layer for Strata
//!
//! This crate provides the `ScriptRunner` trait and the mysql
//! client-process implementation.

pub mod error;
pub mod mysql;
pub mod traits;

pub use error::{DbError, DbResult};
pub use mysql::MysqlCliRunner;
pub use traits::ScriptRunner;
