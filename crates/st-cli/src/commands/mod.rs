//! CLI command implementations

pub(crate) mod build;
pub(crate) mod drop;
pub(crate) mod init;
pub(crate) mod record;
pub(crate) mod status;
