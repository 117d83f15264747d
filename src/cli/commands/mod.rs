//! CLI command implementations

pub mod init;
pub mod migrate;
pub mod validate;
