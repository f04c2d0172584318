//! Adapter implementations for workspace ports.

pub mod git_cli;
pub mod memory;

pub use git_cli::{ENV_GIT_BIN, GitCliRunner};
