//! Port contracts for git execution and workspace persistence.

pub mod git;
pub mod repository;

#[cfg(test)]
pub use git::MockGitRunner;
pub use git::{GitCommandError, GitOutput, GitRunner};
pub use repository::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult};
