//! Engine error taxonomy.

use crate::config::ConfigError;
use crate::context::ContextError;
use crate::hosting::{domain::PullRequest, ports::HostingError};
use crate::task::{domain::TaskDomainError, services::TaskLifecycleError};
use crate::workspace::{
    ports::{GitCommandError, WorkspaceRepositoryError},
    services::ProvisionError,
};
use thiserror::Error;

/// Errors returned by [`super::TaskSyncService`].
#[derive(Debug, Error)]
pub enum SyncError {
    /// The task is not in a state the operation accepts.
    #[error("{0}")]
    Validation(String),

    /// The engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Task lookup, creation or update failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),

    /// Task domain validation failed.
    #[error(transparent)]
    TaskDomain(#[from] TaskDomainError),

    /// A hosting API call failed.
    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// Workspace provisioning failed.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// A git command in an existing workspace failed.
    #[error(transparent)]
    Git(#[from] GitCommandError),

    /// Recording the workspace failed.
    #[error(transparent)]
    WorkspaceStore(#[from] WorkspaceRepositoryError),

    /// The caller cancelled the operation or it timed out.
    #[error(transparent)]
    Interrupted(#[from] ContextError),

    /// A message template failed to render.
    #[error("failed to render {name} template: {source}")]
    Template {
        /// Which template failed.
        name: &'static str,
        /// Template engine error.
        source: minijinja::Error,
    },

    /// The pull request was opened but the issue comment linking to it
    /// failed. The pull request is carried so callers can retry the link.
    #[error("pull request #{} opened but linking it to the issue failed: {source}", .pull_request.number)]
    LinkBackFailed {
        /// The created pull request.
        pull_request: Box<PullRequest>,
        /// Comment failure.
        source: HostingError,
    },
}

/// Result type for engine operations.
pub type SyncResult<T> = Result<T, SyncError>;
