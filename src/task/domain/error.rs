//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::hosting::domain::{ParsePlatformError, RepositoryNameError};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The hosting platform is unsupported.
    #[error(transparent)]
    InvalidPlatform(#[from] ParsePlatformError),

    /// The repository name does not follow `owner/repo` format.
    #[error(transparent)]
    InvalidRepository(#[from] RepositoryNameError),

    /// The issue number is invalid.
    #[error("invalid issue number {0}, expected a positive integer")]
    InvalidIssueNumber(u64),

    /// The ticket identifier is not `<platform>:<owner>/<repo>#<number>`.
    #[error("invalid ticket id '{0}', expected <platform>:<owner>/<repo>#<number>")]
    InvalidTicketId(String),

    /// The issue title is empty after trimming.
    #[error("issue title must not be empty")]
    EmptyIssueTitle,

    /// The requested status change is not permitted.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// A workspace is already attached to the task.
    #[error("task {0} already has a workspace")]
    WorkspaceAlreadyAttached(TaskId),
}

/// Error returned while parsing task statuses from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
