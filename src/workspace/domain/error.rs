//! Validation errors for workspace requests.

use crate::branch::BranchNameError;
use thiserror::Error;

/// Errors returned while validating a provisioning request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The source repository is empty after trimming.
    #[error("source repository must not be empty")]
    EmptySource,

    /// The explicit branch override is not a legal ref name.
    #[error("invalid branch override: {0}")]
    InvalidBranchOverride(#[from] BranchNameError),

    /// The requested base branch is not a legal ref name.
    #[error("invalid base branch `{0}`")]
    InvalidBaseBranch(String),
}
