//! Values returned by engine operations.

use crate::hosting::domain::{Comment, PullRequest, Review};
use crate::task::domain::Task;
use crate::workspace::domain::Workspace;

/// A task produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTask {
    /// The tracked task.
    pub task: Task,
    /// Whether this call created it.
    pub created: bool,
}

/// A task whose workspace was just provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedTask {
    /// The task, now in progress.
    pub task: Task,
    /// The recorded workspace.
    pub workspace: Workspace,
}

/// Result of publishing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A pull request was opened and linked from the issue.
    Created {
        /// The new pull request.
        pull_request: PullRequest,
        /// The back-reference comment on the issue.
        comment: Comment,
    },
    /// A pull request for the task branch already existed.
    Existing(PullRequest),
}

impl PublishOutcome {
    /// Returns the pull request in either case.
    #[must_use]
    pub const fn pull_request(&self) -> &PullRequest {
        match self {
            Self::Created { pull_request, .. } | Self::Existing(pull_request) => pull_request,
        }
    }

    /// Returns whether this call opened the pull request.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Pull-request activity newer than a cut-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestUpdates {
    /// Current pull-request state, including `merged`.
    pub pull_request: PullRequest,
    /// Comments created strictly after the cut-off.
    pub comments: Vec<Comment>,
    /// Reviews submitted strictly after the cut-off.
    pub reviews: Vec<Review>,
}

impl PullRequestUpdates {
    /// Returns whether nothing new arrived.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.comments.is_empty() && self.reviews.is_empty()
    }
}

/// Outcome of reconciling one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// The task as stored locally.
    pub task: Task,
    /// Issue labels after the status label was applied.
    pub labels: Vec<String>,
    /// Pull-request activity, when the task has a pull request.
    pub updates: Option<PullRequestUpdates>,
}
