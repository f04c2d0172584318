//! Workspace record.

use super::WorkspaceId;
use crate::branch::BranchName;
use crate::task::domain::TaskId;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A provisioned clone owned by one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    task_id: TaskId,
    path: Utf8PathBuf,
    source: String,
    base_branch: Option<String>,
    branch: BranchName,
    credential_file: Option<Utf8PathBuf>,
    created_at: DateTime<Utc>,
}

/// Parameter object for recording a freshly provisioned workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkspace {
    /// Owning task.
    pub task_id: TaskId,
    /// Workspace directory.
    pub path: Utf8PathBuf,
    /// Clone source.
    pub source: String,
    /// Base branch, when one was requested.
    pub base_branch: Option<String>,
    /// Checked-out task branch.
    pub branch: BranchName,
    /// Credential-store file written beside the workspace, if any.
    pub credential_file: Option<Utf8PathBuf>,
}

impl Workspace {
    /// Creates a workspace record stamped with the clock's time.
    #[must_use]
    pub fn new(data: NewWorkspace, clock: &impl Clock) -> Self {
        Self {
            id: WorkspaceId::new(),
            task_id: data.task_id,
            path: data.path,
            source: data.source,
            base_branch: data.base_branch,
            branch: data.branch,
            credential_file: data.credential_file,
            created_at: clock.utc(),
        }
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn id(&self) -> WorkspaceId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the workspace directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the clone source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the base branch.
    #[must_use]
    pub fn base_branch(&self) -> Option<&str> {
        self.base_branch.as_deref()
    }

    /// Returns the task branch.
    #[must_use]
    pub const fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Returns the credential-store file kept for pushes.
    ///
    /// The file lives outside the workspace tree, so removing the workspace
    /// through [`discard`] is the only cleanup path.
    ///
    /// [`discard`]: crate::workspace::services::discard
    #[must_use]
    pub fn credential_file(&self) -> Option<&Utf8Path> {
        self.credential_file.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
