//! Task aggregate root.

use super::{IssueSnapshot, TaskDomainError, TaskId, TaskStatus, TicketId};
use crate::branch::BranchName;
use crate::workspace::domain::WorkspaceId;
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Reference from a task to its provisioned workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceLink {
    /// Workspace identifier.
    pub workspace_id: WorkspaceId,
    /// Workspace directory.
    pub path: Utf8PathBuf,
}

/// Everything recorded on a task when its workspace is provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceAttachment {
    /// Workspace reference.
    pub link: WorkspaceLink,
    /// Branch checked out in the workspace.
    pub branch: BranchName,
    /// Clone source.
    pub source_repository: String,
    /// Base branch the work branch was created from.
    pub base_branch: Option<String>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    ticket_id: TicketId,
    issue: IssueSnapshot,
    status: TaskStatus,
    branch: Option<BranchName>,
    workspace: Option<WorkspaceLink>,
    source_repository: Option<String>,
    base_branch: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted ticket identifier.
    pub ticket_id: TicketId,
    /// Persisted issue snapshot.
    pub issue: IssueSnapshot,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted branch, if any.
    pub branch: Option<BranchName>,
    /// Persisted workspace link, if any.
    pub workspace: Option<WorkspaceLink>,
    /// Persisted clone source, if any.
    pub source_repository: Option<String>,
    /// Persisted base branch, if any.
    pub base_branch: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a queued task for a remote issue.
    #[must_use]
    pub fn new(ticket_id: TicketId, issue: IssueSnapshot, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            ticket_id,
            issue,
            status: TaskStatus::Queued,
            branch: None,
            workspace: None,
            source_repository: None,
            base_branch: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            ticket_id: data.ticket_id,
            issue: data.issue,
            status: data.status,
            branch: data.branch,
            workspace: data.workspace,
            source_repository: data.source_repository,
            base_branch: data.base_branch,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the ticket identifier.
    #[must_use]
    pub const fn ticket_id(&self) -> &TicketId {
        &self.ticket_id
    }

    /// Returns the issue snapshot.
    #[must_use]
    pub const fn issue(&self) -> &IssueSnapshot {
        &self.issue
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the work branch, once provisioned.
    #[must_use]
    pub const fn branch(&self) -> Option<&BranchName> {
        self.branch.as_ref()
    }

    /// Returns the workspace link, once provisioned.
    #[must_use]
    pub const fn workspace(&self) -> Option<&WorkspaceLink> {
        self.workspace.as_ref()
    }

    /// Returns the clone source, once provisioned.
    #[must_use]
    pub fn source_repository(&self) -> Option<&str> {
        self.source_repository.as_deref()
    }

    /// Returns the base branch, once provisioned.
    #[must_use]
    pub fn base_branch(&self) -> Option<&str> {
        self.base_branch.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records the provisioned workspace and its branch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::WorkspaceAlreadyAttached`] if a workspace is
    /// already recorded.
    pub fn attach_workspace(
        &mut self,
        attachment: WorkspaceAttachment,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.workspace.is_some() {
            return Err(TaskDomainError::WorkspaceAlreadyAttached(self.id));
        }
        self.workspace = Some(attachment.link);
        self.branch = Some(attachment.branch);
        self.source_repository = Some(attachment.source_repository);
        self.base_branch = attachment.base_branch;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the status
    /// table forbids the move, including re-entering the current status.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
