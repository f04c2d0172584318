//! Provisioning request.

use super::{CommitterIdentity, GitAuth, WorkspaceDomainError};
use crate::branch::{BranchName, derive_branch_name};
use std::collections::BTreeMap;

/// Metadata key carrying an explicit branch name.
pub const BRANCH_NAME_METADATA_KEY: &str = "branch_name";

/// Everything needed to provision one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRequest {
    task_name: String,
    source: String,
    base_branch: Option<String>,
    ticket: Option<String>,
    auth: Option<GitAuth>,
    committer: Option<CommitterIdentity>,
    metadata: BTreeMap<String, String>,
}

impl WorkspaceRequest {
    /// Creates a request with the required task name and clone source.
    #[must_use]
    pub fn new(task_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            source: source.into(),
            base_branch: None,
            ticket: None,
            auth: None,
            committer: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the branch to check out before creating the task branch.
    #[must_use]
    pub fn with_base_branch(mut self, base_branch: impl Into<String>) -> Self {
        self.base_branch = Some(base_branch.into());
        self
    }

    /// Sets the ticket suffix used when deriving the branch name.
    #[must_use]
    pub fn with_ticket(mut self, ticket: impl Into<String>) -> Self {
        self.ticket = Some(ticket.into());
        self
    }

    /// Sets clone authentication.
    #[must_use]
    pub fn with_auth(mut self, auth: GitAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the committer identity configured in the clone.
    #[must_use]
    pub fn with_committer(mut self, committer: CommitterIdentity) -> Self {
        self.committer = Some(committer);
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns the task name.
    #[must_use]
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Returns the clone source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the requested base branch.
    #[must_use]
    pub fn base_branch(&self) -> Option<&str> {
        self.base_branch
            .as_deref()
            .map(str::trim)
            .filter(|branch| !branch.is_empty())
    }

    /// Returns the ticket suffix.
    #[must_use]
    pub fn ticket(&self) -> Option<&str> {
        self.ticket.as_deref()
    }

    /// Returns clone authentication.
    #[must_use]
    pub const fn auth(&self) -> Option<&GitAuth> {
        self.auth.as_ref()
    }

    /// Returns the committer identity.
    #[must_use]
    pub const fn committer(&self) -> Option<&CommitterIdentity> {
        self.committer.as_ref()
    }

    /// Returns a metadata value.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError`] when the task name or source is
    /// blank, or the base branch is not a legal ref name.
    pub fn validate(&self) -> Result<(), WorkspaceDomainError> {
        if self.task_name.trim().is_empty() {
            return Err(WorkspaceDomainError::EmptyTaskName);
        }
        if self.source.trim().is_empty() {
            return Err(WorkspaceDomainError::EmptySource);
        }
        if let Some(base) = self.base_branch()
            && BranchName::new(base).is_err()
        {
            return Err(WorkspaceDomainError::InvalidBaseBranch(base.to_owned()));
        }
        Ok(())
    }

    /// Resolves the branch to create: the `branch_name` metadata override
    /// when present, otherwise a name derived from the task name and ticket.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvalidBranchOverride`] when the
    /// override is not a legal ref name.
    pub fn branch_name(&self) -> Result<BranchName, WorkspaceDomainError> {
        match self.metadata(BRANCH_NAME_METADATA_KEY) {
            Some(explicit) => Ok(BranchName::new(explicit)?),
            None => Ok(derive_branch_name(&self.task_name, self.ticket.as_deref())),
        }
    }
}
