//! Repository port for workspace records.

use crate::task::domain::TaskId;
use crate::workspace::domain::{Workspace, WorkspaceId};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace repository operations.
pub type WorkspaceRepositoryResult<T> = Result<T, WorkspaceRepositoryError>;

/// Workspace persistence contract.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Stores a new workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::TaskAlreadyHasWorkspace`] or
    /// [`WorkspaceRepositoryError::DuplicatePath`] when the record would
    /// break uniqueness.
    async fn store(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()>;

    /// Finds a workspace by identifier.
    async fn find_by_id(&self, id: WorkspaceId) -> WorkspaceRepositoryResult<Option<Workspace>>;

    /// Finds the workspace owned by a task.
    async fn find_by_task_id(&self, task_id: TaskId)
    -> WorkspaceRepositoryResult<Option<Workspace>>;

    /// Removes a workspace record, returning it when it existed.
    async fn remove(&self, id: WorkspaceId) -> WorkspaceRepositoryResult<Option<Workspace>>;
}

/// Errors returned by workspace repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceRepositoryError {
    /// The task already owns a workspace.
    #[error("task {0} already has a workspace")]
    TaskAlreadyHasWorkspace(TaskId),

    /// Another workspace uses the same directory.
    #[error("workspace path already recorded: {0}")]
    DuplicatePath(Utf8PathBuf),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkspaceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
