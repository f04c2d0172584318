//! In-memory workspace repository.

use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::domain::TaskId;
use crate::workspace::{
    domain::{Workspace, WorkspaceId},
    ports::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult},
};

/// Thread-safe in-memory workspace repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspaceRepository {
    state: Arc<RwLock<InMemoryWorkspaceState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkspaceState {
    workspaces: HashMap<WorkspaceId, Workspace>,
    task_index: HashMap<TaskId, WorkspaceId>,
    path_index: HashMap<Utf8PathBuf, WorkspaceId>,
}

impl InMemoryWorkspaceRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn store(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            WorkspaceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.task_index.contains_key(&workspace.task_id()) {
            return Err(WorkspaceRepositoryError::TaskAlreadyHasWorkspace(
                workspace.task_id(),
            ));
        }
        let path = workspace.path().to_owned();
        if state.path_index.contains_key(&path) {
            return Err(WorkspaceRepositoryError::DuplicatePath(path));
        }

        state.task_index.insert(workspace.task_id(), workspace.id());
        state.path_index.insert(path, workspace.id());
        state.workspaces.insert(workspace.id(), workspace.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: WorkspaceId) -> WorkspaceRepositoryResult<Option<Workspace>> {
        let state = self.state.read().map_err(|err| {
            WorkspaceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.workspaces.get(&id).cloned())
    }

    async fn find_by_task_id(
        &self,
        task_id: TaskId,
    ) -> WorkspaceRepositoryResult<Option<Workspace>> {
        let state = self.state.read().map_err(|err| {
            WorkspaceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .task_index
            .get(&task_id)
            .and_then(|id| state.workspaces.get(id))
            .cloned())
    }

    async fn remove(&self, id: WorkspaceId) -> WorkspaceRepositoryResult<Option<Workspace>> {
        let mut state = self.state.write().map_err(|err| {
            WorkspaceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let Some(workspace) = state.workspaces.remove(&id) else {
            return Ok(None);
        };
        state.task_index.remove(&workspace.task_id());
        state.path_index.remove(workspace.path());
        Ok(Some(workspace))
    }
}
