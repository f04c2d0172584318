//! Service layer for task creation, lookup and status changes.

use crate::task::{
    domain::{
        IssueSnapshot, Task, TaskDomainError, TaskId, TaskStatus, TicketId, WorkspaceAttachment,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the task tracking `ticket_id`, creating a queued one when none
    /// exists. The flag is `true` when a task was created.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_if_absent(
        &self,
        ticket_id: TicketId,
        issue: IssueSnapshot,
    ) -> TaskLifecycleResult<(Task, bool)> {
        if let Some(existing) = self.repository.find_by_ticket_id(&ticket_id).await? {
            debug!(task_id = %existing.id(), ticket_id = %ticket_id, "task already tracked");
            return Ok((existing, false));
        }

        let task = Task::new(ticket_id, issue, &*self.clock);
        match self.repository.store(&task).await {
            Ok(()) => {
                info!(task_id = %task.id(), ticket_id = %task.ticket_id(), "task created");
                Ok((task, true))
            }
            Err(TaskRepositoryError::DuplicateTicket(ticket_id)) => {
                let winner = self
                    .repository
                    .find_by_ticket_id(&ticket_id)
                    .await?
                    .ok_or(TaskRepositoryError::DuplicateTicket(ticket_id))?;
                Ok((winner, false))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn get(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        Ok(self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(task_id))?)
    }

    /// Retrieves the task tracking a ticket.
    ///
    /// Returns `Ok(None)` when no task tracks the ticket.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_ticket_id(
        &self,
        ticket_id: &TicketId,
    ) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_ticket_id(ticket_id).await?)
    }

    /// Returns every tracked task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Applies a validated status change and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] for a forbidden
    /// move, or a repository error.
    pub async fn transition(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.get(task_id).await?;
        let from = task.status();
        task.transition_to(status, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %task_id, from = %from, to = %status, "task status changed");
        Ok(task)
    }

    /// Records a provisioned workspace on the task and moves it to
    /// [`TaskStatus::InProgress`] in one update.
    ///
    /// # Errors
    ///
    /// Returns a domain error when a workspace is already attached or the
    /// task cannot start, or a repository error.
    pub async fn start_in_workspace(
        &self,
        task_id: TaskId,
        attachment: WorkspaceAttachment,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.get(task_id).await?;
        task.attach_workspace(attachment, &*self.clock)?;
        task.transition_to(TaskStatus::InProgress, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }
}
