//! Domain model for locally tracked tasks.
//!
//! A task mirrors one remote issue, identified by its [`TicketId`], and
//! records the workspace and branch it is worked on. Infrastructure concerns
//! stay outside this boundary.

mod error;
mod ids;
mod issue;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{IssueNumber, TaskId, TicketId};
pub use issue::IssueSnapshot;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, WorkspaceAttachment, WorkspaceLink};
