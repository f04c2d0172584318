//! Task synchronization between a hosting platform and local workspaces.
//!
//! [`TaskSyncService`] discovers issues assigned to the authenticated user,
//! turns them into tracked tasks, provisions a workspace per task, publishes
//! finished work as a pull request linked back to the issue, and reconciles
//! review activity afterwards.

mod error;
mod outcome;
mod service;
mod templates;

pub use error::{SyncError, SyncResult};
pub use outcome::{
    DiscoveredTask, MaterializedTask, PublishOutcome, PullRequestUpdates, ReconcileReport,
};
pub use service::TaskSyncService;

#[cfg(test)]
mod tests;
