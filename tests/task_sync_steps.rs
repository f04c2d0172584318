//! Behaviour tests for discovering, materializing and publishing tasks.

#![expect(
    clippy::expect_used,
    reason = "Test fixtures use expect for setup failures"
)]

#[path = "test_helpers/git.rs"]
mod scripted_git;
#[path = "task_sync_steps/mod.rs"]
mod task_sync_steps_defs;

use rstest_bdd_macros::scenario;
use task_sync_steps_defs::world::{TaskSyncWorld, world};

#[scenario(
    path = "tests/features/task_sync.feature",
    name = "Discover issues assigned to the user"
)]
#[tokio::test(flavor = "multi_thread")]
async fn discover_assigned_issues(world: TaskSyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_sync.feature",
    name = "Discovery is idempotent"
)]
#[tokio::test(flavor = "multi_thread")]
async fn discovery_is_idempotent(world: TaskSyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_sync.feature",
    name = "Materialize a task into a workspace"
)]
#[tokio::test(flavor = "multi_thread")]
async fn materialize_task(world: TaskSyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_sync.feature",
    name = "Publish completed work as a pull request"
)]
#[tokio::test(flavor = "multi_thread")]
async fn publish_completed_work(world: TaskSyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_sync.feature",
    name = "Publishing again returns the existing pull request"
)]
#[tokio::test(flavor = "multi_thread")]
async fn publish_again_reuses_pull_request(world: TaskSyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_sync.feature",
    name = "A failed link-back comment is reported"
)]
#[tokio::test(flavor = "multi_thread")]
async fn link_back_failure_reported(world: TaskSyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_sync.feature",
    name = "A rejected push opens no pull request"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_push_opens_nothing(world: TaskSyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_sync.feature",
    name = "Reconcile mirrors the task status as a label"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reconcile_mirrors_status_label(world: TaskSyncWorld) {
    let _ = world;
}
