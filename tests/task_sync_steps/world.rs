//! Shared world state for task synchronization BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::fixture;
use tasksync::{
    config::SyncConfig,
    hosting::{
        adapters::InMemoryHostingProvider,
        domain::RepositoryFullName,
        ports::HostingProvider,
    },
    sync::{DiscoveredTask, PublishOutcome, ReconcileReport, SyncError, TaskSyncService},
    task::{adapters::memory::InMemoryTaskRepository, domain::Task},
    workspace::adapters::memory::InMemoryWorkspaceRepository,
};
use tempfile::TempDir;

use crate::scripted_git::ScriptedGit;

/// Engine type used by the BDD world.
pub type TestSyncService = TaskSyncService<
    InMemoryTaskRepository,
    InMemoryWorkspaceRepository,
    ScriptedGit,
    DefaultClock,
>;

/// Scenario world for task synchronization behaviour tests.
pub struct TaskSyncWorld {
    pub platform: Arc<InMemoryHostingProvider>,
    pub git: Arc<ScriptedGit>,
    pub service: TestSyncService,
    pub repo: Option<RepositoryFullName>,
    pub issues: HashMap<String, u64>,
    pub last_discovery: Option<Vec<DiscoveredTask>>,
    pub publish_results: Vec<Result<PublishOutcome, SyncError>>,
    pub last_reconcile: Option<ReconcileReport>,
    _scratch: TempDir,
}

impl TaskSyncWorld {
    /// Creates a world around an empty platform and workspace root.
    ///
    /// # Panics
    ///
    /// Panics when the scratch directory or engine cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let scratch = tempfile::tempdir().expect("scratch directory");
        let root = Utf8PathBuf::from_path_buf(scratch.path().join("workspaces"))
            .expect("utf-8 scratch path");
        let platform = Arc::new(InMemoryHostingProvider::new());
        let git = Arc::new(ScriptedGit::new());
        let service = TaskSyncService::new(
            Arc::clone(&platform) as Arc<dyn HostingProvider>,
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryWorkspaceRepository::new()),
            Arc::clone(&git),
            Arc::new(DefaultClock),
            SyncConfig {
                workspace_root: root,
                ..SyncConfig::default()
            },
        )
        .expect("engine builds");

        Self {
            platform,
            git,
            service,
            repo: None,
            issues: HashMap::new(),
            last_discovery: None,
            publish_results: Vec::new(),
            last_reconcile: None,
            _scratch: scratch,
        }
    }

    /// Returns the scenario repository.
    ///
    /// # Errors
    ///
    /// Returns an error when no repository was registered.
    pub fn repo(&self) -> Result<&RepositoryFullName, eyre::Report> {
        self.repo
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing repository in scenario world"))
    }

    /// Returns the issue number recorded for `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when no issue with that title was created.
    pub fn issue_number(&self, title: &str) -> Result<u64, eyre::Report> {
        self.issues
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no issue titled {title:?} in scenario world"))
    }

    /// Returns the task tracking the issue titled `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when the issue or its task is unknown.
    pub fn task_for(&self, title: &str) -> Result<Task, eyre::Report> {
        let repo = self.repo()?.clone();
        let number = self.issue_number(title)?;
        run_async(self.service.find_task_for_issue(&repo, number))?
            .ok_or_else(|| eyre::eyre!("no task tracks issue {title:?}"))
    }
}

impl Default for TaskSyncWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskSyncWorld {
    TaskSyncWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
