//! Shared fixtures for the in-memory integration tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::fixture;
use tasksync::{
    config::SyncConfig,
    hosting::{
        adapters::InMemoryHostingProvider,
        domain::{CreateIssue, Issue, RepositoryFullName},
        ports::HostingProvider,
    },
    sync::TaskSyncService,
    task::adapters::memory::InMemoryTaskRepository,
    workspace::adapters::memory::InMemoryWorkspaceRepository,
};
use tempfile::TempDir;

use crate::scripted_git::ScriptedGit;

/// Engine wired to in-memory adapters and a scripted git runner.
pub type Engine =
    TaskSyncService<InMemoryTaskRepository, InMemoryWorkspaceRepository, ScriptedGit, DefaultClock>;

/// Engine plus handles on its collaborators.
pub struct Setup {
    pub platform: Arc<InMemoryHostingProvider>,
    pub git: Arc<ScriptedGit>,
    pub workspaces: Arc<InMemoryWorkspaceRepository>,
    pub engine: Engine,
    pub repo: RepositoryFullName,
    pub root: Utf8PathBuf,
    _scratch: TempDir,
}

impl Setup {
    /// Opens an issue assigned to `assignee`.
    pub async fn open_issue(&self, title: &str, assignee: &str) -> Issue {
        let request = CreateIssue {
            title: title.to_owned(),
            body: Some(format!("{title}, please.")),
            labels: Vec::new(),
            assignees: vec![assignee.to_owned()],
        };
        self.platform
            .create_issue(&self.repo, &request)
            .await
            .expect("issue created")
    }
}

/// Builds an engine for `bot` on `acme/widgets` whose default branch is
/// `trunk`.
#[fixture]
pub fn setup() -> Setup {
    let scratch = tempfile::tempdir().expect("scratch directory");
    let root = Utf8PathBuf::from_path_buf(scratch.path().join("work"))
        .expect("utf-8 scratch path");
    let repo = RepositoryFullName::new("acme/widgets").expect("valid repository");
    let platform = Arc::new(InMemoryHostingProvider::new());
    platform.set_current_user("bot").expect("user set");
    platform.add_repository(&repo, "trunk").expect("repository added");

    let git = Arc::new(ScriptedGit::new());
    let workspaces = Arc::new(InMemoryWorkspaceRepository::new());
    let engine = TaskSyncService::new(
        Arc::clone(&platform) as Arc<dyn HostingProvider>,
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&workspaces),
        Arc::clone(&git),
        Arc::new(DefaultClock),
        SyncConfig {
            workspace_root: root.clone(),
            label_prefix: "bot".to_owned(),
            ..SyncConfig::default()
        },
    )
    .expect("engine builds");

    Setup {
        platform,
        git,
        workspaces,
        engine,
        repo,
        root,
        _scratch: scratch,
    }
}
