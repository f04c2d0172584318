//! Engine tests against the in-memory platform and a scripted git runner.


use std::sync::{Arc, Mutex};

use crate::config::SyncConfig;
use crate::hosting::{
    adapters::InMemoryHostingProvider,
    domain::{CreateIssue, Issue, RepositoryFullName},
    ports::HostingProvider,
};
use crate::sync::TaskSyncService;
use crate::task::{adapters::memory::InMemoryTaskRepository, ports::TaskRepository};
use crate::workspace::{
    adapters::memory::InMemoryWorkspaceRepository,
    ports::{GitOutput, MockGitRunner},
};
use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::fixture;
use tempfile::TempDir;

pub(super) type TestService<T> =
    TaskSyncService<T, InMemoryWorkspaceRepository, MockGitRunner, DefaultClock>;

pub(super) struct Harness<T: TaskRepository = InMemoryTaskRepository> {
    pub(super) platform: Arc<InMemoryHostingProvider>,
    pub(super) service: TestService<T>,
    pub(super) workspaces: Arc<InMemoryWorkspaceRepository>,
    pub(super) git_calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub(super) repo: RepositoryFullName,
    pub(super) root: Utf8PathBuf,
    _scratch: TempDir,
}

impl<T: TaskRepository> Harness<T> {
    pub(super) async fn issue(&self, title: &str, assignees: &[&str], labels: &[&str]) -> Issue {
        let request = CreateIssue {
            title: title.to_owned(),
            body: Some(format!("Details for {title}.")),
            labels: labels.iter().map(|label| (*label).to_owned()).collect(),
            assignees: assignees.iter().map(|login| (*login).to_owned()).collect(),
        };
        self.platform
            .create_issue(&self.repo, &request)
            .await
            .expect("issue created")
    }

    pub(super) fn git_commands(&self) -> Vec<Vec<String>> {
        self.git_calls.lock().expect("calls lock").clone()
    }

    pub(super) fn count_git(&self, command: &str) -> usize {
        self.git_commands()
            .iter()
            .filter(|args| args.first().is_some_and(|arg| arg == command))
            .count()
    }
}

fn scripted_git() -> (MockGitRunner, Arc<Mutex<Vec<Vec<String>>>>) {
    let calls: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
    let recorded = Arc::clone(&calls);
    let mut git = MockGitRunner::new();
    git.expect_run().returning(move |_, _, args| {
        recorded.lock().expect("calls lock").push(args.to_vec());
        match args.first().map(String::as_str) {
            Some("rev-parse") => Ok(GitOutput::stdout("main\n")),
            _ => Ok(GitOutput::default()),
        }
    });
    (git, calls)
}

#[fixture]
pub(super) fn harness() -> Harness {
    harness_with(Arc::new(InMemoryTaskRepository::new()))
}

/// Builds a harness whose engine persists tasks through `tasks`.
pub(super) fn harness_with<T: TaskRepository>(tasks: Arc<T>) -> Harness<T> {
    let scratch = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(scratch.path().join("workspaces"))
        .expect("utf-8 temp path");
    let repo = RepositoryFullName::new("acme/widgets").expect("valid repo");
    let platform = Arc::new(InMemoryHostingProvider::new());
    platform.set_current_user("alice").expect("user set");
    platform.add_repository(&repo, "main").expect("repository added");

    let (git, git_calls) = scripted_git();
    let config = SyncConfig {
        workspace_root: root.clone(),
        ..SyncConfig::default()
    };
    let hosting: Arc<dyn HostingProvider> = Arc::clone(&platform) as Arc<dyn HostingProvider>;
    let workspaces = Arc::new(InMemoryWorkspaceRepository::new());
    let service = TaskSyncService::new(
        hosting,
        tasks,
        Arc::clone(&workspaces),
        Arc::new(git),
        Arc::new(DefaultClock),
        config,
    )
    .expect("engine builds");

    Harness {
        platform,
        service,
        workspaces,
        git_calls,
        repo,
        root,
        _scratch: scratch,
    }
}
