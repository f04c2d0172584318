//! In-memory workspace repository behaviour.

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tasksync::{
    branch::BranchName,
    task::domain::TaskId,
    workspace::{
        adapters::memory::InMemoryWorkspaceRepository,
        domain::{NewWorkspace, Workspace},
        ports::{WorkspaceRepository, WorkspaceRepositoryError},
    },
};

#[fixture]
fn repo() -> InMemoryWorkspaceRepository {
    InMemoryWorkspaceRepository::new()
}

fn workspace(task_id: TaskId, path: &str) -> Workspace {
    Workspace::new(
        NewWorkspace {
            task_id,
            path: Utf8PathBuf::from(path),
            source: "https://github.com/acme/widgets.git".to_owned(),
            base_branch: Some("main".to_owned()),
            branch: BranchName::new("task/tidy-1").expect("valid branch"),
            credential_file: None,
        },
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test]
async fn stored_workspace_is_found_by_id_and_task(repo: InMemoryWorkspaceRepository) {
    let task_id = TaskId::new();
    let stored = workspace(task_id, "/work/one");

    repo.store(&stored).await.expect("store succeeds");

    let by_id = repo.find_by_id(stored.id()).await.expect("lookup succeeds");
    let by_task = repo.find_by_task_id(task_id).await.expect("lookup succeeds");
    assert_eq!(by_id.as_ref(), Some(&stored));
    assert_eq!(by_task, Some(stored));
}

#[rstest]
#[tokio::test]
async fn second_workspace_for_a_task_is_rejected(repo: InMemoryWorkspaceRepository) {
    let task_id = TaskId::new();
    repo.store(&workspace(task_id, "/work/one"))
        .await
        .expect("first store succeeds");

    let result = repo.store(&workspace(task_id, "/work/two")).await;

    assert!(matches!(
        result,
        Err(WorkspaceRepositoryError::TaskAlreadyHasWorkspace(id)) if id == task_id
    ));
}

#[rstest]
#[tokio::test]
async fn shared_directory_is_rejected(repo: InMemoryWorkspaceRepository) {
    repo.store(&workspace(TaskId::new(), "/work/one"))
        .await
        .expect("first store succeeds");

    let result = repo.store(&workspace(TaskId::new(), "/work/one")).await;

    assert!(matches!(
        result,
        Err(WorkspaceRepositoryError::DuplicatePath(path)) if path.as_str() == "/work/one"
    ));
}

#[rstest]
#[tokio::test]
async fn unknown_task_has_no_workspace(repo: InMemoryWorkspaceRepository) {
    let found = repo
        .find_by_task_id(TaskId::new())
        .await
        .expect("lookup succeeds");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn removed_workspace_frees_its_task_and_path(repo: InMemoryWorkspaceRepository) {
    let task_id = TaskId::new();
    let first = workspace(task_id, "/work/one");
    repo.store(&first).await.expect("store succeeds");

    let removed = repo.remove(first.id()).await.expect("remove succeeds");
    assert_eq!(removed, Some(first.clone()));
    assert_eq!(repo.find_by_task_id(task_id).await.expect("lookup"), None);
    assert_eq!(repo.remove(first.id()).await.expect("remove succeeds"), None);

    let replacement = workspace(task_id, "/work/one");
    repo.store(&replacement).await.expect("task and path are free again");
}
