//! In-memory integration tests for task lifecycle operations.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tasksync::{
    branch::BranchName,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{
            IssueSnapshot, TaskDomainError, TaskStatus, TicketId, WorkspaceAttachment,
            WorkspaceLink,
        },
        services::{TaskLifecycleError, TaskLifecycleService},
    },
    workspace::domain::WorkspaceId,
};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

fn ticket(number: u64) -> TicketId {
    TicketId::from_parts("github", "acme/widgets", number).expect("valid ticket")
}

fn attachment(path: &str) -> WorkspaceAttachment {
    WorkspaceAttachment {
        link: WorkspaceLink {
            workspace_id: WorkspaceId::new(),
            path: Utf8PathBuf::from(path),
        },
        branch: BranchName::new("task/tidy-4").expect("valid branch"),
        source_repository: "https://github.com/acme/widgets.git".to_owned(),
        base_branch: Some("main".to_owned()),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_discovery_creates_one_task_per_ticket(service: TestService) {
    let shared = Arc::new(service);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let racer = Arc::clone(&shared);
            tokio::spawn(async move {
                racer
                    .create_if_absent(ticket(4), IssueSnapshot::new("Tidy").expect("title"))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut ids = Vec::new();
    for handle in handles {
        let (task, was_created) = handle.await.expect("join").expect("create succeeds");
        created += usize::from(was_created);
        ids.push(task.id());
    }

    assert_eq!(created, 1);
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(shared.list().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn starting_work_records_the_workspace(service: TestService) {
    let (task, _) = service
        .create_if_absent(ticket(4), IssueSnapshot::new("Tidy").expect("title"))
        .await
        .expect("create succeeds");

    let started = service
        .start_in_workspace(task.id(), attachment("/work/4"))
        .await
        .expect("start succeeds");

    assert_eq!(started.status(), TaskStatus::InProgress);
    assert_eq!(started.branch().map(BranchName::as_str), Some("task/tidy-4"));
    assert_eq!(started.base_branch(), Some("main"));
    let reloaded = service.get(task.id()).await.expect("task exists");
    assert_eq!(reloaded, started);
}

#[rstest]
#[tokio::test]
async fn starting_twice_is_rejected(service: TestService) {
    let (task, _) = service
        .create_if_absent(ticket(4), IssueSnapshot::new("Tidy").expect("title"))
        .await
        .expect("create succeeds");
    service
        .start_in_workspace(task.id(), attachment("/work/4"))
        .await
        .expect("first start succeeds");

    let result = service
        .start_in_workspace(task.id(), attachment("/work/4b"))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::WorkspaceAlreadyAttached(id))) if id == task.id()
    ));
}

#[rstest]
#[tokio::test]
async fn failed_task_can_be_requeued(service: TestService) {
    let (task, _) = service
        .create_if_absent(ticket(9), IssueSnapshot::new("Flaky").expect("title"))
        .await
        .expect("create succeeds");

    service
        .transition(task.id(), TaskStatus::Failed)
        .await
        .expect("fail succeeds");
    let requeued = service
        .transition(task.id(), TaskStatus::Queued)
        .await
        .expect("requeue succeeds");

    assert_eq!(requeued.status(), TaskStatus::Queued);
}
