//! End-to-end task flows through the engine.

use chrono::Duration;
use rstest::rstest;
use tasksync::{
    context::OperationContext,
    hosting::domain::{Comment, Review, User},
    sync::{PublishOutcome, SyncError},
    task::domain::TaskStatus,
    workspace::ports::WorkspaceRepository,
};

use super::helpers::{Setup, setup};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issue_travels_from_discovery_to_merged_pull_request(setup: Setup) {
    let ctx = OperationContext::new();
    let issue = setup.open_issue("Cache search results", "bot").await;

    let discovered = setup
        .engine
        .discover(&ctx, &setup.repo)
        .await
        .expect("discovery succeeds");
    let task = discovered.first().expect("one task").task.clone();
    assert_eq!(discovered.len(), 1);

    let materialized = setup
        .engine
        .materialize(&ctx, task.id())
        .await
        .expect("materialize succeeds");
    assert_eq!(materialized.task.status(), TaskStatus::InProgress);
    assert_eq!(materialized.workspace.base_branch(), Some("trunk"));
    assert_eq!(
        materialized.workspace.path(),
        setup.root.join(task.id().to_string()).as_path()
    );
    let stored = setup
        .workspaces
        .find_by_task_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("workspace recorded");
    assert_eq!(stored.id(), materialized.workspace.id());

    setup
        .engine
        .update_status(task.id(), TaskStatus::Completed)
        .await
        .expect("task completes");
    let outcome = setup
        .engine
        .publish(&ctx, task.id())
        .await
        .expect("publish succeeds");
    let PublishOutcome::Created { pull_request, .. } = outcome else {
        panic!("expected a new pull request, got {outcome:?}");
    };
    assert_eq!(pull_request.base.ref_name, "trunk");
    assert_eq!(
        pull_request.head.ref_name,
        format!("task/cache-search-results-{}", issue.number)
    );
    let body = pull_request.body.clone().unwrap_or_default();
    assert!(body.contains(&format!("Closes #{}", issue.number)), "body: {body}");

    let since = setup
        .engine
        .get_task(task.id())
        .await
        .expect("task exists")
        .updated_at();
    let later = since + Duration::minutes(5);
    setup
        .platform
        .add_comment(
            &setup.repo,
            pull_request.number,
            Comment {
                id: 900,
                author: Some(User::new("carol", 7)),
                body: "Looks good".to_owned(),
                created_at: later,
                updated_at: later,
                url: None,
            },
        )
        .expect("comment added");
    setup
        .platform
        .add_review(
            &setup.repo,
            pull_request.number,
            Review {
                id: 3,
                author: Some(User::new("carol", 7)),
                body: None,
                state: "APPROVED".to_owned(),
                submitted_at: Some(later),
                commit_id: None,
                url: None,
            },
        )
        .expect("review added");
    setup
        .platform
        .merge_pull_request(&setup.repo, pull_request.number)
        .expect("merged");

    let report = setup
        .engine
        .reconcile(&ctx, task.id(), since)
        .await
        .expect("reconcile succeeds");
    assert_eq!(report.labels, vec!["bot:completed".to_owned()]);
    let updates = report.updates.expect("pull request updates");
    assert!(updates.pull_request.merged);
    assert_eq!(
        updates.comments.iter().map(|comment| comment.id).collect::<Vec<_>>(),
        vec![900]
    );
    assert_eq!(updates.reviews.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_clone_leaves_task_queued(setup: Setup) {
    let ctx = OperationContext::new();
    setup.open_issue("Tidy config", "bot").await;
    let discovered = setup
        .engine
        .discover(&ctx, &setup.repo)
        .await
        .expect("discovery succeeds");
    let task_id = discovered.first().expect("one task").task.id();
    setup.git.fail_on("clone");

    let result = setup.engine.materialize(&ctx, task_id).await;

    assert!(matches!(result, Err(SyncError::Provision(_))), "got {result:?}");
    let task = setup.engine.get_task(task_id).await.expect("task exists");
    assert_eq!(task.status(), TaskStatus::Queued);
    assert!(task.workspace().is_none());
    assert!(
        setup
            .workspaces
            .find_by_task_id(task_id)
            .await
            .expect("lookup succeeds")
            .is_none()
    );
    assert!(!setup.root.join(task_id.to_string()).exists());
    assert_eq!(setup.git.count("checkout"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discovery_pages_through_every_assigned_issue(setup: Setup) {
    for index in 0..130 {
        let assignee = if index < 13 { "someone-else" } else { "bot" };
        setup.open_issue(&format!("Chore {index}"), assignee).await;
    }

    let discovered = setup
        .engine
        .discover(&OperationContext::new(), &setup.repo)
        .await
        .expect("discovery succeeds");

    assert_eq!(discovered.len(), 117);
    assert!(discovered.iter().all(|entry| entry.created));
    assert!(setup.git.calls().is_empty());
}
