//! Then steps for task synchronization BDD scenarios.

use super::world::{TaskSyncWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use tasksync::{
    context::OperationContext,
    hosting::{domain::ListOptions, ports::HostingProvider},
    sync::{PublishOutcome, SyncError},
    task::domain::TaskStatus,
};

fn last_outcome(world: &TaskSyncWorld) -> Result<&PublishOutcome, eyre::Report> {
    match world.publish_results.last() {
        Some(Ok(outcome)) => Ok(outcome),
        Some(Err(err)) => Err(eyre::eyre!("expected a publish outcome, got {err}")),
        None => Err(eyre::eyre!("missing publish result")),
    }
}

fn last_error(world: &TaskSyncWorld) -> Result<&SyncError, eyre::Report> {
    match world.publish_results.last() {
        Some(Err(err)) => Ok(err),
        Some(Ok(outcome)) => Err(eyre::eyre!("expected a publish failure, got {outcome:?}")),
        None => Err(eyre::eyre!("missing publish result")),
    }
}

#[then("{count:usize} tasks were discovered")]
fn tasks_discovered(world: &TaskSyncWorld, count: usize) -> Result<(), eyre::Report> {
    let discovered = world
        .last_discovery
        .as_ref()
        .ok_or_else(|| eyre::eyre!("discovery has not run"))?;
    if discovered.len() != count {
        return Err(eyre::eyre!(
            "expected {count} discovered tasks, found {}",
            discovered.len()
        ));
    }
    Ok(())
}

#[then("{count:usize} tasks were newly created")]
fn tasks_created(world: &TaskSyncWorld, count: usize) -> Result<(), eyre::Report> {
    let discovered = world
        .last_discovery
        .as_ref()
        .ok_or_else(|| eyre::eyre!("discovery has not run"))?;
    let created = discovered.iter().filter(|entry| entry.created).count();
    if created != count {
        return Err(eyre::eyre!("expected {count} new tasks, found {created}"));
    }
    Ok(())
}

#[then(r#"the issue "{title}" has no task"#)]
fn issue_has_no_task(world: &TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let repo = world.repo()?.clone();
    let number = world.issue_number(&title)?;
    let task = run_async(world.service.find_task_for_issue(&repo, number))
        .wrap_err("look up task")?;
    if let Some(found) = task {
        return Err(eyre::eyre!("expected no task, found {}", found.id()));
    }
    Ok(())
}

#[then(r#"the task for "{title}" is "{status}""#)]
fn task_status_is(world: &TaskSyncWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.task_for(&title)?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the task for "{title}" works on branch "{branch}""#)]
fn task_branch_is(world: &TaskSyncWorld, title: String, branch: String) -> Result<(), eyre::Report> {
    let task = world.task_for(&title)?;
    let actual = task
        .branch()
        .ok_or_else(|| eyre::eyre!("task has no branch"))?;
    if actual.as_str() != branch {
        return Err(eyre::eyre!("expected branch {branch}, found {actual}"));
    }
    Ok(())
}

#[then(r#"git cloned "{url}""#)]
fn git_cloned(world: &TaskSyncWorld, url: String) -> Result<(), eyre::Report> {
    let cloned = world
        .git
        .calls()
        .iter()
        .any(|args| args.first().is_some_and(|arg| arg == "clone") && args.contains(&url));
    if !cloned {
        return Err(eyre::eyre!("no clone of {url} in {:?}", world.git.calls()));
    }
    Ok(())
}

#[then(r#"git ran "{subcommand}" {count:usize} times"#)]
fn git_ran(world: &TaskSyncWorld, subcommand: String, count: usize) -> Result<(), eyre::Report> {
    let actual = world.git.count(&subcommand);
    if actual != count {
        return Err(eyre::eyre!(
            "expected {count} {subcommand} invocations, found {actual}"
        ));
    }
    Ok(())
}

#[then("a pull request was opened")]
fn pull_request_opened(world: &TaskSyncWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    if !outcome.is_created() {
        return Err(eyre::eyre!("expected a new pull request, got {outcome:?}"));
    }
    Ok(())
}

#[then("the existing pull request was returned")]
fn existing_pull_request(world: &TaskSyncWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    let PublishOutcome::Existing(existing) = outcome else {
        return Err(eyre::eyre!("expected an existing pull request, got {outcome:?}"));
    };
    let first = world
        .publish_results
        .first()
        .and_then(|result| result.as_ref().ok())
        .ok_or_else(|| eyre::eyre!("missing first publish outcome"))?;
    if first.pull_request().number != existing.number {
        return Err(eyre::eyre!(
            "expected pull request #{}, found #{}",
            first.pull_request().number,
            existing.number
        ));
    }
    Ok(())
}

#[then(r#"the issue "{title}" links to the pull request"#)]
fn issue_links_back(world: &TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let repo = world.repo()?.clone();
    let number = world.issue_number(&title)?;
    let outcome = last_outcome(world)?;
    let comments = run_async(world.platform.list_comments(&repo, number, &ListOptions::default()))
        .wrap_err("list issue comments")?;
    let marker = format!("#{}", outcome.pull_request().number);
    if !comments.iter().any(|comment| comment.body.contains(&marker)) {
        return Err(eyre::eyre!("no comment mentions {marker}: {comments:?}"));
    }
    Ok(())
}

#[then("publishing fails because the link-back comment failed")]
fn link_back_failed(world: &TaskSyncWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !matches!(err, SyncError::LinkBackFailed { .. }) {
        return Err(eyre::eyre!("expected LinkBackFailed, got {err:?}"));
    }
    Ok(())
}

#[then("publishing fails with a git error")]
fn publish_git_error(world: &TaskSyncWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !matches!(err, SyncError::Git(_)) {
        return Err(eyre::eyre!("expected a git error, got {err:?}"));
    }
    Ok(())
}

#[then(r#"no pull request exists for "{title}""#)]
fn no_pull_request(world: &TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_for(&title)?;
    let ctx = OperationContext::new();
    let found = run_async(world.service.get_pull_request_for_task(&ctx, &task))
        .wrap_err("look up pull request")?;
    if let Some(pull_request) = found {
        return Err(eyre::eyre!("expected no pull request, found #{}", pull_request.number));
    }
    Ok(())
}

#[then(r#"the issue "{title}" carries the labels "{labels}""#)]
fn issue_labels(world: &TaskSyncWorld, title: String, labels: String) -> Result<(), eyre::Report> {
    let repo = world.repo()?.clone();
    let number = world.issue_number(&title)?;
    let issue = run_async(world.platform.get_issue(&repo, number)).wrap_err("fetch issue")?;
    let expected: Vec<&str> = labels.split(',').map(str::trim).collect();
    let actual: Vec<&str> = issue.labels.iter().map(|label| label.name.as_str()).collect();
    if actual != expected {
        return Err(eyre::eyre!("expected labels {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the reconcile report has no pull request updates")]
fn reconcile_without_updates(world: &TaskSyncWorld) -> Result<(), eyre::Report> {
    let report = world
        .last_reconcile
        .as_ref()
        .ok_or_else(|| eyre::eyre!("reconcile has not run"))?;
    if let Some(updates) = &report.updates {
        return Err(eyre::eyre!("expected no updates, found {updates:?}"));
    }
    Ok(())
}
