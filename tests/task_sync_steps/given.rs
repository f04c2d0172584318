//! Given steps for task synchronization BDD scenarios.

use super::world::{TaskSyncWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasksync::{
    context::OperationContext,
    hosting::{
        domain::{CreateIssue, RepositoryFullName, UpdateIssue},
        ports::HostingProvider,
    },
    task::domain::TaskStatus,
};

#[given(r#"the platform user is "{login}""#)]
fn platform_user(world: &mut TaskSyncWorld, login: String) -> Result<(), eyre::Report> {
    world
        .platform
        .set_current_user(&login)
        .wrap_err("set current user")?;
    Ok(())
}

#[given(r#"a repository "{name}" with default branch "{branch}""#)]
fn repository(world: &mut TaskSyncWorld, name: String, branch: String) -> Result<(), eyre::Report> {
    let repo = RepositoryFullName::new(&name).wrap_err("parse repository name")?;
    world
        .platform
        .add_repository(&repo, &branch)
        .wrap_err("register repository")?;
    world.repo = Some(repo);
    Ok(())
}

#[given(r#"an open issue "{title}" assigned to "{login}""#)]
fn assigned_issue(world: &mut TaskSyncWorld, title: String, login: String) -> Result<(), eyre::Report> {
    let repo = world.repo()?.clone();
    let request = CreateIssue {
        title: title.clone(),
        body: Some(format!("Please handle: {title}")),
        labels: Vec::new(),
        assignees: vec![login],
    };
    let issue = run_async(world.platform.create_issue(&repo, &request)).wrap_err("create issue")?;
    world.issues.insert(title, issue.number);
    Ok(())
}

#[given(r#"the issue "{title}" is labelled "{label}""#)]
fn labelled_issue(world: &mut TaskSyncWorld, title: String, label: String) -> Result<(), eyre::Report> {
    let repo = world.repo()?.clone();
    let number = world.issue_number(&title)?;
    let update = UpdateIssue {
        labels: Some(vec![label]),
        ..UpdateIssue::default()
    };
    run_async(world.platform.update_issue(&repo, number, &update)).wrap_err("label issue")?;
    Ok(())
}

#[given("discovery has run")]
fn discovery_has_run(world: &mut TaskSyncWorld) -> Result<(), eyre::Report> {
    let repo = world.repo()?.clone();
    let discovered = run_async(world.service.discover(&OperationContext::new(), &repo))
        .wrap_err("discover tasks")?;
    world.last_discovery = Some(discovered);
    Ok(())
}

#[given(r#"the task for "{title}" has been materialized"#)]
fn task_materialized(world: &mut TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_for(&title)?;
    run_async(world.service.materialize(&OperationContext::new(), task.id()))
        .wrap_err("materialize task")?;
    Ok(())
}

#[given(r#"the task for "{title}" is marked "{status}""#)]
fn task_marked(world: &mut TaskSyncWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task = world.task_for(&title)?;
    run_async(world.service.update_status(task.id(), target)).wrap_err("update task status")?;
    Ok(())
}

#[given(r#"the task for "{title}" has been published"#)]
fn task_published(world: &mut TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_for(&title)?;
    let outcome = run_async(world.service.publish(&OperationContext::new(), task.id()))
        .wrap_err("publish task")?;
    world.publish_results.push(Ok(outcome));
    Ok(())
}

#[given("issue comments fail")]
fn comments_fail(world: &mut TaskSyncWorld) -> Result<(), eyre::Report> {
    world
        .platform
        .fail_comments(true)
        .wrap_err("toggle comment failures")?;
    Ok(())
}

#[given(r#"git rejects every "{subcommand}""#)]
fn git_rejects(world: &mut TaskSyncWorld, subcommand: String) -> Result<(), eyre::Report> {
    world.git.fail_on(&subcommand);
    Ok(())
}
