//! When steps for task synchronization BDD scenarios.

use super::world::{TaskSyncWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasksync::context::OperationContext;

#[when("discovery runs")]
fn discovery_runs(world: &mut TaskSyncWorld) -> Result<(), eyre::Report> {
    let repo = world.repo()?.clone();
    let discovered = run_async(world.service.discover(&OperationContext::new(), &repo))
        .wrap_err("discover tasks")?;
    world.last_discovery = Some(discovered);
    Ok(())
}

#[when(r#"the task for "{title}" is materialized"#)]
fn materialize(world: &mut TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_for(&title)?;
    run_async(world.service.materialize(&OperationContext::new(), task.id()))
        .wrap_err("materialize task")?;
    Ok(())
}

#[when(r#"the task for "{title}" is published"#)]
fn publish(world: &mut TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_for(&title)?;
    let result = run_async(world.service.publish(&OperationContext::new(), task.id()));
    world.publish_results.push(result);
    Ok(())
}

#[when(r#"the task for "{title}" is reconciled"#)]
fn reconcile(world: &mut TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_for(&title)?;
    let since = task.created_at();
    let report = run_async(
        world
            .service
            .reconcile(&OperationContext::new(), task.id(), since),
    )
    .wrap_err("reconcile task")?;
    world.last_reconcile = Some(report);
    Ok(())
}
