//! Then steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::tracker::services::TrackerServiceError;

#[then(r#"the eligible workers are "{expected}""#)]
fn eligible_workers_are(world: &AssignmentWorld, expected: String) -> Result<(), eyre::Report> {
    let eligible = world
        .last_eligible
        .as_ref()
        .ok_or_else(|| eyre::eyre!("eligible workers were never requested"))?;
    let actual: Vec<&str> = eligible
        .iter()
        .map(|worker| worker.username().as_str())
        .collect();
    let wanted: Vec<&str> = expected.split(", ").collect();

    eyre::ensure!(actual == wanted, "expected {wanted:?}, found {actual:?}");
    Ok(())
}

#[then("no worker is eligible")]
fn no_worker_is_eligible(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let eligible = world
        .last_eligible
        .as_ref()
        .ok_or_else(|| eyre::eyre!("eligible workers were never requested"))?;
    eyre::ensure!(eligible.is_empty(), "expected nobody, found {}", eligible.len());
    Ok(())
}

#[then(r#"the assignment is rejected as ineligible for "{username}""#)]
fn assignment_rejected(world: &AssignmentWorld, username: String) -> Result<(), eyre::Report> {
    let rejected = world.worker(&username)?;
    let result = world
        .last_assignment_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assignment result"))?;

    if !matches!(
        result,
        Err(TrackerServiceError::IneligibleAssignee { worker, .. }) if *worker == rejected
    ) {
        return Err(eyre::eyre!(
            "expected IneligibleAssignee for {username}, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the task has no assignees")]
fn task_has_no_assignees(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let stored = run_async(world.tasks.find_task(id))?
        .ok_or_else(|| eyre::eyre!("task {id} missing from store"))?;
    eyre::ensure!(stored.assignees().is_empty(), "task should have no assignees");
    Ok(())
}

#[then(r#"the task is assigned only to "{username}""#)]
fn task_assigned_only_to(world: &AssignmentWorld, username: String) -> Result<(), eyre::Report> {
    let worker = world.worker(&username)?;
    let id = world.task()?.id();
    let stored = run_async(world.tasks.find_task(id))?
        .ok_or_else(|| eyre::eyre!("task {id} missing from store"))?;
    eyre::ensure!(
        stored.assignees().len() == 1 && stored.is_assigned(worker),
        "expected only {username} to be assigned"
    );
    Ok(())
}
