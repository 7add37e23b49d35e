//! When steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use rstest_bdd_macros::when;

#[when("the eligible workers are requested")]
fn request_eligible_workers(world: &mut AssignmentWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let eligible = run_async(world.assignments.eligible_workers(id))?;
    world.last_eligible = Some(eligible);
    Ok(())
}

#[when(r#""{username}" is assigned to the task"#)]
fn assign_worker(world: &mut AssignmentWorld, username: String) -> Result<(), eyre::Report> {
    let task = world.task()?.id();
    let worker = world.worker(&username)?;
    let result = run_async(world.assignments.assign_workers(task, [worker]));
    world.last_assignment_result = Some(result);
    Ok(())
}

#[when(r#""{username}" takes the task"#)]
fn take_task(world: &mut AssignmentWorld, username: String) -> Result<(), eyre::Report> {
    let task = world.task()?.id();
    let worker = world.worker(&username)?;
    let result = run_async(world.assignments.take_task(task, worker));
    world.last_assignment_result = Some(result);
    Ok(())
}
