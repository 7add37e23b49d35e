//! Then steps for project completion BDD scenarios.

use super::world::{CompletionWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::tracker::{domain::ValidationError, services::TrackerServiceError};

#[then("completion is rejected with an incomplete task count of {count:u64}")]
fn completion_is_rejected(world: &CompletionWorld, count: u64) -> Result<(), eyre::Report> {
    let result = world
        .last_toggle_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing toggle result"))?;
    let expected = usize::try_from(count)?;

    if !matches!(
        result,
        Err(TrackerServiceError::Validation(ValidationError::IncompleteTasksExist {
            incomplete,
            ..
        })) if *incomplete == expected
    ) {
        return Err(eyre::eyre!(
            "expected IncompleteTasksExist with {expected} task(s), got {result:?}"
        ));
    }
    Ok(())
}

#[then("the project is completed")]
fn project_is_completed(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let stored = stored_project_completion(world)?;
    eyre::ensure!(stored, "expected the project to be completed");
    Ok(())
}

#[then("the project is not completed")]
fn project_is_not_completed(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let stored = stored_project_completion(world)?;
    eyre::ensure!(!stored, "expected the project to remain open");
    Ok(())
}

fn stored_project_completion(world: &CompletionWorld) -> Result<bool, eyre::Report> {
    let id = world.project()?.id();
    let stored = run_async(world.projects.find_project(id))?
        .ok_or_else(|| eyre::eyre!("project {id} missing from store"))?;
    Ok(stored.is_completed())
}
