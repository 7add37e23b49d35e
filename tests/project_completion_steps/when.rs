//! When steps for project completion BDD scenarios.

use super::world::{CompletionWorld, run_async};
use rstest_bdd_macros::when;

#[when("the project completion is toggled")]
fn toggle_project_completion(world: &mut CompletionWorld) -> Result<(), eyre::Report> {
    let id = world.project()?.id();
    let result = run_async(world.completion.toggle_project_completion(id));
    if let Ok(ref updated) = result {
        world.project = Some(updated.clone());
    }
    world.last_toggle_result = Some(result);
    Ok(())
}
