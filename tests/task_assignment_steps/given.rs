//! Given steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use mockable::{Clock, DefaultClock};
use rstest_bdd_macros::given;
use taskboard::tracker::services::{CreateTeamRequest, ProjectRequest, RegisterWorkerRequest};

fn project_request(name: String) -> ProjectRequest {
    ProjectRequest::new(name, (DefaultClock.utc() + Duration::days(10)).date_naive())
}

#[given(r#"a worker "{username}""#)]
fn a_worker(world: &mut AssignmentWorld, username: String) -> Result<(), eyre::Report> {
    let worker = run_async(
        world
            .staff
            .register_worker(RegisterWorkerRequest::new(username.clone())),
    )
    .wrap_err("register worker for assignment scenario")?;
    world.workers.insert(username, worker.id());
    Ok(())
}

#[given(r#"a team "{name}" with members "{first}" and "{second}""#)]
fn a_team(
    world: &mut AssignmentWorld,
    name: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let members = [world.worker(&first)?, world.worker(&second)?];
    run_async(
        world
            .staff
            .create_team(CreateTeamRequest::new(name).with_members(members)),
    )
    .wrap_err("create team for assignment scenario")?;
    Ok(())
}

#[given(r#"the team "{team}" and leader "{leader}" staff a project "{name}""#)]
fn team_and_leader_project(
    world: &mut AssignmentWorld,
    team: String,
    leader: String,
    name: String,
) -> Result<(), eyre::Report> {
    let teams = run_async(world.staff.list_teams())?;
    let team_id = teams
        .iter()
        .find(|candidate| candidate.name().as_str() == team)
        .ok_or_else(|| eyre::eyre!("unknown team '{team}' in scenario world"))?
        .id();
    let leader_id = world.worker(&leader)?;
    world.create_project(
        project_request(name)
            .with_team(team_id)
            .with_leader(leader_id),
    )
}

#[given(r#"a project "{name}" led by "{leader}""#)]
fn leader_only_project(
    world: &mut AssignmentWorld,
    name: String,
    leader: String,
) -> Result<(), eyre::Report> {
    let leader_id = world.worker(&leader)?;
    world.create_project(project_request(name).with_leader(leader_id))
}

#[given(r#"a project "{name}" with no staff"#)]
fn unstaffed_project(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    world.create_project(project_request(name))
}

#[given(r#"a task "{name}" in the project"#)]
fn task_in_project(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    world.create_task(name, true)
}

#[given(r#"a standalone task "{name}""#)]
fn standalone_task(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    world.create_task(name, false)
}
