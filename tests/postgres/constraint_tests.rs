//! `PostgreSQL` tests for uniqueness, references, and the completion guard.

use super::helpers::{
    BoxError, PreparedRepo, name, prepared_repo, project, task, task_type, worker,
};
use rstest::rstest;
use std::sync::Arc;
use taskboard::tracker::{
    domain::{EntityRef, NamedEntity, Position, ProjectCompletion, Team},
    ports::{
        PositionRepository, ProjectRepository, TaskRepository, TaskTypeRepository,
        TeamRepository, TrackerRepositoryError, WorkerRepository,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn duplicate_usernames_are_reported_as_duplicate_names(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    ctx.repo.store_worker(&worker("jdoe")?).await?;

    let result = ctx.repo.store_worker(&worker("jdoe")?).await;

    assert!(matches!(
        result,
        Err(TrackerRepositoryError::DuplicateName {
            entity: NamedEntity::Worker,
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn position_round_trips_and_rejects_duplicates(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    let position = Position::new(name("Developer")?, "Writes code");
    ctx.repo.store_position(&position).await?;

    let found = ctx.repo.find_position(position.id()).await?;
    let duplicate = ctx
        .repo
        .store_position(&Position::new(name("Developer")?, ""))
        .await;

    assert_eq!(found, Some(position));
    assert!(matches!(
        duplicate,
        Err(TrackerRepositoryError::DuplicateName {
            entity: NamedEntity::Position,
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn team_round_trips_with_members_and_leader(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    let anna = worker("anna")?;
    let ben = worker("ben")?;
    ctx.repo.store_worker(&anna).await?;
    ctx.repo.store_worker(&ben).await?;
    let mut team = Team::new(name("Core")?)
        .with_leader(anna.id())
        .with_members([anna.id(), ben.id()]);
    ctx.repo.store_team(&team).await?;

    team.remove_member(ben.id());
    ctx.repo.update_team(&team).await?;
    let found = ctx.repo.find_team(team.id()).await?;

    assert_eq!(found, Some(team));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn task_names_collide_only_inside_a_project(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    let feature = task_type("Feature")?;
    let launch = project("Launch", 10)?;
    ctx.repo.store_task_type(&feature).await?;
    ctx.repo.store_project(&launch).await?;
    ctx.repo.store_task(&task("Build", 1, feature.id())?).await?;
    ctx.repo.store_task(&task("Build", 1, feature.id())?).await?;
    ctx.repo
        .store_task(&task("Build", 1, feature.id())?.with_project(launch.id()))
        .await?;

    let result = ctx
        .repo
        .store_task(&task("Build", 2, feature.id())?.with_project(launch.id()))
        .await;

    assert!(matches!(
        result,
        Err(TrackerRepositoryError::DuplicateTaskName { project, .. }) if project == launch.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn task_with_unknown_assignee_is_not_found(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    let feature = task_type("Feature")?;
    ctx.repo.store_task_type(&feature).await?;
    let ghost = worker("ghost")?;

    let result = ctx
        .repo
        .store_task(&task("Build", 1, feature.id())?.with_assignees([ghost.id()]))
        .await;

    assert!(matches!(
        result,
        Err(TrackerRepositoryError::NotFound(EntityRef::Worker(id))) if id == ghost.id()
    ));
    assert_eq!(ctx.repo.count_tasks().await?, 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn completing_a_project_with_open_tasks_is_blocked(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    let feature = task_type("Feature")?;
    let launch = project("Launch", 10)?;
    ctx.repo.store_task_type(&feature).await?;
    ctx.repo.store_project(&launch).await?;
    let open = task("Build", 1, feature.id())?.with_project(launch.id());
    ctx.repo.store_task(&open).await?;

    let blocked = ctx.repo.toggle_project_completion(launch.id()).await;
    let unchanged = ctx.repo.find_project(launch.id()).await?;
    ctx.repo.toggle_task_completion(open.id()).await?;
    let allowed = ctx.repo.toggle_project_completion(launch.id()).await?;

    assert!(matches!(
        blocked,
        Err(TrackerRepositoryError::CompletionBlocked { incomplete: 1, .. })
    ));
    assert!(unchanged.is_some_and(|found| !found.is_completed()));
    assert_eq!(allowed.completion(), ProjectCompletion::Complete);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn stale_edits_keep_the_stored_completion_flags(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    let feature = task_type("Feature")?;
    let mut launch = project("Launch", 10)?;
    let mut ship = task("Ship", 1, feature.id())?;
    ctx.repo.store_task_type(&feature).await?;
    ctx.repo.store_project(&launch).await?;
    ctx.repo.store_task(&ship).await?;

    ctx.repo.toggle_task_completion(ship.id()).await?;
    ctx.repo.toggle_project_completion(launch.id()).await?;
    ship.rename(name("Ship it")?);
    launch.set_description("Go live");
    let edited_task = ctx.repo.update_task(&ship).await?;
    let edited_project = ctx.repo.update_project(&launch).await?;

    assert!(edited_task.is_completed());
    assert_eq!(edited_task.name().as_str(), "Ship it");
    assert!(edited_project.is_completed());
    assert_eq!(edited_project.description(), "Go live");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn parallel_task_toggles_are_serialised(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    let feature = task_type("Feature")?;
    let ship = task("Ship", 1, feature.id())?;
    ctx.repo.store_task_type(&feature).await?;
    ctx.repo.store_task(&ship).await?;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = Arc::clone(&ctx.repo);
            let id = ship.id();
            tokio::spawn(async move { repo.toggle_task_completion(id).await })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let stored = ctx.repo.find_task(ship.id()).await?;
    assert!(stored.is_some_and(|found| !found.is_completed()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server at DATABASE_URL"]
async fn updating_a_missing_project_is_not_found(
    prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo?;
    let ghost = project("Ghost", 3)?;

    let result = ctx.repo.update_project(&ghost).await;

    assert!(matches!(
        result,
        Err(TrackerRepositoryError::NotFound(EntityRef::Project(id))) if id == ghost.id()
    ));
    Ok(())
}
