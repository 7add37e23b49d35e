//! In-memory integration tests for workers, positions, and teams.

use super::helpers::{Tracker, tracker, usernames};
use taskboard::tracker::{
    domain::{EntityRef, NamedEntity, TrackerDomainError, WorkerId, WorkerProfile},
    ports::TrackerRepositoryError,
    services::{
        CatalogEntryRequest, CreateTeamRequest, RegisterWorkerRequest, TrackerServiceError,
        UpdateTeamRequest,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_worker_carries_derived_full_name(tracker: Tracker) -> Result<(), eyre::Report> {
    let position = tracker
        .staff
        .create_position(CatalogEntryRequest::new("Developer").with_description("Writes code"))
        .await?;

    let worker = tracker
        .staff
        .register_worker(
            RegisterWorkerRequest::new("jdoe")
                .with_names(" Jane ", "Doe")
                .with_position(position.id())
                .with_biography("Backend"),
        )
        .await?;

    eyre::ensure!(worker.full_name() == "Doe Jane", "unexpected full name");
    eyre::ensure!(worker.display_name() == "Doe Jane", "unexpected display name");
    eyre::ensure!(worker.position() == Some(position.id()), "position not set");
    let found = tracker.staff.find_worker(worker.id()).await?;
    eyre::ensure!(found == Some(worker), "stored worker differs");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_rejected(tracker: Tracker) -> Result<(), eyre::Report> {
    tracker.hire("jdoe").await?;

    let result = tracker.hire("jdoe").await;

    let err = result.err().ok_or_else(|| eyre::eyre!("expected duplicate error"))?;
    let service_err = err
        .downcast_ref::<TrackerServiceError>()
        .ok_or_else(|| eyre::eyre!("unexpected error type: {err}"))?;
    eyre::ensure!(
        matches!(
            service_err,
            TrackerServiceError::Repository(TrackerRepositoryError::DuplicateName {
                entity: NamedEntity::Worker,
                ..
            })
        ),
        "expected duplicate worker name, got {service_err:?}"
    );
    Ok(())
}

#[rstest]
#[case("", TrackerDomainError::EmptyUsername)]
#[case("bad name", TrackerDomainError::InvalidUsername("bad name".to_owned()))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_usernames_are_rejected(
    tracker: Tracker,
    #[case] username: &str,
    #[case] expected: TrackerDomainError,
) {
    let result = tracker
        .staff
        .register_worker(RegisterWorkerRequest::new(username))
        .await;

    assert!(matches!(result, Err(TrackerServiceError::Domain(err)) if err == expected));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_update_recomputes_full_name(tracker: Tracker) -> Result<(), eyre::Report> {
    let worker = tracker.hire("jdoe").await?;

    let updated = tracker
        .staff
        .update_worker_profile(worker.id(), WorkerProfile::default().with_names("", "Doe"))
        .await?;

    eyre::ensure!(updated.full_name() == "Doe", "unexpected full name");
    eyre::ensure!(updated.display_name() == "jdoe", "display should fall back");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_position_clears_it_from_workers(tracker: Tracker) -> Result<(), eyre::Report> {
    let position = tracker
        .staff
        .create_position(CatalogEntryRequest::new("Tester"))
        .await?;
    let worker = tracker
        .staff
        .register_worker(RegisterWorkerRequest::new("tess").with_position(position.id()))
        .await?;

    tracker.staff.delete_position(position.id()).await?;

    let stored = tracker
        .staff
        .find_worker(worker.id())
        .await?
        .ok_or_else(|| eyre::eyre!("worker should survive position deletion"))?;
    eyre::ensure!(stored.position().is_none(), "position should be cleared");
    eyre::ensure!(
        tracker.staff.list_positions().await?.is_empty(),
        "position should be gone"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_membership_changes_are_idempotent(tracker: Tracker) -> Result<(), eyre::Report> {
    let anna = tracker.hire("anna").await?;
    let ben = tracker.hire("ben").await?;
    let team = tracker
        .staff
        .create_team(CreateTeamRequest::new("Core").with_leader(anna.id()).with_members([anna.id()]))
        .await?;

    tracker.staff.add_team_member(team.id(), ben.id()).await?;
    let added_twice = tracker.staff.add_team_member(team.id(), ben.id()).await?;
    eyre::ensure!(added_twice.members().len() == 2, "member added twice");

    tracker.staff.remove_team_member(team.id(), ben.id()).await?;
    let removed_twice = tracker.staff.remove_team_member(team.id(), ben.id()).await?;
    eyre::ensure!(!removed_twice.has_member(ben.id()), "member still present");
    eyre::ensure!(removed_twice.has_member(anna.id()), "leader membership lost");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_update_renames_and_clears_leader(tracker: Tracker) -> Result<(), eyre::Report> {
    let anna = tracker.hire("anna").await?;
    let team = tracker
        .staff
        .create_team(CreateTeamRequest::new("Core").with_leader(anna.id()))
        .await?;

    let updated = tracker
        .staff
        .update_team(team.id(), UpdateTeamRequest::new("Platform"))
        .await?;

    eyre::ensure!(updated.name().as_str() == "Platform", "team not renamed");
    eyre::ensure!(updated.leader().is_none(), "leader should be cleared");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_with_unknown_member_is_rejected(tracker: Tracker) {
    let ghost = WorkerId::new();

    let result = tracker
        .staff
        .create_team(CreateTeamRequest::new("Core").with_members([ghost]))
        .await;

    assert!(matches!(
        result,
        Err(TrackerServiceError::NotFound(EntityRef::Worker(id))) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_worker_detaches_it_everywhere(tracker: Tracker) -> Result<(), eyre::Report> {
    let anna = tracker.hire("anna").await?;
    let ben = tracker.hire("ben").await?;
    let team = tracker
        .staff
        .create_team(
            CreateTeamRequest::new("Core")
                .with_leader(anna.id())
                .with_members([anna.id(), ben.id()]),
        )
        .await?;

    tracker.staff.delete_worker(anna.id()).await?;

    let stored = tracker
        .staff
        .find_team(team.id())
        .await?
        .ok_or_else(|| eyre::eyre!("team should survive"))?;
    eyre::ensure!(stored.leader().is_none(), "leader should be cleared");
    eyre::ensure!(!stored.has_member(anna.id()), "member should be removed");
    eyre::ensure!(
        usernames(&tracker.staff.list_workers().await?) == ["ben"],
        "only ben should remain"
    );
    Ok(())
}
