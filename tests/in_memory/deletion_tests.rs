//! In-memory integration tests for delete cascades.

use super::helpers::{Tracker, days_from_today, task_names, tracker};
use taskboard::tracker::{
    domain::EntityRef,
    ports::TaskListFilter,
    services::{CreateTeamRequest, ProjectRequest, TrackerServiceError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_removes_its_tasks(tracker: Tracker) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let project = tracker.project("Launch", 10).await?;
    tracker.task("Inside", 1, &feature, Some(&project)).await?;
    tracker.task("Outside", 1, &feature, None).await?;

    tracker.projects.delete_project(project.id()).await?;

    let remaining = tracker.tasks.list_tasks(TaskListFilter::new()).await?;
    eyre::ensure!(task_names(&remaining) == ["Outside"], "project tasks survived");
    eyre::ensure!(
        tracker.projects.find_project(project.id()).await?.is_none(),
        "project survived"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_type_removes_tasks_of_that_type(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let bug = tracker.task_type("Bug").await?;
    tracker.task("Build", 1, &feature, None).await?;
    tracker.task("Fix", 1, &bug, None).await?;

    tracker.catalog.delete_task_type(bug.id()).await?;

    let remaining = tracker.tasks.list_tasks(TaskListFilter::new()).await?;
    eyre::ensure!(task_names(&remaining) == ["Build"], "bug tasks survived");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_worker_clears_project_leadership_and_assignments(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let carol = tracker.hire("carol").await?;
    let project = tracker
        .projects
        .create_project(
            ProjectRequest::new("Launch", days_from_today(10))
                .with_leader(carol.id()),
        )
        .await?;
    let task = tracker.task("Build", 1, &feature, Some(&project)).await?;
    tracker
        .assignments
        .assign_workers(task.id(), [carol.id()])
        .await?;

    tracker.staff.delete_worker(carol.id()).await?;

    let stored_project = tracker
        .projects
        .find_project(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project should survive"))?;
    let stored_task = tracker
        .tasks
        .find_task(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should survive"))?;
    eyre::ensure!(stored_project.leader().is_none(), "leader not cleared");
    eyre::ensure!(stored_task.assignees().is_empty(), "assignment not cleared");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_team_leaves_the_project_unstaffed(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let anna = tracker.hire("anna").await?;
    let team = tracker
        .staff
        .create_team(CreateTeamRequest::new("Core").with_members([anna.id()]))
        .await?;
    let project = tracker
        .projects
        .create_project(
            ProjectRequest::new("Launch", days_from_today(10)).with_team(team.id()),
        )
        .await?;
    let task = tracker.task("Build", 1, &feature, Some(&project)).await?;

    tracker.staff.delete_team(team.id()).await?;

    let eligible = tracker.assignments.eligible_workers(task.id()).await?;
    eyre::ensure!(eligible.is_empty(), "unstaffed project should offer nobody");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unknown_project_is_not_found(tracker: Tracker) -> Result<(), eyre::Report> {
    let project = tracker.project("Launch", 10).await?;
    tracker.projects.delete_project(project.id()).await?;

    let result = tracker.projects.delete_project(project.id()).await;

    eyre::ensure!(
        matches!(
            result,
            Err(TrackerServiceError::NotFound(EntityRef::Project(id))) if id == project.id()
        ),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}
