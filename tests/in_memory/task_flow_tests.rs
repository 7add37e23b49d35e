//! In-memory integration tests for the task lifecycle from creation to
//! project completion.

use super::helpers::{Tracker, days_from_now, days_from_today, task_names, tracker, usernames};
use serde_json::json;
use taskboard::tracker::{
    domain::{TaskPriority, ValidationError},
    ports::{CompletionFilter, DeadlineOrder, TaskListFilter},
    services::{
        CreateTeamRequest, ProjectRequest, TaskRequest, TrackerOverview, TrackerServiceError,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_staffed_by_team_and_leader_completes_once_tasks_are_done(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let alice = tracker.hire("alice").await?;
    let bob = tracker.hire("bob").await?;
    let carol = tracker.hire("carol").await?;
    tracker.hire("dave").await?;
    let team = tracker
        .staff
        .create_team(CreateTeamRequest::new("Core").with_members([alice.id(), bob.id()]))
        .await?;
    let project = tracker
        .projects
        .create_project(
            ProjectRequest::new("Launch", days_from_today(14))
                .with_team(team.id())
                .with_leader(carol.id()),
        )
        .await?;
    let first = tracker.task("Design", 2, &feature, Some(&project)).await?;
    let second = tracker.task("Build", 5, &feature, Some(&project)).await?;

    let eligible = tracker.assignments.eligible_workers(first.id()).await?;
    eyre::ensure!(
        usernames(&eligible) == ["alice", "bob", "carol"],
        "unexpected eligible set: {:?}",
        usernames(&eligible)
    );
    tracker
        .assignments
        .assign_workers(first.id(), [alice.id(), carol.id()])
        .await?;

    let blocked = tracker.completion.toggle_project_completion(project.id()).await;
    eyre::ensure!(
        matches!(
            blocked,
            Err(TrackerServiceError::Validation(
                ValidationError::IncompleteTasksExist { incomplete: 2, .. }
            ))
        ),
        "expected completion to be blocked, got {blocked:?}"
    );

    tracker.completion.toggle_task_completion(first.id()).await?;
    tracker.completion.toggle_task_completion(second.id()).await?;
    let completed = tracker
        .completion
        .toggle_project_completion(project.id())
        .await?;
    eyre::ensure!(completed.is_completed(), "project should be complete");

    let reopened = tracker
        .completion
        .toggle_project_completion(project.id())
        .await?;
    eyre::ensure!(!reopened.is_completed(), "project should be reopened");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_after_project_deadline_is_rejected(tracker: Tracker) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let project = tracker.project("Launch", 3).await?;

    let result = tracker.task("Late", 10, &feature, Some(&project)).await;

    let err = result.err().ok_or_else(|| eyre::eyre!("expected rejection"))?;
    eyre::ensure!(
        matches!(
            err.downcast_ref::<TrackerServiceError>(),
            Some(TrackerServiceError::Validation(
                ValidationError::DeadlineExceedsProject { .. }
            ))
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn past_deadlines_are_rejected_for_tasks_and_projects(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;

    let task = tracker
        .tasks
        .create_task(TaskRequest::new("Old", days_from_now(-1), feature.id()))
        .await;
    let project = tracker
        .projects
        .create_project(ProjectRequest::new("Old", days_from_today(-1)))
        .await;

    eyre::ensure!(
        matches!(
            task,
            Err(TrackerServiceError::Validation(ValidationError::PastDeadline { .. }))
        ),
        "task should be rejected, got {task:?}"
    );
    eyre::ensure!(
        matches!(
            project,
            Err(TrackerServiceError::Validation(ValidationError::PastDeadline { .. }))
        ),
        "project should be rejected, got {project:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_task_name_is_rejected_only_within_a_project(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let launch = tracker.project("Launch", 10).await?;
    let beta = tracker.project("Beta", 10).await?;
    tracker.task("Build", 1, &feature, Some(&launch)).await?;
    tracker.task("Build", 1, &feature, Some(&beta)).await?;
    tracker.task("Build", 1, &feature, None).await?;

    let result = tracker.task("Build", 2, &feature, Some(&launch)).await;

    let err = result.err().ok_or_else(|| eyre::eyre!("expected rejection"))?;
    eyre::ensure!(
        matches!(
            err.downcast_ref::<TrackerServiceError>(),
            Some(TrackerServiceError::Validation(
                ValidationError::DuplicateNameInProject { project: Some(scope), .. }
            )) if *scope == launch.id()
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_listing_filters_by_status_and_assignee(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let anna = tracker.hire("anna").await?;
    let later = tracker.task("Later", 7, &feature, None).await?;
    let sooner = tracker.task("Sooner", 2, &feature, None).await?;
    tracker.task("Middle", 4, &feature, None).await?;
    tracker.completion.toggle_task_completion(later.id()).await?;
    tracker.assignments.take_task(sooner.id(), anna.id()).await?;

    let ascending = tracker.tasks.list_tasks(TaskListFilter::new()).await?;
    let descending = tracker
        .tasks
        .list_tasks(TaskListFilter::new().ordered(DeadlineOrder::Descending))
        .await?;
    let open = tracker
        .tasks
        .list_tasks(TaskListFilter::new().with_status(CompletionFilter::Uncompleted))
        .await?;
    let mine = tracker
        .tasks
        .list_tasks(TaskListFilter::new().assigned_to(anna.id()))
        .await?;

    eyre::ensure!(task_names(&ascending) == ["Sooner", "Middle", "Later"], "ascending order");
    eyre::ensure!(task_names(&descending) == ["Later", "Middle", "Sooner"], "descending order");
    eyre::ensure!(task_names(&open) == ["Sooner", "Middle"], "uncompleted filter");
    eyre::ensure!(task_names(&mine) == ["Sooner"], "assignee filter");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_update_keeps_assignees_unless_replaced(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    let anna = tracker.hire("anna").await?;
    let task = tracker
        .tasks
        .create_task(
            TaskRequest::new("Build", days_from_now(2), feature.id()).with_assignees([anna.id()]),
        )
        .await?;

    let updated = tracker
        .tasks
        .update_task(
            task.id(),
            TaskRequest::new("Build v2", days_from_now(3), feature.id())
                .with_priority(TaskPriority::Urgent),
        )
        .await?;

    eyre::ensure!(updated.name().as_str() == "Build v2", "task not renamed");
    eyre::ensure!(updated.priority() == TaskPriority::Urgent, "priority not set");
    eyre::ensure!(updated.is_assigned(anna.id()), "assignees should be kept");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overview_counts_serialize_for_the_dashboard(
    tracker: Tracker,
) -> Result<(), eyre::Report> {
    let feature = tracker.task_type("Feature").await?;
    tracker.hire("anna").await?;
    let project = tracker.project("Launch", 5).await?;
    tracker.task("Build", 1, &feature, Some(&project)).await?;
    tracker.task("Test", 2, &feature, None).await?;

    let overview = tracker.overview.overview().await?;

    eyre::ensure!(
        overview
            == TrackerOverview {
                tasks: 2,
                projects: 1,
                workers: 1,
            },
        "unexpected counts: {overview:?}"
    );
    eyre::ensure!(
        serde_json::to_value(overview)? == json!({ "tasks": 2, "projects": 1, "workers": 1 }),
        "unexpected JSON shape"
    );
    Ok(())
}
