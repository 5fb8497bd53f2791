//! Unit tests for the task aggregate and the approval state machine.

use crate::workflow::domain::{
    ExternalAction, InternalReviewAction, KanbanType, NewTaskData, ReviewOutcome, Task,
    TaskStatus, WorkflowDomainError,
};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::collections::BTreeSet;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn operational_task(clock: DefaultClock) -> Result<Task, WorkflowDomainError> {
    Task::new(
        NewTaskData {
            title: "Launch teaser post".to_owned(),
            description: Some("Teaser for the spring drop".to_owned()),
            kanban_type: KanbanType::Operational,
            assigned_to: BTreeSet::new(),
            sort_order: 0,
        },
        &clock,
    )
}

/// Drives a task to an arbitrary status through the unguarded move.
fn task_at(status: TaskStatus, clock: &DefaultClock) -> eyre::Result<Task> {
    let mut task = Task::new(
        NewTaskData {
            title: "Fixture task".to_owned(),
            description: None,
            kanban_type: KanbanType::Operational,
            assigned_to: BTreeSet::new(),
            sort_order: 0,
        },
        clock,
    )?;
    task.move_to(status, clock);
    Ok(task)
}

#[rstest]
fn new_operational_task_starts_at_briefing(
    operational_task: Result<Task, WorkflowDomainError>,
) -> eyre::Result<()> {
    let task = operational_task?;
    ensure!(task.status() == TaskStatus::Briefing);
    ensure!(task.approval_token().is_none());
    ensure!(task.last_feedback().is_none());
    Ok(())
}

#[rstest]
fn new_general_task_starts_at_todo(clock: DefaultClock) -> eyre::Result<()> {
    let task = Task::new(
        NewTaskData {
            title: "Invoice the client".to_owned(),
            description: None,
            kanban_type: KanbanType::General,
            assigned_to: BTreeSet::new(),
            sort_order: 3,
        },
        &clock,
    )?;
    ensure!(task.status() == TaskStatus::Todo);
    ensure!(task.sort_order() == 3);
    Ok(())
}

#[rstest]
fn blank_title_is_rejected(clock: DefaultClock) {
    let result = Task::new(
        NewTaskData {
            title: "   ".to_owned(),
            description: None,
            kanban_type: KanbanType::General,
            assigned_to: BTreeSet::new(),
            sort_order: 0,
        },
        &clock,
    );
    assert_eq!(result, Err(WorkflowDomainError::EmptyTitle));
}

#[rstest]
fn issuing_the_token_twice_returns_the_same_value(
    clock: DefaultClock,
    operational_task: Result<Task, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut task = operational_task?;
    let first = task.issue_approval_token(&clock);
    let second = task.issue_approval_token(&clock);
    ensure!(first == second);
    ensure!(task.approval_token() == Some(&first));
    Ok(())
}

#[rstest]
fn issuing_the_token_at_internal_review_advances_to_client_review(
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_at(TaskStatus::ReviewInternal, &clock)?;
    task.issue_approval_token(&clock);
    ensure!(task.status() == TaskStatus::ReviewClient);
    Ok(())
}

#[rstest]
#[case(TaskStatus::Briefing)]
#[case(TaskStatus::Copy)]
#[case(TaskStatus::Design)]
#[case(TaskStatus::ReviewClient)]
#[case(TaskStatus::Scheduled)]
fn issuing_the_token_elsewhere_leaves_status_alone(
    #[case] status: TaskStatus,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_at(status, &clock)?;
    task.issue_approval_token(&clock);
    ensure!(task.status() == status);
    Ok(())
}

#[rstest]
fn external_approve_schedules_and_clears_feedback(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = task_at(TaskStatus::ReviewClient, &clock)?;
    task.issue_approval_token(&clock);
    task.apply_external_action(
        ExternalAction::Reject,
        Some("too dark".to_owned()),
        &clock,
    )?;
    ensure!(task.status() == TaskStatus::ReviewInternal);
    ensure!(task.last_feedback() == Some("too dark"));

    task.apply_external_action(ExternalAction::Approve, None, &clock)?;
    ensure!(task.status() == TaskStatus::Scheduled);
    ensure!(task.last_feedback().is_none());
    Ok(())
}

#[rstest]
fn external_approve_is_reentrant(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = task_at(TaskStatus::ReviewClient, &clock)?;
    task.issue_approval_token(&clock);
    task.apply_external_action(ExternalAction::Approve, None, &clock)?;
    task.apply_external_action(ExternalAction::Approve, None, &clock)?;
    ensure!(task.status() == TaskStatus::Scheduled);
    Ok(())
}

#[rstest]
fn external_reject_without_feedback_defaults_to_empty(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = task_at(TaskStatus::ReviewClient, &clock)?;
    task.issue_approval_token(&clock);
    task.apply_external_action(ExternalAction::Reject, None, &clock)?;
    ensure!(task.status() == TaskStatus::ReviewInternal);
    ensure!(task.last_feedback() == Some(""));
    Ok(())
}

#[rstest]
fn external_action_without_a_token_is_rejected(
    clock: DefaultClock,
    operational_task: Result<Task, WorkflowDomainError>,
) -> eyre::Result<()> {
    let mut task = operational_task?;
    let task_id = task.id();
    let result = task.apply_external_action(ExternalAction::Approve, None, &clock);
    let expected = Err(WorkflowDomainError::MissingApprovalToken(task_id));
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == TaskStatus::Briefing);
    Ok(())
}

#[rstest]
#[case(TaskStatus::ReviewInternal, Some(TaskStatus::ReviewClient))]
#[case(TaskStatus::ReviewClient, Some(TaskStatus::Scheduled))]
#[case(TaskStatus::Briefing, None)]
#[case(TaskStatus::Copy, None)]
#[case(TaskStatus::Design, None)]
#[case(TaskStatus::Scheduled, None)]
#[case(TaskStatus::Todo, None)]
fn internal_approve_is_gated_on_the_review_stages(
    #[case] from: TaskStatus,
    #[case] advanced_to: Option<TaskStatus>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_at(from, &clock)?;
    let outcome = task.apply_internal_review(InternalReviewAction::Approve, &clock);

    match advanced_to {
        Some(to) => {
            ensure!(outcome == ReviewOutcome::Advanced { from, to });
            ensure!(task.status() == to);
        }
        None => {
            ensure!(outcome == ReviewOutcome::Unchanged);
            ensure!(task.status() == from);
        }
    }
    Ok(())
}

#[rstest]
#[case(TaskStatus::Briefing)]
#[case(TaskStatus::ReviewInternal)]
#[case(TaskStatus::ReviewClient)]
#[case(TaskStatus::Scheduled)]
fn internal_reject_always_resets_to_design(
    #[case] from: TaskStatus,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_at(from, &clock)?;
    let outcome = task.apply_internal_review(
        InternalReviewAction::Reject {
            reason: Some("fix logo".to_owned()),
            annotation: None,
        },
        &clock,
    );
    ensure!(
        outcome
            == ReviewOutcome::Reverted {
                to: TaskStatus::Design
            }
    );
    ensure!(task.status() == TaskStatus::Design);
    ensure!(task.last_feedback() == Some("fix logo"));
    Ok(())
}

#[rstest]
fn internal_reject_keeps_annotation_separate_from_feedback(
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = task_at(TaskStatus::ReviewInternal, &clock)?;
    let _outcome = task.apply_internal_review(
        InternalReviewAction::Reject {
            reason: Some("logo placement".to_owned()),
            annotation: Some("data:image/png;base64,iVBORw0".to_owned()),
        },
        &clock,
    );
    ensure!(task.last_feedback() == Some("logo placement"));
    ensure!(task.annotation() == Some("data:image/png;base64,iVBORw0"));

    // A later rejection without a marker leaves the stored annotation.
    let _second_outcome = task.apply_internal_review(
        InternalReviewAction::Reject {
            reason: Some("still off".to_owned()),
            annotation: None,
        },
        &clock,
    );
    ensure!(task.annotation() == Some("data:image/png;base64,iVBORw0"));
    Ok(())
}

#[rstest]
fn unguarded_move_accepts_any_status(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = task_at(TaskStatus::Briefing, &clock)?;
    // Cross-board target: permitted by the escape hatch.
    task.move_to(TaskStatus::Done, &clock);
    ensure!(task.status() == TaskStatus::Done);
    task.move_to(TaskStatus::Scheduled, &clock);
    ensure!(task.status() == TaskStatus::Scheduled);
    Ok(())
}

#[rstest]
fn full_approval_loop_reaches_scheduled(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = task_at(TaskStatus::Briefing, &clock)?;

    // Internal rejection from briefing resets to design.
    let outcome = task.apply_internal_review(
        InternalReviewAction::Reject {
            reason: Some("wrong format".to_owned()),
            annotation: None,
        },
        &clock,
    );
    ensure!(
        outcome
            == ReviewOutcome::Reverted {
                to: TaskStatus::Design
            }
    );
    ensure!(task.status() == TaskStatus::Design);
    ensure!(task.last_feedback() == Some("wrong format"));

    // Dragged onward to internal review.
    task.move_to(TaskStatus::ReviewInternal, &clock);

    // Issuing the link advances to client review.
    let token = task.issue_approval_token(&clock);
    ensure!(task.status() == TaskStatus::ReviewClient);

    // Client rejects; the task returns to internal review.
    task.apply_external_action(
        ExternalAction::Reject,
        Some("logo blurry".to_owned()),
        &clock,
    )?;
    ensure!(task.status() == TaskStatus::ReviewInternal);
    ensure!(task.last_feedback() == Some("logo blurry"));

    // Two internal approvals walk the gates to scheduled.
    let _first = task.apply_internal_review(InternalReviewAction::Approve, &clock);
    ensure!(task.status() == TaskStatus::ReviewClient);
    let _second = task.apply_internal_review(InternalReviewAction::Approve, &clock);
    ensure!(task.status() == TaskStatus::Scheduled);

    // The token never changed along the way.
    ensure!(task.approval_token() == Some(&token));
    Ok(())
}
