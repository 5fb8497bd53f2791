//! Then steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use greenlight::workflow::{
    domain::{ReviewOutcome, Task, TaskStatus},
    ports::TaskRepository,
};
use rstest_bdd_macros::then;

/// Fetches the current persisted state of the scenario task.
fn stored_task(world: &ApprovalWorld) -> Result<Task, eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    run_async(world.repository.find_by_id(task.id()))
        .map_err(|err| eyre::eyre!("repository lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("task missing from repository"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &ApprovalWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task = stored_task(world)?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("generating the link again returns the same URL")]
fn link_is_stable(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let first = world
        .link
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing review link in scenario world"))?;

    let second = run_async(world.approvals.generate_approval_link(task.id()))
        .map_err(|err| eyre::eyre!("regenerating the link failed: {err}"))?;
    if *first != second {
        return Err(eyre::eyre!("review link changed between issuances"));
    }
    Ok(())
}

#[then(r#"the recorded feedback is "{feedback}""#)]
fn recorded_feedback_is(world: &ApprovalWorld, feedback: String) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if task.last_feedback() != Some(feedback.as_str()) {
        return Err(eyre::eyre!(
            "expected feedback {feedback:?}, found {:?}",
            task.last_feedback()
        ));
    }
    Ok(())
}

#[then("no feedback is recorded")]
fn no_feedback_recorded(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if let Some(feedback) = task.last_feedback() {
        return Err(eyre::eyre!("unexpected feedback recorded: {feedback:?}"));
    }
    Ok(())
}

#[then("the review outcome is unchanged")]
fn review_outcome_unchanged(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing review outcome in scenario world"))?;
    if *outcome != ReviewOutcome::Unchanged {
        return Err(eyre::eyre!("expected an unchanged outcome, got {outcome:?}"));
    }
    Ok(())
}
