//! When steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use eyre::WrapErr;
use greenlight::workflow::{
    domain::InternalReviewAction,
    services::ExternalActionRequest,
};
use rstest_bdd_macros::when;

#[when("a review link is generated for the task")]
fn generate_review_link(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let link = run_async(world.approvals.generate_approval_link(task.id()))
        .wrap_err("generate review link")?;
    world.link = Some(link);
    Ok(())
}

#[when(r#"the client submits "{action}" with feedback "{feedback}""#)]
fn client_submits_with_feedback(
    world: &mut ApprovalWorld,
    action: String,
    feedback: String,
) -> Result<(), eyre::Report> {
    let token = world.token()?;
    let request = ExternalActionRequest::new(token, action).with_feedback(feedback);
    run_async(world.approvals.submit_external_action(request))
        .wrap_err("submit external action")?;
    Ok(())
}

#[when("the client approves through the review link")]
fn client_approves(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let token = world.token()?;
    run_async(
        world
            .approvals
            .submit_external_action(ExternalActionRequest::new(token, "approve")),
    )
    .wrap_err("submit external approval")?;
    Ok(())
}

#[when("an internal reviewer approves the task")]
fn internal_reviewer_approves(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let (updated, outcome) = run_async(
        world
            .approvals
            .apply_internal_review(task.id(), InternalReviewAction::Approve),
    )
    .wrap_err("apply internal approval")?;
    world.task = Some(updated);
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"an internal reviewer rejects the task with reason "{reason}""#)]
fn internal_reviewer_rejects(
    world: &mut ApprovalWorld,
    reason: String,
) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let (updated, outcome) = run_async(world.approvals.apply_internal_review(
        task.id(),
        InternalReviewAction::Reject {
            reason: Some(reason),
            annotation: None,
        },
    ))
    .wrap_err("apply internal rejection")?;
    world.task = Some(updated);
    world.last_outcome = Some(outcome);
    Ok(())
}
