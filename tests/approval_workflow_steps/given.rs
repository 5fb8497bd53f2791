//! Given steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use eyre::WrapErr;
use greenlight::workflow::{
    domain::{KanbanType, TaskStatus},
    services::{CreateTaskRequest, MoveTaskRequest},
};
use rstest_bdd_macros::given;

#[given(r#"an operational task in "{status}""#)]
fn operational_task_in_status(
    world: &mut ApprovalWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;

    let created = run_async(world.board.create_task(CreateTaskRequest::new(
        "Spring teaser",
        KanbanType::Operational,
    )))
    .wrap_err("create task for scenario")?;

    let task = if created.status() == target {
        created
    } else {
        run_async(
            world
                .board
                .move_task(MoveTaskRequest::new(created.id(), target, [created.id()])),
        )
        .wrap_err("move task into scenario status")?
    };

    world.task = Some(task);
    Ok(())
}

#[given("a review link has been generated")]
fn review_link_generated(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let link = run_async(world.approvals.generate_approval_link(task.id()))
        .wrap_err("generate review link in scenario setup")?;
    world.link = Some(link);
    Ok(())
}
