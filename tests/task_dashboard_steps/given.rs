//! Given steps for task dashboard BDD scenarios.

use super::world::DashboardWorld;
use taskdeck::gateway::GatewayError;
use taskdeck::task::{
    adapters::memory::TaskOperation,
    domain::{Task, TaskId, TaskPriority, TaskStatus, parse_due_date},
};
use rstest_bdd_macros::given;

fn build_task(id: &str, title: &str) -> Result<Task, eyre::Report> {
    let task_id = TaskId::new(id).map_err(|err| eyre::eyre!("invalid task id: {err}"))?;
    Task::new(task_id, title).map_err(|err| eyre::eyre!("invalid task: {err}"))
}

#[given(r#"a task "{title}" with status "{status}" and priority "{priority}""#)]
fn task_with_status_and_priority(
    world: &mut DashboardWorld,
    title: String,
    status: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let parsed_status =
        TaskStatus::try_from(status.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let parsed_priority =
        TaskPriority::try_from(priority.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let id = format!("seed-{}", world.seeds.len() + 1);
    let task = build_task(&id, &title)?
        .with_status(parsed_status)
        .with_priority(parsed_priority);
    world.seeds.push(task);
    Ok(())
}

#[given(r#"it is due on "{due}""#)]
fn last_task_due_on(world: &mut DashboardWorld, due: String) -> Result<(), eyre::Report> {
    let due_date =
        parse_due_date(&due).ok_or_else(|| eyre::eyre!("unparseable due date {due:?}"))?;
    let last = world
        .seeds
        .pop()
        .ok_or_else(|| eyre::eyre!("no task to attach a due date to"))?;
    world.seeds.push(last.with_due_date(Some(due_date)));
    Ok(())
}

#[given(r#"task "{id}" titled "{title}""#)]
fn task_with_id(world: &mut DashboardWorld, id: String, title: String) -> Result<(), eyre::Report> {
    world.seeds.push(build_task(&id, &title)?);
    Ok(())
}

#[given("an empty task list")]
fn empty_task_list(world: &mut DashboardWorld) -> Result<(), eyre::Report> {
    world.ensure_loaded()
}

#[given("the server fails the next delete with status {status:u16}")]
fn server_fails_next_delete(world: &mut DashboardWorld, status: u16) -> Result<(), eyre::Report> {
    world
        .gateway
        .fail_next(
            TaskOperation::Delete,
            GatewayError::from_response(status, b"{}"),
        )
        .map_err(|err| eyre::eyre!("queue delete failure: {err}"))
}
