//! Then steps for task dashboard BDD scenarios.

use super::world::DashboardWorld;
use taskdeck::notification::Severity;
use taskdeck::task::{
    adapters::memory::TaskOperation,
    domain::{Task, TaskId, TaskStatus},
    services::TaskMutationError,
};
use rstest_bdd_macros::then;

#[then(r#"the visible titles are "{expected}""#)]
fn visible_titles(world: &DashboardWorld, expected: String) -> Result<(), eyre::Report> {
    let visible = world.coordinator.store().visible();
    let actual: Vec<&str> = visible.iter().map(Task::title).collect();
    let wanted: Vec<&str> = expected.split(',').map(str::trim).collect();
    if actual != wanted {
        return Err(eyre::eyre!("expected titles {wanted:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the mutation fails with a validation error")]
fn mutation_fails_validation(world: &DashboardWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(TaskMutationError::Validation(_))) => Ok(()),
        Some(other) => Err(eyre::eyre!("expected a validation error, found {other:?}")),
        None => Err(eyre::eyre!("no mutation was attempted")),
    }
}

#[then("the server received {count:usize} create requests")]
fn server_create_requests(world: &DashboardWorld, count: usize) -> Result<(), eyre::Report> {
    let received = world.gateway.call_count(TaskOperation::Create);
    if received != count {
        return Err(eyre::eyre!(
            "expected {count} create requests, server saw {received}"
        ));
    }
    Ok(())
}

#[then(r#"task "{id}" is still listed"#)]
fn task_still_listed(world: &DashboardWorld, id: String) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).map_err(|err| eyre::eyre!("invalid task id: {err}"))?;
    if world.coordinator.store().get(&task_id).is_none() {
        return Err(eyre::eyre!("task {task_id} was dropped from the list"));
    }
    if !matches!(world.last_result, Some(Err(TaskMutationError::Gateway(_)))) {
        return Err(eyre::eyre!(
            "expected the delete to fail, found {:?}",
            world.last_result
        ));
    }
    Ok(())
}

#[then(r#"an error notification reads "{message}""#)]
fn error_notification_reads(world: &DashboardWorld, message: String) -> Result<(), eyre::Report> {
    let latest = world
        .coordinator
        .notifications()
        .latest()
        .ok_or_else(|| eyre::eyre!("no notification recorded"))?;
    if latest.severity() != Severity::Error || latest.message() != message {
        return Err(eyre::eyre!(
            "expected error notification {message:?}, found {:?} {:?}",
            latest.severity(),
            latest.message()
        ));
    }
    Ok(())
}

#[then(r#"the task "{title}" has status "{status}""#)]
fn task_has_status(
    world: &DashboardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let listed = world.listed_by_title(&title)?;
    if listed.status() != expected {
        return Err(eyre::eyre!(
            "expected {title:?} to be {expected}, found {}",
            listed.status()
        ));
    }
    Ok(())
}

#[then("a success notification is recorded")]
fn success_notification_recorded(world: &DashboardWorld) -> Result<(), eyre::Report> {
    let severity = world
        .coordinator
        .notifications()
        .latest()
        .map(|notice| notice.severity());
    if severity != Some(Severity::Success) {
        return Err(eyre::eyre!("expected a success notification, found {severity:?}"));
    }
    Ok(())
}
