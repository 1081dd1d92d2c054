//! When steps for task dashboard BDD scenarios.

use super::world::{DashboardWorld, run_async};
use taskdeck::task::domain::{SortKey, TaskDraft, TaskFilter, TaskId, TaskStatus};
use rstest_bdd_macros::when;

#[when(r#"the list is filtered by status "{status}" and sorted by "{sort}""#)]
fn filter_and_sort(
    world: &mut DashboardWorld,
    status: String,
    sort: String,
) -> Result<(), eyre::Report> {
    world.ensure_loaded()?;
    let parsed_status =
        TaskStatus::try_from(status.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let parsed_sort = SortKey::try_from(sort.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let store = world.coordinator.store();
    store.set_filter(TaskFilter::new().with_status(parsed_status));
    store.set_sort(parsed_sort);
    Ok(())
}

#[when(r#"the list is searched for "{query}""#)]
fn search_for(world: &mut DashboardWorld, query: String) -> Result<(), eyre::Report> {
    world.ensure_loaded()?;
    world
        .coordinator
        .store()
        .set_filter(TaskFilter::new().with_search(query));
    Ok(())
}

#[when("a task with a blank title is created")]
fn create_blank_title(world: &mut DashboardWorld) -> Result<(), eyre::Report> {
    world.ensure_loaded()?;
    let draft = TaskDraft::new("   ");
    let result = run_async(world.coordinator.create(&draft));
    world.last_result = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#"task "{id}" is deleted"#)]
fn delete_task(world: &mut DashboardWorld, id: String) -> Result<(), eyre::Report> {
    world.ensure_loaded()?;
    let task_id = TaskId::new(id).map_err(|err| eyre::eyre!("invalid task id: {err}"))?;
    let result = run_async(world.coordinator.remove(&task_id));
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the task "{title}" is toggled"#)]
fn toggle_task(world: &mut DashboardWorld, title: String) -> Result<(), eyre::Report> {
    world.ensure_loaded()?;
    let current = world.listed_by_title(&title)?;
    let result = run_async(world.coordinator.toggle_status(&current));
    world.last_result = Some(result.map(|_| ()));
    Ok(())
}
