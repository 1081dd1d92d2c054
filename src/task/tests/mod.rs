//! Unit tests for the task list.


use crate::task::domain::{Task, TaskId, TaskPriority, TaskStatus};
use chrono::NaiveDate;

/// Builds a task with the given attributes for test collections.
fn task(
    id: &str,
    title: &str,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<&str>,
) -> Task {
    let task_id = TaskId::new(id).expect("valid task id");
    Task::new(task_id, title)
        .expect("valid task")
        .with_status(status)
        .with_priority(priority)
        .with_due_date(due_date.map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
        }))
}

/// Returns the titles of `tasks` in order.
fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::title).collect()
}
