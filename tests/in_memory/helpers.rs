//! Shared test helpers for in-memory integration tests.

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskdeck::notification::NotificationCenter;
use taskdeck::task::{
    adapters::memory::InMemoryTaskGateway,
    domain::{Task, TaskId, TaskPriority, TaskStatus},
    services::{TaskMutationCoordinator, TaskStore},
};

/// Coordinator over the in-memory gateway.
pub type Coordinator = TaskMutationCoordinator<InMemoryTaskGateway, DefaultClock>;

/// Builds a server-side task record.
pub fn task(
    id: &str,
    title: &str,
    status: TaskStatus,
    priority: TaskPriority,
    due: Option<(i32, u32, u32)>,
) -> Task {
    Task::new(TaskId::new(id).expect("valid task id"), title)
        .expect("valid task")
        .with_status(status)
        .with_priority(priority)
        .with_due_date(due.and_then(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day)))
}

/// Provides a server pre-populated with a small board.
#[fixture]
pub fn server() -> InMemoryTaskGateway {
    InMemoryTaskGateway::with_tasks([
        task("41", "Buy milk", TaskStatus::Pending, TaskPriority::Low, Some((2024, 1, 10))),
        task("42", "File taxes", TaskStatus::Pending, TaskPriority::High, Some((2024, 1, 5))),
        task("43", "Team Meeting", TaskStatus::InProgress, TaskPriority::Medium, None),
        task("44", "Gym", TaskStatus::Completed, TaskPriority::Low, None),
    ])
}

/// Builds a coordinator with an empty list over `server`.
pub fn coordinator(server: &InMemoryTaskGateway) -> Coordinator {
    TaskMutationCoordinator::new(
        Arc::new(server.clone()),
        Arc::new(TaskStore::new()),
        Arc::new(NotificationCenter::new(Arc::new(DefaultClock))),
    )
}

/// Returns the titles of `tasks` in order.
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title().to_owned()).collect()
}
